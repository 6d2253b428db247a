use std::sync::Arc;

use crate::clients::{HttpClient, HttpError, HttpMethod, RequestOptions, Route};
use crate::models::{Snowflake, User};
use crate::resources::require_id;

/// Client for the user endpoints.
#[derive(Clone, Debug)]
pub struct UserClient {
    http: Arc<HttpClient>,
}

impl UserClient {
    /// Creates a client on top of a shared transport.
    #[must_use]
    pub const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a zero id, or
    /// [`HttpError::NotFound`] if no such user exists.
    pub async fn get_user(&self, user_id: Snowflake) -> Result<User, HttpError> {
        let route = Route::builder(HttpMethod::Get, "/users/{user_id}")
            .param("user_id", require_id("user_id", user_id)?)
            .build()?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Fetches the user the bot token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get_current_user(&self) -> Result<User, HttpError> {
        let route = Route::builder(HttpMethod::Get, "/users/@me").build()?;

        self.http.request_json(&route, RequestOptions::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InvalidHttpRequestError;
    use crate::resources::test_support::offline_http;

    #[tokio::test]
    async fn test_get_user_rejects_zero_id() {
        let users = UserClient::new(offline_http());

        let err = users.get_user(Snowflake::new(0)).await.unwrap_err();

        assert!(matches!(
            err,
            HttpError::InvalidRequest(InvalidHttpRequestError::MissingArgument { name: "user_id" })
        ));
    }
}
