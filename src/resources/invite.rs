use std::sync::Arc;

use crate::clients::{
    HttpClient, HttpError, HttpMethod, InvalidHttpRequestError, RequestOptions, Route,
};
use crate::models::Invite;
use crate::resources::require_text;

/// Client for the invite endpoints.
#[derive(Clone, Debug)]
pub struct InviteClient {
    http: Arc<HttpClient>,
}

impl InviteClient {
    /// Creates a client on top of a shared transport.
    #[must_use]
    pub const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Resolves an invite code, optionally with approximate member counts.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the code is empty or the request fails.
    pub async fn get_invite(&self, invite_code: &str, with_counts: bool) -> Result<Invite, HttpError> {
        let route = Self::invite_route(HttpMethod::Get, invite_code)?;
        let options = RequestOptions::new().query("with_counts", with_counts);

        self.http.request_json(&route, options).await
    }

    /// Deletes an invite and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the code is empty or the request fails.
    pub async fn delete_invite(&self, invite_code: &str) -> Result<Invite, HttpError> {
        let route = Self::invite_route(HttpMethod::Delete, invite_code)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    fn invite_route(method: HttpMethod, invite_code: &str) -> Result<Route, InvalidHttpRequestError> {
        Route::builder(method, "/invites/{invite_code}")
            .param("invite_code", require_text("invite_code", invite_code)?)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_code_is_encoded() {
        let route = InviteClient::invite_route(HttpMethod::Get, "abc/../x").unwrap();

        assert_eq!(route.path(), "/invites/abc%2F..%2Fx");
    }

    #[test]
    fn test_empty_invite_code_is_rejected() {
        let err = InviteClient::invite_route(HttpMethod::Get, "").unwrap_err();

        assert_eq!(err, InvalidHttpRequestError::MissingArgument { name: "invite_code" });
    }
}
