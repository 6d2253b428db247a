use std::sync::Arc;

use crate::clients::{
    HttpClient, HttpError, HttpMethod, InvalidHttpRequestError, RequestOptions, Route,
};
use crate::models::{Snowflake, Webhook};
use crate::resources::{require_id, require_text};

/// Client for the webhook endpoints.
///
/// The `_with_token` variants authenticate with the webhook's own token and
/// return webhooks without the `user` field.
#[derive(Clone, Debug)]
pub struct WebhookClient {
    http: Arc<HttpClient>,
}

impl WebhookClient {
    /// Creates a client on top of a shared transport.
    #[must_use]
    pub const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetches a webhook by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_webhook(&self, webhook_id: Snowflake) -> Result<Webhook, HttpError> {
        let route = Self::webhook_route(HttpMethod::Get, webhook_id, None)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Fetches a webhook by id and token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero, the token is empty, or the
    /// request fails.
    pub async fn get_webhook_with_token(
        &self,
        webhook_id: Snowflake,
        webhook_token: &str,
    ) -> Result<Webhook, HttpError> {
        let route = Self::webhook_route(HttpMethod::Get, webhook_id, Some(webhook_token))?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Lists the webhooks of a channel.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_channel_webhooks(&self, channel_id: Snowflake) -> Result<Vec<Webhook>, HttpError> {
        let route = Route::builder(HttpMethod::Get, "/channels/{channel_id}/webhooks")
            .param("channel_id", require_id("channel_id", channel_id)?)
            .build()?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Lists the webhooks of a guild.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_guild_webhooks(&self, guild_id: Snowflake) -> Result<Vec<Webhook>, HttpError> {
        let route = Route::builder(HttpMethod::Get, "/guilds/{guild_id}/webhooks")
            .param("guild_id", require_id("guild_id", guild_id)?)
            .build()?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Deletes a webhook.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn delete_webhook(&self, webhook_id: Snowflake) -> Result<(), HttpError> {
        let route = Self::webhook_route(HttpMethod::Delete, webhook_id, None)?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    /// Deletes a webhook using its token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero, the token is empty, or the
    /// request fails.
    pub async fn delete_webhook_with_token(
        &self,
        webhook_id: Snowflake,
        webhook_token: &str,
    ) -> Result<(), HttpError> {
        let route = Self::webhook_route(HttpMethod::Delete, webhook_id, Some(webhook_token))?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    fn webhook_route(
        method: HttpMethod,
        webhook_id: Snowflake,
        webhook_token: Option<&str>,
    ) -> Result<Route, InvalidHttpRequestError> {
        let webhook_id = require_id("webhook_id", webhook_id)?;
        match webhook_token {
            Some(token) => Route::builder(method, "/webhooks/{webhook_id}/{webhook_token}")
                .param("webhook_id", webhook_id)
                .param("webhook_token", require_text("webhook_token", token)?)
                .build(),
            None => Route::builder(method, "/webhooks/{webhook_id}")
                .param("webhook_id", webhook_id)
                .build(),
        }
    }
}
