use std::sync::Arc;

use crate::clients::{
    HttpClient, HttpError, HttpMethod, InvalidHttpRequestError, RequestOptions, Route,
};
use crate::models::{Emoji, Snowflake};
use crate::resources::require_id;

/// Client for a guild's custom emoji.
#[derive(Clone, Debug)]
pub struct EmojiClient {
    http: Arc<HttpClient>,
}

impl EmojiClient {
    /// Creates a client on top of a shared transport.
    #[must_use]
    pub const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetches one custom emoji.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an id is zero or the request fails.
    pub async fn get_emoji(&self, guild_id: Snowflake, emoji_id: Snowflake) -> Result<Emoji, HttpError> {
        let route = Self::emoji_route(HttpMethod::Get, guild_id, emoji_id)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Lists a guild's custom emoji.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_emojis(&self, guild_id: Snowflake) -> Result<Vec<Emoji>, HttpError> {
        let route = Route::builder(HttpMethod::Get, "/guilds/{guild_id}/emojis")
            .param("guild_id", require_id("guild_id", guild_id)?)
            .build()?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Deletes a custom emoji.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an id is zero or the request fails.
    pub async fn delete_emoji(&self, guild_id: Snowflake, emoji_id: Snowflake) -> Result<(), HttpError> {
        let route = Self::emoji_route(HttpMethod::Delete, guild_id, emoji_id)?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    fn emoji_route(
        method: HttpMethod,
        guild_id: Snowflake,
        emoji_id: Snowflake,
    ) -> Result<Route, InvalidHttpRequestError> {
        Route::builder(method, "/guilds/{guild_id}/emojis/{emoji_id}")
            .param("guild_id", require_id("guild_id", guild_id)?)
            .param("emoji_id", require_id("emoji_id", emoji_id)?)
            .build()
    }
}
