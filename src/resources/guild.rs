use std::sync::Arc;

use crate::clients::{
    HttpClient, HttpError, HttpMethod, InvalidHttpRequestError, RequestOptions, Route,
};
use crate::models::{Ban, Channel, Guild, GuildPreview, Member, Role, Snowflake};
use crate::resources::{require_id, require_range};

/// Client for the guild endpoints.
#[derive(Clone, Debug)]
pub struct GuildClient {
    http: Arc<HttpClient>,
}

impl GuildClient {
    /// Creates a client on top of a shared transport.
    #[must_use]
    pub const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetches a guild, optionally with approximate member and presence
    /// counts.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_guild(&self, guild_id: Snowflake, with_counts: bool) -> Result<Guild, HttpError> {
        let route = Self::guild_route("/guilds/{guild_id}", guild_id)?;
        let options = RequestOptions::new().query("with_counts", with_counts);

        self.http.request_json(&route, options).await
    }

    /// Fetches the public preview of a guild.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_guild_preview(&self, guild_id: Snowflake) -> Result<GuildPreview, HttpError> {
        let route = Self::guild_route("/guilds/{guild_id}/preview", guild_id)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Fetches one member of a guild.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an id is zero or the request fails.
    pub async fn get_member(&self, guild_id: Snowflake, user_id: Snowflake) -> Result<Member, HttpError> {
        let route = Self::guild_user_route("/guilds/{guild_id}/members/{user_id}", guild_id, user_id)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Lists up to `limit` (1-1000) members, ordered by user id and starting
    /// after `after` when given.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the id is zero or the limit is
    /// out of range, or [`HttpError`] if the request fails.
    pub async fn get_members(
        &self,
        guild_id: Snowflake,
        limit: u16,
        after: Option<Snowflake>,
    ) -> Result<Vec<Member>, HttpError> {
        let route = Self::guild_route("/guilds/{guild_id}/members", guild_id)?;
        let options = RequestOptions::new()
            .query("limit", require_range("limit", limit, 1..=1000)?)
            .query_opt("after", after);

        self.http.request_json(&route, options).await
    }

    /// Lists a guild's channels.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_channels(&self, guild_id: Snowflake) -> Result<Vec<Channel>, HttpError> {
        let route = Self::guild_route("/guilds/{guild_id}/channels", guild_id)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Lists a guild's roles.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_roles(&self, guild_id: Snowflake) -> Result<Vec<Role>, HttpError> {
        let route = Self::guild_route("/guilds/{guild_id}/roles", guild_id)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Fetches the ban for one user.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the user is not banned, or
    /// [`HttpError`] if an id is zero or the request fails.
    pub async fn get_ban(&self, guild_id: Snowflake, user_id: Snowflake) -> Result<Ban, HttpError> {
        let route = Self::guild_user_route("/guilds/{guild_id}/bans/{user_id}", guild_id, user_id)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Lists a guild's bans.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_bans(&self, guild_id: Snowflake) -> Result<Vec<Ban>, HttpError> {
        let route = Self::guild_route("/guilds/{guild_id}/bans", guild_id)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    fn guild_route(template: &'static str, guild_id: Snowflake) -> Result<Route, InvalidHttpRequestError> {
        Route::builder(HttpMethod::Get, template)
            .param("guild_id", require_id("guild_id", guild_id)?)
            .build()
    }

    fn guild_user_route(
        template: &'static str,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<Route, InvalidHttpRequestError> {
        Route::builder(HttpMethod::Get, template)
            .param("guild_id", require_id("guild_id", guild_id)?)
            .param("user_id", require_id("user_id", user_id)?)
            .build()
    }
}
