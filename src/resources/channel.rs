use std::sync::Arc;

use serde::Serialize;

use crate::clients::{
    HttpClient, HttpError, HttpMethod, InvalidHttpRequestError, RequestOptions, Route,
};
use crate::models::{Channel, Invite, Message, Snowflake, User};
use crate::resources::{require_id, require_range, require_text};

/// Filters for [`ChannelClient::get_messages`].
///
/// At most one of `around`, `before` and `after` may be set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageQuery {
    /// Fetch messages around this message id.
    pub around: Option<Snowflake>,
    /// Fetch messages before this message id.
    pub before: Option<Snowflake>,
    /// Fetch messages after this message id.
    pub after: Option<Snowflake>,
    /// Maximum number of messages to return (1-100, default 50).
    pub limit: u8,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            around: None,
            before: None,
            after: None,
            limit: 50,
        }
    }
}

impl MessageQuery {
    /// Creates a query for the 50 most recent messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches messages around `id`.
    #[must_use]
    pub const fn around(mut self, id: Snowflake) -> Self {
        self.around = Some(id);
        self
    }

    /// Fetches messages before `id`.
    #[must_use]
    pub const fn before(mut self, id: Snowflake) -> Self {
        self.before = Some(id);
        self
    }

    /// Fetches messages after `id`.
    #[must_use]
    pub const fn after(mut self, id: Snowflake) -> Self {
        self.after = Some(id);
        self
    }

    /// Sets the maximum number of messages (1-100).
    #[must_use]
    pub const fn limit(mut self, limit: u8) -> Self {
        self.limit = limit;
        self
    }

    fn to_options(self) -> Result<RequestOptions, InvalidHttpRequestError> {
        let anchors = [self.around, self.before, self.after]
            .iter()
            .filter(|anchor| anchor.is_some())
            .count();
        if anchors > 1 {
            return Err(InvalidHttpRequestError::InvalidArgument {
                name: "query",
                reason: "only one of around, before and after may be set".to_string(),
            });
        }

        Ok(RequestOptions::new()
            .query("limit", require_range("limit", self.limit, 1..=100)?)
            .query_opt("around", self.around)
            .query_opt("before", self.before)
            .query_opt("after", self.after))
    }
}

/// Filters for [`ChannelClient::get_reactions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReactionQuery {
    /// Fetch users before this user id.
    pub before: Option<Snowflake>,
    /// Fetch users after this user id.
    pub after: Option<Snowflake>,
    /// Maximum number of users to return (1-100, default 25).
    pub limit: u8,
}

impl Default for ReactionQuery {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
            limit: 25,
        }
    }
}

impl ReactionQuery {
    /// Creates a query for the first 25 users.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches users before `id`.
    #[must_use]
    pub const fn before(mut self, id: Snowflake) -> Self {
        self.before = Some(id);
        self
    }

    /// Fetches users after `id`.
    #[must_use]
    pub const fn after(mut self, id: Snowflake) -> Self {
        self.after = Some(id);
        self
    }

    /// Sets the maximum number of users (1-100).
    #[must_use]
    pub const fn limit(mut self, limit: u8) -> Self {
        self.limit = limit;
        self
    }

    fn to_options(self) -> Result<RequestOptions, InvalidHttpRequestError> {
        Ok(RequestOptions::new()
            .query("limit", require_range("limit", self.limit, 1..=100)?)
            .query_opt("before", self.before)
            .query_opt("after", self.after))
    }
}

/// Settings for [`ChannelClient::create_invite`].
///
/// The defaults create a reusable invite that expires after one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CreateInvite {
    /// Seconds until the invite expires, or 0 for never.
    pub max_age: u32,
    /// Maximum number of uses, or 0 for unlimited.
    pub max_uses: u32,
    /// Whether the invite only grants temporary membership.
    pub temporary: bool,
    /// Whether to always create a new invite rather than reuse a similar one.
    pub unique: bool,
    /// The user whose stream the invite targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_user: Option<Snowflake>,
    /// The kind of target user invite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_user_type: Option<u8>,
}

impl Default for CreateInvite {
    fn default() -> Self {
        Self {
            max_age: 86_400,
            max_uses: 0,
            temporary: false,
            unique: false,
            target_user: None,
            target_user_type: None,
        }
    }
}

#[derive(Serialize)]
struct BulkDelete<'a> {
    messages: &'a [Snowflake],
}

/// Client for the channel, message, reaction and channel invite endpoints.
///
/// Emoji arguments take the form the API expects: the unicode character for
/// standard emoji, or `name:id` for custom ones (see
/// [`Emoji::reaction_key`](crate::models::Emoji::reaction_key)). They are
/// percent-encoded by the route.
#[derive(Clone, Debug)]
pub struct ChannelClient {
    http: Arc<HttpClient>,
}

impl ChannelClient {
    /// Creates a client on top of a shared transport.
    #[must_use]
    pub const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetches a channel by id.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_channel(&self, channel_id: Snowflake) -> Result<Channel, HttpError> {
        let route = Self::channel_route(HttpMethod::Get, "/channels/{channel_id}", channel_id)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Deletes a guild channel or closes a private message.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn delete_channel(&self, channel_id: Snowflake) -> Result<(), HttpError> {
        let route = Self::channel_route(HttpMethod::Delete, "/channels/{channel_id}", channel_id)?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    /// Fetches a single message.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an id is zero or the request fails.
    pub async fn get_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Result<Message, HttpError> {
        let route = Self::message_route(
            HttpMethod::Get,
            "/channels/{channel_id}/messages/{message_id}",
            channel_id,
            message_id,
        )?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Fetches messages from a channel, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the id is zero, the limit is
    /// outside 1-100 or more than one anchor is set, or [`HttpError`] if the
    /// request fails.
    pub async fn get_messages(
        &self,
        channel_id: Snowflake,
        query: MessageQuery,
    ) -> Result<Vec<Message>, HttpError> {
        let route =
            Self::channel_route(HttpMethod::Get, "/channels/{channel_id}/messages", channel_id)?;

        self.http.request_json(&route, query.to_options()?).await
    }

    /// Deletes a message.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an id is zero or the request fails.
    pub async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Result<(), HttpError> {
        let route = Self::message_route(
            HttpMethod::Delete,
            "/channels/{channel_id}/messages/{message_id}",
            channel_id,
            message_id,
        )?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    /// Deletes between 2 and 100 messages in one request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the id list is outside 2-100
    /// entries or contains a zero id, or [`HttpError::BadRequest`] if the API
    /// rejects a duplicate or a message older than two weeks.
    pub async fn bulk_delete_messages(
        &self,
        channel_id: Snowflake,
        message_ids: &[Snowflake],
    ) -> Result<(), HttpError> {
        if message_ids.is_empty() {
            return Err(InvalidHttpRequestError::MissingArgument {
                name: "message_ids",
            }
            .into());
        }
        require_range("message_ids", message_ids.len(), 2..=100)?;
        if message_ids.iter().any(|id| id.is_zero()) {
            return Err(InvalidHttpRequestError::InvalidArgument {
                name: "message_ids",
                reason: "contains a zero id".to_string(),
            }
            .into());
        }

        let route = Self::channel_route(
            HttpMethod::Post,
            "/channels/{channel_id}/messages/bulk-delete",
            channel_id,
        )?;
        let options = RequestOptions::new().serialize_json(&BulkDelete {
            messages: message_ids,
        })?;

        self.http.request(&route, options).await?;
        Ok(())
    }

    /// Reacts to a message as the current user.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an argument is empty or the request fails.
    pub async fn add_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> Result<(), HttpError> {
        let route = Self::reaction_route(
            HttpMethod::Put,
            "/channels/{channel_id}/messages/{message_id}/reactions/{emoji}/@me",
            channel_id,
            message_id,
            emoji,
        )?
        .build()?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    /// Removes the current user's reaction from a message.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an argument is empty or the request fails.
    pub async fn delete_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> Result<(), HttpError> {
        let route = Self::reaction_route(
            HttpMethod::Delete,
            "/channels/{channel_id}/messages/{message_id}/reactions/{emoji}/@me",
            channel_id,
            message_id,
            emoji,
        )?
        .build()?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    /// Removes another user's reaction from a message.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an argument is empty or the request fails.
    pub async fn delete_user_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
        user_id: Snowflake,
    ) -> Result<(), HttpError> {
        let route = Self::reaction_route(
            HttpMethod::Delete,
            "/channels/{channel_id}/messages/{message_id}/reactions/{emoji}/{user_id}",
            channel_id,
            message_id,
            emoji,
        )?
        .param("user_id", require_id("user_id", user_id)?)
        .build()?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    /// Lists the users who reacted to a message with an emoji.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an argument is empty, the limit is outside
    /// 1-100, or the request fails.
    pub async fn get_reactions(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
        query: ReactionQuery,
    ) -> Result<Vec<User>, HttpError> {
        let route = Self::reaction_route(
            HttpMethod::Get,
            "/channels/{channel_id}/messages/{message_id}/reactions/{emoji}",
            channel_id,
            message_id,
            emoji,
        )?
        .build()?;

        self.http.request_json(&route, query.to_options()?).await
    }

    /// Removes every reaction from a message.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an id is zero or the request fails.
    pub async fn delete_all_reactions(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Result<(), HttpError> {
        let route = Self::message_route(
            HttpMethod::Delete,
            "/channels/{channel_id}/messages/{message_id}/reactions",
            channel_id,
            message_id,
        )?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    /// Removes every reaction with one emoji from a message.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if an argument is empty or the request fails.
    pub async fn delete_all_reactions_for_emoji(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> Result<(), HttpError> {
        let route = Self::reaction_route(
            HttpMethod::Delete,
            "/channels/{channel_id}/messages/{message_id}/reactions/{emoji}",
            channel_id,
            message_id,
            emoji,
        )?
        .build()?;

        self.http.request(&route, RequestOptions::new()).await?;
        Ok(())
    }

    /// Lists a channel's invites.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn get_invites(&self, channel_id: Snowflake) -> Result<Vec<Invite>, HttpError> {
        let route =
            Self::channel_route(HttpMethod::Get, "/channels/{channel_id}/invites", channel_id)?;

        self.http.request_json(&route, RequestOptions::new()).await
    }

    /// Creates an invite for a channel.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the id is zero or the request fails.
    pub async fn create_invite(
        &self,
        channel_id: Snowflake,
        invite: CreateInvite,
    ) -> Result<Invite, HttpError> {
        let route =
            Self::channel_route(HttpMethod::Post, "/channels/{channel_id}/invites", channel_id)?;
        let options = RequestOptions::new().serialize_json(&invite)?;

        self.http.request_json(&route, options).await
    }

    fn channel_route(
        method: HttpMethod,
        template: &'static str,
        channel_id: Snowflake,
    ) -> Result<Route, InvalidHttpRequestError> {
        Route::builder(method, template)
            .param("channel_id", require_id("channel_id", channel_id)?)
            .build()
    }

    fn message_route(
        method: HttpMethod,
        template: &'static str,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Result<Route, InvalidHttpRequestError> {
        Route::builder(method, template)
            .param("channel_id", require_id("channel_id", channel_id)?)
            .param("message_id", require_id("message_id", message_id)?)
            .build()
    }

    fn reaction_route(
        method: HttpMethod,
        template: &'static str,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> Result<crate::clients::RouteBuilder, InvalidHttpRequestError> {
        Ok(Route::builder(method, template)
            .param("channel_id", require_id("channel_id", channel_id)?)
            .param("message_id", require_id("message_id", message_id)?)
            .param("emoji", require_text("emoji", emoji)?))
    }
}
