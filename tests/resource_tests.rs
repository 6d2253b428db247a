//! Integration tests for the resource clients.
//!
//! Each test drives a client through the [`RestCord`] facade against a mock
//! server and checks the route, parameters and decoded models.

use std::time::Duration;

use restcord::clients::{HttpError, InvalidHttpRequestError};
use restcord::models::{ChannelType, Identified, OverwriteType, Snowflake};
use restcord::resources::{CreateInvite, MessageQuery, ReactionQuery};
use restcord::{ApiUrl, BotToken, RestCord, RestcordConfig, RetryPolicy};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_restcord(server: &MockServer) -> RestCord {
    let config = RestcordConfig::builder()
        .token(BotToken::new("Bot test-token").unwrap())
        .base_url(ApiUrl::new(server.uri()).unwrap())
        .retry(RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(5),
            step_delay: Duration::from_millis(5),
        })
        .build()
        .unwrap();
    RestCord::new(config)
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_get_user_returns_typed_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "123",
            "username": "bob",
            "discriminator": "0001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let user = assert_ok!(restcord.users().get_user(Snowflake::new(123)).await);

    assert_eq!(user.id(), Snowflake::new(123));
    assert_eq!(user.username, "bob");
    assert_eq!(user.discriminator, "0001");
}

#[tokio::test]
async fn test_get_unknown_user_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/123"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Unknown User", "code": 10013})),
        )
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let err = restcord.users().get_user(Snowflake::new(123)).await.unwrap_err();

    assert!(matches!(err, HttpError::NotFound(_)));
}

#[tokio::test]
async fn test_get_current_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "80351110224678912",
            "username": "Nelly",
            "discriminator": "1337",
            "bot": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let me = restcord.users().get_current_user().await.unwrap();

    assert!(me.bot);
    assert_eq!(me.to_string(), "Nelly#1337");
}

#[tokio::test]
async fn test_mismatched_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let err = restcord.users().get_user(Snowflake::new(5)).await.unwrap_err();

    assert!(matches!(err, HttpError::Decode(_)));
}

// ============================================================================
// Guilds
// ============================================================================

#[tokio::test]
async fn test_get_guild_with_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guilds/41771983423143937"))
        .and(query_param("with_counts", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "41771983423143937",
            "name": "Discord Developers",
            "features": ["COMMUNITY"],
            "approximate_member_count": 120,
            "approximate_presence_count": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let guild = restcord
        .guilds()
        .get_guild(Snowflake::new(41_771_983_423_143_937), true)
        .await
        .unwrap();

    assert_eq!(guild.name, "Discord Developers");
    assert_eq!(guild.approximate_member_count, Some(120));
    assert!(guild.has_feature("COMMUNITY"));
}

#[tokio::test]
async fn test_get_members_passes_paging_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guilds/1/members"))
        .and(query_param("limit", "2"))
        .and(query_param("after", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"user": {"id": "11", "username": "a"}, "joined_at": "2020-01-01T00:00:00+00:00"},
            {"user": {"id": "12", "username": "b"}, "nick": "bee", "joined_at": "2020-01-02T00:00:00+00:00"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let members = restcord
        .guilds()
        .get_members(Snowflake::new(1), 2, Some(Snowflake::new(10)))
        .await
        .unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[1].display_name(), "bee");
}

#[tokio::test]
async fn test_get_bans_and_roles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guilds/1/bans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"reason": null, "user": {"id": "2", "username": "spam"}}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/guilds/1/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "name": "@everyone", "permissions": "0"},
            {"id": "3", "name": "mods", "permissions": "8", "hoist": true}
        ])))
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let guilds = restcord.guilds();

    let bans = guilds.get_bans(Snowflake::new(1)).await.unwrap();
    assert_eq!(bans.len(), 1);
    assert!(bans[0].reason.is_none());

    let roles = guilds.get_roles(Snowflake::new(1)).await.unwrap();
    assert_eq!(roles[1].mention(), "<@&3>");
    assert!(roles[1].hoist);
}

// ============================================================================
// Channels
// ============================================================================

#[tokio::test]
async fn test_get_channel_with_overwrites() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5",
            "type": 2,
            "guild_id": "1",
            "name": "voice",
            "permission_overwrites": [{"id": "1", "type": 0, "allow": "0", "deny": "1024"}]
        })))
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let channel = restcord.channels().get_channel(Snowflake::new(5)).await.unwrap();

    assert_eq!(channel.kind, ChannelType::GuildVoice);
    assert_eq!(channel.permission_overwrites[0].kind, OverwriteType::Role);
    assert_eq!(channel.mention(), "<#5>");
}

#[tokio::test]
async fn test_get_messages_sends_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels/5/messages"))
        .and(query_param("limit", "2"))
        .and(query_param("around", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "101", "channel_id": "5", "content": "b", "timestamp": "2020-01-01T00:00:01+00:00"},
            {"id": "100", "channel_id": "5", "content": "a", "timestamp": "2020-01-01T00:00:00+00:00"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let messages = restcord
        .channels()
        .get_messages(Snowflake::new(5), MessageQuery::new().around(Snowflake::new(100)).limit(2))
        .await
        .unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "b");
}

#[tokio::test]
async fn test_reactions_use_encoded_emoji() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/channels/5/messages/6/reactions/LUL%3A7/@me"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels/5/messages/6/reactions/LUL%3A7"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "9", "username": "reactor"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let channels = restcord.channels();
    let (channel, message) = (Snowflake::new(5), Snowflake::new(6));

    assert_ok!(channels.add_reaction(channel, message, "LUL:7").await);
    let users = channels
        .get_reactions(channel, message, "LUL:7", ReactionQuery::new())
        .await
        .unwrap();

    assert_eq!(users[0].username, "reactor");
}

#[tokio::test]
async fn test_bulk_delete_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/channels/5/messages/bulk-delete"))
        .and(body_json(json!({"messages": ["10", "11"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);

    assert_ok!(
        restcord
            .channels()
            .bulk_delete_messages(Snowflake::new(5), &[Snowflake::new(10), Snowflake::new(11)])
            .await
    );
}

#[tokio::test]
async fn test_create_invite_sends_settings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/channels/5/invites"))
        .and(body_json(json!({
            "max_age": 3600,
            "max_uses": 1,
            "temporary": false,
            "unique": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "abc123",
            "max_age": 3600,
            "max_uses": 1,
            "uses": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let settings = CreateInvite {
        max_age: 3600,
        max_uses: 1,
        unique: true,
        ..CreateInvite::default()
    };
    let invite = restcord
        .channels()
        .create_invite(Snowflake::new(5), settings)
        .await
        .unwrap();

    assert_eq!(invite.code, "abc123");
    assert_eq!(invite.max_uses, Some(1));
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);

    let err = restcord
        .channels()
        .get_message(Snowflake::new(0), Snowflake::new(1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HttpError::InvalidRequest(InvalidHttpRequestError::MissingArgument { name: "channel_id" })
    ));

    let err = restcord.invites().get_invite("", true).await.unwrap_err();
    assert!(matches!(err, HttpError::InvalidRequest(_)));

    let err = restcord
        .webhooks()
        .get_webhook_with_token(Snowflake::new(1), "")
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::InvalidRequest(_)));
}

// ============================================================================
// Emoji, invites, voice and webhooks
// ============================================================================

#[tokio::test]
async fn test_get_emojis() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guilds/1/emojis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "7", "name": "LUL", "animated": false},
            {"id": "8", "name": "dance", "animated": true}
        ])))
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let emojis = restcord.emojis().get_emojis(Snowflake::new(1)).await.unwrap();

    assert_eq!(emojis[0].mention(), "<:LUL:7>");
    assert_eq!(emojis[1].mention(), "<a:dance:8>");
}

#[tokio::test]
async fn test_get_invite_with_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invites/abc123"))
        .and(query_param("with_counts", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "abc123",
            "guild": {"id": "1", "name": "guild"},
            "channel": {"id": "2", "name": "general", "type": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let invite = restcord.invites().get_invite("abc123", false).await.unwrap();

    assert_eq!(invite.guild.unwrap().name, "guild");
}

#[tokio::test]
async fn test_get_voice_regions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/voice/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "rotterdam", "name": "Rotterdam", "optimal": true}
        ])))
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let regions = restcord.voice().get_voice_regions().await.unwrap();

    assert_eq!(regions[0].id, "rotterdam");
    assert!(regions[0].optimal);
}

#[tokio::test]
async fn test_webhook_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhooks/3/secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "3",
            "type": 1,
            "channel_id": "2",
            "name": "hook",
            "token": "secret-token"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/webhooks/3/secret-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let restcord = create_restcord(&server);
    let webhooks = restcord.webhooks();

    let webhook = webhooks
        .get_webhook_with_token(Snowflake::new(3), "secret-token")
        .await
        .unwrap();
    assert_eq!(webhook.name.as_deref(), Some("hook"));
    assert!(!format!("{webhook:?}").contains("secret-token"));

    assert_ok!(
        webhooks
            .delete_webhook_with_token(Snowflake::new(3), "secret-token")
            .await
    );
}
