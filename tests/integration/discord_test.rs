// Discord-linked role routes against a mocked bot service

use super::fixtures::{add_member, add_super_user};
use super::test_utils::{TestServer, UNVERIFIED_ROLE};
use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn guild_members() -> serde_json::Value {
    json!([
        // linked to "ankush"
        { "user": { "id": "12345", "username": "ankush" }, "roles": [] },
        // linked to the super user
        { "user": { "id": "99999", "username": "ankur" }, "roles": [] },
        { "user": { "id": "55555", "username": "lurker" }, "roles": [] },
        { "user": { "id": "77777", "username": "tagged" }, "roles": [UNVERIFIED_ROLE] }
    ])
}

#[tokio::test]
async fn test_apply_unverified_roles() {
    let bot = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discord-members"))
        .and(header("authorization", "Bearer bot-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(guild_members()))
        .expect(1)
        .mount(&bot)
        .await;
    Mock::given(method("PUT"))
        .and(path("/roles/add"))
        .and(body_json(json!({ "userid": "55555", "roleid": UNVERIFIED_ROLE })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&bot)
        .await;

    let server = TestServer::with_bot_url(&bot.uri());
    add_member(&server.store, "ankush").await;
    let admin = add_super_user(&server.store).await;
    let token = server.token_for(&admin);

    let (status, body) = server.send("POST", "/users", None, Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ROLES APPLIED SUCCESSFULLY");
}

#[tokio::test]
async fn test_apply_unverified_roles_bot_failure_is_internal_error() {
    let bot = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discord-members"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&bot)
        .await;

    let server = TestServer::with_bot_url(&bot.uri());
    let admin = add_super_user(&server.store).await;
    let token = server.token_for(&admin);

    let (status, body) = server.send("POST", "/users", None, Some(&token)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "An internal server error occurred");
}

#[tokio::test]
async fn test_apply_unverified_roles_unreachable_bot() {
    let server = TestServer::new();
    let admin = add_super_user(&server.store).await;
    let token = server.token_for(&admin);

    let (status, body) = server.send("POST", "/users", None, Some(&token)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_set_in_discord_false_for_all_users() {
    let server = TestServer::new();
    let member = add_member(&server.store, "ankush").await;
    server
        .store
        .update_user(&member, |u| u.profile.roles.in_discord = true)
        .await
        .unwrap();
    let admin = add_super_user(&server.store).await;
    let token = server.token_for(&admin);

    let (status, body) = server
        .send("POST", "/users/update-in-discord", None, Some(&token))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Successfully added the in_discord field to false for all users"
    );
    let user = server.store.find_user_by_id(&member).await.unwrap();
    assert!(!user.profile.roles.in_discord);
}
