// Public listing and lookup routes

use super::fixtures::{add_archived, add_member};
use super::test_utils::TestServer;
use axum::http::StatusCode;

async fn seeded() -> (TestServer, String) {
    let server = TestServer::new();
    let first = add_member(&server.store, "ankush").await;
    for name in ["ankita", "anshul", "bhavesh", "23rd-user", "mehul"] {
        add_member(&server.store, name).await;
    }
    (server, first)
}

fn usernames(body: &serde_json::Value) -> Vec<String> {
    body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_users_hides_contact_details() {
    let (server, _) = seeded().await;

    let (status, body) = server.send("GET", "/users", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Users returned successfully!");
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 6);
    for user in users {
        assert!(user.get("phone").is_none());
        assert!(user.get("email").is_none());
        assert!(user.get("chaincode").is_none());
    }
}

#[tokio::test]
async fn test_list_users_skips_archived() {
    let (server, _) = seeded().await;
    add_archived(&server.store, "archived-user").await;

    let (status, body) = server.send("GET", "/users", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!usernames(&body).contains(&"archived-user".to_string()));
    for user in body["users"].as_array().unwrap() {
        assert_eq!(user["roles"]["archived"], false);
    }
}

#[tokio::test]
async fn test_list_users_respects_size() {
    let (server, _) = seeded().await;

    let (status, body) = server.send("GET", "/users?size=1&page=0", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_users_rejects_out_of_range_size() {
    let (server, _) = seeded().await;

    for uri in ["/users?size=0", "/users?size=101&page=1"] {
        let (status, body) = server.send("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "size must be in range 1-100");
        assert_eq!(body["error"], "Bad Request");
    }
}

#[tokio::test]
async fn test_list_users_rejects_conflicting_cursor_params() {
    let (server, id) = seeded().await;

    let cases = [
        (
            format!("/users?next={id}&prev={id}&size=2"),
            "Both prev and next can't be passed",
        ),
        (
            format!("/users?next={id}&page=1&size=2"),
            "Both page and next can't be passed",
        ),
        (
            format!("/users?page=1&prev={id}&size=2"),
            "Both page and prev can't be passed",
        ),
    ];
    for (uri, message) in cases {
        let (status, body) = server.send("GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], message);
    }
}

#[tokio::test]
async fn test_list_users_rejects_garbage_cursor() {
    let (server, _) = seeded().await;

    let (status, body) = server.send("GET", "/users?next=not-a-cursor", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid cursor");
}

#[tokio::test]
async fn test_links_carry_search_and_size() {
    let (server, _) = seeded().await;

    let (status, body) = server.send("GET", "/users?search=an&size=2", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let next = body["links"]["next"].as_str().unwrap();
    let prev = body["links"]["prev"].as_str().unwrap();
    for link in [next, prev] {
        assert!(link.contains("search=an"), "{link}");
        assert!(link.contains("size=2"), "{link}");
    }
}

#[tokio::test]
async fn test_links_drop_page() {
    let (server, _) = seeded().await;

    let (status, body) = server.send("GET", "/users?page=1&size=2", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["links"]["next"].as_str().unwrap().contains("page"));
    assert!(!body["links"]["prev"].as_str().unwrap().contains("page"));
}

#[tokio::test]
async fn test_next_and_prev_links_walk_the_listing() {
    let (server, _) = seeded().await;

    let (_, first) = server.send("GET", "/users?size=2", None, None).await;
    let first_page = usernames(&first);
    assert_eq!(first_page, vec!["23rd-user", "ankita"]);

    let next = first["links"]["next"].as_str().unwrap().to_string();
    let (status, second) = server.send("GET", &next, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "Users returned successfully!");
    assert_eq!(usernames(&second), vec!["ankush", "anshul"]);

    let prev = second["links"]["prev"].as_str().unwrap().to_string();
    let (status, back) = server.send("GET", &prev, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&back), first_page);
}

#[tokio::test]
async fn test_empty_page_has_empty_links() {
    let (server, _) = seeded().await;

    let (status, body) = server.send("GET", "/users?search=mu", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 0);
    assert_eq!(body["links"]["next"], "");
    assert_eq!(body["links"]["prev"], "");
}

#[tokio::test]
async fn test_search_matches_username_prefix_case_insensitively() {
    let (server, _) = seeded().await;

    let (_, lower) = server.send("GET", "/users?search=an", None, None).await;
    let (_, upper) = server.send("GET", "/users?search=AN", None, None).await;
    let (_, digits) = server.send("GET", "/users?search=23", None, None).await;

    assert_eq!(usernames(&lower), vec!["ankita", "ankush", "anshul"]);
    assert_eq!(usernames(&upper), usernames(&lower));
    assert_eq!(usernames(&digits), vec!["23rd-user"]);
}

#[tokio::test]
async fn test_non_numeric_size_names_the_field() {
    let (server, _) = seeded().await;

    let (status, body) = server.send("GET", "/users?size=abc", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "\"size\" must be a number");
}

#[tokio::test]
async fn test_empty_search_is_rejected() {
    let (server, _) = seeded().await;

    let (status, body) = server.send("GET", "/users?search=", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "\"search\" is not allowed to be empty");
}

#[tokio::test]
async fn test_list_users_by_id_query() {
    let (server, id) = seeded().await;

    let (status, body) = server.send("GET", &format!("/users/?id={id}"), None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User returned successfully!");
    assert_eq!(body["user"]["id"], id.as_str());
    assert_eq!(body["user"]["username"], "ankush");
    assert!(body["user"].get("email").is_none());

    let (status, body) = server.send("GET", "/users/?id=anyRandomuserId", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User doesn't exist");
}

#[tokio::test]
async fn test_get_user_by_username() {
    let (server, _) = seeded().await;

    let (status, body) = server.send("GET", "/users/ankush", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User returned successfully!");
    assert!(body["user"].get("phone").is_none());
    assert!(body["user"].get("email").is_none());

    let (status, body) = server.send("GET", "/users/invalidUser", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        serde_json::json!({
            "statusCode": 404,
            "error": "Not Found",
            "message": "User doesn't exist"
        })
    );
}

#[tokio::test]
async fn test_get_user_by_id() {
    let (server, id) = seeded().await;
    let token = server.token_for(&id);

    let (status, body) = server
        .send("GET", &format!("/users/userId/{id}"), None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User returned successfully!");
    assert_eq!(body["user"]["id"], id.as_str());

    let (status, body) = server
        .send("GET", "/users/userId/invalidUserId", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User doesn't exist");
}

#[tokio::test]
async fn test_is_username_available() {
    let (server, id) = seeded().await;
    let token = server.token_for(&id);

    let (status, body) = server
        .send("GET", "/users/isUsernameAvailable/availableUser", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isUsernameAvailable"], true);

    let (_, body) = server
        .send("GET", "/users/isUsernameAvailable/ankush", None, Some(&token))
        .await;
    assert_eq!(body["isUsernameAvailable"], false);
}
