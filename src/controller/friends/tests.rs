use super::*;
use crate::request::HttpMethod;
use crate::testing::{TEST_USER_ID, signed_in, user};
use serde_json::json;

#[tokio::test]
async fn test_friends_are_deduplicated() {
    let (http, _session, guard) = signed_in();
    http.respond(
        HttpMethod::Get,
        "/friends",
        200,
        json!([{ "_id": "a" }, { "_id": "b" }, { "_id": "a" }]),
    );
    let friends = FriendsController::new(guard);

    friends.load().await;

    assert_eq!(friends.state.get().ready().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_friends_failure_is_shown() {
    let (http, _session, guard) = signed_in();
    http.respond(HttpMethod::Get, "/friends", 500, json!({ "message": "db down" }));
    let friends = FriendsController::new(guard);

    friends.load().await;

    assert_eq!(friends.state.get().error(), Some("db down"));
}

fn mock_directory(http: &crate::request::mock::MockHttpClient) {
    http.respond(
        HttpMethod::Get,
        "/users",
        200,
        json!([
            user(TEST_USER_ID, "me"),
            user("f1", "fran"),
            user("s1", "sam"),
            user("n1", "nia")
        ]),
    );
    http.respond(HttpMethod::Get, "/friends", 200, json!([user("f1", "fran")]));
    http.respond(
        HttpMethod::Get,
        "/users/me",
        200,
        json!({ "_id": TEST_USER_ID, "sentRequests": ["s1"] }),
    );
}

#[tokio::test]
async fn test_candidates_exclude_self_friends_and_sent() {
    let (http, _session, guard) = signed_in();
    mock_directory(&http);
    let add = AddFriendsController::new(guard);

    add.load().await;

    let state = add.state.get();
    let ids: Vec<_> = state.ready().unwrap().iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["n1"]);
}

#[tokio::test]
async fn test_required_join_applies_nothing_on_failure() {
    let (http, _session, guard) = signed_in();
    mock_directory(&http);
    http.fail(HttpMethod::Get, "/users/me");
    let add = AddFriendsController::new(guard);

    add.load().await;

    let state = add.state.get();
    assert!(state.ready().is_none());
    assert!(state.error().is_some());
}

#[tokio::test]
async fn test_send_request_removes_candidate() {
    let (http, _session, guard) = signed_in();
    mock_directory(&http);
    http.respond(HttpMethod::Post, "/friends/request/n1", 200, json!({}));
    let add = AddFriendsController::new(guard);
    add.load().await;

    add.send_request("n1").await;

    assert_eq!(add.state.get().ready().map(Vec::len), Some(0));
    assert_eq!(
        add.context().notice().get().map(|n| n.message),
        Some("Friend request sent".to_string())
    );
}

#[tokio::test]
async fn test_send_request_failure_keeps_candidate() {
    let (http, _session, guard) = signed_in();
    mock_directory(&http);
    http.respond(
        HttpMethod::Post,
        "/friends/request/n1",
        400,
        json!({ "message": "Request already sent" }),
    );
    let add = AddFriendsController::new(guard);
    add.load().await;

    add.send_request("n1").await;

    assert_eq!(add.state.get().ready().map(Vec::len), Some(1));
    assert_eq!(add.request_error.get().as_deref(), Some("Request already sent"));
    assert_eq!(add.context().notice().get(), None);
}

#[tokio::test]
async fn test_required_join_fails_when_a_list_fails() {
    let (http, _session, guard) = signed_in();
    mock_directory(&http);
    http.respond(HttpMethod::Get, "/friends", 500, json!({ "message": "db down" }));
    let add = AddFriendsController::new(guard);

    add.load().await;

    assert_eq!(add.state.get().error(), Some("db down"));
}
