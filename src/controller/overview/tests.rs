use super::*;
use crate::request::HttpMethod;
use crate::testing::{signed_in, user, TEST_USER_ID};
use serde_json::json;

fn mock_all(http: &crate::request::mock::MockHttpClient) {
    http.respond(
        HttpMethod::Get,
        "/admin/overview",
        200,
        json!({ "followers": 10, "weeklyFollowers": [{ "name": "Mon", "followers": 3 }] }),
    );
    http.respond(HttpMethod::Get, "/friends/requests", 200, json!([user("r1", "rita")]));
    http.respond(
        HttpMethod::Get,
        "/friends",
        200,
        json!([user("a", "ann"), user("b", "bob"), user("a", "ann")]),
    );
    http.respond(
        HttpMethod::Get,
        "/users",
        200,
        json!([user(TEST_USER_ID, "me"), user("c", "cid")]),
    );
}

#[tokio::test]
async fn test_load_applies_every_part() {
    let (http, _session, guard) = signed_in();
    mock_all(&http);
    let overview = OverviewController::new(guard);

    overview.load().await;

    let state = overview.state.get();
    let data = state.ready().unwrap();
    assert_eq!(data.stats.as_ref().map(|s| s.followers), Some(10));
    assert_eq!(data.requests.len(), 1);
    assert_eq!(data.friends.len(), 2);
    assert_eq!(data.users.len(), 1);
    assert_eq!(data.users[0].id, "c");
    assert!(data.warnings.is_empty());
}

#[tokio::test]
async fn test_one_failure_leaves_other_parts_applied() {
    let (http, _session, guard) = signed_in();
    mock_all(&http);
    http.respond(HttpMethod::Get, "/friends", 500, json!({ "message": "db down" }));
    let overview = OverviewController::new(guard);

    overview.load().await;

    let state = overview.state.get();
    let data = state.ready().unwrap();
    assert!(data.stats.is_some());
    assert_eq!(data.requests.len(), 1);
    assert_eq!(data.users.len(), 1);
    assert!(data.friends.is_empty());
    assert_eq!(data.warnings, vec!["Could not load friends: db down".to_string()]);
}

#[tokio::test]
async fn test_every_part_failing_is_a_failure() {
    let (http, _session, guard) = signed_in();
    for path in ["/admin/overview", "/friends/requests", "/friends", "/users"] {
        http.fail(HttpMethod::Get, path);
    }
    let overview = OverviewController::new(guard);

    overview.load().await;

    assert!(overview.state.get().error().is_some());
}

#[tokio::test]
async fn test_auth_error_signs_out() {
    let (http, session, guard) = signed_in();
    mock_all(&http);
    http.respond(HttpMethod::Get, "/users", 401, json!({}));
    let overview = OverviewController::new(guard);

    overview.load().await;

    assert!(overview.state.get().is_signed_out());
    assert!(!session.is_authenticated());
}
