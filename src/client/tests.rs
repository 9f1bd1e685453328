use super::*;
use crate::error::StatusCategory;
use crate::request::mock::MockHttpClient;
use crate::session::MemoryStorage;
use crate::testing::TEST_BASE;
use maxi_shared::protocol::{CreatePost, CurrentUser, ListPosts};

fn create_client(token: Option<&str>) -> (MockHttpClient, ApiClient<MockHttpClient, MemoryStorage>) {
    let http = MockHttpClient::new();
    let session = SessionStore::new(MemoryStorage::new());
    if let Some(token) = token {
        session.set_session(token, "me").unwrap();
    }
    let client = ApiClient::new(http.clone(), session, ClientConfig::new(TEST_BASE));
    (http, client)
}

#[tokio::test]
async fn test_attaches_bearer_token_and_json_headers() {
    let (http, client) = create_client(Some("abc"));
    http.respond(HttpMethod::Post, "/posts", 201, json!({ "_id": "p1", "content": "hi" }));

    let post = client
        .call(&CreatePost {
            content: "hi".into(),
        })
        .await
        .unwrap();
    assert_eq!(post.id, "p1");

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.url, format!("{TEST_BASE}/posts"));
    assert_eq!(req.header("Authorization"), Some("Bearer abc"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.body.as_deref(), Some(r#"{"content":"hi"}"#));
}

#[tokio::test]
async fn test_omits_authorization_when_anonymous() {
    let (http, client) = create_client(None);
    http.respond(HttpMethod::Get, "/posts", 200, json!([]));

    client.call(&ListPosts).await.unwrap();

    assert_eq!(http.requests()[0].header("Authorization"), None);
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let (http, client) = create_client(Some("abc"));
    http.respond(
        HttpMethod::Post,
        "/posts",
        422,
        json!({ "message": "Content too long" }),
    );

    let err = client
        .call(&CreatePost {
            content: "x".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.category(), StatusCategory::ClientError);
    assert_eq!(err.message(), "Content too long");
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn test_client_never_clears_session() {
    let (http, client) = create_client(Some("abc"));
    http.respond(HttpMethod::Get, "/users/me", 401, json!({ "message": "expired" }));

    let err = client.call(&CurrentUser).await.unwrap_err();

    assert!(err.is_auth());
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_empty_success_body_reads_as_empty_object() {
    let (http, client) = create_client(Some("abc"));
    http.respond_text(HttpMethod::Delete, "/posts/p1", 204, "");

    let value = client
        .request("/posts/p1", HttpMethod::Delete, None)
        .await
        .unwrap();

    assert_eq!(value, json!({}));
}

#[tokio::test]
async fn test_non_json_success_is_server_error() {
    let (http, client) = create_client(Some("abc"));
    http.respond_text(HttpMethod::Get, "/posts", 200, "<html>ok</html>");

    let err = client.call(&ListPosts).await.unwrap_err();

    assert_eq!(err.category(), StatusCategory::ServerError);
    assert_eq!(err.message(), INVALID_RESPONSE);
}

#[tokio::test]
async fn test_mismatched_shape_is_server_error() {
    let (http, client) = create_client(Some("abc"));
    http.respond(HttpMethod::Get, "/posts", 200, json!({ "posts": [] }));

    let err = client.call(&ListPosts).await.unwrap_err();

    assert_eq!(err.message(), INVALID_RESPONSE);
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let (http, client) = create_client(Some("abc"));
    http.fail(HttpMethod::Get, "/posts");

    let err = client.call(&ListPosts).await.unwrap_err();

    assert_eq!(err.category(), StatusCategory::NetworkError);
}

#[tokio::test]
async fn test_call_as_uses_explicit_token() {
    let (http, client) = create_client(None);
    http.respond(HttpMethod::Get, "/users/me", 200, json!({ "_id": "u1" }));

    let me = client.call_as(&CurrentUser, "fresh").await.unwrap();

    assert_eq!(me.id, "u1");
    assert_eq!(http.requests()[0].header("Authorization"), Some("Bearer fresh"));
}
