use super::*;
use crate::session::SessionEvent;
use crate::testing::{anonymous, signed_in};
use maxi_shared::protocol::{ListFriends, Login};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[tokio::test]
async fn test_auth_error_clears_session_once() {
    let (http, session, guard) = signed_in();
    http.respond(HttpMethod::Get, "/friends", 401, json!({ "message": "jwt expired" }));

    let events = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let events = events.clone();
        session.subscribe(move |e| events.borrow_mut().push(*e))
    };

    let err = guard.call(&ListFriends).await.unwrap_err();

    assert!(err.is_auth());
    assert_eq!(err.message(), "jwt expired");
    assert!(!session.is_authenticated());
    assert_eq!(*events.borrow(), vec![SessionEvent::SignedOut]);
}

#[tokio::test]
async fn test_forbidden_is_treated_as_auth_error() {
    let (http, session, guard) = signed_in();
    http.respond(HttpMethod::Get, "/friends", 403, json!({}));

    guard.call(&ListFriends).await.unwrap_err();

    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_anonymous_call_is_refused_locally() {
    let (http, _session, guard) = anonymous();

    let err = guard.call(&ListFriends).await.unwrap_err();

    assert!(err.is_auth());
    assert_eq!(err.message(), NOT_SIGNED_IN);
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_public_endpoint_passes_while_anonymous() {
    let (http, _session, guard) = anonymous();
    http.respond(HttpMethod::Post, "/auth/login", 200, json!({ "token": "t" }));

    let token = guard
        .call(&Login {
            email: "a@b.c".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();

    assert_eq!(token.token, "t");
}

#[tokio::test]
async fn test_other_errors_keep_session() {
    let (http, session, guard) = signed_in();
    http.respond(HttpMethod::Get, "/friends", 500, json!({ "message": "boom" }));

    let err = guard.call(&ListFriends).await.unwrap_err();

    assert_eq!(err.category(), StatusCategory::ServerError);
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_raw_request_goes_through_policy() {
    let (http, session, guard) = signed_in();
    http.respond(HttpMethod::Put, "/settings", 401, json!({}));

    guard
        .request("/settings", HttpMethod::Put, Some(json!({ "isPublic": true })))
        .await
        .unwrap_err();

    assert!(!session.is_authenticated());
}
