use super::*;
use crate::request::HttpMethod;
use crate::request::mock::ok;
use crate::testing::{signed_in, view};
use maxi_shared::protocol::{ListFriends, ListPosts};
use serde_json::json;

#[test]
fn test_newer_load_supersedes_older_ticket() {
    let lifecycle = Lifecycle::new();
    let first = lifecycle.begin(0);
    let second = lifecycle.begin(0);

    assert!(!lifecycle.accepts(&first, 0));
    assert!(lifecycle.accepts(&second, 0));
}

#[test]
fn test_unmount_and_epoch_change_invalidate_tickets() {
    let lifecycle = Lifecycle::new();
    let load = lifecycle.begin(3);
    let write = lifecycle.begin_mutation(3);

    assert!(!lifecycle.accepts(&load, 4));
    assert!(!lifecycle.accepts(&write, 4));
    assert!(lifecycle.accepts(&write, 3));

    lifecycle.unmount();
    assert!(!lifecycle.accepts(&write, 3));
}

#[tokio::test]
async fn test_load_into_applies_fresh_result() {
    let (http, _session, guard) = signed_in();
    http.respond(HttpMethod::Get, "/posts", 200, json!([{ "_id": "p1" }]));
    let ctx = view(guard.clone());
    let cell = StateCell::new(LoadState::Idle);

    let applied = ctx.load_into(&cell, guard.call(&ListPosts)).await;

    assert!(applied);
    assert_eq!(cell.get().ready().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_result_after_unmount_is_dropped() {
    let (http, _session, guard) = signed_in();
    let reply = http.defer(HttpMethod::Get, "/posts");
    let ctx = view(guard.clone());
    let cell = StateCell::new(LoadState::Idle);

    let load = ctx.load_into(&cell, guard.call(&ListPosts));
    let finish = async {
        tokio::task::yield_now().await;
        ctx.unmount();
        reply.send(ok(json!([{ "_id": "p1" }]))).unwrap();
    };
    let (applied, ()) = futures::join!(load, finish);

    assert!(!applied);
    assert!(cell.get().is_loading());
}

#[tokio::test]
async fn test_result_after_session_clear_is_dropped() {
    let (http, session, guard) = signed_in();
    let reply = http.defer(HttpMethod::Get, "/posts");
    let ctx = view(guard.clone());
    let cell = StateCell::new(LoadState::Idle);

    let load = ctx.load_into(&cell, guard.call(&ListPosts));
    let finish = async {
        tokio::task::yield_now().await;
        session.clear().unwrap();
        reply.send(ok(json!([{ "_id": "p1" }]))).unwrap();
    };
    let (applied, ()) = futures::join!(load, finish);

    assert!(!applied);
    assert!(cell.get().ready().is_none());
}

#[tokio::test]
async fn test_auth_error_moves_to_signed_out() {
    let (http, session, guard) = signed_in();
    http.respond(HttpMethod::Get, "/friends", 401, json!({}));
    let ctx = view(guard.clone());
    let cell = StateCell::new(LoadState::Idle);

    ctx.load_into(&cell, guard.call(&ListFriends)).await;

    assert!(cell.get().is_signed_out());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_surface_routes_by_category() {
    let (_http, _session, guard) = signed_in();
    let ctx = view(guard);
    let inline = StateCell::new(None);

    let rejected = ApiError::from_response(400, r#"{"message":"Bad input"}"#);
    ctx.surface(&rejected, "fallback", Some(&inline));
    assert_eq!(inline.get().as_deref(), Some("Bad input"));
    assert_eq!(ctx.notice().get(), None);

    ctx.surface(&rejected, "fallback", None);
    assert_eq!(
        ctx.notice().get().map(|notice| notice.message),
        Some("Bad input".to_string())
    );

    ctx.surface(&ApiError::network("reset"), "Could not reach server", Some(&inline));
    assert_eq!(
        ctx.notice().get(),
        Some(Notice {
            kind: NoticeKind::Error,
            message: "Could not reach server".into()
        })
    );

    ctx.dismiss_notice();
    assert_eq!(ctx.notice().get(), None);
}

#[test]
fn test_confirmation_gate() {
    let gate = Confirmation::default();
    assert_eq!(gate.take(), None::<String>);

    gate.request("p1".to_string());
    assert_eq!(gate.pending().as_deref(), Some("p1"));
    gate.cancel();
    assert_eq!(gate.take(), None);

    gate.request("p2".to_string());
    assert_eq!(gate.take().as_deref(), Some("p2"));
    assert_eq!(gate.pending(), None);
}
