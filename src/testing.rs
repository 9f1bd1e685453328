//! 测试夹具

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::lifecycle::ViewContext;
use crate::policy::AuthGuard;
use crate::request::mock::MockHttpClient;
use crate::session::{MemoryStorage, SessionStore};
use serde_json::{Value, json};

pub const TEST_BASE: &str = "http://api.test";
pub const TEST_TOKEN: &str = "tok";
pub const TEST_USER_ID: &str = "me";

pub type TestGuard = AuthGuard<MockHttpClient, MemoryStorage>;
pub type TestContext = ViewContext<MockHttpClient, MemoryStorage>;

pub fn setup_env(
    session: Option<(&str, &str)>,
) -> (MockHttpClient, SessionStore<MemoryStorage>, TestGuard) {
    let http = MockHttpClient::new();
    let store = SessionStore::new(MemoryStorage::new());
    if let Some((token, user_id)) = session {
        store.set_session(token, user_id).unwrap();
    }
    let client = ApiClient::new(http.clone(), store.clone(), ClientConfig::new(TEST_BASE));
    (http, store, AuthGuard::new(client))
}

pub fn signed_in() -> (MockHttpClient, SessionStore<MemoryStorage>, TestGuard) {
    setup_env(Some((TEST_TOKEN, TEST_USER_ID)))
}

pub fn anonymous() -> (MockHttpClient, SessionStore<MemoryStorage>, TestGuard) {
    setup_env(None)
}

pub fn view(guard: TestGuard) -> TestContext {
    ViewContext::new(guard)
}

pub fn user(id: &str, username: &str) -> Value {
    json!({ "_id": id, "username": username, "email": format!("{username}@example.com") })
}

pub fn post(id: &str, content: &str, likes: &[&str]) -> Value {
    json!({ "_id": id, "content": content, "likes": likes, "comments": [] })
}
