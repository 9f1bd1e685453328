use crate::{AccountField, AuthToken, Overview, Post, Settings, User};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use url::Url;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joins path segments, percent-encoding each one.
fn segments_path(segments: &[&str]) -> String {
    let Ok(mut url) = Url::parse("http://path.invalid/") else {
        return format!("/{}", segments.join("/"));
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}

/// Response of calls whose body the client does not read.
pub type Ack = Value;

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait Endpoint {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the call must carry the session token.
    const AUTHENTICATED: bool = true;

    /// The URL path relative to the API base.
    fn path(&self) -> String;

    /// The JSON body, if any.
    fn body(&self) -> Option<Value> {
        None
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone)]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl Endpoint for Login {
    type Response = AuthToken;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "email": self.email, "password": self.password }))
    }
}

#[derive(Debug, Clone)]
pub struct Signup {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Endpoint for Signup {
    type Response = AuthToken;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/auth/signup".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({
            "username": self.username,
            "email": self.email,
            "password": self.password,
        }))
    }
}

// =========================================================
// Users
// =========================================================

/// The signed-in user's profile
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser;

impl Endpoint for CurrentUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/users/me".to_string()
    }
}

/// The user directory
#[derive(Debug, Clone, Copy)]
pub struct ListUsers;

impl Endpoint for ListUsers {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/users".to_string()
    }
}

/// Change the username or email. The response carries the updated field.
#[derive(Debug, Clone)]
pub struct UpdateAccountField {
    pub field: AccountField,
    pub value: String,
}

impl Endpoint for UpdateAccountField {
    type Response = Map<String, Value>;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/users/{}", self.field.as_str())
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "value": self.value }))
    }
}

// =========================================================
// Admin
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct AdminOverview;

impl Endpoint for AdminOverview {
    type Response = Overview;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/admin/overview".to_string()
    }
}

// =========================================================
// Friends
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListFriends;

impl Endpoint for ListFriends {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/friends".to_string()
    }
}

/// Pending incoming friend requests
#[derive(Debug, Clone, Copy)]
pub struct ListFriendRequests;

impl Endpoint for ListFriendRequests {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/friends/requests".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct SendFriendRequest {
    pub user_id: String,
}

impl Endpoint for SendFriendRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        segments_path(&["friends", "request", &self.user_id])
    }
}

#[derive(Debug, Clone)]
pub struct AcceptFriendRequest {
    pub user_id: String,
}

impl Endpoint for AcceptFriendRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        segments_path(&["friends", "accept", &self.user_id])
    }
}

#[derive(Debug, Clone)]
pub struct RejectFriendRequest {
    pub user_id: String,
}

impl Endpoint for RejectFriendRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        segments_path(&["friends", "reject", &self.user_id])
    }
}

// =========================================================
// Posts
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListPosts;

impl Endpoint for ListPosts {
    type Response = Vec<Post>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/posts".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub content: String,
}

impl Endpoint for CreatePost {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/posts".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "content": self.content }))
    }
}

#[derive(Debug, Clone)]
pub struct EditPost {
    pub id: String,
    pub content: String,
}

impl Endpoint for EditPost {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        segments_path(&["posts", &self.id])
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "content": self.content }))
    }
}

#[derive(Debug, Clone)]
pub struct DeletePost {
    pub id: String,
}

impl Endpoint for DeletePost {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        segments_path(&["posts", &self.id])
    }
}

/// Like or unlike; the server returns the post with the recomputed like list.
#[derive(Debug, Clone)]
pub struct ToggleLike {
    pub id: String,
}

impl Endpoint for ToggleLike {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        segments_path(&["posts", &self.id, "like"])
    }
}

#[derive(Debug, Clone)]
pub struct AddComment {
    pub id: String,
    pub text: String,
}

impl Endpoint for AddComment {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        segments_path(&["posts", &self.id, "comment"])
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "text": self.text }))
    }
}

// =========================================================
// Settings
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct GetSettings;

impl Endpoint for GetSettings {
    type Response = Settings;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/settings".to_string()
    }
}

/// Partial settings update, e.g. `{"isPublic": true}`.
/// The response shape is backend-defined, so it stays untyped.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettings {
    pub patch: Map<String, Value>,
}

impl UpdateSettings {
    pub fn single(field: &str, value: impl Into<Value>) -> Self {
        let mut patch = Map::new();
        patch.insert(field.to_string(), value.into());
        Self { patch }
    }
}

impl Endpoint for UpdateSettings {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        "/settings".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(Value::Object(self.patch.clone()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteAccount;

impl Endpoint for DeleteAccount {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        "/settings".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

impl Endpoint for ChangePassword {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        "/settings/password".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({
            "currentPassword": self.current_password,
            "newPassword": self.new_password,
        }))
    }
}

/// Invalidate every session of the signed-in user
#[derive(Debug, Clone, Copy)]
pub struct LogoutAll;

impl Endpoint for LogoutAll {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/settings/logout-all".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterized_paths() {
        assert_eq!(
            UpdateAccountField {
                field: AccountField::Email,
                value: "a@b.c".into()
            }
            .path(),
            "/users/email"
        );
        assert_eq!(
            AcceptFriendRequest {
                user_id: "u7".into()
            }
            .path(),
            "/friends/accept/u7"
        );
        assert_eq!(ToggleLike { id: "p1".into() }.path(), "/posts/p1/like");
        assert_eq!(
            AddComment {
                id: "p1".into(),
                text: "hi".into()
            }
            .path(),
            "/posts/p1/comment"
        );
    }

    #[test]
    fn ids_are_encoded_as_single_segments() {
        assert_eq!(
            DeletePost {
                id: "a b/../c?x".into()
            }
            .path(),
            "/posts/a%20b%2F..%2Fc%3Fx"
        );
        assert_eq!(
            SendFriendRequest {
                user_id: "65f0c0ffee".into()
            }
            .path(),
            "/friends/request/65f0c0ffee"
        );
    }

    #[test]
    fn bodies_use_wire_field_names() {
        let body = ChangePassword {
            current_password: "old".into(),
            new_password: "new".into(),
        }
        .body()
        .unwrap();
        assert_eq!(body, json!({ "currentPassword": "old", "newPassword": "new" }));

        let patch = UpdateSettings::single("isPublic", true).body().unwrap();
        assert_eq!(patch, json!({ "isPublic": true }));
    }

    #[test]
    fn auth_endpoints_are_public() {
        assert!(!Login::AUTHENTICATED);
        assert!(!Signup::AUTHENTICATED);
        assert!(ListPosts::AUTHENTICATED);
        assert!(LogoutAll::AUTHENTICATED);
    }
}
