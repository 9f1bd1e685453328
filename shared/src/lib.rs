use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod date;
pub mod protocol;
pub mod serde_helper;

use serde_helper::null_as_default;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 本地存储中保存会话令牌的键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// 本地存储中保存用户 ID 的键
pub const STORAGE_USER_ID_KEY: &str = "userId";

/// 评论作者缺失时的展示名称
pub const ANONYMOUS_AUTHOR: &str = "User";

/// 后端返回但视图未读取的字段，原样保留
pub type Extra = Map<String, Value>;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// 当前用户已发出的好友请求（用户 ID 列表）
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sent_requests: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// 点赞用户的 ID 列表，点赞数由服务端计算
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Post {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CommentAuthor>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Comment {
    pub fn author_name(&self) -> &str {
        match &self.user {
            Some(CommentAuthor::Profile(profile)) => profile
                .username
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or(ANONYMOUS_AUTHOR),
            _ => ANONYMOUS_AUTHOR,
        }
    }
}

/// 评论作者：后端可能返回已展开的用户对象，也可能只返回用户 ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentAuthor {
    Profile(AuthorProfile),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorProfile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_public: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allow_requests: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notify_likes: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notify_comments: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::IsPublic => self.is_public,
            SettingKey::AllowRequests => self.allow_requests,
            SettingKey::NotifyLikes => self.notify_likes,
            SettingKey::NotifyComments => self.notify_comments,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::IsPublic => self.is_public = value,
            SettingKey::AllowRequests => self.allow_requests = value,
            SettingKey::NotifyLikes => self.notify_likes = value,
            SettingKey::NotifyComments => self.notify_comments = value,
        }
    }

    pub fn account_field(&self, field: AccountField) -> &str {
        match field {
            AccountField::Username => &self.username,
            AccountField::Email => &self.email,
        }
    }

    pub fn set_account_field(&mut self, field: AccountField, value: String) {
        match field {
            AccountField::Username => self.username = value,
            AccountField::Email => self.email = value,
        }
    }
}

/// 可切换的布尔型设置项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    IsPublic,
    AllowRequests,
    NotifyLikes,
    NotifyComments,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::IsPublic,
        SettingKey::AllowRequests,
        SettingKey::NotifyLikes,
        SettingKey::NotifyComments,
    ];

    /// 线上字段名
    pub fn field(&self) -> &'static str {
        match self {
            SettingKey::IsPublic => "isPublic",
            SettingKey::AllowRequests => "allowRequests",
            SettingKey::NotifyLikes => "notifyLikes",
            SettingKey::NotifyComments => "notifyComments",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingKey::IsPublic => "Public Profile",
            SettingKey::AllowRequests => "Allow Friend Requests",
            SettingKey::NotifyLikes => "Notify on Likes",
            SettingKey::NotifyComments => "Notify on Comments",
        }
    }
}

/// 可通过 `PUT /users/:field` 修改的账户字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountField {
    Username,
    Email,
}

impl AccountField {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountField::Username => "username",
            AccountField::Email => "email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u64,
    /// 互动率（百分比）
    #[serde(default, deserialize_with = "null_as_default")]
    pub engagement: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weekly_followers: Vec<WeeklyPoint>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers: u64,
}

/// 登录/注册成功后的响应
///
/// 后端至少返回 `token`；用户 ID 可能以 `userId` 或内嵌 `user` 对象的形式出现，也可能缺失。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AuthToken {
    pub fn resolved_user_id(&self) -> Option<String> {
        let embedded = || {
            let user = self.user.as_ref()?;
            user.get("_id")
                .or_else(|| user.get("id"))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        self.user_id
            .clone()
            .or_else(embedded)
            .filter(|id| !id.is_empty())
    }
}
