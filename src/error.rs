//! 请求错误
//!
//! 所有失败都归一为 `ApiError`，由 `StatusCategory` 决定后续处理：
//! 认证失败清除会话并跳转登录，客户端错误就地提示，服务端与网络错误弹出通知。

use crate::request::TransportError;
use crate::session::StorageError;
use serde_json::Value;

/// 服务端未给出消息时的默认文案
pub const GENERIC_FAILURE: &str = "Request failed";
/// 响应体无法解析时的文案
pub const INVALID_RESPONSE: &str = "Invalid response from server";

// =========================================================
// 错误分类
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// 4xx（401/403 除外）：校验失败、资源不存在等
    ClientError,
    /// 401/403：凭据缺失、无效或过期
    AuthError,
    /// 5xx 及其他非成功状态
    ServerError,
    /// 没有收到响应
    NetworkError,
}

impl StatusCategory {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => StatusCategory::AuthError,
            400..=499 => StatusCategory::ClientError,
            _ => StatusCategory::ServerError,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::ClientError => "client-error",
            StatusCategory::AuthError => "auth-error",
            StatusCategory::ServerError => "server-error",
            StatusCategory::NetworkError => "network-error",
        }
    }
}

/// 错误在界面上的呈现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// 显示在触发操作的控件旁
    Inline,
    /// 短暂的通知
    Notice,
    /// 清除会话并跳转登录
    Redirect,
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    category: StatusCategory,
    message: String,
    status: Option<u16>,
    /// 消息是否来自服务端响应体
    from_server: bool,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn new(category: StatusCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            status: None,
            from_server: false,
        }
    }

    // --- Convenience constructors ---

    pub fn client(message: impl Into<String>) -> Self {
        Self::new(StatusCategory::ClientError, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(StatusCategory::AuthError, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(StatusCategory::ServerError, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(StatusCategory::NetworkError, message)
    }

    /// 由非成功响应构造错误
    ///
    /// 尝试从 JSON 响应体中读取 `message` 字段，失败则使用默认文案。
    pub fn from_response(status: u16, body: &str) -> Self {
        let server_message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_string))
            .filter(|m| !m.trim().is_empty());

        let from_server = server_message.is_some();
        Self {
            category: StatusCategory::from_status(status),
            message: server_message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            status: Some(status),
            from_server,
        }
    }

    // --- Accessors ---

    pub fn category(&self) -> StatusCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn is_auth(&self) -> bool {
        self.category == StatusCategory::AuthError
    }

    /// 服务端给出的消息，或调用方提供的兜底文案
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.from_server {
            &self.message
        } else {
            fallback
        }
    }

    pub fn surface(&self) -> Surface {
        match self.category {
            StatusCategory::AuthError => Surface::Redirect,
            StatusCategory::ClientError => Surface::Inline,
            StatusCategory::ServerError | StatusCategory::NetworkError => Surface::Notice,
        }
    }
}

// =========================================================
// 类型转换实现
// =========================================================

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::network(e.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::client(format!("Could not save session: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(400, StatusCategory::ClientError)]
    #[case(401, StatusCategory::AuthError)]
    #[case(403, StatusCategory::AuthError)]
    #[case(404, StatusCategory::ClientError)]
    #[case(422, StatusCategory::ClientError)]
    #[case(500, StatusCategory::ServerError)]
    #[case(503, StatusCategory::ServerError)]
    #[case(304, StatusCategory::ServerError)]
    fn classifies_status(#[case] status: u16, #[case] expected: StatusCategory) {
        assert_eq!(StatusCategory::from_status(status), expected);
        assert_eq!(ApiError::from_response(status, "").category(), expected);
    }

    #[rstest]
    #[case(r#"{"message":"Email already taken"}"#, "Email already taken", true)]
    #[case(r#"{"error":"nope"}"#, GENERIC_FAILURE, false)]
    #[case(r#"{"message":""}"#, GENERIC_FAILURE, false)]
    #[case("<html>502 Bad Gateway</html>", GENERIC_FAILURE, false)]
    #[case("", GENERIC_FAILURE, false)]
    fn extracts_server_message(
        #[case] body: &str,
        #[case] expected: &str,
        #[case] from_server: bool,
    ) {
        let err = ApiError::from_response(409, body);
        assert_eq!(err.message(), expected);
        assert_eq!(err.message_or("Login failed") == expected, from_server);
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn transport_failures_are_network_errors() {
        let err = ApiError::from(TransportError::new("connection refused"));
        assert_eq!(err.category(), StatusCategory::NetworkError);
        assert_eq!(err.surface(), Surface::Notice);
        assert_eq!(err.message_or("Login failed"), "Login failed");
    }

    #[test]
    fn surfaces_follow_category() {
        assert_eq!(ApiError::auth("x").surface(), Surface::Redirect);
        assert_eq!(ApiError::client("x").surface(), Surface::Inline);
        assert_eq!(ApiError::server("x").surface(), Surface::Notice);
    }
}
