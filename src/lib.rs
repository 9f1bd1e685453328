//! Maxi 管理后台客户端核心
//!
//! 与平台无关的部分都在这里：会话存储、带认证的请求客户端、认证策略、
//! 视图控制器及其生命周期、路由模型。浏览器相关的存储与传输由前端实现
//! `SessionStorage` 与 `HttpClient` 两个 trait 注入。

pub mod client;
pub mod collections;
pub mod config;
pub mod controller;
pub mod error;
pub mod join;
pub mod lifecycle;
pub mod navigation;
pub mod observe;
pub mod optimistic;
pub mod policy;
pub mod request;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, StatusCategory, Surface};
pub use lifecycle::{LoadState, Notice, NoticeKind, ViewContext};
pub use observe::{StateCell, Subscription};
pub use policy::AuthGuard;
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use session::{MemoryStorage, Session, SessionEvent, SessionStorage, SessionStore, StorageError};

/// 组装客户端：会话存储 + 传输层 + 配置
///
/// 启动时先清理残缺的会话；清理失败不影响启动，残留的键会在下一次 `clear` 时删除。
pub fn connect<H, S>(http: H, storage: S, config: ClientConfig) -> AuthGuard<H, S>
where
    H: HttpClient,
    S: SessionStorage,
{
    let session = SessionStore::new(storage);
    if let Err(e) = session.hydrate() {
        tracing::warn!(error = %e, "failed to clean up stored session");
    }
    tracing::debug!(base_url = config.base_url(), "client configured");
    AuthGuard::new(ApiClient::new(http, session, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::mock::MockHttpClient;

    #[test]
    fn connect_discards_half_written_session() {
        let storage = MemoryStorage::new();
        storage.set("userId", "u1").unwrap();

        let guard = connect(MockHttpClient::new(), storage.clone(), ClientConfig::default());

        assert!(!guard.session().is_authenticated());
        assert_eq!(storage.get("userId"), None);
    }
}
