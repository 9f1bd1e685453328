//! 认证模块
//!
//! 持有全局唯一的 `AuthGuard`（会话存储 + 请求客户端），并把会话变化桥接为信号。
//! 路由服务通过注入的认证信号实现守卫，与认证系统解耦。

use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use maxi_client::{AuthGuard, ClientConfig, SessionEvent};

pub type Guard = AuthGuard<FetchHttpClient, BrowserStorage>;

/// 认证上下文
///
/// `AuthGuard` 内部基于 `Rc`，放在本地 arena 中，上下文本身可以 Copy。
#[derive(Clone, Copy)]
pub struct AuthContext {
    guard: StoredValue<Guard, LocalStorage>,
    is_authenticated: RwSignal<bool>,
}

impl AuthContext {
    /// 创建认证上下文
    ///
    /// API 基地址在构建时通过 `MAXI_API_BASE` 指定，未指定时使用默认值。
    pub fn new() -> Self {
        let config = ClientConfig::from_env();
        let guard = maxi_client::connect(FetchHttpClient, BrowserStorage, config);

        let is_authenticated = RwSignal::new(guard.session().is_authenticated());
        guard
            .session()
            .subscribe(move |event| {
                is_authenticated.set(matches!(event, SessionEvent::SignedIn));
            })
            .detach();

        Self {
            guard: StoredValue::new_local(guard),
            is_authenticated,
        }
    }

    pub fn guard(&self) -> Guard {
        self.guard.get_value()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        self.is_authenticated.into()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
