//! 路由服务模块
//!
//! 所有对 window.history 的操作都集中在此模块。路由解析与守卫规则在
//! `maxi_client::navigation` 中，这里只负责把结果同步到浏览器地址栏。

use leptos::prelude::*;
use maxi_client::SessionEvent;
use maxi_client::navigation::{AppRoute, Resolution, redirect_on, resolve};
use tracing::info;
use wasm_bindgen::prelude::*;

/// 写入历史记录的方式
#[derive(Clone, Copy)]
enum HistoryMode {
    Push,
    /// 重定向时使用，不新增历史记录
    Replace,
}

fn location_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(route: AppRoute, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
        return;
    };
    let url = Some(route.to_path());
    let _ = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", url),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", url),
    };
}

/// 解析地址栏中的路径；被守卫拦截时改写地址
fn resolve_location(authenticated: bool, cause: &'static str) -> AppRoute {
    let path = location_path();
    let Resolution { route, redirected } = resolve(&path, authenticated);
    if redirected {
        info!(from = %path, to = %route, cause, "route redirected");
        write_history(route, HistoryMode::Replace);
    }
    route
}

/// 路由器服务
///
/// 认证状态以信号注入，路由层不直接依赖会话存储。
#[derive(Clone, Copy)]
pub struct RouterService {
    route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    authenticated: Signal<bool>,
}

impl RouterService {
    fn new(authenticated: Signal<bool>) -> Self {
        let initial = resolve_location(authenticated.get_untracked(), "initial load");
        let (route, set_route) = signal(initial);
        Self {
            route,
            set_route,
            authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.route
    }

    /// 导航到路由，同样经过守卫
    pub fn go(&self, target: AppRoute) {
        let Resolution { route, .. } = resolve(target.to_path(), self.authenticated.get_untracked());
        if self.route.get_untracked() != route {
            write_history(route, HistoryMode::Push);
            self.set_route.set(route);
        }
    }

    // 后退/前进同样经过守卫
    fn listen_popstate(&self) {
        let set_route = self.set_route;
        let authenticated = self.authenticated;
        let on_popstate = Closure::<dyn Fn()>::new(move || {
            set_route.set(resolve_location(authenticated.get_untracked(), "history"));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
        }
        // 监听器与页面同寿命
        on_popstate.forget();
    }

    // 会话变化后把当前页面移到合适的位置
    fn follow_session(&self) {
        let router = *self;
        Effect::new(move |_| {
            let event = if router.authenticated.get() {
                SessionEvent::SignedIn
            } else {
                SessionEvent::SignedOut
            };
            let from = router.route.get_untracked();
            if let Some(target) = redirect_on(from, event) {
                info!(?event, %from, to = %target, "session changed, redirecting");
                router.go(target);
            }
        });
    }
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>().expect("RouterService should be provided by <Router>")
}

// ============================================================================
// 组件
// ============================================================================

/// 路由器根组件：创建路由服务并放入 Context
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    let router = RouterService::new(is_authenticated);
    router.listen_popstate();
    router.follow_session();
    provide_context(router);

    children()
}

/// 路由出口：按当前路由渲染页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}

/// 站内链接，点击时交给路由服务处理
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.go(route);
    };

    view! {
        <a href=route.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
