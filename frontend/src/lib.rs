//! Maxi Media 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `maxi_client`: 会话、请求守卫、控制器（与 DOM 无关）
//! - `web::router`: 路由服务，同步浏览器地址
//! - `auth`: 认证上下文
//! - `components`: UI 组件层，只负责把控制器状态渲染出来

mod auth;
mod hooks;
mod components {
    pub mod chart;
    pub mod friends;
    pub mod layout;
    pub mod login;
    pub mod overview;
    pub mod posts;
    pub mod profile;
    pub mod requests;
    pub mod settings;
    pub mod signup;
    pub mod status;
    pub mod toast;
}

use crate::auth::AuthContext;
use crate::components::friends::FriendsPage;
use crate::components::layout::AdminLayout;
use crate::components::login::LoginPage;
use crate::components::overview::{AnalyticsPage, OverviewPage};
use crate::components::posts::PostsPage;
use crate::components::profile::ProfilePage;
use crate::components::requests::RequestsPage;
use crate::components::settings::SettingsPage;
use crate::components::signup::SignupPage;

use leptos::prelude::*;
use maxi_client::navigation::{AdminView, AppRoute};

/// 浏览器 API 封装
pub(crate) mod web {
    pub mod console;
    mod http;
    pub mod router;
    mod storage;
    pub mod theme;

    pub use http::FetchHttpClient;
    pub use storage::BrowserStorage;
}

use web::router::{Router, RouterOutlet};

fn admin_page(view: AdminView) -> AnyView {
    match view {
        AdminView::Overview => view! { <OverviewPage /> }.into_any(),
        AdminView::Analytics => view! { <AnalyticsPage /> }.into_any(),
        AdminView::Posts => view! { <PostsPage /> }.into_any(),
        AdminView::Friends => view! { <FriendsPage /> }.into_any(),
        AdminView::Requests => view! { <RequestsPage /> }.into_any(),
        AdminView::Settings => view! { <SettingsPage /> }.into_any(),
        AdminView::Profile => view! { <ProfilePage /> }.into_any(),
    }
}

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Admin(current) => view! {
            <AdminLayout current=current>
                {admin_page(current)}
            </AdminLayout>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 认证信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}

pub use web::console::init_logging;
