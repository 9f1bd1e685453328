//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其守卫属性，前端路由服务只负责 History API。

use crate::session::SessionEvent;
use std::fmt::Display;

/// 管理后台内的视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdminView {
    #[default]
    Overview,
    Analytics,
    Posts,
    Friends,
    Requests,
    Settings,
    Profile,
}

impl AdminView {
    pub fn label(&self) -> &'static str {
        match self {
            AdminView::Overview => "Overview",
            AdminView::Analytics => "Analytics",
            AdminView::Posts => "Posts",
            AdminView::Friends => "Friends",
            AdminView::Requests => "Requests",
            AdminView::Settings => "Settings",
            AdminView::Profile => "Profile",
        }
    }
}

/// 侧边栏导航项
pub const NAV_ITEMS: [AdminView; 7] = [
    AdminView::Overview,
    AdminView::Analytics,
    AdminView::Posts,
    AdminView::Friends,
    AdminView::Requests,
    AdminView::Settings,
    AdminView::Profile,
];

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    Signup,
    /// 管理后台 (需要认证)
    Admin(AdminView),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// `/` 与未知路径返回 `None`，由调用方重定向到登录页。
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        let route = match path {
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/admin" => Self::Admin(AdminView::Overview),
            "/admin/analytics" => Self::Admin(AdminView::Analytics),
            "/admin/posts" => Self::Admin(AdminView::Posts),
            "/admin/friends" => Self::Admin(AdminView::Friends),
            "/admin/requests" => Self::Admin(AdminView::Requests),
            "/admin/settings" => Self::Admin(AdminView::Settings),
            "/admin/profile" => Self::Admin(AdminView::Profile),
            _ => return None,
        };
        Some(route)
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Admin(view) => match view {
                AdminView::Overview => "/admin",
                AdminView::Analytics => "/admin/analytics",
                AdminView::Posts => "/admin/posts",
                AdminView::Friends => "/admin/friends",
                AdminView::Requests => "/admin/requests",
                AdminView::Settings => "/admin/settings",
                AdminView::Profile => "/admin/profile",
            },
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    /// 定义已认证用户是否应该离开此路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Admin(AdminView::Overview)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 路径解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub route: AppRoute,
    /// 最终路由与请求的路径不一致，需要替换地址栏
    pub redirected: bool,
}

/// 守卫：路径 + 认证状态 -> 最终路由
///
/// 未知路径先落到登录页，再按登录页的规则处理。
pub fn resolve(path: &str, authenticated: bool) -> Resolution {
    let (requested, unknown) = match AppRoute::from_path(path) {
        Some(route) => (route, false),
        None => (AppRoute::auth_failure_redirect(), true),
    };

    let route = if requested.requires_auth() && !authenticated {
        AppRoute::auth_failure_redirect()
    } else if requested.should_redirect_when_authenticated() && authenticated {
        AppRoute::auth_success_redirect()
    } else {
        requested
    };

    Resolution {
        route,
        redirected: unknown || route != requested,
    }
}

/// 会话变化时当前路由的去向；`None` 表示留在原地
pub fn redirect_on(route: AppRoute, event: SessionEvent) -> Option<AppRoute> {
    match event {
        SessionEvent::SignedOut if route.requires_auth() => Some(AppRoute::auth_failure_redirect()),
        SessionEvent::SignedIn if route.should_redirect_when_authenticated() => {
            Some(AppRoute::auth_success_redirect())
        }
        _ => None,
    }
}

/// 头像占位文字：前两个单词的首字母大写
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", false, AppRoute::Login)]
    #[case("/nowhere", false, AppRoute::Login)]
    #[case("/nowhere", true, AppRoute::Admin(AdminView::Overview))]
    #[case("/admin/posts", false, AppRoute::Login)]
    #[case("/admin/posts", true, AppRoute::Admin(AdminView::Posts))]
    #[case("/admin/", true, AppRoute::Admin(AdminView::Overview))]
    #[case("/login", true, AppRoute::Admin(AdminView::Overview))]
    #[case("/signup", false, AppRoute::Signup)]
    fn resolves_paths(#[case] path: &str, #[case] authenticated: bool, #[case] expected: AppRoute) {
        assert_eq!(resolve(path, authenticated).route, expected);
    }

    #[test]
    fn every_route_round_trips_through_its_path() {
        let routes = [AppRoute::Login, AppRoute::Signup]
            .into_iter()
            .chain(NAV_ITEMS.into_iter().map(AppRoute::Admin));
        for route in routes {
            assert_eq!(AppRoute::from_path(route.to_path()), Some(route));
        }
    }

    #[test]
    fn redirect_flag_tracks_changes() {
        assert!(!resolve("/admin/friends", true).redirected);
        assert!(resolve("/admin/friends", false).redirected);
        assert!(resolve("/", false).redirected);
    }

    #[test]
    fn session_events_redirect_only_where_guarded() {
        let posts = AppRoute::Admin(AdminView::Posts);
        assert_eq!(redirect_on(posts, SessionEvent::SignedOut), Some(AppRoute::Login));
        assert_eq!(redirect_on(posts, SessionEvent::SignedIn), None);
        assert_eq!(
            redirect_on(AppRoute::Signup, SessionEvent::SignedIn),
            Some(AppRoute::Admin(AdminView::Overview))
        );
        assert_eq!(redirect_on(AppRoute::Login, SessionEvent::SignedOut), None);
    }

    #[rstest]
    #[case("Ada Lovelace", "AL")]
    #[case("ada", "A")]
    #[case("  grace  brewster murray ", "GB")]
    #[case("", "")]
    fn computes_initials(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(initials(name), expected);
    }
}
