//! 侧边栏：当前用户与待处理好友请求数，以及页头的明暗主题

use crate::error::ApiResult;
use crate::lifecycle::{LoadState, ViewContext};
use crate::navigation::initials;
use crate::observe::StateCell;
use crate::policy::AuthGuard;
use crate::request::HttpClient;
use crate::session::SessionStorage;
use maxi_shared::User;
use maxi_shared::protocol::{CurrentUser, ListFriendRequests};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellData {
    pub me: User,
    pub pending_requests: usize,
}

/// 界面主题，对应文档根元素的 `data-theme`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// 未知取值按亮色处理
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub struct ShellController<H, S> {
    ctx: ViewContext<H, S>,
    pub state: StateCell<LoadState<ShellData>>,
    pub theme: StateCell<Theme>,
}

impl<H, S> Clone for ShellController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            state: self.state.clone(),
            theme: self.theme.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> ShellController<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            ctx: ViewContext::new(guard),
            state: StateCell::new(LoadState::Idle),
            theme: StateCell::new(Theme::default()),
        }
    }

    pub fn context(&self) -> &ViewContext<H, S> {
        &self.ctx
    }

    pub fn unmount(&self) {
        self.ctx.unmount();
    }

    pub async fn load(&self) {
        let guard = self.ctx.guard();
        let fetch = async {
            let (me, requests) =
                futures::try_join!(guard.call(&CurrentUser), guard.call(&ListFriendRequests))?;
            ApiResult::Ok(ShellData {
                me,
                pending_requests: requests.len(),
            })
        };
        self.ctx.load_into(&self.state, fetch).await;
    }

    pub fn initials(&self) -> String {
        self.state
            .with(|state| state.ready().map(|data| initials(&data.me.username)))
            .unwrap_or_default()
    }

    /// 徽标数字；为 0 时不显示
    pub fn badge_count(&self) -> Option<usize> {
        self.state
            .with(|state| state.ready().map(|data| data.pending_requests))
            .filter(|count| *count > 0)
    }

    /// 请求页处理完请求后同步徽标
    pub fn set_badge_count(&self, count: usize) {
        self.state.update(|state| {
            if let Some(data) = state.ready_mut() {
                data.pending_requests = count;
            }
        });
    }

    pub fn toggle_theme(&self) -> Theme {
        self.theme.update(|theme| {
            *theme = theme.toggled();
            *theme
        })
    }

    pub fn logout(&self) {
        self.ctx.sign_out();
    }
}
