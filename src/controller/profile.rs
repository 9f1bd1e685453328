//! 个人资料页

use crate::lifecycle::{LoadState, ViewContext};
use crate::observe::StateCell;
use crate::policy::AuthGuard;
use crate::request::HttpClient;
use crate::session::SessionStorage;
use maxi_shared::User;
use maxi_shared::date::format_date;
use maxi_shared::protocol::CurrentUser;

pub struct ProfileController<H, S> {
    ctx: ViewContext<H, S>,
    pub state: StateCell<LoadState<User>>,
}

impl<H, S> Clone for ProfileController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            state: self.state.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> ProfileController<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            ctx: ViewContext::new(guard),
            state: StateCell::new(LoadState::Idle),
        }
    }

    pub fn context(&self) -> &ViewContext<H, S> {
        &self.ctx
    }

    pub fn unmount(&self) {
        self.ctx.unmount();
    }

    pub async fn load(&self) {
        if !self.ctx.session().is_authenticated() {
            self.state.set(LoadState::SignedOut);
            return;
        }
        let guard = self.ctx.guard();
        self.ctx.load_into(&self.state, guard.call(&CurrentUser)).await;
    }

    /// 注册日期，例如 `Mar 4, 2024`
    pub fn joined_on(&self) -> Option<String> {
        self.state.with(|state| {
            let created_at = state.ready()?.created_at.as_deref()?;
            format_date(created_at)
        })
    }

    pub fn logout(&self) {
        self.ctx.sign_out();
    }
}
