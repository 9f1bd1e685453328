//! 设置页
//!
//! 开关类设置采用乐观更新；用户名/邮箱与密码修改的校验错误就地显示；
//! 注销全部会话与删除账户成功后清除本地会话。

use crate::lifecycle::{Confirmation, LoadState, ViewContext};
use crate::observe::StateCell;
use crate::optimistic::apply_optimistic;
use crate::policy::AuthGuard;
use crate::request::HttpClient;
use crate::session::SessionStorage;
use maxi_shared::protocol::{
    ChangePassword, DeleteAccount, GetSettings, LogoutAll, UpdateAccountField, UpdateSettings,
};
use maxi_shared::{AccountField, SettingKey, Settings};
use serde_json::Value;
use tracing::info;

pub const EMPTY_VALUE: &str = "Value cannot be empty";
pub const PASSWORD_FIELDS_REQUIRED: &str = "All fields are required";
pub const PASSWORD_MISMATCH: &str = "New password and confirm password do not match";

pub struct SettingsController<H, S> {
    ctx: ViewContext<H, S>,
    pub state: StateCell<LoadState<Settings>>,
    pub account_error: StateCell<Option<String>>,
    pub password_error: StateCell<Option<String>>,
    pub toggle_error: StateCell<Option<String>>,
    /// 注销全部会话与删除账户共用
    pub session_error: StateCell<Option<String>>,
    pub pending_delete: Confirmation<()>,
}

impl<H, S> Clone for SettingsController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            state: self.state.clone(),
            account_error: self.account_error.clone(),
            password_error: self.password_error.clone(),
            toggle_error: self.toggle_error.clone(),
            session_error: self.session_error.clone(),
            pending_delete: self.pending_delete.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> SettingsController<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            ctx: ViewContext::new(guard),
            state: StateCell::new(LoadState::Idle),
            account_error: StateCell::new(None),
            password_error: StateCell::new(None),
            toggle_error: StateCell::new(None),
            session_error: StateCell::new(None),
            pending_delete: Confirmation::default(),
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
        self.ctx.load_into(&self.state, guard.call(&GetSettings)).await;
    }

    /// 乐观切换一个开关；失败时只恢复这一项
    pub async fn toggle(&self, key: SettingKey) {
        let Some(current) = self.state.with(|state| state.ready().map(|s| s.get(key))) else {
            return;
        };
        let next = !current;

        let tentative = |state: &mut LoadState<Settings>| {
            if let Some(settings) = state.ready_mut() {
                settings.set(key, next);
            }
        };
        let reconcile = |state: &mut LoadState<Settings>, resp: Value| {
            if let (Some(settings), Some(confirmed)) = (state.ready_mut(), confirmed_flag(&resp, key)) {
                settings.set(key, confirmed);
            }
        };
        let revert = |state: &mut LoadState<Settings>, ()| {
            if let Some(settings) = state.ready_mut().filter(|s| s.get(key) == next) {
                settings.set(key, current);
            }
        };

        self.toggle_error.set(None);
        let endpoint = UpdateSettings::single(key.field(), next);
        let write = self.ctx.guard().call(&endpoint);
        match apply_optimistic(&self.state, tentative, write, reconcile, revert).await {
            Ok(()) => self.ctx.success(format!("{} updated", key.label())),
            Err(e) => self
                .ctx
                .surface(&e, "Failed to update setting", Some(&self.toggle_error)),
        }
    }

    pub async fn save_account_field(&self, field: AccountField, value: &str) -> bool {
        if value.trim().is_empty() {
            self.account_error.set(Some(EMPTY_VALUE.to_string()));
            return false;
        }
        self.account_error.set(None);

        let endpoint = UpdateAccountField {
            field,
            value: value.to_string(),
        };
        let write = self.ctx.guard().call(&endpoint);
        let Some(resp) = self
            .ctx
            .mutate(write, "Error updating", Some(&self.account_error))
            .await
        else {
            return false;
        };

        let updated = resp
            .get(field.as_str())
            .and_then(Value::as_str)
            .unwrap_or(value)
            .to_string();
        self.state.update(|state| {
            if let Some(settings) = state.ready_mut() {
                settings.set_account_field(field, updated);
            }
        });
        self.ctx
            .success(format!("{} updated successfully", field.as_str()));
        true
    }

    pub async fn change_password(&self, current: &str, new: &str, confirm: &str) -> bool {
        if current.is_empty() || new.is_empty() || confirm.is_empty() {
            self.password_error
                .set(Some(PASSWORD_FIELDS_REQUIRED.to_string()));
            return false;
        }
        if new != confirm {
            self.password_error.set(Some(PASSWORD_MISMATCH.to_string()));
            return false;
        }
        self.password_error.set(None);

        let endpoint = ChangePassword {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        let write = self.ctx.guard().call(&endpoint);
        let changed = self
            .ctx
            .mutate(write, "Error changing password", Some(&self.password_error))
            .await
            .is_some();
        if changed {
            self.ctx.success("Password changed successfully");
        }
        changed
    }

    pub async fn logout_all(&self) {
        self.session_error.set(None);
        let write = self.ctx.guard().call(&LogoutAll);
        if self
            .ctx
            .mutate(write, "Failed to logout all sessions", Some(&self.session_error))
            .await
            .is_some()
        {
            info!("all sessions revoked");
            self.ctx.sign_out();
        }
    }

    pub fn request_delete_account(&self) {
        self.pending_delete.request(());
    }

    pub fn cancel_delete_account(&self) {
        self.pending_delete.cancel();
    }

    pub async fn confirm_delete_account(&self) {
        if self.pending_delete.take().is_none() {
            return;
        }

        self.session_error.set(None);
        let write = self.ctx.guard().call(&DeleteAccount);
        if self
            .ctx
            .mutate(write, "Failed to delete account", Some(&self.session_error))
            .await
            .is_some()
        {
            info!("account deleted");
            self.ctx.sign_out();
        }
    }
}

/// 服务端确认的开关值，可能在顶层或嵌套在 `settings` 中
fn confirmed_flag(resp: &Value, key: SettingKey) -> Option<bool> {
    resp.get(key.field())
        .or_else(|| resp.get("settings")?.get(key.field()))
        .and_then(Value::as_bool)
}
