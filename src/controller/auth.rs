//! 登录与注册

use super::FILL_ALL_FIELDS;
use crate::error::{ApiError, ApiResult, INVALID_RESPONSE};
use crate::lifecycle::ViewContext;
use crate::observe::StateCell;
use crate::policy::AuthGuard;
use crate::request::HttpClient;
use crate::session::SessionStorage;
use maxi_shared::AuthToken;
use maxi_shared::protocol::{CurrentUser, Login, Signup};
use tracing::info;

pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Signup failed";

/// 表单提交状态
pub struct FormState {
    pub submitting: StateCell<bool>,
    pub error: StateCell<Option<String>>,
}

impl Clone for FormState {
    fn clone(&self) -> Self {
        Self {
            submitting: self.submitting.clone(),
            error: self.error.clone(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            submitting: StateCell::new(false),
            error: StateCell::new(None),
        }
    }
}

impl FormState {
    fn reject(&self, message: &str) -> bool {
        self.error.set(Some(message.to_string()));
        false
    }
}

/// 用认证响应建立会话
///
/// 响应中没有用户 ID 时，用新令牌查询 `/users/me`。
async fn establish_session<H, S>(guard: &AuthGuard<H, S>, auth: AuthToken) -> ApiResult<()>
where
    H: HttpClient,
    S: SessionStorage,
{
    if auth.token.is_empty() {
        return Err(ApiError::server(INVALID_RESPONSE));
    }

    let user_id = match auth.resolved_user_id() {
        Some(id) => id,
        None => guard.client().call_as(&CurrentUser, &auth.token).await?.id,
    };

    guard.session().set_session(&auth.token, &user_id)?;
    info!("signed in");
    Ok(())
}

// =========================================================
// Login
// =========================================================

pub struct LoginController<H, S> {
    ctx: ViewContext<H, S>,
    pub form: FormState,
}

impl<H, S> Clone for LoginController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            form: self.form.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> LoginController<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            ctx: ViewContext::new(guard),
            form: FormState::default(),
        }
    }

    pub fn context(&self) -> &ViewContext<H, S> {
        &self.ctx
    }

    /// 返回是否登录成功
    pub async fn submit(&self, email: &str, password: &str) -> bool {
        if email.trim().is_empty() || password.is_empty() {
            return self.form.reject(FILL_ALL_FIELDS);
        }
        if self.form.submitting.get() {
            return false;
        }

        self.form.error.set(None);
        self.form.submitting.set(true);

        let guard = self.ctx.guard();
        let result = async {
            let auth = guard
                .call(&Login {
                    email: email.trim().to_string(),
                    password: password.to_string(),
                })
                .await?;
            establish_session(guard, auth).await
        }
        .await;

        self.form.submitting.set(false);
        match result {
            Ok(()) => true,
            Err(e) => self.form.reject(e.message_or(LOGIN_FAILED)),
        }
    }
}

// =========================================================
// Signup
// =========================================================

pub struct SignupController<H, S> {
    ctx: ViewContext<H, S>,
    pub form: FormState,
}

impl<H, S> Clone for SignupController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            form: self.form.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> SignupController<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            ctx: ViewContext::new(guard),
            form: FormState::default(),
        }
    }

    pub fn context(&self) -> &ViewContext<H, S> {
        &self.ctx
    }

    pub async fn submit(&self, username: &str, email: &str, password: &str) -> bool {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return self.form.reject(FILL_ALL_FIELDS);
        }
        if self.form.submitting.get() {
            return false;
        }

        self.form.error.set(None);
        self.form.submitting.set(true);

        let guard = self.ctx.guard();
        let result = async {
            let auth = guard
                .call(&Signup {
                    username: username.trim().to_string(),
                    email: email.trim().to_string(),
                    password: password.to_string(),
                })
                .await?;
            establish_session(guard, auth).await
        }
        .await;

        self.form.submitting.set(false);
        match result {
            Ok(()) => true,
            Err(e) => self.form.reject(e.message_or(SIGNUP_FAILED)),
        }
    }
}
