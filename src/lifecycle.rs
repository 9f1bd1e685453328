//! 视图控制器生命周期
//!
//! 每个控制器持有一个 `ViewContext`：
//! - `Lifecycle` 记录挂载状态与加载代数，过期的结果通过 `Ticket` 识别并丢弃；
//! - `notice` 是短暂通知的状态单元；
//! - `surface` 按错误分类把失败呈现到就地提示、通知或登录跳转。

use crate::error::{ApiError, ApiResult, Surface};
use crate::observe::StateCell;
use crate::policy::AuthGuard;
use crate::request::HttpClient;
use crate::session::{SessionStorage, SessionStore};
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use tracing::{error, warn};

// =========================================================
// 加载状态
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
    /// 认证失败，等待跳转登录
    SignedOut,
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_signed_out(&self) -> bool {
        matches!(self, LoadState::SignedOut)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// =========================================================
// 通知
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

// =========================================================
// 挂载与代数
// =========================================================

struct LifecycleState {
    mounted: Cell<bool>,
    generation: Cell<u64>,
}

/// 控制器的挂载标记与加载代数
#[derive(Clone)]
pub struct Lifecycle {
    state: Rc<LifecycleState>,
}

/// 发出请求时领取的凭据
///
/// 加载凭据带有代数，较新的加载会使旧凭据失效；写操作凭据不参与代数比较。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: Option<u64>,
    epoch: u64,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: Rc::new(LifecycleState {
                mounted: Cell::new(true),
                generation: Cell::new(0),
            }),
        }
    }

    pub fn begin(&self, epoch: u64) -> Ticket {
        let generation = self.state.generation.get() + 1;
        self.state.generation.set(generation);
        Ticket {
            generation: Some(generation),
            epoch,
        }
    }

    pub fn begin_mutation(&self, epoch: u64) -> Ticket {
        Ticket {
            generation: None,
            epoch,
        }
    }

    pub fn accepts(&self, ticket: &Ticket, epoch: u64) -> bool {
        let current = ticket
            .generation
            .is_none_or(|generation| generation == self.state.generation.get());
        self.state.mounted.get() && current && ticket.epoch == epoch
    }

    pub fn is_mounted(&self) -> bool {
        self.state.mounted.get()
    }

    pub fn unmount(&self) {
        self.state.mounted.set(false);
    }
}

// =========================================================
// 控制器上下文
// =========================================================

pub struct ViewContext<H, S> {
    guard: AuthGuard<H, S>,
    lifecycle: Lifecycle,
    notice: StateCell<Option<Notice>>,
}

impl<H, S> Clone for ViewContext<H, S> {
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            lifecycle: self.lifecycle.clone(),
            notice: self.notice.clone(),
        }
    }
}

impl<H: HttpClient, S: SessionStorage> ViewContext<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            guard,
            lifecycle: Lifecycle::new(),
            notice: StateCell::new(None),
        }
    }

    pub fn guard(&self) -> &AuthGuard<H, S> {
        &self.guard
    }

    pub fn session(&self) -> &SessionStore<S> {
        self.guard.session()
    }

    pub fn notice(&self) -> &StateCell<Option<Notice>> {
        &self.notice
    }

    pub fn begin_load(&self) -> Ticket {
        self.lifecycle.begin(self.session().epoch())
    }

    pub fn begin_mutation(&self) -> Ticket {
        self.lifecycle.begin_mutation(self.session().epoch())
    }

    /// 结果是否仍可应用；不可应用时记录日志
    pub fn accepts(&self, ticket: &Ticket) -> bool {
        let accepted = self.lifecycle.accepts(ticket, self.session().epoch());
        if !accepted {
            warn!("discarding stale result");
        }
        accepted
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }

    pub fn unmount(&self) {
        self.lifecycle.unmount();
    }

    /// 执行一次加载并写入状态单元
    ///
    /// 认证失败时只要仍挂载就进入 `SignedOut`；其他结果过期则丢弃。
    /// 返回结果是否已应用。
    pub async fn load_into<T, F>(&self, cell: &StateCell<LoadState<T>>, fetch: F) -> bool
    where
        T: Clone + 'static,
        F: Future<Output = ApiResult<T>>,
    {
        let ticket = self.begin_load();
        cell.set(LoadState::Loading);

        let result = fetch.await;
        if let Err(e) = &result {
            if e.is_auth() {
                if self.is_mounted() {
                    cell.set(LoadState::SignedOut);
                }
                return false;
            }
        }
        if !self.accepts(&ticket) {
            return false;
        }

        match result {
            Ok(value) => cell.set(LoadState::Ready(value)),
            Err(e) => cell.set(LoadState::Failed(e.message().to_string())),
        }
        true
    }

    /// 执行一次写操作
    ///
    /// 成功且结果仍可应用时返回 `Some`；失败时按分类呈现错误。
    pub async fn mutate<T, F>(
        &self,
        write: F,
        fallback: &str,
        inline: Option<&StateCell<Option<String>>>,
    ) -> Option<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        let ticket = self.begin_mutation();
        let result = write.await;
        if !self.accepts(&ticket) {
            return None;
        }
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.surface(&e, fallback, inline);
                None
            }
        }
    }

    /// 按错误分类呈现失败
    ///
    /// 认证错误已由 `AuthGuard` 清除会话，这里不做处理。
    pub fn surface(
        &self,
        err: &ApiError,
        fallback: &str,
        inline: Option<&StateCell<Option<String>>>,
    ) {
        let message = err.message_or(fallback).to_string();
        match (err.surface(), inline) {
            (Surface::Redirect, _) => {}
            (Surface::Inline, Some(cell)) => cell.set(Some(message)),
            _ => self.notify(NoticeKind::Error, message),
        }
    }

    /// 主动登出：清除会话，由路由服务负责跳转
    pub fn sign_out(&self) {
        if let Err(e) = self.session().clear() {
            error!(error = %e, "failed to clear session");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NoticeKind::Success, message.into());
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    fn notify(&self, kind: NoticeKind, message: String) {
        if self.is_mounted() {
            self.notice.set(Some(Notice { kind, message }));
        }
    }
}

// =========================================================
// 二次确认
// =========================================================

/// 破坏性操作的确认闸门
pub struct Confirmation<A> {
    pending: StateCell<Option<A>>,
}

impl<A> Clone for Confirmation<A> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
        }
    }
}

impl<A: Clone + 'static> Default for Confirmation<A> {
    fn default() -> Self {
        Self {
            pending: StateCell::new(None),
        }
    }
}

impl<A: Clone + 'static> Confirmation<A> {
    pub fn request(&self, action: A) {
        self.pending.set(Some(action));
    }

    pub fn pending(&self) -> Option<A> {
        self.pending.get()
    }

    pub fn state(&self) -> &StateCell<Option<A>> {
        &self.pending
    }

    /// 取出待确认的操作
    pub fn take(&self) -> Option<A> {
        let action = self.pending.get()?;
        self.pending.set(None);
        Some(action)
    }

    pub fn cancel(&self) {
        self.pending.set(None);
    }
}

#[cfg(test)]
mod tests;
