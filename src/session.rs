//! 会话存储
//!
//! 会话由 `(token, userId)` 成对组成：要么两者都存在（已认证），要么都不存在（匿名）。
//! 存储后端只需实现 `SessionStorage`，浏览器端使用 LocalStorage，测试与原生环境使用 `MemoryStorage`。
//! 会话的变化会广播给所有订阅者，路由与各控制器据此感知登出。

use crate::observe::{Listeners, Subscription};
use maxi_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_ID_KEY};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("session token and user id must both be non-empty")]
    IncompleteSession,
}

/// 键值存储后端
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// 内存存储，克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// 会话变化事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
}

struct Inner<S> {
    storage: S,
    listeners: Listeners<SessionEvent>,
    /// 每次登录/登出切换时递增
    epoch: Cell<u64>,
}

/// 会话存储服务
///
/// 克隆得到的是同一个存储的句柄。
pub struct SessionStore<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                storage,
                listeners: Listeners::new(),
                epoch: Cell::new(0),
            }),
        }
    }

    /// 启动时清理只剩一半的会话
    pub fn hydrate(&self) -> Result<(), StorageError> {
        let token = self.read(STORAGE_TOKEN_KEY);
        let user_id = self.read(STORAGE_USER_ID_KEY);
        if token.is_some() != user_id.is_some() {
            warn!("discarding partial session found in storage");
            self.remove_both()?;
        }
        Ok(())
    }

    /// 当前会话；只要缺一个字段就视为匿名
    pub fn session(&self) -> Option<Session> {
        let token = self.read(STORAGE_TOKEN_KEY)?;
        let user_id = self.read(STORAGE_USER_ID_KEY)?;
        Some(Session { token, user_id })
    }

    pub fn get_token(&self) -> Option<String> {
        self.session().map(|session| session.token)
    }

    pub fn get_user_id(&self) -> Option<String> {
        self.session().map(|session| session.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// 成对写入会话
    ///
    /// 第二次写入失败时回滚第一次写入，存储中不会留下半个会话。
    pub fn set_session(&self, token: &str, user_id: &str) -> Result<(), StorageError> {
        if token.is_empty() || user_id.is_empty() {
            return Err(StorageError::IncompleteSession);
        }

        let storage = &self.inner.storage;
        storage.set(STORAGE_TOKEN_KEY, token)?;
        if let Err(e) = storage.set(STORAGE_USER_ID_KEY, user_id) {
            if let Err(rollback) = storage.remove(STORAGE_TOKEN_KEY) {
                warn!(error = %rollback, "failed to roll back session token");
            }
            return Err(e);
        }

        debug!("session established");
        self.transition(SessionEvent::SignedIn);
        Ok(())
    }

    /// 清除会话（幂等）
    ///
    /// 只有从已认证切换到匿名时才广播 `SignedOut`。
    pub fn clear(&self) -> Result<(), StorageError> {
        let was_authenticated = self.is_authenticated();
        let result = self.remove_both();
        if was_authenticated && !self.is_authenticated() {
            debug!("session cleared");
            self.transition(SessionEvent::SignedOut);
        }
        result
    }

    pub fn epoch(&self) -> u64 {
        self.inner.epoch.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + 'static) -> Subscription {
        self.inner.listeners.subscribe(listener)
    }

    fn transition(&self, event: SessionEvent) {
        self.inner.epoch.set(self.inner.epoch.get() + 1);
        self.inner.listeners.emit(&event);
    }

    fn read(&self, key: &str) -> Option<String> {
        self.inner
            .storage
            .get(key)
            .filter(|value| !value.is_empty())
    }

    // 两个键都尝试删除，返回遇到的第一个错误
    fn remove_both(&self) -> Result<(), StorageError> {
        let storage = &self.inner.storage;
        let token = storage.remove(STORAGE_TOKEN_KEY);
        let user_id = storage.remove(STORAGE_USER_ID_KEY);
        token.and(user_id)
    }
}

#[cfg(test)]
mod tests;
