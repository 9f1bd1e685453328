//! 收到的好友请求

use crate::collections::remove_by_id;
use crate::lifecycle::{LoadState, ViewContext};
use crate::observe::StateCell;
use crate::policy::AuthGuard;
use crate::request::HttpClient;
use crate::session::SessionStorage;
use maxi_shared::User;
use maxi_shared::protocol::{AcceptFriendRequest, ListFriendRequests, RejectFriendRequest};

pub struct RequestsController<H, S> {
    ctx: ViewContext<H, S>,
    pub state: StateCell<LoadState<Vec<User>>>,
    pub action_error: StateCell<Option<String>>,
}

impl<H, S> Clone for RequestsController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            state: self.state.clone(),
            action_error: self.action_error.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> RequestsController<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            ctx: ViewContext::new(guard),
            state: StateCell::new(LoadState::Idle),
            action_error: StateCell::new(None),
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
        self.ctx
            .load_into(&self.state, guard.call(&ListFriendRequests))
            .await;
    }

    pub async fn accept(&self, id: &str) -> bool {
        self.action_error.set(None);
        let endpoint = AcceptFriendRequest {
            user_id: id.to_string(),
        };
        let write = self.ctx.guard().call(&endpoint);
        let done = self
            .ctx
            .mutate(write, "Failed to accept request", Some(&self.action_error))
            .await
            .is_some();
        if done {
            self.remove(id);
        }
        done
    }

    pub async fn reject(&self, id: &str) -> bool {
        self.action_error.set(None);
        let endpoint = RejectFriendRequest {
            user_id: id.to_string(),
        };
        let write = self.ctx.guard().call(&endpoint);
        let done = self
            .ctx
            .mutate(write, "Failed to reject request", Some(&self.action_error))
            .await
            .is_some();
        if done {
            self.remove(id);
        }
        done
    }

    pub fn pending_count(&self) -> usize {
        self.state.with(|state| state.ready().map_or(0, Vec::len))
    }

    fn remove(&self, id: &str) {
        self.state.update(|state| {
            if let Some(requests) = state.ready_mut() {
                remove_by_id(requests, id);
            }
        });
    }
}
