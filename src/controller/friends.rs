//! 好友列表与添加好友

use crate::collections::{dedup_by_id, remove_by_id};
use crate::error::ApiResult;
use crate::join::join_required;
use crate::lifecycle::{LoadState, ViewContext};
use crate::observe::StateCell;
use crate::policy::AuthGuard;
use crate::request::HttpClient;
use crate::session::SessionStorage;
use futures::FutureExt;
use maxi_shared::User;
use maxi_shared::protocol::{CurrentUser, ListFriends, ListUsers, SendFriendRequest};

pub struct FriendsController<H, S> {
    ctx: ViewContext<H, S>,
    pub state: StateCell<LoadState<Vec<User>>>,
}

impl<H, S> Clone for FriendsController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            state: self.state.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> FriendsController<H, S> {
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
        let guard = self.ctx.guard();
        let fetch = async { guard.call(&ListFriends).await.map(dedup_by_id) };
        self.ctx.load_into(&self.state, fetch).await;
    }
}

/// 可添加的用户：排除自己、已有好友和已发送过请求的用户
pub struct AddFriendsController<H, S> {
    ctx: ViewContext<H, S>,
    pub state: StateCell<LoadState<Vec<User>>>,
    pub request_error: StateCell<Option<String>>,
}

impl<H, S> Clone for AddFriendsController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            state: self.state.clone(),
            request_error: self.request_error.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> AddFriendsController<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            ctx: ViewContext::new(guard),
            state: StateCell::new(LoadState::Idle),
            request_error: StateCell::new(None),
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
        let my_id = self.ctx.session().get_user_id();

        let fetch = async {
            let lists = join_required(vec![
                guard.call(&ListUsers).boxed_local(),
                guard.call(&ListFriends).boxed_local(),
            ]);
            let (mut lists, me) = futures::try_join!(lists, guard.call(&CurrentUser))?;
            let friends = lists.pop().unwrap_or_default();
            let users = lists.pop().unwrap_or_default();
            ApiResult::Ok(candidates(users, &friends, &me, my_id.as_deref()))
        };
        self.ctx.load_into(&self.state, fetch).await;
    }

    pub async fn send_request(&self, id: &str) {
        self.request_error.set(None);
        let endpoint = SendFriendRequest {
            user_id: id.to_string(),
        };
        let write = self.ctx.guard().call(&endpoint);
        if self
            .ctx
            .mutate(write, "Failed to send friend request", Some(&self.request_error))
            .await
            .is_some()
        {
            self.state.update(|state| {
                if let Some(users) = state.ready_mut() {
                    remove_by_id(users, id);
                }
            });
            self.ctx.success("Friend request sent");
        }
    }
}

fn candidates(users: Vec<User>, friends: &[User], me: &User, my_id: Option<&str>) -> Vec<User> {
    users
        .into_iter()
        .filter(|user| Some(user.id.as_str()) != my_id && user.id != me.id)
        .filter(|user| !friends.iter().any(|friend| friend.id == user.id))
        .filter(|user| !me.sent_requests.contains(&user.id))
        .collect()
}

#[cfg(test)]
mod tests;
