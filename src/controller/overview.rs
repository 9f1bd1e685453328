//! 总览页：统计数据、好友请求、好友与用户目录
//!
//! 四个请求并发发出，部分失败时其余结果照常展示，失败项以警告列出。

use crate::collections::dedup_by_id;
use crate::error::{ApiError, ApiResult};
use crate::join::join_tolerant;
use crate::lifecycle::{LoadState, ViewContext};
use crate::observe::StateCell;
use crate::policy::AuthGuard;
use crate::request::HttpClient;
use crate::session::SessionStorage;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use maxi_shared::protocol::{AdminOverview, ListFriendRequests, ListFriends, ListUsers};
use maxi_shared::{Overview, User};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverviewData {
    pub stats: Option<Overview>,
    pub requests: Vec<User>,
    pub friends: Vec<User>,
    /// 用户目录，不含当前用户
    pub users: Vec<User>,
    pub warnings: Vec<String>,
}

enum Part {
    Stats(Overview),
    Requests(Vec<User>),
    Friends(Vec<User>),
    Users(Vec<User>),
}

const PART_LABELS: [&str; 4] = ["stats", "friend requests", "friends", "users"];

pub struct OverviewController<H, S> {
    ctx: ViewContext<H, S>,
    pub state: StateCell<LoadState<OverviewData>>,
}

impl<H, S> Clone for OverviewController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            state: self.state.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> OverviewController<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            ctx: ViewContext::new(guard),
            state: StateCell::new(LoadState::Idle),
        }
    }

    pub fn context(&self) -> &ViewContext<H, S> {
        &self.ctx
    }

    pub async fn load(&self) {
        let guard = self.ctx.guard();
        let me = self.ctx.session().get_user_id();

        let fetch = async {
            let calls: Vec<LocalBoxFuture<'_, ApiResult<Part>>> = vec![
                guard.call(&AdminOverview).map(|r| r.map(Part::Stats)).boxed_local(),
                guard
                    .call(&ListFriendRequests)
                    .map(|r| r.map(Part::Requests))
                    .boxed_local(),
                guard.call(&ListFriends).map(|r| r.map(Part::Friends)).boxed_local(),
                guard.call(&ListUsers).map(|r| r.map(Part::Users)).boxed_local(),
            ];
            let results = join_tolerant(calls).await?;
            assemble(results, me.as_deref())
        };

        self.ctx.load_into(&self.state, fetch).await;
    }

    pub fn unmount(&self) {
        self.ctx.unmount();
    }
}

fn assemble(results: Vec<ApiResult<Part>>, me: Option<&str>) -> ApiResult<OverviewData> {
    let mut data = OverviewData::default();
    let mut first_error: Option<ApiError> = None;

    for (label, result) in PART_LABELS.iter().zip(results) {
        match result {
            Ok(Part::Stats(stats)) => data.stats = Some(stats),
            Ok(Part::Requests(requests)) => data.requests = requests,
            Ok(Part::Friends(friends)) => data.friends = dedup_by_id(friends),
            Ok(Part::Users(users)) => {
                data.users = users
                    .into_iter()
                    .filter(|user| Some(user.id.as_str()) != me)
                    .collect();
            }
            Err(e) => {
                data.warnings.push(format!("Could not load {label}: {}", e.message()));
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if data.warnings.len() == PART_LABELS.len() => Err(e),
        _ => Ok(data),
    }
}

#[cfg(test)]
mod tests;
