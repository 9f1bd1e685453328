//! 概览与分析页面

use crate::auth::use_auth;
use crate::components::chart::FollowersChart;
use crate::components::status::render_state;
use crate::components::toast::NoticeToast;
use crate::hooks::{NoticeHandle, mount, run, use_cell, use_notice};
use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use maxi_client::LoadState;
use maxi_client::controller::{OverviewController, OverviewData};
use maxi_shared::{Overview, User};

type Controller = OverviewController<FetchHttpClient, BrowserStorage>;

fn use_overview() -> (ReadSignal<LoadState<OverviewData>>, NoticeHandle) {
    let auth = use_auth();
    let overview = mount(Controller::new(auth.guard()), Controller::unmount);
    let signals = overview.with_value(|c| (use_cell(&c.state), use_notice(c.context())));
    run(overview, |c| async move { c.load().await });
    signals
}

#[component]
fn StatCard(#[prop(into)] title: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="stat bg-base-100 rounded-box shadow-sm">
            <div class="stat-title">{title}</div>
            <div class="stat-value text-2xl">{value}</div>
        </div>
    }
}

fn stat_cards(stats: &Overview) -> impl IntoView + use<> {
    view! {
        <div class="grid grid-cols-2 lg:grid-cols-5 gap-4">
            <StatCard title="Followers" value=stats.followers.to_string() />
            <StatCard title="Likes" value=stats.likes.to_string() />
            <StatCard title="Posts" value=stats.posts.to_string() />
            <StatCard title="Comments" value=stats.comments.to_string() />
            <StatCard title="Engagement" value=format!("{:.1}%", stats.engagement) />
        </div>
    }
}

fn user_list(title: &'static str, users: Vec<User>, empty: &'static str) -> impl IntoView + use<> {
    let body = if users.is_empty() {
        view! { <p class="text-base-content/60">{empty}</p> }.into_any()
    } else {
        users
            .into_iter()
            .map(|user| {
                view! {
                    <li class="flex justify-between py-2">
                        <span class="font-medium">{user.username}</span>
                        <span class="text-base-content/60 text-sm">{user.email}</span>
                    </li>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body">
                <h3 class="card-title">{title}</h3>
                <ul class="divide-y divide-base-200">{body}</ul>
            </div>
        </div>
    }
}

fn warnings(list: Vec<String>) -> impl IntoView + use<> {
    list.into_iter()
        .map(|warning| {
            view! {
                <div role="alert" class="alert alert-warning py-2 text-sm">
                    <span>{warning}</span>
                </div>
            }
        })
        .collect_view()
}

#[component]
pub fn OverviewPage() -> impl IntoView {
    let (state, notice) = use_overview();

    view! {
        <div class="flex flex-col gap-6">
            {move || render_state(state.get(), |data: OverviewData| {
                let pending = data.requests.len();
                view! {
                    {warnings(data.warnings)}
                    {data.stats.as_ref().map(stat_cards)}
                    <div class="stat bg-base-100 rounded-box shadow-sm w-fit">
                        <div class="stat-title">"Pending friend requests"</div>
                        <div class="stat-value text-2xl">{pending}</div>
                    </div>
                    <div class="grid lg:grid-cols-2 gap-6">
                        {user_list("Friends", data.friends, "No friends yet")}
                        {user_list("People", data.users, "No other users")}
                    </div>
                }
                .into_any()
            })}
            <NoticeToast notice=notice />
        </div>
    }
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let (state, notice) = use_overview();

    view! {
        <div class="flex flex-col gap-6">
            {move || render_state(state.get(), |data: OverviewData| {
                let stats = data.stats.unwrap_or_default();
                view! {
                    {warnings(data.warnings)}
                    <div class="card bg-base-100 shadow-sm">
                        <div class="card-body">
                            <h3 class="card-title">"Weekly followers"</h3>
                            <FollowersChart points=stats.weekly_followers.clone() />
                        </div>
                    </div>
                    {stat_cards(&stats)}
                }
                .into_any()
            })}
            <NoticeToast notice=notice />
        </div>
    }
}
