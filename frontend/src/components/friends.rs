use crate::auth::use_auth;
use crate::components::status::{InlineError, render_state};
use crate::components::toast::NoticeToast;
use crate::hooks::{mount, run, use_cell, use_notice};
use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use maxi_client::controller::{AddFriendsController, FriendsController};
use maxi_shared::User;

type Friends = FriendsController<FetchHttpClient, BrowserStorage>;
type AddFriends = AddFriendsController<FetchHttpClient, BrowserStorage>;

/// 好友列表 + 可添加的用户
#[component]
pub fn FriendsPage() -> impl IntoView {
    let auth = use_auth();
    let friends = mount(Friends::new(auth.guard()), Friends::unmount);
    let candidates = mount(AddFriends::new(auth.guard()), AddFriends::unmount);

    let (friends_state, friends_notice) =
        friends.with_value(|c| (use_cell(&c.state), use_notice(c.context())));
    let (candidates_state, request_error, candidates_notice) = candidates.with_value(|c| {
        (use_cell(&c.state), use_cell(&c.request_error), use_notice(c.context()))
    });

    run(friends, |c| async move { c.load().await });
    run(candidates, |c| async move { c.load().await });

    view! {
        <div class="grid lg:grid-cols-2 gap-6">
            <section class="card bg-base-100 shadow-sm">
                <div class="card-body">
                    <h3 class="card-title">"Your friends"</h3>
                    {move || render_state(friends_state.get(), |list: Vec<User>| {
                        if list.is_empty() {
                            return view! { <p class="text-base-content/60">"No friends yet"</p> }.into_any();
                        }
                        view! {
                            <ul class="divide-y divide-base-200">
                                {list.into_iter().map(|user| view! {
                                    <li class="py-2">
                                        <p class="font-medium">{user.username}</p>
                                        <p class="text-sm text-base-content/60">{user.email}</p>
                                    </li>
                                }).collect_view()}
                            </ul>
                        }
                        .into_any()
                    })}
                </div>
            </section>

            <section class="card bg-base-100 shadow-sm">
                <div class="card-body">
                    <h3 class="card-title">"Add friends"</h3>
                    <InlineError error=request_error />
                    {move || render_state(candidates_state.get(), |list: Vec<User>| {
                        if list.is_empty() {
                            return view! { <p class="text-base-content/60">"No one new to add"</p> }.into_any();
                        }
                        view! {
                            <ul class="divide-y divide-base-200">
                                {list.into_iter().map(|user| {
                                    let id = user.id.clone();
                                    view! {
                                        <li class="py-2 flex items-center justify-between">
                                            <span class="font-medium">{user.username}</span>
                                            <button class="btn btn-sm btn-primary" on:click=move |_| {
                                                let id = id.clone();
                                                run(candidates, move |c| async move { c.send_request(&id).await });
                                            }>"Add friend"</button>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        }
                        .into_any()
                    })}
                </div>
            </section>

            <NoticeToast notice=friends_notice />
            <NoticeToast notice=candidates_notice />
        </div>
    }
}
