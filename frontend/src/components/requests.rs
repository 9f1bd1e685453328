use crate::auth::use_auth;
use crate::components::layout::ShellHandle;
use crate::components::status::{InlineError, render_state};
use crate::components::toast::NoticeToast;
use crate::hooks::{mount, run, use_cell, use_notice};
use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use maxi_client::controller::RequestsController;
use maxi_shared::User;

type Controller = RequestsController<FetchHttpClient, BrowserStorage>;

#[derive(Clone, Copy)]
enum Decision {
    Accept,
    Reject,
}

#[component]
pub fn RequestsPage() -> impl IntoView {
    let auth = use_auth();
    let shell = use_context::<ShellHandle>();
    let requests = mount(Controller::new(auth.guard()), Controller::unmount);
    let (state, action_error, notice) = requests.with_value(|c| {
        (use_cell(&c.state), use_cell(&c.action_error), use_notice(c.context()))
    });
    run(requests, |c| async move { c.load().await });

    let decide = move |id: String, decision: Decision| {
        run(requests, move |c| async move {
            let handled = match decision {
                Decision::Accept => c.accept(&id).await,
                Decision::Reject => c.reject(&id).await,
            };
            if let (true, Some(shell)) = (handled, shell) {
                shell.set_badge_count(c.pending_count());
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-sm max-w-2xl">
            <div class="card-body">
                <h3 class="card-title">"Friend requests"</h3>
                <InlineError error=action_error />
                {move || render_state(state.get(), |list: Vec<User>| {
                    if list.is_empty() {
                        return view! { <p class="text-base-content/60">"No pending requests"</p> }.into_any();
                    }
                    view! {
                        <ul class="divide-y divide-base-200">
                            {list.into_iter().map(|user| {
                                let accept_id = user.id.clone();
                                let reject_id = user.id.clone();
                                view! {
                                    <li class="py-2 flex items-center justify-between">
                                        <span class="font-medium">{user.username}</span>
                                        <div class="flex gap-2">
                                            <button class="btn btn-sm btn-success" on:click=move |_| decide(accept_id.clone(), Decision::Accept)>
                                                "Accept"
                                            </button>
                                            <button class="btn btn-sm btn-ghost" on:click=move |_| decide(reject_id.clone(), Decision::Reject)>
                                                "Reject"
                                            </button>
                                        </div>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    }
                    .into_any()
                })}
            </div>
            <NoticeToast notice=notice />
        </div>
    }
}
