use crate::auth::use_auth;
use crate::components::status::render_state;
use crate::hooks::{mount, run, use_cell};
use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use maxi_client::controller::ProfileController;
use maxi_client::navigation::initials;
use maxi_shared::User;

type Controller = ProfileController<FetchHttpClient, BrowserStorage>;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let profile = mount(Controller::new(auth.guard()), Controller::unmount);
    let state = profile.with_value(|c| use_cell(&c.state));
    run(profile, |c| async move { c.load().await });

    view! {
        <div class="card bg-base-100 shadow-sm max-w-xl">
            <div class="card-body items-center text-center">
                {move || render_state(state.get(), |user: User| {
                    let joined = profile.with_value(Controller::joined_on);
                    view! {
                        <div class="avatar placeholder">
                            <div class="bg-primary text-primary-content rounded-full w-20">
                                <span class="text-2xl">{initials(&user.username)}</span>
                            </div>
                        </div>
                        <h3 class="text-2xl font-bold mt-2">{user.username}</h3>
                        <p class="text-base-content/70">{user.email}</p>
                        {joined.map(|date| view! { <p class="text-sm text-base-content/60">"Joined " {date}</p> })}
                    }
                    .into_any()
                })}
                <button class="btn btn-outline mt-4" on:click=move |_| profile.with_value(Controller::logout)>
                    "Logout"
                </button>
            </div>
        </div>
    }
}
