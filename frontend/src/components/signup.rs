use crate::auth::use_auth;
use crate::components::status::InlineError;
use crate::hooks::{run, use_cell};
use crate::web::router::Link;
use leptos::prelude::*;
use maxi_client::controller::SignupController;
use maxi_client::navigation::AppRoute;

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let signup = StoredValue::new_local(SignupController::new(auth.guard()));
    let (submitting, error) =
        signup.with_value(|c| (use_cell(&c.form.submitting), use_cell(&c.form.error)));

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let username = username.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();
        run(signup, move |c| async move {
            c.submit(&username, &email, &password).await;
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create an account"</h1>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <InlineError error=error />

                        <input
                            type="text"
                            placeholder="Username"
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            prop:value=username
                            class="input input-bordered"
                        />
                        <input
                            type="email"
                            placeholder="Email"
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                            class="input input-bordered"
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered"
                        />
                        <button class="btn btn-primary mt-4" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Creating..." } else { "Sign Up" }}
                        </button>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <Link route=AppRoute::Login class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
