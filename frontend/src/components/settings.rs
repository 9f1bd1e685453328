//! 设置页面：隐私与通知开关、账户信息、密码与危险操作

use crate::auth::use_auth;
use crate::components::status::{ConfirmDialog, InlineError, render_state};
use crate::components::toast::NoticeToast;
use crate::hooks::{mount, run, use_cell, use_notice};
use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use maxi_client::controller::SettingsController;
use maxi_shared::{AccountField, SettingKey, Settings};

type Controller = SettingsController<FetchHttpClient, BrowserStorage>;
type Stored = StoredValue<Controller, LocalStorage>;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();
    let settings = mount(Controller::new(auth.guard()), Controller::unmount);
    let (state, account_error, password_error, pending_delete, notice) = settings.with_value(|c| {
        (
            use_cell(&c.state),
            use_cell(&c.account_error),
            use_cell(&c.password_error),
            use_cell(c.pending_delete.state()),
            use_notice(c.context()),
        )
    });
    let (toggle_error, session_error) =
        settings.with_value(|c| (use_cell(&c.toggle_error), use_cell(&c.session_error)));
    run(settings, |c| async move { c.load().await });

    view! {
        <div class="flex flex-col gap-6 max-w-3xl">
            {move || render_state(state.get(), |current: Settings| {
                view! {
                    <section class="card bg-base-100 shadow-sm">
                        <div class="card-body">
                            <h3 class="card-title">"Privacy & notifications"</h3>
                            {SettingKey::ALL.into_iter().map(|key| view! {
                                <label class="label cursor-pointer">
                                    <span class="label-text">{key.label()}</span>
                                    <input
                                        type="checkbox"
                                        class="toggle toggle-primary"
                                        prop:checked=current.get(key)
                                        on:change=move |_| run(settings, move |c| async move { c.toggle(key).await })
                                    />
                                </label>
                            }).collect_view()}
                            <InlineError error=toggle_error />
                        </div>
                    </section>
                    <section class="card bg-base-100 shadow-sm">
                        <div class="card-body gap-4">
                            <h3 class="card-title">"Account"</h3>
                            <AccountFieldEditor settings=settings field=AccountField::Username current=current.username.clone() />
                            <AccountFieldEditor settings=settings field=AccountField::Email current=current.email.clone() />
                        </div>
                    </section>
                }
                .into_any()
            })}
            <InlineError error=account_error />

            <PasswordForm settings=settings error=password_error />

            <section class="card bg-base-100 shadow-sm border border-error/30">
                <div class="card-body gap-3">
                    <h3 class="card-title text-error">"Danger zone"</h3>
                    <InlineError error=session_error />
                    <div class="flex gap-3">
                        <button class="btn btn-outline" on:click=move |_| run(settings, |c| async move { c.logout_all().await })>
                            "Logout all sessions"
                        </button>
                        <button class="btn btn-error" on:click=move |_| settings.with_value(Controller::request_delete_account)>
                            "Delete account"
                        </button>
                    </div>
                </div>
            </section>

            <ConfirmDialog
                open=Signal::derive(move || pending_delete.with(Option::is_some))
                message="Delete your account? This cannot be undone."
                on_confirm=move || run(settings, |c| async move { c.confirm_delete_account().await })
                on_cancel=move || settings.with_value(Controller::cancel_delete_account)
            />
            <NoticeToast notice=notice />
        </div>
    }
}

#[component]
fn AccountFieldEditor(settings: Stored, field: AccountField, current: String) -> impl IntoView {
    let value = RwSignal::new(String::new());
    let placeholder = format!("New {}", field.as_str());

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = value.get_untracked();
        run(settings, move |c| async move {
            if c.save_account_field(field, &input).await {
                let _ = value.try_set(String::new());
            }
        });
    };

    view! {
        <form class="flex items-end gap-3" on:submit=on_save>
            <div class="form-control flex-1">
                <label class="label">
                    <span class="label-text capitalize">{field.as_str()}</span>
                    <span class="label-text-alt">{current}</span>
                </label>
                <input
                    class="input input-bordered"
                    placeholder=placeholder
                    prop:value=value
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
            <button class="btn btn-primary">"Save"</button>
        </form>
    }
}

#[component]
fn PasswordForm(settings: Stored, error: ReadSignal<Option<String>>) -> impl IntoView {
    let current = RwSignal::new(String::new());
    let new = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (old, fresh, again) = (
            current.get_untracked(),
            new.get_untracked(),
            confirm.get_untracked(),
        );
        run(settings, move |c| async move {
            if c.change_password(&old, &fresh, &again).await {
                for field in [current, new, confirm] {
                    let _ = field.try_set(String::new());
                }
            }
        });
    };

    let input = move |field: RwSignal<String>, placeholder: &'static str| {
        view! {
            <input
                type="password"
                class="input input-bordered"
                placeholder=placeholder
                prop:value=field
                on:input=move |ev| field.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <form class="card bg-base-100 shadow-sm" on:submit=on_submit>
            <div class="card-body gap-3">
                <h3 class="card-title">"Change password"</h3>
                <InlineError error=error />
                {input(current, "Current password")}
                {input(new, "New password")}
                {input(confirm, "Confirm new password")}
                <div class="card-actions justify-end">
                    <button class="btn btn-primary">"Update password"</button>
                </div>
            </div>
        </form>
    }
}
