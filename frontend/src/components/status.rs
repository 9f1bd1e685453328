use leptos::prelude::*;
use maxi_client::LoadState;

/// 按加载状态渲染：加载中、失败、已登出或数据就绪
pub fn render_state<T>(state: LoadState<T>, ready: impl FnOnce(T) -> AnyView) -> AnyView {
    match state {
        LoadState::Idle | LoadState::Loading => view! {
            <div class="flex justify-center py-12">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        LoadState::Failed(message) => view! {
            <div role="alert" class="alert alert-error">
                <span>{message}</span>
            </div>
        }
        .into_any(),
        // 路由服务会跳转登录页
        LoadState::SignedOut => view! {
            <p class="text-center text-base-content/60 py-12">"Redirecting to login..."</p>
        }
        .into_any(),
        LoadState::Ready(value) => ready(value),
    }
}

/// 表单内联错误
#[component]
pub fn InlineError(error: ReadSignal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| {
            view! {
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{message}</span>
                </div>
            }
        })
    }
}

/// 二次确认对话框
#[component]
pub fn ConfirmDialog(
    open: Signal<bool>,
    #[prop(into)] message: String,
    on_confirm: impl Fn() + Clone + Send + Sync + 'static,
    on_cancel: impl Fn() + Clone + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal modal-open">
                <div class="modal-box">
                    <p class="py-4">{message.clone()}</p>
                    <div class="modal-action">
                        <button class="btn btn-ghost" on:click={
                            let on_cancel = on_cancel.clone();
                            move |_| on_cancel()
                        }>"Cancel"</button>
                        <button class="btn btn-error" on:click={
                            let on_confirm = on_confirm.clone();
                            move |_| on_confirm()
                        }>"Confirm"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
