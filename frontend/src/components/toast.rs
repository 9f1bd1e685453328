use crate::hooks::NoticeHandle;
use leptos::prelude::*;
use maxi_client::{Notice, NoticeKind};
use std::time::Duration;

const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// 操作结果提示，数秒后自动消失
#[component]
pub fn NoticeToast(notice: NoticeHandle) -> impl IntoView {
    Effect::new(move |_| {
        if notice.notice.with(Option::is_some) {
            set_timeout(move || notice.dismiss(), NOTICE_DURATION);
        }
    });

    move || {
        notice.notice.get().map(|Notice { kind, message }| {
            let class = match kind {
                NoticeKind::Success => "alert alert-success",
                NoticeKind::Error => "alert alert-error",
            };
            view! {
                <div class="toast toast-end z-50">
                    <div class=class>
                        <span>{message}</span>
                        <button class="btn btn-ghost btn-xs" on:click=move |_| notice.dismiss()>
                            "✕"
                        </button>
                    </div>
                </div>
            }
        })
    }
}
