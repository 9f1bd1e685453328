//! 管理后台外壳：侧边栏、顶栏与内容区

use crate::auth::use_auth;
use crate::components::toast::NoticeToast;
use crate::hooks::{mount, run, use_cell, use_notice};
use crate::web::router::Link;
use crate::web::theme as document_theme;
use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use maxi_client::controller::{ShellController, Theme};
use maxi_client::navigation::{AdminView, AppRoute, NAV_ITEMS};

pub type Shell = ShellController<FetchHttpClient, BrowserStorage>;

/// 供子页面同步侧边栏徽标
#[derive(Clone, Copy)]
pub struct ShellHandle(pub StoredValue<Shell, LocalStorage>);

impl ShellHandle {
    pub fn set_badge_count(&self, count: usize) {
        self.0.with_value(|shell| shell.set_badge_count(count));
    }
}

#[component]
pub fn AdminLayout(current: AdminView, children: Children) -> impl IntoView {
    let auth = use_auth();
    let shell = mount(ShellController::new(auth.guard()), Shell::unmount);
    provide_context(ShellHandle(shell));

    let (state, notice) = shell.with_value(|s| (use_cell(&s.state), use_notice(s.context())));
    run(shell, |s| async move { s.load().await });

    // 页面切换时布局会重新挂载，主题以文档上已有的属性为准
    let theme = shell.with_value(|s| {
        s.theme.set(document_theme::current());
        use_cell(&s.theme)
    });
    Effect::new(move |_| document_theme::apply(theme.get()));

    let initials = move || {
        state.track();
        shell.with_value(Shell::initials)
    };
    let badge = move || {
        state.track();
        shell.with_value(Shell::badge_count)
    };
    let me = move || state.with(|state| state.ready().map(|data| data.me.clone()).unwrap_or_default());

    let nav = NAV_ITEMS
        .iter()
        .map(|&item| {
            let class = if item == current { "active" } else { "" };
            view! {
                <li>
                    <Link route=AppRoute::Admin(item) class=class>
                        {item.label()}
                        {move || (item == AdminView::Requests)
                            .then(badge)
                            .flatten()
                            .map(|count| view! { <span class="badge badge-primary badge-sm">{count}</span> })}
                    </Link>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="drawer lg:drawer-open">
            <input id="sidebar" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <header class="navbar bg-base-100 shadow-sm px-6">
                    <div class="flex-1">
                        <h2 class="text-xl font-semibold">{current.label()}</h2>
                    </div>
                    <button
                        class="btn btn-ghost btn-sm"
                        on:click=move |_| {
                            shell.with_value(|s| {
                                s.toggle_theme();
                            })
                        }
                    >
                        {move || match theme.get() {
                            Theme::Light => "Dark mode",
                            Theme::Dark => "Light mode",
                        }}
                    </button>
                </header>
                <main class="p-6 flex-1">{children()}</main>
            </div>
            <div class="drawer-side">
                <label for="sidebar" class="drawer-overlay"></label>
                <aside class="w-64 min-h-full bg-base-100 flex flex-col">
                    <div class="p-6 text-2xl font-bold text-primary">"Maxi Media"</div>
                    <div class="px-6 pb-4 flex items-center gap-3">
                        <div class="avatar placeholder">
                            <div class="bg-primary text-primary-content rounded-full w-10">
                                <span>{initials}</span>
                            </div>
                        </div>
                        <div class="min-w-0">
                            <p class="font-semibold truncate">{move || me().username}</p>
                            <p class="text-xs text-base-content/60 truncate">{move || me().email}</p>
                        </div>
                    </div>
                    <ul class="menu flex-1 px-4">{nav}</ul>
                    <div class="p-4">
                        <button
                            class="btn btn-outline btn-block"
                            on:click=move |_| shell.with_value(Shell::logout)
                        >
                            "Logout"
                        </button>
                    </div>
                </aside>
            </div>
            <NoticeToast notice=notice />
        </div>
    }
}
