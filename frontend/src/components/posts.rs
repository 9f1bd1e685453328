use crate::auth::use_auth;
use crate::components::status::{ConfirmDialog, InlineError, render_state};
use crate::components::toast::NoticeToast;
use crate::hooks::{mount, run, use_cell, use_notice};
use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use maxi_client::controller::PostsController;
use maxi_shared::Post;
use std::collections::HashMap;

type Controller = PostsController<FetchHttpClient, BrowserStorage>;
type Stored = StoredValue<Controller, LocalStorage>;

#[component]
pub fn PostsPage() -> impl IntoView {
    let auth = use_auth();
    let posts = mount(Controller::new(auth.guard()), Controller::unmount);
    let (state, draft, comment_drafts, pending_delete, notice) = posts.with_value(|c| {
        (
            use_cell(&c.state),
            use_cell(&c.draft),
            use_cell(&c.comment_drafts),
            use_cell(c.pending_delete.state()),
            use_notice(c.context()),
        )
    });
    let errors = posts.with_value(|c| PostErrors {
        draft: use_cell(&c.draft_error),
        delete: use_cell(&c.delete_error),
        card: CardErrors {
            edit: use_cell(&c.edit_error),
            like: use_cell(&c.like_error),
            comment: use_cell(&c.comment_error),
        },
    });
    // 最近一次操作所在的动态，卡片内的错误只显示在这条动态上
    let active = RwSignal::new(None::<String>);
    run(posts, |c| async move { c.load().await });

    // 正在编辑的动态：(id, 编辑中的内容)
    let editing = RwSignal::new(None::<(String, String)>);

    let on_publish = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        run(posts, |c| async move { c.add_post().await });
    };

    view! {
        <div class="flex flex-col gap-6 max-w-3xl">
            <form class="card bg-base-100 shadow-sm" on:submit=on_publish>
                <div class="card-body gap-3">
                    <textarea
                        class="textarea textarea-bordered w-full"
                        placeholder="What's on your mind?"
                        prop:value=draft
                        on:input=move |ev| posts.with_value(|c| c.set_draft(&event_target_value(&ev)))
                    ></textarea>
                    <InlineError error=errors.draft />
                    <div class="card-actions justify-end">
                        <button class="btn btn-primary">"Post"</button>
                    </div>
                </div>
            </form>

            {move || render_state(state.get(), |list: Vec<Post>| {
                if list.is_empty() {
                    return view! { <p class="text-base-content/60">"No posts yet"</p> }.into_any();
                }
                list.into_iter()
                    .map(|post| view! {
                        <PostCard
                            post=post
                            posts=posts
                            editing=editing
                            comment_drafts=comment_drafts
                            active=active
                            errors=errors.card
                        />
                    })
                    .collect_view()
                    .into_any()
            })}

            <InlineError error=errors.delete />
            <ConfirmDialog
                open=Signal::derive(move || pending_delete.with(Option::is_some))
                message="Delete this post?"
                on_confirm=move || run(posts, |c| async move { c.confirm_delete().await })
                on_cancel=move || posts.with_value(Controller::cancel_delete)
            />
            <NoticeToast notice=notice />
        </div>
    }
}

#[derive(Clone, Copy)]
struct PostErrors {
    draft: ReadSignal<Option<String>>,
    delete: ReadSignal<Option<String>>,
    card: CardErrors,
}

#[derive(Clone, Copy)]
struct CardErrors {
    edit: ReadSignal<Option<String>>,
    like: ReadSignal<Option<String>>,
    comment: ReadSignal<Option<String>>,
}

impl CardErrors {
    fn first(&self) -> Option<String> {
        self.edit
            .get()
            .or_else(|| self.like.get())
            .or_else(|| self.comment.get())
    }
}

#[component]
fn PostCard(
    post: Post,
    posts: Stored,
    editing: RwSignal<Option<(String, String)>>,
    comment_drafts: ReadSignal<HashMap<String, String>>,
    active: RwSignal<Option<String>>,
    errors: CardErrors,
) -> impl IntoView {
    let liked = posts.with_value(|c| c.is_liked(&post));
    let like_count = post.like_count();
    let Post {
        id,
        content,
        comments,
        ..
    } = post;

    let is_editing = {
        let id = id.clone();
        move || editing.with(|e| e.as_ref().is_some_and(|(editing_id, _)| *editing_id == id))
    };

    let body = {
        let id = id.clone();
        let content = content.clone();
        move || {
            if is_editing() {
                let id = id.clone();
                view! {
                    <div class="flex flex-col gap-2">
                        <textarea
                            class="textarea textarea-bordered w-full"
                            prop:value=move || editing.with(|e| e.as_ref().map(|(_, text)| text.clone()).unwrap_or_default())
                            on:input=move |ev| editing.update(|e| {
                                if let Some((_, text)) = e {
                                    *text = event_target_value(&ev);
                                }
                            })
                        ></textarea>
                        <div class="flex gap-2 justify-end">
                            <button class="btn btn-ghost btn-sm" on:click=move |_| editing.set(None)>"Cancel"</button>
                            <button class="btn btn-primary btn-sm" on:click=move |_| {
                                let id = id.clone();
                                active.set(Some(id.clone()));
                                let text = editing.with_untracked(|e| e.as_ref().map(|(_, text)| text.clone()).unwrap_or_default());
                                run(posts, move |c| async move {
                                    c.edit_post(&id, &text).await;
                                    let _ = editing.try_set(None);
                                });
                            }>"Save"</button>
                        </div>
                    </div>
                }
                .into_any()
            } else {
                view! { <p class="whitespace-pre-wrap">{content.clone()}</p> }.into_any()
            }
        }
    };

    let comment_list = comments
        .into_iter()
        .map(|comment| {
            view! {
                <li class="text-sm">
                    <span class="font-semibold">{comment.author_name().to_string()}</span>
                    " "
                    <span>{comment.text}</span>
                </li>
            }
        })
        .collect_view();

    let on_like = {
        let id = id.clone();
        move |_: leptos::ev::MouseEvent| {
            let id = id.clone();
            active.set(Some(id.clone()));
            run(posts, move |c| async move { c.toggle_like(&id).await });
        }
    };
    let on_edit = {
        let id = id.clone();
        let content = content.clone();
        move |_: leptos::ev::MouseEvent| editing.set(Some((id.clone(), content.clone())))
    };
    let on_delete = {
        let id = id.clone();
        move |_: leptos::ev::MouseEvent| posts.with_value(|c| c.request_delete(&id))
    };
    let comment_value = {
        let id = id.clone();
        move || comment_drafts.with(|drafts| drafts.get(&id).cloned().unwrap_or_default())
    };
    let on_comment = {
        let id = id.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let id = id.clone();
            active.set(Some(id.clone()));
            run(posts, move |c| async move { c.add_comment(&id).await });
        }
    };

    let card_error = {
        let id = id.clone();
        move || {
            active
                .with(|active| active.as_deref() == Some(id.as_str()))
                .then(|| errors.first())
                .flatten()
                .map(|message| {
                    view! {
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{message}</span>
                        </div>
                    }
                })
        }
    };

    view! {
        <article class="card bg-base-100 shadow-sm">
            <div class="card-body gap-3">
                {body}
                <div class="flex items-center gap-2">
                    <button
                        class={if liked { "btn btn-sm btn-primary" } else { "btn btn-sm btn-outline" }}
                        on:click=on_like
                    >
                        {if liked { "Unlike" } else { "Like" }}
                        <span class="badge badge-sm">{like_count}</span>
                    </button>
                    <button class="btn btn-sm btn-ghost" on:click=on_edit>"Edit"</button>
                    <button class="btn btn-sm btn-ghost text-error" on:click=on_delete>"Delete"</button>
                </div>
                {card_error}
                <ul class="flex flex-col gap-1">{comment_list}</ul>
                <form class="flex gap-2" on:submit=on_comment>
                    <input
                        class="input input-bordered input-sm flex-1"
                        placeholder="Write a comment..."
                        prop:value=comment_value
                        on:input={
                            let id = id.clone();
                            move |ev| posts.with_value(|c| c.set_comment_draft(&id, &event_target_value(&ev)))
                        }
                    />
                    <button class="btn btn-sm">"Comment"</button>
                </form>
            </div>
        </article>
    }
}
