//! 动态页：发布、编辑、删除、点赞与评论

use crate::collections::{find_by_id_mut, remove_by_id, replace_by_id};
use crate::lifecycle::{Confirmation, LoadState, ViewContext};
use crate::observe::StateCell;
use crate::optimistic::apply_optimistic;
use crate::policy::AuthGuard;
use crate::request::HttpClient;
use crate::session::SessionStorage;
use maxi_shared::Post;
use maxi_shared::protocol::{AddComment, CreatePost, DeletePost, EditPost, ListPosts, ToggleLike};
use std::collections::HashMap;

pub struct PostsController<H, S> {
    ctx: ViewContext<H, S>,
    pub state: StateCell<LoadState<Vec<Post>>>,
    /// 新动态输入框
    pub draft: StateCell<String>,
    /// 每条动态各自的评论输入框
    pub comment_drafts: StateCell<HashMap<String, String>>,
    pub pending_delete: Confirmation<String>,
    /// 各操作的就地错误（客户端错误显示在触发它的控件旁）
    pub draft_error: StateCell<Option<String>>,
    pub edit_error: StateCell<Option<String>>,
    pub delete_error: StateCell<Option<String>>,
    pub like_error: StateCell<Option<String>>,
    pub comment_error: StateCell<Option<String>>,
}

impl<H, S> Clone for PostsController<H, S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            state: self.state.clone(),
            draft: self.draft.clone(),
            comment_drafts: self.comment_drafts.clone(),
            pending_delete: self.pending_delete.clone(),
            draft_error: self.draft_error.clone(),
            edit_error: self.edit_error.clone(),
            delete_error: self.delete_error.clone(),
            like_error: self.like_error.clone(),
            comment_error: self.comment_error.clone(),
        }
    }
}

impl<H: HttpClient + 'static, S: SessionStorage + 'static> PostsController<H, S> {
    pub fn new(guard: AuthGuard<H, S>) -> Self {
        Self {
            ctx: ViewContext::new(guard),
            state: StateCell::new(LoadState::Idle),
            draft: StateCell::new(String::new()),
            comment_drafts: StateCell::new(HashMap::new()),
            pending_delete: Confirmation::default(),
            draft_error: StateCell::new(None),
            edit_error: StateCell::new(None),
            delete_error: StateCell::new(None),
            like_error: StateCell::new(None),
            comment_error: StateCell::new(None),
        }
    }

    pub fn context(&self) -> &ViewContext<H, S> {
        &self.ctx
    }

    pub fn unmount(&self) {
        self.ctx.unmount();
    }

    pub async fn load(&self) {
        let guard = self.ctx.guard();
        self.ctx.load_into(&self.state, guard.call(&ListPosts)).await;
    }

    pub fn set_draft(&self, text: &str) {
        self.draft.set(text.to_string());
    }

    /// 发布草稿；空白草稿不发请求
    pub async fn add_post(&self) {
        let content = self.draft.get();
        if content.trim().is_empty() {
            return;
        }

        self.draft_error.set(None);
        let endpoint = CreatePost { content };
        let write = self.ctx.guard().call(&endpoint);
        if let Some(mut post) = self
            .ctx
            .mutate(write, "Failed to add post", Some(&self.draft_error))
            .await
        {
            post.comments.clear();
            self.with_posts(|posts| posts.insert(0, post));
            self.draft.set(String::new());
        }
    }

    pub async fn edit_post(&self, id: &str, content: &str) {
        if content.trim().is_empty() {
            return;
        }

        self.edit_error.set(None);
        let endpoint = EditPost {
            id: id.to_string(),
            content: content.to_string(),
        };
        let write = self.ctx.guard().call(&endpoint);
        if let Some(post) = self
            .ctx
            .mutate(write, "Failed to edit post", Some(&self.edit_error))
            .await
        {
            self.with_posts(|posts| {
                replace_by_id(posts, post);
            });
        }
    }

    pub fn request_delete(&self, id: &str) {
        self.pending_delete.request(id.to_string());
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.cancel();
    }

    pub async fn confirm_delete(&self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        self.delete_error.set(None);
        let endpoint = DeletePost { id: id.clone() };
        let write = self.ctx.guard().call(&endpoint);
        if self
            .ctx
            .mutate(write, "Failed to delete post", Some(&self.delete_error))
            .await
            .is_some()
        {
            self.with_posts(|posts| {
                remove_by_id(posts, &id);
            });
        }
    }

    /// 乐观点赞：立即切换当前用户的点赞，再以服务端返回的动态为准
    pub async fn toggle_like(&self, id: &str) {
        let Some(me) = self.ctx.session().get_user_id() else {
            return;
        };

        // 撤销记录：`Some(true)` 表示本次加入了点赞
        let tentative = |state: &mut LoadState<Vec<Post>>| {
            let post = state.ready_mut().and_then(|posts| find_by_id_mut(posts, id))?;
            if post.is_liked_by(&me) {
                post.likes.retain(|liker| liker != &me);
                Some(false)
            } else {
                post.likes.push(me.clone());
                Some(true)
            }
        };
        let reconcile = |state: &mut LoadState<Vec<Post>>, server: Post| {
            if let Some(posts) = state.ready_mut() {
                replace_by_id(posts, server);
            }
        };
        let revert = |state: &mut LoadState<Vec<Post>>, added: Option<bool>| {
            let Some(added) = added else {
                return;
            };
            let Some(post) = state.ready_mut().and_then(|posts| find_by_id_mut(posts, id)) else {
                return;
            };
            if added {
                post.likes.retain(|liker| liker != &me);
            } else if !post.is_liked_by(&me) {
                post.likes.push(me.clone());
            }
        };

        self.like_error.set(None);
        let endpoint = ToggleLike { id: id.to_string() };
        let write = self.ctx.guard().call(&endpoint);
        if let Err(e) = apply_optimistic(&self.state, tentative, write, reconcile, revert).await {
            self.ctx.surface(&e, "Failed to update like", Some(&self.like_error));
        }
    }

    pub fn is_liked(&self, post: &Post) -> bool {
        self.ctx
            .session()
            .get_user_id()
            .is_some_and(|me| post.is_liked_by(&me))
    }

    pub fn set_comment_draft(&self, id: &str, text: &str) {
        self.comment_drafts.update(|drafts| {
            drafts.insert(id.to_string(), text.to_string());
        });
    }

    pub fn comment_draft(&self, id: &str) -> String {
        self.comment_drafts
            .with(|drafts| drafts.get(id).cloned().unwrap_or_default())
    }

    pub async fn add_comment(&self, id: &str) {
        let text = self.comment_draft(id).trim().to_string();
        if text.is_empty() {
            return;
        }

        self.comment_error.set(None);
        let endpoint = AddComment {
            id: id.to_string(),
            text,
        };
        let write = self.ctx.guard().call(&endpoint);
        if let Some(post) = self
            .ctx
            .mutate(write, "Failed to add comment", Some(&self.comment_error))
            .await
        {
            self.with_posts(|posts| {
                replace_by_id(posts, post);
            });
            self.comment_drafts.update(|drafts| {
                drafts.remove(id);
            });
        }
    }

    fn with_posts(&self, f: impl FnOnce(&mut Vec<Post>)) {
        self.state.update(|state| {
            if let Some(posts) = state.ready_mut() {
                f(posts);
            }
        });
    }
}
