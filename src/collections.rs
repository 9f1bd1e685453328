//! 列表工具：所有列表修改都按 `_id` 匹配，而不是按位置。

use maxi_shared::{Comment, Post, User};

pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Post {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Comment {
    fn id(&self) -> &str {
        &self.id
    }
}

/// 按 id 去重：每个 id 保留最后一次出现的值，位置取第一次出现的位置
pub fn dedup_by_id<T: Identified>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        match out.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => out.push(item),
        }
    }
    out
}

/// 返回是否有元素被移除
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// 用新值替换同 id 的元素，没有匹配时不做任何事
pub fn replace_by_id<T: Identified>(items: &mut [T], item: T) -> bool {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => {
            *existing = item;
            true
        }
        None => false,
    }
}

pub fn find_by_id_mut<'a, T: Identified>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.id() == id)
}
