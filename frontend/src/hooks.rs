//! 控制器与 Leptos 响应式系统之间的桥接

use leptos::prelude::*;
use leptos::task::spawn_local;
use maxi_client::{HttpClient, Notice, SessionStorage, StateCell, ViewContext};
use std::future::Future;

/// 把 `StateCell` 映射为只读信号，订阅随当前 Owner 一起释放
pub fn use_cell<T>(cell: &StateCell<T>) -> ReadSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    let (read, write) = signal(cell.get());
    let subscription = cell.subscribe(move |value| {
        let _ = write.try_set(value.clone());
    });
    let _ = StoredValue::new_local(subscription);
    read
}

/// 控制器通知：信号跟随通知单元，清除经由控制器完成
#[derive(Clone, Copy)]
pub struct NoticeHandle {
    pub notice: ReadSignal<Option<Notice>>,
    dismiss: StoredValue<Box<dyn Fn()>, LocalStorage>,
}

impl NoticeHandle {
    pub fn dismiss(&self) {
        self.dismiss.try_with_value(|dismiss| dismiss());
    }
}

pub fn use_notice<H, S>(ctx: &ViewContext<H, S>) -> NoticeHandle
where
    H: HttpClient + 'static,
    S: SessionStorage + 'static,
{
    let notice = use_cell(ctx.notice());
    let ctx = ctx.clone();
    let dismiss: Box<dyn Fn()> = Box::new(move || ctx.dismiss_notice());
    NoticeHandle {
        notice,
        dismiss: StoredValue::new_local(dismiss),
    }
}

/// 挂载控制器：组件销毁时调用 `unmount`，使未完成请求的结果失效
pub fn mount<C: Clone + 'static>(controller: C, unmount: fn(&C)) -> StoredValue<C, LocalStorage> {
    let stored = StoredValue::new_local(controller);
    on_cleanup(move || {
        stored.try_with_value(unmount);
    });
    stored
}

/// 在本地任务中驱动控制器的异步操作
pub fn run<C, F>(controller: StoredValue<C, LocalStorage>, op: impl FnOnce(C) -> F)
where
    C: Clone + 'static,
    F: Future<Output = ()> + 'static,
{
    if let Some(controller) = controller.try_get_value() {
        spawn_local(op(controller));
    }
}
