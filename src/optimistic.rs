use crate::error::ApiResult;
use crate::observe::StateCell;
use std::future::Future;

/// 乐观更新
///
/// 先应用 `tentative` 并保留它返回的撤销记录，再等待写请求完成：
/// 成功时用服务端返回值执行 `reconcile`，失败时只用 `revert` 撤销这一次改动。
/// 等待期间单元中其他位置的改动不受影响。
pub async fn apply_optimistic<T, U, R, F>(
    cell: &StateCell<T>,
    tentative: impl FnOnce(&mut T) -> U,
    write: F,
    reconcile: impl FnOnce(&mut T, R),
    revert: impl FnOnce(&mut T, U),
) -> ApiResult<()>
where
    T: Clone + 'static,
    F: Future<Output = ApiResult<R>>,
{
    let undo = cell.update(tentative);

    match write.await {
        Ok(confirmed) => {
            cell.update(|value| reconcile(value, confirmed));
            Ok(())
        }
        Err(e) => {
            cell.update(|value| revert(value, undo));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[tokio::test]
    async fn tentative_value_is_visible_before_write_completes() {
        let cell = StateCell::new(false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            cell.subscribe(move |v| seen.borrow_mut().push(*v))
        };

        let observed = cell.clone();
        let write = async move {
            assert!(observed.get());
            Ok(false)
        };
        apply_optimistic(
            &cell,
            |v| std::mem::replace(v, true),
            write,
            |v, server| *v = server,
            |v, before| *v = before,
        )
        .await
        .unwrap();

        assert!(!cell.get());
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[tokio::test]
    async fn failure_undoes_only_the_tentative_change() {
        let cell = StateCell::new(vec![1, 2]);

        let other = cell.clone();
        let write = async move {
            other.update(|v| v.insert(0, 0));
            Err::<(), _>(ApiError::server("boom"))
        };
        let err = apply_optimistic(
            &cell,
            |v| v.push(3),
            write,
            |_, _| {},
            |v, ()| v.retain(|n| *n != 3),
        )
        .await
        .unwrap_err();

        assert_eq!(err.message(), "boom");
        assert_eq!(cell.get(), vec![0, 1, 2]);
    }
}
