//! 挂载时的并发请求合并
//!
//! - `join_required`：全部成功才返回，第一个错误中止其余请求；
//! - `join_tolerant`：逐个返回结果，只有认证错误会中止其余请求。

use crate::error::ApiResult;
use futures::future::try_join_all;
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;

pub async fn join_required<T, F>(calls: Vec<F>) -> ApiResult<Vec<T>>
where
    F: Future<Output = ApiResult<T>>,
{
    try_join_all(calls).await
}

/// 结果按调用顺序返回
pub async fn join_tolerant<T, F>(calls: Vec<F>) -> ApiResult<Vec<ApiResult<T>>>
where
    F: Future<Output = ApiResult<T>>,
{
    let mut slots: Vec<Option<ApiResult<T>>> = calls.iter().map(|_| None).collect();
    let mut pending: FuturesUnordered<_> = calls
        .into_iter()
        .enumerate()
        .map(|(index, call)| async move { (index, call.await) })
        .collect();

    while let Some((index, result)) = pending.next().await {
        if let Err(e) = &result {
            if e.is_auth() {
                return Err(e.clone());
            }
        }
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(result);
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use futures::FutureExt;
    use futures::future::LocalBoxFuture;
    use std::cell::Cell;
    use std::rc::Rc;

    fn ready(result: ApiResult<u32>) -> LocalBoxFuture<'static, ApiResult<u32>> {
        async move { result }.boxed_local()
    }

    #[tokio::test]
    async fn tolerant_join_keeps_partial_results_in_order() {
        let results = join_tolerant(vec![
            ready(Ok(1)),
            ready(Err(ApiError::server("down"))),
            ready(Ok(3)),
        ])
        .await
        .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Ok(1));
        assert!(results[1].is_err());
        assert_eq!(results[2], Ok(3));
    }

    #[tokio::test]
    async fn tolerant_join_aborts_on_auth_error() {
        let finished = Rc::new(Cell::new(false));
        let slow = {
            let finished = finished.clone();
            async move {
                tokio::task::yield_now().await;
                finished.set(true);
                Ok(2)
            }
            .boxed_local()
        };

        let err = join_tolerant(vec![ready(Err(ApiError::auth("expired"))), slow])
            .await
            .unwrap_err();

        assert!(err.is_auth());
        assert!(!finished.get());
    }

    #[tokio::test]
    async fn required_join_fails_on_first_error() {
        let err = join_required(vec![ready(Ok(1)), ready(Err(ApiError::client("bad")))])
            .await
            .unwrap_err();
        assert_eq!(err.message(), "bad");

        let all = join_required(vec![ready(Ok(1)), ready(Ok(2))]).await.unwrap();
        assert_eq!(all, vec![1, 2]);
    }
}
