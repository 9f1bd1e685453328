//! 认证策略
//!
//! `AuthGuard` 包裹请求客户端，是唯一的响应拦截点：
//! 匿名状态下拒绝发出需要认证的请求；收到认证错误时清除会话。

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult, StatusCategory};
use crate::request::{HttpClient, HttpMethod};
use crate::session::{SessionStorage, SessionStore};
use maxi_shared::protocol::Endpoint;
use serde_json::Value;
use tracing::{debug, error, warn};

/// 匿名状态下调用受保护接口时的错误消息
pub const NOT_SIGNED_IN: &str = "Not signed in";

pub struct AuthGuard<H, S> {
    client: ApiClient<H, S>,
}

impl<H, S> Clone for AuthGuard<H, S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<H: HttpClient, S: SessionStorage> AuthGuard<H, S> {
    pub fn new(client: ApiClient<H, S>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<H, S> {
        &self.client
    }

    pub fn session(&self) -> &SessionStore<S> {
        self.client.session()
    }

    pub async fn call<E: Endpoint>(&self, endpoint: &E) -> ApiResult<E::Response> {
        if E::AUTHENTICATED && !self.session().is_authenticated() {
            debug!(path = %endpoint.path(), "refusing authenticated call without a session");
            return Err(ApiError::auth(NOT_SIGNED_IN));
        }
        self.client.call(endpoint).await.map_err(|e| self.intercept(e))
    }

    /// 非类型化请求，始终视为需要认证
    pub async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        if !self.session().is_authenticated() {
            return Err(ApiError::auth(NOT_SIGNED_IN));
        }
        self.client
            .request(path, method, body)
            .await
            .map_err(|e| self.intercept(e))
    }

    /// 失败响应的统一处理，每个失败调用只经过一次
    pub fn intercept(&self, err: ApiError) -> ApiError {
        match err.category() {
            StatusCategory::AuthError => {
                warn!(status = ?err.status(), "credential rejected, clearing session");
                if let Err(e) = self.session().clear() {
                    error!(error = %e, "failed to clear session");
                }
            }
            StatusCategory::ServerError | StatusCategory::NetworkError => {
                error!(category = err.category().as_str(), reason = err.message(), "request failed");
            }
            StatusCategory::ClientError => {
                debug!(reason = err.message(), "request rejected by server");
            }
        }
        err
    }
}

#[cfg(test)]
mod tests;
