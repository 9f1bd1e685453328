//! 带认证的请求客户端
//!
//! 负责拼接 URL、附加 `Authorization` 头、解析 JSON 响应，并把失败归一为 `ApiError`。
//! 客户端只读取会话，从不修改会话，也不负责跳转。

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, INVALID_RESPONSE};
use crate::request::{HttpClient, HttpMethod, HttpRequest};
use crate::session::{SessionStorage, SessionStore};
use maxi_shared::protocol::Endpoint;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::rc::Rc;
use tracing::{debug, warn};

struct Inner<H, S> {
    http: H,
    session: SessionStore<S>,
    config: ClientConfig,
}

pub struct ApiClient<H, S> {
    inner: Rc<Inner<H, S>>,
}

impl<H, S> Clone for ApiClient<H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: HttpClient, S: SessionStorage> ApiClient<H, S> {
    pub fn new(http: H, session: SessionStore<S>, config: ClientConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                http,
                session,
                config,
            }),
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.inner.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// 以当前会话的令牌发送请求，返回解析后的 JSON
    pub async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let token = self.inner.session.get_token();
        self.dispatch(path, method, body, token.as_deref()).await
    }

    /// 类型化调用
    pub async fn call<E: Endpoint>(&self, endpoint: &E) -> ApiResult<E::Response> {
        let value = self
            .request(&endpoint.path(), E::METHOD, endpoint.body())
            .await?;
        decode(value)
    }

    /// 使用指定令牌调用，用于会话建立之前（例如登录后查询 `/users/me`）
    pub async fn call_as<E: Endpoint>(&self, endpoint: &E, token: &str) -> ApiResult<E::Response> {
        let value = self
            .dispatch(&endpoint.path(), E::METHOD, endpoint.body(), Some(token))
            .await?;
        decode(value)
    }

    async fn dispatch(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<Value>,
        token: Option<&str>,
    ) -> ApiResult<Value> {
        let url = self.inner.config.url(path);
        let mut req =
            HttpRequest::new(&url, method).with_header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.with_header("Authorization", &format!("Bearer {token}"));
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        debug!(%method, path, "dispatching request");
        let resp = self.inner.http.send(req).await?;

        if !resp.is_success() {
            let err = ApiError::from_response(resp.status, &resp.body);
            debug!(
                %method,
                path,
                status = resp.status,
                category = err.category().as_str(),
                "request rejected"
            );
            return Err(err);
        }

        parse_body(&resp.body)
    }
}

fn parse_body(body: &str) -> ApiResult<Value> {
    if body.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(body).map_err(|_| ApiError::server(INVALID_RESPONSE))
}

fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "response did not match the expected shape");
        ApiError::server(INVALID_RESPONSE)
    })
}

#[cfg(test)]
mod tests;
