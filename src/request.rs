//! HTTP 传输抽象
//!
//! 核心库只依赖 `HttpClient`：浏览器端用 fetch 实现，原生环境用 reqwest，
//! 测试中用脚本化的 `MockHttpClient`。

pub use maxi_shared::protocol::HttpMethod;

/// 请求没有得到任何响应（连接失败、响应体读取失败等）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// 待发送的请求
///
/// 头部按写入顺序保存，同名头部（不区分大小写）后写覆盖先写。
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// 以 JSON 作为请求体
    pub fn json(mut self, body: &serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输层
///
/// 浏览器的 fetch 相关类型不是 `Send`，因此 trait 使用 `?Send`。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 原生环境: reqwest
// =========================================================

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    inner: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            url,
            method,
            headers,
            body,
        } = req;

        let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
            .map_err(|e| TransportError::new(format!("invalid method: {e}")))?;
        let builder = headers
            .into_iter()
            .fold(self.inner.request(method, &url), |builder, (name, value)| {
                builder.header(name, value)
            });
        let builder = match body {
            Some(body) => builder.body(body),
            None => builder,
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| TransportError::new(format!("request to {url} failed: {e}")))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::new(format!("failed to read response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod mock;
