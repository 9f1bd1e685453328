// =========================================================
// 测试工具: MockHttpClient
// =========================================================

use super::*;
use crate::testing::TEST_BASE;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

enum Reply {
    Ready(Result<HttpResponse, TransportError>),
    /// 由测试手动完成的响应，用于制造乱序/过期结果
    Deferred(oneshot::Receiver<HttpResponse>),
}

#[derive(Default)]
struct MockState {
    // (Method, Path) -> 待返回的响应队列
    routes: HashMap<(HttpMethod, String), VecDeque<Reply>>,
    requests: Vec<HttpRequest>,
}

/// 按 (方法, 路径) 匹配的 HTTP 桩
///
/// 挂起响应按注册顺序依次返回；`Ready` 响应会被重复使用，
/// 再次为同一路由注册 `Ready` 响应会覆盖之前的。克隆后共享同一份状态。
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Rc<RefCell<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: serde_json::Value) {
        self.respond_text(method, path, status, &body.to_string());
    }

    pub fn respond_text(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Reply::Ready(Ok(HttpResponse {
                status,
                body: body.to_string(),
            })),
        );
    }

    /// 模拟网络故障
    pub fn fail(&self, method: HttpMethod, path: &str) {
        self.push(
            method,
            path,
            Reply::Ready(Err(TransportError::new("connection reset"))),
        );
    }

    /// 排队一个挂起的响应，通过返回的 Sender 完成
    pub fn defer(&self, method: HttpMethod, path: &str) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Reply::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        let url = format!("{TEST_BASE}{path}");
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|req| req.method == method && req.url == url)
            .count()
    }

    fn push(&self, method: HttpMethod, path: &str, reply: Reply) {
        let mut state = self.state.borrow_mut();
        let queue = state.routes.entry((method, path.to_string())).or_default();
        if matches!(reply, Reply::Ready(_)) {
            queue.retain(|queued| matches!(queued, Reply::Deferred(_)));
        }
        queue.push_back(reply);
    }

    fn next_reply(&self, key: &(HttpMethod, String)) -> Option<Reply> {
        let mut state = self.state.borrow_mut();
        let queue = state.routes.get_mut(key)?;
        if queue.len() == 1 {
            if let Some(Reply::Ready(result)) = queue.front() {
                return Some(Reply::Ready(result.clone()));
            }
        }
        queue.pop_front()
    }
}

/// 200 响应，用于完成 `defer` 的挂起请求
pub fn ok(body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: body.to_string(),
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = req
            .url
            .strip_prefix(TEST_BASE)
            .unwrap_or(&req.url)
            .to_string();
        let key = (req.method, path);
        self.state.borrow_mut().requests.push(req);

        match self.next_reply(&key) {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Deferred(rx)) => rx
                .await
                .map_err(|_| TransportError::new("deferred response dropped")),
            None => Ok(HttpResponse {
                status: 404,
                body: r#"{"message":"no mock route"}"#.to_string(),
            }),
        }
    }
}
