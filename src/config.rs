//! 客户端配置
//!
//! API 基地址是唯一的配置项；未配置时使用本地开发后端。

/// 默认 API 基地址
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// 覆盖基地址的环境变量名
pub const API_BASE_VAR: &str = "MAXI_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// 从可选值解析配置，空值回落到默认地址
    pub fn resolve(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::default(),
        }
    }

    /// 读取 `MAXI_API_BASE`：先取运行时环境变量，再取构建时的值
    ///
    /// 浏览器中没有运行时环境变量，只有构建时的值生效。
    pub fn from_env() -> Self {
        let runtime = std::env::var(API_BASE_VAR).ok();
        Self::layered(runtime.as_deref(), option_env!("MAXI_API_BASE"))
    }

    fn layered(runtime: Option<&str>, build: Option<&str>) -> Self {
        let runtime = runtime.filter(|v| !v.trim().is_empty());
        Self::resolve(runtime.or(build))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拼接完整 URL，基地址与路径之间恰好一个 `/`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_with_single_slash() {
        let config = ClientConfig::new("https://api.example.com/api/");
        assert_eq!(config.url("/posts"), "https://api.example.com/api/posts");
        assert_eq!(config.url("posts/p1"), "https://api.example.com/api/posts/p1");
    }

    #[test]
    fn resolve_falls_back_to_default() {
        assert_eq!(ClientConfig::resolve(None).base_url(), DEFAULT_API_BASE);
        assert_eq!(ClientConfig::resolve(Some("  ")).base_url(), DEFAULT_API_BASE);
        assert_eq!(
            ClientConfig::resolve(Some("http://10.0.0.2:8080/api")).base_url(),
            "http://10.0.0.2:8080/api"
        );
    }

    #[test]
    fn runtime_value_overrides_build_value() {
        let both = ClientConfig::layered(Some("http://runtime/api"), Some("http://build/api"));
        assert_eq!(both.base_url(), "http://runtime/api");

        let blank = ClientConfig::layered(Some(" "), Some("http://build/api/"));
        assert_eq!(blank.base_url(), "http://build/api");

        assert_eq!(ClientConfig::layered(None, None).base_url(), DEFAULT_API_BASE);
    }
}
