//! 会话装配
//!
//! 浏览器里没有进程环境变量，配置在编译期通过 `option_env!` 注入，
//! 例如 `GROCER_API_URL=https://shop.example/api trunk build`。

use std::rc::Rc;

use grocer::config::{ENV_API_TIMEOUT_MS, ENV_API_URL, ENV_DEMO_MODE, ENV_TOKEN_KEY};
use grocer::{ClientConfig, ClientError, EnvAdapter, ErrorKind, Session};

use crate::web::{BrowserTokenStore, FetchHttpClient};

pub type AppSession = Session<FetchHttpClient>;

/// 编译期环境变量
struct BuildEnv;

impl EnvAdapter for BuildEnv {
    fn var(&self, name: &str) -> Option<String> {
        let value = match name {
            ENV_API_URL => option_env!("GROCER_API_URL"),
            ENV_API_TIMEOUT_MS => option_env!("GROCER_API_TIMEOUT_MS"),
            ENV_DEMO_MODE => option_env!("GROCER_DEMO_MODE"),
            ENV_TOKEN_KEY => option_env!("GROCER_TOKEN_KEY"),
            _ => None,
        };
        value.map(str::to_string)
    }
}

pub fn client_config() -> ClientConfig {
    ClientConfig::from_env(&BuildEnv)
}

pub fn create_session() -> Rc<AppSession> {
    let config = client_config();
    let store = Rc::new(BrowserTokenStore::new(config.token_key.clone()));
    Rc::new(Session::new(&config, store, FetchHttpClient))
}

/// 面向用户的错误描述
pub fn describe_error(e: &ClientError) -> String {
    match e.kind {
        ErrorKind::Authentication => "Invalid username or password".to_string(),
        ErrorKind::Network => format!("Network error: {}", e.message()),
        ErrorKind::Busy => "A sign-in is already in progress".to_string(),
        _ => e.message().to_string(),
    }
}

/// 页面上展示的错误；只有网络错误提供重试
#[derive(Debug, Clone, PartialEq)]
pub struct PageError {
    pub message: String,
    pub retryable: bool,
}

impl PageError {
    /// 本地校验之类的错误，重试没有意义
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }
}

impl From<&ClientError> for PageError {
    fn from(e: &ClientError) -> Self {
        Self {
            message: describe_error(e),
            retryable: e.kind == ErrorKind::Network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_are_retryable() {
        let offline = PageError::from(&ClientError::network("connection refused"));
        assert!(offline.retryable);
        assert_eq!(offline.message, "Network error: connection refused");

        let denied = PageError::from(&ClientError::http(403, r#"{"error":"Forbidden"}"#));
        assert!(!denied.retryable);
        assert_eq!(denied.message, "Forbidden");

        assert!(!PageError::from(&ClientError::authentication("bad credentials")).retryable);
        assert!(!PageError::from(&ClientError::decode("unexpected body")).retryable);
        assert!(!PageError::local("Choose a product").retryable);
    }
}
