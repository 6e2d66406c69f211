//! 浏览器适配层
//!
//! 把核心库的传输与存储接口落到浏览器 API 上，
//! 并提供基于 History API 的路由器。

mod http;
pub mod router;
mod storage;

pub use http::FetchHttpClient;
pub use storage::BrowserTokenStore;
