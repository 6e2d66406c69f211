//! LocalStorage 封装模块
//!
//! 直接使用 `web_sys::Storage`：令牌按原始字符串保存，
//! 存储不可用（如隐私模式）时所有操作静默失败而不是 panic。

use grocer::{Token, TokenStore};

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct BrowserStorage;

impl BrowserStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，失败时返回 `false`
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 以 localStorage 中的单个键保存令牌
pub struct BrowserTokenStore {
    key: String,
}

impl BrowserTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<Token> {
        BrowserStorage::get(&self.key)
            .filter(|raw| !raw.is_empty())
            .map(Token::new)
    }

    fn set(&self, token: &Token) -> bool {
        BrowserStorage::set(&self.key, token.as_str())
    }

    fn clear(&self) {
        BrowserStorage::delete(&self.key);
    }
}
