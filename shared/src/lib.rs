use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod protocol;
pub mod serde_helper;

pub use protocol::{ApiRequest, HttpMethod};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const BEARER_PREFIX: &str = "Bearer ";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// 认证模型 (Auth Models)
// =========================================================

fn default_role() -> String {
    "user".to_string()
}

/// 当前登录用户的身份信息
///
/// 后端可能返回 `name` 或 `username`，`id` 可能是数字或字符串，
/// 这里统一规整为字符串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    #[serde(alias = "username")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// 登录请求
///
/// 标识符总是作为 `email` 发送；不含 `@` 时同时作为 `username` 发送，
/// 两种后端都能识别。
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
}

impl LoginRequest {
    pub fn new(identifier: &str, password: &str) -> Self {
        let identifier = identifier.trim();
        let username = (!identifier.contains('@')).then(|| identifier.to_string());
        Self {
            email: identifier.to_string(),
            username,
            password: password.to_string(),
        }
    }
}

// 密码不进入日志
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// 登录响应
///
/// 令牌字段名因后端而异 (`token` / `access_token`)，`user` 可能缺省。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

impl LoginResponse {
    /// 取出用于 Bearer 认证的令牌，`token` 优先
    pub fn bearer(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or(self.access_token.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// 后端错误响应体 `{ "error": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =========================================================
// 业务模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// 商品的部分更新，未设置的字段不会发送
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    pub quantity: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub product_id: String,
    pub quantity: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSeries {
    pub items: Vec<SeriesPoint>,
    pub days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub product_id: String,
    pub horizon_days: u32,
    pub forecast: Vec<i64>,
    #[serde(default)]
    pub lower: Vec<i64>,
    #[serde(default)]
    pub upper: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_accepts_numeric_id_and_username_alias() {
        let identity: Identity =
            serde_json::from_value(json!({"id": 7, "username": "bob", "email": "b@x.io"})).unwrap();
        assert_eq!(identity.id, "7");
        assert_eq!(identity.name, "bob");
        assert_eq!(identity.role, "user");
        assert!(!identity.is_admin());
    }

    #[test]
    fn test_identity_with_name_and_role() {
        let identity: Identity =
            serde_json::from_value(json!({"id": "u-1", "name": "Alice", "role": "admin"})).unwrap();
        assert_eq!(identity.id, "u-1");
        assert_eq!(identity.name, "Alice");
        assert_eq!(identity.email, None);
        assert!(identity.is_admin());
    }

    #[test]
    fn test_login_request_username_only_without_at_sign() {
        let req = LoginRequest::new(" bob ", "pw");
        assert_eq!(req.email, "bob");
        assert_eq!(req.username.as_deref(), Some("bob"));

        let req = LoginRequest::new("bob@example.com", "pw");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({"email": "bob@example.com", "password": "pw"}));
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let req = LoginRequest::new("bob", "hunter2");
        let debug = format!("{:?}", req);
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_login_response_bearer_prefers_token() {
        let resp: LoginResponse =
            serde_json::from_value(json!({"access_token": "a", "refresh_token": "r"})).unwrap();
        assert_eq!(resp.bearer(), Some("a"));

        let resp: LoginResponse =
            serde_json::from_value(json!({"token": "t", "access_token": "a"})).unwrap();
        assert_eq!(resp.bearer(), Some("t"));

        let resp: LoginResponse = serde_json::from_value(json!({"token": ""})).unwrap();
        assert_eq!(resp.bearer(), None);
    }

    #[test]
    fn test_sale_camel_case_fields() {
        let sale: Sale = serde_json::from_value(json!({
            "id": "3",
            "productId": 1,
            "productName": "Milk",
            "quantity": 2,
            "date": "2024-05-01"
        }))
        .unwrap();
        assert_eq!(sale.product_id, "1");
        assert_eq!(sale.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_product_patch_skips_unset_fields() {
        let patch = ProductPatch {
            stock: Some(4),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"stock": 4}));
    }
}
