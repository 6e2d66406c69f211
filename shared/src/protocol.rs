use crate::{
    Forecast, Identity, ListResponse, LoginRequest, LoginResponse, MessageResponse, NewProduct,
    NewSale, Product, ProductPatch, Sale, SalesSeries,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Paths are relative to the API base URL. For methods with a body the
/// request value itself is serialized as the JSON body; fields that belong
/// in the path or query string are marked `#[serde(skip)]`.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path below the API base.
    fn path(&self) -> Cow<'static, str>;
    /// Query string parameters.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Auth
// =========================================================

pub const PATH_LOGIN: &str = "/auth/login";
pub const PATH_ME: &str = "/auth/me";

/// Resolve the identity behind the current bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = Identity;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(PATH_ME)
    }
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(PATH_LOGIN)
    }
}

// =========================================================
// Products
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListProductsRequest;

impl ApiRequest for ListProductsRequest {
    type Response = ListResponse<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/products")
    }
}

impl ApiRequest for NewProduct {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/products")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub patch: ProductPatch,
}

impl ApiRequest for UpdateProductRequest {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/products/{}", self.id))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProductRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteProductRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/products/{}", self.id))
    }
}

// =========================================================
// Sales
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListSalesRequest;

impl ApiRequest for ListSalesRequest {
    type Response = ListResponse<Sale>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/sales")
    }
}

impl ApiRequest for NewSale {
    type Response = Sale;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/sales")
    }
}

/// Daily sold quantities over the last `days` days
#[derive(Debug, Serialize, Deserialize)]
pub struct SalesSeriesRequest {
    #[serde(skip)]
    pub days: u32,
}

impl Default for SalesSeriesRequest {
    fn default() -> Self {
        Self { days: 14 }
    }
}

impl ApiRequest for SalesSeriesRequest {
    type Response = SalesSeries;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/sales/series")
    }
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("days", self.days.to_string())]
    }
}

// =========================================================
// Forecast
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ForecastRequest {
    #[serde(skip)]
    pub product_id: String,
    #[serde(skip)]
    pub horizon_days: u32,
}

impl ForecastRequest {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            horizon_days: 7,
        }
    }
}

impl ApiRequest for ForecastRequest {
    type Response = Forecast;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/forecast")
    }
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("product_id", self.product_id.clone()),
            ("horizon_days", self.horizon_days.to_string()),
        ]
    }
}

// =========================================================
// Admin
// =========================================================

pub const PATH_TRAIN_NOW: &str = "/admin/train-now";

/// 立即重新训练预测模型；后端可能返回 204 或 `{ "message": ... }`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TrainModelRequest {}

impl ApiRequest for TrainModelRequest {
    type Response = Option<MessageResponse>;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(PATH_TRAIN_NOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_product_path_and_body() {
        let req = UpdateProductRequest {
            id: "42".to_string(),
            patch: ProductPatch {
                price: Some(1.5),
                ..Default::default()
            },
        };
        assert_eq!(req.path(), "/products/42");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"price": 1.5})
        );
    }

    #[test]
    fn test_forecast_query_defaults_to_one_week() {
        let req = ForecastRequest::new("3");
        assert_eq!(
            req.query(),
            vec![("product_id", "3".to_string()), ("horizon_days", "7".to_string())]
        );
        assert!(!ForecastRequest::METHOD.has_body());
    }

    #[test]
    fn test_train_model_posts_empty_object() {
        let req = TrainModelRequest::default();
        assert_eq!(req.path(), "/admin/train-now");
        assert_eq!(TrainModelRequest::METHOD, HttpMethod::Post);
        assert_eq!(serde_json::to_value(&req).unwrap(), serde_json::json!({}));
    }
}
