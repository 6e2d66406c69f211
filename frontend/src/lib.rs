//! Grocer 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `grocer`: 会话、令牌、API 客户端和路由守卫（与浏览器无关）
//! - `web`: 浏览器适配（fetch、localStorage、History 路由）
//! - `auth`: 会话上下文
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod admin;
    pub mod dashboard;
    pub mod forecast;
    pub mod layout;
    pub mod login;
    pub mod products;
    pub mod sales;
}
mod web;

use crate::auth::{AuthContext, init_auth};
use crate::components::admin::AdminPage;
use crate::components::dashboard::DashboardPage;
use crate::components::forecast::ForecastPage;
use crate::components::login::LoginPage;
use crate::components::products::ProductsPage;
use crate::components::sales::SalesPage;

use grocer::AppRoute;
use leptos::prelude::*;

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 只会收到守卫放行的路由；`NotFound` 由守卫重定向到控制面板。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard | AppRoute::NotFound => view! { <DashboardPage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::Sales => view! { <SalesPage /> }.into_any(),
        AppRoute::Forecast => view! { <ForecastPage /> }.into_any(),
        AppRoute::Admin => view! { <AdminPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 用持久化的令牌恢复会话
    init_auth(&auth_ctx);

    // 3. 会话状态信号注入路由服务
    let session_state = auth_ctx.state_signal();

    view! {
        <Router session_state=session_state>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
