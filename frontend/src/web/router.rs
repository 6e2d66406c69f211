//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 放行与重定向的判断交给核心库的 `guard`，这里只负责执行：
//! 监听 -> 守卫 -> 重定向或加载。

use grocer::{AppRoute, GuardDecision, SessionState, guard};
use leptos::logging::log;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过注入的会话状态信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session_state: Signal<SessionState>,
}

impl RouterService {
    fn new(session_state: Signal<SessionState>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session_state,
        }
    }

    /// 当前路由经过守卫后的决策
    pub fn decision(&self) -> Signal<GuardDecision> {
        let current_route = self.current_route;
        let session_state = self.session_state;
        Signal::derive(move || session_state.with(|state| guard(current_route.get(), state)))
    }

    /// 导航到指定路径
    pub fn navigate(&self, path: &str) {
        let target = AppRoute::from_path(path);
        push_history_state(target.to_path());
        self.set_route.set(target);
    }

    /// 执行守卫给出的重定向
    ///
    /// 状态变化（登录、登出、恢复完成）和路由变化都会触发。
    fn setup_guard_redirect(&self) {
        let decision = self.decision();
        let set_route = self.set_route;

        Effect::new(move |_| {
            if let GuardDecision::Redirect(target) = decision.get() {
                log!("[Router] Redirecting to {}", target);
                replace_history_state(target.to_path());
                set_route.set(target);
            }
        });
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

fn provide_router(session_state: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session_state);

    router.init_popstate_listener();
    router.setup_guard_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 会话状态信号
    session_state: Signal<SessionState>,
    children: Children,
) -> impl IntoView {
    provide_router(session_state);

    children()
}

/// 路由出口组件
///
/// 只渲染守卫放行的路由；恢复会话或等待重定向期间显示加载状态。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let decision = use_router().decision();

    move || match decision.get() {
        GuardDecision::Allow(route) => matcher(route),
        GuardDecision::Pending | GuardDecision::Redirect(_) => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(route.to_path());
    };

    view! {
        <a href=route.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
