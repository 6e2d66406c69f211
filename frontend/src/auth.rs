//! 认证模块
//!
//! 会话对象由核心库维护，这里只把它放进 Context，
//! 并把状态变化同步到一个响应式信号上，供路由器和页面订阅。

use std::rc::Rc;

use grocer::{ClientResult, SessionState};
use grocer_shared::Identity;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{AppSession, create_session};

/// 认证上下文
///
/// 会话本身不是 `Send`，因此放在 local 存储里。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: StoredValue<Rc<AppSession>, LocalStorage>,
    state: RwSignal<SessionState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let session = create_session();
        // 有持久化令牌时先按"恢复中"处理，避免 bootstrap 开始前被守卫重定向到登录页
        let initial = if session.api().store().get().is_some() {
            SessionState::Bootstrapping
        } else {
            session.state()
        };
        let state = RwSignal::new(initial);

        session.subscribe(move |next| state.set(next.clone()));

        Self {
            session: StoredValue::new_local(session),
            state,
        }
    }

    pub fn session(&self) -> Rc<AppSession> {
        self.session.get_value()
    }

    /// 会话状态信号（用于路由服务注入）
    pub fn state_signal(&self) -> Signal<SessionState> {
        self.state.into()
    }

    pub fn user(&self) -> Signal<Option<Identity>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user().cloned()))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 应用启动时恢复会话
pub fn init_auth(ctx: &AuthContext) {
    let session = ctx.session();
    let state = ctx.state;
    spawn_local(async move {
        session.bootstrap().await;
        // 状态未变化时不会触发回调，这里补一次同步
        state.set(session.state());
        log!("[Auth] bootstrap finished, authenticated: {}", session.is_authenticated());
    });
}

/// 登录
///
/// 成功后的跳转由路由服务监听认证状态自动完成。
pub async fn login(ctx: &AuthContext, username: String, password: String) -> ClientResult<Identity> {
    let session = ctx.session();
    session.login(&username, &password).await
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.session().logout();
}
