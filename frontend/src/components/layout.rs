use crate::api::PageError;
use crate::auth::{logout, use_auth};
use crate::web::router::{Link, use_router};
use grocer::AppRoute;
use leptos::prelude::*;

/// 页面外框：顶部导航栏 + 侧边菜单
#[component]
pub fn Shell(title: &'static str, children: Children) -> impl IntoView {
    let auth = use_auth();
    let user = auth.user();
    let router = use_router();

    // 跳转由路由服务监听认证状态自动完成
    let on_logout = move |_| logout(&auth);

    let current = router.decision().get_untracked().route();

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow-xl">
                <div class="flex-1 gap-2">
                    <Link route=AppRoute::Dashboard class="btn btn-ghost text-xl">"Grocer"</Link>
                </div>
                <div class="flex-none gap-2">
                    <span class="badge badge-neutral hidden md:inline-flex">
                        {move || user.get().map(|u| format!("{} ({})", u.name, u.role)).unwrap_or_default()}
                    </span>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                        "Sign out"
                    </button>
                </div>
            </div>

            <div class="mx-auto grid max-w-7xl grid-cols-1 gap-6 p-4 md:grid-cols-[16rem_1fr]">
                <ul class="menu bg-base-100 rounded-box shadow h-fit">
                    {AppRoute::navigation()
                        .into_iter()
                        .map(|route| {
                            view! {
                                <li>
                                    <Link
                                        route=route
                                        class=if current == Some(route) { "active" } else { "" }
                                    >
                                        {route.title()}
                                    </Link>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <main class="space-y-6">
                    <h1 class="text-lg font-semibold">{title}</h1>
                    {children()}
                </main>
            </div>
        </div>
    }
}

/// 错误提示条；可重试的错误附带 "Retry" 按钮
#[component]
pub fn ErrorAlert(
    #[prop(into)] error: Signal<Option<PageError>>,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    let message = move || error.with(|e| e.as_ref().map(|e| e.message.clone()).unwrap_or_default());
    let retryable = move || error.with(|e| e.as_ref().is_some_and(|e| e.retryable));

    view! {
        <Show when=move || error.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm">
                <span>{message}</span>
                <Show when=retryable>
                    <button type="button" class="btn btn-sm btn-ghost" on:click=move |_| on_retry.run(())>
                        "Retry"
                    </button>
                </Show>
            </div>
        </Show>
    }
}
