use crate::api::{client_config, describe_error};
use crate::auth::{login, use_auth};
use grocer::ErrorKind;
use grocer::config::{DEMO_PASSWORD, DEMO_USERNAME};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let demo_enabled = client_config().demo_mode.is_enabled();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let submit = move |user: String, pass: String| {
        if user.trim().is_empty() || pass.is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match login(&auth, user, pass).await {
                // 跳转由路由服务完成
                Ok(_) => {}
                Err(e) if e.kind == ErrorKind::Superseded => {}
                Err(e) => set_error_msg.set(Some(describe_error(&e))),
            }
            set_is_submitting.set(false);
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        submit(username.get(), password.get());
    };

    let on_demo = move |_| {
        set_username.set(DEMO_USERNAME.to_string());
        set_password.set(DEMO_PASSWORD.to_string());
        submit(DEMO_USERNAME.to_string(), DEMO_PASSWORD.to_string());
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Grocer"</h1>
                    <p class="text-base-content/70">"Sign in to manage products, sales and forecasts"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username or email"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6 gap-2">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                            <Show when=move || demo_enabled>
                                <button
                                    type="button"
                                    class="btn btn-ghost btn-sm"
                                    disabled=move || is_submitting.get()
                                    on:click=on_demo
                                >
                                    "Use demo account"
                                </button>
                            </Show>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
