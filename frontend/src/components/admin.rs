use crate::api::{client_config, describe_error};
use crate::auth::use_auth;
use crate::components::layout::Shell;
use grocer_shared::protocol::TrainModelRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user();
    let config = client_config();
    let is_admin = move || user.with(|u| u.as_ref().is_some_and(|u| u.is_admin()));

    let (training, set_training) = signal(false);
    let (train_result, set_train_result) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let on_train = move |_| {
        let session = auth.session();
        set_training.set(true);
        set_train_result.set(None);
        spawn_local(async move {
            match session.api().call(&TrainModelRequest::default()).await {
                Ok(resp) => {
                    let msg = resp.map(|r| r.message).unwrap_or_else(|| "Training started".to_string());
                    set_train_result.set(Some((msg, false)));
                }
                Err(e) => set_train_result.set(Some((describe_error(&e), true))),
            }
            set_training.set(false);
        });
    };

    view! {
        <Shell title="Admin">
            <Show
                when=is_admin
                fallback=|| view! {
                    <div role="alert" class="alert alert-warning text-sm">
                        <span>"Administrator role required."</span>
                    </div>
                }
            >
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title text-sm">"Account"</h3>
                        <dl class="grid grid-cols-[8rem_1fr] gap-1 text-sm">
                            <dt class="opacity-60">"Name"</dt>
                            <dd>{move || user.get().map(|u| u.name).unwrap_or_default()}</dd>
                            <dt class="opacity-60">"Email"</dt>
                            <dd>{move || user.get().and_then(|u| u.email).unwrap_or_default()}</dd>
                            <dt class="opacity-60">"Role"</dt>
                            <dd>{move || user.get().map(|u| u.role).unwrap_or_default()}</dd>
                        </dl>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title text-sm">"Forecast model"</h3>
                        <Show when=move || train_result.get().is_some()>
                            <div class=move || {
                                match train_result.get() {
                                    Some((_, true)) => "alert alert-error text-sm",
                                    _ => "alert alert-success text-sm",
                                }
                            }>
                                <span>{move || train_result.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <div class="card-actions">
                            <button class="btn btn-primary btn-sm" on:click=on_train disabled=move || training.get()>
                                {move || if training.get() { "Training..." } else { "Train now" }}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title text-sm">"Client"</h3>
                    <dl class="grid grid-cols-[8rem_1fr] gap-1 text-sm font-mono">
                        <dt class="opacity-60 font-sans">"API"</dt>
                        <dd>{config.base_url}</dd>
                        <dt class="opacity-60 font-sans">"Timeout"</dt>
                        <dd>{format!("{} ms", config.timeout.as_millis())}</dd>
                        <dt class="opacity-60 font-sans">"Demo mode"</dt>
                        <dd>{if config.demo_mode.is_enabled() { "on" } else { "off" }}</dd>
                    </dl>
                </div>
            </div>
        </Shell>
    }
}
