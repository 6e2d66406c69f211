use crate::api::PageError;
use crate::auth::use_auth;
use crate::components::layout::{ErrorAlert, Shell};
use grocer_shared::protocol::{ForecastRequest, ListProductsRequest};
use grocer_shared::{Forecast, Product};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ForecastPage() -> impl IntoView {
    let auth = use_auth();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (product_id, set_product_id) = signal(String::new());
    let (forecast, set_forecast) = signal(Option::<Forecast>::None);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(Option::<PageError>::None);
    // 递增后强制重新请求当前商品的预测
    let (reload, set_reload) = signal(0u32);

    let load_products = move || {
        let session = auth.session();
        set_error.set(None);
        spawn_local(async move {
            match session.api().call(&ListProductsRequest).await {
                Ok(list) => {
                    // 默认选中第一个商品
                    if let Some(first) = list.items.first() {
                        set_product_id.set(first.id.clone());
                    }
                    set_products.set(list.items);
                }
                Err(e) => set_error.set(Some(PageError::from(&e))),
            }
        });
    };

    load_products();

    let retry = move || {
        if products.with(Vec::is_empty) {
            load_products();
        } else {
            set_reload.update(|n| *n += 1);
        }
    };

    // 选中商品变化或重试时重新请求预测
    Effect::new(move |_| {
        reload.track();
        let id = product_id.get();
        if id.is_empty() {
            return;
        }
        let session = auth.session();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match session.api().call(&ForecastRequest::new(id)).await {
                Ok(data) => set_forecast.set(Some(data)),
                Err(e) => {
                    set_forecast.set(None);
                    set_error.set(Some(PageError::from(&e)));
                }
            }
            set_loading.set(false);
        });
    });

    let rows = move || {
        forecast.with(|f| {
            f.as_ref()
                .map(|f| {
                    f.forecast
                        .iter()
                        .enumerate()
                        .map(|(i, value)| {
                            let band = match (f.lower.get(i), f.upper.get(i)) {
                                (Some(lo), Some(hi)) => format!("{} - {}", lo, hi),
                                _ => String::new(),
                            };
                            (format!("D+{}", i + 1), *value, band)
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    view! {
        <Shell title="Forecast">
            <div class="card bg-base-100 shadow p-4 flex flex-row items-center gap-4">
                <select class="select select-bordered"
                    on:change=move |ev| set_product_id.set(event_target_value(&ev)) prop:value=product_id>
                    <For
                        each=move || products.get()
                        key=|p| p.id.clone()
                        children=|p| view! { <option value=p.id>{p.name}</option> }
                    />
                </select>
                <Show when=move || loading.get()>
                    <span class="loading loading-spinner loading-md"></span>
                </Show>
            </div>

            <ErrorAlert error=error on_retry=move |_| retry() />

            <div class="card bg-base-100 shadow-xl overflow-x-auto">
                <table class="table w-full">
                    <thead>
                        <tr>
                            <th>"Day"</th>
                            <th>"Forecast"</th>
                            <th>"Range"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=rows
                            key=|row| row.clone()
                            children=|(label, value, band)| view! {
                                <tr>
                                    <td>{label}</td>
                                    <td>{value}</td>
                                    <td class="text-base-content/60">{band}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Shell>
    }
}
