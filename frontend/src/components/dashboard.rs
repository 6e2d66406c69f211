use crate::api::PageError;
use crate::auth::use_auth;
use crate::components::layout::{ErrorAlert, Shell};
use grocer_shared::protocol::{ListProductsRequest, SalesSeriesRequest};
use grocer_shared::{Product, SeriesPoint};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 库存低于该值时提示
const LOW_STOCK: i64 = 10;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let (series, set_series) = signal(Vec::<SeriesPoint>::new());
    let (low_stock, set_low_stock) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<PageError>::None);

    let load = move || {
        let session = auth.session();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let api = session.api();
            match api.call(&SalesSeriesRequest::default()).await {
                Ok(data) => set_series.set(data.items),
                Err(e) => set_error.set(Some(PageError::from(&e))),
            }
            match api.call(&ListProductsRequest).await {
                Ok(list) => set_low_stock.set(
                    list.items
                        .into_iter()
                        .filter(|p| p.stock < LOW_STOCK)
                        .collect(),
                ),
                Err(e) => set_error.set(Some(PageError::from(&e))),
            }
            set_loading.set(false);
        });
    };

    load();

    let total_sold = move || series.with(|s| s.iter().map(|p| p.value).sum::<i64>());
    let peak = move || series.with(|s| s.iter().map(|p| p.value).max().unwrap_or(0));

    view! {
        <Shell title="Dashboard">
            <ErrorAlert error=error on_retry=move |_| load() />

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Units sold (14 days)"</div>
                    <div class="stat-value text-primary">{total_sold}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Best day"</div>
                    <div class="stat-value text-secondary">{peak}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Low stock items"</div>
                    <div class="stat-value text-error">{move || low_stock.with(|l| l.len())}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title text-sm">"Recent sales"</h3>
                    <Show when=move || loading.get()>
                        <span class="loading loading-spinner loading-md"></span>
                    </Show>
                    <div class="flex items-end gap-1 h-32">
                        <For
                            each=move || series.get()
                            key=|p| p.label.clone()
                            children=move |point| {
                                let value = point.value;
                                let height = move || format!("height: {}%", value * 100 / peak().max(1));
                                view! {
                                    <div class="flex-1 bg-primary/70 rounded-t" style=height title=point.label></div>
                                }
                            }
                        />
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title text-sm">"Stock alerts"</h3>
                    <ul class="list-disc space-y-1 pl-6 text-sm text-error">
                        <For
                            each=move || low_stock.get()
                            key=|p| p.id.clone()
                            children=|p| view! { <li>{format!("{} is low ({} left)", p.name, p.stock)}</li> }
                        />
                    </ul>
                </div>
            </div>
        </Shell>
    }
}
