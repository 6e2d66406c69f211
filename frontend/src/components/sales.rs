use crate::api::{PageError, describe_error};
use crate::auth::use_auth;
use crate::components::layout::{ErrorAlert, Shell};
use chrono::NaiveDate;
use grocer_shared::protocol::{ListProductsRequest, ListSalesRequest};
use grocer_shared::{NewSale, Product, Sale};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn parse_sale(product_id: &str, quantity: &str, date: &str) -> Result<NewSale, String> {
    if product_id.is_empty() {
        return Err("Choose a product".to_string());
    }
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| "Quantity must be a positive integer".to_string())?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| "Date must be YYYY-MM-DD".to_string())?;
    Ok(NewSale {
        product_id: product_id.to_string(),
        quantity,
        date,
    })
}

#[component]
pub fn SalesPage() -> impl IntoView {
    let auth = use_auth();

    let (items, set_items) = signal(Vec::<Sale>::new());
    let (products, set_products) = signal(Vec::<Product>::new());
    let (error, set_error) = signal(Option::<PageError>::None);

    let (product_id, set_product_id) = signal(String::new());
    let (quantity, set_quantity) = signal(String::new());
    let (date, set_date) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let load = move || {
        let session = auth.session();
        set_error.set(None);
        spawn_local(async move {
            let api = session.api();
            match api.call(&ListSalesRequest).await {
                Ok(list) => set_items.set(list.items),
                Err(e) => set_error.set(Some(PageError::from(&e))),
            }
            match api.call(&ListProductsRequest).await {
                Ok(list) => set_products.set(list.items),
                Err(e) => set_error.set(Some(PageError::from(&e))),
            }
        });
    };

    load();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let sale = match parse_sale(&product_id.get(), &quantity.get(), &date.get()) {
            Ok(sale) => sale,
            Err(msg) => {
                set_error.set(Some(PageError::local(msg)));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error.set(None);
        let session = auth.session();
        spawn_local(async move {
            match session.api().call(&sale).await {
                Ok(_) => {
                    set_quantity.set(String::new());
                    load();
                }
                // 重试只会重新加载列表，提交失败不提供重试
                Err(e) => set_error.set(Some(PageError::local(describe_error(&e)))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <Shell title="Sales">
            <ErrorAlert error=error on_retry=move |_| load() />

            <form class="card bg-base-100 shadow p-4 grid grid-cols-1 md:grid-cols-4 gap-2" on:submit=on_submit>
                <select class="select select-bordered"
                    on:change=move |ev| set_product_id.set(event_target_value(&ev)) prop:value=product_id>
                    <option value="">"Product"</option>
                    <For
                        each=move || products.get()
                        key=|p| p.id.clone()
                        children=|p| view! { <option value=p.id>{p.name}</option> }
                    />
                </select>
                <input class="input input-bordered" placeholder="Quantity" inputmode="numeric"
                    on:input=move |ev| set_quantity.set(event_target_value(&ev)) prop:value=quantity />
                <input class="input input-bordered" type="date"
                    on:input=move |ev| set_date.set(event_target_value(&ev)) prop:value=date />
                <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                    "Record sale"
                </button>
            </form>

            <div class="card bg-base-100 shadow-xl overflow-x-auto">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"Date"</th>
                            <th>"Product"</th>
                            <th>"Quantity"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || items.get()
                            key=|s| s.id.clone()
                            children=|sale| {
                                let product = if sale.product_name.is_empty() {
                                    sale.product_id
                                } else {
                                    sale.product_name
                                };
                                view! {
                                    <tr>
                                        <td>{sale.date.to_string()}</td>
                                        <td>{product}</td>
                                        <td>{sale.quantity}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Shell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sale() {
        let sale = parse_sale("3", "2", "2024-05-01").unwrap();
        assert_eq!(sale.product_id, "3");
        assert_eq!(sale.quantity, 2);
        assert_eq!(sale.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        assert!(parse_sale("", "2", "2024-05-01").is_err());
        assert!(parse_sale("3", "0", "2024-05-01").is_err());
        assert!(parse_sale("3", "2", "05/01/2024").is_err());
    }
}
