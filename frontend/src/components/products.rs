use crate::api::{PageError, describe_error};
use crate::auth::use_auth;
use crate::components::layout::{ErrorAlert, Shell};
use grocer_shared::protocol::{DeleteProductRequest, ListProductsRequest, UpdateProductRequest};
use grocer_shared::{NewProduct, Product, ProductPatch};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 表单内容解析为新商品
fn parse_form(name: &str, price: &str, stock: &str) -> Result<NewProduct, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    let price = price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| "Price must be a non-negative number".to_string())?;
    let stock = stock
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|s| *s >= 0)
        .ok_or_else(|| "Stock must be a non-negative integer".to_string())?;
    Ok(NewProduct {
        name: name.to_string(),
        price,
        stock,
    })
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let auth = use_auth();

    let (items, set_items) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(false);
    // 列表加载失败；表单和删除的结果走 notification
    let (load_error, set_load_error) = signal(Option::<PageError>::None);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    // 正在编辑的商品 id；None 表示新增
    let (editing, set_editing) = signal(Option::<String>::None);
    let (name, set_name) = signal(String::new());
    let (price, set_price) = signal(String::new());
    let (stock, set_stock) = signal(String::new());

    let reset_form = move || {
        set_editing.set(None);
        set_name.set(String::new());
        set_price.set(String::new());
        set_stock.set(String::new());
    };

    let load_products = move || {
        let session = auth.session();
        set_loading.set(true);
        set_load_error.set(None);
        spawn_local(async move {
            match session.api().call(&ListProductsRequest).await {
                Ok(list) => set_items.set(list.items),
                Err(e) => set_load_error.set(Some(PageError::from(&e))),
            }
            set_loading.set(false);
        });
    };

    load_products();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let product = match parse_form(&name.get(), &price.get(), &stock.get()) {
            Ok(p) => p,
            Err(msg) => {
                set_notification.set(Some((msg, true)));
                return;
            }
        };

        let session = auth.session();
        let target = editing.get();
        spawn_local(async move {
            let result = match target {
                Some(id) => {
                    let req = UpdateProductRequest {
                        id,
                        patch: ProductPatch {
                            name: Some(product.name),
                            price: Some(product.price),
                            stock: Some(product.stock),
                        },
                    };
                    session.api().call(&req).await.map(|_| "Product updated")
                }
                None => session.api().call(&product).await.map(|_| "Product added"),
            };
            match result {
                Ok(msg) => {
                    set_notification.set(Some((msg.to_string(), false)));
                    reset_form();
                    load_products();
                }
                Err(e) => set_notification.set(Some((describe_error(&e), true))),
            }
        });
    };

    let handle_edit = move |product: Product| {
        set_editing.set(Some(product.id));
        set_name.set(product.name);
        set_price.set(product.price.to_string());
        set_stock.set(product.stock.to_string());
    };

    let handle_delete = move |id: String| {
        let session = auth.session();
        spawn_local(async move {
            match session.api().call(&DeleteProductRequest { id: id.clone() }).await {
                Ok(resp) => {
                    set_notification.set(Some((resp.message, false)));
                    set_items.update(|list| list.retain(|p| p.id != id));
                }
                Err(e) => set_notification.set(Some((describe_error(&e), true))),
            }
        });
    };

    view! {
        <Shell title="Products">
            <ErrorAlert error=load_error on_retry=move |_| load_products() />

            <Show when=move || notification.get().is_some()>
                <div class=move || {
                    match notification.get() {
                        Some((_, true)) => "alert alert-error text-sm",
                        _ => "alert alert-success text-sm",
                    }
                }>
                    <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                </div>
            </Show>

            <form class="card bg-base-100 shadow p-4 grid grid-cols-1 md:grid-cols-4 gap-2" on:submit=on_submit>
                <input class="input input-bordered" placeholder="Name"
                    on:input=move |ev| set_name.set(event_target_value(&ev)) prop:value=name />
                <input class="input input-bordered" placeholder="Price" inputmode="decimal"
                    on:input=move |ev| set_price.set(event_target_value(&ev)) prop:value=price />
                <input class="input input-bordered" placeholder="Stock" inputmode="numeric"
                    on:input=move |ev| set_stock.set(event_target_value(&ev)) prop:value=stock />
                <div class="flex gap-2">
                    <button type="submit" class="btn btn-primary flex-1">
                        {move || if editing.get().is_some() { "Save" } else { "Add product" }}
                    </button>
                    <Show when=move || editing.get().is_some()>
                        <button type="button" class="btn btn-ghost" on:click=move |_| reset_form()>"Cancel"</button>
                    </Show>
                </div>
            </form>

            <div class="card bg-base-100 shadow-xl overflow-x-auto">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Price"</th>
                            <th>"Stock"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || loading.get() && items.with(|i| i.is_empty())>
                            <tr>
                                <td colspan="4" class="text-center py-8 text-base-content/50">
                                    <span class="loading loading-spinner loading-md"></span>
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || items.get()
                            key=|p| p.id.clone()
                            children=move |product| {
                                let id = product.id.clone();
                                let for_edit = product.clone();
                                view! {
                                    <tr>
                                        <td>{product.name}</td>
                                        <td>{format!("{:.2}", product.price)}</td>
                                        <td>{product.stock}</td>
                                        <td class="flex gap-2 justify-end">
                                            <button class="btn btn-ghost btn-xs" on:click=move |_| handle_edit(for_edit.clone())>"Edit"</button>
                                            <button class="btn btn-ghost btn-xs text-error" on:click=move |_| handle_delete(id.clone())>"Delete"</button>
                                        </td>
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
    fn test_parse_form_accepts_valid_input() {
        let p = parse_form(" Milk 1L ", "1.25", "40").unwrap();
        assert_eq!(p.name, "Milk 1L");
        assert_eq!(p.price, 1.25);
        assert_eq!(p.stock, 40);
    }

    #[test]
    fn test_parse_form_rejects_bad_input() {
        assert!(parse_form("", "1", "1").is_err());
        assert!(parse_form("Milk", "free", "1").is_err());
        assert!(parse_form("Milk", "-1", "1").is_err());
        assert!(parse_form("Milk", "1", "2.5").is_err());
    }
}
