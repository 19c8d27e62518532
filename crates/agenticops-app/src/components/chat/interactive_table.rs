// crates/agenticops-app/src/components/chat/interactive_table.rs
// Clickable table rows that open the hover detail overlay

use crate::api::fetch_entity_stats;
use crate::{ConsoleContext, use_console};
use agenticops_core::detail::Rect;
use agenticops_types::TableData;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

fn anchor_rect(ev: &web_sys::MouseEvent) -> Rect {
    ev.current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(|el| {
            let r = el.get_bounding_client_rect();
            Rect {
                left: r.left(),
                top: r.top(),
                right: r.right(),
                bottom: r.bottom(),
            }
        })
        .unwrap_or_default()
}

/// Toggle the overlay for a row and start the stats lookup if one is needed
fn open_row(ctx: ConsoleContext, table: &TableData, row_index: usize, anchor: Rect) {
    let Some(Some(request)) = ctx.act(|s| s.toggle_detail(table, row_index, anchor)) else {
        return;
    };
    let Some(path) = ctx.act(|s| s.stats_path(&request)) else {
        return;
    };
    spawn_local(async move {
        let result = fetch_entity_stats(&path).await;
        // Dropped inside the session if the overlay moved on meanwhile
        ctx.act(|s| s.resolve_detail(request.token, result));
    });
}

#[component]
pub fn InteractiveTable(table: TableData) -> impl IntoView {
    let ctx = use_console();
    let table = Arc::new(table);
    let hovered = RwSignal::new(None::<usize>);

    let columns = table.columns.clone();
    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let click_table = table.clone();
            let table_id = table.table_id.clone();
            let is_open = move || {
                ctx.detail.with(|d| {
                    d.as_ref()
                        .is_some_and(|o| o.table_id == table_id && o.row_index == idx)
                })
            };
            let row_class = move || {
                if is_open() {
                    "border-b border-gray-800 cursor-pointer bg-blue-500/10"
                } else if hovered.get() == Some(idx) {
                    "border-b border-gray-800 cursor-pointer bg-blue-500/5"
                } else {
                    "border-b border-gray-800 cursor-pointer"
                }
            };

            view! {
                <tr
                    class=row_class
                    on:mousedown=|ev| ev.stop_propagation()
                    on:click=move |ev| open_row(ctx, &click_table, idx, anchor_rect(&ev))
                    on:mouseenter=move |_| hovered.set(Some(idx))
                    on:mouseleave=move |_| hovered.set(None)
                >
                    {row
                        .cells
                        .iter()
                        .map(|cell| view! { <td class="px-3 py-1.5 text-gray-300">{cell.clone()}</td> })
                        .collect::<Vec<_>>()}
                </tr>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="px-3 py-1.5 text-[11px] text-gray-500 bg-gray-900/50 border-b border-gray-800">
            "Click a row for details"
        </div>
        <table class="w-full border-collapse text-[0.8125rem]">
            <thead>
                <tr>
                    {columns
                        .into_iter()
                        .map(|col| {
                            view! {
                                <th class="bg-slate-800 px-3 py-2 text-left font-semibold text-gray-300 whitespace-nowrap">
                                    {col}
                                </th>
                            }
                        })
                        .collect::<Vec<_>>()}
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
