// crates/agenticops-app/src/components/chat/detail_popup.rs
// Floating detail panel for the selected table row

use crate::use_console;
use agenticops_core::detail::{Viewport, popup_placement};
use agenticops_core::format::{source_color, source_label};
use agenticops_core::{FetchState, OpenDetail};
use leptos::prelude::*;

fn viewport() -> Viewport {
    let size = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    web_sys::window()
        .map(|w| Viewport {
            width: size(w.inner_width()),
            height: size(w.inner_height()),
        })
        .unwrap_or(Viewport {
            width: 0.0,
            height: 0.0,
        })
}

fn meta_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="flex gap-2 text-xs">
            <span class="w-24 flex-shrink-0 text-gray-500">{label}</span>
            <span class="text-gray-300 break-all">{value}</span>
        </div>
    }
}

fn stat_cell(label: &'static str, value: u64) -> impl IntoView {
    view! {
        <div class="rounded bg-gray-800/60 px-2 py-1.5 text-center">
            <div class="text-base font-semibold text-gray-100">{value}</div>
            <div class="text-[10px] uppercase tracking-wide text-gray-500">{label}</div>
        </div>
    }
}

fn stats_section(fetch: FetchState) -> AnyView {
    match fetch {
        FetchState::Loading => view! {
            <div class="text-xs text-gray-500 animate-pulse">"Loading stats..."</div>
        }
        .into_any(),
        FetchState::Failed(e) => view! {
            <div class="text-xs text-red-400" title=e.to_string()>"Failed to load stats"</div>
        }
        .into_any(),
        FetchState::Loaded(stats) => view! {
            <div class="grid grid-cols-3 gap-2">
                {stat_cell("Devices", stats.device_count)}
                {stat_cell("Clients", stats.client_count)}
                {stat_cell("SSIDs", stats.ssid_count)}
            </div>
        }
        .into_any(),
    }
}

fn panel(detail: OpenDetail, left: f64, top: f64, width: f64) -> impl IntoView {
    let ctx = use_console();
    let meta = detail.row.metadata.clone();
    let name = detail.display_name().to_string();

    let add_to_canvas = move |_| {
        let now = js_sys::Date::now() as i64;
        match ctx.act(|s| s.materialize_detail(now)) {
            Some(Ok(Some(id))) => log::debug!("Added {} to canvas", id),
            Some(Ok(None)) | None => {}
            Some(Err(e)) => log::warn!("Could not add card: {}", e),
        }
    };

    view! {
        <div
            class="fixed z-50 rounded-lg border border-gray-700 bg-gray-900 shadow-2xl p-3 space-y-2"
            style=format!("left: {}px; top: {}px; width: {}px", left, top, width)
            on:mousedown=|ev| ev.stop_propagation()
        >
            <div class="flex items-center justify-between gap-2">
                <span class="text-sm font-semibold text-gray-100 truncate">{name}</span>
                <span class="text-[11px]" style=format!("color: {}", source_color(detail.source))>
                    {source_label(detail.source)}
                </span>
            </div>
            {stats_section(detail.fetch)}
            <div class="space-y-1">
                {meta.time_zone.map(|tz| meta_row("Time Zone", tz))}
                {meta.product_types.filter(|p| !p.is_empty()).map(|p| meta_row("Products", p.join(", ")))}
                {meta.tags.filter(|t| !t.is_empty()).map(|t| meta_row("Tags", t.join(", ")))}
                {meta.notes.filter(|n| !n.is_empty()).map(|n| meta_row("Notes", n))}
                {(!meta.network_id.is_empty()).then(|| meta_row("Network ID", meta.network_id.clone()))}
            </div>
            <button
                class="w-full text-xs py-1.5 rounded bg-blue-600/80 hover:bg-blue-500 text-white"
                on:click=add_to_canvas
            >
                "Add to canvas"
            </button>
        </div>
    }
}

#[component]
pub fn DetailPopup() -> impl IntoView {
    let ctx = use_console();
    let popup = ctx.config().popup;

    move || {
        ctx.detail.get().map(|detail| {
            let placement = popup_placement(&detail.anchor, viewport(), &popup);
            view! {
                <div
                    class="fixed inset-0 z-40"
                    on:mousedown=move |_| {
                        ctx.act(|s| s.detail.close());
                    }
                ></div>
                {panel(detail, placement.left, placement.top, popup.width)}
            }
        })
    }
}
