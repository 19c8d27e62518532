// crates/agenticops-app/src/components/cards/mod.rs
// Card Rendering Layer: one canvas node per card, body chosen by payload variant

mod charts;
mod variants;

pub use charts::{BarChart, LineChart};
pub use variants::{AlertSummaryCard, DataTableCard, NetworkHealthCard, TextReportCard};

use super::canvas::Gesture;
use crate::use_console;
use agenticops_core::cards::card_meta;
use agenticops_core::format::source_color;
use agenticops_types::{Card, CardPayload, DataSource};
use leptos::prelude::*;

fn card_body(card: &Card) -> AnyView {
    match card.payload().clone() {
        CardPayload::DataTable(p) => view! { <DataTableCard payload=p/> }.into_any(),
        CardPayload::BarChart(p) => view! { <BarChart payload=p/> }.into_any(),
        CardPayload::LineChart(p) => view! { <LineChart payload=p/> }.into_any(),
        CardPayload::AlertSummary(p) => view! { <AlertSummaryCard payload=p/> }.into_any(),
        CardPayload::TextReport(p) => view! { <TextReportCard payload=p/> }.into_any(),
        CardPayload::NetworkHealth(p) => view! { <NetworkHealthCard payload=p/> }.into_any(),
    }
}

#[component]
fn CardHeader(
    title: String,
    source: DataSource,
    collapsed: bool,
    on_collapse: Callback<()>,
    on_close: Callback<()>,
    on_grab: Callback<web_sys::PointerEvent>,
) -> impl IntoView {
    let color = source_color(source);

    view! {
        <div
            class="flex items-center justify-between px-3 py-2 border-b border-gray-700/50 bg-gray-800/50 rounded-t-lg cursor-grab select-none"
            on:pointerdown=move |ev| on_grab.run(ev)
        >
            <div class="flex items-center gap-2 min-w-0">
                <h3 class="text-xs font-semibold text-gray-200 truncate">{title}</h3>
                <span
                    class="text-[10px] px-1.5 py-0.5 rounded font-medium flex-shrink-0"
                    style=format!(
                        "background-color: {c}15; color: {c}; border: 1px solid {c}30",
                        c = color
                    )
                >
                    {source.as_str()}
                </span>
            </div>
            <div class="flex items-center gap-1 flex-shrink-0 ml-2">
                <button
                    class="px-1 rounded hover:bg-gray-700/50 text-gray-500 hover:text-gray-300"
                    title=if collapsed { "Expand" } else { "Collapse" }
                    on:pointerdown=|ev| ev.stop_propagation()
                    on:click=move |_| on_collapse.run(())
                >
                    {if collapsed { "+" } else { "\u{2212}" }}
                </button>
                <button
                    class="px-1 rounded hover:bg-red-500/20 text-gray-500 hover:text-red-400"
                    title="Close"
                    on:pointerdown=|ev| ev.stop_propagation()
                    on:click=move |_| on_close.run(())
                >
                    "\u{00d7}"
                </button>
            </div>
        </div>
    }
}

/// A positioned card on the canvas surface, looked up by id
#[component]
pub fn CardNode(id: String, gesture: RwSignal<Option<Gesture>>) -> impl IntoView {
    let ctx = use_console();

    // Only re-render the body when the card itself changes, not on every drag
    let card = {
        let id = id.clone();
        Memo::new(move |_| ctx.canvas.with(|c| c.card(&id).cloned()))
    };
    let node_style = {
        let id = id.clone();
        move || {
            ctx.canvas.with(|c| {
                c.node(&id)
                    .map(|n| {
                        let height = match n.size.height {
                            Some(h) if !n.collapsed => format!("height: {}px;", h),
                            _ => String::new(),
                        };
                        format!(
                            "left: {}px; top: {}px; width: {}px; {}",
                            n.position.x, n.position.y, n.size.width, height
                        )
                    })
                    .unwrap_or_default()
            })
        }
    };

    let toggle = {
        let id = id.clone();
        Callback::new(move |_: ()| {
            if let Some(Err(e)) = ctx.act(|s| s.canvas.toggle_card_collapse(&id)) {
                log::warn!("Collapse failed: {}", e);
            }
        })
    };
    let close = {
        let id = id.clone();
        Callback::new(move |_: ()| {
            if let Some(Err(e)) = ctx.act(|s| s.canvas.remove_card(&id)) {
                log::warn!("Remove failed: {}", e);
            }
        })
    };
    let grab = {
        let id = id.clone();
        Callback::new(move |ev: web_sys::PointerEvent| {
            let start = ctx
                .canvas
                .with_untracked(|c| c.node(&id).map(|n| n.position))
                .unwrap_or_default();
            gesture.set(Some(Gesture::Move {
                id: id.clone(),
                origin: (ev.client_x() as f64, ev.client_y() as f64),
                start,
            }));
        })
    };
    let resize = {
        let id = id.clone();
        move |ev: web_sys::PointerEvent| {
            ev.stop_propagation();
            let Some((width, height)) = ctx.canvas.with_untracked(|c| {
                let node = c.node(&id)?;
                let fallback = c
                    .card(&id)
                    .map(|card| card_meta(card.kind()).default_height)
                    .unwrap_or(node.size.min_height);
                Some((node.size.width, node.size.height.unwrap_or(fallback)))
            }) else {
                return;
            };
            gesture.set(Some(Gesture::Resize {
                id: id.clone(),
                origin: (ev.client_x() as f64, ev.client_y() as f64),
                width,
                height,
            }));
        }
    };

    view! {
        <div
            class="absolute bg-gray-900 border border-gray-700/60 rounded-lg shadow-xl overflow-hidden flex flex-col"
            style=node_style
            on:pointerdown=|ev| ev.stop_propagation()
        >
            {move || {
                card.get()
                    .map(|card| {
                        let body = (!card.collapsed).then(|| {
                            view! { <div class="p-3 flex-1 min-h-0 overflow-auto">{card_body(&card)}</div> }
                        });
                        view! {
                            <CardHeader
                                title=card.title.clone()
                                source=card.source
                                collapsed=card.collapsed
                                on_collapse=toggle
                                on_close=close
                                on_grab=grab
                            />
                            {body}
                        }
                    })
            }}
            <div
                class="absolute right-0 bottom-0 w-3 h-3 cursor-se-resize bg-blue-500/40 rounded-tl"
                on:pointerdown=resize
            ></div>
        </div>
    }
}
