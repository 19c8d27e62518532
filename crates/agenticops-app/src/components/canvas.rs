// crates/agenticops-app/src/components/canvas.rs
// Canvas surface: pan, drag and resize over the Canvas Store

use super::cards::CardNode;
use crate::use_console;
use agenticops_core::{NodeChange, Position};
use leptos::prelude::*;

/// Pointer interaction in progress on the surface
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Move {
        id: String,
        origin: (f64, f64),
        start: Position,
    },
    Resize {
        id: String,
        origin: (f64, f64),
        width: f64,
        height: f64,
    },
    Pan {
        origin: (f64, f64),
        start: Position,
    },
}

#[component]
pub fn CanvasPanel() -> impl IntoView {
    let ctx = use_console();
    let gesture = RwSignal::new(None::<Gesture>);
    let pan = RwSignal::new(Position::default());

    let on_move = move |ev: web_sys::PointerEvent| {
        let Some(active) = gesture.get_untracked() else {
            return;
        };
        let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
        match active {
            Gesture::Move { id, origin, start } => {
                let to = Position::new(start.x + x - origin.0, start.y + y - origin.1);
                if let Some(Err(e)) = ctx.act(|s| s.canvas.update_node_position(&id, to)) {
                    log::debug!("Drag target vanished: {}", e);
                    gesture.set(None);
                }
            }
            Gesture::Resize {
                id,
                origin,
                width,
                height,
            } => {
                let change = NodeChange::Dimensions {
                    id,
                    width: width + x - origin.0,
                    height: height + y - origin.1,
                };
                ctx.act(|s| s.canvas.apply_node_changes(vec![change]));
            }
            Gesture::Pan { origin, start } => {
                pan.set(Position::new(start.x + x - origin.0, start.y + y - origin.1));
            }
        }
    };

    let start_pan = move |ev: web_sys::PointerEvent| {
        gesture.set(Some(Gesture::Pan {
            origin: (ev.client_x() as f64, ev.client_y() as f64),
            start: pan.get_untracked(),
        }));
    };
    let end_gesture = move |_| gesture.set(None);

    let node_ids = move || ctx.canvas.with(|c| c.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>());
    let is_empty = move || ctx.canvas.with(|c| c.cards.is_empty());

    // Straight links between node centres; heights fall back to a nominal value
    let edges = move || {
        ctx.canvas.with(|c| {
            c.edges
                .iter()
                .filter_map(|e| {
                    let centre = |id: &str| {
                        c.node(id).map(|n| {
                            (
                                n.position.x + n.size.width / 2.0,
                                n.position.y + n.size.height.unwrap_or(n.size.min_height) / 2.0,
                            )
                        })
                    };
                    let (x1, y1) = centre(&e.source)?;
                    let (x2, y2) = centre(&e.target)?;
                    Some(view! {
                        <line
                            x1=x1.to_string()
                            y1=y1.to_string()
                            x2=x2.to_string()
                            y2=y2.to_string()
                            stroke="#3b82f680"
                            stroke-width="2"
                        ></line>
                    })
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div
            class="relative h-full w-full overflow-hidden bg-gray-950 touch-none"
            style="background-image: radial-gradient(#1e1f2e 1px, transparent 1px); background-size: 20px 20px;"
            on:pointerdown=start_pan
            on:pointermove=on_move
            on:pointerup=end_gesture
            on:pointerleave=end_gesture
        >
            <div
                class="absolute inset-0 origin-top-left"
                style=move || pan.with(|p| format!("transform: translate({}px, {}px)", p.x, p.y))
            >
                <svg class="absolute inset-0 overflow-visible pointer-events-none" width="1" height="1">
                    {edges}
                </svg>
                <For
                    each=node_ids
                    key=|id| id.clone()
                    children=move |id| view! { <CardNode id=id gesture=gesture/> }
                />
            </div>
            <Show when=is_empty>
                <div class="absolute inset-0 flex items-center justify-center pointer-events-none">
                    <div class="text-center">
                        <p class="text-sm text-gray-500">"Cards will appear here"</p>
                        <p class="text-xs text-gray-600 mt-1">"Ask a question in the chat to get started"</p>
                    </div>
                </div>
            </Show>
            <button
                class="absolute bottom-3 right-3 px-2 py-1 text-xs rounded border border-gray-700 bg-gray-900 text-gray-400 hover:text-gray-200"
                on:pointerdown=|ev| ev.stop_propagation()
                on:click=move |_| pan.set(Position::default())
            >
                "Reset view"
            </button>
        </div>
    }
}
