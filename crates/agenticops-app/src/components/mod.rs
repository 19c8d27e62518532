// crates/agenticops-app/src/components/mod.rs
// Shared layout components

pub mod canvas;
pub mod cards;
pub mod chat;

use crate::api::fetch_health;
use crate::use_console;
use agenticops_core::ConnectionStatus;
use agenticops_core::format::source_color;
use agenticops_core::prompts::PROMPT_CATEGORIES;
use agenticops_types::HealthResponse;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

// ============================================================================
// Top Bar
// ============================================================================

#[component]
pub fn TopBar() -> impl IntoView {
    let ctx = use_console();
    let health = RwSignal::new(None::<Result<HealthResponse, String>>);

    let api_base = ctx.config().api.base_path;
    spawn_local(async move {
        let result = fetch_health(&api_base).await;
        if let Err(ref e) = result {
            log::warn!("Health check failed: {}", e);
        }
        health.set(Some(result));
    });

    let card_count = move || ctx.canvas.with(|c| c.cards.len());

    view! {
        <header class="flex items-center gap-4 px-4 py-2 border-b border-gray-800 bg-gray-900">
            <span class="font-bold text-blue-400">"AgenticOps"</span>
            <HealthSummary health=health/>
            <div class="flex-1"></div>
            <span class="text-xs text-gray-500">
                {move || format!("{} cards", card_count())}
            </span>
            <HelpMenu/>
            <ConnectionBadge/>
        </header>
    }
}

#[component]
fn HealthSummary(health: RwSignal<Option<Result<HealthResponse, String>>>) -> impl IntoView {
    view! {
        <span class="text-xs text-gray-400">
            {move || match health.get() {
                None => "Checking backend...".to_string(),
                Some(Ok(h)) => format!(
                    "Meraki {} ({}) | ThousandEyes {} ({}) | {} tools",
                    if h.meraki_connected { "up" } else { "down" },
                    h.meraki_tools,
                    if h.thousandeyes_connected { "up" } else { "down" },
                    h.thousandeyes_tools,
                    h.total_tools,
                ),
                Some(Err(_)) => "Backend health unavailable".to_string(),
            }}
        </span>
    }
}

#[component]
fn ConnectionBadge() -> impl IntoView {
    let ctx = use_console();

    let dot = move || match ctx.status.get() {
        ConnectionStatus::Connected => "w-2 h-2 rounded-full bg-emerald-500",
        ConnectionStatus::Connecting => "w-2 h-2 rounded-full bg-amber-500 animate-pulse",
        ConnectionStatus::Disconnected => "w-2 h-2 rounded-full bg-gray-500",
        ConnectionStatus::Error => "w-2 h-2 rounded-full bg-red-500",
    };
    let label = move || match ctx.status.get() {
        ConnectionStatus::Connected => "Connected",
        ConnectionStatus::Connecting => "Connecting...",
        ConnectionStatus::Disconnected => "Disconnected",
        ConnectionStatus::Error => "Connection error",
    };

    view! {
        <div class="flex items-center gap-2 text-xs">
            <div class=dot></div>
            <span class="text-gray-400">{label}</span>
        </div>
    }
}

// ============================================================================
// Help Menu
// ============================================================================

/// Example prompts; choosing one pre-fills the chat input
#[component]
fn HelpMenu() -> impl IntoView {
    let ctx = use_console();
    let open = RwSignal::new(false);

    let choose = move |prompt: &'static str| {
        ctx.act(|s| s.select_prompt(prompt));
        open.set(false);
    };

    view! {
        <div class="relative">
            <button
                class="px-2 py-1 text-xs text-gray-400 hover:text-gray-200 border border-gray-700 rounded"
                on:click=move |_| open.update(|o| *o = !*o)
            >
                "Examples"
            </button>
            <Show when=move || open.get()>
                <div class="absolute right-0 mt-2 w-80 max-h-[70vh] overflow-auto z-50 bg-gray-900 border border-gray-700 rounded-lg shadow-2xl p-2">
                    {PROMPT_CATEGORIES
                        .iter()
                        .map(|category| {
                            view! {
                                <div class="mb-2">
                                    <p
                                        class="text-[11px] font-semibold uppercase tracking-wide px-2 py-1"
                                        style=format!("color: {}", source_color(category.source))
                                    >
                                        {category.label}
                                    </p>
                                    {category
                                        .prompts
                                        .iter()
                                        .map(|prompt| {
                                            let prompt: &'static str = prompt;
                                            view! {
                                                <button
                                                    class="block w-full text-left px-2 py-1 text-xs text-gray-300 hover:bg-gray-800 rounded"
                                                    on:click=move |_| choose(prompt)
                                                >
                                                    {prompt}
                                                </button>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </Show>
        </div>
    }
}
