// crates/agenticops-app/src/lib.rs
// AgenticOps console - Leptos WASM frontend (CSR)

use agenticops_core::{
    CanvasState, ConnectionStatus, ConsoleConfig, ConsoleSession, ConversationState, OpenDetail,
};
use leptos::prelude::*;
use leptos_meta::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::WebSocket;

pub mod api;
pub mod components;
pub mod syntax;
pub mod websocket;

use components::canvas::CanvasPanel;
use components::chat::ChatPanel;
use components::TopBar;

const CONSOLE_TOML: &str = include_str!("../console.toml");

// ============================================================================
// Console State (via Context)
// ============================================================================

/// Session plus reactive snapshots that the stores publish after every mutation
#[derive(Clone, Copy)]
pub struct ConsoleContext {
    pub session: StoredValue<ConsoleSession>,
    pub conversation: RwSignal<ConversationState>,
    pub canvas: RwSignal<CanvasState>,
    pub detail: RwSignal<Option<OpenDetail>>,
    pub status: RwSignal<ConnectionStatus>,
    /// Bumped whenever commands are queued so the channel flushes them
    pub outbox_rev: RwSignal<u64>,
    /// Wall clock for elapsed-time labels, ticked once a second
    pub now: RwSignal<chrono::DateTime<chrono::Utc>>,
}

impl ConsoleContext {
    fn new(config: ConsoleConfig) -> Self {
        let mut session = ConsoleSession::new(config);

        let conversation = RwSignal::new(session.conversation.state().clone());
        let canvas = RwSignal::new(session.canvas.state().clone());
        let detail = RwSignal::new(session.detail.current().cloned());
        let status = RwSignal::new(session.channel.status());

        session
            .conversation
            .subscribe(move |s| conversation.set(s.clone()));
        session.canvas.subscribe(move |s| canvas.set(s.clone()));
        session.detail.subscribe(move |d| detail.set(d.clone()));
        session.channel.subscribe(move |s| status.set(*s));

        Self {
            session: StoredValue::new(session),
            conversation,
            canvas,
            detail,
            status,
            outbox_rev: RwSignal::new(0),
            now: RwSignal::new(chrono::Utc::now()),
        }
    }

    /// Run a session mutation and wake the channel if it queued commands
    pub fn act<U>(&self, f: impl FnOnce(&mut ConsoleSession) -> U) -> Option<U> {
        let (out, queued) = self.session.try_update_value(|s| {
            let out = f(s);
            (out, s.has_outbound())
        })?;
        if queued {
            self.outbox_rev.update(|r| *r += 1);
        }
        Some(out)
    }

    pub fn config(&self) -> ConsoleConfig {
        self.session
            .try_with_value(|s| s.config().clone())
            .unwrap_or_default()
    }
}

fn provide_console_context(config: ConsoleConfig) -> ConsoleContext {
    let ctx = ConsoleContext::new(config);
    provide_context(ctx);
    ctx
}

pub fn use_console() -> ConsoleContext {
    expect_context::<ConsoleContext>()
}

// ============================================================================
// WASM Entry Point
// ============================================================================

#[wasm_bindgen(start)]
pub fn main() {
    // Set up better panic messages
    console_error_panic_hook::set_once();

    let config = ConsoleConfig::load_or_default(CONSOLE_TOML);
    _ = console_log::init_with_level(config.log_level());

    log::info!("AgenticOps console starting...");

    leptos::mount::mount_to_body(move || view! { <App config=config.clone()/> });
}

// ============================================================================
// App Root
// ============================================================================

#[component]
pub fn App(config: ConsoleConfig) -> impl IntoView {
    provide_meta_context();
    let ctx = provide_console_context(config);

    // One socket for the page; torn down on pagehide
    let ws_ref: Rc<RefCell<Option<WebSocket>>> = Rc::new(RefCell::new(None));
    websocket::bind_channel(ctx, ws_ref);

    let tick = gloo_timers::callback::Interval::new(1_000, move || {
        ctx.now.set(chrono::Utc::now());
    });
    tick.forget();

    view! {
        <Title text="AgenticOps"/>
        <div class="h-screen flex flex-col bg-gray-950 text-gray-200">
            <TopBar/>
            <div class="flex-1 flex min-h-0">
                <div class="w-[440px] flex-shrink-0 border-r border-gray-800 flex flex-col min-h-0">
                    <ChatPanel/>
                </div>
                <div class="flex-1 min-w-0">
                    <CanvasPanel/>
                </div>
            </div>
        </div>
    }
}
