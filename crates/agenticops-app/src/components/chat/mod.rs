// crates/agenticops-app/src/components/chat/mod.rs
// Chat panel and its pieces

mod agent_indicator;
mod code_block;
mod detail_popup;
mod input;
mod interactive_table;
mod markdown;
mod message;

pub use agent_indicator::AgentIndicator;
pub use code_block::CodeBlock;
pub use detail_popup::DetailPopup;
pub use input::ChatInput;
pub use interactive_table::InteractiveTable;
pub use markdown::Markdown;
pub use message::ChatMessage;

use crate::use_console;
use leptos::html;
use leptos::prelude::*;

#[component]
pub fn ChatPanel() -> impl IntoView {
    let ctx = use_console();
    let scroll_ref = NodeRef::<html::Div>::new();

    // Keep the newest content in view while a response streams
    Effect::new(move |_| {
        ctx.conversation.with(|c| {
            c.messages.len() + c.messages.last().map_or(0, |m| m.content.len())
        });
        if let Some(el) = scroll_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let is_empty = move || ctx.conversation.with(|c| c.messages.is_empty());

    view! {
        <div class="flex items-center justify-between px-4 py-2 border-b border-gray-800">
            <span class="text-sm font-semibold text-gray-300">"Chat"</span>
            <button
                class="text-xs text-gray-500 hover:text-gray-300"
                on:click=move |_| {
                    ctx.act(|s| s.clear_chat());
                }
            >
                "Clear"
            </button>
        </div>
        <div node_ref=scroll_ref class="flex-1 overflow-y-auto">
            <Show
                when=move || !is_empty()
                fallback=|| view! {
                    <div class="p-6 text-center text-sm text-gray-500">
                        "Ask about your Meraki or ThousandEyes environment."
                    </div>
                }
            >
                <For
                    each=move || ctx.conversation.with(|c| c.messages.clone())
                    key=|m| (m.id.clone(), m.content.len(), m.tables.len())
                    children=move |message| view! { <ChatMessage message=message/> }
                />
            </Show>
        </div>
        <AgentIndicator/>
        <ChatInput/>
        <DetailPopup/>
    }
}
