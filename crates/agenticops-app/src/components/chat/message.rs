// crates/agenticops-app/src/components/chat/message.rs
// One transcript entry: markdown body plus any attached interactive tables

use super::{InteractiveTable, Markdown};
use agenticops_core::Message;
use agenticops_core::format::{agent_display_name, format_clock};
use agenticops_core::transcript::strip_matching_tables;
use leptos::prelude::*;

#[component]
pub fn ChatMessage(message: Message) -> impl IntoView {
    let is_user = !message.is_assistant();
    let timestamp = format_clock(&message.timestamp.with_timezone(&chrono::Local));

    // Tables rendered interactively are removed from the markdown body
    let body = strip_matching_tables(&message.content, &message.tables);

    view! {
        <div class=if is_user { "px-4 py-3 bg-gray-900/30" } else { "px-4 py-3" }>
            <div class="flex items-start gap-3">
                <div class=if is_user {
                    "flex-shrink-0 w-7 h-7 rounded-full flex items-center justify-center text-xs font-bold bg-blue-500/20 text-blue-400"
                } else {
                    "flex-shrink-0 w-7 h-7 rounded-full flex items-center justify-center text-xs font-bold bg-emerald-500/20 text-emerald-400"
                }>
                    {if is_user { "U" } else { "A" }}
                </div>
                <div class="flex-1 min-w-0">
                    <div class="flex items-center gap-2 mb-1">
                        <span class="text-xs font-medium text-gray-300">
                            {if is_user { "You" } else { "AgenticOps" }}
                        </span>
                        {message.agent.as_deref().map(|agent| {
                            view! {
                                <span class="text-xs px-1.5 py-0.5 bg-blue-500/10 text-blue-400 rounded">
                                    {agent_display_name(agent)}
                                </span>
                            }
                        })}
                        <span class="text-xs text-gray-600">{timestamp}</span>
                    </div>
                    <div class="text-sm text-gray-300 overflow-x-auto">
                        <Markdown content=body/>
                    </div>
                    {message
                        .tables
                        .into_iter()
                        .map(|table| {
                            view! {
                                <div class="mt-2 rounded border border-gray-800 overflow-x-auto">
                                    <InteractiveTable table=table/>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </div>
        </div>
    }
}
