// crates/agenticops-app/src/components/chat/agent_indicator.rs
// Active agent, elapsed time and the tool-call ledger for the running turn

use crate::use_console;
use agenticops_core::format::{agent_display_name, format_elapsed, source_color, source_label};
use agenticops_types::ToolCall;
use leptos::prelude::*;

fn tool_row(call: ToolCall) -> impl IntoView {
    let (marker, marker_class) = if call.is_running() {
        ("...", "text-amber-400 animate-pulse")
    } else {
        ("ok", "text-emerald-400")
    };
    view! {
        <div class="flex items-center gap-2 text-xs">
            <span class=marker_class>{marker}</span>
            <span class="font-mono text-gray-300">{call.tool}</span>
            <span style=format!("color: {}", source_color(call.source))>
                {source_label(call.source)}
            </span>
        </div>
    }
}

#[component]
pub fn AgentIndicator() -> impl IntoView {
    let ctx = use_console();

    let is_processing = move || ctx.conversation.with(|c| c.is_processing);
    // The ledger of the last turn stays on screen after it finishes
    let is_visible = move || {
        ctx.conversation
            .with(|c| c.is_processing || !c.completed_tool_calls.is_empty())
    };
    let agent_label = move || {
        ctx.conversation.with(|c| {
            c.active_agent
                .as_deref()
                .map(agent_display_name)
                .unwrap_or_else(|| "Thinking".to_string())
        })
    };
    let elapsed = move || {
        let now = ctx.now.get();
        ctx.conversation
            .with(|c| c.elapsed(now))
            .map(format_elapsed)
            .unwrap_or_default()
    };
    let active = move || ctx.conversation.with(|c| c.active_tool_calls.clone());
    let completed = move || ctx.conversation.with(|c| c.completed_by_agent());

    view! {
        <Show when=is_visible>
            <div class="border-t border-gray-800 px-4 py-2 space-y-1 bg-gray-900/40">
                <Show when=is_processing>
                    <div class="flex items-center gap-2 text-xs">
                        <span class="w-2 h-2 rounded-full bg-blue-500 animate-pulse"></span>
                        <span class="font-medium text-blue-300">{agent_label}</span>
                        <span class="text-gray-500">{elapsed}</span>
                    </div>
                </Show>
                {move || {
                    completed()
                        .into_iter()
                        .map(|(agent, calls)| {
                            view! {
                                <div class="pl-4 opacity-70">
                                    <div class="text-[11px] text-gray-500">
                                        {agent.as_deref().map(agent_display_name).unwrap_or_default()}
                                    </div>
                                    {calls.into_iter().map(tool_row).collect::<Vec<_>>()}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                <div class="pl-4">
                    {move || active().into_iter().map(tool_row).collect::<Vec<_>>()}
                </div>
            </div>
        </Show>
    }
}
