// crates/agenticops-app/src/components/chat/input.rs
// Prompt input with send and stop controls

use crate::use_console;
use agenticops_core::ConsoleError;
use leptos::html;
use leptos::prelude::*;

#[component]
pub fn ChatInput() -> impl IntoView {
    let ctx = use_console();
    let text = RwSignal::new(String::new());
    let textarea_ref = NodeRef::<html::Textarea>::new();

    let is_processing = move || ctx.conversation.with(|c| c.is_processing);
    let has_prompt = move || ctx.conversation.with(|c| c.pending_prompt.is_some());

    // A prompt picked from the help menu replaces the draft once
    Effect::new(move |_| {
        if !has_prompt() {
            return;
        }
        if let Some(Some(prompt)) = ctx.act(|s| s.conversation.take_pending_prompt()) {
            text.set(prompt);
            if let Some(el) = textarea_ref.get() {
                _ = el.focus();
            }
        }
    });

    let send = move || {
        let draft = text.get_untracked();
        match ctx.act(|s| s.submit(&draft)) {
            Some(Ok(true)) => text.set(String::new()),
            Some(Ok(false)) | None => {}
            Some(Err(ConsoleError::Busy)) => log::debug!("Submit ignored while a turn is running"),
            Some(Err(e)) => log::warn!("Submit failed: {}", e),
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="border-t border-gray-800 p-3">
            <div class="flex items-end gap-2">
                <textarea
                    node_ref=textarea_ref
                    class="flex-1 resize-none bg-gray-900 border border-gray-700 rounded px-3 py-2 text-sm text-gray-200 focus:outline-none focus:border-blue-500"
                    rows="2"
                    placeholder="Ask about networks, devices, alerts..."
                    prop:value=move || text.get()
                    on:input=move |ev| text.set(event_target_value(&ev))
                    on:keydown=on_keydown
                ></textarea>
                <Show
                    when=is_processing
                    fallback=move || view! {
                        <button
                            class="px-3 py-2 text-sm rounded bg-blue-600 hover:bg-blue-500 text-white disabled:opacity-40"
                            disabled=move || text.with(|t| t.trim().is_empty())
                            on:click=move |_| send()
                        >
                            "Send"
                        </button>
                    }
                >
                    <button
                        class="px-3 py-2 text-sm rounded bg-red-600/80 hover:bg-red-500 text-white"
                        on:click=move |_| {
                            ctx.act(|s| s.stop());
                        }
                    >
                        "Stop"
                    </button>
                </Show>
            </div>
        </div>
    }
}
