// crates/agenticops-app/src/components/chat/code_block.rs
// Highlighted code block with a copy button

use crate::syntax::highlight_block;
use leptos::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

#[component]
pub fn CodeBlock(code: String, #[prop(optional)] language: Option<String>) -> impl IntoView {
    let copied = RwSignal::new(false);
    let language = language.unwrap_or_else(|| "text".to_string());
    let highlighted = highlight_block(&code, &language);

    let copy_code = move |_| {
        let code = code.clone();
        spawn_local(async move {
            let Some(window) = web_sys::window() else {
                return;
            };
            let clipboard = window.navigator().clipboard();
            if let Err(e) = JsFuture::from(clipboard.write_text(&code)).await {
                log::warn!("Clipboard write failed: {:?}", e);
                return;
            }
            copied.set(true);
            gloo_timers::future::TimeoutFuture::new(2000).await;
            copied.set(false);
        });
    };

    view! {
        <div class="my-2 rounded border border-gray-800 bg-gray-950 overflow-hidden">
            <div class="flex items-center justify-between px-3 py-1 bg-gray-900 text-[11px] text-gray-500">
                <span>{language}</span>
                <button class="hover:text-gray-300" on:click=copy_code>
                    {move || if copied.get() { "Copied!" } else { "Copy" }}
                </button>
            </div>
            <pre class="px-3 py-2 text-xs overflow-x-auto"><code inner_html=highlighted></code></pre>
        </div>
    }
}
