// crates/agenticops-app/src/websocket.rs
// WebSocket binding for the chat channel
//
// The socket and timers live here; every status decision goes through the
// session's ChannelLifecycle so connect stays idempotent and a torn-down
// channel never reconnects.

use crate::ConsoleContext;
use agenticops_core::ReconnectTicket;
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

type SocketRef = Rc<RefCell<Option<WebSocket>>>;

/// Open the channel, flush queued commands while connected, tear down on pagehide
pub fn bind_channel(ctx: ConsoleContext, ws_ref: SocketRef) {
    connect(ctx, ws_ref.clone());

    // Flush the outbox whenever commands are queued or the channel (re)connects
    let flush_ref = ws_ref.clone();
    Effect::new(move |_| {
        ctx.outbox_rev.track();
        ctx.status.track();
        flush_outbox(ctx, &flush_ref);
    });

    install_teardown(ctx, ws_ref);
}

fn connect(ctx: ConsoleContext, ws_ref: SocketRef) {
    let should_open = ctx
        .session
        .try_update_value(|s| s.channel.begin_connect())
        .unwrap_or(false);
    if should_open {
        open_socket(ctx, ws_ref);
    }
}

fn socket_url(ws_path: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("No window")?;
    let location = window.location();
    let host = location.host().map_err(|_| "No host")?;
    let protocol = location.protocol().map_err(|_| "No protocol")?;

    let ws_protocol = if protocol == "https:" { "wss:" } else { "ws:" };
    Ok(format!("{}//{}{}", ws_protocol, host, ws_path))
}

fn open_socket(ctx: ConsoleContext, ws_ref: SocketRef) {
    let ws_path = ctx.config().channel.ws_path;
    let ws = match socket_url(&ws_path).and_then(|url| {
        log::info!("Connecting to WebSocket: {}", url);
        WebSocket::new(&url).map_err(|e| format!("{:?}", e))
    }) {
        Ok(ws) => ws,
        Err(e) => {
            log::error!("Failed to create WebSocket: {}", e);
            let ticket = ctx
                .session
                .try_update_value(|s| s.channel.on_connect_failed())
                .flatten();
            if let Some(ticket) = ticket {
                schedule_reconnect(ctx, ws_ref, ticket);
            }
            return;
        }
    };

    // On open
    let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
        log::info!("WebSocket connected");
        ctx.session.update_value(|s| s.channel.on_open());
    }) as Box<dyn FnMut(_)>);
    ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    // On message - every frame goes through the router in arrival order
    let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
        if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
            let text: String = text.into();
            ctx.session.update_value(|s| s.receive_frame(&text));
        } else {
            log::debug!("Ignoring non-text frame");
        }
    }) as Box<dyn FnMut(_)>);
    ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    // On close - fixed-delay reconnect unless torn down
    let ws_ref_clone = ws_ref.clone();
    let onclose = Closure::wrap(Box::new(move |e: CloseEvent| {
        log::info!("WebSocket closed: code={}, reason={}", e.code(), e.reason());
        ws_ref_clone.borrow_mut().take();
        let ticket = ctx
            .session
            .try_update_value(|s| s.on_channel_closed())
            .flatten();
        if let Some(ticket) = ticket {
            schedule_reconnect(ctx, ws_ref_clone.clone(), ticket);
        }
    }) as Box<dyn FnMut(_)>);
    ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
    onclose.forget();

    // On error - status only; the close event that follows reconnects
    let onerror = Closure::wrap(Box::new(move |e: ErrorEvent| {
        log::error!("WebSocket error: {:?}", e.message());
        ctx.session.update_value(|s| s.channel.on_error());
    }) as Box<dyn FnMut(_)>);
    ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    *ws_ref.borrow_mut() = Some(ws);
}

fn schedule_reconnect(ctx: ConsoleContext, ws_ref: SocketRef, ticket: ReconnectTicket) {
    let delay_ms = u32::try_from(ticket.delay.as_millis()).unwrap_or(u32::MAX);
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(delay_ms).await;
        let claimed = ctx
            .session
            .try_update_value(|s| s.channel.claim_reconnect(ticket))
            .unwrap_or(false);
        if claimed {
            open_socket(ctx, ws_ref);
        }
    });
}

fn flush_outbox(ctx: ConsoleContext, ws_ref: &SocketRef) {
    let socket = ws_ref.borrow();
    let Some(ws) = socket.as_ref() else {
        return;
    };
    let frames = ctx.session.try_update_value(|s| s.take_outbox()).unwrap_or_default();
    for frame in frames {
        if let Err(e) = ws.send_with_str(&frame) {
            log::warn!("Failed to send frame: {:?}", e);
        }
    }
}

fn install_teardown(ctx: ConsoleContext, ws_ref: SocketRef) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let onpagehide = Closure::wrap(Box::new(move |_: web_sys::Event| {
        ctx.session.update_value(|s| s.channel.teardown());
        if let Some(ws) = ws_ref.borrow_mut().take() {
            let _ = ws.close();
        }
    }) as Box<dyn FnMut(_)>);
    if let Err(e) =
        window.add_event_listener_with_callback("pagehide", onpagehide.as_ref().unchecked_ref())
    {
        log::warn!("Failed to install pagehide listener: {:?}", e);
    }
    onpagehide.forget();
}
