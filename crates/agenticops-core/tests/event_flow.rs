// crates/agenticops-core/tests/event_flow.rs
// End-to-end event ordering through a ConsoleSession, driven by raw frames

use agenticops_core::canvas::Position;
use agenticops_core::detail::{FetchState, Rect};
use agenticops_core::{ConnectionStatus, ConsoleConfig, ConsoleSession, Role};
use agenticops_types::{CardKind, EntityStats, ToolStatus};
use serde_json::json;

fn frame(kind: &str, data: serde_json::Value) -> String {
    json!({ "type": kind, "data": data }).to_string()
}

fn text(chunk: &str) -> String {
    frame("text", json!(chunk))
}

fn table_frame(table_id: &str, network_id: &str) -> String {
    frame(
        "table_data",
        json!({
            "table_id": table_id,
            "entity_type": "network",
            "source": "meraki",
            "columns": ["Name", "Product Types", "Time Zone", "Tags"],
            "rows": [{
                "id": network_id,
                "cells": ["HQ", "wireless, switch", "America/Chicago", "prod"],
                "metadata": {
                    "networkId": network_id,
                    "timeZone": "America/Chicago",
                    "productTypes": ["wireless", "switch"],
                    "tags": ["prod"]
                }
            }]
        }),
    )
}

fn data_table_card(id: &str) -> String {
    frame(
        "card",
        json!({
            "id": id,
            "type": "data_table",
            "title": "Networks",
            "source": "meraki",
            "data": {"columns": ["Name"], "rows": [["HQ"], ["Branch"], ["Lab"]]}
        }),
    )
}

fn connected_session() -> ConsoleSession {
    let mut session = ConsoleSession::new(ConsoleConfig::default());
    assert!(session.channel.begin_connect());
    session.channel.on_open();
    assert_eq!(session.channel.status(), ConnectionStatus::Connected);
    session
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_discovery_turn_end_to_end() {
    let mut session = connected_session();
    session.submit("List all my networks").unwrap();

    for f in [
        frame("agent_start", json!({"agent": "discovery"})),
        frame(
            "tool_call",
            json!({"tool": "list_networks", "source": "meraki", "status": "running"}),
        ),
        frame(
            "tool_call",
            json!({"tool": "list_networks", "source": "meraki", "status": "complete"}),
        ),
        text("Found 3 networks."),
        data_table_card("c1"),
        frame("done", serde_json::Value::Null),
    ] {
        session.receive_frame(&f);
    }

    let conv = session.conversation.state();
    let assistants: Vec<_> = conv.messages.iter().filter(|m| m.is_assistant()).collect();
    assert_eq!(assistants.len(), 1);
    assert_eq!(assistants[0].content, "Found 3 networks.");
    assert_eq!(assistants[0].agent.as_deref(), Some("discovery"));

    assert_eq!(conv.completed_tool_calls.len(), 1);
    assert_eq!(conv.completed_tool_calls[0].agent.as_deref(), Some("discovery"));
    assert_eq!(conv.completed_tool_calls[0].call.tool, "list_networks");
    assert_eq!(conv.completed_tool_calls[0].call.status, ToolStatus::Complete);
    assert!(conv.active_tool_calls.is_empty());
    assert!(conv.active_agent.is_none());
    assert!(!conv.is_processing);
    assert!(conv.processing_started_at.is_none());

    let canvas = session.canvas.state();
    assert_eq!(canvas.cards.len(), 1);
    assert_eq!(canvas.cards[0].id, "c1");
    assert_eq!(canvas.cards[0].kind(), CardKind::DataTable);
    assert_eq!(canvas.node("c1").unwrap().position, Position::new(50.0, 50.0));
}

// ============================================================================
// Ordering properties
// ============================================================================

#[test]
fn test_text_chunks_concatenate_in_order() {
    let mut session = connected_session();
    let chunks = ["The ", "uplink ", "on ", "MX-1 ", "is ", "down."];
    for chunk in chunks {
        session.receive_frame(&text(chunk));
    }
    let messages = &session.conversation.state().messages;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, chunks.concat());
}

#[test]
fn test_table_before_text_attaches_to_new_message() {
    let mut session = connected_session();
    session.submit("List all my networks").unwrap();
    session.receive_frame(&table_frame("tbl-1", "N_1"));
    assert_eq!(session.conversation.state().pending_tables.len(), 1);

    session.receive_frame(&text("Here they are."));
    let conv = session.conversation.state();
    let last = conv.open_assistant().unwrap();
    assert_eq!(last.tables.len(), 1);
    assert_eq!(last.tables[0].table_id, "tbl-1");
    assert!(conv.pending_tables.is_empty());
    // The user message never receives tables
    assert_eq!(conv.messages[0].role, Role::User);
    assert!(conv.messages[0].tables.is_empty());
}

#[test]
fn test_table_after_text_appends() {
    let mut session = connected_session();
    session.receive_frame(&text("Networks:"));
    session.receive_frame(&table_frame("tbl-1", "N_1"));
    session.receive_frame(&table_frame("tbl-2", "N_2"));

    let last = session.conversation.state().open_assistant().unwrap().clone();
    let ids: Vec<_> = last.tables.iter().map(|t| t.table_id.as_str()).collect();
    assert_eq!(ids, vec!["tbl-1", "tbl-2"]);
}

#[test]
fn test_grid_placement_ignores_removals() {
    let mut session = connected_session();
    for id in ["a", "b", "c", "d", "e"] {
        session.receive_frame(&data_table_card(id));
    }
    session.canvas.remove_card("b").unwrap();
    session.receive_frame(&data_table_card("f"));

    let canvas = session.canvas.state();
    let pos = |id: &str| canvas.node(id).unwrap().position;
    assert_eq!(pos("a"), Position::new(50.0, 50.0));
    assert_eq!(pos("c"), Position::new(1010.0, 50.0));
    assert_eq!(pos("d"), Position::new(50.0, 440.0));
    assert_eq!(pos("e"), Position::new(530.0, 440.0));
    assert_eq!(pos("f"), Position::new(1010.0, 440.0));
}

#[test]
fn test_clear_chat_leaves_canvas() {
    let mut session = connected_session();
    session.receive_frame(&data_table_card("c1"));
    session.receive_frame(&table_frame("tbl-1", "N_1"));
    session.receive_frame(&text("done"));
    session.canvas.toggle_card_collapse("c1").unwrap();
    let canvas_before = session.canvas.state().clone();

    session.clear_chat();
    assert!(session.conversation.state().messages.is_empty());
    assert!(session.conversation.state().pending_tables.is_empty());
    assert_eq!(session.canvas.state(), &canvas_before);
}

#[test]
fn test_backend_error_is_inline_and_recoverable() {
    let mut session = connected_session();
    session.submit("Check WAN uplink status").unwrap();
    session.receive_frame(&frame("error", json!({"message": "An error occurred while processing your query."})));
    session.receive_frame(&frame("done", json!({})));

    let conv = session.conversation.state();
    assert_eq!(
        conv.open_assistant().unwrap().content,
        "\n\n_Error: An error occurred while processing your query._"
    );
    assert!(!conv.is_processing);
    assert!(session.submit("Try again").unwrap());
}

// ============================================================================
// Stop & reconnect
// ============================================================================

#[test]
fn test_stop_then_stopped_done() {
    let mut session = connected_session();
    session.submit("Review our firewall rules").unwrap();
    session.take_outbox();
    assert!(session.stop());
    assert_eq!(session.take_outbox().len(), 1);

    session.receive_frame(&frame("done", json!({"stopped": true})));
    assert!(!session.conversation.state().is_processing);
    assert!(!session.stop());
}

#[test]
fn test_submit_while_disconnected_flushes_after_reconnect() {
    let mut session = connected_session();
    let ticket = session.channel.on_close().unwrap();
    session.submit("hello").unwrap();
    assert!(session.take_outbox().is_empty());

    assert!(session.channel.claim_reconnect(ticket));
    session.channel.on_open();
    let frames = session.take_outbox();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].contains("\"user_message\""));
}

#[test]
fn test_reconnect_mid_turn_unlocks_input() {
    let mut session = connected_session();
    session.submit("List all my networks").unwrap();
    session.take_outbox();
    session.receive_frame(&frame("agent_start", json!({"agent": "discovery"})));
    session.receive_frame(&frame("tool_call", json!({"tool": "list_networks", "source": "meraki", "status": "running"})));
    session.receive_frame(&text("Found"));
    assert!(session.stop());

    // Browsers report an error before the close
    session.channel.on_error();
    let ticket = session.on_channel_closed().unwrap();
    let conv = session.conversation.state();
    assert!(!conv.is_processing);
    assert!(conv.active_agent.is_none());
    assert!(conv.active_tool_calls.is_empty());
    assert_eq!(conv.completed_tool_calls[0].agent.as_deref(), Some("discovery"));
    assert_eq!(
        conv.open_assistant().unwrap().content,
        "Found\n\n_Error: Connection lost_"
    );

    assert!(session.channel.claim_reconnect(ticket));
    session.channel.on_open();
    // The stop for the lost turn is not replayed
    assert!(session.take_outbox().is_empty());
    assert!(session.submit("retry").unwrap());
    assert_eq!(session.take_outbox().len(), 1);
}

#[test]
fn test_close_while_connecting_keeps_queued_turn() {
    let mut session = connected_session();
    let ticket = session.on_channel_closed().unwrap();
    session.submit("hello").unwrap();
    assert!(session.channel.claim_reconnect(ticket));

    // The retry socket fails before opening
    assert!(session.on_channel_closed().is_some());
    assert!(session.conversation.state().is_processing);
    assert!(session.has_outbound());
}

// ============================================================================
// Hover detail
// ============================================================================

#[test]
fn test_detail_fetch_and_materialize() {
    let mut session = connected_session();
    session.receive_frame(&text("Networks:"));
    session.receive_frame(&table_frame("tbl-1", "N_1"));
    let table = session.conversation.state().open_assistant().unwrap().tables[0].clone();

    let request = session.toggle_detail(&table, 0, Rect::default()).unwrap();
    assert_eq!(session.stats_path(&request), "/api/entity/network/N_1/stats");

    let stats = EntityStats {
        device_count: 4,
        client_count: 37,
        ssid_count: 2,
    };
    assert!(session.resolve_detail(request.token, Ok(stats)));
    assert_eq!(session.detail.current().unwrap().fetch, FetchState::Loaded(stats));

    let id = session.materialize_detail(1_700_000_000_000).unwrap().unwrap();
    assert_eq!(id, "card-N_1-1700000000000");
    assert!(session.detail.current().is_none());
    let card = session.canvas.state().card(&id).unwrap();
    assert_eq!(card.kind(), CardKind::NetworkHealth);
    assert_eq!(card.title, "HQ");
    // Chat is untouched by the overlay
    assert_eq!(session.conversation.state().messages.len(), 1);
}

#[test]
fn test_duplicate_materialize_keeps_overlay_open() {
    let mut session = connected_session();
    session.receive_frame(&text("Networks:"));
    session.receive_frame(&table_frame("tbl-1", "N_1"));
    let table = session.conversation.state().open_assistant().unwrap().tables[0].clone();
    session.toggle_detail(&table, 0, Rect::default()).unwrap();

    let first = session.materialize_detail(42).unwrap().unwrap();
    session.toggle_detail(&table, 0, Rect::default()).unwrap();
    assert!(session.materialize_detail(42).is_err());

    // Still open, so a later click can retry
    assert!(session.detail.current().is_some());
    assert_eq!(session.canvas.state().cards.len(), 1);
    let second = session.materialize_detail(43).unwrap().unwrap();
    assert_ne!(first, second);
    assert!(session.detail.current().is_none());
}
