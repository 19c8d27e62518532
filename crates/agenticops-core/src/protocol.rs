// crates/agenticops-core/src/protocol.rs
// Frame codec for the chat socket: `{type, data}` in, typed commands out

use crate::error::{ConsoleError, Result};
use agenticops_types::{
    AgentStart, Card, CardEnvelope, DoneInfo, ErrorInfo, RawFrame, TableData, ToolCall, WsCommand,
    WsEvent,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode one inbound text frame into a typed event
pub fn decode_event(frame: &str) -> Result<WsEvent> {
    let raw: RawFrame = serde_json::from_str(frame)?;
    decode_raw(raw)
}

pub fn decode_raw(raw: RawFrame) -> Result<WsEvent> {
    let RawFrame { kind, data } = raw;
    match kind.as_str() {
        "agent_start" => Ok(WsEvent::AgentStart(payload::<AgentStart>("agent_start", data)?)),
        "tool_call" => Ok(WsEvent::ToolCall(payload::<ToolCall>("tool_call", data)?)),
        "text" => Ok(WsEvent::Text(payload::<String>("text", data)?)),
        "card" => {
            let envelope = payload::<CardEnvelope>("card", data)?;
            let card = Card::try_from(envelope)
                .map_err(|source| ConsoleError::InvalidPayload { kind: "card", source })?;
            Ok(WsEvent::Card(card))
        }
        "table_data" => Ok(WsEvent::TableData(payload::<TableData>("table_data", data)?)),
        "done" => Ok(WsEvent::Done(optional_payload::<DoneInfo>("done", data)?)),
        "error" => Ok(WsEvent::Error(optional_payload::<ErrorInfo>("error", data)?)),
        _ => Err(ConsoleError::UnknownEventKind(kind)),
    }
}

fn payload<T: DeserializeOwned>(kind: &'static str, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|source| ConsoleError::InvalidPayload { kind, source })
}

/// `done` and `error` may arrive with no payload at all
fn optional_payload<T: DeserializeOwned + Default>(kind: &'static str, data: Value) -> Result<T> {
    if data.is_null() {
        return Ok(T::default());
    }
    payload(kind, data)
}

/// Serialize an outbound command to a text frame
pub fn encode_command(command: &WsCommand) -> Result<String> {
    Ok(serde_json::to_string(command)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenticops_types::{CardKind, DataSource, ToolStatus};

    #[test]
    fn test_decode_agent_start() {
        let event = decode_event(r#"{"type":"agent_start","data":{"agent":"discovery"}}"#).unwrap();
        assert_eq!(
            event,
            WsEvent::AgentStart(AgentStart {
                agent: "discovery".into()
            })
        );
    }

    #[test]
    fn test_decode_tool_call() {
        let event = decode_event(
            r#"{"type":"tool_call","data":{"tool":"get_alerts","source":"thousandeyes","status":"complete"}}"#,
        )
        .unwrap();
        match event {
            WsEvent::ToolCall(tc) => {
                assert_eq!(tc.tool, "get_alerts");
                assert_eq!(tc.source, DataSource::Thousandeyes);
                assert_eq!(tc.status, ToolStatus::Complete);
            }
            other => panic!("Expected ToolCall, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_text_chunk() {
        let event = decode_event(r#"{"type":"text","data":"Found 3 networks."}"#).unwrap();
        assert_eq!(event, WsEvent::Text("Found 3 networks.".into()));
    }

    #[test]
    fn test_decode_card() {
        let event = decode_event(
            r#"{"type":"card","data":{"id":"c1","type":"alert_summary","title":"Alerts","source":"thousandeyes","data":{"alerts":[{"severity":"high","title":"Loss","description":"5%"}]}}}"#,
        )
        .unwrap();
        match event {
            WsEvent::Card(card) => {
                assert_eq!(card.id, "c1");
                assert_eq!(card.kind(), CardKind::AlertSummary);
            }
            other => panic!("Expected Card, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_done_variants() {
        assert_eq!(
            decode_event(r#"{"type":"done"}"#).unwrap(),
            WsEvent::Done(DoneInfo { stopped: false })
        );
        assert_eq!(
            decode_event(r#"{"type":"done","data":null}"#).unwrap(),
            WsEvent::Done(DoneInfo { stopped: false })
        );
        assert_eq!(
            decode_event(r#"{"type":"done","data":{"stopped":true}}"#).unwrap(),
            WsEvent::Done(DoneInfo { stopped: true })
        );
    }

    #[test]
    fn test_decode_error_without_message() {
        let event = decode_event(r#"{"type":"error","data":null}"#).unwrap();
        assert_eq!(event, WsEvent::Error(ErrorInfo { message: None }));
    }

    // ============================================================================
    // Malformed input
    // ============================================================================

    #[test]
    fn test_not_json_is_malformed() {
        let err = decode_event("not json").unwrap_err();
        assert!(matches!(err, ConsoleError::MalformedFrame(_)));
    }

    #[test]
    fn test_unknown_kind() {
        let err = decode_event(r#"{"type":"cards_ready","data":{}}"#).unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownEventKind(k) if k == "cards_ready"));
    }

    #[test]
    fn test_wrong_payload_shape() {
        let err = decode_event(r#"{"type":"text","data":{"chunk":"x"}}"#).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidPayload { kind: "text", .. }));
    }

    #[test]
    fn test_card_payload_mismatch() {
        let err = decode_event(
            r#"{"type":"card","data":{"id":"c9","type":"line_chart","title":"x","source":"meraki","data":{"content":"oops"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidPayload { kind: "card", .. }));
    }

    #[test]
    fn test_encode_stop() {
        let frame = encode_command(&WsCommand::Stop {
            session_id: "default".into(),
        })
        .unwrap();
        assert_eq!(frame, r#"{"type":"stop","session_id":"default"}"#);
    }
}
