// crates/agenticops-core/src/session.rs
// One console session: both stores, the overlay, the channel lifecycle and
// the outbound queue, wired to a single event router

use crate::canvas::CanvasStore;
use crate::config::ConsoleConfig;
use crate::connection::{ChannelLifecycle, ReconnectTicket};
use crate::conversation::{ConversationStore, Role};
use crate::detail::{DetailOverlay, Rect, RequestToken, StatsRequest};
use crate::error::{ConsoleError, Result, StatsError};
use crate::format::format_error_notice;
use crate::protocol::{decode_event, encode_command};
use crate::router::EventRouter;
use agenticops_types::{EntityStats, TableData, WsCommand, WsEvent};
use std::collections::VecDeque;

#[derive(Debug)]
pub struct ConsoleSession {
    config: ConsoleConfig,
    pub conversation: ConversationStore,
    pub canvas: CanvasStore,
    pub detail: DetailOverlay,
    pub channel: ChannelLifecycle,
    router: EventRouter,
    outbox: VecDeque<WsCommand>,
    // The running turn's message has reached a socket
    turn_sent: bool,
}

impl Default for ConsoleSession {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl ConsoleSession {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            conversation: ConversationStore::new(&config.conversation),
            canvas: CanvasStore::new(config.canvas.clone()),
            detail: DetailOverlay::new(),
            channel: ChannelLifecycle::new(config.reconnect_delay()),
            router: EventRouter::new(),
            outbox: VecDeque::new(),
            turn_sent: false,
            config,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    // ═══════════════════════════════════════
    // INBOUND
    // ═══════════════════════════════════════

    /// Handle one text frame from the socket. Malformed frames are dropped.
    pub fn receive_frame(&mut self, frame: &str) {
        match decode_event(frame) {
            Ok(event) => self.receive_event(event),
            Err(e) => log::debug!("Dropping inbound frame: {}", e),
        }
    }

    pub fn receive_event(&mut self, event: WsEvent) {
        self.router.enqueue(event);
        self.router.drain(&mut self.conversation, &mut self.canvas);
    }

    /// The socket closed. A turn that was running on it will never see its
    /// `done`, so it is ended here and the input unlocks after reconnect.
    /// A turn still waiting in the outbox is kept for the next socket.
    pub fn on_channel_closed(&mut self) -> Option<ReconnectTicket> {
        let ticket = self.channel.on_close();
        if self.turn_sent && self.conversation.state().is_processing {
            self.turn_sent = false;
            log::warn!("Connection lost mid-turn; ending the turn");
            self.conversation
                .append_to_last_assistant(&format_error_notice(Some("Connection lost")));
            self.conversation.set_processing(false);
            self.conversation.archive_tool_calls();
            self.conversation.set_active_agent(None);
            // A stop for the lost turn has nothing to cancel on the next socket
            self.outbox.retain(|cmd| !matches!(cmd, WsCommand::Stop { .. }));
        }
        ticket
    }

    // ═══════════════════════════════════════
    // OUTBOUND
    // ═══════════════════════════════════════

    /// Record the user's message and queue it for the backend.
    /// Blank input is ignored; a second submit during a turn is refused.
    pub fn submit(&mut self, text: &str) -> Result<bool> {
        let content = text.trim();
        if content.is_empty() {
            return Ok(false);
        }
        if self.conversation.state().is_processing {
            return Err(ConsoleError::Busy);
        }

        self.conversation.add_message(Role::User, content);
        self.conversation.set_processing(true);
        self.turn_sent = false;
        self.outbox.push_back(WsCommand::UserMessage {
            content: content.to_string(),
            session_id: self.config.channel.session_id.clone(),
        });
        Ok(true)
    }

    /// Queue a cancellation for the running turn; no-op when idle
    pub fn stop(&mut self) -> bool {
        if !self.conversation.state().is_processing {
            return false;
        }
        self.outbox.push_back(WsCommand::Stop {
            session_id: self.config.channel.session_id.clone(),
        });
        true
    }

    pub fn has_outbound(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Encoded frames ready to send. Empty until the channel is connected;
    /// queued commands wait for the next successful connect.
    pub fn take_outbox(&mut self) -> Vec<String> {
        if !self.channel.can_send() {
            return Vec::new();
        }
        if self
            .outbox
            .iter()
            .any(|cmd| matches!(cmd, WsCommand::UserMessage { .. }))
        {
            self.turn_sent = true;
        }
        self.outbox
            .drain(..)
            .filter_map(|cmd| match encode_command(&cmd) {
                Ok(frame) => Some(frame),
                Err(e) => {
                    log::warn!("Failed to encode command: {}", e);
                    None
                }
            })
            .collect()
    }

    // ═══════════════════════════════════════
    // USER ACTIONS
    // ═══════════════════════════════════════

    /// Row click on an interactive table
    pub fn toggle_detail(
        &mut self,
        table: &TableData,
        row_index: usize,
        anchor: Rect,
    ) -> Option<StatsRequest> {
        self.detail.toggle(table, row_index, anchor)
    }

    pub fn resolve_detail(
        &mut self,
        token: RequestToken,
        result: std::result::Result<EntityStats, StatsError>,
    ) -> bool {
        self.detail.resolve(token, result)
    }

    /// URL path for a stats lookup under the configured API base
    pub fn stats_path(&self, request: &StatsRequest) -> String {
        request.path(&self.config.api.base_path)
    }

    /// Turn the open overlay into a canvas card. Returns the new card id.
    pub fn materialize_detail(&mut self, now_millis: i64) -> Result<Option<String>> {
        let Some(card) = self.detail.materialize(now_millis) else {
            return Ok(None);
        };
        let id = card.id.clone();
        // A rejected card leaves the overlay open for another try
        self.canvas.add_card(card)?;
        self.detail.close();
        log::info!("Materialized detail card {}", id);
        Ok(Some(id))
    }

    pub fn select_prompt(&mut self, prompt: &str) {
        self.conversation.set_pending_prompt(Some(prompt.to_string()));
    }

    /// Clears the transcript only; the canvas keeps its cards
    pub fn clear_chat(&mut self) {
        self.conversation.clear_messages();
        self.detail.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> ConsoleSession {
        let mut session = ConsoleSession::default();
        session.channel.begin_connect();
        session.channel.on_open();
        session
    }

    #[test]
    fn test_submit_records_and_queues() {
        let mut session = connected();
        assert!(session.submit("  List all my networks ").unwrap());

        let state = session.conversation.state();
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].content, "List all my networks");
        assert!(state.is_processing);

        let frames = session.take_outbox();
        assert_eq!(
            frames,
            vec![r#"{"type":"user_message","content":"List all my networks","session_id":"default"}"#]
        );
        assert!(!session.has_outbound());
    }

    #[test]
    fn test_submit_blank_ignored() {
        let mut session = connected();
        assert!(!session.submit("   ").unwrap());
        assert!(session.conversation.state().messages.is_empty());
        assert!(!session.has_outbound());
    }

    #[test]
    fn test_submit_while_processing_refused() {
        let mut session = connected();
        session.submit("first").unwrap();
        assert!(matches!(session.submit("second"), Err(ConsoleError::Busy)));
        assert_eq!(session.conversation.state().messages.len(), 1);
    }

    #[test]
    fn test_outbox_held_until_connected() {
        let mut session = ConsoleSession::default();
        session.submit("hello").unwrap();
        assert!(session.take_outbox().is_empty());
        assert!(session.has_outbound());

        session.channel.begin_connect();
        session.channel.on_open();
        assert_eq!(session.take_outbox().len(), 1);
    }

    #[test]
    fn test_stop_only_when_processing() {
        let mut session = connected();
        assert!(!session.stop());
        session.submit("go").unwrap();
        session.take_outbox();
        assert!(session.stop());
        assert_eq!(
            session.take_outbox(),
            vec![r#"{"type":"stop","session_id":"default"}"#]
        );
    }

    #[test]
    fn test_malformed_frames_dropped() {
        let mut session = connected();
        session.receive_frame("{{{");
        session.receive_frame(r#"{"type":"mystery","data":1}"#);
        session.receive_frame(r#"{"type":"text","data":42}"#);
        session.receive_frame(r#"{"type":"text","data":"ok"}"#);
        assert_eq!(session.conversation.state().messages.len(), 1);
        assert_eq!(session.conversation.state().messages[0].content, "ok");
    }

    #[test]
    fn test_select_prompt_sets_pending() {
        let mut session = ConsoleSession::default();
        session.select_prompt("Why is WiFi slow?");
        assert_eq!(
            session.conversation.take_pending_prompt().as_deref(),
            Some("Why is WiFi slow?")
        );
    }
}
