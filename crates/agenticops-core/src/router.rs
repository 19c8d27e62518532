// crates/agenticops-core/src/router.rs
// Event Router: single-consumer queue drained in arrival order

use crate::canvas::CanvasStore;
use crate::conversation::ConversationStore;
use crate::format::format_error_notice;
use agenticops_types::{ToolStatus, WsEvent};
use std::collections::VecDeque;

/// Inbound events waiting to be applied. Nothing is reordered or batched;
/// each event becomes exactly one step of store mutations.
#[derive(Debug, Default)]
pub struct EventRouter {
    queue: VecDeque<WsEvent>,
    dispatched: u64,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, event: WsEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Total events applied since creation
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Apply every queued event in FIFO order
    pub fn drain(&mut self, conversation: &mut ConversationStore, canvas: &mut CanvasStore) {
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event, conversation, canvas);
        }
    }

    pub fn dispatch(
        &mut self,
        event: WsEvent,
        conversation: &mut ConversationStore,
        canvas: &mut CanvasStore,
    ) {
        self.dispatched += 1;
        log::trace!("Dispatching {} event #{}", event.kind(), self.dispatched);

        match event {
            WsEvent::AgentStart(start) => {
                // Archive under the previous agent before switching
                conversation.archive_tool_calls();
                conversation.set_active_agent(Some(start.agent));
            }
            WsEvent::ToolCall(call) => match call.status {
                ToolStatus::Running => conversation.add_tool_call(call),
                ToolStatus::Complete => {
                    if !conversation.update_tool_call(&call.tool, ToolStatus::Complete) {
                        log::debug!("Completion for unseen tool {} ignored", call.tool);
                    }
                }
            },
            WsEvent::Text(chunk) => conversation.append_to_last_assistant(&chunk),
            WsEvent::Card(card) => {
                let id = card.id.clone();
                if let Err(e) = canvas.add_card(card) {
                    log::warn!("Card {} not placed: {}", id, e);
                }
            }
            WsEvent::TableData(table) => conversation.attach_table_data(table),
            WsEvent::Done(info) => {
                if info.stopped {
                    log::info!("Turn stopped by user");
                }
                // Flush the old ledger first so this turn's calls stay visible
                conversation.set_processing(false);
                conversation.archive_tool_calls();
                conversation.set_active_agent(None);
            }
            WsEvent::Error(info) => {
                let notice = format_error_notice(info.message.as_deref());
                conversation.append_to_last_assistant(&notice);
            }
        }
    }
}
