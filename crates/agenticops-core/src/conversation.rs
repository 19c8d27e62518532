// crates/agenticops-core/src/conversation.rs
// Conversation Store: transcript, tool-call ledger, processing state

use crate::config::ConversationConfig;
use crate::store::{SubscriptionId, Subscribers};
use agenticops_types::{TableData, ToolCall, ToolStatus};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Agent that was active when an assistant message was created
    pub agent: Option<String>,
    pub tables: Vec<TableData>,
}

impl Message {
    fn new(role: Role, content: String, agent: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            timestamp: Utc::now(),
            agent,
            tables: Vec::new(),
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// A tool call moved out of the active set at an agent boundary
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedToolCall {
    pub agent: Option<String>,
    pub call: ToolCall,
}

/// Read-only view handed to subscribers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub active_agent: Option<String>,
    pub active_tool_calls: Vec<ToolCall>,
    pub completed_tool_calls: Vec<ArchivedToolCall>,
    pub pending_tables: VecDeque<TableData>,
    pub is_processing: bool,
    pub processing_started_at: Option<DateTime<Utc>>,
    pub pending_prompt: Option<String>,
}

impl ConversationState {
    /// The most recent message, if it is an assistant message
    pub fn open_assistant(&self) -> Option<&Message> {
        self.messages.last().filter(|m| m.is_assistant())
    }

    /// Completed calls grouped by agent, in first-seen order
    pub fn completed_by_agent(&self) -> Vec<(Option<String>, Vec<ToolCall>)> {
        let mut groups: Vec<(Option<String>, Vec<ToolCall>)> = Vec::new();
        for entry in &self.completed_tool_calls {
            match groups.iter_mut().find(|(agent, _)| *agent == entry.agent) {
                Some((_, calls)) => calls.push(entry.call.clone()),
                None => groups.push((entry.agent.clone(), vec![entry.call.clone()])),
            }
        }
        groups
    }

    /// Time since the current turn started, if one is in progress
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.processing_started_at
            .and_then(|start| (now - start).to_std().ok())
    }
}

/// Transcript container; every mutation notifies subscribers
#[derive(Debug)]
pub struct ConversationStore {
    state: ConversationState,
    max_pending_tables: usize,
    subscribers: Subscribers<ConversationState>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(&ConversationConfig::default())
    }
}

impl ConversationStore {
    pub fn new(config: &ConversationConfig) -> Self {
        Self {
            state: ConversationState::default(),
            max_pending_tables: config.max_pending_tables.max(1),
            subscribers: Subscribers::default(),
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&ConversationState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn commit(&self) {
        self.subscribers.notify(&self.state);
    }

    // ═══════════════════════════════════════
    // TRANSCRIPT
    // ═══════════════════════════════════════

    /// Push a new message, closing any open assistant message. Returns its id.
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) -> String {
        let agent = match role {
            Role::Assistant => self.state.active_agent.clone(),
            Role::User => None,
        };
        let id = self.push_message(Message::new(role, content.into(), agent));
        self.commit();
        id
    }

    /// Append to the open assistant message, creating one if none is open
    pub fn append_to_last_assistant(&mut self, text: &str) {
        match self.state.messages.last_mut() {
            Some(last) if last.is_assistant() => last.content.push_str(text),
            _ => {
                let agent = self.state.active_agent.clone();
                self.push_message(Message::new(Role::Assistant, text.to_string(), agent));
            }
        }
        self.commit();
    }

    /// Attach to the open assistant message or hold until one is created
    pub fn attach_table_data(&mut self, table: TableData) {
        match self.state.messages.last_mut() {
            Some(last) if last.is_assistant() => last.tables.push(table),
            _ => {
                if self.state.pending_tables.len() >= self.max_pending_tables
                    && let Some(dropped) = self.state.pending_tables.pop_front()
                {
                    log::warn!(
                        "Pending table queue full, dropping {} ({} rows)",
                        dropped.table_id,
                        dropped.rows.len()
                    );
                }
                self.state.pending_tables.push_back(table);
            }
        }
        self.commit();
    }

    fn push_message(&mut self, mut message: Message) -> String {
        if message.is_assistant() && !self.state.pending_tables.is_empty() {
            message.tables.extend(self.state.pending_tables.drain(..));
        }
        let id = message.id.clone();
        self.state.messages.push(message);
        id
    }

    /// Drops the transcript and pending tables; tool-call and canvas state are untouched
    pub fn clear_messages(&mut self) {
        self.state.messages.clear();
        self.state.pending_tables.clear();
        self.commit();
    }

    // ═══════════════════════════════════════
    // AGENTS & TOOL CALLS
    // ═══════════════════════════════════════

    pub fn set_active_agent(&mut self, agent: Option<String>) {
        self.state.active_agent = agent;
        self.commit();
    }

    /// Active calls are keyed by tool name; a repeat call resets the entry
    pub fn add_tool_call(&mut self, call: ToolCall) {
        match self
            .state
            .active_tool_calls
            .iter_mut()
            .find(|tc| tc.tool == call.tool)
        {
            Some(existing) => *existing = call,
            None => self.state.active_tool_calls.push(call),
        }
        self.commit();
    }

    /// Marks the matching active entry in place. Returns false for a tool
    /// that is not in the active set; that call is ignored.
    pub fn update_tool_call(&mut self, tool: &str, status: ToolStatus) -> bool {
        let mut matched = false;
        for tc in self
            .state
            .active_tool_calls
            .iter_mut()
            .filter(|tc| tc.tool == tool)
        {
            tc.status = status;
            matched = true;
        }
        if matched {
            self.commit();
        }
        matched
    }

    /// Move the active set into the ledger tagged with the current agent
    pub fn archive_tool_calls(&mut self) {
        if self.state.active_tool_calls.is_empty() {
            return;
        }
        let agent = self.state.active_agent.clone();
        let archived = self
            .state
            .active_tool_calls
            .drain(..)
            .map(|call| ArchivedToolCall {
                agent: agent.clone(),
                call,
            });
        self.state.completed_tool_calls.extend(archived);
        self.commit();
    }

    /// Clears the active set only; the completed ledger is left alone
    pub fn clear_tool_calls(&mut self) {
        self.state.active_tool_calls.clear();
        self.commit();
    }

    // ═══════════════════════════════════════
    // PROCESSING
    // ═══════════════════════════════════════

    /// `true` opens a turn and stamps its start time. `false` clears the
    /// timer and flushes the completed ledger.
    pub fn set_processing(&mut self, processing: bool) {
        if processing {
            if !self.state.is_processing {
                self.state.processing_started_at = Some(Utc::now());
            }
        } else {
            self.state.processing_started_at = None;
            self.state.completed_tool_calls.clear();
        }
        self.state.is_processing = processing;
        self.commit();
    }

    // ═══════════════════════════════════════
    // PROMPT HAND-OFF
    // ═══════════════════════════════════════

    /// Pre-fill the chat input (from the help menu)
    pub fn set_pending_prompt(&mut self, prompt: Option<String>) {
        self.state.pending_prompt = prompt;
        self.commit();
    }

    /// Consume the pending prompt, leaving none behind
    pub fn take_pending_prompt(&mut self) -> Option<String> {
        let prompt = self.state.pending_prompt.take();
        if prompt.is_some() {
            self.commit();
        }
        prompt
    }
}
