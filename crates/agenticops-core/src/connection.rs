// crates/agenticops-core/src/connection.rs
// Connection Channel lifecycle: status transitions and reconnect scheduling
//
// The browser binding owns the socket and the timer; this state machine
// decides what each socket callback means.

use crate::store::{SubscriptionId, Subscribers};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    #[default]
    Disconnected,
    Error,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Error => "error",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled reconnect. Only the most recent ticket may be claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectTicket {
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug)]
pub struct ChannelLifecycle {
    status: ConnectionStatus,
    reconnect_delay: Duration,
    generation: u64,
    pending_reconnect: Option<u64>,
    torn_down: bool,
    subscribers: Subscribers<ConnectionStatus>,
}

impl ChannelLifecycle {
    pub fn new(reconnect_delay: Duration) -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            reconnect_delay,
            generation: 0,
            pending_reconnect: None,
            torn_down: false,
            subscribers: Subscribers::default(),
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn can_send(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&ConnectionStatus) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    fn transition(&mut self, next: ConnectionStatus) {
        if self.status != next {
            log::info!("Channel {} -> {}", self.status, next);
            self.status = next;
            self.subscribers.notify(&self.status);
        }
    }

    /// Returns true when the caller should open a socket. A call while
    /// connected or already connecting is a no-op.
    pub fn begin_connect(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        match self.status {
            ConnectionStatus::Connected | ConnectionStatus::Connecting => false,
            ConnectionStatus::Disconnected | ConnectionStatus::Error => {
                self.pending_reconnect = None;
                self.transition(ConnectionStatus::Connecting);
                true
            }
        }
    }

    pub fn on_open(&mut self) {
        if !self.torn_down {
            self.transition(ConnectionStatus::Connected);
        }
    }

    /// Socket closed. Returns the reconnect to schedule, if any.
    pub fn on_close(&mut self) -> Option<ReconnectTicket> {
        if self.torn_down {
            return None;
        }
        self.transition(ConnectionStatus::Disconnected);
        Some(self.schedule_reconnect())
    }

    /// Transport failure. The close that follows still schedules the reconnect.
    pub fn on_error(&mut self) {
        if !self.torn_down {
            self.transition(ConnectionStatus::Error);
        }
    }

    /// The socket could not even be constructed; no close event will follow
    pub fn on_connect_failed(&mut self) -> Option<ReconnectTicket> {
        if self.torn_down {
            return None;
        }
        self.transition(ConnectionStatus::Error);
        Some(self.schedule_reconnect())
    }

    fn schedule_reconnect(&mut self) -> ReconnectTicket {
        self.generation += 1;
        self.pending_reconnect = Some(self.generation);
        log::info!(
            "Reconnecting in {}ms (attempt #{})",
            self.reconnect_delay.as_millis(),
            self.generation
        );
        ReconnectTicket {
            generation: self.generation,
            delay: self.reconnect_delay,
        }
    }

    /// Called when a reconnect timer fires. Stale or cancelled tickets are
    /// refused; a valid one proceeds exactly like `begin_connect`.
    pub fn claim_reconnect(&mut self, ticket: ReconnectTicket) -> bool {
        if self.torn_down || self.pending_reconnect != Some(ticket.generation) {
            log::debug!("Ignoring stale reconnect #{}", ticket.generation);
            return false;
        }
        self.pending_reconnect = None;
        self.begin_connect()
    }

    /// Cancel any pending reconnect and refuse further connects
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.pending_reconnect = None;
        self.transition(ConnectionStatus::Disconnected);
    }
}
