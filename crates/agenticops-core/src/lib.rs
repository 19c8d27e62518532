// crates/agenticops-core/src/lib.rs
// AgenticOps console state engine
//
// Everything here is browser-independent so the ordering and attachment
// rules can be tested natively. The Leptos app binds it to the DOM.

pub mod canvas;
pub mod cards;
pub mod chart;
pub mod config;
pub mod connection;
pub mod conversation;
pub mod detail;
pub mod error;
pub mod format;
pub mod prompts;
pub mod protocol;
pub mod router;
pub mod session;
pub mod store;
pub mod transcript;

pub use canvas::{CanvasEdge, CanvasNode, CanvasState, CanvasStore, NodeChange, Position};
pub use config::ConsoleConfig;
pub use connection::{ChannelLifecycle, ConnectionStatus, ReconnectTicket};
pub use conversation::{ConversationState, ConversationStore, Message, Role};
pub use detail::{DetailOverlay, FetchState, OpenDetail, StatsRequest};
pub use error::{ConsoleError, Result, StatsError};
pub use router::EventRouter;
pub use session::ConsoleSession;
