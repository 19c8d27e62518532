// crates/agenticops-types/src/lib.rs
// Shared wire types for the AgenticOps console (native + WASM compatible)
// No native-only dependencies allowed here

use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════
// DATA SOURCES
// ═══════════════════════════════════════

/// Upstream integration a tool call, card or table originates from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Meraki,
    Thousandeyes,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Meraki => "meraki",
            DataSource::Thousandeyes => "thousandeyes",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════
// AGENTS & TOOL CALLS
// ═══════════════════════════════════════

/// `agent_start` payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentStart {
    pub agent: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Running,
    Complete,
}

/// A backend tool invocation, as carried by `tool_call` events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCall {
    pub tool: String,
    pub source: DataSource,
    pub status: ToolStatus,
}

impl ToolCall {
    pub fn running(tool: impl Into<String>, source: DataSource) -> Self {
        Self {
            tool: tool.into(),
            source,
            status: ToolStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == ToolStatus::Running
    }
}

// ═══════════════════════════════════════
// CARDS
// ═══════════════════════════════════════

/// Closed set of card variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    DataTable,
    BarChart,
    LineChart,
    AlertSummary,
    TextReport,
    NetworkHealth,
}

impl CardKind {
    pub const ALL: [CardKind; 6] = [
        CardKind::DataTable,
        CardKind::BarChart,
        CardKind::LineChart,
        CardKind::AlertSummary,
        CardKind::TextReport,
        CardKind::NetworkHealth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::DataTable => "data_table",
            CardKind::BarChart => "bar_chart",
            CardKind::LineChart => "line_chart",
            CardKind::AlertSummary => "alert_summary",
            CardKind::TextReport => "text_report",
            CardKind::NetworkHealth => "network_health",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataTablePayload {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default)]
    pub color: String,
}

/// Shared by bar and line charts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPayload {
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Critical => "critical",
            AlertSeverity::High => "high",
            AlertSeverity::Medium => "medium",
            AlertSeverity::Low => "low",
            AlertSeverity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertItem {
    pub severity: AlertSeverity,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertSummaryPayload {
    #[serde(default)]
    pub alerts: Vec<AlertItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextReportPayload {
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricIcon {
    Wifi,
    Server,
    Shield,
    Globe,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthMetric {
    pub label: String,
    pub value: String,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<MetricIcon>,
}

impl HealthMetric {
    pub fn healthy(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            status: HealthStatus::Healthy,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: MetricIcon) -> Self {
        self.icon = Some(icon);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkHealthPayload {
    #[serde(default)]
    pub metrics: Vec<HealthMetric>,
}

/// Variant-specific card body; the shape is fixed per [`CardKind`]
#[derive(Debug, Clone, PartialEq)]
pub enum CardPayload {
    DataTable(DataTablePayload),
    BarChart(ChartPayload),
    LineChart(ChartPayload),
    AlertSummary(AlertSummaryPayload),
    TextReport(TextReportPayload),
    NetworkHealth(NetworkHealthPayload),
}

impl CardPayload {
    pub fn kind(&self) -> CardKind {
        match self {
            CardPayload::DataTable(_) => CardKind::DataTable,
            CardPayload::BarChart(_) => CardKind::BarChart,
            CardPayload::LineChart(_) => CardKind::LineChart,
            CardPayload::AlertSummary(_) => CardKind::AlertSummary,
            CardPayload::TextReport(_) => CardKind::TextReport,
            CardPayload::NetworkHealth(_) => CardKind::NetworkHealth,
        }
    }

    /// Decode the `data` object of a card event according to its kind
    pub fn from_value(kind: CardKind, data: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            CardKind::DataTable => CardPayload::DataTable(serde_json::from_value(data)?),
            CardKind::BarChart => CardPayload::BarChart(serde_json::from_value(data)?),
            CardKind::LineChart => CardPayload::LineChart(serde_json::from_value(data)?),
            CardKind::AlertSummary => CardPayload::AlertSummary(serde_json::from_value(data)?),
            CardKind::TextReport => CardPayload::TextReport(serde_json::from_value(data)?),
            CardKind::NetworkHealth => CardPayload::NetworkHealth(serde_json::from_value(data)?),
        })
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            CardPayload::DataTable(p) => serde_json::to_value(p),
            CardPayload::BarChart(p) | CardPayload::LineChart(p) => serde_json::to_value(p),
            CardPayload::AlertSummary(p) => serde_json::to_value(p),
            CardPayload::TextReport(p) => serde_json::to_value(p),
            CardPayload::NetworkHealth(p) => serde_json::to_value(p),
        }
    }
}

/// A spatial artifact placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub source: DataSource,
    pub collapsed: bool,
    payload: CardPayload,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        source: DataSource,
        payload: CardPayload,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source,
            collapsed: false,
            payload,
        }
    }

    /// The variant is fixed at construction; there is no setter
    pub fn kind(&self) -> CardKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &CardPayload {
        &self.payload
    }
}

/// Wire form of a card: `{id, type, title, source, data}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardEnvelope {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CardKind,
    pub title: String,
    pub source: DataSource,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl TryFrom<CardEnvelope> for Card {
    type Error = serde_json::Error;

    fn try_from(envelope: CardEnvelope) -> Result<Self, Self::Error> {
        let payload = CardPayload::from_value(envelope.kind, envelope.data)?;
        Ok(Card::new(envelope.id, envelope.title, envelope.source, payload))
    }
}

impl TryFrom<&Card> for CardEnvelope {
    type Error = serde_json::Error;

    fn try_from(card: &Card) -> Result<Self, Self::Error> {
        Ok(CardEnvelope {
            id: card.id.clone(),
            kind: card.kind(),
            title: card.title.clone(),
            source: card.source,
            data: card.payload.to_value()?,
        })
    }
}

// ═══════════════════════════════════════
// TABLE DATA (row-level drill-down)
// ═══════════════════════════════════════

/// Per-row metadata used for drill-down lookups
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RowMetadata {
    #[serde(default)]
    pub network_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    #[serde(default)]
    pub cells: Vec<String>,
    #[serde(default)]
    pub metadata: RowMetadata,
}

/// `table_data` payload: a table that decorates an assistant message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableData {
    pub table_id: String,
    pub entity_type: String,
    pub source: DataSource,
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

// ═══════════════════════════════════════
// WEBSOCKET EVENTS
// ═══════════════════════════════════════

/// Untyped inbound frame `{type, data}`; decoded per kind by the console core
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawFrame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// `done` payload; `stopped` is set when the turn ended because of a stop command
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoneInfo {
    #[serde(default)]
    pub stopped: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorInfo {
    #[serde(default)]
    pub message: Option<String>,
}

/// Typed inbound protocol event
#[derive(Debug, Clone, PartialEq)]
pub enum WsEvent {
    AgentStart(AgentStart),
    ToolCall(ToolCall),
    Text(String),
    Card(Card),
    TableData(TableData),
    Done(DoneInfo),
    Error(ErrorInfo),
}

impl WsEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WsEvent::AgentStart(_) => "agent_start",
            WsEvent::ToolCall(_) => "tool_call",
            WsEvent::Text(_) => "text",
            WsEvent::Card(_) => "card",
            WsEvent::TableData(_) => "table_data",
            WsEvent::Done(_) => "done",
            WsEvent::Error(_) => "error",
        }
    }
}

/// Outbound command (client -> backend)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsCommand {
    UserMessage { content: String, session_id: String },
    Stop { session_id: String },
}

// ═══════════════════════════════════════
// HTTP API
// ═══════════════════════════════════════

/// `GET /api/entity/{entityType}/{networkId}/stats`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntityStats {
    pub device_count: u64,
    pub client_count: u64,
    pub ssid_count: u64,
}

/// `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub meraki_connected: bool,
    pub meraki_tools: u32,
    pub thousandeyes_connected: bool,
    pub thousandeyes_tools: u32,
    pub total_tools: u32,
}
