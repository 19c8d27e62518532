// crates/agenticops-core/src/detail.rs
// Hover detail overlay for interactive table rows
//
// Single slot: opening another row replaces the overlay, re-clicking the
// same row closes it. Stats results are matched by request token so a
// late response for a closed or replaced overlay is discarded.

use crate::config::PopupConfig;
use crate::error::StatsError;
use crate::store::{SubscriptionId, Subscribers};
use agenticops_types::{
    Card, CardPayload, DataSource, EntityStats, HealthMetric, MetricIcon, NetworkHealthPayload,
    TableData, TableRow,
};

/// Viewport-relative rectangle of the clicked row
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
}

/// Prefer the right of the row, flip left on overflow, then clamp into the viewport
pub fn popup_placement(anchor: &Rect, viewport: Viewport, cfg: &PopupConfig) -> Placement {
    let mut left = anchor.right + cfg.gap;
    if left + cfg.width > viewport.width - cfg.margin {
        left = anchor.left - cfg.width - cfg.gap;
    }
    if left < cfg.margin {
        left = cfg.margin;
    }

    let mut top = anchor.top;
    if top + cfg.estimated_height > viewport.height - cfg.margin {
        top = (viewport.height - cfg.estimated_height - cfg.margin).max(cfg.margin);
    }
    if top < cfg.margin {
        top = cfg.margin;
    }

    Placement { left, top }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Loaded(EntityStats),
    Failed(StatsError),
}

/// A lookup the caller must perform and report back through `resolve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    pub token: RequestToken,
    pub entity_type: String,
    pub entity_id: String,
}

impl StatsRequest {
    /// `{base}/entity/{entityType}/{entityId}/stats`
    pub fn path(&self, api_base: &str) -> String {
        format!(
            "{}/entity/{}/{}/stats",
            api_base.trim_end_matches('/'),
            urlencoding::encode(&self.entity_type),
            urlencoding::encode(&self.entity_id)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenDetail {
    pub table_id: String,
    pub row_index: usize,
    pub row: TableRow,
    pub entity_type: String,
    pub source: DataSource,
    pub anchor: Rect,
    pub token: RequestToken,
    pub fetch: FetchState,
}

impl OpenDetail {
    /// First cell of the row, falling back to the entity id
    pub fn display_name(&self) -> &str {
        self.row
            .cells
            .first()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.row.metadata.network_id)
    }
}

#[derive(Debug, Default)]
pub struct DetailOverlay {
    open: Option<OpenDetail>,
    next_token: u64,
    subscribers: Subscribers<Option<OpenDetail>>,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&OpenDetail> {
        self.open.as_ref()
    }

    pub fn is_open_for(&self, table_id: &str, row_index: usize) -> bool {
        self.open
            .as_ref()
            .is_some_and(|o| o.table_id == table_id && o.row_index == row_index)
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&Option<OpenDetail>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    fn commit(&self) {
        self.subscribers.notify(&self.open);
    }

    /// Row click. Returns the lookup to issue, if any.
    pub fn toggle(
        &mut self,
        table: &TableData,
        row_index: usize,
        anchor: Rect,
    ) -> Option<StatsRequest> {
        if self.is_open_for(&table.table_id, row_index) {
            self.close();
            return None;
        }

        let Some(row) = table.rows.get(row_index) else {
            log::warn!("Row {} out of range for table {}", row_index, table.table_id);
            return None;
        };

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        let entity_id = row.metadata.network_id.clone();

        let (fetch, request) = if entity_id.is_empty() {
            (FetchState::Failed(StatsError::MissingEntityId), None)
        } else {
            let request = StatsRequest {
                token,
                entity_type: table.entity_type.clone(),
                entity_id,
            };
            (FetchState::Loading, Some(request))
        };

        self.open = Some(OpenDetail {
            table_id: table.table_id.clone(),
            row_index,
            row: row.clone(),
            entity_type: table.entity_type.clone(),
            source: table.source,
            anchor,
            token,
            fetch,
        });
        self.commit();
        request
    }

    pub fn close(&mut self) {
        if self.open.take().is_some() {
            self.commit();
        }
    }

    /// Deliver a lookup result. Returns false when it was stale and dropped.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        result: std::result::Result<EntityStats, StatsError>,
    ) -> bool {
        match self.open.as_mut() {
            Some(open) if open.token == token && open.fetch == FetchState::Loading => {
                open.fetch = match result {
                    Ok(stats) => FetchState::Loaded(stats),
                    Err(e) => {
                        log::debug!("Stats lookup failed: {}", e);
                        FetchState::Failed(e)
                    }
                };
                self.commit();
                true
            }
            _ => {
                log::debug!("Dropping stale stats result {:?}", token);
                false
            }
        }
    }

    /// Snapshot the open row into a health card. The overlay stays open
    /// until the caller has placed the card.
    pub fn materialize(&self, now_millis: i64) -> Option<Card> {
        self.open
            .as_ref()
            .map(|open| snapshot_card(open, now_millis))
    }
}

fn snapshot_card(open: &OpenDetail, now_millis: i64) -> Card {
    let meta = &open.row.metadata;
    let mut metrics = Vec::new();

    if let FetchState::Loaded(stats) = &open.fetch {
        metrics.push(HealthMetric::healthy("Devices", stats.device_count.to_string()));
        metrics.push(HealthMetric::healthy("Clients", stats.client_count.to_string()));
        metrics.push(HealthMetric::healthy("SSIDs", stats.ssid_count.to_string()));
    }
    if let Some(tz) = meta.time_zone.as_deref().filter(|s| !s.is_empty()) {
        metrics.push(HealthMetric::healthy("Time Zone", tz));
    }
    if let Some(types) = meta.product_types.as_ref().filter(|v| !v.is_empty()) {
        metrics.push(HealthMetric::healthy("Product Types", types.join(", ")));
    }
    if let Some(tags) = meta.tags.as_ref().filter(|v| !v.is_empty()) {
        metrics.push(HealthMetric::healthy("Tags", tags.join(", ")).with_icon(MetricIcon::Globe));
    }
    if let Some(notes) = meta.notes.as_deref().filter(|s| !s.is_empty()) {
        metrics.push(HealthMetric::healthy("Notes", notes));
    }
    metrics.push(
        HealthMetric::healthy("Network ID", meta.network_id.clone()).with_icon(MetricIcon::Server),
    );

    Card::new(
        format!("card-{}-{}", meta.network_id, now_millis),
        open.display_name(),
        open.source,
        CardPayload::NetworkHealth(NetworkHealthPayload { metrics }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenticops_types::{CardKind, RowMetadata};

    fn table() -> TableData {
        TableData {
            table_id: "tbl-1".into(),
            entity_type: "network".into(),
            source: DataSource::Meraki,
            columns: vec!["Name".into(), "Time Zone".into()],
            rows: vec![
                TableRow {
                    id: "N_1".into(),
                    cells: vec!["HQ".into(), "America/Chicago".into()],
                    metadata: RowMetadata {
                        network_id: "N_1".into(),
                        time_zone: Some("America/Chicago".into()),
                        tags: Some(vec!["prod".into(), "hq".into()]),
                        product_types: Some(vec![]),
                        ..Default::default()
                    },
                },
                TableRow {
                    id: "r2".into(),
                    cells: vec!["".into()],
                    metadata: RowMetadata::default(),
                },
            ],
        }
    }

    fn stats() -> EntityStats {
        EntityStats {
            device_count: 4,
            client_count: 37,
            ssid_count: 2,
        }
    }

    // ============================================================================
    // Placement
    // ============================================================================

    #[test]
    fn test_placement_prefers_right() {
        let anchor = Rect {
            left: 100.0,
            top: 200.0,
            right: 400.0,
            bottom: 230.0,
        };
        let p = popup_placement(
            &anchor,
            Viewport {
                width: 1400.0,
                height: 900.0,
            },
            &PopupConfig::default(),
        );
        assert_eq!(p, Placement { left: 408.0, top: 200.0 });
    }

    #[test]
    fn test_placement_flips_left_on_overflow() {
        let anchor = Rect {
            left: 700.0,
            top: 100.0,
            right: 1000.0,
            bottom: 130.0,
        };
        let p = popup_placement(
            &anchor,
            Viewport {
                width: 1200.0,
                height: 900.0,
            },
            &PopupConfig::default(),
        );
        assert_eq!(p.left, 700.0 - 320.0 - 8.0);
    }

    #[test]
    fn test_placement_clamps_both_axes() {
        let anchor = Rect {
            left: 10.0,
            top: 700.0,
            right: 300.0,
            bottom: 730.0,
        };
        let p = popup_placement(
            &anchor,
            Viewport {
                width: 500.0,
                height: 800.0,
            },
            &PopupConfig::default(),
        );
        assert_eq!(p.left, 16.0);
        assert_eq!(p.top, 800.0 - 340.0 - 16.0);
    }

    #[test]
    fn test_placement_tiny_viewport_keeps_margin() {
        let p = popup_placement(
            &Rect::default(),
            Viewport {
                width: 100.0,
                height: 100.0,
            },
            &PopupConfig::default(),
        );
        assert_eq!(p, Placement { left: 16.0, top: 16.0 });
    }

    // ============================================================================
    // Toggle & fetch lifecycle
    // ============================================================================

    #[test]
    fn test_toggle_opens_and_requests() {
        let mut overlay = DetailOverlay::new();
        let req = overlay.toggle(&table(), 0, Rect::default()).unwrap();
        assert_eq!(req.entity_id, "N_1");
        assert_eq!(req.path("/api"), "/api/entity/network/N_1/stats");
        assert_eq!(overlay.current().unwrap().fetch, FetchState::Loading);
    }

    #[test]
    fn test_request_path_is_encoded() {
        let req = StatsRequest {
            token: RequestToken(1),
            entity_type: "network".into(),
            entity_id: "L_1/2 3".into(),
        };
        assert_eq!(req.path("/api/"), "/api/entity/network/L_1%2F2%203/stats");
    }

    #[test]
    fn test_toggle_same_row_closes() {
        let mut overlay = DetailOverlay::new();
        overlay.toggle(&table(), 0, Rect::default());
        assert!(overlay.toggle(&table(), 0, Rect::default()).is_none());
        assert!(overlay.current().is_none());
    }

    #[test]
    fn test_new_row_replaces_and_stales_old_result() {
        let mut overlay = DetailOverlay::new();
        let first = overlay.toggle(&table(), 0, Rect::default()).unwrap();

        let mut other = table();
        other.table_id = "tbl-2".into();
        let second = overlay.toggle(&other, 0, Rect::default()).unwrap();
        assert_ne!(first.token, second.token);

        assert!(!overlay.resolve(first.token, Ok(stats())));
        assert_eq!(overlay.current().unwrap().fetch, FetchState::Loading);
        assert!(overlay.resolve(second.token, Ok(stats())));
        assert_eq!(overlay.current().unwrap().fetch, FetchState::Loaded(stats()));
    }

    #[test]
    fn test_result_after_close_dropped() {
        let mut overlay = DetailOverlay::new();
        let req = overlay.toggle(&table(), 0, Rect::default()).unwrap();
        overlay.close();
        assert!(!overlay.resolve(req.token, Ok(stats())));
        assert!(overlay.current().is_none());
    }

    #[test]
    fn test_missing_network_id_fails_locally() {
        let mut overlay = DetailOverlay::new();
        assert!(overlay.toggle(&table(), 1, Rect::default()).is_none());
        let open = overlay.current().unwrap();
        assert_eq!(open.fetch, FetchState::Failed(StatsError::MissingEntityId));
    }

    #[test]
    fn test_fetch_failure_is_local_state() {
        let mut overlay = DetailOverlay::new();
        let req = overlay.toggle(&table(), 0, Rect::default()).unwrap();
        assert!(overlay.resolve(req.token, Err(StatsError::Status(500))));
        assert_eq!(
            overlay.current().unwrap().fetch,
            FetchState::Failed(StatsError::Status(500))
        );
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut overlay = DetailOverlay::new();
        assert!(overlay.toggle(&table(), 9, Rect::default()).is_none());
        assert!(overlay.current().is_none());
    }

    // ============================================================================
    // Materialize
    // ============================================================================

    #[test]
    fn test_materialize_with_stats() {
        let mut overlay = DetailOverlay::new();
        let req = overlay.toggle(&table(), 0, Rect::default()).unwrap();
        overlay.resolve(req.token, Ok(stats()));

        let card = overlay.materialize(1_700_000_000_000).unwrap();
        assert!(overlay.current().is_some());
        assert_eq!(card.id, "card-N_1-1700000000000");
        assert_eq!(card.title, "HQ");
        assert_eq!(card.kind(), CardKind::NetworkHealth);

        let CardPayload::NetworkHealth(payload) = card.payload() else {
            panic!("expected network health payload");
        };
        let labels: Vec<_> = payload.metrics.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Devices", "Clients", "SSIDs", "Time Zone", "Tags", "Network ID"]
        );
        assert_eq!(payload.metrics[1].value, "37");
        assert_eq!(payload.metrics[4].value, "prod, hq");
        assert_eq!(payload.metrics[4].icon, Some(MetricIcon::Globe));
        assert_eq!(payload.metrics[5].icon, Some(MetricIcon::Server));
    }

    #[test]
    fn test_materialize_without_stats() {
        let mut overlay = DetailOverlay::new();
        overlay.toggle(&table(), 0, Rect::default());
        let card = overlay.materialize(1).unwrap();
        let CardPayload::NetworkHealth(payload) = card.payload() else {
            panic!("expected network health payload");
        };
        assert_eq!(payload.metrics[0].label, "Time Zone");
    }

    #[test]
    fn test_materialize_nothing_open() {
        let overlay = DetailOverlay::new();
        assert!(overlay.materialize(1).is_none());
    }
}
