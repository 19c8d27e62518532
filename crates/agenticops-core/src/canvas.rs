// crates/agenticops-core/src/canvas.rs
// Canvas Store: cards, their spatial nodes, and structural edges

use crate::cards::card_meta;
use crate::config::CanvasConfig;
use crate::error::{ConsoleError, Result};
use crate::store::{SubscriptionId, Subscribers};
use agenticops_types::Card;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size hints for a rendered node; `height: None` means fit content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSize {
    pub width: f64,
    pub height: Option<f64>,
    pub min_width: f64,
    pub min_height: f64,
}

/// Spatial wrapper around a card; shares the card's id
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasNode {
    pub id: String,
    pub position: Position,
    pub size: NodeSize,
    pub collapsed: bool,
}

/// Structural link between two cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Change emitted by the canvas surface while the user drags or resizes
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Position { id: String, position: Position },
    Dimensions { id: String, width: f64, height: f64 },
    Remove { id: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasState {
    pub cards: Vec<Card>,
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<CanvasEdge>,
    /// Total cards ever inserted; drives grid placement
    pub insertions: usize,
}

impl CanvasState {
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.card(id).is_some()
    }
}

/// Grid slot for the `index`-th inserted card (0-based)
pub fn grid_position(index: usize, config: &CanvasConfig) -> Position {
    let columns = config.columns.max(1) as usize;
    let col = (index % columns) as f64;
    let row = (index / columns) as f64;
    Position {
        x: config.origin_x + col * (config.card_width + config.gap_x),
        y: config.origin_y + row * (config.card_height + config.gap_y),
    }
}

#[derive(Debug)]
pub struct CanvasStore {
    state: CanvasState,
    config: CanvasConfig,
    subscribers: Subscribers<CanvasState>,
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl CanvasStore {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            state: CanvasState::default(),
            config,
            subscribers: Subscribers::default(),
        }
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&CanvasState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn commit(&self) {
        self.subscribers.notify(&self.state);
    }

    /// Insert a card and its node at the next grid slot
    pub fn add_card(&mut self, card: Card) -> Result<Position> {
        if self.state.contains(&card.id) {
            return Err(ConsoleError::DuplicateCard(card.id));
        }

        let position = grid_position(self.state.insertions, &self.config);
        let meta = card_meta(card.kind());
        let node = CanvasNode {
            id: card.id.clone(),
            position,
            size: NodeSize {
                width: self.config.node_width,
                height: None,
                min_width: meta.min_width,
                min_height: meta.min_height,
            },
            collapsed: card.collapsed,
        };

        log::debug!(
            "Placing card {} ({}) at ({}, {})",
            card.id,
            card.kind().as_str(),
            position.x,
            position.y
        );
        self.state.insertions += 1;
        self.state.cards.push(card);
        self.state.nodes.push(node);
        self.commit();
        Ok(position)
    }

    /// Remove a card, its node and every edge touching it
    pub fn remove_card(&mut self, id: &str) -> Result<()> {
        if !self.state.contains(id) {
            return Err(ConsoleError::CardNotFound(id.to_string()));
        }
        self.state.cards.retain(|c| c.id != id);
        self.state.nodes.retain(|n| n.id != id);
        self.state
            .edges
            .retain(|e| e.source != id && e.target != id);
        self.commit();
        Ok(())
    }

    /// Flip the collapse flag on the card and its node; returns the new value
    pub fn toggle_card_collapse(&mut self, id: &str) -> Result<bool> {
        let card = self
            .state
            .cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ConsoleError::CardNotFound(id.to_string()))?;
        card.collapsed = !card.collapsed;
        let collapsed = card.collapsed;

        if let Some(node) = self.state.nodes.iter_mut().find(|n| n.id == id) {
            node.collapsed = collapsed;
        }
        self.commit();
        Ok(collapsed)
    }

    /// Replace node layout wholesale, keeping exactly one node per card.
    /// Orphans and repeated ids are dropped (first wins); a card missing
    /// from the list keeps its current node.
    pub fn set_nodes(&mut self, nodes: Vec<CanvasNode>) {
        let supplied = nodes.len();
        let mut incoming = nodes;
        let repaired: Vec<CanvasNode> = self
            .state
            .cards
            .iter()
            .filter_map(|card| {
                match incoming.iter().position(|n| n.id == card.id) {
                    Some(i) => Some(incoming.swap_remove(i)),
                    None => self.state.nodes.iter().find(|n| n.id == card.id).cloned(),
                }
            })
            .collect();
        if repaired.len() != supplied || !incoming.is_empty() {
            log::debug!(
                "Node list repaired: {} supplied, {} kept",
                supplied,
                repaired.len()
            );
        }
        self.state.nodes = repaired;
        self.commit();
    }

    /// Replace structural links; edges to unknown cards are dropped
    pub fn set_edges(&mut self, edges: Vec<CanvasEdge>) {
        let before = edges.len();
        let state = &self.state;
        let kept: Vec<_> = edges
            .into_iter()
            .filter(|e| state.contains(&e.source) && state.contains(&e.target))
            .collect();
        if kept.len() != before {
            log::debug!("Dropped {} edges with unknown endpoints", before - kept.len());
        }
        self.state.edges = kept;
        self.commit();
    }

    pub fn update_node_position(&mut self, id: &str, position: Position) -> Result<()> {
        let node = self
            .state
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ConsoleError::CardNotFound(id.to_string()))?;
        node.position = position;
        self.commit();
        Ok(())
    }

    /// Apply a batch from the canvas surface with a single notification
    pub fn apply_node_changes(&mut self, changes: Vec<NodeChange>) {
        if changes.is_empty() {
            return;
        }
        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    if let Some(node) = self.state.nodes.iter_mut().find(|n| n.id == id) {
                        node.position = position;
                    }
                }
                NodeChange::Dimensions { id, width, height } => {
                    if let Some(node) = self.state.nodes.iter_mut().find(|n| n.id == id) {
                        node.size.width = width.max(node.size.min_width);
                        node.size.height = Some(height.max(node.size.min_height));
                    }
                }
                NodeChange::Remove { id } => {
                    self.state.cards.retain(|c| c.id != id);
                    self.state.nodes.retain(|n| n.id != id);
                    self.state
                        .edges
                        .retain(|e| e.source != id && e.target != id);
                }
            }
        }
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenticops_types::{CardPayload, DataSource, TextReportPayload};

    fn card(id: &str) -> Card {
        Card::new(
            id,
            format!("Card {id}"),
            DataSource::Meraki,
            CardPayload::TextReport(TextReportPayload {
                content: "ok".to_string(),
            }),
        )
    }

    // ============================================================================
    // Placement
    // ============================================================================

    #[test]
    fn test_grid_position_first_row() {
        let cfg = CanvasConfig::default();
        assert_eq!(grid_position(0, &cfg), Position::new(50.0, 50.0));
        assert_eq!(grid_position(1, &cfg), Position::new(530.0, 50.0));
        assert_eq!(grid_position(2, &cfg), Position::new(1010.0, 50.0));
    }

    #[test]
    fn test_grid_position_wraps_every_three() {
        let cfg = CanvasConfig::default();
        assert_eq!(grid_position(3, &cfg), Position::new(50.0, 440.0));
        assert_eq!(grid_position(7, &cfg), Position::new(530.0, 830.0));
    }

    #[test]
    fn test_add_card_uses_insertion_index() {
        let mut store = CanvasStore::default();
        for (i, id) in ["a", "b", "c", "d"].iter().enumerate() {
            let pos = store.add_card(card(id)).unwrap();
            assert_eq!(pos, grid_position(i, &CanvasConfig::default()));
        }
        assert_eq!(store.state().node("d").unwrap().position, Position::new(50.0, 440.0));
    }

    #[test]
    fn test_remove_does_not_reflow() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        store.add_card(card("b")).unwrap();
        store.add_card(card("c")).unwrap();
        let b_before = store.state().node("b").unwrap().position;
        let c_before = store.state().node("c").unwrap().position;

        store.remove_card("a").unwrap();
        assert_eq!(store.state().node("b").unwrap().position, b_before);
        assert_eq!(store.state().node("c").unwrap().position, c_before);

        // Next insert continues the sequence instead of reusing slot 0
        let pos = store.add_card(card("d")).unwrap();
        assert_eq!(pos, Position::new(50.0, 440.0));
    }

    #[test]
    fn test_node_size_from_registry() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        let size = store.state().node("a").unwrap().size;
        assert_eq!(size.width, 420.0);
        assert_eq!(size.height, None);
        assert_eq!(size.min_width, 300.0);
    }

    // ============================================================================
    // Structural edits
    // ============================================================================

    #[test]
    fn test_duplicate_card_rejected() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        let err = store.add_card(card("a")).unwrap_err();
        assert!(matches!(err, ConsoleError::DuplicateCard(id) if id == "a"));
        assert_eq!(store.state().cards.len(), 1);
        assert_eq!(store.state().insertions, 1);
    }

    #[test]
    fn test_remove_card_drops_incident_edges() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        store.add_card(card("b")).unwrap();
        store.add_card(card("c")).unwrap();
        store.set_edges(vec![
            CanvasEdge {
                id: "e1".into(),
                source: "a".into(),
                target: "b".into(),
            },
            CanvasEdge {
                id: "e2".into(),
                source: "b".into(),
                target: "c".into(),
            },
        ]);

        store.remove_card("a").unwrap();
        let state = store.state();
        assert!(state.card("a").is_none());
        assert!(state.node("a").is_none());
        assert_eq!(state.edges.len(), 1);
        assert_eq!(state.edges[0].id, "e2");
    }

    #[test]
    fn test_remove_missing_card() {
        let mut store = CanvasStore::default();
        assert!(matches!(
            store.remove_card("ghost"),
            Err(ConsoleError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_set_edges_drops_unknown_endpoints() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        store.set_edges(vec![CanvasEdge {
            id: "e1".into(),
            source: "a".into(),
            target: "ghost".into(),
        }]);
        assert!(store.state().edges.is_empty());
    }

    #[test]
    fn test_toggle_collapse_is_involution() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        store.add_card(card("b")).unwrap();
        let before = store.state().clone();

        assert!(store.toggle_card_collapse("a").unwrap());
        assert!(store.state().card("a").unwrap().collapsed);
        assert!(store.state().node("a").unwrap().collapsed);
        assert_eq!(
            store.state().node("a").unwrap().position,
            before.node("a").unwrap().position
        );

        assert!(!store.toggle_card_collapse("a").unwrap());
        assert_eq!(store.state(), &before);
    }

    // ============================================================================
    // Surface updates
    // ============================================================================

    #[test]
    fn test_update_node_position() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        store
            .update_node_position("a", Position::new(10.0, -20.0))
            .unwrap();
        assert_eq!(store.state().node("a").unwrap().position, Position::new(10.0, -20.0));
    }

    #[test]
    fn test_apply_node_changes_batch() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        store.add_card(card("b")).unwrap();

        store.apply_node_changes(vec![
            NodeChange::Position {
                id: "a".into(),
                position: Position::new(5.0, 5.0),
            },
            NodeChange::Dimensions {
                id: "a".into(),
                width: 100.0,
                height: 500.0,
            },
            NodeChange::Remove { id: "b".into() },
        ]);

        let state = store.state();
        let a = state.node("a").unwrap();
        assert_eq!(a.position, Position::new(5.0, 5.0));
        assert_eq!(a.size.width, 300.0);
        assert_eq!(a.size.height, Some(500.0));
        assert!(state.card("b").is_none());
    }

    #[test]
    fn test_set_nodes_ignores_orphans() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        let mut nodes = store.state().nodes.clone();
        let mut orphan = nodes[0].clone();
        orphan.id = "ghost".into();
        nodes.push(orphan);

        store.set_nodes(nodes);
        assert_eq!(store.state().nodes.len(), 1);
    }

    #[test]
    fn test_set_nodes_keeps_one_node_per_card() {
        let mut store = CanvasStore::default();
        store.add_card(card("a")).unwrap();
        store.add_card(card("b")).unwrap();
        let original_b = store.state().node("b").unwrap().clone();

        // "a" twice, "b" missing
        let mut first = store.state().node("a").unwrap().clone();
        first.position = Position::new(5.0, 5.0);
        let mut repeat = first.clone();
        repeat.position = Position::new(9.0, 9.0);
        store.set_nodes(vec![first, repeat]);

        let state = store.state();
        assert_eq!(state.nodes.len(), 2);
        assert_eq!(state.node("a").unwrap().position, Position::new(5.0, 5.0));
        assert_eq!(state.node("b").unwrap(), &original_b);
    }
}
