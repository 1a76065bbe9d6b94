//! Projection of a game's element lists onto a node graph for the canvas.
//!
//! The projection is display-only and holds no state: it is a pure function
//! of the aggregate fetch and is recomputed on every refresh.
//!
//! Placement rules:
//! - A stored coordinate of `0` is treated as "not stored" for that axis,
//!   because the store defaults unset coordinates to `0`.
//! - Periods without a stored position fan out horizontally by their index
//!   among siblings.
//! - Events and scenes without a stored position sit below and to the right
//!   of their parent's *resolved* position.
//! - Children whose parent is not in the input are skipped, as is their edge.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::timeline::{ElementType, Tone};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Horizontal distance between periods placed by index.
pub const PERIOD_SPACING_X: f64 = 300.0;

/// Horizontal offset of a child from its parent.
pub const CHILD_OFFSET_X: f64 = 50.0;

/// Vertical offset of a child from its parent.
pub const CHILD_OFFSET_Y: f64 = 150.0;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Read access to a persisted period, event or scene.
pub trait TimelineElement {
    /// Level of the tree this element lives on.
    const ELEMENT_TYPE: ElementType;

    fn id(&self) -> DbId;
    /// Id of the game (periods), period (events) or event (scenes).
    fn parent_id(&self) -> DbId;
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn tone(&self) -> Tone;
    fn position_x(&self) -> f64;
    fn position_y(&self) -> f64;
    fn order_index(&self) -> i32;
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Default placement of a child of the element at `self`.
    fn child_fallback(self) -> Self {
        Self::new(self.x + CHILD_OFFSET_X, self.y + CHILD_OFFSET_Y)
    }
}

/// A positioned canvas node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// `"{element_type}-{element_id}"`, unique across the graph.
    pub id: String,
    pub element_type: ElementType,
    pub element_id: DbId,
    pub parent_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub tone: Tone,
    pub order_index: i32,
    pub position: Position,
}

/// A directed parent-to-child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Nodes (periods, then events, then scenes, each in input order) and edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimelineGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Graph node id for an element.
pub fn node_id(element_type: ElementType, id: DbId) -> String {
    format!("{element_type}-{id}")
}

fn edge_between(
    parent_type: ElementType,
    parent_id: DbId,
    child_type: ElementType,
    child_id: DbId,
) -> GraphEdge {
    let source = node_id(parent_type, parent_id);
    let target = node_id(child_type, child_id);
    GraphEdge {
        id: format!("{source}-{target}"),
        source,
        target,
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Build the canvas graph for one game.
///
/// `periods`, `events` and `scenes` are expected in display order (as the
/// aggregate fetch returns them); the period index used for fallback
/// placement is the position in `periods`.
pub fn project<P, E, S>(periods: &[P], events: &[E], scenes: &[S]) -> TimelineGraph
where
    P: TimelineElement,
    E: TimelineElement,
    S: TimelineElement,
{
    let mut graph = TimelineGraph::default();

    let mut period_positions = HashMap::with_capacity(periods.len());
    for (index, period) in periods.iter().enumerate() {
        let fallback = Position::new(index as f64 * PERIOD_SPACING_X, 0.0);
        let position = resolve_position(period, fallback);
        period_positions.insert(period.id(), position);
        graph.nodes.push(to_node(period, position));
    }

    let event_positions = place_children(&mut graph, &period_positions, events);
    place_children(&mut graph, &event_positions, scenes);

    graph
}

/// Emit nodes and edges for every child whose parent has been placed.
/// Returns the resolved positions of the emitted children.
fn place_children<T: TimelineElement>(
    graph: &mut TimelineGraph,
    parent_positions: &HashMap<DbId, Position>,
    children: &[T],
) -> HashMap<DbId, Position> {
    let mut placed = HashMap::with_capacity(children.len());
    let Some(parent_type) = T::ELEMENT_TYPE.parent() else {
        return placed;
    };

    for child in children {
        let Some(parent_position) = parent_positions.get(&child.parent_id()) else {
            continue;
        };
        let position = resolve_position(child, parent_position.child_fallback());
        placed.insert(child.id(), position);
        graph.nodes.push(to_node(child, position));
        graph.edges.push(edge_between(
            parent_type,
            child.parent_id(),
            T::ELEMENT_TYPE,
            child.id(),
        ));
    }

    placed
}

fn resolve_position<T: TimelineElement>(element: &T, fallback: Position) -> Position {
    Position::new(
        stored_or(element.position_x(), fallback.x),
        stored_or(element.position_y(), fallback.y),
    )
}

fn stored_or(stored: f64, fallback: f64) -> f64 {
    if stored == 0.0 {
        fallback
    } else {
        stored
    }
}

fn to_node<T: TimelineElement>(element: &T, position: Position) -> GraphNode {
    GraphNode {
        id: node_id(T::ELEMENT_TYPE, element.id()),
        element_type: T::ELEMENT_TYPE,
        element_id: element.id(),
        parent_id: element.parent_id(),
        title: element.title().to_string(),
        description: element.description().map(str::to_string),
        tone: element.tone(),
        order_index: element.order_index(),
        position,
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Keep only nodes whose title or description contains `term`
/// (case-insensitive). Edges survive only when both endpoints do.
///
/// A blank term returns the graph unchanged.
pub fn filter_nodes(graph: TimelineGraph, term: &str) -> TimelineGraph {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return graph;
    }

    let nodes: Vec<GraphNode> = graph
        .nodes
        .into_iter()
        .filter(|node| {
            node.title.to_lowercase().contains(&needle)
                || node
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect();

    let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let edges = graph
        .edges
        .into_iter()
        .filter(|e| kept.contains(e.source.as_str()) && kept.contains(e.target.as_str()))
        .collect();

    TimelineGraph { nodes, edges }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct El<const LEVEL: u8> {
        id: DbId,
        parent_id: DbId,
        title: &'static str,
        description: Option<&'static str>,
        x: f64,
        y: f64,
    }

    type P = El<0>;
    type E = El<1>;
    type S = El<2>;

    fn el<const LEVEL: u8>(id: DbId, parent_id: DbId, x: f64, y: f64) -> El<LEVEL> {
        El {
            id,
            parent_id,
            title: "untitled",
            description: None,
            x,
            y,
        }
    }

    macro_rules! impl_element {
        ($level:literal, $ty:expr) => {
            impl TimelineElement for El<$level> {
                const ELEMENT_TYPE: ElementType = $ty;

                fn id(&self) -> DbId {
                    self.id
                }
                fn parent_id(&self) -> DbId {
                    self.parent_id
                }
                fn title(&self) -> &str {
                    self.title
                }
                fn description(&self) -> Option<&str> {
                    self.description
                }
                fn tone(&self) -> Tone {
                    Tone::Light
                }
                fn position_x(&self) -> f64 {
                    self.x
                }
                fn position_y(&self) -> f64 {
                    self.y
                }
                fn order_index(&self) -> i32 {
                    0
                }
            }
        };
    }

    impl_element!(0, ElementType::Period);
    impl_element!(1, ElementType::Event);
    impl_element!(2, ElementType::Scene);

    fn node<'a>(graph: &'a TimelineGraph, id: &str) -> &'a GraphNode {
        graph
            .nodes
            .iter()
            .find(|n| n.id == id)
            .unwrap_or_else(|| panic!("node {id} missing"))
    }

    // -- Placement ----------------------------------------------------------

    #[test]
    fn unplaced_periods_fan_out_by_index() {
        let periods: Vec<P> = (1..=3).map(|id| el(id, 1, 0.0, 0.0)).collect();
        let graph = project::<P, E, S>(&periods, &[], &[]);

        assert_eq!(node(&graph, "period-1").position, Position::new(0.0, 0.0));
        assert_eq!(node(&graph, "period-2").position, Position::new(300.0, 0.0));
        assert_eq!(node(&graph, "period-3").position, Position::new(600.0, 0.0));
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn event_under_unplaced_middle_period_gets_defined_fallback() {
        let periods: Vec<P> = (10..15).map(|id| el(id, 1, 0.0, 0.0)).collect();
        let events: Vec<E> = vec![el(100, 12, 0.0, 0.0)];
        let graph = project::<P, E, S>(&periods, &events, &[]);

        let period = node(&graph, "period-12");
        assert_eq!(period.position, Position::new(600.0, 0.0));

        let event = node(&graph, "event-100");
        assert_eq!(event.position, Position::new(650.0, 150.0));
        assert!(event.position.x.is_finite() && event.position.y.is_finite());
    }

    #[test]
    fn stored_positions_win_over_fallback() {
        let periods: Vec<P> = vec![el(1, 1, 40.0, 70.0)];
        let events: Vec<E> = vec![el(2, 1, -5.0, 900.0)];
        let scenes: Vec<S> = vec![el(3, 2, 11.0, 12.0)];
        let graph = project(&periods, &events, &scenes);

        assert_eq!(node(&graph, "period-1").position, Position::new(40.0, 70.0));
        assert_eq!(node(&graph, "event-2").position, Position::new(-5.0, 900.0));
        assert_eq!(node(&graph, "scene-3").position, Position::new(11.0, 12.0));
    }

    #[test]
    fn each_axis_falls_back_independently() {
        let periods: Vec<P> = vec![el(1, 1, 400.0, 0.0)];
        let events: Vec<E> = vec![el(2, 1, 0.0, 30.0)];
        let graph = project::<P, E, S>(&periods, &events, &[]);

        assert_eq!(node(&graph, "period-1").position, Position::new(400.0, 0.0));
        assert_eq!(node(&graph, "event-2").position, Position::new(450.0, 30.0));
    }

    #[test]
    fn scene_fallback_chains_through_resolved_event() {
        let periods: Vec<P> = vec![el(1, 1, 0.0, 0.0), el(2, 1, 0.0, 0.0)];
        let events: Vec<E> = vec![el(5, 2, 0.0, 0.0)];
        let scenes: Vec<S> = vec![el(9, 5, 0.0, 0.0)];
        let graph = project(&periods, &events, &scenes);

        assert_eq!(node(&graph, "event-5").position, Position::new(350.0, 150.0));
        assert_eq!(node(&graph, "scene-9").position, Position::new(400.0, 300.0));
    }

    // -- Edges and orphans --------------------------------------------------

    #[test]
    fn every_child_gets_one_edge_from_its_parent() {
        let periods: Vec<P> = vec![el(1, 1, 0.0, 0.0)];
        let events: Vec<E> = vec![el(2, 1, 0.0, 0.0), el(3, 1, 0.0, 0.0)];
        let scenes: Vec<S> = vec![el(4, 3, 0.0, 0.0)];
        let graph = project(&periods, &events, &scenes);

        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(
            graph.edges,
            vec![
                GraphEdge {
                    id: "period-1-event-2".into(),
                    source: "period-1".into(),
                    target: "event-2".into(),
                },
                GraphEdge {
                    id: "period-1-event-3".into(),
                    source: "period-1".into(),
                    target: "event-3".into(),
                },
                GraphEdge {
                    id: "event-3-scene-4".into(),
                    source: "event-3".into(),
                    target: "scene-4".into(),
                },
            ]
        );
    }

    #[test]
    fn dangling_children_are_skipped() {
        let periods: Vec<P> = vec![el(1, 1, 0.0, 0.0)];
        let events: Vec<E> = vec![el(2, 1, 0.0, 0.0), el(3, 999, 0.0, 0.0)];
        // Scene 5 hangs off the skipped event 3, scene 6 off a missing event.
        let scenes: Vec<S> = vec![
            el(4, 2, 0.0, 0.0),
            el(5, 3, 0.0, 0.0),
            el(6, 77, 0.0, 0.0),
        ];
        let graph = project(&periods, &events, &scenes);

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["period-1", "event-2", "scene-4"]);
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn projection_is_deterministic() {
        let periods: Vec<P> = vec![el(1, 1, 0.0, 0.0), el(2, 1, 10.0, 0.0)];
        let events: Vec<E> = vec![el(3, 2, 0.0, 0.0)];
        let scenes: Vec<S> = vec![el(4, 3, 0.0, 0.0)];

        assert_eq!(
            project(&periods, &events, &scenes),
            project(&periods, &events, &scenes)
        );
    }

    #[test]
    fn node_carries_element_fields() {
        let periods: Vec<P> = vec![El {
            id: 7,
            parent_id: 3,
            title: "Act I",
            description: Some("opening"),
            x: 0.0,
            y: 0.0,
        }];
        let graph = project::<P, E, S>(&periods, &[], &[]);
        let n = node(&graph, "period-7");

        assert_eq!(n.element_type, ElementType::Period);
        assert_eq!(n.element_id, 7);
        assert_eq!(n.parent_id, 3);
        assert_eq!(n.title, "Act I");
        assert_eq!(n.description.as_deref(), Some("opening"));
        assert_eq!(n.tone, Tone::Light);
    }

    // -- Search -------------------------------------------------------------

    fn searchable() -> TimelineGraph {
        let periods: Vec<P> = vec![El {
            id: 1,
            parent_id: 1,
            title: "Act I",
            description: None,
            x: 0.0,
            y: 0.0,
        }];
        let events: Vec<E> = vec![El {
            id: 2,
            parent_id: 1,
            title: "The Deal",
            description: Some("a bargain at the crossroads"),
            x: 0.0,
            y: 0.0,
        }];
        let scenes: Vec<S> = vec![El {
            id: 3,
            parent_id: 2,
            title: "Handshake",
            description: None,
            x: 0.0,
            y: 0.0,
        }];
        project(&periods, &events, &scenes)
    }

    #[test]
    fn blank_search_keeps_everything() {
        let graph = searchable();
        assert_eq!(filter_nodes(graph.clone(), "  "), graph);
    }

    #[test]
    fn search_matches_title_and_description_case_insensitively() {
        let by_title = filter_nodes(searchable(), "deal");
        assert_eq!(by_title.nodes.len(), 1);
        assert_eq!(by_title.nodes[0].id, "event-2");

        let by_description = filter_nodes(searchable(), "CROSSROADS");
        assert_eq!(by_description.nodes.len(), 1);
        assert_eq!(by_description.nodes[0].id, "event-2");
    }

    #[test]
    fn search_drops_edges_with_a_missing_endpoint() {
        let filtered = filter_nodes(searchable(), "a");
        // "Act I", "The Deal" and "Handshake" all contain an "a".
        assert_eq!(filtered.nodes.len(), 3);
        assert_eq!(filtered.edges.len(), 2);

        let filtered = filter_nodes(searchable(), "hand");
        assert_eq!(filtered.nodes.len(), 1);
        assert!(filtered.edges.is_empty());
    }

    #[test]
    fn node_serializes_with_camel_case_fields() {
        let graph = searchable();
        let json = serde_json::to_value(&graph.nodes[1]).unwrap();
        assert_eq!(json["elementType"], "event");
        assert_eq!(json["elementId"], 2);
        assert_eq!(json["position"]["x"], 50.0);
        assert_eq!(json["position"]["y"], 150.0);
    }
}
