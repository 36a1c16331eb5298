//! Node/edge sets for the graph-editing surface.
//!
//! Layout is derived from the saved techniques on every read. Positions are
//! purely positional (index in the filtered input) and edge ids depend only on
//! the `(parent, child)` pair, so deriving twice from the same data yields the
//! same graph.

use core::fmt;

use crate::technique::{Technique, TechniqueId};

/// Grid used to place nodes: `columns` per row, fixed cell size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridLayout {
    pub columns: usize,
    pub column_width: f32,
    pub row_height: f32,
}

impl GridLayout {
    pub const DEFAULT_COLUMNS: usize = 4;
    pub const DEFAULT_COLUMN_WIDTH: f32 = 300.0;
    pub const DEFAULT_ROW_HEIGHT: f32 = 200.0;

    /// Cell of the `index`-th node. A zero column count is treated as one.
    pub fn position(&self, index: usize) -> Position {
        let columns = self.columns.max(1);
        Position {
            x: (index % columns) as f32 * self.column_width,
            y: (index / columns) as f32 * self.row_height,
        }
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: Self::DEFAULT_COLUMNS,
            column_width: Self::DEFAULT_COLUMN_WIDTH,
            row_height: Self::DEFAULT_ROW_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A saved technique as drawn on the surface.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: TechniqueId,
    pub label: String,
    pub position: Position,
}

/// Directed parent → child link.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id: String,
    pub source: TechniqueId,
    pub target: TechniqueId,
}

impl Edge {
    pub fn between(parent: &TechniqueId, child: &TechniqueId) -> Self {
        Self {
            id: Self::id_for(parent, child),
            source: parent.clone(),
            target: child.clone(),
        }
    }

    pub fn id_for(parent: &TechniqueId, child: &TechniqueId) -> String {
        format!("e-{parent}-{child}")
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Layout {
    pub fn node(&self, id: &TechniqueId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Adds an edge to the live graph; returns `false` when an edge with
    /// the same id is already drawn.
    pub fn insert_edge(&mut self, edge: Edge) -> bool {
        if self.edges.iter().any(|existing| existing.id == edge.id) {
            return false;
        }
        self.edges.push(edge);
        true
    }
}

/// Derives nodes and edges from `techniques`.
///
/// Techniques without an id are skipped and do not consume a grid cell.
pub fn derive_layout(techniques: &[Technique], grid: &GridLayout) -> Layout {
    let mut layout = Layout::default();
    let saved = techniques
        .iter()
        .filter_map(|technique| technique.id.as_ref().map(|id| (id, technique)));

    for (index, (id, technique)) in saved.enumerate() {
        layout.nodes.push(Node {
            id: id.clone(),
            label: technique.name.clone(),
            position: grid.position(index),
        });
        if let Some(parent) = &technique.parent_id {
            layout.edges.push(Edge::between(parent, id));
        }
    }
    layout
}
