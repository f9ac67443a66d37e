//! Selection state machine.
//!
//! Two states: idle (nothing selected) and selected. A selection is applied transactionally:
//! the previous marks are dropped before the new ones are computed, so the state after
//! `select(b)` never depends on what was selected before.

use crate::index::{AdjacencyIndex, EdgeId, NodeId};
use serde::Serialize;
use std::collections::BTreeSet;

/// A visual marker; the serialized form doubles as the CSS class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mark {
    Selected,
    SelectedIn,
    SelectedOut,
    Hovered,
}

impl Mark {
    pub const ALL: [Mark; 4] = [
        Mark::Selected,
        Mark::SelectedIn,
        Mark::SelectedOut,
        Mark::Hovered,
    ];

    pub const fn class_name(self) -> &'static str {
        match self {
            Mark::Selected => "selected",
            Mark::SelectedIn => "selected-in",
            Mark::SelectedOut => "selected-out",
            Mark::Hovered => "hovered",
        }
    }
}

/// Outcome of a state machine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Selected(NodeId),
    Cleared,
    /// The name is not in the index; the state is untouched.
    Unresolved,
    /// Nothing to do (e.g. a navigation entry without a name).
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<NodeId>,
    out_nodes: BTreeSet<NodeId>,
    in_nodes: BTreeSet<NodeId>,
    out_edges: BTreeSet<EdgeId>,
    in_edges: BTreeSet<EdgeId>,
    hovered: BTreeSet<NodeId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `name`, or returns to idle when `name` is already selected.
    pub fn select(&mut self, index: &AdjacencyIndex, name: &str) -> Transition {
        let Some(id) = index.node_id(name) else {
            return Transition::Unresolved;
        };
        if self.selected == Some(id) {
            self.clear();
            return Transition::Cleared;
        }
        self.apply(index, id, name)
    }

    /// Selects `name` without the toggle-off behavior of [`select`](Self::select).
    pub fn reselect(&mut self, index: &AdjacencyIndex, name: &str) -> Transition {
        match index.node_id(name) {
            Some(id) => self.apply(index, id, name),
            None => Transition::Unresolved,
        }
    }

    fn apply(&mut self, index: &AdjacencyIndex, id: NodeId, name: &str) -> Transition {
        self.clear();
        self.selected = Some(id);

        for n in index.out_edges(name) {
            self.out_edges.insert(n.edge);
            if let Some(peer) = index.node_id(&n.to) {
                self.out_nodes.insert(peer);
            }
        }
        for n in index.in_edges(name) {
            self.in_edges.insert(n.edge);
            if let Some(peer) = index.node_id(&n.to) {
                self.in_nodes.insert(peer);
            }
        }
        Transition::Selected(id)
    }

    /// Drops every selection mark. Hover marks are independent and stay.
    pub fn clear(&mut self) {
        self.selected = None;
        self.out_nodes.clear();
        self.in_nodes.clear();
        self.out_edges.clear();
        self.in_edges.clear();
    }

    /// Returns `false` if `name` is unknown.
    pub fn hover(&mut self, index: &AdjacencyIndex, name: &str) -> bool {
        match index.node_id(name) {
            Some(id) => {
                self.hovered.insert(id);
                true
            }
            None => false,
        }
    }

    pub fn unhover(&mut self, index: &AdjacencyIndex, name: &str) -> bool {
        match index.node_id(name) {
            Some(id) => {
                self.hovered.remove(&id);
                true
            }
            None => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.selected.is_none()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_name<'a>(&self, index: &'a AdjacencyIndex) -> Option<&'a str> {
        self.selected
            .and_then(|id| index.node(id))
            .map(|node| node.name.as_str())
    }

    pub fn out_nodes(&self) -> &BTreeSet<NodeId> {
        &self.out_nodes
    }

    pub fn in_nodes(&self) -> &BTreeSet<NodeId> {
        &self.in_nodes
    }

    pub fn out_edges(&self) -> &BTreeSet<EdgeId> {
        &self.out_edges
    }

    pub fn in_edges(&self) -> &BTreeSet<EdgeId> {
        &self.in_edges
    }

    pub fn hovered(&self) -> &BTreeSet<NodeId> {
        &self.hovered
    }

    /// Every neighbor node currently highlighted, regardless of direction.
    pub fn highlighted_nodes(&self) -> BTreeSet<NodeId> {
        self.out_nodes.union(&self.in_nodes).copied().collect()
    }

    pub fn highlighted_edges(&self) -> BTreeSet<EdgeId> {
        self.out_edges.union(&self.in_edges).copied().collect()
    }

    /// Marks currently applied to a node, in [`Mark::ALL`] order.
    pub fn marks_for_node(&self, id: NodeId) -> Vec<Mark> {
        let mut marks = Vec::new();
        if self.selected == Some(id) {
            marks.push(Mark::Selected);
        }
        if self.in_nodes.contains(&id) {
            marks.push(Mark::SelectedIn);
        }
        if self.out_nodes.contains(&id) {
            marks.push(Mark::SelectedOut);
        }
        if self.hovered.contains(&id) {
            marks.push(Mark::Hovered);
        }
        marks
    }

    pub fn marks_for_edge(&self, id: EdgeId) -> Vec<Mark> {
        let mut marks = Vec::new();
        if self.in_edges.contains(&id) {
            marks.push(Mark::SelectedIn);
        }
        if self.out_edges.contains(&id) {
            marks.push(Mark::SelectedOut);
        }
        marks
    }
}
