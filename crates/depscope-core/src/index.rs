//! One-shot adjacency index over a [`GraphView`].
//!
//! The index is built once and never mutated afterwards. Name-keyed maps use [`IndexMap`] so
//! every listing (neighbors, tops, bottoms) follows discovery order.

use crate::error::{Error, Result};
use crate::view::{DisplayHandle, GraphView};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// Edge separator as it appears in raw (escaped) SVG/HTML text.
pub const ESCAPED_ARROW: &str = "-&gt;";
/// Edge separator after entity decoding.
pub const ARROW: &str = "->";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    pub name: String,
    pub handle: DisplayHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeRef {
    pub from: String,
    pub to: String,
    pub handle: DisplayHandle,
}

/// An adjacency list entry.
///
/// `to` is always the *other* endpoint: the target for outbound lists and the source for
/// inbound lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    pub to: String,
    pub edge: EdgeId,
}

/// An edge whose title did not split into exactly two non-empty names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedEdge {
    pub title: String,
    pub handle: DisplayHandle,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacencyIndex {
    nodes: IndexMap<String, NodeRef>,
    edges: Vec<EdgeRef>,
    out_edges: IndexMap<String, Vec<Neighbor>>,
    in_edges: IndexMap<String, Vec<Neighbor>>,
    tops: Vec<String>,
    bottoms: Vec<String>,
    malformed: Vec<MalformedEdge>,
    #[serde(skip)]
    node_handles: HashMap<DisplayHandle, NodeId>,
    #[serde(skip)]
    edge_handles: HashMap<DisplayHandle, EdgeId>,
}

/// Splits an edge title into `(from, to)`.
///
/// Accepts both the escaped `-&gt;` and the literal `->` separator. Returns `None` unless the
/// title splits into exactly two non-empty names.
pub fn split_edge_title(title: &str) -> Option<(&str, &str)> {
    let sep = if title.contains(ESCAPED_ARROW) {
        ESCAPED_ARROW
    } else {
        ARROW
    };
    let mut parts = title.split(sep);
    let from = parts.next()?;
    let to = parts.next()?;
    if parts.next().is_some() || from.is_empty() || to.is_empty() {
        return None;
    }
    Some((from, to))
}

impl AdjacencyIndex {
    pub fn build(view: &GraphView) -> Self {
        let mut index = Self::default();

        for edge in &view.edges {
            let Some((from, to)) = split_edge_title(&edge.title) else {
                tracing::warn!(
                    title = %edge.title,
                    handle = edge.handle.0,
                    "edge title does not name two endpoints; skipping"
                );
                index.malformed.push(MalformedEdge {
                    title: edge.title.clone(),
                    handle: edge.handle,
                });
                continue;
            };

            let id = EdgeId(index.edges.len());
            index.edges.push(EdgeRef {
                from: from.to_string(),
                to: to.to_string(),
                handle: edge.handle,
            });
            index.edge_handles.insert(edge.handle, id);
            index
                .out_edges
                .entry(from.to_string())
                .or_default()
                .push(Neighbor {
                    to: to.to_string(),
                    edge: id,
                });
            index
                .in_edges
                .entry(to.to_string())
                .or_default()
                .push(Neighbor {
                    to: from.to_string(),
                    edge: id,
                });
        }

        for node in &view.nodes {
            // Duplicate names keep their first position but the last record wins.
            let (ix, previous) = index.nodes.insert_full(
                node.title.clone(),
                NodeRef {
                    name: node.title.clone(),
                    handle: node.handle,
                },
            );
            if let Some(previous) = previous {
                tracing::debug!(name = %node.title, "duplicate node name; last record wins");
                index.node_handles.remove(&previous.handle);
            }
            index.node_handles.insert(node.handle, NodeId(ix));
        }

        index.tops = index
            .nodes
            .keys()
            .filter(|name| index.in_edges(name).is_empty())
            .cloned()
            .collect();
        index.bottoms = index
            .nodes
            .keys()
            .filter(|name| index.out_edges(name).is_empty())
            .cloned()
            .collect();

        tracing::debug!(
            nodes = index.nodes.len(),
            edges = index.edges.len(),
            malformed = index.malformed.len(),
            tops = index.tops.len(),
            bottoms = index.bottoms.len(),
            "built adjacency index"
        );
        index
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.get_index_of(name).map(NodeId)
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeRef> {
        self.nodes.get_index(id.0).map(|(_, node)| node)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&NodeRef> {
        self.nodes.get(name)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&EdgeRef> {
        self.edges.get(id.0)
    }

    /// Outbound neighbors of `name`, in discovery order. Unknown names yield an empty slice.
    pub fn out_edges(&self, name: &str) -> &[Neighbor] {
        self.out_edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Inbound neighbors of `name`; each entry's `to` is the edge's source.
    pub fn in_edges(&self, name: &str) -> &[Neighbor] {
        self.in_edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes without predecessors.
    pub fn tops(&self) -> &[String] {
        &self.tops
    }

    /// Nodes without successors.
    pub fn bottoms(&self) -> &[String] {
        &self.bottoms
    }

    pub fn malformed(&self) -> &[MalformedEdge] {
        &self.malformed
    }

    pub fn node_for_handle(&self, handle: DisplayHandle) -> Option<NodeId> {
        self.node_handles.get(&handle).copied()
    }

    pub fn edge_for_handle(&self, handle: DisplayHandle) -> Option<EdgeId> {
        self.edge_handles.get(&handle).copied()
    }

    /// Fails when any edge title had to be skipped during the build.
    pub fn ensure_well_formed(&self) -> Result<()> {
        match self.malformed.first() {
            None => Ok(()),
            Some(first) => Err(Error::MalformedEdges {
                count: self.malformed.len(),
                first: first.title.clone(),
            }),
        }
    }
}
