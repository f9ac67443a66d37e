//! Display-side input to the index builder.

use serde::Serialize;

/// Opaque identity of a rendered element.
///
/// The ingesting layer assigns these; the model only carries them through so marks can be
/// mapped back onto whatever draws the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayHandle(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Node name as rendered (Graphviz `<title>` text).
    pub title: String,
    pub handle: DisplayHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Raw edge label, e.g. `a->b` or `a-&gt;b`.
    pub title: String,
    pub handle: DisplayHandle,
}

/// Node and edge records in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphView {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_node(&mut self, title: impl Into<String>, handle: DisplayHandle) {
        self.nodes.push(NodeRecord {
            title: title.into(),
            handle,
        });
    }

    pub fn push_edge(&mut self, title: impl Into<String>, handle: DisplayHandle) {
        self.edges.push(EdgeRecord {
            title: title.into(),
            handle,
        });
    }

    /// Builds a view from plain names, assigning handles sequentially (nodes first).
    ///
    /// Handy for callers that have no display layer, and for tests.
    pub fn from_names<'a>(
        nodes: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut view = Self::new();
        let mut next = 0usize;
        for name in nodes {
            view.push_node(name, DisplayHandle(next));
            next += 1;
        }
        for title in edges {
            view.push_edge(title, DisplayHandle(next));
            next += 1;
        }
        view
    }
}
