
use crate::*;

/// `a -> b -> c`
pub(super) fn chain() -> AdjacencyIndex {
    AdjacencyIndex::build(&GraphView::from_names(["a", "b", "c"], ["a->b", "b->c"]))
}

pub(super) fn id(index: &AdjacencyIndex, name: &str) -> NodeId {
    index.node_id(name).expect("node in index")
}
