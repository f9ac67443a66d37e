#![forbid(unsafe_code)]

//! Headless model of the depscope dependency-graph explorer.
//!
//! The model is independent of any display technology:
//! - [`GraphView`] is what an ingesting layer (e.g. the SVG reader in `depscope-render`) hands in
//! - [`AdjacencyIndex`] is built once from it and is read-only afterwards
//! - [`SelectionState`], [`Panel`] and [`History`] are driven by an [`Explorer`]
//!
//! Every operation runs to completion synchronously; there is exactly one owner of the
//! selection state at a time.

pub mod error;
pub mod explorer;
pub mod history;
pub mod index;
pub mod selection;
pub mod sidebar;
pub mod view;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use explorer::Explorer;
pub use history::{History, NavEntry};
pub use index::{AdjacencyIndex, EdgeId, EdgeRef, MalformedEdge, Neighbor, NodeId, NodeRef};
pub use selection::{Mark, SelectionState, Transition};
pub use sidebar::Panel;
pub use view::{DisplayHandle, EdgeRecord, GraphView, NodeRecord};
