#![forbid(unsafe_code)]

//! Graphviz SVG in, interactive dependency-graph explorer out.
//!
//! Two output shapes share one pipeline (parse, index, optional preselection, annotate):
//! - [`render_html`]: a standalone page with pan/zoom and a sidebar
//! - [`inject_svg`]: the original SVG with `<style>`/`<script>` appended to the root

pub mod assets;
pub mod config;
pub mod document;
pub mod error;
pub mod html;
pub mod inject;
pub mod rewrite;

pub use config::ViewerConfig;
pub use document::{ElementKind, GraphElement, SvgDocument};
pub use error::{Error, Result};
pub use html::render_html;
pub use inject::inject_svg;

use depscope_core::Explorer;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExploreOptions<'a> {
    /// Node to select before rendering; unknown names are an error.
    pub select: Option<&'a str>,
    /// Fail on edge titles that do not name two endpoints.
    pub strict: bool,
}

/// Builds the explorer for a parsed document.
pub fn explore(doc: &SvgDocument<'_>, options: ExploreOptions<'_>) -> Result<Explorer> {
    let mut explorer = Explorer::from_view(&doc.graph_view());
    if options.strict {
        explorer.index().ensure_well_formed()?;
    }
    if let Some(name) = options.select {
        explorer.select_existing(name)?;
    }
    Ok(explorer)
}
