//! Splices annotations into the original markup.

use crate::document::{ElementKind, GraphElement, SvgDocument};
use depscope_core::{Explorer, Mark};
use std::ops::Range;

/// Attribute the client script uses to find graph elements by display handle.
pub const HANDLE_ATTR: &str = "data-depscope";

#[derive(Debug, Clone)]
struct Edit {
    range: Range<usize>,
    text: String,
}

/// Non-overlapping text edits against one source string.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    edits: Vec<Edit>,
}

impl Rewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.replace(at..at, text);
    }

    pub fn replace(&mut self, range: Range<usize>, text: impl Into<String>) {
        self.edits.push(Edit {
            range,
            text: text.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Returns `source[window]` with every edit that lies inside `window` applied.
    pub fn apply(&self, source: &str, window: Range<usize>) -> String {
        let mut edits: Vec<&Edit> = self
            .edits
            .iter()
            .filter(|e| e.range.start >= window.start && e.range.end <= window.end)
            .collect();
        edits.sort_by_key(|e| (e.range.start, e.range.end));

        let mut out = String::with_capacity(window.len() + edits.len() * 24);
        let mut cursor = window.start;
        for edit in edits {
            if edit.range.start < cursor {
                continue;
            }
            out.push_str(&source[cursor..edit.range.start]);
            out.push_str(&edit.text);
            cursor = edit.range.end;
        }
        out.push_str(&source[cursor..window.end]);
        out
    }
}

fn element_marks(el: &GraphElement, explorer: &Explorer) -> Vec<Mark> {
    let index = explorer.index();
    let state = explorer.state();
    match el.kind {
        ElementKind::Node => index
            .node_for_handle(el.handle)
            .map(|id| state.marks_for_node(id))
            .unwrap_or_default(),
        ElementKind::Edge => index
            .edge_for_handle(el.handle)
            .map(|id| state.marks_for_edge(id))
            .unwrap_or_default(),
    }
}

/// The element's class list with mark classes replaced by `marks`.
pub fn marked_class(class: &str, marks: &[Mark]) -> String {
    let mut tokens: Vec<&str> = class
        .split_ascii_whitespace()
        .filter(|t| !Mark::ALL.iter().any(|m| m.class_name() == *t))
        .collect();
    tokens.extend(marks.iter().map(|m| m.class_name()));
    tokens.join(" ")
}

/// Tags every graph element with its display handle and writes the explorer's current marks
/// into its `class` attribute. Handles and assets left by an earlier run are replaced, so
/// feeding an explorer back in yields the same output as the first run.
pub fn annotate(doc: &SvgDocument<'_>, explorer: &Explorer) -> Rewriter {
    let mut rw = Rewriter::new();
    for asset in doc.injected_assets() {
        rw.replace(asset.clone(), "");
    }
    for el in doc.elements() {
        match &el.handle_value {
            Some(value) => rw.replace(value.clone(), el.handle.0.to_string()),
            None => rw.insert(
                el.class_attr_start,
                format!(r#"{HANDLE_ATTR}="{}" "#, el.handle.0),
            ),
        }

        let class = marked_class(&el.class, &element_marks(el, explorer));
        if class != el.class {
            rw.replace(
                el.class_value.clone(),
                htmlize::escape_all_quotes(class.as_str()).into_owned(),
            );
        }
    }
    rw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_edits_inside_the_window_only() {
        let source = "0123456789";
        let mut rw = Rewriter::new();
        rw.insert(1, "a");
        rw.replace(4..6, "XY");
        rw.insert(9, "z");
        assert_eq!(rw.apply(source, 0..10), "0a123XY678z9");
        assert_eq!(rw.apply(source, 2..8), "23XY67");
    }

    #[test]
    fn insertion_before_replacement_at_the_same_offset() {
        let mut rw = Rewriter::new();
        rw.replace(2..4, "--");
        rw.insert(2, "+");
        assert_eq!(rw.apply("abcdef", 0..6), "ab+--ef");
    }

    #[test]
    fn existing_handles_are_renumbered_in_place() {
        let text = r#"<svg><g data-depscope="9" class="node"><title>a</title></g></svg>"#;
        let doc = SvgDocument::parse(text).unwrap();
        let explorer = Explorer::from_view(&doc.graph_view());
        let out = annotate(&doc, &explorer).apply(text, 0..text.len());
        assert_eq!(out, r#"<svg><g data-depscope="0" class="node"><title>a</title></g></svg>"#);
    }

    #[test]
    fn marked_class_replaces_stale_marks() {
        assert_eq!(
            marked_class("node selected hovered", &[Mark::SelectedOut]),
            "node selected-out"
        );
        assert_eq!(marked_class("edge", &[]), "edge");
    }
}
