//! Graphviz SVG ingestion.
//!
//! Nodes and edges are `<g>` groups whose `class` attribute carries the token `node` or
//! `edge`; the endpoint names come from the group's `<title>` child. Byte ranges into the
//! source text are kept so the output can be produced by splicing the original markup instead
//! of re-serializing the tree.

use crate::assets::ASSET_IDS;
use crate::error::{Error, Result};
use crate::rewrite::HANDLE_ATTR;
use depscope_core::{DisplayHandle, GraphView};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Edge,
}

#[derive(Debug, Clone)]
pub struct GraphElement {
    pub kind: ElementKind,
    pub handle: DisplayHandle,
    /// Title text (entity-decoded); falls back to the `id` attribute.
    pub title: String,
    /// Decoded `class` attribute value.
    pub class: String,
    /// Start of the `class` attribute's qualified name.
    pub class_attr_start: usize,
    /// Raw value range of the `class` attribute, quotes excluded.
    pub class_value: Range<usize>,
    /// Raw value range of a handle attribute left by an earlier run.
    pub handle_value: Option<Range<usize>>,
}

pub struct SvgDocument<'input> {
    text: &'input str,
    doc: roxmltree::Document<'input>,
    elements: Vec<GraphElement>,
    assets: Vec<Range<usize>>,
}

impl std::fmt::Debug for SvgDocument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgDocument")
            .field("len", &self.text.len())
            .field("elements", &self.elements.len())
            .field("assets", &self.assets.len())
            .finish()
    }
}

fn has_class_token(class: &str, token: &str) -> bool {
    class.split_ascii_whitespace().any(|t| t == token)
}

fn title_text(node: roxmltree::Node<'_, '_>) -> Option<String> {
    let title = node
        .children()
        .find(|c| c.is_element() && c.has_tag_name("title"))?;
    let text: String = title
        .descendants()
        .filter(|d| d.is_text())
        .filter_map(|d| d.text())
        .collect();
    Some(text)
}

impl<'input> SvgDocument<'input> {
    pub fn parse(text: &'input str) -> Result<Self> {
        // Graphviz emits a DOCTYPE pointing at the SVG 1.1 DTD.
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)?;

        let root = doc.root_element();
        if !root.has_tag_name("svg") {
            return Err(Error::MissingSvgRoot {
                found: root.tag_name().name().to_string(),
            });
        }

        let mut elements = Vec::new();
        for node in root.descendants() {
            if !node.is_element() || !node.has_tag_name("g") {
                continue;
            }
            let Some(class_attr) = node.attributes().find(|a| a.name() == "class") else {
                continue;
            };
            let class = class_attr.value();
            let kind = if has_class_token(class, "node") {
                ElementKind::Node
            } else if has_class_token(class, "edge") {
                ElementKind::Edge
            } else {
                continue;
            };

            let title = title_text(node).or_else(|| node.attribute("id").map(str::to_string));
            let Some(title) = title else {
                tracing::warn!(
                    offset = node.range().start,
                    "graph element without <title> or id; skipping"
                );
                continue;
            };

            elements.push(GraphElement {
                kind,
                handle: DisplayHandle(elements.len()),
                title,
                class: class.to_string(),
                class_attr_start: class_attr.range_qname().start,
                class_value: class_attr.range_value(),
                handle_value: node
                    .attributes()
                    .find(|a| a.name() == HANDLE_ATTR && a.namespace().is_none())
                    .map(|a| a.range_value()),
            });
        }

        // Explorer assets injected by an earlier run, each with the newline that follows it.
        let assets: Vec<Range<usize>> = root
            .children()
            .filter(|c| c.is_element())
            .filter(|c| c.attribute("id").is_some_and(|id| ASSET_IDS.contains(&id)))
            .map(|c| {
                let range = c.range();
                if text[range.end..].starts_with('\n') {
                    range.start..range.end + 1
                } else {
                    range
                }
            })
            .collect();

        tracing::debug!(
            elements = elements.len(),
            assets = assets.len(),
            "parsed svg document"
        );
        Ok(Self {
            text,
            doc,
            elements,
            assets,
        })
    }

    pub fn text(&self) -> &'input str {
        self.text
    }

    pub fn elements(&self) -> &[GraphElement] {
        &self.elements
    }

    /// Ranges of previously injected `<style>`, panel and `<script>` children of the root.
    pub fn injected_assets(&self) -> &[Range<usize>] {
        &self.assets
    }

    /// The root's `viewBox` as `[min-x, min-y, width, height]`.
    pub fn view_box(&self) -> Option<[f64; 4]> {
        let raw = self.doc.root_element().attribute("viewBox")?;
        let mut parts = raw
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(str::parse::<f64>);
        let mut out = [0.0; 4];
        for slot in &mut out {
            *slot = parts.next()?.ok()?;
        }
        match parts.next() {
            Some(_) => None,
            None => Some(out),
        }
    }

    pub fn graph_view(&self) -> GraphView {
        let mut view = GraphView::new();
        for el in &self.elements {
            match el.kind {
                ElementKind::Node => view.push_node(el.title.clone(), el.handle),
                ElementKind::Edge => view.push_edge(el.title.clone(), el.handle),
            }
        }
        view
    }

    /// Range of the graph body: the first `<g>` child of the root (`/svg/g`), or the root's
    /// inner content when there is none.
    pub fn graph_body(&self) -> Range<usize> {
        let root = self.doc.root_element();
        match root
            .children()
            .find(|c| c.is_element() && c.has_tag_name("g"))
        {
            Some(g) => g.range(),
            None => self.root_inner(),
        }
    }

    /// Range between the root's start tag and its closing tag (empty for `<svg/>`).
    pub fn root_inner(&self) -> Range<usize> {
        let start = self.root_start_tag_end();
        match self.root_close_tag_start() {
            Some(end) => start..end,
            None => start..start,
        }
    }

    fn root_start_tag_end(&self) -> usize {
        let root = self.doc.root_element();
        let range = root.range();
        // Attribute values may contain `>`, so search after the last one.
        let from = root
            .attributes()
            .map(|a| a.range_value().end + 1)
            .max()
            .unwrap_or(range.start)
            .min(range.end);
        match self.text[from..range.end].find('>') {
            Some(rel) if self.text[..from + rel].ends_with('/') => from + rel - 1,
            Some(rel) => from + rel + 1,
            None => range.end,
        }
    }

    /// Start of `</svg>`; `None` for a self-closing root.
    pub fn root_close_tag_start(&self) -> Option<usize> {
        let range = self.doc.root_element().range();
        let raw = &self.text[range.clone()];
        if raw.ends_with("/>") && !raw.contains("</") {
            return None;
        }
        raw.rfind("</").map(|rel| range.start + rel)
    }

    /// Qualified name of the root element as written in the source (e.g. `svg`).
    pub fn root_qname(&self) -> &'input str {
        let start = self.doc.root_element().range().start + 1;
        let rest = &self.text[start..];
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .unwrap_or(rest.len());
        &rest[..end]
    }

    pub fn root_range(&self) -> Range<usize> {
        self.doc.root_element().range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN"
 "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg width="62pt" height="116pt" viewBox="0.00 0.00 62.00 116.00" xmlns="http://www.w3.org/2000/svg">
<g id="graph0" class="graph" transform="translate(4 112)">
<title>G</title>
<g id="node1" class="node"><title>a</title><ellipse cx="27" cy="-90" rx="27" ry="18"/></g>
<g id="node2" class="node"><title>b</title><ellipse cx="27" cy="-18" rx="27" ry="18"/></g>
<g id="edge1" class="edge"><title>a&#45;&gt;b</title><path d="M27,-71.7C27,-63.98 27,-54.71 27,-46.11"/></g>
</g>
</svg>
"#;

    #[test]
    fn collects_nodes_and_edges_in_document_order() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        let kinds: Vec<_> = doc.elements().iter().map(|e| (e.kind, e.title.as_str())).collect();
        assert_eq!(
            kinds,
            [
                (ElementKind::Node, "a"),
                (ElementKind::Node, "b"),
                (ElementKind::Edge, "a->b"),
            ]
        );
        let handles: Vec<usize> = doc.elements().iter().map(|e| e.handle.0).collect();
        assert_eq!(handles, [0, 1, 2]);
    }

    #[test]
    fn class_ranges_point_into_the_source() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        let node = &doc.elements()[0];
        assert_eq!(&doc.text()[node.class_value.clone()], "node");
        assert!(doc.text()[node.class_attr_start..].starts_with("class="));
    }

    #[test]
    fn graph_body_is_the_first_group() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        let body = &doc.text()[doc.graph_body()];
        assert!(body.starts_with(r#"<g id="graph0""#));
        assert!(body.ends_with("</g>"));
    }

    #[test]
    fn graph_body_falls_back_to_root_content() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg"><title>x</title></svg>"#;
        let doc = SvgDocument::parse(text).unwrap();
        assert_eq!(&doc.text()[doc.graph_body()], "<title>x</title>");
    }

    #[test]
    fn self_closing_root_has_no_closing_tag() {
        let doc = SvgDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
        assert_eq!(doc.root_close_tag_start(), None);
        assert!(doc.root_inner().is_empty());
        assert_eq!(doc.root_qname(), "svg");
    }

    #[test]
    fn rejects_non_svg_root() {
        let err = SvgDocument::parse("<html><body/></html>").unwrap_err();
        assert!(matches!(err, Error::MissingSvgRoot { ref found } if found == "html"));
    }

    #[test]
    fn rejects_malformed_xml() {
        let err = SvgDocument::parse("<svg><g></svg>").unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }

    #[test]
    fn node_without_title_falls_back_to_id() {
        let text = r#"<svg><g id="n1" class="node"><ellipse/></g><g class="node"/></svg>"#;
        let doc = SvgDocument::parse(text).unwrap();
        let titles: Vec<&str> = doc.elements().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["n1"]);
    }

    #[test]
    fn reads_the_view_box() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.view_box(), Some([0.0, 0.0, 62.0, 116.0]));
        let bare = SvgDocument::parse(r#"<svg viewBox="0 0 10"/>"#).unwrap();
        assert_eq!(bare.view_box(), None);
    }

    #[test]
    fn finds_handles_and_assets_from_an_earlier_run() {
        let text = r#"<svg><g id="n1" data-depscope="7" class="node"><title>a</title></g>
<style id="depscope-style" type="text/css"/>
<script id="depscope-script" type="text/javascript"/>
</svg>"#;
        let doc = SvgDocument::parse(text).unwrap();
        let handle = doc.elements()[0].handle_value.clone().unwrap();
        assert_eq!(&text[handle], "7");
        let assets: Vec<&str> = doc.injected_assets().iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(
            assets,
            [
                "<style id=\"depscope-style\" type=\"text/css\"/>\n",
                "<script id=\"depscope-script\" type=\"text/javascript\"/>\n",
            ]
        );
    }

    #[test]
    fn ignores_groups_with_other_classes() {
        let text = r#"<svg><g class="cluster"><title>c</title></g><g class="nodes"><title>x</title></g></svg>"#;
        let doc = SvgDocument::parse(text).unwrap();
        assert!(doc.elements().is_empty());
    }
}
