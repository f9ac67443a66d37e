use depscope_render::{
    ExploreOptions, SvgDocument, ViewerConfig, explore, inject_svg, render_html,
};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> String {
    let path: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .join("fixtures")
        .join("graphviz")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn parse_output(out: &str) -> roxmltree::Document<'_> {
    roxmltree::Document::parse_with_options(
        out,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )
    .expect("well-formed output")
}

fn class_of<'a>(doc: &'a roxmltree::Document<'_>, id: &str) -> &'a str {
    doc.descendants()
        .find(|n| n.attribute("id") == Some(id))
        .and_then(|n| n.attribute("class"))
        .unwrap_or_else(|| panic!("missing element {id}"))
}

#[test]
fn injected_svg_ends_with_style_and_script() {
    let text = fixture("chain.svg");
    let doc = SvgDocument::parse(&text).unwrap();
    let explorer = explore(&doc, ExploreOptions::default()).unwrap();
    let out = inject_svg(&doc, &explorer, &ViewerConfig::default()).unwrap();

    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let parsed = roxmltree::Document::parse_with_options(&out, opts).expect("well-formed output");
    let root = parsed.root_element();
    let children: Vec<&str> = root
        .children()
        .filter(|n| n.is_element())
        .map(|n| n.tag_name().name())
        .collect();
    assert_eq!(children[children.len() - 2..], ["style", "script"]);

    let script = root
        .children()
        .filter(|n| n.is_element())
        .last()
        .and_then(|n| n.text())
        .unwrap();
    assert!(script.contains("function depscopeInit(boot)"));
    assert!(script.contains(r#""tops":["A"]"#));
    assert!(out.starts_with("<?xml"));
    assert!(out.contains("<!-- Generated by graphviz"));
}

#[test]
fn every_graph_element_gets_a_handle() {
    let text = fixture("chain.svg");
    let doc = SvgDocument::parse(&text).unwrap();
    let explorer = explore(&doc, ExploreOptions::default()).unwrap();
    let out = inject_svg(&doc, &explorer, &ViewerConfig::default()).unwrap();

    let parsed = roxmltree::Document::parse_with_options(
        &out,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )
    .unwrap();
    let handles: Vec<(&str, &str)> = parsed
        .descendants()
        .filter_map(|n| Some((n.attribute("id")?, n.attribute("data-depscope")?)))
        .collect();
    assert_eq!(
        handles,
        [
            ("node1", "0"),
            ("node2", "1"),
            ("edge1", "2"),
            ("node3", "3"),
            ("edge2", "4"),
        ]
    );
}

#[test]
fn preselection_writes_marks_into_classes() {
    let text = fixture("chain.svg");
    let doc = SvgDocument::parse(&text).unwrap();
    let explorer = explore(
        &doc,
        ExploreOptions {
            select: Some("B"),
            ..Default::default()
        },
    )
    .unwrap();
    let out = inject_svg(&doc, &explorer, &ViewerConfig::default()).unwrap();
    let parsed = roxmltree::Document::parse_with_options(
        &out,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(class_of(&parsed, "node1"), "node selected-in");
    assert_eq!(class_of(&parsed, "node2"), "node selected");
    assert_eq!(class_of(&parsed, "node3"), "node selected-out");
    assert_eq!(class_of(&parsed, "edge1"), "edge selected-in");
    assert_eq!(class_of(&parsed, "edge2"), "edge selected-out");
    assert_eq!(class_of(&parsed, "graph0"), "graph");
}

#[test]
fn html_page_embeds_body_panel_and_index() {
    let text = fixture("chain.svg");
    let doc = SvgDocument::parse(&text).unwrap();
    let explorer = explore(&doc, ExploreOptions::default()).unwrap();
    let page = render_html(&doc, &explorer, &ViewerConfig::default()).unwrap();

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains(r#"<svg id="viz""#));
    assert!(page.contains(r#"<g id="graph0" class="graph""#));
    // Only the graph body is embedded, not the original root or prolog.
    assert!(!page.contains("<?xml"));
    assert!(!page.contains("viewBox="));
    assert!(page.contains(r#"<div id="panel"><div id="tops-list"><h2>Tops</h2><ul><li class="node-name" data-node="A">A</li>"#));
    assert!(page.contains(r#"<script type="application/json" id="depscope-index">"#));
    assert!(page.contains("svg-pan-zoom"));
    assert!(page.contains("<title>depscope</title>"));
}

#[test]
fn html_index_cannot_close_the_script_element() {
    let text = r#"<svg><g class="graph">
<g id="n1" class="node"><title>&lt;/script&gt;</title></g>
</g></svg>"#;
    let doc = SvgDocument::parse(text).unwrap();
    let explorer = explore(&doc, ExploreOptions::default()).unwrap();
    let page = render_html(&doc, &explorer, &ViewerConfig::default()).unwrap();

    let start = page.find(r#"id="depscope-index">"#).unwrap();
    let json_end = page[start..].find("</script>").unwrap() + start;
    assert!(page[start..json_end].contains(r"\u003c/script>"));
}

fn inline_index(page: &str) -> &str {
    let marker = r#"id="depscope-index">"#;
    let start = page.find(marker).unwrap() + marker.len();
    let end = page[start..].find("</script>").unwrap() + start;
    &page[start..end]
}

#[test]
fn html_index_hides_comment_openers() {
    let text = r#"<svg><g class="graph">
<g id="n1" class="node"><title>&lt;!--&lt;script&gt;</title></g>
</g></svg>"#;
    let doc = SvgDocument::parse(text).unwrap();
    let explorer = explore(&doc, ExploreOptions::default()).unwrap();
    let page = render_html(&doc, &explorer, &ViewerConfig::default()).unwrap();

    let json = inline_index(&page);
    assert!(!json.contains('<'));
    let boot: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(boot["index"]["tops"], serde_json::json!(["<!--<script>"]));
}

#[test]
fn html_respects_viewer_config() {
    let text = fixture("chain.svg");
    let doc = SvgDocument::parse(&text).unwrap();
    let explorer = explore(&doc, ExploreOptions::default()).unwrap();
    let config = ViewerConfig {
        title: Some("crate <deps>".to_string()),
        pan_zoom: false,
        panel_width: 360,
        ..Default::default()
    };
    let page = render_html(&doc, &explorer, &config).unwrap();

    assert!(page.contains("<title>crate &lt;deps&gt;</title>"));
    assert!(!page.contains("svg-pan-zoom.min.js"));
    assert!(page.contains("width: 360px;"));
}

#[test]
fn preselected_html_panel_shows_neighbors() {
    let text = fixture("chain.svg");
    let doc = SvgDocument::parse(&text).unwrap();
    let explorer = explore(
        &doc,
        ExploreOptions {
            select: Some("B"),
            ..Default::default()
        },
    )
    .unwrap();
    let page = render_html(&doc, &explorer, &ViewerConfig::default()).unwrap();

    assert!(page.contains(r#"<span class="node-name">B</span>"#));
    assert!(page.contains(r#"<div id="in-edges-list"><h2>In Edges</h2><ul><li class="node-name" data-node="A">A</li></ul></div>"#));
    assert!(page.contains(r#"<div id="out-edges-list"><h2>Out Edges</h2><ul><li class="node-name" data-node="C">C</li></ul></div>"#));
    assert!(page.contains(r#""selected":"B""#));
}

#[test]
fn unknown_preselection_is_an_error() {
    let text = fixture("chain.svg");
    let doc = SvgDocument::parse(&text).unwrap();
    let err = explore(
        &doc,
        ExploreOptions {
            select: Some("Z"),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Unknown node: Z");
}

#[test]
fn strict_mode_rejects_malformed_edges() {
    let text = fixture("malformed-edge.svg");
    let doc = SvgDocument::parse(&text).unwrap();

    let lenient = explore(&doc, ExploreOptions::default()).unwrap();
    assert_eq!(lenient.index().edge_count(), 1);
    assert_eq!(lenient.index().malformed().len(), 1);

    let err = explore(
        &doc,
        ExploreOptions {
            strict: true,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("A--B"));
}

#[test]
fn self_closing_root_is_reopened() {
    let text = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;
    let doc = SvgDocument::parse(text).unwrap();
    let explorer = explore(&doc, ExploreOptions::default()).unwrap();
    let out = inject_svg(&doc, &explorer, &ViewerConfig::default()).unwrap();

    assert!(out.starts_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><foreignObject id="depscope-panel-host" x="0" y="0" width="100%" height="100%">"#
    ));
    assert!(out.ends_with("</script>\n</svg>"));
    roxmltree::Document::parse(&out).expect("well-formed output");
}

#[test]
fn injected_svg_carries_the_sidebar() {
    let text = fixture("chain.svg");
    let doc = SvgDocument::parse(&text).unwrap();
    let explorer = explore(&doc, ExploreOptions::default()).unwrap();
    let out = inject_svg(&doc, &explorer, &ViewerConfig::default()).unwrap();
    let parsed = parse_output(&out);

    let host = parsed
        .descendants()
        .find(|n| n.has_tag_name("foreignObject"))
        .expect("panel host");
    assert_eq!(host.attribute("width"), Some("62"));
    assert_eq!(host.attribute("height"), Some("188"));

    let panel = host
        .descendants()
        .find(|n| n.attribute("id") == Some("panel"))
        .expect("panel");
    assert_eq!(panel.tag_name().namespace(), Some("http://www.w3.org/1999/xhtml"));
    let tops: Vec<&str> = panel
        .descendants()
        .find(|n| n.attribute("id") == Some("tops-list"))
        .expect("tops list")
        .descendants()
        .filter_map(|n| n.attribute("data-node"))
        .collect();
    assert_eq!(tops, ["A"]);
}

#[test]
fn injecting_twice_matches_injecting_once() {
    let text = fixture("chain.svg");
    let options = ExploreOptions {
        select: Some("B"),
        ..Default::default()
    };
    let doc = SvgDocument::parse(&text).unwrap();
    let once = inject_svg(&doc, &explore(&doc, options).unwrap(), &ViewerConfig::default()).unwrap();

    let again = SvgDocument::parse(&once).unwrap();
    assert_eq!(again.injected_assets().len(), 3);
    let twice =
        inject_svg(&again, &explore(&again, options).unwrap(), &ViewerConfig::default()).unwrap();

    let parsed = parse_output(&twice);
    let scripts = parsed.descendants().filter(|n| n.has_tag_name("script")).count();
    assert_eq!(scripts, 1);
    assert_eq!(twice, once);
}

#[test]
fn html_from_an_injected_svg_has_single_handles() {
    let text = fixture("chain.svg");
    let doc = SvgDocument::parse(&text).unwrap();
    let once = inject_svg(
        &doc,
        &explore(&doc, ExploreOptions::default()).unwrap(),
        &ViewerConfig::default(),
    )
    .unwrap();

    let again = SvgDocument::parse(&once).unwrap();
    let page = render_html(
        &again,
        &explore(&again, ExploreOptions::default()).unwrap(),
        &ViewerConfig::default(),
    )
    .unwrap();
    assert!(page.contains(r#"<g id="node1" data-depscope="0" class="node">"#));
    assert_eq!(page.matches("data-depscope=").count(), 5);
}
