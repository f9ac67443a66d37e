use crate::assets;
use crate::config::ViewerConfig;
use crate::document::SvgDocument;
use crate::error::Result;
use crate::rewrite::annotate;
use depscope_core::Explorer;
use std::fmt::Write as _;

/// Renders the full explorer page: the graph body inside `<svg id="viz">`, the pre-rendered
/// sidebar, the serialized index and the client assets.
pub fn render_html(
    doc: &SvgDocument<'_>,
    explorer: &Explorer,
    config: &ViewerConfig,
) -> Result<String> {
    let body = annotate(doc, explorer).apply(doc.text(), doc.graph_body());
    // No `<` may reach the script data state: `</script` ends the element and `<!--` can keep
    // the real end tag from closing it. `\u003c` is the same string to `JSON.parse`.
    let boot = assets::bootstrap_json(explorer, config.pan_zoom, config.max_zoom)?
        .replace('<', "\\u003c");

    let mut out = String::with_capacity(body.len() + boot.len() + assets::SCRIPT.len() + 4096);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        &mut out,
        "<title>{}</title>",
        htmlize::escape_text(config.title())
    );
    let _ = writeln!(&mut out, "<style>{}</style>", assets::stylesheet(config));
    out.push_str("</head>\n<body style=\"margin: 0\">\n");
    out.push_str("<svg id=\"viz\" style=\"width: 100%; height: 100vh;\">\n");
    out.push_str(&body);
    out.push_str("\n</svg>\n");
    let _ = writeln!(&mut out, "<div id=\"panel\">{}</div>", explorer.panel().to_html());
    let _ = writeln!(
        &mut out,
        "<script type=\"application/json\" id=\"depscope-index\">{boot}</script>"
    );
    if config.pan_zoom {
        let _ = writeln!(
            &mut out,
            "<script src=\"{}\"></script>",
            htmlize::escape_attribute(config.pan_zoom_src.as_str())
        );
    }
    let _ = writeln!(
        &mut out,
        "<script>{}\ndepscopeInit(JSON.parse(document.getElementById(\"depscope-index\").textContent));\n</script>",
        assets::SCRIPT
    );
    out.push_str("</body>\n</html>\n");

    tracing::debug!(bytes = out.len(), "rendered html page");
    Ok(out)
}
