use crate::assets;
use crate::config::ViewerConfig;
use crate::document::SvgDocument;
use crate::error::Result;
use crate::rewrite::annotate;
use depscope_core::Explorer;
use std::fmt::Write as _;

/// Wraps `content` in a CDATA section, splitting any `]]>` it contains.
pub fn cdata(content: &str) -> String {
    format!(
        "<![CDATA[{}]]>",
        content.replace("]]>", "]]]]><![CDATA[>")
    )
}

/// `<foreignObject>` spanning the viewBox (or the whole viewport) with the pre-rendered sidebar.
fn panel_host(doc: &SvgDocument<'_>, explorer: &Explorer) -> String {
    let [x, y, width, height] = match doc.view_box() {
        Some(vb) => vb.map(|v| v.to_string()),
        None => ["0", "0", "100%", "100%"].map(str::to_string),
    };
    format!(
        r#"<foreignObject id="{}" x="{x}" y="{y}" width="{width}" height="{height}"><div xmlns="http://www.w3.org/1999/xhtml" id="panel">{}</div></foreignObject>"#,
        assets::PANEL_HOST_ID,
        explorer.panel().to_html()
    )
}

/// Returns the original document with the sidebar, `<style>` and `<script>` appended as the last
/// children of the root `<svg>`. Everything outside the annotated elements is copied byte for
/// byte; assets from an earlier run are replaced.
pub fn inject_svg(
    doc: &SvgDocument<'_>,
    explorer: &Explorer,
    config: &ViewerConfig,
) -> Result<String> {
    let text = doc.text();
    let rw = annotate(doc, explorer);

    // Pan/zoom needs the external library and the HTML viewport; a standalone SVG gets neither.
    let boot = assets::bootstrap_json(explorer, false, config.max_zoom)?;
    let script = format!("{}\ndepscopeInit({boot});\n", assets::SCRIPT);

    let mut injected = panel_host(doc, explorer);
    let _ = write!(
        &mut injected,
        "\n<style id=\"{}\" type=\"text/css\">{}</style>\n",
        assets::STYLE_ID,
        cdata(&assets::svg_stylesheet(config))
    );
    let _ = write!(
        &mut injected,
        "<script id=\"{}\" type=\"text/javascript\">{}</script>\n",
        assets::SCRIPT_ID,
        cdata(&script)
    );

    let mut out = String::with_capacity(text.len() + injected.len() + rw.len() * 24);
    match doc.root_close_tag_start() {
        Some(close) => {
            out.push_str(&rw.apply(text, 0..close));
            out.push_str(&injected);
            out.push_str(&text[close..]);
        }
        None => {
            // `<svg .../>`: reopen the element so it can hold children.
            let root = doc.root_range();
            let slash = root.end - 2;
            out.push_str(&rw.apply(text, 0..slash));
            out.push('>');
            out.push_str(&injected);
            out.push_str("</");
            out.push_str(doc.root_qname());
            out.push('>');
            out.push_str(&text[root.end..]);
        }
    }

    tracing::debug!(bytes = out.len(), "injected script and style into svg");
    Ok(out)
}
