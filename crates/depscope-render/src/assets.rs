//! Client-side assets shipped inside every output.
//!
//! The script is the browser counterpart of `depscope_core`: it reads the serialized
//! [`AdjacencyIndex`](depscope_core::AdjacencyIndex) instead of scanning the DOM, keeps one
//! selection state, renders the sidebar with the same markup as
//! [`Panel::to_html`](depscope_core::Panel::to_html), and binds selection to
//! `history.pushState`/`popstate`.

use crate::config::ViewerConfig;
use crate::error::{Error, Result};
use depscope_core::Explorer;
use serde::Serialize;

/// `id` of the `<style>` appended to an SVG root.
pub const STYLE_ID: &str = "depscope-style";
/// `id` of the `<foreignObject>` that hosts the sidebar in SVG output.
pub const PANEL_HOST_ID: &str = "depscope-panel-host";
/// `id` of the `<script>` appended to an SVG root.
pub const SCRIPT_ID: &str = "depscope-script";
/// Root children that a later run replaces instead of duplicating.
pub const ASSET_IDS: [&str; 3] = [STYLE_ID, PANEL_HOST_ID, SCRIPT_ID];

/// Defines `depscopeInit(boot)`; callers append the invocation.
pub const SCRIPT: &str = r##"
function depscopeInit(boot) {
  "use strict";
  var index = boot.index;
  var MARKS = ["selected", "selected-in", "selected-out"];
  var has = function (obj, key) { return Object.prototype.hasOwnProperty.call(obj, key); };

  var elements = {};
  document.querySelectorAll("[data-depscope]").forEach(function (el) {
    MARKS.forEach(function (m) { el.classList.remove(m); });
    elements[el.getAttribute("data-depscope")] = el;
  });
  var nameByHandle = {};
  Object.keys(index.nodes).forEach(function (name) {
    nameByHandle[index.nodes[name].handle] = name;
  });

  function nodeElement(name) {
    return has(index.nodes, name) ? elements[index.nodes[name].handle] : null;
  }
  function edgeElement(id) {
    var edge = index.edges[id];
    return edge ? elements[edge.handle] : null;
  }
  function neighbors(map, name) {
    return has(map, name) ? map[name] : [];
  }

  var state = { selected: null, marked: [] };

  function mark(el, cls) {
    if (el) {
      el.classList.add(cls);
      state.marked.push(el);
    }
  }
  function clear() {
    state.marked.forEach(function (el) {
      MARKS.forEach(function (m) { el.classList.remove(m); });
    });
    state.marked = [];
    state.selected = null;
  }
  function apply(name) {
    if (!has(index.nodes, name)) return false;
    clear();
    mark(nodeElement(name), "selected");
    neighbors(index.outEdges, name).forEach(function (n) {
      mark(edgeElement(n.edge), "selected-out");
      mark(nodeElement(n.to), "selected-out");
    });
    neighbors(index.inEdges, name).forEach(function (n) {
      mark(edgeElement(n.edge), "selected-in");
      mark(nodeElement(n.to), "selected-in");
    });
    state.selected = name;
    return true;
  }
  function fragment(name) {
    return "#" + encodeURIComponent(name);
  }
  function select(name) {
    if (state.selected === name) {
      clear();
      try { history.replaceState(null, "", location.pathname + location.search); } catch (e) {}
      renderPanel();
      return;
    }
    if (apply(name)) {
      try { history.pushState({ name: name }, name, fragment(name)); } catch (e) {}
      renderPanel();
    }
  }
  function reselect(name) {
    if (apply(name)) renderPanel();
  }
  function setHovered(name, on) {
    var el = nodeElement(name);
    if (el) el.classList.toggle("hovered", on);
  }

  var panel = document.getElementById("panel");
  function escapeHtml(s) {
    return String(s).replace(/[&<>"']/g, function (c) {
      return { "&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;", "'": "&#x27;" }[c];
    });
  }
  function list(id, heading, names) {
    var items = names.map(function (name) {
      var n = escapeHtml(name);
      return '<li class="node-name" data-node="' + n + '">' + n + "</li>";
    });
    return '<div id="' + id + '"><h2>' + heading + "</h2><ul>" + items.join("") + "</ul></div>";
  }
  function renderPanel() {
    if (!panel) return;
    if (state.selected === null) {
      panel.innerHTML = list("tops-list", "Tops", index.tops) +
        list("bottoms-list", "Bottoms", index.bottoms);
      return;
    }
    var to = function (n) { return n.to; };
    panel.innerHTML =
      '<div id="selected-area"><h2>Selected</h2><span class="node-name">' +
      escapeHtml(state.selected) + "</span></div>" +
      list("in-edges-list", "In Edges", neighbors(index.inEdges, state.selected).map(to)) +
      list("out-edges-list", "Out Edges", neighbors(index.outEdges, state.selected).map(to));
  }

  if (panel) {
    var entry = function (evt) {
      return evt.target && evt.target.closest ? evt.target.closest("[data-node]") : null;
    };
    panel.addEventListener("click", function (evt) {
      var li = entry(evt);
      if (li) select(li.getAttribute("data-node"));
    });
    panel.addEventListener("mouseover", function (evt) {
      var li = entry(evt);
      if (li) setHovered(li.getAttribute("data-node"), true);
    });
    panel.addEventListener("mouseout", function (evt) {
      var li = entry(evt);
      if (li) setHovered(li.getAttribute("data-node"), false);
    });
  }
  Object.keys(nameByHandle).forEach(function (handle) {
    var el = elements[handle];
    if (!el) return;
    el.addEventListener("click", function (evt) {
      evt.preventDefault();
      select(nameByHandle[handle]);
    });
  });
  window.addEventListener("popstate", function (evt) {
    if (evt.state && evt.state.name) reselect(evt.state.name);
  });

  var start = boot.selected;
  if (location.hash.length > 1) {
    try { start = decodeURIComponent(location.hash.slice(1)); } catch (e) {}
  }
  if (start && apply(start)) {
    try { history.replaceState({ name: start }, start, fragment(start)); } catch (e) {}
  }
  renderPanel();

  if (boot.panZoom && typeof svgPanZoom === "function") {
    svgPanZoom("#viz", { maxZoom: boot.maxZoom });
  }
}
"##;

pub const STYLE: &str = r#"
#panel {
  position: absolute;
  height: 100vh;
  right: 0;
  top: 0;
  box-sizing: border-box;
  background: rgba(220, 220, 220, 0.9);
  padding-left: 10px;
  padding-right: 10px;
  overflow: scroll;
}
.node-name {
  font-family: monospace;
  cursor: pointer;
}
.node-name:hover {
  color: orange;
}
#panel h2 {
  font-family: sans-serif;
}
#selected-area {
  color: red;
}
#in-edges-list {
  color: green;
}
#out-edges-list {
  color: blue;
}

.node {
  cursor: pointer;
}
.node path, .node ellipse, .node polygon {
  fill: #afeeee;
  stroke: #afeeee;
}
.node.selected path, .node.selected ellipse, .node.selected polygon {
  fill: red;
  stroke: red;
}
.node.selected-in path, .node.selected-in ellipse, .node.selected-in polygon {
  fill: green;
  stroke: green;
}
.node.selected-out path, .node.selected-out ellipse, .node.selected-out polygon {
  fill: blue;
  stroke: blue;
}
.node.hovered path, .node.hovered ellipse, .node.hovered polygon {
  fill: orange;
  stroke: orange;
}
.node.selected text, .node.selected-in text, .node.selected-out text {
  fill: white;
}

.edge path {
  stroke: black;
}
.edge.selected-in path {
  stroke: green;
}
.edge.selected-in polygon {
  fill: green;
  stroke: green;
}
.edge.selected-out path {
  stroke: blue;
}
.edge.selected-out polygon {
  fill: blue;
  stroke: blue;
}
"#;

pub fn stylesheet(config: &ViewerConfig) -> String {
    format!("{STYLE}#panel {{\n  width: {}px;\n}}\n", config.panel_width)
}

/// In SVG output the panel lives in a `<foreignObject>` spanning the viewBox; only the panel
/// itself takes pointer events so the graph underneath stays clickable.
const SVG_PANEL_STYLE: &str = r#"
#depscope-panel-host {
  pointer-events: none;
}
#depscope-panel-host #panel {
  pointer-events: auto;
  height: 100%;
  max-width: 40%;
}
"#;

pub fn svg_stylesheet(config: &ViewerConfig) -> String {
    let mut css = stylesheet(config);
    css.push_str(SVG_PANEL_STYLE);
    css
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Bootstrap<'a> {
    index: &'a depscope_core::AdjacencyIndex,
    selected: Option<&'a str>,
    pan_zoom: bool,
    max_zoom: f64,
}

/// JSON argument for `depscopeInit`.
pub fn bootstrap_json(explorer: &Explorer, pan_zoom: bool, max_zoom: f64) -> Result<String> {
    let boot = Bootstrap {
        index: explorer.index(),
        selected: explorer.state().selected_name(explorer.index()),
        pan_zoom,
        max_zoom,
    };
    serde_json::to_string(&boot).map_err(Error::Json)
}
