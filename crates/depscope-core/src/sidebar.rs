//! Sidebar panel content.
//!
//! [`Panel::to_html`] produces the same markup the client script renders, so a page can ship
//! with the panel already filled in.

use crate::index::{AdjacencyIndex, Neighbor};
use crate::selection::SelectionState;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Panel {
    #[serde(rename_all = "camelCase")]
    Selected {
        selected: String,
        out_edges: Vec<String>,
        in_edges: Vec<String>,
    },
    Overview {
        tops: Vec<String>,
        bottoms: Vec<String>,
    },
}

fn names(list: &[Neighbor]) -> Vec<String> {
    list.iter().map(|n| n.to.clone()).collect()
}

impl Panel {
    pub fn render(index: &AdjacencyIndex, state: &SelectionState) -> Self {
        match state.selected_name(index) {
            Some(name) => Panel::Selected {
                selected: name.to_string(),
                out_edges: names(index.out_edges(name)),
                in_edges: names(index.in_edges(name)),
            },
            None => Panel::Overview {
                tops: index.tops().to_vec(),
                bottoms: index.bottoms().to_vec(),
            },
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        match self {
            Panel::Selected {
                selected,
                out_edges,
                in_edges,
            } => {
                let _ = write!(
                    &mut out,
                    r#"<div id="selected-area"><h2>Selected</h2><span class="node-name">{}</span></div>"#,
                    htmlize::escape_text(selected.as_str())
                );
                push_list(&mut out, "in-edges-list", "In Edges", in_edges);
                push_list(&mut out, "out-edges-list", "Out Edges", out_edges);
            }
            Panel::Overview { tops, bottoms } => {
                push_list(&mut out, "tops-list", "Tops", tops);
                push_list(&mut out, "bottoms-list", "Bottoms", bottoms);
            }
        }
        out
    }
}

// Each entry carries `data-node`; the client script binds click (select), mouseover (hover)
// and mouseout (unhover) to it.
fn push_list(out: &mut String, id: &str, heading: &str, names: &[String]) {
    let _ = write!(out, r#"<div id="{id}"><h2>{heading}</h2><ul>"#);
    for name in names {
        let _ = write!(
            out,
            r#"<li class="node-name" data-node="{}">{}</li>"#,
            htmlize::escape_all_quotes(name.as_str()),
            htmlize::escape_text(name.as_str())
        );
    }
    out.push_str("</ul></div>");
}
