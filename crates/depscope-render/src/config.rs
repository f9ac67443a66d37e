use crate::error::{Error, Result};
use serde::Deserialize;

pub const DEFAULT_PAN_ZOOM_SRC: &str =
    "https://cdn.jsdelivr.net/npm/svg-pan-zoom@3.5.0/dist/svg-pan-zoom.min.js";
pub const DEFAULT_TITLE: &str = "depscope";

/// Viewer settings, loadable from a JSON file (`--config`).
///
/// Keys are camelCase; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewerConfig {
    /// Page `<title>`; HTML output only.
    pub title: Option<String>,
    /// Sidebar width in CSS pixels.
    pub panel_width: u32,
    /// Load svg-pan-zoom and enable pan/zoom; HTML output only.
    pub pan_zoom: bool,
    pub pan_zoom_src: String,
    pub max_zoom: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: None,
            panel_width: 300,
            pan_zoom: true,
            pan_zoom_src: DEFAULT_PAN_ZOOM_SRC.to_string(),
            max_zoom: 100.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(Error::Config)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }
}
