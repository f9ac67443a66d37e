pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error parsing XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("expected an <svg> root element, found <{found}>")]
    MissingSvgRoot { found: String },

    #[error("invalid viewer config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("graph index JSON error: {0}")]
    Json(#[source] serde_json::Error),

    #[error(transparent)]
    Core(#[from] depscope_core::Error),
}
