pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "{count} edge title(s) do not name exactly two endpoints separated by `->` (first: {first:?})"
    )]
    MalformedEdges { count: usize, first: String },

    #[error("Unknown node: {name}")]
    UnknownNode { name: String },
}
