//! Error types for MIME operations.

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A header value contains a line break and would inject extra headers.
    #[error("Header {name} contains a line break")]
    HeaderInjection {
        /// Name of the offending header.
        name: &'static str,
    },
}
