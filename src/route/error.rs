//! Navigation-specific error types.

/// Errors that can occur while navigating.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Location could not be parsed or resolved
    #[error("Invalid location '{location}': {source}")]
    InvalidLocation {
        location: String,
        source: url::ParseError,
    },
}
