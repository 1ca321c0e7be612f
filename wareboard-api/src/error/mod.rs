//! Error types

mod api;
mod field;
mod validation;

pub use api::*;
pub use field::*;
pub use validation::*;

/// Top-level error type for the warehouse client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the REST API layer.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Error from the cache layer.
    #[error("Cache error: {0}")]
    Cache(String),
}

impl Error {
    /// Maps this error to a short user-facing message.
    ///
    /// HTTP errors map by status code; everything else falls back to a
    /// generic connectivity message.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Api(api) => api.user_message(),
            Error::Cache(_) => "Unable to load data. Please try again.",
        }
    }
}
