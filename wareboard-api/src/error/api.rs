//! API error types

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message (typically the raw response body).
        message: String,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Maps this error to a short user-facing message by HTTP status.
    pub fn user_message(&self) -> &'static str {
        match self.status_code() {
            Some(401) => "Your session has expired. Please sign in again.",
            Some(403) => "You do not have permission to view this data.",
            Some(404) => "The requested data could not be found.",
            Some(500) => "Something went wrong on the server. Please try again later.",
            _ => "Unable to load data. Check your connection and try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_by_status() {
        assert_eq!(
            ApiError::http(401, "").user_message(),
            "Your session has expired. Please sign in again."
        );
        assert_eq!(
            ApiError::http(403, "").user_message(),
            "You do not have permission to view this data."
        );
        assert_eq!(
            ApiError::http(404, "").user_message(),
            "The requested data could not be found."
        );
        assert_eq!(
            ApiError::http(500, "").user_message(),
            "Something went wrong on the server. Please try again later."
        );
    }

    #[test]
    fn test_unmapped_statuses_fall_back() {
        assert_eq!(
            ApiError::http(418, "").user_message(),
            "Unable to load data. Check your connection and try again."
        );
        assert_eq!(
            ApiError::parse("bad json").user_message(),
            "Unable to load data. Check your connection and try again."
        );
    }

    #[test]
    fn test_status_code() {
        assert_eq!(ApiError::http(404, "missing").status_code(), Some(404));
        assert_eq!(ApiError::parse("oops").status_code(), None);
    }
}
