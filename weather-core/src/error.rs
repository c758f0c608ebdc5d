use thiserror::Error;

/// Failure kinds produced while talking to the upstream weather provider.
///
/// Every variant stays inside the boundary of one request: the HTTP layer
/// turns it into a status code plus a human-readable detail. Nothing is
/// retried or recovered silently.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No credential is configured for the provider.
    #[error("API key is not configured")]
    ApiKeyMissing,

    /// The provider reported the requested city as unknown.
    #[error("City not found")]
    CityNotFound,

    /// The provider was reachable but answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// A success response did not match the expected shape.
    #[error("unexpected provider response: {0}")]
    Schema(String),

    /// The provider could not be reached or its body could not be read.
    #[error("failed to reach weather provider")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_client_facing_details() {
        assert_eq!(ProviderError::ApiKeyMissing.to_string(), "API key is not configured");
        assert_eq!(ProviderError::CityNotFound.to_string(), "City not found");
    }

    #[test]
    fn upstream_display_is_the_carried_message() {
        let err = ProviderError::Upstream { status: 401, message: "Invalid API key".to_string() };
        assert_eq!(err.to_string(), "Invalid API key");
    }
}
