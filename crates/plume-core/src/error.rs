use thiserror::Error;

/// Error taxonomy for the client workflow.
///
/// Every variant carries owned strings rather than wrapped source errors
/// so the type stays `Clone` and can travel on the TUI action channel.
/// All variants are caught at the action boundary and rendered as an
/// error notice; none propagate past the workflow controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlumeError {
    /// A required field is missing or empty. Detected locally, before
    /// any remote call is made.
    #[error("{0}")]
    Validation(String),

    /// A workflow-ordering precondition is not met (analyzing an empty
    /// corpus, generating without a style profile). Detected locally.
    #[error("{0}")]
    Precondition(String),

    /// Network or server failure on a non-generation call.
    #[error("Server error: {0}")]
    Transport(String),

    /// The server refused or failed to generate. The detail string, if
    /// present, is shown verbatim.
    #[error("{}", detail.as_deref().unwrap_or("Article generation failed"))]
    Generation { detail: Option<String> },

    /// Another remote operation is still in flight.
    #[error("Another operation is still running")]
    Busy,

    /// Local I/O failure (saving a download, reading an upload,
    /// writing to the clipboard).
    #[error("{0}")]
    Io(String),

    /// Configuration file could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlumeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_detail_shown_verbatim() {
        let err = PlumeError::Generation {
            detail: Some("ANTHROPIC_API_KEY not configured".into()),
        };
        assert_eq!(err.to_string(), "ANTHROPIC_API_KEY not configured");
    }

    #[test]
    fn generation_without_detail_uses_generic_message() {
        let err = PlumeError::Generation { detail: None };
        assert_eq!(err.to_string(), "Article generation failed");
    }
}
