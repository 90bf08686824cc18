#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JsonPathError {
    #[error("invalid path '{path}': {reason}")]
    Invalid { path: String, reason: String },

    #[error("path '{path}' not found: no value at '{segment}'")]
    NotFound { path: String, segment: String },
}
