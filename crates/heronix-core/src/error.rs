use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeronixError>;

#[derive(Error, Debug)]
pub enum HeronixError {
    // Configuration errors with specific guidance
    #[error("Invalid privacy configuration: {issue}.")]
    ConfigInvalid { issue: String },

    #[error("Invalid redaction pattern '{pattern}': {source}")]
    PatternInvalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // Generic serialization (record trees are serde_json values)
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
