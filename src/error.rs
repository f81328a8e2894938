use thiserror::Error;

#[derive(Debug, Error)]
pub enum LegitrackError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request failed ({url}): {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, LegitrackError>;
