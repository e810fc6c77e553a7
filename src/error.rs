use thiserror::Error;

/// Failure reported by the record store, propagated untranslated.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store not configured: {0}")]
    NotConfigured(String),

    #[error("record store rejected request on '{table}' ({status}): {message}")]
    Rejected {
        table: String,
        status: u16,
        message: String,
    },

    #[error("record store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("record store returned malformed data: {0}")]
    Malformed(String),

    #[error("insert into '{0}' returned no rows")]
    EmptyInsert(String),
}

/// Missing or unusable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Store(_) => 500,
            Self::NotFound(_) => 404,
            Self::BadRequest(_) => 400,
        }
    }
}
