use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("missing resource: {0}")]
    MissingResource(String),

    #[error("unknown widget type for option `{opt_id}`: {kind}")]
    UnknownWidgetKind { opt_id: String, kind: String },

    #[error("unknown value provider for option `{opt_id}`: {provider}")]
    UnknownValueProvider { opt_id: String, provider: String },

    #[error("unknown job type: {0}")]
    UnknownJob(String),

    #[error("unknown media type: {0}")]
    UnknownMedia(String),
}
