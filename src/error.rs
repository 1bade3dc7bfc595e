use crate::bootstrap::BootstrapStep;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error as ThisError;

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;
/// Server error code returned by `create` when the collection already exists.
pub const NAMESPACE_EXISTS_CODE: i32 = 48;

#[derive(Debug, ThisError)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("MongoDB connection error: {0}")]
    Connect(#[source] MongoError),

    #[error("MongoDB query error: {0}")]
    Query(#[source] MongoError),

    #[error("Bootstrap step '{step}' failed: {source}")]
    Step {
        step: BootstrapStep,
        #[source]
        source: MongoError,
    },
}

impl SeedError {
    /// The step that aborted the bootstrap, if the failure came from one.
    pub fn step(&self) -> Option<BootstrapStep> {
        match self {
            SeedError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// True when the server rejected a write because of the unique username index.
    pub fn is_duplicate_key(&self) -> bool {
        self.server_code() == Some(DUPLICATE_KEY_CODE)
    }

    /// True when the target collection was already present.
    pub fn is_namespace_exists(&self) -> bool {
        self.server_code() == Some(NAMESPACE_EXISTS_CODE)
    }

    /// The refusals a second run against a seeded database produces.
    pub fn is_already_initialised(&self) -> bool {
        self.is_namespace_exists() || self.is_duplicate_key()
    }

    fn server_code(&self) -> Option<i32> {
        match self {
            SeedError::Step { source, .. }
            | SeedError::Connect(source)
            | SeedError::Query(source) => server_code(source),
            _ => None,
        }
    }
}

/// Extract the numeric server code from a driver error, if it carries one.
pub fn server_code(err: &MongoError) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Command(cmd) => Some(cmd.code),
        ErrorKind::Write(WriteFailure::WriteError(we)) => Some(we.code),
        ErrorKind::Write(WriteFailure::WriteConcernError(wce)) => Some(wce.code),
        _ => None,
    }
}
