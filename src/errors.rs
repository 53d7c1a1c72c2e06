use std::path::PathBuf;
use thiserror::Error;

/// The central error type for the quiz.
///
/// Nothing below the CLI layer is fatal: generation and storage failures are
/// caught at their component boundary and turned into fallbacks or notices.
/// This type exists so those boundaries have something typed to convert.
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a single question could not be produced by the generation service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("could not reach generation service: {0}")]
    Transport(String),

    #[error("generation service returned status {status}")]
    ServiceUnavailable { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid question: {0}")]
    SchemaViolation(String),
}

impl GenerationError {
    /// Short tag used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Transport(_) => "transport",
            Self::ServiceUnavailable { .. } => "service-unavailable",
            Self::MalformedResponse(_) => "malformed-json",
            Self::SchemaViolation(_) => "schema-violation",
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("statistics at {path} are corrupted: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("failed to encode statistics: {0}")]
    Encode(String),
}

/// The presenter could not collect an answer or a decision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("input stream closed")]
    Closed,

    #[error("invalid selection: {0}")]
    Invalid(String),

    #[error("failed to read input: {0}")]
    Io(String),
}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        InputError::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_STORAGE_ERROR: u8 = 3;

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if let Some(quiz_err) = e.downcast_ref::<QuizError>() {
        return match quiz_err {
            QuizError::Config(_) => EXIT_CONFIG_ERROR,
            QuizError::Storage(_) => EXIT_STORAGE_ERROR,
            _ => EXIT_ERROR,
        };
    }

    if e.downcast_ref::<StorageError>().is_some() {
        return EXIT_STORAGE_ERROR;
    }

    EXIT_ERROR
}
