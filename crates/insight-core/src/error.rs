use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("invalid dimension '{0}'")]
    InvalidDimension(String),

    #[error("rating for '{key}' must be between 1 and 10, got {value}")]
    OutOfRange { key: String, value: i64 },

    #[error("expected KEY=VALUE with a whole-number rating, got '{0}'")]
    InvalidAssignment(String),

    #[error("incomplete response: no rating for '{0}'")]
    IncompleteResponse(String),

    #[error("stored data under '{key}' is corrupt: {reason}")]
    StorageCorrupt { key: String, reason: String },

    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("Por favor, digite seu nome completo")]
    InvalidName,

    #[error("Por favor, digite um email válido")]
    InvalidEmail,

    #[error("Você precisa aceitar receber conteúdos para continuar")]
    ConsentRequired,

    #[error("not logged in: run 'insight login'")]
    NotLoggedIn,

    #[error("already logged in as {0}")]
    AlreadyLoggedIn(String),

    #[error("no tool is open")]
    NoToolOpen,

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool '{0}' is not available yet")]
    ToolNotImplemented(String),

    #[error("result not found: {0}")]
    ResultNotFound(usize),

    #[error("assessment already submitted: redo it to change ratings")]
    AlreadySubmitted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InsightError>;
