pub type StagehandResult<T> = Result<T, StagehandError>;

#[derive(thiserror::Error, Debug)]
pub enum StagehandError {
    #[error("composition not found: {0}")]
    CompositionNotFound(String),

    #[error("root class '{class}' not found in composition '{composition}'")]
    RootClassNotFound { composition: String, class: String },

    #[error("player is not prepared: {0}")]
    NotPrepared(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("load error: {0}")]
    Load(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StagehandError {
    pub fn not_prepared(msg: impl Into<String>) -> Self {
        Self::NotPrepared(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
