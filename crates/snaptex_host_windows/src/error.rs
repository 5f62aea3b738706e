use snaptex_platform::PlatformServicesError;
use thiserror::Error;

/// Host-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("initialization failed: {0}")]
    Init(String),

    #[error(transparent)]
    Platform(#[from] PlatformServicesError),

    #[error("viewer window failed: {0}")]
    Viewer(String),
}

pub type AppResult<T> = Result<T, AppError>;
