use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuntError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid decimal scalar: {0}")]
    InvalidScalar(String),

    #[error("Curve backend failed startup self-check")]
    BackendSelfCheck,
}

pub type Result<T> = std::result::Result<T, HuntError>;
