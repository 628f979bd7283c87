use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Cli(String),
    Load(String),
    Write(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Cli(message) => write!(f, "{}", message),
            AppError::Load(message) => write!(f, "{}", message),
            AppError::Write(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for AppError {}
