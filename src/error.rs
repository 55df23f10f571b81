use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("language model error: {0}")]
    LanguageModel(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// The message without its category prefix.
    pub fn detail(&self) -> String {
        match self {
            AppError::Configuration(message)
            | AppError::VersionControl(message)
            | AppError::LanguageModel(message) => message.clone(),
            AppError::Io(err) => err.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
