use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("please provide a prompt file")]
    MissingPromptFile,

    #[error("{}: {source}", .path.display())]
    ReadPromptFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} contains no passages", .0.display())]
    EmptyPromptFile(PathBuf),

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
