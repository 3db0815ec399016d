use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocGenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("No modules found under {}", .0.display())]
    NoModules(PathBuf),

    #[error("Render error for {module}: {message}")]
    Render { module: String, message: String },
}

pub type Result<T> = std::result::Result<T, DocGenError>;
