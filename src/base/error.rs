use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Terraform error: {context}, {error}")]
    TerraformError { context: String, error: String },

    #[error("Io error: {context}, {error}")]
    IoError {
        context: String,
        error: std::io::Error,
    },

    #[error("Json error: {context}, {error}")]
    JsonError {
        context: String,
        error: serde_json::Error,
    },

    #[error("Config error: {error}")]
    ConfigError { error: String },
}

impl Error {
    pub fn terraform_error(context: impl Into<String>, error: impl Into<String>) -> Self {
        Self::TerraformError {
            context: context.into(),
            error: error.into(),
        }
    }

    pub fn config_error(error: impl Into<String>) -> Self {
        Self::ConfigError {
            error: error.into(),
        }
    }

    pub fn io_error(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        move |error| Self::IoError {
            context: context.into(),
            error,
        }
    }

    pub fn json_error(context: impl Into<String>) -> impl FnOnce(serde_json::Error) -> Self {
        move |error| Self::JsonError {
            context: context.into(),
            error,
        }
    }

    // io error whose context is "<action> <path>"
    pub fn path_error(action: &str, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        Self::io_error(format!("{} {}", action, path.display()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
