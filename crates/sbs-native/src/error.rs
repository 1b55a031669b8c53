use sbs_core::SbsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0}")]
    Core(SbsError),

    #[error("Invalid {what}: '{value}'")]
    InvalidArgument { what: &'static str, value: String },

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Unknown command: '{0}'")]
    UnknownCommand(String),
}

impl From<SbsError> for CliError {
    fn from(err: SbsError) -> Self {
        Self::Core(err)
    }
}

impl CliError {
    pub fn invalid(what: &'static str, value: &str) -> Self {
        Self::InvalidArgument {
            what,
            value: value.to_owned(),
        }
    }
}
