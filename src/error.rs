use std::process::ExitCode;

/// Errors that cause botctl to exit with a specific code.
#[derive(Debug, thiserror::Error)]
pub enum BotControlError {
    #[error("request failed: {status}\nresponse body: {body}")]
    Gateway { status: u16, body: String },

    #[error("platform token expired, refresh your credentials")]
    TokenExpired,

    #[error("invalid platform environment: {0}")]
    InvalidEnvironment(String),

    #[error("invalid variable name: {0}")]
    InvalidVariable(String),

    #[error("no value configured for {variable} in {environment}")]
    MissingVariable {
        environment: String,
        variable: String,
    },

    #[error("not a bot: {0}")]
    UnknownBot(String),

    #[error("transport error: {0}")]
    Transport(#[from] Box<ureq::Error>),

    #[error("could not decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{message}")]
    WithCode { code: u8, message: String },
}

impl BotControlError {
    pub fn new(code: u8, message: String) -> Self {
        BotControlError::WithCode { code, message }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            BotControlError::WithCode { code, .. } => ExitCode::from(*code),
            // Every other recognized platform error exits with -1, which
            // wraps to process status 255.
            _ => ExitCode::from(255),
        }
    }
}

impl From<ureq::Error> for BotControlError {
    fn from(err: ureq::Error) -> Self {
        BotControlError::Transport(Box::new(err))
    }
}
