//! Domain error types.

/// Top-level error type for tradegate.
#[derive(Debug, thiserror::Error)]
pub enum TradegateError {
    #[error("state file error in {file}: {reason}")]
    StateParse { file: String, reason: String },

    #[error("trade log error in {file}: {reason}")]
    LogParse { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid trade result {0}: R multiple must be finite")]
    InvalidResult(f64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TradegateError {
    /// Process exit status for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            TradegateError::Io(_) => 1,
            TradegateError::ConfigParse { .. } | TradegateError::ConfigInvalid { .. } => 2,
            TradegateError::StateParse { .. } => 3,
            TradegateError::LogParse { .. } => 4,
            TradegateError::InvalidResult(_) => 5,
        }
    }
}

impl From<&TradegateError> for std::process::ExitCode {
    fn from(err: &TradegateError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
