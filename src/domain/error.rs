//! Engine error types.

/// Top-level error type for stocklens.
///
/// `Database` means the store itself is unreachable (no pooled connection);
/// `DatabaseQuery` means a statement failed on an established connection.
/// The analyzer degrades `DatabaseQuery` to a neutral zero result but always
/// propagates `Database`, since no computation is meaningful without a store.
#[derive(Debug, thiserror::Error)]
pub enum StocklensError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid instrument name derived from {source_name:?}")]
    InvalidInstrumentName { source_name: String },

    #[error("source read error in {file}: {reason}")]
    SourceRead { file: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StocklensError> for std::process::ExitCode {
    fn from(err: &StocklensError) -> Self {
        let code: u8 = match err {
            StocklensError::Io(_) => 1,
            StocklensError::ConfigParse { .. } | StocklensError::ConfigMissing { .. } => 2,
            StocklensError::Database { .. } | StocklensError::DatabaseQuery { .. } => 3,
            StocklensError::InvalidInstrumentName { .. } => 4,
            StocklensError::SourceRead { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
