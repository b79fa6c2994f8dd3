//! CLI-specific error types and exit code mapping

use modsbom_core::error::ModsbomError;
use modsbom_generator::SbomGeneratorError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from modsbom-core.
    #[error("{0}")]
    Core(#[from] ModsbomError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                   |
    /// |------|-------------------------------------------|
    /// | 0    | Success (per-application failures included) |
    /// | 1    | General / command error                   |
    /// | 2    | Configuration error                       |
    /// | 3    | Generation aborted (discovery or global resolution) |
    /// | 10   | IO error                                  |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::Core(core) => match core {
                ModsbomError::Config(_) => 2,
                ModsbomError::Generation(_) => 3,
                ModsbomError::Io(_) => 10,
            },
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<SbomGeneratorError> for CliError {
    fn from(e: SbomGeneratorError) -> Self {
        Self::Core(e.into())
    }
}
