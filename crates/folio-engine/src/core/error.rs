use thiserror::Error;

/// Failures the engine can report. Only configuration loading surfaces these
/// to the caller; decorative paths log and carry on.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("invalid script manifest: {0}")]
    Config(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
}
