use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum DirsnapError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Root is not a readable directory: {0}")]
    InvalidRoot(PathBuf),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Malformed artifact: {0}")]
    MalformedArtifact(String),
}
impl DirsnapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DirsnapError::Io {
            path: path.into(),
            source,
        }
    }
}
