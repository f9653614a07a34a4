//! Errores de la CLI: I/O de documentos, parseo y configuración.

use std::path::PathBuf;
use taskgate_core::ConfigError;
use taskgate_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("{}: {source}", path.display())]
    Document { path: PathBuf, source: DomainError },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot render verdict: {0}")]
    Render(#[from] serde_json::Error),
}
