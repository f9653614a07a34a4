use thiserror::Error;

/// Errores al construir el modelo a partir de documentos externos.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("unknown param type: {0}")]
    UnknownParamType(String),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}
