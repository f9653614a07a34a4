//! Constantes de la compuerta.

/// Versión lógica de las reglas de validación. Forma parte del input del
/// fingerprint de `ValidationReport`, de modo que un cambio de reglas produce
/// fingerprints distintos aunque los documentos no cambien.
pub const GATE_VERSION: &str = "G1.0";

/// Variable de entorno que fija el nivel de campos de API habilitados.
pub const API_FIELDS_ENV: &str = "TASKGATE_ENABLE_API_FIELDS";
