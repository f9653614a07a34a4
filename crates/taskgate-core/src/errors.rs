//! Errores de validación.
//!
//! `ValidationError` es un error hoja (una sola categoría). `ValidationErrors`
//! agrupa cero o más hojas: vacío equivale a éxito. `TaskValidationError`
//! envuelve una hoja con la etapa y el nombre del Task al que corresponde.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use taskgate_domain::{ParamType, Quantity};
use thiserror::Error;

/// Nombre de parámetro/resultado -> claves requeridas ausentes.
pub type MissingKeys = IndexMap<String, Vec<String>>;

/// Categoría lógica de un error, independiente del mensaje.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    MissingRequired,
    UnexpectedSupplied,
    TypeMismatch,
    MissingStructuredKeys,
    InvalidOverrideTarget,
    InvalidResourceRequest,
}

/// Resultado emitido cuyo tipo no figura entre los declarados para su nombre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTypeMismatch {
    pub name: String,
    pub expected: Vec<ParamType>,
    pub actual: ParamType,
}

impl fmt::Display for ResultTypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected: Vec<&str> = self.expected.iter().map(|t| t.as_str()).collect();
        write!(f, "{}: expected {}, got {}", self.name, names(&expected), self.actual)
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("Task's declared required resources are missing from the TaskRun: {}", names(.0))]
    MissingResources(Vec<String>),

    #[error("TaskRun's declared resources didn't match usage in Task: {}", names(.0))]
    ExtraResources(Vec<String>),

    #[error("resource {name:?} should be type {expected:?} but was {actual:?}")]
    ResourceTypeMismatch { name: String, expected: String, actual: String },

    #[error("missing values for these params which have no default values: {}", names(.0))]
    MissingParams(Vec<String>),

    #[error("didn't need these params but they were provided anyway: {}", names(.0))]
    ExtraParams(Vec<String>),

    #[error("param types don't match the user-specified type: {}", names(.0))]
    WrongTypeParams(Vec<String>),

    #[error("missing keys for these params which are required in ParamSpec's properties {}", keyed(.0))]
    MissingObjectKeys(MissingKeys),

    #[error("invalid StepOverride: No Step named {name}")]
    InvalidStepOverride { name: String },

    #[error("invalid SidecarOverride: No Sidecar named {name}")]
    InvalidSidecarOverride { name: String },

    #[error("mismatched types for these results: {}", mismatches(.0))]
    MismatchedResultTypes(Vec<ResultTypeMismatch>),

    #[error("missing keys for these results which are required in TaskResult's properties {}", keyed(.0))]
    MissingResultKeys(MissingKeys),

    #[error("invalid request resource value for step {step:?}: {resource} request {request} must be less or equal to limit {limit}")]
    RequestExceedsLimit { step: String, resource: String, request: Quantity, limit: Quantity },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        use ValidationError::*;
        match self {
            MissingResources(_) | MissingParams(_) => ValidationErrorKind::MissingRequired,
            ExtraResources(_) | ExtraParams(_) => ValidationErrorKind::UnexpectedSupplied,
            ResourceTypeMismatch { .. } | WrongTypeParams(_) | MismatchedResultTypes(_) => {
                ValidationErrorKind::TypeMismatch
            }
            MissingObjectKeys(_) | MissingResultKeys(_) => ValidationErrorKind::MissingStructuredKeys,
            InvalidStepOverride { .. } | InvalidSidecarOverride { .. } => ValidationErrorKind::InvalidOverrideTarget,
            RequestExceedsLimit { .. } => ValidationErrorKind::InvalidResourceRequest,
        }
    }

    /// Nombres de las entidades que el error señala, en orden de reporte.
    pub fn names(&self) -> Vec<&str> {
        use ValidationError::*;
        match self {
            MissingResources(v) | ExtraResources(v) | MissingParams(v) | ExtraParams(v) | WrongTypeParams(v) => {
                v.iter().map(|s| s.as_str()).collect()
            }
            MissingObjectKeys(m) | MissingResultKeys(m) => m.keys().map(|s| s.as_str()).collect(),
            MismatchedResultTypes(v) => v.iter().map(|m| m.name.as_str()).collect(),
            ResourceTypeMismatch { name, .. } | InvalidStepOverride { name } | InvalidSidecarOverride { name } => {
                vec![name.as_str()]
            }
            RequestExceedsLimit { step, .. } => vec![step.as_str()],
        }
    }
}

/// Agregado de errores hoja. Un agregado vacío significa éxito.
#[derive(Debug, Error, Default, PartialEq, Eq, Clone)]
#[error("{}", render(.errors))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    pub fn push(&mut self, err: ValidationError) {
        self.errors.push(err);
    }

    /// Agrega el error de `result` si lo hay.
    pub fn push_result(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.errors.push(e);
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn kinds(&self) -> Vec<ValidationErrorKind> {
        self.errors.iter().map(ValidationError::kind).collect()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// `Ok(())` si no hay errores; el agregado completo en otro caso.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<T: IntoIterator<Item = ValidationError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<T: IntoIterator<Item = ValidationError>>(iter: T) -> Self {
        Self { errors: iter.into_iter().collect() }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self { errors: vec![err] }
    }
}

/// Error de validación asociado a un Task concreto.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TaskValidationError {
    #[error("invalid input params for task {task}: {source}")]
    InvalidParams { task: String, source: ValidationError },

    #[error("invalid input resources for task {task}: {source}")]
    InvalidInputResources { task: String, source: ValidationError },

    #[error("invalid output resources for task {task}: {source}")]
    InvalidOutputResources { task: String, source: ValidationError },
}

impl TaskValidationError {
    pub fn task(&self) -> &str {
        match self {
            Self::InvalidParams { task, .. }
            | Self::InvalidInputResources { task, .. }
            | Self::InvalidOutputResources { task, .. } => task,
        }
    }

    pub fn cause(&self) -> &ValidationError {
        match self {
            Self::InvalidParams { source, .. }
            | Self::InvalidInputResources { source, .. }
            | Self::InvalidOutputResources { source, .. } => source,
        }
    }

    pub fn kind(&self) -> ValidationErrorKind {
        self.cause().kind()
    }
}

fn names<S: AsRef<str>>(items: &[S]) -> String {
    let joined: Vec<&str> = items.iter().map(|s| s.as_ref()).collect();
    format!("[{}]", joined.join(", "))
}

fn keyed(map: &MissingKeys) -> String {
    let entries: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {}", names(v))).collect();
    format!("{{{}}}", entries.join(", "))
}

fn mismatches(items: &[ResultTypeMismatch]) -> String {
    let entries: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", entries.join("; "))
}

fn render(errors: &[ValidationError]) -> String {
    let noun = if errors.len() == 1 { "error" } else { "errors" };
    let lines: Vec<String> = errors.iter().map(|e| format!("\t* {e}")).collect();
    format!("{} {noun} occurred:\n{}\n", errors.len(), lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_enumerate_every_name() {
        let e = ValidationError::MissingParams(vec!["a".into(), "b".into()]);
        assert_eq!(e.to_string(), "missing values for these params which have no default values: [a, b]");
        assert_eq!(e.kind(), ValidationErrorKind::MissingRequired);
        assert_eq!(e.names(), vec!["a", "b"]);

        let mut keys = MissingKeys::new();
        keys.insert("cfg".into(), vec!["y".into()]);
        let e = ValidationError::MissingObjectKeys(keys);
        assert!(e.to_string().ends_with("{cfg: [y]}"));
    }

    #[test]
    fn resource_type_mismatch_names_expected_then_actual() {
        let e = ValidationError::ResourceTypeMismatch { name: "src".into(),
                                                        expected: "git".into(),
                                                        actual: "image".into() };
        assert_eq!(e.to_string(), r#"resource "src" should be type "git" but was "image""#);
    }

    #[test]
    fn empty_aggregate_is_success() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let mut errs = ValidationErrors::new();
        errs.push_result(Ok(()));
        assert!(errs.is_empty());
        errs.push(ValidationError::InvalidStepOverride { name: "deploy".into() });
        let err = errs.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.to_string(), "1 error occurred:\n\t* invalid StepOverride: No Step named deploy\n");
    }

    #[test]
    fn task_error_prefixes_task_name() {
        let e = TaskValidationError::InvalidParams { task: "build".into(),
                                                     source: ValidationError::ExtraParams(vec!["b".into()]) };
        assert_eq!(e.to_string(),
                   "invalid input params for task build: didn't need these params but they were provided anyway: [b]");
        assert_eq!(e.kind(), ValidationErrorKind::UnexpectedSupplied);
        assert_eq!(e.task(), "build");
    }
}
