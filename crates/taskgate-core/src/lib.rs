//! taskgate-core: compuerta de conformidad Task / TaskRun.
//!
//! Cada validador es una función pura de sus argumentos: construye sus mapas
//! de búsqueda por llamada, no guarda estado y devuelve a lo sumo un error
//! (o un agregado de errores, en el caso de los overrides).
pub mod config;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod list;
pub mod report;
pub mod validate;

pub use config::{ApiFields, ConfigError, FeatureFlags};
pub use errors::{MissingKeys, ResultTypeMismatch, TaskValidationError, ValidationError, ValidationErrorKind,
                 ValidationErrors};
pub use list::diff_left;
pub use report::{Stage, StageOutcome, ValidationReport};
pub use validate::{collect_param_errors, collect_resource_errors, validate_overrides, validate_params,
                   validate_resolved_task_resources, validate_resources, validate_task_run_results,
                   validate_task_spec_request_resources, ParamCheck, ResourceCheck};
