//! taskgate
//!
//! Fachada del workspace:
//! - `model`: documentos Task / TaskRun (`taskgate-domain`).
//! - `engine`: validadores de conformidad y reportes (`taskgate-core`).
//! - `prelude`: lo necesario para admitir un TaskRun con una sola importación.

pub use taskgate_core as engine;
pub use taskgate_domain as model;

pub mod prelude {
    pub use taskgate_core::{validate_overrides, validate_params, validate_resolved_task_resources,
                            validate_resources, validate_task_run_results, validate_task_spec_request_resources,
                            ApiFields, FeatureFlags, TaskValidationError, ValidationError, ValidationErrorKind,
                            ValidationErrors, ValidationReport};
    pub use taskgate_domain::{Param, ParamSpec, ParamType, ParamValue, ResolvedTaskResources, Task, TaskRun,
                              TaskSpec};
}
