//! taskgate-domain: modelo de documentos Task / TaskRun.
//!
//! Tipos de valor puros (sin identidad más allá de su nombre) que el motor de
//! validación de `taskgate-core` sólo lee. Todos se deserializan desde JSON.
pub mod error;
pub mod param;
pub mod resolved;
pub mod resource;
pub mod task;
pub mod task_run;

pub use error::DomainError;
pub use param::{Param, ParamSpec, ParamType, ParamValue, PropertySpec};
pub use resolved::ResolvedTaskResources;
pub use resource::{Quantity, ResourceBinding, ResourceRequirements, TaskResource, TaskResources};
pub use task::{Sidecar, Step, StepTemplate, Task, TaskResult, TaskSpec};
pub use task_run::{TaskResourceBinding, TaskRun, TaskRunResources, TaskRunResult, TaskRunSpec, TaskRunStatus,
                   TaskSidecarOverride, TaskStepOverride};
