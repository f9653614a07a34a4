//! Documento `TaskRun`: la instancia concreta enviada contra un Task.

use serde::{Deserialize, Serialize};

use crate::param::{Param, ParamType, ParamValue};
use crate::resource::{ResourceBinding, ResourceRequirements};
use crate::task::TaskSpec;
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStepOverride {
    pub name: String,
    #[serde(default)]
    pub resources: ResourceRequirements,
}

impl TaskStepOverride {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               resources: ResourceRequirements::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSidecarOverride {
    pub name: String,
    #[serde(default)]
    pub resources: ResourceRequirements,
}

impl TaskSidecarOverride {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               resources: ResourceRequirements::default() }
    }
}

/// Recurso entregado por el TaskRun bajo el nombre declarado en el Task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResourceBinding {
    pub name: String,
    pub resource: ResourceBinding,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskRunResources {
    #[serde(default)]
    pub inputs: Vec<TaskResourceBinding>,
    #[serde(default)]
    pub outputs: Vec<TaskResourceBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRunSpec {
    #[serde(default)]
    pub params: Vec<Param>,
    /// Parámetros de fan-out; sólo se aceptan contra declaraciones string.
    #[serde(default)]
    pub matrix: Vec<Param>,
    /// Spec embebida (alternativa a referenciar un Task por nombre).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_spec: Option<TaskSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<TaskRunResources>,
    #[serde(default)]
    pub step_overrides: Vec<TaskStepOverride>,
    #[serde(default)]
    pub sidecar_overrides: Vec<TaskSidecarOverride>,
}

/// Resultado emitido por una ejecución.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRunResult {
    pub name: String,
    /// Tipo anunciado por quien emite el resultado; si falta manda la forma del valor.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<ParamType>,
    pub value: ParamValue,
}

impl TaskRunResult {
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self { name: name.into(),
               declared_type: None,
               value }
    }

    pub fn with_type(mut self, result_type: ParamType) -> Self {
        self.declared_type = Some(result_type);
        self
    }

    /// Tipo en tiempo de ejecución del resultado emitido.
    pub fn result_type(&self) -> ParamType {
        self.declared_type.unwrap_or_else(|| self.value.value_type())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskRunStatus {
    #[serde(default)]
    pub results: Vec<TaskRunResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRun {
    pub name: String,
    #[serde(default)]
    pub spec: TaskRunSpec,
    #[serde(default)]
    pub status: TaskRunStatus,
}

impl TaskRun {
    pub fn from_json_str(input: &str) -> Result<Self, DomainError> {
        let run: TaskRun = serde_json::from_str(input)?;
        if run.name.is_empty() {
            return Err(DomainError::InvalidDocument("taskrun name must not be empty".to_string()));
        }
        Ok(run)
    }
}
