//! Documento `Task`: la especificación declarada contra la que se valida.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::param::{ParamSpec, ParamType, PropertySpec};
use crate::resource::{ResourceRequirements, TaskResources};
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(default)]
    pub resources: ResourceRequirements,
}

impl Step {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               resources: ResourceRequirements::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sidecar {
    pub name: String,
    #[serde(default)]
    pub resources: ResourceRequirements,
}

impl Sidecar {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               resources: ResourceRequirements::default() }
    }
}

/// Valores comunes aplicados a todos los steps (sólo interesan los límites).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepTemplate {
    #[serde(default)]
    pub resources: ResourceRequirements,
}

/// Resultado declarado por el Task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    pub name: String,
    #[serde(rename = "type", default)]
    pub result_type: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, PropertySpec>>,
}

impl TaskResult {
    pub fn new(name: impl Into<String>, result_type: ParamType) -> Self {
        Self { name: name.into(),
               result_type,
               description: None,
               properties: None }
    }

    pub fn with_properties<I, S>(mut self, keys: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.properties = Some(keys.into_iter()
                                   .map(|k| (k.into(), PropertySpec::default()))
                                   .collect());
        self
    }

    pub fn required_keys(&self) -> Vec<&str> {
        self.properties
            .as_ref()
            .map(|props| props.keys().map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<TaskResources>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub sidecars: Vec<Sidecar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_template: Option<StepTemplate>,
    #[serde(default)]
    pub results: Vec<TaskResult>,
}

/// Task con nombre, tal como lo resuelve el orquestador.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub spec: TaskSpec,
}

impl Task {
    pub fn from_json_str(input: &str) -> Result<Self, DomainError> {
        let task: Task = serde_json::from_str(input)?;
        if task.name.is_empty() {
            return Err(DomainError::InvalidDocument("task name must not be empty".to_string()));
        }
        Ok(task)
    }
}
