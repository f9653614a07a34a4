//! Recursos declarados (`TaskResource`) y enlaces suministrados
//! (`ResourceBinding`), más los requerimientos de cómputo de steps.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recurso declarado por el Task (entrada o salida).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub optional: bool,
}

impl TaskResource {
    pub fn required(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self { name: name.into(),
               resource_type: resource_type.into(),
               optional: false }
    }

    pub fn optional(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self { name: name.into(),
               resource_type: resource_type.into(),
               optional: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskResources {
    #[serde(default)]
    pub inputs: Vec<TaskResource>,
    #[serde(default)]
    pub outputs: Vec<TaskResource>,
}

/// Recurso ya resuelto que el TaskRun entrega bajo un nombre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBinding {
    #[serde(rename = "type")]
    pub resource_type: String,
}

impl ResourceBinding {
    pub fn of_type(resource_type: impl Into<String>) -> Self {
        Self { resource_type: resource_type.into() }
    }
}

/// Cantidad de recurso de cómputo ya normalizada a mili-unidades.
///
/// El parseo de notaciones como `"500m"` o `"1Gi"` ocurre antes de llegar
/// aquí; este tipo sólo compara.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(pub i64);

impl Quantity {
    pub fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    pub fn from_units(units: i64) -> Self {
        Quantity(units.saturating_mul(1000))
    }

    pub fn milli(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1000 == 0 {
            write!(f, "{}", self.0 / 1000)
        } else {
            write!(f, "{}m", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub requests: IndexMap<String, Quantity>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub limits: IndexMap<String, Quantity>,
}
