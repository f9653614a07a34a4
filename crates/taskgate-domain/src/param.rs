//! Parámetros: declaración (`ParamSpec`) y valor suministrado (`Param`).
//!
//! Un valor de parámetro se representa en JSON tal cual lo escribe el autor:
//! un string, un arreglo de strings o un objeto plano de strings. El tipo en
//! tiempo de ejecución se deduce de esa forma (`ParamValue::value_type`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Tipos de parámetro/resultado soportados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ParamType {
    #[default]
    String,
    Array,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ParamType::String),
            "array" => Ok(ParamType::Array),
            "object" => Ok(ParamType::Object),
            other => Err(DomainError::UnknownParamType(other.to_string())),
        }
    }
}

impl TryFrom<String> for ParamType {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Valor concreto de un parámetro o resultado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Array(Vec<String>),
    Object(IndexMap<String, String>),
}

impl ParamValue {
    /// Tipo en tiempo de ejecución del valor.
    pub fn value_type(&self) -> ParamType {
        match self {
            ParamValue::String(_) => ParamType::String,
            ParamValue::Array(_) => ParamType::Array,
            ParamValue::Object(_) => ParamType::Object,
        }
    }

    /// Claves del objeto en orden de inserción; vacío para valores no objeto.
    pub fn object_keys(&self) -> Vec<&str> {
        match self {
            ParamValue::Object(map) => map.keys().map(|k| k.as_str()).collect(),
            _ => vec![],
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        ParamValue::String(s.into())
    }

    pub fn array<I, S>(items: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        ParamValue::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn object<I, K, V>(entries: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<String>,
              V: Into<String>
    {
        ParamValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Declaración de una sub-clave de un parámetro objeto.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertySpec {
    #[serde(rename = "type", default)]
    pub property_type: ParamType,
}

/// Parámetro declarado por el autor del Task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Para tipo objeto: el conjunto de claves requeridas es exactamente el
    /// conjunto de claves de este mapa.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, PropertySpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self { name: name.into(),
               param_type,
               description: None,
               properties: None,
               default: None }
    }

    pub fn with_default(mut self, default: ParamValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Declara las claves requeridas de un parámetro objeto (tipadas como string).
    pub fn with_properties<I, S>(mut self, keys: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.properties = Some(keys.into_iter()
                                   .map(|k| (k.into(), PropertySpec::default()))
                                   .collect());
        self
    }

    /// Claves requeridas en orden de declaración.
    pub fn required_keys(&self) -> Vec<&str> {
        self.properties
            .as_ref()
            .map(|props| props.keys().map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Parámetro suministrado por el TaskRun (ordinario o de matrix).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
}

impl Param {
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self { name: name.into(), value }
    }
}
