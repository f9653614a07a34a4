//! Feature flags que alteran la estrictez de la validación.
//!
//! El nivel de campos de API se pasa explícitamente a los validadores como
//! `FeatureFlags`; `from_env` sólo sirve para construir ese valor desde el
//! entorno (`TASKGATE_ENABLE_API_FIELDS`, con `.env` opcional).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::API_FIELDS_ENV;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} (expected stable, beta or alpha)")]
    InvalidApiFields { var: &'static str, value: String },
}

/// Nivel de campos de API habilitados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFields {
    #[default]
    Stable,
    Beta,
    /// Modo permisivo: tolera parámetros no declarados para que un Task
    /// padre pueda propagar sus parámetros a descendientes.
    Alpha,
}

impl ApiFields {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiFields::Stable => "stable",
            ApiFields::Beta => "beta",
            ApiFields::Alpha => "alpha",
        }
    }
}

impl fmt::Display for ApiFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiFields {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stable" => Ok(ApiFields::Stable),
            "beta" => Ok(ApiFields::Beta),
            "alpha" => Ok(ApiFields::Alpha),
            other => Err(ConfigError::InvalidApiFields { var: API_FIELDS_ENV,
                                                         value: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub enable_api_fields: ApiFields,
}

impl FeatureFlags {
    pub fn new(enable_api_fields: ApiFields) -> Self {
        Self { enable_api_fields }
    }

    pub fn stable() -> Self {
        Self::new(ApiFields::Stable)
    }

    pub fn alpha() -> Self {
        Self::new(ApiFields::Alpha)
    }

    /// En alpha se omite el chequeo de parámetros no declarados.
    pub fn tolerates_extra_params(&self) -> bool {
        self.enable_api_fields == ApiFields::Alpha
    }

    /// Lee los flags del entorno (cargando `.env` si existe). Variable ausente
    /// o vacía => `stable`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        match lookup(API_FIELDS_ENV) {
            Some(v) if !v.trim().is_empty() => Ok(Self::new(v.parse()?)),
            _ => Ok(Self::default()),
        }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_variable_means_stable() {
        assert_eq!(FeatureFlags::from_lookup(|_| None).unwrap(), FeatureFlags::stable());
        assert_eq!(FeatureFlags::from_lookup(|_| Some("  ".into())).unwrap(), FeatureFlags::stable());
    }

    #[test]
    fn alpha_is_the_only_lenient_level() {
        let flags = FeatureFlags::from_lookup(|k| (k == API_FIELDS_ENV).then(|| "alpha".to_string())).unwrap();
        assert!(flags.tolerates_extra_params());
        assert!(!FeatureFlags::new(ApiFields::Beta).tolerates_extra_params());
        assert!(!FeatureFlags::stable().tolerates_extra_params());
    }

    #[test]
    fn unknown_level_is_an_error() {
        let err = FeatureFlags::from_lookup(|_| Some("gamma".into())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiFields { value, .. } if value == "gamma"));
    }
}
