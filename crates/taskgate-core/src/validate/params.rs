//! Conformidad de parámetros.
//!
//! Orden de chequeo (el primero que falla es el que se reporta):
//! 1. faltantes sin default
//! 2. sobrantes (omitido en alpha)
//! 3. tipo incorrecto (matrix sólo contra declaraciones string)
//! 4. claves requeridas ausentes en parámetros objeto

use indexmap::IndexMap;
use log::debug;
use std::collections::HashMap;
use taskgate_domain::{Param, ParamSpec, ParamType};

use crate::config::FeatureFlags;
use crate::errors::{MissingKeys, ValidationError, ValidationErrors};
use crate::list::diff_left;

use super::find_missing_keys;

/// Lookups de una validación de parámetros, construidos una vez por llamada.
/// Cada chequeo se puede invocar por separado.
pub struct ParamCheck<'a> {
    specs: &'a [ParamSpec],
    params: &'a [Param],
    matrix: &'a [Param],
    needed_names: Vec<&'a str>,
    // nombre -> spec; con nombres repetidos gana la última declaración
    needed: HashMap<&'a str, &'a ParamSpec>,
    provided_names: Vec<&'a str>,
}

impl<'a> ParamCheck<'a> {
    pub fn new(specs: &'a [ParamSpec], params: &'a [Param], matrix: &'a [Param]) -> Self {
        let needed_names = specs.iter().map(|s| s.name.as_str()).collect();
        let needed = specs.iter().map(|s| (s.name.as_str(), s)).collect();
        let provided_names = params.iter()
                                   .chain(matrix.iter())
                                   .map(|p| p.name.as_str())
                                   .collect();
        Self { specs,
               params,
               matrix,
               needed_names,
               needed,
               provided_names }
    }

    /// Tipo declarado para `name`, si existe declaración.
    pub fn declared_type(&self, name: &str) -> Option<ParamType> {
        self.needed.get(name).map(|s| s.param_type)
    }

    /// Declarados sin valor suministrado y sin default.
    pub fn missing(&self) -> Result<(), ValidationError> {
        let missing: Vec<String> = diff_left(&self.needed_names, &self.provided_names)
            .into_iter()
            .filter(|name| self.needed.get(name.as_str()).is_some_and(|s| s.default.is_none()))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingParams(missing))
        }
    }

    /// Suministrados sin declaración. En alpha no se chequea: los parámetros
    /// de un ancestro pueden bajar implícitamente a sus descendientes.
    pub fn extra(&self, flags: &FeatureFlags) -> Result<(), ValidationError> {
        if flags.tolerates_extra_params() {
            return Ok(());
        }
        let extra = diff_left(&self.provided_names, &self.needed_names);
        if extra.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ExtraParams(extra))
        }
    }

    /// Parámetros ordinarios cuyo tipo en runtime difiere del declarado, y
    /// parámetros de matrix cuyo tipo *declarado* no es string. Los nombres
    /// sin declaración se ignoran.
    pub fn wrong_types(&self) -> Result<(), ValidationError> {
        let mut wrong = Vec::new();
        for p in self.params {
            match self.declared_type(&p.name) {
                Some(t) if p.value.value_type() != t => wrong.push(p.name.clone()),
                _ => {}
            }
        }
        for p in self.matrix {
            match self.declared_type(&p.name) {
                Some(t) if t != ParamType::String => wrong.push(p.name.clone()),
                _ => {}
            }
        }
        if wrong.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::WrongTypeParams(wrong))
        }
    }

    /// Claves requeridas ausentes en parámetros objeto ordinarios.
    pub fn object_keys(&self) -> Result<(), ValidationError> {
        let missing = missing_keys_object_param_names(self.specs, self.params);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingObjectKeys(missing))
        }
    }

    /// Veredicto de primer fallo, en el orden documentado del módulo.
    pub fn run(&self, flags: &FeatureFlags) -> Result<(), ValidationError> {
        self.missing()?;
        self.extra(flags)?;
        self.wrong_types()?;
        self.object_keys()
    }

    /// Evalúa las cuatro categorías y devuelve todas las que fallan, en orden.
    pub fn collect(&self, flags: &FeatureFlags) -> ValidationErrors {
        let mut errs = ValidationErrors::new();
        errs.push_result(self.missing());
        errs.push_result(self.extra(flags));
        errs.push_result(self.wrong_types());
        errs.push_result(self.object_keys());
        errs
    }
}

/// Valida los parámetros de un TaskRun contra las declaraciones del Task.
pub fn validate_params(flags: &FeatureFlags,
                       specs: &[ParamSpec],
                       params: &[Param],
                       matrix: &[Param])
                       -> Result<(), ValidationError> {
    let result = ParamCheck::new(specs, params, matrix).run(flags);
    if let Err(e) = &result {
        debug!("params rejected ({:?}): {e}", e.kind());
    }
    result
}

/// Variante agregada de `validate_params`.
pub fn collect_param_errors(flags: &FeatureFlags,
                            specs: &[ParamSpec],
                            params: &[Param],
                            matrix: &[Param])
                            -> ValidationErrors {
    ParamCheck::new(specs, params, matrix).collect(flags)
}

/// Para cada parámetro objeto suministrado con declaración objeto, las claves
/// de `properties` que no trae. Un objeto vacío cuenta como suministrado sin
/// claves. Las claves extra no se chequean.
pub fn missing_keys_object_param_names(specs: &[ParamSpec], params: &[Param]) -> MissingKeys {
    let mut needed: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for spec in specs.iter().filter(|s| s.param_type == ParamType::Object) {
        needed.entry(spec.name.as_str()).or_default().extend(spec.required_keys());
    }

    let mut provided: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for p in params.iter().filter(|p| p.value.value_type() == ParamType::Object) {
        provided.entry(p.name.as_str()).or_default().extend(p.value.object_keys());
    }

    find_missing_keys(&needed, &provided)
}
