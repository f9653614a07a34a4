//! Conformidad de recursos declarados vs. recursos entregados.
//!
//! Orden: faltantes requeridos -> sobrantes -> tipo distinto.

use indexmap::IndexMap;
use log::debug;
use taskgate_domain::{ResourceBinding, TaskResource};

use crate::errors::{ValidationError, ValidationErrors};
use crate::list::diff_left;

pub struct ResourceCheck<'a> {
    declared: &'a [TaskResource],
    provided: &'a IndexMap<String, ResourceBinding>,
    required: Vec<&'a str>,
    optional: Vec<&'a str>,
    provided_names: Vec<&'a str>,
}

impl<'a> ResourceCheck<'a> {
    pub fn new(declared: &'a [TaskResource], provided: &'a IndexMap<String, ResourceBinding>) -> Self {
        let (opt, req): (Vec<&TaskResource>, Vec<&TaskResource>) = declared.iter().partition(|r| r.optional);
        Self { declared,
               provided,
               required: req.iter().map(|r| r.name.as_str()).collect(),
               optional: opt.iter().map(|r| r.name.as_str()).collect(),
               provided_names: provided.keys().map(|k| k.as_str()).collect() }
    }

    pub fn missing(&self) -> Result<(), ValidationError> {
        let missing = diff_left(&self.required, &self.provided_names);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingResources(missing))
        }
    }

    /// Entregados que no son ni requeridos ni opcionales.
    pub fn extra(&self) -> Result<(), ValidationError> {
        let allowed: Vec<&str> = self.required.iter().chain(self.optional.iter()).copied().collect();
        let extra = diff_left(&self.provided_names, &allowed);
        if extra.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ExtraResources(extra))
        }
    }

    /// Primer recurso declarado y presente cuyo tipo no coincide.
    pub fn types(&self) -> Result<(), ValidationError> {
        for resource in self.declared {
            let Some(binding) = self.provided.get(&resource.name) else {
                continue;
            };
            if binding.resource_type != resource.resource_type {
                return Err(ValidationError::ResourceTypeMismatch { name: resource.name.clone(),
                                                                   expected: resource.resource_type.clone(),
                                                                   actual: binding.resource_type.clone() });
            }
        }
        Ok(())
    }

    pub fn run(&self) -> Result<(), ValidationError> {
        self.missing()?;
        self.extra()?;
        self.types()
    }

    pub fn collect(&self) -> ValidationErrors {
        let mut errs = ValidationErrors::new();
        errs.push_result(self.missing());
        errs.push_result(self.extra());
        errs.push_result(self.types());
        errs
    }
}

pub fn validate_resources(declared: &[TaskResource],
                          provided: &IndexMap<String, ResourceBinding>)
                          -> Result<(), ValidationError> {
    let result = ResourceCheck::new(declared, provided).run();
    if let Err(e) = &result {
        debug!("resources rejected ({:?}): {e}", e.kind());
    }
    result
}

/// Variante agregada de `validate_resources`.
pub fn collect_resource_errors(declared: &[TaskResource], provided: &IndexMap<String, ResourceBinding>) -> ValidationErrors {
    ResourceCheck::new(declared, provided).collect()
}
