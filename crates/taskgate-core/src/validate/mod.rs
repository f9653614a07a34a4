//! Validadores de conformidad Task / TaskRun.
//!
//! - `params`: parámetros faltantes, sobrantes, de tipo incorrecto y claves
//!   de objeto ausentes (primer fallo gana).
//! - `resources`: recursos requeridos/opcionales y sus tipos.
//! - `overrides`: overrides de steps/sidecars (agrega todos los fallos).
//! - `results`: tipos y claves de objeto de los resultados emitidos.
//! - `requests`: requests de cómputo de steps frente a sus límites.
//! - `resolved`: entrada combinada params -> inputs -> outputs.

pub mod overrides;
pub mod params;
pub mod requests;
pub mod resolved;
pub mod resources;
pub mod results;

pub use overrides::{sidecar_override_errors, step_override_errors, validate_overrides};
pub use params::{collect_param_errors, missing_keys_object_param_names, validate_params, ParamCheck};
pub use requests::validate_task_spec_request_resources;
pub use resolved::validate_resolved_task_resources;
pub use resources::{collect_resource_errors, validate_resources, ResourceCheck};
pub use results::{mismatched_types_results, missing_keys_of_object_results, validate_task_run_results};

use indexmap::IndexMap;

use crate::errors::MissingKeys;
use crate::list::diff_left;

/// Para cada nombre provisto que además tiene claves declaradas, las claves
/// declaradas que faltan. Los nombres provistos sin declaración se ignoran
/// (p.ej. objetos que llegan con su default ya aplicado).
pub(crate) fn find_missing_keys(needed: &IndexMap<&str, Vec<&str>>, provided: &IndexMap<&str, Vec<&str>>) -> MissingKeys {
    let mut missing = MissingKeys::new();
    for (name, keys) in provided {
        let Some(needed_keys) = needed.get(name) else {
            continue;
        };
        let missed = diff_left(needed_keys, keys);
        if !missed.is_empty() {
            missing.insert(name.to_string(), missed);
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_missing_keys_skips_undeclared_and_complete() {
        let mut needed = IndexMap::new();
        needed.insert("cfg", vec!["x", "y"]);
        needed.insert("full", vec!["a"]);
        let mut provided = IndexMap::new();
        provided.insert("cfg", vec!["x", "z"]);
        provided.insert("full", vec!["a"]);
        provided.insert("loose", vec!["q"]);

        let missing = find_missing_keys(&needed, &provided);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing["cfg"], vec!["y".to_string()]);
    }
}
