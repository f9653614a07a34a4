//! Conformidad de resultados emitidos frente a los declarados.
//!
//! Los resultados declarados son los de la spec embebida en el TaskRun seguidos
//! de los de la spec resuelta.

use indexmap::IndexMap;
use log::debug;
use std::collections::HashMap;
use taskgate_domain::{ParamType, TaskResult, TaskRun, TaskSpec};

use crate::errors::{MissingKeys, ResultTypeMismatch, ValidationError};

use super::find_missing_keys;

pub fn validate_task_run_results(run: &TaskRun, resolved: Option<&TaskSpec>) -> Result<(), ValidationError> {
    let mut spec_results: Vec<&TaskResult> = Vec::new();
    if let Some(embedded) = &run.spec.task_spec {
        spec_results.extend(embedded.results.iter());
    }
    if let Some(ts) = resolved {
        spec_results.extend(ts.results.iter());
    }

    let mismatched = mismatched_types_results(run, &spec_results);
    if !mismatched.is_empty() {
        debug!("results of {} rejected: {} type mismatch(es)", run.name, mismatched.len());
        return Err(ValidationError::MismatchedResultTypes(mismatched));
    }

    let missing = missing_keys_of_object_results(run, &spec_results);
    if !missing.is_empty() {
        debug!("results of {} rejected: missing object keys", run.name);
        return Err(ValidationError::MissingResultKeys(missing));
    }
    Ok(())
}

/// Resultados emitidos cuyo tipo no está entre los declarados para su
/// nombre. Los emitidos sin declaración se ignoran.
pub fn mismatched_types_results(run: &TaskRun, spec_results: &[&TaskResult]) -> Vec<ResultTypeMismatch> {
    let mut needed: HashMap<&str, Vec<ParamType>> = HashMap::new();
    for r in spec_results {
        needed.entry(r.name.as_str()).or_default().push(r.result_type);
    }

    let mut out = Vec::new();
    for emitted in &run.status.results {
        let Some(expected) = needed.get(emitted.name.as_str()) else {
            continue;
        };
        if !expected.contains(&emitted.result_type()) {
            out.push(ResultTypeMismatch { name: emitted.name.clone(),
                                          expected: expected.clone(),
                                          actual: emitted.result_type() });
        }
    }
    out
}

pub fn missing_keys_of_object_results(run: &TaskRun, spec_results: &[&TaskResult]) -> MissingKeys {
    let mut needed: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for r in spec_results.iter().filter(|r| r.result_type == ParamType::Object) {
        needed.entry(r.name.as_str()).or_default().extend(r.required_keys());
    }

    let mut provided: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for emitted in run.status.results.iter().filter(|r| r.result_type() == ParamType::Object) {
        provided.entry(emitted.name.as_str()).or_default().extend(emitted.value.object_keys());
    }

    find_missing_keys(&needed, &provided)
}
