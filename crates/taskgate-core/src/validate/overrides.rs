//! Overrides de steps y sidecars: cada override debe nombrar un step/sidecar
//! declarado. A diferencia del resto, se acumulan todos los fallos (primero
//! los de steps, luego los de sidecars).

use log::debug;
use std::collections::HashSet;
use taskgate_domain::{TaskRunSpec, TaskSpec};

use crate::errors::{ValidationError, ValidationErrors};

pub fn validate_overrides(task_spec: &TaskSpec, run_spec: &TaskRunSpec) -> Result<(), ValidationErrors> {
    let mut errs = step_override_errors(task_spec, run_spec);
    errs.extend(sidecar_override_errors(task_spec, run_spec));
    if !errs.is_empty() {
        debug!("overrides rejected: {} invalid target(s)", errs.len());
    }
    errs.into_result()
}

pub fn step_override_errors(task_spec: &TaskSpec, run_spec: &TaskRunSpec) -> ValidationErrors {
    let steps: HashSet<&str> = task_spec.steps.iter().map(|s| s.name.as_str()).collect();
    run_spec.step_overrides
            .iter()
            .filter(|o| !steps.contains(o.name.as_str()))
            .map(|o| ValidationError::InvalidStepOverride { name: o.name.clone() })
            .collect()
}

pub fn sidecar_override_errors(task_spec: &TaskSpec, run_spec: &TaskRunSpec) -> ValidationErrors {
    let sidecars: HashSet<&str> = task_spec.sidecars.iter().map(|s| s.name.as_str()).collect();
    run_spec.sidecar_overrides
            .iter()
            .filter(|o| !sidecars.contains(o.name.as_str()))
            .map(|o| ValidationError::InvalidSidecarOverride { name: o.name.clone() })
            .collect()
}
