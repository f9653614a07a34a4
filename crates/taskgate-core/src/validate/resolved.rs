//! Entrada combinada: params -> recursos de entrada -> recursos de salida,
//! etiquetando cada fallo con el nombre del Task.

use log::warn;
use taskgate_domain::{Param, ResolvedTaskResources};

use crate::config::FeatureFlags;
use crate::errors::TaskValidationError;

use super::params::validate_params;
use super::resources::validate_resources;

pub fn validate_resolved_task_resources(flags: &FeatureFlags,
                                        params: &[Param],
                                        matrix: &[Param],
                                        rtr: &ResolvedTaskResources)
                                        -> Result<(), TaskValidationError> {
    let task = rtr.task_name.as_str();
    let result = check(flags, params, matrix, rtr, task);
    if let Err(e) = &result {
        warn!("taskrun rejected for task {task}: {e}");
    }
    result
}

fn check(flags: &FeatureFlags,
         params: &[Param],
         matrix: &[Param],
         rtr: &ResolvedTaskResources,
         task: &str)
         -> Result<(), TaskValidationError> {
    validate_params(flags, &rtr.task_spec.params, params, matrix)
        .map_err(|source| TaskValidationError::InvalidParams { task: task.to_string(), source })?;

    let (inputs, outputs) = match &rtr.task_spec.resources {
        Some(r) => (r.inputs.as_slice(), r.outputs.as_slice()),
        None => (&[][..], &[][..]),
    };
    validate_resources(inputs, &rtr.inputs)
        .map_err(|source| TaskValidationError::InvalidInputResources { task: task.to_string(), source })?;
    validate_resources(outputs, &rtr.outputs)
        .map_err(|source| TaskValidationError::InvalidOutputResources { task: task.to_string(), source })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use taskgate_domain::{ParamSpec, ParamType, ParamValue, ResourceBinding, TaskResource, TaskResources, TaskSpec};

    fn rtr(spec: TaskSpec) -> ResolvedTaskResources {
        ResolvedTaskResources { task_name: "build".into(),
                                task_spec: spec,
                                inputs: IndexMap::new(),
                                outputs: IndexMap::new() }
    }

    #[test]
    fn missing_resources_block_means_no_declarations() {
        let r = rtr(TaskSpec::default());
        assert!(validate_resolved_task_resources(&FeatureFlags::stable(), &[], &[], &r).is_ok());
    }

    #[test]
    fn params_are_checked_before_resources() {
        let spec = TaskSpec { params: vec![ParamSpec::new("url", ParamType::String)],
                              resources: Some(TaskResources { inputs: vec![TaskResource::required("src", "git")],
                                                              outputs: vec![] }),
                              ..Default::default() };
        let err = validate_resolved_task_resources(&FeatureFlags::stable(), &[], &[], &rtr(spec)).unwrap_err();
        assert!(matches!(err, TaskValidationError::InvalidParams { .. }));
    }

    #[test]
    fn output_failures_are_labelled_as_outputs() {
        let spec = TaskSpec { resources: Some(TaskResources { inputs: vec![],
                                                              outputs: vec![TaskResource::required("img", "image")] }),
                              ..Default::default() };
        let mut r = rtr(spec);
        r.outputs.insert("img".into(), ResourceBinding::of_type("git"));
        let params = vec![Param::new("unused", ParamValue::string("x"))];
        let err = validate_resolved_task_resources(&FeatureFlags::alpha(), &params, &[], &r).unwrap_err();
        assert!(matches!(err, TaskValidationError::InvalidOutputResources { .. }));
        assert!(err.to_string().starts_with("invalid output resources for task build: resource \"img\""));
    }
}
