//! Requests de cómputo de cada step frente a su límite: el del propio step o,
//! si no lo declara, el del step template.

use log::debug;
use taskgate_domain::TaskSpec;

use crate::errors::ValidationError;

pub fn validate_task_spec_request_resources(task_spec: Option<&TaskSpec>) -> Result<(), ValidationError> {
    let Some(ts) = task_spec else {
        return Ok(());
    };
    let template_limits = ts.step_template.as_ref().map(|t| &t.resources.limits);
    for step in &ts.steps {
        for (resource, request) in &step.resources.requests {
            let limit = step.resources
                            .limits
                            .get(resource)
                            .or_else(|| template_limits.and_then(|l| l.get(resource)));
            if let Some(limit) = limit {
                if limit < request {
                    debug!("step {} requests {resource}={request} over limit {limit}", step.name);
                    return Err(ValidationError::RequestExceedsLimit { step: step.name.clone(),
                                                                      resource: resource.clone(),
                                                                      request: *request,
                                                                      limit: *limit });
                }
            }
        }
    }
    Ok(())
}
