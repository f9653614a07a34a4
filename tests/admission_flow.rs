//! Flujo completo de admisión a partir de documentos JSON: resolver el Task y
//! el TaskRun, validar y producir el reporte.

use serde_json::json;
use taskgate::engine::{Stage, ValidationErrorKind};
use taskgate::prelude::*;

fn task() -> Task {
    Task::from_json_str(&json!({
        "name": "build-image",
        "spec": {
            "params": [
                {"name": "url"},
                {"name": "revision", "default": "main"},
                {"name": "cfg", "type": "object", "properties": {"registry": {}, "tag": {}},
                 "default": {"registry": "registry.local", "tag": "latest"}}
            ],
            "resources": {
                "inputs": [{"name": "src", "type": "git"}],
                "outputs": [{"name": "img", "type": "image", "optional": true}]
            },
            "steps": [{"name": "build", "resources": {"requests": {"cpu": 500}, "limits": {"cpu": 1000}}}],
            "sidecars": [{"name": "docker"}]
        }
    }).to_string()).unwrap()
}

fn run(body: serde_json::Value) -> TaskRun {
    TaskRun::from_json_str(&json!({"name": "build-image-run", "spec": body}).to_string()).unwrap()
}

#[test]
fn conforming_run_is_admitted() {
    let task = task();
    let run = run(json!({
        "params": [
            {"name": "url", "value": "https://example.com/app.git"},
            {"name": "cfg", "value": {"registry": "r.example.com", "tag": "v1", "extra": "ok"}}
        ],
        "resources": {"inputs": [{"name": "src", "resource": {"type": "git"}}]},
        "stepOverrides": [{"name": "build"}],
        "sidecarOverrides": [{"name": "docker"}]
    }));
    let rtr = ResolvedTaskResources::resolve(&task, &run);
    let flags = FeatureFlags::stable();

    assert!(validate_resolved_task_resources(&flags, &run.spec.params, &run.spec.matrix, &rtr).is_ok());

    let report = ValidationReport::admission(&flags, &rtr, &run.spec);
    assert!(report.accepted(), "rejections: {:?}", report.rejections());
    assert_eq!(report.stages.len(), 5);
    assert_eq!(report, ValidationReport::admission(&flags, &rtr, &run.spec));
}

#[test]
fn rejection_names_the_task_and_the_stage() {
    let task = task();
    let run = run(json!({
        "params": [{"name": "cfg", "value": {"registry": "r"}}],
        "resources": {"inputs": [{"name": "src", "resource": {"type": "git"}}]}
    }));
    let rtr = ResolvedTaskResources::resolve(&task, &run);
    let err = validate_resolved_task_resources(&FeatureFlags::stable(), &run.spec.params, &run.spec.matrix, &rtr)
        .unwrap_err();
    assert_eq!(err.task(), "build-image");
    assert_eq!(err.kind(), ValidationErrorKind::MissingRequired);
    assert_eq!(err.to_string(),
               "invalid input params for task build-image: missing values for these params which have no default values: [url]");
}

#[test]
fn input_resource_failure_is_reported_after_params_pass() {
    let task = task();
    let run = run(json!({
        "params": [{"name": "url", "value": "u"}],
        "resources": {"inputs": [{"name": "src", "resource": {"type": "storage"}}]}
    }));
    let rtr = ResolvedTaskResources::resolve(&task, &run);
    let err = validate_resolved_task_resources(&FeatureFlags::stable(), &run.spec.params, &[], &rtr).unwrap_err();
    assert!(matches!(err, TaskValidationError::InvalidInputResources { .. }));
    assert_eq!(err.kind(), ValidationErrorKind::TypeMismatch);
}

#[test]
fn report_records_every_failing_stage() {
    let task = task();
    let run = run(json!({
        "params": [{"name": "url", "value": "u"}, {"name": "inherited", "value": "x"}],
        "stepOverrides": [{"name": "deploy"}],
        "sidecarOverrides": [{"name": "db"}]
    }));
    let rtr = ResolvedTaskResources::resolve(&task, &run);

    let stable = ValidationReport::admission(&FeatureFlags::stable(), &rtr, &run.spec);
    assert!(!stable.accepted());
    let failing: Vec<Stage> = stable.stages.iter().filter(|s| !s.accepted).map(|s| s.stage).collect();
    assert_eq!(failing, vec![Stage::Params, Stage::InputResources, Stage::Overrides]);
    let overrides = stable.stages.iter().find(|s| s.stage == Stage::Overrides).unwrap();
    assert_eq!(overrides.kinds, vec![ValidationErrorKind::InvalidOverrideTarget; 2]);

    // en alpha el parámetro heredado se tolera; el resto sigue fallando
    let alpha = ValidationReport::admission(&FeatureFlags::alpha(), &rtr, &run.spec);
    let failing: Vec<Stage> = alpha.stages.iter().filter(|s| !s.accepted).map(|s| s.stage).collect();
    assert_eq!(failing, vec![Stage::InputResources, Stage::Overrides]);
    assert_ne!(stable.fingerprint, alpha.fingerprint);
}

#[test]
fn emitted_results_are_checked_against_resolved_spec() {
    let spec: TaskSpec = serde_json::from_value(json!({
        "results": [{"name": "digest"}, {"name": "meta", "type": "object", "properties": {"sha": {}, "size": {}}}]
    })).unwrap();
    let finished = TaskRun::from_json_str(&json!({
        "name": "r",
        "status": {"results": [
            {"name": "digest", "value": "sha256:1"},
            {"name": "meta", "type": "object", "value": {"sha": "1"}}
        ]}
    }).to_string()).unwrap();

    let err = validate_task_run_results(&finished, Some(&spec)).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::MissingStructuredKeys);
    assert_eq!(err.to_string(),
               "missing keys for these results which are required in TaskResult's properties {meta: [size]}");

    let report = ValidationReport::results(&FeatureFlags::stable(), "build-image", &finished, Some(&spec));
    assert!(!report.accepted());
}
