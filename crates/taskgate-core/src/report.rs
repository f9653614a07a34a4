//! `ValidationReport`: registro auditable de un veredicto.
//!
//! Cada etapa evaluada deja un `StageOutcome`. El `fingerprint` es el hash del
//! JSON canónico de `{gate_version, task, api_fields, stages}`, así que las
//! mismas entradas producen siempre el mismo fingerprint.

use serde::{Deserialize, Serialize};
use serde_json::json;
use taskgate_domain::{ResolvedTaskResources, TaskRun, TaskRunSpec, TaskSpec};

use crate::config::{ApiFields, FeatureFlags};
use crate::constants::GATE_VERSION;
use crate::errors::{ValidationError, ValidationErrorKind, ValidationErrors};
use crate::hashing::hash_value;
use crate::validate::{validate_overrides, validate_params, validate_resources, validate_task_run_results,
                      validate_task_spec_request_resources};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    StepRequests,
    Params,
    InputResources,
    OutputResources,
    Overrides,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: Stage,
    pub accepted: bool,
    pub kinds: Vec<ValidationErrorKind>,
    pub messages: Vec<String>,
}

impl StageOutcome {
    fn from_errors<'e, I>(stage: Stage, errors: I) -> Self
        where I: IntoIterator<Item = &'e ValidationError>
    {
        let (kinds, messages): (Vec<_>, Vec<_>) = errors.into_iter().map(|e| (e.kind(), e.to_string())).unzip();
        Self { stage,
               accepted: kinds.is_empty(),
               kinds,
               messages }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub task: String,
    pub gate_version: String,
    pub api_fields: ApiFields,
    pub stages: Vec<StageOutcome>,
    pub fingerprint: String,
}

impl ValidationReport {
    pub fn new(task: impl Into<String>, flags: &FeatureFlags) -> Self {
        let mut report = Self { task: task.into(),
                                gate_version: GATE_VERSION.to_string(),
                                api_fields: flags.enable_api_fields,
                                stages: vec![],
                                fingerprint: String::new() };
        report.refresh_fingerprint();
        report
    }

    /// Registra una etapa de primer fallo.
    pub fn record(&mut self, stage: Stage, result: &Result<(), ValidationError>) {
        self.stages.push(StageOutcome::from_errors(stage, result.as_ref().err()));
        self.refresh_fingerprint();
    }

    /// Registra una etapa agregada.
    pub fn record_all(&mut self, stage: Stage, result: &Result<(), ValidationErrors>) {
        let outcome = match result {
            Ok(()) => StageOutcome::from_errors(stage, None::<&ValidationError>),
            Err(errs) => StageOutcome::from_errors(stage, errs.iter()),
        };
        self.stages.push(outcome);
        self.refresh_fingerprint();
    }

    pub fn accepted(&self) -> bool {
        self.stages.iter().all(|s| s.accepted)
    }

    /// Mensajes de todas las etapas rechazadas, prefijados con la etapa.
    pub fn rejections(&self) -> Vec<String> {
        self.stages
            .iter()
            .filter(|s| !s.accepted)
            .flat_map(|s| s.messages.iter().map(move |m| format!("{:?}: {m}", s.stage)))
            .collect()
    }

    /// Admisión de un TaskRun: requests de steps, params, recursos de entrada
    /// y salida, y overrides. Todas las etapas se evalúan y registran; dentro
    /// de cada etapa se mantiene el criterio de primer fallo.
    pub fn admission(flags: &FeatureFlags, rtr: &ResolvedTaskResources, run_spec: &TaskRunSpec) -> Self {
        let spec = &rtr.task_spec;
        let mut report = Self::new(rtr.task_name.clone(), flags);
        report.record(Stage::StepRequests, &validate_task_spec_request_resources(Some(spec)));
        report.record(Stage::Params,
                      &validate_params(flags, &spec.params, &run_spec.params, &run_spec.matrix));
        let (inputs, outputs) = match &spec.resources {
            Some(r) => (r.inputs.as_slice(), r.outputs.as_slice()),
            None => (&[][..], &[][..]),
        };
        report.record(Stage::InputResources, &validate_resources(inputs, &rtr.inputs));
        report.record(Stage::OutputResources, &validate_resources(outputs, &rtr.outputs));
        report.record_all(Stage::Overrides, &validate_overrides(spec, run_spec));
        report
    }

    /// Verificación de resultados emitidos tras la ejecución.
    pub fn results(flags: &FeatureFlags, task: &str, run: &TaskRun, resolved: Option<&TaskSpec>) -> Self {
        let mut report = Self::new(task, flags);
        report.record(Stage::Results, &validate_task_run_results(run, resolved));
        report
    }

    fn refresh_fingerprint(&mut self) {
        let body = json!({
            "gate_version": self.gate_version,
            "task": self.task,
            "api_fields": self.api_fields,
            "stages": self.stages,
        });
        self.fingerprint = hash_value(&body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_changes_with_outcome() {
        let flags = FeatureFlags::stable();
        let mut ok = ValidationReport::new("t", &flags);
        ok.record(Stage::Params, &Ok(()));
        let mut bad = ValidationReport::new("t", &flags);
        bad.record(Stage::Params, &Err(ValidationError::MissingParams(vec!["a".into()])));
        assert!(ok.accepted());
        assert!(!bad.accepted());
        assert_ne!(ok.fingerprint, bad.fingerprint);
        assert_eq!(bad.rejections(),
                   vec!["Params: missing values for these params which have no default values: [a]".to_string()]);
    }

    #[test]
    fn api_fields_take_part_in_fingerprint() {
        let a = ValidationReport::new("t", &FeatureFlags::stable());
        let b = ValidationReport::new("t", &FeatureFlags::alpha());
        assert_ne!(a.fingerprint, b.fingerprint);
    }
}
