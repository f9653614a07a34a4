//! taskgate: admite o rechaza un TaskRun contra su Task.
//!
//! Exit codes: 0 aceptado, 4 rechazado, 5 error de I/O o de documento,
//! 2 uso incorrecto (clap).

use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use taskgate_core::{config, ApiFields, FeatureFlags, ValidationReport};
use taskgate_domain::{DomainError, ResolvedTaskResources, Task, TaskRun};
use tracing_subscriber::EnvFilter;

mod error;
mod verdict;

use error::CliError;
use verdict::VerdictRecord;

#[derive(Parser, Debug)]
#[command(name = "taskgate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print the verdict record as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check params, resources, step requests and overrides before execution
    Validate {
        /// Task document (JSON)
        #[arg(long)]
        task: PathBuf,
        /// TaskRun document (JSON)
        #[arg(long)]
        run: PathBuf,
        /// Overrides TASKGATE_ENABLE_API_FIELDS (stable, beta, alpha)
        #[arg(long)]
        api_fields: Option<ApiFields>,
    },
    /// Check the results emitted by a finished TaskRun
    Results {
        #[arg(long)]
        task: PathBuf,
        #[arg(long)]
        run: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    config::init_dotenv();

    let outcome = execute(&cli);
    match &outcome {
        Ok(verdict) => {
            if let Err(e) = print_verdict(verdict, cli.json) {
                eprintln!("[taskgate] {e}");
                return ExitCode::from(5);
            }
        }
        Err(e) => eprintln!("[taskgate] {e}"),
    }
    ExitCode::from(exit_status(&outcome))
}

fn exit_status(outcome: &Result<VerdictRecord, CliError>) -> u8 {
    match outcome {
        Ok(verdict) if verdict.accepted => 0,
        Ok(_) => 4,
        Err(_) => 5,
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // también captura los registros de `log` emitidos por taskgate-core
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn execute(cli: &Cli) -> Result<VerdictRecord, CliError> {
    match &cli.command {
        Commands::Validate { task, run, api_fields } => {
            let flags = match api_fields {
                Some(level) => FeatureFlags::new(*level),
                None => FeatureFlags::from_env()?,
            };
            let task = load(task, Task::from_json_str)?;
            let run = load(run, TaskRun::from_json_str)?;
            let rtr = ResolvedTaskResources::resolve(&task, &run);
            info!("validating taskrun {} against task {} (api fields: {})", run.name, task.name, flags.enable_api_fields);
            let report = ValidationReport::admission(&flags, &rtr, &run.spec);
            Ok(VerdictRecord::new(run.name, report))
        }
        Commands::Results { task, run } => {
            let flags = FeatureFlags::from_env()?;
            let task = load(task, Task::from_json_str)?;
            let run = load(run, TaskRun::from_json_str)?;
            // con spec embebida, ésa es la declaración; no se duplica con la del Task
            let resolved = run.spec.task_spec.is_none().then_some(&task.spec);
            info!("checking results of taskrun {} against task {}", run.name, task.name);
            let report = ValidationReport::results(&flags, &task.name, &run, resolved);
            Ok(VerdictRecord::new(run.name.clone(), report))
        }
    }
}

fn load<T>(path: &Path, parse: fn(&str) -> Result<T, DomainError>) -> Result<T, CliError> {
    let body = std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    parse(&body).map_err(|source| CliError::Document { path: path.to_path_buf(), source })
}

fn print_verdict(verdict: &VerdictRecord, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(verdict)?);
    } else {
        println!("{verdict}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn api_fields_flag_parses_known_levels() {
        let cli = Cli::try_parse_from(["taskgate", "validate", "--task", "t.json", "--run", "r.json", "--api-fields", "alpha"]).unwrap();
        match cli.command {
            Commands::Validate { api_fields, .. } => assert_eq!(api_fields, Some(ApiFields::Alpha)),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["taskgate", "validate", "--task", "t", "--run", "r", "--api-fields", "gamma"]).is_err());
    }

    struct Workdir(PathBuf);

    impl Workdir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("taskgate-cli-{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            Workdir(dir)
        }

        fn write(&self, name: &str, body: &str) -> String {
            let path = self.0.join(name);
            std::fs::write(&path, body).unwrap();
            path.display().to_string()
        }
    }

    impl Drop for Workdir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    const TASK: &str = r#"{
        "name": "build-image",
        "spec": {
            "params": [{"name": "url"}],
            "steps": [{"name": "build"}],
            "results": [{"name": "meta", "type": "object", "properties": {"sha": {}}}]
        }
    }"#;

    fn run_validate(dir: &Workdir, run_body: &str) -> Result<VerdictRecord, CliError> {
        let task = dir.write("task.json", TASK);
        let run = dir.write("run.json", run_body);
        let cli = Cli::try_parse_from(["taskgate", "validate", "--task", &task, "--run", &run, "--api-fields", "stable"]).unwrap();
        execute(&cli)
    }

    #[test]
    fn conforming_run_exits_zero() {
        let dir = Workdir::new();
        let outcome = run_validate(&dir,
                                   r#"{"name": "r1", "spec": {"params": [{"name": "url", "value": "u"}],
                                       "stepOverrides": [{"name": "build"}]}}"#);
        let verdict = outcome.as_ref().unwrap();
        assert!(verdict.accepted);
        assert_eq!(verdict.run, "r1");
        assert_eq!(exit_status(&outcome), 0);
    }

    #[test]
    fn bad_step_override_is_rejected_with_exit_four() {
        let dir = Workdir::new();
        let outcome = run_validate(&dir,
                                   r#"{"name": "r2", "spec": {"params": [{"name": "url", "value": "u"}],
                                       "stepOverrides": [{"name": "deploy"}]}}"#);
        let verdict = outcome.as_ref().unwrap();
        assert!(!verdict.accepted);
        assert_eq!(verdict.report.rejections(),
                   vec!["Overrides: invalid StepOverride: No Step named deploy".to_string()]);
        assert_eq!(exit_status(&outcome), 4);
    }

    #[test]
    fn malformed_run_document_exits_five() {
        let dir = Workdir::new();
        let outcome = run_validate(&dir, r#"{"name": "r3", "spec": "#);
        assert!(matches!(outcome, Err(CliError::Document { .. })));
        assert_eq!(exit_status(&outcome), 5);
    }

    #[test]
    fn results_command_checks_emitted_results() {
        let dir = Workdir::new();
        let task = dir.write("task.json", TASK);
        let run = dir.write("run.json",
                            r#"{"name": "r4", "status": {"results": [{"name": "meta", "value": {"other": "x"}}]}}"#);
        let cli = Cli::try_parse_from(["taskgate", "--log-level", "debug", "results", "--task", &task, "--run", &run]).unwrap();
        let outcome = execute(&cli);
        let verdict = outcome.as_ref().unwrap();
        assert!(!verdict.accepted);
        assert_eq!(verdict.report.stages.len(), 1);
        assert_eq!(exit_status(&outcome), 4);
    }

    #[test]
    fn log_level_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["taskgate", "validate", "--log-level", "debug", "--task", "t", "--run", "r"]).unwrap();
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn missing_document_is_an_io_error() {
        let err = load(Path::new("/nonexistent/taskgate/task.json"), Task::from_json_str).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
