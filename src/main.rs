//! Diabrisk: diabetes risk prediction over pre-trained artifacts.
//!
//! Thin command-line front end for the prediction core. All real logic
//! lives in the library; this binary only collects raw field values,
//! calls the pipeline once, and renders the verdict or error.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use diabrisk::adapters::ArtifactStore;
use diabrisk::{PredictionService, RawSubmission};

const USAGE: &str = "\
Usage: diabrisk FIELD=VALUE ...

Fields (all required):
  gender=Male|Female
  age=YEARS
  hypertension=Yes|No
  heart_disease=Yes|No
  smoking_status='No Info'|current|ever|former|never|'not current'
  bmi=VALUE
  hba1c=VALUE
  glucose=MG_PER_DL

Environment:
  DIABRISK_ARTIFACT_DIR  artifact directory (default: artifacts)
  DIABRISK_LOG_FILE      append logs to this file instead of stderr
";

fn main() -> ExitCode {
    // Exit via ExitCode rather than process::exit so the non-blocking
    // appender guard drops and flushes any buffered log lines first.
    let _guard = match init_logging() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }

    let raw = parse_submission(&args)?;

    let artifact_dir = std::env::var("DIABRISK_ARTIFACT_DIR").unwrap_or_else(|_| "artifacts".into());
    let store = ArtifactStore::load(Path::new(&artifact_dir))
        .with_context(|| format!("Loading artifacts from {artifact_dir:?}"))?;

    let service = PredictionService::new(
        Arc::new(store.gender),
        Arc::new(store.smoking),
        Arc::new(store.scaler),
        Arc::new(store.classifier),
    )
    .context("Artifact self-check failed")?;

    match service.evaluate(&raw) {
        Ok(prediction) => {
            println!("Result: {}", prediction.verdict.description());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_recoverable() => {
            eprintln!("Input rejected: {e}");
            Ok(ExitCode::from(failure_code(&e)))
        }
        Err(e) => {
            // Already logged at error level by the pipeline boundary;
            // the user only sees a generic message and can retry.
            eprintln!("Internal error: prediction artifacts are misconfigured.");
            Ok(ExitCode::from(failure_code(&e)))
        }
    }
}

/// Recoverable input errors exit 2 so callers can tell a bad form apart
/// from a misconfigured deployment (exit 1).
fn failure_code(err: &diabrisk::PipelineError) -> u8 {
    if err.is_recoverable() {
        2
    } else {
        1
    }
}

/// Initialize tracing. Logs go to stderr so stdout stays clean for the
/// verdict; `DIABRISK_LOG_FILE` redirects them to a file instead.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let (writer, guard) = match std::env::var("DIABRISK_LOG_FILE") {
        Ok(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Opening log file {path:?}"))?;
            tracing_appender::non_blocking(file)
        }
        Err(_) => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    Ok(guard)
}

/// Build the raw submission from `FIELD=VALUE` arguments.
///
/// Unset fields stay at their "not filled" defaults so the core reports
/// them; only syntactically broken arguments are a CLI error. Glucose is
/// passed through as free text on purpose: parsing it is the pipeline's
/// job, not the form's.
fn parse_submission(args: &[String]) -> Result<RawSubmission> {
    let mut raw = RawSubmission::default();

    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("Expected FIELD=VALUE, got {arg:?}\n\n{USAGE}");
        };

        match key {
            "gender" => raw.gender = value.to_string(),
            "age" => raw.age = Some(parse_number(key, value)?),
            "hypertension" => raw.hypertension = value.to_string(),
            "heart_disease" => raw.heart_disease = value.to_string(),
            "smoking_status" => raw.smoking_status = value.to_string(),
            "bmi" => raw.bmi = Some(parse_number(key, value)?),
            "hba1c" => raw.hba1c = Some(parse_number(key, value)?),
            "glucose" => raw.glucose = value.to_string(),
            other => bail!("Unknown field {other:?}\n\n{USAGE}"),
        }
    }

    Ok(raw)
}

/// The number-input fields are numeric at the widget level in the original
/// form, so non-numeric values here are a CLI usage error, unlike glucose.
fn parse_number(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Field {key} expects a number, got {value:?}"))
}
