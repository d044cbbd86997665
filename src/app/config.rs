//! Run configuration: CLI flags + `.env` / environment, merged into one record.
//!
//! Precedence (lowest to highest):
//! 1. `--model` / `--spec` (or the default model)
//! 2. `COSMO_H0`, `COSMO_OM0`, `COSMO_ODE0`
//! 3. `--param KEY=VALUE`

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::{EvalArgs, ModelArgs};
use crate::domain::{CosmologySpec, QuantityKind};
use crate::engine::{linear_grid, log_grid};
use crate::error::AppError;
use crate::math::Tolerance;
use crate::models::{resolve, spec_from_json};

/// Environment variables mapped to parameter keys.
const ENV_PARAMS: [(&str, &str); 3] = [("H0", "COSMO_H0"), ("Om0", "COSMO_OM0"), ("Ode0", "COSMO_ODE0")];

/// Model selection as understood by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub spec: CosmologySpec,
    pub tolerance: Tolerance,
}

/// A full run's configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub model: ModelConfig,
    pub quantities: Vec<QuantityKind>,
    pub redshifts: Vec<f64>,
    pub attach_units: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Build the model configuration, reading `.env` and the process environment.
pub fn model_config_from_args(args: &ModelArgs) -> Result<ModelConfig, AppError> {
    dotenvy::dotenv().ok();
    model_config_with_env(args, |name| std::env::var(name).ok())
}

/// Same as [`model_config_from_args`] with an explicit environment lookup.
pub fn model_config_with_env<E>(args: &ModelArgs, env: E) -> Result<ModelConfig, AppError>
where
    E: Fn(&str) -> Option<String>,
{
    let base = match (&args.spec, &args.model) {
        (Some(json), _) => {
            let value: serde_json::Value = serde_json::from_str(json)
                .map_err(|e| AppError::new(2, format!("Invalid --spec JSON: {e}")))?;
            spec_from_json(&value)?
        }
        (None, Some(name)) => CosmologySpec::Named(name.clone()),
        (None, None) => CosmologySpec::Default,
    };

    let mut overrides = BTreeMap::new();
    for (key, var) in ENV_PARAMS {
        if let Some(raw) = env(var) {
            let value = parse_number(&raw).map_err(|e| AppError::new(2, format!("{var}: {e}")))?;
            overrides.insert(key.to_string(), value);
        }
    }
    for raw in &args.params {
        let (key, value) = parse_param(raw)?;
        overrides.insert(key, value);
    }

    let tolerance = Tolerance {
        abs: args.abs_tol,
        rel: args.rel_tol,
        max_subdivisions: args.max_subdivisions,
    };
    if !(tolerance.abs >= 0.0 && tolerance.rel >= 0.0) || tolerance.max_subdivisions == 0 {
        return Err(AppError::new(
            2,
            "Tolerances must be >= 0 and --max-subdivisions must be >= 1.",
        ));
    }

    Ok(ModelConfig {
        spec: merge_overrides(base, overrides)?,
        tolerance,
    })
}

/// Build the configuration for an evaluating subcommand.
pub fn run_config_from_args(args: &EvalArgs, quantities: &[QuantityKind]) -> Result<RunConfig, AppError> {
    let model = model_config_from_args(&args.model)?;
    let redshifts = redshifts_from_args(args)?;
    Ok(RunConfig {
        model,
        quantities: quantities.to_vec(),
        redshifts,
        attach_units: !args.no_units,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    })
}

/// Explicit `-z` values win; otherwise a grid is generated.
pub fn redshifts_from_args(args: &EvalArgs) -> Result<Vec<f64>, AppError> {
    if !args.redshifts.is_empty() {
        return Ok(args.redshifts.clone());
    }
    if args.log {
        log_grid(args.z_min, args.z_max, args.steps)
    } else {
        linear_grid(args.z_min, args.z_max, args.steps)
    }
}

/// Parse `KEY=VALUE`.
pub fn parse_param(raw: &str) -> Result<(String, f64), AppError> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(AppError::new(
            2,
            format!("Invalid --param '{raw}' (expected KEY=VALUE)."),
        ));
    };
    let value = parse_number(value).map_err(|e| AppError::new(2, format!("--param {key}: {e}")))?;
    Ok((key.trim().to_string(), value))
}

fn parse_number(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| format!("'{}' is not a number ({e})", raw.trim()))
}

/// Fold key overrides into a base specification.
///
/// A mapping base is extended in place; any other base is resolved first so
/// that an unknown name still fails, then its values seed the mapping.
fn merge_overrides(base: CosmologySpec, overrides: BTreeMap<String, f64>) -> Result<CosmologySpec, AppError> {
    if overrides.is_empty() {
        return Ok(base);
    }
    let mut entries = match base {
        CosmologySpec::Mapping(entries) => entries,
        other => {
            let params = resolve(&other)?;
            BTreeMap::from([
                ("H0".to_string(), params.h0),
                ("Om0".to_string(), params.om0),
                ("Ode0".to_string(), params.ode0),
            ])
        }
    };
    entries.extend(overrides);
    Ok(CosmologySpec::Mapping(entries))
}
