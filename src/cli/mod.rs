//! Command-line parsing for the `cosmo` binary.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! numerical code. Everything here ends up in an `app::RunConfig`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cosmo", version, about = "Flat ΛCDM distances, volumes and ages")]
pub struct Cli {
    /// Log per-integral diagnostics (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Comoving and luminosity distance (Mpc).
    Distance(EvalArgs),
    /// Comoving volume (Gpc^3).
    Volume(EvalArgs),
    /// Age of the universe and lookback time (Gyr).
    Age(EvalArgs),
    /// Every derived quantity.
    Table(EvalArgs),
    /// Print the resolved parameter record.
    Params(ModelArgs),
    /// Print a table previously written with `--export-json`.
    Show(ShowArgs),
}

/// Which model to use and how precisely to integrate.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Model name (only `default` / `FlatLambdaCDM` are known).
    #[arg(long, conflicts_with = "spec")]
    pub model: Option<String>,

    /// Model specification as JSON: null, a name, or an object of H0/Om0/Ode0.
    #[arg(long, value_name = "JSON")]
    pub spec: Option<String>,

    /// Parameter override `KEY=VALUE` (keys: H0, Om0, Ode0). Repeatable.
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Absolute quadrature tolerance.
    #[arg(long, default_value_t = 1.49e-8)]
    pub abs_tol: f64,

    /// Relative quadrature tolerance.
    #[arg(long, default_value_t = 1.49e-8)]
    pub rel_tol: f64,

    /// Maximum number of quadrature subintervals.
    #[arg(long, default_value_t = 200)]
    pub max_subdivisions: usize,
}

/// Options shared by every evaluating subcommand.
#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Explicit redshifts (comma separated or repeated).
    #[arg(short = 'z', long = "z", value_delimiter = ',', num_args = 1.., allow_negative_numbers = true)]
    pub redshifts: Vec<f64>,

    /// Grid start (used when no explicit redshifts are given).
    #[arg(long, default_value_t = 0.0)]
    pub z_min: f64,

    /// Grid end.
    #[arg(long, default_value_t = 10.0)]
    pub z_max: f64,

    /// Number of grid points.
    #[arg(long, default_value_t = 11)]
    pub steps: usize,

    /// Space the grid evenly in ln(1+z) instead of z.
    #[arg(long)]
    pub log: bool,

    /// Print bare numbers without unit labels.
    #[arg(long)]
    pub no_units: bool,

    /// Export the evaluated table to CSV.
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Export the evaluated table (plus model metadata) to JSON.
    #[arg(long)]
    pub export_json: Option<PathBuf>,
}

/// Options for re-printing an exported table.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Table JSON produced by `--export-json`.
    #[arg(long, value_name = "JSON")]
    pub table: PathBuf,

    /// Print bare numbers without unit labels.
    #[arg(long)]
    pub no_units: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_redshift_list_and_params() {
        let cli = Cli::parse_from([
            "cosmo", "distance", "-z", "0.5,1,2", "-p", "H0=70", "--param", "Om0=0.3",
        ]);
        let Command::Distance(args) = cli.command else {
            panic!("expected distance");
        };
        assert_eq!(args.redshifts, vec![0.5, 1.0, 2.0]);
        assert_eq!(args.model.params, vec!["H0=70", "Om0=0.3"]);
    }

    #[test]
    fn model_and_spec_conflict() {
        let res = Cli::try_parse_from(["cosmo", "params", "--model", "default", "--spec", "null"]);
        assert!(res.is_err());
    }

    #[test]
    fn grid_defaults_apply() {
        let cli = Cli::parse_from(["cosmo", "age"]);
        let Command::Age(args) = cli.command else {
            panic!("expected age");
        };
        assert!(args.redshifts.is_empty());
        assert_eq!(args.steps, 11);
        assert!(!args.log);
    }
}
