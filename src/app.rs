//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and initialises logging
//! - resolves the model (flags + environment)
//! - evaluates the requested quantities
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{Command, EvalArgs, ModelArgs, ShowArgs};
use crate::domain::QuantityKind;
use crate::error::AppError;

pub mod config;
pub mod pipeline;

/// Entry point for the `cosmo` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init_cli_logger(cli.verbose);

    match cli.command {
        Command::Distance(args) => handle_eval(
            &args,
            &[QuantityKind::ComovingDistance, QuantityKind::LuminosityDistance],
        ),
        Command::Volume(args) => handle_eval(&args, &[QuantityKind::ComovingVolume]),
        Command::Age(args) => handle_eval(&args, &[QuantityKind::Age, QuantityKind::LookbackTime]),
        Command::Table(args) => handle_eval(&args, &QuantityKind::ALL),
        Command::Params(args) => handle_params(&args),
        Command::Show(args) => handle_show(&args),
    }
}

fn handle_eval(args: &EvalArgs, quantities: &[QuantityKind]) -> Result<(), AppError> {
    let config = config::run_config_from_args(args, quantities)?;
    let run = pipeline::run_eval(&config)?;

    println!(
        "{}",
        crate::report::format_model_summary(&run.model, run.cosmology.tolerance())
    );
    print!("{}", crate::report::format_table(&run.table, config.attach_units));

    Ok(())
}

fn handle_params(args: &ModelArgs) -> Result<(), AppError> {
    let config = config::model_config_from_args(args)?;
    let (model, cosmology) = pipeline::build_cosmology(&config)?;
    print!(
        "{}",
        crate::report::format_model_summary(&model, cosmology.tolerance())
    );
    Ok(())
}

fn handle_show(args: &ShowArgs) -> Result<(), AppError> {
    let file = crate::io::read_table_json(&args.table)?;

    println!("{}", crate::report::format_model_summary(&file.model, &file.tolerance));
    println!("Generated: {}", file.generated.to_rfc3339());
    print!("{}", crate::report::format_table(&file.table, !args.no_units));
    Ok(())
}
