//! Shared evaluation pipeline.
//!
//! resolve model -> build `Cosmology` -> evaluate table -> optional exports
//!
//! The CLI handlers only decide which quantities to request and how to print
//! the result.

use tracing::info;

use crate::app::config::{ModelConfig, RunConfig};
use crate::domain::ResolvedModel;
use crate::engine::{Cosmology, QuantityTable};
use crate::error::AppError;
use crate::models::resolve_model;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub model: ResolvedModel,
    pub cosmology: Cosmology,
    pub table: QuantityTable,
}

/// Resolve the configured model.
pub fn build_cosmology(config: &ModelConfig) -> Result<(ResolvedModel, Cosmology), AppError> {
    let model = resolve_model(&config.spec)?;
    let cosmology = Cosmology::new(model.params)?.with_tolerance(config.tolerance);
    info!(model = %model.name, flat = model.params.is_flat(), "resolved cosmology");
    Ok((model, cosmology))
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_eval(config: &RunConfig) -> Result<RunOutput, AppError> {
    let (model, cosmology) = build_cosmology(&config.model)?;

    let table = cosmology.table(&config.quantities, &config.redshifts)?;
    info!(
        rows = table.redshifts.len(),
        columns = table.columns.len(),
        "evaluated table"
    );

    if let Some(path) = &config.export_csv {
        crate::io::write_table_csv(path, &table, config.attach_units)?;
        info!(path = %path.display(), "wrote CSV export");
    }
    if let Some(path) = &config.export_json {
        crate::io::write_table_json(path, &model, cosmology.tolerance(), &table)?;
        info!(path = %path.display(), "wrote JSON export");
    }

    Ok(RunOutput {
        model,
        cosmology,
        table,
    })
}
