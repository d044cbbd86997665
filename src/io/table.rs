//! Read/write table JSON files.
//!
//! Table JSON is the portable representation of a run:
//! - the resolved model (name + parameters)
//! - the quadrature tolerance and age cutoff used
//! - every evaluated column with its unit

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ResolvedModel, Z_MAX};
use crate::engine::QuantityTable;
use crate::error::AppError;
use crate::math::Tolerance;

/// A saved table file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub model: ResolvedModel,
    pub tolerance: Tolerance,
    pub z_cutoff: f64,
    pub table: QuantityTable,
}

/// Write a table JSON file.
pub fn write_table_json(
    path: &Path,
    model: &ResolvedModel,
    tolerance: &Tolerance,
    table: &QuantityTable,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create table JSON '{}': {e}", path.display())))?;

    let out = TableFile {
        tool: "cosmo".to_string(),
        generated: Utc::now(),
        model: model.clone(),
        tolerance: *tolerance,
        z_cutoff: Z_MAX,
        table: table.clone(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(4, format!("Failed to write table JSON: {e}")))?;

    Ok(())
}

/// Read a table JSON file.
pub fn read_table_json(path: &Path) -> Result<TableFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open table JSON '{}': {e}", path.display())))?;
    let table: TableFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid table JSON: {e}")))?;
    Ok(table)
}
