//! Export evaluated tables to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::engine::QuantityTable;
use crate::error::AppError;

/// Write a table to a CSV file, one row per redshift.
///
/// With units on, headers read `d_c_Mpc`, `v_c_Gpc^3`, ...; dimensionless
/// columns never carry a suffix.
pub fn write_table_csv(path: &Path, table: &QuantityTable, attach_units: bool) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut header = vec!["z".to_string()];
    for col in &table.columns {
        let unit = col.unit.label();
        if attach_units && !unit.is_empty() {
            header.push(format!("{}_{}", col.kind.column_name(), unit.replace('/', "_per_")));
        } else {
            header.push(col.kind.column_name().to_string());
        }
    }
    writeln!(file, "{}", header.join(","))
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for (row, z) in table.redshifts.iter().enumerate() {
        let mut fields = Vec::with_capacity(table.columns.len() + 1);
        fields.push(format!("{z}"));
        for col in &table.columns {
            fields.push(col.values.get(row).map(|v| format!("{v:.10}")).unwrap_or_default());
        }
        writeln!(file, "{}", fields.join(","))
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
