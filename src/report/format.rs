//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the numerical code stays clean and testable
//! - output changes are localized

use crate::domain::{CosmologyParameters, ResolvedModel, Z_MAX};
use crate::engine::{QuantityColumn, QuantityTable};
use crate::math::Tolerance;

const COL_WIDTH: usize = 16;

/// Model header: name, parameters, derived scales, flatness.
pub fn format_model_summary(model: &ResolvedModel, tol: &Tolerance) -> String {
    let p = &model.params;
    let mut out = String::new();

    out.push_str("=== cosmo - flat ΛCDM ===\n");
    out.push_str(&format!("Model: {}\n", model.name));
    out.push_str(&format!(
        "H0={} km/s/Mpc | Om0={} | Ode0={}\n",
        p.h0, p.om0, p.ode0
    ));
    out.push_str(&format!("{}\n", flatness_line(p)));
    out.push_str(&format!(
        "Hubble distance: {:.3} Mpc | Hubble time: {:.4} Gyr\n",
        p.hubble_distance(),
        p.hubble_time()
    ));
    out.push_str(&format!(
        "Quadrature: abs={:e} rel={:e} max_subdivisions={} | age cutoff z={Z_MAX:e}\n",
        tol.abs, tol.rel, tol.max_subdivisions
    ));

    out
}

fn flatness_line(p: &CosmologyParameters) -> String {
    if p.is_flat() {
        "Geometry: flat (Om0 + Ode0 = 1)".to_string()
    } else {
        format!(
            "Geometry: NOT flat (Om0 + Ode0 = {:.6}); volume and age use flat formulas",
            p.om0 + p.ode0
        )
    }
}

/// Fixed-width table with one row per redshift.
pub fn format_table(table: &QuantityTable, attach_units: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:>10}", "z"));
    for col in &table.columns {
        out.push_str(&format!("{:>COL_WIDTH$}", column_header(col, attach_units)));
    }
    out.push('\n');

    for (row, z) in table.redshifts.iter().enumerate() {
        out.push_str(&format!("{:>10}", fmt_z(*z)));
        for col in &table.columns {
            let value = col.values.get(row).copied().unwrap_or(f64::NAN);
            out.push_str(&format!("{:>COL_WIDTH$}", fmt_value(value)));
        }
        out.push('\n');
    }

    out
}

/// `d_c [Mpc]`, or the bare column name when units are off.
pub fn column_header(col: &QuantityColumn, attach_units: bool) -> String {
    let name = col.kind.column_name();
    let unit = col.unit.label();
    if attach_units && !unit.is_empty() {
        format!("{name} [{unit}]")
    } else {
        name.to_string()
    }
}

fn fmt_z(z: f64) -> String {
    if z != 0.0 && (z.abs() >= 1e5 || z.abs() < 1e-3) {
        format!("{z:.3e}")
    } else {
        format!("{z:.4}")
    }
}

fn fmt_value(v: f64) -> String {
    if !v.is_finite() {
        return "-".to_string();
    }
    if v != 0.0 && (v.abs() >= 1e7 || v.abs() < 1e-4) {
        format!("{v:.6e}")
    } else {
        format!("{v:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QuantityKind, Unit};

    fn table() -> QuantityTable {
        QuantityTable {
            redshifts: vec![0.0, 1.0],
            columns: vec![
                QuantityColumn {
                    kind: QuantityKind::ComovingDistance,
                    unit: Unit::Mpc,
                    values: vec![0.0, 3396.21],
                },
                QuantityColumn {
                    kind: QuantityKind::Efunc,
                    unit: Unit::Dimensionless,
                    values: vec![1.0, 1.79],
                },
            ],
        }
    }

    #[test]
    fn headers_carry_units_unless_disabled() {
        let with = format_table(&table(), true);
        assert!(with.contains("d_c [Mpc]"));
        // Dimensionless columns never get a bracket.
        assert!(!with.contains("E ["));

        let without = format_table(&table(), false);
        assert!(!without.contains("[Mpc]"));
    }

    #[test]
    fn one_line_per_redshift_plus_header() {
        let out = format_table(&table(), true);
        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().nth(2).unwrap().contains("3396.210000"));
    }

    #[test]
    fn summary_flags_non_flat_models() {
        let model = ResolvedModel {
            name: "custom".to_string(),
            params: CosmologyParameters::new(70.0, 0.3, 0.5),
        };
        let out = format_model_summary(&model, &Tolerance::default());
        assert!(out.contains("NOT flat"));
        assert!(out.contains("Model: custom"));
    }
}
