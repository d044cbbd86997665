//! Redshift grids for tables.
//!
//! Grids are deterministic and inclusive of both endpoints. Log spacing is
//! in `1 + z`, so a grid may start at `z = 0`.

use crate::error::AppError;

/// Largest grid a table may request.
pub const MAX_GRID_STEPS: usize = 1_000_000;

fn check_range(min: f64, max: f64, steps: usize) -> Result<(), AppError> {
    if !(min.is_finite() && max.is_finite() && min > -1.0 && max > min) {
        return Err(AppError::new(
            2,
            format!("Invalid redshift range: min={min}, max={max} (must be finite, > -1, and max>min)."),
        ));
    }
    if steps < 2 {
        return Err(AppError::new(2, "Redshift steps must be >= 2."));
    }
    if steps > MAX_GRID_STEPS {
        return Err(AppError::new(
            2,
            format!("Redshift steps must be <= {MAX_GRID_STEPS} (got {steps})."),
        ));
    }
    Ok(())
}

/// `steps` evenly spaced redshifts between `min` and `max`.
pub fn linear_grid(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    check_range(min, max, steps)?;

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps - 1 {
        out.push(min + step * i as f64);
    }
    out.push(max);
    Ok(out)
}

/// `steps` redshifts with `ln(1 + z)` evenly spaced between the endpoints.
pub fn log_grid(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    check_range(min, max, steps)?;

    let ln_min = min.ln_1p();
    let ln_max = max.ln_1p();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    out.push(min);
    for i in 1..steps - 1 {
        out.push((ln_min + step * i as f64).exp_m1());
    }
    out.push(max);
    Ok(out)
}
