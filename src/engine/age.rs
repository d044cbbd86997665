//! Cosmic age and lookback time.
//!
//! Both come from the integrand `g(z) = 1 / ((1+z) E(z))`:
//!
//! - `I_z = ∫_z^{Z_MAX} g` (zero for `z >= Z_MAX`)
//! - `I0  = I_0`
//! - age at `z`           = `I_z`        · (1/H0)
//! - lookback time to `z` = `(I0 − I_z)` · (1/H0)
//!
//! `Z_MAX = 1e4` stands in for the infinite upper bound. The integrand decays
//! like `z^-2.5`, so the truncated tail is ~1e-6 of the total for realistic
//! parameters. The cutoff is a tuning constant; changing it changes results.

use crate::domain::{CosmologyParameters, KM_PER_MPC, SECONDS_PER_GYR, Z_MAX};
use crate::error::CosmoError;
use crate::math::{Tolerance, age_integrand, check_redshift, integrate};

/// `I_z`: dimensionless integral of `g` from `z` up to the cutoff.
pub fn age_integral(params: CosmologyParameters, z: f64, tol: &Tolerance) -> Result<f64, CosmoError> {
    params.validate()?;
    check_redshift(z)?;
    if z >= Z_MAX {
        return Ok(0.0);
    }
    let integral = integrate(|zp| age_integrand(params, zp), z, Z_MAX, tol)?;
    Ok(integral.value)
}

/// `I0`: the full (truncated) age integral, shared by a batch of lookback times.
pub fn horizon_integral(params: CosmologyParameters, tol: &Tolerance) -> Result<f64, CosmoError> {
    age_integral(params, 0.0, tol)
}

/// Convert a dimensionless age integral to Gyr.
pub fn integral_to_gyr(params: CosmologyParameters, integral: f64) -> f64 {
    let seconds = integral * (KM_PER_MPC / params.h0);
    seconds / SECONDS_PER_GYR
}

/// Age of the universe at redshift `z`, in Gyr. Zero for `z >= Z_MAX`.
pub fn age(params: CosmologyParameters, z: f64, tol: &Tolerance) -> Result<f64, CosmoError> {
    Ok(integral_to_gyr(params, age_integral(params, z, tol)?))
}

/// Lookback time to redshift `z`, in Gyr.
pub fn lookback_time(params: CosmologyParameters, z: f64, tol: &Tolerance) -> Result<f64, CosmoError> {
    let i0 = horizon_integral(params, tol)?;
    lookback_time_with(params, z, i0, tol)
}

/// Lookback time given a precomputed `I0` (see [`horizon_integral`]).
pub fn lookback_time_with(
    params: CosmologyParameters,
    z: f64,
    i0: f64,
    tol: &Tolerance,
) -> Result<f64, CosmoError> {
    let iz = age_integral(params, z, tol)?;
    Ok(integral_to_gyr(params, i0 - iz))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_today_is_about_13_8_gyr() {
        let t0 = age(CosmologyParameters::default(), 0.0, &Tolerance::default()).unwrap();
        assert!((t0 - 13.8).abs() < 0.05, "got {t0}");
    }

    #[test]
    fn age_today_matches_flat_lcdm_closed_form() {
        // t0 H0 = 2 / (3 sqrt(Ode0)) asinh(sqrt(Ode0 / Om0)); the cutoff tail is ~1e-6.
        let p = CosmologyParameters::default();
        let t0 = age(p, 0.0, &Tolerance::default()).unwrap();
        let exact = 2.0 / (3.0 * p.ode0.sqrt()) * (p.ode0 / p.om0).sqrt().asinh() * p.hubble_time();
        assert!(((t0 - exact) / exact).abs() < 1e-5, "{t0} vs {exact}");
    }

    #[test]
    fn age_matches_einstein_de_sitter_with_cutoff() {
        // Om0 = 1: I_z = (2/3) [(1+z)^-1.5 - (1+Z_MAX)^-1.5].
        let p = CosmologyParameters::new(70.0, 1.0, 0.0);
        let tol = Tolerance::default();
        for &z in &[0.0, 0.5, 2.0, 50.0] {
            let t = age(p, z, &tol).unwrap();
            let iz = 2.0 / 3.0 * ((1.0_f64 + z).powf(-1.5) - (1.0 + Z_MAX).powf(-1.5));
            let exact = iz * p.hubble_time();
            assert!(((t - exact) / exact).abs() < 1e-8, "z={z}: {t} vs {exact}");
        }
    }

    #[test]
    fn age_is_strictly_decreasing() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        let zs = [0.0, 0.1, 0.5, 1.0, 3.0, 10.0, 100.0, 1000.0, 5000.0, 9999.0];
        let ages: Vec<f64> = zs.iter().map(|&z| age(p, z, &tol).unwrap()).collect();
        for pair in ages.windows(2) {
            assert!(pair[0] > pair[1], "{pair:?}");
        }
        assert!(ages[ages.len() - 1] > 0.0);
    }

    #[test]
    fn age_is_zero_at_and_beyond_cutoff() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        for &z in &[Z_MAX, 1.5e4, 1e6] {
            assert_eq!(age(p, z, &tol).unwrap(), 0.0);
        }
    }

    #[test]
    fn lookback_time_complements_age() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        let t0 = age(p, 0.0, &tol).unwrap();
        assert_eq!(lookback_time(p, 0.0, &tol).unwrap(), 0.0);
        for &z in &[0.3, 1.0, 7.0] {
            let sum = age(p, z, &tol).unwrap() + lookback_time(p, z, &tol).unwrap();
            assert!((sum - t0).abs() < 1e-9, "z={z}: {sum} vs {t0}");
        }
        assert_eq!(lookback_time(p, Z_MAX, &tol).unwrap(), t0);
    }

    #[test]
    fn invalid_h0_is_rejected_instead_of_giving_infinite_ages() {
        let tol = Tolerance::default();
        for h0 in [0.0, -70.0, f64::NAN] {
            let p = CosmologyParameters::new(h0, 0.3089, 0.6911);
            assert!(matches!(age(p, 0.0, &tol), Err(CosmoError::InvalidParameter { .. })));
            assert!(matches!(age(p, Z_MAX, &tol), Err(CosmoError::InvalidParameter { .. })));
            assert!(matches!(lookback_time(p, 1.0, &tol), Err(CosmoError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn age_rejects_redshift_below_minus_one() {
        let err = age(CosmologyParameters::default(), -1.5, &Tolerance::default()).unwrap_err();
        assert!(matches!(err, CosmoError::Domain { .. }));
    }
}
