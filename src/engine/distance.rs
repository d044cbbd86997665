//! Line-of-sight distances.
//!
//! `D_C(z) = (c / H0) ∫_0^z dz' / E(z')`, integrated directly for every
//! requested redshift (no series expansion, no caching between redshifts).

use crate::domain::CosmologyParameters;
use crate::error::CosmoError;
use crate::math::{Tolerance, check_redshift, integrate, inv_efunc};

/// Comoving distance in Mpc. Exactly zero at `z = 0`.
pub fn comoving_distance(
    params: CosmologyParameters,
    z: f64,
    tol: &Tolerance,
) -> Result<f64, CosmoError> {
    params.validate()?;
    check_redshift(z)?;
    let integral = integrate(|zp| inv_efunc(params, zp), 0.0, z, tol)?;
    Ok(params.hubble_distance() * integral.value)
}

/// Luminosity distance in Mpc: `(1 + z) D_C(z)`.
pub fn luminosity_distance(
    params: CosmologyParameters,
    z: f64,
    tol: &Tolerance,
) -> Result<f64, CosmoError> {
    Ok((1.0 + z) * comoving_distance(params, z, tol)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn einstein_de_sitter() -> CosmologyParameters {
        CosmologyParameters::new(70.0, 1.0, 0.0)
    }

    #[test]
    fn comoving_distance_is_zero_today() {
        let d = comoving_distance(CosmologyParameters::default(), 0.0, &Tolerance::default()).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn comoving_distance_matches_einstein_de_sitter_closed_form() {
        // With Om0 = 1: D_C = 2 (c/H0) (1 - 1/sqrt(1+z)).
        let p = einstein_de_sitter();
        let tol = Tolerance::default();
        for &z in &[0.1, 0.5, 1.0, 3.0, 10.0] {
            let d = comoving_distance(p, z, &tol).unwrap();
            let exact = 2.0 * p.hubble_distance() * (1.0 - 1.0 / (1.0_f64 + z).sqrt());
            assert!(((d - exact) / exact).abs() < 1e-9, "z={z}: {d} vs {exact}");
        }
    }

    #[test]
    fn comoving_distance_default_model_at_unit_redshift() {
        // Reference value for H0=67.74, Om0=0.3089 (flat, no radiation).
        let d = comoving_distance(CosmologyParameters::default(), 1.0, &Tolerance::default()).unwrap();
        assert!(d > 3350.0 && d < 3450.0, "got {d}");
    }

    #[test]
    fn comoving_distance_is_strictly_increasing() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        let zs = [0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 20.0, 100.0, 1000.0];
        let ds: Vec<f64> = zs.iter().map(|&z| comoving_distance(p, z, &tol).unwrap()).collect();
        for pair in ds.windows(2) {
            assert!(pair[0] < pair[1], "{pair:?}");
        }
    }

    #[test]
    fn luminosity_distance_scales_comoving_by_one_plus_z() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        let dc = comoving_distance(p, 2.0, &tol).unwrap();
        let dl = luminosity_distance(p, 2.0, &tol).unwrap();
        assert_eq!(dl, 3.0 * dc);
    }

    #[test]
    fn negative_redshift_above_minus_one_gives_negative_distance() {
        let d = comoving_distance(CosmologyParameters::default(), -0.5, &Tolerance::default()).unwrap();
        assert!(d < 0.0);
    }

    #[test]
    fn non_positive_h0_is_rejected_even_at_zero_redshift() {
        let tol = Tolerance::default();
        for h0 in [0.0, -70.0] {
            let p = CosmologyParameters::new(h0, 0.3089, 0.6911);
            for z in [0.0, 1.0] {
                let err = comoving_distance(p, z, &tol).unwrap_err();
                assert!(matches!(err, CosmoError::InvalidParameter { name: "H0", .. }), "H0={h0} z={z}");
            }
        }
    }

    #[test]
    fn redshift_below_minus_one_is_a_domain_error() {
        let err = comoving_distance(CosmologyParameters::default(), -1.5, &Tolerance::default()).unwrap_err();
        assert!(matches!(err, CosmoError::Domain { .. }));
    }
}
