//! Dimensionless expansion rate for flat ΛCDM.
//!
//! `E(z) = sqrt(Om0 (1+z)^3 + Ode0)`
//!
//! No radiation or curvature terms. The function is total for `z > -1` as long
//! as the radicand stays positive; anything else is reported as a domain error
//! instead of leaking NaN into an integral.

use crate::domain::CosmologyParameters;
use crate::error::CosmoError;

/// Reject redshifts the model cannot evaluate.
pub fn check_redshift(z: f64) -> Result<(), CosmoError> {
    if !z.is_finite() {
        return Err(CosmoError::Domain {
            z,
            reason: "redshift must be finite",
        });
    }
    if z <= -1.0 {
        return Err(CosmoError::Domain {
            z,
            reason: "redshift must be greater than -1",
        });
    }
    Ok(())
}

/// `E(z)`.
pub fn efunc(params: CosmologyParameters, z: f64) -> Result<f64, CosmoError> {
    params.validate()?;
    check_redshift(z)?;
    let zp1 = 1.0 + z;
    let radicand = params.om0 * zp1 * zp1 * zp1 + params.ode0;
    if radicand.is_nan() || radicand <= 0.0 {
        return Err(CosmoError::Domain {
            z,
            reason: "Om0 (1+z)^3 + Ode0 is not positive",
        });
    }
    Ok(radicand.sqrt())
}

/// `1 / E(z)`, the comoving-distance integrand.
pub fn inv_efunc(params: CosmologyParameters, z: f64) -> Result<f64, CosmoError> {
    Ok(1.0 / efunc(params, z)?)
}

/// `1 / ((1+z) E(z))`, the age / lookback-time integrand.
pub fn age_integrand(params: CosmologyParameters, z: f64) -> Result<f64, CosmoError> {
    Ok(1.0 / ((1.0 + z) * efunc(params, z)?))
}

/// Hubble parameter `H(z) = H0 E(z)` in km/s/Mpc.
pub fn hubble_parameter(params: CosmologyParameters, z: f64) -> Result<f64, CosmoError> {
    Ok(params.h0 * efunc(params, z)?)
}
