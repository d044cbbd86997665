//! Comoving volume under the flat-universe sphere formula.

use std::f64::consts::PI;

use crate::domain::CosmologyParameters;
use crate::engine::distance::comoving_distance;
use crate::error::CosmoError;
use crate::math::Tolerance;

/// Mpc per Gpc.
const MPC_PER_GPC: f64 = 1e3;

/// Comoving volume in Gpc³: `(4/3) π (D_C / 1000)³`.
pub fn comoving_volume(
    params: CosmologyParameters,
    z: f64,
    tol: &Tolerance,
) -> Result<f64, CosmoError> {
    let r = comoving_distance(params, z, tol)? / MPC_PER_GPC;
    Ok(sphere_volume(r))
}

/// Volume of a sphere of comoving radius `r`.
pub fn sphere_volume(r: f64) -> f64 {
    (4.0 / 3.0) * PI * r * r * r
}
