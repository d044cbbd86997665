//! `Cosmology`: one value bundling parameters and quadrature tolerance.
//!
//! This is the single public interface over the engines. All methods are
//! thin forwards to the pure functions in the sibling modules.

use crate::domain::{
    CosmologyParameters, CosmologySpec, PhysicalQuantity, QuantityKind, Redshifts, Values,
};
use crate::engine::{QuantityTable, age, batch, distance, volume};
use crate::error::CosmoError;
use crate::math::{self, Tolerance};
use crate::models::resolve;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cosmology {
    params: CosmologyParameters,
    tol: Tolerance,
}

impl Default for Cosmology {
    fn default() -> Self {
        Self {
            params: CosmologyParameters::default(),
            tol: Tolerance::default(),
        }
    }
}

impl Cosmology {
    /// Wrap a parameter record, rejecting values no engine can evaluate.
    pub fn new(params: CosmologyParameters) -> Result<Self, CosmoError> {
        params.validate()?;
        Ok(Self {
            params,
            tol: Tolerance::default(),
        })
    }

    /// Resolve `spec` and wrap the result.
    pub fn from_spec(spec: &CosmologySpec) -> Result<Self, CosmoError> {
        Self::new(resolve(spec)?)
    }

    pub fn with_tolerance(mut self, tol: Tolerance) -> Self {
        self.tol = tol;
        self
    }

    pub fn params(&self) -> CosmologyParameters {
        self.params
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tol
    }

    pub fn efunc(&self, z: f64) -> Result<f64, CosmoError> {
        math::efunc(self.params, z)
    }

    pub fn hubble_parameter(&self, z: f64) -> Result<f64, CosmoError> {
        math::hubble_parameter(self.params, z)
    }

    pub fn comoving_distance(&self, z: f64) -> Result<f64, CosmoError> {
        distance::comoving_distance(self.params, z, &self.tol)
    }

    pub fn luminosity_distance(&self, z: f64) -> Result<f64, CosmoError> {
        distance::luminosity_distance(self.params, z, &self.tol)
    }

    pub fn comoving_volume(&self, z: f64) -> Result<f64, CosmoError> {
        volume::comoving_volume(self.params, z, &self.tol)
    }

    pub fn age(&self, z: f64) -> Result<f64, CosmoError> {
        age::age(self.params, z, &self.tol)
    }

    pub fn lookback_time(&self, z: f64) -> Result<f64, CosmoError> {
        age::lookback_time(self.params, z, &self.tol)
    }

    pub fn comoving_distance_batch(&self, zs: &[f64]) -> Result<Vec<f64>, CosmoError> {
        batch::comoving_distance_batch(self.params, zs, &self.tol)
    }

    pub fn luminosity_distance_batch(&self, zs: &[f64]) -> Result<Vec<f64>, CosmoError> {
        batch::luminosity_distance_batch(self.params, zs, &self.tol)
    }

    pub fn comoving_volume_batch(&self, zs: &[f64]) -> Result<Vec<f64>, CosmoError> {
        batch::comoving_volume_batch(self.params, zs, &self.tol)
    }

    pub fn age_batch(&self, zs: &[f64]) -> Result<Vec<f64>, CosmoError> {
        batch::age_batch(self.params, zs, &self.tol)
    }

    pub fn lookback_time_batch(&self, zs: &[f64]) -> Result<Vec<f64>, CosmoError> {
        batch::lookback_time_batch(self.params, zs, &self.tol)
    }

    /// Raw values, same shape as `z`.
    pub fn evaluate(&self, kind: QuantityKind, z: &Redshifts) -> Result<Values, CosmoError> {
        batch::evaluate(self.params, kind, z, &self.tol)
    }

    /// Unit-tagged values, same shape as `z`.
    pub fn measure(&self, kind: QuantityKind, z: &Redshifts) -> Result<PhysicalQuantity, CosmoError> {
        batch::measure(self.params, kind, z, &self.tol)
    }

    /// Several quantities over the same redshifts.
    pub fn table(&self, kinds: &[QuantityKind], zs: &[f64]) -> Result<QuantityTable, CosmoError> {
        batch::evaluate_table(self.params, kinds, zs, &self.tol)
    }
}
