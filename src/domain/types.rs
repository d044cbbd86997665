//! Shared domain types.
//!
//! These types are intentionally small and serializable so they can be:
//!
//! - passed by value into every engine call
//! - exported to JSON/CSV
//! - printed in terminal reports

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::CosmoError;

/// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

/// Kilometres per megaparsec. `1 / H0` in seconds is this divided by `H0`.
pub const KM_PER_MPC: f64 = 3.085_677_581_491_367_3e19;

/// Seconds per gigayear (Julian years).
pub const SECONDS_PER_GYR: f64 = 3.155_76e16;

/// Finite upper redshift standing in for `z = ∞` in the age integral.
pub const Z_MAX: f64 = 1e4;

pub const DEFAULT_H0: f64 = 67.74;
pub const DEFAULT_OM0: f64 = 0.3089;
pub const DEFAULT_ODE0: f64 = 0.6911;

/// Display name of the default model.
pub const DEFAULT_MODEL_NAME: &str = "FlatLambdaCDM";

/// Tolerance on `Om0 + Ode0 - 1` below which a parameter pair counts as flat.
pub const FLATNESS_EPS: f64 = 1e-9;

/// Canonical ΛCDM parameter record.
///
/// Immutable once built; engines take it by value (it is `Copy`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CosmologyParameters {
    /// Hubble constant (km/s/Mpc).
    #[serde(rename = "H0")]
    pub h0: f64,
    /// Matter density parameter.
    #[serde(rename = "Om0")]
    pub om0: f64,
    /// Dark-energy density parameter.
    #[serde(rename = "Ode0")]
    pub ode0: f64,
}

impl Default for CosmologyParameters {
    fn default() -> Self {
        Self {
            h0: DEFAULT_H0,
            om0: DEFAULT_OM0,
            ode0: DEFAULT_ODE0,
        }
    }
}

impl CosmologyParameters {
    /// Unchecked constructor. Engines call [`validate`](Self::validate) before
    /// integrating, so a bad record fails there instead of producing NaN.
    pub fn new(h0: f64, om0: f64, ode0: f64) -> Self {
        Self { h0, om0, ode0 }
    }

    /// Checked constructor.
    pub fn try_new(h0: f64, om0: f64, ode0: f64) -> Result<Self, CosmoError> {
        let params = Self::new(h0, om0, ode0);
        params.validate()?;
        Ok(params)
    }

    /// `H0` must be finite and positive; `Om0` and `Ode0` must be finite.
    pub fn validate(&self) -> Result<(), CosmoError> {
        if !self.h0.is_finite() || self.h0 <= 0.0 {
            return Err(CosmoError::InvalidParameter {
                name: "H0",
                value: self.h0,
                reason: "must be finite and > 0",
            });
        }
        if !self.om0.is_finite() {
            return Err(CosmoError::InvalidParameter {
                name: "Om0",
                value: self.om0,
                reason: "must be finite",
            });
        }
        if !self.ode0.is_finite() {
            return Err(CosmoError::InvalidParameter {
                name: "Ode0",
                value: self.ode0,
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Flat model: `Ode0 = 1 - Om0`.
    pub fn flat(h0: f64, om0: f64) -> Self {
        Self::new(h0, om0, 1.0 - om0)
    }

    /// Whether `Om0 + Ode0 == 1` within [`FLATNESS_EPS`].
    pub fn is_flat(&self) -> bool {
        (self.om0 + self.ode0 - 1.0).abs() <= FLATNESS_EPS
    }

    /// Hubble distance `c / H0` in Mpc.
    pub fn hubble_distance(&self) -> f64 {
        SPEED_OF_LIGHT_KM_S / self.h0
    }

    /// Hubble time `1 / H0` in Gyr.
    pub fn hubble_time(&self) -> f64 {
        KM_PER_MPC / self.h0 / SECONDS_PER_GYR
    }
}

impl fmt::Display for CosmologyParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{DEFAULT_MODEL_NAME}(H0={}, Om0={}, Ode0={})",
            self.h0, self.om0, self.ode0
        )
    }
}

/// Input accepted by the parameter resolver.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CosmologySpec {
    /// No preference: use the default parameters.
    #[default]
    Default,
    /// An already-resolved record, passed through unchanged.
    Params(CosmologyParameters),
    /// Keys drawn from `{H0, Om0, Ode0}`; missing keys come from the default.
    Mapping(BTreeMap<String, f64>),
    /// A model name.
    Named(String),
}

impl From<CosmologyParameters> for CosmologySpec {
    fn from(value: CosmologyParameters) -> Self {
        CosmologySpec::Params(value)
    }
}

/// A resolved model: parameters plus a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedModel {
    pub name: String,
    pub params: CosmologyParameters,
}

/// One redshift or an ordered sequence of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Redshifts {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Redshifts {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Redshifts::Scalar(z) => std::slice::from_ref(z),
            Redshifts::Sequence(zs) => zs,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<f64> for Redshifts {
    fn from(value: f64) -> Self {
        Redshifts::Scalar(value)
    }
}

impl From<Vec<f64>> for Redshifts {
    fn from(value: Vec<f64>) -> Self {
        Redshifts::Sequence(value)
    }
}

impl From<&[f64]> for Redshifts {
    fn from(value: &[f64]) -> Self {
        Redshifts::Sequence(value.to_vec())
    }
}

/// Numeric result with the same shape as the [`Redshifts`] it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Values {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Values {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Values::Scalar(v) => std::slice::from_ref(v),
            Values::Sequence(vs) => vs,
        }
    }

    pub fn scalar(&self) -> Option<f64> {
        match self {
            Values::Scalar(v) => Some(*v),
            Values::Sequence(_) => None,
        }
    }
}

/// Unit tag attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "Mpc")]
    Mpc,
    #[serde(rename = "Gpc^3")]
    Gpc3,
    #[serde(rename = "Gyr")]
    Gyr,
    #[serde(rename = "km/s/Mpc")]
    KmPerSecPerMpc,
    #[serde(rename = "dimensionless")]
    Dimensionless,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::Mpc => "Mpc",
            Unit::Gpc3 => "Gpc^3",
            Unit::Gyr => "Gyr",
            Unit::KmPerSecPerMpc => "km/s/Mpc",
            Unit::Dimensionless => "",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A numeric result tagged with its unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalQuantity {
    pub values: Values,
    pub unit: Unit,
}

impl PhysicalQuantity {
    pub fn new(values: Values, unit: Unit) -> Self {
        Self { values, unit }
    }

    /// Drop the unit tag.
    pub fn into_values(self) -> Values {
        self.values
    }
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            Unit::Dimensionless => String::new(),
            unit => format!(" {unit}"),
        };
        match &self.values {
            Values::Scalar(v) => write!(f, "{v}{suffix}"),
            Values::Sequence(vs) => {
                let parts: Vec<String> = vs.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]{suffix}", parts.join(", "))
            }
        }
    }
}

/// Which derived quantity to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    /// Dimensionless expansion rate `E(z)`.
    Efunc,
    /// `H(z) = H0 · E(z)`.
    Hubble,
    ComovingDistance,
    LuminosityDistance,
    ComovingVolume,
    Age,
    LookbackTime,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 7] = [
        QuantityKind::Efunc,
        QuantityKind::Hubble,
        QuantityKind::ComovingDistance,
        QuantityKind::LuminosityDistance,
        QuantityKind::ComovingVolume,
        QuantityKind::Age,
        QuantityKind::LookbackTime,
    ];

    pub fn unit(self) -> Unit {
        match self {
            QuantityKind::Efunc => Unit::Dimensionless,
            QuantityKind::Hubble => Unit::KmPerSecPerMpc,
            QuantityKind::ComovingDistance | QuantityKind::LuminosityDistance => Unit::Mpc,
            QuantityKind::ComovingVolume => Unit::Gpc3,
            QuantityKind::Age | QuantityKind::LookbackTime => Unit::Gyr,
        }
    }

    /// Column label for tables and exports.
    pub fn column_name(self) -> &'static str {
        match self {
            QuantityKind::Efunc => "E",
            QuantityKind::Hubble => "H",
            QuantityKind::ComovingDistance => "d_c",
            QuantityKind::LuminosityDistance => "d_l",
            QuantityKind::ComovingVolume => "v_c",
            QuantityKind::Age => "age",
            QuantityKind::LookbackTime => "t_lb",
        }
    }
}
