//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - physical constants and default parameter values
//! - the canonical parameter record (`CosmologyParameters`) and the inputs the
//!   resolver accepts (`CosmologySpec`)
//! - redshift inputs, result shapes and unit tags (`Redshifts`, `Values`,
//!   `PhysicalQuantity`)

pub mod types;

pub use types::*;
