//! `cosmo-distances` library crate.
//!
//! Flat ΛCDM distances, volumes and ages computed directly from the Friedmann
//! equation by adaptive quadrature.
//!
//! The binary (`cosmo`) is a thin wrapper around this library so that:
//!
//! - the numerical core is testable without spawning processes
//! - every quantity is available as a pure function of `(parameters, z)`

pub mod app;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod report;

pub use domain::{CosmologyParameters, CosmologySpec, PhysicalQuantity, QuantityKind, Redshifts, Unit, Values};
pub use engine::Cosmology;
pub use error::CosmoError;
pub use math::Tolerance;
pub use models::{CosmologyContext, resolve};
