//! Mathematical building blocks: the Friedmann expansion rate and adaptive quadrature.

pub mod friedmann;
pub mod quadrature;

pub use friedmann::*;
pub use quadrature::*;
