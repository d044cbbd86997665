//! Model resolution.
//!
//! Specifications are resolved into parameter records here so the engines can
//! stay pure functions of `(CosmologyParameters, z)`.

pub mod context;
pub mod resolver;

pub use context::*;
pub use resolver::*;
