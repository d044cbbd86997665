//! Numerical engines.
//!
//! Responsibilities:
//!
//! - comoving / luminosity distance (`distance`)
//! - comoving volume (`volume`)
//! - age and lookback time with a finite redshift cutoff (`age`)
//! - element-wise evaluation over redshift batches, in parallel (`batch`)
//! - redshift grids for tables (`grid`)
//! - the `Cosmology` facade bundling parameters and tolerance (`cosmology`)

pub mod age;
pub mod batch;
pub mod cosmology;
pub mod distance;
pub mod grid;
pub mod volume;

pub use age::*;
pub use batch::*;
pub use cosmology::*;
pub use distance::*;
pub use grid::*;
pub use volume::*;
