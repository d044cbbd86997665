//! Input/output helpers.
//!
//! - table exports to CSV (`export`)
//! - table JSON read/write (`table`)

pub mod export;
pub mod table;

pub use export::*;
pub use table::*;
