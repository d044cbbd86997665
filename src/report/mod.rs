//! Reporting utilities: model summaries and quantity tables for the terminal.

pub mod format;

pub use format::*;
