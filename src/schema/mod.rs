//! Schema module - Genome data model and configuration types.

mod config;
mod population;
mod substrate;

pub use config::*;
pub use population::*;
pub use substrate::*;
