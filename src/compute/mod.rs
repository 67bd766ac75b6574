//! Compute module - Population seeding and adaptive speciation.

mod seeder;
mod speciation;

pub use seeder::*;
pub use speciation::*;
