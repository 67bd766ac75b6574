//! NEAT seeding and adaptive speciation.
//!
//! This crate provides the two pieces of a NEAT-style neuroevolution loop
//! that sit at either end of a generation: building the initial population
//! and keeping the number of species near a target.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Genome data model (substrates, genomes, species) and configuration
//! - `compute`: The population seeder and the adaptive speciation controller
//!
//! Grouping genomes into species is left to an external service
//! implementing [`Speciator`]; [`DynamicSpeciator`] wraps one and adjusts
//! its compatibility threshold after every pass.
//!
//! # Example
//!
//! ```rust,no_run
//! use neat_seed::{
//!     compute::{DynamicSpeciator, Seeder, Speciator},
//!     schema::{NeatConfig, SeedConfig},
//! };
//!
//! # fn grouping_service() -> Box<dyn Speciator> { unimplemented!() }
//! let config = NeatConfig {
//!     seed: SeedConfig::new(150, 3, 1),
//!     ..Default::default()
//! };
//!
//! // Generation 1
//! let mut population = Seeder::new(config.seed.clone()).populate()?;
//!
//! // Once per generation
//! let mut speciator = DynamicSpeciator::from_config(grouping_service(), &config.speciation)?;
//! speciator.speciate(&mut population)?;
//!
//! println!("Threshold is now {:.2}", speciator.compatibility_threshold());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{DynamicSpeciator, Seeder, SpeciationError, Speciator, WeightRng, WeightSource};
pub use schema::{ConfigError, Genome, NeatConfig, Population, SeedConfig, Species, Substrate};
