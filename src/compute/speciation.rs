//! Adaptive control of the speciation compatibility threshold.
//!
//! [`Speciator`] is the contract of a grouping service: given a population
//! and its current compatibility threshold, partition the genomes into
//! species. [`DynamicSpeciator`] wraps any such service and, after each
//! successful pass, steps the threshold toward a target species count.

use log::debug;

use crate::schema::{ConfigError, Population, SpeciationConfig};

/// Errors surfaced by a grouping pass.
#[derive(Debug, thiserror::Error)]
pub enum SpeciationError {
    #[error("Population has no genomes to group")]
    EmptyPopulation,
    #[error("Genome {genome} could not be assigned to a species")]
    Unassigned { genome: u64 },
    #[error("Grouping failed: {0}")]
    Grouping(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A grouping service that assigns genomes to species.
pub trait Speciator {
    /// Partition `population.genomes` into species, filling `population.species`.
    fn speciate(&mut self, population: &mut Population) -> Result<(), SpeciationError>;

    /// Distance cutoff below which two genomes share a species.
    fn compatibility_threshold(&self) -> f64;

    fn set_compatibility_threshold(&mut self, threshold: f64);
}

impl<S: Speciator + ?Sized> Speciator for &mut S {
    fn speciate(&mut self, population: &mut Population) -> Result<(), SpeciationError> {
        (**self).speciate(population)
    }

    fn compatibility_threshold(&self) -> f64 {
        (**self).compatibility_threshold()
    }

    fn set_compatibility_threshold(&mut self, threshold: f64) {
        (**self).set_compatibility_threshold(threshold)
    }
}

impl<S: Speciator + ?Sized> Speciator for Box<S> {
    fn speciate(&mut self, population: &mut Population) -> Result<(), SpeciationError> {
        (**self).speciate(population)
    }

    fn compatibility_threshold(&self) -> f64 {
        (**self).compatibility_threshold()
    }

    fn set_compatibility_threshold(&mut self, threshold: f64) {
        (**self).set_compatibility_threshold(threshold)
    }
}

/// Speciator that tunes the inner service's threshold to hold the species
/// count near `target_species`.
///
/// The controller only looks at the sign of the error and moves the
/// threshold by a fixed step, so the species count oscillates around the
/// target rather than settling on it.
#[derive(Debug, Clone)]
pub struct DynamicSpeciator<S> {
    inner: S,
    /// Desired species count.
    pub target_species: usize,
    /// Step size and lower bound of the threshold.
    pub compatibility_modifier: f64,
}

impl<S: Speciator> DynamicSpeciator<S> {
    /// Wrap `inner`, keeping its current threshold.
    pub fn new(inner: S, target_species: usize, compatibility_modifier: f64) -> Self {
        Self {
            inner,
            target_species,
            compatibility_modifier,
        }
    }

    /// Wrap `inner` and reset its threshold to the configured initial value.
    pub fn from_config(mut inner: S, config: &SpeciationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        inner.set_compatibility_threshold(config.compatibility_threshold);
        Ok(Self::new(
            inner,
            config.target_species,
            config.compatibility_modifier,
        ))
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Next threshold given the species count of the last pass.
    fn adjusted_threshold(&self, species: usize) -> f64 {
        let threshold = self.inner.compatibility_threshold();
        let step = self.compatibility_modifier;
        if species < self.target_species {
            // Floor at the step size so the threshold never collapses.
            step.max(threshold - step)
        } else if species > self.target_species {
            threshold + step
        } else {
            threshold
        }
    }
}

impl<S: Speciator> Speciator for DynamicSpeciator<S> {
    fn speciate(&mut self, population: &mut Population) -> Result<(), SpeciationError> {
        self.inner.speciate(population)?;

        let species = population.species_count();
        let previous = self.inner.compatibility_threshold();
        let next = self.adjusted_threshold(species);
        if next != previous {
            debug!(
                "Generation {}: {} species (target {}), threshold {:.3} -> {:.3}",
                population.generation, species, self.target_species, previous, next
            );
            self.inner.set_compatibility_threshold(next);
        }
        Ok(())
    }

    fn compatibility_threshold(&self) -> f64 {
        self.inner.compatibility_threshold()
    }

    fn set_compatibility_threshold(&mut self, threshold: f64) {
        self.inner.set_compatibility_threshold(threshold);
    }
}
