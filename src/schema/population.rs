//! Genomes, species and the population container.

use serde::{Deserialize, Serialize};

use super::Substrate;

/// One individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Unique within the population.
    pub id: u64,
    /// Species this genome belongs to.
    pub species_id: u64,
    /// Network structure and weights.
    pub encoded: Substrate,
}

/// A cluster of compatible genomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: u64,
    /// Representative topology used for distance comparisons.
    pub example: Substrate,
}

/// All genomes and species of one generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub generation: usize,
    pub species: Vec<Species>,
    pub genomes: Vec<Genome>,
}

impl Population {
    /// Number of species found by the last grouping pass.
    #[inline]
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Look up a genome by id.
    pub fn genome(&self, id: u64) -> Option<&Genome> {
        self.genomes.iter().find(|g| g.id == id)
    }

    /// Genomes assigned to the given species.
    pub fn members(&self, species_id: u64) -> impl Iterator<Item = &Genome> {
        self.genomes
            .iter()
            .filter(move |g| g.species_id == species_id)
    }
}
