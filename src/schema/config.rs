//! Configuration types for seeding and speciation.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ActivationType;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeatConfig {
    /// Generation 1 construction.
    #[serde(default)]
    pub seed: SeedConfig,
    /// Adaptive threshold control.
    #[serde(default)]
    pub speciation: SpeciationConfig,
}

impl NeatConfig {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validate both sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.seed.validate()?;
        self.speciation.validate()
    }
}

fn default_population_size() -> usize {
    150
}
fn default_num_inputs() -> usize {
    2
}
fn default_num_outputs() -> usize {
    1
}
fn default_output_activation() -> ActivationType {
    ActivationType::SteepenedSigmoid
}

/// Settings for the seed population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Total genome count in generation 1.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Input nodes in the template topology (bias excluded).
    #[serde(default = "default_num_inputs")]
    pub num_inputs: usize,
    /// Output nodes in the template topology.
    #[serde(default = "default_num_outputs")]
    pub num_outputs: usize,
    /// Activation assigned to output nodes.
    #[serde(default = "default_output_activation")]
    pub output_activation: ActivationType,
    /// Random seed for reproducible weights.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Reject degenerate settings instead of seeding a useless population.
    #[serde(default)]
    pub strict: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            num_inputs: default_num_inputs(),
            num_outputs: default_num_outputs(),
            output_activation: default_output_activation(),
            random_seed: None,
            strict: false,
        }
    }
}

impl SeedConfig {
    pub fn new(population_size: usize, num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            population_size,
            num_inputs,
            num_outputs,
            ..Default::default()
        }
    }

    /// Nodes in the template: bias + inputs + outputs.
    #[inline]
    pub fn node_count(&self) -> usize {
        1 + self.num_inputs + self.num_outputs
    }

    /// Connections in the fully connected template.
    #[inline]
    pub fn conn_count(&self) -> usize {
        (1 + self.num_inputs) * self.num_outputs
    }

    /// True if the settings would seed a population that cannot learn anything.
    pub fn is_degenerate(&self) -> bool {
        self.population_size == 0 || self.num_inputs == 0 || self.num_outputs == 0
    }

    /// Validate seed parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize);
        }
        if self.num_inputs == 0 {
            return Err(ConfigError::NoInputs);
        }
        if self.num_outputs == 0 {
            return Err(ConfigError::NoOutputs);
        }
        Ok(())
    }
}

impl fmt::Display for SeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SeedConfig{{population_size: {}, num_inputs: {}, num_outputs: {}}}",
            self.population_size, self.num_inputs, self.num_outputs
        )
    }
}

fn default_target_species() -> usize {
    10
}
fn default_compatibility_modifier() -> f64 {
    0.3
}
fn default_compatibility_threshold() -> f64 {
    3.0
}

/// Settings for the adaptive speciation controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciationConfig {
    /// Species count the controller steers toward.
    #[serde(default = "default_target_species")]
    pub target_species: usize,
    /// Step size for threshold changes, also the threshold floor.
    #[serde(default = "default_compatibility_modifier")]
    pub compatibility_modifier: f64,
    /// Initial compatibility threshold handed to the grouping service.
    #[serde(default = "default_compatibility_threshold")]
    pub compatibility_threshold: f64,
}

impl Default for SpeciationConfig {
    fn default() -> Self {
        Self {
            target_species: default_target_species(),
            compatibility_modifier: default_compatibility_modifier(),
            compatibility_threshold: default_compatibility_threshold(),
        }
    }
}

impl SpeciationConfig {
    /// Validate controller parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.compatibility_modifier.is_finite() || self.compatibility_modifier <= 0.0 {
            return Err(ConfigError::InvalidCompatibilityModifier(
                self.compatibility_modifier,
            ));
        }
        if !self.compatibility_threshold.is_finite() || self.compatibility_threshold < 0.0 {
            return Err(ConfigError::InvalidCompatibilityThreshold(
                self.compatibility_threshold,
            ));
        }
        Ok(())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    InvalidPopulationSize,
    #[error("Seed topology needs at least one input")]
    NoInputs,
    #[error("Seed topology needs at least one output")]
    NoOutputs,
    #[error("Compatibility modifier must be positive and finite, got {0}")]
    InvalidCompatibilityModifier(f64),
    #[error("Compatibility threshold must be non-negative and finite, got {0}")]
    InvalidCompatibilityThreshold(f64),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
