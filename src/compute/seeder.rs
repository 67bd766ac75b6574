//! Construction of the seed (generation 1) population.
//!
//! Every genome starts from the same minimal template: a bias node and the
//! input nodes on layer 0, fully connected to the output nodes on layer 1.
//! Genomes share that topology but each draws its own connection weights
//! from a standard normal distribution.

use log::{debug, warn};
use rand::prelude::*;
use rand_distr::StandardNormal;

use crate::schema::{
    ActivationType, ConfigError, Conn, Genome, NeuronType, Node, Population, Position, SeedConfig,
    Species, Substrate,
};

/// Species id assigned to every seeded genome.
const SEED_SPECIES_ID: u64 = 1;

/// Source of initial connection weights.
pub trait WeightSource {
    /// Next weight, expected to follow N(0, 1).
    fn next_weight(&mut self) -> f64;
}

impl<W: WeightSource + ?Sized> WeightSource for &mut W {
    fn next_weight(&mut self) -> f64 {
        (**self).next_weight()
    }
}

/// Standard normal weight sampler backed by a seedable RNG.
pub struct WeightRng {
    rng: StdRng,
}

impl WeightRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl WeightSource for WeightRng {
    fn next_weight(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Builds generation 1 from a [`SeedConfig`].
pub struct Seeder<W = WeightRng> {
    config: SeedConfig,
    weights: W,
}

impl Seeder<WeightRng> {
    /// Create a seeder, using `config.random_seed` if set.
    pub fn new(config: SeedConfig) -> Self {
        let weights = match config.random_seed {
            Some(seed) => WeightRng::new(seed),
            None => WeightRng::random(),
        };
        Self { config, weights }
    }
}

impl<W: WeightSource> Seeder<W> {
    /// Create a seeder with an explicit weight source.
    pub fn with_weights(config: SeedConfig, weights: W) -> Self {
        Self { config, weights }
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Build the template substrate with freshly sampled weights.
    pub fn template(&mut self) -> Substrate {
        let inputs = self.config.num_inputs;
        let outputs = self.config.num_outputs;

        let mut nodes = Vec::with_capacity(self.config.node_count());
        nodes.push(Node::new(
            Position::new(0.0, 0.0),
            NeuronType::Bias,
            ActivationType::Direct,
        ));

        for i in 0..inputs {
            let x = (i + 1) as f64 / inputs as f64;
            nodes.push(Node::new(
                Position::new(0.0, x),
                NeuronType::Input,
                ActivationType::Direct,
            ));
        }

        for i in 0..outputs {
            let x = if outputs > 1 {
                i as f64 / (outputs - 1) as f64
            } else {
                0.5
            };
            nodes.push(Node::new(
                Position::new(1.0, x),
                NeuronType::Output,
                self.config.output_activation,
            ));
        }

        // Nodes are still in insertion order: bias, inputs, then outputs.
        let (sources, targets) = nodes.split_at(1 + inputs);
        let mut conns = Vec::with_capacity(self.config.conn_count());
        for source in sources {
            for target in targets {
                conns.push(Conn {
                    source: source.position,
                    target: target.position,
                    weight: self.weights.next_weight(),
                    enabled: true,
                });
            }
        }

        Substrate::new(nodes, conns)
    }

    /// Produce the seed population.
    ///
    /// Degenerate settings (no inputs, no outputs, zero population size) are
    /// only rejected when [`SeedConfig::strict`] is set. Otherwise they are
    /// logged and seeded as-is; a population size of zero still yields the
    /// template genome.
    pub fn populate(&mut self) -> Result<Population, ConfigError> {
        if self.config.strict {
            self.config.validate()?;
        } else if self.config.is_degenerate() {
            warn!("Seeding degenerate population: {}", self.config);
        }

        let template = self.template();
        let size = self.config.population_size.max(1);

        let mut genomes = Vec::with_capacity(size);
        genomes.push(Genome {
            id: 1,
            species_id: SEED_SPECIES_ID,
            encoded: template.clone(),
        });

        for id in 2..=size as u64 {
            let mut encoded = template.clone();
            for conn in &mut encoded.conns {
                conn.weight = self.weights.next_weight();
            }
            genomes.push(Genome {
                id,
                species_id: SEED_SPECIES_ID,
                encoded,
            });
        }

        debug!(
            "Seeded {} genomes with {} nodes and {} connections each",
            genomes.len(),
            template.nodes.len(),
            template.conns.len()
        );

        Ok(Population {
            generation: 1,
            species: vec![Species {
                id: SEED_SPECIES_ID,
                example: template,
            }],
            genomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    /// Deterministic source yielding 0.0, 1.0, 2.0, ...
    struct Counter(f64);

    impl WeightSource for Counter {
        fn next_weight(&mut self) -> f64 {
            let w = self.0;
            self.0 += 1.0;
            w
        }
    }

    fn seeded(population_size: usize, num_inputs: usize, num_outputs: usize) -> Population {
        let config = SeedConfig {
            random_seed: Some(42),
            ..SeedConfig::new(population_size, num_inputs, num_outputs)
        };
        Seeder::new(config).populate().unwrap()
    }

    #[test]
    fn test_single_output_scenario() {
        let population = seeded(10, 3, 1);
        let substrate = &population.genomes[0].encoded;

        assert_eq!(substrate.nodes.len(), 5);
        assert_eq!(substrate.conns.len(), 4);

        let outputs: Vec<&Node> = substrate.nodes_of(NeuronType::Output).collect();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].position, Position::new(1.0, 0.5));
        assert_eq!(outputs[0].activation, ActivationType::SteepenedSigmoid);
    }

    #[test]
    fn test_node_positions() {
        let population = seeded(1, 2, 3);
        let nodes = &population.genomes[0].encoded.nodes;

        let positions: Vec<(f64, f64)> = nodes
            .iter()
            .map(|n| (n.position.layer, n.position.x))
            .collect();
        assert_eq!(
            positions,
            vec![
                (0.0, 0.0),
                (0.0, 0.5),
                (0.0, 1.0),
                (1.0, 0.0),
                (1.0, 0.5),
                (1.0, 1.0)
            ]
        );
        assert_eq!(nodes[0].neuron_type, NeuronType::Bias);
        assert_eq!(nodes[0].activation, ActivationType::Direct);
        assert_eq!(nodes[1].neuron_type, NeuronType::Input);
        assert_eq!(nodes[3].neuron_type, NeuronType::Output);
    }

    #[test]
    fn test_population_shape() {
        let population = seeded(25, 4, 2);

        assert_eq!(population.generation, 1);
        assert_eq!(population.genomes.len(), 25);
        assert_eq!(population.species.len(), 1);
        assert_eq!(population.species[0].id, 1);
        assert_eq!(population.species[0].example, population.genomes[0].encoded);

        let ids: Vec<u64> = population.genomes.iter().map(|g| g.id).collect();
        assert_eq!(ids, (1..=25).collect::<Vec<u64>>());
        assert!(population.genomes.iter().all(|g| g.species_id == 1));
    }

    #[test]
    fn test_siblings_share_topology_not_weights() {
        let population = seeded(8, 3, 2);
        let first = &population.genomes[0].encoded;

        let mut weight_sets = HashSet::new();
        for genome in &population.genomes {
            assert!(genome.encoded.same_topology(first));
            let bits: Vec<u64> = genome.encoded.weights().iter().map(|w| w.to_bits()).collect();
            weight_sets.insert(bits);
        }
        assert_eq!(weight_sets.len(), population.genomes.len());
    }

    #[test]
    fn test_weights_resampled_per_genome() {
        let config = SeedConfig::new(3, 1, 1);
        let population = Seeder::with_weights(config, Counter(0.0))
            .populate()
            .unwrap();

        assert_eq!(population.genomes[0].encoded.weights(), vec![0.0, 1.0]);
        assert_eq!(population.genomes[1].encoded.weights(), vec![2.0, 3.0]);
        assert_eq!(population.genomes[2].encoded.weights(), vec![4.0, 5.0]);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let a = seeded(5, 2, 2);
        let b = seeded(5, 2, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_borrowed_weight_source() {
        let mut counter = Counter(10.0);
        let mut seeder = Seeder::with_weights(SeedConfig::new(1, 1, 1), &mut counter);
        let template = seeder.template();
        assert_eq!(template.weights(), vec![10.0, 11.0]);
        assert_eq!(counter.0, 12.0);
    }

    #[test]
    fn test_zero_inputs_degrades_gracefully() {
        let population = seeded(4, 0, 2);
        let substrate = &population.genomes[0].encoded;

        assert_eq!(substrate.nodes.len(), 3);
        assert_eq!(substrate.conns.len(), 2);
        assert!(substrate.conns.iter().all(|c| c.source == Position::new(0.0, 0.0)));
    }

    #[test]
    fn test_zero_outputs_has_no_connections() {
        let population = seeded(4, 3, 0);
        assert_eq!(population.genomes.len(), 4);
        assert!(population.genomes.iter().all(|g| g.encoded.conns.is_empty()));
    }

    #[test]
    fn test_zero_population_yields_template() {
        let population = seeded(0, 2, 1);
        assert_eq!(population.genomes.len(), 1);
        assert_eq!(population.genomes[0].id, 1);
    }

    #[test]
    fn test_strict_rejects_degenerate() {
        let config = SeedConfig {
            strict: true,
            ..SeedConfig::new(10, 0, 1)
        };
        assert!(matches!(
            Seeder::new(config).populate(),
            Err(ConfigError::NoInputs)
        ));

        let config = SeedConfig {
            strict: true,
            ..SeedConfig::new(10, 2, 1)
        };
        assert!(Seeder::new(config).populate().is_ok());
    }

    #[test]
    fn test_custom_output_activation() {
        let config = SeedConfig {
            output_activation: ActivationType::Tanh,
            random_seed: Some(1),
            ..SeedConfig::new(2, 1, 2)
        };
        let population = Seeder::new(config).populate().unwrap();
        assert!(
            population.genomes[0]
                .encoded
                .nodes_of(NeuronType::Output)
                .all(|n| n.activation == ActivationType::Tanh)
        );
    }

    proptest! {
        #[test]
        fn prop_template_structure(
            size in 1usize..20,
            inputs in 1usize..12,
            outputs in 1usize..6,
            seed in any::<u64>(),
        ) {
            let config = SeedConfig {
                random_seed: Some(seed),
                ..SeedConfig::new(size, inputs, outputs)
            };
            let population = Seeder::new(config).populate().unwrap();

            prop_assert_eq!(population.genomes.len(), size);
            prop_assert_eq!(population.species.len(), 1);
            for genome in &population.genomes {
                let substrate = &genome.encoded;
                prop_assert_eq!(substrate.nodes.len(), 1 + inputs + outputs);
                prop_assert_eq!(substrate.conns.len(), (1 + inputs) * outputs);
                prop_assert!(substrate.conns.iter().all(|c| c.enabled));
                prop_assert!(substrate.is_sorted());
                prop_assert_eq!(genome.species_id, 1);
            }
        }
    }
}
