//! Structural encoding of a genome's network.
//!
//! Nodes are identified by their [`Position`] in topology space, and
//! connections reference nodes by position rather than by index. Both
//! sequences are kept in canonical order (layer, then x) so that iteration
//! and serialization are reproducible.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Location of a node in topology space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Depth in the network (0.0 = inputs, 1.0 = outputs).
    pub layer: f64,
    /// Horizontal placement within the layer.
    pub x: f64,
}

impl Position {
    pub fn new(layer: f64, x: f64) -> Self {
        Self { layer, x }
    }

    /// Canonical comparator: layer ascending, then x ascending.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.layer
            .total_cmp(&other.layer)
            .then_with(|| self.x.total_cmp(&other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.canonical_cmp(other))
    }
}

/// Role of a node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeuronType {
    Bias,
    Input,
    Output,
    Hidden,
}

/// Activation function applied by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivationType {
    /// Identity, used by bias and input nodes.
    #[default]
    Direct,
    Sigmoid,
    /// Sigmoid with slope 4.9, the classic NEAT output activation.
    SteepenedSigmoid,
    Tanh,
    Relu,
    Gaussian,
}

/// A single neuron.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub position: Position,
    pub neuron_type: NeuronType,
    pub activation: ActivationType,
}

impl Node {
    pub fn new(position: Position, neuron_type: NeuronType, activation: ActivationType) -> Self {
        Self {
            position,
            neuron_type,
            activation,
        }
    }

    /// Nodes are ordered by position only.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.position.canonical_cmp(&other.position)
    }
}

/// A weighted connection between two node positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conn {
    pub source: Position,
    pub target: Position,
    pub weight: f64,
    pub enabled: bool,
}

impl Conn {
    /// Ordered by source, then target.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.source
            .canonical_cmp(&other.source)
            .then_with(|| self.target.canonical_cmp(&other.target))
    }

    /// True if both connections join the same endpoints with the same enabled flag.
    pub fn same_structure(&self, other: &Self) -> bool {
        self.canonical_cmp(other) == Ordering::Equal && self.enabled == other.enabled
    }
}

/// Nodes and connections of one genome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Substrate {
    pub nodes: Vec<Node>,
    pub conns: Vec<Conn>,
}

impl Substrate {
    /// Build a substrate, sorting both sequences into canonical order.
    pub fn new(nodes: Vec<Node>, conns: Vec<Conn>) -> Self {
        let mut substrate = Self { nodes, conns };
        substrate.sort();
        substrate
    }

    /// Restore canonical order. Call after any structural edit.
    pub fn sort(&mut self) {
        self.nodes.sort_by(Node::canonical_cmp);
        self.conns.sort_by(Conn::canonical_cmp);
    }

    /// Check that nodes and connections are in canonical order.
    pub fn is_sorted(&self) -> bool {
        self.nodes
            .windows(2)
            .all(|w| w[0].canonical_cmp(&w[1]) != Ordering::Greater)
            && self
                .conns
                .windows(2)
                .all(|w| w[0].canonical_cmp(&w[1]) != Ordering::Greater)
    }

    /// Compare structure while ignoring connection weights.
    pub fn same_topology(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.conns.len() == other.conns.len()
            && self
                .conns
                .iter()
                .zip(&other.conns)
                .all(|(a, b)| a.same_structure(b))
    }

    /// Connection weights in canonical order.
    pub fn weights(&self) -> Vec<f64> {
        self.conns.iter().map(|c| c.weight).collect()
    }

    /// Iterate nodes of one neuron type.
    pub fn nodes_of(&self, neuron_type: NeuronType) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(move |n| n.neuron_type == neuron_type)
    }
}
