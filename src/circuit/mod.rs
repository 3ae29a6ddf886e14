//! Circuit graph representation and validation.
//!
//! This module provides the node graph a circuit is analysed over. Terminal
//! names resolve to shared [`Node`]s, each carrying the symbolic voltage
//! unknown of its net, and the [`Circuit`] struct holds the components
//! attached to them.

mod graph;
mod nodes;
mod types;
mod validate;

pub use graph::Circuit;
pub use nodes::{NodeGraph, Nodes, GROUND};
pub use types::*;
pub use validate::validate_circuit;
