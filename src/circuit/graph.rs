//! Circuit graph structure.

use std::rc::Rc;

use super::nodes::{NodeGraph, Nodes};
use super::types::NodeRef;
use crate::components::{Analyze, Component, Ground};
use crate::dsl::CircuitAst;
use crate::error::{CircuitError, Result};

/// A complete circuit ready for analysis.
#[derive(Debug, Default)]
pub struct Circuit {
    /// All components in the circuit
    pub components: Vec<Component>,

    /// Resolved nets
    pub nodes: Nodes,
}

impl Circuit {
    /// Create a circuit over already-resolved nets.
    pub fn new(nodes: Nodes) -> Self {
        Self {
            components: Vec::new(),
            nodes,
        }
    }

    /// Add a component.
    pub fn push(&mut self, component: impl Into<Component>) {
        self.components.push(component.into());
    }

    /// Build a circuit from a parsed AST.
    ///
    /// When any terminal touches the reference net, an implicit [`Ground`]
    /// element is attached to it.
    pub fn from_ast(ast: CircuitAst) -> Result<Self> {
        let mut graph = NodeGraph::new();
        for alias in &ast.ground_aliases {
            graph.add_ground_alias(alias.clone());
        }
        for comp in &ast.components {
            for node_name in &comp.nodes {
                graph.net(node_name);
            }
        }
        for (a, b) in &ast.wires {
            graph.wire(a, b);
        }
        let nodes = graph.build();

        let mut circuit = Circuit::new(nodes);
        for comp_def in &ast.components {
            let terminals: Vec<NodeRef> = comp_def
                .nodes
                .iter()
                .map(|name| {
                    circuit
                        .nodes
                        .resolve(name)
                        .map(Rc::clone)
                        .ok_or_else(|| CircuitError::unresolved_terminal(&comp_def.name, name.as_str()))
                })
                .collect::<Result<Vec<_>>>()?;

            let component = Component::from_def(comp_def, &terminals)?;
            circuit.components.push(component);
        }

        if let Some(ground) = circuit.nodes.ground() {
            let ground = Ground::new("").at(ground);
            circuit.components.push(Component::Ground(ground));
        }

        Ok(circuit)
    }

    /// Find a node by name.
    pub fn find_node(&self, name: &str) -> Option<&NodeRef> {
        self.nodes.resolve(name)
    }

    /// Find a component by name.
    pub fn find_component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name() == name)
    }
}
