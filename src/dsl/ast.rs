//! Abstract Syntax Tree types for the netlist DSL.

use std::collections::HashMap;

use crate::expr::Expr;

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default)]
pub struct CircuitAst {
    /// All component instances
    pub components: Vec<ComponentDef>,
    /// Pairs of node names joined by `.wire`
    pub wires: Vec<(String, String)>,
    /// Extra names for the reference node from `.ground`
    pub ground_aliases: Vec<String>,
}

impl CircuitAst {
    /// Create a new empty circuit AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A component definition from the DSL.
#[derive(Debug, Clone)]
pub struct ComponentDef {
    /// Component type (R, C, L, V, I)
    pub component_type: ComponentType,
    /// Unique component name
    pub name: String,
    /// Connected node names
    pub nodes: Vec<String>,
    /// Component value (resistance, capacitance, source waveform, ...)
    pub value: Option<Expr>,
    /// Additional parameters
    pub params: HashMap<String, f64>,
    /// Source line number for error reporting
    pub line: usize,
}

/// Component types supported by the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// Resistor
    Resistor,
    /// Capacitor
    Capacitor,
    /// Inductor
    Inductor,
    /// Voltage Source
    VoltageSource,
    /// Current Source
    CurrentSource,
}

impl ComponentType {
    /// Parse a component type from its DSL prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'C' => Some(Self::Capacitor),
            'L' => Some(Self::Inductor),
            'V' => Some(Self::VoltageSource),
            'I' => Some(Self::CurrentSource),
            _ => None,
        }
    }

    /// Get the expected number of nodes for this component type.
    pub fn expected_node_count(&self) -> usize {
        match self {
            Self::Resistor | Self::Capacitor | Self::Inductor => 2,
            Self::VoltageSource | Self::CurrentSource => 2,
        }
    }
}
