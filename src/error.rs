//! Error types for symbolic circuit analysis.
//!
//! This module provides a unified error type [`CircuitError`] that covers
//! all error conditions that can occur during netlist parsing, circuit
//! construction, and equation assembly.

use thiserror::Error;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Unified error type for all symcircuit operations.
#[derive(Error, Debug)]
pub enum CircuitError {
    // ============ Netlist Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component type
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    // ============ Circuit Errors ============
    /// A component terminal was never connected to a node
    #[error("Terminal '{terminal}' of component '{component}' is not connected to any node")]
    UnresolvedTerminal { component: String, terminal: String },

    /// Duplicate component name
    #[error("Duplicate component name '{name}'")]
    DuplicateComponent { name: String },

    /// Invalid circuit topology
    #[error("Invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    // ============ Analysis Errors ============
    /// A node handed to an analysis does not belong to the node graph the
    /// analysis was started with
    #[error("Node '{node}' belongs to a different node graph")]
    ForeignNode { node: String },

    /// Equation count does not match unknown count after finalization
    #[error("Ill-posed system: {equations} equations for {unknowns} unknowns")]
    IllPosed { equations: usize, unknowns: usize },

    /// An expression could not be reduced to a number
    #[error("Expression '{expression}' does not evaluate to a number")]
    NotNumeric { expression: String },

    // ============ I/O Errors ============
    /// Error reading netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CircuitError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an unresolved terminal error
    pub fn unresolved_terminal(component: impl Into<String>, terminal: impl Into<String>) -> Self {
        Self::UnresolvedTerminal {
            component: component.into(),
            terminal: terminal.into(),
        }
    }
}
