//! # Symcircuit
//!
//! Symbolic Modified Nodal Analysis (MNA) equation assembly.
//!
//! This library turns a netlist into the symbolic system a differential
//! algebraic solver consumes:
//! - A small DSL for describing circuit topologies with symbolic values
//! - A node graph with one voltage unknown per electrical node
//! - An assembler that collects unknowns, device equations, initial
//!   conditions and finally one KCL equation per node
//!
//! ## Architecture
//!
//! - [`dsl`] - Parser for the netlist language
//! - [`circuit`] - Node graph, terminals and validation
//! - [`components`] - Elements and the [`components::Analyze`] contract
//! - [`analysis`] - Unknown allocation and equation assembly
//! - [`expr`] - Symbolic expressions the equations are built from
//!
//! ## Usage
//!
//! ```text
//! symcircuit divider.cir -v
//! ```
//!
//! ```no_run
//! use symcircuit::{analyze_circuit, dsl, AnalysisConfig, Circuit};
//!
//! # fn main() -> symcircuit::Result<()> {
//! let ast = dsl::parse("V1 A 0 5\nR1 A 0 1k")?;
//! let circuit = Circuit::from_ast(ast)?;
//! let system = analyze_circuit(&circuit, AnalysisConfig::default())?;
//! println!("{}", system);
//! # Ok(())
//! # }
//! ```
//!
//! ## Formulation
//!
//! Every node contributes its voltage `V[name]` as an unknown. Elements that
//! cannot express their current from node voltages (voltage sources,
//! inductors, capacitors, ground) allocate a current unknown and add exactly
//! one device equation for it. When all components have been analyzed, each
//! node's current balance becomes `sum(i) = 0`, so the system stays square.

pub mod analysis;
pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod expr;

// Re-export main types for convenience
pub use analysis::{analyze_circuit, Analysis, AnalysisConfig, NetworkSystem};
pub use circuit::Circuit;
pub use error::{CircuitError, Result};
