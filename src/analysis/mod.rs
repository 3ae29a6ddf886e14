//! Modified Nodal Analysis equation assembly.
//!
//! Components describe themselves to an [`Analysis`] context through four
//! calls:
//!
//! - [`Analysis::add_new_unknown`] introduces a branch current or auxiliary
//!   quantity the solver must determine
//! - [`Analysis::add_passive_component`] records a branch current between two
//!   nodes in their current balances
//! - [`Analysis::add_equation`] asserts a device law
//! - [`Analysis::add_initial_conditions`] seeds values at `t = 0`
//!
//! [`Analysis::finish`] then turns every node's balance into a KCL equation:
//!
//! ```text
//! sum(currents into node) = 0
//! ```
//!
//! and checks that there is exactly one equation per unknown (node voltages
//! plus allocated unknowns).

mod assembler;
mod config;
mod system;
mod unknowns;

pub use assembler::Analysis;
pub use config::{AnalysisConfig, DEFAULT_ANONYMOUS_PREFIX, DEFAULT_TIME_VARIABLE};
pub use system::{Equation, InitialCondition, NetworkSystem};
pub use unknowns::UnknownAllocator;

use log::debug;

use crate::circuit::Circuit;
use crate::components::Analyze;
use crate::error::Result;

/// Run one full analysis pass over a circuit.
///
/// Every node is registered up front so the unknown vector follows node
/// order, then each component contributes in circuit order.
pub fn analyze_circuit(circuit: &Circuit, config: AnalysisConfig) -> Result<NetworkSystem> {
    let mut mna = Analysis::new(config);
    for node in circuit.nodes.iter() {
        mna.add_node(node)?;
    }
    for component in &circuit.components {
        debug!("analyzing {}", component.name());
        component.analyze(&mut mna)?;
    }
    mna.finish()
}
