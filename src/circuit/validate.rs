//! Circuit validation.

use std::collections::HashSet;

use log::warn;

use crate::components::Analyze;
use crate::error::{CircuitError, Result};

use super::Circuit;

/// Validate a circuit for analysis.
///
/// Checks:
/// - The circuit has at least one component
/// - Named components are unique
/// - Every terminal is connected to a node
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    if circuit.components.is_empty() {
        return Err(CircuitError::InvalidTopology {
            message: "Circuit has no components".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for component in &circuit.components {
        let name = component.name();
        if !name.is_empty() && !seen.insert(name) {
            return Err(CircuitError::DuplicateComponent {
                name: name.to_string(),
            });
        }
        for terminal in component.terminals() {
            terminal.node(name)?;
        }
    }

    if circuit.nodes.ground().is_none() {
        warn!("circuit has no reference node; node voltages are only defined up to a constant");
    }

    Ok(())
}
