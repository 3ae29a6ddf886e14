//! Component models for circuit analysis.
//!
//! This module provides the supported circuit elements:
//! - Linear: Resistor, Capacitor, Inductor
//! - Sources: Voltage Source, Current Source
//! - Reference: Ground
//!
//! Each component describes itself to an [`Analysis`] through the
//! [`Analyze`] trait.

mod ground;
mod linear;
mod sources;

pub use ground::Ground;
pub use linear::{Capacitor, Inductor, Resistor};
pub use sources::{CurrentSource, VoltageSource};

use crate::analysis::Analysis;
use crate::circuit::{NodeRef, Terminal};
use crate::dsl::{ComponentDef, ComponentType};
use crate::error::{CircuitError, Result};
use crate::expr::Expr;

/// Anything that contributes unknowns, equations and initial conditions to
/// an analysis.
pub trait Analyze {
    /// Component name, possibly empty.
    fn name(&self) -> &str;

    /// The component's pins.
    fn terminals(&self) -> &[Terminal];

    /// Register this component's unknowns, equations and initial conditions.
    fn analyze(&self, mna: &mut Analysis) -> Result<()>;
}

/// A circuit component.
#[derive(Debug, Clone)]
pub enum Component {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    VoltageSource(VoltageSource),
    CurrentSource(CurrentSource),
    Ground(Ground),
}

impl Component {
    /// Create a component from a netlist definition.
    pub fn from_def(def: &ComponentDef, nodes: &[NodeRef]) -> Result<Self> {
        let expected = def.component_type.expected_node_count();
        if nodes.len() != expected {
            return Err(CircuitError::invalid_component(
                &def.name,
                def.line,
                format!("expected {} nodes, got {}", expected, nodes.len()),
            ));
        }
        let (anode, cathode) = (&nodes[0], &nodes[1]);
        let ic = def.params.get("ic").copied().unwrap_or(0.0);

        match def.component_type {
            ComponentType::Resistor => {
                let value = required_value(def, "resistor")?;
                if value.as_constant() == Some(0.0) {
                    return Err(CircuitError::invalid_component(
                        &def.name,
                        def.line,
                        "resistance must be non-zero",
                    ));
                }
                Ok(Component::Resistor(Resistor::new(&def.name, value).between(anode, cathode)))
            }

            ComponentType::Capacitor => {
                let value = required_value(def, "capacitor")?;
                Ok(Component::Capacitor(
                    Capacitor::new(&def.name, value)
                        .with_initial_voltage(ic)
                        .between(anode, cathode),
                ))
            }

            ComponentType::Inductor => {
                let value = required_value(def, "inductor")?;
                Ok(Component::Inductor(
                    Inductor::new(&def.name, value)
                        .with_initial_current(ic)
                        .between(anode, cathode),
                ))
            }

            ComponentType::VoltageSource => {
                let source = match &def.value {
                    Some(value) => VoltageSource::new(&def.name, value.clone()),
                    None => VoltageSource::with_default_waveform(&def.name),
                };
                Ok(Component::VoltageSource(source.between(anode, cathode)))
            }

            ComponentType::CurrentSource => {
                let value = def.value.clone().unwrap_or(Expr::ZERO);
                Ok(Component::CurrentSource(
                    CurrentSource::new(&def.name, value).between(anode, cathode),
                ))
            }
        }
    }
}

fn required_value(def: &ComponentDef, kind: &str) -> Result<Expr> {
    def.value.clone().ok_or_else(|| {
        CircuitError::invalid_component(&def.name, def.line, format!("{} requires a value", kind))
    })
}

impl Analyze for Component {
    fn name(&self) -> &str {
        match self {
            Component::Resistor(r) => r.name(),
            Component::Capacitor(c) => c.name(),
            Component::Inductor(l) => l.name(),
            Component::VoltageSource(v) => v.name(),
            Component::CurrentSource(i) => i.name(),
            Component::Ground(g) => g.name(),
        }
    }

    fn terminals(&self) -> &[Terminal] {
        match self {
            Component::Resistor(r) => r.terminals(),
            Component::Capacitor(c) => c.terminals(),
            Component::Inductor(l) => l.terminals(),
            Component::VoltageSource(v) => v.terminals(),
            Component::CurrentSource(i) => i.terminals(),
            Component::Ground(g) => g.terminals(),
        }
    }

    fn analyze(&self, mna: &mut Analysis) -> Result<()> {
        match self {
            Component::Resistor(r) => r.analyze(mna),
            Component::Capacitor(c) => c.analyze(mna),
            Component::Inductor(l) => l.analyze(mna),
            Component::VoltageSource(v) => v.analyze(mna),
            Component::CurrentSource(i) => i.analyze(mna),
            Component::Ground(g) => g.analyze(mna),
        }
    }
}

macro_rules! impl_from_component {
    ($($kind:ident),*) => {
        $(
            impl From<$kind> for Component {
                fn from(c: $kind) -> Self {
                    Component::$kind(c)
                }
            }
        )*
    };
}

impl_from_component!(Resistor, Capacitor, Inductor, VoltageSource, CurrentSource, Ground);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;

    fn build(netlist: &str) -> Result<Vec<Component>> {
        let circuit = crate::circuit::Circuit::from_ast(dsl::parse(netlist)?)?;
        Ok(circuit.components)
    }

    #[test]
    fn test_from_def_kinds() {
        let components = build("R1 A B 1k\nC1 B 0 1u ic=3\nL1 B 0 1m\nV1 A 0 5\nI1 0 B 1m").unwrap();
        assert!(matches!(components[0], Component::Resistor(_)));
        match &components[1] {
            Component::Capacitor(c) => assert_eq!(c.initial_voltage, 3.0),
            other => panic!("expected capacitor, got {:?}", other),
        }
        assert!(matches!(components[2], Component::Inductor(_)));
        assert!(matches!(components[3], Component::VoltageSource(_)));
        assert!(matches!(components[4], Component::CurrentSource(_)));
        assert!(matches!(components[5], Component::Ground(_)));
    }

    #[test]
    fn test_resistor_requires_value() {
        assert!(matches!(
            build("R1 A B"),
            Err(CircuitError::InvalidComponent { ref name, .. }) if name == "R1"
        ));
    }

    #[test]
    fn test_zero_resistance_rejected() {
        assert!(matches!(
            build("R1 A B 0"),
            Err(CircuitError::InvalidComponent { .. })
        ));
    }

    #[test]
    fn test_source_defaults() {
        let components = build("V1 A 0\nI1 A 0").unwrap();
        match &components[0] {
            Component::VoltageSource(v) => assert!(v.voltage.is_none()),
            other => panic!("expected voltage source, got {:?}", other),
        }
        match &components[1] {
            Component::CurrentSource(i) => assert_eq!(i.current, Expr::ZERO),
            other => panic!("expected current source, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_names() {
        let components = build("V1 A 0 1").unwrap();
        let names: Vec<&str> = components.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["V1", ""]);
    }
}
