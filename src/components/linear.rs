//! Linear passive components: Resistor, Capacitor, Inductor.

use super::Analyze;
use crate::analysis::{Analysis, InitialCondition};
use crate::circuit::{NodeRef, Terminal};
use crate::error::Result;
use crate::expr::Expr;

fn current_name(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| format!("i{}", name))
}

/// A resistor.
///
/// Its branch current `(V(a) - V(b)) / R` is stamped directly, so a resistor
/// adds neither unknowns nor equations of its own.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub name: String,
    pub resistance: Expr,
    pub terminals: [Terminal; 2],
}

impl Resistor {
    /// Create a new, unconnected resistor.
    pub fn new(name: impl Into<String>, resistance: impl Into<Expr>) -> Self {
        Self {
            name: name.into(),
            resistance: resistance.into(),
            terminals: [Terminal::new("anode"), Terminal::new("cathode")],
        }
    }

    /// Connect the resistor between two nodes.
    pub fn between(mut self, anode: &NodeRef, cathode: &NodeRef) -> Self {
        self.terminals[0].connect(anode);
        self.terminals[1].connect(cathode);
        self
    }
}

impl Analyze for Resistor {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    fn analyze(&self, mna: &mut Analysis) -> Result<()> {
        let anode = self.terminals[0].node(&self.name)?;
        let cathode = self.terminals[1].node(&self.name)?;
        let current = (anode.voltage() - cathode.voltage()) / self.resistance.clone();
        mna.add_passive_component(&self.name, anode, cathode, current)
    }
}

/// A capacitor.
///
/// Adds the unknown current `i = C * dV/dt` and seeds the voltage across it.
#[derive(Debug, Clone)]
pub struct Capacitor {
    pub name: String,
    pub capacitance: Expr,
    /// Voltage across the capacitor at `t = 0`
    pub initial_voltage: f64,
    pub terminals: [Terminal; 2],
}

impl Capacitor {
    /// Create a new, unconnected capacitor starting discharged.
    pub fn new(name: impl Into<String>, capacitance: impl Into<Expr>) -> Self {
        Self {
            name: name.into(),
            capacitance: capacitance.into(),
            initial_voltage: 0.0,
            terminals: [Terminal::new("anode"), Terminal::new("cathode")],
        }
    }

    /// Set the voltage across the capacitor at `t = 0`.
    pub fn with_initial_voltage(mut self, volts: f64) -> Self {
        self.initial_voltage = volts;
        self
    }

    /// Connect the capacitor between two nodes.
    pub fn between(mut self, anode: &NodeRef, cathode: &NodeRef) -> Self {
        self.terminals[0].connect(anode);
        self.terminals[1].connect(cathode);
        self
    }
}

impl Analyze for Capacitor {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    fn analyze(&self, mna: &mut Analysis) -> Result<()> {
        let anode = self.terminals[0].node(&self.name)?;
        let cathode = self.terminals[1].node(&self.name)?;
        let across = anode.voltage() - cathode.voltage();
        let dv = Expr::derivative(across.clone(), mna.time());
        let name = current_name(&self.name);
        let current = mna.add_unknown_equal_to(name.as_deref(), self.capacitance.clone() * dv);
        mna.add_passive_component(&self.name, anode, cathode, &current)?;
        mna.add_initial_conditions([InitialCondition::new(across, self.initial_voltage)]);
        Ok(())
    }
}

/// An inductor.
///
/// Adds the unknown current `i` with `V = L * di/dt` and seeds that current.
#[derive(Debug, Clone)]
pub struct Inductor {
    pub name: String,
    pub inductance: Expr,
    /// Current through the inductor at `t = 0`
    pub initial_current: f64,
    pub terminals: [Terminal; 2],
}

impl Inductor {
    /// Create a new, unconnected inductor starting with no current.
    pub fn new(name: impl Into<String>, inductance: impl Into<Expr>) -> Self {
        Self {
            name: name.into(),
            inductance: inductance.into(),
            initial_current: 0.0,
            terminals: [Terminal::new("anode"), Terminal::new("cathode")],
        }
    }

    /// Set the current through the inductor at `t = 0`.
    pub fn with_initial_current(mut self, amps: f64) -> Self {
        self.initial_current = amps;
        self
    }

    /// Connect the inductor between two nodes.
    pub fn between(mut self, anode: &NodeRef, cathode: &NodeRef) -> Self {
        self.terminals[0].connect(anode);
        self.terminals[1].connect(cathode);
        self
    }
}

impl Analyze for Inductor {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    fn analyze(&self, mna: &mut Analysis) -> Result<()> {
        let anode = self.terminals[0].node(&self.name)?;
        let cathode = self.terminals[1].node(&self.name)?;
        let name = current_name(&self.name);
        let current = mna.add_new_unknown(name.as_deref());
        mna.add_passive_component(&self.name, anode, cathode, &current)?;
        let di = Expr::derivative(Expr::from(&current), mna.time());
        mna.add_equation(anode.voltage() - cathode.voltage(), self.inductance.clone() * di);
        mna.add_initial_conditions([InitialCondition::new(&current, self.initial_current)]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::rc::Rc;

    use approx::assert_relative_eq;

    use super::*;
    use crate::analysis::Equation;
    use crate::circuit::NodeGraph;

    fn nodes() -> (NodeRef, NodeRef) {
        let mut graph = NodeGraph::new();
        graph.net("A");
        graph.net("B");
        let nodes = graph.build();
        (
            Rc::clone(nodes.resolve("A").unwrap()),
            Rc::clone(nodes.resolve("B").unwrap()),
        )
    }

    #[test]
    fn test_resistor_current() {
        let (a, b) = nodes();
        let mut mna = Analysis::default();
        Resistor::new("R1", 1000.0).between(&a, &b).analyze(&mut mna).unwrap();
        let system = mna.finish().unwrap();
        assert_eq!(system.unknowns.len(), 2);

        let mut bindings = HashMap::new();
        bindings.insert(a.v.clone(), 3.0);
        bindings.insert(b.v.clone(), 1.0);
        // 2 mA leaves A and enters B.
        let residuals = system.residuals(&bindings).unwrap();
        assert_relative_eq!(residuals[0], -2e-3, epsilon = 1e-15);
        assert_relative_eq!(residuals[1], 2e-3, epsilon = 1e-15);
    }

    #[test]
    fn test_capacitor_equation() {
        let (a, b) = nodes();
        let mut mna = Analysis::default();
        Capacitor::new("C1", 1e-6)
            .with_initial_voltage(2.0)
            .between(&a, &b)
            .analyze(&mut mna)
            .unwrap();
        let t = mna.time().clone();
        let system = mna.finish().unwrap();

        let i = system.find_unknown("iC1").unwrap();
        let across = a.voltage() - b.voltage();
        let law = Expr::constant(1e-6) * Expr::derivative(across.clone(), &t);
        assert_eq!(system.equations[0], Equation::new(i, law));
        assert_eq!(system.initial_conditions[0].quantity, across);
        assert_eq!(system.initial_conditions[0].value, 2.0);
        assert!(system.is_balanced());
    }

    #[test]
    fn test_inductor_equation() {
        let (a, b) = nodes();
        let mut mna = Analysis::default();
        Inductor::new("L1", 1e-3).between(&a, &b).analyze(&mut mna).unwrap();
        let t = mna.time().clone();
        let system = mna.finish().unwrap();

        let i = system.find_unknown("iL1").unwrap();
        let law = Expr::constant(1e-3) * Expr::derivative(Expr::from(i), &t);
        assert_eq!(system.equations[0], Equation::new(a.voltage() - b.voltage(), law));
        assert_eq!(system.initial_conditions[0].quantity, Expr::from(i));
        assert!(system.is_balanced());
    }
}
