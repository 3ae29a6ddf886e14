//! Voltage and current sources.

use log::debug;

use super::Analyze;
use crate::analysis::{Analysis, InitialCondition};
use crate::circuit::{NodeRef, Terminal};
use crate::error::Result;
use crate::expr::{Expr, Function, Symbol};

/// An ideal voltage source.
///
/// The source enforces `V(anode) - V(cathode) = voltage` regardless of the
/// current drawn. That current is an extra unknown named `i<name>`.
#[derive(Debug, Clone)]
pub struct VoltageSource {
    pub name: String,
    /// Source voltage, a function of time. `None` drives the default
    /// waveform, see [`VoltageSource::default_waveform`].
    pub voltage: Option<Expr>,
    pub terminals: [Terminal; 2], // [anode, cathode]
}

impl VoltageSource {
    /// Frequency of the default waveform in Hz.
    pub const DEFAULT_FREQUENCY: f64 = 100.0;

    /// Create a new, unconnected voltage source.
    pub fn new(name: impl Into<String>, voltage: impl Into<Expr>) -> Self {
        Self {
            name: name.into(),
            voltage: Some(voltage.into()),
            terminals: [Terminal::new("anode"), Terminal::new("cathode")],
        }
    }

    /// Create a new, unconnected source driving the default waveform.
    pub fn with_default_waveform(name: impl Into<String>) -> Self {
        Self {
            voltage: None,
            ..Self::new(name, Expr::ZERO)
        }
    }

    /// `sin(2*pi*100*t)`, the waveform of a source with no value.
    pub fn default_waveform(time: &Symbol) -> Expr {
        let omega = 2.0 * std::f64::consts::PI * Self::DEFAULT_FREQUENCY;
        Expr::call(Function::Sin, Expr::constant(omega) * Expr::from(time))
    }

    /// Connect the source between two nodes.
    pub fn between(mut self, anode: &NodeRef, cathode: &NodeRef) -> Self {
        self.terminals[0].connect(anode);
        self.terminals[1].connect(cathode);
        self
    }

    /// Stamp an ideal voltage source and return its current unknown.
    ///
    /// Only a time-independent voltage that reduces to a literal at `t = 0`
    /// seeds the terminal voltage difference. A time-varying waveform leaves
    /// its starting value to the solver, as does any value that stays
    /// symbolic.
    pub fn stamp(
        mna: &mut Analysis,
        name: &str,
        anode: &NodeRef,
        cathode: &NodeRef,
        voltage: &Expr,
    ) -> Result<Symbol> {
        let base = (!name.is_empty()).then(|| format!("i{}", name));
        let current = mna.add_new_unknown(base.as_deref());
        mna.add_passive_component(name, anode, cathode, &current)?;

        let across = anode.voltage() - cathode.voltage();
        mna.add_equation(across.clone(), voltage.clone());

        if voltage.depends_on(mna.time()) {
            debug!("{}: voltage varies with {}, no initial condition", name, mna.time());
            return Ok(current);
        }
        let v0 = voltage.evaluate(mna.time(), 0.0);
        match v0.as_constant() {
            Some(value) => mna.add_initial_conditions([InitialCondition::new(across, value)]),
            None => debug!("{}: voltage at t=0 is not a literal ({}), no initial condition", name, v0),
        }
        Ok(current)
    }
}

impl Analyze for VoltageSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    fn analyze(&self, mna: &mut Analysis) -> Result<()> {
        let anode = self.terminals[0].node(&self.name)?;
        let cathode = self.terminals[1].node(&self.name)?;
        let voltage = match &self.voltage {
            Some(v) => v.clone(),
            None => Self::default_waveform(mna.time()),
        };
        Self::stamp(mna, &self.name, anode, cathode, &voltage)?;
        Ok(())
    }
}

/// An ideal current source.
///
/// The current flows from the anode through the source to the cathode, so
/// it enters the circuit at the cathode. No unknown is needed.
#[derive(Debug, Clone)]
pub struct CurrentSource {
    pub name: String,
    pub current: Expr,
    pub terminals: [Terminal; 2], // [anode, cathode]
}

impl CurrentSource {
    /// Create a new, unconnected current source.
    pub fn new(name: impl Into<String>, current: impl Into<Expr>) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            terminals: [Terminal::new("anode"), Terminal::new("cathode")],
        }
    }

    /// Connect the source between two nodes.
    pub fn between(mut self, anode: &NodeRef, cathode: &NodeRef) -> Self {
        self.terminals[0].connect(anode);
        self.terminals[1].connect(cathode);
        self
    }
}

impl Analyze for CurrentSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    fn analyze(&self, mna: &mut Analysis) -> Result<()> {
        let anode = self.terminals[0].node(&self.name)?;
        let cathode = self.terminals[1].node(&self.name)?;
        mna.add_passive_component(&self.name, anode, cathode, self.current.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::rc::Rc;

    use super::*;
    use crate::analysis::{AnalysisConfig, Equation, NetworkSystem};
    use crate::circuit::NodeGraph;

    fn nodes() -> (NodeRef, NodeRef) {
        let mut graph = NodeGraph::new();
        graph.net("A");
        graph.net("GND");
        let nodes = graph.build();
        (
            Rc::clone(nodes.resolve("A").unwrap()),
            Rc::clone(nodes.resolve("GND").unwrap()),
        )
    }

    fn sine(t: &Symbol) -> Expr {
        let w = 2.0 * std::f64::consts::PI * 100.0;
        Expr::call(Function::Sin, Expr::constant(w) * Expr::from(t))
    }

    #[test]
    fn test_constant_source() {
        let (a, gnd) = nodes();
        let mut mna = Analysis::default();
        VoltageSource::new("V1", 5.0).between(&a, &gnd).analyze(&mut mna).unwrap();
        let system = mna.finish().unwrap();

        let across = a.voltage() - gnd.voltage();
        assert!(system.equations.contains(&Equation::new(across.clone(), 5.0)));
        assert_eq!(system.initial_conditions.len(), 1);
        assert_eq!(system.initial_conditions[0].quantity, across);
        assert_eq!(system.initial_conditions[0].value, 5.0);
    }

    #[test]
    fn test_end_to_end_single_source() {
        let (a, gnd) = nodes();
        let mut mna = Analysis::default();
        VoltageSource::new("V1", 5.0).between(&a, &gnd).analyze(&mut mna).unwrap();
        let system = mna.finish().unwrap();

        let names: Vec<&str> = system.unknowns.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["V[A]", "V[0]", "iV1"]);
        assert_eq!(system.equations.len(), 3);
        assert!(system.is_balanced());

        let i = system.find_unknown("iV1").unwrap();
        assert_eq!(system.equations[1], Equation::new(-Expr::from(i), Expr::ZERO));
        assert_eq!(system.equations[2], Equation::new(i, Expr::ZERO));
    }

    #[test]
    fn test_sine_source_has_no_initial_condition() {
        let (a, gnd) = nodes();
        let mut mna = Analysis::default();
        let v = sine(mna.time());
        VoltageSource::new("V1", v).between(&a, &gnd).analyze(&mut mna).unwrap();
        let system = mna.finish().unwrap();
        assert!(system.initial_conditions.is_empty());
    }

    #[test]
    fn test_symbolic_value_at_zero_is_omitted() {
        let (a, gnd) = nodes();
        let mut mna = Analysis::default();
        let k = Symbol::new("k");
        let v = sine(mna.time()) + Expr::from(&k) * Expr::from(mna.time());
        VoltageSource::new("V1", v.clone()).between(&a, &gnd).analyze(&mut mna).unwrap();
        let system = mna.finish().unwrap();

        assert!(system.initial_conditions.is_empty());
        let across = a.voltage() - gnd.voltage();
        assert!(system.equations.contains(&Equation::new(across, v)));
    }

    #[test]
    fn test_time_independent_symbol_is_omitted() {
        let (a, gnd) = nodes();
        let mut mna = Analysis::default();
        let v = Expr::from(Symbol::new("k")) + Expr::constant(1.0);
        VoltageSource::new("V1", v).between(&a, &gnd).analyze(&mut mna).unwrap();
        assert!(mna.finish().unwrap().initial_conditions.is_empty());
    }

    #[test]
    fn test_default_waveform() {
        let (a, gnd) = nodes();
        let mut mna = Analysis::default();
        let expected = VoltageSource::default_waveform(mna.time());
        VoltageSource::with_default_waveform("V1")
            .between(&a, &gnd)
            .analyze(&mut mna)
            .unwrap();
        let system = mna.finish().unwrap();

        let across = a.voltage() - gnd.voltage();
        assert!(system.equations.contains(&Equation::new(across, expected)));
        assert!(system.initial_conditions.is_empty());
    }

    #[test]
    fn test_unknown_names_stay_unique_with_lazy_nodes() {
        let (a, gnd) = nodes();
        // One unknown too many, so only the names are checked.
        let mut mna = Analysis::new(AnalysisConfig::new().with_strict(false));
        mna.add_new_unknown(Some("V[A]"));
        VoltageSource::stamp(&mut mna, "V1", &a, &gnd, &Expr::constant(1.0)).unwrap();
        let system = mna.finish().unwrap();

        let names: HashSet<&str> = system.unknowns.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), system.unknowns.len());
        assert!(Symbol::same(system.find_unknown("V[A]").unwrap(), &a.v));
    }

    #[test]
    fn test_anonymous_source_current() {
        let (a, gnd) = nodes();
        let mut mna = Analysis::default();
        let i = VoltageSource::stamp(&mut mna, "", &a, &gnd, &Expr::constant(1.0)).unwrap();
        assert!(i.name().starts_with(crate::analysis::DEFAULT_ANONYMOUS_PREFIX));
    }

    #[test]
    fn test_parallel_sources_accumulate() {
        let (a, gnd) = nodes();

        let forward = {
            let mut mna = Analysis::default();
            VoltageSource::new("V1", 5.0).between(&a, &gnd).analyze(&mut mna).unwrap();
            VoltageSource::new("V2", 5.0).between(&a, &gnd).analyze(&mut mna).unwrap();
            mna.finish().unwrap()
        };
        let reverse = {
            let mut mna = Analysis::default();
            mna.add_node(&a).unwrap();
            mna.add_node(&gnd).unwrap();
            VoltageSource::new("V2", 5.0).between(&a, &gnd).analyze(&mut mna).unwrap();
            VoltageSource::new("V1", 5.0).between(&a, &gnd).analyze(&mut mna).unwrap();
            mna.finish().unwrap()
        };

        let kcl_a = |s: &NetworkSystem| match &s.equations[s.equations.len() - 2].lhs {
            Expr::Sum(terms) => {
                let mut names: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
                names.sort();
                names
            }
            other => panic!("expected a sum, got {}", other),
        };
        assert_eq!(kcl_a(&forward), vec!["-iV1", "-iV2"]);
        assert_eq!(kcl_a(&forward), kcl_a(&reverse));
    }

    #[test]
    fn test_current_source_direction() {
        let (a, gnd) = nodes();
        let mut mna = Analysis::default();
        CurrentSource::new("I1", 1e-3).between(&gnd, &a).analyze(&mut mna).unwrap();
        let system = mna.finish().unwrap();
        // Nodes were registered by the stamp: ground first, then A.
        assert_eq!(system.equations[0], Equation::new(Expr::constant(-1e-3), Expr::ZERO));
        assert_eq!(system.equations[1], Equation::new(Expr::constant(1e-3), Expr::ZERO));
    }

    #[test]
    fn test_unconnected_source_fails() {
        let mut mna = Analysis::default();
        let err = VoltageSource::new("V9", 1.0).analyze(&mut mna).unwrap_err();
        assert!(err.to_string().contains("V9"));
    }
}
