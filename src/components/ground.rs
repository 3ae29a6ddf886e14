//! Reference node.

use super::Analyze;
use crate::analysis::Analysis;
use crate::circuit::{NodeRef, Terminal};
use crate::error::Result;
use crate::expr::Expr;

/// Pins its node to 0 V.
///
/// The return current that flows between the node and the reference is an
/// unknown, which keeps one equation per unknown.
#[derive(Debug, Clone)]
pub struct Ground {
    pub name: String,
    pub terminals: [Terminal; 1],
}

impl Ground {
    /// Create a new, unconnected ground.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terminals: [Terminal::new("node")],
        }
    }

    /// Attach the ground to a node.
    pub fn at(mut self, node: &NodeRef) -> Self {
        self.terminals[0].connect(node);
        self
    }
}

impl Analyze for Ground {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    fn analyze(&self, mna: &mut Analysis) -> Result<()> {
        let node = self.terminals[0].node(&self.name)?;
        let base = (!self.name.is_empty()).then(|| format!("i{}", self.name));
        let current = mna.add_new_unknown(base.as_deref());
        mna.add_terminal_current(node, &current)?;
        mna.add_equation(node.voltage(), Expr::ZERO);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::analysis::Equation;
    use crate::circuit::NodeGraph;

    #[test]
    fn test_ground_pins_node() {
        let mut graph = NodeGraph::new();
        graph.net("0");
        let nodes = graph.build();
        let gnd = Rc::clone(nodes.ground().unwrap());

        let mut mna = Analysis::default();
        Ground::new("").at(&gnd).analyze(&mut mna).unwrap();
        let system = mna.finish().unwrap();

        assert_eq!(system.equations[0], Equation::new(gnd.voltage(), Expr::ZERO));
        assert_eq!(system.unknowns.len(), 2);
        assert!(system.is_balanced());
    }
}
