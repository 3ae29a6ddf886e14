//! MNA equation assembly.

use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info, warn};

use super::config::AnalysisConfig;
use super::system::{Equation, InitialCondition, NetworkSystem};
use super::unknowns::UnknownAllocator;
use crate::circuit::{NodeId, NodeRef};
use crate::error::{CircuitError, Result};
use crate::expr::{Expr, Symbol};

/// Current balance accumulated at one node.
#[derive(Debug)]
struct NodeBalance {
    node: NodeRef,
    /// Currents flowing into the node
    currents: Vec<Expr>,
}

/// Mutable context threaded through every component's `analyze` call.
///
/// One `Analysis` covers one pass over one circuit: it owns the unknown
/// vector, the ordered equation list, the initial conditions and the
/// per-node current sums that become KCL equations in [`Analysis::finish`].
#[derive(Debug)]
pub struct Analysis {
    config: AnalysisConfig,
    time: Symbol,
    allocator: UnknownAllocator,
    balances: Vec<NodeBalance>,
    balance_index: HashMap<NodeId, usize>,
    unknowns: Vec<Symbol>,
    equations: Vec<Equation>,
    initial_conditions: Vec<InitialCondition>,
}

impl Default for Analysis {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analysis {
    /// Start an empty analysis.
    pub fn new(config: AnalysisConfig) -> Self {
        let time = Symbol::new(&config.time_variable);
        let mut allocator = UnknownAllocator::new(config.anonymous_prefix.clone());
        allocator.reserve(time.name());
        Self {
            config,
            time,
            allocator,
            balances: Vec::new(),
            balance_index: HashMap::new(),
            unknowns: Vec::new(),
            equations: Vec::new(),
            initial_conditions: Vec::new(),
        }
    }

    /// The time variable component expressions are written in.
    pub fn time(&self) -> &Symbol {
        &self.time
    }

    /// Register a node so that its voltage is an unknown and it gets a KCL
    /// equation. Registering the same node twice is a no-op.
    ///
    /// All nodes of one analysis must come from one [`NodeGraph`] build;
    /// a node from another graph fails with [`CircuitError::ForeignNode`].
    ///
    /// [`NodeGraph`]: crate::circuit::NodeGraph
    pub fn add_node(&mut self, node: &NodeRef) -> Result<()> {
        self.balance_mut(node).map(|_| ())
    }

    fn balance_mut(&mut self, node: &NodeRef) -> Result<&mut NodeBalance> {
        let idx = match self.balance_index.get(&node.id) {
            Some(&idx) => {
                if !Rc::ptr_eq(&self.balances[idx].node, node) {
                    return Err(CircuitError::ForeignNode {
                        node: node.name.clone(),
                    });
                }
                idx
            }
            None => {
                if !self.allocator.reserve(node.v.name()) {
                    return Err(CircuitError::ForeignNode {
                        node: node.name.clone(),
                    });
                }
                let idx = self.balances.len();
                self.balances.push(NodeBalance {
                    node: Rc::clone(node),
                    currents: Vec::new(),
                });
                self.balance_index.insert(node.id, idx);
                idx
            }
        };
        Ok(&mut self.balances[idx])
    }

    /// Allocate a new unknown and add it to the unknown vector.
    ///
    /// `None` or an empty name yields an anonymous unknown.
    pub fn add_new_unknown(&mut self, name: Option<&str>) -> Symbol {
        let unknown = self.allocator.allocate(name);
        debug!("unknown {}", unknown);
        self.unknowns.push(unknown.clone());
        unknown
    }

    /// Allocate a new unknown together with the equation `unknown = value`.
    pub fn add_unknown_equal_to(&mut self, name: Option<&str>, value: impl Into<Expr>) -> Symbol {
        let unknown = self.add_new_unknown(name);
        self.add_equation(&unknown, value);
        unknown
    }

    /// Record that `current` flows from `anode` to `cathode` through the
    /// component `name`. Both nodes are registered if they are new.
    ///
    /// The anode's balance receives `-current` and the cathode's `+current`.
    pub fn add_passive_component(
        &mut self,
        name: &str,
        anode: &NodeRef,
        cathode: &NodeRef,
        current: impl Into<Expr>,
    ) -> Result<()> {
        let current = current.into();
        debug!("stamp {} {} -> {}: {}", name, anode, cathode, current);
        self.add_terminal_current(anode, -current.clone())?;
        self.add_terminal_current(cathode, current)
    }

    /// Add `current` flowing into `node` to its balance.
    pub fn add_terminal_current(&mut self, node: &NodeRef, current: impl Into<Expr>) -> Result<()> {
        let current = current.into();
        self.balance_mut(node)?.currents.push(current);
        Ok(())
    }

    /// Append the equation `lhs = rhs`.
    pub fn add_equation(&mut self, lhs: impl Into<Expr>, rhs: impl Into<Expr>) {
        let eq = Equation::new(lhs, rhs);
        debug!("equation {}", eq);
        self.equations.push(eq);
    }

    /// Append initial conditions.
    pub fn add_initial_conditions(&mut self, conditions: impl IntoIterator<Item = InitialCondition>) {
        for ic in conditions {
            debug!("initial condition {}", ic);
            self.initial_conditions.push(ic);
        }
    }

    /// Number of unknowns so far, node voltages included.
    pub fn unknown_count(&self) -> usize {
        self.balances.len() + self.unknowns.len()
    }

    /// Number of equations so far, excluding the KCL equations `finish` adds.
    pub fn equation_count(&self) -> usize {
        self.equations.len()
    }

    /// Synthesize one KCL equation per node and check the system is square.
    pub fn finish(self) -> Result<NetworkSystem> {
        let Analysis {
            config,
            balances,
            unknowns: allocated,
            mut equations,
            initial_conditions,
            ..
        } = self;

        let mut unknowns = Vec::with_capacity(balances.len() + allocated.len());
        for balance in balances {
            if balance.currents.is_empty() {
                warn!("node {} has no current contributions", balance.node);
            }
            let mut currents = balance.currents;
            let sum = match currents.len() {
                0 => Expr::ZERO,
                1 => currents.pop().unwrap_or(Expr::ZERO),
                _ => Expr::Sum(currents),
            };
            equations.push(Equation::new(sum, Expr::ZERO));
            unknowns.push(balance.node.v.clone());
        }
        unknowns.extend(allocated);

        let system = NetworkSystem {
            unknowns,
            equations,
            initial_conditions,
        };

        if !system.is_balanced() {
            let (equations, unknowns) = (system.equations.len(), system.unknowns.len());
            if config.strict {
                return Err(CircuitError::IllPosed { equations, unknowns });
            }
            warn!("ill-posed system: {} equations for {} unknowns", equations, unknowns);
        }

        info!(
            "assembled {} equations in {} unknowns with {} initial conditions",
            system.equations.len(),
            system.unknowns.len(),
            system.initial_conditions.len()
        );
        Ok(system)
    }
}
