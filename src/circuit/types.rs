//! Core types for circuit representation.

use std::fmt;
use std::rc::Rc;

use crate::error::{CircuitError, Result};
use crate::expr::{Expr, Symbol};

/// A unique identifier for a node within one node graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// An electrical net.
///
/// Every terminal attached to the net shares one `Node` allocation, and
/// therefore one voltage symbol.
#[derive(Debug)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Voltage unknown of this net
    pub v: Symbol,
}

/// Shared handle to a node.
pub type NodeRef = Rc<Node>;

impl Node {
    pub(crate) fn new(id: NodeId, name: impl Into<String>) -> Self {
        let name = name.into();
        let v = Symbol::new(format!("V[{}]", name));
        Self { id, name, v }
    }

    /// The node voltage as an expression.
    pub fn voltage(&self) -> Expr {
        Expr::from(&self.v)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A component pin, optionally attached to a node.
#[derive(Debug, Clone)]
pub struct Terminal {
    /// Pin label, e.g. "anode"
    pub label: &'static str,
    node: Option<NodeRef>,
}

impl Terminal {
    /// A terminal that is not connected yet.
    pub fn new(label: &'static str) -> Self {
        Self { label, node: None }
    }

    /// Attach this terminal to `node`.
    pub fn connect(&mut self, node: &NodeRef) {
        self.node = Some(Rc::clone(node));
    }

    /// Check whether a node has been assigned.
    pub fn is_connected(&self) -> bool {
        self.node.is_some()
    }

    /// Resolve the terminal to its node.
    ///
    /// `component` is only used for the error message.
    pub fn node(&self, component: &str) -> Result<&NodeRef> {
        self.node
            .as_ref()
            .ok_or_else(|| CircuitError::unresolved_terminal(component, self.label))
    }
}
