//! Net resolution.
//!
//! Terminal names are interned into nets, wires merge nets, and [`NodeGraph::build`]
//! materialises exactly one [`Node`] per net so that every terminal on a net
//! resolves to the same allocation.

use std::collections::HashMap;
use std::rc::Rc;

use super::types::{Node, NodeId, NodeRef};

/// Canonical name of the reference net.
pub const GROUND: &str = "0";

/// Builder that tracks which names belong to which net.
#[derive(Debug, Clone)]
pub struct NodeGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    parent: Vec<usize>,
    ground_aliases: Vec<String>,
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeGraph {
    /// Create an empty graph where `0` and `GND` name the reference net.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            index: HashMap::new(),
            parent: Vec::new(),
            ground_aliases: vec![GROUND.to_string(), "GND".to_string()],
        }
    }

    /// Treat `alias` as another name for the reference net.
    pub fn add_ground_alias(&mut self, alias: impl Into<String>) {
        let alias = alias.into();
        if !self.is_ground_name(&alias) {
            self.ground_aliases.push(alias);
        }
    }

    fn is_ground_name(&self, name: &str) -> bool {
        self.ground_aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    fn canonical<'a>(&self, name: &'a str) -> &'a str {
        if self.is_ground_name(name) {
            GROUND
        } else {
            name
        }
    }

    /// Intern a terminal name, returning its net index.
    pub fn net(&mut self, name: &str) -> usize {
        let name = self.canonical(name);
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.parent.push(idx);
        idx
    }

    fn find(&mut self, mut idx: usize) -> usize {
        while self.parent[idx] != idx {
            self.parent[idx] = self.parent[self.parent[idx]];
            idx = self.parent[idx];
        }
        idx
    }

    /// Join the nets named `a` and `b`.
    ///
    /// The surviving name is the reference net if either side is ground,
    /// otherwise whichever name was seen first.
    pub fn wire(&mut self, a: &str, b: &str) {
        let ia = self.net(a);
        let ib = self.net(b);
        let ra = self.find(ia);
        let rb = self.find(ib);
        if ra == rb {
            return;
        }
        let ground = self.index.get(GROUND).copied().map(|g| self.find(g));
        let (root, child) = match ground {
            Some(g) if g == rb => (rb, ra),
            Some(g) if g == ra => (ra, rb),
            _ if ra < rb => (ra, rb),
            _ => (rb, ra),
        };
        self.parent[child] = root;
    }

    /// Materialise one node per net.
    pub fn build(mut self) -> Nodes {
        let mut nodes = Vec::new();
        let mut by_root: HashMap<usize, NodeRef> = HashMap::new();
        let mut by_name = HashMap::new();

        for idx in 0..self.names.len() {
            let root = self.find(idx);
            let node = match by_root.get(&root) {
                Some(node) => Rc::clone(node),
                None => {
                    let node = Rc::new(Node::new(NodeId(nodes.len()), self.names[root].clone()));
                    nodes.push(Rc::clone(&node));
                    by_root.insert(root, Rc::clone(&node));
                    node
                }
            };
            by_name.insert(self.names[idx].clone(), node);
        }

        Nodes {
            nodes,
            by_name,
            ground_aliases: self.ground_aliases,
        }
    }
}

/// The resolved nets of a circuit.
#[derive(Debug, Clone, Default)]
pub struct Nodes {
    nodes: Vec<NodeRef>,
    by_name: HashMap<String, NodeRef>,
    ground_aliases: Vec<String>,
}

impl Nodes {
    /// Resolve a terminal name to its node.
    pub fn resolve(&self, name: &str) -> Option<&NodeRef> {
        let name = if self.ground_aliases.iter().any(|a| a.eq_ignore_ascii_case(name)) {
            GROUND
        } else {
            name
        };
        self.by_name.get(name)
    }

    /// The reference node, if any terminal was attached to it.
    pub fn ground(&self) -> Option<&NodeRef> {
        self.by_name.get(GROUND)
    }

    /// All nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRef> {
        self.nodes.iter()
    }

    /// Number of distinct nets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the graph has no nets.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
