//! Unknown allocation.

use std::collections::HashSet;

use crate::expr::Symbol;

/// Check whether `name` lies in the node voltage namespace `V[...]`.
///
/// Node voltages are reserved as nodes appear, possibly after other unknowns
/// were allocated, so allocation never hands out a name in this namespace.
pub fn is_node_voltage_name(name: &str) -> bool {
    name.starts_with("V[") && name.ends_with(']')
}

/// Mints uniquely-named unknowns for one analysis pass.
///
/// Names are never released. A requested name that is already taken, or
/// that falls in the node voltage namespace, gets a `_2`, `_3`, ... suffix;
/// anonymous unknowns are numbered after a prefix.
#[derive(Debug, Clone)]
pub struct UnknownAllocator {
    taken: HashSet<String>,
    anonymous_prefix: String,
    next_anonymous: usize,
}

impl UnknownAllocator {
    /// Create an allocator with the given anonymous prefix.
    pub fn new(anonymous_prefix: impl Into<String>) -> Self {
        Self {
            taken: HashSet::new(),
            anonymous_prefix: anonymous_prefix.into(),
            next_anonymous: 0,
        }
    }

    /// Mark `name` as used without allocating it.
    ///
    /// Returns false if it was already taken.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.taken.insert(name.to_string())
    }

    /// Check whether `name` is in use.
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    fn claim(&mut self, candidate: &str) -> bool {
        if is_node_voltage_name(candidate) || self.is_taken(candidate) {
            return false;
        }
        self.reserve(candidate)
    }

    /// Allocate a fresh unknown.
    ///
    /// `None` or an empty name yields an anonymous unknown.
    pub fn allocate(&mut self, base: Option<&str>) -> Symbol {
        match base.filter(|b| !b.is_empty()) {
            Some(base) => self.allocate_named(base),
            None => self.allocate_anonymous(),
        }
    }

    fn allocate_named(&mut self, base: &str) -> Symbol {
        if self.claim(base) {
            return Symbol::new(base);
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}_{}", base, suffix);
            if self.claim(&candidate) {
                return Symbol::new(candidate);
            }
            suffix += 1;
        }
    }

    fn allocate_anonymous(&mut self) -> Symbol {
        loop {
            let candidate = format!("{}{}", self.anonymous_prefix, self.next_anonymous);
            self.next_anonymous += 1;
            if self.claim(&candidate) {
                return Symbol::new(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_allocation() {
        let mut alloc = UnknownAllocator::new("_x");
        assert_eq!(alloc.allocate(Some("iV1")).name(), "iV1");
        assert!(alloc.is_taken("iV1"));
    }

    #[test]
    fn test_collision_is_disambiguated() {
        let mut alloc = UnknownAllocator::new("_x");
        let a = alloc.allocate(Some("X"));
        let b = alloc.allocate(Some("X"));
        let c = alloc.allocate(Some("X"));
        assert_ne!(a, b);
        assert_ne!(b, c);
        for s in [&a, &b, &c] {
            assert!(s.name().contains('X'));
        }
        assert_eq!(b.name(), "X_2");
    }

    #[test]
    fn test_suffix_skips_reserved_names() {
        let mut alloc = UnknownAllocator::new("_x");
        alloc.reserve("X");
        alloc.reserve("X_2");
        assert_eq!(alloc.allocate(Some("X")).name(), "X_3");
    }

    #[test]
    fn test_node_voltage_namespace_is_never_allocated() {
        let mut alloc = UnknownAllocator::new("_x");
        let u = alloc.allocate(Some("V[A]"));
        assert_eq!(u.name(), "V[A]_2");
        assert!(!alloc.is_taken("V[A]"));
        // The node can still claim its voltage name later.
        assert!(alloc.reserve("V[A]"));
    }

    #[test]
    fn test_anonymous_allocation() {
        let mut alloc = UnknownAllocator::new("_x");
        alloc.reserve("_x1");
        let a = alloc.allocate(None);
        let b = alloc.allocate(Some(""));
        assert_eq!(a.name(), "_x0");
        assert_eq!(b.name(), "_x2");
    }
}
