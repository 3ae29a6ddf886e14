//! The assembled equation system handed to a solver.

use std::collections::HashMap;
use std::fmt;

use crate::error::{CircuitError, Result};
use crate::expr::{Expr, Symbol};

/// A symbolic equality `lhs = rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub lhs: Expr,
    pub rhs: Expr,
}

impl Equation {
    /// Create a new equation.
    pub fn new(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// `lhs - rhs` evaluated under numeric bindings.
    pub fn residual(&self, bindings: &HashMap<Symbol, f64>) -> Result<f64> {
        let difference = self.lhs.clone() - self.rhs.clone();
        let value = difference.evaluate_with(bindings);
        value.as_constant().ok_or_else(|| CircuitError::NotNumeric {
            expression: value.to_string(),
        })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// The value a quantity takes at `t = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialCondition {
    pub quantity: Expr,
    pub value: f64,
}

impl InitialCondition {
    /// Bind `quantity` to `value` at time zero.
    pub fn new(quantity: impl Into<Expr>, value: f64) -> Self {
        Self {
            quantity: quantity.into(),
            value,
        }
    }
}

impl fmt::Display for InitialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.quantity, self.value)
    }
}

/// Unknowns, equations and initial conditions of one finished analysis.
///
/// Unknowns list node voltages first (in node order), then every allocated
/// unknown in allocation order. Equations keep contribution order with one
/// KCL equation per node appended at the end.
#[derive(Debug, Clone, Default)]
pub struct NetworkSystem {
    pub unknowns: Vec<Symbol>,
    pub equations: Vec<Equation>,
    pub initial_conditions: Vec<InitialCondition>,
}

impl NetworkSystem {
    /// Check that there is one equation per unknown.
    pub fn is_balanced(&self) -> bool {
        self.equations.len() == self.unknowns.len()
    }

    /// Find an unknown by name.
    pub fn find_unknown(&self, name: &str) -> Option<&Symbol> {
        self.unknowns.iter().find(|s| s.name() == name)
    }

    /// Evaluate every equation's residual under numeric bindings.
    ///
    /// Useful to check a hand-computed operating point against the system.
    pub fn residuals(&self, bindings: &HashMap<Symbol, f64>) -> Result<Vec<f64>> {
        self.equations.iter().map(|eq| eq.residual(bindings)).collect()
    }
}

impl fmt::Display for NetworkSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unknowns ({}):", self.unknowns.len())?;
        for unknown in &self.unknowns {
            writeln!(f, "  {}", unknown)?;
        }
        writeln!(f, "Equations ({}):", self.equations.len())?;
        for eq in &self.equations {
            writeln!(f, "  {}", eq)?;
        }
        writeln!(f, "Initial conditions ({}):", self.initial_conditions.len())?;
        for ic in &self.initial_conditions {
            writeln!(f, "  {}", ic)?;
        }
        Ok(())
    }
}
