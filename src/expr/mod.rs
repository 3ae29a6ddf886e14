//! Symbolic expressions.
//!
//! This is the thin boundary to the algebra engine that equations are built
//! from. It supports exactly what components and the assembler need:
//! building trees with ordinary operators, substituting a variable (most
//! importantly the time variable at `t = 0`), folding constant subtrees, and
//! asking whether the result is a literal.

mod display;
mod evaluate;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

/// A named symbolic variable.
///
/// Two symbols compare equal when their names match. [`Symbol::same`]
/// additionally checks that both handles share one allocation, which is how
/// node voltage identity is verified across terminals.
#[derive(Clone)]
pub struct Symbol(Rc<str>);

impl Symbol {
    /// Create a fresh symbol with the given name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Rc::from(name.as_ref()))
    }

    /// The symbol's name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Check whether two handles refer to the identical symbol allocation.
    pub fn same(a: &Symbol, b: &Symbol) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elementary functions understood by the folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Abs,
}

impl Function {
    /// Look up a function by its netlist name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "exp" => Some(Self::Exp),
            "ln" | "log" => Some(Self::Ln),
            "sqrt" => Some(Self::Sqrt),
            "abs" => Some(Self::Abs),
            _ => None,
        }
    }

    /// The function's printed name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
        }
    }

    /// Apply the function to a number.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
            Self::Sqrt => x.sqrt(),
            Self::Abs => x.abs(),
        }
    }
}

/// A symbolic expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal
    Constant(f64),
    /// A named variable
    Symbol(Symbol),
    /// Sum of terms
    Sum(Vec<Expr>),
    /// Product of factors
    Product(Vec<Expr>),
    /// `base ^ exponent`
    Power(Box<Expr>, Box<Expr>),
    /// Negation
    Neg(Box<Expr>),
    /// Elementary function call
    Call(Function, Box<Expr>),
    /// Derivative of an expression with respect to a variable
    Derivative(Box<Expr>, Symbol),
}

impl Expr {
    /// The literal zero.
    pub const ZERO: Expr = Expr::Constant(0.0);

    /// A numeric literal.
    pub fn constant(value: f64) -> Self {
        Expr::Constant(value)
    }

    /// Apply an elementary function.
    pub fn call(function: Function, arg: Expr) -> Self {
        Expr::Call(function, Box::new(arg))
    }

    /// `D(expr, var)`.
    pub fn derivative(expr: Expr, var: &Symbol) -> Self {
        Expr::Derivative(Box::new(expr), var.clone())
    }

    /// `base ^ exponent`.
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::Power(Box::new(base), Box::new(exponent))
    }

    /// The value of this expression if it is a literal.
    ///
    /// This is the only structural question the assembler ever asks.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Expr::Constant(v) => Some(*v),
            _ => None,
        }
    }

    /// Check whether this expression is a literal.
    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    /// Check whether `symbol` occurs anywhere in this expression.
    pub fn depends_on(&self, symbol: &Symbol) -> bool {
        match self {
            Expr::Constant(_) => false,
            Expr::Symbol(s) => s == symbol,
            Expr::Sum(items) | Expr::Product(items) => items.iter().any(|e| e.depends_on(symbol)),
            Expr::Power(b, e) => b.depends_on(symbol) || e.depends_on(symbol),
            Expr::Neg(e) | Expr::Call(_, e) => e.depends_on(symbol),
            Expr::Derivative(e, var) => var == symbol || e.depends_on(symbol),
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Constant(value)
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Expr::Symbol(symbol)
    }
}

impl From<&Symbol> for Expr {
    fn from(symbol: &Symbol) -> Self {
        Expr::Symbol(symbol.clone())
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        let mut terms = Vec::new();
        for e in [self, rhs] {
            match e {
                Expr::Sum(inner) => terms.extend(inner),
                other => terms.push(other),
            }
        }
        Expr::Sum(terms)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        self + (-rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        let mut factors = Vec::new();
        for e in [self, rhs] {
            match e {
                Expr::Product(inner) => factors.extend(inner),
                other => factors.push(other),
            }
        }
        Expr::Product(factors)
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        let inverse = match rhs {
            Expr::Constant(v) => Expr::Constant(1.0 / v),
            other => Expr::pow(other, Expr::Constant(-1.0)),
        };
        self * inverse
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        match self {
            Expr::Constant(v) => Expr::Constant(-v),
            Expr::Neg(inner) => *inner,
            other => Expr::Neg(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_equality_vs_identity() {
        let a = Symbol::new("x");
        let b = Symbol::new("x");
        let c = a.clone();
        assert_eq!(a, b);
        assert!(!Symbol::same(&a, &b));
        assert!(Symbol::same(&a, &c));
    }

    #[test]
    fn test_operators_flatten() {
        let x = Symbol::new("x");
        let y = Symbol::new("y");
        let e = Expr::from(&x) + Expr::from(&y) + Expr::constant(1.0);
        match e {
            Expr::Sum(terms) => assert_eq!(terms.len(), 3),
            other => panic!("expected sum, got {:?}", other),
        }
    }

    #[test]
    fn test_double_negation() {
        let x = Expr::from(Symbol::new("x"));
        assert_eq!(-(-x.clone()), x);
        assert_eq!(-Expr::constant(2.0), Expr::constant(-2.0));
    }

    #[test]
    fn test_depends_on() {
        let t = Symbol::new("t");
        let k = Symbol::new("k");
        let e = Expr::call(Function::Sin, Expr::from(&t)) + Expr::from(&k);
        assert!(e.depends_on(&t));
        assert!(e.depends_on(&k));
        assert!(!e.depends_on(&Symbol::new("z")));
    }

    #[test]
    fn test_function_lookup() {
        assert_eq!(Function::from_name("SIN"), Some(Function::Sin));
        assert_eq!(Function::from_name("log"), Some(Function::Ln));
        assert_eq!(Function::from_name("foo"), None);
    }
}
