//! Substitution and constant folding.

use std::collections::HashMap;

use super::{Expr, Symbol};

impl Expr {
    /// Substitute `var = value` and fold every constant subtree.
    ///
    /// Folding never drops a symbolic factor: `k*t` at `t = 0` stays `k*0`
    /// rather than collapsing to `0`, so an expression only becomes a literal
    /// when every symbol in it has been bound.
    pub fn evaluate(&self, var: &Symbol, value: impl Into<Expr>) -> Expr {
        let value = value.into();
        self.rewrite(&|s: &Symbol| (s == var).then(|| value.clone()))
    }

    /// Substitute several numeric bindings at once and fold.
    pub fn evaluate_with(&self, bindings: &HashMap<Symbol, f64>) -> Expr {
        self.rewrite(&|s: &Symbol| bindings.get(s).map(|v| Expr::Constant(*v)))
    }

    /// Fold constant subtrees without substituting anything.
    pub fn simplify(&self) -> Expr {
        self.rewrite(&|_: &Symbol| None)
    }

    fn rewrite(&self, lookup: &dyn Fn(&Symbol) -> Option<Expr>) -> Expr {
        match self {
            Expr::Constant(v) => Expr::Constant(*v),
            Expr::Symbol(s) => lookup(s).unwrap_or_else(|| Expr::Symbol(s.clone())),
            Expr::Sum(terms) => fold_sum(terms.iter().map(|t| t.rewrite(lookup))),
            Expr::Product(factors) => fold_product(factors.iter().map(|f| f.rewrite(lookup))),
            Expr::Power(base, exponent) => {
                let base = base.rewrite(lookup);
                let exponent = exponent.rewrite(lookup);
                match (base.as_constant(), exponent.as_constant()) {
                    (Some(b), Some(e)) if b.powf(e).is_finite() => Expr::Constant(b.powf(e)),
                    (_, Some(e)) if e == 1.0 => base,
                    _ => Expr::pow(base, exponent),
                }
            }
            Expr::Neg(inner) => -inner.rewrite(lookup),
            Expr::Call(function, arg) => {
                let arg = arg.rewrite(lookup);
                match arg.as_constant().map(|x| function.apply(x)) {
                    Some(v) if v.is_finite() => Expr::Constant(v),
                    _ => Expr::call(*function, arg),
                }
            }
            Expr::Derivative(inner, var) => {
                // The differentiation variable stays free inside the derivative.
                let inner = inner.rewrite(&|s: &Symbol| if s == var { None } else { lookup(s) });
                if inner.is_constant() {
                    Expr::ZERO
                } else if matches!(&inner, Expr::Symbol(s) if s == var) {
                    Expr::Constant(1.0)
                } else {
                    Expr::derivative(inner, var)
                }
            }
        }
    }
}

fn fold_sum(terms: impl Iterator<Item = Expr>) -> Expr {
    let mut total = 0.0;
    let mut symbolic = Vec::new();
    for term in terms {
        match term {
            Expr::Constant(v) => total += v,
            Expr::Sum(inner) => {
                for t in inner {
                    match t {
                        Expr::Constant(v) => total += v,
                        other => symbolic.push(other),
                    }
                }
            }
            other => symbolic.push(other),
        }
    }
    if symbolic.is_empty() {
        return Expr::Constant(total);
    }
    if total != 0.0 {
        symbolic.push(Expr::Constant(total));
    }
    if symbolic.len() == 1 {
        symbolic.pop().unwrap_or(Expr::ZERO)
    } else {
        Expr::Sum(symbolic)
    }
}

fn fold_product(factors: impl Iterator<Item = Expr>) -> Expr {
    let mut coefficient = 1.0;
    let mut symbolic = Vec::new();
    for factor in factors {
        match factor {
            Expr::Constant(v) => coefficient *= v,
            Expr::Product(inner) => {
                for f in inner {
                    match f {
                        Expr::Constant(v) => coefficient *= v,
                        other => symbolic.push(other),
                    }
                }
            }
            other => symbolic.push(other),
        }
    }
    if symbolic.is_empty() {
        return Expr::Constant(coefficient);
    }
    if coefficient == 1.0 && symbolic.len() == 1 {
        return symbolic.pop().unwrap_or(Expr::ZERO);
    }
    if coefficient == -1.0 && symbolic.len() == 1 {
        return -symbolic.pop().unwrap_or(Expr::ZERO);
    }
    if coefficient != 1.0 {
        symbolic.insert(0, Expr::Constant(coefficient));
    }
    Expr::Product(symbolic)
}
