//! Infix rendering of expressions.

use std::fmt;

use super::Expr;

const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POWER: u8 = 4;
const PREC_ATOM: u8 = 5;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Constant(v) if *v < 0.0 => PREC_NEG,
            Expr::Constant(_) | Expr::Symbol(_) | Expr::Call(..) | Expr::Derivative(..) => PREC_ATOM,
            Expr::Sum(_) => PREC_SUM,
            Expr::Product(_) => PREC_PRODUCT,
            Expr::Neg(_) => PREC_NEG,
            Expr::Power(..) => PREC_POWER,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        if self.precedence() < parent {
            write!(f, "(")?;
            self.fmt_inner(f)?;
            write!(f, ")")
        } else {
            self.fmt_inner(f)
        }
    }

    fn fmt_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(v) => write!(f, "{}", v),
            Expr::Symbol(s) => write!(f, "{}", s),
            Expr::Sum(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    match term {
                        Expr::Neg(inner) if i > 0 => {
                            write!(f, " - ")?;
                            inner.fmt_prec(f, PREC_PRODUCT)?;
                        }
                        Expr::Constant(v) if i > 0 && *v < 0.0 => write!(f, " - {}", -v)?,
                        _ => {
                            if i > 0 {
                                write!(f, " + ")?;
                            }
                            term.fmt_prec(f, PREC_SUM + 1)?;
                        }
                    }
                }
                Ok(())
            }
            Expr::Product(factors) => {
                let mut first = true;
                for factor in factors {
                    match factor {
                        Expr::Power(base, exponent) if exponent.as_constant() == Some(-1.0) => {
                            if first {
                                write!(f, "1")?;
                            }
                            write!(f, "/")?;
                            base.fmt_prec(f, PREC_POWER)?;
                        }
                        _ => {
                            if !first {
                                write!(f, "*")?;
                            }
                            factor.fmt_prec(f, PREC_PRODUCT + 1)?;
                        }
                    }
                    first = false;
                }
                Ok(())
            }
            Expr::Power(base, exponent) => {
                base.fmt_prec(f, PREC_POWER + 1)?;
                write!(f, "^")?;
                exponent.fmt_prec(f, PREC_POWER)
            }
            Expr::Neg(inner) => {
                write!(f, "-")?;
                inner.fmt_prec(f, PREC_POWER)
            }
            Expr::Call(function, arg) => write!(f, "{}({})", function.name(), arg),
            Expr::Derivative(inner, var) => write!(f, "D({}, {})", inner, var),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_inner(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::{Expr, Function, Symbol};

    fn sym(name: &str) -> Expr {
        Expr::from(Symbol::new(name))
    }

    #[test]
    fn test_display_difference() {
        let e = sym("V[A]") - sym("V[B]");
        assert_eq!(e.to_string(), "V[A] - V[B]");
    }

    #[test]
    fn test_display_quotient() {
        let e = (sym("a") - sym("b")) / sym("R");
        assert_eq!(e.to_string(), "(a - b)/R");
    }

    #[test]
    fn test_display_call_and_derivative() {
        let t = Symbol::new("t");
        let e = Expr::constant(2.0) * Expr::call(Function::Sin, Expr::from(&t));
        assert_eq!(e.to_string(), "2*sin(t)");
        let d = Expr::derivative(sym("v"), &t);
        assert_eq!(d.to_string(), "D(v, t)");
    }

    #[test]
    fn test_display_negative_constant_in_sum() {
        let e = (sym("x") + Expr::constant(-3.0)).simplify();
        assert_eq!(e.to_string(), "x - 3");
    }
}
