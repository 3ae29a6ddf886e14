//! DSL (Domain Specific Language) parser for circuit descriptions.
//!
//! A SPICE-inspired, line-oriented netlist language whose component values
//! are symbolic expressions rather than plain numbers.
//!
//! # Grammar Overview
//!
//! ```text
//! circuit     = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".ground" node | ".wire" node node | ".end"
//! component   = type name node node [["DC"] expr] { param }
//!
//! type        = "R" | "C" | "L" | "V" | "I"
//! node        = identifier | number
//! param       = identifier '=' ['-'] number
//!
//! expr        = term { ('+' | '-') term }
//! term        = unary { ('*' | '/') unary }
//! unary       = ('-' | '+') unary | power
//! power       = primary ['^' unary]
//! primary     = number | "pi" | function '(' expr ')' | identifier | '(' expr ')'
//! function    = "sin" | "cos" | "tan" | "exp" | "ln" | "log" | "sqrt" | "abs"
//!
//! number      = digit+ ['.' digit*] [('e'|'E') ['-'|'+'] digit+] [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! identifier  = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! # Component Types
//!
//! | Type | Description | Syntax |
//! |------|-------------|--------|
//! | R | Resistor | `R<name> <n+> <n-> <value>` |
//! | C | Capacitor | `C<name> <n+> <n-> <value> [ic=<volts>]` |
//! | L | Inductor | `L<name> <n+> <n-> <value> [ic=<amps>]` |
//! | V | Voltage Source | `V<name> <n+> <n-> [DC] <expr>` |
//! | I | Current Source | `I<name> <n+> <n-> [DC] <expr>` |
//!
//! The nets `0` and `GND` (any case) name the reference node. `.ground`
//! adds another alias for it and `.wire` joins two nets into one node.
//!
//! # Example
//!
//! ```text
//! # Driven RC low-pass
//! V1   in   0    2*sin(2*pi*1k*t)
//! R1   in   out  10k
//! C1   out  0    100n ic=0
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a circuit DSL string into an AST.
pub fn parse(input: &str) -> Result<CircuitAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a circuit DSL file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<CircuitAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::CircuitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
