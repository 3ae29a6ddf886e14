//! Parser for the netlist DSL.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{CircuitError, Result};
use crate::expr::{Expr, Function, Symbol};

/// Parser for netlist DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peeked: Option<Token>,
    /// Symbols seen so far, so repeated names share one allocation
    symbols: HashMap<String, Symbol>,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            peeked: None,
            symbols: HashMap::new(),
        })
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<CircuitAst> {
        let mut ast = CircuitAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                // Skip empty lines
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let component = self.parse_component()?;
                    ast.components.push(component);
                }
                _ => {
                    return Err(CircuitError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            // Every statement ends the line
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(CircuitError::parse(
                        self.current.line,
                        format!("unexpected token at end of line: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = match self.peeked.take() {
            Some(tok) => tok,
            None => self.lexer.next_token()?,
        };
        Ok(())
    }

    fn peek_kind(&mut self) -> Result<TokenKind> {
        if let Some(tok) = &self.peeked {
            return Ok(tok.kind);
        }
        let tok = self.lexer.next_token()?;
        let kind = tok.kind;
        self.peeked = Some(tok);
        Ok(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(CircuitError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    /// A node name may be an identifier or a bare number such as `0`.
    fn expect_node(&mut self) -> Result<String> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Number => {
                let text = self.current.text.clone();
                self.advance()?;
                Ok(text)
            }
            _ => Err(CircuitError::parse(
                self.current.line,
                format!("expected node name, got {:?}", self.current.text),
            )),
        }
    }

    fn parse_directive(&mut self, ast: &mut CircuitAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".ground" => {
                let node = self.expect_node()?;
                ast.ground_aliases.push(node);
            }
            ".wire" => {
                let a = self.expect_node()?;
                let b = self.expect_node()?;
                ast.wires.push((a, b));
            }
            ".end" => {
                // Ignore everything after .end
                while self.current.kind != TokenKind::Eof {
                    self.advance()?;
                }
            }
            _ => {
                return Err(CircuitError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let first_char = name.chars().next().unwrap_or('?');
        let component_type =
            ComponentType::from_prefix(first_char).ok_or_else(|| CircuitError::UnknownComponentType {
                component_type: name.clone(),
                line,
            })?;

        let expected_nodes = component_type.expected_node_count();
        let mut nodes = Vec::with_capacity(expected_nodes);
        while nodes.len() < expected_nodes {
            if matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof) {
                return Err(CircuitError::invalid_component(
                    &name,
                    line,
                    format!("expected {} nodes, got {}", expected_nodes, nodes.len()),
                ));
            }
            nodes.push(self.expect_node()?);
        }

        // SPICE-style DC keyword before the value
        if self.current.kind == TokenKind::Identifier && self.current.text.eq_ignore_ascii_case("dc") {
            self.advance()?;
        }

        let value = if self.at_line_end() || self.at_param()? {
            None
        } else {
            Some(self.parse_expr()?)
        };

        let mut params = HashMap::new();
        while !self.at_line_end() {
            let param = self.expect(TokenKind::Identifier)?.text;
            self.expect(TokenKind::Equals)?;
            let negative = self.current.kind == TokenKind::Minus;
            if negative {
                self.advance()?;
            }
            let text = self.expect(TokenKind::Number)?.text;
            let v = parse_value(&text)
                .ok_or_else(|| CircuitError::parse(line, format!("invalid number: {}", text)))?;
            params.insert(param.to_lowercase(), if negative { -v } else { v });
        }

        Ok(ComponentDef {
            component_type,
            name,
            nodes,
            value,
            params,
            line,
        })
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn at_param(&mut self) -> Result<bool> {
        if self.current.kind != TokenKind::Identifier {
            return Ok(false);
        }
        Ok(self.peek_kind()? == TokenKind::Equals)
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_term()?;
        loop {
            match self.current.kind {
                TokenKind::Plus => {
                    self.advance()?;
                    lhs = lhs + self.parse_term()?;
                }
                TokenKind::Minus => {
                    self.advance()?;
                    lhs = lhs - self.parse_term()?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    // term := unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            match self.current.kind {
                TokenKind::Star => {
                    self.advance()?;
                    lhs = lhs * self.parse_unary()?;
                }
                TokenKind::Slash => {
                    self.advance()?;
                    lhs = lhs / self.parse_unary()?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    // unary := ('-' | '+') unary | power
    fn parse_unary(&mut self) -> Result<Expr> {
        match self.current.kind {
            TokenKind::Minus => {
                self.advance()?;
                Ok(-self.parse_unary()?)
            }
            TokenKind::Plus => {
                self.advance()?;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    // power := primary ('^' unary)?
    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_primary()?;
        if self.current.kind == TokenKind::Caret {
            self.advance()?;
            let exponent = self.parse_unary()?;
            return Ok(Expr::pow(base, exponent));
        }
        Ok(base)
    }

    // primary := number | identifier ['(' expr ')'] | '(' expr ')'
    fn parse_primary(&mut self) -> Result<Expr> {
        let tok = self.current.clone();
        match tok.kind {
            TokenKind::Number => {
                self.advance()?;
                let v = parse_value(&tok.text)
                    .ok_or_else(|| CircuitError::parse(tok.line, format!("invalid number: {}", tok.text)))?;
                Ok(Expr::constant(v))
            }
            TokenKind::Identifier => {
                self.advance()?;
                if self.current.kind == TokenKind::OpenParen {
                    let function = Function::from_name(&tok.text).ok_or_else(|| {
                        CircuitError::parse(tok.line, format!("unknown function: {}", tok.text))
                    })?;
                    self.advance()?;
                    let arg = self.parse_expr()?;
                    self.expect(TokenKind::CloseParen)?;
                    return Ok(Expr::call(function, arg));
                }
                if tok.text.eq_ignore_ascii_case("pi") {
                    return Ok(Expr::constant(std::f64::consts::PI));
                }
                let symbol = self
                    .symbols
                    .entry(tok.text.clone())
                    .or_insert_with(|| Symbol::new(&tok.text))
                    .clone();
                Ok(Expr::Symbol(symbol))
            }
            TokenKind::OpenParen => {
                self.advance()?;
                let inner = self.parse_expr()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(inner)
            }
            _ => Err(CircuitError::parse(
                tok.line,
                format!("expected expression, got {:?}", tok.text),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;

    #[test]
    fn test_parse_resistor() {
        let ast = parse("R1 in out 10k").unwrap();
        assert_eq!(ast.components.len(), 1);
        assert_eq!(ast.components[0].component_type, ComponentType::Resistor);
        assert_eq!(ast.components[0].name, "R1");
        assert_eq!(ast.components[0].nodes, vec!["in", "out"]);
        assert_eq!(ast.components[0].value, Some(Expr::constant(10_000.0)));
    }

    #[test]
    fn test_parse_numeric_nodes() {
        let ast = parse("V1 1 0 5").unwrap();
        assert_eq!(ast.components[0].nodes, vec!["1", "0"]);
        assert_eq!(ast.components[0].value, Some(Expr::constant(5.0)));
    }

    #[test]
    fn test_parse_time_varying_source() {
        let ast = parse("V1 A 0 2*sin(2*pi*50*t) + 1").unwrap();
        let value = ast.components[0].value.clone().unwrap();
        let t = Symbol::new("t");
        assert!(value.depends_on(&t));
        let v0 = value.evaluate(&t, 0.0);
        assert_eq!(v0.as_constant(), Some(1.0));
    }

    #[test]
    fn test_parse_params_after_value() {
        let ast = parse("C1 B 0 100n ic=-1.5").unwrap();
        let c = &ast.components[0];
        assert_eq!(c.value, Some(Expr::constant(100e-9)));
        assert_eq!(c.params["ic"], -1.5);
    }

    #[test]
    fn test_parse_params_without_value() {
        let ast = parse("V1 A 0 ic=1").unwrap();
        assert!(ast.components[0].value.is_none());
        assert_eq!(ast.components[0].params["ic"], 1.0);
    }

    #[test]
    fn test_parse_dc_keyword() {
        let ast = parse("V1 A 0 DC 9").unwrap();
        assert_eq!(ast.components[0].value, Some(Expr::constant(9.0)));
    }

    #[test]
    fn test_symbols_are_shared() {
        let ast = parse("V1 A 0 k*t\nV2 B 0 k").unwrap();
        let k1 = match ast.components[0].value.as_ref().unwrap() {
            Expr::Product(f) => match &f[0] {
                Expr::Symbol(s) => s.clone(),
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        };
        let k2 = match ast.components[1].value.as_ref().unwrap() {
            Expr::Symbol(s) => s.clone(),
            other => panic!("unexpected {:?}", other),
        };
        assert!(Symbol::same(&k1, &k2));
    }

    #[test]
    fn test_parse_directives() {
        let ast = parse(".ground VSS\n.wire a b\nR1 a VSS 1k\n.end\nthis is ignored").unwrap();
        assert_eq!(ast.ground_aliases, vec!["VSS"]);
        assert_eq!(ast.wires, vec![("a".to_string(), "b".to_string())]);
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_parse_with_comments() {
        let ast = parse("# This is a comment\nR1 in out 1k ; inline comment style\n").unwrap();
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_missing_nodes() {
        assert!(matches!(
            parse("R1 in\nR2 a b 1"),
            Err(CircuitError::InvalidComponent { ref name, line: 1, .. }) if name == "R1"
        ));
    }

    #[test]
    fn test_unknown_component_type() {
        assert!(matches!(
            parse("X1 a b"),
            Err(CircuitError::UnknownComponentType { .. })
        ));
    }

    #[test]
    fn test_unknown_function() {
        assert!(matches!(parse("V1 a 0 foo(t)"), Err(CircuitError::ParseError { .. })));
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(matches!(parse("R1 a b 1k )"), Err(CircuitError::ParseError { .. })));
    }
}
