//! Lexer (tokenizer) for the netlist DSL.

use crate::error::{CircuitError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier (component name, node name, symbol, function)
    Identifier,
    /// A number (integer or floating point, possibly with suffix)
    Number,
    /// A directive (starts with '.')
    Directive,
    /// Open parenthesis '('
    OpenParen,
    /// Close parenthesis ')'
    CloseParen,
    /// Equals sign '='
    Equals,
    /// '+'
    Plus,
    /// '-'
    Minus,
    /// '*'
    Star,
    /// '/'
    Slash,
    /// '^'
    Caret,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing netlist input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;
        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => return Ok(self.token(TokenKind::Eof, String::new(), line, column)),
        };

        let single = match ch {
            '\n' => Some(TokenKind::Newline),
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            '=' => Some(TokenKind::Equals),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '^' => Some(TokenKind::Caret),
            _ => None,
        };
        if let Some(kind) = single {
            self.advance();
            return Ok(self.token(kind, ch.to_string(), line, column));
        }

        match ch {
            '.' => {
                self.advance();
                let text = self.read_identifier();
                if text.is_empty() {
                    return Err(CircuitError::lexer(line, column, "expected directive name after '.'"));
                }
                Ok(self.token(TokenKind::Directive, format!(".{}", text), line, column))
            }
            '0'..='9' => {
                let text = self.read_number();
                Ok(self.token(TokenKind::Number, text, line, column))
            }
            _ if ch.is_alphabetic() || ch == '_' => {
                let text = self.read_identifier();
                Ok(self.token(TokenKind::Identifier, text, line, column))
            }
            _ => Err(CircuitError::lexer(
                line,
                column,
                format!("unexpected character '{}'", ch),
            )),
        }
    }

    fn token(&self, kind: TokenKind, text: String, line: usize, column: usize) -> Token {
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' || ch == ';' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Integer part
        self.read_digits(&mut text);

        // Decimal part
        if let Some(&'.') = self.chars.peek() {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        // Exponent part
        if let Some(&ch) = self.chars.peek() {
            if ch == 'e' || ch == 'E' {
                text.push(ch);
                self.advance();
                if let Some(&sign) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        text.push(sign);
                        self.advance();
                    }
                }
                self.read_digits(&mut text);
            }
        }

        // Unit suffix (p, n, u, m, k, M, G), or the rest of a numeric node name
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        text
    }
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => (x - y).abs() < x.abs() * 1e-10 + 1e-15,
            (None, None) => true,
            _ => false,
        }
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            out.push(tok.kind);
            if tok.kind == TokenKind::Eof {
                return out;
            }
        }
    }

    #[test]
    fn test_parse_value() {
        assert!(approx_eq(parse_value("10k"), Some(10_000.0)));
        assert!(approx_eq(parse_value("100n"), Some(100e-9)));
        assert!(approx_eq(parse_value("4.7u"), Some(4.7e-6)));
        assert!(approx_eq(parse_value("1M"), Some(1_000_000.0)));
        assert!(approx_eq(parse_value("2.2"), Some(2.2)));
        assert!(approx_eq(parse_value("1e-9"), Some(1e-9)));
        assert!(approx_eq(parse_value("1x"), None));
    }

    #[test]
    fn test_lexer_basic() {
        let input = "R1 in out 10k";
        let mut lexer = Lexer::new(input);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "R1");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "in");

        lexer.next_token().unwrap();
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.text, "10k");
        assert_eq!(tok.column, 11);
    }

    #[test]
    fn test_lexer_expression() {
        use TokenKind::*;
        assert_eq!(
            kinds("2*sin(t) - 1e-3^x"),
            vec![Number, Star, Identifier, OpenParen, Identifier, CloseParen, Minus, Number, Caret, Identifier, Eof]
        );
    }

    #[test]
    fn test_lexer_directive_and_comments() {
        use TokenKind::*;
        assert_eq!(
            kinds(".wire a b ; join\n# whole line\n"),
            vec![Directive, Identifier, Identifier, Newline, Newline, Eof]
        );
    }

    #[test]
    fn test_lexer_reports_position() {
        let mut lexer = Lexer::new("R1 a\nb $");
        for _ in 0..4 {
            lexer.next_token().unwrap();
        }
        match lexer.next_token() {
            Err(CircuitError::LexerError { line, column, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, 3);
            }
            other => panic!("expected lexer error, got {:?}", other),
        }
    }
}
