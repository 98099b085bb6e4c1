//! Parser for `OpenQASM` 2.0.

mod expression;
mod lowering;
mod statement;

pub(crate) use lowering::lower_to_circuit;

use crate::ast::Program;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// The only version accepted in the header.
pub const SUPPORTED_VERSION: &str = "2.0";

/// Parse a QASM 2.0 source string into an AST Program.
pub fn parse_program(source: &str) -> ParseResult<Program> {
    Parser::new(source).parse_program()
}

/// Parser state.
pub(super) struct Parser {
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
    /// First lexer error, reported only after the header has been checked.
    lex_error: Option<ParseError>,
}

impl Parser {
    fn new(source: &str) -> Self {
        let mut tokens = Vec::new();
        let mut lex_error = None;
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err(e) => {
                    lex_error = Some(ParseError::LexerError {
                        line: e.line,
                        position: e.span.start,
                        message: e.message,
                    });
                    break;
                }
            }
        }
        Self {
            tokens,
            pos: 0,
            lex_error,
        }
    }

    /// Check if we've reached the end.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Line of the current token, or of the last one at end of input.
    pub(super) fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    /// Peek at the current token.
    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Advance and return the current token.
    pub(super) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    pub(super) fn unexpected(&self, expected: &str, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            line: self.line(),
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let line = self.line();
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(&expected) {
            return Err(ParseError::UnexpectedToken {
                line,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Check if current token matches.
    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume token if it matches.
    pub(super) fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Parse the entire program. The header is checked before anything else.
    fn parse_program(&mut self) -> ParseResult<Program> {
        if !self.consume(&Token::OpenQasm) {
            return Err(ParseError::MissingHeader);
        }
        let version = self.parse_version()?;
        if version != SUPPORTED_VERSION {
            return Err(ParseError::UnsupportedVersion(version));
        }
        self.expect(Token::Semicolon)?;

        // A later-dialect program usually fails to lex; the version check above wins.
        if let Some(err) = self.lex_error.take() {
            return Err(err);
        }

        let mut statements = Vec::new();
        while !self.is_eof() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program {
            version,
            statements,
        })
    }

    /// Parse the version number, keeping its written form.
    fn parse_version(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::FloatLiteral(v)) => Ok(format!("{v:?}")),
            Some(Token::IntLiteral(v)) => Ok(v.to_string()),
            Some(other) => Err(ParseError::UnsupportedVersion(other.to_string())),
            None => Err(ParseError::UnexpectedEof("version number".into())),
        }
    }

    /// Parse a comma-separated identifier list.
    pub(super) fn parse_identifier_list(&mut self) -> ParseResult<Vec<String>> {
        let mut ids = vec![self.parse_identifier()?];
        while self.consume(&Token::Comma) {
            ids.push(self.parse_identifier()?);
        }
        Ok(ids)
    }

    /// Parse an identifier.
    pub(super) fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s),
            Some(other) => {
                self.pos -= 1;
                Err(self.unexpected("identifier", &other))
            }
            None => Err(ParseError::UnexpectedEof("identifier".into())),
        }
    }

    /// Parse an integer literal.
    pub(super) fn parse_int_literal(&mut self) -> ParseResult<u64> {
        match self.advance() {
            Some(Token::IntLiteral(v)) => Ok(v),
            Some(other) => {
                self.pos -= 1;
                Err(self.unexpected("integer", &other))
            }
            None => Err(ParseError::UnexpectedEof("integer".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Argument, Statement};

    #[test]
    fn test_parse_bell_state() {
        let source = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[2];
            creg c[2];
            h q[0];
            cx q[0],q[1];
            measure q -> c;
        "#;

        let program = parse_program(source).unwrap();
        assert_eq!(program.version, "2.0");
        assert_eq!(program.statements.len(), 6);
        assert!(matches!(&program.statements[0], Statement::Include(p) if p == "qelib1.inc"));
        assert!(matches!(
            &program.statements[5],
            Statement::Measure { qubit: Argument::Register(q), .. } if q == "q"
        ));
    }

    #[test]
    fn test_version_gate() {
        let err = parse_program("OPENQASM 3.0; qubit[1] q;").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedVersion(ref v) if v == "3.0"));
        assert!(err.is_dialect_error());

        let err = parse_program("OPENQASM 3.0;\nbit[1] c;\nc = measure q;").unwrap_err();
        assert!(err.is_dialect_error());

        let err = parse_program("OPENQASM 2; qreg q[1];").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedVersion(ref v) if v == "2"));

        let err = parse_program("qreg q[1]; h q[0];").unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader));
    }

    #[test]
    fn test_lowercase_header_accepted() {
        assert!(parse_program("openqasm 2.0;\nqreg q[1];").is_ok());
    }

    #[test]
    fn test_error_reports_line() {
        let err = parse_program("OPENQASM 2.0;\nqreg q[1];\nh q[0]\nx q[0];").unwrap_err();
        match err {
            ParseError::UnexpectedToken { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lexer_error() {
        let err = parse_program("OPENQASM 2.0;\nqreg q[1]; @").unwrap_err();
        assert!(matches!(err, ParseError::LexerError { line: 2, .. }));
    }
}
