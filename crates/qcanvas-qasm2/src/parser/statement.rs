//! Statement parsing.

use super::Parser;
use crate::ast::{Argument, GateCall, Statement};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::Qreg => {
                let (name, size) = self.parse_register_decl(&Token::Qreg)?;
                Ok(Statement::QregDecl { name, size })
            }
            Token::Creg => {
                let (name, size) = self.parse_register_decl(&Token::Creg)?;
                Ok(Statement::CregDecl { name, size })
            }
            Token::Gate => self.parse_gate_def(),
            Token::Opaque => self.parse_opaque(),
            Token::If => self.parse_if(),
            Token::Measure
            | Token::Reset
            | Token::Barrier
            | Token::Identifier(_)
            | Token::GateU
            | Token::GateCX => self.parse_quantum_op(),
            other => Err(self.unexpected("statement", &other)),
        }
    }

    fn parse_include(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Include)?;
        let path = match self.advance() {
            Some(Token::StringLiteral(s)) => s,
            Some(other) => {
                self.pos -= 1;
                return Err(self.unexpected("string literal", &other));
            }
            None => return Err(ParseError::UnexpectedEof("include path".into())),
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Include(path))
    }

    /// `qreg name[size];` or `creg name[size];`
    fn parse_register_decl(&mut self, keyword: &Token) -> ParseResult<(String, u32)> {
        self.expect(keyword.clone())?;
        let name = self.parse_identifier()?;
        self.expect(Token::LBracket)?;
        let line = self.line();
        let size = self.parse_int_literal()?;
        self.expect(Token::RBracket)?;
        self.expect(Token::Semicolon)?;

        let size = u32::try_from(size).map_err(|_| ParseError::UnexpectedToken {
            line,
            expected: "register size below 2^32".into(),
            found: size.to_string(),
        })?;
        Ok((name, size))
    }

    /// `gate name(params) a, b { body }`
    fn parse_gate_def(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Gate)?;
        let name = self.parse_identifier()?;
        let params = self.parse_formal_params()?;
        let qubits = self.parse_identifier_list()?;

        self.expect(Token::LBrace)?;
        let mut body = Vec::new();
        while !self.consume(&Token::RBrace) {
            if self.is_eof() {
                return Err(ParseError::UnexpectedEof(format!("end of gate '{name}'")));
            }
            if self.consume(&Token::Barrier) {
                self.parse_argument_list()?;
                self.expect(Token::Semicolon)?;
                continue;
            }
            body.push(self.parse_gate_call()?);
        }

        Ok(Statement::GateDef {
            name,
            params,
            qubits,
            body,
        })
    }

    /// `opaque name(params) a, b;`
    fn parse_opaque(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Opaque)?;
        let name = self.parse_identifier()?;
        let params = self.parse_formal_params()?;
        let qubits = self.parse_identifier_list()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Opaque {
            name,
            params,
            qubits,
        })
    }

    fn parse_formal_params(&mut self) -> ParseResult<Vec<String>> {
        if !self.consume(&Token::LParen) {
            return Ok(vec![]);
        }
        if self.consume(&Token::RParen) {
            return Ok(vec![]);
        }
        let params = self.parse_identifier_list()?;
        self.expect(Token::RParen)?;
        Ok(params)
    }

    /// `if (creg == value) op;`
    fn parse_if(&mut self) -> ParseResult<Statement> {
        self.expect(Token::If)?;
        self.expect(Token::LParen)?;
        let creg = self.parse_identifier()?;
        self.expect(Token::EqEq)?;
        let value = self.parse_int_literal()?;
        self.expect(Token::RParen)?;
        let body = self.parse_quantum_op()?;
        Ok(Statement::If {
            creg,
            value,
            body: Box::new(body),
        })
    }

    /// Gate call, `measure`, `reset` or `barrier`.
    fn parse_quantum_op(&mut self) -> ParseResult<Statement> {
        if self.consume(&Token::Measure) {
            let qubit = self.parse_argument()?;
            self.expect(Token::Arrow)?;
            let bit = self.parse_argument()?;
            self.expect(Token::Semicolon)?;
            return Ok(Statement::Measure { qubit, bit });
        }
        if self.consume(&Token::Reset) {
            let arg = self.parse_argument()?;
            self.expect(Token::Semicolon)?;
            return Ok(Statement::Reset(arg));
        }
        if self.consume(&Token::Barrier) {
            let args = self.parse_argument_list()?;
            self.expect(Token::Semicolon)?;
            return Ok(Statement::Barrier(args));
        }
        self.parse_gate_call().map(Statement::Gate)
    }

    /// `name(params) args;`
    fn parse_gate_call(&mut self) -> ParseResult<GateCall> {
        let name = match self.advance() {
            Some(Token::Identifier(name)) => name,
            Some(Token::GateU) => "U".to_string(),
            Some(Token::GateCX) => "CX".to_string(),
            Some(other) => {
                self.pos -= 1;
                return Err(self.unexpected("gate name", &other));
            }
            None => return Err(ParseError::UnexpectedEof("gate name".into())),
        };

        let params = if self.consume(&Token::LParen) {
            self.parse_expression_list()?
        } else {
            vec![]
        };

        let args = self.parse_argument_list()?;
        self.expect(Token::Semicolon)?;

        Ok(GateCall { name, params, args })
    }

    fn parse_argument_list(&mut self) -> ParseResult<Vec<Argument>> {
        let mut args = vec![self.parse_argument()?];
        while self.consume(&Token::Comma) {
            args.push(self.parse_argument()?);
        }
        Ok(args)
    }

    /// `q` or `q[3]`
    fn parse_argument(&mut self) -> ParseResult<Argument> {
        let name = self.parse_identifier()?;
        if self.consume(&Token::LBracket) {
            let index = self.parse_int_literal()?;
            self.expect(Token::RBracket)?;
            Ok(Argument::Indexed { name, index })
        } else {
            Ok(Argument::Register(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Argument, Expression, Statement};
    use crate::error::ParseError;
    use crate::parser::parse_program;

    fn statements(body: &str) -> Vec<Statement> {
        parse_program(&format!("OPENQASM 2.0;\n{body}"))
            .unwrap()
            .statements
    }

    #[test]
    fn test_gate_definition() {
        let stmts = statements("gate mygate(theta) a, b { rx(theta) a; CX a, b; barrier a, b; }");
        match &stmts[0] {
            Statement::GateDef {
                name,
                params,
                qubits,
                body,
            } => {
                assert_eq!(name, "mygate");
                assert_eq!(params, &vec!["theta".to_string()]);
                assert_eq!(qubits.len(), 2);
                assert_eq!(body.len(), 2);
                assert_eq!(body[1].name, "CX");
                assert_eq!(body[0].params[0], Expression::Identifier("theta".into()));
            }
            other => panic!("expected gate definition, got {other:?}"),
        }
    }

    #[test]
    fn test_opaque_and_if() {
        let stmts = statements("qreg q[1]; creg c[1]; opaque magic a; if (c == 1) x q[0];");
        assert!(matches!(&stmts[2], Statement::Opaque { name, .. } if name == "magic"));
        match &stmts[3] {
            Statement::If { creg, value, body } => {
                assert_eq!(creg, "c");
                assert_eq!(*value, 1);
                assert!(matches!(body.as_ref(), Statement::Gate(call) if call.name == "x"));
            }
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_builtin_u_call() {
        let stmts = statements("qreg q[1]; U(pi, 0, pi) q[0];");
        match &stmts[1] {
            Statement::Gate(call) => {
                assert_eq!(call.name, "U");
                assert_eq!(call.params.len(), 3);
                assert_eq!(
                    call.args,
                    vec![Argument::Indexed {
                        name: "q".into(),
                        index: 0
                    }]
                );
            }
            other => panic!("expected gate call, got {other:?}"),
        }
    }

    #[test]
    fn test_barrier_and_reset() {
        let stmts = statements("qreg q[2]; barrier q[0], q[1]; reset q;");
        assert!(matches!(&stmts[1], Statement::Barrier(args) if args.len() == 2));
        assert!(matches!(&stmts[2], Statement::Reset(Argument::Register(r)) if r == "q"));
    }

    #[test]
    fn test_missing_semicolon_is_rejected() {
        let err = parse_program("OPENQASM 2.0;\nqreg q[1]\nh q[0];").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { line: 3, .. }));
    }

    #[test]
    fn test_unterminated_gate_body() {
        let err = parse_program("OPENQASM 2.0;\ngate g a { h a;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof(_)));
    }
}
