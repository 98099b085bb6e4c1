//! Error types for the QASM 2.0 importer.
//!
//! Every variant here rejects the whole input. Problems confined to a single
//! instruction are reported as notices instead.

use thiserror::Error;

/// Errors that reject a QASM source outright.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The source does not start with a version declaration.
    #[error("Only OpenQASM 2.0 is supported: input must start with 'OPENQASM 2.0;'")]
    MissingHeader,

    /// The source declares a version other than 2.0.
    #[error(
        "Only OpenQASM 2.0 is supported: input must start with 'OPENQASM 2.0;' (found version {0})"
    )]
    UnsupportedVersion(String),

    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}, position {position}: {message}")]
    LexerError {
        line: usize,
        position: usize,
        message: String,
    },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// A register or gate declared twice.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// Declared registers exceed the addressable qubit range.
    #[error("Register '{0}' exceeds the maximum circuit width")]
    TooManyQubits(String),
}

impl ParseError {
    /// True when the input was rejected for declaring the wrong dialect.
    pub fn is_dialect_error(&self) -> bool {
        matches!(
            self,
            ParseError::MissingHeader | ParseError::UnsupportedVersion(_)
        )
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
