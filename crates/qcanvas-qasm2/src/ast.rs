//! Abstract Syntax Tree for `OpenQASM` 2.0.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A complete QASM 2.0 program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Declared version, as written (e.g. "2.0").
    pub version: String,
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

/// A top-level statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    /// `include "qelib1.inc";`
    Include(String),

    /// `qreg name[size];`
    QregDecl { name: String, size: u32 },

    /// `creg name[size];`
    CregDecl { name: String, size: u32 },

    /// `gate name(params) qubits { body }`
    GateDef {
        name: String,
        params: Vec<String>,
        qubits: Vec<String>,
        body: Vec<GateCall>,
    },

    /// `opaque name(params) qubits;`
    Opaque {
        name: String,
        params: Vec<String>,
        qubits: Vec<String>,
    },

    /// Gate application.
    Gate(GateCall),

    /// `measure q -> c;`
    Measure { qubit: Argument, bit: Argument },

    /// `reset q;`
    Reset(Argument),

    /// `barrier q, r;`
    Barrier(Vec<Argument>),

    /// `if (creg == value) op;`
    If {
        creg: String,
        value: u64,
        body: Box<Statement>,
    },
}

impl Statement {
    /// Keyword or gate name that introduces the statement.
    pub fn keyword(&self) -> &str {
        match self {
            Statement::Include(_) => "include",
            Statement::QregDecl { .. } => "qreg",
            Statement::CregDecl { .. } => "creg",
            Statement::GateDef { .. } => "gate",
            Statement::Opaque { .. } => "opaque",
            Statement::Gate(call) => &call.name,
            Statement::Measure { .. } => "measure",
            Statement::Reset(_) => "reset",
            Statement::Barrier(_) => "barrier",
            Statement::If { .. } => "if",
        }
    }
}

/// A gate call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCall {
    /// Gate name as written (`U` and `CX` included).
    pub name: String,
    /// Parameter expressions.
    pub params: Vec<Expression>,
    /// Qubit arguments.
    pub args: Vec<Argument>,
}

/// A quantum or classical argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Argument {
    /// A whole register: `q`.
    Register(String),
    /// One element: `q[3]`.
    Indexed { name: String, index: u64 },
}

impl Argument {
    /// The register name.
    pub fn register(&self) -> &str {
        match self {
            Argument::Register(name) | Argument::Indexed { name, .. } => name,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Register(name) => write!(f, "{name}"),
            Argument::Indexed { name, index } => write!(f, "{name}[{index}]"),
        }
    }
}

/// A parameter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Int(u64),
    Float(f64),
    Pi,
    Identifier(String),
    Neg(Box<Expression>),
    BinOp {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
    /// Unary built-in: `sin`, `cos`, `tan`, `exp`, `ln`, `sqrt`.
    Call { func: String, arg: Box<Expression> },
    Paren(Box<Expression>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }
}

impl Expression {
    /// Evaluate a closed expression. `None` if it mentions an identifier,
    /// calls an unknown function, or produces a non-finite value.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Expression::Int(v) => *v as f64,
            Expression::Float(v) => *v,
            Expression::Pi => PI,
            Expression::Identifier(_) => return None,
            Expression::Neg(e) => -e.as_f64()?,
            Expression::Paren(e) => e.as_f64()?,
            Expression::BinOp { left, op, right } => {
                let l = left.as_f64()?;
                let r = right.as_f64()?;
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Pow => l.powf(r),
                }
            }
            Expression::Call { func, arg } => {
                let a = arg.as_f64()?;
                match func.as_str() {
                    "sin" => a.sin(),
                    "cos" => a.cos(),
                    "tan" => a.tan(),
                    "exp" => a.exp(),
                    "ln" => a.ln(),
                    "sqrt" => a.sqrt(),
                    _ => return None,
                }
            }
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Int(v) => write!(f, "{v}"),
            Expression::Float(v) => write!(f, "{v}"),
            Expression::Pi => write!(f, "pi"),
            Expression::Identifier(name) => write!(f, "{name}"),
            Expression::Neg(e) => write!(f, "-{e}"),
            Expression::BinOp { left, op, right } => write!(f, "{left}{}{right}", op.symbol()),
            Expression::Call { func, arg } => write!(f, "{func}({arg})"),
            Expression::Paren(e) => write!(f, "({e})"),
        }
    }
}
