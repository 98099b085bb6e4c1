//! `OpenQASM` 2.0 importer and exporter for qcanvas
//!
//! Reads QASM 2.0 text into a canonical [`Circuit`] and writes it back out.
//! Only version 2.0 is accepted; any other header rejects the input.
//!
//! # Supported Features
//!
//! | Feature | Import | Example |
//! |---------|--------|---------|
//! | Version declaration | required | `OPENQASM 2.0;` |
//! | Includes | ignored | `include "qelib1.inc";` |
//! | Quantum registers | yes, concatenated in order | `qreg q[5];` |
//! | Classical registers | declared only | `creg c[5];` |
//! | Gate calls | yes | `cx q[0],q[1];` |
//! | Register broadcast | yes | `h q;` |
//! | Parameter expressions | numeric or symbolic | `rx(pi/4) q[0];` |
//! | `U` / `CX` built-ins | yes, as `u` / `cx` | `CX q[0],q[1];` |
//! | `gate` / `opaque` definitions | names recorded | `gate g a { h a; }` |
//! | `measure`, `reset`, `barrier`, `if` | skipped with a notice | `measure q -> c;` |
//!
//! # Example: Parsing QASM
//!
//! ```rust
//! use qcanvas_ir::GateRegistry;
//! use qcanvas_qasm2::parse;
//!
//! let qasm = r#"
//!     OPENQASM 2.0;
//!     include "qelib1.inc";
//!     qreg q[2];
//!     h q[0];
//!     cx q[0],q[1];
//! "#;
//!
//! let converted = parse(qasm, &GateRegistry::standard()).unwrap();
//! assert!(converted.is_lossless());
//! assert_eq!(converted.value.depth, Some(2));
//! ```
//!
//! # Example: Emitting QASM
//!
//! ```rust
//! use qcanvas_ir::{Circuit, QubitId};
//! use qcanvas_qasm2::emit;
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let qasm = emit(&circuit);
//! assert!(qasm.contains("qreg q[2];"));
//! assert!(qasm.ends_with("cx q[0],q[1];"));
//! ```

pub mod ast;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;

pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::{SUPPORTED_VERSION, parse_program};

use qcanvas_ir::{Circuit, Converted, GateRegistry};

/// Parse QASM 2.0 source into a canonical circuit.
///
/// Fails only for structural problems: wrong or missing version header,
/// syntax errors, duplicate declarations. Instructions that cannot be
/// imported are dropped and reported in [`Converted::notices`]. The
/// returned circuit has fresh statistics.
pub fn parse(source: &str, registry: &GateRegistry) -> ParseResult<Converted<Circuit>> {
    let program = parse_program(source)?;
    parser::lower_to_circuit(&program, registry)
}
