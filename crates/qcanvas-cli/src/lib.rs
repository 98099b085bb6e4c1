//! qcanvas command-line library
//!
//! The binary is a thin shell over [`pipeline`]: it reads an input file,
//! hands the text to the pipeline, and writes the result. Keeping the
//! pipeline and the argument definitions here lets them be tested directly.
//!
//! # Example
//!
//! ```rust
//! use qcanvas_cli::cli::Format;
//! use qcanvas_cli::pipeline::convert;
//! use qcanvas_compile::PassPolicy;
//! use qcanvas_ir::GateRegistry;
//!
//! let qasm = "OPENQASM 2.0;\nqreg q[1];\nh q[0];\nh q[0];\nx q[0];";
//! let conversion = convert(
//!     qasm,
//!     Format::Qasm,
//!     Format::Qasm,
//!     &["remove_self_inverse_pairs"],
//!     PassPolicy::Lenient,
//!     &GateRegistry::standard(),
//! )
//! .unwrap();
//!
//! assert!(conversion.output.ends_with("qreg q[1];\nx q[0];"));
//! ```

pub mod cli;
mod error;
pub mod pipeline;

pub use error::{PipelineError, PipelineResult};
