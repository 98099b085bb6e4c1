//! Pipeline errors.
//!
//! Every variant is a structural rejection of the request. Per-gate problems
//! never surface here; they travel as notices.

use thiserror::Error;

use crate::cli::Format;

/// A request the pipeline refuses as a whole.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    #[error("QASM parse error: {0}")]
    Qasm(#[from] qcanvas_qasm2::ParseError),

    #[error("Qiskit circuit error: {0}")]
    Qiskit(#[from] qcanvas_adapter_qiskit::QiskitError),

    #[error("PennyLane tape error: {0}")]
    PennyLane(#[from] qcanvas_adapter_pennylane::PennyLaneError),

    #[error("Invalid circuit JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rewrite produced an invalid circuit: {0}")]
    Ir(#[from] qcanvas_ir::IrError),

    #[error(transparent)]
    Compile(#[from] qcanvas_compile::CompileError),

    #[error("'{0}' is an output-only format")]
    NotImportable(Format),
}

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
