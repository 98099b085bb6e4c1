//! Built-in passes.

mod cancel;

pub use cancel::{RemoveSelfInversePairs, SELF_INVERSE_GATES};
