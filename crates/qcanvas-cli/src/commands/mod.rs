//! CLI command implementations.

pub mod common;
pub mod export;
pub mod gates;
pub mod optimize;
pub mod parse;
pub mod version;
