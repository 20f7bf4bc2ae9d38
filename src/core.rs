//! Observable values and node descriptors
//!
//! This module re-exports `postact-core`: the observable primitives, the
//! node tree the parser builds, argument classification and the in-memory
//! page that realized trees live in.

pub use postact_core::*;
