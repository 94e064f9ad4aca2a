//! blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core, types}` and hosts the
//! script driver used by the `blockfall` binary.

pub mod driver;

pub use blockfall_core as core;
pub use blockfall_types as types;
