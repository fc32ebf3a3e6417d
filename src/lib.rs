//! Bubble shooter (workspace facade crate).
//!
//! Re-exports the `bubble_shooter::{core,types}` API whose implementation lives
//! in dedicated crates under `crates/`, plus the helpers behind the
//! `level-preview` binary.

pub use bubble_shooter_core as core;
pub use bubble_shooter_types as types;

pub mod preview;
