//! Nettis (workspace facade crate).
//!
//! This package keeps a stable `nettis::{core,input,term,types}` public API
//! while the implementation lives in dedicated crates under `crates/`.

pub use nettis_core as core;
pub use nettis_input as input;
pub use nettis_term as term;
pub use nettis_types as types;
