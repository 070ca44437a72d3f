//! ASCII field (workspace facade crate).
//!
//! Re-exports the member crates under one roof as
//! `ascii_field::{types, core, compositor, engine, input, term}` and hosts the logging
//! setup shared by the binaries.

pub mod logging;

pub use ascii_field_compositor as compositor;
pub use ascii_field_core as core;
pub use ascii_field_engine as engine;
pub use ascii_field_input as input;
pub use ascii_field_term as term;
pub use ascii_field_types as types;
