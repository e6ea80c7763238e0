//! Output formatting for host records and diff reports
//!
//! The presenter renders a [`crate::types::HostRecord`] as a free-text block
//! (identifier line, then one line per populated field) or as `ip:port`
//! pairs, and renders a [`crate::diff::DiffReport`] in the same two modes.
//! Display behavior is driven by an explicit [`DisplayOptions`] value
//! threaded through call sites rather than process-wide flags.

pub mod common;
pub mod text;

pub use common::OutputWriter;
pub use text::{DisplayOptions, TextFormatter};
