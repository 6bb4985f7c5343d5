//! Tracing targets used by the harness.

/// Trace category for assertion evaluation.
pub const ASSERTIONS: &str = "assertions";
/// Trace category for parameter lookups.
pub const PARAMS: &str = "params";
/// Trace category for case and iteration scheduling.
pub const RUNNER: &str = "runner";
