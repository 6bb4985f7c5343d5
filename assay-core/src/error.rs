use std::path::PathBuf;

use crate::assertion::Location;

/// Framework-level error. Any of these aborts the whole run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The output file configured for a case could not be opened.
    #[error("can't open file: {path}: {source}")]
    OutputTarget {
        /// Path of the file that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Two parameters in one parameter set were registered under the same key.
    #[error("duplicate parameter key: '{0}'")]
    DuplicateParameter(String),

    /// A parameter holds fewer values than the set's iteration count.
    #[error("parameter '{key}' has {len} value(s) but {iterations} iteration(s) were declared")]
    ParameterTooShort {
        /// Key of the offending parameter.
        key: String,
        /// Number of values registered under the key.
        len: usize,
        /// Declared iteration count of the set.
        iterations: usize,
    },

    /// Writing to a report sink failed.
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Test-level failure, produced by a failing hard assertion.
///
/// Returning it from a test function ends that invocation only; the runner still calls
/// teardown and moves on to the next iteration or case.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{family} failed: {expression} @[{location}]")]
pub struct Failure {
    /// Assertion family that produced the failure (e.g. `assert`).
    pub family: &'static str,
    /// Stringified predicate.
    pub expression: String,
    /// Where the assertion was written.
    pub location: Location,
}

/// Result type returned by test functions.
pub type Outcome = Result<(), Failure>;
