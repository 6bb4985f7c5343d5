//! Core of the assay in-process test harness.
//!
//! Cases are registered as first-class callables with optional setup/teardown and an
//! optional [`ParameterSet`] that drives repeated iterations. A [`Runner`] executes them
//! strictly in registration order, one at a time, writing a line-oriented report to
//! standard output (or to a per-case file) and returning a [`Summary`].
//!
//! Checks inside test functions go through the [`CaseContext`] handed to each callable,
//! usually via the assertion macros ([`check!`], [`likely!`], [`param!`], ...). Whether a
//! check is evaluated at all depends on the case's [`Severity`] threshold: hard checks are
//! always active, soft checks only at [`Severity::Warning`] or above, and passing checks
//! are reported only at [`Severity::Info`].

mod assertion;
mod case;
mod config;
mod context;
mod error;
mod macros;
mod params;
mod reporter;
mod results;
mod runner;
pub mod timing;
pub mod trace_categories;

pub use assertion::{Assertion, Decision, Location, Severity, prefix_eq};
pub use case::{Registry, RunOption, TestCase};
pub use config::{ColorMode, RunOptions};
pub use context::CaseContext;
pub use error::{Error, Failure, Outcome};
pub use params::{ParamElement, ParamValues, Parameter, ParameterSet, ParameterSetBuilder};
pub use reporter::{Level, Reporter, Transcript};
pub use results::{CaseResult, CaseStatus, Summary};
pub use runner::Runner;
