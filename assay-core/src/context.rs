//! Per-case execution context.

use std::cell::Cell;
use std::fmt::Display;

use crate::assertion::{Assertion, Decision, Location, Severity};
use crate::case::{Iteration, TestCase};
use crate::error::{Failure, Outcome};
use crate::params::{ParamElement, ParameterSet};
use crate::reporter::{Level, Reporter};
use crate::{timing, trace_categories};

/// State of the case currently being run.
///
/// One context lives for all iterations of a case and is handed by reference to that
/// case's setup, test and teardown callables. Assertions and parameter lookups go through
/// it.
pub struct CaseContext<'a> {
    case: &'a TestCase,
    threshold: Severity,
    iteration: usize,
    iterable: Cell<bool>,
    reporter: &'a mut Reporter,
    report_error: Option<std::io::Error>,
}

impl<'a> CaseContext<'a> {
    pub(crate) fn new(case: &'a TestCase, threshold: Severity, reporter: &'a mut Reporter) -> Self {
        Self {
            case,
            threshold,
            iteration: 0,
            iterable: Cell::new(case.parameters().is_some()),
            reporter,
            report_error: None,
        }
    }

    /// Returns the name of the running case.
    pub fn name(&self) -> &'a str {
        self.case.name()
    }

    /// Returns the severity threshold assertions are evaluated against.
    pub const fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Returns the current iteration index.
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Returns whether the case will keep iterating after this pass.
    pub fn is_iterable(&self) -> bool {
        self.iterable.get()
    }

    /// Returns the case's parameter set, if it has one.
    pub fn parameters(&self) -> Option<&'a ParameterSet> {
        self.case.parameters()
    }

    /// Returns the whole value array registered under `key`.
    ///
    /// A miss (unknown key, or values of another element type) stops the case from
    /// iterating any further; the current iteration still runs to completion.
    pub fn param_values<T: ParamElement>(&self, key: &str) -> Option<&'a [T]> {
        let values = self.parameters().and_then(|p| p.values::<T>(key));
        if values.is_none() {
            tracing::debug!(
                target: trace_categories::PARAMS,
                "'{}': no parameter '{key}' of the requested type; iteration stops after {}",
                self.name(),
                self.iteration
            );
            self.iterable.set(false);
        }
        values
    }

    /// Returns the value under `key` for the current iteration.
    pub fn param<T: ParamElement>(&self, key: &str) -> Option<T> {
        self.param_values::<T>(key)?.get(self.iteration).cloned()
    }

    /// Like [`Self::param`], but reports an internal-assert failure on a miss and
    /// returns it so the test function can bail out. Used by [`crate::param!`].
    pub fn require_param<T: ParamElement>(
        &mut self,
        key: &str,
        location: Location,
    ) -> Result<T, Failure> {
        let values = self.param_values::<T>(key);
        if let Some(value) = values.and_then(|v| v.get(self.iteration)) {
            return Ok(value.clone());
        }

        // Only an empty array under a zero iteration count gets here with a known key.
        let reason = if values.is_some() {
            format!("No value for iteration {}!", self.iteration)
        } else {
            String::from("No key found!")
        };

        let expression = format!("param(\"{key}\")");
        self.write(
            Level::Fail,
            &format!("{expression} [{reason}]  -->  internal-assert failed @[{location}]"),
        );

        Err(Failure {
            family: "internal-assert",
            expression,
            location,
        })
    }

    /// Evaluates one check against the case threshold and reports the decision.
    ///
    /// Returns `Err` only for a triggered check that aborts.
    pub fn evaluate(
        &mut self,
        assertion: &Assertion<'_>,
        predicate: bool,
        note: Option<std::fmt::Arguments<'_>>,
    ) -> Outcome {
        match self.record(assertion, predicate, note) {
            Decision::Failed { abort: true } => Err(Failure {
                family: assertion.family,
                expression: assertion.expression.to_owned(),
                location: assertion.location,
            }),
            _ => Ok(()),
        }
    }

    /// Evaluates a check that never aborts, such as a `likely` or `unlikely` warning.
    ///
    /// The decision is reported exactly as [`Self::evaluate`] would report it; a
    /// triggered check is written out and the test function carries on.
    pub fn evaluate_soft(
        &mut self,
        assertion: &Assertion<'_>,
        predicate: bool,
        note: Option<std::fmt::Arguments<'_>>,
    ) {
        self.record(assertion, predicate, note);
    }

    fn record(
        &mut self,
        assertion: &Assertion<'_>,
        predicate: bool,
        note: Option<std::fmt::Arguments<'_>>,
    ) -> Decision {
        let decision = assertion.decide(self.threshold, predicate);

        tracing::debug!(
            target: trace_categories::ASSERTIONS,
            "{} '{}' at {}: {decision:?}",
            assertion.family,
            assertion.expression,
            assertion.location
        );

        match decision {
            Decision::Inactive => {}
            Decision::Passed { reported } => {
                if reported {
                    self.write(
                        Level::Pass,
                        &format!(
                            "{}  -->  {} passed @[{}]",
                            assertion.expression, assertion.family, assertion.location
                        ),
                    );
                }
            }
            Decision::Failed { abort } => {
                let level = if abort { Level::Fail } else { Level::Warn };
                self.write(
                    level,
                    &format!(
                        "{}  -->  {} failed @[{}]",
                        assertion.expression, assertion.family, assertion.location
                    ),
                );

                if let Some(note) = note.map(|n| n.to_string()).filter(|n| !n.is_empty()) {
                    self.blank();
                    self.write(Level::Warn, &format!("Note:{{{note}}}"));
                    self.blank();
                }
            }
        }

        decision
    }

    /// Writes a free-form line to the case's report sink.
    pub fn log(&mut self, text: impl Display) {
        self.write(Level::Detail, &text.to_string());
    }

    /// Writes the verdict line of one iteration. Called before teardown runs.
    pub(crate) fn report_iteration(&mut self, iteration: &Iteration) {
        let name = self.name();
        match &iteration.outcome {
            Ok(()) => self.write(
                Level::Pass,
                &format!(
                    "'{name}'\t\t\t{:<10} {}ms",
                    "[OK]",
                    timing::format_millis(&iteration.elapsed)
                ),
            ),
            Err(_) => self.write(Level::Fail, &format!("'{name}'\t\t\t{:<10}", "[FAILED]")),
        }
    }

    pub(crate) fn write(&mut self, level: Level, text: &str) {
        if let Err(e) = self.reporter.line(level, text) {
            self.report_error.get_or_insert(e);
        }
    }

    fn blank(&mut self) {
        if let Err(e) = self.reporter.blank() {
            self.report_error.get_or_insert(e);
        }
    }

    /// Returns the first report I/O error seen since the last call.
    pub(crate) fn take_report_error(&mut self) -> std::io::Result<()> {
        self.report_error.take().map_or(Ok(()), Err)
    }

    pub(crate) const fn advance(&mut self) {
        self.iteration += 1;
    }
}

impl std::fmt::Debug for CaseContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseContext")
            .field("case", &self.case.name())
            .field("threshold", &self.threshold)
            .field("iteration", &self.iteration)
            .field("iterable", &self.iterable.get())
            .finish_non_exhaustive()
    }
}
