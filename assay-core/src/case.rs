//! Test case definitions and the registry.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::assertion::Severity;
use crate::context::CaseContext;
use crate::error::Outcome;
use crate::params::ParameterSet;

/// What the runner does with a case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunOption {
    /// Run the case.
    #[default]
    Run,
    /// Report the case as passed without invoking anything.
    SkipAsPass,
}

/// Result of one pass through setup, test and teardown.
pub(crate) struct Iteration {
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// The callables of a case, with any fixture state typed internally.
trait Lifecycle {
    fn run_iteration(&self, ctx: &mut CaseContext<'_>) -> Iteration;
}

type TestFn = Box<dyn Fn(&mut CaseContext<'_>) -> Outcome>;

struct Plain {
    test: TestFn,
}

impl Lifecycle for Plain {
    fn run_iteration(&self, ctx: &mut CaseContext<'_>) -> Iteration {
        let start = Instant::now();
        let outcome = (self.test)(ctx);
        let iteration = Iteration {
            outcome,
            elapsed: start.elapsed(),
        };

        ctx.report_iteration(&iteration);
        iteration
    }
}

type SetupFn<U> = Box<dyn Fn(&mut CaseContext<'_>) -> U>;
type FixtureTestFn<U> = Box<dyn Fn(&mut CaseContext<'_>, &mut U) -> Outcome>;
type TeardownFn<U> = Box<dyn Fn(&mut CaseContext<'_>, U)>;

struct Fixture<U> {
    setup: SetupFn<U>,
    test: FixtureTestFn<U>,
    teardown: TeardownFn<U>,
}

impl<U> Lifecycle for Fixture<U> {
    fn run_iteration(&self, ctx: &mut CaseContext<'_>) -> Iteration {
        let mut state = (self.setup)(ctx);

        let start = Instant::now();
        let outcome = (self.test)(ctx, &mut state);
        let iteration = Iteration {
            outcome,
            elapsed: start.elapsed(),
        };
        ctx.report_iteration(&iteration);

        // Teardown runs whatever the test returned, and owns the state from here on.
        (self.teardown)(ctx, state);

        iteration
    }
}

/// A registered unit of testable behavior.
///
/// Built once, then only read by the runner.
pub struct TestCase {
    name: String,
    lifecycle: Box<dyn Lifecycle>,
    parameters: Option<ParameterSet>,
    option: RunOption,
    severity: Severity,
    output_file: Option<PathBuf>,
}

impl TestCase {
    /// Creates a case with no setup or teardown.
    pub fn new(
        name: impl Into<String>,
        test: impl Fn(&mut CaseContext<'_>) -> Outcome + 'static,
    ) -> Self {
        Self::from_lifecycle(
            name.into(),
            Box::new(Plain {
                test: Box::new(test),
            }),
        )
    }

    /// Creates a case whose setup produces a value for the test to use, which teardown
    /// then consumes.
    ///
    /// All three callables run once per iteration, in order. Teardown runs even when
    /// the test function failed.
    pub fn with_fixture<U: 'static>(
        name: impl Into<String>,
        setup: impl Fn(&mut CaseContext<'_>) -> U + 'static,
        test: impl Fn(&mut CaseContext<'_>, &mut U) -> Outcome + 'static,
        teardown: impl Fn(&mut CaseContext<'_>, U) + 'static,
    ) -> Self {
        Self::from_lifecycle(
            name.into(),
            Box::new(Fixture {
                setup: Box::new(setup),
                test: Box::new(test),
                teardown: Box::new(teardown),
            }),
        )
    }

    fn from_lifecycle(name: String, lifecycle: Box<dyn Lifecycle>) -> Self {
        Self {
            name,
            lifecycle,
            parameters: None,
            option: RunOption::default(),
            severity: Severity::default(),
            output_file: None,
        }
    }

    /// Attaches parameters; the case then iterates once per declared iteration.
    #[must_use]
    pub fn with_parameters(mut self, parameters: ParameterSet) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Sets the run option.
    #[must_use]
    pub fn with_option(mut self, option: RunOption) -> Self {
        self.option = option;
        self
    }

    /// Marks the case as passed without running it.
    #[must_use]
    pub fn skip_as_pass(self) -> Self {
        self.with_option(RunOption::SkipAsPass)
    }

    /// Sets the severity threshold (default [`Severity::Error`]).
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sends this case's report lines to `path`, opened in append mode for the duration
    /// of the case.
    #[must_use]
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter set, if any.
    pub const fn parameters(&self) -> Option<&ParameterSet> {
        self.parameters.as_ref()
    }

    /// Returns the declared iteration count (zero without parameters).
    pub fn iteration_count(&self) -> usize {
        self.parameters
            .as_ref()
            .map_or(0, ParameterSet::iteration_count)
    }

    /// Returns the run option.
    pub const fn option(&self) -> RunOption {
        self.option
    }

    /// Returns the severity threshold.
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the output file, if one is configured.
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub(crate) fn run_iteration(&self, ctx: &mut CaseContext<'_>) -> Iteration {
        self.lifecycle.run_iteration(ctx)
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("option", &self.option)
            .field("severity", &self.severity)
            .field("output_file", &self.output_file)
            .finish_non_exhaustive()
    }
}

/// Ordered list of cases. Cases run in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a case, builder-style.
    #[must_use]
    pub fn with(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Appends a case.
    pub fn register(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    /// Returns the number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns whether no cases are registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Iterates over the cases in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }

    /// Returns the cases as a slice.
    pub fn as_slice(&self) -> &[TestCase] {
        &self.cases
    }
}

impl FromIterator<TestCase> for Registry {
    fn from_iter<I: IntoIterator<Item = TestCase>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let case = TestCase::new("plain", |_| Ok(()));

        assert_eq!(case.name(), "plain");
        assert_eq!(case.option(), RunOption::Run);
        assert_eq!(case.severity(), Severity::Error);
        assert!(case.parameters().is_none());
        assert!(case.output_file().is_none());
        assert_eq!(case.iteration_count(), 0);
    }

    #[test]
    fn builder_methods() -> Result<(), crate::Error> {
        let parameters = ParameterSet::builder(2)
            .param("x", [1_i64, 2])
            .build()?;

        let case = TestCase::with_fixture("fixture", |_| 7_u32, |_, _| Ok(()), |_, _| {})
            .with_parameters(parameters)
            .skip_as_pass()
            .with_severity(Severity::Info)
            .with_output_file("out.txt");

        assert_eq!(case.option(), RunOption::SkipAsPass);
        assert_eq!(case.severity(), Severity::Info);
        assert_eq!(case.iteration_count(), 2);
        assert_eq!(case.output_file(), Some(Path::new("out.txt")));
        Ok(())
    }

    #[test]
    fn registry_keeps_order() {
        let mut registry = Registry::new()
            .with(TestCase::new("a", |_| Ok(())))
            .with(TestCase::new("b", |_| Ok(())));
        registry.register(TestCase::new("a", |_| Ok(())));

        let names: Vec<_> = registry.iter().map(TestCase::name).collect();
        assert_eq!(names, ["a", "b", "a"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }
}
