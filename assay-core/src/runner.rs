//! Test runner implementation.

use std::time::Duration;

use crate::case::{RunOption, TestCase};
use crate::config::{ColorMode, RunOptions};
use crate::context::CaseContext;
use crate::error::Error;
use crate::reporter::{Level, Reporter};
use crate::results::{CaseResult, CaseStatus, Summary};
use crate::{timing, trace_categories};

const SEPARATOR: &str = "------------------------------------------------------------";

/// Drives registered cases one after another, in order.
#[derive(Debug)]
pub struct Runner {
    options: RunOptions,
    reporter: Reporter,
}

impl Runner {
    /// Creates a runner reporting to standard output.
    pub fn new(options: RunOptions) -> Self {
        if options.color == ColorMode::Always {
            colored::control::set_override(true);
        }

        let color = options.colors_stdout();
        Self::with_reporter(options, Reporter::stdout(color))
    }

    /// Creates a runner whose default sink is `reporter`.
    pub const fn with_reporter(options: RunOptions, reporter: Reporter) -> Self {
        Self { options, reporter }
    }

    /// Returns the run options.
    pub const fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Runs every case in order and returns their results.
    ///
    /// Test failures are recorded in the summary and never stop the run. Any `Err`
    /// returned here is framework-fatal: the remaining cases do not run.
    pub fn run<'a>(
        &mut self,
        cases: impl IntoIterator<Item = &'a TestCase>,
    ) -> Result<Summary, Error> {
        self.reporter.line(Level::Banner, "assay - starting tests")?;
        self.reporter.blank()?;

        let mut summary = Summary::default();
        for case in cases {
            summary.push(self.run_case(case)?);
        }

        self.reporter.line(Level::Banner, "assay - tests completed")?;
        self.reporter.blank()?;

        if self.options.summary {
            summary.write_report(&mut self.reporter)?;
        }

        tracing::debug!(
            target: trace_categories::RUNNER,
            "run finished: {} case(s), {} failed",
            summary.len(),
            summary.count(CaseStatus::Failed)
        );

        self.reporter.flush()?;
        Ok(summary)
    }

    /// Runs a single case through all of its iterations.
    pub fn run_case(&mut self, case: &TestCase) -> Result<CaseResult, Error> {
        // The output file stays open for the whole case and is closed on return.
        let mut file_reporter = match case.output_file() {
            Some(path) => match Reporter::append_to_file(path) {
                Ok(reporter) => Some(reporter),
                Err(e) => {
                    self.reporter.line(
                        Level::Fail,
                        &format!(
                            "output_file.is_open() [Can't open file:{}]  -->  internal-assert failed @[{}]",
                            path.display(),
                            crate::location!()
                        ),
                    )?;
                    self.reporter.flush()?;
                    return Err(e);
                }
            },
            None => None,
        };

        let sink = file_reporter.as_mut().unwrap_or(&mut self.reporter);
        let result = run_with_sink(case, &self.options, sink);

        if let Some(reporter) = file_reporter.as_mut() {
            reporter.flush()?;
        }
        result
    }
}

fn run_with_sink(
    case: &TestCase,
    options: &RunOptions,
    sink: &mut Reporter,
) -> Result<CaseResult, Error> {
    tracing::debug!(target: trace_categories::RUNNER, "starting case '{}'", case.name());

    sink.line(
        Level::Info,
        &format!("Starting test : '{}' @ {}", case.name(), timing::now()),
    )?;

    let result = if case.option() == RunOption::SkipAsPass {
        sink.line(Level::Warn, &format!("'{}'\t\t\t{:<10}", case.name(), "[PASS]"))?;

        CaseResult {
            name: case.name().to_owned(),
            status: CaseStatus::Skipped,
            elapsed: Duration::ZERO,
        }
    } else {
        run_iterations(case, options, sink)?
    };

    sink.line(Level::Separator, SEPARATOR)?;

    tracing::debug!(
        target: trace_categories::RUNNER,
        "finished case '{}': {}",
        case.name(),
        result.status
    );

    Ok(result)
}

fn run_iterations(
    case: &TestCase,
    options: &RunOptions,
    sink: &mut Reporter,
) -> Result<CaseResult, Error> {
    let threshold = options.effective_threshold(case.severity());
    let mut ctx = CaseContext::new(case, threshold, sink);

    let last = loop {
        if ctx.is_iterable() {
            ctx.write(Level::Detail, &format!("Iteration : {}", ctx.iteration()));
        }

        let iteration = case.run_iteration(&mut ctx);
        ctx.take_report_error()?;

        tracing::debug!(
            target: trace_categories::RUNNER,
            "'{}' iteration {}: {}",
            case.name(),
            ctx.iteration(),
            if iteration.outcome.is_ok() { "ok" } else { "failed" }
        );

        ctx.advance();
        if !ctx.is_iterable() || ctx.iteration() >= case.iteration_count() {
            break iteration;
        }
    };

    Ok(CaseResult {
        name: case.name().to_owned(),
        status: if last.outcome.is_ok() {
            CaseStatus::Passed
        } else {
            CaseStatus::Failed
        },
        elapsed: last.elapsed,
    })
}
