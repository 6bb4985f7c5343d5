//! Per-case results and the end-of-run summary.

use std::time::Duration;

use crate::reporter::{Level, Reporter};
use crate::timing;

/// Final status of a case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum CaseStatus {
    /// The last iteration passed.
    #[strum(serialize = "PASSED")]
    Passed,
    /// The last iteration failed.
    #[strum(serialize = "FAILED")]
    Failed,
    /// The case was reported as passed without running.
    #[strum(serialize = "SKIPPED")]
    Skipped,
}

/// Result of one case.
///
/// Status and elapsed time are those of the last iteration that ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseResult {
    /// Case name.
    pub name: String,
    /// Final status.
    pub status: CaseStatus,
    /// Elapsed time of the last iteration's test function; zero when skipped.
    pub elapsed: Duration,
}

impl CaseResult {
    /// Returns whether the case counts as passed. Skipped cases do.
    pub fn passed(&self) -> bool {
        self.status != CaseStatus::Failed
    }
}

/// Ordered results of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    results: Vec<CaseResult>,
}

impl Summary {
    pub(crate) fn push(&mut self, result: CaseResult) {
        self.results.push(result);
    }

    /// Iterates over results in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, CaseResult> {
        self.results.iter()
    }

    /// Returns the result for the first case named `name`.
    pub fn get(&self, name: &str) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Returns the number of recorded results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns whether no case ran.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of results with `status`.
    pub fn count(&self, status: CaseStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Returns whether no case failed.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(CaseResult::passed)
    }

    /// Writes the summary block.
    pub fn write_report(&self, reporter: &mut Reporter) -> std::io::Result<()> {
        reporter.line(Level::SummaryHeader, "Summary")?;

        for result in &self.results {
            let status = result.status.to_string();
            let row = if result.status == CaseStatus::Passed {
                format!(
                    "{:<40}{status:>10} ({} ms)",
                    result.name,
                    timing::format_millis(&result.elapsed)
                )
            } else {
                format!("{:<40}{status:>10}", result.name)
            };

            let level = match result.status {
                CaseStatus::Passed => Level::Pass,
                CaseStatus::Failed => Level::Fail,
                CaseStatus::Skipped => Level::Warn,
            };
            reporter.line(level, &row)?;
        }

        reporter.blank()
    }
}

impl<'a> IntoIterator for &'a Summary {
    type Item = &'a CaseResult;
    type IntoIter = std::slice::Iter<'a, CaseResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reporter::Transcript;

    fn result(name: &str, status: CaseStatus, millis: u64) -> CaseResult {
        CaseResult {
            name: name.to_owned(),
            status,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn counts() {
        let mut summary = Summary::default();
        summary.push(result("a", CaseStatus::Passed, 1));
        summary.push(result("b", CaseStatus::Skipped, 0));
        summary.push(result("c", CaseStatus::Failed, 3));

        assert_eq!(summary.len(), 3);
        assert_eq!(summary.count(CaseStatus::Failed), 1);
        assert!(!summary.all_passed());
        assert_eq!(summary.get("b").map(|r| r.status), Some(CaseStatus::Skipped));
    }

    #[test]
    fn report_rows() -> std::io::Result<()> {
        let mut summary = Summary::default();
        summary.push(result("parameter_test", CaseStatus::Passed, 2));
        summary.push(result("test3", CaseStatus::Skipped, 0));
        summary.push(result("operator_test", CaseStatus::Failed, 1));

        let transcript = Transcript::new();
        summary.write_report(&mut Reporter::transcript(&transcript))?;

        assert_eq!(
            transcript.lines(),
            [
                "Summary".to_owned(),
                format!("{:<40}{:>10} (2 ms)", "parameter_test", "PASSED"),
                format!("{:<40}{:>10}", "test3", "SKIPPED"),
                format!("{:<40}{:>10}", "operator_test", "FAILED"),
                String::new(),
            ]
        );
        Ok(())
    }
}
