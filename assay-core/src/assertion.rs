//! Assertion evaluation.
//!
//! An [`Assertion`] describes one check: which family it belongs to, which severity a case
//! must opt into before the check is active, which predicate value triggers it, and whether
//! a triggered check aborts the enclosing test function. [`Assertion::decide`] is the whole
//! engine; reporting the decision is left to [`crate::CaseContext::evaluate`].

use std::fmt::Display;

/// Severity threshold of a case, and required severity of an assertion family.
///
/// Ordered `Error < Warning < Info`. A case's threshold is also its report verbosity.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    /// Only hard assertions are active; only failures are reported.
    #[default]
    Error,
    /// Soft assertions (`likely`/`unlikely`) become active.
    Warning,
    /// Passing assertions are reported as well.
    Info,
}

/// Source location of an assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    file: &'static str,
    function: &'static str,
    line: u32,
}

impl Location {
    /// Creates a location. Normally produced by [`crate::location!`].
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }

    /// Returns the line number.
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}:{}", self.file, self.function, self.line)
    }
}

/// Static description of a single check.
#[derive(Clone, Copy, Debug)]
pub struct Assertion<'a> {
    /// Family name used in report lines (`assert`, `likely`, ...).
    pub family: &'static str,
    /// Stringified predicate.
    pub expression: &'a str,
    /// Where the check was written.
    pub location: Location,
    /// Minimum case threshold at which the check is active.
    pub required: Severity,
    /// Predicate value that counts as a failure.
    pub trigger: bool,
    /// Whether a failure ends the enclosing test function.
    pub aborts: bool,
}

/// What the engine decided for one evaluated check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The case threshold is below the family's required severity. Nothing happens.
    Inactive,
    /// The check held.
    Passed {
        /// Whether a pass line should be reported.
        reported: bool,
    },
    /// The check triggered and a failure line should be reported.
    Failed {
        /// Whether the enclosing test function must return.
        abort: bool,
    },
}

impl<'a> Assertion<'a> {
    /// A hard check that fails when the predicate is false.
    pub const fn hard(family: &'static str, expression: &'a str, location: Location) -> Self {
        Self {
            family,
            expression,
            location,
            required: Severity::Error,
            trigger: false,
            aborts: true,
        }
    }

    /// A hard check that fails when the predicate is true.
    pub const fn hard_negated(
        family: &'static str,
        expression: &'a str,
        location: Location,
    ) -> Self {
        Self {
            trigger: true,
            ..Self::hard(family, expression, location)
        }
    }

    /// A soft check that warns when the predicate is false.
    pub const fn likely(expression: &'a str, location: Location) -> Self {
        Self {
            family: "likely",
            expression,
            location,
            required: Severity::Warning,
            trigger: false,
            aborts: false,
        }
    }

    /// A soft check that warns when the predicate is true.
    pub const fn unlikely(expression: &'a str, location: Location) -> Self {
        Self {
            family: "unlikely",
            trigger: true,
            ..Self::likely(expression, location)
        }
    }

    /// Decides the fate of this check for a case running at `threshold`.
    ///
    /// Inactive checks are skipped outright, whatever the predicate's value.
    pub fn decide(&self, threshold: Severity, predicate: bool) -> Decision {
        if threshold < self.required {
            Decision::Inactive
        } else if predicate == self.trigger {
            Decision::Failed { abort: self.aborts }
        } else {
            Decision::Passed {
                reported: threshold >= Severity::Info,
            }
        }
    }
}

/// Compares the first `n` elements of two slices.
///
/// A slice shorter than `n` never compares equal.
pub fn prefix_eq<T: PartialEq>(left: &[T], right: &[T], n: usize) -> bool {
    match (left.get(..n), right.get(..n)) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: Location = Location::new("assertion.rs", "tests", 1);

    #[test]
    fn severity_order() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        assert_eq!(Severity::default(), Severity::Error);
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("info".parse::<Severity>().ok(), Some(Severity::Info));
        assert_eq!("WARNING".parse::<Severity>().ok(), Some(Severity::Warning));
        assert!("loud".parse::<Severity>().is_err());
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn hard_checks_are_always_active() {
        let check = Assertion::hard("assert", "x", HERE);
        assert_eq!(
            check.decide(Severity::Error, false),
            Decision::Failed { abort: true }
        );
        assert_eq!(
            check.decide(Severity::Error, true),
            Decision::Passed { reported: false }
        );
        assert_eq!(
            check.decide(Severity::Info, true),
            Decision::Passed { reported: true }
        );
    }

    #[test]
    fn negated_hard_check_triggers_on_true() {
        let check = Assertion::hard_negated("assert", "x", HERE);
        assert_eq!(
            check.decide(Severity::Error, true),
            Decision::Failed { abort: true }
        );
        assert_eq!(
            check.decide(Severity::Warning, false),
            Decision::Passed { reported: false }
        );
    }

    #[test]
    fn soft_checks_are_gated_by_threshold() {
        let likely = Assertion::likely("x", HERE);
        assert_eq!(likely.decide(Severity::Error, false), Decision::Inactive);
        assert_eq!(likely.decide(Severity::Error, true), Decision::Inactive);
        assert_eq!(
            likely.decide(Severity::Warning, false),
            Decision::Failed { abort: false }
        );
        assert_eq!(
            likely.decide(Severity::Info, true),
            Decision::Passed { reported: true }
        );

        let unlikely = Assertion::unlikely("x", HERE);
        assert_eq!(unlikely.decide(Severity::Error, true), Decision::Inactive);
        assert_eq!(
            unlikely.decide(Severity::Warning, true),
            Decision::Failed { abort: false }
        );
        assert_eq!(
            unlikely.decide(Severity::Warning, false),
            Decision::Passed { reported: false }
        );
    }

    #[test]
    fn prefix_comparison() {
        assert!(prefix_eq(&[1, 2, 3], &[1, 2, 3], 3));
        assert!(!prefix_eq(&[1, 2, 3], &[10, 2, 3], 3));
        assert!(prefix_eq(&[1, 2, 3], &[1, 2, 4], 2));
        assert!(!prefix_eq(&[1, 2], &[1, 2], 3));
        assert!(prefix_eq::<u8>(&[], &[], 0));
    }

    #[test]
    fn location_display() {
        assert_eq!(
            Location::new("src/demo.rs", "assay_demo::demo", 42).to_string(),
            "src/demo.rs/assay_demo::demo:42"
        );
    }
}
