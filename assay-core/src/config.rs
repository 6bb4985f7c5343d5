//! Run-wide configuration.

use std::io::IsTerminal;

use crate::assertion::Severity;

/// When report lines written to standard output are colorized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colorize only when standard output is a terminal.
    #[default]
    Auto,
    /// Always colorize standard output.
    Always,
    /// Never colorize.
    Never,
}

/// Options that apply to a whole run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Whether to emit the summary block after all cases have run.
    pub summary: bool,
    /// Colorization of the default report sink.
    pub color: ColorMode,
    /// Lowest threshold any case runs at; a case's own severity is raised to it.
    pub severity_floor: Severity,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            summary: true,
            color: ColorMode::default(),
            severity_floor: Severity::Error,
        }
    }
}

impl RunOptions {
    /// Enables or disables the summary block.
    #[must_use]
    pub const fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// Sets the color mode.
    #[must_use]
    pub const fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Sets the severity floor.
    #[must_use]
    pub const fn with_severity_floor(mut self, floor: Severity) -> Self {
        self.severity_floor = floor;
        self
    }

    /// Returns whether standard output should be colorized.
    pub fn colors_stdout(&self) -> bool {
        match self.color {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Returns the threshold a case configured with `severity` runs at.
    pub fn effective_threshold(&self, severity: Severity) -> Severity {
        severity.max(self.severity_floor)
    }
}
