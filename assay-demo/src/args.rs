use assay_core::{ColorMode, RunOptions, Severity};
use clap::Parser;

use crate::events::TraceEvent;

const SHORT_DESCRIPTION: &str = "Run the assay demonstration suite";

const LONG_DESCRIPTION: &str = r"
Runs a small suite of in-process test cases through the assay harness: fixtures with
setup and teardown, parameterized iterations, soft and hard assertions, and a skipped case.

The process exits successfully unless the run itself aborts. Pass --strict to also fail
when any case failed.
";

/// When to colorize report lines on standard output.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub(crate) enum ColorChoice {
    /// Colorize when standard output is a terminal.
    #[default]
    Auto,
    /// Always colorize.
    Always,
    /// Never colorize.
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Parsed command-line arguments.
#[derive(Parser, Debug)]
#[clap(name = "assay-demo",
       version,
       about = SHORT_DESCRIPTION,
       long_about = LONG_DESCRIPTION)]
pub(crate) struct CommandLineArgs {
    /// Don't print the summary block at the end of the run.
    #[clap(long = "no-summary")]
    pub(crate) no_summary: bool,

    /// When to colorize report lines.
    #[clap(long = "color", value_enum, default_value_t, env = "ASSAY_COLOR")]
    pub(crate) color: ColorChoice,

    /// Minimum severity threshold every case runs at (error, warning, info).
    #[clap(long = "severity", value_name = "SEVERITY", default_value_t = Severity::Error)]
    pub(crate) severity: Severity,

    /// Exit with a failure status if any case failed.
    #[clap(long = "strict")]
    pub(crate) strict: bool,

    /// Enable debug logging for the given categories.
    #[clap(long = "log-enable", value_name = "CATEGORY", value_enum)]
    pub(crate) enabled_log_events: Vec<TraceEvent>,
}

impl CommandLineArgs {
    /// Returns the run options selected on the command line.
    pub(crate) fn run_options(&self) -> RunOptions {
        RunOptions::default()
            .with_summary(!self.no_summary)
            .with_color(self.color.into())
            .with_severity_floor(self.severity)
    }
}
