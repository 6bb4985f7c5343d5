//! Report sinks.

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

use colored::{ColoredString, Colorize};

use crate::error::Error;

/// Semantic level of a report line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Run start/end banners.
    Banner,
    /// Case start lines.
    Info,
    /// Iteration markers and user log lines.
    Detail,
    /// Passing assertions and passing iterations.
    Pass,
    /// Failing hard assertions and failing iterations.
    Fail,
    /// Skipped cases, failing soft assertions and notes.
    Warn,
    /// Line emitted after each case.
    Separator,
    /// Header of the end-of-run summary.
    SummaryHeader,
}

impl Level {
    fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::Banner | Self::Separator => text.magenta(),
            Self::Info => text.cyan(),
            Self::Detail => text.blue(),
            Self::Pass => text.green(),
            Self::Fail => text.red(),
            Self::Warn => text.yellow(),
            Self::SummaryHeader => text.magenta().bold(),
        }
    }
}

/// A line-oriented report sink.
///
/// Only a reporter created for an interactive terminal should be colored; files and
/// transcripts always receive plain text.
pub struct Reporter {
    sink: Box<dyn Write>,
    color: bool,
}

impl Reporter {
    /// Creates a reporter over an arbitrary writer.
    pub fn new(writer: impl Write + 'static, color: bool) -> Self {
        Self {
            sink: Box::new(writer),
            color,
        }
    }

    /// Creates a reporter writing to standard output.
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }

    /// Opens (or creates) `path` for appending and reports to it, uncolored.
    pub fn append_to_file(path: &Path) -> Result<Self, Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::OutputTarget {
                path: path.to_owned(),
                source,
            })?;

        Ok(Self::new(BufWriter::new(file), false))
    }

    /// Creates an uncolored reporter appending to `transcript`.
    pub fn transcript(transcript: &Transcript) -> Self {
        Self::new(transcript.clone(), false)
    }

    /// Returns whether lines are colorized.
    pub const fn is_colored(&self) -> bool {
        self.color
    }

    /// Writes one line.
    pub fn line(&mut self, level: Level, text: &str) -> std::io::Result<()> {
        if self.color {
            writeln!(self.sink, "{}", level.paint(text))
        } else {
            writeln!(self.sink, "{text}")
        }
    }

    /// Writes an empty line.
    pub fn blank(&mut self) -> std::io::Result<()> {
        writeln!(self.sink)
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.sink.flush()
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// Shared in-memory sink. Clones append to the same buffer.
#[derive(Clone, Debug, Default)]
pub struct Transcript(Rc<RefCell<Vec<u8>>>);

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Returns everything written so far, split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for Transcript {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn transcript_collects_plain_lines() -> std::io::Result<()> {
        let transcript = Transcript::new();
        let mut reporter = Reporter::transcript(&transcript);

        reporter.line(Level::Pass, "one")?;
        reporter.blank()?;
        reporter.line(Level::Fail, "two")?;

        assert!(!reporter.is_colored());
        assert_eq!(transcript.contents(), "one\n\ntwo\n");
        assert_eq!(transcript.lines(), ["one", "", "two"]);
        Ok(())
    }

    #[test]
    fn file_reporter_appends() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("report.txt");

        for text in ["first", "second"] {
            let mut reporter = Reporter::append_to_file(&path)?;
            reporter.line(Level::Info, text)?;
            reporter.flush()?;
        }

        assert_eq!(std::fs::read_to_string(&path)?, "first\nsecond\n");
        Ok(())
    }

    #[test]
    fn unopenable_file_is_an_output_target_error() {
        let result = Reporter::append_to_file(Path::new("/nonexistent-dir/for/sure/report.txt"));
        assert!(matches!(result, Err(Error::OutputTarget { .. })));
    }
}
