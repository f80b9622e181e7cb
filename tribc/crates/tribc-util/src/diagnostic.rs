//! Diagnostic reporting infrastructure.
//!
//! Every compilation phase reports problems through a [`Handler`]. A
//! diagnostic is printed to stderr the moment it is raised and recorded so
//! that tests can inspect it and the driver can ask whether anything went
//! wrong. Diagnostics are never propagated between phases as values.

use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error that makes the compilation fail.
    Error,
    /// A warning that does not prevent compilation.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "Error"),
            Level::Warning => write!(f, "Warning"),
        }
    }
}

/// A single diagnostic message.
///
/// The `line` is present for lexical and parse diagnostics, which always
/// know where they are in the source; lowering diagnostics carry no
/// location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub line: Option<u32>,
    /// Where in the line the problem was found, e.g. `'x'` or `end`.
    /// Parse diagnostics set this; lexical and lowering ones do not.
    pub location: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, &self.location) {
            (Some(line), Some(location)) => write!(
                f,
                "[line {}] {} at {}: {}",
                line, self.level, location, self.message
            ),
            (Some(line), None) => write!(f, "[line {}] {}: {}", line, self.level, self.message),
            _ => write!(f, "{}: {}", self.level, self.message),
        }
    }
}

/// Collects diagnostics for one compilation.
///
/// Each phase borrows the handler mutably for its lifetime; the pipeline
/// is strictly sequential so the borrows never overlap.
///
/// # Example
///
/// ```
/// use tribc_util::Handler;
///
/// let mut handler = Handler::new();
/// handler.error(3, "Unexpected character.");
/// assert!(handler.has_errors());
/// assert_eq!(handler.error_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
    errors: usize,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports an error at a source line.
    pub fn error(&mut self, line: u32, message: impl Into<String>) {
        self.emit(Diagnostic {
            level: Level::Error,
            line: Some(line),
            location: None,
            message: message.into(),
        });
    }

    /// Reports an error at a location within a line, e.g. a token lexeme.
    pub fn error_at(
        &mut self,
        line: u32,
        location: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.emit(Diagnostic {
            level: Level::Error,
            line: Some(line),
            location: Some(location.into()),
            message: message.into(),
        });
    }

    /// Reports an error with no source location (lowering and later).
    pub fn error_without_line(&mut self, message: impl Into<String>) {
        self.emit(Diagnostic {
            level: Level::Error,
            line: None,
            location: None,
            message: message.into(),
        });
    }

    /// Records a diagnostic and prints it to stderr.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.level == Level::Error {
            self.errors += 1;
        }
        eprintln!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// True once any error has been reported.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// All diagnostics reported so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
