//! Parser configuration and the best-effort recovery policy.

use std::fmt;

use crate::error::Error;
use crate::message::CommitMessage;
use crate::scanner::{self, ScanMode};
use crate::vocabulary::TypeConfig;

/// A destination for parse diagnostics.
///
/// The sink fires once per failed parse, from the thread calling
/// [`Parser::parse`]. See [`log_facade`] for a sink forwarding into the
/// [`log`] crate.
pub type LogSink = Box<dyn Fn(log::Level, &str) + Send + Sync>;

/// A [`LogSink`] that forwards diagnostics to the [`log`] facade.
pub fn log_facade() -> LogSink {
    Box::new(|level, message| log::log!(level, "{message}"))
}

/// A configured commit message parser.
///
/// Configuration is applied through owning setters and is frozen once
/// parsing starts; a parser may be reused for any number of independent
/// [`parse`](Parser::parse) calls.
///
/// Defaults: [`TypeConfig::Minimal`] vocabulary, strict mode, full-message
/// recognition, no log sink.
pub struct Parser {
    types: TypeConfig,
    best_effort: bool,
    header_only: bool,
    log: Option<LogSink>,
}

impl Parser {
    /// A parser with the default configuration.
    pub fn new() -> Self {
        Self {
            types: TypeConfig::default(),
            best_effort: false,
            header_only: false,
            log: None,
        }
    }

    /// Select the vocabulary of legal type tokens.
    pub fn with_types(mut self, types: TypeConfig) -> Self {
        self.types = types;
        self
    }

    /// Enable or disable best-effort recovery.
    ///
    /// When enabled, a failed parse whose header had already been recognized
    /// returns the partial message alongside the error; see
    /// [`Error::partial`].
    pub fn with_best_effort(mut self, enabled: bool) -> Self {
        self.best_effort = enabled;
        self
    }

    /// Recognize only the header line, ignoring everything after the first
    /// line terminator.
    pub fn header_only(mut self, enabled: bool) -> Self {
        self.header_only = enabled;
        self
    }

    /// Install a sink receiving a diagnostic for every failed parse.
    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.log = Some(sink);
        self
    }

    /// The active vocabulary.
    pub fn types(&self) -> TypeConfig {
        self.types
    }

    /// Whether best-effort recovery is enabled.
    pub fn best_effort(&self) -> bool {
        self.best_effort
    }

    /// Parse one commit message.
    ///
    /// # Errors
    ///
    /// Returns a positioned [`Error`] when the input does not conform to the
    /// grammar. In best-effort mode the error carries the partial
    /// [`CommitMessage`] if the header had been recognized before the
    /// failure point.
    pub fn parse<'a>(&self, input: &'a str) -> Result<CommitMessage<'a>, Error<'a>> {
        let mode = if self.header_only {
            ScanMode::HeaderOnly
        } else {
            ScanMode::Message
        };

        match scanner::scan(input, self.types, mode) {
            Ok(message) => Ok(message),
            Err(failure) => {
                let partial = if self.best_effort {
                    failure.partial
                } else {
                    None
                };
                let error = Error::new(failure.kind, failure.position).with_partial(partial);
                if let Some(sink) = &self.log {
                    if error.partial().is_some() {
                        sink(
                            log::Level::Warn,
                            &format!("recovered partial commit message: {error}"),
                        );
                    } else {
                        sink(log::Level::Error, &format!("commit message rejected: {error}"));
                    }
                }
                Err(error)
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("types", &self.types)
            .field("best_effort", &self.best_effort)
            .field("header_only", &self.header_only)
            .field("log", &self.log.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;
    use std::sync::{Arc, Mutex};

    #[test]
    fn strict_mode_surfaces_only_the_error() {
        let err = Parser::new().parse("feat:").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyDescription);
        assert!(err.partial().is_none());
    }

    #[test]
    fn strict_mode_drops_the_partial_even_when_captured() {
        let err = Parser::new().parse("fix: x\nno blank line").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedContinuation);
        assert!(err.partial().is_none());
    }

    #[test]
    fn best_effort_returns_partial_after_committed_header() {
        let input = "fix: correct typos\n\nbody text\n\n";
        let err = Parser::new().with_best_effort(true).parse(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedContinuation);
        assert_eq!(err.position().offset(), input.len());

        let partial = err.partial().unwrap();
        assert_eq!(partial.type_(), "fix");
        assert_eq!(partial.description(), "correct typos");
        assert!(partial.is_well_formed());
    }

    #[test]
    fn best_effort_has_nothing_before_the_header_commits() {
        let err = Parser::new().with_best_effort(true).parse("feat:").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyDescription);
        assert!(err.partial().is_none());
    }

    #[test]
    fn empty_input_fails_in_both_modes() {
        let err = Parser::new().parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);

        let err = Parser::new().with_best_effort(true).parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
        assert!(err.partial().is_none());
    }

    #[test]
    fn default_vocabulary_is_minimal() {
        let parser = Parser::new();
        assert!(parser.parse("feat: x").is_ok());
        assert_eq!(
            parser.parse("docs: x").unwrap_err().kind(),
            ErrorKind::InvalidType
        );
    }

    #[test]
    fn parser_is_reusable() {
        let parser = Parser::new().with_types(TypeConfig::Conventional);
        for input in ["feat: one", "fix: two", "docs: three"] {
            assert!(parser.parse(input).is_ok());
        }
    }

    #[test]
    fn header_only_mode() {
        let parser = Parser::new().header_only(true);
        let message = parser.parse("fix: short\nthis would fail full parsing").unwrap();
        assert_eq!(message.description(), "short");
        assert_eq!(message.body(), None);
    }

    #[test]
    fn log_sink_fires_on_failure() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let parser = Parser::new()
            .with_best_effort(true)
            .with_log_sink(Box::new(move |level, message| {
                sink_seen.lock().unwrap().push((level, message.to_owned()));
            }));

        parser.parse("fix: ok message").unwrap();
        assert!(seen.lock().unwrap().is_empty());

        let _ = parser.parse("fix: x\nno blank line").unwrap_err();
        let entries = seen.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, log::Level::Warn);
        assert!(entries[0].1.contains("unexpected continuation"));
    }

    #[test]
    fn log_sink_reports_rejections_as_errors() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let parser = Parser::new().with_log_sink(Box::new(move |level, message| {
            sink_seen.lock().unwrap().push((level, message.to_owned()));
        }));

        let _ = parser.parse("nope").unwrap_err();
        let entries = seen.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, log::Level::Error);
        assert!(entries[0].1.contains("invalid commit type"));
    }
}
