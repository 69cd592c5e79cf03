//! All errors related to commit message parsing.

use std::fmt;

use crate::message::CommitMessage;

/// The exact point in the input at which parsing stopped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    offset: usize,
    line: usize,
    column: usize,
}

impl Position {
    pub(crate) const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Byte offset into the input, starting at zero.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line number.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// 1-based column number, counted in characters.
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The error returned when parsing a commit message fails.
///
/// In best-effort mode the error may additionally carry the partially parsed
/// [`CommitMessage`], provided the header had been fully recognized before
/// the failure point; see [`Error::partial`].
#[derive(Clone, Debug, PartialEq)]
pub struct Error<'a> {
    kind: ErrorKind,
    position: Position,
    partial: Option<CommitMessage<'a>>,
}

impl<'a> Error<'a> {
    pub(crate) fn new(kind: ErrorKind, position: Position) -> Self {
        Self {
            kind,
            position,
            partial: None,
        }
    }

    pub(crate) fn with_partial(mut self, partial: Option<CommitMessage<'a>>) -> Self {
        self.partial = partial;
        self
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Where in the input no legal production could continue.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The message recognized before the failure point, if any.
    ///
    /// Only populated in best-effort mode, and only when both the type and
    /// the description had been captured when parsing stopped.
    pub fn partial(&self) -> Option<&CommitMessage<'a>> {
        self.partial.as_ref()
    }

    /// Consume the error, returning the partial message if one was captured.
    pub fn into_partial(self) -> Option<CommitMessage<'a>> {
        self.partial
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}

impl std::error::Error for Error<'_> {}

/// All possible error kinds returned when parsing a commit message.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input buffer is empty.
    EmptyInput,

    /// The commit type is missing, malformed, or not in the active
    /// vocabulary.
    InvalidType,

    /// The scope is empty, unterminated, or contains illegal characters.
    MalformedScope,

    /// The breaking change marker appears anywhere other than immediately
    /// before the colon, or more than once.
    MisplacedExclamation,

    /// No colon follows the type (or scope).
    MissingColon,

    /// The byte after the colon is not a space.
    MissingWhitespaceAfterColon,

    /// The description is empty or begins with whitespace.
    EmptyDescription,

    /// A line in the footer block does not start with a legal footer token
    /// and separator.
    MalformedFooterToken,

    /// The message continues in a way no production allows: content directly
    /// after the header line, a blank line inside the footer block, doubled
    /// blank lines, or a blank separator followed by end of input.
    UnexpectedContinuation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ErrorKind::EmptyInput => "empty commit message",
            ErrorKind::InvalidType => "invalid commit type",
            ErrorKind::MalformedScope => "malformed scope",
            ErrorKind::MisplacedExclamation => "misplaced breaking change marker",
            ErrorKind::MissingColon => "missing colon after type",
            ErrorKind::MissingWhitespaceAfterColon => "missing space after colon",
            ErrorKind::EmptyDescription => "empty commit description",
            ErrorKind::MalformedFooterToken => "malformed footer token",
            ErrorKind::UnexpectedContinuation => "unexpected continuation of the message",
        };
        f.write_str(message)
    }
}
