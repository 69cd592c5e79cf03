//! The single-pass grammar engine.
//!
//! Grammar, in rough BNF:
//!
//! ```text
//! message     ::= header (BLANKLINE body)? (BLANKLINE footers)?
//! header      ::= type scope? "!"? ":" SP description
//! type        ::= word+
//! scope       ::= "(" word+ ")"
//! description ::= rest of line, non-empty, no leading whitespace
//! body        ::= paragraphs of non-footer lines, single blank line between
//! footers     ::= footer (NEWLINE footer)*
//! footer      ::= token (": " | " #") value
//! token       ::= word+ | "BREAKING CHANGE"
//! word        ::= [A-Za-z0-9_-]
//! ```
//!
//! The scan is left to right with no backtracking across a committed
//! production. A production mismatch stops the scan at the offending byte;
//! the failure carries the partial message when the header had already been
//! recognized, so the best-effort controller can decide what to surface.

use crate::error::{ErrorKind, Position};
use crate::message::{CommitMessage, FooterToken, Footers, Scope, Type, BREAKING_PHRASE};
use crate::vocabulary::TypeConfig;

/// How far the engine scans.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ScanMode {
    /// Recognize the whole message.
    Message,

    /// Recognize only the header production, stopping at the first line
    /// terminator.
    HeaderOnly,
}

/// A positioned production mismatch, with whatever was committed before it.
#[derive(Debug)]
pub(crate) struct ScanFailure<'a> {
    pub(crate) kind: ErrorKind,
    pub(crate) position: Position,
    pub(crate) partial: Option<CommitMessage<'a>>,
}

fn fail(kind: ErrorKind, position: Position) -> ScanFailure<'static> {
    ScanFailure {
        kind,
        position,
        partial: None,
    }
}

// <word> ::= [A-Za-z0-9_-]
fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Split a line into footer token and value, if the line opens a legal
/// footer production. Values are whitespace-trimmed and may be empty.
fn split_footer(line: &str) -> Option<(&str, &str)> {
    let token_end = if line.starts_with(BREAKING_PHRASE) {
        BREAKING_PHRASE.len()
    } else {
        line.find(|c: char| !is_word(c)).unwrap_or(line.len())
    };
    if token_end == 0 {
        return None;
    }

    let (token, rest) = line.split_at(token_end);
    if let Some(value) = rest.strip_prefix(": ") {
        Some((token, value.trim()))
    } else if let Some(value) = rest.strip_prefix(" #") {
        Some((token, value.trim()))
    } else {
        None
    }
}

/// Where a footer line stopped being parseable: at the end of its leading
/// token, `BREAKING CHANGE` included. Footer tokens are ASCII, so bytes and
/// columns advance together.
fn footer_mismatch(line_start: Position, line: &str) -> Position {
    let token_end = if line.starts_with(BREAKING_PHRASE) {
        BREAKING_PHRASE.len()
    } else {
        line.find(|c: char| !is_word(c)).unwrap_or(line.len())
    };
    Position::new(
        line_start.offset() + token_end,
        line_start.line(),
        line_start.column() + token_end,
    )
}

pub(crate) fn scan<'a>(
    input: &'a str,
    vocabulary: TypeConfig,
    mode: ScanMode,
) -> Result<CommitMessage<'a>, ScanFailure<'a>> {
    let mut cursor = Cursor::new(input);

    if input.is_empty() {
        return Err(fail(ErrorKind::EmptyInput, cursor.position()));
    }

    // <type>
    let type_position = cursor.position();
    let ty = cursor.take_word();
    if ty.is_empty() || !vocabulary.contains(ty) {
        return Err(fail(ErrorKind::InvalidType, type_position));
    }
    let ty = Type::new_unchecked(ty);

    // <scope>, directly after the type, single line, non-nested
    let mut scope = None;
    if cursor.eat('(') {
        let scope_position = cursor.position();
        let inner = cursor.take_word();
        if inner.is_empty() {
            return Err(fail(ErrorKind::MalformedScope, scope_position));
        }
        if !cursor.eat(')') {
            return Err(fail(ErrorKind::MalformedScope, cursor.position()));
        }
        scope = Some(Scope::new_unchecked(inner));
    }

    // "!", legal only immediately before the colon, at most once
    let mut exclamation = false;
    if cursor.eat('!') {
        exclamation = true;
        match cursor.peek() {
            Some(':') => {}
            Some('!' | '(') => {
                return Err(fail(ErrorKind::MisplacedExclamation, cursor.position()));
            }
            _ => return Err(fail(ErrorKind::MissingColon, cursor.position())),
        }
    }

    if !cursor.eat(':') {
        return Err(fail(ErrorKind::MissingColon, cursor.position()));
    }

    // exactly one space, then a non-empty description with no leading
    // whitespace
    match cursor.peek() {
        None | Some('\r' | '\n') => {
            return Err(fail(ErrorKind::EmptyDescription, cursor.position()));
        }
        Some(' ') => {
            cursor.bump();
        }
        Some(_) => {
            return Err(fail(
                ErrorKind::MissingWhitespaceAfterColon,
                cursor.position(),
            ));
        }
    }
    match cursor.peek() {
        None => return Err(fail(ErrorKind::EmptyDescription, cursor.position())),
        Some(c) if c.is_whitespace() => {
            return Err(fail(ErrorKind::EmptyDescription, cursor.position()));
        }
        Some(_) => {}
    }
    let description = cursor.take_line();

    // From here on the header is committed; failures carry a partial.
    let headered = |kind: ErrorKind,
                    position: Position,
                    body: Option<&'a str>,
                    footers: Footers<'a>| ScanFailure {
        kind,
        position,
        partial: Some(CommitMessage::new(
            ty,
            scope,
            description,
            exclamation,
            body,
            footers,
            vocabulary,
        )),
    };

    if mode == ScanMode::HeaderOnly || cursor.at_end() {
        return Ok(CommitMessage::new(
            ty,
            scope,
            description,
            exclamation,
            None,
            Footers::new(),
            vocabulary,
        ));
    }

    // exactly one blank line separates the header from the body or footers
    let line_start = cursor.position();
    let line = cursor.take_line();
    if !line.is_empty() {
        return Err(headered(
            ErrorKind::UnexpectedContinuation,
            line_start,
            None,
            Footers::new(),
        ));
    }

    let mut body_span: Option<(usize, usize)> = None;
    let mut footers = Footers::new();
    let mut in_footers = false;
    // a separator was just consumed, so a block line must follow
    let mut expect_block = true;

    loop {
        let body = |span: Option<(usize, usize)>| span.map(|(start, end)| &input[start..end]);

        if cursor.at_end() {
            if expect_block {
                return Err(headered(
                    ErrorKind::UnexpectedContinuation,
                    cursor.position(),
                    body(body_span),
                    footers,
                ));
            }
            break;
        }

        let line_start = cursor.position();
        if !in_footers && split_footer(cursor.current_line()).is_some() {
            in_footers = true;
        }

        let line = cursor.take_line();
        if in_footers {
            if line.is_empty() {
                return Err(headered(
                    ErrorKind::UnexpectedContinuation,
                    line_start,
                    body(body_span),
                    footers,
                ));
            }
            match split_footer(line) {
                Some((token, value)) => {
                    footers.push(FooterToken::new_unchecked(token), value);
                }
                None => {
                    return Err(headered(
                        ErrorKind::MalformedFooterToken,
                        footer_mismatch(line_start, line),
                        body(body_span),
                        footers,
                    ));
                }
            }
            expect_block = false;
        } else if line.is_empty() {
            if expect_block {
                return Err(headered(
                    ErrorKind::UnexpectedContinuation,
                    line_start,
                    body(body_span),
                    footers,
                ));
            }
            expect_block = true;
        } else {
            let start = line_start.offset();
            let end = start + line.len();
            body_span = Some(match body_span {
                None => (start, end),
                Some((body_start, _)) => (body_start, end),
            });
            expect_block = false;
        }
    }

    let body = body_span.map(|(start, end)| &input[start..end]);
    Ok(CommitMessage::new(
        ty,
        scope,
        description,
        exclamation,
        body,
        footers,
        vocabulary,
    ))
}

/// Byte cursor with 1-based line and column bookkeeping.
struct Cursor<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn at_end(&self) -> bool {
        self.offset == self.input.len()
    }

    fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn take_word(&mut self) -> &'a str {
        let start = self.offset;
        while self.peek().is_some_and(is_word) {
            self.bump();
        }
        &self.input[start..self.offset]
    }

    /// The current line, without its terminator, not consumed.
    fn current_line(&self) -> &'a str {
        let rest = self.rest();
        let line = match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        };
        line.strip_suffix('\r').unwrap_or(line)
    }

    /// Consume the current line and its terminator; the returned slice has
    /// neither the terminator nor a trailing carriage return.
    fn take_line(&mut self) -> &'a str {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
        let line = &self.input[start..self.offset];
        self.eat('\n');
        line.strip_suffix('\r').unwrap_or(line)
    }
}
