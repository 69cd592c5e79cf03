//! The parsed commit message and its components.

use std::fmt;
use std::ops::Deref;

use crate::bump::{self, VersionBump};
use crate::vocabulary::TypeConfig;

pub(crate) const BREAKING_PHRASE: &str = "BREAKING CHANGE";
pub(crate) const BREAKING_KEY: &str = "breaking-change";

/// A parsed commit message.
///
/// Instances are produced by [`Parser::parse`] and borrow from the input
/// buffer. A message returned on success is always well-formed; a partial
/// message recovered in best-effort mode has at least its type and
/// description populated.
///
/// [`Parser::parse`]: crate::Parser::parse
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CommitMessage<'a> {
    ty: Type<'a>,
    scope: Option<Scope<'a>>,
    description: &'a str,
    exclamation: bool,
    body: Option<&'a str>,
    footers: Footers<'a>,
    #[cfg_attr(feature = "serde", serde(skip))]
    vocabulary: TypeConfig,
}

impl<'a> CommitMessage<'a> {
    pub(crate) fn new(
        ty: Type<'a>,
        scope: Option<Scope<'a>>,
        description: &'a str,
        exclamation: bool,
        body: Option<&'a str>,
        footers: Footers<'a>,
        vocabulary: TypeConfig,
    ) -> Self {
        Self {
            ty,
            scope,
            description,
            exclamation,
            body,
            footers,
            vocabulary,
        }
    }

    /// Parse a commit message with the default configuration: the
    /// [`TypeConfig::Minimal`] vocabulary, strict mode.
    ///
    /// # Errors
    ///
    /// Returns a positioned [`Error`] if the message does not conform to the
    /// grammar.
    ///
    /// [`Error`]: crate::Error
    pub fn parse(input: &'a str) -> Result<Self, crate::Error<'a>> {
        crate::Parser::new().parse(input)
    }

    /// The type of the commit.
    pub fn type_(&self) -> Type<'a> {
        self.ty
    }

    /// The optional scope of the commit.
    pub fn scope(&self) -> Option<Scope<'a>> {
        self.scope
    }

    /// The commit description.
    pub fn description(&self) -> &'a str {
        self.description
    }

    /// Whether the header carried a `!` before the colon.
    pub fn exclamation(&self) -> bool {
        self.exclamation
    }

    /// The commit body, containing a more detailed explanation of the commit
    /// changes.
    ///
    /// The body is a slice of the input: a multi-line body keeps its
    /// original line terminators, `\r\n` included.
    pub fn body(&self) -> Option<&'a str> {
        self.body
    }

    /// The footers of the commit, in input order.
    pub fn footers(&self) -> &Footers<'a> {
        &self.footers
    }

    /// The vocabulary this message was parsed under.
    pub fn vocabulary(&self) -> TypeConfig {
        self.vocabulary
    }

    /// Whether both the type and the description are non-empty.
    ///
    /// Holds for every message the parser returns, including best-effort
    /// partials.
    pub fn is_well_formed(&self) -> bool {
        !self.ty.as_str().is_empty() && !self.description.is_empty()
    }

    /// A flag to signal that the commit contains breaking changes.
    ///
    /// This flag is set either when the commit has an exclamation mark after
    /// the message type and scope, e.g.:
    /// ```text
    /// feat(scope)!: this is a breaking change
    /// ```
    ///
    /// Or when a `BREAKING CHANGE:` / `BREAKING-CHANGE:` footer is defined:
    /// ```text
    /// feat: my commit description
    ///
    /// BREAKING CHANGE: this is a breaking change
    /// ```
    pub fn breaking(&self) -> bool {
        self.exclamation || self.footers.breaking()
    }

    /// Whether this commit introduces a feature.
    ///
    /// Under the [`TypeConfig::Falco`] vocabulary the `new` type counts as
    /// feature-introducing as well.
    pub fn is_feat(&self) -> bool {
        self.ty == Type::FEAT || (self.vocabulary == TypeConfig::Falco && self.ty == "new")
    }

    /// Whether this commit patches a bug.
    pub fn is_fix(&self) -> bool {
        self.ty == Type::FIX
    }

    /// Whether the message has at least one footer.
    pub fn has_footers(&self) -> bool {
        !self.footers.is_empty()
    }

    /// The semantic-version impact of this commit under the default
    /// strategy: `Major` if breaking, else `Minor` for features, else
    /// `Patch` for fixes, else `Unknown`.
    pub fn version_bump(&self) -> VersionBump {
        bump::default_strategy(self)
    }

    /// The semantic-version impact under a caller-supplied strategy.
    pub fn version_bump_with<F>(&self, strategy: F) -> VersionBump
    where
        F: FnOnce(&Self) -> VersionBump,
    {
        strategy(self)
    }
}

impl fmt::Display for CommitMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_().as_str())?;

        if let Some(scope) = &self.scope() {
            f.write_fmt(format_args!("({scope})"))?;
        }

        if self.exclamation() {
            f.write_str("!")?;
        }

        f.write_fmt(format_args!(": {}", &self.description()))?;

        if let Some(body) = &self.body() {
            f.write_fmt(format_args!("\n\n{body}"))?;
        }

        let mut first = true;
        for entry in self.footers().iter() {
            for value in entry.values() {
                let lead = if first { "\n\n" } else { "\n" };
                first = false;
                write!(f, "{lead}{}: {value}", entry.token())?;
            }
        }

        Ok(())
    }
}

/// The ordered footers of a commit message.
///
/// Footers form an ordered mapping from token to values: repeated tokens
/// accumulate under one entry, preserving both distinct-token order and
/// per-token value order.
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Footers<'a> {
    entries: Vec<FooterEntry<'a>>,
}

impl<'a> Footers<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, token: FooterToken<'a>, value: &'a str) {
        match self
            .entries
            .iter_mut()
            .find(|entry| canonical_eq(entry.token.as_str(), token.as_str()))
        {
            Some(entry) => entry.values.push(value),
            None => self.entries.push(FooterEntry {
                token,
                values: vec![value],
            }),
        }
    }

    /// The values recorded under `token`, in input order.
    ///
    /// Lookup is case-insensitive and folds spaces to hyphens, so
    /// `get("breaking-change")` finds both `BREAKING CHANGE` and
    /// `BREAKING-CHANGE` footers.
    pub fn get(&self, token: &str) -> Option<&[&'a str]> {
        self.entries
            .iter()
            .find(|entry| canonical_eq(entry.token.as_str(), token))
            .map(|entry| entry.values.as_slice())
    }

    /// Iterate over the entries in distinct-token input order.
    pub fn iter(&self) -> impl Iterator<Item = &FooterEntry<'a>> {
        self.entries.iter()
    }

    /// The number of distinct footer tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the message carried no footers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any token canonicalizes to `breaking-change`.
    pub fn breaking(&self) -> bool {
        self.entries.iter().any(|entry| entry.token.breaking())
    }
}

/// One footer token together with every value recorded under it.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FooterEntry<'a> {
    token: FooterToken<'a>,
    values: Vec<&'a str>,
}

impl<'a> FooterEntry<'a> {
    /// The token of the footer, as written in the input.
    pub fn token(&self) -> FooterToken<'a> {
        self.token
    }

    /// The values accumulated under this token, in input order.
    pub fn values(&self) -> &[&'a str] {
        &self.values
    }
}

/// Compare footer tokens by canonical key: ASCII-lowercased, with spaces
/// folded to hyphens. Equates the two breaking-change spellings.
pub(crate) fn canonical_eq(a: &str, b: &str) -> bool {
    fn fold(byte: u8) -> u8 {
        if byte == b' ' {
            b'-'
        } else {
            byte.to_ascii_lowercase()
        }
    }

    a.len() == b.len()
        && a.bytes()
            .zip(b.bytes())
            .all(|(x, y)| fold(x) == fold(y))
}

macro_rules! components {
    ($($ty:ident),+) => (
        $(
            /// A component of the commit message header.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $ty<'a>(unicase::UniCase<&'a str>);

            impl<'a> $ty<'a> {
                /// Wrap a string slice without validating it against the
                /// grammar.
                pub const fn new_unchecked(value: &'a str) -> Self {
                    $ty(unicase::UniCase::unicode(value))
                }

                /// Access the `str` representation.
                pub fn as_str(&self) -> &'a str {
                    self.0.into_inner()
                }
            }

            impl Deref for $ty<'_> {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    self.as_str()
                }
            }

            impl PartialEq<&'_ str> for $ty<'_> {
                fn eq(&self, other: &&str) -> bool {
                    *self == $ty::new_unchecked(other)
                }
            }

            impl fmt::Display for $ty<'_> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            #[cfg(feature = "serde")]
            impl serde::Serialize for $ty<'_> {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.serialize_str(self)
                }
            }
        )+
    )
}

components![Type, Scope, FooterToken];

/// Well-known commit types.
impl Type<'static> {
    /// Commit type when introducing new features (correlates with `minor` in semver).
    pub const FEAT: Type<'static> = Type::new_unchecked("feat");
    /// Commit type when patching a bug (correlates with `patch` in semver).
    pub const FIX: Type<'static> = Type::new_unchecked("fix");
    /// Possible commit type when reverting changes.
    pub const REVERT: Type<'static> = Type::new_unchecked("revert");
    /// Possible commit type for changing documentation.
    pub const DOCS: Type<'static> = Type::new_unchecked("docs");
    /// Possible commit type for changing code style.
    pub const STYLE: Type<'static> = Type::new_unchecked("style");
    /// Possible commit type for refactoring code structure.
    pub const REFACTOR: Type<'static> = Type::new_unchecked("refactor");
    /// Possible commit type for performance optimizations.
    pub const PERF: Type<'static> = Type::new_unchecked("perf");
    /// Possible commit type for addressing tests.
    pub const TEST: Type<'static> = Type::new_unchecked("test");
    /// Possible commit type for other things.
    pub const CHORE: Type<'static> = Type::new_unchecked("chore");
    /// Falco commit type for new functionality, feature-equivalent under
    /// [`TypeConfig::Falco`].
    pub const NEW: Type<'static> = Type::new_unchecked("new");
}

impl FooterToken<'_> {
    /// Whether this token canonicalizes to `breaking-change`.
    pub fn breaking(&self) -> bool {
        canonical_eq(self.as_str(), BREAKING_KEY)
    }
}
