//! Selectable vocabularies of legal commit types.

/// The `Minimal` vocabulary.
pub const MINIMAL_TYPES: &[&str] = &["feat", "fix"];

/// The `Conventional` vocabulary, as popularized by the Angular convention.
pub const CONVENTIONAL_TYPES: &[&str] = &[
    "build", "ci", "chore", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

/// The `Falco` vocabulary, which swaps `refactor`/`style` for `new`,
/// `update`, and `rule`.
pub const FALCO_TYPES: &[&str] = &[
    "build", "ci", "chore", "docs", "feat", "fix", "perf", "new", "revert", "update", "test",
    "rule",
];

/// The vocabulary of type tokens a parser accepts in the header.
///
/// Membership is checked case-insensitively. The parsed [`CommitMessage`]
/// records which vocabulary was active, so classification predicates such as
/// [`CommitMessage::is_feat`] can apply vocabulary-specific rules.
///
/// [`CommitMessage`]: crate::CommitMessage
/// [`CommitMessage::is_feat`]: crate::CommitMessage::is_feat
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TypeConfig {
    /// Only `feat` and `fix`.
    #[default]
    Minimal,

    /// The Angular-style conventional commit types.
    Conventional,

    /// The types used by the Falco project.
    Falco,

    /// Any non-empty run of word characters.
    FreeForm,
}

impl TypeConfig {
    /// Whether `token` is a legal type under this vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        match self.types() {
            Some(types) => types.iter().any(|t| t.eq_ignore_ascii_case(token)),
            None => !token.is_empty(),
        }
    }

    /// The tokens of this vocabulary, or `None` for [`TypeConfig::FreeForm`].
    pub fn types(&self) -> Option<&'static [&'static str]> {
        match self {
            TypeConfig::Minimal => Some(MINIMAL_TYPES),
            TypeConfig::Conventional => Some(CONVENTIONAL_TYPES),
            TypeConfig::Falco => Some(FALCO_TYPES),
            TypeConfig::FreeForm => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minimal_membership() {
        assert!(TypeConfig::Minimal.contains("feat"));
        assert!(TypeConfig::Minimal.contains("fix"));
        assert!(!TypeConfig::Minimal.contains("docs"));
        assert!(!TypeConfig::Minimal.contains(""));
    }

    #[test]
    fn membership_is_case_insensitive() {
        assert!(TypeConfig::Minimal.contains("Feat"));
        assert!(TypeConfig::Conventional.contains("REFACTOR"));
    }

    #[test]
    fn conventional_excludes_falco_extensions() {
        assert!(TypeConfig::Conventional.contains("style"));
        assert!(!TypeConfig::Conventional.contains("new"));
        assert!(!TypeConfig::Conventional.contains("rule"));
    }

    #[test]
    fn falco_membership() {
        assert!(TypeConfig::Falco.contains("new"));
        assert!(TypeConfig::Falco.contains("update"));
        assert!(TypeConfig::Falco.contains("rule"));
        assert!(!TypeConfig::Falco.contains("style"));
    }

    #[test]
    fn free_form_accepts_anything_non_empty() {
        assert!(TypeConfig::FreeForm.contains("whatever"));
        assert!(TypeConfig::FreeForm.contains("x"));
        assert!(!TypeConfig::FreeForm.contains(""));
    }

    #[test]
    fn default_is_minimal() {
        assert_eq!(TypeConfig::default(), TypeConfig::Minimal);
    }
}
