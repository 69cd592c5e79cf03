//! Mapping parsed commits to their semantic-version impact.

use crate::message::CommitMessage;

/// The semantic-version impact implied by a commit.
///
/// Ordered so that `Major` dominates: `Unknown < Patch < Minor < Major`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum VersionBump {
    /// The commit type implies no particular release impact.
    Unknown,

    /// A backwards-compatible bug fix.
    Patch,

    /// A backwards-compatible feature addition.
    Minor,

    /// A breaking change.
    Major,
}

/// The default strategy: breaking changes dominate, then features, then
/// fixes.
pub(crate) fn default_strategy(message: &CommitMessage<'_>) -> VersionBump {
    if message.breaking() {
        VersionBump::Major
    } else if message.is_feat() {
        VersionBump::Minor
    } else if message.is_fix() {
        VersionBump::Patch
    } else {
        VersionBump::Unknown
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Parser, TypeConfig};
    use indoc::indoc;

    fn parse(input: &str) -> CommitMessage<'_> {
        Parser::new()
            .with_types(TypeConfig::Conventional)
            .parse(input)
            .unwrap()
    }

    #[test]
    fn feat_is_minor() {
        assert_eq!(parse("feat: add thing").version_bump(), VersionBump::Minor);
    }

    #[test]
    fn fix_is_patch() {
        assert_eq!(parse("fix: repair thing").version_bump(), VersionBump::Patch);
    }

    #[test]
    fn other_types_are_unknown() {
        assert_eq!(parse("chore: tidy up").version_bump(), VersionBump::Unknown);
        assert_eq!(parse("docs: explain").version_bump(), VersionBump::Unknown);
    }

    #[test]
    fn breaking_dominates() {
        assert_eq!(parse("feat!: redo api").version_bump(), VersionBump::Major);
        assert_eq!(parse("fix!: redo api").version_bump(), VersionBump::Major);
        assert_eq!(
            parse(indoc!(
                "chore: tidy up

                BREAKING-CHANGE: removed the old config keys"
            ))
            .version_bump(),
            VersionBump::Major
        );
    }

    #[test]
    fn ordering_puts_major_on_top() {
        assert!(VersionBump::Major > VersionBump::Minor);
        assert!(VersionBump::Minor > VersionBump::Patch);
        assert!(VersionBump::Patch > VersionBump::Unknown);
    }
}
