//! A parser library for the [Conventional Commit] specification, with
//! selectable type vocabularies and best-effort recovery.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! # Example
//!
//! ```rust
//! use indoc::indoc;
//! use conventional_message::{Parser, TypeConfig, VersionBump};
//!
//! let message = indoc!("
//!     docs(example)!: add tested usage example
//!
//!     This example is tested using Rust's doctest capabilities. Having this
//!     example helps people understand how to use the parser.
//!
//!     BREAKING CHANGE: going from nothing to something
//!     Co-Authored-By: Lisa Simpson <lisa@simpsons.fam>
//!     Closes #12
//! ");
//!
//! let parser = Parser::new().with_types(TypeConfig::Conventional);
//! let message = parser.parse(message).unwrap();
//!
//! // You can access all components of the header.
//! assert_eq!(message.type_(), "docs");
//! assert_eq!(message.scope().unwrap(), "example");
//! assert_eq!(message.description(), "add tested usage example");
//!
//! // And the free-form commit body.
//! assert!(message.body().unwrap().contains("helps people understand"));
//!
//! // If a commit is marked with a bang (`!`) OR has a footer with the key
//! // "BREAKING CHANGE", it is considered a "breaking" commit.
//! assert!(message.breaking());
//! assert_eq!(message.version_bump(), VersionBump::Major);
//!
//! // Footers form an ordered mapping; lookup is case-insensitive and the
//! // two breaking-change spellings share one key.
//! assert_eq!(
//!     message.footers().get("co-authored-by"),
//!     Some(&["Lisa Simpson <lisa@simpsons.fam>"][..]),
//! );
//! assert_eq!(message.footers().get("closes"), Some(&["12"][..]));
//! assert!(message.footers().get("breaking-change").is_some());
//! ```
//!
//! Malformed input can still yield usable data in best-effort mode:
//!
//! ```rust
//! use conventional_message::Parser;
//!
//! let parser = Parser::new().with_best_effort(true);
//! let err = parser.parse("fix: correct typos\n\nbody text\n\n").unwrap_err();
//!
//! let partial = err.partial().unwrap();
//! assert_eq!(partial.type_(), "fix");
//! assert_eq!(partial.description(), "correct typos");
//! ```

#![warn(missing_docs)]

mod bump;
mod error;
mod message;
mod parser;
mod scanner;
mod vocabulary;

pub use bump::VersionBump;
pub use error::{Error, ErrorKind, Position};
pub use message::{CommitMessage, FooterEntry, FooterToken, Footers, Scope, Type};
pub use parser::{log_facade, LogSink, Parser};
pub use vocabulary::{TypeConfig, CONVENTIONAL_TYPES, FALCO_TYPES, MINIMAL_TYPES};
