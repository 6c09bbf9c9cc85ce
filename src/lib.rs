//! # pcre2-typed
//!
//! Typed patterns and match results on top of the [PCRE2](https://pcre2.org)
//! engine, written once and used for two text widths:
//!
//! * [`Pattern`] / [`Match`] work on bytes (UTF-8 with
//!   [`CompileOptions::utf`]),
//! * [`WidePattern`] / [`WideMatch`] work on UTF-16 code units.
//!
//! A pattern owns the engine's compiled code and frees it on drop. A match
//! owns a copy of the subject and the flat offset vector produced by the
//! engine, and borrows the pattern it came from so that named groups can be
//! resolved without passing the pattern again.
//!
//! ## Quick Start
//!
//! ```rust
//! use pcre2_typed::prelude::*;
//!
//! let pattern = Pattern::new(r"(?<year>\d{4})-(?<month>\d{2})").unwrap();
//! let m = pattern.apply("Date: 2026-02", RunOptions::new()).unwrap();
//!
//! assert!(m.matched());
//! assert_eq!(m.group_base(0).unwrap(), 6);
//! assert_eq!(m.group(1).unwrap(), b"2026");
//!
//! let named = m.named_groups().unwrap();
//! assert_eq!(named[&b"month"[..]], b"02");
//! ```
//!
//! Failing to match is not an error; the result reports it:
//!
//! ```rust
//! use pcre2_typed::prelude::*;
//!
//! let pattern = Pattern::new(r"\d+").unwrap();
//! let m = pattern.apply("no digits", RunOptions::new()).unwrap();
//! assert!(!m.matched());
//! assert_eq!(m.group(0), Err(Error::NoMatch));
//! ```
//!
//! UTF-16 text uses the same API; offsets are in code units:
//!
//! ```rust
//! use pcre2_typed::prelude::*;
//!
//! let text: Vec<u16> = "😀 wide".encode_utf16().collect();
//! let pattern = WidePattern::new("w\\w+".encode_utf16().collect::<Vec<_>>()).unwrap();
//! let m = pattern.apply(&text, RunOptions::new()).unwrap();
//! assert_eq!(m.group_base(0).unwrap(), 3);
//! assert_eq!(m.group_lossy(0).unwrap(), "wide");
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`engine`] | Width policy trait and the engine bindings behind it |
//! | [`pattern`] | Compiled patterns and name-table access |
//! | [`matching`] | Match results and match iteration |
//! | [`options`] | Compile-time and run-time option sets |
//! | [`error`] | Error type |

pub mod engine;
pub mod error;
pub mod matching;
pub mod options;
pub mod pattern;
pub mod prelude;

pub use engine::{CharWidth, Narrow, Wide};
pub use error::{Error, Result};
pub use matching::{BasicMatch, Match, MatchState, Matches, WideMatch};
pub use options::{CompileFlags, CompileOptions, Newline, RunFlags, RunOptions};
pub use pattern::{BasicPattern, NameEntries, Pattern, WidePattern};
