// prelude.rs - Convenient re-exports.
//
//! # Prelude
//!
//! ```
//! use pcre2_typed::prelude::*;
//!
//! let pattern = Pattern::new(r"\d+").unwrap();
//! let m = pattern.apply("answer: 42", RunOptions::new()).unwrap();
//! assert_eq!(m.group(0).unwrap(), b"42");
//! ```

pub use crate::error::Error;
pub use crate::matching::{Match, MatchState, WideMatch};
pub use crate::options::{CompileOptions, Newline, RunOptions};
pub use crate::pattern::{Pattern, WidePattern};
