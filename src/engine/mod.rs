// engine/mod.rs - Character-width policy over the PCRE2 engine.
//
// Everything that depends on the code-unit width lives behind `CharWidth`:
// engine entry points, the name-table layout and a few text helpers.
// `Pattern` and `Match` are written once against this trait.

use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;
use std::os::raw::c_int;
use std::sync::Arc;

use crate::options::CompileOptions;

mod ffi;
mod narrow;
mod wide;

pub use narrow::Narrow;
pub use wide::{Wide, WideSubject};

pub(crate) use ffi::error_message;

/// Offset value the engine writes for a group that did not participate.
pub(crate) const UNSET: usize = usize::MAX;

/// Scalar metadata that can be queried from a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Info {
    /// Number of capturing groups, not counting the whole match.
    CaptureCount,
    /// Number of entries in the name table.
    NameCount,
    /// Size of one name-table entry, in code units.
    NameEntrySize,
}

/// Why the engine refused a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileFailure {
    pub code: i32,
    /// Code units into the pattern.
    pub offset: usize,
}

mod private {
    pub trait Sealed {}
}

/// Binding of the engine to one code-unit width.
///
/// Implemented by [`Narrow`] (bytes) and [`Wide`] (UTF-16 code units).
/// This trait is sealed.
pub trait CharWidth: private::Sealed + Sized + Send + Sync + 'static {
    /// One code unit of text.
    type Unit: Copy + Ord + Hash + Default + fmt::Debug + Send + Sync + 'static;
    /// Owned compiled pattern; dropping it releases the engine's memory.
    type Code: Send + Sync;
    /// Subject text in the form [`execute`](Self::execute) consumes. Built
    /// once per subject and reused for every match against it.
    type Subject: Send + Sync;

    /// Short label used in log events.
    const NAME: &'static str;
    /// Units between the start of a name-table entry and its name.
    const NAME_ENTRY_OFFSET: usize;
    /// Patterns of this width are always compiled in UTF mode.
    const FORCES_UTF: bool;

    fn compile(pattern: &[Self::Unit], options: CompileOptions) -> Result<Self::Code, CompileFailure>;

    fn query(code: &Self::Code, what: Info) -> Result<usize, c_int>;

    /// The raw name table: `NameCount` entries of `NameEntrySize` units.
    fn name_table(code: &Self::Code) -> Result<&[Self::Unit], c_int>;

    /// Group number for `name`, or a negative engine code.
    fn string_number(code: &Self::Code, name: &[Self::Unit]) -> c_int;

    /// Readies `text` for matching, or returns the engine code for text
    /// the width cannot represent.
    fn prepare(text: &Arc<[Self::Unit]>) -> Result<Self::Subject, c_int>;

    /// Runs one match starting at code unit `start`.
    ///
    /// `ovector` receives start/end pairs in code units; pairs the engine
    /// did not set are left untouched. Returns the engine's status code.
    fn execute(
        code: &Self::Code,
        subject: &Self::Subject,
        start: usize,
        flags: u32,
        ovector: &mut [usize],
    ) -> c_int;

    /// Group number stored at the head of a name-table entry.
    fn entry_index(entry: &[Self::Unit]) -> usize;

    /// Position of the first NUL unit.
    fn nul_position(units: &[Self::Unit]) -> Option<usize>;

    /// Start of the character after the one at `pos`.
    fn next_boundary(text: &[Self::Unit], pos: usize, utf: bool) -> usize;

    fn to_string_lossy(units: &[Self::Unit]) -> Cow<'_, str>;
}
