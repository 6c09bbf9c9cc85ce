// pattern.rs - Compiled patterns.
//
// A pattern owns its source text and the engine's compiled code. It never
// changes after construction, so any number of matches (and threads) can
// borrow it at once.

use std::fmt;
use std::slice::ChunksExact;
use std::sync::Arc;

use pcre2_sys::{PCRE2_ERROR_NOSUBSTRING, PCRE2_ERROR_NOUNIQUESUBSTRING};

use crate::engine::{CharWidth, Info, Narrow, Wide};
use crate::error::{Error, Result};
use crate::matching::{BasicMatch, Matches};
use crate::options::{CompileFlags, CompileOptions, RunOptions};

/// A compiled regular expression over text of width `W`.
///
/// Use the [`Pattern`] and [`WidePattern`] aliases rather than naming `W`.
///
/// # Examples
///
/// ```
/// use pcre2_typed::Pattern;
///
/// let pattern = Pattern::new(r"hello, (?<greetee>\w+)!").unwrap();
/// assert_eq!(pattern.capturing_groups().unwrap(), 1);
/// assert_eq!(pattern.group_index("greetee").unwrap(), Some(1));
///
/// let m = pattern.apply("hello, world!", Default::default()).unwrap();
/// assert_eq!(m.group(0).unwrap(), b"hello, world!");
/// assert_eq!(m.named_group("greetee").unwrap(), Some(&b"world"[..]));
/// ```
pub struct BasicPattern<W: CharWidth> {
    text: Box<[W::Unit]>,
    code: W::Code,
    options: CompileOptions,
}

/// Pattern over bytes (UTF-8 with [`CompileOptions::utf`]).
pub type Pattern = BasicPattern<Narrow>;

/// Pattern over UTF-16 code units.
///
/// Always compiled in UTF mode: pattern and subjects must be well-formed
/// UTF-16, and lone surrogates in either are rejected rather than matched.
pub type WidePattern = BasicPattern<Wide>;

impl<W: CharWidth> BasicPattern<W> {
    /// Compile `text` with default options.
    pub fn new(text: impl AsRef<[W::Unit]>) -> Result<Self> {
        Self::with_options(text, CompileOptions::default())
    }

    /// Compile `text` with the given options.
    pub fn with_options(text: impl AsRef<[W::Unit]>, options: CompileOptions) -> Result<Self> {
        let text: Box<[W::Unit]> = text.as_ref().into();
        match W::compile(&text, options) {
            Ok(code) => {
                tracing::debug!(width = W::NAME, units = text.len(), "compiled pattern");
                Ok(BasicPattern {
                    text,
                    code,
                    options,
                })
            }
            Err(failure) => {
                tracing::debug!(
                    width = W::NAME,
                    code = failure.code,
                    offset = failure.offset,
                    "pattern failed to compile"
                );
                Err(Error::compile(failure.code, failure.offset))
            }
        }
    }

    /// The source text the pattern was compiled from.
    pub fn text(&self) -> &[W::Unit] {
        &self.text
    }

    pub fn compile_options(&self) -> CompileOptions {
        self.options
    }

    pub(crate) fn code(&self) -> &W::Code {
        &self.code
    }

    /// Whether subjects are treated as sequences of UTF characters.
    pub(crate) fn is_utf(&self) -> bool {
        W::FORCES_UTF || self.options.flags().contains(CompileFlags::UTF)
    }

    /// Number of capturing groups, not counting the whole match.
    pub fn capturing_groups(&self) -> Result<usize> {
        W::query(&self.code, Info::CaptureCount).map_err(Error::query)
    }

    /// Number of the group called `name`, or `None` if there is none.
    ///
    /// When several groups share the name the lowest number is returned.
    pub fn group_index(&self, name: impl AsRef<[W::Unit]>) -> Result<Option<usize>> {
        let name = name.as_ref();
        match W::string_number(&self.code, name) {
            n if n > 0 => Ok(Some(n as usize)),
            PCRE2_ERROR_NOSUBSTRING => Ok(None),
            PCRE2_ERROR_NOUNIQUESUBSTRING => Ok(self
                .name_entries()?
                .filter(|(_, entry)| *entry == name)
                .map(|(index, _)| index)
                .min()),
            code => Err(Error::query(code)),
        }
    }

    /// Names of all named groups, in the engine's (alphabetical) order.
    ///
    /// This is not declaration order: `(?<zeta>a)(?<alpha>b)` lists
    /// `alpha` first.
    pub fn group_names(&self) -> Result<Vec<&[W::Unit]>> {
        Ok(self.name_entries()?.map(|(_, name)| name).collect())
    }

    /// `(group number, name)` for each name-table entry.
    pub fn name_entries(&self) -> Result<NameEntries<'_, W>> {
        let table = W::name_table(&self.code).map_err(Error::query)?;
        let stride = W::query(&self.code, Info::NameEntrySize).map_err(Error::query)?;
        Ok(NameEntries {
            entries: table.chunks_exact(stride.max(1)),
        })
    }

    /// Match against `subject` from its start.
    pub fn apply(&self, subject: impl AsRef<[W::Unit]>, options: RunOptions) -> Result<BasicMatch<'_, W>> {
        self.apply_at(subject, 0, options)
    }

    /// Match against `subject` starting at code unit `start`.
    ///
    /// Lookbehinds and `\b` still see the text before `start`.
    pub fn apply_at(
        &self,
        subject: impl AsRef<[W::Unit]>,
        start: usize,
        options: RunOptions,
    ) -> Result<BasicMatch<'_, W>> {
        let text: Arc<[W::Unit]> = Arc::from(subject.as_ref());
        let prepared = W::prepare(&text).map_err(Error::execute)?;
        BasicMatch::execute(self, text, &prepared, start, options)
    }

    pub fn is_match(&self, subject: impl AsRef<[W::Unit]>) -> Result<bool> {
        Ok(self.apply(subject, RunOptions::default())?.matched())
    }

    /// Iterate over successive non-overlapping matches in `subject`.
    pub fn matches(&self, subject: impl AsRef<[W::Unit]>, options: RunOptions) -> Matches<'_, W> {
        Matches::new(self, Arc::from(subject.as_ref()), options)
    }
}

impl<W: CharWidth> fmt::Debug for BasicPattern<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("text", &W::to_string_lossy(&self.text))
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// === NameEntries ===

/// Iterator over a pattern's name table.
pub struct NameEntries<'p, W: CharWidth> {
    entries: ChunksExact<'p, W::Unit>,
}

impl<'p, W: CharWidth> Iterator for NameEntries<'p, W> {
    type Item = (usize, &'p [W::Unit]);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        let name = &entry[W::NAME_ENTRY_OFFSET..];
        let len = W::nul_position(name).unwrap_or(name.len());
        Some((W::entry_index(entry), &name[..len]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<W: CharWidth> ExactSizeIterator for NameEntries<'_, W> {}
