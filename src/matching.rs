// matching.rs - Match results and match iteration.
//
// A match keeps the flat offset vector produced by the engine and hands
// out checked views of it. The vector is never exposed directly.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::os::raw::c_int;
use std::sync::Arc;

use pcre2_sys::{PCRE2_ERROR_NOMATCH, PCRE2_ERROR_PARTIAL};
use smallvec::{smallvec, SmallVec};

use crate::engine::{CharWidth, Narrow, Wide, UNSET};
use crate::error::{Error, Result};
use crate::options::RunOptions;
use crate::pattern::BasicPattern;

/// Outcome of executing a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// A complete match was found.
    Matched,
    /// Only a partial match was found (partial run options only). Group 0
    /// holds the partial span; no other group is set.
    Partial,
    /// The pattern did not match.
    NoMatch,
}

/// Result of executing a [`BasicPattern`] against a subject.
///
/// The result owns a copy of the subject and borrows the pattern it came
/// from, which is used for name lookups.
///
/// # Examples
///
/// ```
/// use pcre2_typed::{Error, Pattern};
///
/// let pattern = Pattern::new(r"(a)(b)?").unwrap();
/// let m = pattern.apply("a", Default::default()).unwrap();
/// assert_eq!(m.group(1).unwrap(), b"a");
/// assert_eq!(m.group(2), Err(Error::GroupNotParticipating { index: 2 }));
/// ```
pub struct BasicMatch<'p, W: CharWidth> {
    pattern: &'p BasicPattern<W>,
    text: Arc<[W::Unit]>,
    groups: usize,
    offsets: SmallVec<[usize; 16]>,
    state: MatchState,
}

/// Match over bytes.
pub type Match<'p> = BasicMatch<'p, Narrow>;

/// Match over UTF-16 code units.
pub type WideMatch<'p> = BasicMatch<'p, Wide>;

impl<'p, W: CharWidth> BasicMatch<'p, W> {
    pub(crate) fn execute(
        pattern: &'p BasicPattern<W>,
        text: Arc<[W::Unit]>,
        subject: &W::Subject,
        start: usize,
        options: RunOptions,
    ) -> Result<Self> {
        let groups = pattern.capturing_groups()?;
        let mut offsets: SmallVec<[usize; 16]> = smallvec![UNSET; (groups + 1) * 2];
        let rc = W::execute(pattern.code(), subject, start, options.flags().bits(), &mut offsets);
        tracing::trace!(width = W::NAME, rc, start, units = text.len(), "executed pattern");

        let state = match rc {
            rc if rc > 0 => MatchState::Matched,
            0 => return Err(Error::BufferTooSmall { groups }),
            PCRE2_ERROR_PARTIAL => MatchState::Partial,
            PCRE2_ERROR_NOMATCH => {
                return Ok(BasicMatch {
                    pattern,
                    text,
                    groups: 0,
                    offsets: SmallVec::new(),
                    state: MatchState::NoMatch,
                })
            }
            code => return Err(Error::execute(code)),
        };
        Ok(BasicMatch {
            pattern,
            text,
            groups,
            offsets,
            state,
        })
    }

    /// The pattern this result came from.
    pub fn pattern(&self) -> &'p BasicPattern<W> {
        self.pattern
    }

    /// The subject text.
    pub fn text(&self) -> &[W::Unit] {
        &self.text
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Whether the pattern matched (completely or partially).
    pub fn matched(&self) -> bool {
        self.state != MatchState::NoMatch
    }

    pub fn is_partial(&self) -> bool {
        self.state == MatchState::Partial
    }

    /// Number of capturing groups; 0 when nothing matched.
    pub fn group_count(&self) -> usize {
        self.groups
    }

    /// Code-unit range of group `index` (0 is the whole match).
    pub fn range(&self, index: usize) -> Result<Range<usize>> {
        if self.state == MatchState::NoMatch {
            return Err(Error::NoMatch);
        }
        if index > self.groups {
            return Err(Error::NoSuchGroup {
                index,
                count: self.groups,
            });
        }
        let (start, end) = (self.offsets[2 * index], self.offsets[2 * index + 1]);
        if start == UNSET || end == UNSET {
            return Err(Error::GroupNotParticipating { index });
        }
        Ok(start..end)
    }

    /// Offset of group `index` in the subject.
    pub fn group_base(&self, index: usize) -> Result<usize> {
        self.range(index).map(|range| range.start)
    }

    /// Length of group `index`.
    pub fn group_size(&self, index: usize) -> Result<usize> {
        self.range(index).map(|range| range.len())
    }

    /// Text of group `index`.
    pub fn group(&self, index: usize) -> Result<&[W::Unit]> {
        let range = self.range(index)?;
        Ok(&self.text[range])
    }

    /// Text of group `index`, decoded to a string.
    pub fn group_lossy(&self, index: usize) -> Result<Cow<'_, str>> {
        self.group(index).map(W::to_string_lossy)
    }

    /// Texts of groups `1..=group_count()`, with `None` for groups that did
    /// not participate.
    pub fn groups(&self) -> Result<Vec<Option<&[W::Unit]>>> {
        if self.state == MatchState::NoMatch {
            return Err(Error::NoMatch);
        }
        (1..=self.groups)
            .map(|index| match self.group(index) {
                Ok(text) => Ok(Some(text)),
                Err(Error::GroupNotParticipating { .. }) => Ok(None),
                Err(err) => Err(err),
            })
            .collect()
    }

    /// Text of the group called `name`.
    ///
    /// Returns `Ok(None)` when the pattern has no such name. When several
    /// groups share the name, the first one (by number) that participated
    /// wins. Fails with [`Error::NoMatch`] on a result that did not match,
    /// whatever the name.
    pub fn named_group(&self, name: impl AsRef<[W::Unit]>) -> Result<Option<&[W::Unit]>> {
        if self.state == MatchState::NoMatch {
            return Err(Error::NoMatch);
        }
        let name = name.as_ref();
        let mut indices: Vec<usize> = self
            .pattern
            .name_entries()?
            .filter(|(_, entry)| *entry == name)
            .map(|(index, _)| index)
            .collect();
        if indices.is_empty() {
            return Ok(None);
        }
        indices.sort_unstable();
        let mut last = Error::NoMatch;
        for index in indices {
            match self.group(index) {
                Ok(text) => return Ok(Some(text)),
                Err(err @ Error::GroupNotParticipating { .. }) => last = err,
                Err(err) => return Err(err),
            }
        }
        Err(last)
    }

    /// Map from group name to the text it captured.
    ///
    /// Named groups that did not participate are left out. For duplicate
    /// names the first participating group wins, as in
    /// [`named_group`](Self::named_group).
    pub fn named_groups(&self) -> Result<BTreeMap<&'p [W::Unit], &[W::Unit]>> {
        if self.state == MatchState::NoMatch {
            return Err(Error::NoMatch);
        }
        let mut entries: Vec<(usize, &'p [W::Unit])> = self.pattern.name_entries()?.collect();
        entries.sort_unstable_by_key(|&(index, _)| index);

        let mut named = BTreeMap::new();
        for (index, name) in entries {
            match self.group(index) {
                Ok(text) => {
                    named.entry(name).or_insert(text);
                }
                Err(Error::GroupNotParticipating { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(named)
    }
}

impl<W: CharWidth> fmt::Debug for BasicMatch<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spans: Vec<Option<Range<usize>>> =
            (0..=self.groups).map(|index| self.range(index).ok()).collect();
        f.debug_struct("Match")
            .field("state", &self.state)
            .field("spans", &spans)
            .finish()
    }
}

// === Matches ===

/// Iterator over successive non-overlapping matches of one subject.
///
/// After an empty match the search resumes one character further on.
/// Iteration ends after the first partial match or engine error.
pub struct Matches<'p, W: CharWidth> {
    pattern: &'p BasicPattern<W>,
    text: Arc<[W::Unit]>,
    // Prepared once; an unrepresentable subject is reported by the first `next`.
    subject: Result<W::Subject, c_int>,
    options: RunOptions,
    next_start: Option<usize>,
}

impl<'p, W: CharWidth> Matches<'p, W> {
    pub(crate) fn new(pattern: &'p BasicPattern<W>, text: Arc<[W::Unit]>, options: RunOptions) -> Self {
        let subject = W::prepare(&text);
        Matches {
            pattern,
            text,
            subject,
            options,
            next_start: Some(0),
        }
    }
}

impl<'p, W: CharWidth> Iterator for Matches<'p, W> {
    type Item = Result<BasicMatch<'p, W>>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start.take()?;
        if start > self.text.len() {
            return None;
        }
        let subject = match &self.subject {
            Ok(subject) => subject,
            Err(code) => return Some(Err(Error::execute(*code))),
        };
        let text = Arc::clone(&self.text);
        let found = match BasicMatch::execute(self.pattern, text, subject, start, self.options) {
            Ok(found) => found,
            Err(err) => return Some(Err(err)),
        };
        if found.state != MatchState::Matched {
            return found.is_partial().then_some(Ok(found));
        }

        let span = found.offsets[0]..found.offsets[1];
        self.next_start = Some(if span.is_empty() {
            W::next_boundary(&self.text, span.end, self.pattern.is_utf())
        } else {
            span.end
        });
        Some(Ok(found))
    }
}
