// options.rs - Compile-time and run-time option sets.
//
// Both sets are plain `Copy` values. Builder methods flip one engine bit
// each and hand back the updated value; `flags()` yields the final mask.

use bitflags::bitflags;
use pcre2_sys::*;

bitflags! {
    /// Engine bits accepted when a pattern is compiled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CompileFlags: u32 {
        const CASELESS = PCRE2_CASELESS;
        const MULTILINE = PCRE2_MULTILINE;
        const DOTALL = PCRE2_DOTALL;
        const EXTENDED = PCRE2_EXTENDED;
        const ANCHORED = PCRE2_ANCHORED;
        const DOLLAR_ENDONLY = PCRE2_DOLLAR_ENDONLY;
        const UNGREEDY = PCRE2_UNGREEDY;
        const UTF = PCRE2_UTF;
        const NO_UTF_CHECK = PCRE2_NO_UTF_CHECK;
        const UCP = PCRE2_UCP;
        const NO_AUTO_CAPTURE = PCRE2_NO_AUTO_CAPTURE;
        const FIRSTLINE = PCRE2_FIRSTLINE;
        const DUPNAMES = PCRE2_DUPNAMES;
        const NEVER_BACKSLASH_C = PCRE2_NEVER_BACKSLASH_C;
        /// The engine's JavaScript compatibility set.
        const JAVASCRIPT = PCRE2_ALT_BSUX | PCRE2_ALLOW_EMPTY_CLASS | PCRE2_MATCH_UNSET_BACKREF;
    }
}

bitflags! {
    /// Engine bits accepted when a pattern is executed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RunFlags: u32 {
        const ANCHORED = PCRE2_ANCHORED;
        const ENDANCHORED = PCRE2_ENDANCHORED;
        const NOTBOL = PCRE2_NOTBOL;
        const NOTEOL = PCRE2_NOTEOL;
        const NOTEMPTY = PCRE2_NOTEMPTY;
        const NOTEMPTY_ATSTART = PCRE2_NOTEMPTY_ATSTART;
        const PARTIAL_SOFT = PCRE2_PARTIAL_SOFT;
        const PARTIAL_HARD = PCRE2_PARTIAL_HARD;
        const NO_UTF_CHECK = PCRE2_NO_UTF_CHECK;
    }
}

/// Line terminator convention used by `^`, `$` and `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Newline {
    Cr,
    Lf,
    CrLf,
    Any,
    AnyCrLf,
}

impl Newline {
    pub(crate) fn code(self) -> u32 {
        match self {
            Newline::Cr => PCRE2_NEWLINE_CR,
            Newline::Lf => PCRE2_NEWLINE_LF,
            Newline::CrLf => PCRE2_NEWLINE_CRLF,
            Newline::Any => PCRE2_NEWLINE_ANY,
            Newline::AnyCrLf => PCRE2_NEWLINE_ANYCRLF,
        }
    }
}

/// Options applied when compiling a pattern.
///
/// # Examples
///
/// ```
/// use pcre2_typed::{CompileOptions, Pattern};
///
/// let options = CompileOptions::new().case_insensitive(true).multiline(true);
/// let pattern = Pattern::with_options("^world", options).unwrap();
/// assert!(pattern.is_match("hello\nWORLD").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompileOptions {
    flags: CompileFlags,
    newline: Option<Newline>,
    strict_escape: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            flags: CompileFlags::empty(),
            newline: None,
            strict_escape: true,
        }
    }
}

impl CompileOptions {
    /// Engine defaults: no flags, build-time newline, strict escapes.
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, flag: CompileFlags, yes: bool) -> Self {
        self.flags.set(flag, yes);
        self
    }

    pub fn case_insensitive(self, yes: bool) -> Self {
        self.with(CompileFlags::CASELESS, yes)
    }

    /// `^` and `$` also match at internal line boundaries.
    pub fn multiline(self, yes: bool) -> Self {
        self.with(CompileFlags::MULTILINE, yes)
    }

    /// `.` also matches line terminators.
    pub fn dot_matches_newline(self, yes: bool) -> Self {
        self.with(CompileFlags::DOTALL, yes)
    }

    /// Unescaped whitespace and `#` comments in the pattern are ignored.
    pub fn extended(self, yes: bool) -> Self {
        self.with(CompileFlags::EXTENDED, yes)
    }

    /// The match must start at the search position.
    pub fn anchored(self, yes: bool) -> Self {
        self.with(CompileFlags::ANCHORED, yes)
    }

    /// `$` matches only at the very end of the subject, never before a
    /// final newline.
    pub fn dollar_end_only(self, yes: bool) -> Self {
        self.with(CompileFlags::DOLLAR_ENDONLY, yes)
    }

    /// Unknown backslash escapes are errors (the default). Turning this off
    /// makes them match the escaped character literally.
    pub fn strict_escape(mut self, yes: bool) -> Self {
        self.strict_escape = yes;
        self
    }

    /// Quantifiers are lazy unless followed by `?`.
    pub fn ungreedy(self, yes: bool) -> Self {
        self.with(CompileFlags::UNGREEDY, yes)
    }

    /// Pattern and subjects are UTF-8 rather than single bytes.
    pub fn utf(self, yes: bool) -> Self {
        self.with(CompileFlags::UTF, yes)
    }

    /// Skip validation of the pattern text in UTF mode.
    ///
    /// # Safety
    ///
    /// With this set, every narrow pattern compiled with [`utf`](Self::utf)
    /// must be valid UTF-8. The engine's behaviour on invalid UTF is
    /// undefined and may read out of bounds. Wide patterns are transcoded
    /// first and are always valid.
    pub unsafe fn utf_no_check(self, yes: bool) -> Self {
        self.with(CompileFlags::NO_UTF_CHECK, yes)
    }

    /// Use Unicode properties for `\d`, `\w` and POSIX classes.
    pub fn ucp(self, yes: bool) -> Self {
        self.with(CompileFlags::UCP, yes)
    }

    /// Plain parentheses do not capture; named groups still do.
    pub fn no_auto_capture(self, yes: bool) -> Self {
        self.with(CompileFlags::NO_AUTO_CAPTURE, yes)
    }

    /// The match must start before the first newline of the subject.
    pub fn first_line(self, yes: bool) -> Self {
        self.with(CompileFlags::FIRSTLINE, yes)
    }

    /// Allow several groups to share one name.
    pub fn duplicate_names(self, yes: bool) -> Self {
        self.with(CompileFlags::DUPNAMES, yes)
    }

    /// Reject `\C` (match a single code unit) in the pattern.
    pub fn never_backslash_c(self, yes: bool) -> Self {
        self.with(CompileFlags::NEVER_BACKSLASH_C, yes)
    }

    /// Follow JavaScript rules for `\u`, `[]` and unset back references.
    pub fn javascript(self, yes: bool) -> Self {
        self.with(CompileFlags::JAVASCRIPT, yes)
    }

    /// Select the newline convention; `None` keeps the engine default.
    pub fn newline(mut self, newline: Option<Newline>) -> Self {
        self.newline = newline;
        self
    }

    /// The accumulated flag mask.
    pub fn flags(&self) -> CompileFlags {
        self.flags
    }

    pub fn newline_convention(&self) -> Option<Newline> {
        self.newline
    }

    pub fn is_strict_escape(&self) -> bool {
        self.strict_escape
    }

    /// Bits for the compile context's extra options.
    pub(crate) fn extra_bits(&self) -> u32 {
        if self.strict_escape {
            0
        } else {
            PCRE2_EXTRA_BAD_ESCAPE_IS_LITERAL
        }
    }
}

/// Options applied each time a pattern is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RunOptions {
    flags: RunFlags,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, flag: RunFlags, yes: bool) -> Self {
        self.flags.set(flag, yes);
        self
    }

    /// The match must start at the search position.
    pub fn anchored(self, yes: bool) -> Self {
        self.with(RunFlags::ANCHORED, yes)
    }

    /// The match must end at the end of the subject.
    pub fn end_anchored(self, yes: bool) -> Self {
        self.with(RunFlags::ENDANCHORED, yes)
    }

    /// The subject start is not the start of a line.
    pub fn not_bol(self, yes: bool) -> Self {
        self.with(RunFlags::NOTBOL, yes)
    }

    /// The subject end is not the end of a line.
    pub fn not_eol(self, yes: bool) -> Self {
        self.with(RunFlags::NOTEOL, yes)
    }

    /// Empty matches are rejected.
    pub fn not_empty(self, yes: bool) -> Self {
        self.with(RunFlags::NOTEMPTY, yes)
    }

    /// Empty matches are rejected at the start position only.
    pub fn not_empty_at_start(self, yes: bool) -> Self {
        self.with(RunFlags::NOTEMPTY_ATSTART, yes)
    }

    /// Report a partial match when no complete match exists.
    pub fn partial_soft(self, yes: bool) -> Self {
        self.with(RunFlags::PARTIAL_SOFT, yes)
    }

    /// Prefer a partial match over any complete match.
    pub fn partial_hard(self, yes: bool) -> Self {
        self.with(RunFlags::PARTIAL_HARD, yes)
    }

    /// Skip UTF validation of the subject (patterns compiled in UTF mode).
    ///
    /// # Safety
    ///
    /// Every narrow subject matched with these options against a UTF
    /// pattern must be valid UTF-8, and every start offset must fall on a
    /// character boundary. The engine's behaviour otherwise is undefined
    /// and may read out of bounds. Wide subjects are transcoded first and
    /// are always valid.
    pub unsafe fn no_utf_check(self, yes: bool) -> Self {
        self.with(RunFlags::NO_UTF_CHECK, yes)
    }

    pub fn flags(&self) -> RunFlags {
        self.flags
    }
}
