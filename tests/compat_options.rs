// compat_options.rs - Compile-time and run-time options against the engine.
//
// Each helper compiles with the given compile options and runs once with
// the given run options, then checks the whole-match span.

use pcre2_typed::prelude::*;

fn x2(compile: CompileOptions, run: RunOptions, pattern: &str, input: &str, from: usize, to: usize) {
    let re = Pattern::with_options(pattern, compile)
        .unwrap_or_else(|e| panic!("compile failed for {:?}: {}", pattern, e));
    let m = re.apply(input, run).unwrap();
    assert!(
        m.matched(),
        "x2: expected match for {:?} against {:?} with {:?}/{:?}",
        pattern,
        input,
        compile,
        run
    );
    assert_eq!(m.range(0).unwrap(), from..to, "x2: wrong span for {:?} against {:?}", pattern, input);
}

fn n(compile: CompileOptions, run: RunOptions, pattern: &str, input: &str) {
    let re = Pattern::with_options(pattern, compile)
        .unwrap_or_else(|e| panic!("compile failed for {:?}: {}", pattern, e));
    let m = re.apply(input, run).unwrap();
    assert!(
        !m.matched(),
        "n: expected no match for {:?} against {:?}, got {:?}",
        pattern,
        input,
        m
    );
}

fn c() -> CompileOptions {
    CompileOptions::new()
}

fn r() -> RunOptions {
    RunOptions::new()
}

// === Compile options ===

#[test]
fn case_insensitive() {
    n(c(), r(), "hello", "HELLO");
    x2(c().case_insensitive(true), r(), "hello", "say HeLLo", 4, 9);
}

#[test]
fn multiline() {
    n(c(), r(), "^b", "a\nb");
    x2(c().multiline(true), r(), "^b", "a\nb", 2, 3);
}

#[test]
fn dot_matches_newline() {
    n(c(), r(), "a.b", "a\nb");
    x2(c().dot_matches_newline(true), r(), "a.b", "a\nb", 0, 3);
}

#[test]
fn extended() {
    n(c(), r(), "a b c # letters", "abc");
    x2(c().extended(true), r(), "a b c # letters", "abc", 0, 3);
}

#[test]
fn compile_anchored() {
    x2(c(), r(), "b", "ab", 1, 2);
    n(c().anchored(true), r(), "b", "ab");
}

#[test]
fn dollar_end_only() {
    x2(c(), r(), "a$", "a\n", 0, 1);
    n(c().dollar_end_only(true), r(), "a$", "a\n");
}

#[test]
fn strict_escape() {
    assert!(matches!(Pattern::new(r"\j"), Err(Error::Compile { .. })));
    x2(c().strict_escape(false), r(), r"\j", "xj", 1, 2);
}

#[test]
fn ungreedy() {
    x2(c(), r(), "a+", "aaa", 0, 3);
    x2(c().ungreedy(true), r(), "a+", "aaa", 0, 1);
    x2(c().ungreedy(true), r(), "a+?", "aaa", 0, 3);
}

#[test]
fn utf() {
    x2(c(), r(), "^.", "é", 0, 1);
    x2(c().utf(true), r(), "^.", "é", 0, 2);
}

#[test]
fn utf_pattern_validation() {
    let err = Pattern::with_options(&b"\xff"[..], c().utf(true)).unwrap_err();
    assert!(matches!(err, Error::Compile { .. }), "{err:?}");
    assert!(Pattern::new(&b"\xff"[..]).is_ok());
}

#[test]
fn ucp() {
    n(c().utf(true), r(), r"^\w$", "é");
    x2(c().utf(true).ucp(true), r(), r"^\w$", "é", 0, 2);
}

#[test]
fn no_auto_capture() {
    let plain = Pattern::with_options("(a)(b)", c().no_auto_capture(true)).unwrap();
    assert_eq!(plain.capturing_groups().unwrap(), 0);

    let named = Pattern::with_options("(a)(?<b>b)", c().no_auto_capture(true)).unwrap();
    assert_eq!(named.capturing_groups().unwrap(), 1);
    assert_eq!(named.group_index("b").unwrap(), Some(1));
}

#[test]
fn first_line() {
    x2(c(), r(), "b", "a\nb", 2, 3);
    n(c().first_line(true), r(), "b", "a\nb");
}

#[test]
fn newline_convention() {
    let cr = c().multiline(true).newline(Some(Newline::Cr));
    n(cr, r(), "^b", "a\nb");
    x2(cr, r(), "^b", "a\rb", 2, 3);

    let any = c().multiline(true).newline(Some(Newline::Any));
    x2(any, r(), "^b", "a\rb", 2, 3);
    x2(any, r(), "^b", "a\nb", 2, 3);

    let crlf = c().newline(Some(Newline::CrLf));
    x2(crlf, r(), "a$", "a\r\n", 0, 1);
    x2(c().newline(Some(Newline::AnyCrLf)).multiline(true), r(), "^c", "a\r\nc", 3, 4);
    x2(c().newline(Some(Newline::Lf)).multiline(true), r(), "^c", "a\nc", 2, 3);
}

#[test]
fn javascript() {
    assert!(matches!(Pattern::new(r"\u0041"), Err(Error::Compile { .. })));
    x2(c().javascript(true), r(), r"\u0041", "xA", 1, 2);
    assert!(Pattern::new("[]").is_err());
    assert!(Pattern::with_options("[]", c().javascript(true)).is_ok());
}

#[test]
fn never_backslash_c() {
    assert!(Pattern::new(r"a\C").is_ok());
    assert!(Pattern::with_options(r"a\C", c().never_backslash_c(true)).is_err());
}

// === Run options ===

#[test]
fn run_anchored() {
    n(c(), r().anchored(true), "b", "ab");
    x2(c(), r().anchored(true), "a", "ab", 0, 1);
}

#[test]
fn end_anchored() {
    x2(c(), r().end_anchored(true), "a", "ba", 1, 2);
    n(c(), r().end_anchored(true), "a", "ab");
}

#[test]
fn not_bol() {
    x2(c(), r(), "^a", "a", 0, 1);
    n(c(), r().not_bol(true), "^a", "a");
}

#[test]
fn not_eol() {
    x2(c(), r(), "a$", "a", 0, 1);
    n(c(), r().not_eol(true), "a$", "a");
}

#[test]
fn not_empty() {
    x2(c(), r(), "a*", "bbb", 0, 0);
    n(c(), r().not_empty(true), "a*", "bbb");
    x2(c(), r().not_empty(true), "a*", "baa", 1, 3);
}

#[test]
fn not_empty_at_start() {
    x2(c(), r().not_empty_at_start(true), "a*", "baa", 1, 3);
}

#[test]
fn partial_soft() {
    let re = Pattern::new("abc").unwrap();
    let m = re.apply("xab", r().partial_soft(true)).unwrap();
    assert_eq!(m.state(), MatchState::Partial);
    assert!(m.matched());
    assert!(m.is_partial());
    assert_eq!(m.range(0).unwrap(), 1..3);

    let full = re.apply("xabc", r().partial_soft(true)).unwrap();
    assert_eq!(full.state(), MatchState::Matched);

    n(c(), r(), "abc", "xab");
}

#[test]
fn partial_hard() {
    let re = Pattern::new("(a)(bc)").unwrap();
    let m = re.apply("xab", r().partial_hard(true)).unwrap();
    assert!(m.is_partial());
    assert_eq!(m.group(0).unwrap(), b"ab");
    assert_eq!(m.group(1), Err(Error::GroupNotParticipating { index: 1 }));
}

#[test]
fn partial_ends_iteration() {
    let re = Pattern::new("ab").unwrap();
    let found: Vec<MatchState> = re
        .matches("ab ab a", r().partial_soft(true))
        .map(|m| m.unwrap().state())
        .collect();
    assert_eq!(
        found,
        vec![MatchState::Matched, MatchState::Matched, MatchState::Partial]
    );
}

#[test]
fn compile_options_are_kept() {
    let options = c().case_insensitive(true).newline(Some(Newline::Lf));
    let re = Pattern::with_options("x", options).unwrap();
    assert_eq!(re.compile_options(), options);
}
