// properties.rs - Property tests over generated patterns and subjects.

use pcre2_typed::prelude::*;
use proptest::prelude::*;

fn utf8() -> CompileOptions {
    CompileOptions::new().utf(true)
}

proptest! {
    #[test]
    fn literal_agrees_with_str_find(needle in "[a-z]{1,5}", haystack in "[a-z ]{0,60}") {
        let pattern = Pattern::new(&needle).unwrap();
        let m = pattern.apply(&haystack, RunOptions::new()).unwrap();
        match haystack.find(&needle) {
            Some(at) => {
                prop_assert!(m.matched());
                prop_assert_eq!(m.range(0).unwrap(), at..at + needle.len());
            }
            None => prop_assert!(!m.matched()),
        }
    }

    #[test]
    fn offsets_slice_the_subject(subject in ".{0,80}") {
        let pattern = Pattern::with_options(r"(\w+)(\s*)(\d)?", utf8()).unwrap();
        let m = pattern.apply(&subject, RunOptions::new()).unwrap();
        if m.matched() {
            for index in 0..=m.group_count() {
                match (m.group_base(index), m.group_size(index), m.group(index)) {
                    (Ok(base), Ok(size), Ok(text)) => {
                        prop_assert_eq!(text, &subject.as_bytes()[base..base + size]);
                    }
                    (Err(a), Err(b), Err(c)) => {
                        prop_assert_eq!(&a, &Error::GroupNotParticipating { index });
                        prop_assert_eq!(&a, &b);
                        prop_assert_eq!(&b, &c);
                    }
                    other => prop_assert!(false, "inconsistent accessors: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn accessors_are_idempotent(subject in ".{0,60}") {
        let pattern = Pattern::with_options(r"(?<word>\w+)|(?<digit>\d)", utf8()).unwrap();
        let m = pattern.apply(&subject, RunOptions::new()).unwrap();
        prop_assert_eq!(m.group(0), m.group(0));
        prop_assert_eq!(m.groups(), m.groups());
        prop_assert_eq!(m.named_groups(), m.named_groups());
    }

    #[test]
    fn wide_offsets_follow_narrow(subject in ".{0,60}") {
        let narrow = Pattern::with_options(r"\d+", utf8()).unwrap();
        let wide = WidePattern::new("\\d+".encode_utf16().collect::<Vec<_>>()).unwrap();
        let units: Vec<u16> = subject.encode_utf16().collect();

        let a = narrow.apply(&subject, RunOptions::new()).unwrap();
        let b = wide.apply(&units, RunOptions::new()).unwrap();
        prop_assert_eq!(a.matched(), b.matched());
        if a.matched() {
            let range = a.range(0).unwrap();
            let start = subject[..range.start].encode_utf16().count();
            let end = subject[..range.end].encode_utf16().count();
            prop_assert_eq!(b.range(0).unwrap(), start..end);
        }
    }

    #[test]
    fn matches_are_ordered_and_disjoint(subject in ".{0,80}") {
        let pattern = Pattern::with_options(r"\w*", utf8()).unwrap();
        let mut last_end = 0;
        let mut last_empty_at = None;
        for m in pattern.matches(&subject, RunOptions::new()) {
            let range = m.unwrap().range(0).unwrap();
            prop_assert!(range.start >= last_end);
            prop_assert!(subject.is_char_boundary(range.start));
            if range.is_empty() {
                prop_assert_ne!(Some(range.start), last_empty_at);
                last_empty_at = Some(range.start);
            }
            last_end = range.end;
        }
    }
}
