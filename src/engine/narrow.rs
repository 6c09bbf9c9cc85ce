// engine/narrow.rs - 8-bit width: bytes straight into the engine.

use std::borrow::Cow;
use std::os::raw::c_int;
use std::sync::Arc;

use pcre2_sys::{PCRE2_INFO_CAPTURECOUNT, PCRE2_INFO_NAMECOUNT, PCRE2_INFO_NAMEENTRYSIZE};

use super::ffi::Code;
use super::{private, CharWidth, CompileFailure, Info};
use crate::options::CompileOptions;

/// Byte text. Subjects are raw bytes unless the pattern was compiled with
/// [`CompileOptions::utf`], in which case they must be UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Narrow;

impl private::Sealed for Narrow {}

impl CharWidth for Narrow {
    type Unit = u8;
    type Code = Code;
    type Subject = Arc<[u8]>;

    const NAME: &'static str = "narrow";
    // Two bytes of big-endian group number precede each name.
    const NAME_ENTRY_OFFSET: usize = 2;
    const FORCES_UTF: bool = false;

    fn compile(pattern: &[u8], options: CompileOptions) -> Result<Code, CompileFailure> {
        Code::compile(
            pattern,
            options.flags().bits(),
            options.extra_bits(),
            options.newline_convention().map(|newline| newline.code()),
        )
    }

    fn query(code: &Code, what: Info) -> Result<usize, c_int> {
        let what = match what {
            Info::CaptureCount => PCRE2_INFO_CAPTURECOUNT,
            Info::NameCount => PCRE2_INFO_NAMECOUNT,
            Info::NameEntrySize => PCRE2_INFO_NAMEENTRYSIZE,
        };
        code.info_u32(what).map(|value| value as usize)
    }

    fn name_table(code: &Code) -> Result<&[u8], c_int> {
        code.name_table()
    }

    fn string_number(code: &Code, name: &[u8]) -> c_int {
        code.string_number(name)
    }

    fn prepare(text: &Arc<[u8]>) -> Result<Arc<[u8]>, c_int> {
        Ok(Arc::clone(text))
    }

    fn execute(code: &Code, subject: &Arc<[u8]>, start: usize, flags: u32, ovector: &mut [usize]) -> c_int {
        code.execute(subject, start, flags, ovector)
    }

    fn entry_index(entry: &[u8]) -> usize {
        (usize::from(entry[0]) << 8) | usize::from(entry[1])
    }

    fn nul_position(units: &[u8]) -> Option<usize> {
        memchr::memchr(0, units)
    }

    fn next_boundary(text: &[u8], pos: usize, utf: bool) -> usize {
        let mut next = pos + 1;
        if utf {
            while next < text.len() && text[next] & 0xC0 == 0x80 {
                next += 1;
            }
        }
        next
    }

    fn to_string_lossy(units: &[u8]) -> Cow<'_, str> {
        String::from_utf8_lossy(units)
    }
}
