// engine/ffi.rs - RAII owners for the PCRE2 8-bit library.
//
// Each engine allocation is held by exactly one owner and freed on drop.
// Nothing here knows about code-unit widths other than 8 bits.

use std::os::raw::{c_int, c_void};
use std::ptr::{self, NonNull};
use std::slice;

use pcre2_sys::*;

use super::CompileFailure;

/// Engine text for any compile or match code.
pub(crate) fn error_message(code: c_int) -> String {
    let mut buffer = [0u8; 256];
    let len = unsafe { pcre2_get_error_message_8(code, buffer.as_mut_ptr(), buffer.len()) };
    if len < 0 {
        return format!("unknown engine error {code}");
    }
    String::from_utf8_lossy(&buffer[..len as usize]).into_owned()
}

// --- Compile context ---

struct CompileContext {
    raw: NonNull<pcre2_compile_context_8>,
}

impl CompileContext {
    fn new() -> Result<Self, CompileFailure> {
        let raw = unsafe { pcre2_compile_context_create_8(ptr::null_mut()) };
        NonNull::new(raw)
            .map(|raw| CompileContext { raw })
            .ok_or(CompileFailure {
                code: PCRE2_ERROR_NOMEMORY,
                offset: 0,
            })
    }

    fn set_newline(&mut self, newline: u32) -> Result<(), CompileFailure> {
        let rc = unsafe { pcre2_set_newline_8(self.raw.as_ptr(), newline) };
        check_context(rc)
    }

    fn set_extra_options(&mut self, extra: u32) -> Result<(), CompileFailure> {
        let rc = unsafe { pcre2_set_compile_extra_options_8(self.raw.as_ptr(), extra) };
        check_context(rc)
    }
}

fn check_context(rc: c_int) -> Result<(), CompileFailure> {
    if rc == 0 {
        Ok(())
    } else {
        Err(CompileFailure { code: rc, offset: 0 })
    }
}

impl Drop for CompileContext {
    fn drop(&mut self) {
        unsafe { pcre2_compile_context_free_8(self.raw.as_ptr()) }
    }
}

// --- Match data ---

struct MatchData {
    raw: NonNull<pcre2_match_data_8>,
}

impl MatchData {
    fn new(pairs: u32) -> Option<Self> {
        let raw = unsafe { pcre2_match_data_create_8(pairs, ptr::null_mut()) };
        NonNull::new(raw).map(|raw| MatchData { raw })
    }

    /// Copies the first `pairs` offset pairs into `out`.
    fn copy_pairs(&self, pairs: usize, out: &mut [usize]) {
        let count = unsafe { pcre2_get_ovector_count_8(self.raw.as_ptr()) } as usize;
        let ovector = unsafe { pcre2_get_ovector_pointer_8(self.raw.as_ptr()) };
        let src = unsafe { slice::from_raw_parts(ovector, count * 2) };
        let n = (pairs.min(count) * 2).min(out.len());
        out[..n].copy_from_slice(&src[..n]);
    }
}

impl Drop for MatchData {
    fn drop(&mut self) {
        unsafe { pcre2_match_data_free_8(self.raw.as_ptr()) }
    }
}

// --- Compiled code ---

/// Compiled 8-bit pattern with auto-free on drop.
pub struct Code {
    raw: NonNull<pcre2_code_8>,
}

// Compiled code is never written after pcre2_compile returns; the engine
// documents concurrent matching against one code block as safe.
unsafe impl Send for Code {}
unsafe impl Sync for Code {}

impl Code {
    pub fn compile(
        pattern: &[u8],
        options: u32,
        extra: u32,
        newline: Option<u32>,
    ) -> Result<Code, CompileFailure> {
        let mut context = CompileContext::new()?;
        if let Some(newline) = newline {
            context.set_newline(newline)?;
        }
        if extra != 0 {
            context.set_extra_options(extra)?;
        }

        let mut error_code: c_int = 0;
        let mut error_offset: usize = 0;
        let raw = unsafe {
            pcre2_compile_8(
                pattern.as_ptr(),
                pattern.len(),
                options,
                &mut error_code,
                &mut error_offset,
                context.raw.as_ptr(),
            )
        };
        NonNull::new(raw).map(|raw| Code { raw }).ok_or(CompileFailure {
            code: error_code,
            offset: error_offset,
        })
    }

    pub fn info_u32(&self, what: u32) -> Result<u32, c_int> {
        let mut value: u32 = 0;
        let rc = unsafe {
            pcre2_pattern_info_8(
                self.raw.as_ptr(),
                what,
                &mut value as *mut u32 as *mut c_void,
            )
        };
        if rc == 0 {
            Ok(value)
        } else {
            Err(rc)
        }
    }

    pub fn name_table(&self) -> Result<&[u8], c_int> {
        let count = self.info_u32(PCRE2_INFO_NAMECOUNT)? as usize;
        let stride = self.info_u32(PCRE2_INFO_NAMEENTRYSIZE)? as usize;
        if count == 0 {
            return Ok(&[]);
        }
        let mut table: *const u8 = ptr::null();
        let rc = unsafe {
            pcre2_pattern_info_8(
                self.raw.as_ptr(),
                PCRE2_INFO_NAMETABLE,
                &mut table as *mut *const u8 as *mut c_void,
            )
        };
        if rc != 0 {
            return Err(rc);
        }
        if table.is_null() {
            return Ok(&[]);
        }
        // The table lives inside the compiled code and shares its lifetime.
        Ok(unsafe { slice::from_raw_parts(table, count * stride) })
    }

    pub fn string_number(&self, name: &[u8]) -> c_int {
        if memchr::memchr(0, name).is_some() {
            return PCRE2_ERROR_NOSUBSTRING;
        }
        let mut terminated = Vec::with_capacity(name.len() + 1);
        terminated.extend_from_slice(name);
        terminated.push(0);
        unsafe { pcre2_substring_number_from_name_8(self.raw.as_ptr(), terminated.as_ptr()) }
    }

    pub fn execute(&self, subject: &[u8], start: usize, options: u32, ovector: &mut [usize]) -> c_int {
        let pairs = u32::try_from((ovector.len() / 2).max(1)).unwrap_or(u32::MAX);
        let Some(data) = MatchData::new(pairs) else {
            return PCRE2_ERROR_NOMEMORY;
        };
        let rc = unsafe {
            pcre2_match_8(
                self.raw.as_ptr(),
                subject.as_ptr(),
                subject.len(),
                start,
                options,
                data.raw.as_ptr(),
                ptr::null_mut(),
            )
        };
        match rc {
            rc if rc > 0 => data.copy_pairs(rc as usize, ovector),
            // Every pair is in use when the vector overflows.
            0 => data.copy_pairs(pairs as usize, ovector),
            PCRE2_ERROR_PARTIAL => data.copy_pairs(1, ovector),
            _ => {}
        }
        rc
    }
}

impl Drop for Code {
    fn drop(&mut self) {
        unsafe { pcre2_code_free_8(self.raw.as_ptr()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_and_free() {
        let code = Code::compile(b"(a)(?<b>b)", 0, 0, None).unwrap();
        assert_eq!(code.info_u32(PCRE2_INFO_CAPTURECOUNT), Ok(2));
        assert_eq!(code.info_u32(PCRE2_INFO_NAMECOUNT), Ok(1));
    }

    #[test]
    fn compile_failure_reports_offset() {
        let failure = Code::compile(b"ab(", 0, 0, None).err().unwrap();
        assert_ne!(failure.code, 0);
        assert_eq!(failure.offset, 3);
    }

    #[test]
    fn empty_name_table() {
        let code = Code::compile(b"(a)", 0, 0, None).unwrap();
        assert!(code.name_table().unwrap().is_empty());
    }

    #[test]
    fn narrow_table_layout() {
        let code = Code::compile(b"(?<x>a)", 0, 0, None).unwrap();
        let table = code.name_table().unwrap();
        assert_eq!(&table[..4], &[0, 1, b'x', 0]);
    }

    #[test]
    fn name_with_nul_is_absent() {
        let code = Code::compile(b"(?<x>a)", 0, 0, None).unwrap();
        assert_eq!(code.string_number(b"x"), 1);
        assert_eq!(code.string_number(b"x\0"), PCRE2_ERROR_NOSUBSTRING);
        assert_eq!(code.string_number(b"y"), PCRE2_ERROR_NOSUBSTRING);
    }

    #[test]
    fn execute_fills_pairs() {
        let code = Code::compile(b"(b)(c)?", 0, 0, None).unwrap();
        let mut ovector = [usize::MAX; 6];
        let rc = code.execute(b"abd", 0, 0, &mut ovector);
        assert_eq!(rc, 2);
        assert_eq!(&ovector[..4], &[1, 2, 1, 2]);
        assert_eq!(&ovector[4..], &[usize::MAX, usize::MAX]);
    }

    #[test]
    fn unknown_code_message() {
        assert!(error_message(-9999).contains("-9999"));
    }
}
