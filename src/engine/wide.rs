// engine/wide.rs - UTF-16 width.
//
// Text is transcoded to UTF-8 and run through the 8-bit engine in UTF mode;
// offsets coming back are mapped to UTF-16 code units. The name table is
// re-encoded with one unit of group number in front of each name.

use std::borrow::Cow;
use std::os::raw::c_int;
use std::sync::Arc;

use pcre2_sys::{
    PCRE2_ERROR_BADOFFSET, PCRE2_ERROR_BADUTFOFFSET, PCRE2_ERROR_NOSUBSTRING,
    PCRE2_ERROR_PARTIAL, PCRE2_ERROR_UTF16_ERR1, PCRE2_ERROR_UTF16_ERR2,
    PCRE2_ERROR_UTF16_ERR3, PCRE2_NO_UTF_CHECK,
};

use super::ffi::Code;
use super::{private, CharWidth, CompileFailure, Info, Narrow, UNSET};
use crate::options::CompileOptions;

/// UTF-16 text, measured in 16-bit code units.
///
/// Patterns and subjects must be well-formed UTF-16. Patterns are always
/// compiled in UTF mode, so a lone surrogate is rejected (a compile error
/// in a pattern, an execute error in a subject) and can never be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Wide;

impl private::Sealed for Wide {}

/// Compiled UTF-16 pattern: the 8-bit code plus its 16-bit name table.
pub struct WideCode {
    code: Code,
    names: Vec<u16>,
    name_count: usize,
    stride: usize,
}

/// UTF-8 copy of a UTF-16 subject with an offset map back to code units.
pub struct WideSubject {
    utf8: Vec<u8>,
    // One entry per byte plus one for the end.
    unit_of_byte: Vec<usize>,
}

impl WideSubject {
    /// Fails with the engine's UTF-16 error code and the unit offset of
    /// the bad surrogate.
    fn new(units: &[u16]) -> Result<WideSubject, (c_int, usize)> {
        let mut utf8 = Vec::with_capacity(units.len());
        let mut unit_of_byte = Vec::with_capacity(units.len() + 1);
        let mut position = 0;
        for decoded in char::decode_utf16(units.iter().copied()) {
            let ch = decoded.map_err(|_| (surrogate_error(units, position), position))?;
            let mut buffer = [0u8; 4];
            let bytes = ch.encode_utf8(&mut buffer).as_bytes();
            utf8.extend_from_slice(bytes);
            unit_of_byte.extend(std::iter::repeat(position).take(bytes.len()));
            position += ch.len_utf16();
        }
        unit_of_byte.push(position);
        Ok(WideSubject { utf8, unit_of_byte })
    }

    fn unit(&self, byte: usize) -> usize {
        self.unit_of_byte
            .get(byte)
            .copied()
            .unwrap_or_else(|| self.units())
    }

    fn units(&self) -> usize {
        self.unit_of_byte.last().copied().unwrap_or(0)
    }

    /// Byte offset of code unit `unit`, which must start a character.
    fn byte(&self, unit: usize) -> Result<usize, c_int> {
        if unit > self.units() {
            return Err(PCRE2_ERROR_BADOFFSET);
        }
        let byte = self.unit_of_byte.partition_point(|&u| u < unit);
        match self.unit_of_byte.get(byte) {
            Some(&u) if u == unit => Ok(byte),
            _ => Err(PCRE2_ERROR_BADUTFOFFSET),
        }
    }
}

fn surrogate_error(units: &[u16], position: usize) -> c_int {
    if (0xDC00..=0xDFFF).contains(&units[position]) {
        PCRE2_ERROR_UTF16_ERR3
    } else if position + 1 == units.len() {
        PCRE2_ERROR_UTF16_ERR1
    } else {
        PCRE2_ERROR_UTF16_ERR2
    }
}

/// Rebuilds the 8-bit name table with 16-bit entries.
fn widen_names(code: &Code) -> Result<(Vec<u16>, usize, usize), c_int> {
    let table = code.name_table()?;
    if table.is_empty() {
        return Ok((Vec::new(), 0, 0));
    }
    let count = Narrow::query(code, Info::NameCount)?;
    let stride = table.len() / count;

    let entries: Vec<(usize, Vec<u16>)> = table
        .chunks_exact(stride)
        .map(|entry| {
            let name = &entry[Narrow::NAME_ENTRY_OFFSET..];
            let len = Narrow::nul_position(name).unwrap_or(name.len());
            let wide = String::from_utf8_lossy(&name[..len]).encode_utf16().collect();
            (Narrow::entry_index(entry), wide)
        })
        .collect();

    let longest = entries.iter().map(|(_, name)| name.len()).max().unwrap_or(0);
    let wide_stride = Wide::NAME_ENTRY_OFFSET + longest + 1;
    let mut names = vec![0u16; count * wide_stride];
    for (entry, (index, name)) in names.chunks_exact_mut(wide_stride).zip(&entries) {
        // Group numbers are capped at 65535 by the engine.
        entry[0] = *index as u16;
        entry[Wide::NAME_ENTRY_OFFSET..Wide::NAME_ENTRY_OFFSET + name.len()].copy_from_slice(name);
    }
    Ok((names, count, wide_stride))
}

impl CharWidth for Wide {
    type Unit = u16;
    type Code = WideCode;
    type Subject = WideSubject;

    const NAME: &'static str = "wide";
    const NAME_ENTRY_OFFSET: usize = 1;
    const FORCES_UTF: bool = true;

    fn compile(pattern: &[u16], options: CompileOptions) -> Result<WideCode, CompileFailure> {
        let text = WideSubject::new(pattern).map_err(|(code, offset)| CompileFailure { code, offset })?;
        let options = options.utf(true).never_backslash_c(true);
        let code = Narrow::compile(&text.utf8, options).map_err(|failure| CompileFailure {
            code: failure.code,
            offset: text.unit(failure.offset),
        })?;
        let (names, name_count, stride) =
            widen_names(&code).map_err(|code| CompileFailure { code, offset: 0 })?;
        Ok(WideCode {
            code,
            names,
            name_count,
            stride,
        })
    }

    fn query(code: &WideCode, what: Info) -> Result<usize, c_int> {
        match what {
            Info::CaptureCount => Narrow::query(&code.code, what),
            Info::NameCount => Ok(code.name_count),
            Info::NameEntrySize => Ok(code.stride),
        }
    }

    fn name_table(code: &WideCode) -> Result<&[u16], c_int> {
        Ok(&code.names)
    }

    fn string_number(code: &WideCode, name: &[u16]) -> c_int {
        match WideSubject::new(name) {
            Ok(name) => code.code.string_number(&name.utf8),
            Err(_) => PCRE2_ERROR_NOSUBSTRING,
        }
    }

    fn prepare(text: &Arc<[u16]>) -> Result<WideSubject, c_int> {
        WideSubject::new(text).map_err(|(rc, _)| rc)
    }

    fn execute(code: &WideCode, text: &WideSubject, start: usize, flags: u32, ovector: &mut [usize]) -> c_int {
        let start = match text.byte(start) {
            Ok(start) => start,
            Err(rc) => return rc,
        };
        // The transcoded subject is valid UTF-8 by construction.
        let rc = code.code.execute(&text.utf8, start, flags | PCRE2_NO_UTF_CHECK, ovector);
        if rc >= 0 || rc == PCRE2_ERROR_PARTIAL {
            for offset in ovector.iter_mut().filter(|offset| **offset != UNSET) {
                *offset = text.unit(*offset);
            }
        }
        rc
    }

    fn entry_index(entry: &[u16]) -> usize {
        usize::from(entry[0])
    }

    fn nul_position(units: &[u16]) -> Option<usize> {
        units.iter().position(|&unit| unit == 0)
    }

    fn next_boundary(text: &[u16], pos: usize, _utf: bool) -> usize {
        let is_pair = matches!(
            (text.get(pos).copied(), text.get(pos + 1).copied()),
            (Some(0xD800..=0xDBFF), Some(0xDC00..=0xDFFF))
        );
        if is_pair {
            pos + 2
        } else {
            pos + 1
        }
    }

    fn to_string_lossy(units: &[u16]) -> Cow<'_, str> {
        Cow::Owned(String::from_utf16_lossy(units))
    }
}
