// enc.rs - Encoding trait and shared encoding utility functions.
// One implementation per supported encoding lives under `encodings/`.

use crate::defs::*;

// === Encoding type alias ===
// Encodings are process-wide singletons handed around as trait objects.
pub type OnigEncoding = &'static dyn Encoding;

// === Encoding flags ===
pub const ENC_FLAG_ASCII_COMPATIBLE: u32 = 1 << 0;
pub const ENC_FLAG_UNICODE: u32 = 1 << 1;
pub const ENC_FLAG_DUMMY: u32 = 1 << 2;

impl std::fmt::Debug for dyn Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Encoding").field(&self.name()).finish()
    }
}

// === Encoding Trait ===
pub trait Encoding: Send + Sync {
    /// Canonical encoding name (e.g. "US-ASCII", "UTF-8").
    fn name(&self) -> &'static str;

    /// Alternative names accepted by the registry.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Maximum encoded character length in bytes
    fn max_enc_len(&self) -> usize;

    /// Minimum encoded character length in bytes
    fn min_enc_len(&self) -> usize;

    /// Byte length of the character at p, trusting that it is well formed.
    fn mbc_enc_len(&self, p: &[u8]) -> usize;

    /// Validated byte length of the character at the start of p.
    /// Positive for a complete character, `MBCLEN_INVALID` for bad bytes,
    /// `mbclen_needmore(k)` when p ends k bytes short.
    fn precise_mbc_enc_len(&self, p: &[u8]) -> i32;

    /// Decode the character at the start of p.
    fn mbc_to_code(&self, p: &[u8]) -> OnigCodePoint;

    /// Returns the byte length needed to encode a code point, or a negative
    /// ONIGERR code if the code point has no encoding.
    fn code_to_mbclen(&self, code: OnigCodePoint) -> i32;

    /// Encode a code point into buf, returns number of bytes written
    fn code_to_mbc(&self, code: OnigCodePoint, buf: &mut [u8]) -> i32;

    /// Is the code point of the given ctype?
    fn is_code_ctype(&self, code: OnigCodePoint, ctype: u32) -> bool;

    /// Case map the characters in source[*pp..end] into `to`, advancing pp.
    /// Sets `CaseMapFlags::MODIFIED` when any character changed.
    /// Returns the number of bytes written to `to`.
    fn case_map(
        &self,
        flags: &mut CaseMapFlags,
        pp: &mut usize,
        end: usize,
        source: &[u8],
        to: &mut [u8],
    ) -> i32;

    /// Left adjust char head: find the start of the character containing s
    /// within [start..].
    fn left_adjust_char_head(&self, start: usize, s: usize, data: &[u8]) -> usize;

    /// Encoding flags
    fn flag(&self) -> u32;
}

// === Encoding query helpers ===

#[inline]
pub fn onigenc_is_unicode_encoding(enc: OnigEncoding) -> bool {
    (enc.flag() & ENC_FLAG_UNICODE) != 0
}

#[inline]
pub fn onigenc_is_ascii_compatible_encoding(enc: OnigEncoding) -> bool {
    (enc.flag() & ENC_FLAG_ASCII_COMPATIBLE) != 0
}

#[inline]
pub fn onigenc_is_dummy(enc: OnigEncoding) -> bool {
    (enc.flag() & ENC_FLAG_DUMMY) != 0
}

#[inline]
pub fn onigenc_is_singlebyte(enc: OnigEncoding) -> bool {
    enc.max_enc_len() == 1
}

#[inline]
pub fn onigenc_is_fixed_width(enc: OnigEncoding) -> bool {
    enc.min_enc_len() == enc.max_enc_len()
}

/// UTF-8 is the only ASCII-compatible Unicode encoding; several fast paths
/// key off it.
#[inline]
pub fn onigenc_is_utf8(enc: OnigEncoding) -> bool {
    onigenc_is_unicode_encoding(enc) && onigenc_is_ascii_compatible_encoding(enc)
}

/// Encodings are singletons with unique names.
#[inline]
pub fn onigenc_same(a: OnigEncoding, b: OnigEncoding) -> bool {
    a.name() == b.name()
}

#[inline]
pub fn onigenc_is_code_ascii(code: OnigCodePoint) -> bool {
    code < 128
}

#[inline]
pub fn onigenc_is_code_upper(enc: OnigEncoding, code: OnigCodePoint) -> bool {
    enc.is_code_ctype(code, ONIGENC_CTYPE_UPPER)
}

#[inline]
pub fn onigenc_is_code_lower(enc: OnigEncoding, code: OnigCodePoint) -> bool {
    enc.is_code_ctype(code, ONIGENC_CTYPE_LOWER)
}

// === Ctype bit helpers ===

#[inline]
pub fn ctype_to_bit(ctype: u32) -> u32 {
    1 << ctype
}

#[inline]
pub fn ctype_is_word_graph_print(ctype: u32) -> bool {
    ctype == ONIGENC_CTYPE_WORD || ctype == ONIGENC_CTYPE_GRAPH || ctype == ONIGENC_CTYPE_PRINT
}

// === ASCII Tables ===

pub static ONIG_ENC_ASCII_TO_LOWER_CASE_TABLE: [u8; 256] = {
    let mut t = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        t[i] = if i >= 0x41 && i <= 0x5a { i as u8 + 0x20 } else { i as u8 };
        i += 1;
    }
    t
};

pub static ONIG_ENC_ASCII_TO_UPPER_CASE_TABLE: [u8; 256] = {
    let mut t = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        t[i] = if i >= 0x61 && i <= 0x7a { i as u8 - 0x20 } else { i as u8 };
        i += 1;
    }
    t
};

pub static ONIG_ENC_ASCII_CTYPE_TABLE: [u16; 256] = [
    0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x420c, 0x420c, 0x4209, 0x4208,
    0x4208, 0x4208, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008,
    0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4284, 0x41a0, 0x41a0, 0x41a0,
    0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0,
    0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x41a0, 0x41a0,
    0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x7ca2, 0x7ca2, 0x7ca2, 0x7ca2, 0x7ca2, 0x7ca2, 0x74a2,
    0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2,
    0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x51a0,
    0x41a0, 0x78e2, 0x78e2, 0x78e2, 0x78e2, 0x78e2, 0x78e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2,
    0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2,
    0x70e2, 0x70e2, 0x70e2, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x4008, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000,
];

// === ASCII Ctype check helpers ===

#[inline]
pub fn onigenc_is_ascii_code_ctype(code: u32, ctype: u32) -> bool {
    if code < 256 {
        (ONIG_ENC_ASCII_CTYPE_TABLE[code as usize] & ctype_to_bit(ctype) as u16) != 0
    } else {
        false
    }
}

#[inline]
pub fn onigenc_ascii_code_to_lower_case(c: u8) -> u8 {
    ONIG_ENC_ASCII_TO_LOWER_CASE_TABLE[c as usize]
}

#[inline]
pub fn onigenc_ascii_code_to_upper_case(c: u8) -> u8 {
    ONIG_ENC_ASCII_TO_UPPER_CASE_TABLE[c as usize]
}

// === Shared Encoding Functions ===
// Used by several encoding implementations.

/// Single byte: mbc_to_code returns the byte value
pub fn onigenc_single_byte_mbc_to_code(p: &[u8]) -> OnigCodePoint {
    p[0] as OnigCodePoint
}

/// Single byte: code_to_mbclen is 1 for anything that fits a byte
pub fn onigenc_single_byte_code_to_mbclen(code: OnigCodePoint) -> i32 {
    if code < 256 {
        1
    } else {
        ONIGERR_INVALID_CODE_POINT_VALUE
    }
}

/// Single byte: code_to_mbc writes one byte
pub fn onigenc_single_byte_code_to_mbc(code: OnigCodePoint, buf: &mut [u8]) -> i32 {
    if code > 0xff {
        return ONIGERR_INVALID_CODE_POINT_VALUE;
    }
    buf[0] = code as u8;
    1
}

/// Precise length for a table-driven single byte encoding.
pub fn onigenc_single_byte_precise_len(p: &[u8], valid: impl Fn(u8) -> bool) -> i32 {
    match p.first() {
        None => mbclen_needmore(1),
        Some(&b) if valid(b) => 1,
        Some(_) => MBCLEN_INVALID,
    }
}

/// Generic left adjust for encodings whose trail bytes overlap lead bytes.
/// Walks forward from start, so it is always correct but linear.
pub fn onigenc_forward_left_adjust_char_head(
    enc: &dyn Encoding,
    start: usize,
    s: usize,
    data: &[u8],
) -> usize {
    let mut p = start;
    while p < s {
        let n = enc.precise_mbc_enc_len(&data[p..]);
        let step = if n > 0 { n as usize } else { 1 };
        if p + step > s {
            return p;
        }
        p += step;
    }
    s
}

/// ASCII-only case map: maps a-z/A-Z per flags and copies anything else.
/// Used directly by the non-Unicode encodings and as the ASCII arm of the
/// Unicode ones.
pub fn onigenc_ascii_only_case_map(
    enc: &dyn Encoding,
    flags: &mut CaseMapFlags,
    pp: &mut usize,
    end: usize,
    source: &[u8],
    to: &mut [u8],
) -> i32 {
    let mut t = 0usize;
    let mut first = true;
    while *pp < end && t + enc.max_enc_len() <= to.len() {
        let len = char_len_at(enc, source, *pp, end);
        let code = enc.mbc_to_code(&source[*pp..*pp + len]);
        *pp += len;

        let mapped = if code < 128 {
            ascii_case_map_code(code as u8, *flags, first) as OnigCodePoint
        } else {
            code
        };
        if mapped != code {
            *flags |= CaseMapFlags::MODIFIED;
        }
        if flags.contains(CaseMapFlags::TITLECASE) {
            // Only the first character is titlecased.
            *flags = (*flags - CaseMapFlags::UPCASE - CaseMapFlags::TITLECASE)
                | CaseMapFlags::DOWNCASE;
        }
        first = false;
        let n = enc.code_to_mbc(mapped, &mut to[t..]);
        if n <= 0 {
            break;
        }
        t += n as usize;
    }
    t as i32
}

/// Map one ASCII byte according to the direction bits in `flags`.
#[inline]
pub fn ascii_case_map_code(c: u8, flags: CaseMapFlags, first: bool) -> u8 {
    if flags.contains(CaseMapFlags::FOLD) {
        return onigenc_ascii_code_to_lower_case(c);
    }
    let up = flags.contains(CaseMapFlags::UPCASE);
    let down = flags.contains(CaseMapFlags::DOWNCASE);
    if flags.contains(CaseMapFlags::TITLECASE) && first {
        return onigenc_ascii_code_to_upper_case(c);
    }
    if up && down {
        if c.is_ascii_uppercase() {
            c + 0x20
        } else if c.is_ascii_lowercase() {
            c - 0x20
        } else {
            c
        }
    } else if up {
        onigenc_ascii_code_to_upper_case(c)
    } else if down {
        onigenc_ascii_code_to_lower_case(c)
    } else {
        c
    }
}

/// Trusted width of the character at p, clamped to end and never zero.
#[inline]
pub fn char_len_at(enc: &dyn Encoding, data: &[u8], p: usize, end: usize) -> usize {
    let n = enc.precise_mbc_enc_len(&data[p..end]);
    if n > 0 {
        n as usize
    } else {
        enc.min_enc_len().min(end - p).max(1)
    }
}

// === Encoding Utility Functions ===

/// Get previous character head
pub fn onigenc_get_prev_char_head(
    enc: OnigEncoding,
    start: usize,
    s: usize,
    data: &[u8],
) -> Option<usize> {
    if s <= start {
        None
    } else {
        Some(enc.left_adjust_char_head(start, s - 1, data))
    }
}

/// Pick the encoding a combination of two strings should carry.
/// Each side is described by its encoding, byte length and code range.
/// Returns None when the two cannot be combined.
pub fn onigenc_compatible(
    enc1: OnigEncoding,
    len1: usize,
    cr1: CodeRange,
    enc2: OnigEncoding,
    len2: usize,
    cr2: CodeRange,
) -> Option<OnigEncoding> {
    if onigenc_same(enc1, enc2) {
        return Some(enc1);
    }
    if len2 == 0 {
        return Some(enc1);
    }
    if len1 == 0 {
        return if onigenc_is_ascii_compatible_encoding(enc1) && cr2 == CodeRange::Ascii {
            Some(enc1)
        } else {
            Some(enc2)
        };
    }
    if !onigenc_is_ascii_compatible_encoding(enc1) || !onigenc_is_ascii_compatible_encoding(enc2) {
        return None;
    }
    if cr1 != cr2 {
        if cr1 == CodeRange::Ascii {
            return Some(enc2);
        }
        if cr2 == CodeRange::Ascii {
            return Some(enc1);
        }
    }
    if cr2 == CodeRange::Ascii {
        return Some(enc1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encodings::{ONIG_ENCODING_ASCII_8BIT, ONIG_ENCODING_UTF16LE, ONIG_ENCODING_UTF8};

    #[test]
    fn case_tables() {
        assert_eq!(onigenc_ascii_code_to_lower_case(b'Q'), b'q');
        assert_eq!(onigenc_ascii_code_to_lower_case(b'['), b'[');
        assert_eq!(onigenc_ascii_code_to_upper_case(b'z'), b'Z');
        assert_eq!(onigenc_ascii_code_to_upper_case(0xe9), 0xe9);
    }

    #[test]
    fn ascii_ctype() {
        assert!(onigenc_is_ascii_code_ctype(b'a' as u32, ONIGENC_CTYPE_LOWER));
        assert!(onigenc_is_ascii_code_ctype(b'7' as u32, ONIGENC_CTYPE_DIGIT));
        assert!(!onigenc_is_ascii_code_ctype(0xc0, ONIGENC_CTYPE_UPPER));
        assert!(!onigenc_is_ascii_code_ctype(0x1000, ONIGENC_CTYPE_ALPHA));
    }

    #[test]
    fn ascii_case_map_directions() {
        let swap = CaseMapFlags::UPCASE | CaseMapFlags::DOWNCASE;
        assert_eq!(ascii_case_map_code(b'a', swap, false), b'A');
        assert_eq!(ascii_case_map_code(b'A', swap, false), b'a');
        assert_eq!(ascii_case_map_code(b'1', swap, false), b'1');
        let title = CaseMapFlags::UPCASE | CaseMapFlags::TITLECASE;
        assert_eq!(ascii_case_map_code(b'a', title, true), b'A');
        assert_eq!(ascii_case_map_code(b'Q', CaseMapFlags::FOLD, false), b'q');
    }

    #[test]
    fn prev_char_head_utf8() {
        let s = "aé".as_bytes();
        let enc: OnigEncoding = &ONIG_ENCODING_UTF8;
        assert_eq!(onigenc_get_prev_char_head(enc, 0, s.len(), s), Some(1));
        assert_eq!(onigenc_get_prev_char_head(enc, 0, 1, s), Some(0));
        assert_eq!(onigenc_get_prev_char_head(enc, 0, 0, s), None);
    }

    #[test]
    fn compatible_encodings() {
        let utf8: OnigEncoding = &ONIG_ENCODING_UTF8;
        let bin: OnigEncoding = &ONIG_ENCODING_ASCII_8BIT;
        let u16le: OnigEncoding = &ONIG_ENCODING_UTF16LE;

        let r = onigenc_compatible(utf8, 3, CodeRange::Valid, bin, 2, CodeRange::Ascii);
        assert_eq!(r.map(|e| e.name()), Some("UTF-8"));
        let r = onigenc_compatible(utf8, 3, CodeRange::Ascii, bin, 2, CodeRange::Valid);
        assert_eq!(r.map(|e| e.name()), Some("ASCII-8BIT"));
        assert!(onigenc_compatible(utf8, 3, CodeRange::Valid, bin, 2, CodeRange::Valid).is_none());
        assert!(onigenc_compatible(utf8, 1, CodeRange::Ascii, u16le, 2, CodeRange::Valid).is_none());
        let r = onigenc_compatible(utf8, 1, CodeRange::Ascii, u16le, 0, CodeRange::Ascii);
        assert_eq!(r.map(|e| e.name()), Some("UTF-8"));
    }
}
