// dump.rs - Printable escaped form of a byte string and its inverse.
//
// `dump` produces a double-quoted ASCII literal; `undump` parses it back,
// honoring a trailing `.force_encoding("NAME")` for encodings that are not
// ASCII-compatible.

use crate::coderange::enc_precise_mbclen;
use crate::defs::*;
use crate::enc::*;
use crate::encodings::{find_encoding, ONIG_ENCODING_UTF8};
use crate::error::StrError;

const FORCE_ENCODING: &[u8] = b".force_encoding(\"";

// === Scanning helpers ===

/// Parse up to `len` hex digits at p. Returns (value, digits consumed).
pub fn scan_hex(bytes: &[u8], p: usize, len: usize) -> (u32, usize) {
    let mut v: u32 = 0;
    let mut n = 0;
    while n < len {
        let d = match bytes.get(p + n).and_then(|&c| (c as char).to_digit(16)) {
            Some(d) => d,
            None => break,
        };
        v = v.wrapping_shl(4) | d;
        n += 1;
    }
    (v, n)
}

/// Parse up to `len` octal digits at p. Returns (value, digits consumed).
pub fn scan_oct(bytes: &[u8], p: usize, len: usize) -> (u32, usize) {
    let mut v: u32 = 0;
    let mut n = 0;
    while n < len {
        match bytes.get(p + n) {
            Some(&c @ b'0'..=b'7') => v = v.wrapping_shl(3) | (c - b'0') as u32,
            _ => break,
        }
        n += 1;
    }
    (v, n)
}

#[inline]
fn is_print(c: u8) -> bool {
    (0x20..0x7f).contains(&c)
}

/// `#` followed by one of these would start an interpolation.
#[inline]
fn is_evstr(bytes: &[u8], p: usize) -> bool {
    matches!(bytes.get(p), Some(b'$' | b'@' | b'{'))
}

/// Render a code point for diagnostics: `\uXXXX`/`\u{X}` for Unicode
/// encodings, `\xXX`/`\x{X}` otherwise. Printable ASCII stays literal under
/// Unicode.
pub fn escaped_char_format(c: OnigCodePoint, is_unicode: bool) -> String {
    if is_unicode {
        if c < 0x7f && is_print(c as u8) {
            (c as u8 as char).to_string()
        } else if c < 0x10000 {
            format!("\\u{:04X}", c)
        } else {
            format!("\\u{{{:X}}}", c)
        }
    } else if c < 0x100 {
        format!("\\x{:02X}", c)
    } else {
        format!("\\x{{{:X}}}", c)
    }
}

fn unescape_ascii(c: u8) -> Option<u8> {
    Some(match c {
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'f' => 0x0c,
        b'v' => 0x0b,
        b'b' => 0x08,
        b'a' => 0x07,
        b'e' => 0x1b,
        _ => return None,
    })
}

fn escape_ascii(c: u8) -> Option<u8> {
    Some(match c {
        b'\n' => b'n',
        b'\r' => b'r',
        b'\t' => b't',
        0x0c => b'f',
        0x0b => b'v',
        0x08 => b'b',
        0x07 => b'a',
        0x1b => b'e',
        _ => return None,
    })
}

// === Dump ===

/// Escape `bytes` into a double-quoted ASCII literal.
pub fn dump(enc: OnigEncoding, bytes: &[u8]) -> Vec<u8> {
    let utf8 = onigenc_is_utf8(enc);
    let mut out = Vec::with_capacity(bytes.len() + 2);
    out.push(b'"');

    let end = bytes.len();
    let mut p = 0;
    while p < end {
        let c = bytes[p];
        p += 1;
        match c {
            b'"' | b'\\' => {
                out.push(b'\\');
                out.push(c);
            }
            b'#' => {
                if is_evstr(bytes, p) {
                    out.push(b'\\');
                }
                out.push(b'#');
            }
            _ if is_print(c) => out.push(c),
            _ => {
                if let Some(m) = escape_ascii(c) {
                    out.push(b'\\');
                    out.push(m);
                    continue;
                }
                if utf8 {
                    // Whole characters in UTF-8 so undump sees one escape style.
                    let n = enc_precise_mbclen(enc, bytes, p - 1, end);
                    if mbclen_charfound_p(n) {
                        let n = n as usize;
                        let cc = enc.mbc_to_code(&bytes[p - 1..p - 1 + n]);
                        out.extend_from_slice(escaped_char_format(cc, true).as_bytes());
                        p += n - 1;
                        continue;
                    }
                }
                out.extend_from_slice(escaped_char_format(c as OnigCodePoint, false).as_bytes());
            }
        }
    }
    out.push(b'"');

    if !onigenc_is_ascii_compatible_encoding(enc) {
        out.extend_from_slice(FORCE_ENCODING);
        out.extend_from_slice(enc.name().as_bytes());
        out.extend_from_slice(b"\")");
    }
    out
}

// === Undump ===

/// Escape styles seen so far; they may not be mixed.
#[derive(Default)]
struct UndumpState {
    utf8: bool,
    binary: bool,
}

/// Parse a literal produced by `dump`. Returns the bytes and the encoding
/// they carry: `enc`, UTF-8 once a `\u` escape appears, or the encoding
/// named by `.force_encoding`.
pub fn undump(enc: OnigEncoding, bytes: &[u8]) -> Result<(Vec<u8>, OnigEncoding), StrError> {
    undump_raw(enc, bytes).map_err(|code| {
        tracing::debug!(code, encoding = enc.name(), "undump failed");
        StrError::from(code)
    })
}

fn undump_raw(enc: OnigEncoding, bytes: &[u8]) -> Result<(Vec<u8>, OnigEncoding), i32> {
    if !bytes.is_ascii() {
        return Err(STRERR_UNDUMP_NON_ASCII);
    }
    if memchr::memchr(0, bytes).is_some() {
        return Err(STRERR_UNDUMP_NULL_BYTE);
    }
    let length = bytes.len();
    if length < 2 || bytes[0] != b'"' {
        return Err(STRERR_UNDUMP_INVALID_FORMAT);
    }

    let mut out = Vec::with_capacity(length);
    let mut result_enc = enc;
    let mut state = UndumpState::default();
    let mut s = 1;

    loop {
        if s >= length {
            return Err(STRERR_UNDUMP_UNTERMINATED);
        }
        match bytes[s] {
            b'"' => {
                s += 1;
                if s == length {
                    break;
                }
                if state.utf8 {
                    return Err(STRERR_UNDUMP_UNICODE_WITH_FORCE_ENCODING);
                }
                result_enc = undump_force_encoding(bytes, s)?;
                break;
            }
            b'\\' => {
                s += 1;
                if s >= length {
                    return Err(STRERR_UNDUMP_INVALID_ESCAPE);
                }
                s = undump_after_backslash(bytes, s, &mut out, &mut state, &mut result_enc)?;
            }
            c => {
                out.push(c);
                s += 1;
            }
        }
    }

    Ok((out, result_enc))
}

/// Parse `.force_encoding("NAME")` starting at s, which must run to the end.
fn undump_force_encoding(bytes: &[u8], s: usize) -> Result<OnigEncoding, i32> {
    let length = bytes.len();
    if length - s <= FORCE_ENCODING.len() || !bytes[s..].starts_with(FORCE_ENCODING) {
        return Err(STRERR_UNDUMP_INVALID_FORMAT);
    }
    let name_start = s + FORCE_ENCODING.len();
    let close = memchr::memchr(b'"', &bytes[name_start..])
        .map(|i| name_start + i)
        .ok_or(STRERR_UNDUMP_INVALID_FORMAT)?;
    if &bytes[close..] != b"\")" {
        return Err(STRERR_UNDUMP_INVALID_FORMAT);
    }
    std::str::from_utf8(&bytes[name_start..close])
        .ok()
        .and_then(find_encoding)
        .ok_or(STRERR_UNDUMP_UNKNOWN_ENCODING)
}

/// Append one code point from a `\u` escape as UTF-8.
fn put_unicode(out: &mut Vec<u8>, c: u32) -> Result<(), i32> {
    if c > 0x10ffff {
        return Err(STRERR_UNDUMP_CODEPOINT_TOO_LARGE);
    }
    if (0xd800..=0xdfff).contains(&c) {
        return Err(STRERR_UNDUMP_INVALID_CODEPOINT);
    }
    let mut buf = [0u8; ONIGENC_CODE_TO_MBC_MAXLEN];
    let n = ONIG_ENCODING_UTF8.code_to_mbc(c, &mut buf);
    if n <= 0 {
        return Err(STRERR_UNDUMP_INVALID_CODEPOINT);
    }
    out.extend_from_slice(&buf[..n as usize]);
    Ok(())
}

/// Handle the escape whose first byte is at s. Returns the position after it.
fn undump_after_backslash(
    bytes: &[u8],
    mut s: usize,
    out: &mut Vec<u8>,
    state: &mut UndumpState,
    result_enc: &mut OnigEncoding,
) -> Result<usize, i32> {
    let length = bytes.len();
    match bytes[s] {
        c @ (b'\\' | b'"' | b'#') => {
            out.push(c);
            s += 1;
        }
        b'u' => {
            if state.binary {
                return Err(STRERR_UNDUMP_MIXED_ESCAPE);
            }
            state.utf8 = true;
            s += 1;
            if s >= length {
                return Err(STRERR_UNDUMP_INVALID_UNICODE_ESCAPE);
            }
            *result_enc = &ONIG_ENCODING_UTF8;
            if bytes[s] == b'{' {
                s += 1;
                loop {
                    if s >= length {
                        return Err(STRERR_UNDUMP_UNTERMINATED_UNICODE_ESCAPE);
                    }
                    if bytes[s] == b'}' {
                        s += 1;
                        break;
                    }
                    if bytes[s] == b' ' {
                        s += 1;
                        continue;
                    }
                    let (c, hexlen) = scan_hex(bytes, s, length - s);
                    if hexlen == 0 || hexlen > 6 {
                        return Err(STRERR_UNDUMP_INVALID_UNICODE_ESCAPE);
                    }
                    put_unicode(out, c)?;
                    s += hexlen;
                }
            } else {
                let (c, hexlen) = scan_hex(bytes, s, 4);
                if hexlen != 4 {
                    return Err(STRERR_UNDUMP_INVALID_UNICODE_ESCAPE);
                }
                put_unicode(out, c)?;
                s += hexlen;
            }
        }
        b'x' => {
            if state.utf8 {
                return Err(STRERR_UNDUMP_MIXED_ESCAPE);
            }
            state.binary = true;
            s += 1;
            if s >= length {
                return Err(STRERR_UNDUMP_INVALID_HEX_ESCAPE);
            }
            let (c, hexlen) = scan_hex(bytes, s, 2);
            if hexlen != 2 {
                return Err(STRERR_UNDUMP_INVALID_HEX_ESCAPE);
            }
            out.push(c as u8);
            s += hexlen;
        }
        c => match unescape_ascii(c) {
            Some(u) => {
                out.push(u);
                s += 1;
            }
            None => {
                // Unknown escapes keep their backslash.
                out.push(b'\\');
                out.push(c);
                s += 1;
            }
        },
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encodings::*;

    fn d(enc: OnigEncoding, s: &[u8]) -> String {
        String::from_utf8(dump(enc, s)).unwrap()
    }

    #[test]
    fn dump_escapes() {
        let enc: OnigEncoding = &ONIG_ENCODING_UTF8;
        assert_eq!(d(enc, b"abc"), "\"abc\"");
        assert_eq!(d(enc, b"a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(d(enc, b"\n\t\x1b"), "\"\\n\\t\\e\"");
        assert_eq!(d(enc, b"#{x} #$y #@z #a"), "\"\\#{x} \\#$y \\#@z #a\"");
    }

    #[test]
    fn dump_unicode() {
        let enc: OnigEncoding = &ONIG_ENCODING_UTF8;
        assert_eq!(d(enc, "\u{e9}".as_bytes()), "\"\\u00E9\"");
        assert_eq!(d(enc, "\u{1f600}".as_bytes()), "\"\\u{1F600}\"");
        assert_eq!(d(enc, b"\x01"), "\"\\u0001\"");
        assert_eq!(d(enc, b"\xff"), "\"\\xFF\"");
    }

    #[test]
    fn dump_other_encodings() {
        assert_eq!(d(&ONIG_ENCODING_ISO_8859_1, b"\xe9"), "\"\\xE9\"");
        assert_eq!(
            d(&ONIG_ENCODING_UTF16LE, b"a\x00"),
            "\"a\\x00\".force_encoding(\"UTF-16LE\")"
        );
    }

    #[test]
    fn undump_basic() {
        let ascii: OnigEncoding = &ONIG_ENCODING_ASCII;
        let (b, e) = undump(ascii, b"\"a\\nb\\x41\"").unwrap();
        assert_eq!(b, b"a\nbA");
        assert_eq!(e.name(), "US-ASCII");

        let (b, e) = undump(ascii, b"\"\\u00e9\\u{1F600 41}\"").unwrap();
        assert_eq!(b, "\u{e9}\u{1f600}A".as_bytes());
        assert_eq!(e.name(), "UTF-8");

        let (b, e) = undump(ascii, b"\"a\\x00\".force_encoding(\"UTF-16LE\")").unwrap();
        assert_eq!(b, b"a\x00");
        assert_eq!(e.name(), "UTF-16LE");

        let (b, _) = undump(ascii, b"\"\\q\"").unwrap();
        assert_eq!(b, b"\\q");
    }

    fn undump_err(s: &[u8]) -> String {
        undump(&ONIG_ENCODING_ASCII, s).unwrap_err().to_string()
    }

    #[test]
    fn undump_errors() {
        assert_eq!(undump_err("\"\u{e9}\"".as_bytes()), "non-ASCII character detected");
        assert_eq!(undump_err(b"\"a\x00\""), "string contains null byte");
        assert!(undump_err(b"abc").starts_with("invalid dumped string"));
        assert_eq!(undump_err(b"\"abc"), "unterminated dumped string");
        assert_eq!(undump_err(b"\"\\x41\\u0041\""), "hex escape and Unicode escape are mixed");
        assert_eq!(undump_err(b"\"\\u0041\\x41\""), "hex escape and Unicode escape are mixed");
        assert_eq!(undump_err(b"\"\\uD800\""), "invalid Unicode codepoint");
        assert_eq!(undump_err(b"\"\\u{110000}\""), "invalid Unicode codepoint (too large)");
        assert_eq!(undump_err(b"\"\\u{41"), "unterminated Unicode escape");
        assert_eq!(undump_err(b"\"\\u{41\""), "invalid Unicode escape");
        assert_eq!(undump_err(b"\"\\u12\""), "invalid Unicode escape");
        assert_eq!(undump_err(b"\"\\xZ\""), "invalid hex escape");
        assert_eq!(
            undump_err(b"\"a\".force_encoding(\"NOPE\")"),
            "dumped string has unknown encoding name"
        );
        assert_eq!(
            undump_err(b"\"\\u0041\".force_encoding(\"UTF-8\")"),
            "dumped string contained Unicode escape but used force_encoding"
        );
        assert!(undump_err(b"\"a\"x").starts_with("invalid dumped string"));
    }

    #[test]
    fn round_trip_controls() {
        let enc: OnigEncoding = &ONIG_ENCODING_UTF8;
        let all: Vec<u8> = (0u8..0x80).collect();
        let (b, _) = undump(enc, &dump(enc, &all)).unwrap();
        assert_eq!(b, all);
        let bin: OnigEncoding = &ONIG_ENCODING_ASCII_8BIT;
        let all: Vec<u8> = (0u8..=0xff).collect();
        let (b, _) = undump(bin, &dump(bin, &all)).unwrap();
        assert_eq!(b, all);
    }

    #[test]
    fn scan_helpers() {
        assert_eq!(scan_hex(b"1fz", 0, 3), (0x1f, 2));
        assert_eq!(scan_hex(b"FFFF", 0, 2), (0xff, 2));
        assert_eq!(scan_oct(b"0789", 0, 3), (7, 2));
        assert_eq!(escaped_char_format(b'a' as u32, true), "a");
        assert_eq!(escaped_char_format(0x3042, true), "\\u3042");
        assert_eq!(escaped_char_format(0x7, false), "\\x07");
        assert_eq!(escaped_char_format(0x3042, false), "\\x{3042}");
    }
}
