// casemap.rs - upcase, downcase, swapcase and capitalize.
//
// ASCII content takes a byte-flipping fast path. Everything else walks
// characters and hands the ones that need mapping to the encoding's
// case_map, splicing the result back when the byte length changes.

use crate::coderange::*;
use crate::defs::*;
use crate::enc::*;
use crate::error::StrError;

/// Which case operation to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseMode {
    Upcase,
    Downcase,
    Swapcase,
    Capitalize,
}

impl CaseMode {
    fn initial_flags(self) -> CaseMapFlags {
        match self {
            CaseMode::Upcase => CaseMapFlags::UPCASE,
            CaseMode::Downcase => CaseMapFlags::DOWNCASE,
            CaseMode::Swapcase => CaseMapFlags::UPCASE | CaseMapFlags::DOWNCASE,
            CaseMode::Capitalize => CaseMapFlags::UPCASE | CaseMapFlags::TITLECASE,
        }
    }
}

/// Reject option bits that make no sense for `mode`.
pub fn check_case_options(options: CaseMapFlags, mode: CaseMode) -> Result<(), StrError> {
    if options.contains(CaseMapFlags::FOLD) && mode != CaseMode::Downcase {
        return Err(StrError::option(STRERR_FOLD_NOT_DOWNCASE, None));
    }
    Ok(())
}

/// Can this request be served by flipping ASCII bytes?
pub fn case_map_is_ascii_simple(enc: OnigEncoding, cr: CodeRange, options: CaseMapFlags) -> bool {
    if !onigenc_is_ascii_compatible_encoding(enc) {
        return false;
    }
    if options.contains(CaseMapFlags::ASCII_ONLY) {
        return true;
    }
    cr == CodeRange::Ascii
        && !options.intersects(CaseMapFlags::FOLD_TURKISH_AZERI | CaseMapFlags::FOLD_LITHUANIAN)
}

/// Map the case of `bytes`. Returns None when no character changed.
pub fn case_map(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    mode: CaseMode,
    options: CaseMapFlags,
) -> Result<Option<Vec<u8>>, StrError> {
    check_case_options(options, mode)?;
    let options = options & CaseMapFlags::OPTIONS;
    if bytes.is_empty() {
        return Ok(None);
    }
    if case_map_is_ascii_simple(enc, cr, options) {
        return Ok(case_map_ascii(enc, bytes, cr, mode));
    }
    case_map_complex(enc, bytes, cr, mode, options)
}

pub fn upcase(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    options: CaseMapFlags,
) -> Result<Option<Vec<u8>>, StrError> {
    case_map(enc, bytes, cr, CaseMode::Upcase, options)
}

pub fn downcase(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    options: CaseMapFlags,
) -> Result<Option<Vec<u8>>, StrError> {
    case_map(enc, bytes, cr, CaseMode::Downcase, options)
}

pub fn swapcase(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    options: CaseMapFlags,
) -> Result<Option<Vec<u8>>, StrError> {
    case_map(enc, bytes, cr, CaseMode::Swapcase, options)
}

pub fn capitalize(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    options: CaseMapFlags,
) -> Result<Option<Vec<u8>>, StrError> {
    case_map(enc, bytes, cr, CaseMode::Capitalize, options)
}

// === ASCII fast path ===

#[inline]
fn ascii_flip_wanted(b: u8, mode: CaseMode, first: bool) -> bool {
    match mode {
        CaseMode::Upcase => b.is_ascii_lowercase(),
        CaseMode::Downcase => b.is_ascii_uppercase(),
        CaseMode::Swapcase => b.is_ascii_alphabetic(),
        CaseMode::Capitalize => {
            if first {
                b.is_ascii_lowercase()
            } else {
                b.is_ascii_uppercase()
            }
        }
    }
}

/// Flip bit 0x20 on the ASCII letters that need it. The copy is made on
/// the first change.
pub fn case_map_ascii(enc: OnigEncoding, bytes: &[u8], cr: CodeRange, mode: CaseMode) -> Option<Vec<u8>> {
    let single = cr == CodeRange::Ascii || onigenc_is_singlebyte(enc);
    let end = bytes.len();
    let mut out: Option<Vec<u8>> = None;
    let mut s = 0usize;
    let mut first = true;

    while s < end {
        let b = bytes[s];
        if ascii_flip_wanted(b, mode, first) {
            out.get_or_insert_with(|| bytes.to_vec())[s] ^= 0x20;
            s += 1;
        } else if single {
            s += 1;
        } else {
            s += (character_length(enc, Some(cr), bytes, s, end, true) as usize).max(1);
        }
        first = false;
    }
    out
}

// === Complex path ===

/// Map the single character c at buf[s..] through the encoding, splicing
/// the result into buf. Returns the byte length now occupied by it.
fn case_map_char(
    enc: OnigEncoding,
    c: OnigCodePoint,
    buf: &mut Vec<u8>,
    s: usize,
    flags: &mut CaseMapFlags,
    work: &mut [u8; CASE_MAP_BUFFER_SIZE],
    modified: &mut bool,
) -> Result<usize, StrError> {
    let clen = code_length(enc, c);
    if clen <= 0 {
        return Err(StrError::invalid_byte_sequence(enc.name()));
    }
    let end = (s + clen as usize).min(buf.len());
    let mut pp = s;
    let n = enc.case_map(flags, &mut pp, end, buf, work);
    if n <= 0 {
        return Ok(end - s);
    }
    let n = n as usize;

    if buf[s..end] != work[..n] {
        if n != end - s {
            tracing::debug!(
                encoding = enc.name(),
                from = end - s,
                to = n,
                "case map: character changed byte length"
            );
        }
        buf.splice(s..end, work[..n].iter().copied());
        *modified = true;
    }
    Ok(n)
}

fn case_map_complex(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    mode: CaseMode,
    options: CaseMapFlags,
) -> Result<Option<Vec<u8>>, StrError> {
    let mut buf = bytes.to_vec();
    let mut work = [0u8; CASE_MAP_BUFFER_SIZE];
    let mut flags = options | mode.initial_flags();
    let turkic = options.is_turkic();
    let fold = options.contains(CaseMapFlags::FOLD);
    let inline_ascii = !turkic && onigenc_is_ascii_compatible_encoding(enc);
    let mut modified = false;
    let mut upcasing = true;
    let mut s = 0usize;

    while s < buf.len() {
        let b = buf[s];
        if inline_ascii && ascii_flip_wanted(b, mode, upcasing) {
            buf[s] ^= 0x20;
            modified = true;
            s += 1;
        } else {
            let c = code_point(enc, Some(cr), &buf, s, buf.len())?;
            let wanted = match mode {
                CaseMode::Upcase => onigenc_is_code_lower(enc, c),
                CaseMode::Downcase => fold || onigenc_is_code_upper(enc, c),
                CaseMode::Swapcase => {
                    onigenc_is_code_upper(enc, c) || onigenc_is_code_lower(enc, c)
                }
                CaseMode::Capitalize => {
                    if upcasing {
                        onigenc_is_code_lower(enc, c)
                    } else {
                        onigenc_is_code_upper(enc, c)
                    }
                }
            };
            if wanted {
                s += case_map_char(enc, c, &mut buf, s, &mut flags, &mut work, &mut modified)?;
            } else {
                let cl = code_length(enc, c);
                s += if cl > 0 {
                    cl as usize
                } else {
                    char_len_at(enc, &buf, s, buf.len())
                };
            }
        }

        if mode == CaseMode::Capitalize && upcasing {
            upcasing = false;
            flags = options | CaseMapFlags::DOWNCASE;
        }
    }

    Ok(modified.then_some(buf))
}
