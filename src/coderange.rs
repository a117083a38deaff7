// coderange.rs - Code range classification and character boundaries.
//
// Everything here works on (bytes, p, end) triples so callers can walk a
// buffer without re-slicing. Lengths follow the sentinel convention from
// `defs`: > 0 found, MBCLEN_INVALID, or mbclen_needmore(k).

use std::cmp::Ordering;

use crate::defs::*;
use crate::enc::*;
use crate::encodings::utf8::ENC_LEN_UTF8;
use crate::error::StrError;

// === Boundary policies ===

/// How much to trust the bytes when measuring a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// The code range is known to be Ascii or Valid; skip validation.
    Trusted,
    /// Always return a positive length, inventing one for bad bytes.
    Recover,
    /// Validate; report invalid and truncated sequences as sentinels.
    Precise,
}

// === Non-ASCII search ===

const WORD: usize = std::mem::size_of::<u64>();
const NONASCII_MASK: u64 = 0x8080_8080_8080_8080;

/// Offset of the first byte >= 0x80 in bytes[p..end], scanning a word at
/// a time.
pub fn search_nonascii(bytes: &[u8], p: usize, end: usize) -> Option<usize> {
    let region = &bytes[p..end];
    let mut chunks = region.chunks_exact(WORD);
    let mut base = p;
    for chunk in &mut chunks {
        let mut w = [0u8; WORD];
        w.copy_from_slice(chunk);
        if u64::from_ne_bytes(w) & NONASCII_MASK != 0 {
            let i = chunk.iter().position(|&b| b >= 0x80).unwrap_or(0);
            return Some(base + i);
        }
        base += WORD;
    }
    chunks
        .remainder()
        .iter()
        .position(|&b| b >= 0x80)
        .map(|i| base + i)
}

// === Character length ===

/// Validated length of the character at p. Never reads past end.
pub fn enc_precise_mbclen(enc: OnigEncoding, bytes: &[u8], p: usize, end: usize) -> i32 {
    if p >= end {
        return mbclen_needmore(1);
    }
    let n = enc.precise_mbc_enc_len(&bytes[p..end]);
    let avail = (end - p) as i32;
    if n > avail {
        return mbclen_needmore(n - avail);
    }
    n
}

/// Length of the character at p, falling back to the encoding's minimum
/// width (clamped to what is left) for bad bytes. Always positive when
/// p < end.
pub fn enc_mbclen(enc: OnigEncoding, bytes: &[u8], p: usize, end: usize) -> usize {
    let n = enc.precise_mbc_enc_len(&bytes[p..end]);
    if mbclen_charfound_p(n) && n as usize <= end - p {
        return n as usize;
    }
    enc.min_enc_len().min(end - p)
}

/// Length of the character at p for bytes already known to be valid.
pub fn enc_fast_mbclen(enc: OnigEncoding, bytes: &[u8], p: usize, end: usize) -> usize {
    let b = bytes[p];
    let n = if onigenc_is_utf8(enc) {
        ENC_LEN_UTF8[b as usize] as usize
    } else if onigenc_is_ascii_compatible_encoding(enc) && b < 0x80 {
        1
    } else if onigenc_is_fixed_width(enc) {
        enc.min_enc_len()
    } else {
        enc.mbc_enc_len(&bytes[p..end])
    };
    n.min(end - p)
}

/// Length of the character at p under `policy`. Callers guarantee p < end.
pub fn boundary_length(
    enc: OnigEncoding,
    bytes: &[u8],
    p: usize,
    end: usize,
    policy: BoundaryPolicy,
) -> i32 {
    debug_assert!(p < end && end <= bytes.len());
    match policy {
        BoundaryPolicy::Trusted => enc_fast_mbclen(enc, bytes, p, end) as i32,
        BoundaryPolicy::Recover => enc_mbclen(enc, bytes, p, end) as i32,
        BoundaryPolicy::Precise => enc_precise_mbclen(enc, bytes, p, end),
    }
}

/// Length of the character at p given a code range snapshot. Ascii means
/// one byte, Valid is trusted, Broken (or unknown) is either recovered or
/// checked precisely.
pub fn character_length(
    enc: OnigEncoding,
    cr: Option<CodeRange>,
    bytes: &[u8],
    p: usize,
    end: usize,
    recover: bool,
) -> i32 {
    match cr {
        Some(CodeRange::Ascii) => 1,
        Some(CodeRange::Valid) => enc_fast_mbclen(enc, bytes, p, end) as i32,
        Some(CodeRange::Broken) | None => {
            if recover {
                enc_mbclen(enc, bytes, p, end) as i32
            } else {
                enc_precise_mbclen(enc, bytes, p, end)
            }
        }
    }
}

// === Classification ===

/// Classify bytes[p..end] as Ascii, Valid or Broken under `enc`.
pub fn coderange_scan(enc: OnigEncoding, bytes: &[u8], p: usize, end: usize) -> CodeRange {
    let mut p = p;
    if onigenc_is_ascii_compatible_encoding(enc) {
        match search_nonascii(bytes, p, end) {
            None => return CodeRange::Ascii,
            Some(q) => p = q,
        }
        while p < end {
            let ret = enc_precise_mbclen(enc, bytes, p, end);
            if !mbclen_charfound_p(ret) {
                return CodeRange::Broken;
            }
            p += ret as usize;
            if p < end {
                match search_nonascii(bytes, p, end) {
                    None => break,
                    Some(q) => p = q,
                }
            }
        }
        return CodeRange::Valid;
    }

    if p == end {
        return CodeRange::Ascii;
    }
    while p < end {
        let ret = enc_precise_mbclen(enc, bytes, p, end);
        if !mbclen_charfound_p(ret) {
            return CodeRange::Broken;
        }
        p += ret as usize;
    }
    CodeRange::Valid
}

/// Classify a whole buffer.
#[inline]
pub fn classify(enc: OnigEncoding, bytes: &[u8]) -> CodeRange {
    coderange_scan(enc, bytes, 0, bytes.len())
}

// === Character counting ===

/// Number of characters in bytes[p..end]. `cr` is the caller's cached
/// code range, if any.
pub fn enc_strlen(
    enc: OnigEncoding,
    bytes: &[u8],
    p: usize,
    end: usize,
    cr: Option<CodeRange>,
) -> usize {
    if onigenc_is_fixed_width(enc) {
        let min = enc.min_enc_len();
        return (end - p + min - 1) / min;
    }

    let mut p = p;
    let mut c = 0usize;
    if onigenc_is_ascii_compatible_encoding(enc) {
        while p < end {
            if bytes[p] < 0x80 {
                match search_nonascii(bytes, p, end) {
                    None => return c + (end - p),
                    Some(q) => {
                        c += q - p;
                        p = q;
                    }
                }
            }
            p += character_length(enc, cr, bytes, p, end, true) as usize;
            c += 1;
        }
        return c;
    }

    while p < end {
        p += character_length(enc, cr, bytes, p, end, true) as usize;
        c += 1;
    }
    c
}

/// Count characters and classify in one pass. A bad byte counts as one
/// character.
pub fn enc_strlen_cr(enc: OnigEncoding, bytes: &[u8], p: usize, end: usize) -> (usize, CodeRange) {
    let mut p = p;
    let mut c = 0usize;
    let mut cr: Option<CodeRange> = None;
    let ascii_compat = onigenc_is_ascii_compatible_encoding(enc);

    while p < end {
        if ascii_compat && bytes[p] < 0x80 {
            match search_nonascii(bytes, p, end) {
                None => {
                    return (c + (end - p), cr.unwrap_or(CodeRange::Ascii));
                }
                Some(q) => {
                    c += q - p;
                    p = q;
                }
            }
        }
        let cl = enc_precise_mbclen(enc, bytes, p, end);
        if cl > 0 {
            if cr != Some(CodeRange::Broken) {
                cr = Some(CodeRange::Valid);
            }
            p += cl as usize;
        } else {
            cr = Some(CodeRange::Broken);
            p += if ascii_compat { 1 } else { enc.min_enc_len() };
        }
        c += 1;
    }
    (c, cr.unwrap_or(CodeRange::Ascii))
}

// === Code points ===

/// Decode the character at p, failing on an empty range or bad bytes.
pub fn code_point(
    enc: OnigEncoding,
    cr: Option<CodeRange>,
    bytes: &[u8],
    p: usize,
    end: usize,
) -> Result<OnigCodePoint, StrError> {
    if p >= end {
        return Err(StrError::EmptyString);
    }
    let cl = character_length(enc, cr, bytes, p, end, false);
    if cl <= 0 {
        return Err(StrError::invalid_byte_sequence(enc.name()));
    }
    Ok(enc.mbc_to_code(&bytes[p..end]))
}

/// Decode the character at p with full validation, returning it with its
/// byte length.
pub fn enc_codepoint_len(
    enc: OnigEncoding,
    bytes: &[u8],
    p: usize,
    end: usize,
) -> Result<(OnigCodePoint, usize), StrError> {
    if p >= end {
        return Err(StrError::EmptyString);
    }
    let r = enc_precise_mbclen(enc, bytes, p, end);
    if !mbclen_charfound_p(r) {
        return Err(StrError::invalid_byte_sequence(enc.name()));
    }
    Ok((enc.mbc_to_code(&bytes[p..end]), r as usize))
}

/// Like `code_point` but yields None for bad bytes.
pub fn precise_code_point(
    enc: OnigEncoding,
    cr: Option<CodeRange>,
    bytes: &[u8],
    p: usize,
    end: usize,
) -> Option<OnigCodePoint> {
    if p >= end {
        return None;
    }
    if character_length(enc, cr, bytes, p, end, false) > 0 {
        Some(enc.mbc_to_code(&bytes[p..end]))
    } else {
        None
    }
}

/// Byte length of code point c under `enc`, or a negative ONIGERR code.
#[inline]
pub fn code_length(enc: OnigEncoding, c: OnigCodePoint) -> i32 {
    enc.code_to_mbclen(c)
}

/// Encode code point c under `enc`, checking that the bytes read back as
/// exactly one character.
pub fn code_to_bytes(enc: OnigEncoding, c: OnigCodePoint) -> Result<Vec<u8>, StrError> {
    let invalid = || {
        let param = format!("0x{:X} in {}", c, enc.name());
        StrError::range(STRERR_INVALID_CODEPOINT, param.as_bytes())
    };
    let n = match code_length(enc, c) {
        ONIGERR_INVALID_CODE_POINT_VALUE => return Err(invalid()),
        n if n <= 0 => {
            return Err(StrError::range(
                STRERR_OUT_OF_CHAR_RANGE,
                c.to_string().as_bytes(),
            ))
        }
        n => n,
    };
    let mut buf = vec![0u8; enc.max_enc_len().max(n as usize)];
    let written = enc.code_to_mbc(c, &mut buf);
    if written != n {
        return Err(invalid());
    }
    buf.truncate(n as usize);
    if enc_precise_mbclen(enc, &buf, 0, buf.len()) != n {
        return Err(invalid());
    }
    Ok(buf)
}

/// Fetch the character at p only if it is ASCII; returns it with its byte
/// length.
pub fn enc_ascget(
    enc: OnigEncoding,
    bytes: &[u8],
    p: usize,
    end: usize,
) -> Option<(OnigCodePoint, usize)> {
    if p >= end {
        return None;
    }
    if onigenc_is_ascii_compatible_encoding(enc) {
        let c = bytes[p];
        return if c < 0x80 { Some((c as OnigCodePoint, 1)) } else { None };
    }
    let l = enc_precise_mbclen(enc, bytes, p, end);
    if !mbclen_charfound_p(l) {
        return None;
    }
    let c = enc.mbc_to_code(&bytes[p..end]);
    if onigenc_is_code_ascii(c) {
        Some((c, l as usize))
    } else {
        None
    }
}

// === Comparison ===

/// Case-insensitive comparison of two buffers in the same encoding. ASCII
/// letters compare folded; everything else compares bytewise per
/// character, and a shorter character orders first.
pub fn multi_byte_casecmp(
    enc: OnigEncoding,
    a: &[u8],
    a_cr: Option<CodeRange>,
    b: &[u8],
    b_cr: Option<CodeRange>,
) -> Ordering {
    let ascii_compat = onigenc_is_ascii_compatible_encoding(enc);
    let (mut p, end) = (0usize, a.len());
    let (mut op, oend) = (0usize, b.len());

    while p < end && op < oend {
        let (c, oc) = if ascii_compat {
            (Some(a[p] as OnigCodePoint), Some(b[op] as OnigCodePoint))
        } else {
            (
                precise_code_point(enc, a_cr, a, p, end),
                precise_code_point(enc, b_cr, b, op, oend),
            )
        };

        let (cl, ocl);
        match (c, oc) {
            (Some(c), Some(oc))
                if ascii_compat && onigenc_is_code_ascii(c) && onigenc_is_code_ascii(oc) =>
            {
                let uc = onigenc_ascii_code_to_upper_case(c as u8);
                let uoc = onigenc_ascii_code_to_upper_case(oc as u8);
                if uc != uoc {
                    return uc.cmp(&uoc);
                }
                cl = 1;
                ocl = 1;
            }
            _ => {
                cl = character_length(enc, a_cr, a, p, end, true) as usize;
                ocl = character_length(enc, b_cr, b, op, oend, true) as usize;
                let n = cl.min(ocl);
                let ord = a[p..p + n].cmp(&b[op..op + n]);
                if ord != Ordering::Equal {
                    return ord;
                }
                if cl != ocl {
                    return cl.cmp(&ocl);
                }
            }
        }
        p += cl;
        op += ocl;
    }
    (end - p).cmp(&(oend - op))
}
