// succ.rs - String successor.
//
// Increments the rightmost alphanumeric character, carrying leftwards
// through alphanumerics of the same kind. Strings without any
// alphanumeric fall back to a plain byte-wise increment.

use crate::coderange::enc_precise_mbclen;
use crate::defs::*;
use crate::enc::*;

/// Outcome of stepping one character to its neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborChar {
    /// The bytes do not form a character that can be stepped.
    NotChar,
    /// A neighbor was written in place.
    Found,
    /// The character rolled over.
    Wrapped,
}

// === Single character stepping ===

/// Increment the character in bytes[p..p + len] in place.
pub fn enc_succ_char(enc: OnigEncoding, bytes: &mut [u8], p: usize, len: usize) -> NeighborChar {
    if enc.min_enc_len() > 1 {
        // Wide characters step by code point.
        if !mbclen_charfound_p(enc_precise_mbclen(enc, bytes, p, p + len)) {
            return NeighborChar::NotChar;
        }
        let c = enc.mbc_to_code(&bytes[p..p + len]).wrapping_add(1);
        return put_wide(enc, bytes, p, len, c);
    }

    loop {
        let mut i = len;
        while i > 0 && bytes[p + i - 1] == 0xff {
            bytes[p + i - 1] = 0;
            i -= 1;
        }
        if i == 0 {
            return NeighborChar::Wrapped;
        }
        let i = i - 1;
        bytes[p + i] = bytes[p + i].wrapping_add(1);

        let l = enc_precise_mbclen(enc, bytes, p, p + len);
        if mbclen_charfound_p(l) {
            let l = l as usize;
            if l == len {
                return NeighborChar::Found;
            }
            bytes[p + l..p + len].fill(0xff);
        }
        if mbclen_invalid_p(l) && i < len - 1 {
            let len2 = longest_valid_prefix(enc, bytes, p, len);
            bytes[p + len2 + 1..p + len].fill(0xff);
        }
    }
}

/// Decrement the character in bytes[p..p + len] in place.
pub fn enc_pred_char(enc: OnigEncoding, bytes: &mut [u8], p: usize, len: usize) -> NeighborChar {
    if enc.min_enc_len() > 1 {
        if !mbclen_charfound_p(enc_precise_mbclen(enc, bytes, p, p + len)) {
            return NeighborChar::NotChar;
        }
        let c = enc.mbc_to_code(&bytes[p..p + len]);
        if c == 0 {
            return NeighborChar::NotChar;
        }
        return put_wide(enc, bytes, p, len, c - 1);
    }

    loop {
        let mut i = len;
        while i > 0 && bytes[p + i - 1] == 0 {
            bytes[p + i - 1] = 0xff;
            i -= 1;
        }
        if i == 0 {
            return NeighborChar::Wrapped;
        }
        let i = i - 1;
        bytes[p + i] = bytes[p + i].wrapping_sub(1);

        let l = enc_precise_mbclen(enc, bytes, p, p + len);
        if mbclen_charfound_p(l) {
            let l = l as usize;
            if l == len {
                return NeighborChar::Found;
            }
            bytes[p + l..p + len].fill(0);
        }
        if !mbclen_charfound_p(l) && i < len - 1 {
            let len2 = longest_valid_prefix(enc, bytes, p, len);
            bytes[p + len2 + 1..p + len].fill(0);
        }
    }
}

/// Length of the longest prefix shorter than len that is not definitively
/// invalid (0 when none is).
fn longest_valid_prefix(enc: OnigEncoding, bytes: &[u8], p: usize, len: usize) -> usize {
    let mut len2 = len - 1;
    while len2 > 0 {
        if !mbclen_invalid_p(enc_precise_mbclen(enc, bytes, p, p + len2)) {
            break;
        }
        len2 -= 1;
    }
    len2
}

/// Write code point c over a wide character of width len.
fn put_wide(enc: OnigEncoding, bytes: &mut [u8], p: usize, len: usize, c: OnigCodePoint) -> NeighborChar {
    let l = enc.code_to_mbclen(c);
    if l <= 0 {
        return NeighborChar::NotChar;
    }
    if l as usize != len {
        return NeighborChar::Wrapped;
    }
    let mut tmp = [0u8; ONIGENC_CODE_TO_MBC_MAXLEN];
    enc.code_to_mbc(c, &mut tmp);
    bytes[p..p + len].copy_from_slice(&tmp[..len]);
    if !mbclen_charfound_p(enc_precise_mbclen(enc, bytes, p, p + len)) {
        return NeighborChar::NotChar;
    }
    NeighborChar::Found
}

/// Increment an alphanumeric character, staying within its class. On
/// rollover the character is reset to the first of its run and `carry`
/// receives what must be inserted to its left.
pub fn enc_succ_alnum_char(
    enc: OnigEncoding,
    bytes: &mut [u8],
    p: usize,
    len: usize,
    carry: &mut [u8],
) -> NeighborChar {
    let c = enc.mbc_to_code(&bytes[p..p + len]);
    let ctype = if enc.is_code_ctype(c, ONIGENC_CTYPE_DIGIT) {
        ONIGENC_CTYPE_DIGIT
    } else if enc.is_code_ctype(c, ONIGENC_CTYPE_ALPHA) {
        ONIGENC_CTYPE_ALPHA
    } else {
        return NeighborChar::NotChar;
    };

    let mut save = [0u8; ONIGENC_CODE_TO_MBC_MAXLEN];
    save[..len].copy_from_slice(&bytes[p..p + len]);
    if enc_succ_char(enc, bytes, p, len) == NeighborChar::Found {
        let c = enc.mbc_to_code(&bytes[p..p + len]);
        if enc.is_code_ctype(c, ctype) {
            return NeighborChar::Found;
        }
    }
    bytes[p..p + len].copy_from_slice(&save[..len]);

    // Walk back to the first character of the run.
    let mut range = 1;
    loop {
        save[..len].copy_from_slice(&bytes[p..p + len]);
        let ret = enc_pred_char(enc, bytes, p, len);
        if ret != NeighborChar::Found
            || !enc.is_code_ctype(enc.mbc_to_code(&bytes[p..p + len]), ctype)
        {
            bytes[p..p + len].copy_from_slice(&save[..len]);
            break;
        }
        range += 1;
    }
    if range == 1 {
        return NeighborChar::NotChar;
    }

    carry[..len].copy_from_slice(&bytes[p..p + len]);
    if ctype == ONIGENC_CTYPE_DIGIT {
        // "9" carries "1", not "0".
        enc_succ_char(enc, carry, 0, len);
    }
    NeighborChar::Wrapped
}

/// Do two adjacent alphanumerics belong to different kinds (letter vs
/// digit)? Only ASCII participates.
#[inline]
fn alnum_kind_boundary(last: u8, cur: u8) -> bool {
    if last.is_ascii_alphabetic() {
        cur.is_ascii_digit()
    } else if last.is_ascii_digit() {
        cur.is_ascii_alphabetic()
    } else {
        false
    }
}

// === String successor ===

/// The successor of `bytes` under `enc`.
pub fn succ(enc: OnigEncoding, bytes: &[u8]) -> Vec<u8> {
    let mut buf = bytes.to_vec();
    if buf.is_empty() {
        return buf;
    }

    let mut carry = [0u8; ONIGENC_CODE_TO_MBC_MAXLEN];
    carry[0] = 1;
    let mut carry_len = 1usize;
    let mut carry_p = 0usize;

    let end = buf.len();
    let mut s = end;
    let mut neighbor = NeighborChar::Found;
    let mut last_alnum: Option<usize> = None;
    let mut alnum_seen = false;

    while let Some(prev) = onigenc_get_prev_char_head(enc, 0, s, &buf) {
        s = prev;
        if neighbor == NeighborChar::NotChar {
            if let Some(la) = last_alnum {
                if alnum_kind_boundary(buf[la], buf[s]) {
                    break;
                }
            }
        }

        let cl = enc_precise_mbclen(enc, &buf, s, end);
        if cl <= 0 {
            continue;
        }
        let cl = cl as usize;
        neighbor = enc_succ_alnum_char(enc, &mut buf, s, cl, &mut carry);
        match neighbor {
            NeighborChar::NotChar => continue,
            NeighborChar::Found => return buf,
            NeighborChar::Wrapped => last_alnum = Some(s),
        }
        alnum_seen = true;
        carry_p = s;
        carry_len = cl;
    }

    if !alnum_seen {
        let ascii_compat = onigenc_is_ascii_compatible_encoding(enc);
        s = end;
        while let Some(prev) = onigenc_get_prev_char_head(enc, 0, s, &buf) {
            s = prev;
            let cl = enc_precise_mbclen(enc, &buf, s, end);
            if cl <= 0 {
                continue;
            }
            let cl = cl as usize;
            if enc_succ_char(enc, &mut buf, s, cl) == NeighborChar::Found {
                return buf;
            }
            if enc_precise_mbclen(enc, &buf, s, s + 1) != cl as i32 {
                // Wrapped to all zero bytes; step to the next valid character.
                enc_succ_char(enc, &mut buf, s, cl);
            }
            if !ascii_compat {
                carry[..cl].copy_from_slice(&buf[s..s + cl]);
                carry_len = cl;
            }
            carry_p = s;
        }
    }

    buf.splice(carry_p..carry_p, carry[..carry_len].iter().copied());
    buf
}
