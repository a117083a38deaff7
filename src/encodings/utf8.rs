// encodings/utf8.rs - UTF-8 encoding (RFC 3629 range: U+0000 - U+10FFFF).

use crate::defs::*;
use crate::enc::*;

// === UTF-8 Helpers ===

#[inline]
fn utf8_islead(c: u8) -> bool {
    (c & 0xc0) != 0x80
}

#[inline]
fn utf8_istail(c: u8) -> bool {
    (c & 0xc0) == 0x80
}

// === EncLen_UTF8 Table ===
// Maps first byte to character length (RFC 3629: max 4 bytes).

pub static ENC_LEN_UTF8: [u8; 256] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

/// Validated length of the UTF-8 sequence at the start of p.
/// Rejects overlongs, surrogates and anything above U+10FFFF.
pub fn utf8_precise_len(p: &[u8]) -> i32 {
    let Some(&b0) = p.first() else {
        return mbclen_needmore(1);
    };
    // (total length, accepted range for the second byte)
    let (need, lo, hi): (usize, u8, u8) = match b0 {
        0x00..=0x7f => return 1,
        0xc2..=0xdf => (2, 0x80, 0xbf),
        0xe0 => (3, 0xa0, 0xbf),
        0xe1..=0xec | 0xee..=0xef => (3, 0x80, 0xbf),
        0xed => (3, 0x80, 0x9f),
        0xf0 => (4, 0x90, 0xbf),
        0xf1..=0xf3 => (4, 0x80, 0xbf),
        0xf4 => (4, 0x80, 0x8f),
        _ => return MBCLEN_INVALID,
    };
    for i in 1..need {
        let Some(&b) = p.get(i) else {
            return mbclen_needmore((need - i) as i32);
        };
        let ok = if i == 1 {
            (lo..=hi).contains(&b)
        } else {
            utf8_istail(b)
        };
        if !ok {
            return MBCLEN_INVALID;
        }
    }
    need as i32
}

// === UTF-8 Encoding Struct ===

pub struct Utf8Encoding;

pub static ONIG_ENCODING_UTF8: Utf8Encoding = Utf8Encoding;

impl Encoding for Utf8Encoding {
    fn name(&self) -> &'static str {
        "UTF-8"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["CP65001", "UTF8"]
    }

    fn max_enc_len(&self) -> usize {
        4
    }

    fn min_enc_len(&self) -> usize {
        1
    }

    fn mbc_enc_len(&self, p: &[u8]) -> usize {
        ENC_LEN_UTF8[p[0] as usize] as usize
    }

    fn precise_mbc_enc_len(&self, p: &[u8]) -> i32 {
        utf8_precise_len(p)
    }

    fn mbc_to_code(&self, p: &[u8]) -> OnigCodePoint {
        let mut len = ENC_LEN_UTF8[p[0] as usize] as usize;
        if len > p.len() {
            len = p.len();
        }

        let c = p[0] as u32;
        if len > 1 {
            let remaining = len - 1;
            let mut n = c & ((1u32 << (6 - remaining)) - 1);
            for &b in &p[1..len] {
                n = (n << 6) | ((b as u32) & 0x3f);
            }
            n
        } else {
            c
        }
    }

    fn code_to_mbclen(&self, code: OnigCodePoint) -> i32 {
        if (code & 0xffffff80) == 0 {
            1
        } else if (code & 0xfffff800) == 0 {
            2
        } else if (0xd800..=0xdfff).contains(&code) {
            ONIGERR_INVALID_CODE_POINT_VALUE
        } else if (code & 0xffff0000) == 0 {
            3
        } else if code <= MAX_UNICODE_CODE_POINT {
            4
        } else {
            ONIGERR_TOO_BIG_WIDE_CHAR_VALUE
        }
    }

    fn code_to_mbc(&self, code: OnigCodePoint, buf: &mut [u8]) -> i32 {
        if (code & 0xffffff80) == 0 {
            buf[0] = code as u8;
            1
        } else {
            let mut i = 0;
            if (code & 0xfffff800) == 0 {
                buf[i] = ((code >> 6) & 0x1f) as u8 | 0xc0;
                i += 1;
            } else if (code & 0xffff0000) == 0 {
                buf[i] = ((code >> 12) & 0x0f) as u8 | 0xe0;
                i += 1;
                buf[i] = ((code >> 6) & 0x3f) as u8 | 0x80;
                i += 1;
            } else if code <= MAX_UNICODE_CODE_POINT {
                buf[i] = ((code >> 18) & 0x07) as u8 | 0xf0;
                i += 1;
                buf[i] = ((code >> 12) & 0x3f) as u8 | 0x80;
                i += 1;
                buf[i] = ((code >> 6) & 0x3f) as u8 | 0x80;
                i += 1;
            } else {
                return ONIGERR_TOO_BIG_WIDE_CHAR_VALUE;
            }
            buf[i] = (code & 0x3f) as u8 | 0x80;
            i += 1;
            i as i32
        }
    }

    fn is_code_ctype(&self, code: OnigCodePoint, ctype: u32) -> bool {
        crate::unicode::onigenc_unicode_is_code_ctype(code, ctype)
    }

    fn case_map(
        &self,
        flags: &mut CaseMapFlags,
        pp: &mut usize,
        end: usize,
        source: &[u8],
        to: &mut [u8],
    ) -> i32 {
        crate::unicode::onigenc_unicode_case_map(self, flags, pp, end, source, to)
    }

    fn left_adjust_char_head(&self, start: usize, s: usize, data: &[u8]) -> usize {
        if s <= start {
            return s;
        }
        let mut p = s;
        while !utf8_islead(data[p]) && p > start {
            p -= 1;
        }
        p
    }

    fn flag(&self) -> u32 {
        ENC_FLAG_ASCII_COMPATIBLE | ENC_FLAG_UNICODE
    }
}
