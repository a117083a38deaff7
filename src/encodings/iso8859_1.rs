// encodings/iso8859_1.rs - ISO-8859-1 (Latin-1).
// Single byte, every byte valid; ctype shares the Unicode table for < 256.

use crate::defs::*;
use crate::enc::*;
use crate::unicode::ENC_UNICODE_ISO_8859_1_CTYPE_TABLE;

const SHARP_S: u8 = 0xdf;

#[inline]
fn latin1_is_upper(c: u8) -> bool {
    c.is_ascii_uppercase() || ((0xc0..=0xde).contains(&c) && c != 0xd7)
}

#[inline]
fn latin1_is_lower(c: u8) -> bool {
    // 0xdf and 0xff have no single-byte uppercase; 0xaa, 0xb5, 0xba none at all.
    c.is_ascii_lowercase() || ((0xe0..=0xfe).contains(&c) && c != 0xf7)
}

pub struct Iso8859_1Encoding;

pub static ONIG_ENCODING_ISO_8859_1: Iso8859_1Encoding = Iso8859_1Encoding;

impl Encoding for Iso8859_1Encoding {
    fn name(&self) -> &'static str {
        "ISO-8859-1"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ISO8859-1", "LATIN1"]
    }

    fn max_enc_len(&self) -> usize {
        1
    }

    fn min_enc_len(&self) -> usize {
        1
    }

    fn mbc_enc_len(&self, _p: &[u8]) -> usize {
        1
    }

    fn precise_mbc_enc_len(&self, p: &[u8]) -> i32 {
        onigenc_single_byte_precise_len(p, |_| true)
    }

    fn mbc_to_code(&self, p: &[u8]) -> OnigCodePoint {
        onigenc_single_byte_mbc_to_code(p)
    }

    fn code_to_mbclen(&self, code: OnigCodePoint) -> i32 {
        onigenc_single_byte_code_to_mbclen(code)
    }

    fn code_to_mbc(&self, code: OnigCodePoint, buf: &mut [u8]) -> i32 {
        onigenc_single_byte_code_to_mbc(code, buf)
    }

    fn is_code_ctype(&self, code: OnigCodePoint, ctype: u32) -> bool {
        if code < 256 && ctype <= ONIGENC_MAX_STD_CTYPE {
            (ENC_UNICODE_ISO_8859_1_CTYPE_TABLE[code as usize] & ctype_to_bit(ctype) as u16) != 0
        } else {
            false
        }
    }

    fn case_map(
        &self,
        flags: &mut CaseMapFlags,
        pp: &mut usize,
        end: usize,
        source: &[u8],
        to: &mut [u8],
    ) -> i32 {
        let mut t = 0usize;
        while *pp < end && t + 2 <= to.len() {
            let c = source[*pp];
            *pp += 1;
            let ascii_only = flags.contains(CaseMapFlags::ASCII_ONLY) && c >= 0x80;

            if ascii_only {
                to[t] = c;
                t += 1;
            } else if c == SHARP_S
                && flags.contains(CaseMapFlags::UPCASE)
                && !flags.contains(CaseMapFlags::FOLD)
            {
                *flags |= CaseMapFlags::MODIFIED;
                to[t] = b'S';
                to[t + 1] = if flags.contains(CaseMapFlags::TITLECASE) { b's' } else { b'S' };
                t += 2;
            } else if flags.contains(CaseMapFlags::FOLD) {
                if latin1_is_upper(c) {
                    *flags |= CaseMapFlags::MODIFIED;
                    to[t] = c + 0x20;
                } else {
                    to[t] = c;
                }
                t += 1;
            } else if latin1_is_upper(c) && flags.contains(CaseMapFlags::DOWNCASE) {
                *flags |= CaseMapFlags::MODIFIED;
                to[t] = c + 0x20;
                t += 1;
            } else if latin1_is_lower(c) && flags.contains(CaseMapFlags::UPCASE) {
                *flags |= CaseMapFlags::MODIFIED;
                to[t] = c - 0x20;
                t += 1;
            } else {
                to[t] = c;
                t += 1;
            }

            if flags.contains(CaseMapFlags::TITLECASE) {
                *flags ^= CaseMapFlags::UPCASE | CaseMapFlags::DOWNCASE | CaseMapFlags::TITLECASE;
            }
        }
        t as i32
    }

    fn left_adjust_char_head(&self, _start: usize, s: usize, _data: &[u8]) -> usize {
        s
    }

    fn flag(&self) -> u32 {
        ENC_FLAG_ASCII_COMPATIBLE
    }
}
