// encodings/shift_jis.rs - Shift_JIS.
// Lead bytes 0x81-0x9F and 0xE0-0xFC take a trail byte in 0x40-0x7E or
// 0x80-0xFC; 0xA1-0xDF are single-byte half-width katakana.

use crate::defs::*;
use crate::enc::*;
use crate::encodings::euc_jp::dbcs_is_code_ctype;

#[inline]
fn sjis_is_lead(b: u8) -> bool {
    matches!(b, 0x81..=0x9f | 0xe0..=0xfc)
}

#[inline]
fn sjis_is_trail(b: u8) -> bool {
    matches!(b, 0x40..=0x7e | 0x80..=0xfc)
}

#[inline]
fn sjis_is_single(b: u8) -> bool {
    b < 0x80 || (0xa1..=0xdf).contains(&b)
}

pub struct ShiftJisEncoding;

pub static ONIG_ENCODING_SHIFT_JIS: ShiftJisEncoding = ShiftJisEncoding;

impl Encoding for ShiftJisEncoding {
    fn name(&self) -> &'static str {
        "Shift_JIS"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["SJIS"]
    }

    fn max_enc_len(&self) -> usize {
        2
    }

    fn min_enc_len(&self) -> usize {
        1
    }

    fn mbc_enc_len(&self, p: &[u8]) -> usize {
        if sjis_is_lead(p[0]) {
            2
        } else {
            1
        }
    }

    fn precise_mbc_enc_len(&self, p: &[u8]) -> i32 {
        let Some(&b0) = p.first() else {
            return mbclen_needmore(1);
        };
        if sjis_is_single(b0) {
            return 1;
        }
        if !sjis_is_lead(b0) {
            return MBCLEN_INVALID;
        }
        match p.get(1) {
            None => mbclen_needmore(1),
            Some(&b) if sjis_is_trail(b) => 2,
            Some(_) => MBCLEN_INVALID,
        }
    }

    fn mbc_to_code(&self, p: &[u8]) -> OnigCodePoint {
        if sjis_is_lead(p[0]) && p.len() >= 2 {
            ((p[0] as OnigCodePoint) << 8) | p[1] as OnigCodePoint
        } else {
            p[0] as OnigCodePoint
        }
    }

    fn code_to_mbclen(&self, code: OnigCodePoint) -> i32 {
        if code < 0x100 {
            if sjis_is_single(code as u8) {
                1
            } else {
                ONIGERR_INVALID_CODE_POINT_VALUE
            }
        } else if code <= 0xffff {
            if sjis_is_lead((code >> 8) as u8) && sjis_is_trail((code & 0xff) as u8) {
                2
            } else {
                ONIGERR_INVALID_CODE_POINT_VALUE
            }
        } else {
            ONIGERR_TOO_BIG_WIDE_CHAR_VALUE
        }
    }

    fn code_to_mbc(&self, code: OnigCodePoint, buf: &mut [u8]) -> i32 {
        if code > 0xff {
            buf[0] = ((code >> 8) & 0xff) as u8;
            buf[1] = (code & 0xff) as u8;
            2
        } else {
            buf[0] = code as u8;
            1
        }
    }

    fn is_code_ctype(&self, code: OnigCodePoint, ctype: u32) -> bool {
        dbcs_is_code_ctype(self, code, ctype)
    }

    fn case_map(
        &self,
        flags: &mut CaseMapFlags,
        pp: &mut usize,
        end: usize,
        source: &[u8],
        to: &mut [u8],
    ) -> i32 {
        onigenc_ascii_only_case_map(self, flags, pp, end, source, to)
    }

    fn left_adjust_char_head(&self, start: usize, s: usize, data: &[u8]) -> usize {
        onigenc_forward_left_adjust_char_head(self, start, s, data)
    }

    fn flag(&self) -> u32 {
        ENC_FLAG_ASCII_COMPATIBLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precise_len() {
        let enc = &ONIG_ENCODING_SHIFT_JIS;
        // "あ" = 82 A0
        assert_eq!(enc.precise_mbc_enc_len(b"\x82\xa0"), 2);
        assert_eq!(enc.precise_mbc_enc_len(b"\xb1"), 1);
        assert_eq!(enc.precise_mbc_enc_len(b"\x82"), mbclen_needmore(1));
        assert_eq!(enc.precise_mbc_enc_len(b"\x82\x20"), MBCLEN_INVALID);
        assert_eq!(enc.precise_mbc_enc_len(b"\xa0"), MBCLEN_INVALID);
    }

    #[test]
    fn test_trail_overlaps_ascii() {
        // 0x5C is a valid trail byte ("表" = 95 5C).
        let enc = &ONIG_ENCODING_SHIFT_JIS;
        let data = b"\x95\x5c";
        assert_eq!(enc.precise_mbc_enc_len(data), 2);
        assert_eq!(enc.left_adjust_char_head(0, 1, data), 0);
        assert_eq!(enc.mbc_to_code(data), 0x955c);
    }

    #[test]
    fn test_code_to_mbclen() {
        let enc = &ONIG_ENCODING_SHIFT_JIS;
        assert_eq!(enc.code_to_mbclen(0x41), 1);
        assert_eq!(enc.code_to_mbclen(0xb1), 1);
        assert_eq!(enc.code_to_mbclen(0x82a0), 2);
        assert!(enc.code_to_mbclen(0x80) < 0);
        assert!(enc.code_to_mbclen(0x4141) < 0);
    }
}
