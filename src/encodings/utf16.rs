// encodings/utf16.rs - UTF-16LE and UTF-16BE.
// Two-byte code units with surrogate pairs; not ASCII compatible.

use crate::defs::*;
use crate::enc::*;

pub struct Utf16Encoding {
    big_endian: bool,
}

pub static ONIG_ENCODING_UTF16LE: Utf16Encoding = Utf16Encoding { big_endian: false };
pub static ONIG_ENCODING_UTF16BE: Utf16Encoding = Utf16Encoding { big_endian: true };

#[inline]
fn is_high_surrogate(u: u32) -> bool {
    (0xd800..=0xdbff).contains(&u)
}

#[inline]
fn is_low_surrogate(u: u32) -> bool {
    (0xdc00..=0xdfff).contains(&u)
}

impl Utf16Encoding {
    #[inline]
    fn unit(&self, p: &[u8], i: usize) -> u32 {
        let (a, b) = (p[i] as u32, p[i + 1] as u32);
        if self.big_endian {
            (a << 8) | b
        } else {
            (b << 8) | a
        }
    }

    #[inline]
    fn put_unit(&self, u: u32, buf: &mut [u8]) {
        let (hi, lo) = (((u >> 8) & 0xff) as u8, (u & 0xff) as u8);
        if self.big_endian {
            buf[0] = hi;
            buf[1] = lo;
        } else {
            buf[0] = lo;
            buf[1] = hi;
        }
    }
}

impl Encoding for Utf16Encoding {
    fn name(&self) -> &'static str {
        if self.big_endian {
            "UTF-16BE"
        } else {
            "UTF-16LE"
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        if self.big_endian {
            &["UCS-2BE"]
        } else {
            &[]
        }
    }

    fn max_enc_len(&self) -> usize {
        4
    }

    fn min_enc_len(&self) -> usize {
        2
    }

    fn mbc_enc_len(&self, p: &[u8]) -> usize {
        if p.len() < 2 {
            return p.len().max(1);
        }
        if is_high_surrogate(self.unit(p, 0)) {
            4
        } else {
            2
        }
    }

    fn precise_mbc_enc_len(&self, p: &[u8]) -> i32 {
        if p.len() < 2 {
            return mbclen_needmore((2 - p.len()) as i32);
        }
        let u = self.unit(p, 0);
        if is_low_surrogate(u) {
            return MBCLEN_INVALID;
        }
        if !is_high_surrogate(u) {
            return 2;
        }
        if p.len() < 4 {
            return mbclen_needmore((4 - p.len()) as i32);
        }
        if is_low_surrogate(self.unit(p, 2)) {
            4
        } else {
            MBCLEN_INVALID
        }
    }

    fn mbc_to_code(&self, p: &[u8]) -> OnigCodePoint {
        if p.len() < 2 {
            return p.first().copied().unwrap_or(0) as OnigCodePoint;
        }
        let u = self.unit(p, 0);
        if is_high_surrogate(u) && p.len() >= 4 {
            let l = self.unit(p, 2);
            0x10000 + (((u - 0xd800) << 10) | (l.wrapping_sub(0xdc00) & 0x3ff))
        } else {
            u
        }
    }

    fn code_to_mbclen(&self, code: OnigCodePoint) -> i32 {
        if (0xd800..=0xdfff).contains(&code) {
            ONIGERR_INVALID_CODE_POINT_VALUE
        } else if code <= 0xffff {
            2
        } else if code <= MAX_UNICODE_CODE_POINT {
            4
        } else {
            ONIGERR_TOO_BIG_WIDE_CHAR_VALUE
        }
    }

    fn code_to_mbc(&self, code: OnigCodePoint, buf: &mut [u8]) -> i32 {
        if code <= 0xffff {
            self.put_unit(code, buf);
            2
        } else if code <= MAX_UNICODE_CODE_POINT {
            let c = code - 0x10000;
            self.put_unit(0xd800 | (c >> 10), &mut buf[0..2]);
            self.put_unit(0xdc00 | (c & 0x3ff), &mut buf[2..4]);
            4
        } else {
            ONIGERR_TOO_BIG_WIDE_CHAR_VALUE
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
        let mut p = start + ((s - start) & !1);
        if p >= start + 2 && p + 1 < data.len() {
            let u = self.unit(data, p);
            if is_low_surrogate(u) && is_high_surrogate(self.unit(data, p - 2)) {
                p -= 2;
            }
        }
        p
    }

    fn flag(&self) -> u32 {
        ENC_FLAG_UNICODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_le() {
        let enc = &ONIG_ENCODING_UTF16LE;
        assert_eq!(enc.precise_mbc_enc_len(b"a\x00"), 2);
        assert_eq!(enc.precise_mbc_enc_len(b"a"), mbclen_needmore(1));
        // U+1F600 = D83D DE00
        assert_eq!(enc.precise_mbc_enc_len(b"\x3d\xd8\x00\xde"), 4);
        assert_eq!(enc.precise_mbc_enc_len(b"\x3d\xd8"), mbclen_needmore(2));
        assert_eq!(enc.precise_mbc_enc_len(b"\x00\xde"), MBCLEN_INVALID);
        assert_eq!(enc.precise_mbc_enc_len(b"\x3d\xd8a\x00"), MBCLEN_INVALID);
    }

    #[test]
    fn test_code_roundtrip_be() {
        let enc = &ONIG_ENCODING_UTF16BE;
        let mut buf = [0u8; 4];
        assert_eq!(enc.code_to_mbc(0x1f600, &mut buf), 4);
        assert_eq!(&buf, b"\xd8\x3d\xde\x00");
        assert_eq!(enc.mbc_to_code(&buf), 0x1f600);
        assert_eq!(enc.code_to_mbc(0x41, &mut buf), 2);
        assert_eq!(&buf[..2], b"\x00A");
    }

    #[test]
    fn test_left_adjust_surrogate() {
        let enc = &ONIG_ENCODING_UTF16LE;
        let data = b"a\x00\x3d\xd8\x00\xde";
        assert_eq!(enc.left_adjust_char_head(0, 5, data), 2);
        assert_eq!(enc.left_adjust_char_head(0, 1, data), 0);
    }
}
