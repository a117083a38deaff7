// encodings/utf32.rs - UTF-32LE and UTF-32BE.
// Fixed four-byte width.

use crate::defs::*;
use crate::enc::*;

pub struct Utf32Encoding {
    big_endian: bool,
}

pub static ONIG_ENCODING_UTF32LE: Utf32Encoding = Utf32Encoding { big_endian: false };
pub static ONIG_ENCODING_UTF32BE: Utf32Encoding = Utf32Encoding { big_endian: true };

impl Utf32Encoding {
    #[inline]
    fn read(&self, p: &[u8]) -> u32 {
        let b = [p[0], p[1], p[2], p[3]];
        if self.big_endian {
            u32::from_be_bytes(b)
        } else {
            u32::from_le_bytes(b)
        }
    }
}

impl Encoding for Utf32Encoding {
    fn name(&self) -> &'static str {
        if self.big_endian {
            "UTF-32BE"
        } else {
            "UTF-32LE"
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        if self.big_endian {
            &["UCS-4BE"]
        } else {
            &["UCS-4LE"]
        }
    }

    fn max_enc_len(&self) -> usize {
        4
    }

    fn min_enc_len(&self) -> usize {
        4
    }

    fn mbc_enc_len(&self, _p: &[u8]) -> usize {
        4
    }

    fn precise_mbc_enc_len(&self, p: &[u8]) -> i32 {
        if p.len() < 4 {
            return mbclen_needmore((4 - p.len()) as i32);
        }
        let c = self.read(p);
        if c > MAX_UNICODE_CODE_POINT || (0xd800..=0xdfff).contains(&c) {
            MBCLEN_INVALID
        } else {
            4
        }
    }

    fn mbc_to_code(&self, p: &[u8]) -> OnigCodePoint {
        if p.len() < 4 {
            return 0;
        }
        self.read(p)
    }

    fn code_to_mbclen(&self, code: OnigCodePoint) -> i32 {
        if (0xd800..=0xdfff).contains(&code) {
            ONIGERR_INVALID_CODE_POINT_VALUE
        } else if code <= MAX_UNICODE_CODE_POINT {
            4
        } else {
            ONIGERR_TOO_BIG_WIDE_CHAR_VALUE
        }
    }

    fn code_to_mbc(&self, code: OnigCodePoint, buf: &mut [u8]) -> i32 {
        let b = if self.big_endian {
            code.to_be_bytes()
        } else {
            code.to_le_bytes()
        };
        buf[..4].copy_from_slice(&b);
        4
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

    fn left_adjust_char_head(&self, start: usize, s: usize, _data: &[u8]) -> usize {
        if s <= start {
            return s;
        }
        start + ((s - start) & !3)
    }

    fn flag(&self) -> u32 {
        ENC_FLAG_UNICODE
    }
}
