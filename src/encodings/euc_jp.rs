// encodings/euc_jp.rs - EUC-JP.
// ASCII, two-byte JIS X 0208, 0x8E-prefixed half-width kana and
// 0x8F-prefixed three-byte JIS X 0212.

use crate::defs::*;
use crate::enc::*;

static ENC_LEN_EUCJP: [u8; 256] = {
    let mut t = [1u8; 256];
    let mut i = 0xa1;
    while i <= 0xfe {
        t[i] = 2;
        i += 1;
    }
    t[0x8e] = 2;
    t[0x8f] = 3;
    t
};

#[inline]
fn eucjp_is_trail(b: u8) -> bool {
    (0xa1..=0xfe).contains(&b)
}

/// Ctype for the double-byte Japanese encodings: ASCII answers from the
/// table, multibyte characters count as graphic word characters only.
pub(crate) fn dbcs_is_code_ctype(enc: &dyn Encoding, code: OnigCodePoint, ctype: u32) -> bool {
    if code < 128 {
        return ctype <= ONIGENC_MAX_STD_CTYPE && onigenc_is_ascii_code_ctype(code, ctype);
    }
    if ctype_is_word_graph_print(ctype) {
        return enc.code_to_mbclen(code) > 1;
    }
    false
}

pub struct EucJpEncoding;

pub static ONIG_ENCODING_EUC_JP: EucJpEncoding = EucJpEncoding;

impl Encoding for EucJpEncoding {
    fn name(&self) -> &'static str {
        "EUC-JP"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["eucJP"]
    }

    fn max_enc_len(&self) -> usize {
        3
    }

    fn min_enc_len(&self) -> usize {
        1
    }

    fn mbc_enc_len(&self, p: &[u8]) -> usize {
        ENC_LEN_EUCJP[p[0] as usize] as usize
    }

    fn precise_mbc_enc_len(&self, p: &[u8]) -> i32 {
        let Some(&b0) = p.first() else {
            return mbclen_needmore(1);
        };
        let need = match b0 {
            0x00..=0x7f => return 1,
            0x8e | 0xa1..=0xfe => 2,
            0x8f => 3,
            _ => return MBCLEN_INVALID,
        };
        for i in 1..need {
            match p.get(i) {
                None => return mbclen_needmore((need - i) as i32),
                Some(&b) if eucjp_is_trail(b) => {}
                Some(_) => return MBCLEN_INVALID,
            }
        }
        need as i32
    }

    fn mbc_to_code(&self, p: &[u8]) -> OnigCodePoint {
        let len = (ENC_LEN_EUCJP[p[0] as usize] as usize).min(p.len());
        p[..len]
            .iter()
            .fold(0, |c, &b| (c << 8) | b as OnigCodePoint)
    }

    fn code_to_mbclen(&self, code: OnigCodePoint) -> i32 {
        if onigenc_is_code_ascii(code) {
            1
        } else if code > 0x00ffffff {
            ONIGERR_TOO_BIG_WIDE_CHAR_VALUE
        } else if (code & 0xff808080) == 0x00808080 {
            3
        } else if (code & 0xffff8080) == 0x00008080 {
            2
        } else {
            ONIGERR_INVALID_CODE_POINT_VALUE
        }
    }

    fn code_to_mbc(&self, code: OnigCodePoint, buf: &mut [u8]) -> i32 {
        let mut i = 0;
        if (code & 0xff0000) != 0 {
            buf[i] = ((code >> 16) & 0xff) as u8;
            i += 1;
        }
        if (code & 0xff00) != 0 {
            buf[i] = ((code >> 8) & 0xff) as u8;
            i += 1;
        }
        buf[i] = (code & 0xff) as u8;
        i += 1;
        i as i32
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
        let enc = &ONIG_ENCODING_EUC_JP;
        // "あ" = A4 A2
        assert_eq!(enc.precise_mbc_enc_len(b"\xa4\xa2"), 2);
        assert_eq!(enc.precise_mbc_enc_len(b"\x8e\xb1"), 2);
        assert_eq!(enc.precise_mbc_enc_len(b"\x8f\xa1\xa1"), 3);
        assert_eq!(enc.precise_mbc_enc_len(b"\xa4"), mbclen_needmore(1));
        assert_eq!(enc.precise_mbc_enc_len(b"\xa4A"), MBCLEN_INVALID);
        assert_eq!(enc.precise_mbc_enc_len(b"\x80"), MBCLEN_INVALID);
    }

    #[test]
    fn test_code_roundtrip() {
        let enc = &ONIG_ENCODING_EUC_JP;
        assert_eq!(enc.mbc_to_code(b"\xa4\xa2"), 0xa4a2);
        assert_eq!(enc.code_to_mbclen(0xa4a2), 2);
        assert_eq!(enc.code_to_mbclen(0x8fa1a1), 3);
        assert!(enc.code_to_mbclen(0xa4) < 0);
        let mut buf = [0u8; 4];
        assert_eq!(enc.code_to_mbc(0x8fa1a1, &mut buf), 3);
        assert_eq!(&buf[..3], b"\x8f\xa1\xa1");
    }

    #[test]
    fn test_left_adjust() {
        let enc = &ONIG_ENCODING_EUC_JP;
        let data = b"a\xa4\xa2\xa4\xa4";
        assert_eq!(enc.left_adjust_char_head(0, 4, data), 3);
        assert_eq!(enc.left_adjust_char_head(0, 2, data), 1);
    }

    #[test]
    fn test_ctype() {
        let enc = &ONIG_ENCODING_EUC_JP;
        assert!(enc.is_code_ctype(0xa4a2, ONIGENC_CTYPE_GRAPH));
        assert!(!enc.is_code_ctype(0xa4a2, ONIGENC_CTYPE_ALPHA));
        assert!(enc.is_code_ctype(b'z' as u32, ONIGENC_CTYPE_ALPHA));
    }
}
