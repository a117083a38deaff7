// encodings/ascii.rs - US-ASCII and ASCII-8BIT (BINARY).
// Both are single byte; they differ only in whether bytes >= 0x80 are valid.

use crate::defs::*;
use crate::enc::*;

fn ascii_is_code_ctype(code: OnigCodePoint, ctype: u32) -> bool {
    if code < 128 && ctype <= ONIGENC_MAX_STD_CTYPE {
        onigenc_is_ascii_code_ctype(code, ctype)
    } else {
        false
    }
}

// === US-ASCII ===
pub struct AsciiEncoding;

pub static ONIG_ENCODING_ASCII: AsciiEncoding = AsciiEncoding;

impl Encoding for AsciiEncoding {
    fn name(&self) -> &'static str {
        "US-ASCII"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ASCII", "ANSI_X3.4-1968", "646"]
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
        onigenc_single_byte_precise_len(p, |b| b < 0x80)
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
        ascii_is_code_ctype(code, ctype)
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

    fn left_adjust_char_head(&self, _start: usize, s: usize, _data: &[u8]) -> usize {
        s
    }

    fn flag(&self) -> u32 {
        ENC_FLAG_ASCII_COMPATIBLE
    }
}

// === ASCII-8BIT ===
pub struct Ascii8BitEncoding;

pub static ONIG_ENCODING_ASCII_8BIT: Ascii8BitEncoding = Ascii8BitEncoding;

impl Encoding for Ascii8BitEncoding {
    fn name(&self) -> &'static str {
        "ASCII-8BIT"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["BINARY"]
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
        ascii_is_code_ctype(code, ctype)
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

    fn left_adjust_char_head(&self, _start: usize, s: usize, _data: &[u8]) -> usize {
        s
    }

    fn flag(&self) -> u32 {
        ENC_FLAG_ASCII_COMPATIBLE
    }
}

// === UTF-7 ===
// A dummy encoding: bytes are carried as-is, and the encoding is not ASCII
// compatible, so dump appends a force_encoding suffix.
pub struct Utf7Encoding;

pub static ONIG_ENCODING_UTF7: Utf7Encoding = Utf7Encoding;

impl Encoding for Utf7Encoding {
    fn name(&self) -> &'static str {
        "UTF-7"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["CP65000"]
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
        ascii_is_code_ctype(code, ctype)
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

    fn left_adjust_char_head(&self, _start: usize, s: usize, _data: &[u8]) -> usize {
        s
    }

    fn flag(&self) -> u32 {
        ENC_FLAG_DUMMY
    }
}
