// defs.rs - Shared types, flags, length sentinels and error codes.
// Every other module pulls its vocabulary from here via `use crate::defs::*`.

use bitflags::bitflags;

// === Basic types ===
pub type OnigCodePoint = u32;

// === Sizes ===
pub const TRANS_SIZE: usize = 256;
pub const ONIGENC_CODE_TO_MBC_MAXLEN: usize = 7;
pub const CASE_MAP_BUFFER_SIZE: usize = 32;
pub const MAX_UNICODE_CODE_POINT: OnigCodePoint = 0x10ffff;

// === Normal return ===
pub const STR_NORMAL: i32 = 0;

// === Code range ===

/// Three-state classification of a byte buffer under an encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeRange {
    /// Every byte is below 0x80.
    Ascii,
    /// Every character decodes to a legal code point.
    Valid,
    /// At least one illegal or truncated sequence.
    Broken,
}

impl CodeRange {
    #[inline]
    pub fn is_ascii(self) -> bool {
        self == CodeRange::Ascii
    }

    #[inline]
    pub fn is_broken(self) -> bool {
        self == CodeRange::Broken
    }
}

// === Character length sentinels ===
// A precise length is > 0 for a complete character, -1 for an invalid
// sequence and -1-k when k more bytes are needed.

pub const MBCLEN_INVALID: i32 = -1;

#[inline]
pub fn mbclen_charfound_p(r: i32) -> bool {
    r > 0
}

#[inline]
pub fn mbclen_invalid_p(r: i32) -> bool {
    r == MBCLEN_INVALID
}

#[inline]
pub fn mbclen_needmore(n: i32) -> i32 {
    -1 - n
}

#[inline]
pub fn mbclen_needmore_p(r: i32) -> bool {
    r < -1
}

#[inline]
pub fn mbclen_needmore_len(r: i32) -> i32 {
    -1 - r
}

// === Character Types ===
pub const ONIGENC_CTYPE_NEWLINE: u32 = 0;
pub const ONIGENC_CTYPE_ALPHA: u32 = 1;
pub const ONIGENC_CTYPE_BLANK: u32 = 2;
pub const ONIGENC_CTYPE_CNTRL: u32 = 3;
pub const ONIGENC_CTYPE_DIGIT: u32 = 4;
pub const ONIGENC_CTYPE_GRAPH: u32 = 5;
pub const ONIGENC_CTYPE_LOWER: u32 = 6;
pub const ONIGENC_CTYPE_PRINT: u32 = 7;
pub const ONIGENC_CTYPE_PUNCT: u32 = 8;
pub const ONIGENC_CTYPE_SPACE: u32 = 9;
pub const ONIGENC_CTYPE_UPPER: u32 = 10;
pub const ONIGENC_CTYPE_XDIGIT: u32 = 11;
pub const ONIGENC_CTYPE_WORD: u32 = 12;
pub const ONIGENC_CTYPE_ALNUM: u32 = 13;
pub const ONIGENC_CTYPE_ASCII: u32 = 14;
pub const ONIGENC_MAX_STD_CTYPE: u32 = ONIGENC_CTYPE_ASCII;

// === Case mapping flags ===

bitflags! {
    /// Case mapping request and result bits. The low option bits are what a
    /// caller passes in; `MODIFIED` is set by the mapper when anything changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CaseMapFlags: u32 {
        const UPCASE = 1 << 13;
        const DOWNCASE = 1 << 14;
        const TITLECASE = 1 << 15;
        const MODIFIED = 1 << 18;
        const FOLD = 1 << 19;
        const FOLD_TURKISH_AZERI = 1 << 20;
        const FOLD_LITHUANIAN = 1 << 21;
        const ASCII_ONLY = 1 << 22;
    }
}

impl CaseMapFlags {
    /// The subset a caller is allowed to pass as options.
    pub const OPTIONS: CaseMapFlags = CaseMapFlags::ASCII_ONLY
        .union(CaseMapFlags::FOLD)
        .union(CaseMapFlags::FOLD_TURKISH_AZERI)
        .union(CaseMapFlags::FOLD_LITHUANIAN);

    #[inline]
    pub fn is_turkic(self) -> bool {
        self.contains(CaseMapFlags::FOLD_TURKISH_AZERI)
    }
}

// === Encoding error codes (negative, returned by encoding callbacks) ===
pub const ONIGERR_INVALID_CODE_POINT_VALUE: i32 = -400;
pub const ONIGERR_TOO_BIG_WIDE_CHAR_VALUE: i32 = -401;

// === String error codes ===
pub const STRERR_INVALID_BYTE_SEQUENCE: i32 = -10;
pub const STRERR_EMPTY_STRING: i32 = -11;
pub const STRERR_INVALID_CODEPOINT: i32 = -12;
pub const STRERR_OUT_OF_CHAR_RANGE: i32 = -13;
pub const STRERR_INCOMPATIBLE_ENCODING: i32 = -14;
pub const STRERR_WRONG_NUMBER_OF_ARGUMENTS: i32 = -15;

pub const STRERR_INVALID_RANGE: i32 = -20;
pub const STRERR_INVALID_RANGE_MULTIBYTE: i32 = -21;

pub const STRERR_INVALID_INTEGER: i32 = -30;
pub const STRERR_INVALID_RADIX: i32 = -31;

pub const STRERR_TOO_MANY_OPTIONS: i32 = -40;
pub const STRERR_INVALID_SECOND_OPTION: i32 = -41;
pub const STRERR_FOLD_NOT_DOWNCASE: i32 = -42;
pub const STRERR_INVALID_OPTION: i32 = -43;

pub const STRERR_UNDUMP_NON_ASCII: i32 = -100;
pub const STRERR_UNDUMP_NULL_BYTE: i32 = -101;
pub const STRERR_UNDUMP_INVALID_FORMAT: i32 = -102;
pub const STRERR_UNDUMP_UNTERMINATED: i32 = -103;
pub const STRERR_UNDUMP_UNICODE_WITH_FORCE_ENCODING: i32 = -104;
pub const STRERR_UNDUMP_UNKNOWN_ENCODING: i32 = -105;
pub const STRERR_UNDUMP_INVALID_ESCAPE: i32 = -106;
pub const STRERR_UNDUMP_MIXED_ESCAPE: i32 = -107;
pub const STRERR_UNDUMP_INVALID_UNICODE_ESCAPE: i32 = -108;
pub const STRERR_UNDUMP_UNTERMINATED_UNICODE_ESCAPE: i32 = -109;
pub const STRERR_UNDUMP_CODEPOINT_TOO_LARGE: i32 = -110;
pub const STRERR_UNDUMP_INVALID_CODEPOINT: i32 = -111;
pub const STRERR_UNDUMP_INVALID_HEX_ESCAPE: i32 = -112;

/// Is this code one of the undump diagnostics?
pub fn str_is_dump_error(code: i32) -> bool {
    (STRERR_UNDUMP_INVALID_HEX_ESCAPE..=STRERR_UNDUMP_NON_ASCII).contains(&code)
}
