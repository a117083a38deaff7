// unicode/mod.rs - Unicode character properties and case mapping.
// Ctype answers for code < 256 come from the ISO 8859-1 table; above that
// the predicates defer to `char`, except DIGIT which uses its own ranges.

use smallvec::{smallvec, SmallVec};

use crate::defs::*;
use crate::enc::*;

/// Result of mapping one code point. Full case mappings expand to at most
/// three code points.
pub type CaseMapped = SmallVec<[OnigCodePoint; 3]>;

const DOTLESS_SMALL_I: OnigCodePoint = 0x0131;
const DOTTED_CAPITAL_I: OnigCodePoint = 0x0130;

// === Unicode ISO 8859-1 Ctype Table ===
// Used by onigenc_unicode_is_code_ctype for code < 256.

pub static ENC_UNICODE_ISO_8859_1_CTYPE_TABLE: [u16; 256] = [
    0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008,
    0x4008, 0x428c, 0x4289, 0x4288, 0x4288, 0x4288, 0x4008, 0x4008,
    0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008,
    0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008, 0x4008,
    0x4284, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0,
    0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0,
    0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0, 0x78b0,
    0x78b0, 0x78b0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x41a0,
    0x41a0, 0x7ca2, 0x7ca2, 0x7ca2, 0x7ca2, 0x7ca2, 0x7ca2, 0x74a2,
    0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2,
    0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2, 0x74a2,
    0x74a2, 0x74a2, 0x74a2, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x51a0,
    0x41a0, 0x78e2, 0x78e2, 0x78e2, 0x78e2, 0x78e2, 0x78e2, 0x70e2,
    0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2,
    0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2, 0x70e2,
    0x70e2, 0x70e2, 0x70e2, 0x41a0, 0x41a0, 0x41a0, 0x41a0, 0x4008,
    0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0288, 0x0008, 0x0008,
    0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0008,
    0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0008,
    0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0008, 0x0008,
    0x0284, 0x01a0, 0x01a0, 0x01a0, 0x01a0, 0x01a0, 0x01a0, 0x01a0,
    0x01a0, 0x01a0, 0x30e2, 0x01a0, 0x01a0, 0x00a8, 0x01a0, 0x01a0,
    0x01a0, 0x01a0, 0x10a0, 0x10a0, 0x01a0, 0x30e2, 0x01a0, 0x01a0,
    0x01a0, 0x10a0, 0x30e2, 0x01a0, 0x10a0, 0x10a0, 0x10a0, 0x01a0,
    0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2,
    0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2,
    0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x01a0,
    0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x34a2, 0x30e2,
    0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2,
    0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2,
    0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x01a0,
    0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2, 0x30e2,
];

// Decimal digit (Nd) ranges above U+00FF, as inclusive pairs.
static CR_DIGIT: &[OnigCodePoint] = &[
    0x0660, 0x0669, 0x06f0, 0x06f9, 0x07c0, 0x07c9, 0x0966, 0x096f,
    0x09e6, 0x09ef, 0x0a66, 0x0a6f, 0x0ae6, 0x0aef, 0x0b66, 0x0b6f,
    0x0be6, 0x0bef, 0x0c66, 0x0c6f, 0x0ce6, 0x0cef, 0x0d66, 0x0d6f,
    0x0de6, 0x0def, 0x0e50, 0x0e59, 0x0ed0, 0x0ed9, 0x0f20, 0x0f29,
    0x1040, 0x1049, 0x1090, 0x1099, 0x17e0, 0x17e9, 0x1810, 0x1819,
    0x1946, 0x194f, 0x19d0, 0x19d9, 0x1a80, 0x1a89, 0x1a90, 0x1a99,
    0x1b50, 0x1b59, 0x1bb0, 0x1bb9, 0x1c40, 0x1c49, 0x1c50, 0x1c59,
    0xa620, 0xa629, 0xa8d0, 0xa8d9, 0xa900, 0xa909, 0xa9d0, 0xa9d9,
    0xa9f0, 0xa9f9, 0xaa50, 0xaa59, 0xabf0, 0xabf9, 0xff10, 0xff19,
    0x104a0, 0x104a9, 0x11066, 0x1106f, 0x1d7ce, 0x1d7ff, 0x1e950, 0x1e959,
];

// Blank (Zs plus tab) above U+00FF.
static CR_BLANK: &[OnigCodePoint] = &[
    0x1680, 0x1680, 0x2000, 0x200a, 0x202f, 0x202f, 0x205f, 0x205f, 0x3000, 0x3000,
];

fn code_in_ranges(code: OnigCodePoint, ranges: &[OnigCodePoint]) -> bool {
    let n = ranges.len() / 2;
    let mut low = 0usize;
    let mut high = n;
    while low < high {
        let mid = (low + high) / 2;
        if code > ranges[mid * 2 + 1] {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low < n && code >= ranges[low * 2]
}

/// Check if code point is of the given Unicode ctype.
pub fn onigenc_unicode_is_code_ctype(code: OnigCodePoint, ctype: u32) -> bool {
    if ctype <= ONIGENC_MAX_STD_CTYPE && code < 256 {
        return (ENC_UNICODE_ISO_8859_1_CTYPE_TABLE[code as usize] & ctype_to_bit(ctype) as u16)
            != 0;
    }

    let Some(ch) = char::from_u32(code) else {
        return false;
    };
    match ctype {
        ONIGENC_CTYPE_ALPHA => ch.is_alphabetic(),
        ONIGENC_CTYPE_BLANK => code_in_ranges(code, CR_BLANK),
        ONIGENC_CTYPE_CNTRL => ch.is_control(),
        ONIGENC_CTYPE_DIGIT => code_in_ranges(code, CR_DIGIT),
        ONIGENC_CTYPE_GRAPH => !ch.is_whitespace() && !ch.is_control(),
        ONIGENC_CTYPE_LOWER => ch.is_lowercase(),
        ONIGENC_CTYPE_PRINT => !ch.is_control(),
        ONIGENC_CTYPE_PUNCT => {
            !ch.is_whitespace() && !ch.is_control() && !ch.is_alphanumeric()
        }
        ONIGENC_CTYPE_SPACE => ch.is_whitespace(),
        ONIGENC_CTYPE_UPPER => ch.is_uppercase(),
        ONIGENC_CTYPE_WORD => ch.is_alphanumeric() || code == 0x203f || code == 0x2040,
        ONIGENC_CTYPE_ALNUM => ch.is_alphabetic() || code_in_ranges(code, CR_DIGIT),
        _ => false,
    }
}

// === Per code point case mapping ===

fn unicode_upper(code: OnigCodePoint) -> CaseMapped {
    match char::from_u32(code) {
        Some(ch) => ch.to_uppercase().map(|c| c as OnigCodePoint).collect(),
        None => smallvec![code],
    }
}

fn unicode_lower(code: OnigCodePoint) -> CaseMapped {
    match char::from_u32(code) {
        Some(ch) => ch.to_lowercase().map(|c| c as OnigCodePoint).collect(),
        None => smallvec![code],
    }
}

fn is_cherokee(code: OnigCodePoint) -> bool {
    matches!(code, 0x13a0..=0x13f5 | 0x13f8..=0x13fd | 0xab70..=0xabbf)
}

fn unicode_title(code: OnigCodePoint) -> CaseMapped {
    match code {
        0x01c4..=0x01c6 => smallvec![0x01c5],
        0x01c7..=0x01c9 => smallvec![0x01c8],
        0x01ca..=0x01cc => smallvec![0x01cb],
        0x01f1..=0x01f3 => smallvec![0x01f2],
        0x0149 => smallvec![0x02bc, 0x004e],
        // Georgian Mkhedruli is its own titlecase.
        0x10d0..=0x10fa | 0x10fd..=0x10ff => smallvec![code],
        _ => {
            let upper = unicode_upper(code);
            if upper.len() <= 1 {
                return upper;
            }
            let mut out: CaseMapped = smallvec![upper[0]];
            for &c in &upper[1..] {
                out.extend(unicode_lower(c));
            }
            out
        }
    }
}

fn unicode_fold(code: OnigCodePoint) -> CaseMapped {
    if is_cherokee(code) {
        return unicode_upper(code);
    }
    let mut out = CaseMapped::new();
    for c in unicode_upper(code) {
        out.extend(unicode_lower(c));
    }
    out
}

/// Map one code point according to the direction and option bits in
/// `flags`. Returns the input unchanged when no mapping applies.
pub fn unicode_case_map_code(code: OnigCodePoint, flags: CaseMapFlags) -> CaseMapped {
    if flags.contains(CaseMapFlags::ASCII_ONLY) && code >= 128 {
        return smallvec![code];
    }
    let turkic = flags.is_turkic();

    if flags.contains(CaseMapFlags::FOLD) {
        return match code {
            0x49 if turkic => smallvec![DOTLESS_SMALL_I],
            DOTTED_CAPITAL_I if turkic => smallvec![0x69],
            _ => unicode_fold(code),
        };
    }

    let up = flags.contains(CaseMapFlags::UPCASE);
    let down = flags.contains(CaseMapFlags::DOWNCASE);

    let to_upper = |code: OnigCodePoint| -> CaseMapped {
        if turkic && code == 0x69 {
            smallvec![DOTTED_CAPITAL_I]
        } else {
            unicode_upper(code)
        }
    };
    let to_lower = |code: OnigCodePoint| -> CaseMapped {
        if turkic && code == 0x49 {
            smallvec![DOTLESS_SMALL_I]
        } else if turkic && code == DOTTED_CAPITAL_I {
            smallvec![0x69]
        } else {
            unicode_lower(code)
        }
    };

    if flags.contains(CaseMapFlags::TITLECASE) {
        if turkic && code == 0x69 {
            return smallvec![DOTTED_CAPITAL_I];
        }
        return unicode_title(code);
    }
    if up && down {
        if onigenc_unicode_is_code_ctype(code, ONIGENC_CTYPE_UPPER) {
            to_lower(code)
        } else if onigenc_unicode_is_code_ctype(code, ONIGENC_CTYPE_LOWER) {
            to_upper(code)
        } else {
            smallvec![code]
        }
    } else if up {
        to_upper(code)
    } else if down {
        to_lower(code)
    } else {
        smallvec![code]
    }
}

/// Case map source[*pp..end] for a Unicode encoding, writing into `to`.
/// Code points the encoding cannot represent leave the source bytes as-is.
pub fn onigenc_unicode_case_map(
    enc: &dyn Encoding,
    flags: &mut CaseMapFlags,
    pp: &mut usize,
    end: usize,
    source: &[u8],
    to: &mut [u8],
) -> i32 {
    let mut t = 0usize;
    while *pp < end {
        let len = char_len_at(enc, source, *pp, end);
        let code = enc.mbc_to_code(&source[*pp..*pp + len]);
        let mapped = unicode_case_map_code(code, *flags);

        let need = mapped.len() * enc.max_enc_len();
        if t + need.max(len) > to.len() {
            break;
        }

        let unchanged = mapped.len() == 1 && mapped[0] == code;
        let encodable = mapped.iter().all(|&c| enc.code_to_mbclen(c) > 0);
        if unchanged || !encodable {
            to[t..t + len].copy_from_slice(&source[*pp..*pp + len]);
            t += len;
        } else {
            for &c in &mapped {
                t += enc.code_to_mbc(c, &mut to[t..]) as usize;
            }
            *flags |= CaseMapFlags::MODIFIED;
        }
        *pp += len;

        if flags.contains(CaseMapFlags::TITLECASE) {
            *flags ^= CaseMapFlags::UPCASE | CaseMapFlags::DOWNCASE | CaseMapFlags::TITLECASE;
        }
    }
    t as i32
}
