// encodings/mod.rs - Encoding registry
// Each supported encoding maps to one module; lookup is by name or alias.

pub mod ascii;
pub mod euc_jp;
pub mod iso8859_1;
pub mod shift_jis;
pub mod utf16;
pub mod utf32;
pub mod utf8;

pub use ascii::{ONIG_ENCODING_ASCII, ONIG_ENCODING_ASCII_8BIT, ONIG_ENCODING_UTF7};
pub use euc_jp::ONIG_ENCODING_EUC_JP;
pub use iso8859_1::ONIG_ENCODING_ISO_8859_1;
pub use shift_jis::ONIG_ENCODING_SHIFT_JIS;
pub use utf16::{ONIG_ENCODING_UTF16BE, ONIG_ENCODING_UTF16LE};
pub use utf32::{ONIG_ENCODING_UTF32BE, ONIG_ENCODING_UTF32LE};
pub use utf8::ONIG_ENCODING_UTF8;

use crate::enc::OnigEncoding;

/// Every encoding known to the registry.
pub static ENCODINGS: &[OnigEncoding] = &[
    &ONIG_ENCODING_ASCII_8BIT,
    &ONIG_ENCODING_ASCII,
    &ONIG_ENCODING_UTF8,
    &ONIG_ENCODING_ISO_8859_1,
    &ONIG_ENCODING_UTF16LE,
    &ONIG_ENCODING_UTF16BE,
    &ONIG_ENCODING_UTF32LE,
    &ONIG_ENCODING_UTF32BE,
    &ONIG_ENCODING_EUC_JP,
    &ONIG_ENCODING_SHIFT_JIS,
    &ONIG_ENCODING_UTF7,
];

/// Does `enc` answer to `name` (case-insensitive, aliases included)?
pub fn encoding_matches(enc: OnigEncoding, name: &str) -> bool {
    enc.name().eq_ignore_ascii_case(name)
        || enc.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
}

/// Find an encoding by name (case-insensitive).
pub fn find_encoding(name: &str) -> Option<OnigEncoding> {
    ENCODINGS.iter().copied().find(|e| encoding_matches(*e, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_and_alias() {
        assert_eq!(find_encoding("utf-8").map(|e| e.name()), Some("UTF-8"));
        assert_eq!(find_encoding("BINARY").map(|e| e.name()), Some("ASCII-8BIT"));
        assert_eq!(find_encoding("sjis").map(|e| e.name()), Some("Shift_JIS"));
        assert_eq!(find_encoding("eucjp").map(|e| e.name()), Some("EUC-JP"));
        assert_eq!(find_encoding("latin1").map(|e| e.name()), Some("ISO-8859-1"));
        assert!(find_encoding("KOI8-R").is_none());
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in ENCODINGS.iter().enumerate() {
            for b in &ENCODINGS[i + 1..] {
                assert_ne!(a.name(), b.name());
                assert!(!encoding_matches(*b, a.name()));
            }
        }
    }
}
