// api.rs - Idiomatic Rust API for mbstring.
//
// Wraps the C-style routines (tr, case_map, succ, str_to_inum, dump, ...)
// behind owned types: EncodedString, CaseOptions, IntegerParser.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;

use crate::casemap::{case_map, CaseMode};
use crate::coderange::*;
use crate::convert::{str_to_inum, Integer};
use crate::defs::*;
use crate::dump::{dump, undump};
use crate::enc::*;
use crate::encodings::{ONIG_ENCODING_ASCII, ONIG_ENCODING_UTF8};
use crate::error::StrError;
use crate::succ::succ;
use crate::tr;

/// A byte string tagged with its encoding.
///
/// The code range is computed on first use and cached.
///
/// # Examples
///
/// ```
/// use mbstring::api::EncodedString;
///
/// let s = EncodedString::from("hello");
/// let t = s.tr(&"el".into(), &"ip".into()).unwrap();
/// assert_eq!(t.as_bytes(), b"hippo");
/// assert_eq!(s.succ().as_bytes(), b"hellp");
/// ```
#[derive(Clone)]
pub struct EncodedString {
    bytes: Vec<u8>,
    enc: OnigEncoding,
    cr: OnceCell<CodeRange>,
}

impl EncodedString {
    pub fn new(bytes: impl Into<Vec<u8>>, enc: OnigEncoding) -> Self {
        EncodedString {
            bytes: bytes.into(),
            enc,
            cr: OnceCell::new(),
        }
    }

    /// Build with a code range already known to the caller.
    pub fn with_code_range(bytes: impl Into<Vec<u8>>, enc: OnigEncoding, cr: CodeRange) -> Self {
        EncodedString {
            bytes: bytes.into(),
            enc,
            cr: OnceCell::from(cr),
        }
    }

    /// The one-character string for code point c, like `Integer#chr(enc)`.
    pub fn from_code_point(c: OnigCodePoint, enc: OnigEncoding) -> Result<Self, StrError> {
        let bytes = code_to_bytes(enc, c)?;
        Ok(EncodedString::new(bytes, enc))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn encoding(&self) -> OnigEncoding {
        self.enc
    }

    /// Reinterpret the same bytes under another encoding.
    pub fn force_encoding(self, enc: OnigEncoding) -> Self {
        EncodedString::new(self.bytes, enc)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn code_range(&self) -> CodeRange {
        *self.cr.get_or_init(|| classify(self.enc, &self.bytes))
    }

    pub fn is_ascii_only(&self) -> bool {
        self.code_range().is_ascii()
    }

    pub fn is_valid_encoding(&self) -> bool {
        !self.code_range().is_broken()
    }

    /// Number of characters; a broken byte counts as one.
    pub fn char_len(&self) -> usize {
        enc_strlen(self.enc, &self.bytes, 0, self.bytes.len(), Some(self.code_range()))
    }

    /// Iterate over characters as byte slices.
    pub fn chars(&self) -> Chars<'_> {
        Chars {
            enc: self.enc,
            bytes: &self.bytes,
            p: 0,
        }
    }

    /// Code point of the character starting at byte offset p.
    pub fn code_point_at(&self, p: usize) -> Result<OnigCodePoint, StrError> {
        code_point(self.enc, Some(self.code_range()), &self.bytes, p, self.bytes.len())
    }

    /// The encoding a combination of `self` and `other` would carry.
    pub fn enc_compatible(&self, other: &EncodedString) -> Result<OnigEncoding, StrError> {
        onigenc_compatible(
            self.enc,
            self.len(),
            self.code_range(),
            other.enc,
            other.len(),
            other.code_range(),
        )
        .ok_or_else(|| StrError::incompatible(self.enc.name(), other.enc.name()))
    }

    /// One encoding compatible with self and every pattern.
    fn check_patterns(&self, patterns: &[&EncodedString]) -> Result<OnigEncoding, StrError> {
        let mut enc = self.enc;
        for (i, pat) in patterns.iter().enumerate() {
            let e = self.enc_compatible(pat)?;
            if i > 0 && !onigenc_same(e, enc) {
                return Err(StrError::incompatible(enc.name(), e.name()));
            }
            enc = e;
        }
        Ok(enc)
    }

    fn derive(&self, enc: OnigEncoding, out: Option<(Vec<u8>, CodeRange)>) -> EncodedString {
        match out {
            Some((bytes, cr)) => EncodedString::with_code_range(bytes, enc, cr),
            None => EncodedString::with_code_range(self.bytes.clone(), enc, self.code_range()),
        }
    }

    fn derive_bytes(&self, enc: OnigEncoding, out: Option<Vec<u8>>) -> EncodedString {
        match out {
            Some(bytes) => EncodedString::new(bytes, enc),
            None => EncodedString::with_code_range(self.bytes.clone(), enc, self.code_range()),
        }
    }

    // === Transliteration ===

    /// Characters in the intersection of the given sets.
    pub fn count(&self, sets: &[&EncodedString]) -> Result<usize, StrError> {
        let enc = self.check_patterns(sets)?;
        let pats: Vec<&[u8]> = sets.iter().map(|s| s.as_bytes()).collect();
        tr::count(enc, &self.bytes, self.code_range(), &pats)
    }

    /// Remove characters in the intersection of the given sets.
    pub fn delete(&self, sets: &[&EncodedString]) -> Result<EncodedString, StrError> {
        let enc = self.check_patterns(sets)?;
        let pats: Vec<&[u8]> = sets.iter().map(|s| s.as_bytes()).collect();
        let out = tr::delete(enc, &self.bytes, self.code_range(), &pats)?;
        Ok(self.derive(enc, out))
    }

    /// Collapse runs of the same character. With no sets every character
    /// is eligible.
    pub fn squeeze(&self, sets: &[&EncodedString]) -> Result<EncodedString, StrError> {
        let enc = self.check_patterns(sets)?;
        let pats: Vec<&[u8]> = sets.iter().map(|s| s.as_bytes()).collect();
        let out = tr::squeeze(enc, &self.bytes, self.code_range(), &pats)?;
        Ok(self.derive_bytes(enc, out))
    }

    pub fn tr(&self, from: &EncodedString, to: &EncodedString) -> Result<EncodedString, StrError> {
        let enc = self.check_patterns(&[from, to])?;
        let out = tr::tr(enc, &self.bytes, self.code_range(), from.as_bytes(), to.as_bytes())?;
        Ok(self.derive(enc, out))
    }

    /// `tr`, then squeeze runs of the same translated character.
    pub fn tr_s(&self, from: &EncodedString, to: &EncodedString) -> Result<EncodedString, StrError> {
        let enc = self.check_patterns(&[from, to])?;
        let out = tr::tr_s(enc, &self.bytes, self.code_range(), from.as_bytes(), to.as_bytes())?;
        Ok(self.derive(enc, out))
    }

    // === Case mapping ===

    fn map_case(&self, mode: CaseMode, options: CaseOptions) -> Result<EncodedString, StrError> {
        let out = case_map(self.enc, &self.bytes, self.code_range(), mode, options.flags())?;
        Ok(self.derive_bytes(self.enc, out))
    }

    pub fn upcase(&self, options: CaseOptions) -> Result<EncodedString, StrError> {
        self.map_case(CaseMode::Upcase, options)
    }

    pub fn downcase(&self, options: CaseOptions) -> Result<EncodedString, StrError> {
        self.map_case(CaseMode::Downcase, options)
    }

    pub fn swapcase(&self, options: CaseOptions) -> Result<EncodedString, StrError> {
        self.map_case(CaseMode::Swapcase, options)
    }

    pub fn capitalize(&self, options: CaseOptions) -> Result<EncodedString, StrError> {
        self.map_case(CaseMode::Capitalize, options)
    }

    /// Compare with ASCII letters folded.
    pub fn casecmp(&self, other: &EncodedString) -> Ordering {
        multi_byte_casecmp(
            self.enc,
            &self.bytes,
            Some(self.code_range()),
            &other.bytes,
            Some(other.code_range()),
        )
    }

    // === Successor, numbers, dump ===

    pub fn succ(&self) -> EncodedString {
        EncodedString::new(succ(self.enc, &self.bytes), self.enc)
    }

    /// Lenient parse in `base`; garbage yields 0.
    pub fn to_i(&self, base: i32) -> Result<Integer, StrError> {
        IntegerParser::new()
            .base(base)
            .strict(false)
            .encoding(self.enc)
            .parse(&self.bytes)
    }

    /// Escaped literal. Encodings that are not ASCII-compatible come back
    /// as US-ASCII with a `.force_encoding` suffix.
    pub fn dump(&self) -> EncodedString {
        let out = dump(self.enc, &self.bytes);
        let enc = if onigenc_is_ascii_compatible_encoding(self.enc) {
            self.enc
        } else {
            &ONIG_ENCODING_ASCII
        };
        EncodedString::with_code_range(out, enc, CodeRange::Ascii)
    }

    pub fn undump(&self) -> Result<EncodedString, StrError> {
        let (bytes, enc) = undump(self.enc, &self.bytes)?;
        Ok(EncodedString::new(bytes, enc))
    }
}

impl From<&str> for EncodedString {
    fn from(s: &str) -> Self {
        EncodedString::new(s.as_bytes(), &ONIG_ENCODING_UTF8)
    }
}

impl From<String> for EncodedString {
    fn from(s: String) -> Self {
        EncodedString::new(s.into_bytes(), &ONIG_ENCODING_UTF8)
    }
}

impl PartialEq for EncodedString {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes && onigenc_same(self.enc, other.enc)
    }
}

impl Eq for EncodedString {}

impl fmt::Debug for EncodedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedString")
            .field("bytes", &String::from_utf8_lossy(&dump(self.enc, &self.bytes)))
            .field("encoding", &self.enc.name())
            .finish()
    }
}

// === Chars ===

/// Iterator over the characters of an [`EncodedString`]. Invalid bytes
/// come out one minimum-length unit at a time.
pub struct Chars<'s> {
    enc: OnigEncoding,
    bytes: &'s [u8],
    p: usize,
}

impl<'s> Iterator for Chars<'s> {
    type Item = &'s [u8];

    fn next(&mut self) -> Option<&'s [u8]> {
        if self.p >= self.bytes.len() {
            return None;
        }
        let n = enc_mbclen(self.enc, self.bytes, self.p, self.bytes.len());
        let ch = &self.bytes[self.p..self.p + n];
        self.p += n;
        Some(ch)
    }
}

// === CaseOptions ===

/// Options for the case mapping methods.
///
/// # Examples
///
/// ```
/// use mbstring::api::{CaseOptions, EncodedString};
///
/// let s = EncodedString::from("iI");
/// let t = s.upcase(CaseOptions::parse(&["turkic"]).unwrap()).unwrap();
/// assert_eq!(t.as_bytes(), "\u{130}I".as_bytes());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaseOptions {
    flags: CaseMapFlags,
}

impl CaseOptions {
    pub fn new() -> Self {
        CaseOptions::default()
    }

    /// Only map ASCII letters.
    pub fn ascii(mut self) -> Self {
        self.flags |= CaseMapFlags::ASCII_ONLY;
        self
    }

    /// Turkic/Azeri dotted and dotless i.
    pub fn turkic(mut self) -> Self {
        self.flags |= CaseMapFlags::FOLD_TURKISH_AZERI;
        self
    }

    pub fn lithuanian(mut self) -> Self {
        self.flags |= CaseMapFlags::FOLD_LITHUANIAN;
        self
    }

    /// Case folding instead of lowercasing. Downcase only.
    pub fn fold(mut self) -> Self {
        self.flags |= CaseMapFlags::FOLD;
        self
    }

    pub fn flags(&self) -> CaseMapFlags {
        self.flags
    }

    /// Parse option names as given to the case methods: `ascii`, `turkic`,
    /// `lithuanian`, `fold`. Only `turkic` and `lithuanian` combine.
    pub fn parse(names: &[&str]) -> Result<CaseOptions, StrError> {
        let opts = CaseOptions::new();
        let (first, second) = match names {
            [] => return Ok(opts),
            [first] => (*first, None),
            [first, second] => (*first, Some(*second)),
            _ => return Err(StrError::option(STRERR_TOO_MANY_OPTIONS, None)),
        };

        match (first, second) {
            ("turkic", None) => Ok(opts.turkic()),
            ("turkic", Some("lithuanian")) | ("lithuanian", Some("turkic")) => {
                Ok(opts.turkic().lithuanian())
            }
            ("turkic" | "lithuanian", Some(_)) => {
                Err(StrError::option(STRERR_INVALID_SECOND_OPTION, None))
            }
            ("lithuanian", None) => Ok(opts.lithuanian()),
            (_, Some(_)) => Err(StrError::option(STRERR_TOO_MANY_OPTIONS, None)),
            ("ascii", None) => Ok(opts.ascii()),
            ("fold", None) => Ok(opts.fold()),
            (other, None) => {
                let sym = format!(":{}", other);
                Err(StrError::option(STRERR_INVALID_OPTION, Some(sym.as_bytes())))
            }
        }
    }
}

// === IntegerParser ===

/// Builder for parsing integer literals.
///
/// Defaults to `Integer()` semantics: radix from the prefix, strict.
///
/// # Examples
///
/// ```
/// use mbstring::api::IntegerParser;
/// use mbstring::convert::Integer;
///
/// let n = IntegerParser::new().parse(b"0x_ff").unwrap_or(Integer::Fixnum(-1));
/// assert_eq!(n, Integer::Fixnum(-1));
/// let n = IntegerParser::new().base(16).parse(b"ff").unwrap();
/// assert_eq!(n, Integer::Fixnum(255));
/// let n = IntegerParser::new().strict(false).parse(b"12abc").unwrap();
/// assert_eq!(n, Integer::Fixnum(12));
/// ```
#[derive(Clone, Copy)]
pub struct IntegerParser {
    base: i32,
    strict: bool,
    enc: OnigEncoding,
}

impl Default for IntegerParser {
    fn default() -> Self {
        IntegerParser::new()
    }
}

impl IntegerParser {
    pub fn new() -> Self {
        IntegerParser {
            base: 0,
            strict: true,
            enc: &ONIG_ENCODING_UTF8,
        }
    }

    /// Radix 2..=36. 0 or -1 sniff a prefix; below -1 forces the absolute value.
    pub fn base(mut self, base: i32) -> Self {
        self.base = base;
        self
    }

    /// Reject trailing garbage and malformed underscores.
    pub fn strict(mut self, yes: bool) -> Self {
        self.strict = yes;
        self
    }

    /// Encoding of the input, used when quoting it in errors.
    pub fn encoding(mut self, enc: OnigEncoding) -> Self {
        self.enc = enc;
        self
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<Integer, StrError> {
        str_to_inum(self.enc, bytes, self.base, self.strict)
    }
}

impl fmt::Debug for IntegerParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegerParser")
            .field("base", &self.base)
            .field("strict", &self.strict)
            .field("encoding", &self.enc.name())
            .finish()
    }
}
