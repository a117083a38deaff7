// error.rs - Idiomatic Rust error type for the string engine.
//
// Groups the C-style i32 codes from `defs` into semantic variants while
// keeping the original code for callers that still speak in codes.

use std::fmt;

use crate::defs::*;
use crate::strerror::{str_error_code_to_format, str_error_code_to_str};

/// Error type for string operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrError {
    /// A character failed to decode under its encoding.
    InvalidByteSequence { encoding: String },
    /// A code point was requested from an empty buffer.
    EmptyString,
    /// A transliteration range runs backwards.
    InvalidRange { code: i32, message: String },
    /// Strict integer parsing rejected the input.
    InvalidFormat { text: String },
    /// Radix outside 2..=36.
    InvalidRadix(i32),
    /// A value outside what a fixed-size conversion can hold.
    RangeError { code: i32, message: String },
    /// Two strings carry encodings that cannot be combined.
    IncompatibleEncoding { message: String },
    /// Case mapping options rejected.
    InvalidOption { code: i32, message: String },
    /// A variadic operation was called with no pattern.
    WrongArgumentCount,
    /// `undump` rejected its input.
    MalformedDump { code: i32, message: String },
    /// Other error not covered by specific variants.
    Other(i32),
}

impl StrError {
    pub fn invalid_byte_sequence(encoding: &str) -> Self {
        StrError::InvalidByteSequence {
            encoding: encoding.to_string(),
        }
    }

    /// Range error for a transliteration pattern. `text` is the offending
    /// `a-b` slice when both ends are ASCII.
    pub fn invalid_range(text: Option<&[u8]>) -> Self {
        match text {
            Some(t) => StrError::InvalidRange {
                code: STRERR_INVALID_RANGE,
                message: str_error_code_to_str(STRERR_INVALID_RANGE, Some(t)),
            },
            None => StrError::InvalidRange {
                code: STRERR_INVALID_RANGE_MULTIBYTE,
                message: str_error_code_to_format(STRERR_INVALID_RANGE_MULTIBYTE).to_string(),
            },
        }
    }

    pub fn invalid_format(text: String) -> Self {
        StrError::InvalidFormat { text }
    }

    pub fn range(code: i32, param: &[u8]) -> Self {
        StrError::RangeError {
            code,
            message: str_error_code_to_str(code, Some(param)),
        }
    }

    pub fn option(code: i32, param: Option<&[u8]>) -> Self {
        StrError::InvalidOption {
            code,
            message: str_error_code_to_str(code, param),
        }
    }

    pub fn incompatible(a: &str, b: &str) -> Self {
        StrError::IncompatibleEncoding {
            message: format!("{} and {}", a, b),
        }
    }

    /// Returns the i32 code behind this error.
    pub fn code(&self) -> i32 {
        match self {
            StrError::InvalidByteSequence { .. } => STRERR_INVALID_BYTE_SEQUENCE,
            StrError::EmptyString => STRERR_EMPTY_STRING,
            StrError::InvalidRange { code, .. } => *code,
            StrError::InvalidFormat { .. } => STRERR_INVALID_INTEGER,
            StrError::InvalidRadix(_) => STRERR_INVALID_RADIX,
            StrError::RangeError { code, .. } => *code,
            StrError::IncompatibleEncoding { .. } => STRERR_INCOMPATIBLE_ENCODING,
            StrError::InvalidOption { code, .. } => *code,
            StrError::WrongArgumentCount => STRERR_WRONG_NUMBER_OF_ARGUMENTS,
            StrError::MalformedDump { code, .. } => *code,
            StrError::Other(code) => *code,
        }
    }
}

impl fmt::Display for StrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrError::InvalidByteSequence { encoding } => {
                write!(f, "invalid byte sequence in {}", encoding)
            }
            StrError::InvalidFormat { text } => write!(f, "invalid value for Integer(): {}", text),
            StrError::InvalidRadix(radix) => write!(f, "invalid radix {}", radix),
            StrError::IncompatibleEncoding { message } => {
                write!(f, "incompatible character encodings: {}", message)
            }
            StrError::InvalidRange { message, .. }
            | StrError::RangeError { message, .. }
            | StrError::InvalidOption { message, .. }
            | StrError::MalformedDump { message, .. } => f.write_str(message),
            StrError::EmptyString | StrError::WrongArgumentCount => {
                f.write_str(str_error_code_to_format(self.code()))
            }
            StrError::Other(code) => write!(f, "error code {}", code),
        }
    }
}

impl std::error::Error for StrError {}

impl From<i32> for StrError {
    fn from(code: i32) -> Self {
        match code {
            STRERR_EMPTY_STRING => StrError::EmptyString,
            STRERR_WRONG_NUMBER_OF_ARGUMENTS => StrError::WrongArgumentCount,
            STRERR_INVALID_RANGE_MULTIBYTE => StrError::invalid_range(None),
            STRERR_TOO_MANY_OPTIONS | STRERR_INVALID_SECOND_OPTION | STRERR_FOLD_NOT_DOWNCASE => {
                StrError::option(code, None)
            }
            c if str_is_dump_error(c) => StrError::MalformedDump {
                code: c,
                message: str_error_code_to_format(c).to_string(),
            },
            _ => StrError::Other(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dump_code() {
        let err = StrError::from(STRERR_UNDUMP_MIXED_ESCAPE);
        assert!(matches!(err, StrError::MalformedDump { .. }));
        assert_eq!(err.code(), STRERR_UNDUMP_MIXED_ESCAPE);
        assert_eq!(err.to_string(), "hex escape and Unicode escape are mixed");
    }

    #[test]
    fn from_empty_string() {
        let err = StrError::from(STRERR_EMPTY_STRING);
        assert_eq!(err, StrError::EmptyString);
        assert_eq!(err.to_string(), "empty string");
    }

    #[test]
    fn from_unknown_code() {
        assert!(matches!(StrError::from(-9999), StrError::Other(-9999)));
    }

    #[test]
    fn invalid_byte_sequence_display() {
        let err = StrError::invalid_byte_sequence("UTF-8");
        assert_eq!(err.code(), STRERR_INVALID_BYTE_SEQUENCE);
        assert_eq!(err.to_string(), "invalid byte sequence in UTF-8");
    }

    #[test]
    fn invalid_range_variants() {
        let ascii = StrError::invalid_range(Some(b"z-a"));
        assert_eq!(ascii.code(), STRERR_INVALID_RANGE);
        assert_eq!(ascii.to_string(), "invalid range \"z-a\" in string transliteration");

        let multi = StrError::invalid_range(None);
        assert_eq!(multi.code(), STRERR_INVALID_RANGE_MULTIBYTE);
        assert_eq!(multi.to_string(), "invalid range in string transliteration");
    }

    #[test]
    fn invalid_format_display() {
        let err = StrError::invalid_format("\"abc\"".to_string());
        assert_eq!(err.to_string(), "invalid value for Integer(): \"abc\"");
        assert_eq!(StrError::InvalidRadix(37).to_string(), "invalid radix 37");
    }

    #[test]
    fn option_display() {
        let err = StrError::from(STRERR_FOLD_NOT_DOWNCASE);
        assert_eq!(err.to_string(), "option :fold only allowed for downcasing");
        let err = StrError::option(STRERR_INVALID_OPTION, Some(b":bogus"));
        assert_eq!(err.to_string(), "invalid option: :bogus");
    }

    #[test]
    fn error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(StrError::WrongArgumentCount);
        assert_eq!(err.to_string(), "wrong number of arguments (given 0, expected 1+)");
    }
}
