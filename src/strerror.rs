// strerror.rs - Error code to message conversion.
//
// Every user-visible diagnostic lives here as a literal string. Codes that
// carry context use a `%n` placeholder filled in by `str_error_code_to_str`.

use crate::defs::*;

/// Get the format string for an error code.
pub fn str_error_code_to_format(code: i32) -> &'static str {
    match code {
        STR_NORMAL => "success",
        ONIGERR_INVALID_CODE_POINT_VALUE => "invalid code point value",
        ONIGERR_TOO_BIG_WIDE_CHAR_VALUE => "too big wide-char value",

        STRERR_INVALID_BYTE_SEQUENCE => "invalid byte sequence in %n",
        STRERR_EMPTY_STRING => "empty string",
        STRERR_INVALID_CODEPOINT => "invalid codepoint %n",
        STRERR_OUT_OF_CHAR_RANGE => "%n out of char range",
        STRERR_INCOMPATIBLE_ENCODING => "incompatible character encodings: %n",
        STRERR_WRONG_NUMBER_OF_ARGUMENTS => "wrong number of arguments (given 0, expected 1+)",

        STRERR_INVALID_RANGE => "invalid range \"%n\" in string transliteration",
        STRERR_INVALID_RANGE_MULTIBYTE => "invalid range in string transliteration",

        STRERR_INVALID_INTEGER => "invalid value for Integer(): %n",
        STRERR_INVALID_RADIX => "invalid radix %n",

        STRERR_TOO_MANY_OPTIONS => "too many options",
        STRERR_INVALID_SECOND_OPTION => "invalid second option",
        STRERR_FOLD_NOT_DOWNCASE => "option :fold only allowed for downcasing",
        STRERR_INVALID_OPTION => "invalid option: %n",

        STRERR_UNDUMP_NON_ASCII => "non-ASCII character detected",
        STRERR_UNDUMP_NULL_BYTE => "string contains null byte",
        STRERR_UNDUMP_INVALID_FORMAT => {
            "invalid dumped string; not wrapped with '\"' nor '\"...\".force_encoding(\"...\")' form"
        }
        STRERR_UNDUMP_UNTERMINATED => "unterminated dumped string",
        STRERR_UNDUMP_UNICODE_WITH_FORCE_ENCODING => {
            "dumped string contained Unicode escape but used force_encoding"
        }
        STRERR_UNDUMP_UNKNOWN_ENCODING => "dumped string has unknown encoding name",
        STRERR_UNDUMP_INVALID_ESCAPE => "invalid escape",
        STRERR_UNDUMP_MIXED_ESCAPE => "hex escape and Unicode escape are mixed",
        STRERR_UNDUMP_INVALID_UNICODE_ESCAPE => "invalid Unicode escape",
        STRERR_UNDUMP_UNTERMINATED_UNICODE_ESCAPE => "unterminated Unicode escape",
        STRERR_UNDUMP_CODEPOINT_TOO_LARGE => "invalid Unicode codepoint (too large)",
        STRERR_UNDUMP_INVALID_CODEPOINT => "invalid Unicode codepoint",
        STRERR_UNDUMP_INVALID_HEX_ESCAPE => "invalid hex escape",
        _ => "undefined error code",
    }
}

/// Check if an error code carries a parameter.
pub fn str_is_error_code_needs_param(code: i32) -> bool {
    matches!(
        code,
        STRERR_INVALID_BYTE_SEQUENCE
            | STRERR_INVALID_CODEPOINT
            | STRERR_OUT_OF_CHAR_RANGE
            | STRERR_INCOMPATIBLE_ENCODING
            | STRERR_INVALID_RANGE
            | STRERR_INVALID_INTEGER
            | STRERR_INVALID_RADIX
            | STRERR_INVALID_OPTION
    )
}

/// Convert an error code to its message, substituting `param` for `%n`.
/// Bytes outside printable ASCII are rendered as `\xHH`.
pub fn str_error_code_to_str(code: i32, param: Option<&[u8]>) -> String {
    let fmt = str_error_code_to_format(code);

    if !str_is_error_code_needs_param(code) {
        return fmt.to_string();
    }

    let par_str = param
        .unwrap_or_default()
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                (b as char).to_string()
            } else {
                format!("\\x{:02X}", b)
            }
        })
        .collect::<String>();
    fmt.replace("%n", &par_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message() {
        assert_eq!(
            str_error_code_to_str(STRERR_UNDUMP_UNTERMINATED, None),
            "unterminated dumped string"
        );
        assert_eq!(str_error_code_to_str(STRERR_EMPTY_STRING, None), "empty string");
    }

    #[test]
    fn test_invalid_format_wording() {
        assert_eq!(
            str_error_code_to_str(STRERR_UNDUMP_INVALID_FORMAT, None),
            r#"invalid dumped string; not wrapped with '"' nor '"...".force_encoding("...")' form"#
        );
    }

    #[test]
    fn test_undefined_error() {
        assert_eq!(str_error_code_to_str(-9999, None), "undefined error code");
    }

    #[test]
    fn test_parameterized() {
        assert_eq!(
            str_error_code_to_str(STRERR_INVALID_BYTE_SEQUENCE, Some(b"UTF-8")),
            "invalid byte sequence in UTF-8"
        );
        assert_eq!(
            str_error_code_to_str(STRERR_INVALID_RANGE, Some(b"z-a")),
            "invalid range \"z-a\" in string transliteration"
        );
    }

    #[test]
    fn test_param_escaping() {
        assert_eq!(
            str_error_code_to_str(STRERR_INVALID_OPTION, Some(b":\xff")),
            "invalid option: :\\xFF"
        );
    }

    #[test]
    fn test_missing_param() {
        assert_eq!(str_error_code_to_str(STRERR_INVALID_RADIX, None), "invalid radix ");
    }

    #[test]
    fn test_needs_param() {
        assert!(str_is_error_code_needs_param(STRERR_INVALID_INTEGER));
        assert!(!str_is_error_code_needs_param(STRERR_UNDUMP_INVALID_ESCAPE));
    }
}
