// compat_inum.rs - Integer() parsing and integer formatting.
//
//   ok(s, base, n)                  -> strict parse yields the fixnum n
//   bad(s, base)                    -> strict parse fails
//   loose(s, base, n)               -> lenient parse yields n

use mbstring::api::{EncodedString, IntegerParser};
use mbstring::convert::*;
use mbstring::defs::*;
use mbstring::encodings::*;
use mbstring::error::StrError;
use num_bigint::BigInt;

fn ok(s: &str, base: i32, n: i64) {
    assert_eq!(
        IntegerParser::new().base(base).parse(s.as_bytes()),
        Ok(Integer::Fixnum(n)),
        "Integer({:?}, {})",
        s,
        base
    );
}

fn bad(s: &str, base: i32) {
    let err = IntegerParser::new().base(base).parse(s.as_bytes()).unwrap_err();
    assert_eq!(err.code(), STRERR_INVALID_INTEGER, "Integer({:?}, {})", s, base);
}

fn loose(s: &str, base: i32, n: i64) {
    assert_eq!(
        EncodedString::from(s).to_i(base),
        Ok(Integer::Fixnum(n)),
        "{:?}.to_i({})",
        s,
        base
    );
}

// === Strict ===

#[test]
fn prefixed_literals() {
    ok("0x1A", 0, 26);
    ok("-0b11", 0, -3);
    ok("  0b1010  ", 0, 10);
    ok("0O777", 0, 511);
    ok("0D099", 0, 99);
    ok("0777", 0, 511);
    ok("00", 0, 0);
    ok("0x1f", -1, 31);
}

#[test]
fn explicit_radix() {
    ok("Zz", 36, 1295);
    ok("ff", 16, 255);
    ok("0b11", 2, 3);
    ok("101", 2, 5);
    ok("777", -8, 511);
    ok("10", -16, 16);
    // A forced radix reads the prefix letters as digits.
    ok("0b1", -16, 0xb1);
    ok("0x1f", -1, 31);
}

#[test]
fn malformed_literals() {
    bad("", 0);
    bad("0x", 0);
    bad("- 1", 10);
    bad("1e3", 10);
    bad("0_8", 0);
    bad("12 3", 10);
    bad("9", 8);
    bad("1__2", 10);
}

#[test]
fn nul_and_space_may_trail() {
    ok("12\0", 10, 12);
    ok("12\0\0 ", 10, 12);
    ok("12 \0 \0", 10, 12);
    bad("12\0abc", 10);
    bad("12 \0 3", 10);
    bad("123456789012345678901234567890\0x", 10);
    loose("12\0abc", 10, 12);
}

#[test]
fn error_quotes_the_input() {
    let err = IntegerParser::new().parse("\u{ff11}\u{ff12}".as_bytes()).unwrap_err();
    assert_eq!(err.to_string(), "invalid value for Integer(): \"\\uFF11\\uFF12\"");
    let err = IntegerParser::new()
        .encoding(&ONIG_ENCODING_ISO_8859_1)
        .parse(b"\xe9")
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid value for Integer(): \"\\xE9\"");
}

#[test]
fn radix_out_of_range() {
    assert_eq!(
        IntegerParser::new().base(40).parse(b"1"),
        Err(StrError::InvalidRadix(40))
    );
    assert_eq!(IntegerParser::new().base(-40).parse(b"1").unwrap_err().code(), STRERR_INVALID_RADIX);
}

// === Lenient ===

#[test]
fn lenient_takes_the_longest_prefix() {
    loose("1e3", 10, 1);
    loose("ffzz", 16, 255);
    loose("  -12abc", 10, -12);
    loose("abc", 10, 0);
    loose("", 10, 0);
    loose("0x", 16, 0);
    loose("1__2", 10, 1);
    loose("0b101", 0, 5);
}

// === Bignums ===

#[test]
fn values_beyond_a_machine_word() {
    let v = IntegerParser::new().parse(b"18446744073709551616").unwrap();
    assert!(!v.is_fixnum());
    assert_eq!(v.to_i64(), None);
    assert_eq!(v.to_bigint(), BigInt::from(1u128 << 64));

    let bits = format!("1{}", "0".repeat(64));
    let v = IntegerParser::new().base(2).parse(bits.as_bytes()).unwrap();
    assert_eq!(v.to_radix_bytes(16, false).unwrap(), b"10000000000000000");

    let v = IntegerParser::new()
        .parse(b"1_000_000_000_000_000_000_000")
        .unwrap();
    assert_eq!(v.to_string(), format!("1{}", "0".repeat(24)));
}

#[test]
fn bignum_garbage() {
    let digits = "123456789012345678901234567890";
    let text = format!("{}xyz", digits);
    bad(&text, 10);
    let v = EncodedString::from(text.as_str()).to_i(10).unwrap();
    assert_eq!(v.to_string(), digits);
}

#[test]
fn word_boundary_values() {
    ok("9223372036854775807", 10, i64::MAX);
    ok("-9223372036854775808", 10, i64::MIN);
    let v = IntegerParser::new().parse(b"9223372036854775808").unwrap();
    assert!(!v.is_fixnum());
    assert_eq!(v.to_string(), "9223372036854775808");
}

// === Formatting ===

#[test]
fn signed_formatting() {
    assert_eq!(long_to_bytes(35, 36, false).unwrap(), b"z");
    assert_eq!(long_to_bytes(-35, 36, true).unwrap(), b"-Z");
    assert_eq!(long_to_bytes(i64::MAX, 2, false).unwrap(), "1".repeat(63).as_bytes());
    assert_eq!(long_to_bytes(7, 1, false), Err(StrError::InvalidRadix(1)));
    assert_eq!(Integer::from(-255i64).to_radix_bytes(16, true).unwrap(), b"-FF");
    assert_eq!(Integer::from(42i64).to_string(), "42");
}

#[test]
fn bit_pattern_formatting() {
    assert_eq!(long_to_binary_bytes(-1), "1".repeat(64).as_bytes());
    assert_eq!(long_to_octal_bytes(0), b"0");
    assert_eq!(long_to_hex_bytes(0xbeef, true), b"BEEF");
    assert_eq!(twos_complement_to_unsigned_bytes(&[0x80], DigitShift::Hex, false), b"80");
    assert_eq!(twos_complement_to_unsigned_bytes(&[0x80], DigitShift::Octal, false), b"600");
    assert_eq!(twos_complement_to_unsigned_bytes(&[0x7f], DigitShift::Octal, false), b"177");
    assert_eq!(
        twos_complement_to_unsigned_bytes(&[0xff, 0x00], DigitShift::Binary, false),
        b"1111111100000000"
    );
    assert_eq!(
        twos_complement_to_unsigned_bytes(&[0x1b], DigitShift::Quaternary, false),
        b"0123"
    );
}
