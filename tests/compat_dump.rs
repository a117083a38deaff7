// compat_dump.rs - dump/undump across encodings.
//
//   x_dump(enc, bytes, literal)     -> dump yields the literal
//   round_trip(enc, bytes)          -> undump(dump(s)) == s, encoding included

use mbstring::api::EncodedString;
use mbstring::defs::*;
use mbstring::dump::*;
use mbstring::enc::OnigEncoding;
use mbstring::encodings::*;

fn x_dump(enc: OnigEncoding, s: &[u8], literal: &str) {
    let out = dump(enc, s);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        literal,
        "dump {:?} under {}",
        s,
        enc.name()
    );
}

fn round_trip(enc: OnigEncoding, s: &[u8]) {
    let original = EncodedString::new(s, enc);
    let dumped = original.dump();
    assert!(dumped.is_ascii_only());
    let back = dumped.undump().unwrap();
    assert_eq!(back, original, "round trip of {:?}", dumped);
}

#[test]
fn dump_per_encoding() {
    x_dump(&ONIG_ENCODING_UTF8, "h\u{e9}llo\n".as_bytes(), "\"h\\u00E9llo\\n\"");
    x_dump(&ONIG_ENCODING_UTF8, b"\x7f", "\"\\u007F\"");
    x_dump(&ONIG_ENCODING_ISO_8859_1, b"caf\xe9", "\"caf\\xE9\"");
    x_dump(&ONIG_ENCODING_EUC_JP, b"\xa4\xa2", "\"\\xA4\\xA2\"");
    x_dump(&ONIG_ENCODING_ASCII_8BIT, b"\x00\xff", "\"\\x00\\xFF\"");
    x_dump(
        &ONIG_ENCODING_UTF16BE,
        b"\x00a",
        "\"\\x00a\".force_encoding(\"UTF-16BE\")",
    );
    x_dump(
        &ONIG_ENCODING_UTF32LE,
        b"a\x00\x00\x00",
        "\"a\\x00\\x00\\x00\".force_encoding(\"UTF-32LE\")",
    );
}

#[test]
fn dump_keeps_interpolation_inert() {
    x_dump(&ONIG_ENCODING_UTF8, b"#{a}#b", "\"\\#{a}#b\"");
    x_dump(&ONIG_ENCODING_UTF8, b"#", "\"#\"");
}

#[test]
fn round_trips() {
    round_trip(&ONIG_ENCODING_UTF8, "h\u{e9}llo \u{1f600}\t\"q\"\\".as_bytes());
    round_trip(&ONIG_ENCODING_UTF8, b"#{x} #$y #@z");
    round_trip(&ONIG_ENCODING_UTF8, b"a\xff");
    round_trip(&ONIG_ENCODING_ISO_8859_1, b"caf\xe9\x00");
    round_trip(&ONIG_ENCODING_EUC_JP, b"\xa4\xa2\xa4\xa4");
    round_trip(&ONIG_ENCODING_SHIFT_JIS, b"\x82\xa0x");
    round_trip(&ONIG_ENCODING_UTF16LE, b"a\x00\n\x00");
    round_trip(&ONIG_ENCODING_UTF16BE, b"\xd8\x3d\xde\x00");
    round_trip(&ONIG_ENCODING_UTF32BE, b"\x00\x00\x30\x42");
    round_trip(&ONIG_ENCODING_ASCII_8BIT, b"");
}

#[test]
fn non_ascii_compatible_dump_is_us_ascii() {
    let s = EncodedString::new(b"a\x00".to_vec(), &ONIG_ENCODING_UTF16LE);
    assert_eq!(s.dump().encoding().name(), "US-ASCII");
    let s = EncodedString::new(b"\xe9".to_vec(), &ONIG_ENCODING_ISO_8859_1);
    assert_eq!(s.dump().encoding().name(), "ISO-8859-1");
}

#[test]
fn unicode_escape_switches_to_utf8() {
    let (bytes, enc) = undump(&ONIG_ENCODING_ISO_8859_1, b"\"\\u00e9\"").unwrap();
    assert_eq!(bytes, "\u{e9}".as_bytes());
    assert_eq!(enc.name(), "UTF-8");
    let (bytes, enc) = undump(&ONIG_ENCODING_ASCII, b"\"\\u{3042 20 1F600}\"").unwrap();
    assert_eq!(bytes, "\u{3042} \u{1f600}".as_bytes());
    assert_eq!(enc.name(), "UTF-8");
}

#[test]
fn force_encoding_lookup_ignores_case() {
    let (bytes, enc) = undump(&ONIG_ENCODING_ASCII, b"\"a\\x00\".force_encoding(\"utf-16le\")").unwrap();
    assert_eq!(bytes, b"a\x00");
    assert_eq!(enc.name(), "UTF-16LE");
}

#[test]
fn malformed_dumps() {
    let code = |s: &[u8]| undump(&ONIG_ENCODING_ASCII, s).unwrap_err().code();
    assert_eq!(code(b"\"\\"), STRERR_UNDUMP_INVALID_ESCAPE);
    assert_eq!(code(b"\"\\n"), STRERR_UNDUMP_UNTERMINATED);
    assert_eq!(code(b"x"), STRERR_UNDUMP_INVALID_FORMAT);
    assert_eq!(code(b"\"a\".force_encoding(\"UTF-16LE\""), STRERR_UNDUMP_INVALID_FORMAT);
    assert_eq!(code(b"\"\\u{41 G}\""), STRERR_UNDUMP_INVALID_UNICODE_ESCAPE);
    assert_eq!(code(b"\"\\u{1234567}\""), STRERR_UNDUMP_INVALID_UNICODE_ESCAPE);
    assert_eq!(code(b"\"\\x4\""), STRERR_UNDUMP_INVALID_HEX_ESCAPE);
    assert_eq!(code(b"\"\\xff\\u00e9\""), STRERR_UNDUMP_MIXED_ESCAPE);
}
