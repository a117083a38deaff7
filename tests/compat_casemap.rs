// compat_casemap.rs - upcase/downcase/swapcase/capitalize through EncodedString.
//
//   up(s, expected)                 -> upcase with no options
//   down(s, expected)               -> downcase with no options
//   x_case(enc, mode, opts, s, exp) -> any mode, any encoding

use mbstring::api::{CaseOptions, EncodedString};
use mbstring::defs::*;
use mbstring::enc::{onigenc_same, OnigEncoding};
use mbstring::encodings::*;
use mbstring::error::StrError;

#[derive(Clone, Copy, Debug)]
enum Mode {
    Up,
    Down,
    Swap,
    Cap,
}

fn run(s: &EncodedString, mode: Mode, opts: CaseOptions) -> Result<EncodedString, StrError> {
    match mode {
        Mode::Up => s.upcase(opts),
        Mode::Down => s.downcase(opts),
        Mode::Swap => s.swapcase(opts),
        Mode::Cap => s.capitalize(opts),
    }
}

fn x_case(enc: OnigEncoding, mode: Mode, opts: CaseOptions, s: &[u8], expected: &[u8]) {
    let input = EncodedString::new(s, enc);
    let out = run(&input, mode, opts).unwrap();
    assert_eq!(
        out.as_bytes(),
        expected,
        "{:?} {:?} under {}",
        mode,
        String::from_utf8_lossy(s),
        enc.name()
    );
    assert!(onigenc_same(out.encoding(), enc));
}

fn utf8(mode: Mode, opts: CaseOptions, s: &str, expected: &str) {
    x_case(&ONIG_ENCODING_UTF8, mode, opts, s.as_bytes(), expected.as_bytes());
}

fn up(s: &str, expected: &str) {
    utf8(Mode::Up, CaseOptions::new(), s, expected);
}

fn down(s: &str, expected: &str) {
    utf8(Mode::Down, CaseOptions::new(), s, expected);
}

// === ASCII ===

#[test]
fn ascii_modes() {
    up("hello world", "HELLO WORLD");
    down("Hello World", "hello world");
    utf8(Mode::Swap, CaseOptions::new(), "Hello World", "hELLO wORLD");
    utf8(Mode::Cap, CaseOptions::new(), "hello WORLD", "Hello world");
    utf8(Mode::Cap, CaseOptions::new(), "", "");
}

#[test]
fn ascii_result_keeps_code_range() {
    let s = EncodedString::from("abc");
    let out = s.upcase(CaseOptions::new()).unwrap();
    assert!(out.is_ascii_only());
    let same = EncodedString::from("ABC").upcase(CaseOptions::new()).unwrap();
    assert_eq!(same.as_bytes(), b"ABC");
}

// === Unicode ===

#[test]
fn latin_letters() {
    down("\u{c0}\u{c9}\u{ce}", "\u{e0}\u{e9}\u{ee}");
    up("\u{e0}\u{e9}\u{ee}", "\u{c0}\u{c9}\u{ce}");
    utf8(Mode::Swap, CaseOptions::new(), "Hello W\u{f6}rld", "hELLO w\u{d6}RLD");
    utf8(Mode::Cap, CaseOptions::new(), "\u{e9}COLE", "\u{c9}cole");
}

#[test]
fn length_changing_mappings() {
    up("stra\u{df}e", "STRASSE");
    down("\u{df}", "\u{df}");
    utf8(Mode::Down, CaseOptions::new().fold(), "\u{df}", "ss");
    utf8(Mode::Down, CaseOptions::new().fold(), "STRA\u{df}E", "strasse");
}

#[test]
fn dotted_and_dotless_i() {
    down("\u{130}", "i\u{307}");
    utf8(Mode::Down, CaseOptions::new().turkic(), "\u{130}", "i");
    utf8(Mode::Down, CaseOptions::new().turkic(), "I", "\u{131}");
    utf8(Mode::Up, CaseOptions::new().turkic(), "i", "\u{130}");
    up("i", "I");
}

#[test]
fn ascii_only_option() {
    utf8(Mode::Up, CaseOptions::new().ascii(), "h\u{e9}llo", "H\u{e9}LLO");
    utf8(Mode::Down, CaseOptions::new().ascii(), "\u{c9}COLE", "\u{c9}cole");
    utf8(Mode::Up, CaseOptions::new().ascii(), "\u{df}", "\u{df}");
}

// === Other encodings ===

#[test]
fn latin1() {
    let enc: OnigEncoding = &ONIG_ENCODING_ISO_8859_1;
    x_case(enc, Mode::Up, CaseOptions::new(), b"caf\xe9", b"CAF\xc9");
    x_case(enc, Mode::Down, CaseOptions::new(), b"CAF\xc9", b"caf\xe9");
    x_case(enc, Mode::Up, CaseOptions::new(), b"\xdf", b"SS");
}

#[test]
fn binary_maps_ascii_only() {
    let enc: OnigEncoding = &ONIG_ENCODING_ASCII_8BIT;
    x_case(enc, Mode::Up, CaseOptions::new(), b"ab\xe9", b"AB\xe9");
    x_case(enc, Mode::Swap, CaseOptions::new(), b"aB\xff", b"Ab\xff");
}

#[test]
fn wide_encodings() {
    x_case(
        &ONIG_ENCODING_UTF16BE,
        Mode::Up,
        CaseOptions::new(),
        b"\x00a\x00\xe9",
        b"\x00A\x00\xc9",
    );
    x_case(
        &ONIG_ENCODING_UTF16LE,
        Mode::Down,
        CaseOptions::new(),
        b"A\x00B\x00",
        b"a\x00b\x00",
    );
    x_case(
        &ONIG_ENCODING_UTF32LE,
        Mode::Up,
        CaseOptions::new(),
        b"z\x00\x00\x00",
        b"Z\x00\x00\x00",
    );
}

// === Options and errors ===

#[test]
fn fold_is_downcase_only() {
    let s = EncodedString::from("abc");
    for mode in [Mode::Up, Mode::Swap, Mode::Cap] {
        let err = run(&s, mode, CaseOptions::new().fold()).unwrap_err();
        assert_eq!(err.code(), STRERR_FOLD_NOT_DOWNCASE);
    }
    assert!(s.downcase(CaseOptions::new().fold()).is_ok());
}

#[test]
fn option_names() {
    assert_eq!(CaseOptions::parse(&["ascii"]), Ok(CaseOptions::new().ascii()));
    assert_eq!(CaseOptions::parse(&["fold"]), Ok(CaseOptions::new().fold()));
    assert_eq!(
        CaseOptions::parse(&["turkic", "lithuanian"]),
        Ok(CaseOptions::new().turkic().lithuanian())
    );
    let code = |names: &[&str]| CaseOptions::parse(names).unwrap_err().code();
    assert_eq!(code(&["fold", "ascii"]), STRERR_TOO_MANY_OPTIONS);
    assert_eq!(code(&["lithuanian", "fold"]), STRERR_INVALID_SECOND_OPTION);
    assert_eq!(code(&["upper"]), STRERR_INVALID_OPTION);
}

#[test]
fn broken_input_on_complex_path() {
    let s = EncodedString::new(b"\xe9a".to_vec(), &ONIG_ENCODING_UTF8);
    let err = s.upcase(CaseOptions::new()).unwrap_err();
    assert_eq!(err.to_string(), "invalid byte sequence in UTF-8");
    // ASCII-only mapping never decodes the broken byte.
    let out = s.upcase(CaseOptions::new().ascii()).unwrap();
    assert_eq!(out.as_bytes(), b"\xe9A");
}
