// Criterion benchmark suite for the string engine.
//
// Run: cargo bench
// Specific group: cargo bench -- tr
// HTML report: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mbstring::casemap::{case_map, CaseMode};
use mbstring::coderange::{classify, enc_strlen};
use mbstring::convert::str_to_inum;
use mbstring::defs::CaseMapFlags;
use mbstring::dump::{dump, undump};
use mbstring::enc::OnigEncoding;
use mbstring::encodings::*;
use mbstring::succ::succ;
use mbstring::tr;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

fn ascii_text() -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog near the riverbank. ".repeat(64)
}

fn mixed_text() -> Vec<u8> {
    "Gr\u{fc}\u{df}e aus K\u{f6}ln, \u{3053}\u{3093}\u{306b}\u{3061}\u{306f} \u{1f600}! "
        .repeat(64)
        .into_bytes()
}

fn inputs() -> Vec<(&'static str, OnigEncoding, Vec<u8>)> {
    let utf8: OnigEncoding = &ONIG_ENCODING_UTF8;
    let latin1: OnigEncoding = &ONIG_ENCODING_ISO_8859_1;
    vec![
        ("ascii", utf8, ascii_text()),
        ("utf8", utf8, mixed_text()),
        ("latin1", latin1, b"caf\xe9 cr\xe8me br\xfbl\xe9e ".repeat(64)),
    ]
}

// ---------------------------------------------------------------------------
// 1. classify -- code range scan and character count
// ---------------------------------------------------------------------------

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for (name, enc, text) in inputs() {
        group.bench_with_input(BenchmarkId::new("scan", name), &text, |b, text| {
            b.iter(|| black_box(classify(enc, black_box(text))));
        });
        let cr = classify(enc, &text);
        group.bench_with_input(BenchmarkId::new("strlen", name), &text, |b, text| {
            b.iter(|| black_box(enc_strlen(enc, black_box(text), 0, text.len(), Some(cr))));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 2. tr -- transliteration family
// ---------------------------------------------------------------------------

fn bench_tr(c: &mut Criterion) {
    let mut group = c.benchmark_group("tr");
    for (name, enc, text) in inputs() {
        let cr = classify(enc, &text);
        group.bench_with_input(BenchmarkId::new("tr", name), &text, |b, text| {
            b.iter(|| black_box(tr::tr(enc, black_box(text), cr, b"a-y", b"b-z")));
        });
        group.bench_with_input(BenchmarkId::new("count", name), &text, |b, text| {
            b.iter(|| black_box(tr::count(enc, black_box(text), cr, &[&b"aeiou"[..]])));
        });
        group.bench_with_input(BenchmarkId::new("delete", name), &text, |b, text| {
            b.iter(|| black_box(tr::delete(enc, black_box(text), cr, &[&b"^a-z"[..]])));
        });
        group.bench_with_input(BenchmarkId::new("squeeze", name), &text, |b, text| {
            b.iter(|| black_box(tr::squeeze(enc, black_box(text), cr, &[])));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 3. casemap
// ---------------------------------------------------------------------------

fn bench_casemap(c: &mut Criterion) {
    let modes = [
        ("upcase", CaseMode::Upcase),
        ("downcase", CaseMode::Downcase),
        ("swapcase", CaseMode::Swapcase),
    ];
    let mut group = c.benchmark_group("casemap");
    for (name, enc, text) in inputs() {
        let cr = classify(enc, &text);
        for (mode_name, mode) in modes {
            let id = format!("{}/{}", mode_name, name);
            group.bench_with_input(BenchmarkId::from_parameter(id), &text, |b, text| {
                b.iter(|| black_box(case_map(enc, black_box(text), cr, mode, CaseMapFlags::empty())));
            });
        }
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 4. succ
// ---------------------------------------------------------------------------

fn bench_succ(c: &mut Criterion) {
    let cases: &[(&str, &[u8])] = &[
        ("no_carry", b"version-1.2.3"),
        ("long_carry", b"azzzzzzzzzzzzzzzzzzz"),
        ("digits", b"1999999999999999999999"),
    ];
    let mut group = c.benchmark_group("succ");
    for (name, s) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), s, |b, s| {
            b.iter(|| black_box(succ(&ONIG_ENCODING_UTF8, black_box(s))));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 5. str_to_inum -- word and bignum paths
// ---------------------------------------------------------------------------

fn bench_inum(c: &mut Criterion) {
    let big = "9".repeat(2000);
    let cases: Vec<(&str, Vec<u8>, i32)> = vec![
        ("fixnum", b"1234567".to_vec(), 10),
        ("hex_prefix", b"0x7fffffff".to_vec(), 0),
        ("underscored", b"1_000_000_000_000_000_000".to_vec(), 10),
        ("big_decimal", big.into_bytes(), 10),
    ];
    let mut group = c.benchmark_group("str_to_inum");
    for (name, text, base) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| black_box(str_to_inum(&ONIG_ENCODING_UTF8, black_box(text), *base, true)));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 6. dump/undump
// ---------------------------------------------------------------------------

fn bench_dump(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump");
    for (name, enc, text) in inputs() {
        group.bench_with_input(BenchmarkId::new("dump", name), &text, |b, text| {
            b.iter(|| black_box(dump(enc, black_box(text))));
        });
        let dumped = dump(enc, &text);
        group.bench_with_input(BenchmarkId::new("undump", name), &dumped, |b, dumped| {
            b.iter(|| black_box(undump(enc, black_box(dumped))));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_classify,
    bench_tr,
    bench_casemap,
    bench_succ,
    bench_inum,
    bench_dump,
);
criterion_main!(benches);
