//! # mbstring
//!
//! Encoding-aware byte-string algorithms: code range classification,
//! character boundaries, `tr`/`count`/`delete`/`squeeze`, case mapping,
//! `succ`, `Integer()` parsing and `dump`/`undump`.
//!
//! Strings are plain byte slices tagged with an encoding. Invalid bytes are
//! never rejected up front; each operation decides how to step over them.
//!
//! ## Quick Start
//!
//! ```rust
//! use mbstring::prelude::*;
//!
//! let s = EncodedString::from("hello world");
//! assert_eq!(s.count(&[&"lo".into()]).unwrap(), 5);
//! assert_eq!(s.upcase(CaseOptions::new()).unwrap().as_bytes(), b"HELLO WORLD");
//! assert_eq!(EncodedString::from("az").succ().as_bytes(), b"ba");
//! ```
//!
//! ## Low-Level C-Style API
//!
//! Every operation is also available as a free function over
//! `(encoding, bytes, code range)`:
//!
//! ```rust
//! use mbstring::coderange::classify;
//! use mbstring::defs::CodeRange;
//! use mbstring::encodings::utf8::ONIG_ENCODING_UTF8;
//! use mbstring::tr::tr;
//!
//! let enc = &ONIG_ENCODING_UTF8;
//! let input = "h\u{e9}llo".as_bytes();
//! let cr = classify(enc, input);
//! assert_eq!(cr, CodeRange::Valid);
//!
//! let (out, cr) = tr(enc, input, cr, b"a-y", b"b-z").unwrap().unwrap();
//! assert_eq!(out, "i\u{e9}mmp".as_bytes());
//! assert_eq!(cr, CodeRange::Valid);
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`defs`] | Shared types, length sentinels, error codes |
//! | [`enc`] | Encoding trait and shared helpers |
//! | [`encodings`] | Concrete encodings and the name registry |
//! | [`unicode`] | Unicode ctype and case mapping |
//! | [`coderange`] | Code ranges, character lengths, code points |
//! | [`tr`] | Transliteration, count, delete, squeeze |
//! | [`casemap`] | upcase/downcase/swapcase/capitalize |
//! | [`succ`] | String successor |
//! | [`convert`] | Integer parsing and formatting |
//! | [`dump`] | dump/undump |
//! | [`strerror`] | Error messages |
//! | [`api`] | `EncodedString`, `CaseOptions`, `IntegerParser` |

// Allow patterns inherent to the C-style layer.
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod api;
pub mod casemap;
pub mod coderange;
pub mod convert;
pub mod defs;
pub mod dump;
pub mod enc;
pub mod encodings;
pub mod error;
pub mod prelude;
pub mod strerror;
pub mod succ;
pub mod tr;
pub mod unicode;
