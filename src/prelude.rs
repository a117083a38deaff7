// prelude.rs - Convenient re-exports for the idiomatic API.
//
//! # Prelude
//!
//! ```
//! use mbstring::prelude::*;
//!
//! let n = IntegerParser::new().parse(b"0x1f").unwrap();
//! assert_eq!(n, Integer::Fixnum(31));
//! ```

pub use crate::api::{CaseOptions, Chars, EncodedString, IntegerParser};
pub use crate::convert::Integer;
pub use crate::defs::CodeRange;
pub use crate::enc::OnigEncoding;
pub use crate::error::StrError;
