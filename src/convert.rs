// convert.rs - Byte string to integer parsing and integer formatting.
//
// Parsing follows the Integer() literal grammar: optional whitespace and
// sign, an optional radix prefix, digits with single `_` separators. Short
// inputs parse into an i64; anything that might not fit goes through
// num-bigint in 512-digit blocks.

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::dump::dump;
use crate::enc::OnigEncoding;
use crate::error::StrError;

/// Digits per block when building a decimal big integer.
const BIG_DIGIT_BLOCK: usize = 512;

const LOWER_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const UPPER_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A parsed integer: machine word when it fits, arbitrary precision otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Integer {
    Fixnum(i64),
    Bignum(BigInt),
}

impl Integer {
    /// Demote to `Fixnum` when the value fits an i64.
    pub fn from_big(z: BigInt) -> Integer {
        match z.to_i64() {
            Some(v) => Integer::Fixnum(v),
            None => Integer::Bignum(z),
        }
    }

    pub fn is_fixnum(&self) -> bool {
        matches!(self, Integer::Fixnum(_))
    }

    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Integer::Fixnum(v) => Some(*v),
            Integer::Bignum(z) => z.to_i64(),
        }
    }

    pub fn to_bigint(&self) -> BigInt {
        match self {
            Integer::Fixnum(v) => BigInt::from(*v),
            Integer::Bignum(z) => z.clone(),
        }
    }

    /// Render in `radix` (2..=36).
    pub fn to_radix_bytes(&self, radix: u32, upper: bool) -> Result<Vec<u8>, StrError> {
        match self {
            Integer::Fixnum(v) => long_to_bytes(*v, radix, upper),
            Integer::Bignum(z) => {
                check_radix(radix as i32)?;
                let s = z.to_str_radix(radix);
                Ok(if upper {
                    s.to_ascii_uppercase().into_bytes()
                } else {
                    s.into_bytes()
                })
            }
        }
    }
}

impl From<i64> for Integer {
    fn from(v: i64) -> Self {
        Integer::Fixnum(v)
    }
}

impl From<BigInt> for Integer {
    fn from(z: BigInt) -> Self {
        Integer::from_big(z)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Fixnum(v) => write!(f, "{}", v),
            Integer::Bignum(z) => write!(f, "{}", z),
        }
    }
}

// === Character tables ===

/// Digit value of an ASCII alphanumeric (0-35).
#[inline]
fn conv_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'z' => Some(c - b'a' + 10),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Whitespace accepted around a numeric literal.
#[inline]
fn is_space(c: u8) -> bool {
    matches!(c, b'\t' | b'\n' | 0x0b | 0x0c | b'\r' | b' ')
}

fn check_radix(base: i32) -> Result<(), StrError> {
    if (2..=36).contains(&base) {
        Ok(())
    } else {
        Err(StrError::InvalidRadix(base))
    }
}

// === Parsing ===

/// Cursor over the literal being parsed.
struct InumScan<'a> {
    enc: OnigEncoding,
    data: &'a [u8],
    p: usize,
    base: i32,
    badcheck: bool,
}

impl<'a> InumScan<'a> {
    #[inline]
    fn end(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.data.get(self.p).copied()
    }

    #[inline]
    fn space_at(&self, i: usize) -> bool {
        self.data.get(i).is_some_and(|&c| is_space(c))
    }

    fn invalid(&self) -> StrError {
        let quoted = dump(self.enc, self.data);
        StrError::invalid_format(String::from_utf8_lossy(&quoted).into_owned())
    }

    /// Zero in lenient mode, an error in strict mode.
    fn reject(&self) -> Result<Integer, StrError> {
        if self.badcheck {
            Err(self.invalid())
        } else {
            Ok(Integer::Fixnum(0))
        }
    }

    fn skip_space(&mut self) {
        while self.space_at(self.p) {
            self.p += 1;
        }
    }

    /// Consume a sign; returns false for negative.
    fn sign(&mut self) -> bool {
        match self.peek() {
            Some(b'+') => {
                self.p += 1;
                true
            }
            Some(b'-') => {
                self.p += 1;
                false
            }
            _ => true,
        }
    }

    fn resolve_base(&mut self) {
        if self.base > 0 {
            return;
        }
        if self.base < -1 {
            self.base = -self.base;
            return;
        }
        self.base = if self.peek() == Some(b'0') {
            match self.data.get(self.p + 1) {
                Some(b'x' | b'X') => 16,
                Some(b'b' | b'B') => 2,
                Some(b'o' | b'O') => 8,
                Some(b'd' | b'D') => 10,
                _ => 8,
            }
        } else {
            10
        };
    }

    /// Skip a radix prefix matching the base and return the bits each
    /// digit contributes at most.
    fn skip_prefix(&mut self) -> Result<usize, StrError> {
        let second = if self.peek() == Some(b'0') {
            self.data.get(self.p + 1).copied().unwrap_or(0)
        } else {
            0
        };
        let (bits, prefix) = match self.base {
            2 => (1, b'b'),
            3 => (2, 0),
            4..=7 => (3, 0),
            8 => (3, b'o'),
            9 | 11..=15 => (4, 0),
            10 => (4, b'd'),
            16 => (4, b'x'),
            17..=32 => (5, 0),
            33..=36 => (6, 0),
            _ => return Err(StrError::InvalidRadix(self.base)),
        };
        if prefix != 0 && second.to_ascii_lowercase() == prefix {
            self.p += 2;
        }
        Ok(bits)
    }

    /// Drop redundant leading zeroes, allowing single underscores between
    /// them. A lone zero stays.
    fn squeeze_zeroes(&mut self) {
        if self.peek() != Some(b'0') {
            return;
        }
        self.p += 1;
        let mut us = 0;
        while let Some(c) = self.peek() {
            if c == b'_' {
                us += 1;
                if us >= 2 {
                    break;
                }
            } else if c == b'0' {
                us = 0;
            } else {
                break;
            }
            self.p += 1;
        }
        if self.p == self.end() || self.space_at(self.p) {
            self.p -= 1;
        }
    }

    /// Count of decimal digits from the cursor.
    fn trailing_digits(&self) -> usize {
        self.data[self.p..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count()
    }

    /// Machine word parse from the cursor. Returns the magnitude and the
    /// end of the digits, or None on overflow.
    fn parse_word(&self) -> Option<(i64, usize)> {
        let base = self.base as i64;
        let cutoff = i64::MAX / base;
        let cutlim = i64::MAX % base;
        let mut s = self.p;
        let mut val: i64 = 0;
        while let Some(d) = self.data.get(s).copied().and_then(conv_digit) {
            let d = d as i64;
            if d >= base {
                break;
            }
            if val > cutoff || (val == cutoff && d > cutlim) {
                return None;
            }
            val = val * base + d;
            s += 1;
        }
        Some((val, s))
    }

    /// Only whitespace and NUL bytes may follow the number.
    fn check_trailing(&self, s: usize) -> Result<(), StrError> {
        if self.data[s..].iter().all(|&c| c == 0 || is_space(c)) {
            Ok(())
        } else {
            Err(self.invalid())
        }
    }

    fn parse(mut self) -> Result<Integer, StrError> {
        self.skip_space();
        let positive = self.sign();
        if matches!(self.peek(), Some(b'+' | b'-')) {
            return self.reject();
        }

        self.resolve_base();
        let bits = self.skip_prefix()?;
        self.squeeze_zeroes();

        match self.peek().and_then(conv_digit) {
            Some(d) if (d as i32) < self.base => {}
            _ => return self.reject(),
        }

        let estimate = if self.base <= 10 {
            bits * self.trailing_digits()
        } else {
            bits * (self.end() - self.p)
        };

        if estimate < 63 {
            if let Some((val, stop)) = self.parse_word() {
                if self.data.get(stop) != Some(&b'_') {
                    if self.badcheck {
                        self.check_trailing(stop)?;
                    }
                    return Ok(Integer::Fixnum(if positive { val } else { -val }));
                }
            }
        }

        tracing::debug!(
            base = self.base,
            len = self.end() - self.p,
            "integer literal takes the bignum path"
        );
        self.parse_big(positive)
    }

    fn parse_big(mut self, positive: bool) -> Result<Integer, StrError> {
        if self.badcheck && self.peek() == Some(b'_') {
            return Err(self.invalid());
        }

        let mut digits: Vec<u8> = Vec::with_capacity(self.end() - self.p);
        let mut after_underscore = false;
        while let Some(c) = self.peek() {
            if c == b'_' {
                if after_underscore {
                    if self.badcheck {
                        return Err(self.invalid());
                    }
                    break;
                }
                after_underscore = true;
                self.p += 1;
                continue;
            }
            match conv_digit(c) {
                Some(d) if (d as i32) < self.base => digits.push(d),
                _ => break,
            }
            after_underscore = false;
            self.p += 1;
        }

        if digits.is_empty() {
            return Ok(Integer::Fixnum(0));
        }
        if self.badcheck {
            if after_underscore {
                return Err(self.invalid());
            }
            self.check_trailing(self.p)?;
        }

        let magnitude = if self.base == 10 {
            decimal_to_big(&digits)
        } else {
            BigUint::from_radix_be(&digits, self.base as u32)
        }
        .ok_or_else(|| self.invalid())?;

        let sign = if positive { Sign::Plus } else { Sign::Minus };
        Ok(Integer::from_big(BigInt::from_biguint(sign, magnitude)))
    }
}

/// Build a decimal magnitude block-wise: split into 512-digit blocks from
/// the right, then combine neighbors pairwise while squaring the block
/// multiplier.
fn decimal_to_big(digits: &[u8]) -> Option<BigUint> {
    let n_digits = digits.len().min(BIG_DIGIT_BLOCK);
    let mut blocks: Vec<BigUint> = digits
        .rchunks(n_digits)
        .map(|chunk| BigUint::from_radix_be(chunk, 10))
        .collect::<Option<_>>()?;

    let mut scale = BigUint::from(10u32).pow(n_digits as u32);
    while blocks.len() > 1 {
        let mut next = Vec::with_capacity(blocks.len() / 2 + 1);
        let mut it = blocks.into_iter();
        while let Some(lo) = it.next() {
            match it.next() {
                Some(hi) => next.push(lo + hi * &scale),
                None => next.push(lo),
            }
        }
        blocks = next;
        scale = &scale * &scale;
    }
    Some(blocks.pop().unwrap_or_else(BigUint::zero))
}

/// Parse `data` as an integer literal in `base`.
///
/// `base` of 0 or -1 sniffs the radix from a `0x`/`0b`/`0o`/`0d`/`0`
/// prefix. A base below -1 forces its absolute value. With `badcheck`,
/// anything that is not a well-formed literal is an error; otherwise the
/// longest valid prefix is parsed and garbage yields 0.
pub fn str_to_inum(
    enc: OnigEncoding,
    data: &[u8],
    base: i32,
    badcheck: bool,
) -> Result<Integer, StrError> {
    InumScan {
        enc,
        data,
        p: 0,
        base,
        badcheck,
    }
    .parse()
}

// === Formatting ===

/// Signed rendering in any radix 2..=36.
pub fn long_to_bytes(i: i64, radix: u32, upper: bool) -> Result<Vec<u8>, StrError> {
    check_radix(radix as i32)?;
    if i == 0 {
        return Ok(vec![b'0']);
    }
    let digitmap = if upper { UPPER_DIGITS } else { LOWER_DIGITS };
    let radix = radix as u64;

    // unsigned_abs covers i64::MIN.
    let mut n = i.unsigned_abs();
    let mut buf = [0u8; 65];
    let mut pos = buf.len();
    while n > 0 {
        pos -= 1;
        buf[pos] = digitmap[(n % radix) as usize];
        n /= radix;
    }
    if i < 0 {
        pos -= 1;
        buf[pos] = b'-';
    }
    Ok(buf[pos..].to_vec())
}

fn long_to_unsigned_bytes(i: i64, shift: u32, digitmap: &[u8; 36]) -> Vec<u8> {
    let mut n = i as u64;
    let mask = (1u64 << shift) - 1;
    let mut buf = [0u8; 64];
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = digitmap[(n & mask) as usize];
        n >>= shift;
        if n == 0 {
            break;
        }
    }
    buf[pos..].to_vec()
}

/// Two's complement bit pattern in base 2.
pub fn long_to_binary_bytes(i: i64) -> Vec<u8> {
    long_to_unsigned_bytes(i, 1, LOWER_DIGITS)
}

/// Two's complement bit pattern in base 8.
pub fn long_to_octal_bytes(i: i64) -> Vec<u8> {
    long_to_unsigned_bytes(i, 3, LOWER_DIGITS)
}

/// Two's complement bit pattern in base 16.
pub fn long_to_hex_bytes(i: i64, upper: bool) -> Vec<u8> {
    long_to_unsigned_bytes(i, 4, if upper { UPPER_DIGITS } else { LOWER_DIGITS })
}

/// Bits per output digit for power-of-two renderings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitShift {
    Binary = 1,
    Quaternary = 2,
    Octal = 3,
    Hex = 4,
}

/// Render a big-endian two's complement buffer digit by digit without
/// building an integer. The top digit is sign-extended when the bit count
/// does not divide evenly.
pub fn twos_complement_to_unsigned_bytes(input: &[u8], shift: DigitShift, upper: bool) -> Vec<u8> {
    let shift = shift as u32;
    let olen = (input.len() * 8).div_ceil(shift as usize);
    let mut out = vec![0u8; olen];
    let mask = (1u32 << shift) - 1;
    let digits = if upper { UPPER_DIGITS } else { LOWER_DIGITS };
    let fill: u32 = match input.first() {
        Some(&b) if b & 0x80 != 0 => 0xff,
        _ => 0,
    };

    let mut bitbuf: u32 = 0;
    let mut bitcnt: u32 = 0;
    let mut i = input.len();
    for o in (0..olen).rev() {
        if bitcnt < shift {
            let byte = if i > 0 {
                i -= 1;
                input[i] as u32
            } else {
                fill
            };
            bitbuf |= byte << bitcnt;
            bitcnt += 8;
        }
        out[o] = digits[(bitbuf & mask) as usize];
        bitbuf >>= shift;
        bitcnt -= shift;
    }
    out
}
