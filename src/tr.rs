// tr.rs - Transliteration: count, delete, squeeze, tr and tr_s.
//
// A pattern is walked with `TrCursor`, which expands `a-z` ranges lazily.
// Code points below TRANS_SIZE land in a direct table; larger ones go to
// sparse sets so multibyte patterns work without a full code point table.

use std::collections::{HashMap, HashSet};

use crate::coderange::*;
use crate::defs::*;
use crate::enc::*;
use crate::error::StrError;

// === Pattern cursor ===

/// Stateful walk over one transliteration pattern.
pub struct TrCursor<'a> {
    enc: OnigEncoding,
    buf: &'a [u8],
    p: usize,
    pend: usize,
    now: OnigCodePoint,
    max: OnigCodePoint,
    gen: bool,
}

impl<'a> TrCursor<'a> {
    pub fn new(enc: OnigEncoding, buf: &'a [u8]) -> Self {
        TrCursor {
            enc,
            buf,
            p: 0,
            pend: buf.len(),
            now: 0,
            max: 0,
            gen: false,
        }
    }

    /// The most recently produced code point. Once the pattern is exhausted
    /// this is its final character.
    #[inline]
    pub fn now(&self) -> OnigCodePoint {
        self.now
    }

    /// Skip `n` bytes at the front (used to step over a leading `^`).
    #[inline]
    pub fn skip(&mut self, n: usize) {
        self.p = (self.p + n).min(self.pend);
    }

    /// Produce the next code point, or None at the end of the pattern.
    /// Codes inside a range that the encoding cannot represent are skipped.
    pub fn next(&mut self) -> Result<Option<OnigCodePoint>, StrError> {
        if !self.gen {
            return self.next_part();
        }
        loop {
            self.now = self.now.wrapping_add(1);
            if self.enc.code_to_mbclen(self.now) > 0 {
                break;
            }
            if self.now >= self.max {
                self.gen = false;
                return self.next_part();
            }
        }
        if self.now < self.max {
            Ok(Some(self.now))
        } else {
            self.gen = false;
            Ok(Some(self.max))
        }
    }

    fn next_part(&mut self) -> Result<Option<OnigCodePoint>, StrError> {
        if self.p == self.pend {
            return Ok(None);
        }
        if let Some((c, n)) = enc_ascget(self.enc, self.buf, self.p, self.pend) {
            if c == b'\\' as OnigCodePoint && self.p + n < self.pend {
                self.p += n;
            }
        }
        let (now, n) = enc_codepoint_len(self.enc, self.buf, self.p, self.pend)?;
        self.now = now;
        self.p += n;

        if let Some((c, n)) = enc_ascget(self.enc, self.buf, self.p, self.pend) {
            if c == b'-' as OnigCodePoint && self.p + n < self.pend {
                self.p += n;
                let (c, n) = enc_codepoint_len(self.enc, self.buf, self.p, self.pend)?;
                self.p += n;
                if self.now > c {
                    if self.now < 0x80 && c < 0x80 {
                        let text = [self.now as u8, b'-', c as u8];
                        return Err(StrError::invalid_range(Some(&text)));
                    }
                    return Err(StrError::invalid_range(None));
                }
                self.gen = true;
                self.max = c;
            }
        }
        Ok(Some(self.now))
    }
}

/// Does the pattern start with a negating `^`? Returns the caret's byte
/// length. A lone `^` is a literal.
fn negation_prefix(enc: OnigEncoding, pattern: &[u8]) -> Option<usize> {
    if pattern.len() <= 1 {
        return None;
    }
    match enc_ascget(enc, pattern, 0, pattern.len()) {
        Some((c, l)) if c == b'^' as OnigCodePoint && l < pattern.len() => Some(l),
        _ => None,
    }
}

// === Selection table ===

/// Sparse sets for code points >= TRANS_SIZE.
#[derive(Debug, Default, Clone)]
pub struct TrTables {
    /// Selected code points, intersected across positive patterns.
    pub del: Option<HashSet<OnigCodePoint>>,
    /// Code points excluded by a negated pattern.
    pub nodel: Option<HashSet<OnigCodePoint>>,
}

/// The intersection of one or more patterns.
/// `stable[TRANS_SIZE]` is the answer for large code points that appear in
/// neither sparse set.
#[derive(Debug, Clone)]
pub struct TrTable {
    pub stable: [bool; TRANS_SIZE + 1],
    pub tables: TrTables,
}

impl TrTable {
    /// Build the table selecting characters matched by every pattern.
    pub fn build(enc: OnigEncoding, patterns: &[&[u8]]) -> Result<TrTable, StrError> {
        let mut table = TrTable {
            stable: [false; TRANS_SIZE + 1],
            tables: TrTables::default(),
        };
        for (i, pattern) in patterns.iter().enumerate() {
            tr_setup_table(enc, pattern, &mut table, i == 0)?;
        }
        Ok(table)
    }

    /// A table selecting every character.
    pub fn all() -> TrTable {
        TrTable {
            stable: [true; TRANS_SIZE + 1],
            tables: TrTables::default(),
        }
    }

    #[inline]
    pub fn find(&self, c: OnigCodePoint) -> bool {
        tr_find(c, &self.stable, &self.tables)
    }
}

/// Fold one pattern into `table`. `first` resets the table.
pub fn tr_setup_table(
    enc: OnigEncoding,
    pattern: &[u8],
    table: &mut TrTable,
    first: bool,
) -> Result<(), StrError> {
    let mut tr = TrCursor::new(enc, pattern);
    let cflag = match negation_prefix(enc, pattern) {
        Some(l) => {
            tr.skip(l);
            true
        }
        None => false,
    };

    let stable = &mut table.stable;
    let tables = &mut table.tables;
    if first {
        stable[..TRANS_SIZE].fill(true);
        stable[TRANS_SIZE] = cflag;
    } else if stable[TRANS_SIZE] && !cflag {
        stable[TRANS_SIZE] = false;
    }

    let mut buf: Option<[bool; TRANS_SIZE]> = None;
    let mut sparse_started = false;
    let mut prev_del: Option<HashSet<OnigCodePoint>> = None;

    while let Some(c) = tr.next()? {
        if (c as usize) < TRANS_SIZE {
            let b = buf.get_or_insert([cflag; TRANS_SIZE]);
            b[c as usize] = !cflag;
            continue;
        }
        if !sparse_started && (first || tables.del.is_some() || stable[TRANS_SIZE]) {
            sparse_started = true;
            if cflag {
                tables.nodel.get_or_insert_with(HashSet::new);
            } else {
                prev_del = tables.del.replace(HashSet::new());
            }
        }
        if !sparse_started {
            continue;
        }
        if cflag {
            if let Some(nodel) = tables.nodel.as_mut() {
                nodel.insert(c);
            }
        } else {
            let keep = prev_del.as_ref().map_or(true, |p| p.contains(&c));
            if keep {
                if let Some(del) = tables.del.as_mut() {
                    del.insert(c);
                }
            }
        }
    }

    match buf {
        Some(b) => {
            for (s, &v) in stable[..TRANS_SIZE].iter_mut().zip(b.iter()) {
                *s = *s && v;
            }
        }
        None => {
            for s in stable[..TRANS_SIZE].iter_mut() {
                *s = *s && cflag;
            }
        }
    }

    if !sparse_started && !cflag {
        tables.del = None;
    }
    Ok(())
}

/// Is c selected by the table?
pub fn tr_find(c: OnigCodePoint, stable: &[bool; TRANS_SIZE + 1], tables: &TrTables) -> bool {
    if (c as usize) < TRANS_SIZE {
        return stable[c as usize];
    }
    let in_nodel = tables.nodel.as_ref().is_some_and(|n| n.contains(&c));
    match &tables.del {
        Some(del) => {
            if del.contains(&c) && !in_nodel {
                return true;
            }
        }
        None => {
            if in_nodel {
                return false;
            }
        }
    }
    stable[TRANS_SIZE]
}

// === Helpers ===

/// Decode the character at s, returning it with the byte length of its
/// canonical encoding.
#[inline]
fn next_code(
    enc: OnigEncoding,
    cr: Option<CodeRange>,
    bytes: &[u8],
    s: usize,
    send: usize,
) -> Result<(OnigCodePoint, usize), StrError> {
    let c = code_point(enc, cr, bytes, s, send)?;
    let cl = code_length(enc, c);
    if cl <= 0 {
        return Err(StrError::invalid_byte_sequence(enc.name()));
    }
    Ok((c, cl as usize))
}

#[inline]
fn push_code(enc: OnigEncoding, c: OnigCodePoint, out: &mut Vec<u8>) -> Result<(), StrError> {
    let mut tmp = [0u8; ONIGENC_CODE_TO_MBC_MAXLEN];
    let n = enc.code_to_mbc(c, &mut tmp);
    if n <= 0 {
        return Err(StrError::invalid_byte_sequence(enc.name()));
    }
    out.extend_from_slice(&tmp[..n as usize]);
    Ok(())
}

#[inline]
fn check_if_ascii(c: OnigCodePoint, cr: CodeRange) -> CodeRange {
    if cr == CodeRange::Ascii && !onigenc_is_code_ascii(c) {
        CodeRange::Valid
    } else {
        cr
    }
}

#[inline]
fn single_byte_optimizable(enc: OnigEncoding, cr: CodeRange) -> bool {
    cr == CodeRange::Ascii || onigenc_is_singlebyte(enc)
}

// === count ===

/// Count the characters of bytes selected by `table`.
pub fn tr_count(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    table: &TrTable,
) -> Result<usize, StrError> {
    let ascii_compat = onigenc_is_ascii_compatible_encoding(enc);
    let (mut p, end) = (0usize, bytes.len());
    let mut count = 0usize;
    while p < end {
        let b = bytes[p];
        if ascii_compat && b < 0x80 {
            if table.stable[b as usize] {
                count += 1;
            }
            p += 1;
        } else {
            let (c, cl) = next_code(enc, Some(cr), bytes, p, end)?;
            if table.find(c) {
                count += 1;
            }
            p += cl;
        }
    }
    Ok(count)
}

/// Count the characters matched by the intersection of `patterns`.
pub fn count(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    patterns: &[&[u8]],
) -> Result<usize, StrError> {
    if patterns.is_empty() {
        return Err(StrError::WrongArgumentCount);
    }
    if let [pattern] = patterns {
        if pattern.len() == 1
            && pattern[0] < 0x80
            && onigenc_is_ascii_compatible_encoding(enc)
            && !cr.is_broken()
        {
            return Ok(memchr::memchr_iter(pattern[0], bytes).count());
        }
    }
    let table = TrTable::build(enc, patterns)?;
    tr_count(enc, bytes, cr, &table)
}

// === delete ===

/// Remove every selected character. Returns None when nothing matched.
pub fn tr_delete(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    table: &TrTable,
) -> Result<Option<(Vec<u8>, CodeRange)>, StrError> {
    let ascii_compat = onigenc_is_ascii_compatible_encoding(enc);
    let mut out_cr = if ascii_compat {
        CodeRange::Ascii
    } else {
        CodeRange::Valid
    };
    let mut out = Vec::with_capacity(bytes.len());
    let mut modified = false;
    let (mut s, send) = (0usize, bytes.len());

    while s < send {
        let b = bytes[s];
        if ascii_compat && b < 0x80 {
            if table.stable[b as usize] {
                modified = true;
            } else {
                out.push(b);
            }
            s += 1;
        } else {
            let (c, cl) = next_code(enc, Some(cr), bytes, s, send)?;
            if table.find(c) {
                modified = true;
            } else {
                push_code(enc, c, &mut out)?;
                if out_cr == CodeRange::Ascii {
                    out_cr = CodeRange::Valid;
                }
            }
            s += cl;
        }
    }

    Ok(modified.then_some((out, out_cr)))
}

/// Delete the characters matched by the intersection of `patterns`.
pub fn delete(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    patterns: &[&[u8]],
) -> Result<Option<(Vec<u8>, CodeRange)>, StrError> {
    if patterns.is_empty() {
        return Err(StrError::WrongArgumentCount);
    }
    if bytes.is_empty() {
        return Ok(None);
    }
    let table = TrTable::build(enc, patterns)?;
    tr_delete(enc, bytes, cr, &table)
}

// === squeeze ===

/// Collapse runs of the same selected character. With no table every
/// character is squeezable. Returns None when nothing changed.
pub fn tr_squeeze(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    table: Option<&TrTable>,
) -> Result<Option<Vec<u8>>, StrError> {
    let mut out = Vec::with_capacity(bytes.len());
    let (mut s, send) = (0usize, bytes.len());
    let mut save: Option<OnigCodePoint> = None;

    if single_byte_optimizable(enc, cr) {
        while s < send {
            let c = bytes[s];
            s += 1;
            let squeezable = table.map_or(true, |t| t.stable[c as usize]);
            if save != Some(c as OnigCodePoint) || !squeezable {
                out.push(c);
                save = Some(c as OnigCodePoint);
            }
        }
    } else {
        let ascii_compat = onigenc_is_ascii_compatible_encoding(enc);
        while s < send {
            let b = bytes[s];
            if ascii_compat && b < 0x80 {
                let c = b as OnigCodePoint;
                let squeezable = table.map_or(true, |t| t.stable[b as usize]);
                if save != Some(c) || !squeezable {
                    out.push(b);
                    save = Some(c);
                }
                s += 1;
            } else {
                let (c, cl) = next_code(enc, Some(cr), bytes, s, send)?;
                let squeezable = table.map_or(true, |t| t.find(c));
                if save != Some(c) || !squeezable {
                    push_code(enc, c, &mut out)?;
                    save = Some(c);
                }
                s += cl;
            }
        }
    }

    Ok((out.len() != bytes.len()).then_some(out))
}

/// Squeeze runs of characters matched by `patterns`, or of any character
/// when no pattern is given.
pub fn squeeze(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    patterns: &[&[u8]],
) -> Result<Option<Vec<u8>>, StrError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    if patterns.is_empty() {
        return tr_squeeze(enc, bytes, cr, None);
    }
    let table = TrTable::build(enc, patterns)?;
    tr_squeeze(enc, bytes, cr, Some(&table))
}

// === tr / tr_s ===

/// Replacement lookup for one source code point.
fn tr_code(
    c: OnigCodePoint,
    trans: &[Option<OnigCodePoint>; TRANS_SIZE],
    hash: Option<&HashMap<OnigCodePoint, OnigCodePoint>>,
    cflag: bool,
    last: OnigCodePoint,
) -> Option<OnigCodePoint> {
    if (c as usize) < TRANS_SIZE {
        return trans[c as usize];
    }
    match hash {
        Some(h) => match h.get(&c) {
            None => cflag.then_some(last),
            Some(&r) => (!cflag).then_some(r),
        },
        None => cflag.then_some(last),
    }
}

/// Translate characters of `bytes` found in `src_pat` to the matching
/// position of `repl_pat`. With `sflag`, runs of the same translated
/// character collapse to one. Both patterns must be non-empty.
/// Returns None when nothing was translated.
pub fn tr_trans(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    src_pat: &[u8],
    repl_pat: &[u8],
    sflag: bool,
) -> Result<Option<(Vec<u8>, CodeRange)>, StrError> {
    let mut tr_src = TrCursor::new(enc, src_pat);
    let cflag = match negation_prefix(enc, src_pat) {
        Some(l) => {
            tr_src.skip(l);
            true
        }
        None => false,
    };

    let mut trans: [Option<OnigCodePoint>; TRANS_SIZE] = [None; TRANS_SIZE];
    let mut hash: Option<HashMap<OnigCodePoint, OnigCodePoint>> = None;
    let mut tr_repl = TrCursor::new(enc, repl_pat);
    let mut singlebyte = single_byte_optimizable(enc, cr);
    let mut last: OnigCodePoint = 0;

    if cflag {
        let mut member = [false; TRANS_SIZE];
        while let Some(c) = tr_src.next()? {
            if (c as usize) < TRANS_SIZE {
                member[c as usize] = true;
            } else {
                hash.get_or_insert_with(HashMap::new).insert(c, 1);
            }
        }
        while tr_repl.next()?.is_some() {}
        last = tr_repl.now();
        if code_length(enc, last) != 1 {
            singlebyte = false;
        }
        for (t, &m) in trans.iter_mut().zip(member.iter()) {
            if !m {
                *t = Some(last);
            }
        }
    } else {
        while let Some(c) = tr_src.next()? {
            let r = match tr_repl.next()? {
                Some(r) => r,
                None => tr_repl.now(),
            };
            if (c as usize) < TRANS_SIZE {
                trans[c as usize] = Some(r);
                if code_length(enc, r) != 1 {
                    singlebyte = false;
                }
            } else {
                hash.get_or_insert_with(HashMap::new).insert(c, r);
            }
        }
    }

    let mut cr = cr;
    if cr == CodeRange::Valid && onigenc_is_ascii_compatible_encoding(enc) {
        cr = CodeRange::Ascii;
    }

    let mut modified = false;
    let (mut s, send) = (0usize, bytes.len());
    let out;

    if sflag {
        let mut buf = Vec::with_capacity(bytes.len());
        let mut save: Option<OnigCodePoint> = None;
        while s < send {
            let (c0, clen) = next_code(enc, None, bytes, s, send)?;
            s += clen;
            match tr_code(c0, &trans, hash.as_ref(), cflag, last) {
                Some(c) => {
                    cr = check_if_ascii(c, cr);
                    if save == Some(c) {
                        continue;
                    }
                    save = Some(c);
                    modified = true;
                    push_code(enc, c, &mut buf)?;
                }
                None => {
                    save = None;
                    cr = check_if_ascii(c0, cr);
                    push_code(enc, c0, &mut buf)?;
                }
            }
        }
        out = buf;
    } else if onigenc_is_singlebyte(enc) || (singlebyte && hash.is_none()) {
        let mut buf = bytes.to_vec();
        for b in buf.iter_mut() {
            if let Some(t) = trans[*b as usize] {
                *b = t as u8;
                modified = true;
            }
            cr = check_if_ascii(*b as OnigCodePoint, cr);
        }
        out = buf;
    } else {
        tracing::debug!(
            encoding = enc.name(),
            len = bytes.len(),
            "tr: multibyte translation path"
        );
        let mut buf = Vec::with_capacity(bytes.len() + bytes.len() / 5);
        while s < send {
            let (c0, clen) = next_code(enc, None, bytes, s, send)?;
            let c = match tr_code(c0, &trans, hash.as_ref(), cflag, last) {
                Some(c) => {
                    modified = true;
                    c
                }
                None => c0,
            };
            push_code(enc, c, &mut buf)?;
            cr = check_if_ascii(c, cr);
            s += clen;
        }
        out = buf;
    }

    if !modified {
        return Ok(None);
    }
    if cr == CodeRange::Broken {
        cr = classify(enc, &out);
    }
    Ok(Some((out, cr)))
}

/// `tr` with its edge cases: an empty source pattern changes nothing and
/// an empty replacement deletes.
pub fn tr(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    src_pat: &[u8],
    repl_pat: &[u8],
) -> Result<Option<(Vec<u8>, CodeRange)>, StrError> {
    tr_dispatch(enc, bytes, cr, src_pat, repl_pat, false)
}

/// `tr` followed by squeezing runs of translated characters.
pub fn tr_s(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    src_pat: &[u8],
    repl_pat: &[u8],
) -> Result<Option<(Vec<u8>, CodeRange)>, StrError> {
    tr_dispatch(enc, bytes, cr, src_pat, repl_pat, true)
}

fn tr_dispatch(
    enc: OnigEncoding,
    bytes: &[u8],
    cr: CodeRange,
    src_pat: &[u8],
    repl_pat: &[u8],
    sflag: bool,
) -> Result<Option<(Vec<u8>, CodeRange)>, StrError> {
    if bytes.is_empty() || src_pat.is_empty() {
        return Ok(None);
    }
    if repl_pat.is_empty() {
        return delete(enc, bytes, cr, &[src_pat]);
    }
    tr_trans(enc, bytes, cr, src_pat, repl_pat, sflag)
}
