//! Low-Level Source Probes
//!
//! Everything that actually looks at the source text lives here: matching
//! a literal at an offset, testing one code point against a predicate,
//! scanning forward for a needle. Every probe is position-tracking: it
//! reports not just the new offset but the row/column bookkeeping that
//! goes with it, so the primitives built on top never recount newlines.
//!
//! Offsets are byte offsets that always land on code point boundaries;
//! probes advance by each code point's UTF-8 width.

/// Outcome of testing the code point at an offset against a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubChar {
    /// The predicate rejected the code point, or the offset is at the end
    /// of the source.
    Reject,
    /// The predicate accepted a `'\n'`; the caller bumps the row and
    /// resets the column.
    Newline,
    /// The predicate accepted an ordinary code point; the payload is the
    /// offset just past it.
    Advance(usize),
}

/// Test the code point at `offset` against `pred`.
pub fn sub_char(pred: impl Fn(char) -> bool, offset: usize, source: &str) -> SubChar {
    match source.get(offset..).and_then(|rest| rest.chars().next()) {
        Some(ch) if pred(ch) => {
            if ch == '\n' {
                SubChar::Newline
            } else {
                SubChar::Advance(offset + ch.len_utf8())
            }
        }
        _ => SubChar::Reject,
    }
}

/// Match the literal `small` at exactly `offset`.
///
/// On a match, returns the offset just past the literal together with the
/// updated row/column: the row grows by the literal's newline count, and
/// the column restarts after the last newline (the code point after a
/// final `'\n'` sits at column 1).
pub fn sub_string(
    small: &str,
    offset: usize,
    row: usize,
    column: usize,
    source: &str,
) -> Option<(usize, usize, usize)> {
    let end = offset + small.len();
    if source.as_bytes().get(offset..end)? != small.as_bytes() {
        return None;
    }

    let new_column = match small.rfind('\n') {
        None => column + small.chars().count(),
        Some(last) => small[last + 1..].chars().count() + 1,
    };
    let new_row = row + small.matches('\n').count();

    Some((end, new_row, new_column))
}

/// Scan forward from `offset` for the first occurrence of `small`.
///
/// Returns the match offset (or `None` when the needle is absent) together
/// with the row/column walked to the match start, or to the end of the
/// source when there is no match. The needle itself is never consumed.
pub fn find_sub_string(
    small: &str,
    offset: usize,
    row: usize,
    column: usize,
    source: &str,
) -> (Option<usize>, usize, usize) {
    let found = source[offset..].find(small).map(|at| at + offset);
    let target = found.unwrap_or(source.len());

    let mut row = row;
    let mut column = column;
    for ch in source[offset..target].chars() {
        if ch == '\n' {
            row += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (found, row, column)
}

/// Whether the byte at `offset` is exactly the ASCII byte `code`.
///
/// UTF-8 continuation bytes never equal an ASCII byte, so a plain byte
/// comparison is exact.
#[inline]
pub fn is_ascii(code: u8, offset: usize, source: &str) -> bool {
    debug_assert!(code.is_ascii());
    source.as_bytes().get(offset) == Some(&code)
}

/// Advance over code points while `pred` accepts them, starting from the
/// given offset/row/column. Returns the final offset/row/column.
///
/// This is the single loop behind `chomp_while`, `spaces`, and the
/// identifier extender.
pub fn chomp_while_from(
    pred: impl Fn(char) -> bool,
    offset: usize,
    row: usize,
    column: usize,
    source: &str,
) -> (usize, usize, usize) {
    let mut offset = offset;
    let mut row = row;
    let mut column = column;

    loop {
        match sub_char(&pred, offset, source) {
            SubChar::Reject => return (offset, row, column),
            SubChar::Newline => {
                offset += 1;
                row += 1;
                column = 1;
            }
            SubChar::Advance(next) => {
                offset = next;
                column += 1;
            }
        }
    }
}
