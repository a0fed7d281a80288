//! Numeric Scanning Helpers
//!
//! Byte-level consumers behind the `number` parser: per-base integer
//! accumulation and the dot/exponent scan of the float grammar. These only
//! find the extent of the lexeme and the accumulated integer value; the
//! decision of what to do with it (which bases are permitted, which
//! problems to report) stays with the parser.
//!
//! Integer accumulation is `i64` with wrapping arithmetic: digits past the
//! width wrap silently, matching the fixed-width accumulation of the
//! runtimes this engine mirrors.

use super::scan::is_ascii;

/// Consume digits of the given base starting at `offset`, accumulating the
/// integer value. Returns the offset past the last digit and the value.
pub fn consume_base(base: i64, offset: usize, source: &str) -> (usize, i64) {
    let bytes = source.as_bytes();
    let mut offset = offset;
    let mut total: i64 = 0;

    while offset < bytes.len() {
        let digit = i64::from(bytes[offset]) - i64::from(b'0');
        if digit < 0 || digit >= base {
            break;
        }
        total = base.wrapping_mul(total).wrapping_add(digit);
        offset += 1;
    }

    (offset, total)
}

/// Consume hexadecimal digits (`0-9`, `A-F`, `a-f`) starting at `offset`.
pub fn consume_base16(offset: usize, source: &str) -> (usize, i64) {
    let bytes = source.as_bytes();
    let mut offset = offset;
    let mut total: i64 = 0;

    while offset < bytes.len() {
        let digit = match bytes[offset] {
            b @ b'0'..=b'9' => i64::from(b - b'0'),
            b @ b'A'..=b'F' => i64::from(b - b'A') + 10,
            b @ b'a'..=b'f' => i64::from(b - b'a') + 10,
            _ => break,
        };
        total = total.wrapping_mul(16).wrapping_add(digit);
        offset += 1;
    }

    (offset, total)
}

/// Skip past base-10 digits; returns the offset of the first non-digit.
pub fn chomp_base10(offset: usize, source: &str) -> usize {
    let bytes = source.as_bytes();
    let mut offset = offset;
    while offset < bytes.len() && bytes[offset].is_ascii_digit() {
        offset += 1;
    }
    offset
}

/// Consume an optional fraction (`.` plus digits) and an optional exponent
/// starting at `offset`.
///
/// `Ok(end)` is the offset past everything consumed (equal to `offset`
/// when neither part is present). `Err(at)` means an exponent marker was
/// present but no digits followed it; `at` is where the digits were
/// expected, so the caller can point its report there.
pub fn consume_dot_and_exp(offset: usize, source: &str) -> Result<usize, usize> {
    if is_ascii(b'.', offset, source) {
        consume_exp(chomp_base10(offset + 1, source), source)
    } else {
        consume_exp(offset, source)
    }
}

/// Consume an optional `e`/`E` exponent with optional sign.
fn consume_exp(offset: usize, source: &str) -> Result<usize, usize> {
    if is_ascii(b'e', offset, source) || is_ascii(b'E', offset, source) {
        let marker_offset = offset + 1;
        let digits_offset =
            if is_ascii(b'+', marker_offset, source) || is_ascii(b'-', marker_offset, source) {
                marker_offset + 1
            } else {
                marker_offset
            };
        let end = chomp_base10(digits_offset, source);

        if digits_offset == end {
            Err(end)
        } else {
            Ok(end)
        }
    } else {
        Ok(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_base_decimal() {
        assert_eq!(consume_base(10, 0, "123x"), (3, 123));
    }

    #[test]
    fn test_consume_base_stops_at_foreign_digit() {
        assert_eq!(consume_base(8, 0, "179"), (2, 0o17));
    }

    #[test]
    fn test_consume_base_no_digits() {
        assert_eq!(consume_base(10, 0, "xyz"), (0, 0));
    }

    #[test]
    fn test_consume_base16_mixed_case() {
        assert_eq!(consume_base16(0, "fFg"), (2, 0xff));
        assert_eq!(consume_base16(0, "1A"), (2, 0x1a));
    }

    #[test]
    fn test_chomp_base10() {
        assert_eq!(chomp_base10(1, "a123b"), 4);
        assert_eq!(chomp_base10(0, ""), 0);
    }

    #[test]
    fn test_dot_and_exp_fraction_only() {
        assert_eq!(consume_dot_and_exp(1, "3.25"), Ok(4));
    }

    #[test]
    fn test_dot_and_exp_exponent_variants() {
        assert_eq!(consume_dot_and_exp(1, "1e5"), Ok(3));
        assert_eq!(consume_dot_and_exp(1, "1E5"), Ok(3));
        assert_eq!(consume_dot_and_exp(1, "1.5e-3"), Ok(6));
        assert_eq!(consume_dot_and_exp(1, "1e+2x"), Ok(4));
    }

    #[test]
    fn test_dot_and_exp_nothing_present() {
        assert_eq!(consume_dot_and_exp(1, "1x"), Ok(1));
    }

    #[test]
    fn test_exponent_without_digits_reports_where() {
        assert_eq!(consume_dot_and_exp(1, "1e"), Err(2));
        assert_eq!(consume_dot_and_exp(1, "1e+"), Err(3));
        assert_eq!(consume_dot_and_exp(1, "1.2e!"), Err(4));
    }
}
