//! Bidirectional mapping between a (row, column) grid position and the
//! human-readable seat code shown on seating charts: row letter followed by
//! the column number, so (1, 1) is "A1" and (2, 3) is "B3".
//!
//! Seat persistence and user-facing code lookup must both go through this
//! module so the two paths cannot drift apart.

use std::fmt;

/// Declared grid bounds. Rows map onto 'A'..='Z'.
pub const MAX_ROW: i64 = 26;
pub const MAX_COL: i64 = 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeError {
    pub code: String,
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid seat code: {}", self.code)
    }
}

impl std::error::Error for CodeError {}

fn invalid(code: &str) -> CodeError {
    CodeError {
        code: code.to_string(),
    }
}

/// Row/column position to seat code. Total over the declared grid bounds;
/// positions outside them are rejected rather than wrapped.
pub fn encode(row: i64, col: i64) -> Result<String, CodeError> {
    if !(1..=MAX_ROW).contains(&row) || !(1..=MAX_COL).contains(&col) {
        return Err(invalid(&format!("row {} col {}", row, col)));
    }
    let letter = (b'A' + (row - 1) as u8) as char;
    Ok(format!("{}{}", letter, col))
}

/// Strict inverse of [`encode`]. Accepts exactly one uppercase row letter and
/// a column number without leading zeros; anything else is an invalid code.
pub fn decode(code: &str) -> Result<(i64, i64), CodeError> {
    let mut chars = code.chars();
    let letter = chars.next().ok_or_else(|| invalid(code))?;
    if !letter.is_ascii_uppercase() {
        return Err(invalid(code));
    }

    let digits = chars.as_str();
    if digits.is_empty()
        || digits.len() > 2
        || digits.starts_with('0')
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid(code));
    }

    let row = (letter as i64) - ('A' as i64) + 1;
    let col: i64 = digits.parse().map_err(|_| invalid(code))?;
    if row > MAX_ROW || col > MAX_COL {
        return Err(invalid(code));
    }
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_matches_chart_convention() {
        assert_eq!(encode(1, 1).unwrap(), "A1");
        assert_eq!(encode(2, 4).unwrap(), "B4");
        assert_eq!(encode(9, 4).unwrap(), "I4");
        assert_eq!(encode(26, 99).unwrap(), "Z99");
    }

    #[test]
    fn encode_rejects_out_of_bounds_positions() {
        assert!(encode(0, 1).is_err());
        assert!(encode(1, 0).is_err());
        assert!(encode(27, 1).is_err());
        assert!(encode(1, 100).is_err());
    }

    #[test]
    fn decode_is_strict_inverse_of_encode() {
        for row in [1, 2, 9, 26] {
            for col in [1, 4, 10, 99] {
                let code = encode(row, col).unwrap();
                assert_eq!(decode(&code).unwrap(), (row, col));
            }
        }
    }

    #[test]
    fn decode_rejects_malformed_codes() {
        for bad in ["", "A", "1A", "a1", "A0", "A01", "A100", "AA1", "A1 ", "Å1"] {
            assert!(decode(bad).is_err(), "expected rejection for {:?}", bad);
        }
    }
}
