use crate::error::WireError;

/// Largest magnitude any integer token may carry: `|i64::MIN|`.
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Incremental decoder for the `integer` token: `("+"|"-")? digit+`.
///
/// The accumulator is fed one byte at a time so the caller can pause
/// between buffer refills without losing progress. Overflow is checked
/// on every digit, so an endless run of digits fails as soon as the
/// value leaves the `i64` range instead of wrapping.
///
/// ```text
///   push_sign('-')      → negative = true
///   push_digit('4')     → magnitude = 4
///   push_digit('2')     → magnitude = 42
///   push_digit('\r')    → Ok(false), not a digit, stop here
///   finish()            → -42
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerAccumulator {
    negative: bool,
    magnitude: u64,
    digits: usize,
}

impl IntegerAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a leading sign byte.
    ///
    /// Returns `true` when `byte` was `+` or `-`. Only meaningful before
    /// the first digit.
    pub fn push_sign(&mut self, byte: u8) -> bool {
        match byte {
            b'-' => {
                self.negative = true;
                true
            }
            b'+' => true,
            _ => false,
        }
    }

    /// Consume one digit.
    ///
    /// Returns `Ok(true)` when `byte` was a digit and has been folded in,
    /// `Ok(false)` when it was not (the byte is left for the caller).
    ///
    /// # Errors
    ///
    /// [`WireError::NumberOverflow`] once the magnitude exceeds `2^63`.
    pub fn push_digit(&mut self, byte: u8) -> Result<bool, WireError> {
        if !byte.is_ascii_digit() {
            return Ok(false);
        }

        self.digits += 1;
        self.magnitude = self
            .magnitude
            .checked_mul(10)
            .and_then(|m| m.checked_add(u64::from(byte - b'0')))
            .filter(|&m| m <= MAX_MAGNITUDE)
            .ok_or(WireError::NumberOverflow {
                digits: self.digits,
            })?;
        Ok(true)
    }

    /// Number of digits consumed so far.
    #[must_use]
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Produce the signed value.
    ///
    /// # Errors
    ///
    /// - [`WireError::ExpectNumber`] if no digit was consumed.
    /// - [`WireError::NumberOverflow`] for a positive `2^63`.
    pub fn finish(self) -> Result<i64, WireError> {
        if self.digits == 0 {
            return Err(WireError::ExpectNumber);
        }

        if self.negative {
            // exact for every magnitude up to 2^63, which lands on i64::MIN
            return Ok(0_i64.wrapping_sub_unsigned(self.magnitude));
        }

        i64::try_from(self.magnitude).map_err(|_| WireError::NumberOverflow {
            digits: self.digits,
        })
    }
}

/// Decode a complete integer token from the front of `buf`.
///
/// # Returns
///
/// `(value, bytes_consumed)`. Decoding stops at the first non-digit,
/// which is not consumed.
///
/// # Errors
///
/// Same as [`IntegerAccumulator::finish`] and
/// [`IntegerAccumulator::push_digit`].
pub fn decode_integer(buf: &[u8]) -> Result<(i64, usize), WireError> {
    let mut acc = IntegerAccumulator::new();
    let mut pos = 0;

    if let Some(&first) = buf.first()
        && acc.push_sign(first)
    {
        pos += 1;
    }

    while let Some(&byte) = buf.get(pos) {
        if !acc.push_digit(byte)? {
            break;
        }
        pos += 1;
    }

    Ok((acc.finish()?, pos))
}

/// Append the decimal text of `value` to `out`.
pub fn encode_integer(value: i64, out: &mut Vec<u8>) {
    out.extend_from_slice(value.to_string().as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_digits() {
        assert_eq!(decode_integer(b"1000\r\n").unwrap(), (1000, 4));
    }

    #[test]
    fn decodes_signs() {
        assert_eq!(decode_integer(b"-1\r\n").unwrap(), (-1, 2));
        assert_eq!(decode_integer(b"+7").unwrap(), (7, 2));
    }

    #[test]
    fn sign_alone_is_not_a_number() {
        assert!(matches!(decode_integer(b"-\r\n"), Err(WireError::ExpectNumber)));
        assert!(matches!(decode_integer(b""), Err(WireError::ExpectNumber)));
        assert!(matches!(decode_integer(b"x1"), Err(WireError::ExpectNumber)));
    }

    #[test]
    fn extremes_fit() {
        let max = i64::MAX.to_string();
        let min = i64::MIN.to_string();
        assert_eq!(decode_integer(max.as_bytes()).unwrap().0, i64::MAX);
        assert_eq!(decode_integer(min.as_bytes()).unwrap().0, i64::MIN);
    }

    #[test]
    fn positive_two_pow_63_overflows() {
        // |i64::MIN| is accepted by push_digit but only valid with a '-'
        let result = decode_integer(b"9223372036854775808");
        assert!(matches!(result, Err(WireError::NumberOverflow { digits: 19 })));
    }

    #[test]
    fn long_digit_run_stops_early() {
        let digits = vec![b'9'; 64];
        let result = decode_integer(&digits);
        assert!(matches!(result, Err(WireError::NumberOverflow { digits: 19 })));
    }

    #[test]
    fn accumulator_survives_pauses() {
        // Simulates a digit run split across two refills
        let mut acc = IntegerAccumulator::new();
        assert!(acc.push_sign(b'-'));
        assert!(acc.push_digit(b'1').unwrap());
        assert!(acc.push_digit(b'2').unwrap());
        assert_eq!(acc.digits(), 2);
        assert!(acc.push_digit(b'3').unwrap());
        assert!(!acc.push_digit(b'\r').unwrap());
        assert_eq!(acc.finish().unwrap(), -123);
    }

    #[test]
    fn encode_writes_decimal_text() {
        let mut out = Vec::new();
        encode_integer(-42, &mut out);
        encode_integer(0, &mut out);
        assert_eq!(out, b"-420");
    }
}
