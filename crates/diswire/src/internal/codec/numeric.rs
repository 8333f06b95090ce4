//! Host-independent integers ("Data Is Strings").
//!
//! An integer travels as ASCII text that carries its own length:
//!
//! ```text
//! 7                      bare digit, unsigned values 1-9 only
//! +3123                  sign, digit count (3), digits -> 123
//! -15                    sign, digit count (1), digits -> -5
//! +10                    zero
//! ++22012345678901234567890
//!                        the digit count (20) is itself a numeral (+220)
//! ```
//!
//! The first character of a numeral may never be `'0'`, and digit strings are never zero
//! padded. Digit counts are checked against the precision table before the payload is read,
//! so a corrupted peer cannot make the decoder read (or accumulate) more than the widest
//! native integer.

use bytes::BufMut;

use crate::internal::codec::DisRead;
use crate::internal::codec::precision::PrecisionTable;
use crate::internal::common::error::DisError;

/// Maximum nesting of digit-count numerals.
///
/// Counts of native integers need at most two levels (`++220...`), anything deeper is
/// rejected before it can recurse further.
pub const MAX_COUNT_DEPTH: usize = 4;

const MAX_SCRATCH_DIGITS: usize = 20;

/// Sign and magnitude of a decoded numeral.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DecodedInteger {
    pub negative: bool,
    pub magnitude: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Magnitude {
    Value(u64),
    Saturated,
}

/// Decodes an unsigned integer.
///
/// A value that does not fit into `u64` fails with [`DisError::Overflow`] carrying
/// `u64::MAX`. A negative numeral fails with [`DisError::BadSign`].
pub fn decode_unsigned<R: DisRead>(reader: &mut R) -> Result<u64, DisError> {
    let (negative, magnitude) = read_numeral(reader, 0)?;
    match (negative, magnitude) {
        (true, Magnitude::Value(0)) => Ok(0),
        (true, _) => Err(DisError::BadSign),
        (false, Magnitude::Value(value)) => Ok(value),
        (false, Magnitude::Saturated) => Err(DisError::Overflow {
            saturated: u64::MAX,
        }),
    }
}

/// Decodes a signed integer, saturating to `i64::MAX`/`i64::MIN` on overflow.
pub fn decode_signed<R: DisRead>(reader: &mut R) -> Result<i64, DisError> {
    let (negative, magnitude) = read_numeral(reader, 0)?;
    let saturated = if negative { i64::MIN } else { i64::MAX };
    match magnitude {
        Magnitude::Value(value) if negative => {
            if value <= i64::MIN.unsigned_abs() {
                Ok((value as i64).wrapping_neg())
            } else {
                Err(DisError::SignedOverflow { saturated })
            }
        }
        Magnitude::Value(value) => {
            i64::try_from(value).map_err(|_| DisError::SignedOverflow { saturated })
        }
        Magnitude::Saturated => Err(DisError::SignedOverflow { saturated }),
    }
}

/// Decodes a numeral keeping its sign and magnitude apart.
pub fn decode_integer<R: DisRead>(reader: &mut R) -> Result<DecodedInteger, DisError> {
    match read_numeral(reader, 0)? {
        (negative, Magnitude::Value(magnitude)) => Ok(DecodedInteger {
            negative,
            magnitude,
        }),
        (_, Magnitude::Saturated) => Err(DisError::Overflow {
            saturated: u64::MAX,
        }),
    }
}

fn read_numeral<R: DisRead>(reader: &mut R, depth: usize) -> Result<(bool, Magnitude), DisError> {
    let first = reader.read_byte()?.ok_or(DisError::EndOfData)?;
    match first {
        b'+' | b'-' => {
            if depth >= MAX_COUNT_DEPTH {
                return Err(DisError::CountTooDeep(MAX_COUNT_DEPTH));
            }
            let count = read_count(reader, depth + 1)?;
            let magnitude = read_digits(reader, count)?;
            Ok((first == b'-', magnitude))
        }
        b'0' => Err(DisError::LeadingZero),
        b'1'..=b'9' => Ok((false, Magnitude::Value(u64::from(first - b'0')))),
        _ => Err(DisError::NonDigit),
    }
}

/// Reads the digit count that follows a sign.
fn read_count<R: DisRead>(reader: &mut R, depth: usize) -> Result<u64, DisError> {
    match read_numeral(reader, depth) {
        Ok((true, _)) => Err(DisError::BadSign),
        Ok((false, Magnitude::Value(0))) => Err(DisError::NonDigit),
        Ok((false, Magnitude::Value(count))) => Ok(count),
        Ok((false, Magnitude::Saturated)) => Ok(u64::MAX),
        // A count cut short is a truncated numeral, not a cleanly closed stream
        Err(DisError::EndOfData) => Err(DisError::UnexpectedEndOfData),
        Err(error) => Err(error),
    }
}

fn read_digits<R: DisRead>(reader: &mut R, count: u64) -> Result<Magnitude, DisError> {
    let table = PrecisionTable::get();
    let max_digits = table.max_digits();
    if count > max_digits as u64 {
        return Ok(Magnitude::Saturated);
    }
    let count = count as usize;

    let mut scratch = [0u8; MAX_SCRATCH_DIGITS];
    let digits = &mut scratch[..count];
    if reader.read_up_to(digits)? != count {
        return Err(DisError::UnexpectedEndOfData);
    }
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(DisError::NonDigit);
    }
    if count > 1 && digits[0] == b'0' {
        return Err(DisError::LeadingZero);
    }
    // Both strings have the same length here, so byte order is numeric order
    if count == max_digits && &digits[..] > table.max_value_digits() {
        return Ok(Magnitude::Saturated);
    }

    let value = digits
        .iter()
        .fold(0u64, |acc, digit| acc * 10 + u64::from(digit - b'0'));
    Ok(Magnitude::Value(value))
}

/// Encodes an unsigned integer.
pub fn encode_unsigned<B: BufMut>(buffer: &mut B, value: u64) {
    if (1..=9).contains(&value) {
        buffer.put_u8(b'0' + value as u8);
    } else {
        write_signed_magnitude(buffer, false, value);
    }
}

/// Encodes a signed integer.
pub fn encode_signed<B: BufMut>(buffer: &mut B, value: i64) {
    if (1..=9).contains(&value) {
        buffer.put_u8(b'0' + value as u8);
    } else {
        write_signed_magnitude(buffer, value < 0, value.unsigned_abs());
    }
}

pub(crate) fn write_signed_magnitude<B: BufMut>(buffer: &mut B, negative: bool, magnitude: u64) {
    let digits = magnitude.to_string();
    buffer.put_u8(if negative { b'-' } else { b'+' });
    encode_unsigned(buffer, digits.len() as u64);
    buffer.put_slice(digits.as_bytes());
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    fn encoded_unsigned(value: u64) -> Vec<u8> {
        let mut buffer = BytesMut::new();
        encode_unsigned(&mut buffer, value);
        buffer.to_vec()
    }

    fn encoded_signed(value: i64) -> Vec<u8> {
        let mut buffer = BytesMut::new();
        encode_signed(&mut buffer, value);
        buffer.to_vec()
    }

    fn unsigned(mut input: &[u8]) -> Result<u64, DisError> {
        decode_unsigned(&mut input)
    }

    fn signed(mut input: &[u8]) -> Result<i64, DisError> {
        decode_signed(&mut input)
    }

    #[test]
    fn test_decode_sign_count_digits() {
        let mut input: &[u8] = b"+3123";
        assert_eq!(
            decode_integer(&mut input).unwrap(),
            DecodedInteger {
                negative: false,
                magnitude: 123
            }
        );
        assert!(input.is_empty());
    }

    #[test]
    fn test_decode_single_digit() {
        assert_eq!(unsigned(b"7"), Ok(7));
    }

    #[test]
    fn test_decode_leaves_rest_of_stream() {
        let mut input: &[u8] = b"7+212rest";
        assert_eq!(decode_unsigned(&mut input), Ok(7));
        assert_eq!(decode_unsigned(&mut input), Ok(12));
        assert_eq!(input, b"rest");
    }

    #[test]
    fn test_decode_zero() {
        assert_eq!(unsigned(b"+10"), Ok(0));
        assert_eq!(signed(b"-10"), Ok(0));
    }

    #[test]
    fn test_decode_leading_zero() {
        assert_eq!(unsigned(b"0"), Err(DisError::LeadingZero));
        assert_eq!(unsigned(b"0123"), Err(DisError::LeadingZero));
        assert_eq!(unsigned(b"+3012"), Err(DisError::LeadingZero));
        assert_eq!(unsigned(b"+03123"), Err(DisError::LeadingZero));
    }

    #[test]
    fn test_decode_non_digit() {
        assert_eq!(unsigned(b"x"), Err(DisError::NonDigit));
        assert_eq!(unsigned(b" 1"), Err(DisError::NonDigit));
        assert_eq!(unsigned(b"+31a3"), Err(DisError::NonDigit));
        assert_eq!(unsigned(b"+x"), Err(DisError::NonDigit));
    }

    #[test]
    fn test_decode_empty_stream() {
        assert_eq!(unsigned(b""), Err(DisError::EndOfData));
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(unsigned(b"+312"), Err(DisError::UnexpectedEndOfData));
        assert_eq!(unsigned(b"+"), Err(DisError::UnexpectedEndOfData));
        assert_eq!(unsigned(b"++2"), Err(DisError::UnexpectedEndOfData));
    }

    #[test]
    fn test_decode_negative_as_unsigned() {
        assert_eq!(unsigned(b"-15"), Err(DisError::BadSign));
    }

    #[test]
    fn test_decode_negative_count() {
        assert_eq!(unsigned(b"+-15"), Err(DisError::BadSign));
    }

    #[test]
    fn test_decode_zero_count() {
        assert_eq!(unsigned(b"++10"), Err(DisError::NonDigit));
    }

    #[test]
    fn test_decode_too_deep() {
        assert_eq!(unsigned(b"+++++11"), Err(DisError::CountTooDeep(MAX_COUNT_DEPTH)));
    }

    #[test]
    fn test_decode_max_unsigned() {
        assert_eq!(unsigned(b"++22018446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn test_decode_overflow_same_width() {
        assert_eq!(
            unsigned(b"++22018446744073709551616"),
            Err(DisError::Overflow {
                saturated: u64::MAX
            })
        );
        assert_eq!(
            unsigned(b"++22099999999999999999999"),
            Err(DisError::Overflow {
                saturated: u64::MAX
            })
        );
    }

    #[test]
    fn test_decode_overflow_count_checked_before_payload() {
        // No payload follows, the count alone decides
        assert_eq!(
            unsigned(b"++221"),
            Err(DisError::Overflow {
                saturated: u64::MAX
            })
        );
        assert_eq!(
            unsigned(b"+++3100"),
            Err(DisError::Overflow {
                saturated: u64::MAX
            })
        );
    }

    #[test]
    fn test_decode_signed_saturation() {
        assert_eq!(signed(b"-+218999999999999999999"), Ok(-999_999_999_999_999_999));
        assert_eq!(signed(b"++2199223372036854775807"), Ok(i64::MAX));
        assert_eq!(signed(b"-+2199223372036854775808"), Ok(i64::MIN));
        assert_eq!(
            signed(b"++2199223372036854775808"),
            Err(DisError::SignedOverflow {
                saturated: i64::MAX
            })
        );
        assert_eq!(
            signed(b"-+2199223372036854775809"),
            Err(DisError::SignedOverflow {
                saturated: i64::MIN
            })
        );
        assert_eq!(
            signed(b"-+221"),
            Err(DisError::SignedOverflow {
                saturated: i64::MIN
            })
        );
    }

    #[test]
    fn test_encode_unsigned() {
        assert_eq!(encoded_unsigned(0), b"+10");
        assert_eq!(encoded_unsigned(7), b"7");
        assert_eq!(encoded_unsigned(10), b"+210");
        assert_eq!(encoded_unsigned(123), b"+3123");
        assert_eq!(encoded_unsigned(15001), b"+515001");
        assert_eq!(encoded_unsigned(1234567890), b"++2101234567890");
        assert_eq!(encoded_unsigned(u64::MAX), b"++22018446744073709551615");
    }

    #[test]
    fn test_encode_signed() {
        assert_eq!(encoded_signed(0), b"+10");
        assert_eq!(encoded_signed(3), b"3");
        assert_eq!(encoded_signed(-3), b"-13");
        assert_eq!(encoded_signed(-15001), b"-515001");
        assert_eq!(encoded_signed(i64::MIN), b"-+2199223372036854775808");
    }

    #[test]
    fn test_unsigned_roundtrip_boundaries() {
        let values = [
            0,
            1,
            9,
            10,
            99,
            100,
            999_999_999,
            1_000_000_000,
            u32::MAX as u64,
            u64::MAX / 10,
            u64::MAX - 1,
            u64::MAX,
        ];
        for value in values {
            assert_eq!(unsigned(&encoded_unsigned(value)), Ok(value), "{value}");
        }
    }

    #[test]
    fn test_unsigned_roundtrip_every_width() {
        let mut value = 1u64;
        while let Some(next) = value.checked_mul(10) {
            for candidate in [value, value + 1, next - 1] {
                assert_eq!(unsigned(&encoded_unsigned(candidate)), Ok(candidate));
            }
            value = next;
        }
    }

    #[test]
    fn test_signed_roundtrip_boundaries() {
        for value in [i64::MIN, i64::MIN + 1, -10, -9, -1, 0, 1, 9, 10, i64::MAX] {
            assert_eq!(signed(&encoded_signed(value)), Ok(value), "{value}");
        }
    }
}
