//! Floating point values as a pair of numerals: a signed decimal mantissa and a signed
//! decimal exponent. A peer with a different floating point format only has to agree on
//! decimal digits. The shared precision table bounds the decimal range; the value itself is
//! rounded once, from its full decimal form.

use bytes::BufMut;

use crate::internal::codec::DisRead;
use crate::internal::codec::numeric::{
    decode_integer, decode_signed, encode_signed, encode_unsigned, write_signed_magnitude,
};
use crate::internal::codec::precision::PrecisionTable;
use crate::internal::common::error::DisError;

fn saturate(negative: bool) -> DisError {
    DisError::FloatOverflow {
        saturated: if negative { f64::MIN } else { f64::MAX },
    }
}

/// Splits a finite, non-zero magnitude into decimal mantissa digits and exponent, using the
/// shortest representation that reads back to the same value.
fn decompose(magnitude: f64) -> (u64, i64) {
    let text = format!("{magnitude:e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let (integral, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = integral
        .bytes()
        .chain(fraction.bytes())
        .fold(0u64, |acc, digit| acc * 10 + u64::from(digit - b'0'));
    let exponent = exponent.parse::<i64>().unwrap_or(0) - fraction.len() as i64;
    (digits, exponent)
}

/// Encodes a finite `f64`. Infinite values and NaN have no decimal form and are rejected.
pub fn encode_f64<B: BufMut>(buffer: &mut B, value: f64) -> Result<(), DisError> {
    if !value.is_finite() {
        return Err(saturate(value.is_sign_negative()));
    }
    if value == 0.0 {
        encode_unsigned(buffer, 0);
        encode_signed(buffer, 0);
        return Ok(());
    }
    let (mantissa, exponent) = decompose(value.abs());
    if value < 0.0 {
        write_signed_magnitude(buffer, true, mantissa);
    } else {
        encode_unsigned(buffer, mantissa);
    }
    encode_signed(buffer, exponent);
    Ok(())
}

/// Decodes an `f64`.
///
/// Values beyond the finite range fail with [`DisError::FloatOverflow`] carrying
/// `f64::MAX` or `f64::MIN`; values below the smallest subnormal decode as zero.
pub fn decode_f64<R: DisRead>(reader: &mut R) -> Result<f64, DisError> {
    let mantissa = match decode_integer(reader) {
        Ok(mantissa) => mantissa,
        Err(DisError::Overflow { .. }) => return Err(saturate(false)),
        Err(error) => return Err(error),
    };
    let exponent = match decode_signed(reader) {
        Ok(exponent) => exponent,
        Err(DisError::SignedOverflow { saturated }) => saturated,
        Err(error) => return Err(error),
    };
    if mantissa.magnitude == 0 {
        return Ok(0.0);
    }

    // Decimal order of the leading mantissa digit
    let leading = i64::from(mantissa.magnitude.ilog10());
    let order = exponent.saturating_add(leading);
    let max_power = i64::from(PrecisionTable::get().max_power());
    if order > max_power {
        return Err(saturate(mantissa.negative));
    }
    if order < -2 * max_power {
        return Ok(if mantissa.negative { -0.0 } else { 0.0 });
    }

    let sign = if mantissa.negative { "-" } else { "" };
    let value = format!("{sign}{}e{exponent}", mantissa.magnitude)
        .parse::<f64>()
        .map_err(|_| DisError::NonDigit)?;
    if value.is_infinite() {
        return Err(saturate(mantissa.negative));
    }
    Ok(value)
}
