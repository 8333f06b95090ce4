use bytes::BufMut;

use crate::internal::codec::DisRead;
use crate::internal::codec::numeric::{decode_unsigned, encode_unsigned};
use crate::internal::common::error::DisError;

/// Default upper bound of a single decoded string.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 1024 * 1024;

/// Encodes a counted string: its length as a numeral followed by the raw bytes.
pub fn encode_bytes<B: BufMut>(buffer: &mut B, data: &[u8]) {
    encode_unsigned(buffer, data.len() as u64);
    buffer.put_slice(data);
}

pub fn encode_str<B: BufMut>(buffer: &mut B, data: &str) {
    encode_bytes(buffer, data.as_bytes());
}

/// Decodes a counted string.
///
/// The announced length is checked against `limit` before anything is allocated.
pub fn decode_bytes<R: DisRead>(reader: &mut R, limit: usize) -> Result<Vec<u8>, DisError> {
    let length = decode_unsigned(reader)?;
    if length > limit as u64 {
        return Err(DisError::StringTooLong { length, limit });
    }
    let mut data = vec![0; length as usize];
    if reader.read_up_to(&mut data)? != data.len() {
        return Err(DisError::UnexpectedEndOfData);
    }
    Ok(data)
}

/// Decodes a counted string as text, replacing invalid UTF-8 sequences.
pub fn decode_string<R: DisRead>(reader: &mut R, limit: usize) -> Result<String, DisError> {
    let data = decode_bytes(reader, limit)?;
    Ok(match String::from_utf8(data) {
        Ok(text) => text,
        Err(error) => String::from_utf8_lossy(error.as_bytes()).into_owned(),
    })
}
