pub mod float;
pub mod numeric;
pub mod precision;
pub mod string;

use crate::internal::common::error::DisError;

/// Byte source the decoders pull from.
///
/// `Ok(None)` from [`DisRead::read_byte`] means the peer closed the stream gracefully.
/// Terminal stream failures are reported as [`DisError::EndOfFile`].
pub trait DisRead {
    fn read_byte(&mut self) -> Result<Option<u8>, DisError>;

    /// Reads until `buffer` is full or the stream ends, returning the number of bytes read.
    fn read_up_to(&mut self, buffer: &mut [u8]) -> Result<usize, DisError>;
}

impl DisRead for &[u8] {
    fn read_byte(&mut self) -> Result<Option<u8>, DisError> {
        match self.split_first() {
            Some((byte, rest)) => {
                *self = rest;
                Ok(Some(*byte))
            }
            None => Ok(None),
        }
    }

    fn read_up_to(&mut self, buffer: &mut [u8]) -> Result<usize, DisError> {
        let count = buffer.len().min(self.len());
        let (head, rest) = self.split_at(count);
        buffer[..count].copy_from_slice(head);
        *self = rest;
        Ok(count)
    }
}

impl<R: DisRead + ?Sized> DisRead for &mut R {
    fn read_byte(&mut self) -> Result<Option<u8>, DisError> {
        (**self).read_byte()
    }

    fn read_up_to(&mut self, buffer: &mut [u8]) -> Result<usize, DisError> {
        (**self).read_up_to(buffer)
    }
}
