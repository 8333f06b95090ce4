use thiserror::Error;

/// Failures of the DIS codec.
///
/// `Overflow` carries the saturated value the decoder settled on, so a caller
/// can still report something meaningful instead of a wrapped number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DisError {
    #[error("numeral starts with a leading zero")]
    LeadingZero,
    #[error("non-digit character in numeral")]
    NonDigit,
    #[error("negative sign where an unsigned value was expected")]
    BadSign,
    #[error("value overflows the native integer range (saturated to {saturated})")]
    Overflow { saturated: u64 },
    #[error("signed value overflows the native integer range (saturated to {saturated})")]
    SignedOverflow { saturated: i64 },
    #[error("floating point value out of range (saturated to {saturated})")]
    FloatOverflow { saturated: f64 },
    #[error("numeral nests digit counts deeper than {0} levels")]
    CountTooDeep(usize),
    #[error("stream ended in the middle of a numeral")]
    UnexpectedEndOfData,
    #[error("peer closed the stream")]
    EndOfData,
    #[error("stream reported a terminal error: {0}")]
    EndOfFile(String),
    #[error("string of {length} bytes exceeds the limit of {limit} bytes")]
    StringTooLong { length: u64, limit: usize },
    #[error("unsupported reply choice {0}")]
    UnsupportedReplyChoice(u64),
    #[error("unexpected protocol {kind} {value}")]
    UnexpectedHeader { kind: &'static str, value: u64 },
}

impl DisError {
    /// Whether the error means the value did not fit, as opposed to a corrupted stream.
    pub fn is_overflow(&self) -> bool {
        matches!(
            self,
            DisError::Overflow { .. }
                | DisError::SignedOverflow { .. }
                | DisError::FloatOverflow { .. }
        )
    }
}

/// Failures of the bounded transport and the channel built on it.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not resolve server '{server}': {source}")]
    Resolve {
        server: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not connect to server '{server}': {source}")]
    Connect {
        server: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{operation} did not complete within {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: std::time::Duration,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Error of a single request/reply exchange on a channel.
#[derive(Debug, Error)]
pub enum WireError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("protocol error: {0}")]
    Protocol(#[from] DisError),
}

impl WireError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WireError::Transport(TransportError::Timeout { .. }))
    }
}

impl From<std::io::Error> for WireError {
    fn from(error: std::io::Error) -> Self {
        WireError::Transport(error.into())
    }
}
