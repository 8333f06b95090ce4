pub mod internal;

pub mod codec {
    pub use crate::internal::codec::DisRead;
    pub use crate::internal::codec::float::{decode_f64, encode_f64};
    pub use crate::internal::codec::numeric::{
        DecodedInteger, MAX_COUNT_DEPTH, decode_integer, decode_signed, decode_unsigned,
        encode_signed, encode_unsigned,
    };
    pub use crate::internal::codec::precision::PrecisionTable;
    pub use crate::internal::codec::string::{
        DEFAULT_MAX_STRING_LENGTH, decode_bytes, decode_string, encode_bytes, encode_str,
    };
}

pub mod transport {
    pub use crate::internal::transport::channel::{
        Channel, ChannelPolicy, DEFAULT_CONNECT_TIMEOUT, ReadMode, split_server_address,
    };
    pub use crate::internal::transport::frame::{
        DEFAULT_IO_TIMEOUT, Descriptor, Interest, read_blocking, read_bounded, write_bounded,
    };
}

pub mod batch {
    pub use crate::internal::batch::codes::*;
    pub use crate::internal::batch::reply::{BatchReply, ReplyChoice};
    pub use crate::internal::batch::request::{
        Attribute, AttributeOp, BatchRequest, ManagerCommand, ManagerObject, PBS_BATCH_PROT_TYPE,
        PBS_BATCH_PROT_VER, RequestBody, RequestType,
    };
}

pub use crate::internal::common::error::{DisError, TransportError, WireError};

/// Default port of the batch server service.
pub const PBS_BATCH_SERVICE_PORT: u16 = 15001;

pub type Error = WireError;
pub type Result<T> = std::result::Result<T, Error>;
