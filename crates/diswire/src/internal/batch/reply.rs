use bytes::BufMut;

use crate::internal::batch::codes::{PBSE_NONE, ServerCode, error_text};
use crate::internal::batch::request::{PBS_BATCH_PROT_TYPE, PBS_BATCH_PROT_VER, expect_header};
use crate::internal::codec::DisRead;
use crate::internal::codec::numeric::{decode_signed, decode_unsigned, encode_signed, encode_unsigned};
use crate::internal::codec::string::{decode_string, encode_str};
use crate::internal::common::error::DisError;

const CHOICE_NULL: u64 = 1;
const CHOICE_TEXT: u64 = 7;
const CHOICE_LOCATE: u64 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyChoice {
    Null,
    Text(String),
    Locate(String),
}

/// Server answer to a batch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReply {
    pub code: ServerCode,
    pub aux_code: i64,
    pub choice: ReplyChoice,
}

impl BatchReply {
    pub fn success() -> Self {
        BatchReply {
            code: PBSE_NONE,
            aux_code: 0,
            choice: ReplyChoice::Null,
        }
    }

    pub fn error(code: ServerCode, text: Option<&str>) -> Self {
        BatchReply {
            code,
            aux_code: 0,
            choice: match text {
                Some(text) => ReplyChoice::Text(text.to_string()),
                None => ReplyChoice::Null,
            },
        }
    }

    pub fn located(server: &str) -> Self {
        BatchReply {
            code: PBSE_NONE,
            aux_code: 0,
            choice: ReplyChoice::Locate(server.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == PBSE_NONE
    }

    /// Text sent by the server, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.choice {
            ReplyChoice::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Human readable diagnostic: the server's own text, or the canonical text of the code.
    pub fn message(&self) -> Option<String> {
        self.text()
            .map(|text| text.to_string())
            .or_else(|| error_text(self.code).map(|text| text.to_string()))
    }

    pub fn encode<B: BufMut>(&self, buffer: &mut B) {
        encode_unsigned(buffer, PBS_BATCH_PROT_TYPE);
        encode_unsigned(buffer, PBS_BATCH_PROT_VER);
        encode_signed(buffer, self.code);
        encode_signed(buffer, self.aux_code);
        match &self.choice {
            ReplyChoice::Null => encode_unsigned(buffer, CHOICE_NULL),
            ReplyChoice::Text(text) => {
                encode_unsigned(buffer, CHOICE_TEXT);
                encode_str(buffer, text);
            }
            ReplyChoice::Locate(server) => {
                encode_unsigned(buffer, CHOICE_LOCATE);
                encode_str(buffer, server);
            }
        }
    }

    pub fn decode<R: DisRead>(reader: &mut R, limit: usize) -> Result<Self, DisError> {
        expect_header(reader, "protocol type", PBS_BATCH_PROT_TYPE)?;
        expect_header(reader, "protocol version", PBS_BATCH_PROT_VER)?;
        let code = decode_signed(reader)?;
        let aux_code = decode_signed(reader)?;
        let choice = match decode_unsigned(reader)? {
            CHOICE_NULL => ReplyChoice::Null,
            CHOICE_TEXT => ReplyChoice::Text(decode_string(reader, limit)?),
            CHOICE_LOCATE => ReplyChoice::Locate(decode_string(reader, limit)?),
            choice => return Err(DisError::UnsupportedReplyChoice(choice)),
        };
        Ok(BatchReply {
            code,
            aux_code,
            choice,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::internal::batch::codes::PBSE_UNKJOBID;
    use crate::internal::codec::string::DEFAULT_MAX_STRING_LENGTH;

    fn encoded(reply: &BatchReply) -> Vec<u8> {
        let mut buffer = BytesMut::new();
        reply.encode(&mut buffer);
        buffer.to_vec()
    }

    fn decoded(mut input: &[u8]) -> Result<BatchReply, DisError> {
        BatchReply::decode(&mut input, DEFAULT_MAX_STRING_LENGTH)
    }

    #[test]
    fn test_encode_success() {
        assert_eq!(encoded(&BatchReply::success()), b"22+10+101");
    }

    #[test]
    fn test_encode_unknown_job() {
        assert_eq!(
            encoded(&BatchReply::error(PBSE_UNKJOBID, None)),
            b"22+515001+101"
        );
    }

    #[test]
    fn test_decode_text_reply() {
        let reply = decoded(b"22+515001+107+214Unknown Job Id").unwrap();
        assert_eq!(reply.code, PBSE_UNKJOBID);
        assert_eq!(reply.text(), Some("Unknown Job Id"));
        assert!(!reply.is_success());
    }

    #[test]
    fn test_decode_locate_reply() {
        let reply = decoded(&encoded(&BatchReply::located("serverB"))).unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.choice, ReplyChoice::Locate("serverB".to_string()));
    }

    #[test]
    fn test_decode_unsupported_choice() {
        assert_eq!(
            decoded(b"22+10+106"),
            Err(DisError::UnsupportedReplyChoice(6))
        );
    }

    #[test]
    fn test_message_falls_back_to_code_text() {
        let reply = BatchReply::error(PBSE_UNKJOBID, None);
        assert_eq!(reply.message().as_deref(), Some("Unknown Job Id"));
        let reply = BatchReply::error(PBSE_UNKJOBID, Some("job 42 has gone"));
        assert_eq!(reply.message().as_deref(), Some("job 42 has gone"));
        let reply = BatchReply::error(15999, Some(""));
        assert_eq!(reply.message(), None);
    }
}
