use bytes::BufMut;

use crate::internal::codec::DisRead;
use crate::internal::codec::numeric::{decode_unsigned, encode_unsigned};
use crate::internal::codec::string::{decode_string, encode_str};
use crate::internal::common::error::DisError;

pub const PBS_BATCH_PROT_TYPE: u64 = 2;
pub const PBS_BATCH_PROT_VER: u64 = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequestType {
    HoldJob = 7,
    LocateJob = 8,
    Manager = 9,
    MoveJob = 12,
    CheckpointJob = 27,
}

impl RequestType {
    fn from_code(code: u64) -> Option<Self> {
        let kind = match code {
            7 => Self::HoldJob,
            8 => Self::LocateJob,
            9 => Self::Manager,
            12 => Self::MoveJob,
            27 => Self::CheckpointJob,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttributeOp {
    Set = 0,
    Unset = 1,
    Incr = 2,
    Decr = 3,
}

impl AttributeOp {
    fn from_code(code: u64) -> Option<Self> {
        let op = match code {
            0 => Self::Set,
            1 => Self::Unset,
            2 => Self::Incr,
            3 => Self::Decr,
            _ => return None,
        };
        Some(op)
    }
}

/// One `name[.resource] op value` entry of an attribute list.
///
/// Only the wire shape is modelled here, values stay opaque strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub resource: Option<String>,
    pub value: String,
    pub op: AttributeOp,
}

impl Attribute {
    pub fn set(name: &str, value: &str) -> Self {
        Attribute {
            name: name.to_string(),
            resource: None,
            value: value.to_string(),
            op: AttributeOp::Set,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ManagerCommand {
    Create = 0,
    Delete = 1,
    Set = 2,
    Unset = 3,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ManagerObject {
    Server = 0,
    Queue = 1,
    Job = 2,
    Node = 3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    HoldJob {
        job_id: String,
        attributes: Vec<Attribute>,
    },
    LocateJob {
        job_id: String,
    },
    Manager {
        command: ManagerCommand,
        object: ManagerObject,
        name: String,
        attributes: Vec<Attribute>,
    },
    MoveJob {
        job_id: String,
        destination: String,
    },
    CheckpointJob {
        job_id: String,
    },
}

/// A complete batch request: header, type specific body and optional extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub user: String,
    pub body: RequestBody,
    pub extension: Option<String>,
}

impl BatchRequest {
    pub fn new(user: &str, body: RequestBody) -> Self {
        BatchRequest {
            user: user.to_string(),
            body,
            extension: None,
        }
    }

    pub fn request_type(&self) -> RequestType {
        match self.body {
            RequestBody::HoldJob { .. } => RequestType::HoldJob,
            RequestBody::LocateJob { .. } => RequestType::LocateJob,
            RequestBody::Manager { .. } => RequestType::Manager,
            RequestBody::MoveJob { .. } => RequestType::MoveJob,
            RequestBody::CheckpointJob { .. } => RequestType::CheckpointJob,
        }
    }

    pub fn encode<B: BufMut>(&self, buffer: &mut B) {
        encode_unsigned(buffer, PBS_BATCH_PROT_TYPE);
        encode_unsigned(buffer, PBS_BATCH_PROT_VER);
        encode_unsigned(buffer, self.request_type() as u64);
        encode_str(buffer, &self.user);

        match &self.body {
            RequestBody::HoldJob { job_id, attributes } => {
                encode_str(buffer, job_id);
                encode_attributes(buffer, attributes);
            }
            RequestBody::LocateJob { job_id } | RequestBody::CheckpointJob { job_id } => {
                encode_str(buffer, job_id);
            }
            RequestBody::Manager {
                command,
                object,
                name,
                attributes,
            } => {
                encode_unsigned(buffer, *command as u64);
                encode_unsigned(buffer, *object as u64);
                encode_str(buffer, name);
                encode_attributes(buffer, attributes);
            }
            RequestBody::MoveJob {
                job_id,
                destination,
            } => {
                encode_str(buffer, job_id);
                encode_str(buffer, destination);
            }
        }

        match &self.extension {
            Some(extension) => {
                encode_unsigned(buffer, 1);
                encode_str(buffer, extension);
            }
            None => encode_unsigned(buffer, 0),
        }
    }

    pub fn decode<R: DisRead>(reader: &mut R, limit: usize) -> Result<Self, DisError> {
        expect_header(reader, "protocol type", PBS_BATCH_PROT_TYPE)?;
        expect_header(reader, "protocol version", PBS_BATCH_PROT_VER)?;
        let code = decode_unsigned(reader)?;
        let kind = RequestType::from_code(code).ok_or(DisError::UnexpectedHeader {
            kind: "request type",
            value: code,
        })?;
        let user = decode_string(reader, limit)?;

        let body = match kind {
            RequestType::HoldJob => RequestBody::HoldJob {
                job_id: decode_string(reader, limit)?,
                attributes: decode_attributes(reader, limit)?,
            },
            RequestType::LocateJob => RequestBody::LocateJob {
                job_id: decode_string(reader, limit)?,
            },
            RequestType::CheckpointJob => RequestBody::CheckpointJob {
                job_id: decode_string(reader, limit)?,
            },
            RequestType::Manager => RequestBody::Manager {
                command: decode_manager_command(reader)?,
                object: decode_manager_object(reader)?,
                name: decode_string(reader, limit)?,
                attributes: decode_attributes(reader, limit)?,
            },
            RequestType::MoveJob => RequestBody::MoveJob {
                job_id: decode_string(reader, limit)?,
                destination: decode_string(reader, limit)?,
            },
        };

        let extension = match decode_unsigned(reader)? {
            0 => None,
            _ => Some(decode_string(reader, limit)?),
        };
        Ok(BatchRequest {
            user,
            body,
            extension,
        })
    }
}

pub(crate) fn expect_header<R: DisRead>(
    reader: &mut R,
    kind: &'static str,
    expected: u64,
) -> Result<(), DisError> {
    let value = decode_unsigned(reader)?;
    if value != expected {
        return Err(DisError::UnexpectedHeader { kind, value });
    }
    Ok(())
}

fn encode_attributes<B: BufMut>(buffer: &mut B, attributes: &[Attribute]) {
    encode_unsigned(buffer, attributes.len() as u64);
    for attribute in attributes {
        let resource_len = attribute.resource.as_ref().map(|r| r.len()).unwrap_or(0);
        let size = attribute.name.len() + resource_len + attribute.value.len() + 3;
        encode_unsigned(buffer, size as u64);
        encode_str(buffer, &attribute.name);
        match &attribute.resource {
            Some(resource) => {
                encode_unsigned(buffer, 1);
                encode_str(buffer, resource);
            }
            None => encode_unsigned(buffer, 0),
        }
        encode_str(buffer, &attribute.value);
        encode_unsigned(buffer, attribute.op as u64);
    }
}

fn decode_attributes<R: DisRead>(reader: &mut R, limit: usize) -> Result<Vec<Attribute>, DisError> {
    let count = decode_unsigned(reader)?;
    let mut attributes = Vec::new();
    for _ in 0..count {
        // The announced entry size is informational
        decode_unsigned(reader)?;
        let name = decode_string(reader, limit)?;
        let resource = match decode_unsigned(reader)? {
            0 => None,
            _ => Some(decode_string(reader, limit)?),
        };
        let value = decode_string(reader, limit)?;
        let code = decode_unsigned(reader)?;
        let op = AttributeOp::from_code(code).ok_or(DisError::UnexpectedHeader {
            kind: "attribute operator",
            value: code,
        })?;
        attributes.push(Attribute {
            name,
            resource,
            value,
            op,
        });
    }
    Ok(attributes)
}

fn decode_manager_command<R: DisRead>(reader: &mut R) -> Result<ManagerCommand, DisError> {
    let command = match decode_unsigned(reader)? {
        0 => ManagerCommand::Create,
        1 => ManagerCommand::Delete,
        2 => ManagerCommand::Set,
        3 => ManagerCommand::Unset,
        value => {
            return Err(DisError::UnexpectedHeader {
                kind: "manager command",
                value,
            });
        }
    };
    Ok(command)
}

fn decode_manager_object<R: DisRead>(reader: &mut R) -> Result<ManagerObject, DisError> {
    let object = match decode_unsigned(reader)? {
        0 => ManagerObject::Server,
        1 => ManagerObject::Queue,
        2 => ManagerObject::Job,
        3 => ManagerObject::Node,
        value => {
            return Err(DisError::UnexpectedHeader {
                kind: "manager object",
                value,
            });
        }
    };
    Ok(object)
}
