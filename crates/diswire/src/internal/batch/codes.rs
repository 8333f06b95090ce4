//! Error codes reported by batch servers in the `code` field of a reply.

pub type ServerCode = i64;

pub const PBSE_NONE: ServerCode = 0;
pub const PBSE_UNKJOBID: ServerCode = 15001;
pub const PBSE_NOATTR: ServerCode = 15002;
pub const PBSE_ATTRRO: ServerCode = 15003;
pub const PBSE_IVALREQ: ServerCode = 15004;
pub const PBSE_UNKREQ: ServerCode = 15005;
pub const PBSE_PERM: ServerCode = 15007;
pub const PBSE_BADHOST: ServerCode = 15008;
pub const PBSE_SYSTEM: ServerCode = 15010;
pub const PBSE_INTERNAL: ServerCode = 15011;
pub const PBSE_BADATVAL: ServerCode = 15014;
pub const PBSE_BADSTATE: ServerCode = 15016;
pub const PBSE_UNKQUE: ServerCode = 15018;
pub const PBSE_QUNOENB: ServerCode = 15021;
pub const PBSE_QACESS: ServerCode = 15022;
pub const PBSE_HOPCOUNT: ServerCode = 15024;
pub const PBSE_PROTOCOL: ServerCode = 15031;

/// Canonical text of a server code, used when a reply carries no message of its own.
pub fn error_text(code: ServerCode) -> Option<&'static str> {
    let text = match code {
        PBSE_UNKJOBID => "Unknown Job Id",
        PBSE_NOATTR => "Undefined attribute",
        PBSE_ATTRRO => "Cannot set attribute, read only or insufficient permission",
        PBSE_IVALREQ => "Invalid request",
        PBSE_UNKREQ => "Unknown request",
        PBSE_PERM => "Unauthorized Request",
        PBSE_BADHOST => "Access from host not allowed, or unknown host",
        PBSE_SYSTEM => "System error",
        PBSE_INTERNAL => "PBS server internal error",
        PBSE_BADATVAL => "Illegal attribute or resource value",
        PBSE_BADSTATE => "Request invalid for state of job",
        PBSE_UNKQUE => "Unknown queue",
        PBSE_QUNOENB => "Queue is not enabled",
        PBSE_QACESS => "No access permission for queue",
        PBSE_HOPCOUNT => "Job routing over too many hops",
        PBSE_PROTOCOL => "Protocol error",
        _ => return None,
    };
    Some(text)
}
