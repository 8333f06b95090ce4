use std::fmt::{Display, Formatter};

use nom::bytes::complete::take_while;
use nom::character::complete::{char, digit1};
use nom::combinator::{map, opt, recognize};
use nom::sequence::{delimited, pair, preceded, tuple};
use thiserror::Error;

use crate::common::parser::{NomResult, consume_all, p_queue_name, p_server_name};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegally formed {kind}: '{input}'")]
pub struct MalformedInput {
    pub kind: &'static str,
    pub input: String,
}

/// A job named on the command line: `<seq>[.<home-server>][@<route-server>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobIdentifier {
    sequence: String,
    home_server: Option<String>,
    route_server: Option<String>,
}

impl JobIdentifier {
    pub fn parse(input: &str) -> Result<Self, MalformedInput> {
        consume_all(p_job_id, input.trim()).map_err(|error| {
            log::debug!("Cannot parse job id '{input}': {error:?}");
            MalformedInput {
                kind: "job identifier",
                input: input.to_string(),
            }
        })
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn home_server(&self) -> Option<&str> {
        self.home_server.as_deref()
    }

    pub fn route_server(&self) -> Option<&str> {
        self.route_server.as_deref()
    }

    /// Full id as known to the servers, `<seq>.<server>`. A `:port` suffix only addresses
    /// the server and is not part of the id.
    pub fn qualified(&self, default_server: &str) -> String {
        let server = self.home_server.as_deref().unwrap_or(default_server);
        let host = server.split_once(':').map_or(server, |(host, _)| host);
        format!("{}.{host}", self.sequence)
    }

    /// Server the first request goes to.
    pub fn target_server<'a>(&'a self, default_server: &'a str) -> &'a str {
        self.route_server
            .as_deref()
            .or(self.home_server.as_deref())
            .unwrap_or(default_server)
    }
}

impl Display for JobIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sequence)?;
        if let Some(home) = &self.home_server {
            write!(f, ".{home}")?;
        }
        if let Some(route) = &self.route_server {
            write!(f, "@{route}")?;
        }
        Ok(())
    }
}

/// Queue and/or server a job is moved to or a queue is addressed by:
/// `queue`, `queue@server` or `@server`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    queue: Option<String>,
    server: Option<String>,
}

impl Destination {
    pub fn parse(input: &str) -> Result<Self, MalformedInput> {
        let malformed = || MalformedInput {
            kind: "destination",
            input: input.to_string(),
        };
        let destination = consume_all(p_destination, input.trim()).map_err(|error| {
            log::debug!("Cannot parse destination '{input}': {error:?}");
            malformed()
        })?;
        if destination.queue.is_none() && destination.server.is_none() {
            return Err(malformed());
        }
        Ok(destination)
    }

    pub fn queue(&self) -> Option<&str> {
        self.queue.as_deref()
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(queue) = &self.queue {
            f.write_str(queue)?;
        }
        if let Some(server) = &self.server {
            write!(f, "@{server}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Destination {
    type Err = MalformedInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Destination::parse(s)
    }
}

/// `123`, `123[]` or `123[4]`.
fn p_sequence(input: &str) -> NomResult<&str> {
    recognize(pair(
        digit1,
        opt(delimited(
            char('['),
            take_while(|c: char| c.is_ascii_digit()),
            char(']'),
        )),
    ))(input)
}

fn p_job_id(input: &str) -> NomResult<JobIdentifier> {
    map(
        tuple((
            p_sequence,
            opt(preceded(char('.'), p_server_name)),
            opt(preceded(char('@'), p_server_name)),
        )),
        |(sequence, home, route)| JobIdentifier {
            sequence: sequence.to_string(),
            home_server: home.map(|s| s.to_string()),
            route_server: route.map(|s| s.to_string()),
        },
    )(input)
}

fn p_destination(input: &str) -> NomResult<Destination> {
    map(
        pair(opt(p_queue_name), opt(preceded(char('@'), p_server_name))),
        |(queue, server)| Destination {
            queue: queue.map(|s| s.to_string()),
            server: server.map(|s| s.to_string()),
        },
    )(input)
}
