//! Dispatch of one request to the server owning a job.
//!
//! Every job argument runs through a small state machine:
//!
//! ```text
//! Connect -> Dispatch -> Done
//!               |  \---> Failed
//!               v
//!             Locate -> Connect -> Dispatch -> Done | Failed
//! ```
//!
//! `Locate` is only entered from `Dispatch`, for an "unknown job" reply of a job that has not
//! been relocated yet. A job is therefore redirected at most once per command invocation.

use thiserror::Error;

use diswire::batch::{BatchReply, BatchRequest, PBSE_UNKJOBID, ServerCode, error_text};
use diswire::{DisError, TransportError, WireError};

use crate::client::connector::{Connector, Session};
use crate::client::locate::JobLocator;
use crate::common::jobid::{JobIdentifier, MalformedInput};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    MalformedInput(#[from] MalformedInput),
    /// The server could not be reached, or the connection broke down.
    #[error("cannot communicate with server {server}: {source}")]
    ConnectFailure {
        server: String,
        #[source]
        source: TransportError,
    },
    #[error("server {server} did not respond in time: {source}")]
    TransportTimeout {
        server: String,
        #[source]
        source: TransportError,
    },
    #[error("protocol error talking to server {server}: {source}")]
    ProtocolViolation {
        server: String,
        #[source]
        source: DisError,
    },
    #[error("value out of range in reply of server {server}: {source}")]
    Overflow {
        server: String,
        #[source]
        source: DisError,
    },
    #[error("{} (server {server})", .message.as_deref().unwrap_or("Unknown Job Id"))]
    UnknownJob {
        job: String,
        server: String,
        message: Option<String>,
    },
    #[error("{} (server {server}, code {code})", .message.as_deref().unwrap_or("Request rejected"))]
    ServerRejected {
        server: String,
        code: ServerCode,
        message: Option<String>,
    },
}

impl DispatchError {
    fn from_transport(server: &str, error: TransportError) -> Self {
        let server = server.to_string();
        match error {
            TransportError::Timeout { .. } => DispatchError::TransportTimeout {
                server,
                source: error,
            },
            _ => DispatchError::ConnectFailure {
                server,
                source: error,
            },
        }
    }

    fn from_wire(server: &str, error: WireError) -> Self {
        match error {
            WireError::Transport(error) => Self::from_transport(server, error),
            WireError::Protocol(error) if error.is_overflow() => DispatchError::Overflow {
                server: server.to_string(),
                source: error,
            },
            WireError::Protocol(error) => DispatchError::ProtocolViolation {
                server: server.to_string(),
                source: error,
            },
        }
    }

    /// Process exit code reported when this is the last failure of a command.
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::MalformedInput(_) => 1,
            DispatchError::ConnectFailure { .. } => 3,
            DispatchError::TransportTimeout { .. } => 4,
            DispatchError::ProtocolViolation { .. } | DispatchError::Overflow { .. } => 5,
            DispatchError::UnknownJob { .. } => server_exit_code(PBSE_UNKJOBID),
            DispatchError::ServerRejected { code, .. } => server_exit_code(*code),
        }
    }
}

fn server_exit_code(code: ServerCode) -> i32 {
    match code.rem_euclid(256) as i32 {
        0 => 1,
        code => code,
    }
}

/// Progress of one job argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchAttempt {
    /// `None` for requests that do not address a job (e.g. queue management).
    pub job: Option<JobIdentifier>,
    /// Qualified job id, or the name of the addressed object.
    pub subject: String,
    pub target_server: String,
    pub located: bool,
}

/// Successful outcome of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub subject: String,
    pub server: String,
    pub located: bool,
    pub reply: BatchReply,
}

enum DispatchState<S> {
    Connect,
    Dispatch(S),
    /// Carries the "unknown job" failure reported if the job cannot be located.
    Locate(DispatchError),
    Done(BatchReply),
    Failed(DispatchError),
}

/// Sends requests to batch servers, following jobs that moved to another server.
pub struct ServerDispatcher<C, L> {
    connector: C,
    locator: L,
    default_server: String,
}

impl<C: Connector, L: JobLocator> ServerDispatcher<C, L> {
    pub fn new(connector: C, locator: L, default_server: &str) -> Self {
        ServerDispatcher {
            connector,
            locator,
            default_server: default_server.to_string(),
        }
    }

    pub fn default_server(&self) -> &str {
        &self.default_server
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Runs the request built by `build` against the server owning `job_id`.
    ///
    /// `build` receives the qualified job id and is called once per connection.
    pub fn dispatch_job<F>(&mut self, job_id: &str, build: F) -> Result<Dispatched, DispatchError>
    where
        F: Fn(&str) -> BatchRequest,
    {
        let job = JobIdentifier::parse(job_id)?;
        let attempt = DispatchAttempt {
            subject: job.qualified(&self.default_server),
            target_server: job.target_server(&self.default_server).to_string(),
            job: Some(job),
            located: false,
        };
        self.run(attempt, |attempt| build(&attempt.subject))
    }

    /// Sends `request` to `server` (or the default server) without any job location.
    pub fn dispatch_request(
        &mut self,
        subject: &str,
        server: Option<&str>,
        request: &BatchRequest,
    ) -> Result<Dispatched, DispatchError> {
        let attempt = DispatchAttempt {
            job: None,
            subject: subject.to_string(),
            target_server: server.unwrap_or(&self.default_server).to_string(),
            located: false,
        };
        self.run(attempt, |_| request.clone())
    }

    fn run<F>(&mut self, mut attempt: DispatchAttempt, build: F) -> Result<Dispatched, DispatchError>
    where
        F: Fn(&DispatchAttempt) -> BatchRequest,
    {
        let mut state = DispatchState::Connect;
        loop {
            state = match self.step(&mut attempt, state, &build) {
                DispatchState::Done(reply) => {
                    return Ok(Dispatched {
                        subject: attempt.subject,
                        server: attempt.target_server,
                        located: attempt.located,
                        reply,
                    });
                }
                DispatchState::Failed(error) => return Err(error),
                state => state,
            };
        }
    }

    fn step<F>(
        &mut self,
        attempt: &mut DispatchAttempt,
        state: DispatchState<C::Session>,
        build: &F,
    ) -> DispatchState<C::Session>
    where
        F: Fn(&DispatchAttempt) -> BatchRequest,
    {
        match state {
            DispatchState::Connect => match self.connector.connect(&attempt.target_server) {
                Ok(session) => DispatchState::Dispatch(session),
                Err(error) => {
                    log::debug!("Cannot connect to {}: {error}", attempt.target_server);
                    DispatchState::Failed(DispatchError::from_transport(
                        &attempt.target_server,
                        error,
                    ))
                }
            },
            DispatchState::Dispatch(mut session) => {
                let request = build(attempt);
                let result = session.exchange(&request);
                let fallback_message = session.server_error_message();
                session.close();

                let reply = match result {
                    Ok(reply) => reply,
                    Err(error) => {
                        return DispatchState::Failed(DispatchError::from_wire(
                            &attempt.target_server,
                            error,
                        ));
                    }
                };
                if reply.is_success() {
                    return DispatchState::Done(reply);
                }

                let message = reply
                    .text()
                    .map(|text| text.to_string())
                    .or(fallback_message)
                    .or_else(|| error_text(reply.code).map(|text| text.to_string()));
                let server = attempt.target_server.clone();
                match (&attempt.job, reply.code) {
                    (Some(_), PBSE_UNKJOBID) => {
                        let error = DispatchError::UnknownJob {
                            job: attempt.subject.clone(),
                            server,
                            message,
                        };
                        if attempt.located {
                            DispatchState::Failed(error)
                        } else {
                            DispatchState::Locate(error)
                        }
                    }
                    (_, code) => DispatchState::Failed(DispatchError::ServerRejected {
                        server,
                        code,
                        message,
                    }),
                }
            }
            DispatchState::Locate(unknown) => {
                match self
                    .locator
                    .locate(&attempt.subject, &attempt.target_server)
                {
                    Ok(server) => {
                        log::debug!(
                            "Job {} moved from {} to {server}",
                            attempt.subject,
                            attempt.target_server
                        );
                        attempt.target_server = server;
                        attempt.located = true;
                        DispatchState::Connect
                    }
                    Err(error) => {
                        log::debug!("Cannot locate job {}: {error}", attempt.subject);
                        DispatchState::Failed(unknown)
                    }
                }
            }
            terminal @ (DispatchState::Done(_) | DispatchState::Failed(_)) => terminal,
        }
    }
}
