use thiserror::Error;

use diswire::WireError;
use diswire::batch::{BatchRequest, ReplyChoice, RequestBody};

use crate::client::connector::{Connector, Session};

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("job {job} is not known to server {server}")]
    NotFound { job: String, server: String },
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Finds the server currently owning a job.
pub trait JobLocator {
    /// `job_id` is the qualified id (`<seq>.<home-server>`): a bare sequence number is not
    /// unique across servers. `last_server` is the server that last rejected the job.
    fn locate(&mut self, job_id: &str, last_server: &str) -> Result<String, LocateError>;
}

/// Asks the server that rejected a job where the job went, using a `LocateJob` request.
pub struct ServerLocator<C> {
    connector: C,
    user: String,
}

impl<C: Connector> ServerLocator<C> {
    pub fn new(connector: C, user: &str) -> Self {
        ServerLocator {
            connector,
            user: user.to_string(),
        }
    }
}

impl<C: Connector> JobLocator for ServerLocator<C> {
    fn locate(&mut self, job_id: &str, last_server: &str) -> Result<String, LocateError> {
        let mut session = self
            .connector
            .connect(last_server)
            .map_err(WireError::from)?;
        let request = BatchRequest::new(
            &self.user,
            RequestBody::LocateJob {
                job_id: job_id.to_string(),
            },
        );
        let result = session.exchange(&request);
        session.close();

        let reply = result?;
        let success = reply.is_success();
        match reply.choice {
            ReplyChoice::Locate(server) if success && !server.is_empty() => {
                log::debug!("Job {job_id} located at {server}");
                Ok(server)
            }
            _ => Err(LocateError::NotFound {
                job: job_id.to_string(),
                server: last_server.to_string(),
            }),
        }
    }
}
