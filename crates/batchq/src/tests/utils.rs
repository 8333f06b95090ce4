use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use diswire::batch::{BatchReply, BatchRequest};
use diswire::{DisError, TransportError, WireError};

use crate::client::connector::{Connector, Session};
use crate::client::locate::{JobLocator, LocateError};

/// What happens on the next connection of a [`ScriptedConnector`].
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(BatchReply),
    Unreachable,
    Timeout,
    Garbage,
    Overflowing,
}

#[derive(Default)]
struct ScriptState {
    script: VecDeque<Scripted>,
    connects: Vec<String>,
    requests: Vec<BatchRequest>,
    closed: usize,
}

/// Connector that plays back a script, one entry per connection.
#[derive(Clone)]
pub struct ScriptedConnector {
    state: Rc<RefCell<ScriptState>>,
}

impl ScriptedConnector {
    pub fn new(script: Vec<Scripted>) -> Self {
        ScriptedConnector {
            state: Rc::new(RefCell::new(ScriptState {
                script: script.into(),
                ..Default::default()
            })),
        }
    }

    pub fn connects(&self) -> Vec<String> {
        self.state.borrow().connects.clone()
    }

    pub fn requests(&self) -> Vec<BatchRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn closed(&self) -> usize {
        self.state.borrow().closed
    }
}

impl Connector for ScriptedConnector {
    type Session = ScriptedSession;

    fn connect(&mut self, server: &str) -> Result<Self::Session, TransportError> {
        let mut state = self.state.borrow_mut();
        state.connects.push(server.to_string());
        let outcome = state
            .script
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected connection to {server}"));
        match outcome {
            Scripted::Unreachable => Err(TransportError::Connect {
                server: server.to_string(),
                source: std::io::ErrorKind::ConnectionRefused.into(),
            }),
            outcome => Ok(ScriptedSession {
                outcome: Some(outcome),
                state: self.state.clone(),
                message: None,
            }),
        }
    }
}

pub struct ScriptedSession {
    outcome: Option<Scripted>,
    state: Rc<RefCell<ScriptState>>,
    message: Option<String>,
}

impl Session for ScriptedSession {
    fn exchange(&mut self, request: &BatchRequest) -> Result<BatchReply, WireError> {
        self.state.borrow_mut().requests.push(request.clone());
        match self.outcome.take().expect("Session used twice") {
            Scripted::Reply(reply) => {
                self.message = reply.message();
                Ok(reply)
            }
            Scripted::Timeout => Err(TransportError::Timeout {
                operation: "read",
                timeout: Duration::from_secs(30),
            }
            .into()),
            Scripted::Garbage => Err(DisError::NonDigit.into()),
            Scripted::Overflowing => Err(DisError::Overflow {
                saturated: u64::MAX,
            }
            .into()),
            Scripted::Unreachable => unreachable!(),
        }
    }

    fn server_error_message(&self) -> Option<String> {
        self.message.clone()
    }

    fn close(self) {
        self.state.borrow_mut().closed += 1;
    }
}

/// Locator answering from a list, `None` meaning the job cannot be found.
pub struct ScriptedLocator {
    answers: VecDeque<Option<String>>,
    pub calls: Vec<(String, String)>,
}

impl ScriptedLocator {
    pub fn new(answers: Vec<Option<&str>>) -> Self {
        ScriptedLocator {
            answers: answers
                .into_iter()
                .map(|answer| answer.map(|s| s.to_string()))
                .collect(),
            calls: Vec::new(),
        }
    }
}

impl JobLocator for ScriptedLocator {
    fn locate(&mut self, job_id: &str, last_server: &str) -> Result<String, LocateError> {
        self.calls
            .push((job_id.to_string(), last_server.to_string()));
        self.answers
            .pop_front()
            .flatten()
            .ok_or_else(|| LocateError::NotFound {
                job: job_id.to_string(),
                server: last_server.to_string(),
            })
    }
}
