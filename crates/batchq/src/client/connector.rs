use std::net::TcpStream;

use diswire::batch::{BatchReply, BatchRequest};
use diswire::transport::{Channel, ChannelPolicy, Descriptor};
use diswire::{TransportError, WireError};

/// One open connection, good for a single request/reply exchange.
pub trait Session {
    fn exchange(&mut self, request: &BatchRequest) -> Result<BatchReply, WireError>;

    /// Diagnostic of the last reply, when the reply itself carried none.
    fn server_error_message(&self) -> Option<String>;

    fn close(self);
}

/// Opens sessions to servers given by name.
pub trait Connector {
    type Session: Session;

    fn connect(&mut self, server: &str) -> Result<Self::Session, TransportError>;
}

impl<D: Descriptor> Session for Channel<D> {
    fn exchange(&mut self, request: &BatchRequest) -> Result<BatchReply, WireError> {
        Channel::exchange(self, request)
    }

    fn server_error_message(&self) -> Option<String> {
        Channel::server_error_message(self)
    }

    fn close(self) {
        Channel::close(self)
    }
}

#[derive(Debug, Clone)]
pub struct TcpConnector {
    port: u16,
    policy: ChannelPolicy,
}

impl TcpConnector {
    pub fn new(port: u16, policy: ChannelPolicy) -> Self {
        TcpConnector { port, policy }
    }
}

impl Connector for TcpConnector {
    type Session = Channel<TcpStream>;

    fn connect(&mut self, server: &str) -> Result<Self::Session, TransportError> {
        Channel::connect(server, self.port, self.policy)
    }
}
