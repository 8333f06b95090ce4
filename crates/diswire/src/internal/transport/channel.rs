use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::{Buf, BytesMut};

use crate::internal::batch::reply::BatchReply;
use crate::internal::batch::request::BatchRequest;
use crate::internal::codec::DisRead;
use crate::internal::codec::string::DEFAULT_MAX_STRING_LENGTH;
use crate::internal::common::error::{DisError, TransportError, WireError};
use crate::internal::transport::frame::{
    DEFAULT_IO_TIMEOUT, Descriptor, read_blocking, read_bounded, write_bounded,
};

const READ_CHUNK_SIZE: usize = 4096;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReadMode {
    /// Reads give up after the I/O timeout.
    Bounded,
    /// Reads wait as long as the descriptor itself does.
    Blocking,
}

#[derive(Debug, Copy, Clone)]
pub struct ChannelPolicy {
    pub io_timeout: Duration,
    pub connect_timeout: Duration,
    pub read_mode: ReadMode,
    pub max_string_length: usize,
}

impl Default for ChannelPolicy {
    fn default() -> Self {
        ChannelPolicy {
            io_timeout: DEFAULT_IO_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_mode: ReadMode::Bounded,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }
}

/// Buffered connection to one server, used for a single request/reply exchange.
///
/// The descriptor is released when the channel is dropped or closed, on every path.
pub struct Channel<D: Descriptor = TcpStream> {
    descriptor: D,
    server: String,
    peer_address: Option<SocketAddr>,
    read_buffer: BytesMut,
    write_buffer: BytesMut,
    policy: ChannelPolicy,
    /// Transport failure hidden behind `DisError::EndOfFile` while decoding.
    transport_error: Option<TransportError>,
    last_reply_message: Option<String>,
}

/// Splits `host[:port]`, falling back to `default_port`.
pub fn split_server_address(server: &str, default_port: u16) -> (&str, u16) {
    match server.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && !host.contains(':') => match port.parse() {
            Ok(port) => (host, port),
            Err(_) => (server, default_port),
        },
        _ => (server, default_port),
    }
}

impl Channel<TcpStream> {
    /// Resolves `server` and connects to the first address that accepts the connection.
    pub fn connect(
        server: &str,
        default_port: u16,
        policy: ChannelPolicy,
    ) -> Result<Self, TransportError> {
        let (host, port) = split_server_address(server, default_port);
        let addresses: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                server: server.to_string(),
                source,
            })?
            .collect();

        let mut last_error = std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "host name resolved to no addresses",
        );
        for address in addresses {
            log::debug!("Connecting to {server} at {address}");
            match TcpStream::connect_timeout(&address, policy.connect_timeout) {
                Ok(stream) => {
                    stream.set_nodelay(true)?;
                    if policy.read_mode == ReadMode::Bounded {
                        stream.set_nonblocking(true)?;
                    }
                    let mut channel = Self::from_descriptor(stream, server, policy);
                    channel.peer_address = Some(address);
                    return Ok(channel);
                }
                Err(error) => {
                    log::debug!("Connection to {address} failed: {error}");
                    last_error = error;
                }
            }
        }
        Err(TransportError::Connect {
            server: server.to_string(),
            source: last_error,
        })
    }
}

impl<D: Descriptor> Channel<D> {
    pub fn from_descriptor(descriptor: D, server: &str, policy: ChannelPolicy) -> Self {
        Channel {
            descriptor,
            server: server.to_string(),
            peer_address: None,
            read_buffer: BytesMut::with_capacity(READ_CHUNK_SIZE),
            write_buffer: BytesMut::new(),
            policy,
            transport_error: None,
            last_reply_message: None,
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn peer_address(&self) -> Option<SocketAddr> {
        self.peer_address
    }

    pub fn policy(&self) -> &ChannelPolicy {
        &self.policy
    }

    /// Sends `request` and waits for the server's reply.
    pub fn exchange(&mut self, request: &BatchRequest) -> Result<BatchReply, WireError> {
        log::debug!(
            "Sending {:?} request to {}",
            request.request_type(),
            self.server
        );
        self.write_buffer.clear();
        request.encode(&mut self.write_buffer);
        self.flush()?;

        let limit = self.policy.max_string_length;
        let reply =
            BatchReply::decode(&mut *self, limit).map_err(|error| self.wire_error(error))?;
        log::debug!(
            "Server {} replied with code {} ({:?})",
            self.server,
            reply.code,
            reply.choice
        );
        self.last_reply_message = reply.message();
        Ok(reply)
    }

    /// Server side of an exchange: reads one request.
    pub fn receive_request(&mut self) -> Result<BatchRequest, WireError> {
        let limit = self.policy.max_string_length;
        BatchRequest::decode(&mut *self, limit).map_err(|error| self.wire_error(error))
    }

    /// Server side of an exchange: sends one reply.
    pub fn send_reply(&mut self, reply: &BatchReply) -> Result<(), WireError> {
        self.write_buffer.clear();
        reply.encode(&mut self.write_buffer);
        self.flush()?;
        Ok(())
    }

    /// Diagnostic of the last reply received on this channel, if the server produced one.
    pub fn server_error_message(&self) -> Option<String> {
        self.last_reply_message.clone()
    }

    pub fn close(self) {
        log::debug!("Closing connection to {}", self.server);
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        while self.write_buffer.has_remaining() {
            let written = write_bounded(
                &mut self.descriptor,
                &self.write_buffer,
                self.policy.io_timeout,
            )?;
            if written == 0 {
                return Err(std::io::Error::from(std::io::ErrorKind::WriteZero).into());
            }
            self.write_buffer.advance(written);
        }
        Ok(())
    }

    /// Pulls the next chunk from the descriptor, returns `false` at end of stream.
    fn fill(&mut self) -> Result<bool, DisError> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let result = match self.policy.read_mode {
            ReadMode::Bounded => {
                read_bounded(&mut self.descriptor, &mut chunk, self.policy.io_timeout)
            }
            ReadMode::Blocking => read_blocking(&mut self.descriptor, &mut chunk),
        };
        match result {
            Ok(0) => Ok(false),
            Ok(count) => {
                self.read_buffer.extend_from_slice(&chunk[..count]);
                Ok(true)
            }
            Err(error) => {
                let message = error.to_string();
                self.transport_error = Some(error);
                Err(DisError::EndOfFile(message))
            }
        }
    }

    fn wire_error(&mut self, error: DisError) -> WireError {
        match (error, self.transport_error.take()) {
            (DisError::EndOfFile(_), Some(transport)) => WireError::Transport(transport),
            (error, _) => WireError::Protocol(error),
        }
    }
}

impl<D: Descriptor> DisRead for Channel<D> {
    fn read_byte(&mut self) -> Result<Option<u8>, DisError> {
        if self.read_buffer.is_empty() && !self.fill()? {
            return Ok(None);
        }
        Ok(Some(self.read_buffer.get_u8()))
    }

    fn read_up_to(&mut self, buffer: &mut [u8]) -> Result<usize, DisError> {
        let mut filled = 0;
        while filled < buffer.len() {
            if self.read_buffer.is_empty() && !self.fill()? {
                break;
            }
            let count = (buffer.len() - filled).min(self.read_buffer.len());
            self.read_buffer
                .copy_to_slice(&mut buffer[filled..filled + count]);
            filled += count;
        }
        Ok(filled)
    }
}
