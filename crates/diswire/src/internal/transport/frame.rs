use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::os::fd::AsFd;
use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};

use crate::internal::common::error::TransportError;

/// Wall-clock budget of a single bounded read or write.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Interest {
    Read,
    Write,
}

/// A descriptor the bounded transport can drive.
///
/// The descriptor may be in non-blocking mode even when its user expects blocking semantics;
/// [`Descriptor::wait_ready`] lets the transport sleep until progress is likely instead of
/// spinning on `WouldBlock`.
pub trait Descriptor: Read + Write {
    /// Blocks until the descriptor is (probably) ready for `interest` or `timeout` elapses.
    /// Returning early is always allowed.
    fn wait_ready(&mut self, interest: Interest, timeout: Duration) -> std::io::Result<()>;
}

impl Descriptor for TcpStream {
    fn wait_ready(&mut self, interest: Interest, timeout: Duration) -> std::io::Result<()> {
        let flags = match interest {
            Interest::Read => PollFlags::POLLIN,
            Interest::Write => PollFlags::POLLOUT,
        };
        let mut fds = [PollFd::new(self.as_fd(), flags)];
        match poll(&mut fds, PollTimeout::from(poll_millis(timeout))) {
            Ok(_) | Err(Errno::EINTR) => Ok(()),
            Err(errno) => Err(errno.into()),
        }
    }
}

/// Whole milliseconds for `poll`, rounded up so a sub-millisecond budget still sleeps.
fn poll_millis(timeout: Duration) -> u16 {
    timeout
        .as_nanos()
        .div_ceil(1_000_000)
        .min(u128::from(u16::MAX)) as u16
}

fn is_transient(error: &std::io::Error) -> bool {
    matches!(error.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted)
}

/// Writes as much of `buffer` as a single successful write call accepts.
///
/// Transient unavailability is retried until `timeout` elapses, measured from the first
/// attempt. Any other error is returned at once.
pub fn write_bounded<D: Descriptor + ?Sized>(
    descriptor: &mut D,
    buffer: &[u8],
    timeout: Duration,
) -> Result<usize, TransportError> {
    let start = Instant::now();
    loop {
        match descriptor.write(buffer) {
            Ok(count) => return Ok(count),
            Err(error) if is_transient(&error) => {
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    log::debug!("Write of {} bytes timed out", buffer.len());
                    return Err(TransportError::Timeout {
                        operation: "write",
                        timeout,
                    });
                }
                descriptor.wait_ready(Interest::Write, timeout - elapsed)?;
            }
            Err(error) => return Err(error.into()),
        }
    }
}

/// Reads whatever a single successful read call returns (`0` means end of stream).
///
/// Like [`write_bounded`], but the deadline only starts at the first transient failure, so a
/// read that succeeds immediately never looks at the clock.
pub fn read_bounded<D: Descriptor + ?Sized>(
    descriptor: &mut D,
    buffer: &mut [u8],
    timeout: Duration,
) -> Result<usize, TransportError> {
    let mut started: Option<Instant> = None;
    loop {
        match descriptor.read(buffer) {
            Ok(count) => return Ok(count),
            Err(error) if is_transient(&error) => {
                let start = *started.get_or_insert_with(Instant::now);
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    log::debug!("Read of {} bytes timed out", buffer.len());
                    return Err(TransportError::Timeout {
                        operation: "read",
                        timeout,
                    });
                }
                descriptor.wait_ready(Interest::Read, timeout - elapsed)?;
            }
            Err(error) => return Err(error.into()),
        }
    }
}

/// Plain read with the descriptor's own blocking behaviour.
pub fn read_blocking<D: Read + ?Sized>(
    descriptor: &mut D,
    buffer: &mut [u8],
) -> Result<usize, TransportError> {
    Ok(descriptor.read(buffer)?)
}
