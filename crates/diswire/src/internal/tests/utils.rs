use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use crate::internal::transport::frame::{Descriptor, Interest};

#[derive(Debug, Copy, Clone)]
pub enum Step {
    /// The next read/write call fails with this error kind.
    Fail(ErrorKind),
    /// The next read/write call transfers at most this many bytes.
    Accept(usize),
}

/// In-memory descriptor whose read/write calls follow a script.
///
/// Calls without a scripted step transfer as much as possible.
pub struct ScriptedDescriptor {
    input: VecDeque<u8>,
    steps: VecDeque<Step>,
    written: Vec<u8>,
    waits: usize,
    always_blocking: bool,
}

impl ScriptedDescriptor {
    pub fn new(steps: Vec<Step>) -> Self {
        Self::with_input(b"", steps)
    }

    pub fn with_input(input: &[u8], steps: Vec<Step>) -> Self {
        Self {
            input: input.iter().copied().collect(),
            steps: steps.into(),
            written: Vec::new(),
            waits: 0,
            always_blocking: false,
        }
    }

    /// A descriptor that reports "would block" forever.
    pub fn always_blocking() -> Self {
        let mut descriptor = Self::new(vec![]);
        descriptor.always_blocking = true;
        descriptor
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }

    pub fn waits(&self) -> usize {
        self.waits
    }

    fn next_limit(&mut self) -> std::io::Result<usize> {
        if self.always_blocking {
            return Err(ErrorKind::WouldBlock.into());
        }
        match self.steps.pop_front() {
            Some(Step::Fail(kind)) => Err(kind.into()),
            Some(Step::Accept(limit)) => Ok(limit),
            None => Ok(usize::MAX),
        }
    }
}

impl Read for ScriptedDescriptor {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let limit = self.next_limit()?;
        let count = buf.len().min(limit).min(self.input.len());
        for (slot, byte) in buf.iter_mut().zip(self.input.drain(..count)) {
            *slot = byte;
        }
        Ok(count)
    }
}

impl Write for ScriptedDescriptor {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let limit = self.next_limit()?;
        let count = buf.len().min(limit);
        self.written.extend_from_slice(&buf[..count]);
        Ok(count)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Descriptor for ScriptedDescriptor {
    fn wait_ready(&mut self, _interest: Interest, timeout: Duration) -> std::io::Result<()> {
        self.waits += 1;
        std::thread::sleep(timeout.min(Duration::from_millis(5)));
        Ok(())
    }
}
