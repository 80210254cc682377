//! Test doubles for sink consumers
//!
//! Enabled with the `testing` feature so downstream crates can exercise
//! middleware against in-memory sinks without a real connection.

use crate::error::{Error, Result};
use crate::sink::{Hijack, HijackedIo, ResponseSink};
use http::{HeaderMap, StatusCode};
use tokio::io::DuplexStream;

/// In-memory sink recording everything a middleware commits.
#[derive(Debug, Default)]
pub struct RecordingSink {
    headers: HeaderMap,
    status: Option<StatusCode>,
    body: Vec<u8>,
    flushes: usize,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed status code, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Body bytes written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Number of times `flush` was called.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl ResponseSink for RecordingSink {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_header(&mut self, status: StatusCode) -> Result<()> {
        self.status = Some(status);
        Ok(())
    }

    fn write(&mut self, chunk: &[u8]) -> Result<()> {
        self.body.extend_from_slice(chunk);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Recording sink that additionally supports hijacking over an
/// in-memory duplex pipe.
#[derive(Debug)]
pub struct HijackableSink {
    inner: RecordingSink,
    io: Option<DuplexStream>,
}

impl HijackableSink {
    /// Create a hijackable sink, returning the peer end of the pipe.
    pub fn new() -> (Self, DuplexStream) {
        let (ours, peer) = tokio::io::duplex(4096);
        (
            Self {
                inner: RecordingSink::new(),
                io: Some(ours),
            },
            peer,
        )
    }

    /// The recording half, for asserting on committed output.
    pub fn recording(&self) -> &RecordingSink {
        &self.inner
    }
}

impl ResponseSink for HijackableSink {
    fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn write_header(&mut self, status: StatusCode) -> Result<()> {
        self.inner.write_header(status)
    }

    fn write(&mut self, chunk: &[u8]) -> Result<()> {
        self.inner.write(chunk)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    fn as_hijack(&mut self) -> Option<&mut dyn Hijack> {
        Some(self)
    }
}

impl Hijack for HijackableSink {
    fn hijack(&mut self) -> Result<HijackedIo> {
        match self.io.take() {
            Some(io) => Ok(Box::new(io)),
            None => Err(Error::internal("connection already hijacked")),
        }
    }
}
