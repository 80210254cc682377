//! Response sink trait family
//!
//! The host hands each request a concrete sink that carries status,
//! headers, and body bytes back to the client. Middleware decorates it.
//! Flushing and hijacking are optional capabilities: a sink advertises
//! them through query methods instead of a wider trait bound, so a
//! decorator can forward whatever its inner sink actually supports.

use crate::error::{Error, Result};
use http::{HeaderMap, StatusCode};
use std::fmt;
use tokio::io::{AsyncRead, AsyncWrite};

/// Byte stream yielded by a successful hijack.
pub trait HijackIo: AsyncRead + AsyncWrite + Send + Unpin + fmt::Debug {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin + fmt::Debug> HijackIo for T {}

/// Raw connection handed out by [`Hijack::hijack`]. Once yielded, the
/// HTTP response abstraction no longer applies to this connection.
pub type HijackedIo = Box<dyn HijackIo>;

/// Optional sink capability: take over the underlying connection,
/// e.g. for a protocol upgrade.
pub trait Hijack {
    /// Yield ownership of the raw connection.
    ///
    /// Fails if the connection was already hijacked.
    fn hijack(&mut self) -> Result<HijackedIo>;
}

/// Outbound response sink.
///
/// Headers stay mutable until [`write_header`](Self::write_header)
/// commits them together with the status code; body bytes follow via
/// [`write`](Self::write).
pub trait ResponseSink: Send {
    /// Response headers accumulated so far.
    fn headers(&self) -> &HeaderMap;

    /// Mutable access to the response headers. Mutations after commit
    /// have no effect on the wire.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commit the status code and the current headers.
    fn write_header(&mut self, status: StatusCode) -> Result<()>;

    /// Write a chunk of body bytes.
    fn write(&mut self, chunk: &[u8]) -> Result<()>;

    /// Flush buffered bytes towards the client. No-op for sinks
    /// without the capability.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Capability query: sinks that can yield the raw connection
    /// return their [`Hijack`] handle.
    fn as_hijack(&mut self) -> Option<&mut dyn Hijack> {
        None
    }

    /// Concrete type name, used to identify the sink in errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Hijack through the sink's capability query, failing with a typed
/// error naming the concrete sink when the capability is absent.
pub fn hijack_sink(sink: &mut dyn ResponseSink) -> Result<HijackedIo> {
    let name = sink.name();
    match sink.as_hijack() {
        Some(h) => h.hijack(),
        None => Err(Error::HijackUnsupported(name)),
    }
}
