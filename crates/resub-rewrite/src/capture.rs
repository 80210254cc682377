//! Buffering decorator over the real response sink

use http::header::{CONTENT_ENCODING, CONTENT_LENGTH, LAST_MODIFIED};
use http::{HeaderMap, StatusCode};
use resub_core::sink::{Hijack, HijackedIo, ResponseSink};
use resub_core::{Error, Result};
use std::fmt;

/// Buffering decorator over the real outbound sink.
///
/// All body writes land in an in-memory buffer and header commitment
/// is deferred: nothing reaches the wrapped sink until [`commit`],
/// because the final body length is unknown until the rewrite
/// finishes. Flush and hijack are the two escape hatches, forwarded
/// straight to the wrapped sink.
///
/// [`commit`]: ResponseCapture::commit
pub struct ResponseCapture<'a> {
    sink: &'a mut dyn ResponseSink,
    status: StatusCode,
    wrote_header: bool,
    hijacked: bool,
    buffer: Vec<u8>,
    last_modified: bool,
}

impl<'a> ResponseCapture<'a> {
    /// Wrap `sink`. `last_modified` controls whether the Last-Modified
    /// header survives header commitment.
    pub fn new(sink: &'a mut dyn ResponseSink, last_modified: bool) -> Self {
        Self {
            sink,
            status: StatusCode::OK,
            wrote_header: false,
            hijacked: false,
            buffer: Vec::new(),
            last_modified,
        }
    }

    /// Status recorded by the downstream handler.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the downstream handler yielded the connection via
    /// hijack. Body semantics no longer apply once this is true.
    pub fn hijacked(&self) -> bool {
        self.hijacked
    }

    /// Snapshot of the declared Content-Encoding header value.
    pub fn declared_encoding(&self) -> String {
        self.sink
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    /// Take the captured body bytes, leaving the buffer empty.
    pub fn take_body(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    /// Commit the recorded status and scrubbed headers to the wrapped
    /// sink, then write `body`. Consumes the capture so commitment
    /// happens at most once.
    pub fn commit(mut self, body: &[u8]) -> Result<()> {
        let status = self.status;
        // Runs the header scrub if the handler never committed one.
        self.write_header(status)?;
        self.sink.write_header(status)?;
        self.sink.write(body)
    }
}

impl ResponseSink for ResponseCapture<'_> {
    fn headers(&self) -> &HeaderMap {
        self.sink.headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.sink.headers_mut()
    }

    fn write_header(&mut self, status: StatusCode) -> Result<()> {
        if self.wrote_header {
            return Ok(());
        }

        // The body length will change, so any declared length is
        // already wrong.
        self.sink.headers_mut().remove(CONTENT_LENGTH);
        if !self.last_modified {
            self.sink.headers_mut().remove(LAST_MODIFIED);
        }

        self.status = status;
        self.wrote_header = true;
        Ok(())
    }

    fn write(&mut self, chunk: &[u8]) -> Result<()> {
        if !self.wrote_header {
            self.write_header(StatusCode::OK)?;
        }
        self.buffer.extend_from_slice(chunk);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    fn as_hijack(&mut self) -> Option<&mut dyn Hijack> {
        if self.sink.as_hijack().is_some() {
            Some(self)
        } else {
            None
        }
    }

    // Errors should name the wrapped concrete sink, not the decorator.
    fn name(&self) -> &'static str {
        self.sink.name()
    }
}

impl Hijack for ResponseCapture<'_> {
    fn hijack(&mut self) -> Result<HijackedIo> {
        match self.sink.as_hijack() {
            Some(h) => {
                let io = h.hijack()?;
                self.hijacked = true;
                Ok(io)
            }
            None => Err(Error::HijackUnsupported(self.sink.name())),
        }
    }
}

impl fmt::Debug for ResponseCapture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCapture")
            .field("status", &self.status)
            .field("wrote_header", &self.wrote_header)
            .field("hijacked", &self.hijacked)
            .field("buffered", &self.buffer.len())
            .field("last_modified", &self.last_modified)
            .finish()
    }
}
