//! Downstream handler contract

use crate::error::Result;
use crate::sink::ResponseSink;
use async_trait::async_trait;
use bytes::Bytes;
use http::Request;
use http_body_util::Full;
use std::fmt;

/// Body type alias
pub type Body = Full<Bytes>;

/// A request handler that writes its response through a sink.
///
/// This is the contract both sides of a middleware share: the host
/// calls the outermost handler with the real sink, and a middleware
/// calls its inner handler with whatever sink it chooses to interpose.
/// `serve` returns only after the handler has finished writing, so a
/// caller that buffers the sink sees the complete response body.
#[async_trait]
pub trait Handler: Send + Sync + fmt::Debug {
    /// Serve one request, writing the response through `rw`.
    async fn serve(&self, req: Request<Body>, rw: &mut dyn ResponseSink) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, StatusCode};

    #[derive(Debug, Default)]
    struct NullSink {
        headers: HeaderMap,
    }

    impl ResponseSink for NullSink {
        fn headers(&self) -> &HeaderMap {
            &self.headers
        }

        fn headers_mut(&mut self) -> &mut HeaderMap {
            &mut self.headers
        }

        fn write_header(&mut self, _status: StatusCode) -> Result<()> {
            Ok(())
        }

        fn write(&mut self, _chunk: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Echo;

    #[async_trait]
    impl Handler for Echo {
        async fn serve(&self, _req: Request<Body>, rw: &mut dyn ResponseSink) -> Result<()> {
            rw.write_header(StatusCode::OK)?;
            rw.write(b"ok")
        }
    }

    #[tokio::test]
    async fn test_handler_object_safety() {
        let handler: Box<dyn Handler> = Box::new(Echo);
        let req = Request::builder().uri("/").body(Body::from("")).unwrap();
        let mut sink = NullSink::default();
        handler.serve(req, &mut sink).await.unwrap();
    }
}
