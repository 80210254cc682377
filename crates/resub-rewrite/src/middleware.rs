//! Rewrite middleware orchestration

use crate::capture::ResponseCapture;
use crate::config::RewriteConfig;
use crate::encoding::{self, ContentEncoding};
use crate::filter::FilterChain;
use async_trait::async_trait;
use http::Request;
use resub_core::{Body, Handler, ResponseSink, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Response body rewrite middleware.
///
/// Runs the downstream handler against a buffering capture, then:
/// reverses a declared gzip transform, applies the filter chain in
/// order, re-encodes, and commits status, headers, and body to the
/// real sink in one pass. Responses with an encoding it cannot decode
/// are forwarded untouched, and hijacked connections bypass the
/// pipeline entirely.
pub struct RewriteHandler {
    name: String,
    next: Arc<dyn Handler>,
    chain: FilterChain,
    last_modified: bool,
}

impl RewriteHandler {
    /// Build the middleware, compiling the configured filter chain.
    ///
    /// Fails when no configured pattern compiles; a rewriter with
    /// nothing to rewrite must not be installed.
    pub fn new(
        next: Arc<dyn Handler>,
        config: &RewriteConfig,
        name: impl Into<String>,
    ) -> Result<Self> {
        let chain = FilterChain::compile(&config.filters)?;

        Ok(Self {
            name: name.into(),
            next,
            chain,
            last_modified: config.last_modified,
        })
    }

    /// Middleware instance name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl Handler for RewriteHandler {
    async fn serve(&self, req: Request<Body>, rw: &mut dyn ResponseSink) -> Result<()> {
        let mut capture = ResponseCapture::new(rw, self.last_modified);
        self.next.serve(req, &mut capture).await?;

        if capture.hijacked() {
            // The connection left the HTTP layer; there is no body to
            // rewrite and no headers to commit.
            return Ok(());
        }

        let declared = capture.declared_encoding();
        let gate = ContentEncoding::classify(&declared);
        let body = capture.take_body();

        let decoded = match gate {
            ContentEncoding::Identity => body,
            ContentEncoding::Gzip => match encoding::gzip_decode(&body) {
                Ok(plain) => plain,
                Err(e) => {
                    // A partial or garbled body must never go out.
                    error!(middleware = %self.name, error = %e, "unable to decode response body, dropping response");
                    return Ok(());
                }
            },
            ContentEncoding::Other => {
                debug!(middleware = %self.name, encoding = %declared, "unsupported content encoding, passing response through");
                if let Err(e) = capture.commit(&body) {
                    error!(middleware = %self.name, error = %e, "unable to write response");
                }
                return Ok(());
            }
        };

        let rewritten = self.chain.apply(decoded);

        let final_body = match gate {
            ContentEncoding::Gzip => match encoding::gzip_encode(&rewritten) {
                Ok(compressed) => compressed,
                Err(e) => {
                    error!(middleware = %self.name, error = %e, "unable to re-encode response body, dropping response");
                    return Ok(());
                }
            },
            _ => rewritten,
        };

        if let Err(e) = capture.commit(&final_body) {
            // Headers are committed by now; retrying cannot help.
            error!(middleware = %self.name, error = %e, "unable to write modified response");
        }

        Ok(())
    }
}

impl fmt::Debug for RewriteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteHandler")
            .field("name", &self.name)
            .field("filters", &self.chain.len())
            .field("last_modified", &self.last_modified)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use resub_core::testing::RecordingSink;

    #[derive(Debug)]
    struct StaticHandler {
        body: &'static str,
    }

    #[async_trait]
    impl Handler for StaticHandler {
        async fn serve(&self, _req: Request<Body>, rw: &mut dyn ResponseSink) -> Result<()> {
            rw.write_header(StatusCode::OK)?;
            rw.write(self.body.as_bytes())
        }
    }

    #[tokio::test]
    async fn test_rewrites_plain_body() {
        let config = RewriteConfig::new().with_filter("foo", "bar");
        let handler = RewriteHandler::new(
            Arc::new(StaticHandler {
                body: "foo is the new bar",
            }),
            &config,
            "rewrite",
        )
        .unwrap();

        let mut sink = RecordingSink::new();
        let req = Request::builder().uri("/").body(Body::from("")).unwrap();
        handler.serve(req, &mut sink).await.unwrap();

        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert_eq!(sink.body(), b"bar is the new bar");
    }

    #[tokio::test]
    async fn test_construction_fails_without_valid_filters() {
        let config = RewriteConfig::new().with_filter("*", "bar");
        let err = RewriteHandler::new(
            Arc::new(StaticHandler { body: "" }),
            &config,
            "rewrite",
        )
        .unwrap_err();

        assert!(err.to_string().contains("no valid filters"));
    }
}
