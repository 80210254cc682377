//! # resub-core
//!
//! Core types and traits for the resub response rewriter:
//! - Response sink abstraction with optional flush/hijack capabilities
//! - Downstream handler contract
//! - Shared error type

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod error;
pub mod handler;
pub mod sink;

#[cfg(feature = "testing")]
pub mod testing;

pub use error::{Error, Result};
pub use handler::{Body, Handler};
pub use sink::{hijack_sink, Hijack, HijackIo, HijackedIo, ResponseSink};

// Re-export commonly used HTTP types
pub use bytes::Bytes;
pub use http::{Request, StatusCode};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::handler::{Body, Handler};
    pub use crate::sink::{hijack_sink, Hijack, HijackedIo, ResponseSink};
    pub use async_trait::async_trait;
}
