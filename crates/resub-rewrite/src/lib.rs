//! Response body rewrite middleware
//!
//! Sits in a reverse proxy's middleware chain and rewrites backend
//! response bodies with an ordered set of regex substitutions:
//! - buffers the full downstream response
//! - reverses a declared gzip transform before filtering, re-applies
//!   it after
//! - passes unknown content encodings through untouched
//! - drops Content-Length (the length changed) and, by default,
//!   Last-Modified
//! - forwards flush and hijack straight to the real sink
//!
//! Filters that fail to compile are dropped with a warning; a
//! configuration with no usable filter is rejected at construction.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod capture;
pub mod config;
pub mod encoding;
pub mod filter;
pub mod middleware;

pub use capture::ResponseCapture;
pub use config::{FilterSpec, RewriteConfig};
pub use encoding::ContentEncoding;
pub use filter::FilterChain;
pub use middleware::RewriteHandler;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{FilterSpec, RewriteConfig};
    pub use crate::middleware::RewriteHandler;
    pub use resub_core::prelude::*;
}
