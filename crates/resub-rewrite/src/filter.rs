//! Ordered regex substitution chain

use crate::config::FilterSpec;
use regex::bytes::Regex;
use resub_core::{Error, Result};
use tracing::warn;

/// A compiled pattern/replacement pair.
#[derive(Debug)]
struct CompiledFilter {
    matcher: Regex,
    replacement: Vec<u8>,
}

/// Immutable, ordered set of compiled filters.
///
/// Construction is best-effort: patterns that fail to compile are
/// dropped with a warning, and only an empty result is fatal. The
/// chain is read-only afterwards and safe to share across requests.
#[derive(Debug)]
pub struct FilterChain {
    filters: Vec<CompiledFilter>,
}

impl FilterChain {
    /// Compile `specs` in order.
    ///
    /// Returns a configuration error when no spec yields a usable
    /// filter.
    pub fn compile(specs: &[FilterSpec]) -> Result<Self> {
        let mut filters = Vec::with_capacity(specs.len());

        for spec in specs {
            match Regex::new(&spec.regex) {
                Ok(matcher) => filters.push(CompiledFilter {
                    matcher,
                    replacement: spec.replacement.clone().into_bytes(),
                }),
                Err(e) => {
                    warn!(pattern = %spec.regex, error = %e, "dropping filter with invalid pattern");
                }
            }
        }

        if filters.is_empty() {
            return Err(Error::config("no valid filters"));
        }

        Ok(Self { filters })
    }

    /// Number of filters in the chain, always at least one.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the chain is empty. Construction guarantees it is not.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply every filter in declaration order over `input`.
    ///
    /// Each filter replaces all non-overlapping matches, and its output
    /// feeds the next filter, so a later filter can match text
    /// introduced by an earlier replacement. That chaining is part of
    /// the contract.
    pub fn apply(&self, input: Vec<u8>) -> Vec<u8> {
        self.filters.iter().fold(input, |buf, filter| {
            filter
                .matcher
                .replace_all(&buf, filter.replacement.as_slice())
                .into_owned()
        })
    }
}
