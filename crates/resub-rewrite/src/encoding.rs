//! Content-Encoding classification and the gzip codec

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use resub_core::{Error, Result};
use std::io::{Read, Write};

/// Content-Encoding token for the supported compression scheme.
pub const CONTENT_ENCODING_GZIP: &str = "gzip";

/// Classification of a response's declared Content-Encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    /// No transform: empty or `identity`.
    Identity,

    /// Gzip; the body is decoded before filtering and re-encoded after.
    Gzip,

    /// Any other token. The body cannot be decoded safely, so it is
    /// passed through untouched and filters are skipped.
    Other,
}

impl ContentEncoding {
    /// Classify a declared Content-Encoding header value.
    pub fn classify(value: &str) -> Self {
        match value.trim() {
            "" | "identity" => Self::Identity,
            CONTENT_ENCODING_GZIP => Self::Gzip,
            _ => Self::Other,
        }
    }
}

/// Decompress a full gzip body.
pub fn gzip_decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::decode(e))?;
    Ok(out)
}

/// Compress a body with gzip at the default level.
pub fn gzip_encode(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ContentEncoding::classify(""), ContentEncoding::Identity);
        assert_eq!(
            ContentEncoding::classify("identity"),
            ContentEncoding::Identity
        );
        assert_eq!(ContentEncoding::classify("gzip"), ContentEncoding::Gzip);
        assert_eq!(ContentEncoding::classify("br"), ContentEncoding::Other);
        assert_eq!(ContentEncoding::classify("deflate"), ContentEncoding::Other);
    }

    #[test]
    fn test_gzip_round_trip() {
        let data = "some compressible text, repeated a few times. ".repeat(20);
        let compressed = gzip_encode(data.as_bytes()).unwrap();
        assert!(compressed.len() < data.len());

        let decompressed = gzip_decode(&compressed).unwrap();
        assert_eq!(decompressed, data.as_bytes());
    }

    #[test]
    fn test_gzip_decode_rejects_garbage() {
        let err = gzip_decode(b"definitely not gzip").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
