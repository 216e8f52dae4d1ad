//! Gzip framing for message bodies.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::error::{MessageError, Result};

/// Gzip `data` at the default level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let gzip_err = |e: std::io::Error| MessageError::CipherFailure(format!("gzip: {e}"));
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), Compression::default());
    encoder.write_all(data).map_err(gzip_err)?;
    encoder.finish().map_err(gzip_err)
}

/// Inflate a gzip stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| MessageError::CipherFailure(format!("gunzip: {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let text = b"Test message Test message Test message".repeat(20);
        let packed = compress(&text).unwrap();
        assert!(packed.len() < text.len());
        assert_eq!(decompress(&packed).unwrap(), text);
    }

    #[test]
    fn test_decompress_foreign_stream() {
        let packed =
            hex::decode("1f8b08000000000002030b492d2e51c84d2d2e4e4c4f050073bcbd070c000000").unwrap();
        assert_eq!(decompress(&packed).unwrap(), b"Test message");
    }

    #[test]
    fn test_decompress_garbage() {
        assert!(matches!(
            decompress(b"not gzip at all"),
            Err(MessageError::CipherFailure(_))
        ));
    }
}
