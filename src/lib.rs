//! # rle-codec
//!
//! A byte-oriented run-length encoder/decoder. Consecutive runs of identical
//! bytes (up to 255 long) are collapsed into records, and a one-byte tag at
//! the start of every stream says which of two record formats follows.
//!
//! ## Formats
//!
//! - **Format A** (tag `0x21`): every run becomes `[COUNT][VALUE]`.
//! - **Format B** (tag `0x8A`): singleton runs are stored as the bare value,
//!   longer runs as `[VALUE][VALUE][COUNT]`. Stays compact for data with
//!   little repetition.
//!
//! ## Quick Start
//!
//! ```rust
//! use rle_codec::{decode_data, encode_data, Method};
//!
//! let original = b"aaaaaaaabbbbcd";
//! let encoded = encode_data(original, Method::B).unwrap();
//! assert_eq!(encoded[0], Method::B.tag());
//!
//! let decoded = decode_data(&encoded).unwrap();
//! assert_eq!(original.to_vec(), decoded);
//! ```
//!
//! ### Working with Files
//!
//! ```rust,no_run
//! use rle_codec::{pipeline, Method, RleConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RleConfig::default().with_method(Method::A).with_overwrite(true);
//! let stats = pipeline::encode_file("input.bin", "input.bin.rle", &config)?;
//! println!("Compression ratio: {:.2}x", stats.ratio);
//!
//! pipeline::decode_file("input.bin.rle", "copy.bin", &config)?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod container;
pub mod error;
pub mod formats;
pub mod io;
pub mod pipeline;
pub mod scanner;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Catalog, Product, ProductType};
pub use config::{Method, RleConfig, METHOD_A, METHOD_B};
pub use error::{CatalogError, Result, RleError};
pub use pipeline::{decode, encode, DecodeStats, EncodeStats, FileInfo};
pub use scanner::{Run, RunScanner, MAX_RUN_LENGTH};

use std::io::Cursor;

/// Encode an in-memory buffer
///
/// For large files, use the streaming `pipeline::encode` or
/// `pipeline::encode_file` instead.
pub fn encode_data(data: &[u8], method: Method) -> Result<Vec<u8>> {
    let mut input = Cursor::new(data);
    let mut output = Vec::with_capacity(data.len() / 2 + 1);

    pipeline::encode(&mut input, &mut output, method)?;
    Ok(output)
}

/// Decode an in-memory container, dispatching on its tag byte
///
/// # Example
///
/// ```rust
/// use rle_codec::{decode_data, RleError};
///
/// assert_eq!(decode_data(&[0x21, 3, b'x']).unwrap(), b"xxx".to_vec());
/// assert!(matches!(decode_data(&[0x00]), Err(RleError::UnknownFormat(0))));
/// ```
pub fn decode_data(compressed_data: &[u8]) -> Result<Vec<u8>> {
    let mut input = Cursor::new(compressed_data);
    let mut output = Vec::new();

    pipeline::decode(&mut input, &mut output)?;
    Ok(output)
}

/// Get the method, sizes and record count of an encoded container
pub fn get_encoding_info(compressed_data: &[u8]) -> Result<FileInfo> {
    let mut input = Cursor::new(compressed_data);
    pipeline::info(&mut input)
}

/// Validate an encoded container
///
/// Stricter than decoding: run lengths the encoder never produces are
/// reported as errors.
pub fn validate_data(compressed_data: &[u8]) -> Result<bool> {
    let mut input = Cursor::new(compressed_data);
    pipeline::validate(&mut input)
}

/// Size in bytes (tag included) that `encode_data` would produce
pub fn estimate_encoded_size(data: &[u8], method: Method) -> Result<u64> {
    let mut input = Cursor::new(data);
    pipeline::estimate_encoded_size(&mut input, method)
}

/// Encode with whichever method yields the smaller output
///
/// Format A is preferred on a tie.
///
/// # Example
///
/// ```rust
/// use rle_codec::{encode_auto, Method};
///
/// let (_, method, _) = encode_auto(&[0u8; 1000]).unwrap();
/// assert_eq!(method, Method::A);
///
/// let (_, method, _) = encode_auto(b"abcdefgh").unwrap();
/// assert_eq!(method, Method::B);
/// ```
pub fn encode_auto(data: &[u8]) -> Result<(Vec<u8>, Method, EncodeStats)> {
    let size_a = estimate_encoded_size(data, Method::A)?;
    let size_b = estimate_encoded_size(data, Method::B)?;
    let method = if size_a <= size_b { Method::A } else { Method::B };

    let mut input = Cursor::new(data);
    let mut output = Vec::with_capacity(size_a.min(size_b) as usize);
    let stats = pipeline::encode(&mut input, &mut output, method)?;
    Ok((output, method, stats))
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get library version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: VERSION,
        authors: AUTHORS,
        description: DESCRIPTION,
    }
}

#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub version: &'static str,
    pub authors: &'static str,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_data() {
        let original = b"Hello, world! This is a test of the RLE codec API.";
        for method in [Method::A, Method::B] {
            let encoded = encode_data(original, method).unwrap();
            assert!(!encoded.is_empty());

            let decoded = decode_data(&encoded).unwrap();
            assert_eq!(original.to_vec(), decoded);
        }
    }

    #[test]
    fn test_empty_data() {
        for method in [Method::A, Method::B] {
            let encoded = encode_data(b"", method).unwrap();
            assert_eq!(encoded, vec![method.tag()]);
            assert!(decode_data(&encoded).unwrap().is_empty());
        }
    }

    #[test]
    fn test_large_data() {
        let original = vec![42u8; 10000];
        let encoded = encode_data(&original, Method::A).unwrap();
        // 39 runs of 255 and one of 55
        assert_eq!(encoded.len(), 1 + 2 * 40);

        let decoded = decode_data(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_alternating_literals_b() {
        // Different neighbouring literals must never be read as a run marker
        let original: Vec<u8> = (0..500u32).map(|i| (i % 2) as u8 + 1).collect();
        let encoded = encode_data(&original, Method::B).unwrap();
        assert_eq!(encoded.len(), original.len() + 1);
        assert_eq!(decode_data(&encoded).unwrap(), original);
    }

    #[test]
    fn test_validation() {
        let encoded = encode_data(b"Test data for validation", Method::B).unwrap();
        assert!(validate_data(&encoded).unwrap());

        let mut truncated = encode_data(b"zzzz", Method::B).unwrap();
        truncated.pop();
        assert!(matches!(
            validate_data(&truncated),
            Err(RleError::TruncatedStream { method: Some(Method::B), .. })
        ));
    }

    #[test]
    fn test_encoding_info() {
        let data = vec![1u8; 1000];
        let encoded = encode_data(&data, Method::B).unwrap();

        let info = get_encoding_info(&encoded).unwrap();
        assert_eq!(info.method, Method::B);
        assert_eq!(info.original_size, 1000);
        assert_eq!(info.compressed_size, encoded.len() as u64);
        assert!(info.compression_ratio > 1.0);
    }

    #[test]
    fn test_auto_encoding() {
        let data = b"aab".repeat(100);
        let (encoded, method, stats) = encode_auto(&data).unwrap();
        assert_eq!(stats.method, method);
        assert_eq!(stats.compressed_size, encoded.len() as u64);
        assert_eq!(decode_data(&encoded).unwrap(), data);
    }

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert!(!info.version.is_empty());
        assert!(!info.description.is_empty());
    }
}
