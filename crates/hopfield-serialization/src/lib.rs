// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Hopfield Network Serialization
//!
//! Persists a network as two array payloads in a fixed order: the N×N `f64`
//! weight matrix, then the N×p `i8` pattern set. Loading recomputes N from
//! the weight matrix and p from the pattern columns; the neuron state comes
//! back all -1 and time comes back 0.
//!
//! ## Usage
//! ```no_run
//! use hopfield_engine::HopfieldNetwork;
//! use hopfield_serialization::{load_network, save_network};
//!
//! let network = HopfieldNetwork::new(100)?;
//! save_network(&network, "memory.hopfield", true)?;
//! let restored = load_network("memory.hopfield")?;
//! assert_eq!(restored.neuron_count(), 100);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use hopfield_engine::{EngineError, HopfieldNetwork};
use thiserror::Error;
use tracing::info;

mod snapshot;

pub use snapshot::NetworkSnapshot;

/// Network I/O errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid magic number: expected HOPFN, got {0:?}")]
    InvalidMagic([u8; 5]),

    #[error("Checksum mismatch: file may be corrupted")]
    ChecksumMismatch,

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Stored network is inconsistent: {0}")]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Magic number for network files: "HOPFN"
const MAGIC: &[u8; 5] = b"HOPFN";

/// Flag bit 0: payload is LZ4 compressed
const FLAG_COMPRESSED: u8 = 1;

/// Header size: magic + flags + uncompressed size + checksum
const HEADER_LEN: usize = 5 + 1 + 8 + 8;

/// Encode a snapshot into the binary file format
///
/// # Format
/// ```text
/// [Header]
/// - Magic: "HOPFN" (5 bytes)
/// - Flags: u8 (1 byte) - bit 0: compressed
/// - Uncompressed Size: u64 (8 bytes, LE, size before compression)
/// - Checksum: u64 (8 bytes, LE, FNV-1a of the payload bytes)
/// [Data]
/// - Bincode-serialized NetworkSnapshot (weights, then patterns),
///   optionally LZ4 compressed
/// ```
pub fn encode_snapshot(snapshot: &NetworkSnapshot, compress: bool) -> Result<Vec<u8>> {
    let data =
        bincode::serialize(snapshot).map_err(|e| PersistenceError::Serialization(e.to_string()))?;
    let uncompressed_size = data.len() as u64;
    let (payload, flags) = compress_payload(data, compress)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.push(flags);
    bytes.extend_from_slice(&uncompressed_size.to_le_bytes());
    bytes.extend_from_slice(&calculate_checksum(&payload).to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode a snapshot from bytes produced by [`encode_snapshot`]
pub fn decode_snapshot(bytes: &[u8]) -> Result<NetworkSnapshot> {
    if bytes.len() < MAGIC.len() {
        return Err(PersistenceError::Deserialization(format!(
            "file too short: {} bytes",
            bytes.len()
        )));
    }
    let mut magic = [0u8; 5];
    magic.copy_from_slice(&bytes[..5]);
    if &magic != MAGIC {
        return Err(PersistenceError::InvalidMagic(magic));
    }
    if bytes.len() < HEADER_LEN {
        return Err(PersistenceError::Deserialization(format!(
            "truncated header: {} bytes",
            bytes.len()
        )));
    }

    let flags = bytes[5];
    let uncompressed_size = read_u64(&bytes[6..14]) as usize;
    let expected_checksum = read_u64(&bytes[14..22]);
    let payload = &bytes[HEADER_LEN..];

    if calculate_checksum(payload) != expected_checksum {
        return Err(PersistenceError::ChecksumMismatch);
    }

    let data = decompress_payload(payload, flags, uncompressed_size)?;
    bincode::deserialize(&data).map_err(|e| PersistenceError::Deserialization(e.to_string()))
}

/// Save a network's weights and patterns to `path`
///
/// `compress` requests LZ4 compression; without the `compression` feature
/// the payload is written uncompressed.
pub fn save_network<P: AsRef<Path>>(
    network: &HopfieldNetwork,
    path: P,
    compress: bool,
) -> Result<()> {
    let snapshot = NetworkSnapshot::capture(network);
    let bytes = encode_snapshot(&snapshot, compress)?;

    let mut file = File::create(path.as_ref())?;
    file.write_all(&bytes)?;

    info!(
        path = %path.as_ref().display(),
        neuron_count = snapshot.neuron_count(),
        pattern_count = snapshot.pattern_count(),
        bytes = bytes.len(),
        "Saved Hopfield network"
    );
    Ok(())
}

/// Load a network from `path`; state is all -1 and time is 0
pub fn load_network<P: AsRef<Path>>(path: P) -> Result<HopfieldNetwork> {
    let mut file = File::open(path.as_ref())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let snapshot = decode_snapshot(&bytes)?;
    let network = snapshot.restore()?;

    info!(
        path = %path.as_ref().display(),
        neuron_count = network.neuron_count(),
        pattern_count = network.pattern_count(),
        "Loaded Hopfield network"
    );
    Ok(network)
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

#[cfg(feature = "compression")]
fn compress_payload(data: Vec<u8>, compress: bool) -> Result<(Vec<u8>, u8)> {
    if !compress {
        return Ok((data, 0));
    }
    let compressed = lz4::block::compress(&data, None, false)
        .map_err(|e| PersistenceError::Compression(e.to_string()))?;
    tracing::debug!(
        original = data.len(),
        compressed = compressed.len(),
        "Compressed network payload"
    );
    Ok((compressed, FLAG_COMPRESSED))
}

#[cfg(not(feature = "compression"))]
fn compress_payload(data: Vec<u8>, compress: bool) -> Result<(Vec<u8>, u8)> {
    if compress {
        tracing::warn!("Compression requested but the compression feature is disabled; writing raw payload");
    }
    Ok((data, 0))
}

fn decompress_payload(payload: &[u8], flags: u8, uncompressed_size: usize) -> Result<Vec<u8>> {
    if flags & FLAG_COMPRESSED == 0 {
        return Ok(payload.to_vec());
    }

    #[cfg(feature = "compression")]
    {
        let size = i32::try_from(uncompressed_size).map_err(|_| {
            PersistenceError::Compression(format!(
                "uncompressed size {} exceeds LZ4 block limit",
                uncompressed_size
            ))
        })?;
        lz4::block::decompress(payload, Some(size))
            .map_err(|e| PersistenceError::Compression(format!("Decompression failed: {}", e)))
    }
    #[cfg(not(feature = "compression"))]
    {
        tracing::warn!(uncompressed_size, "Compressed network file without compression support");
        Err(PersistenceError::Compression(
            "File is compressed but compression feature is not enabled".to_string(),
        ))
    }
}

/// FNV-1a hash of the payload
fn calculate_checksum(data: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 14695981039346656037;
    const FNV_PRIME: u64 = 1099511628211;

    let mut hash = FNV_OFFSET;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopfield_engine::patterns::random_patterns;
    use hopfield_engine::rng::seeded_rng;
    use hopfield_engine::UpdateMode;
    use tempfile::NamedTempFile;

    fn trained_network() -> HopfieldNetwork {
        let mut rng = seeded_rng(Some(3));
        let mut network = HopfieldNetwork::new(25).unwrap();
        network
            .train_batch(random_patterns(25, 3, &mut rng).view())
            .unwrap();
        network
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut rng = seeded_rng(Some(4));
        let mut network = trained_network();
        network.update(3, UpdateMode::Asynchronous, false, &mut rng);

        let temp_file = NamedTempFile::new().unwrap();
        save_network(&network, temp_file.path(), true).unwrap();
        let loaded = load_network(temp_file.path()).unwrap();

        assert_eq!(loaded.weights(), network.weights());
        assert_eq!(loaded.patterns(), network.patterns());
        assert_eq!(loaded.time(), 0);
        assert!(loaded.state().iter().all(|&s| s == -1));
    }

    #[test]
    fn test_uncompressed_roundtrip() {
        let network = trained_network();
        let bytes = encode_snapshot(&NetworkSnapshot::capture(&network), false).unwrap();
        assert_eq!(bytes[5], 0);

        let restored = decode_snapshot(&bytes).unwrap().restore().unwrap();
        assert_eq!(restored.pattern_matrix(), network.pattern_matrix());
    }

    #[test]
    fn test_invalid_magic() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut file = File::create(temp_file.path()).unwrap();
        file.write_all(b"WRONG").unwrap();

        let result = load_network(temp_file.path());
        assert!(matches!(result, Err(PersistenceError::InvalidMagic(_))));
    }

    #[test]
    fn test_corrupted_payload_detected() {
        let network = trained_network();
        let mut bytes = encode_snapshot(&NetworkSnapshot::capture(&network), false).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;

        assert!(matches!(
            decode_snapshot(&bytes),
            Err(PersistenceError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            decode_snapshot(b"HOPFN\x00"),
            Err(PersistenceError::Deserialization(_))
        ));
    }

    #[test]
    fn test_checksum() {
        let data1 = b"hello world";
        let data2 = b"hello world";
        let data3 = b"hello worlD";

        assert_eq!(calculate_checksum(data1), calculate_checksum(data2));
        assert_ne!(calculate_checksum(data1), calculate_checksum(data3));
    }
}
