//! Content hashing for plugin identity.

use std::fs::File;
use std::io::{BufReader, Read, Result};
use std::path::Path;

use sha2::{Digest, Sha256};

/// Read buffer size used when streaming a module through the hasher.
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 digest of a file's raw bytes.
/// The file is streamed in fixed-size chunks, never read whole.
/// Returns the digest as 64 lowercase hex characters.
pub fn content_hash(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, file);

    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compute the digest of an in-memory buffer.
pub fn content_hash_bytes(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}
