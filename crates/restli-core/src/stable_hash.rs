use sha2::{Digest, Sha256};

/// Hashes the parts as one length-prefixed stream so `["ab", "c"]` and
/// `["a", "bc"]` never collide.
pub fn sha256_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "stable_hash_test.rs"]
mod tests;
