//! FNV-1a digests of state bitsets.
//!
//! Not collision free: two distinct states with the same digest are
//! treated as one by the visited set.

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Feed a u64 (as 8 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Digest of a state bitset, word by word in order.
///
/// Returns the offset basis for an empty slice.
pub fn state_digest(words: &[u64]) -> u64 {
    words.iter().fold(FNV_OFFSET, |h, &w| fnv1a_u64(h, w))
}
