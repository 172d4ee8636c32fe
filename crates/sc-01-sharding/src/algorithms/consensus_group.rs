//! # Consensus Group Selection
//!
//! Index-hashed selection: member `i` of the group is the eligible validator
//! at `H(be_u64(i) || seed) mod len`, probing forward on collisions. The
//! seed is `be_u64(round) || randomness`, so every round draws a fresh group
//! from the same eligible list.

use shared_crypto::Hasher;

/// Builds the selection seed for a round.
pub fn selection_seed(round: u64, randomness: &[u8]) -> Vec<u8> {
    let mut seed = Vec::with_capacity(8 + randomness.len());
    seed.extend_from_slice(&round.to_be_bytes());
    seed.extend_from_slice(randomness);
    seed
}

/// `H(be_u64(index) || seed)` reduced modulo `len`.
pub fn compute_list_index(hasher: &dyn Hasher, index: u64, seed: &[u8], len: usize) -> usize {
    let mut input = Vec::with_capacity(8 + seed.len());
    input.extend_from_slice(&index.to_be_bytes());
    input.extend_from_slice(seed);
    let digest = hasher.compute(&input);

    let modulus = len as u128;
    let reduced = digest
        .iter()
        .fold(0u128, |acc, b| ((acc << 8) | u128::from(*b)) % modulus);
    reduced as usize
}

/// Distinct positions for a group of `size` out of `len`, leader first.
///
/// Callers guarantee `0 < size <= len`.
pub fn select_indexes(hasher: &dyn Hasher, seed: &[u8], size: usize, len: usize) -> Vec<usize> {
    let mut taken = vec![false; len];
    let mut selected = Vec::with_capacity(size);
    for i in 0..size {
        let mut idx = compute_list_index(hasher, i as u64, seed, len);
        while taken[idx] {
            idx = (idx + 1) % len;
        }
        taken[idx] = true;
        selected.push(idx);
    }
    selected
}
