//! Byte-block to keystream-word conversion utilities.
//!
//! Payloads are processed as consecutive 8-byte blocks read big-endian. A
//! trailing block shorter than 8 bytes occupies the high-order end of the
//! word, so it lines up with the first bytes of a full block.

/// Bytes per 64-bit block.
pub const BLOCK_BYTES: usize = 8;

/// Packs up to 8 bytes into a `u64`, first byte most significant.
///
/// Missing trailing bytes are read as zero.
///
/// # Parameters
/// - `block`: At most [`BLOCK_BYTES`] bytes.
pub fn block_to_word(block: &[u8]) -> u64 {
    debug_assert!(block.len() <= BLOCK_BYTES);
    let mut buf = [0u8; BLOCK_BYTES];
    buf[..block.len()].copy_from_slice(block);
    u64::from_be_bytes(buf)
}

/// Writes the high-order `out.len()` bytes of `word` into `out`.
///
/// # Parameters
/// - `word`: Source value.
/// - `out`: At most [`BLOCK_BYTES`] bytes of destination.
pub fn word_to_block(word: u64, out: &mut [u8]) {
    debug_assert!(out.len() <= BLOCK_BYTES);
    let bytes = word.to_be_bytes();
    out.copy_from_slice(&bytes[..out.len()]);
}

/// XORs `keystream` into `block` in place.
///
/// Only the high-order `block.len()` bytes of `keystream` are used.
pub fn xor_block(block: &mut [u8], keystream: u64) {
    let mixed = block_to_word(block) ^ keystream;
    word_to_block(mixed, block);
}
