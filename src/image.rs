//! Keystream XOR over byte payloads and BMP images.
//!
//! The payload is consumed in 8-byte big-endian blocks, one keystream word
//! per block. A trailing short block is combined with the high-order bytes
//! of its word. Applying the same operation twice with the same key and IV
//! restores the input.

use log::debug;

use crate::bit_word::BitWord;
use crate::error::MugiError;
use crate::generator::Generator;
use crate::utils::converter::{xor_block, BLOCK_BYTES};

/// Length of the BMP header copied verbatim.
pub const BMP_HEADER_LEN: usize = 54;

/// XORs consecutive keystream words from `generator` into `payload`.
///
/// Consumes `ceil(payload.len() / 8)` words.
pub fn apply_keystream(generator: &mut Generator, payload: &mut [u8]) {
    for block in payload.chunks_mut(BLOCK_BYTES) {
        xor_block(block, generator.next_u64());
    }
}

/// Encrypts or decrypts `payload` with a fresh generator keyed by
/// `key` and `iv`.
///
/// # Examples
///
/// ```
/// use mugi::image::xor_cipher;
/// use mugi::BitWord;
///
/// let key = BitWord::from(0x1234u128);
/// let iv = BitWord::from(0x5678u128);
/// let sealed = xor_cipher(b"attack at dawn", &key, &iv);
/// assert_ne!(&sealed[..], b"attack at dawn");
/// assert_eq!(xor_cipher(&sealed, &key, &iv), b"attack at dawn");
/// ```
pub fn xor_cipher(payload: &[u8], key: &BitWord, iv: &BitWord) -> Vec<u8> {
    let mut out = payload.to_vec();
    apply_keystream(&mut Generator::new(key, iv), &mut out);
    out
}

/// Encrypts or decrypts a BMP image held in memory.
///
/// The first [`BMP_HEADER_LEN`] bytes are copied unchanged and the rest
/// is passed through [`xor_cipher`].
///
/// # Errors
/// Returns [`MugiError::TruncatedImage`] if `image` is shorter than the
/// header.
pub fn process_bmp(image: &[u8], key: &BitWord, iv: &BitWord) -> Result<Vec<u8>, MugiError> {
    if image.len() < BMP_HEADER_LEN {
        return Err(MugiError::TruncatedImage { len: image.len() });
    }
    let mut out = image.to_vec();
    let payload = &mut out[BMP_HEADER_LEN..];
    debug!(
        "Processing BMP payload: {} bytes in {} blocks",
        payload.len(),
        payload.len().div_ceil(BLOCK_BYTES)
    );
    apply_keystream(&mut Generator::new(key, iv), payload);
    Ok(out)
}
