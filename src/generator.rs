//! Stateful keystream generator wrapping a [`MugiState`].

use log::debug;

use crate::bit_word::BitWord;
use crate::error::MugiError;
use crate::mugi::{MugiState, IV_BITS, KEY_BITS};

/// Lifecycle phase of a [`Generator`].
///
/// Construction runs the full setup, so a generator is never observed
/// uninitialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Keyed, no word produced yet.
    Ready,
    /// At least one word has been produced.
    Streaming,
}

/// MUGI keystream generator.
///
/// Each call to [`next_word`](Self::next_word) or [`next_u64`](Self::next_u64)
/// emits the current output word and advances the internal state exactly
/// once. The sequence is not restartable: clone the generator to snapshot
/// a position, or build a fresh one from the same key and IV.
///
/// A generator is not meant to be shared between threads without external
/// synchronization; give each session its own instance.
///
/// # Examples
///
/// ```
/// use mugi::Generator;
///
/// let mut generator = Generator::new(0u128, 0u128);
/// assert_eq!(generator.next_u64(), 0xc76e14e70836e6b6);
/// assert_eq!(generator.next_u64(), 0xcb0e9c5a0bf03e1e);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    state: MugiState,
}

impl Generator {
    /// Creates a generator keyed with `key` and `iv`.
    ///
    /// Both arguments accept anything convertible to a [`BitWord`]: native
    /// unsigned integers, or pre-built words of any width. Values wider than
    /// 128 bits are reduced modulo `2^128`.
    pub fn new(key: impl Into<BitWord>, iv: impl Into<BitWord>) -> Self {
        let key = normalize(key.into(), KEY_BITS);
        let iv = normalize(iv.into(), IV_BITS);
        debug!("Keying MUGI generator ({}-bit key, {}-bit IV)", KEY_BITS, IV_BITS);
        Generator {
            state: MugiState::setup(key, iv),
        }
    }

    /// Creates a generator from big-endian key and IV bytes.
    ///
    /// # Errors
    /// Returns [`MugiError::Construction`] if either slice is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use mugi::Generator;
    ///
    /// let key: Vec<u8> = (0x00..=0x0f).collect();
    /// let iv: Vec<u8> = (0..16).map(|i| 0xf0 - 0x10 * i).collect();
    /// let mut generator = Generator::from_bytes(&key, &iv).unwrap();
    /// assert_eq!(generator.next_u64(), 0xbc62430614b79b71);
    /// ```
    pub fn from_bytes(key: &[u8], iv: &[u8]) -> Result<Self, MugiError> {
        Ok(Self::new(BitWord::from_bytes(key)?, BitWord::from_bytes(iv)?))
    }

    /// Creates a generator from textual key and IV literals.
    ///
    /// Literals follow [`BitWord::parse`]: `0x` hex, `0b` binary or
    /// decimal.
    ///
    /// # Errors
    /// Returns [`MugiError::Construction`] if either literal is malformed.
    pub fn from_literals(key: &str, iv: &str) -> Result<Self, MugiError> {
        Ok(Self::new(
            BitWord::parse(key, KEY_BITS)?,
            BitWord::parse(iv, IV_BITS)?,
        ))
    }

    /// Resumes a generator from a previously captured state.
    pub fn from_state(state: MugiState) -> Self {
        Generator { state }
    }

    /// Returns the next keystream word as a raw `u64`.
    pub fn next_u64(&mut self) -> u64 {
        self.state.next_u64()
    }

    /// Returns the next keystream word as a 64-bit [`BitWord`].
    pub fn next_word(&mut self) -> BitWord {
        BitWord::from(self.next_u64())
    }

    /// Returns the next `n` keystream words, in order.
    ///
    /// Equivalent to `n` calls of [`next_word`](Self::next_word).
    pub fn get(&mut self, n: usize) -> Vec<BitWord> {
        (0..n).map(|_| self.next_word()).collect()
    }

    /// Fills `out` with consecutive raw keystream words.
    pub fn fill(&mut self, out: &mut [u64]) {
        for slot in out.iter_mut() {
            *slot = self.next_u64();
        }
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.state.steps() == 0 {
            Phase::Ready
        } else {
            Phase::Streaming
        }
    }

    /// Returns the number of words produced so far.
    pub fn position(&self) -> u64 {
        self.state.steps()
    }

    /// Returns the internal state.
    pub fn state(&self) -> &MugiState {
        &self.state
    }

    /// Consumes the generator and returns its internal state.
    pub fn into_state(self) -> MugiState {
        self.state
    }
}

impl Iterator for Generator {
    type Item = BitWord;

    fn next(&mut self) -> Option<BitWord> {
        Some(self.next_word())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Reduces `word` to its low `bits` (at most 128) as a native integer.
fn normalize(word: BitWord, bits: usize) -> u128 {
    debug_assert!(bits <= 128);
    let value = word.low_u128();
    if bits == 128 {
        value
    } else {
        value & ((1u128 << bits) - 1)
    }
}
