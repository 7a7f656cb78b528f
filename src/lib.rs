//! MUGI keystream generator.
//!
//! MUGI is a 64-bit word-oriented stream cipher keyed by a 128-bit key and
//! a 128-bit initialization vector. This crate provides the cipher core,
//! the fixed-width binary word type its interface is expressed in, and a
//! payload adapter that XORs the keystream over BMP images.
//!
//! # Architecture
//!
//! ```text
//! BitWord    (immutable fixed-width value, modular bit arithmetic)
//!     ↓ key / IV normalization
//! MugiState  (AState 3 words + BState 16 words, setup / update / output)
//!     ↓ one update per word
//! Generator  (stateful keystream: next_word / get / Iterator)
//!     ↓ 8-byte blocks
//! image      (keystream XOR, BMP header passthrough)
//! ```
//!
//! # Examples
//!
//! Produce keystream words:
//!
//! ```
//! use mugi::Generator;
//!
//! let mut generator = Generator::new(0u128, 0u128);
//! let words = generator.get(2);
//! assert_eq!(words[0].to_u64(), Some(0xc76e14e70836e6b6));
//! assert_eq!(words[1].to_u64(), Some(0xcb0e9c5a0bf03e1e));
//! ```
//!
//! Encrypt and decrypt a byte payload:
//!
//! ```
//! use mugi::image::xor_cipher;
//! use mugi::BitWord;
//!
//! let key = BitWord::parse("0x000102030405060708090a0b0c0d0e0f", 128).unwrap();
//! let iv = BitWord::parse("0xf0e0d0c0b0a090807060504030201000", 128).unwrap();
//!
//! let plain = b"seventeen bytes!!".to_vec();
//! let sealed = xor_cipher(&plain, &key, &iv);
//! assert_ne!(sealed, plain);
//! assert_eq!(xor_cipher(&sealed, &key, &iv), plain);
//! ```

#![deny(clippy::all)]

pub mod bit_word;
pub mod error;
pub mod generator;
pub mod image;
pub mod mugi;
pub(crate) mod utils;

pub use bit_word::BitWord;
pub use error::MugiError;
pub use generator::{Generator, Phase};
pub use mugi::MugiState;
