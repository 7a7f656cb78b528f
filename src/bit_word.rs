//! BitWord: immutable fixed-width binary value.
//!
//! A `BitWord` pairs an unsigned magnitude with a bit width and keeps the
//! value reduced modulo `2^width` after every construction and operation.
//! Overflow is never an error: excess high bits are silently discarded.
//!
//! Binary operations between words of different widths always produce a
//! word of the left operand's width, truncating the right operand's
//! excess high bits.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::MugiError;

/// Immutable fixed-width binary word with modular arithmetic.
///
/// Words are totally ordered by `(width, value)`: a narrower word always
/// compares less than a wider one, regardless of magnitude.
///
/// # Examples
///
/// ```
/// use mugi::BitWord;
///
/// let hi = BitWord::from_integer(0xABu32, 8).unwrap();
/// let lo = BitWord::from_integer(0xCDu32, 8).unwrap();
/// let word = hi.concat(&lo);
/// assert_eq!(word.width(), 16);
/// assert_eq!(word.to_hex(), "abcd");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitWord {
    // Field order drives the derived ordering: width first, then value.
    width: usize,
    value: BigUint,
}

/// Returns `2^width - 1`.
fn mask(width: usize) -> BigUint {
    (BigUint::one() << width) - 1u32
}

/// Reduces `value` modulo `2^width`.
fn reduce(value: BigUint, width: usize) -> BigUint {
    if value.bits() <= width as u64 {
        value
    } else {
        value & mask(width)
    }
}

impl BitWord {
    /// Builds a word from an integer, reducing it modulo `2^width`.
    ///
    /// # Parameters
    /// - `value`: Any unsigned integer convertible to a [`BigUint`].
    /// - `width`: Bit width of the word (at least 1).
    ///
    /// # Errors
    /// Returns [`MugiError::Construction`] if `width` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use mugi::BitWord;
    ///
    /// let word = BitWord::from_integer(0x1FFu32, 8).unwrap();
    /// assert_eq!(word.to_u64(), Some(0xFF));
    /// assert!(BitWord::from_integer(1u8, 0).is_err());
    /// ```
    pub fn from_integer<T: Into<BigUint>>(value: T, width: usize) -> Result<Self, MugiError> {
        if width == 0 {
            return Err(MugiError::Construction(
                "width must be at least 1".to_string(),
            ));
        }
        Ok(BitWord {
            width,
            value: reduce(value.into(), width),
        })
    }

    /// Reinterprets another word at a new width.
    ///
    /// Widening zero-extends; narrowing keeps the low-order bits.
    ///
    /// # Errors
    /// Returns [`MugiError::Construction`] if `width` is zero.
    pub fn from_word(other: &BitWord, width: usize) -> Result<Self, MugiError> {
        Self::from_integer(other.value.clone(), width)
    }

    /// Concatenates an ordered sequence of parts, most significant first.
    ///
    /// The resulting width is the sum of the part widths. Anything
    /// convertible into a `BitWord` is accepted, so a byte slice iterator
    /// yields a word of `8 * len` bits.
    ///
    /// # Errors
    /// Returns [`MugiError::Construction`] if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use mugi::BitWord;
    ///
    /// let word = BitWord::from_sequence([0x01u8, 0x02, 0x03]).unwrap();
    /// assert_eq!(word.width(), 24);
    /// assert_eq!(word.to_u64(), Some(0x010203));
    /// ```
    pub fn from_sequence<I, T>(parts: I) -> Result<Self, MugiError>
    where
        I: IntoIterator<Item = T>,
        T: Into<BitWord>,
    {
        parts
            .into_iter()
            .map(Into::into)
            .reduce(|acc, part| acc.concat(&part))
            .ok_or_else(|| MugiError::Construction("empty word sequence".to_string()))
    }

    /// Builds a word from big-endian bytes; width is `8 * bytes.len()`.
    ///
    /// # Errors
    /// Returns [`MugiError::Construction`] if `bytes` is empty.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MugiError> {
        Self::from_sequence(bytes.iter().copied())
    }

    /// Parses a textual integer literal into a word of the given width.
    ///
    /// Accepts `0x`/`0X` hexadecimal, `0b`/`0B` binary, or plain decimal,
    /// with surrounding whitespace ignored. Underscores may separate digits
    /// but may not lead the digit run. Signs are rejected. Values wider than
    /// `width` are truncated.
    ///
    /// # Errors
    /// Returns [`MugiError::Construction`] if the literal is not a valid
    /// unsigned integer or `width` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use mugi::BitWord;
    ///
    /// let key = BitWord::parse("0x000102030405060708090a0b0c0d0e0f", 128).unwrap();
    /// assert_eq!(key.to_u128(), Some(0x000102030405060708090a0b0c0d0e0f));
    /// assert!(BitWord::parse("0xZZ", 128).is_err());
    /// assert!(BitWord::parse("+5", 8).is_err());
    /// ```
    pub fn parse(literal: &str, width: usize) -> Result<Self, MugiError> {
        let trimmed = literal.trim();
        let (digits, radix) = if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            (hex, 16)
        } else if let Some(bin) = trimmed
            .strip_prefix("0b")
            .or_else(|| trimmed.strip_prefix("0B"))
        {
            (bin, 2)
        } else {
            (trimmed, 10)
        };
        let invalid = || MugiError::Construction(format!("invalid integer literal '{}'", literal));
        let leads_with_digit = digits.chars().next().is_some_and(|c| c.is_digit(radix));
        if !leads_with_digit || !digits.chars().all(|c| c == '_' || c.is_digit(radix)) {
            return Err(invalid());
        }
        let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
        let value = BigUint::parse_bytes(cleaned.as_bytes(), radix).ok_or_else(invalid)?;
        Self::from_integer(value, width)
    }

    /// Returns the bit width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the unsigned magnitude.
    pub fn to_integer(&self) -> &BigUint {
        &self.value
    }

    /// Returns the value as `u64`, or `None` if it does not fit.
    pub fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    /// Returns the value as `u128`, or `None` if it does not fit.
    pub fn to_u128(&self) -> Option<u128> {
        self.value.to_u128()
    }

    /// Returns the low 128 bits of the value.
    pub(crate) fn low_u128(&self) -> u128 {
        let mut digits = self.value.iter_u64_digits();
        let lo = digits.next().unwrap_or(0) as u128;
        let hi = digits.next().unwrap_or(0) as u128;
        (hi << 64) | lo
    }

    /// Appends `other` to the right of `self`.
    ///
    /// The result is `self.width + other.width` bits wide.
    pub fn concat(&self, other: &BitWord) -> BitWord {
        BitWord {
            width: self.width + other.width,
            value: (&self.value << other.width) | &other.value,
        }
    }

    /// Bitwise XOR, keeping the width of `self`.
    pub fn xor(&self, other: &BitWord) -> BitWord {
        self.with_value(&self.value ^ &other.value)
    }

    /// Bitwise OR, keeping the width of `self`.
    pub fn or(&self, other: &BitWord) -> BitWord {
        self.with_value(&self.value | &other.value)
    }

    /// Bitwise AND, keeping the width of `self`.
    pub fn and(&self, other: &BitWord) -> BitWord {
        self.with_value(&self.value & &other.value)
    }

    /// Shifts left by `n` bits; bits pushed past the width are discarded.
    pub fn shift_left(&self, n: usize) -> BitWord {
        if n >= self.width {
            return self.with_value(BigUint::zero());
        }
        self.with_value(&self.value << n)
    }

    /// Shifts right by `n` bits.
    pub fn shift_right(&self, n: usize) -> BitWord {
        self.with_value(&self.value >> n)
    }

    /// Rotates left by `n` bits, with `n` taken modulo the width.
    ///
    /// # Examples
    ///
    /// ```
    /// use mugi::BitWord;
    ///
    /// let word = BitWord::from_integer(0b1000_0001u8, 8).unwrap();
    /// assert_eq!(word.rotate_left(1).to_u64(), Some(0b0000_0011));
    /// assert_eq!(word.rotate_left(9), word.rotate_left(1));
    /// ```
    pub fn rotate_left(&self, n: usize) -> BitWord {
        let r = n % self.width;
        if r == 0 {
            return self.clone();
        }
        self.shift_left(r).or(&self.shift_right(self.width - r))
    }

    /// Rotates right by `n` bits, with `n` taken modulo the width.
    pub fn rotate_right(&self, n: usize) -> BitWord {
        let r = n % self.width;
        if r == 0 {
            return self.clone();
        }
        self.shift_right(r).or(&self.shift_left(self.width - r))
    }

    /// Splits the word into `k` equal parts, most significant first.
    ///
    /// # Errors
    /// Returns [`MugiError::Partition`] if `k` is zero or does not divide
    /// the width.
    ///
    /// # Examples
    ///
    /// ```
    /// use mugi::BitWord;
    ///
    /// let word = BitWord::from_integer(0xA1B2u32, 16).unwrap();
    /// let bytes = word.partition(2).unwrap();
    /// assert_eq!(bytes[0].to_u64(), Some(0xA1));
    /// assert_eq!(bytes[1].to_u64(), Some(0xB2));
    /// assert!(word.partition(3).is_err());
    /// ```
    pub fn partition(&self, k: usize) -> Result<Vec<BitWord>, MugiError> {
        if k == 0 || !self.width.is_multiple_of(k) {
            return Err(MugiError::Partition {
                width: self.width,
                parts: k,
            });
        }
        let part_width = self.width / k;
        let part_mask = mask(part_width);
        Ok((0..k)
            .rev()
            .map(|i| BitWord {
                width: part_width,
                value: (&self.value >> (part_width * i)) & &part_mask,
            })
            .collect())
    }

    /// Returns the binary digits, zero-padded to the width.
    pub fn to_binary_string(&self) -> String {
        format!("{:0>w$}", self.value.to_str_radix(2), w = self.width)
    }

    /// Returns the lowercase hex digits, zero-padded to `ceil(width / 4)`.
    pub fn to_hex(&self) -> String {
        format!(
            "{:0>w$}",
            self.value.to_str_radix(16),
            w = self.width.div_ceil(4)
        )
    }

    /// Builds a word of the same width from an unreduced value.
    fn with_value(&self, value: BigUint) -> BitWord {
        BitWord {
            width: self.width,
            value: reduce(value, self.width),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty => $width:expr),* $(,)?) => {
        $(
            impl From<$t> for BitWord {
                fn from(value: $t) -> Self {
                    BitWord {
                        width: $width,
                        value: BigUint::from(value),
                    }
                }
            }
        )*
    };
}

impl_from_primitive!(u8 => 8, u16 => 16, u32 => 32, u64 => 64, u128 => 128);

impl From<&BitWord> for BitWord {
    fn from(word: &BitWord) -> Self {
        word.clone()
    }
}

impl fmt::Debug for BitWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitWord({}; 0x{})", self.width, self.to_hex())
    }
}

impl fmt::Display for BitWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b{}", self.to_binary_string())
    }
}

impl fmt::LowerHex for BitWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.to_hex())
    }
}
