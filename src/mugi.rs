//! MUGI: 64-bit word-oriented keystream generator (specification v1.2).
//!
//! The internal state is split into two register files:
//!
//! ```text
//! AState  a[0..3]   nonlinear accumulator, updated by rho (F-function + constants)
//! BState  b[0..16]  linear feedback buffer, updated by lambda (shift + 3 taps)
//! ```
//!
//! `rho` reads the buffer and `lambda` reads the accumulator; both are
//! evaluated against the same pre-update state. One keystream word is `a2`
//! sampled before each update.

use log::trace;

/// Key length in bits.
pub const KEY_BITS: usize = 128;

/// Initialization vector length in bits.
pub const IV_BITS: usize = 128;

/// Keystream word length in bits.
pub const WORD_BITS: usize = 64;

/// Number of words in the accumulator.
pub const STATE_WORDS: usize = 3;

/// Number of words in the feedback buffer.
pub const BUFFER_WORDS: usize = 16;

/// Rounds in each of the three setup phases (key, IV, mixing).
const SETUP_ROUNDS: usize = 16;

/// Fractional parts of sqrt(2), sqrt(3), sqrt(5).
const C: [u64; 3] = [
    0x6A09_E667_F3BC_C908,
    0xBB67_AE85_84CA_A73B,
    0x3C6E_F372_FE94_F82B,
];

/// AES S-box.
static SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

/// Multiplies by `x` in GF(2^8) modulo `x^8 + x^4 + x^3 + x + 1`.
const fn xtime(v: u8) -> u8 {
    (v << 1) ^ if v & 0x80 != 0 { 0x1b } else { 0 }
}

/// AES MixColumns matrix applied to one 4-byte column.
fn mix_column(p: [u8; 4]) -> [u8; 4] {
    let d = [xtime(p[0]), xtime(p[1]), xtime(p[2]), xtime(p[3])];
    [
        d[0] ^ d[1] ^ p[1] ^ p[2] ^ p[3],
        p[0] ^ d[1] ^ d[2] ^ p[2] ^ p[3],
        p[0] ^ p[1] ^ d[2] ^ d[3] ^ p[3],
        d[0] ^ p[0] ^ p[1] ^ p[2] ^ d[3],
    ]
}

/// MUGI F-function: key addition, byte substitution, two MDS columns and
/// a fixed byte shuffle.
///
/// Bytes are numbered from the most significant (`O0`) down. The output
/// is `Q4 Q5 Q2 Q3 Q0 Q1 Q6 Q7`.
pub(crate) fn f(x: u64, key: u64) -> u64 {
    let o = (x ^ key).to_be_bytes();
    let p = o.map(|byte| SBOX[byte as usize]);
    let hi = mix_column([p[0], p[1], p[2], p[3]]);
    let lo = mix_column([p[4], p[5], p[6], p[7]]);
    u64::from_be_bytes([lo[0], lo[1], hi[2], hi[3], hi[0], hi[1], lo[2], lo[3]])
}

/// Nonlinear accumulator `(a0, a1, a2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AState([u64; STATE_WORDS]);

impl AState {
    /// Builds an accumulator from its three words.
    pub fn new(words: [u64; STATE_WORDS]) -> Self {
        AState(words)
    }

    /// Spreads a 128-bit value over the accumulator.
    ///
    /// `(hi, lo, (hi <<< 7) ^ (lo >>> 7) ^ C0)`; used for both key loading
    /// and IV injection.
    fn expand(value: u128) -> Self {
        let hi = (value >> 64) as u64;
        let lo = value as u64;
        AState([hi, lo, hi.rotate_left(7) ^ lo.rotate_right(7) ^ C[0]])
    }

    /// Returns the three words.
    pub fn words(&self) -> &[u64; STATE_WORDS] {
        &self.0
    }

    /// Applies the rho transition using the buffer taps `b4` and `b10`.
    ///
    /// ```text
    /// a0' = a1
    /// a1' = a2 ^ F(a1, b4) ^ C1
    /// a2' = a0 ^ F(a1, b10 <<< 17) ^ C2
    /// ```
    pub fn rho(&self, b: &BState) -> AState {
        let [a0, a1, a2] = self.0;
        AState([
            a1,
            a2 ^ f(a1, b.0[4]) ^ C[1],
            a0 ^ f(a1, b.0[10].rotate_left(17)) ^ C[2],
        ])
    }

    fn xor(&self, other: &AState) -> AState {
        let [x0, x1, x2] = self.0;
        let [y0, y1, y2] = other.0;
        AState([x0 ^ y0, x1 ^ y1, x2 ^ y2])
    }
}

/// Linear feedback buffer `b[0..16]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BState([u64; BUFFER_WORDS]);

impl BState {
    /// The all-zero buffer used while only the accumulator is being keyed.
    pub const ZERO: BState = BState([0; BUFFER_WORDS]);

    /// Builds a buffer from its sixteen words.
    pub fn new(words: [u64; BUFFER_WORDS]) -> Self {
        BState(words)
    }

    /// Returns the sixteen words.
    pub fn words(&self) -> &[u64; BUFFER_WORDS] {
        &self.0
    }

    /// Applies the lambda transition, feeding back `a0`.
    ///
    /// Every slot shifts up by one; slots 0, 4 and 10 receive feedback:
    ///
    /// ```text
    /// b0'  = b15 ^ a0
    /// b4'  = b3  ^ b7
    /// b10' = b9  ^ (b13 <<< 32)
    /// ```
    pub fn lambda(&self, a: &AState) -> BState {
        let b = &self.0;
        let mut next = [0u64; BUFFER_WORDS];
        next[1..].copy_from_slice(&b[..BUFFER_WORDS - 1]);
        next[0] = b[15] ^ a.0[0];
        next[4] = b[3] ^ b[7];
        next[10] = b[9] ^ b[13].rotate_left(32);
        BState(next)
    }
}

/// Complete MUGI internal state.
///
/// Built only through [`setup`](Self::setup), so an unkeyed state cannot
/// exist. After setup the state is mutated exclusively by
/// [`update`](Self::update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MugiState {
    a: AState,
    b: BState,
    steps: u64,
}

impl MugiState {
    /// Derives the initial state from a 128-bit key and a 128-bit IV.
    ///
    /// 1. Load the key into `a`; run rho 16 times against a zero buffer,
    ///    storing `a0` after round `i` into `b[15 - i]`.
    /// 2. XOR the expanded IV into `a`; run rho 16 more times against a
    ///    zero buffer.
    /// 3. Run the full update 16 times.
    ///
    /// Both `key` and `iv` are read big-endian: the high 64 bits are the
    /// first word.
    ///
    /// # Examples
    ///
    /// ```
    /// use mugi::MugiState;
    ///
    /// let state = MugiState::setup(0, 0);
    /// assert_eq!(state.output(), 0xc76e14e70836e6b6);
    /// assert_eq!(state.steps(), 0);
    /// ```
    pub fn setup(key: u128, iv: u128) -> Self {
        let mut a = AState::expand(key);
        let mut b = BState::ZERO;
        for i in 0..SETUP_ROUNDS {
            a = a.rho(&BState::ZERO);
            b.0[BUFFER_WORDS - 1 - i] = a.0[0];
        }

        a = a.xor(&AState::expand(iv));
        for _ in 0..SETUP_ROUNDS {
            a = a.rho(&BState::ZERO);
        }

        let mut state = MugiState { a, b, steps: 0 };
        for _ in 0..SETUP_ROUNDS {
            state.update();
        }
        state.steps = 0;
        trace!(
            "MUGI setup complete after {} rounds",
            3 * SETUP_ROUNDS
        );
        state
    }

    /// Advances the state by one step without producing output.
    pub fn update(&mut self) {
        let a = self.a.rho(&self.b);
        self.b = self.b.lambda(&self.a);
        self.a = a;
        self.steps = self.steps.wrapping_add(1);
    }

    /// Returns the keystream word for the current step (`a2`).
    pub fn output(&self) -> u64 {
        self.a.0[2]
    }

    /// Samples the output word and advances the state by one step.
    pub fn next_u64(&mut self) -> u64 {
        let word = self.output();
        self.update();
        word
    }

    /// Value-semantics form of [`next_u64`](Self::next_u64): consumes the
    /// state and returns its successor along with the produced word.
    ///
    /// # Examples
    ///
    /// ```
    /// use mugi::MugiState;
    ///
    /// let (state, first) = MugiState::setup(0, 0).advance();
    /// let (_, second) = state.advance();
    /// assert_eq!(first, 0xc76e14e70836e6b6);
    /// assert_eq!(second, 0xcb0e9c5a0bf03e1e);
    /// ```
    pub fn advance(mut self) -> (Self, u64) {
        let word = self.next_u64();
        (self, word)
    }

    /// Returns the accumulator.
    pub fn a(&self) -> &AState {
        &self.a
    }

    /// Returns the feedback buffer.
    pub fn b(&self) -> &BState {
        &self.b
    }

    /// Returns the number of updates applied since setup finished.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sbox_known_entries() {
        assert_eq!(SBOX[0x00], 0x63);
        assert_eq!(SBOX[0x01], 0x7c);
        assert_eq!(SBOX[0x53], 0xed);
        assert_eq!(SBOX[0xff], 0x16);
    }

    #[test]
    fn test_sbox_is_permutation() {
        let mut seen = [false; 256];
        for &v in SBOX.iter() {
            assert!(!seen[v as usize], "duplicate S-box output {:#04x}", v);
            seen[v as usize] = true;
        }
    }

    #[test]
    fn test_mix_column_aes_vector() {
        assert_eq!(mix_column([0xdb, 0x13, 0x53, 0x45]), [0x8e, 0x4d, 0xa1, 0xbc]);
        assert_eq!(mix_column([0x01, 0x01, 0x01, 0x01]), [0x01, 0x01, 0x01, 0x01]);
    }

    #[test]
    fn test_f_uniform_inputs() {
        assert_eq!(f(0, 0), 0x6363_6363_6363_6363);
        assert_eq!(f(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210), 0x1616_1616_1616_1616);
    }

    #[test]
    fn test_f_byte_shuffle() {
        assert_eq!(f(0x0123_4567_89ab_cdef, 0), 0x9160_12dd_7907_de88);
    }

    #[test]
    fn test_rho_on_zero_key() {
        let a = AState::new([0, 0, C[0]]).rho(&BState::ZERO);
        assert_eq!(
            a.words(),
            &[0, 0xb20d_2b81_1415_0d50, 0x5f0d_9011_9df7_9b48]
        );
    }

    #[test]
    fn test_lambda_taps() {
        let mut words = [0u64; BUFFER_WORDS];
        for (i, w) in words.iter_mut().enumerate() {
            *w = i as u64;
        }
        let b = BState::new(words).lambda(&AState::new([1, 2, 3]));
        assert_eq!(
            b.words(),
            &[
                0xe,
                0x0,
                0x1,
                0x2,
                0x4,
                0x4,
                0x5,
                0x6,
                0x7,
                0x8,
                0xd_0000_0009,
                0xa,
                0xb,
                0xc,
                0xd,
                0xe
            ]
        );
    }

    #[test]
    fn test_setup_zero_key_accumulator() {
        let state = MugiState::setup(0, 0);
        assert_eq!(
            state.a().words(),
            &[
                0xd193_6672_ad69_96c4,
                0x8a9d_041e_53a9_1bd6,
                0xc76e_14e7_0836_e6b6
            ]
        );
    }

    #[test]
    fn test_update_counts_steps() {
        let mut state = MugiState::setup(1, 2);
        assert_eq!(state.steps(), 0);
        state.update();
        state.update();
        assert_eq!(state.steps(), 2);
    }

    #[test]
    fn test_output_does_not_advance() {
        let state = MugiState::setup(7, 9);
        let before = state.clone();
        assert_eq!(state.output(), state.output());
        assert_eq!(state, before);
    }

    #[test]
    fn test_advance_matches_next_u64() {
        let mut stepped = MugiState::setup(0xabc, 0xdef);
        let mut threaded = stepped.clone();
        for _ in 0..32 {
            let expected = stepped.next_u64();
            let (next, word) = threaded.advance();
            threaded = next;
            assert_eq!(word, expected);
        }
        assert_eq!(stepped, threaded);
    }

    #[test]
    fn test_zero_key_word_999() {
        let mut state = MugiState::setup(0, 0);
        let mut last = 0;
        for _ in 0..1000 {
            last = state.next_u64();
        }
        assert_eq!(last, 0xf8b3_f0e1_61e8_7067);
    }

    #[test]
    fn test_iv_changes_stream() {
        let mut s1 = MugiState::setup(0, 0);
        let mut s2 = MugiState::setup(0, 1);
        assert_ne!(s1.next_u64(), s2.next_u64());
    }
}
