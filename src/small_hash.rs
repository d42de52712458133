//! A small, seedable, non-cryptographic mixing hash.
//!
//! [`SmallHash`] is a cut-down variant of the xxHash32 round function. It
//! absorbs one 32-bit integer at a time and keeps a single 32-bit
//! accumulator. There is no finalization step: the accumulator after the
//! last [`SmallHash::eat()`] *is* the hash.
//!
//! The constants below are part of the output contract. Any renderer or
//! shader that reproduces these hashes must use the exact same values;
//! changing one of them changes every derived pattern.

/// xxHash32 prime 3, multiplier applied to each absorbed value.
pub const PRIME_C: u32 = 0b1100_0010_1011_0010_1010_1110_0011_1101;
/// xxHash32 prime 4, multiplier applied after the rotation.
pub const PRIME_D: u32 = 0b0010_0111_1101_0100_1110_1011_0010_1111;
/// xxHash32 prime 5, added to the seed to form the initial state.
pub const PRIME_E: u32 = 0b0001_0110_0101_0110_0110_0111_1011_0001;

/// Left rotation applied in every absorb step.
pub const ROTATION: u32 = 17;

/// Seedable hash that folds a stream of `i32`s into a `u32` state.
///
/// `SmallHash` is a plain [`Copy`] value. [`eat()`](Self::eat) consumes the
/// hash and returns the next one, so one seeded instance can serve as a
/// template that many independent cells branch from.
///
/// ## Examples
///
/// ```
/// use hashgrid::SmallHash;
///
/// let template = SmallHash::seed(42);
///
/// let a: u32 = template.eat(3).eat(-7).into();
/// let b: u32 = template.eat(3).eat(-7).into();
///
/// // Same inputs, same hash.
/// assert_eq!(a, b);
/// // The template itself is untouched.
/// assert_eq!(template, SmallHash::seed(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmallHash {
    state: u32,
}

impl SmallHash {
    /// Creates a hash whose initial state is derived from `seed`.
    ///
    /// Total over all `i32`. Negative seeds are reinterpreted as their
    /// two's complement bit pattern.
    #[inline(always)]
    pub const fn seed(seed: i32) -> Self {
        Self {
            state: (seed as u32).wrapping_add(PRIME_E),
        }
    }

    /// Rebuilds a hash from a state previously read with
    /// [`state()`](Self::state).
    #[inline(always)]
    pub const fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Absorbs `data` and returns the resulting hash.
    ///
    /// *rotl(state + data × C, 17) × D*, with wrapping arithmetic.
    #[inline(always)]
    pub const fn eat(self, data: i32) -> Self {
        Self {
            state: self
                .state
                .wrapping_add((data as u32).wrapping_mul(PRIME_C))
                .rotate_left(ROTATION)
                .wrapping_mul(PRIME_D),
        }
    }

    /// The current state, used directly as the hash value.
    #[inline(always)]
    pub const fn state(self) -> u32 {
        self.state
    }
}

impl Default for SmallHash {
    /// Same as `SmallHash::seed(0)`.
    fn default() -> Self {
        Self::seed(0)
    }
}

impl From<SmallHash> for u32 {
    #[inline(always)]
    fn from(hash: SmallHash) -> Self {
        hash.state
    }
}
