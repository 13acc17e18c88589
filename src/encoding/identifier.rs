use rand::Rng;

use crate::foundation::error::{SyntropyError, SyntropyResult};

/// Number of feature bits carried by an [`Identifier`].
pub const IDENTIFIER_BITS: u32 = 13;
/// Largest valid identifier value.
pub const MAX_IDENTIFIER: u16 = (1 << IDENTIFIER_BITS) - 1;
const MASK: u32 = (1 << IDENTIFIER_BITS) - 1;

/// A 13-bit composition seed in `[0, 8191]`.
///
/// Identifiers are immutable values: every mutation (randomize, jump, a travel step) produces a
/// new identifier rather than editing one in place.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct Identifier(u16);

impl Identifier {
    /// Build a validated identifier.
    pub fn new(value: u16) -> SyntropyResult<Self> {
        if value > MAX_IDENTIFIER {
            return Err(SyntropyError::validation(format!(
                "identifier {value} is out of range [0, {MAX_IDENTIFIER}]"
            )));
        }
        Ok(Self(value))
    }

    /// Build an identifier from any integer by keeping its low 13 bits.
    pub fn from_bits(bits: u32) -> Self {
        Self((bits & MASK) as u16)
    }

    /// Uniform pick over the full identifier range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..=MAX_IDENTIFIER))
    }

    /// Strict decimal parse used by the jump control.
    ///
    /// Surrounding whitespace is ignored; anything other than ASCII digits (including a sign) or a
    /// value above [`MAX_IDENTIFIER`] yields `None`.
    pub fn parse_decimal(input: &str) -> Option<Self> {
        let digits = input.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits
            .parse::<u32>()
            .ok()
            .filter(|&v| v <= u32::from(MAX_IDENTIFIER))
            .map(Self::from_bits)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn bit(self, index: u32) -> bool {
        index < IDENTIFIER_BITS && (self.0 >> index) & 1 == 1
    }

    /// XOR with `mask` (masked to 13 bits).
    pub fn xor(self, mask: u32) -> Self {
        Self::from_bits(u32::from(self.0) ^ mask)
    }

    /// Return a copy with bit `index` set to `on`.
    pub fn with_bit(self, index: u32, on: bool) -> Self {
        if index >= IDENTIFIER_BITS {
            return self;
        }
        let cleared = u32::from(self.0) & !(1 << index);
        Self::from_bits(cleared | (u32::from(on) << index))
    }

    /// Flip `count` distinct, uniformly chosen bit positions.
    ///
    /// Returns the new identifier and the mask of flipped bits. `count` is clamped to the 13
    /// available positions.
    pub fn flip_random_bits<R: Rng + ?Sized>(self, count: u32, rng: &mut R) -> (Self, u32) {
        let count = count.min(IDENTIFIER_BITS);
        let mut mask = 0u32;
        while mask.count_ones() < count {
            mask |= 1 << rng.gen_range(0..IDENTIFIER_BITS);
        }
        (self.xor(mask), mask)
    }

    /// Number of bit positions at which `self` and `other` differ.
    pub fn distance(self, other: Identifier) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Zero-padded 13-digit binary form, most significant bit first.
    pub fn binary_string(self) -> String {
        format!("{:013b}", self.0)
    }

    /// Numeric label as shown on the canvas (`#1234`).
    pub fn label(self) -> String {
        format!("#{}", self.0)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Identifier {
    type Error = SyntropyError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for u16 {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

/// Uniform pick in `[0, 8191]`.
pub fn random_identifier<R: Rng + ?Sized>(rng: &mut R) -> Identifier {
    Identifier::random(rng)
}

#[cfg(test)]
#[path = "../../tests/unit/encoding/identifier.rs"]
mod tests;
