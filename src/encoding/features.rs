use crate::encoding::identifier::Identifier;

pub const SQUARE_COUNT: usize = 9;
pub const DIAMOND_COUNT: usize = 4;

/// The 13 binary features derived from an [`Identifier`].
///
/// `squares[r * 3 + c]` is the cell at row `r`, column `c` of the 3x3 grid (bits 0..9).
/// `diamonds[r * 2 + c]` is the diamond on interior intersection `(r + 1, c + 1)` (bits 9..13).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FeatureVector {
    pub squares: [bool; SQUARE_COUNT],
    pub diamonds: [bool; DIAMOND_COUNT],
}

impl FeatureVector {
    pub fn of(id: Identifier) -> Self {
        Self {
            squares: std::array::from_fn(|i| id.bit(i as u32)),
            diamonds: std::array::from_fn(|j| id.bit((SQUARE_COUNT + j) as u32)),
        }
    }

    /// Inverse of [`FeatureVector::of`].
    pub fn to_identifier(&self) -> Identifier {
        let bits = self
            .squares
            .iter()
            .chain(self.diamonds.iter())
            .enumerate()
            .fold(0u32, |acc, (i, on)| acc | (u32::from(*on) << i));
        Identifier::from_bits(bits)
    }

    pub fn square(&self, row: usize, col: usize) -> bool {
        self.squares[row * 3 + col]
    }

    pub fn diamond(&self, row: usize, col: usize) -> bool {
        self.diamonds[row * 2 + col]
    }

    pub fn lit_count(&self) -> usize {
        self.squares
            .iter()
            .chain(self.diamonds.iter())
            .filter(|on| **on)
            .count()
    }
}

pub fn feature_vector(id: Identifier) -> FeatureVector {
    FeatureVector::of(id)
}

#[cfg(test)]
#[path = "../../tests/unit/encoding/features.rs"]
mod tests;
