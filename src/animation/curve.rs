use crate::foundation::error::{SyntropyError, SyntropyResult};

/// Gaps (ms) of the standard travel curve: a 10-step ramp up to peak speed followed by a
/// 9-step deceleration that settles on the landing.
pub const STANDARD_GAPS_MS: [u32; 19] = [
    200, 142, 104, 82, 72, 68, 68, 70, 74, 80, // ramp
    92, 120, 158, 208, 274, 362, 476, 628, 828, // decelerate
];
pub const STANDARD_RAMP_LEN: usize = 10;

/// Which part of the curve a step belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CurvePhase {
    Ramp,
    Decelerate,
}

/// Ordered list of timing gaps: `gaps_ms[k]` is the delay between step `k` and step `k + 1`.
///
/// A curve with `N` gaps schedules `N + 1` steps.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GapCurve {
    gaps_ms: Vec<u32>,
    ramp_len: usize,
}

impl Default for GapCurve {
    fn default() -> Self {
        Self::standard()
    }
}

impl GapCurve {
    pub fn standard() -> Self {
        Self {
            gaps_ms: STANDARD_GAPS_MS.to_vec(),
            ramp_len: STANDARD_RAMP_LEN,
        }
    }

    /// Build a custom curve.
    ///
    /// The deceleration segment (`gaps_ms[ramp_len..]`) must be non-decreasing and every gap must
    /// be non-zero.
    pub fn new(gaps_ms: Vec<u32>, ramp_len: usize) -> SyntropyResult<Self> {
        if gaps_ms.is_empty() {
            return Err(SyntropyError::animation("gap curve must not be empty"));
        }
        if ramp_len > gaps_ms.len() {
            return Err(SyntropyError::animation(format!(
                "ramp length {ramp_len} exceeds curve length {}",
                gaps_ms.len()
            )));
        }
        if gaps_ms.contains(&0) {
            return Err(SyntropyError::animation("gap curve entries must be > 0"));
        }
        if gaps_ms[ramp_len..].windows(2).any(|w| w[1] < w[0]) {
            return Err(SyntropyError::animation(
                "deceleration gaps must be non-decreasing",
            ));
        }
        Ok(Self { gaps_ms, ramp_len })
    }

    pub fn gaps_ms(&self) -> &[u32] {
        &self.gaps_ms
    }

    pub fn len(&self) -> usize {
        self.gaps_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps_ms.is_empty()
    }

    pub fn ramp_len(&self) -> usize {
        self.ramp_len
    }

    /// Number of steps scheduled by this curve.
    pub fn step_count(&self) -> usize {
        self.gaps_ms.len() + 1
    }

    pub fn gap_after(&self, step: usize) -> Option<u32> {
        self.gaps_ms.get(step).copied()
    }

    pub fn phase_of(&self, step: usize) -> CurvePhase {
        if step < self.ramp_len {
            CurvePhase::Ramp
        } else {
            CurvePhase::Decelerate
        }
    }

    /// Offset (ms) of `step` from the first step.
    pub fn offset_of(&self, step: usize) -> u64 {
        self.gaps_ms
            .iter()
            .take(step)
            .map(|g| u64::from(*g))
            .sum()
    }

    /// Offset of the final step.
    pub fn total_ms(&self) -> u64 {
        self.offset_of(self.gaps_ms.len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
