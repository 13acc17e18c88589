use crate::{
    animation::{curve::GapCurve, schedule::StepClock},
    encoding::identifier::{IDENTIFIER_BITS, Identifier},
    foundation::core::Millis,
    foundation::error::{SyntropyError, SyntropyResult},
};

/// Identifier the reveal settles on.
pub const INTRO_TARGET: u16 = 5290;

/// Rapid-phase masks XOR-ed onto the target; the last one inverts every bit so the lock phase
/// starts from a fully wrong state.
pub const INTRO_WRONG_MASKS: [u32; 7] = [
    0b1010101010101,
    0b0101010101010,
    0b1100110011001,
    0b0011001100110,
    0b1111100000000,
    0b0000011111111,
    0b1111111111111,
];

/// Scripted states: the seven wrong masks, then one state per corrected bit (low bit first).
pub fn build_intro_sequence(target: Identifier) -> Vec<Identifier> {
    let mut seq: Vec<Identifier> = INTRO_WRONG_MASKS.iter().map(|m| target.xor(*m)).collect();
    let mut n = target.xor(INTRO_WRONG_MASKS[INTRO_WRONG_MASKS.len() - 1]);
    for bit in 0..IDENTIFIER_BITS {
        n = n.with_bit(bit, target.bit(bit));
        seq.push(n);
    }
    seq
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct IntroStep {
    pub index: usize,
    pub at: Millis,
    pub identifier: Identifier,
}

/// Non-interactive reveal that replays [`build_intro_sequence`] on a gap curve. Emits no cues.
#[derive(Clone, Debug)]
pub struct IntroReveal {
    target: Identifier,
    sequence: Vec<Identifier>,
    clock: StepClock,
    shown: Identifier,
}

impl IntroReveal {
    pub fn standard() -> SyntropyResult<Self> {
        Self::new(Identifier::new(INTRO_TARGET)?, GapCurve::standard())
    }

    /// The curve must schedule exactly one step per scripted state.
    pub fn new(target: Identifier, curve: GapCurve) -> SyntropyResult<Self> {
        let sequence = build_intro_sequence(target);
        if curve.step_count() != sequence.len() {
            return Err(SyntropyError::animation(format!(
                "intro needs {} gaps, curve has {}",
                sequence.len() - 1,
                curve.len()
            )));
        }
        Ok(Self {
            target,
            shown: sequence[0],
            sequence,
            clock: StepClock::new(curve),
        })
    }

    pub fn target(&self) -> Identifier {
        self.target
    }

    pub fn sequence(&self) -> &[Identifier] {
        &self.sequence
    }

    /// Identifier currently on screen.
    pub fn shown(&self) -> Identifier {
        self.shown
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_armed()
    }

    pub fn is_finished(&self) -> bool {
        !self.is_running() && self.shown == self.target
    }

    pub fn duration_ms(&self) -> u64 {
        self.clock.curve().total_ms()
    }

    pub fn start(&mut self, now: Millis) -> Vec<IntroStep> {
        self.clock.arm(now);
        self.tick(now)
    }

    pub fn tick(&mut self, now: Millis) -> Vec<IntroStep> {
        let mut out = Vec::new();
        while let Some((index, at)) = self.clock.poll(now) {
            let identifier = self.sequence[index];
            self.shown = identifier;
            out.push(IntroStep {
                index,
                at,
                identifier,
            });
        }
        out
    }

    /// Play the whole reveal on a simulated clock starting at zero.
    pub fn simulate(mut self) -> Vec<IntroStep> {
        let mut steps = self.start(Millis::ZERO);
        steps.extend(self.tick(Millis(self.duration_ms())));
        steps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/intro.rs"]
mod tests;
