use rand::Rng;

use crate::{
    animation::{
        cue::{Cue, CueTrack, tick_note},
        curve::{CurvePhase, GapCurve},
        schedule::StepClock,
    },
    encoding::identifier::{IDENTIFIER_BITS, Identifier},
    foundation::core::Millis,
};

/// Driver phase.
///
/// `Traveling` while the next pending step belongs to the ramp, `Settling` while it belongs to the
/// deceleration (including the landing), `Idle` when nothing is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TravelState {
    Idle,
    Traveling,
    Settling,
}

/// One identifier mutation produced by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TravelStep {
    pub index: usize,
    pub at: Millis,
    pub identifier: Identifier,
    /// Mask of the bits flipped by this step.
    pub flipped: u32,
    pub cue: Cue,
}

/// Randomized multi-step transition between identifiers.
///
/// A curve with `N` gaps yields `N + 1` steps: step 0 fires on [`TravelDriver::start`], each
/// later step fires one gap after its predecessor, and step `N` is the landing. Ramp steps flip
/// one or two random bits, deceleration steps and the landing flip exactly one.
#[derive(Clone, Debug)]
pub struct TravelDriver {
    clock: StepClock,
    origin: Option<Identifier>,
    last: Option<Identifier>,
}

impl Default for TravelDriver {
    fn default() -> Self {
        Self::new(GapCurve::standard())
    }
}

impl TravelDriver {
    pub fn new(curve: GapCurve) -> Self {
        Self {
            clock: StepClock::new(curve),
            origin: None,
            last: None,
        }
    }

    pub fn curve(&self) -> &GapCurve {
        self.clock.curve()
    }

    pub fn state(&self) -> TravelState {
        match self.clock.pending_step() {
            None => TravelState::Idle,
            Some(step) => match self.curve().phase_of(step) {
                CurvePhase::Ramp => TravelState::Traveling,
                CurvePhase::Decelerate => TravelState::Settling,
            },
        }
    }

    pub fn is_busy(&self) -> bool {
        self.clock.is_armed()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.clock.next_due()
    }

    /// Identifier the running (or last) travel started from.
    pub fn origin(&self) -> Option<Identifier> {
        self.origin
    }

    /// Begin a travel from `from` at `now`, firing step 0 immediately.
    ///
    /// Returns `None` without touching any state when a travel is already running.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        from: Identifier,
        rng: &mut R,
    ) -> Option<Vec<TravelStep>> {
        if self.is_busy() {
            tracing::debug!(at = now.0, "travel already running; request ignored");
            return None;
        }
        self.origin = Some(from);
        self.last = Some(from);
        self.clock.arm(now);
        Some(self.tick(now, rng))
    }

    /// Fire every step due at or before `now`, chaining from the last emitted identifier.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) -> Vec<TravelStep> {
        let mut out = Vec::new();
        let (Some(origin), Some(mut current)) = (self.origin, self.last) else {
            return out;
        };
        let gap_count = self.curve().len();

        while let Some((index, at)) = self.clock.poll(now) {
            let (next, flipped, cue) = if index < gap_count {
                let count = match self.curve().phase_of(index) {
                    CurvePhase::Ramp if rng.gen_bool(0.5) => 2,
                    _ => 1,
                };
                let (next, mask) = current.flip_random_bits(count, rng);
                (next, mask, Cue::Tick(tick_note(index, gap_count)))
            } else {
                let (next, mask) = landing_flip(current, origin, rng);
                (next, mask, Cue::Landing)
            };
            tracing::debug!(
                step = index,
                at = at.0,
                identifier = next.value(),
                flipped,
                "travel step"
            );
            current = next;
            out.push(TravelStep {
                index,
                at,
                identifier: next,
                flipped,
                cue,
            });
        }

        self.last = Some(current);
        out
    }
}

// Single-bit flip that never lands back on `origin`.
fn landing_flip<R: Rng + ?Sized>(
    current: Identifier,
    origin: Identifier,
    rng: &mut R,
) -> (Identifier, u32) {
    let forbidden = if current.distance(origin) == 1 {
        u32::from(current.value() ^ origin.value())
    } else {
        0
    };
    loop {
        let mask = 1u32 << rng.gen_range(0..IDENTIFIER_BITS);
        if mask != forbidden {
            return (current.xor(mask), mask);
        }
    }
}

/// Run a complete travel on a simulated clock and return every step plus its cue track.
pub fn simulate_travel<R: Rng + ?Sized>(
    curve: GapCurve,
    from: Identifier,
    rng: &mut R,
) -> (Vec<TravelStep>, CueTrack) {
    let total = curve.total_ms();
    let mut driver = TravelDriver::new(curve);
    let mut steps = driver.start(Millis::ZERO, from, rng).unwrap_or_default();
    steps.extend(driver.tick(Millis(total), rng));

    let mut track = CueTrack::default();
    for s in &steps {
        track.push(s.at, s.cue);
    }
    (steps, track)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/travel.rs"]
mod tests;
