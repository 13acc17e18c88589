use crate::{animation::curve::GapCurve, foundation::core::Millis};

/// One logical timeline of steps spaced by a [`GapCurve`].
///
/// The clock holds no timer: hosts call [`StepClock::poll`] with the current instant and receive
/// each step index whose due time has passed, in order. At most one step is pending at a time.
#[derive(Clone, Debug)]
pub struct StepClock {
    curve: GapCurve,
    cursor: usize,
    next_due: Option<Millis>,
}

impl StepClock {
    pub fn new(curve: GapCurve) -> Self {
        Self {
            curve,
            cursor: 0,
            next_due: None,
        }
    }

    pub fn curve(&self) -> &GapCurve {
        &self.curve
    }

    /// Schedule step 0 at `at`, discarding any previous run.
    pub fn arm(&mut self, at: Millis) {
        self.cursor = 0;
        self.next_due = Some(at);
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.next_due
    }

    /// Index of the next step that will fire.
    pub fn pending_step(&self) -> Option<usize> {
        self.next_due.map(|_| self.cursor)
    }

    /// Pop the next step if it is due at or before `now`, scheduling its successor.
    ///
    /// Successors are scheduled relative to the step's due time, not `now`, so a late poll does
    /// not stretch the curve.
    pub fn poll(&mut self, now: Millis) -> Option<(usize, Millis)> {
        let due = self.next_due.filter(|due| *due <= now)?;
        let step = self.cursor;
        self.cursor += 1;
        self.next_due = self.curve.gap_after(step).map(|gap| due.after(gap));
        Some((step, due))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;
