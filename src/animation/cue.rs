use crate::foundation::core::Millis;

/// The eight fixed travel clips, a B-major scale from B to the B above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Note {
    B,
    CSharp,
    DSharp,
    E,
    FSharp,
    GSharp,
    ASharp,
    HighB,
}

impl Note {
    pub const ALL: [Note; 8] = [
        Note::B,
        Note::CSharp,
        Note::DSharp,
        Note::E,
        Note::FSharp,
        Note::GSharp,
        Note::ASharp,
        Note::HighB,
    ];

    /// Scale degree `index`, clamped to the top of the scale.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Clip file name the host is expected to play.
    pub fn clip_name(self) -> &'static str {
        match self {
            Note::B => "B.ogg",
            Note::CSharp => "Csharp.ogg",
            Note::DSharp => "Dsharp.ogg",
            Note::E => "E.ogg",
            Note::FSharp => "Fsharp.ogg",
            Note::GSharp => "Gsharp.ogg",
            Note::ASharp => "Asharp.ogg",
            Note::HighB => "Bu.ogg",
        }
    }
}

/// Discrete audio/visual event emitted by a travel step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "note", rename_all = "snake_case")]
pub enum Cue {
    Tick(Note),
    Landing,
}

impl Cue {
    pub fn note(self) -> Note {
        match self {
            Cue::Tick(n) => n,
            Cue::Landing => Note::HighB,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Cue::Landing)
    }
}

/// Note for tick step `step` of a travel with `gap_count` gaps.
///
/// The last seven ticks climb the scale; everything before them repeats the root.
pub fn tick_note(step: usize, gap_count: usize) -> Note {
    if step + 7 < gap_count {
        Note::B
    } else {
        Note::from_index(step + 7 - gap_count)
    }
}

/// A cue placed on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimedCue {
    pub at: Millis,
    pub cue: Cue,
}

/// Ordered cue manifest for one travel, for hosts that schedule audio themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CueTrack {
    pub cues: Vec<TimedCue>,
}

impl CueTrack {
    pub fn push(&mut self, at: Millis, cue: Cue) {
        self.cues.push(TimedCue { at, cue });
    }

    pub fn tick_count(&self) -> usize {
        self.cues.iter().filter(|c| !c.cue.is_terminal()).count()
    }

    pub fn terminal_count(&self) -> usize {
        self.cues.iter().filter(|c| c.cue.is_terminal()).count()
    }

    /// Cue times relative to the first cue.
    pub fn rebased(&self) -> Self {
        let origin = self.cues.first().map(|c| c.at).unwrap_or(Millis::ZERO);
        Self {
            cues: self
                .cues
                .iter()
                .map(|c| TimedCue {
                    at: Millis(c.at.since(origin)),
                    cue: c.cue,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/cue.rs"]
mod tests;
