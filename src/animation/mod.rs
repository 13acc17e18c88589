pub mod cue;
pub mod curve;
pub mod ease;
pub mod intro;
pub mod schedule;
pub mod travel;
