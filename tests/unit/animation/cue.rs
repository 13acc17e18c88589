use super::*;

#[test]
fn standard_curve_note_sequence() {
    let notes: Vec<usize> = (0..19).map(|i| tick_note(i, 19).index()).collect();
    assert_eq!(
        notes,
        vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6]
    );
    assert_eq!(Cue::Landing.note(), Note::HighB);
}

#[test]
fn short_curves_never_reach_the_landing_note() {
    for gaps in 1..7 {
        for step in 0..gaps {
            assert_ne!(tick_note(step, gaps), Note::HighB);
        }
        assert_eq!(tick_note(gaps - 1, gaps), Note::ASharp);
    }
}

#[test]
fn clip_names_are_distinct() {
    let names: std::collections::HashSet<_> = Note::ALL.iter().map(|n| n.clip_name()).collect();
    assert_eq!(names.len(), 8);
    assert_eq!(Note::from_index(99), Note::HighB);
}

#[test]
fn cue_track_counts_and_serializes() {
    let mut track = CueTrack::default();
    track.push(Millis(500), Cue::Tick(Note::B));
    track.push(Millis(700), Cue::Tick(Note::CSharp));
    track.push(Millis(900), Cue::Landing);
    assert_eq!(track.tick_count(), 2);
    assert_eq!(track.terminal_count(), 1);

    let rebased = track.rebased();
    assert_eq!(rebased.cues[0].at, Millis(0));
    assert_eq!(rebased.cues[2].at, Millis(400));

    let json = serde_json::to_string(&rebased).unwrap();
    assert!(json.contains(r#""kind":"landing""#));
    assert!(json.contains(r#""note":"CSharp""#));
    let back: CueTrack = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rebased);
}
