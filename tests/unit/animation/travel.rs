use super::*;
use crate::animation::cue::Note;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn id(v: u16) -> Identifier {
    Identifier::new(v).unwrap()
}

#[test]
fn start_fires_first_step_and_enters_ramp() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut d = TravelDriver::default();
    assert_eq!(d.state(), TravelState::Idle);

    let steps = d.start(Millis(1000), id(42), &mut rng).unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].index, 0);
    assert_eq!(steps[0].at, Millis(1000));
    assert_eq!(steps[0].cue, Cue::Tick(Note::B));
    assert!((1..=2).contains(&steps[0].flipped.count_ones()));
    assert_eq!(id(42).xor(steps[0].flipped), steps[0].identifier);

    assert_eq!(d.state(), TravelState::Traveling);
    assert_eq!(d.next_due(), Some(Millis(1200)));
}

#[test]
fn full_travel_produces_n_plus_one_states_and_cues() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let curve = GapCurve::standard();
        let n = curve.len();
        let (steps, track) = simulate_travel(curve, id(5290), &mut rng);

        assert_eq!(steps.len(), n + 1);
        assert_eq!(track.tick_count(), n);
        assert_eq!(track.terminal_count(), 1);
        assert!(steps.last().unwrap().cue.is_terminal());
        assert_ne!(steps.last().unwrap().identifier, id(5290));
    }
}

#[test]
fn flip_counts_follow_phase() {
    let mut saw_double = false;
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (steps, _) = simulate_travel(GapCurve::standard(), id(0), &mut rng);
        for s in &steps {
            let flips = s.flipped.count_ones();
            if s.index < 10 {
                assert!((1..=2).contains(&flips), "ramp step {} flipped {flips}", s.index);
                saw_double |= flips == 2;
            } else {
                assert_eq!(flips, 1, "step {}", s.index);
            }
        }

        let mut prev = id(0);
        for s in &steps {
            assert_eq!(prev.xor(s.flipped), s.identifier);
            prev = s.identifier;
        }
    }
    assert!(saw_double);
}

#[test]
fn steps_follow_the_curve_timing() {
    let mut rng = StdRng::seed_from_u64(5);
    let curve = GapCurve::standard();
    let (steps, _) = simulate_travel(curve.clone(), id(7), &mut rng);
    for s in &steps {
        assert_eq!(s.at, Millis(curve.offset_of(s.index)));
    }
}

#[test]
fn second_start_while_running_is_ignored() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut d = TravelDriver::default();
    let first = d.start(Millis(0), id(100), &mut rng).unwrap();
    let due_before = d.next_due();
    let state_before = d.state();

    assert_eq!(d.start(Millis(50), id(8000), &mut rng), None);
    assert_eq!(d.next_due(), due_before);
    assert_eq!(d.state(), state_before);
    assert_eq!(d.origin(), Some(id(100)));

    let rest = d.tick(Millis(10_000), &mut rng);
    assert_eq!(first.len() + rest.len(), 20);
}

#[test]
fn state_moves_through_settling_to_idle() {
    let mut rng = StdRng::seed_from_u64(8);
    let curve = GapCurve::standard();
    let mut d = TravelDriver::new(curve.clone());
    d.start(Millis(0), id(1), &mut rng).unwrap();

    // Pending step 10 is the first deceleration step.
    d.tick(Millis(curve.offset_of(9)), &mut rng);
    assert_eq!(d.state(), TravelState::Settling);
    assert!(d.is_busy());

    let last = d.tick(Millis(curve.total_ms()), &mut rng);
    assert_eq!(last.last().unwrap().cue, Cue::Landing);
    assert_eq!(d.state(), TravelState::Idle);
    assert!(d.tick(Millis(u64::MAX), &mut rng).is_empty());

    // Idle again, so a fresh travel is accepted.
    assert!(d.start(Millis(99_999), id(1), &mut rng).is_some());
}

#[test]
fn landing_never_returns_to_origin() {
    let origin = id(0b1);
    let one_away = id(0b11);
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (next, mask) = landing_flip(one_away, origin, &mut rng);
        assert_eq!(mask.count_ones(), 1);
        assert_ne!(next, origin);
    }
}

#[test]
fn tick_before_start_is_a_no_op() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut d = TravelDriver::default();
    assert!(d.tick(Millis(5000), &mut rng).is_empty());
    assert_eq!(d.state(), TravelState::Idle);
}
