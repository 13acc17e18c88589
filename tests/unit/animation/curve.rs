use super::*;

#[test]
fn standard_curve_shape() {
    let c = GapCurve::standard();
    assert_eq!(c.len(), 19);
    assert_eq!(c.step_count(), 20);
    assert_eq!(c.ramp_len(), 10);
    assert_eq!(c.phase_of(9), CurvePhase::Ramp);
    assert_eq!(c.phase_of(10), CurvePhase::Decelerate);
    assert_eq!(c.total_ms(), 4106);
    assert_eq!(c.offset_of(0), 0);
    assert_eq!(c.offset_of(2), 342);
    assert_eq!(c.gap_after(18), Some(828));
    assert_eq!(c.gap_after(19), None);
}

#[test]
fn standard_curve_ramps_then_decelerates() {
    let gaps = GapCurve::standard();
    let ramp = &gaps.gaps_ms()[..gaps.ramp_len()];
    let decel = &gaps.gaps_ms()[gaps.ramp_len()..];
    assert!(ramp.iter().max().unwrap() < decel.last().unwrap());
    assert!(decel.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn custom_curves_are_validated() {
    assert!(GapCurve::new(vec![], 0).is_err());
    assert!(GapCurve::new(vec![10, 20], 3).is_err());
    assert!(GapCurve::new(vec![10, 0, 20], 1).is_err());
    assert!(GapCurve::new(vec![50, 40, 10], 1).is_err());
    let c = GapCurve::new(vec![50, 40, 60], 2).unwrap();
    assert_eq!(c.step_count(), 4);
    assert_eq!(c.total_ms(), 150);
}
