use super::*;
use crate::{
    render::options::Accent,
    studio::viewer::{ScreenRect, ViewerPhase, ViewerTransform},
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn viewport() -> Viewport {
    Viewport {
        width: 1280.0,
        height: 800.0,
    }
}

fn studio(v: u16) -> Studio {
    Studio::new(Identifier::new(v).unwrap(), viewport())
}

fn count<F: Fn(&StudioEffect) -> bool>(effects: &[StudioEffect], f: F) -> usize {
    effects.iter().filter(|e| f(e)).count()
}

#[test]
fn invalid_decimal_input_leaves_identifier_unchanged() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut s = studio(1234);
    for input in ["abc", "-1", "8192", "", "12a", "1.5"] {
        s.handle(StudioEvent::SetDecimal(input.to_string()), Millis(0), &mut rng);
        let effects = s.handle(StudioEvent::Jump, Millis(0), &mut rng);
        assert!(effects.is_empty(), "input {input:?}");
        assert_eq!(s.current().value(), 1234, "input {input:?}");
    }
}

#[test]
fn valid_decimal_jumps() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut s = studio(0);
    s.handle(StudioEvent::SetDecimal(" 8191 ".to_string()), Millis(0), &mut rng);
    assert_eq!(
        s.handle(StudioEvent::Jump, Millis(0), &mut rng),
        vec![StudioEffect::Rerender]
    );
    assert_eq!(s.current().value(), 8191);
    assert_eq!(s.name().to_string(), "VERNAL DRIFTING EKPYROSIS");
    assert_eq!(s.decimal(), " 8191 ");
}

#[test]
fn randomize_clears_the_decimal_field() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut s = studio(5);
    s.handle(StudioEvent::SetDecimal("77".to_string()), Millis(0), &mut rng);
    assert_eq!(
        s.handle(StudioEvent::Randomize, Millis(0), &mut rng),
        vec![StudioEffect::Rerender]
    );
    assert_eq!(s.decimal(), "");
}

#[test]
fn toggles_flip_display_options() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut s = studio(5);
    s.handle(StudioEvent::ToggleGrid, Millis(0), &mut rng);
    s.handle(StudioEvent::ToggleAccent, Millis(0), &mut rng);
    assert!(s.options().show_grid);
    assert_eq!(s.options().accent, Accent::Ember);
    s.handle(StudioEvent::ToggleAccent, Millis(0), &mut rng);
    assert_eq!(s.options().accent, Accent::White);
    assert!(s.scene().ops.iter().any(|op| matches!(
        op,
        crate::render::scene::DrawOp::StrokeLines { .. }
    )));
}

#[test]
fn travel_runs_to_completion_with_cues() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut s = studio(4000);
    s.handle(StudioEvent::SetDecimal("12".to_string()), Millis(0), &mut rng);

    let mut effects = s.handle(StudioEvent::Travel, Millis(0), &mut rng);
    assert_eq!(s.decimal(), "");
    assert_eq!(s.travel_state(), TravelState::Traveling);

    let mut now = 0;
    while s.travel_state() != TravelState::Idle {
        now += 16;
        effects.extend(s.tick(Millis(now), &mut rng));
    }

    assert_eq!(count(&effects, |e| *e == StudioEffect::Rerender), 20);
    assert_eq!(
        count(&effects, |e| matches!(e, StudioEffect::Cue(c) if !c.is_terminal())),
        19
    );
    assert_eq!(
        count(&effects, |e| matches!(e, StudioEffect::Cue(c) if c.is_terminal())),
        1
    );
    assert!(matches!(effects.last(), Some(StudioEffect::Cue(c)) if c.is_terminal()));
    assert_ne!(s.current().value(), 4000);
}

#[test]
fn inputs_that_mutate_the_identifier_are_ignored_while_traveling() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut s = studio(10);
    s.handle(StudioEvent::Travel, Millis(0), &mut rng);
    let during = s.current();

    assert!(s.handle(StudioEvent::Travel, Millis(5), &mut rng).is_empty());
    assert!(s.handle(StudioEvent::Randomize, Millis(5), &mut rng).is_empty());
    s.handle(StudioEvent::SetDecimal("1".to_string()), Millis(5), &mut rng);
    assert!(s.handle(StudioEvent::Jump, Millis(5), &mut rng).is_empty());
    assert_eq!(s.current(), during);

    // Display toggles stay live.
    assert_eq!(
        s.handle(StudioEvent::ToggleGrid, Millis(5), &mut rng),
        vec![StudioEffect::Rerender]
    );
}

#[test]
fn save_exports_under_the_identifier_name() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut s = studio(5290).with_jpeg_quality(90);
    assert_eq!(
        s.handle(StudioEvent::Save, Millis(0), &mut rng),
        vec![StudioEffect::Export {
            file_name: "syntropy-5290.jpg".to_string(),
            format: StillFormat::Jpeg { quality: 90 },
        }]
    );
}

#[test]
fn escape_closes_the_viewer() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut s = studio(1);
    let source = ViewerSource {
        src: "syntropy-1.jpg".to_string(),
        alt: "#1".to_string(),
        rect: ScreenRect {
            left: 0.0,
            top: 0.0,
            width: 80.0,
            height: 100.0,
        },
    };
    s.handle(StudioEvent::OpenViewer(source), Millis(0), &mut rng);
    s.tick(Millis(400), &mut rng);
    assert_eq!(s.viewer().phase(), ViewerPhase::Open);

    s.handle(StudioEvent::Escape, Millis(1000), &mut rng);
    s.tick(Millis(1380), &mut rng);
    assert_eq!(s.viewer().phase(), ViewerPhase::Closed);
    assert!(s.viewer().thumbnail_visible("syntropy-1.jpg"));
    assert_eq!(s.viewer().image_src(), "");

    assert!(s.handle(StudioEvent::Escape, Millis(2000), &mut rng).is_empty());
    assert_eq!(s.viewer().phase(), ViewerPhase::Closed);
}

#[test]
fn resize_retargets_the_viewer_close() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut s = studio(5290);
    let rect = ScreenRect {
        left: 40.0,
        top: 60.0,
        width: 120.0,
        height: 150.0,
    };
    let source = ViewerSource {
        src: "syntropy-5290.jpg".to_string(),
        alt: "#5290".to_string(),
        rect,
    };
    s.handle(StudioEvent::OpenViewer(source), Millis(0), &mut rng);
    s.tick(Millis(400), &mut rng);

    let resized = Viewport {
        width: 600.0,
        height: 600.0,
    };
    assert!(
        s.handle(StudioEvent::Resize(resized), Millis(500), &mut rng)
            .is_empty()
    );
    let target = s.viewer().target_rect();
    assert!((target.height - 540.0).abs() < 1e-9);
    assert!((target.width - 432.0).abs() < 1e-9);

    s.handle(StudioEvent::CloseViewer, Millis(1000), &mut rng);
    let end = s.viewer().transform(Millis(1350));
    let expected = ViewerTransform::onto(rect, target);
    assert!((end.sx - expected.sx).abs() < 1e-9);
    assert!((end.tx - expected.tx).abs() < 1e-9);
    assert!((end.ty - expected.ty).abs() < 1e-9);
}
