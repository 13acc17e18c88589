use super::*;
use crate::{
    animation::{curve::GapCurve, intro::IntroReveal, travel::simulate_travel},
    export::sink::InMemorySink,
    foundation::core::Canvas,
    foundation::core::Rgba8,
    render::{backend::RenderSettings, cpu::CpuBackend},
};
use rand::SeedableRng;

/// Renders a 2x2 frame whose red channel is the low byte of the scene's op count.
#[derive(Default)]
struct CountingBackend {
    renders: usize,
}

impl RenderBackend for CountingBackend {
    fn render_scene(&mut self, scene: &Scene) -> SyntropyResult<FrameRGBA> {
        self.renders += 1;
        Ok(FrameRGBA {
            width: 2,
            height: 2,
            data: [scene.ops.len() as u8, 0, 0, 255].repeat(4),
            premultiplied: true,
        })
    }
}

fn kf(at: u64, v: u16) -> Keyframe {
    Keyframe {
        at: Millis(at),
        identifier: Identifier::new(v).unwrap(),
    }
}

fn marker_scene(id: Identifier) -> SyntropyResult<Scene> {
    let mut scene = Scene::new(Canvas::new(2, 2)?, Rgba8::BLACK);
    for _ in 0..id.value() {
        scene.fill_rect(Canvas::new(1, 1)?.rect(), Rgba8::WHITE);
    }
    Ok(scene)
}

#[test]
fn samples_hold_the_latest_keyframe() {
    let cfg = RecordConfig {
        fps: Fps::new(10, 1).unwrap(),
        tail_ms: 100,
    };
    let keyframes = [kf(0, 1), kf(100, 2), kf(250, 3)];
    assert_eq!(timeline_frame_count(&keyframes, &cfg), 4);

    let mut backend = CountingBackend::default();
    let mut sink = InMemorySink::new();
    let n = record_timeline(&keyframes, &mut backend, &mut sink, &cfg, marker_scene).unwrap();
    assert_eq!(n, 4);
    assert_eq!(backend.renders, 3);
    assert!(sink.is_finished());
    assert_eq!(sink.config().unwrap().width, 2);

    let shown: Vec<u8> = sink.frames().iter().map(|(_, f)| f.data[0]).collect();
    assert_eq!(shown, vec![1, 2, 2, 3]);
    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn timeline_is_measured_from_the_first_keyframe() {
    let cfg = RecordConfig {
        fps: Fps::new(10, 1).unwrap(),
        tail_ms: 0,
    };
    let keyframes = [kf(5000, 1), kf(5200, 2)];
    assert_eq!(timeline_frame_count(&keyframes, &cfg), 2);
    let mut sink = InMemorySink::new();
    record_timeline(
        &keyframes,
        &mut CountingBackend::default(),
        &mut sink,
        &cfg,
        marker_scene,
    )
    .unwrap();
    let shown: Vec<u8> = sink.frames().iter().map(|(_, f)| f.data[0]).collect();
    assert_eq!(shown, vec![1, 1]);
}

#[test]
fn rejects_empty_and_unordered_timelines() {
    let cfg = RecordConfig::default();
    let mut sink = InMemorySink::new();
    let mut backend = CountingBackend::default();
    assert!(record_timeline(&[], &mut backend, &mut sink, &cfg, marker_scene).is_err());
    assert!(
        record_timeline(
            &[kf(100, 1), kf(50, 2)],
            &mut backend,
            &mut sink,
            &cfg,
            marker_scene
        )
        .is_err()
    );
    assert_eq!(timeline_frame_count(&[], &cfg), 0);
}

#[test]
fn travel_recording_ends_on_the_landing_state() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let from = Identifier::new(100).unwrap();
    let (steps, _) = simulate_travel(GapCurve::standard(), from, &mut rng);
    let landing = steps.last().unwrap().identifier;

    let cfg = RecordConfig {
        fps: Fps::new(10, 1).unwrap(),
        tail_ms: 500,
    };
    let mut backend = CountingBackend::default();
    let mut sink = InMemorySink::new();
    let n = record_travel(
        &steps,
        &DisplayOptions::default(),
        &mut backend,
        &mut sink,
        &cfg,
    )
    .unwrap();
    assert_eq!(n, Fps::new(10, 1).unwrap().frames_for_millis(4106 + 500));
    assert_eq!(sink.frames().len() as u64, n);

    let mut expected = CountingBackend::default();
    let last = expected
        .render_scene(&compose_frame(landing, &DisplayOptions::default()))
        .unwrap();
    assert_eq!(sink.frames().last().unwrap().1.data, last.data);
}

#[test]
fn intro_recording_renders_tiles() {
    let steps = IntroReveal::standard().unwrap().simulate();
    let mut backend = CpuBackend::new(RenderSettings::default()).unwrap();
    let mut sink = InMemorySink::new();
    let cfg = RecordConfig {
        fps: Fps::new(5, 1).unwrap(),
        tail_ms: 0,
    };
    let n = record_intro(&steps, 12, &mut backend, &mut sink, &cfg).unwrap();
    assert!(n > 0);
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (12, 12));
}
