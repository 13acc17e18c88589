//! Offline recording of travel and intro timelines into a [`FrameSink`].

use crate::{
    animation::{intro::IntroStep, travel::TravelStep},
    encoding::{features::FeatureVector, identifier::Identifier},
    export::sink::{FrameSink, SinkConfig},
    foundation::core::{Fps, Millis},
    foundation::error::{SyntropyError, SyntropyResult},
    render::{
        backend::{FrameRGBA, RenderBackend},
        compose::{compose_frame, compose_tile},
        options::DisplayOptions,
        scene::Scene,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordConfig {
    pub fps: Fps,
    /// How long the final state stays on screen after the last step.
    pub tail_ms: u64,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            fps: Fps { num: 30, den: 1 },
            tail_ms: 1000,
        }
    }
}

/// One identifier shown from `at` until the next keyframe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keyframe {
    pub at: Millis,
    pub identifier: Identifier,
}

impl From<&TravelStep> for Keyframe {
    fn from(step: &TravelStep) -> Self {
        Self {
            at: step.at,
            identifier: step.identifier,
        }
    }
}

impl From<&IntroStep> for Keyframe {
    fn from(step: &IntroStep) -> Self {
        Self {
            at: step.at,
            identifier: step.identifier,
        }
    }
}

/// Frames needed to cover the keyframes plus the tail, measured from the first keyframe.
pub fn timeline_frame_count(keyframes: &[Keyframe], cfg: &RecordConfig) -> u64 {
    let (Some(first), Some(last)) = (keyframes.first(), keyframes.last()) else {
        return 0;
    };
    let span = last.at.since(first.at).saturating_add(cfg.tail_ms);
    cfg.fps.frames_for_millis(span).max(1)
}

/// Sample `keyframes` at `cfg.fps` and push one frame per sample into `sink`.
///
/// A scene is rendered only when the sampled keyframe changes; repeated samples reuse the last
/// frame. Returns the number of frames pushed.
pub fn record_timeline<F>(
    keyframes: &[Keyframe],
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    cfg: &RecordConfig,
    mut compose: F,
) -> SyntropyResult<u64>
where
    F: FnMut(Identifier) -> SyntropyResult<Scene>,
{
    let first = keyframes
        .first()
        .ok_or_else(|| SyntropyError::validation("timeline has no keyframes"))?;
    if keyframes.windows(2).any(|w| w[1].at < w[0].at) {
        return Err(SyntropyError::validation(
            "timeline keyframes must be in time order",
        ));
    }

    let total = timeline_frame_count(keyframes, cfg);
    let mut shown = 0usize;
    let mut frame: FrameRGBA = backend.render_scene(&compose(first.identifier)?)?;
    sink.begin(SinkConfig {
        width: frame.width,
        height: frame.height,
        fps: cfg.fps,
    })?;

    for idx in 0..total {
        let t = Millis(first.at.0 + cfg.fps.frame_to_millis(idx).0);
        let k = keyframes.partition_point(|kf| kf.at <= t).saturating_sub(1);
        if k != shown {
            frame = backend.render_scene(&compose(keyframes[k].identifier)?)?;
            shown = k;
        }
        sink.push_frame(idx, &frame)?;
    }
    sink.end()?;

    tracing::debug!(frames = total, keyframes = keyframes.len(), "timeline recorded");
    Ok(total)
}

/// Record a simulated travel as full compositions.
#[tracing::instrument(skip_all, fields(steps = steps.len()))]
pub fn record_travel(
    steps: &[TravelStep],
    opts: &DisplayOptions,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    cfg: &RecordConfig,
) -> SyntropyResult<u64> {
    let keyframes: Vec<Keyframe> = steps.iter().map(Keyframe::from).collect();
    record_timeline(&keyframes, backend, sink, cfg, |id| Ok(compose_frame(id, opts)))
}

/// Record the intro reveal as square tiles of side `tile_size`.
#[tracing::instrument(skip_all, fields(steps = steps.len(), tile_size))]
pub fn record_intro(
    steps: &[IntroStep],
    tile_size: u32,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    cfg: &RecordConfig,
) -> SyntropyResult<u64> {
    let keyframes: Vec<Keyframe> = steps.iter().map(Keyframe::from).collect();
    record_timeline(&keyframes, backend, sink, cfg, |id| {
        compose_tile(&FeatureVector::of(id), tile_size)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/record.rs"]
mod tests;
