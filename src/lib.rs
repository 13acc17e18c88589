//! Syntropy turns a 13-bit identifier into a deterministic generative composition.
//!
//! - [`encoding`] maps identifiers to feature vectors and three-word names
//! - [`render`] projects them into backend-agnostic [`Scene`]s and rasterizes those on the CPU
//! - [`animation`] drives the randomized travel sequence and the scripted intro reveal
//! - [`studio`] holds the interactive application state and the image viewer
//! - [`export`] writes stills, gallery batches and MP4 recordings
#![forbid(unsafe_code)]

pub mod animation;
pub mod encoding;
pub mod export;
mod foundation;
pub mod render;
pub mod studio;

pub use crate::foundation::config::StudioConfig;
pub use crate::foundation::core::{Affine, BezPath, Canvas, Fps, Millis, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{SyntropyError, SyntropyResult};

pub use crate::animation::cue::{Cue, CueTrack, Note, TimedCue};
pub use crate::animation::curve::GapCurve;
pub use crate::animation::ease::Ease;
pub use crate::animation::intro::{INTRO_TARGET, IntroReveal, IntroStep, build_intro_sequence};
pub use crate::animation::travel::{TravelDriver, TravelState, TravelStep, simulate_travel};
pub use crate::encoding::features::{FeatureVector, feature_vector};
pub use crate::encoding::identifier::{Identifier, MAX_IDENTIFIER, random_identifier};
pub use crate::encoding::name::{IdentityName, name};
pub use crate::export::{
    FfmpegSink, FfmpegSinkOpts, FrameSink, GalleryOptions, InMemorySink, RecordConfig,
    SinkConfig, StillFormat, export_file_name, gallery_label, parse_gallery_identifier,
    record_intro, record_travel, render_gallery, save_frame,
};
pub use crate::render::{
    Accent, BackendKind, CpuBackend, DiagramMode, DisplayOptions, FrameRGBA, LabelFont,
    RenderBackend, RenderSettings, Scene, compose_diagram, compose_frame, compose_tile,
    create_backend,
};
pub use crate::studio::{Studio, StudioEffect, StudioEvent, Viewer, ViewerSource, Viewport};
