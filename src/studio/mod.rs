pub mod app;
pub mod viewer;

pub use app::{Studio, StudioEffect, StudioEvent};
pub use viewer::{ScreenRect, Viewer, ViewerPhase, ViewerSource, ViewerTransform, Viewport};
