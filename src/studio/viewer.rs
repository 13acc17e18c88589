//! Image viewer that zooms a gallery thumbnail into a centred, aspect-locked rectangle.
//!
//! The viewer is driven by the same `tick(now)` clock as the rest of the studio; hosts read
//! [`Viewer::transform`] every frame and apply it to the enlarged image.

use crate::{animation::ease::Ease, foundation::core::Millis};

pub const OPEN_MS: u64 = 400;
pub const CLOSE_MS: u64 = 350;
/// Delay after a close request at which the thumbnail is restored and the viewer emptied.
pub const COMMIT_MS: u64 = 380;
/// Portion of the viewport the enlarged image may occupy on each axis.
pub const VIEWPORT_FILL: f64 = 0.9;
/// Width over height of every gallery image.
pub const IMAGE_ASPECT: f64 = 1080.0 / 1350.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned on-screen rectangle in CSS-like pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// The largest [`IMAGE_ASPECT`] rectangle within 90% of `viewport`, centred.
pub fn target_rect(viewport: Viewport) -> ScreenRect {
    let max_w = viewport.width * VIEWPORT_FILL;
    let max_h = viewport.height * VIEWPORT_FILL;
    let mut w = max_w;
    let mut h = w / IMAGE_ASPECT;
    if h > max_h {
        h = max_h;
        w = h * IMAGE_ASPECT;
    }
    ScreenRect {
        left: (viewport.width - w) / 2.0,
        top: (viewport.height - h) / 2.0,
        width: w,
        height: h,
    }
}

/// Translate-then-scale applied to the enlarged image, relative to its target rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ViewerTransform {
    pub tx: f64,
    pub ty: f64,
    pub sx: f64,
    pub sy: f64,
}

impl ViewerTransform {
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        sx: 1.0,
        sy: 1.0,
    };

    /// Transform that makes `target` cover `thumb` exactly.
    pub fn onto(thumb: ScreenRect, target: ScreenRect) -> Self {
        let (tcx, tcy) = thumb.center();
        let (cx, cy) = target.center();
        Self {
            tx: tcx - cx,
            ty: tcy - cy,
            sx: thumb.width / target.width,
            sy: thumb.height / target.height,
        }
    }

    pub fn lerp(self, to: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            tx: mix(self.tx, to.tx),
            ty: mix(self.ty, to.ty),
            sx: mix(self.sx, to.sx),
            sy: mix(self.sy, to.sy),
        }
    }
}

/// The thumbnail a viewer session was opened from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewerSource {
    /// Image source, e.g. `syntropy-5290.jpg`.
    pub src: String,
    pub alt: String,
    /// Thumbnail rectangle on screen when the session started.
    pub rect: ScreenRect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewerPhase {
    Closed,
    Opening {
        started: Millis,
    },
    Open,
    /// `from` is the transform at the moment of the close request, so a close during the open
    /// animation shrinks from wherever the image had got to.
    Closing {
        started: Millis,
        from: ViewerTransform,
    },
}

#[derive(Clone, Debug)]
pub struct Viewer {
    viewport: Viewport,
    phase: ViewerPhase,
    source: Option<ViewerSource>,
    image_src: String,
    ease: Ease,
}

impl Viewer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            phase: ViewerPhase::Closed,
            source: None,
            image_src: String::new(),
            ease: Ease::STANDARD,
        }
    }

    /// Follow a resized window. The target rectangle is recomputed from the live viewport on
    /// every frame, so an open session re-centres and closes onto the right size.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn phase(&self) -> ViewerPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.phase, ViewerPhase::Closed)
    }

    pub fn source(&self) -> Option<&ViewerSource> {
        self.source.as_ref()
    }

    /// Source of the enlarged image; empty when no session is active.
    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    /// Whether the backdrop is shown. It fades out as soon as closing begins.
    pub fn backdrop_visible(&self) -> bool {
        matches!(
            self.phase,
            ViewerPhase::Opening { .. } | ViewerPhase::Open
        )
    }

    /// A thumbnail is hidden for the whole session it started, including the close animation.
    pub fn thumbnail_visible(&self, src: &str) -> bool {
        self.source.as_ref().is_none_or(|s| s.src != src)
    }

    pub fn target_rect(&self) -> ScreenRect {
        target_rect(self.viewport)
    }

    /// Start zooming `source` in. Ignored unless the viewer is fully closed.
    pub fn open(&mut self, source: ViewerSource, now: Millis) -> bool {
        if self.is_open() {
            return false;
        }
        tracing::debug!(src = %source.src, "viewer opening");
        self.image_src = source.src.clone();
        self.source = Some(source);
        self.phase = ViewerPhase::Opening { started: now };
        true
    }

    /// Start zooming back to the thumbnail. A no-op when nothing is open or already closing.
    pub fn close(&mut self, now: Millis) -> bool {
        match self.phase {
            ViewerPhase::Opening { .. } | ViewerPhase::Open => {
                let from = self.transform(now);
                self.phase = ViewerPhase::Closing { started: now, from };
                true
            }
            ViewerPhase::Closed | ViewerPhase::Closing { .. } => false,
        }
    }

    pub fn tick(&mut self, now: Millis) {
        match self.phase {
            ViewerPhase::Opening { started } if now.since(started) >= OPEN_MS => {
                self.phase = ViewerPhase::Open;
            }
            ViewerPhase::Closing { started, .. } if now.since(started) >= COMMIT_MS => {
                self.phase = ViewerPhase::Closed;
                self.source = None;
                self.image_src.clear();
                tracing::debug!("viewer closed");
            }
            _ => {}
        }
    }

    /// Transform of the enlarged image at `now`; identity when closed.
    pub fn transform(&self, now: Millis) -> ViewerTransform {
        let Some(source) = self.source.as_ref() else {
            return ViewerTransform::IDENTITY;
        };
        let thumb = ViewerTransform::onto(source.rect, self.target_rect());
        match self.phase {
            ViewerPhase::Closed | ViewerPhase::Open => ViewerTransform::IDENTITY,
            ViewerPhase::Opening { started } => {
                let t = self.ease.apply(progress(now.since(started), OPEN_MS));
                thumb.lerp(ViewerTransform::IDENTITY, t)
            }
            ViewerPhase::Closing { started, from } => {
                let t = self.ease.apply(progress(now.since(started), CLOSE_MS));
                from.lerp(thumb, t)
            }
        }
    }
}

fn progress(elapsed: u64, duration: u64) -> f64 {
    (elapsed as f64 / duration as f64).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/studio/viewer.rs"]
mod tests;
