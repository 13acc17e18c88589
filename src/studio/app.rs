use std::path::{Path, PathBuf};

use rand::Rng;

use crate::{
    animation::{
        cue::Cue,
        travel::{TravelDriver, TravelState, TravelStep},
    },
    encoding::{features::FeatureVector, identifier::Identifier, name::IdentityName},
    export::still::{StillFormat, export_file_name, save_frame},
    foundation::core::Millis,
    foundation::error::SyntropyResult,
    render::{
        backend::RenderBackend, compose::compose_frame, options::DisplayOptions, scene::Scene,
    },
    studio::viewer::{Viewer, ViewerSource, Viewport},
};

/// Discrete UI inputs.
#[derive(Clone, Debug, PartialEq)]
pub enum StudioEvent {
    /// Jump to a uniformly random identifier.
    Randomize,
    /// Replace the decimal text field.
    SetDecimal(String),
    /// Jump to the identifier typed in the decimal field, if it is valid.
    Jump,
    ToggleGrid,
    ToggleAccent,
    Travel,
    Save,
    OpenViewer(ViewerSource),
    CloseViewer,
    Escape,
    /// The host window changed size.
    Resize(Viewport),
}

/// What the host should do in response to an event or tick.
#[derive(Clone, Debug, PartialEq)]
pub enum StudioEffect {
    /// The composition changed; draw [`Studio::scene`] again.
    Rerender,
    /// Play an audio cue.
    Cue(Cue),
    /// Download the current composition under `file_name`.
    Export {
        file_name: String,
        format: StillFormat,
    },
}

/// Application state of the interactive generator.
///
/// The current identifier is only mutated through [`Studio::handle`] and [`Studio::tick`], and a
/// running travel owns it until the landing step.
#[derive(Clone, Debug)]
pub struct Studio {
    current: Identifier,
    options: DisplayOptions,
    decimal: String,
    travel: TravelDriver,
    viewer: Viewer,
    jpeg_quality: u8,
}

impl Studio {
    pub fn new(initial: Identifier, viewport: Viewport) -> Self {
        Self {
            current: initial,
            options: DisplayOptions::default(),
            decimal: String::new(),
            travel: TravelDriver::default(),
            viewer: Viewer::new(viewport),
            jpeg_quality: crate::export::still::DEFAULT_JPEG_QUALITY,
        }
    }

    /// Start on a random identifier, as the page does on load.
    pub fn random<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        Self::new(Identifier::random(rng), viewport)
    }

    pub fn with_travel(mut self, travel: TravelDriver) -> Self {
        self.travel = travel;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn current(&self) -> Identifier {
        self.current
    }

    pub fn features(&self) -> FeatureVector {
        FeatureVector::of(self.current)
    }

    pub fn name(&self) -> IdentityName {
        IdentityName::of(self.current)
    }

    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    pub fn decimal(&self) -> &str {
        &self.decimal
    }

    pub fn travel_state(&self) -> TravelState {
        self.travel.state()
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn scene(&self) -> Scene {
        compose_frame(self.current, &self.options)
    }

    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        event: StudioEvent,
        now: Millis,
        rng: &mut R,
    ) -> Vec<StudioEffect> {
        tracing::debug!(?event, at = now.0, "studio event");
        match event {
            StudioEvent::Randomize => {
                if self.travel.is_busy() {
                    return Vec::new();
                }
                self.current = Identifier::random(rng);
                self.decimal.clear();
                vec![StudioEffect::Rerender]
            }
            StudioEvent::SetDecimal(text) => {
                self.decimal = text;
                Vec::new()
            }
            StudioEvent::Jump => {
                if self.travel.is_busy() {
                    return Vec::new();
                }
                match Identifier::parse_decimal(&self.decimal) {
                    Some(id) => {
                        self.current = id;
                        vec![StudioEffect::Rerender]
                    }
                    None => Vec::new(),
                }
            }
            StudioEvent::ToggleGrid => {
                self.options.show_grid = !self.options.show_grid;
                vec![StudioEffect::Rerender]
            }
            StudioEvent::ToggleAccent => {
                self.options.accent = self.options.accent.toggled();
                vec![StudioEffect::Rerender]
            }
            StudioEvent::Travel => match self.travel.start(now, self.current, rng) {
                Some(steps) => {
                    self.decimal.clear();
                    self.apply_steps(&steps)
                }
                None => Vec::new(),
            },
            StudioEvent::Save => vec![StudioEffect::Export {
                file_name: export_file_name(self.current),
                format: StillFormat::Jpeg {
                    quality: self.jpeg_quality,
                },
            }],
            StudioEvent::OpenViewer(source) => {
                self.viewer.open(source, now);
                Vec::new()
            }
            StudioEvent::CloseViewer | StudioEvent::Escape => {
                self.viewer.close(now);
                Vec::new()
            }
            StudioEvent::Resize(viewport) => {
                self.viewer.set_viewport(viewport);
                Vec::new()
            }
        }
    }

    /// Advance travel and viewer timers to `now`.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) -> Vec<StudioEffect> {
        self.viewer.tick(now);
        let steps = self.travel.tick(now, rng);
        self.apply_steps(&steps)
    }

    /// Render the current composition and write it to `dir` under its export name.
    pub fn save_to(&self, backend: &mut dyn RenderBackend, dir: &Path) -> SyntropyResult<PathBuf> {
        let frame = backend.render_scene(&self.scene())?;
        let path = dir.join(export_file_name(self.current));
        save_frame(
            &frame,
            &path,
            StillFormat::Jpeg {
                quality: self.jpeg_quality,
            },
        )?;
        Ok(path)
    }

    fn apply_steps(&mut self, steps: &[TravelStep]) -> Vec<StudioEffect> {
        let mut effects = Vec::with_capacity(steps.len() * 2);
        for step in steps {
            self.current = step.identifier;
            effects.push(StudioEffect::Rerender);
            effects.push(StudioEffect::Cue(step.cue));
        }
        effects
    }
}

#[cfg(test)]
#[path = "../../tests/unit/studio/app.rs"]
mod tests;
