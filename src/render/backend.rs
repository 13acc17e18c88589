use crate::{
    foundation::error::{SyntropyError, SyntropyResult},
    render::{scene::Scene, text::LabelFont},
};

/// Pixels produced by a [`RenderBackend`], row-major RGBA8 at device resolution.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// `vello_cpu` output is premultiplied; stills and video flatten it over black.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// A rasterizer for [`Scene`]s.
///
/// Backends hold caches (fonts, shaping contexts) but no composition state: rendering the same
/// scene twice yields the same pixels.
pub trait RenderBackend {
    fn render_scene(&mut self, scene: &Scene) -> SyntropyResult<FrameRGBA>;
}

/// Which rasterizer [`create_backend`] builds.
#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    Cpu,
}

/// Output scale and label font shared by every backend.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Device pixels per canvas unit.
    pub pixel_density: u32,
    /// Font for labels; text ops are skipped when absent.
    pub font: Option<LabelFont>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            pixel_density: 1,
            font: None,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> SyntropyResult<()> {
        if !(1..=8).contains(&self.pixel_density) {
            return Err(SyntropyError::validation(
                "pixel_density must be in [1, 8]",
            ));
        }
        Ok(())
    }
}

/// Build a boxed backend of `kind`, validating `settings` first.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> SyntropyResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        )?)),
    }
}
