use std::path::{Path, PathBuf};

use crate::{
    export::{record::RecordConfig, still::StillFormat},
    foundation::core::Fps,
    foundation::error::{SyntropyError, SyntropyResult},
    render::{backend::RenderSettings, text::LabelFont},
};

pub const ENV_FONT: &str = "SYNTROPY_FONT";
pub const ENV_PIXEL_DENSITY: &str = "SYNTROPY_PIXEL_DENSITY";

/// Studio and CLI configuration, read from JSON. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Device pixels per canvas unit for rendered compositions.
    pub pixel_density: u32,
    pub jpeg_quality: u8,
    /// TTF/OTF used for canvas labels. Labels are skipped when unset.
    pub font: Option<PathBuf>,
    pub video_fps: u32,
    /// Hold on the final state at the end of recordings.
    pub tail_ms: u64,
    pub intro_target: u16,
    /// Side of the intro tile in pixels.
    pub intro_tile_size: u32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            pixel_density: 2,
            jpeg_quality: 95,
            font: None,
            video_fps: 30,
            tail_ms: 1000,
            intro_target: crate::animation::intro::INTRO_TARGET,
            intro_tile_size: 126,
        }
    }
}

impl StudioConfig {
    pub fn from_json_str(s: &str) -> SyntropyResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| SyntropyError::serde(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> SyntropyResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SyntropyError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Apply `SYNTROPY_FONT` and `SYNTROPY_PIXEL_DENSITY` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unparseable or out-of-range values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(font) = lookup(ENV_FONT).filter(|v| !v.trim().is_empty()) {
            self.font = Some(PathBuf::from(font));
        }
        if let Some(raw) = lookup(ENV_PIXEL_DENSITY) {
            match raw.trim().parse::<u32>().ok().filter(|d| (1..=8).contains(d)) {
                Some(density) => self.pixel_density = density,
                None => tracing::warn!(value = %raw, "ignoring invalid {ENV_PIXEL_DENSITY}"),
            }
        }
        self
    }

    pub fn validate(&self) -> SyntropyResult<()> {
        if !(1..=8).contains(&self.pixel_density) {
            return Err(SyntropyError::validation(
                "pixel_density must be in [1, 8]",
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SyntropyError::validation(
                "jpeg_quality must be in [1, 100]",
            ));
        }
        if self.video_fps == 0 {
            return Err(SyntropyError::validation("video_fps must be > 0"));
        }
        if self.intro_target > crate::encoding::identifier::MAX_IDENTIFIER {
            return Err(SyntropyError::validation(
                "intro_target must be in [0, 8191]",
            ));
        }
        if self.intro_tile_size < 3 {
            return Err(SyntropyError::validation("intro_tile_size must be >= 3"));
        }
        Ok(())
    }

    /// Renderer settings, loading the label font if one is configured.
    pub fn render_settings(&self) -> SyntropyResult<RenderSettings> {
        let font = self
            .font
            .as_deref()
            .map(LabelFont::from_path)
            .transpose()?;
        Ok(RenderSettings {
            pixel_density: self.pixel_density,
            font,
        })
    }

    pub fn record_config(&self) -> SyntropyResult<RecordConfig> {
        Ok(RecordConfig {
            fps: Fps::new(self.video_fps, 1)?,
            tail_ms: self.tail_ms,
        })
    }

    pub fn still_format(&self) -> StillFormat {
        StillFormat::Jpeg {
            quality: self.jpeg_quality,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
