use std::path::Path;

use crate::{
    encoding::identifier::Identifier,
    foundation::error::{SyntropyError, SyntropyResult},
    render::backend::FrameRGBA,
};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Still-image container for exported frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StillFormat {
    Jpeg { quality: u8 },
    Png,
}

impl Default for StillFormat {
    fn default() -> Self {
        Self::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl StillFormat {
    /// Pick a format from a file extension; JPEG uses `jpeg_quality`.
    pub fn from_path(path: &Path, jpeg_quality: u8) -> SyntropyResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("jpg" | "jpeg") => Ok(Self::Jpeg {
                quality: jpeg_quality,
            }),
            Some("png") => Ok(Self::Png),
            _ => Err(SyntropyError::validation(format!(
                "unsupported image extension for '{}' (expected .jpg, .jpeg or .png)",
                path.display()
            ))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "jpg",
            Self::Png => "png",
        }
    }
}

/// `syntropy-<id>.jpg`, the name the save action downloads under.
pub fn export_file_name(id: Identifier) -> String {
    format!("syntropy-{}.jpg", id.value())
}

/// Write `frame` to `path`. Frames are flattened over black first, so JPEG and PNG output are
/// always opaque.
#[tracing::instrument(skip(frame), fields(w = frame.width, h = frame.height))]
pub fn save_frame(frame: &FrameRGBA, path: &Path, format: StillFormat) -> SyntropyResult<()> {
    ensure_parent_dir(path)?;
    let rgba = flatten_to_opaque_rgba8(frame)?;
    match format {
        StillFormat::Jpeg { quality } => {
            if !(1..=100).contains(&quality) {
                return Err(SyntropyError::validation(
                    "jpeg quality must be in [1, 100]",
                ));
            }
            let rgb: Vec<u8> = rgba
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            let file = std::fs::File::create(path).map_err(|e| {
                SyntropyError::encode(format!("failed to create '{}': {e}", path.display()))
            })?;
            let mut writer = std::io::BufWriter::new(file);
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, quality)
                .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
                .map_err(|e| {
                    SyntropyError::encode(format!("failed to write jpeg '{}': {e}", path.display()))
                })?;
        }
        StillFormat::Png => {
            image::save_buffer_with_format(
                path,
                &rgba,
                frame.width,
                frame.height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .map_err(|e| {
                SyntropyError::encode(format!("failed to write png '{}': {e}", path.display()))
            })?;
        }
    }
    tracing::debug!(path = %path.display(), "wrote still");
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> SyntropyResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Composite `frame` over opaque black into straight RGBA8 with alpha 255.
pub fn flatten_to_opaque_rgba8(frame: &FrameRGBA) -> SyntropyResult<Vec<u8>> {
    let mut out = vec![0u8; frame.data.len()];
    flatten_into(&mut out, frame)?;
    Ok(out)
}

/// [`flatten_to_opaque_rgba8`] into a caller-owned buffer of `width * height * 4` bytes.
pub(crate) fn flatten_into(dst: &mut [u8], frame: &FrameRGBA) -> SyntropyResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected || dst.len() != expected {
        return Err(SyntropyError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if frame.premultiplied || a == 255 {
            // Over black, premultiplied color is already the composited value.
            d[..3].copy_from_slice(&s[..3]);
        } else {
            for c in 0..3 {
                d[c] = mul_div255(u16::from(s[c]), a) as u8;
            }
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/export/still.rs"]
mod tests;
