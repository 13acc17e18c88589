use std::{path::Path, sync::Arc};

use crate::{
    foundation::core::Rgba8,
    foundation::error::{SyntropyError, SyntropyResult},
};

/// Font bytes used for canvas labels.
#[derive(Clone)]
pub struct LabelFont {
    bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl LabelFont {
    pub fn from_bytes(bytes: Vec<u8>) -> SyntropyResult<Self> {
        if bytes.is_empty() {
            return Err(SyntropyError::validation("font file is empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
        })
    }

    pub fn from_path(path: &Path) -> SyntropyResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            SyntropyError::validation(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Shapes single-line labels with one registered font family.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` and remember its primary family name.
    pub fn new(font: &LabelFont) -> SyntropyResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            SyntropyError::validation("font bytes contain no usable family")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SyntropyError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> SyntropyResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SyntropyError::validation(
                "label size must be a positive number of pixels",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
