use crate::{
    foundation::core::{Affine, Point, Rect, Rgba8},
    foundation::error::{SyntropyError, SyntropyResult},
    render::{
        backend::{FrameRGBA, RenderBackend, RenderSettings},
        scene::{DrawOp, Scene, TextAnchor},
        text::TextLayoutEngine,
    },
};

/// CPU backend powered by `vello_cpu` for vector/text rasterization.
pub struct CpuBackend {
    settings: RenderSettings,
    text: Option<LabelText>,
    warned_missing_font: bool,
}

struct LabelText {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> SyntropyResult<Self> {
        settings.validate()?;
        let text = match &settings.font {
            Some(font) => Some(LabelText {
                engine: TextLayoutEngine::new(font)?,
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
                    0,
                ),
            }),
            None => None,
        };
        Ok(Self {
            settings,
            text,
            warned_missing_font: false,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        base: Affine,
        op: &DrawOp,
    ) -> SyntropyResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match op {
            DrawOp::FillRect {
                rect,
                transform,
                color,
            } => {
                ctx.set_transform(affine_to_cpu(base * *transform));
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&rect_to_cpu(*rect));
            }
            DrawOp::StrokeRect { rect, width, color } => {
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(Point::new(rect.x0, rect.y0)));
                path.line_to(point_to_cpu(Point::new(rect.x1, rect.y0)));
                path.line_to(point_to_cpu(Point::new(rect.x1, rect.y1)));
                path.line_to(point_to_cpu(Point::new(rect.x0, rect.y1)));
                path.close_path();
                ctx.set_transform(affine_to_cpu(base));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&path);
            }
            DrawOp::StrokeLines {
                lines,
                width,
                color,
            } => {
                if lines.is_empty() {
                    return Ok(());
                }
                let mut path = vello_cpu::kurbo::BezPath::new();
                for (a, b) in lines {
                    path.move_to(point_to_cpu(*a));
                    path.line_to(point_to_cpu(*b));
                }
                ctx.set_transform(affine_to_cpu(base));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&path);
            }
            DrawOp::Text {
                text,
                anchor,
                align,
                size_px,
                color,
            } => {
                let Some(label) = self.text.as_mut() else {
                    if !self.warned_missing_font {
                        tracing::warn!("no label font configured; text labels are skipped");
                        self.warned_missing_font = true;
                    }
                    return Ok(());
                };
                let layout = label.engine.layout_line(text, *size_px, *color)?;
                let (w, h) = (f64::from(layout.width()), f64::from(layout.height()));
                let origin = match align {
                    TextAnchor::TopLeft => *anchor,
                    TextAnchor::BottomLeft => Point::new(anchor.x, anchor.y - h),
                    TextAnchor::BottomRight => Point::new(anchor.x - w, anchor.y - h),
                };
                ctx.set_transform(affine_to_cpu(base * Affine::translate(origin.to_vec2())));
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let brush = run.style().brush;
                        ctx.set_paint(color_to_cpu(brush));
                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&label.font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            }
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip(self, scene), fields(ops = scene.ops.len()))]
    fn render_scene(&mut self, scene: &Scene) -> SyntropyResult<FrameRGBA> {
        let density = self.settings.pixel_density;
        let out = scene.canvas.scaled(density);
        let width_u16: u16 = out
            .width
            .try_into()
            .map_err(|_| SyntropyError::render("surface width exceeds u16"))?;
        let height_u16: u16 = out
            .height
            .try_into()
            .map_err(|_| SyntropyError::render("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(SyntropyError::render("surface must be non-empty"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(scene.background));
        ctx.fill_rect(&rect_to_cpu(out.rect()));

        let base = Affine::scale(f64::from(density));
        for op in &scene.ops {
            self.draw_op(&mut ctx, base, op)?;
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: out.width,
            height: out.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
