//! Pure projection of identifiers and feature vectors into [`Scene`]s.
//!
//! Nothing here touches pixels; backends rasterize the resulting ops.

use crate::{
    encoding::{features::FeatureVector, identifier::Identifier, name::IdentityName},
    foundation::core::{Affine, Canvas, Point, Rect, Rgba8},
    foundation::error::{SyntropyError, SyntropyResult},
    render::{
        layout::{
            CANVAS_H, CANVAS_W, DIAGRAM_CELL, DIAGRAM_SIZE, DIAMOND_SIZE, LABEL_INSET,
            LABEL_SIZE_PX, OVERLAY_SEGMENTS, OVERLAY_SPACE, TILE, diamond_center, frame_rect,
            grid_rect, square_origin,
        },
        options::{DiagramMode, DisplayOptions},
        scene::{DrawOp, Scene, TextAnchor},
    },
};

const OVERLAY_WIDTH: f64 = 0.6;
const DIAGRAM_OVERLAY_WIDTH: f64 = 0.5;

pub fn composition_canvas() -> Canvas {
    Canvas {
        width: CANVAS_W as u32,
        height: CANVAS_H as u32,
    }
}

pub fn diagram_canvas() -> Canvas {
    Canvas {
        width: DIAGRAM_SIZE as u32,
        height: DIAGRAM_SIZE as u32,
    }
}

/// The full composition for `id`: frame, squares, diamonds, optional overlay and labels.
///
/// Name and feature vector are both derived from `id` here so the labels can never disagree with
/// the drawing.
pub fn compose_frame(id: Identifier, opts: &DisplayOptions) -> Scene {
    let features = FeatureVector::of(id);
    let accent = opts.accent.color();
    let mut scene = Scene::new(composition_canvas(), Rgba8::BLACK);

    scene.push(DrawOp::StrokeRect {
        rect: frame_rect(),
        width: 1.0,
        color: accent,
    });

    for row in 0..3 {
        for col in 0..3 {
            let o = square_origin(row, col);
            let color = if features.square(row, col) {
                accent
            } else {
                Rgba8::BLACK
            };
            scene.fill_rect(Rect::new(o.x, o.y, o.x + TILE, o.y + TILE), color);
        }
    }

    for row in 0..2 {
        for col in 0..2 {
            let color = if features.diamond(row, col) {
                accent
            } else {
                Rgba8::BLACK
            };
            scene.fill_diamond(diamond_center(row, col), DIAMOND_SIZE, color);
        }
    }

    if opts.show_grid {
        push_overlay(&mut scene, grid_rect(), OVERLAY_WIDTH, accent);
    }

    let frame = frame_rect();
    let label = |text: String, anchor: Point, align: TextAnchor| DrawOp::Text {
        text,
        anchor,
        align,
        size_px: LABEL_SIZE_PX,
        color: accent,
    };
    scene.push(label(
        IdentityName::of(id).to_string(),
        Point::new(frame.x0 + LABEL_INSET, frame.y0 + LABEL_INSET),
        TextAnchor::TopLeft,
    ));
    scene.push(label(
        id.label(),
        Point::new(frame.x0 + LABEL_INSET, frame.y1 - LABEL_INSET),
        TextAnchor::BottomLeft,
    ));
    scene.push(label(
        id.binary_string(),
        Point::new(frame.x1 - LABEL_INSET, frame.y1 - LABEL_INSET),
        TextAnchor::BottomRight,
    ));

    scene
}

/// A 270x270 diagnostic tile showing one or both layers of `features`.
pub fn compose_diagram(features: &FeatureVector, mode: DiagramMode) -> Scene {
    let mut scene = Scene::new(diagram_canvas(), Rgba8::BLACK);

    if mode.draws_squares() {
        for row in 0..3 {
            for col in 0..3 {
                let x = col as f64 * DIAGRAM_CELL;
                let y = row as f64 * DIAGRAM_CELL;
                let color = if features.square(row, col) {
                    Rgba8::WHITE
                } else {
                    Rgba8::BLACK
                };
                scene.fill_rect(Rect::new(x, y, x + DIAGRAM_CELL, y + DIAGRAM_CELL), color);
            }
        }
    }

    if mode.draws_diamonds() {
        for row in 0..2 {
            for col in 0..2 {
                let center = Point::new(
                    (col + 1) as f64 * DIAGRAM_CELL,
                    (row + 1) as f64 * DIAGRAM_CELL,
                );
                let color = if features.diamond(row, col) {
                    Rgba8::WHITE
                } else {
                    mode.diamond_off_color()
                };
                scene.fill_diamond(center, DIAGRAM_CELL / 2.0, color);
            }
        }
    }

    push_overlay(
        &mut scene,
        Rect::new(0.0, 0.0, DIAGRAM_SIZE, DIAGRAM_SIZE),
        DIAGRAM_OVERLAY_WIDTH,
        Rgba8::WHITE.with_alpha(51),
    );
    scene
}

/// Square preview tile of side `size` with integer-snapped cell edges and no overlay.
pub fn compose_tile(features: &FeatureVector, size: u32) -> SyntropyResult<Scene> {
    if size < 3 {
        return Err(SyntropyError::validation("tile size must be at least 3px"));
    }
    let canvas = Canvas::new(size, size)?;
    let s = f64::from(size);
    let edge = |i: usize| (i as f64 * s / 3.0).floor();
    let mut scene = Scene::new(canvas, Rgba8::BLACK);

    for row in 0..3 {
        for col in 0..3 {
            let color = if features.square(row, col) {
                Rgba8::WHITE
            } else {
                Rgba8::BLACK
            };
            scene.fill_rect(Rect::new(edge(col), edge(row), edge(col + 1), edge(row + 1)), color);
        }
    }

    let cell = s / 3.0;
    for row in 0..2 {
        for col in 0..2 {
            let color = if features.diamond(row, col) {
                Rgba8::WHITE
            } else {
                Rgba8::BLACK
            };
            let center = Point::new((col + 1) as f64 * cell, (row + 1) as f64 * cell);
            scene.fill_diamond(center, cell / 2.0, color);
        }
    }
    Ok(scene)
}

fn push_overlay(scene: &mut Scene, target: Rect, width: f64, color: Rgba8) {
    let to_target = Affine::translate((target.x0, target.y0))
        * Affine::scale(target.width() / OVERLAY_SPACE);
    let space = Rect::new(0.0, 0.0, OVERLAY_SPACE, OVERLAY_SPACE);
    let lines = OVERLAY_SEGMENTS
        .iter()
        .filter_map(|&(x1, y1, x2, y2)| clip_segment(Point::new(x1, y1), Point::new(x2, y2), space))
        .map(|(a, b)| (to_target * a, to_target * b))
        .collect();
    scene.push(DrawOp::StrokeLines {
        lines,
        width,
        color,
    });
}

/// Liang-Barsky clip of segment `a`-`b` against `clip`.
pub(crate) fn clip_segment(a: Point, b: Point, clip: Rect) -> Option<(Point, Point)> {
    let d = b - a;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-d.x, a.x - clip.x0),
        (d.x, clip.x1 - a.x),
        (-d.y, a.y - clip.y0),
        (d.y, clip.y1 - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((a + d * t0, a + d * t1))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
