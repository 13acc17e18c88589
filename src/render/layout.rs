//! Fixed geometry of the full composition and the diagram tiles.

use crate::foundation::core::{Point, Rect};

pub const CANVAS_W: f64 = 1080.0;
pub const CANVAS_H: f64 = 1350.0;
pub const FRAME_W: f64 = 900.0;
pub const FRAME_H: f64 = 1170.0;
pub const FRAME_X: f64 = (CANVAS_W - FRAME_W) / 2.0;
pub const FRAME_Y: f64 = (CANVAS_H - FRAME_H) / 2.0;
pub const TILE: f64 = 180.0;
pub const GRID_X: f64 = FRAME_X + TILE;
pub const GRID_Y: f64 = FRAME_Y + (FRAME_H - 900.0) / 2.0 + TILE;
pub const GRID_SIZE: f64 = 3.0 * TILE;
pub const DIAMOND_SIZE: f64 = 90.0;

pub const LABEL_INSET: f64 = 32.0;
pub const LABEL_SIZE_PX: f32 = 22.0;

pub const DIAGRAM_SIZE: f64 = 270.0;
pub const DIAGRAM_CELL: f64 = DIAGRAM_SIZE / 3.0;

/// Side of the square space the overlay segments are authored in.
pub const OVERLAY_SPACE: f64 = 540.0;

/// Overlay line art as `(x1, y1, x2, y2)` in [`OVERLAY_SPACE`] coordinates. Several segments run
/// past the grid and are clipped to it.
pub const OVERLAY_SEGMENTS: [(f64, f64, f64, f64); 20] = [
    (0.3, 0.0, 0.3, 540.0),
    (180.0, 0.0, 180.0, 540.0),
    (360.0, 0.0, 360.0, 540.0),
    (539.7, 0.0, 539.7, 540.0),
    (0.0, 0.3, 540.0, 0.3),
    (0.0, 180.0, 540.0, 180.0),
    (0.0, 360.0, 540.0, 360.0),
    (0.0, 539.7, 540.0, 539.7),
    (721.0, 657.0, -115.5, -179.5),
    (721.0, 837.0, -115.5, 0.5),
    (884.0, 640.0, 47.5, -196.5),
    (591.5, 655.5, -245.0, -181.0),
    (591.5, 835.5, -245.0, -1.0),
    (754.5, 638.5, -82.0, -198.0),
    (-232.0, 656.0, 604.5, -180.5),
    (127.0, 657.0, 963.5, -179.5),
    (-232.0, 836.0, 604.5, -0.5),
    (-230.5, 526.5, 606.0, -310.0),
    (116.0, 540.0, 965.0, -309.0),
    (-230.5, 706.5, 606.0, -130.0),
];

pub fn frame_rect() -> Rect {
    Rect::new(FRAME_X, FRAME_Y, FRAME_X + FRAME_W, FRAME_Y + FRAME_H)
}

pub fn grid_rect() -> Rect {
    Rect::new(GRID_X, GRID_Y, GRID_X + GRID_SIZE, GRID_Y + GRID_SIZE)
}

/// Top-left corner of square `(row, col)` on the full composition.
pub fn square_origin(row: usize, col: usize) -> Point {
    Point::new(GRID_X + col as f64 * TILE, GRID_Y + row as f64 * TILE)
}

/// Centre of diamond `(row, col)`: interior grid intersection `(row + 1, col + 1)`.
pub fn diamond_center(row: usize, col: usize) -> Point {
    Point::new(
        GRID_X + (col + 1) as f64 * TILE,
        GRID_Y + (row + 1) as f64 * TILE,
    )
}
