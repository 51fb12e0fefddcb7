//! Dither pattern drawing for e-ink style overlays.
//!
//! Selections and hovers are drawn as a checkerboard rather than an opaque
//! fill, so the text underneath stays legible.

use egui::{Color32, Painter, Pos2, Rect};

/// Draw a checkerboard dither pattern over a rectangle.
/// `density` controls spacing: 1 = every other pixel, 2 = sparser.
pub fn draw_dither_rect(painter: &Painter, rect: Rect, color: Color32, density: u32) {
    let step = density.max(1) as i32;

    let x0 = rect.min.x as i32;
    let y0 = rect.min.y as i32;
    let x1 = rect.max.x as i32;
    let y1 = rect.max.y as i32;

    let mut y = y0;
    while y < y1 {
        let row_offset = if (y - y0) % (step * 2) < step { 0 } else { step };
        let mut x = x0 + row_offset;
        while x < x1 {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x as f32, y as f32), egui::Vec2::splat(1.0)),
                0.0,
                color,
            );
            x += step * 2;
        }
        y += step;
    }
}

/// Dithered selection highlight (classic mac style).
pub fn draw_dither_selection(painter: &Painter, rect: Rect) {
    draw_dither_rect(painter, rect, Color32::BLACK, 1);
}

/// Lighter dither for hover states.
pub fn draw_dither_hover(painter: &Painter, rect: Rect) {
    draw_dither_rect(painter, rect, Color32::BLACK, 2);
}
