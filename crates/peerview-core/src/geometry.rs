//! Work-area clamping for the overlay window.
//!
//! All coordinates are logical pixels with a top-left origin. The clamp keeps
//! the window fully inside the display work area; it never relies on the OS
//! silently clipping an out-of-range frame.

use serde::{Deserialize, Serialize};

/// Side length of the minimized chat bubble in logical pixels.
///
/// Callers that move the bubble omit explicit dimensions from `set_position`
/// and get this value for both axes.
pub const BUBBLE_SIZE: f64 = 60.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Dimensions a resize request must have to be applied at all.
pub fn is_valid_size(width: f64, height: f64) -> bool {
    width > 0.0 && height > 0.0
}

/// Clamp one axis of a window origin so `[pos, pos + len]` stays inside
/// `[area_pos, area_pos + area_len]`. A window larger than the area pins to
/// the area origin; the clamp range never goes negative.
fn clamp_axis(pos: f64, len: f64, area_pos: f64, area_len: f64) -> f64 {
    if len > area_len {
        return area_pos;
    }
    pos.max(area_pos).min(area_pos + area_len - len)
}

/// Clamp a window origin for the given window size. Idempotent: clamping an
/// already-clamped position returns it unchanged.
pub fn clamp_position(x: f64, y: f64, width: f64, height: f64, work_area: Rect) -> (f64, f64) {
    (
        clamp_axis(x, width, work_area.x, work_area.width),
        clamp_axis(y, height, work_area.y, work_area.height),
    )
}

/// Clamp a full rectangle into the work area, preserving its size.
pub fn clamp_rect(rect: Rect, work_area: Rect) -> Rect {
    let (x, y) = clamp_position(rect.x, rect.y, rect.width, rect.height, work_area);
    Rect::new(x, y, rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work_area() -> Rect {
        Rect::new(0.0, 0.0, 1920.0, 1080.0)
    }

    #[test]
    fn clamp_keeps_window_inside_work_area() {
        let wa = work_area();
        let (x, y) = clamp_position(-50.0, 2000.0, 360.0, 420.0, wa);
        assert!(x >= wa.x && x + 360.0 <= wa.right());
        assert!(y >= wa.y && y + 420.0 <= wa.bottom());
    }

    #[test]
    fn clamp_is_idempotent() {
        let wa = work_area();
        let once = clamp_rect(Rect::new(1900.0, -30.0, 360.0, 420.0), wa);
        let twice = clamp_rect(once, wa);
        assert_eq!(once, twice);
    }

    #[test]
    fn in_range_position_is_unchanged() {
        let wa = work_area();
        let rect = Rect::new(100.0, 200.0, 360.0, 420.0);
        assert_eq!(clamp_rect(rect, wa), rect);
    }

    #[test]
    fn bubble_at_bottom_right_corner() {
        let wa = work_area();
        let (x, y) = clamp_position(1900.0, 1060.0, BUBBLE_SIZE, BUBBLE_SIZE, wa);
        assert_eq!((x, y), (1860.0, 1020.0));
    }

    #[test]
    fn window_wider_than_screen_pins_to_origin() {
        let wa = work_area();
        let (x, y) = clamp_position(500.0, 500.0, 2500.0, 1500.0, wa);
        assert_eq!((x, y), (wa.x, wa.y));
    }

    #[test]
    fn offset_work_area_is_respected() {
        let wa = Rect::new(1920.0, 0.0, 1920.0, 1080.0);
        let (x, y) = clamp_position(0.0, 0.0, 360.0, 420.0, wa);
        assert_eq!((x, y), (1920.0, 0.0));
    }

    #[test]
    fn zero_or_negative_dimensions_are_invalid() {
        assert!(!is_valid_size(0.0, 420.0));
        assert!(!is_valid_size(360.0, 0.0));
        assert!(!is_valid_size(-360.0, 420.0));
        assert!(is_valid_size(360.0, 420.0));
    }

    #[test]
    fn contains_uses_half_open_edges() {
        let rect = Rect::new(10.0, 10.0, 50.0, 50.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(59.9, 59.9));
        assert!(!rect.contains(60.0, 30.0));
        assert!(!rect.contains(30.0, 60.0));
    }
}
