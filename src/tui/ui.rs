//! Layout helpers for the widget.

use ratatui::layout::Rect;

/// A box of at most `width` x `height`, centered in `area`.
///
/// Shrinks to the area when the terminal is smaller than requested.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
