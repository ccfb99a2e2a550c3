//! Track bar and time text for the widget.

/// Glyph for the elapsed part of the track.
pub const FILLED: char = '━';
/// Glyph for the remaining part of the track.
pub const EMPTY: char = '─';
/// Position indicator glyph.
pub const INDICATOR: char = '●';

/// Format seconds as zero-padded `mm:ss`.
///
/// Fractional seconds are truncated. NaN, infinite and negative inputs
/// (unknown durations) format as `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Build the track cells for a display percentage.
///
/// Returns the cells and the number of filled cells. The indicator sits on
/// the first unfilled cell, or on the last cell once the track is full.
pub fn build_track_cells(width: usize, percentage: f64) -> (Vec<char>, usize) {
    if width == 0 {
        return (Vec::new(), 0);
    }
    let progress = if percentage.is_finite() {
        (percentage / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (width as f64 * progress) as usize;

    let mut cells: Vec<char> = (0..width)
        .map(|i| if i < filled { FILLED } else { EMPTY })
        .collect();
    cells[filled.min(width - 1)] = INDICATOR;

    (cells, filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_formats_correctly() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(200.0), "03:20");
        assert_eq!(format_time(3661.0), "61:01");
    }

    #[test]
    fn format_time_edge_cases() {
        // Fractional seconds are truncated
        assert_eq!(format_time(0.9), "00:00");
        assert_eq!(format_time(59.9), "00:59");
        // Unknown durations
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
        assert_eq!(format_time(-5.0), "00:00");
    }

    #[test]
    fn empty_track_at_zero() {
        let (cells, filled) = build_track_cells(10, 0.0);
        assert_eq!(filled, 0);
        assert_eq!(cells[0], INDICATOR);
        assert!(cells[1..].iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn half_track() {
        let (cells, filled) = build_track_cells(10, 50.0);
        assert_eq!(filled, 5);
        assert!(cells[..5].iter().all(|&c| c == FILLED));
        assert_eq!(cells[5], INDICATOR);
    }

    #[test]
    fn full_track_keeps_indicator_on_last_cell() {
        let (cells, filled) = build_track_cells(10, 100.0);
        assert_eq!(filled, 10);
        assert_eq!(cells[9], INDICATOR);
        assert_eq!(cells.len(), 10);
    }

    #[test]
    fn out_of_range_percentages_clamp() {
        assert_eq!(build_track_cells(10, 250.0).1, 10);
        assert_eq!(build_track_cells(10, -3.0).1, 0);
        assert_eq!(build_track_cells(10, f64::NAN).1, 0);
    }

    #[test]
    fn zero_width_track_is_empty() {
        assert_eq!(build_track_cells(0, 50.0), (Vec::new(), 0));
    }
}
