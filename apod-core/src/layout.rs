pub const WIDE_BREAKPOINT: f32 = 1200.0;
pub const MEDIUM_BREAKPOINT: f32 = 750.0;

/// Gallery column count for a viewport `width` in logical pixels.
pub fn columns_for_width(width: f32) -> usize {
    if width >= WIDE_BREAKPOINT {
        3
    } else if width >= MEDIUM_BREAKPOINT {
        2
    } else {
        1
    }
}
