pub const FACTS: [&str; 6] = [
    "A day on Venus is longer than a year on Venus.",
    "Neutron stars can spin 600 times per second.",
    "There are more trees on Earth than stars in the Milky Way.",
    "Saturn could float in water because it is mostly made of gas.",
    "On Mars, the sunset is blue.",
    "In space, metal pieces can weld together in a process called cold welding.",
];

const SEPARATORS: [&str; 3] = ["🌙", "⭐", "🪐"];
const PREFIX: &str = "Did you know?";

/// One pass over the facts, each prefixed and followed by a separator.
pub fn ticker_segment() -> String {
    FACTS
        .iter()
        .enumerate()
        .map(|(index, fact)| {
            let separator = SEPARATORS[index % SEPARATORS.len()];
            format!("{PREFIX} {fact} {separator} ")
        })
        .collect()
}

/// Ticker line: two passes so the scroll can wrap without a gap.
pub fn ticker_text() -> String {
    ticker_segment().repeat(2)
}

/// Horizontal offset of the ticker after `elapsed` seconds.
///
/// `loop_width` is the width of one copy of the facts; the offset wraps there.
pub fn scroll_offset(elapsed: f64, speed: f32, loop_width: f32) -> f32 {
    if loop_width <= 0.0 || speed <= 0.0 {
        return 0.0;
    }
    ((elapsed * speed as f64) % loop_width as f64) as f32
}
