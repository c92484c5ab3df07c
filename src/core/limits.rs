//! Compile-time ceilings enforced at initialization and on string writes.

/// Maximum number of charts in one dashboard.
pub const MAX_CHARTS: usize = 32;

/// Maximum number of columns in one chart.
pub const MAX_COLUMNS: usize = 128;

/// Characters kept from a column label; longer input is truncated on write.
pub const MAX_LABEL_LEN: usize = 64;

/// Characters kept from a chart title.
pub const MAX_TITLE_LEN: usize = 64;

/// Characters kept from the window title.
pub const MAX_WINDOW_TITLE_LEN: usize = 128;

/// Truncates `text` to at most `max_chars` characters without splitting a code point.
#[must_use]
pub fn bounded_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_owned(),
        None => text.to_owned(),
    }
}
