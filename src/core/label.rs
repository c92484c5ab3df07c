use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Direction column label text runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelOrientation {
    /// Left to right, below the bar.
    #[default]
    Horizontal,
    /// Bottom to top, anchored just under the bar.
    VerticalBottomLeft,
    /// Bottom to top, anchored at the floor of the label margin.
    VerticalBottomRight,
}

impl LabelOrientation {
    #[must_use]
    pub fn is_vertical(self) -> bool {
        !matches!(self, Self::Horizontal)
    }
}

/// Side of the column the label box hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelAlignment {
    #[default]
    Left,
    Right,
}

/// Per-chart label options, applied to every column of that chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LabelOptions {
    #[serde(default)]
    pub orientation: LabelOrientation,
    #[serde(default)]
    pub alignment: LabelAlignment,
    /// Maximum characters displayed, `0` meaning unlimited.
    #[serde(default)]
    pub max_chars: usize,
}

impl LabelOptions {
    #[must_use]
    pub const fn new(
        orientation: LabelOrientation,
        alignment: LabelAlignment,
        max_chars: usize,
    ) -> Self {
        Self {
            orientation,
            alignment,
            max_chars,
        }
    }
}

/// Applies the display truncation policy to a label.
///
/// Text within `max_chars` (or any text when `max_chars == 0`) is returned
/// unchanged. Limits of 3 or fewer hard-cut without an ellipsis; larger limits
/// keep `max_chars - 3` characters followed by `"..."`.
#[must_use]
pub fn format_label(text: &str, max_chars: usize) -> Cow<'_, str> {
    if max_chars == 0 {
        return Cow::Borrowed(text);
    }
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return Cow::Borrowed(text);
    };
    if max_chars <= 3 {
        return Cow::Borrowed(&text[..cut]);
    }
    let keep = text
        .char_indices()
        .nth(max_chars - 3)
        .map_or(text.len(), |(idx, _)| idx);
    let mut truncated = String::with_capacity(keep + 3);
    truncated.push_str(&text[..keep]);
    truncated.push_str("...");
    Cow::Owned(truncated)
}
