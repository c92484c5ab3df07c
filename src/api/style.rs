use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Colors shared by every chart, replaced as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub background: Color,
    pub chart_title: Color,
    pub column_label: Color,
    pub value1: Color,
    pub value2: Color,
    pub border: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Color::rgb(240, 240, 255),
            chart_title: Color::rgb(0, 0, 200),
            column_label: Color::rgb(0, 0, 0),
            value1: Color::rgb(0, 200, 0),
            value2: Color::rgb(200, 200, 200),
            border: Color::rgb(80, 80, 80),
        }
    }
}
