//! Condition-themed icons and color palettes
//!
//! Two independent lookups over the closed condition set: a glyph standing
//! in for the weather icon and a color palette standing in for the
//! background imagery of the browser widget this tool replaces. The
//! palette table has no Drizzle entry of its own and reuses the Clear
//! ("sunny") theme for it, matching the original background map.

use ratatui::style::Color;

use crate::data::ConditionCategory;

/// Colors applied to the dashboard for a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Page-level background color
    pub background: Color,
    /// Accent color for the temperature and borders
    pub accent: Color,
}

/// Weather condition to icon glyph mapping
pub fn icon(condition: ConditionCategory) -> &'static str {
    match condition {
        ConditionCategory::Clear => "\u{2600}",        // ☀
        ConditionCategory::Clouds => "\u{2601}",       // ☁
        ConditionCategory::Rain => "\u{1F327}",        // 🌧
        ConditionCategory::Drizzle => "\u{1F326}",     // 🌦
        ConditionCategory::Thunderstorm => "\u{26A1}", // ⚡
        ConditionCategory::Snow => "\u{2744}",         // ❄
        ConditionCategory::Mist => "\u{1F32B}",        // 🌫
    }
}

/// Weather condition to color palette mapping
pub fn palette(condition: ConditionCategory) -> Theme {
    match condition {
        ConditionCategory::Clear | ConditionCategory::Drizzle => Theme {
            background: Color::Rgb(40, 34, 10),
            accent: Color::Yellow,
        },
        ConditionCategory::Clouds => Theme {
            background: Color::Rgb(30, 32, 36),
            accent: Color::Gray,
        },
        ConditionCategory::Rain => Theme {
            background: Color::Rgb(14, 24, 38),
            accent: Color::Cyan,
        },
        ConditionCategory::Thunderstorm => Theme {
            background: Color::Rgb(24, 14, 36),
            accent: Color::Magenta,
        },
        ConditionCategory::Snow => Theme {
            background: Color::Rgb(34, 38, 42),
            accent: Color::White,
        },
        ConditionCategory::Mist => Theme {
            background: Color::Rgb(26, 28, 28),
            accent: Color::DarkGray,
        },
    }
}
