//! Obstacle type to icon lookup

use serde::Serialize;

use crate::sim::ObstacleKind;

/// Icon name plus 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Glyph {
    pub icon: &'static str,
    pub color: u32,
}

impl Glyph {
    /// `#RRGGBB` form of the color
    pub fn color_hex(&self) -> String {
        format!("#{:06X}", self.color)
    }
}

/// Look up the glyph for an obstacle type name; unknown names draw nothing
pub fn glyph_for(kind: &str) -> Option<Glyph> {
    let (icon, color) = match kind {
        "bullet" => ("dot-circle-o", 0xFF6347),
        "grenade" => ("bomb", 0x8B0000),
        "tank" => ("rocket", 0x556B2F),
        "missile" => ("arrow-up", 0xFFD700),
        "barrel" => ("cubes", 0x8B4513),
        "shield" => ("shield", 0x4682B4),
        "spike" => ("caret-up", 0xB22222),
        "mine" => ("rocket", 0x808080),
        "cubes" => ("th-large", 0x708090),
        _ => return None,
    };
    Some(Glyph { icon, color })
}

/// Glyph for a spawned obstacle kind
pub fn glyph_for_kind(kind: ObstacleKind) -> Option<Glyph> {
    glyph_for(kind.as_str())
}
