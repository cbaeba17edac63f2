//! Per-visitor color coding.
//!
//! Visitors are ordered by name and colored by index, wrapping after
//! eight. The assignment is stable as long as the visitor set is.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::visitor::Visitor;

/// The fixed visitor palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Green,
    Amber,
    Red,
    Violet,
    Pink,
    Cyan,
    Orange,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Blue,
        Color::Green,
        Color::Amber,
        Color::Red,
        Color::Violet,
        Color::Pink,
        Color::Cyan,
        Color::Orange,
    ];

    pub fn for_index(idx: usize) -> Color {
        Color::ALL[idx % Color::ALL.len()]
    }

    pub fn hex(self) -> &'static str {
        match self {
            Color::Blue => "#3b82f6",
            Color::Green => "#10b981",
            Color::Amber => "#f59e0b",
            Color::Red => "#ef4444",
            Color::Violet => "#8b5cf6",
            Color::Pink => "#ec4899",
            Color::Cyan => "#06b6d4",
            Color::Orange => "#f97316",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Blue => (0x3b, 0x82, 0xf6),
            Color::Green => (0x10, 0xb9, 0x81),
            Color::Amber => (0xf5, 0x9e, 0x0b),
            Color::Red => (0xef, 0x44, 0x44),
            Color::Violet => (0x8b, 0x5c, 0xf6),
            Color::Pink => (0xec, 0x48, 0x99),
            Color::Cyan => (0x06, 0xb6, 0xd4),
            Color::Orange => (0xf9, 0x73, 0x16),
        }
    }
}

/// Assign each visitor a color, keyed by visitor id.
pub fn assign_colors(visitors: &[Visitor]) -> HashMap<String, Color> {
    let mut ordered: Vec<&Visitor> = visitors.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    ordered
        .into_iter()
        .enumerate()
        .map(|(idx, v)| (v.id.clone(), Color::for_index(idx)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(id: &str, name: &str) -> Visitor {
        Visitor {
            id: id.to_string(),
            user_id: None,
            name: name.to_string(),
            description: None,
            created_at: None,
        }
    }

    #[test]
    fn test_colors_follow_name_order() {
        let visitors = vec![visitor("b", "Zoe"), visitor("a", "Ana")];
        let colors = assign_colors(&visitors);
        assert_eq!(colors["a"], Color::Blue);
        assert_eq!(colors["b"], Color::Green);
    }

    #[test]
    fn test_palette_wraps_after_eight() {
        let visitors: Vec<Visitor> = (0..9)
            .map(|i| visitor(&format!("id{i}"), &format!("visitor-{i}")))
            .collect();
        let colors = assign_colors(&visitors);
        assert_eq!(colors["id0"], Color::Blue);
        assert_eq!(colors["id8"], Color::Blue);
        assert_eq!(colors["id7"], Color::Orange);
    }

    #[test]
    fn test_hex_and_rgb_agree() {
        for color in Color::ALL {
            let (r, g, b) = color.rgb();
            assert_eq!(color.hex(), format!("#{r:02x}{g:02x}{b:02x}"));
        }
    }
}
