//! Emoji rating picker: the five faces and the hover/selection highlight rule.

use shared::domain::{Rating, RatingField};

use crate::controller::FormMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingFace {
    pub glyph: &'static str,
    pub label: &'static str,
    pub hover_rgb: [u8; 3],
}

pub const RATING_FACES: [RatingFace; 5] = [
    RatingFace {
        glyph: "😠",
        label: "Angry",
        hover_rgb: [0xef, 0x46, 0x23],
    },
    RatingFace {
        glyph: "😲",
        label: "Astonished",
        hover_rgb: [0xf6, 0x8e, 0x20],
    },
    RatingFace {
        glyph: "😐",
        label: "Neutral",
        hover_rgb: [0xfe, 0xcc, 0x08],
    },
    RatingFace {
        glyph: "🙂",
        label: "Smile",
        hover_rgb: [0x91, 0xe5, 0x3e],
    },
    RatingFace {
        glyph: "😉",
        label: "Wink",
        hover_rgb: [0x0e, 0xc1, 0x2f],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconHighlight {
    Idle,
    Hovered,
    Selected,
}

impl IconHighlight {
    pub fn is_lit(self) -> bool {
        self != IconHighlight::Idle
    }
}

/// Only the hovered icon and the selected icon light up; icons before them
/// stay idle.
pub fn icon_highlight(
    index: usize,
    hovered: Option<usize>,
    selected: Option<Rating>,
) -> IconHighlight {
    if hovered == Some(index) {
        IconHighlight::Hovered
    } else if selected.map(Rating::index) == Some(index) {
        IconHighlight::Selected
    } else {
        IconHighlight::Idle
    }
}

/// Per-picker UI state. Each picker owns one; nothing is shared between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingPickerState {
    hovered: Option<usize>,
}

impl RatingPickerState {
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: Option<usize>) {
        self.hovered = hovered.filter(|index| *index < RATING_FACES.len());
    }

    pub fn highlight(&self, index: usize, selected: Option<Rating>) -> IconHighlight {
        icon_highlight(index, self.hovered, selected)
    }

    /// Colour for icon `index`, or `None` to keep the default text colour.
    pub fn color(&self, index: usize, selected: Option<Rating>) -> Option<[u8; 3]> {
        let face = RATING_FACES.get(index)?;
        self.highlight(index, selected)
            .is_lit()
            .then_some(face.hover_rgb)
    }

    pub fn click(&self, field: RatingField, index: usize) -> Option<FormMessage> {
        Rating::from_index(index).map(|rating| FormMessage::SetRating { field, rating })
    }
}

#[cfg(test)]
#[path = "tests/rating_tests.rs"]
mod tests;
