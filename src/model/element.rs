//! Positioned page elements.

use serde::{Deserialize, Serialize};

/// Color assigned to elements before any set-color function runs.
pub const DEVICE_DEFAULT_COLOR: u32 = 0x000000;

/// A positioned unit on a page.
///
/// Coordinates are in 1/1440-inch units, measured from the page origin.
/// Colors are 24-bit RGB values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Inline-axis position
    pub inline: u32,

    /// Baseline-axis position
    pub baseline: u32,

    /// 24-bit RGB color
    pub color: u32,

    /// What sits at this position
    pub kind: ElementKind,
}

impl Element {
    /// Create a text element.
    pub fn text(
        inline: u32,
        baseline: u32,
        color: u32,
        orientation: Orientation,
        text: impl Into<String>,
    ) -> Self {
        Self {
            inline,
            baseline,
            color,
            kind: ElementKind::Text {
                text: text.into(),
                orientation,
            },
        }
    }

    /// Create a rule element.
    pub fn rule(
        inline: u32,
        baseline: u32,
        color: u32,
        axis: RuleAxis,
        length: u16,
        width: i16,
        fraction: u8,
    ) -> Self {
        Self {
            inline,
            baseline,
            color,
            kind: ElementKind::Rule {
                axis,
                length,
                width,
                fraction,
            },
        }
    }

    /// Whether this element carries text.
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// Whether this element is a drawn rule.
    pub fn is_rule(&self) -> bool {
        matches!(self.kind, ElementKind::Rule { .. })
    }

    /// The element's text, if it is a text element.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { text, .. } => Some(text),
            ElementKind::Rule { .. } => None,
        }
    }

    /// The element's `(inline, baseline)` position.
    pub fn position(&self) -> (u32, u32) {
        (self.inline, self.baseline)
    }

    /// Copy of this element shifted by an `(inline, baseline)` offset.
    pub fn offset_by(&self, inline: u32, baseline: u32) -> Self {
        let mut shifted = self.clone();
        shifted.inline += inline;
        shifted.baseline += baseline;
        shifted
    }
}

/// Payload of an element: positioned text or a drawn rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// A run of text
    Text {
        /// Decoded text
        text: String,
        /// Text orientation in effect when the run was emitted
        orientation: Orientation,
    },

    /// A solid rule
    Rule {
        /// Axis the rule extends along
        axis: RuleAxis,
        /// Length along the rule's axis
        length: u16,
        /// Width across the rule's axis; negative widths extend the
        /// other way
        width: i16,
        /// Fractional-unit bitmask (bit 0 is half a unit, bit 1 a
        /// quarter, and so on)
        fraction: u8,
    },
}

/// Text orientation on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Baseline advances down the page
    #[default]
    Portrait,
    /// Baseline advances across the page
    Landscape,
}

/// Axis a rule extends along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAxis {
    /// Baseline axis
    BAxis,
    /// Inline axis
    IAxis,
}

/// An inclusive axis-aligned box on `(inline, baseline)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Lower inline bound
    pub x1: u32,
    /// Lower baseline bound
    pub y1: u32,
    /// Upper inline bound
    pub x2: u32,
    /// Upper baseline bound
    pub y2: u32,
}

impl Area {
    /// Create an area from two inclusive corners.
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Whether an element's position falls inside the area. Both bounds
    /// are inclusive on both axes.
    pub fn contains(&self, element: &Element) -> bool {
        element.inline >= self.x1
            && element.inline <= self.x2
            && element.baseline >= self.y1
            && element.baseline <= self.y2
    }
}
