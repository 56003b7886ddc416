//! Renderer-agnostic drawing primitives.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn svg_name(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
    pub opacity: f64,
}

/// One drawing instruction. Drawn in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Rect {
        origin: Point2,
        width: f64,
        height: f64,
        fill: Color,
    },
    Circle {
        center: Point2,
        radius: f64,
        stroke: Color,
        stroke_width: f64,
    },
    Line {
        from: Point2,
        to: Point2,
        stroke: Color,
        stroke_width: f64,
        dashed: bool,
    },
    /// Polyline, or polygon when `closed`.
    Path {
        points: Vec<Point2>,
        closed: bool,
        fill: Option<Fill>,
        stroke: Color,
        stroke_width: f64,
    },
    Text {
        position: Point2,
        text: String,
        size: f64,
        color: Color,
        anchor: TextAnchor,
    },
}

impl Primitive {
    pub fn is_path(&self) -> bool {
        matches!(self, Primitive::Path { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Primitive::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
