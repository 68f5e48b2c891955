use crate::surface::{Rgba, Surface};
use serde::{Deserialize, Serialize};

/// Outline drawn by the shape tool, sized by dragging from corner to corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Rectangle, ShapeKind::Ellipse];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
        }
    }

    pub fn draw(
        &self,
        surface: &mut Surface,
        from: (i32, i32),
        to: (i32, i32),
        width: u32,
        ink: Rgba,
    ) {
        match self {
            Self::Rectangle => surface.stroke_rect(from, to, width, ink),
            Self::Ellipse => surface.stroke_ellipse(from, to, width, ink),
        }
    }
}
