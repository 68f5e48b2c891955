use super::shape::ShapeKind;
use crate::surface::{Rgba, Surface};

/// One rasterized mark produced by a tool for a single pointer-move.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Straight line of the given width (pen)
    Segment {
        from: (i32, i32),
        to: (i32, i32),
        width: u32,
    },
    /// Filled disc (brush, eraser)
    Dab { center: (i32, i32), radius: u32 },
    /// Single-pixel dots (spray)
    Dots(Vec<(i32, i32)>),
    /// Corner-to-corner outline (shape)
    Outline {
        kind: ShapeKind,
        from: (i32, i32),
        to: (i32, i32),
        width: u32,
    },
}

impl Mark {
    pub fn draw(&self, surface: &mut Surface, ink: Rgba) {
        match self {
            Mark::Segment { from, to, width } => surface.draw_thick_line(*from, *to, *width, ink),
            Mark::Dab { center, radius } => surface.fill_circle(*center, *radius, ink),
            Mark::Dots(dots) => {
                for &(x, y) in dots {
                    surface.put(x, y, ink);
                }
            }
            Mark::Outline { kind, from, to, width } => kind.draw(surface, *from, *to, *width, ink),
        }
    }

    /// The same mark reflected through `x -> canvas_width - x`.
    pub fn mirrored(&self, canvas_width: u32) -> Mark {
        let w = canvas_width as i32;
        let flip = |(x, y): (i32, i32)| (w.saturating_sub(x), y);
        match self {
            Mark::Segment { from, to, width } => Mark::Segment {
                from: flip(*from),
                to: flip(*to),
                width: *width,
            },
            Mark::Dab { center, radius } => Mark::Dab {
                center: flip(*center),
                radius: *radius,
            },
            Mark::Dots(dots) => Mark::Dots(dots.iter().copied().map(flip).collect()),
            Mark::Outline { kind, from, to, width } => Mark::Outline {
                kind: *kind,
                from: flip(*from),
                to: flip(*to),
                width: *width,
            },
        }
    }
}
