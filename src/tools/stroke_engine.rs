use egui::Pos2;
use rand::Rng;

use super::{Mark, ToolSettings, ToolType, spray};
use crate::surface::{Rgba, Surface};

/// Rounds a canvas position to the pixel it falls in.
pub(crate) fn to_pixel(pos: Pos2) -> (i32, i32) {
    (pos.x.round() as i32, pos.y.round() as i32)
}

/// Marks the current tool makes for one pointer-move from `previous` to
/// `current`. `start` is where the stroke began and only matters for shapes.
pub fn marks_for_motion<R: Rng + ?Sized>(
    settings: &ToolSettings,
    start: Pos2,
    previous: Pos2,
    current: Pos2,
    rng: &mut R,
) -> Vec<Mark> {
    let size = settings.brush_size();
    let here = to_pixel(current);
    match settings.tool {
        ToolType::Pen => vec![Mark::Segment {
            from: to_pixel(previous),
            to: here,
            width: size,
        }],
        ToolType::Brush | ToolType::Eraser => vec![Mark::Dab {
            center: here,
            radius: size,
        }],
        ToolType::Spray => vec![Mark::Dots(spray::spray_dots(rng, here, size as f64))],
        ToolType::Shape => vec![Mark::Outline {
            kind: settings.shape,
            from: to_pixel(start),
            to: here,
            width: size,
        }],
    }
}

/// Draws each mark, followed by its reflection when mirroring.
pub fn rasterize(surface: &mut Surface, marks: &[Mark], ink: Rgba, mirror: bool) {
    let width = surface.width();
    for mark in marks {
        mark.draw(surface, ink);
        if mirror {
            mark.mirrored(width).draw(surface, ink);
        }
    }
}
