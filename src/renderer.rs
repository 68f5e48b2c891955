use eframe::egui::{self, Color32, ColorImage, Pos2, Rect, TextureHandle, TextureOptions};

use crate::state::EditorState;
use crate::surface::Surface;

/// Spacing of the grid overlay, in canvas pixels
pub const GRID_SPACING: u32 = 50;
pub const GRID_COLOR: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);

/// Shows the flattened canvas as a texture, plus the optional grid overlay
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    /// Composite revision currently held by `texture`
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("texture", &self.texture.as_ref().map(|_| "<texture>"))
            .field("uploaded_revision", &self.uploaded_revision)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the composite changed since the last upload
    pub fn needs_upload(&self, revision: u64) -> bool {
        self.texture.is_none() || self.uploaded_revision != Some(revision)
    }

    pub fn color_image(surface: &Surface) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [surface.width() as usize, surface.height() as usize],
            &surface.to_rgba_bytes(),
        )
    }

    /// Renders the canvas into `canvas_rect`
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        canvas_rect: Rect,
        state: &EditorState,
    ) {
        if self.needs_upload(state.revision()) {
            let image = Self::color_image(state.composite());
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(state.revision());
        }

        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), canvas_rect, uv, Color32::WHITE);
        }

        if state.tools().grid_visible {
            let stroke = egui::Stroke::new(1.0, GRID_COLOR);
            for [a, b] in grid_lines(state.config().width, state.config().height) {
                painter.line_segment(
                    [canvas_rect.min + a.to_vec2(), canvas_rect.min + b.to_vec2()],
                    stroke,
                );
            }
        }
    }
}

/// Grid line endpoints in canvas coordinates, verticals first
pub fn grid_lines(width: u32, height: u32) -> Vec<[Pos2; 2]> {
    let (w, h) = (width as f32, height as f32);
    let verticals = (0..width)
        .step_by(GRID_SPACING as usize)
        .map(|x| [Pos2::new(x as f32, 0.0), Pos2::new(x as f32, h)]);
    let horizontals = (0..height)
        .step_by(GRID_SPACING as usize)
        .map(|y| [Pos2::new(0.0, y as f32), Pos2::new(w, y as f32)]);
    verticals.chain(horizontals).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_count_for_default_canvas() {
        let lines = grid_lines(800, 600);
        assert_eq!(lines.len(), 16 + 12);
        assert_eq!(lines[1], [Pos2::new(50.0, 0.0), Pos2::new(50.0, 600.0)]);
    }

    #[test]
    fn test_fresh_renderer_needs_upload() {
        let renderer = Renderer::new();
        assert!(renderer.needs_upload(0));
    }

    #[test]
    fn test_color_image_matches_surface_size() {
        let surface = Surface::new(7, 3);
        let image = Renderer::color_image(&surface);
        assert_eq!(image.size, [7, 3]);
    }
}
