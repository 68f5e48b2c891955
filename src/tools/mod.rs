use crate::surface::Rgba;
use serde::{Deserialize, Serialize};

mod mark;
mod shape;
pub mod spray;
mod stroke_engine;

pub use mark::Mark;
pub use shape::ShapeKind;
pub use stroke_engine::{marks_for_motion, rasterize};

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 50;
pub const DEFAULT_BRUSH_SIZE: u32 = 2;
/// Swatches shown from the end of the colour history
pub const RECENT_COLORS_SHOWN: usize = 5;

/// Enum representing all available drawing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolType {
    #[default]
    Pen,
    Brush,
    Eraser,
    Spray,
    Shape,
}

impl ToolType {
    pub const ALL: [ToolType; 5] = [
        ToolType::Pen,
        ToolType::Brush,
        ToolType::Eraser,
        ToolType::Spray,
        ToolType::Shape,
    ];

    /// Return the name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
            Self::Spray => "Spray",
            Self::Shape => "Shape",
        }
    }

    /// Looks a tool up by its case-insensitive name
    pub fn from_name(name: &str) -> Option<ToolType> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(name))
    }

    /// Shape previews are redrawn from a saved copy of the layer on every move
    pub fn needs_preview_baseline(&self) -> bool {
        matches!(self, Self::Shape)
    }
}

/// Current tool, colour and brush configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: ToolType,
    color: Rgba,
    brush_size: u32,
    pub shape: ShapeKind,
    pub mirror: bool,
    pub grid_visible: bool,
    /// Distinct colours ever selected, most recent last
    color_history: Vec<Rgba>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolType::default(),
            color: Rgba::BLACK,
            brush_size: DEFAULT_BRUSH_SIZE,
            shape: ShapeKind::default(),
            mirror: false,
            grid_visible: false,
            color_history: Vec::new(),
        }
    }
}

impl ToolSettings {
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Sets the drawing colour and remembers it if it's new
    pub fn select_color(&mut self, color: Rgba) {
        self.color = color;
        if !self.color_history.contains(&color) {
            self.color_history.push(color);
        }
    }

    pub fn color_history(&self) -> &[Rgba] {
        &self.color_history
    }

    /// The tail of the colour history that the toolbar shows
    pub fn recent_colors(&self) -> &[Rgba] {
        let start = self.color_history.len().saturating_sub(RECENT_COLORS_SHOWN);
        &self.color_history[start..]
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    /// What the current tool writes into the layer
    pub fn ink(&self) -> Rgba {
        match self.tool {
            ToolType::Eraser => Rgba::TRANSPARENT,
            _ => self.color,
        }
    }
}
