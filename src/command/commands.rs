use std::path::PathBuf;

use super::CommandResult;
use crate::file_handler;
use crate::state::EditorState;
use crate::surface::Rgba;
use crate::tools::{ShapeKind, ToolType};

/// Commands the UI can issue against the editor
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Change the active tool
    SelectTool(ToolType),
    /// Change the drawing colour (recorded in the colour history)
    SelectColor(Rgba),
    /// Set the brush size, clamped to 1..=50
    SetBrushSize(u32),
    /// Choose the outline drawn by the shape tool
    SetShapeKind(ShapeKind),
    ToggleMirror,
    /// Grid is a display overlay only and never touches pixel data
    ToggleGrid,
    AddLayer,
    DeleteActiveLayer,
    SelectLayer(usize),
    ToggleLayerVisibility(usize),
    Undo,
    Redo,
    /// Wipe every layer
    ClearAll,
    /// Write the flattened canvas to a PNG file
    Export(PathBuf),
}

impl Command {
    /// Execute the command against the editor state
    pub fn execute(&self, state: &mut EditorState) -> CommandResult {
        match self {
            Command::SelectTool(tool) => {
                log::info!("Tool selected: {}", tool.name());
                state.tools_mut().tool = *tool;
            }
            Command::SelectColor(color) => state.tools_mut().select_color(*color),
            Command::SetBrushSize(size) => state.tools_mut().set_brush_size(*size),
            Command::SetShapeKind(kind) => state.tools_mut().shape = *kind,
            Command::ToggleMirror => {
                let tools = state.tools_mut();
                tools.mirror = !tools.mirror;
            }
            Command::ToggleGrid => {
                let tools = state.tools_mut();
                tools.grid_visible = !tools.grid_visible;
            }
            Command::AddLayer => state.add_layer(),
            Command::DeleteActiveLayer => state.delete_active_layer(),
            Command::SelectLayer(index) => state.select_layer(*index),
            Command::ToggleLayerVisibility(index) => state.toggle_layer_visibility(*index),
            Command::Undo => state.undo(),
            Command::Redo => state.redo(),
            Command::ClearAll => state.clear_all(),
            Command::Export(path) => file_handler::export_png(state.composite(), path)?,
        }
        Ok(())
    }

    /// Short label for logs and the status line
    pub fn label(&self) -> &'static str {
        match self {
            Command::SelectTool(_) => "Select Tool",
            Command::SelectColor(_) => "Select Color",
            Command::SetBrushSize(_) => "Set Brush Size",
            Command::SetShapeKind(_) => "Set Shape",
            Command::ToggleMirror => "Toggle Mirror",
            Command::ToggleGrid => "Toggle Grid",
            Command::AddLayer => "Add Layer",
            Command::DeleteActiveLayer => "Delete Layer",
            Command::SelectLayer(_) => "Select Layer",
            Command::ToggleLayerVisibility(_) => "Toggle Visibility",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::ClearAll => "Clear",
            Command::Export(_) => "Export",
        }
    }
}
