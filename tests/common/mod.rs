#![allow(dead_code)]

use egui::Pos2;
use layer_paint::{CanvasConfig, EditorState, ToolType};

/// Spray seed every test editor starts from
pub const SEED: u64 = 1234;

pub fn editor(width: u32, height: u32) -> EditorState {
    EditorState::with_seed(CanvasConfig::with_size(width, height), SEED)
}

/// Presses at the first point, drags through the rest and releases at the last
pub fn stroke(editor: &mut EditorState, tool: ToolType, points: &[(f32, f32)]) {
    editor.tools_mut().tool = tool;
    let (first, rest) = points.split_first().expect("stroke needs at least one point");
    editor.pointer_down(Pos2::new(first.0, first.1));
    for &(x, y) in rest {
        editor.pointer_move(Pos2::new(x, y));
    }
    let last = points.last().copied().unwrap_or(*first);
    editor.pointer_up(Pos2::new(last.0, last.1));
}

/// A single dab/burst at one point: press, one move onto the same spot, release
pub fn dab(editor: &mut EditorState, tool: ToolType, x: f32, y: f32) {
    stroke(editor, tool, &[(x, y), (x, y)]);
}
