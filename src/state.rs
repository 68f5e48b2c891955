use egui::Pos2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::command::CommandHistory;
use crate::config::CanvasConfig;
use crate::input::InputEvent;
use crate::layer::LayerStack;
use crate::surface::Surface;
use crate::tools::{self, MAX_BRUSH_SIZE, ToolSettings};

/// Progress of the current pointer interaction
#[derive(Debug, Clone, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Drawing {
        /// Where the pointer went down
        start: Pos2,
        /// Position of the previous pointer event
        last: Pos2,
        /// Copy of the active layer taken at pointer-down, for tools that
        /// redraw their whole preview on every move
        preview_baseline: Option<Surface>,
    },
}

/// All editor state: layers, history, tool settings and the current stroke.
///
/// The UI owns one of these and hands it to each handler; nothing here is
/// global.
pub struct EditorState {
    config: CanvasConfig,
    layers: LayerStack,
    history: CommandHistory,
    tools: ToolSettings,
    stroke: StrokeState,
    rng: StdRng,
    composite: Surface,
    /// Bumped every time `composite` changes
    revision: u64,
}

impl std::fmt::Debug for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("config", &self.config)
            .field("layers", &self.layers.len())
            .field("active", &self.layers.active_index())
            .field("tools", &self.tools)
            .field("stroke", &self.stroke)
            .field("revision", &self.revision)
            .finish()
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl EditorState {
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Editor with a deterministic spray pattern
    pub fn with_seed(config: CanvasConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: CanvasConfig, rng: StdRng) -> Self {
        let layers = LayerStack::new(config.width, config.height);
        let history = CommandHistory::new(&layers, config.history_limit);
        let composite = layers.composite();
        log::info!(
            "New {}x{} canvas, history limit {:?}",
            config.width,
            config.height,
            config.history_limit
        );
        Self {
            config,
            layers,
            history,
            tools: ToolSettings::default(),
            stroke: StrokeState::Idle,
            rng,
            composite,
            revision: 0,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolSettings {
        &mut self.tools
    }

    pub fn set_tools(&mut self, tools: ToolSettings) {
        self.tools = tools;
    }

    /// The flattened canvas as of the last change
    pub fn composite(&self) -> &Surface {
        &self.composite
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.stroke, StrokeState::Drawing { .. })
    }

    fn recomposite(&mut self) {
        self.composite = self.layers.composite();
        self.revision += 1;
    }

    /// Pulls a position back to within one maximum brush size of the canvas.
    fn clamp_to_canvas(&self, pos: Pos2) -> Pos2 {
        let margin = MAX_BRUSH_SIZE as f32;
        Pos2::new(
            pos.x.clamp(-margin, self.layers.width() as f32 + margin),
            pos.y.clamp(-margin, self.layers.height() as f32 + margin),
        )
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { position } => self.pointer_up(position),
        }
    }

    /// Begins a stroke at `pos`
    pub fn pointer_down(&mut self, pos: Pos2) {
        if !pos.is_finite() {
            log::debug!("Ignoring pointer-down at non-finite position");
            return;
        }
        let pos = self.clamp_to_canvas(pos);
        self.end_stroke();

        let preview_baseline = self
            .tools
            .tool
            .needs_preview_baseline()
            .then(|| self.layers.active_layer().surface.clone());
        self.stroke = StrokeState::Drawing {
            start: pos,
            last: pos,
            preview_baseline,
        };
        log::debug!("{} stroke started at {:?}", self.tools.tool.name(), pos);
    }

    /// Rasterizes the motion since the previous pointer event onto the active layer
    pub fn pointer_move(&mut self, pos: Pos2) {
        if !pos.is_finite() {
            return;
        }
        let pos = self.clamp_to_canvas(pos);
        let StrokeState::Drawing {
            start,
            last,
            preview_baseline,
        } = &mut self.stroke
        else {
            return;
        };

        let surface = &mut self.layers.active_layer_mut().surface;
        if let Some(baseline) = preview_baseline {
            surface.clone_from(baseline);
        }
        let marks = tools::marks_for_motion(&self.tools, *start, *last, pos, &mut self.rng);
        tools::rasterize(surface, &marks, self.tools.ink(), self.tools.mirror);
        *last = pos;

        self.recomposite();
    }

    /// Ends the stroke and records it in the history
    pub fn pointer_up(&mut self, pos: Pos2) {
        if self.is_drawing() {
            log::debug!("Stroke ended at {:?}", pos);
        }
        self.end_stroke();
    }

    fn end_stroke(&mut self) {
        if let StrokeState::Drawing { .. } = std::mem::take(&mut self.stroke) {
            self.snapshot();
        }
    }

    /// Records the current layers as an undo step
    pub fn snapshot(&mut self) {
        self.history.snapshot(&self.layers);
    }

    pub fn add_layer(&mut self) {
        self.end_stroke();
        self.layers.add_layer();
        self.snapshot();
        self.recomposite();
    }

    pub fn delete_active_layer(&mut self) {
        self.end_stroke();
        if self.layers.delete_active() {
            self.snapshot();
            self.recomposite();
        }
    }

    pub fn select_layer(&mut self, index: usize) {
        self.end_stroke();
        self.layers.set_active(index);
    }

    pub fn toggle_layer_visibility(&mut self, index: usize) {
        self.end_stroke();
        if self.layers.toggle_visibility(index) {
            self.snapshot();
            self.recomposite();
        }
    }

    /// Wipes every layer and records the blank state as one undo step
    pub fn clear_all(&mut self) {
        self.end_stroke();
        self.layers.clear();
        self.recomposite();
        self.snapshot();
        log::info!("Cleared {} layers", self.layers.len());
    }

    pub fn undo(&mut self) {
        self.end_stroke();
        if self.history.undo(&mut self.layers) {
            self.recomposite();
        }
    }

    pub fn redo(&mut self) {
        self.end_stroke();
        if self.history.redo(&mut self.layers) {
            self.recomposite();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolType;

    fn small_editor() -> EditorState {
        EditorState::with_seed(CanvasConfig::with_size(64, 48), 42)
    }

    #[test]
    fn test_move_without_down_draws_nothing() {
        let mut editor = small_editor();
        editor.pointer_move(Pos2::new(10.0, 10.0));
        assert_eq!(editor.layers().active_layer().surface.painted_count(), 0);
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn test_stroke_recomposites_on_each_move() {
        let mut editor = small_editor();
        editor.pointer_down(Pos2::new(5.0, 5.0));
        editor.pointer_move(Pos2::new(10.0, 5.0));
        editor.pointer_move(Pos2::new(20.0, 5.0));
        assert_eq!(editor.revision(), 2);
        assert_ne!(editor.composite().get(15, 5), Some(crate::surface::Rgba::WHITE));
    }

    #[test]
    fn test_pointer_up_commits_once() {
        let mut editor = small_editor();
        editor.pointer_down(Pos2::new(5.0, 5.0));
        editor.pointer_move(Pos2::new(10.0, 5.0));
        editor.pointer_up(Pos2::new(10.0, 5.0));
        editor.pointer_up(Pos2::new(10.0, 5.0));
        assert_eq!(editor.history().undo_len(), 1);
        assert!(!editor.is_drawing());
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let mut editor = small_editor();
        editor.pointer_down(Pos2::new(f32::NAN, 5.0));
        assert!(!editor.is_drawing());
    }

    #[test]
    fn test_far_pointer_positions_are_pulled_to_the_margin() {
        let mut editor = small_editor();
        editor.pointer_down(Pos2::new(-1e12, 1e12));
        let StrokeState::Drawing { start, .. } = &editor.stroke else {
            panic!("stroke should have started");
        };
        assert_eq!(*start, Pos2::new(-50.0, 98.0));
    }

    #[test]
    fn test_undo_mid_stroke_commits_stroke_first() {
        let mut editor = small_editor();
        editor.tools_mut().tool = ToolType::Brush;
        editor.pointer_down(Pos2::new(20.0, 20.0));
        editor.pointer_move(Pos2::new(20.0, 20.0));
        editor.undo();
        assert!(!editor.is_drawing());
        assert_eq!(editor.layers().active_layer().surface.painted_count(), 0);
        assert!(editor.history().can_redo());
    }

    #[test]
    fn test_layer_commands_invalidate_redo() {
        let mut editor = small_editor();
        editor.pointer_down(Pos2::new(1.0, 1.0));
        editor.pointer_move(Pos2::new(8.0, 8.0));
        editor.pointer_up(Pos2::new(8.0, 8.0));
        editor.undo();
        assert!(editor.history().can_redo());
        editor.add_layer();
        assert!(!editor.history().can_redo());
    }
}
