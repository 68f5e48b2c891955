mod common;

use egui::Pos2;
use layer_paint::tools::{self, Mark};
use layer_paint::{
    CanvasConfig, Command, CommandError, CommandHistory, EditorState, ExportError, LayerStack, Rgba,
    ToolType,
};

#[test]
fn test_pen_snapshot_undo_redo_on_default_canvas() {
    let config = CanvasConfig::default();
    let mut stack = LayerStack::new(config.width, config.height);
    let mut history = CommandHistory::new(&stack, config.history_limit);
    let blank = stack.composite();
    assert_eq!((blank.width(), blank.height()), (800, 600));

    let pen = [Mark::Segment {
        from: (10, 10),
        to: (100, 100),
        width: 2,
    }];
    tools::rasterize(&mut stack.active_layer_mut().surface, &pen, Rgba::BLACK, false);
    history.snapshot(&stack);
    let drawn = stack.composite();
    assert_ne!(drawn, blank);

    assert!(history.undo(&mut stack));
    assert_eq!(stack.composite(), blank);
    assert!(stack.composite().pixels().iter().all(|p| *p == Rgba::WHITE));

    assert!(history.redo(&mut stack));
    assert_eq!(stack.composite(), drawn);
}

#[test]
fn test_pointer_driven_stroke_undo_redo() {
    let mut editor = EditorState::with_seed(CanvasConfig::default(), 0);
    let blank = editor.composite().clone();

    editor.tools_mut().set_brush_size(2);
    common::stroke(&mut editor, ToolType::Pen, &[(10.0, 10.0), (100.0, 100.0)]);
    let drawn = editor.composite().clone();
    assert_eq!(drawn.get(55, 55), Some(Rgba::BLACK));

    editor.undo();
    assert_eq!(editor.composite(), &blank);
    editor.redo();
    assert_eq!(editor.composite(), &drawn);
}

#[test]
fn test_commands_drive_the_editor() {
    let mut editor = common::editor(64, 64);
    let red = Rgba::new(255, 0, 0, 255);

    for command in [
        Command::SelectTool(ToolType::Brush),
        Command::SelectColor(red),
        Command::SetBrushSize(80),
        Command::ToggleMirror,
        Command::ToggleGrid,
        Command::AddLayer,
        Command::SelectLayer(42),
    ] {
        command.execute(&mut editor).unwrap();
    }

    assert_eq!(editor.tools().tool, ToolType::Brush);
    assert_eq!(editor.tools().color(), red);
    assert_eq!(editor.tools().brush_size(), 50);
    assert!(editor.tools().mirror);
    assert!(editor.tools().grid_visible);
    assert_eq!(editor.layers().len(), 2);
    assert_eq!(editor.layers().active_index(), 1);

    // Grid is display-only
    assert!(editor.composite().pixels().iter().all(|p| *p == Rgba::WHITE));

    editor.pointer_down(Pos2::new(10.0, 10.0));
    editor.pointer_move(Pos2::new(10.0, 10.0));
    editor.pointer_up(Pos2::new(10.0, 10.0));
    assert_eq!(editor.composite().get(10, 10), Some(red));
    assert_eq!(editor.composite().get(54, 10), Some(red));

    Command::Undo.execute(&mut editor).unwrap();
    assert_eq!(editor.composite().get(10, 10), Some(Rgba::WHITE));
    Command::DeleteActiveLayer.execute(&mut editor).unwrap();
    Command::DeleteActiveLayer.execute(&mut editor).unwrap();
    assert_eq!(editor.layers().len(), 1);
}

#[test]
fn test_export_writes_flattened_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawing.png");

    let mut editor = common::editor(32, 24);
    editor.tools_mut().select_color(Rgba::new(0, 0, 255, 128));
    common::dab(&mut editor, ToolType::Brush, 16.0, 12.0);
    Command::Export(path.clone()).execute(&mut editor).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (32, 24));
    assert_eq!(decoded.into_raw(), editor.composite().to_rgba_bytes());
    // Background is opaque white where nothing was drawn
    assert_eq!(editor.composite().get(0, 0), Some(Rgba::WHITE));
}

#[test]
fn test_export_to_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("drawing.png");

    let mut editor = common::editor(8, 8);
    let result = Command::Export(path.clone()).execute(&mut editor);

    assert!(matches!(result, Err(CommandError::Export(ExportError::Io(_)))));
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
