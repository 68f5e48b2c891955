use std::path::PathBuf;

use crate::PaintApp;
use crate::command::Command;
use crate::tools::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, ShapeKind, ToolType};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let mut commands = Vec::new();

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            let tools = app.editor().tools().clone();
            let can_undo = app.editor().history().can_undo();
            let can_redo = app.editor().history().can_redo();

            ui.heading("Tools");
            for tool in ToolType::ALL {
                if ui.selectable_label(tools.tool == tool, tool.name()).clicked() {
                    commands.push(Command::SelectTool(tool));
                }
            }
            if tools.tool == ToolType::Shape {
                ui.horizontal(|ui| {
                    for kind in ShapeKind::ALL {
                        if ui.selectable_label(tools.shape == kind, kind.name()).clicked() {
                            commands.push(Command::SetShapeKind(kind));
                        }
                    }
                });
            }
            ui.separator();

            ui.label("Color:");
            egui::color_picker::color_edit_button_srgba(
                ui,
                app.pending_color_mut(),
                egui::color_picker::Alpha::OnlyBlend,
            );
            // Only record the colour once the picker popup is closed
            let pending = *app.pending_color_mut();
            let picker_open = ui.memory(|mem| mem.any_popup_open());
            if !picker_open && pending != egui::Color32::from(tools.color()) {
                commands.push(Command::SelectColor(pending.into()));
            }

            ui.horizontal(|ui| {
                for color in tools.recent_colors() {
                    let (rect, response) =
                        ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::click());
                    ui.painter().rect_filled(rect, 2.0, egui::Color32::from(*color));
                    if response.clicked() {
                        commands.push(Command::SelectColor(*color));
                    }
                }
            });

            ui.label("Brush Size:");
            let mut size = tools.brush_size();
            if ui
                .add(egui::Slider::new(&mut size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE))
                .changed()
            {
                commands.push(Command::SetBrushSize(size));
            }

            let mut mirror = tools.mirror;
            if ui.checkbox(&mut mirror, "Mirror Mode").changed() {
                commands.push(Command::ToggleMirror);
            }
            let mut grid = tools.grid_visible;
            if ui.checkbox(&mut grid, "Show Grid").changed() {
                commands.push(Command::ToggleGrid);
            }
            ui.separator();

            ui.horizontal(|ui| {
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    commands.push(Command::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    commands.push(Command::Redo);
                }
                if ui.button("Clear").clicked() {
                    commands.push(Command::ClearAll);
                }
            });
            ui.separator();

            ui.label("Export:");
            ui.text_edit_singleline(app.export_path_mut());
            if ui.button("Save").clicked() {
                let path = PathBuf::from(app.export_path_mut().trim());
                commands.push(Command::Export(path));
            }
            if let Some(status) = app.status() {
                ui.label(status);
            }
        });

    for command in commands {
        app.execute_command(command);
    }
}
