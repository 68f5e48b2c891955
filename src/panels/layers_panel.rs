use crate::PaintApp;
use crate::command::Command;

pub fn layers_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let mut commands = Vec::new();

    egui::SidePanel::right("layers_panel")
        .resizable(true)
        .default_width(160.0)
        .show(ctx, |ui| {
            let layers = app.editor().layers();
            ui.heading("Layers");

            ui.horizontal(|ui| {
                if ui.button("Add Layer").clicked() {
                    commands.push(Command::AddLayer);
                }
                if ui
                    .add_enabled(layers.len() > 1, egui::Button::new("Delete Layer"))
                    .clicked()
                {
                    commands.push(Command::DeleteActiveLayer);
                }
            });
            ui.separator();

            // Top-most layer first
            let active = layers.active_index();
            for (index, layer) in layers.layers().iter().enumerate().rev() {
                ui.push_id(layer.id, |ui| {
                    ui.horizontal(|ui| {
                        let mut visible = layer.visible;
                        if ui.checkbox(&mut visible, "").changed() {
                            commands.push(Command::ToggleLayerVisibility(index));
                        }
                        if ui.selectable_label(index == active, &layer.name).clicked() {
                            commands.push(Command::SelectLayer(index));
                        }
                    });
                });
            }
        });

    for command in commands {
        app.execute_command(command);
    }
}
