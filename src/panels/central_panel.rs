use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let config = *app.editor().config();
        let size = egui::vec2(config.width as f32, config.height as f32);

        egui::ScrollArea::both().show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
            let response = response.on_hover_cursor(egui::CursorIcon::Crosshair);
            let canvas_rect = response.rect;

            // Handle input before rendering so this frame shows the new marks
            app.handle_canvas_input(&response, canvas_rect);
            app.render_canvas(ctx, &painter, canvas_rect);
        });
    });
}
