use egui::{Color32, Key, Modifiers};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::input::InputHandler;
use crate::panels::{central_panel, layers_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::EditorState;
use crate::tools::ToolSettings;

/// Settings restored between runs. Layers are deliberately not part of it.
#[derive(Serialize, Deserialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedSettings {
    config: CanvasConfig,
    tools: ToolSettings,
    export_path: String,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            config: CanvasConfig::default(),
            tools: ToolSettings::default(),
            export_path: "drawing.png".to_owned(),
        }
    }
}

pub struct PaintApp {
    editor: EditorState,
    renderer: Renderer,
    input: InputHandler,
    export_path: String,
    /// Colour being edited in the picker, applied once the picker closes
    pending_color: Color32,
    /// Last message shown under the toolbar
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<PersistedSettings>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::from_settings(settings)
    }

    fn from_settings(settings: PersistedSettings) -> Self {
        let mut editor = EditorState::new(settings.config);
        let pending_color = settings.tools.color().into();
        editor.set_tools(settings.tools);
        Self {
            editor,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            export_path: settings.export_path,
            pending_color,
            status: None,
        }
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn export_path_mut(&mut self) -> &mut String {
        &mut self.export_path
    }

    pub fn pending_color_mut(&mut self) -> &mut Color32 {
        &mut self.pending_color
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Runs a command and reports failures in the status line
    pub fn execute_command(&mut self, command: Command) {
        if let Command::SelectColor(color) = &command {
            self.pending_color = (*color).into();
        }
        match command.execute(&mut self.editor) {
            Ok(()) => {
                if let Command::Export(path) = &command {
                    self.status = Some(format!("Saved {}", path.display()));
                }
            }
            Err(err) => {
                log::error!("{} failed: {}", command.label(), err);
                self.status = Some(err.to_string());
            }
        }
    }

    /// Feeds this frame's canvas drag into the editor
    pub fn handle_canvas_input(&mut self, response: &egui::Response, canvas_rect: egui::Rect) {
        for event in self.input.process_input(response, canvas_rect) {
            self.editor.handle_input(&event);
        }
    }

    pub fn render_canvas(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
    ) {
        self.renderer.render(ctx, painter, canvas_rect, &self.editor);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (redo, undo) = ctx.input_mut(|input| {
            (
                input.consume_key(Modifiers::COMMAND, Key::Y),
                input.consume_key(Modifiers::COMMAND, Key::Z),
            )
        });
        if redo {
            self.execute_command(Command::Redo);
        }
        if undo {
            self.execute_command(Command::Undo);
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            config: *self.editor.config(),
            tools: self.editor.tools().clone(),
            export_path: self.export_path.clone(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        layers_panel(self, ctx);
        central_panel(self, ctx);
    }
}
