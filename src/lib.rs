#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod file_handler;
pub mod input;
pub mod layer;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod surface;
pub mod tools;

pub use app::PaintApp;
pub use command::{Command, CommandError, CommandHistory, CommandResult, Snapshot};
pub use config::CanvasConfig;
pub use error::ExportError;
pub use input::{InputEvent, InputHandler};
pub use layer::{Layer, LayerStack};
pub use renderer::Renderer;
pub use state::EditorState;
pub use surface::{Rgba, Surface};
pub use tools::{ShapeKind, ToolSettings, ToolType};
