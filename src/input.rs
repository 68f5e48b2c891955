use egui::{Pos2, Rect, Response};

/// Pointer events in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed on the canvas
    PointerDown { position: Pos2 },
    /// Pointer dragged while the button is held
    PointerMove { position: Pos2 },
    /// Button released
    PointerUp { position: Pos2 },
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            InputEvent::PointerDown { position }
            | InputEvent::PointerMove { position }
            | InputEvent::PointerUp { position } => *position,
        }
    }
}

/// Turns drag responses on the canvas widget into `InputEvent`s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a screen position into canvas coordinates for a canvas drawn at `canvas_rect`
    pub fn to_canvas(canvas_rect: Rect, screen_pos: Pos2) -> Pos2 {
        (screen_pos - canvas_rect.min).to_pos2()
    }

    /// Process this frame's canvas response and generate our InputEvents
    pub fn process_input(&mut self, response: &Response, canvas_rect: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let pointer = response.interact_pointer_pos();

        if response.drag_started() {
            if let Some(pos) = pointer {
                let position = Self::to_canvas(canvas_rect, pos);
                events.push(InputEvent::PointerDown { position });
                self.last_pointer_pos = Some(position);
            }
        }

        if response.dragged() {
            if let Some(pos) = pointer {
                let position = Self::to_canvas(canvas_rect, pos);
                if Some(position) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove { position });
                    self.last_pointer_pos = Some(position);
                }
            }
        }

        if response.drag_stopped() {
            let position = pointer
                .map(|pos| Self::to_canvas(canvas_rect, pos))
                .or(self.last_pointer_pos)
                .unwrap_or(Pos2::ZERO);
            events.push(InputEvent::PointerUp { position });
            self.last_pointer_pos = None;
        }

        events
    }
}
