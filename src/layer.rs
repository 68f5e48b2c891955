use crate::surface::{Rgba, Surface};
use uuid::Uuid;

/// A single transparent raster layer
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Unique identifier for the layer
    pub id: Uuid,
    /// Display name of the layer
    pub name: String,
    /// Whether the layer takes part in compositing
    pub visible: bool,
    /// Pixel content of the layer
    pub surface: Surface,
}

impl Layer {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            visible: true,
            surface: Surface::new(width, height),
        }
    }
}

/// Ordered layers, index 0 at the bottom.
///
/// There is always at least one layer and `active` always indexes one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    active: usize,
    next_number: usize,
}

impl LayerStack {
    /// Creates a stack holding one blank layer
    pub fn new(width: u32, height: u32) -> Self {
        let mut stack = Self {
            width,
            height,
            layers: Vec::new(),
            active: 0,
            next_number: 1,
        };
        stack.add_layer();
        stack
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active]
    }

    pub fn active_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active]
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Appends a transparent layer and makes it active
    pub fn add_layer(&mut self) -> usize {
        let name = format!("Layer {}", self.next_number);
        self.next_number += 1;
        self.layers.push(Layer::new(&name, self.width, self.height));
        self.active = self.layers.len() - 1;
        log::info!("Added {} at index {}", name, self.active);
        self.active
    }

    /// Removes the active layer. Returns false, and changes nothing, when it
    /// is the only layer left.
    pub fn delete_active(&mut self) -> bool {
        if self.layers.len() <= 1 {
            log::debug!("Ignoring delete of the last remaining layer");
            return false;
        }
        let removed = self.layers.remove(self.active);
        self.active = self.active.saturating_sub(1);
        log::info!("Deleted {}, active index is now {}", removed.name, self.active);
        true
    }

    /// Selects the active layer; out-of-range indices are ignored
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.layers.len() {
            log::debug!(
                "Ignoring selection of layer {} (only {} layers)",
                index,
                self.layers.len()
            );
            return false;
        }
        self.active = index;
        true
    }

    pub fn toggle_visibility(&mut self, index: usize) -> bool {
        match self.layers.get_mut(index) {
            Some(layer) => {
                layer.visible = !layer.visible;
                true
            }
            None => {
                log::debug!("Ignoring visibility toggle of layer {}", index);
                false
            }
        }
    }

    /// Resets every layer to fully transparent, keeping the layers themselves
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.surface.fill(Rgba::TRANSPARENT);
        }
    }

    /// Flattens the visible layers, bottom to top, over opaque white.
    pub fn composite(&self) -> Surface {
        let mut out = Surface::filled(self.width, self.height, Rgba::WHITE);
        for layer in self.layers.iter().filter(|layer| layer.visible) {
            for (dst, src) in out.pixels_mut().iter_mut().zip(layer.surface.pixels()) {
                *dst = src.over(*dst);
            }
        }
        out
    }

    /// Number the next added layer will be named after
    pub(crate) fn next_number(&self) -> usize {
        self.next_number
    }

    /// Replaces the layers and the naming counter with a restored set,
    /// keeping the active index in range
    pub(crate) fn restore(&mut self, layers: Vec<Layer>, next_number: usize) {
        if layers.is_empty() {
            log::warn!("Refusing to restore an empty layer set");
            return;
        }
        self.layers = layers;
        self.next_number = next_number;
        self.active = self.active.min(self.layers.len() - 1);
    }
}
