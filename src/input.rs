use glam::Vec2;
use winit::event::WindowEvent;

use crate::events::SketchEvent;

/// Map a cursor position in pixels to `[-1, 1]` on both axes, +y up
pub fn normalize_pointer(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    let width = width.max(1.0);
    let height = height.max(1.0);
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// Pick out the window events a sketch listens to
pub fn translate_event(event: &WindowEvent) -> Option<SketchEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => Some(SketchEvent::PointerMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),
        WindowEvent::Resized(size) => Some(SketchEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        _ => None,
    }
}

/// Last known pointer position, normalized against the current viewport
#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    viewport: (f32, f32),
    pointer: Vec2,
}

impl PointerTracker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width as f32, height as f32),
            pointer: Vec2::ZERO,
        }
    }

    pub fn process(&mut self, event: &SketchEvent) {
        match *event {
            SketchEvent::PointerMoved { x, y } => {
                self.pointer = normalize_pointer(x, y, self.viewport.0, self.viewport.1);
            }
            SketchEvent::Resized { width, height } => {
                self.viewport = (width as f32, height as f32);
            }
        }
    }

    /// Normalized pointer; the center of the viewport until the cursor moves
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }
}
