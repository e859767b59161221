//! Per-frame control input snapshot
//!
//! The host adapter owns a [`ControlInput`], feeds raw key/pointer events into
//! it, and passes it to `Scene::update` once per frame. The scene clears the
//! one-shot flags it consumes (`changed`, `shoot`) and never touches the
//! pointer.

/// Pointer position in playfield coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    /// Pointer is over the playfield
    pub in_bounds: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    /// -1 left, 0 none, 1 right
    pub turn: i8,
    /// 1 thrust, -1 brake, 0 coast
    pub accelerate: i8,
    pub shoot: bool,
    /// Steer toward the pointer instead of using discrete turns
    pub turn_to_pointer: bool,
    pub pointer: Pointer,
    /// Set on every key event; cleared by the scene once applied
    pub changed: bool,
}

impl ControlInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key press (`KeyboardEvent.key` values)
    pub fn key_down(&mut self, key: &str) {
        match key {
            "w" | "ArrowUp" => self.accelerate = 1,
            "s" | "ArrowDown" => self.accelerate = -1,
            "a" | "ArrowLeft" => {
                self.turn = -1;
                self.turn_to_pointer = false;
            }
            "d" | "ArrowRight" => {
                self.turn = 1;
                self.turn_to_pointer = false;
            }
            " " => self.shoot = true,
            _ => {}
        }
        self.changed = true;
    }

    /// Apply a key release
    pub fn key_up(&mut self, key: &str) {
        match key {
            "w" | "ArrowUp" | "s" | "ArrowDown" => self.accelerate = 0,
            "a" | "ArrowLeft" | "d" | "ArrowRight" => self.turn = 0,
            " " => self.shoot = false,
            _ => {}
        }
        self.changed = true;
    }

    /// Mouse button: start following the pointer and fire
    pub fn pointer_down(&mut self) {
        self.turn_to_pointer = true;
        self.shoot = true;
        self.changed = true;
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.x = x;
        self.pointer.y = y;
    }

    pub fn pointer_enter(&mut self) {
        self.pointer.in_bounds = true;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.in_bounds = false;
    }
}
