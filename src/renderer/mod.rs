//! Immediate-mode 2D drawing
//!
//! The simulation only ever issues calls against [`Surface`]; it never reads
//! surface state back. Backends:
//! - [`Recorder`]: captures commands (headless runs, tests)
//! - `canvas::CanvasSurface`: browser Canvas2D (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recorder;

pub use recorder::{DrawCommand, Recorder};

/// 8-bit RGB color with float alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string for Canvas2D style setters
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Abstract 2D drawing surface
pub trait Surface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    /// Rotate subsequent drawing by `radians`
    fn rotate(&mut self, radians: f32);
    fn reset_transform(&mut self);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn set_fill_color(&mut self, color: Rgba);
    fn set_stroke_color(&mut self, color: Rgba);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}
