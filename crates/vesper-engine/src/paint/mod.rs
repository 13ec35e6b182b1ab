//! Color representation used for framebuffer clears.

mod color;

pub use color::Color;
