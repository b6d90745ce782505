//! Rendering primitives (Cairo-based).
//!
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`InkOverlay`]: the raster layer pen strokes and the eraser act on
//! - [`render_page`]: draws a whole score page

pub mod color;
pub mod font;
pub mod ink;
pub mod render;

pub use color::Color;
pub use font::FontDescriptor;
pub use ink::{DrawnStroke, InkOp, InkOverlay};
pub use render::{RenderStyle, render_page};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GRAY, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
