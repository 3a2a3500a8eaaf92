//! Rendering core for a 400x300 1-bit reflective LCD.
//!
//! Everything draws into one packed [`Framebuffer`] whose bytes are exactly
//! what the panel driver clocks out. Drawing never fails: geometry that falls
//! off the panel or is too degenerate to draw is silently dropped.
//!
//! The [`draw`] module (window, headless sink, PNG capture) needs the default
//! `sim` feature. Without it the crate depends on nothing graphical.

pub mod animation;
pub mod bezier;
pub mod dirty;
#[cfg(feature = "sim")]
pub mod draw;
pub mod error;
pub mod framebuffer;
pub mod patterns;
pub mod primitives;
pub mod shapes;
pub mod texture;
pub mod types;
pub mod vector_font;

pub use error::{Error, Result};
pub use framebuffer::{BUFFER_SIZE, BYTES_PER_ROW, Framebuffer, HEIGHT, WIDTH};
pub use patterns::Pattern;
pub use texture::{Brush, Texture};
pub use types::{BLACK, Color, Point, PointF, WHITE};
pub use vector_font::{Align, TextStyle};
