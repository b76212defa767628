//! Rendering module
//!
//! `draw_list` is platform-free; `canvas` paints it in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw_list;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use draw_list::{DrawCmd, Sprite, draw_list};
