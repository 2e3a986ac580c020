//! Human-readable output
//!
//! Rendering is kept separate from printing: every `render_*` function
//! returns a `String` so commands can be tested without capturing stdout.

pub mod render;
pub mod styling;

pub use render::{render_lock, render_plan, render_tree};
pub use styling::StyleManager;
