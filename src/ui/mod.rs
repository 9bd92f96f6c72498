//! Terminal output.
//!
//! - **renderer**: prompt, echo, line redraw and screen clearing

pub mod renderer;

pub use renderer::*;
