//! PDF rendering: a single-slot admission gate and a headless-browser
//! renderer that prints a card profile page to PDF.

pub mod gate;
pub mod renderer;
pub mod template;

pub use gate::{RenderGate, RenderSlot};
pub use renderer::{ChromiumRenderer, PdfRenderer};
