//! Drawing scale lines with cairo.

pub mod bar;
pub mod canvas;
pub mod color;
pub mod output;
