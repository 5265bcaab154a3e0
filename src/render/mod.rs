/// Rendering module
///
/// This module handles:
/// - Drawing the preview scene into an RGBA buffer (preview.rs)
/// - Compositing the scene onto print-resolution stock (print.rs)
/// - Writing the finished JPEG artifact (export.rs)

pub mod export;
pub mod preview;
pub mod print;
