/// Frame reference data and layout geometry
///
/// This module handles:
/// - The frame-type/template catalog fetched from the store (catalog.rs)
/// - The geometry rule tables that turn a frame type into cell rectangles,
///   padding, and container dimensions (geometry.rs)

pub mod catalog;
pub mod geometry;
