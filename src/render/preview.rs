/// Preview scene renderer
///
/// The original booth rendered its preview as a DOM grid and screenshotted
/// it for printing. Headless, the same scene is drawn straight into an RGBA
/// buffer: template backdrop, the frame's cell grid from the geometry
/// resolver, each assigned photo cover-cropped into its cell with the active
/// filter, then the template overlay on top. The compositor consumes this
/// buffer exactly like the DOM screenshot, so preview and print share one
/// source of layout truth.

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};
use std::path::Path;

use crate::error::{BoothError, Result};
use crate::frame::geometry::{CellRect, FrameGeometry};
use crate::state::session::BoothSession;

/// Print stock is white; transparency must never leak into the raster
const STOCK_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Neutral tone for cells the user has not filled yet
const EMPTY_CELL: Rgba<u8> = Rgba([229, 231, 235, 255]);

/// Render the preview scene at `scale` times the logical container size.
///
/// `scale` is the supersampling factor the compositor picks (always >= 2 for
/// print); 1.0 gives the on-screen preview size.
pub fn render(session: &BoothSession, scale: f32) -> Result<RgbaImage> {
    if session.frame().is_none() && session.photos().is_empty() {
        return Err(BoothError::NothingToRender);
    }

    let geometry = FrameGeometry::resolve(session.frame());
    let canvas_width = scaled(geometry.container_width as f32, scale);
    let canvas_height = scaled(geometry.container_height as f32, scale);

    let mut canvas = match session
        .template()
        .and_then(|t| t.background.as_deref())
        .and_then(load_art)
    {
        Some(backdrop) => imageops::resize(
            &backdrop,
            canvas_width,
            canvas_height,
            FilterType::Lanczos3,
        ),
        None => RgbaImage::from_pixel(canvas_width, canvas_height, STOCK_WHITE),
    };

    let filter = session.filter();
    let rects = geometry.cell_rects();
    for (slot, rect) in rects.iter().enumerate().take(geometry.slot_count()) {
        let (x, y, width, height) = scale_rect(rect, scale);
        if width == 0 || height == 0 {
            continue;
        }

        let photo = session
            .slots()
            .get(slot)
            .copied()
            .flatten()
            .and_then(|index| session.photo(index));

        match photo {
            Some(photo) => {
                let mut cell = cover_fit(&photo.image, width, height);
                cell = filter.apply(&cell);
                if geometry.is_circle {
                    mask_circle(&mut cell);
                }
                imageops::overlay(&mut canvas, &cell, x as i64, y as i64);
            }
            None => {
                if geometry.is_circle {
                    let mut cell = RgbaImage::from_pixel(width, height, EMPTY_CELL);
                    mask_circle(&mut cell);
                    imageops::overlay(&mut canvas, &cell, x as i64, y as i64);
                } else {
                    fill_rect(&mut canvas, x, y, width, height, EMPTY_CELL);
                }
            }
        }
    }

    if let Some(overlay) = session
        .template()
        .and_then(|t| t.overlay.as_deref())
        .and_then(load_art)
    {
        let overlay = imageops::resize(
            &overlay,
            canvas_width,
            canvas_height,
            FilterType::Lanczos3,
        );
        imageops::overlay(&mut canvas, &overlay, 0, 0);
    }

    Ok(canvas)
}

/// Aspect-fill a photo into a cell: centre-crop the source to the cell's
/// aspect ratio, then resize to the exact pixel size.
pub fn cover_fit(source: &RgbaImage, target_width: u32, target_height: u32) -> RgbaImage {
    let (src_width, src_height) = source.dimensions();
    if src_width == 0 || src_height == 0 {
        return RgbaImage::from_pixel(target_width, target_height, STOCK_WHITE);
    }

    // Which dimension binds: compare aspect ratios without division
    let src_wide = (src_width as u64) * (target_height as u64);
    let dst_wide = (target_width as u64) * (src_height as u64);

    let (crop_width, crop_height) = if src_wide > dst_wide {
        // Source is wider than the cell: crop the sides
        let crop_width =
            ((src_height as u64 * target_width as u64) / target_height as u64) as u32;
        (crop_width.max(1).min(src_width), src_height)
    } else {
        // Source is taller: crop top and bottom
        let crop_height =
            ((src_width as u64 * target_height as u64) / target_width as u64) as u32;
        (src_width, crop_height.max(1).min(src_height))
    };

    let crop_x = (src_width - crop_width) / 2;
    let crop_y = (src_height - crop_height) / 2;
    let cropped = imageops::crop_imm(source, crop_x, crop_y, crop_width, crop_height).to_image();
    imageops::resize(&cropped, target_width, target_height, FilterType::Lanczos3)
}

/// Punch an antialiased circular cutout into a cell by zeroing alpha
/// outside the inscribed disc.
fn mask_circle(cell: &mut RgbaImage) {
    let (width, height) = cell.dimensions();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = width.min(height) as f32 / 2.0;

    for (x, y, pixel) in cell.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let distance = (dx * dx + dy * dy).sqrt();
        // 1px soft edge so the cutout does not alias
        let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
        pixel[3] = (pixel[3] as f32 * coverage) as u8;
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let (canvas_width, canvas_height) = canvas.dimensions();
    for py in y..(y + height).min(canvas_height) {
        for px in x..(x + width).min(canvas_width) {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn load_art(path: &str) -> Option<RgbaImage> {
    // Missing or unreadable template art falls back to plain stock
    image::open(Path::new(path)).ok().map(|img| img.to_rgba8())
}

fn scaled(value: f32, scale: f32) -> u32 {
    (value * scale).round() as u32
}

fn scale_rect(rect: &CellRect, scale: f32) -> (u32, u32, u32, u32) {
    (
        scaled(rect.x, scale),
        scaled(rect.y, scale),
        scaled(rect.width, scale),
        scaled(rect.height, scale),
    )
}
