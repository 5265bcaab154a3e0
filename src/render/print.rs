/// Print compositor
///
/// Turns the rendered preview scene into a fixed-resolution raster matching
/// the physical stock: 1800x1200 px for landscape 6x4in prints, 1200x1800
/// for portrait 4x6in (300dpi equivalent). Custom strips are the special
/// case: the 2in-wide strip is drawn twice side by side to fill the 4in
/// print, which is also why strips always print landscape.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, imageops::FilterType, DynamicImage, Rgba, RgbaImage};

use crate::error::Result;
use crate::frame::geometry::FrameGeometry;
use crate::render::preview;
use crate::state::session::BoothSession;

/// 6in at 300dpi
pub const PRINT_LONG_EDGE: u32 = 1800;
/// 4in at 300dpi
pub const PRINT_SHORT_EDGE: u32 = 1200;

/// JPEG quality for the print artifact (maximum practical)
const JPEG_QUALITY: u8 = 98;

/// Minimum supersampling factor so normal frames never upscale blurry
const MIN_SCALE: f32 = 2.0;

/// A finished print: the exact-size raster plus its JPEG encoding.
#[derive(Debug)]
pub struct PrintRaster {
    pub image: RgbaImage,
    pub jpeg: Vec<u8>,
    pub landscape: bool,
}

impl PrintRaster {
    /// Physical page size for the print dialog collaborator
    pub fn page_size(&self) -> &'static str {
        if self.landscape {
            "6in 4in"
        } else {
            "4in 6in"
        }
    }
}

/// Compose the session into a print-ready raster.
///
/// Fails before rendering anything if the slot gate is not satisfied;
/// failures never leave a partial artifact (the JPEG is encoded to memory
/// and only handed out whole).
pub fn compose(session: &BoothSession) -> Result<PrintRaster> {
    session.ensure_ready()?;

    let geometry = FrameGeometry::resolve(session.frame());
    let landscape = geometry.print_landscape();
    let (target_width, target_height) = if landscape {
        (PRINT_LONG_EDGE, PRINT_SHORT_EDGE)
    } else {
        (PRINT_SHORT_EDGE, PRINT_LONG_EDGE)
    };

    // Supersample the scene so the fit below never upscales. A custom strip
    // covers only half the print width, so its source counts double.
    let source_width = if geometry.is_custom {
        geometry.container_width * 2
    } else {
        geometry.container_width
    };
    let scale = (target_width as f32 / source_width as f32).max(MIN_SCALE);

    let source = preview::render(session, scale)?;

    let mut canvas = RgbaImage::from_pixel(
        target_width,
        target_height,
        Rgba([255, 255, 255, 255]),
    );

    if geometry.is_custom {
        // Physical doubling: the same strip fills the left and right half,
        // each scaled independently to half the print width
        let half = imageops::resize(
            &source,
            target_width / 2,
            target_height,
            FilterType::Lanczos3,
        );
        imageops::overlay(&mut canvas, &half, 0, 0);
        imageops::overlay(&mut canvas, &half, (target_width / 2) as i64, 0);
    } else {
        // Aspect-preserving fit, centred; whichever dimension binds decides
        // the letterbox/pillarbox offsets
        let (source_w, source_h) = source.dimensions();
        let fit = (target_width as f32 / source_w as f32)
            .min(target_height as f32 / source_h as f32);
        let draw_width = ((source_w as f32 * fit).round() as u32).min(target_width);
        let draw_height = ((source_h as f32 * fit).round() as u32).min(target_height);
        let offset_x = (target_width - draw_width) / 2;
        let offset_y = (target_height - draw_height) / 2;

        let fitted = imageops::resize(&source, draw_width, draw_height, FilterType::Lanczos3);
        imageops::overlay(&mut canvas, &fitted, offset_x as i64, offset_y as i64);
    }

    let jpeg = encode_jpeg(&canvas)?;
    Ok(PrintRaster {
        image: canvas,
        jpeg,
        landscape,
    })
}

/// Encode the raster as a maximum-quality JPEG, in memory.
/// JPEG has no alpha, and print stock is opaque anyway: flatten to RGB.
fn encode_jpeg(canvas: &RgbaImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::catalog::FrameCatalog;
    use crate::state::session::Photo;

    fn ready_session(frame_id: &str) -> BoothSession {
        let mut session = BoothSession::new();
        let frame = FrameCatalog::builtin()
            .frame_type(frame_id)
            .unwrap()
            .clone();
        let slots = frame.slot_count();
        session.select_frame(frame);
        for index in 0..slots {
            let shade = (30 + index * 37) as u8;
            let image = RgbaImage::from_pixel(120, 90, Rgba([shade, shade / 2, 200, 255]));
            session.add_photo(Photo::from_image(index, image));
            session.select_photo(index).unwrap();
        }
        session
    }

    #[test]
    fn test_landscape_raster_is_exactly_1800x1200() {
        let raster = compose(&ready_session("5")).unwrap();
        assert!(raster.landscape);
        assert_eq!(raster.image.dimensions(), (1800, 1200));
        assert_eq!(raster.page_size(), "6in 4in");
    }

    #[test]
    fn test_portrait_raster_is_exactly_1200x1800() {
        let raster = compose(&ready_session("4")).unwrap();
        assert!(!raster.landscape);
        assert_eq!(raster.image.dimensions(), (1200, 1800));
        assert_eq!(raster.page_size(), "4in 6in");
    }

    #[test]
    fn test_circle_frame_prints_portrait() {
        let raster = compose(&ready_session("6")).unwrap();
        assert!(!raster.landscape);
        assert_eq!(raster.image.dimensions(), (1200, 1800));
    }

    #[test]
    fn test_strip_prints_landscape_with_identical_halves() {
        let raster = compose(&ready_session("7")).unwrap();
        assert!(raster.landscape);
        assert_eq!(raster.image.dimensions(), (1800, 1200));

        // The strip is drawn twice: left and right halves must match to
        // within resampling tolerance
        let (width, height) = raster.image.dimensions();
        let half = width / 2;
        for y in (0..height).step_by(37) {
            for x in (0..half).step_by(23) {
                let left = raster.image.get_pixel(x, y);
                let right = raster.image.get_pixel(x + half, y);
                for channel in 0..3 {
                    let delta = (left[channel] as i16 - right[channel] as i16).abs();
                    assert!(delta <= 2, "halves diverge at ({x}, {y}): {delta}");
                }
            }
        }
    }

    #[test]
    fn test_non_custom_fit_is_letterboxed_on_white() {
        // Portrait 480x720 scene onto a 1200x1800 target scales exactly
        // (both 2:3), so instead letterbox a landscape 720x480 scene: fit
        // fills 1800x1200 exactly too. Use the circle frame's portrait
        // stock and check the corners stay white regardless.
        let raster = compose(&ready_session("6")).unwrap();
        assert_eq!(*raster.image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(
            *raster.image.get_pixel(1199, 1799),
            Rgba([255, 255, 255, 255])
        );
    }

    #[test]
    fn test_jpeg_artifact_decodes_to_target_size() {
        let raster = compose(&ready_session("5")).unwrap();
        assert!(!raster.jpeg.is_empty());
        let decoded = image::load_from_memory(&raster.jpeg).unwrap();
        assert_eq!(decoded.width(), 1800);
        assert_eq!(decoded.height(), 1200);
    }

    #[test]
    fn test_unready_session_composes_nothing() {
        let mut session = ready_session("5");
        session.remove_slot(2);
        let err = compose(&session).unwrap_err();
        assert!(err.to_string().contains("at least 4"));
    }

    #[test]
    fn test_scale_is_at_least_two() {
        // 720-wide landscape source into 1800 target: ratio 2.5 wins.
        // 240-wide strip counts double (480): ratio 3.75 wins. Both are
        // over the 2.0 floor; a hypothetical wider source would clamp to 2.
        let strip = FrameGeometry::resolve(Some(
            FrameCatalog::builtin().frame_type("7").unwrap(),
        ));
        let doubled = strip.container_width * 2;
        let scale = (PRINT_LONG_EDGE as f32 / doubled as f32).max(MIN_SCALE);
        assert!(scale >= 2.0);
        assert!((scale - 3.75).abs() < f32::EPSILON);
    }
}
