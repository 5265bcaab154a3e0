/// Named visual filters
///
/// The booth offers a fixed set of looks; exactly one is active at a time
/// and it is applied uniformly to every rendered photo cell. Each look is a
/// small CSS-filter-equivalent parameter set (brightness, contrast,
/// saturate, sepia, hue-rotate) so the preview and the print raster agree
/// by construction.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BoothError;

/// Rec. 709 luminance coefficients (same as the render pipeline)
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// The booth's named looks. `None` is the identity and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoothFilter {
    #[default]
    None,
    Warm,
    Cool,
    Mono,
    Vintage,
    Punch,
}

/// CSS-filter-equivalent adjustment set resolved from a named look.
/// All multipliers are 1.0 at identity; sepia and hue-rotate are 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    pub brightness: f32,
    pub contrast: f32,
    pub saturate: f32,
    pub sepia: f32,
    pub hue_rotate_deg: f32,
}

impl FilterParams {
    const IDENTITY: FilterParams = FilterParams {
        brightness: 1.0,
        contrast: 1.0,
        saturate: 1.0,
        sepia: 0.0,
        hue_rotate_deg: 0.0,
    };
}

impl BoothFilter {
    /// Every selectable look, in menu order
    pub const ALL: [BoothFilter; 6] = [
        BoothFilter::None,
        BoothFilter::Warm,
        BoothFilter::Cool,
        BoothFilter::Mono,
        BoothFilter::Vintage,
        BoothFilter::Punch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BoothFilter::None => "none",
            BoothFilter::Warm => "warm",
            BoothFilter::Cool => "cool",
            BoothFilter::Mono => "mono",
            BoothFilter::Vintage => "vintage",
            BoothFilter::Punch => "punch",
        }
    }

    pub fn is_identity(self) -> bool {
        self == BoothFilter::None
    }

    /// The tuned parameter set for this look
    pub fn params(self) -> FilterParams {
        match self {
            BoothFilter::None => FilterParams::IDENTITY,
            BoothFilter::Warm => FilterParams {
                brightness: 1.05,
                saturate: 1.15,
                sepia: 0.18,
                hue_rotate_deg: -8.0,
                ..FilterParams::IDENTITY
            },
            BoothFilter::Cool => FilterParams {
                brightness: 1.02,
                saturate: 1.05,
                hue_rotate_deg: 12.0,
                ..FilterParams::IDENTITY
            },
            BoothFilter::Mono => FilterParams {
                brightness: 1.02,
                contrast: 1.08,
                saturate: 0.0,
                ..FilterParams::IDENTITY
            },
            BoothFilter::Vintage => FilterParams {
                brightness: 1.04,
                contrast: 0.92,
                saturate: 0.85,
                sepia: 0.45,
                ..FilterParams::IDENTITY
            },
            BoothFilter::Punch => FilterParams {
                contrast: 1.18,
                saturate: 1.3,
                ..FilterParams::IDENTITY
            },
        }
    }

    /// Apply this look to an image.
    ///
    /// Adjustment order mirrors the render pipeline: brightness, contrast
    /// about the 0.5 midpoint, luminance-weighted saturation, sepia blend,
    /// hue rotation, clamp. Alpha passes through untouched.
    pub fn apply(self, image: &RgbaImage) -> RgbaImage {
        if self.is_identity() {
            return image.clone();
        }

        let params = self.params();
        let hue = params.hue_rotate_deg.to_radians();
        let (sin_h, cos_h) = hue.sin_cos();

        let mut output = image.clone();
        for pixel in output.pixels_mut() {
            let mut r = pixel[0] as f32 / 255.0;
            let mut g = pixel[1] as f32 / 255.0;
            let mut b = pixel[2] as f32 / 255.0;

            // Brightness (multiplicative)
            r *= params.brightness;
            g *= params.brightness;
            b *= params.brightness;

            // Contrast around the midpoint
            r = (r - 0.5) * params.contrast + 0.5;
            g = (g - 0.5) * params.contrast + 0.5;
            b = (b - 0.5) * params.contrast + 0.5;

            // Saturation: mix between luminance gray and the original
            let luma = r * LUMA_R + g * LUMA_G + b * LUMA_B;
            r = luma + (r - luma) * params.saturate;
            g = luma + (g - luma) * params.saturate;
            b = luma + (b - luma) * params.saturate;

            // Sepia blend
            if params.sepia > 0.0 {
                let sr = 0.393 * r + 0.769 * g + 0.189 * b;
                let sg = 0.349 * r + 0.686 * g + 0.168 * b;
                let sb = 0.272 * r + 0.534 * g + 0.131 * b;
                r = r + (sr - r) * params.sepia;
                g = g + (sg - g) * params.sepia;
                b = b + (sb - b) * params.sepia;
            }

            // Hue rotation (luminance-preserving matrix, CSS semantics)
            if params.hue_rotate_deg != 0.0 {
                let nr = r * (0.213 + cos_h * 0.787 - sin_h * 0.213)
                    + g * (0.715 - cos_h * 0.715 - sin_h * 0.715)
                    + b * (0.072 - cos_h * 0.072 + sin_h * 0.928);
                let ng = r * (0.213 - cos_h * 0.213 + sin_h * 0.143)
                    + g * (0.715 + cos_h * 0.285 + sin_h * 0.140)
                    + b * (0.072 - cos_h * 0.072 - sin_h * 0.283);
                let nb = r * (0.213 - cos_h * 0.213 - sin_h * 0.787)
                    + g * (0.715 - cos_h * 0.715 + sin_h * 0.715)
                    + b * (0.072 + cos_h * 0.928 + sin_h * 0.072);
                r = nr;
                g = ng;
                b = nb;
            }

            pixel[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
            pixel[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
            pixel[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        output
    }
}

impl FromStr for BoothFilter {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoothFilter::ALL
            .into_iter()
            .find(|f| f.name() == s.to_lowercase())
            .ok_or_else(|| BoothError::UnknownFilter(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_image() -> RgbaImage {
        RgbaImage::from_fn(8, 8, |x, y| {
            Rgba([(x * 32) as u8, (y * 32) as u8, 128, 255])
        })
    }

    #[test]
    fn test_identity_filter_is_byte_stable() {
        let image = sample_image();
        let filtered = BoothFilter::None.apply(&image);
        assert_eq!(filtered.as_raw(), image.as_raw());
    }

    #[test]
    fn test_mono_removes_color() {
        let image = sample_image();
        let filtered = BoothFilter::Mono.apply(&image);
        for pixel in filtered.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
    }

    #[test]
    fn test_alpha_passes_through() {
        let mut image = sample_image();
        image.get_pixel_mut(3, 3)[3] = 77;
        let filtered = BoothFilter::Vintage.apply(&image);
        assert_eq!(filtered.get_pixel(3, 3)[3], 77);
        assert_eq!(filtered.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn test_parse_by_name() {
        assert_eq!("warm".parse::<BoothFilter>().unwrap(), BoothFilter::Warm);
        assert_eq!("MONO".parse::<BoothFilter>().unwrap(), BoothFilter::Mono);
        assert!(matches!(
            "sparkle".parse::<BoothFilter>(),
            Err(BoothError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_serde_names_match_menu_names() {
        for filter in BoothFilter::ALL {
            let json = serde_json::to_string(&filter).unwrap();
            assert_eq!(json, format!("\"{}\"", filter.name()));
            let restored: BoothFilter = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, filter);
        }
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(BoothFilter::default(), BoothFilter::None);
        assert!(BoothFilter::default().is_identity());
    }
}
