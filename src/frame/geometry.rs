/// Frame geometry resolver
///
/// Aspect ratios, padding and gaps are NOT derived from the grid dimensions:
/// they come from the physical paper catalog and encode printer calibration.
/// Both tables below are keyed by (columns, rows, isCustom) and must match
/// the catalog exactly; anything unmapped falls back to a 4:3 cell with
/// uniform 13px padding. Keep the tables here, in one place, so the preview
/// and the print compositor can never drift apart.

use crate::frame::catalog::FrameType;

/// Logical preview container, landscape orientation
pub const LANDSCAPE_WIDTH: u32 = 720;
pub const LANDSCAPE_HEIGHT: u32 = 480;

/// Custom (strip) frames always preview as a fixed narrow column
pub const STRIP_WIDTH: u32 = 240;
pub const STRIP_HEIGHT: u32 = 720;

/// Circle frames inset the single cell this much on each side
pub const CIRCLE_INSET: u32 = 13;

const DEFAULT_PADDING: u32 = 13;
const DEFAULT_GAP: u32 = 13;

/// A cell's width:height ratio, kept as the integer pair from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAspect {
    pub w: u32,
    pub h: u32,
}

impl CellAspect {
    pub const fn new(w: u32, h: u32) -> Self {
        CellAspect { w, h }
    }

    /// Height of a cell of the given width under this ratio
    pub fn height_for(self, width: f32) -> f32 {
        width * self.h as f32 / self.w as f32
    }
}

/// Outer padding of the preview container, in logical px
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeInsets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl EdgeInsets {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        EdgeInsets {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: u32) -> Self {
        EdgeInsets::new(value, value, value, value)
    }
}

/// Grid track sizing. Fractional tracks divide the inner area equally;
/// fixed tracks are exact pixel widths/heights from the catalog (frame "5"
/// needs them so its asymmetric padding still sums to the container).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridTracks {
    Fractional,
    Fixed {
        column_widths: Vec<u32>,
        row_heights: Vec<u32>,
    },
}

/// One cell's rectangle in logical container coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Resolved layout for a frame type: everything the preview renderer and the
/// print compositor need, computed once and purely from the FrameType.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameGeometry {
    pub cell_aspect: CellAspect,
    pub padding: EdgeInsets,
    pub gap: u32,
    pub container_width: u32,
    pub container_height: u32,
    pub is_landscape: bool,
    pub is_custom: bool,
    pub is_circle: bool,
    pub tracks: GridTracks,
    /// Effective grid (custom strips collapse to a single column)
    pub grid_columns: u32,
    pub grid_rows: u32,
    /// Whether the aspect/padding came from a catalog table entry rather
    /// than the fallback. No catalog frame should ever be a fallback.
    pub aspect_from_table: bool,
    pub padding_from_table: bool,
}

impl FrameGeometry {
    /// Resolve the geometry for a frame type. `None` means "no frame
    /// selected yet": the booth shows a default 4-slot 2x2 grid.
    pub fn resolve(frame: Option<&FrameType>) -> Self {
        let Some(frame) = frame else {
            return Self::default_grid();
        };

        let key = (frame.columns, frame.rows, frame.is_custom);

        let (cell_aspect, aspect_from_table) = if frame.is_circle {
            // Single circular cutout is always a perfect circle
            (CellAspect::new(1, 1), true)
        } else if frame.id == "1" {
            // Catalog frame "1" is the standard 6x4 single: 16:9 under every
            // path, even where another table entry would match
            (CellAspect::new(16, 9), true)
        } else {
            lookup_aspect(key)
        };

        let (padding, gap, padding_from_table) = if frame.is_circle {
            (EdgeInsets::uniform(CIRCLE_INSET), 0, true)
        } else {
            lookup_padding(key)
        };

        // Orientation of the PREVIEW container. Strips and circles preview
        // as tall portraits; frame "1" is explicitly landscape; for grids a
        // square count (2x2) still lies on landscape 6x4 stock.
        let is_landscape = if frame.is_custom || frame.is_circle {
            false
        } else if frame.id == "1" {
            true
        } else {
            frame.columns >= frame.rows
        };

        let (container_width, container_height) = if frame.is_custom {
            (STRIP_WIDTH, STRIP_HEIGHT)
        } else if frame.is_circle {
            (LANDSCAPE_HEIGHT, LANDSCAPE_WIDTH)
        } else if is_landscape {
            (LANDSCAPE_WIDTH, LANDSCAPE_HEIGHT)
        } else {
            (LANDSCAPE_HEIGHT, LANDSCAPE_WIDTH)
        };

        // Frame "5" (2x2 on 6x4) is calibrated with exact pixel tracks; its
        // padding asymmetry cannot be expressed with fractional tracks.
        let tracks = if frame.id == "5" {
            GridTracks::Fixed {
                column_widths: vec![293, 293],
                row_heights: vec![220, 220],
            }
        } else {
            GridTracks::Fractional
        };

        let (grid_columns, grid_rows) = if frame.is_custom {
            (1, frame.rows)
        } else if frame.is_circle {
            (1, 1)
        } else {
            (frame.columns, frame.rows)
        };

        FrameGeometry {
            cell_aspect,
            padding,
            gap,
            container_width,
            container_height,
            is_landscape,
            is_custom: frame.is_custom,
            is_circle: frame.is_circle,
            tracks,
            grid_columns,
            grid_rows,
            aspect_from_table,
            padding_from_table,
        }
    }

    /// The "no frame selected" layout: a plain 4-slot 2x2 grid on landscape
    /// stock with fallback styling.
    fn default_grid() -> Self {
        FrameGeometry {
            cell_aspect: CellAspect::new(4, 3),
            padding: EdgeInsets::uniform(DEFAULT_PADDING),
            gap: DEFAULT_GAP,
            container_width: LANDSCAPE_WIDTH,
            container_height: LANDSCAPE_HEIGHT,
            is_landscape: true,
            is_custom: false,
            is_circle: false,
            tracks: GridTracks::Fractional,
            grid_columns: 2,
            grid_rows: 2,
            aspect_from_table: false,
            padding_from_table: false,
        }
    }

    /// Orientation of the PRINT, which is not the preview orientation:
    /// custom strips print on landscape 6x4 stock (the strip is doubled side
    /// by side), even though their preview is a tall column. Intentional,
    /// not a bug.
    pub fn print_landscape(&self) -> bool {
        if self.is_custom {
            true
        } else {
            self.is_landscape
        }
    }

    /// Number of photo slots in this layout
    pub fn slot_count(&self) -> usize {
        (self.grid_columns * self.grid_rows) as usize
    }

    /// Per-slot rectangles in logical container coordinates, row-major.
    ///
    /// Column widths come from the tracks; with fractional tracks the row
    /// height follows the cell aspect ratio, the way the DOM preview's
    /// `aspect-ratio` cells did.
    pub fn cell_rects(&self) -> Vec<CellRect> {
        if self.is_circle {
            // Single cell: full inner width, vertically centred
            let side = (self.container_width - self.padding.left - self.padding.right) as f32;
            return vec![CellRect {
                x: self.padding.left as f32,
                y: (self.container_height as f32 - side) / 2.0,
                width: side,
                height: side,
            }];
        }

        let cols = self.grid_columns as usize;
        let rows = self.grid_rows as usize;
        let inner_width =
            (self.container_width - self.padding.left - self.padding.right) as f32;
        let gap = self.gap as f32;

        let column_widths: Vec<f32> = match &self.tracks {
            GridTracks::Fixed { column_widths, .. } if column_widths.len() == cols => {
                column_widths.iter().map(|&w| w as f32).collect()
            }
            _ => {
                let width = (inner_width - gap * (cols as f32 - 1.0)) / cols as f32;
                vec![width; cols]
            }
        };

        let row_heights: Vec<f32> = match &self.tracks {
            GridTracks::Fixed { row_heights, .. } if row_heights.len() == rows => {
                row_heights.iter().map(|&h| h as f32).collect()
            }
            _ => {
                // Aspect-ratio-driven rows: height follows the column width
                let height = self.cell_aspect.height_for(column_widths[0]);
                vec![height; rows]
            }
        };

        let mut rects = Vec::with_capacity(cols * rows);
        let mut y = self.padding.top as f32;
        for row_height in &row_heights {
            let mut x = self.padding.left as f32;
            for column_width in &column_widths {
                rects.push(CellRect {
                    x,
                    y,
                    width: *column_width,
                    height: *row_height,
                });
                x += column_width + gap;
            }
            y += row_height + gap;
        }
        rects
    }
}

/// The aspect-ratio table from the physical frame catalog. Reproduced
/// verbatim; do not "simplify" these into a formula.
fn lookup_aspect(key: (u32, u32, bool)) -> (CellAspect, bool) {
    let aspect = match key {
        (1, 1, false) => CellAspect::new(16, 9),
        (1, 1, true) => CellAspect::new(1, 1),
        (2, 1, false) => CellAspect::new(1, 1),
        (2, 1, true) => CellAspect::new(3, 4),
        (2, 2, false) => CellAspect::new(4, 3),
        (3, 2, false) => CellAspect::new(5, 4),
        (2, 3, false) => CellAspect::new(13, 12),
        (1, 4, true) => CellAspect::new(4, 3),
        (1, 2, true) => CellAspect::new(3, 4),
        _ => return (CellAspect::new(4, 3), false),
    };
    (aspect, true)
}

/// The padding/gap table: physical print bleed margins per catalog entry.
/// Asymmetries are printer calibration (e.g. 2x2 leaves the right edge bare
/// for the wider final column), not style.
fn lookup_padding(key: (u32, u32, bool)) -> (EdgeInsets, u32, bool) {
    let (insets, gap) = match key {
        (1, 1, false) => (EdgeInsets::new(13, 13, 13, 0), 13),
        (2, 1, false) => (EdgeInsets::new(13, 13, 13, 0), 13),
        (2, 2, false) => (EdgeInsets::new(13, 13, 0, 13), 13),
        (3, 2, false) => (EdgeInsets::uniform(13), 13),
        (2, 3, false) => (EdgeInsets::uniform(13), 13),
        (1, 4, true) => (EdgeInsets::uniform(24), 24),
        (1, 2, true) => (EdgeInsets::uniform(24), 24),
        (2, 1, true) => (EdgeInsets::uniform(24), 24),
        (1, 1, true) => (EdgeInsets::uniform(13), 0),
        _ => return (EdgeInsets::uniform(DEFAULT_PADDING), DEFAULT_GAP, false),
    };
    (insets, gap, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::catalog::FrameCatalog;

    #[test]
    fn test_every_catalog_entry_hits_the_tables() {
        // No shipped frame may silently fall back to default styling
        let catalog = FrameCatalog::builtin();
        for frame in &catalog.frame_types {
            let geometry = FrameGeometry::resolve(Some(frame));
            assert!(
                geometry.aspect_from_table,
                "frame {:?} fell back to the default aspect",
                frame.id
            );
            assert!(
                geometry.padding_from_table,
                "frame {:?} fell back to the default padding",
                frame.id
            );
        }
    }

    #[test]
    fn test_frame_5_exact_calibration() {
        let catalog = FrameCatalog::builtin();
        let frame = catalog.frame_type("5").unwrap();
        let geometry = FrameGeometry::resolve(Some(frame));

        assert_eq!(geometry.container_width, 720);
        assert_eq!(geometry.container_height, 480);
        assert!(geometry.is_landscape);
        assert_eq!(geometry.padding, EdgeInsets::new(13, 13, 0, 13));
        assert_eq!(geometry.gap, 13);
        assert_eq!(
            geometry.tracks,
            GridTracks::Fixed {
                column_widths: vec![293, 293],
                row_heights: vec![220, 220],
            }
        );

        let rects = geometry.cell_rects();
        assert_eq!(rects.len(), 4);
        // Row-major: second cell sits one track + gap to the right
        assert_eq!(rects[0].x, 13.0);
        assert_eq!(rects[0].y, 13.0);
        assert_eq!(rects[1].x, 13.0 + 293.0 + 13.0);
        assert_eq!(rects[2].y, 13.0 + 220.0 + 13.0);
        assert_eq!(rects[3].width, 293.0);
        assert_eq!(rects[3].height, 220.0);
    }

    #[test]
    fn test_circle_frame_geometry() {
        let catalog = FrameCatalog::builtin();
        let frame = catalog.frame_type("6").unwrap();
        let geometry = FrameGeometry::resolve(Some(frame));

        assert_eq!(geometry.container_width, 480);
        assert_eq!(geometry.container_height, 720);
        assert!(!geometry.is_landscape);
        assert!(!geometry.print_landscape());
        assert_eq!(geometry.cell_aspect, CellAspect::new(1, 1));

        let rects = geometry.cell_rects();
        assert_eq!(rects.len(), 1);
        // Inset 13 left/right, perfectly square, vertically centred
        assert_eq!(rects[0].x, 13.0);
        assert_eq!(rects[0].width, 454.0);
        assert_eq!(rects[0].height, 454.0);
        assert_eq!(rects[0].y, (720.0 - 454.0) / 2.0);
    }

    #[test]
    fn test_strip_previews_portrait_but_prints_landscape() {
        let catalog = FrameCatalog::builtin();
        let frame = catalog.frame_type("7").unwrap();
        let geometry = FrameGeometry::resolve(Some(frame));

        // Tall 240x720 strip on screen...
        assert_eq!(geometry.container_width, 240);
        assert_eq!(geometry.container_height, 720);
        assert!(!geometry.is_landscape);
        // ...but printed doubled onto landscape 6x4 stock. Do not "fix".
        assert!(geometry.print_landscape());
        assert_eq!(geometry.slot_count(), 4);
        assert_eq!(geometry.padding, EdgeInsets::uniform(24));
    }

    #[test]
    fn test_frame_1_forces_16_9_landscape() {
        let catalog = FrameCatalog::builtin();
        let frame = catalog.frame_type("1").unwrap();
        let geometry = FrameGeometry::resolve(Some(frame));

        assert_eq!(geometry.cell_aspect, CellAspect::new(16, 9));
        assert!(geometry.is_landscape);
        assert_eq!(geometry.container_width, 720);
        assert_eq!(geometry.padding, EdgeInsets::new(13, 13, 13, 0));
    }

    #[test]
    fn test_portrait_grid() {
        let catalog = FrameCatalog::builtin();
        let frame = catalog.frame_type("4").unwrap();
        let geometry = FrameGeometry::resolve(Some(frame));

        assert_eq!(geometry.cell_aspect, CellAspect::new(13, 12));
        assert!(!geometry.is_landscape);
        assert!(!geometry.print_landscape());
        assert_eq!(geometry.container_width, 480);
        assert_eq!(geometry.container_height, 720);
        assert_eq!(geometry.slot_count(), 6);
    }

    #[test]
    fn test_unmapped_tuple_falls_back() {
        let frame = FrameType {
            id: "99".to_string(),
            name: "Experimental".to_string(),
            columns: 5,
            rows: 5,
            total_images: 25,
            is_custom: false,
            is_circle: false,
            is_hot: false,
        };
        let geometry = FrameGeometry::resolve(Some(&frame));
        assert_eq!(geometry.cell_aspect, CellAspect::new(4, 3));
        assert_eq!(geometry.padding, EdgeInsets::uniform(13));
        assert_eq!(geometry.gap, 13);
        assert!(!geometry.aspect_from_table);
        assert!(!geometry.padding_from_table);
    }

    #[test]
    fn test_no_frame_defaults_to_four_slot_grid() {
        let geometry = FrameGeometry::resolve(None);
        assert_eq!(geometry.slot_count(), 4);
        assert_eq!(geometry.cell_aspect, CellAspect::new(4, 3));
        assert_eq!(geometry.container_width, 720);
    }

    #[test]
    fn test_cell_rects_row_major_order() {
        let catalog = FrameCatalog::builtin();
        let frame = catalog.frame_type("3").unwrap();
        let geometry = FrameGeometry::resolve(Some(frame));
        let rects = geometry.cell_rects();

        assert_eq!(rects.len(), 6);
        // First row left-to-right, then second row
        assert!(rects[0].x < rects[1].x && rects[1].x < rects[2].x);
        assert_eq!(rects[0].y, rects[2].y);
        assert!(rects[3].y > rects[0].y);
        assert_eq!(rects[3].x, rects[0].x);
    }
}
