/// Frame reference data
///
/// Frame types and their decorative templates are reference data owned by an
/// external store (the booth fetches them once per session). Here they arrive
/// as a JSON document with camelCase keys, since the upstream service speaks
/// JavaScript conventions. The engine treats the catalog as read-only.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BoothError, Result};

/// A catalog entry describing one physical frame layout family.
///
/// `columns`/`rows` describe the preview grid. Custom frames are vertical
/// strips: they expose `rows` slots in a single column and are printed twice
/// side by side. Circle frames have a single circular cutout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameType {
    /// Catalog id, assigned by the store (stringly typed on the wire)
    pub id: String,
    pub name: String,
    pub columns: u32,
    pub rows: u32,
    /// Expected number of photos; columns*rows unless custom (then rows)
    pub total_images: u32,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub is_circle: bool,
    /// Display-only "popular" badge, irrelevant to layout
    #[serde(default)]
    pub is_hot: bool,
}

impl FrameType {
    /// Number of photo slots this frame exposes.
    /// Custom strips are a single column of `rows` cells.
    pub fn slot_count(&self) -> usize {
        if self.is_custom {
            self.rows as usize
        } else {
            (self.columns * self.rows) as usize
        }
    }
}

/// Decorative background/overlay pair for a frame type.
///
/// Selection is independent of layout geometry; missing art falls back to
/// plain white print stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameTemplate {
    pub id: String,
    pub frame_type_id: String,
    #[serde(default)]
    pub name: String,
    /// Path (or URL already fetched to disk) of the backdrop image
    #[serde(default)]
    pub background: Option<String>,
    /// Path of the overlay composited above the photos
    #[serde(default)]
    pub overlay: Option<String>,
    #[serde(default)]
    pub position: u32,
}

/// The full reference-data document fetched from the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameCatalog {
    pub frame_types: Vec<FrameType>,
    #[serde(default)]
    pub frame_templates: Vec<FrameTemplate>,
}

impl FrameCatalog {
    /// Parse a catalog from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: FrameCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Look up a frame type by its catalog id.
    pub fn frame_type(&self, id: &str) -> Result<&FrameType> {
        self.frame_types
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| BoothError::UnknownFrameType(id.to_string()))
    }

    /// Look up a template by id.
    pub fn template(&self, id: &str) -> Option<&FrameTemplate> {
        self.frame_templates.iter().find(|t| t.id == id)
    }

    /// Templates belonging to a frame type, in display order.
    pub fn templates_for(&self, frame_type_id: &str) -> Vec<&FrameTemplate> {
        let mut templates: Vec<&FrameTemplate> = self
            .frame_templates
            .iter()
            .filter(|t| t.frame_type_id == frame_type_id)
            .collect();
        templates.sort_by_key(|t| t.position);
        templates
    }

    /// Check the catalog invariants:
    /// - ids are unique and non-empty
    /// - grid dimensions are at least 1x1
    /// - totalImages matches columns*rows (or rows, for custom strips)
    pub fn validate(&self) -> Result<()> {
        for frame in &self.frame_types {
            if frame.id.is_empty() {
                return Err(BoothError::InvalidCatalog(
                    "frame type with empty id".to_string(),
                ));
            }
            if frame.columns == 0 || frame.rows == 0 {
                return Err(BoothError::InvalidCatalog(format!(
                    "frame {:?} has a {}x{} grid",
                    frame.id, frame.columns, frame.rows
                )));
            }
            let expected = frame.slot_count() as u32;
            if frame.total_images != expected {
                return Err(BoothError::InvalidCatalog(format!(
                    "frame {:?} declares {} images but its layout holds {}",
                    frame.id, frame.total_images, expected
                )));
            }
            let duplicates = self.frame_types.iter().filter(|f| f.id == frame.id).count();
            if duplicates > 1 {
                return Err(BoothError::InvalidCatalog(format!(
                    "duplicate frame id {:?}",
                    frame.id
                )));
            }
        }
        Ok(())
    }

    /// The shipped physical catalog. This mirrors the store's seed data so
    /// the booth still works when the reference endpoint is unreachable.
    pub fn builtin() -> Self {
        let frame_types = vec![
            frame("1", "6x4 Classic", 1, 1, false, false, true),
            frame("2", "2-up Landscape", 2, 1, false, false, false),
            frame("3", "6-up Grid", 3, 2, false, false, false),
            frame("4", "6-up Portrait", 2, 3, false, false, false),
            frame("5", "4-up Grid", 2, 2, false, false, true),
            frame("6", "Circle Portrait", 1, 1, false, true, false),
            frame("7", "Photo Strip", 1, 4, true, false, true),
            frame("8", "Duo Strip", 1, 2, true, false, false),
            frame("9", "Wide Strip", 2, 1, true, false, false),
        ];
        FrameCatalog {
            frame_types,
            frame_templates: Vec::new(),
        }
    }
}

fn frame(
    id: &str,
    name: &str,
    columns: u32,
    rows: u32,
    is_custom: bool,
    is_circle: bool,
    is_hot: bool,
) -> FrameType {
    let total_images = if is_custom { rows } else { columns * rows };
    FrameType {
        id: id.to_string(),
        name: name.to_string(),
        columns,
        rows,
        total_images,
        is_custom,
        is_circle,
        is_hot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = FrameCatalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.frame_types.len(), 9);
    }

    #[test]
    fn test_slot_count_rules() {
        let catalog = FrameCatalog::builtin();
        // Non-custom: columns * rows
        assert_eq!(catalog.frame_type("5").unwrap().slot_count(), 4);
        assert_eq!(catalog.frame_type("3").unwrap().slot_count(), 6);
        // Custom strip: rows (single column)
        assert_eq!(catalog.frame_type("7").unwrap().slot_count(), 4);
        assert_eq!(catalog.frame_type("8").unwrap().slot_count(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = FrameCatalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        // Wire format is camelCase
        assert!(json.contains("totalImages"));
        assert!(json.contains("isCustom"));
        let restored = FrameCatalog::from_json(&json).unwrap();
        assert_eq!(restored.frame_types, catalog.frame_types);
    }

    #[test]
    fn test_unknown_frame_id() {
        let catalog = FrameCatalog::builtin();
        assert!(matches!(
            catalog.frame_type("999"),
            Err(BoothError::UnknownFrameType(_))
        ));
    }

    #[test]
    fn test_total_images_mismatch_rejected() {
        let mut catalog = FrameCatalog::builtin();
        catalog.frame_types[0].total_images = 7;
        assert!(matches!(
            catalog.validate(),
            Err(BoothError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_templates_sorted_by_position() {
        let mut catalog = FrameCatalog::builtin();
        catalog.frame_templates = vec![
            FrameTemplate {
                id: "t2".to_string(),
                frame_type_id: "5".to_string(),
                name: String::new(),
                background: None,
                overlay: None,
                position: 2,
            },
            FrameTemplate {
                id: "t1".to_string(),
                frame_type_id: "5".to_string(),
                name: String::new(),
                background: None,
                overlay: None,
                position: 1,
            },
        ];
        let ordered = catalog.templates_for("5");
        assert_eq!(ordered[0].id, "t1");
        assert_eq!(ordered[1].id, "t2");
    }
}
