/// Booth session state
///
/// One session per customer visit. The session owns the captured photos,
/// the selected frame type and template, the slot assignment, and the
/// active filter. Everything downstream (preview renderer, print
/// compositor) only reads it; all mutation happens here in response to
/// direct user input.

use image::RgbaImage;
use std::path::{Path, PathBuf};

use crate::error::{BoothError, Result};
use crate::frame::catalog::{FrameTemplate, FrameType};
use crate::state::filter::BoothFilter;

/// Slots shown before any frame is selected
const DEFAULT_SLOT_COUNT: usize = 4;

/// A captured photo. Immutable once captured; `index` is the capture-order
/// position the slot assignment refers to.
#[derive(Debug, Clone)]
pub struct Photo {
    pub index: usize,
    pub source: PathBuf,
    pub image: RgbaImage,
}

impl Photo {
    /// Decode a captured photo from disk.
    pub fn load(index: usize, path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|source| BoothError::PhotoLoad {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Ok(Photo {
            index,
            source: path.to_path_buf(),
            image,
        })
    }

    /// Wrap an already-decoded capture (camera hand-off, tests).
    pub fn from_image(index: usize, image: RgbaImage) -> Self {
        Photo {
            index,
            source: PathBuf::new(),
            image,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoothSession {
    photos: Vec<Photo>,
    frame: Option<FrameType>,
    template: Option<FrameTemplate>,
    filter: BoothFilter,
    /// Fixed-length, positional: `slots[i]` holds the capture index shown
    /// in grid cell `i`, or None for an empty cell. Never compacted.
    slots: Vec<Option<usize>>,
}

impl BoothSession {
    pub fn new() -> Self {
        BoothSession {
            slots: vec![None; DEFAULT_SLOT_COUNT],
            ..Default::default()
        }
    }

    // ========== Captures ==========

    pub fn add_photo(&mut self, photo: Photo) {
        self.photos.push(photo);
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn photo(&self, index: usize) -> Option<&Photo> {
        self.photos.iter().find(|p| p.index == index)
    }

    // ========== Frame / template / filter selection ==========

    /// Select a frame type. Changing frames resizes the slot array to the
    /// new capacity and clears prior assignments: a half-filled 6-up layout
    /// has no meaningful mapping onto a 4-up strip.
    pub fn select_frame(&mut self, frame: FrameType) {
        // A selected template belongs to the old frame family
        if self
            .template
            .as_ref()
            .is_some_and(|t| t.frame_type_id != frame.id)
        {
            self.template = None;
        }
        self.frame = Some(frame);
        self.slots = vec![None; self.max_slots()];
    }

    pub fn frame(&self) -> Option<&FrameType> {
        self.frame.as_ref()
    }

    pub fn select_template(&mut self, template: FrameTemplate) {
        self.template = Some(template);
    }

    pub fn template(&self) -> Option<&FrameTemplate> {
        self.template.as_ref()
    }

    pub fn set_filter(&mut self, filter: BoothFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> BoothFilter {
        self.filter
    }

    // ========== Slot assignment ==========

    /// Photo capacity of the current frame (4 when none is selected yet)
    pub fn max_slots(&self) -> usize {
        self.frame
            .as_ref()
            .map(FrameType::slot_count)
            .unwrap_or(DEFAULT_SLOT_COUNT)
    }

    /// Handle a tap on a captured photo.
    ///
    /// - already placed: clear its slot (toggle-off)
    /// - otherwise: fill the first empty slot, row-major
    /// - at capacity: silently ignored
    pub fn select_photo(&mut self, photo_index: usize) -> Result<()> {
        if self.photo(photo_index).is_none() {
            return Err(BoothError::InvalidPhotoIndex {
                index: photo_index,
                count: self.photos.len(),
            });
        }

        // Toggle-off: a photo occupies at most one slot at a time
        if let Some(slot) = self.slots.iter().position(|s| *s == Some(photo_index)) {
            self.slots[slot] = None;
            return Ok(());
        }

        let max_slots = self.max_slots();
        if let Some(slot) = self.slots[..max_slots.min(self.slots.len())]
            .iter()
            .position(Option::is_none)
        {
            self.slots[slot] = Some(photo_index);
        } else if self.filled_count() < max_slots {
            // Unreachable while the slot array stays at max_slots length,
            // kept to match the original selection behavior exactly
            self.slots.push(Some(photo_index));
        }
        // else: at capacity, ignore the tap

        Ok(())
    }

    /// Clear one slot. Positional: later slots do not shift down.
    pub fn remove_slot(&mut self, slot_index: usize) {
        if let Some(slot) = self.slots.get_mut(slot_index) {
            *slot = None;
        }
    }

    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    // ========== Validation gate ==========

    pub fn ready_for_print(&self) -> bool {
        self.filled_count() >= self.max_slots()
    }

    /// Checked before advancing to the compose step; the error message
    /// names the required count.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.ready_for_print() {
            Ok(())
        } else {
            Err(BoothError::NotEnoughPhotos {
                required: self.max_slots(),
                selected: self.filled_count(),
            })
        }
    }
}
