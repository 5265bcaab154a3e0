/// Print artifact hand-off
///
/// The engine's output is a JPEG file named the way the booth's download
/// always named it: `photobooth_print_<epoch-ms>.jpg`. The print dialog
/// itself is an external collaborator; callers get the file path and the
/// physical page size and take it from there.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::render::print::PrintRaster;

/// Write the print JPEG into `out_dir`, creating it if needed.
///
/// The JPEG was already encoded in memory, so a failed write leaves either
/// no file or a file the OS refused — never a half-composed image.
pub fn export(raster: &PrintRaster, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let filename = format!("photobooth_print_{}.jpg", Utc::now().timestamp_millis());
    let path = out_dir.join(filename);
    fs::write(&path, &raster.jpeg)?;
    Ok(path)
}

/// Default export location: the user's pictures directory, falling back to
/// their home directory.
pub fn default_export_dir() -> PathBuf {
    let mut path = dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("snapbooth");
    path
}
