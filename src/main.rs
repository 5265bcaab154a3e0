//! Snapbooth - headless photobooth layout and print composition engine
//!
//! Drives the booth pipeline without a browser: frame catalog in, captured
//! photos in, print-ready 300dpi JPEG out.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// Declare the modules
mod error;
mod frame;
mod render;
mod state;

use frame::catalog::FrameCatalog;
use frame::geometry::FrameGeometry;
use state::filter::BoothFilter;
use state::session::{BoothSession, Photo};

/// Photobooth frame layout and print composition engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a print-ready JPEG from captured photos
    Compose {
        /// Frame type id from the catalog
        #[arg(long)]
        frame: String,

        /// Directory of captured photos (filename order = capture order)
        #[arg(long, value_name = "DIR")]
        photos: PathBuf,

        /// Catalog JSON file (defaults to the built-in physical catalog)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Comma-separated capture indices to assign to slots, in order
        /// (defaults to capture order until the frame is full)
        #[arg(long)]
        slots: Option<String>,

        /// Filter name: none, warm, cool, mono, vintage, punch
        #[arg(long)]
        filter: Option<String>,

        /// Template id from the catalog
        #[arg(long)]
        template: Option<String>,

        /// Output directory (defaults to the pictures directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Render the on-screen preview scene to a PNG for inspection
    Preview {
        #[arg(long)]
        frame: String,

        #[arg(long, value_name = "DIR")]
        photos: PathBuf,

        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        #[arg(long)]
        slots: Option<String>,

        #[arg(long)]
        filter: Option<String>,

        #[arg(long)]
        template: Option<String>,

        /// Output PNG path
        #[arg(long, value_name = "FILE", default_value = "preview.png")]
        out: PathBuf,
    },

    /// List the frame catalog with its resolved geometry
    Catalog {
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compose {
            frame,
            photos,
            catalog,
            slots,
            filter,
            template,
            out,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let session = build_session(
                &catalog,
                &frame,
                &photos,
                slots.as_deref(),
                filter.as_deref(),
                template.as_deref(),
            )?;

            let raster = render::print::compose(&session)?;
            let out_dir = out.unwrap_or_else(render::export::default_export_dir);
            let path = render::export::export(&raster, &out_dir)?;

            println!(
                "🖨️  Print raster {}x{} (page {})",
                raster.image.width(),
                raster.image.height(),
                raster.page_size()
            );
            println!("✅ Saved {}", path.display());
        }

        Command::Preview {
            frame,
            photos,
            catalog,
            slots,
            filter,
            template,
            out,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let session = build_session(
                &catalog,
                &frame,
                &photos,
                slots.as_deref(),
                filter.as_deref(),
                template.as_deref(),
            )?;

            let canvas = render::preview::render(&session, 1.0)?;
            canvas
                .save(&out)
                .with_context(|| format!("failed to write preview to {}", out.display()))?;
            println!(
                "✅ Preview {}x{} saved to {}",
                canvas.width(),
                canvas.height(),
                out.display()
            );
        }

        Command::Catalog { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            println!("{} frame types:", catalog.frame_types.len());
            for frame in &catalog.frame_types {
                let geometry = FrameGeometry::resolve(Some(frame));
                let mut flags = Vec::new();
                if frame.is_custom {
                    flags.push("strip");
                }
                if frame.is_circle {
                    flags.push("circle");
                }
                if frame.is_hot {
                    flags.push("hot");
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                };
                println!(
                    "  {:>3}  {:<16} {}x{} grid, {} photos, cell {}:{}, {}x{}, {}{}",
                    frame.id,
                    frame.name,
                    frame.columns,
                    frame.rows,
                    frame.total_images,
                    geometry.cell_aspect.w,
                    geometry.cell_aspect.h,
                    geometry.container_width,
                    geometry.container_height,
                    if geometry.print_landscape() {
                        "prints 6x4"
                    } else {
                        "prints 4x6"
                    },
                    flags
                );
                for template in catalog.templates_for(&frame.id) {
                    println!("       template {:>3}  {}", template.id, template.name);
                }
            }
        }
    }

    Ok(())
}

/// Load the catalog document, or fall back to the shipped physical catalog
fn load_catalog(path: Option<&Path>) -> Result<FrameCatalog> {
    match path {
        Some(path) => FrameCatalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(FrameCatalog::builtin()),
    }
}

/// Assemble the booth session the way the wizard steps would:
/// frame, captures, slot assignment, filter, template.
fn build_session(
    catalog: &FrameCatalog,
    frame_id: &str,
    photos_dir: &Path,
    slots: Option<&str>,
    filter: Option<&str>,
    template_id: Option<&str>,
) -> Result<BoothSession> {
    let mut session = BoothSession::new();

    let frame = catalog.frame_type(frame_id)?;
    session.select_frame(frame.clone());

    if let Some(template_id) = template_id {
        let template = catalog
            .template(template_id)
            .with_context(|| format!("unknown template {:?}", template_id))?;
        if template.frame_type_id != frame.id {
            bail!(
                "template {:?} belongs to frame {:?}, not {:?}",
                template_id,
                template.frame_type_id,
                frame.id
            );
        }
        session.select_template(template.clone());
    }

    if let Some(filter) = filter {
        session.set_filter(filter.parse::<BoothFilter>()?);
    }

    let paths = collect_photo_paths(photos_dir);
    if paths.is_empty() {
        bail!("no captured photos found in {}", photos_dir.display());
    }
    for (index, path) in paths.iter().enumerate() {
        session.add_photo(Photo::load(index, path)?);
    }
    println!(
        "📸 Loaded {} captured photos from {}",
        paths.len(),
        photos_dir.display()
    );

    match slots {
        Some(slots) => {
            for part in slots.split(',') {
                let index: usize = part
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid capture index {:?} in --slots", part))?;
                session.select_photo(index)?;
            }
        }
        None => {
            // Auto-fill in capture order until the frame is full
            for index in 0..session.photos().len() {
                if session.ready_for_print() {
                    break;
                }
                session.select_photo(index)?;
            }
        }
    }

    Ok(session)
}

/// Collect captured photos from a directory, in filename order.
/// Capture order is the filename order the camera wrote them in.
fn collect_photo_paths(dir: &Path) -> Vec<PathBuf> {
    let photo_extensions = ["jpg", "jpeg", "png"];

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy().to_lowercase();
                    photo_extensions.contains(&ext.as_str())
                })
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    paths.sort();
    paths
}
