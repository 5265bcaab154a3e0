/// Crate-wide error type
///
/// Every failure here is terminal for the current attempt: the engine never
/// retries on its own, and a failed compose leaves no partial artifact
/// behind. The caller (the CLI, or whatever shell embeds the engine) reports
/// the error once and lets the user re-invoke with the same inputs.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoothError {
    /// Validation gate before composing: the user has not filled the frame.
    /// The message must name the required count ("select at least N photos").
    #[error("please select at least {required} photos ({selected} selected)")]
    NotEnoughPhotos { required: usize, selected: usize },

    /// No frame selected and no photos captured: there is nothing to print.
    #[error("nothing to print: no frame selected and no photos captured")]
    NothingToRender,

    #[error("unknown frame type: {0:?}")]
    UnknownFrameType(String),

    #[error("unknown filter: {0:?}")]
    UnknownFilter(String),

    /// A slot or photo index outside the session's capture list.
    #[error("photo index {index} out of range ({count} photos captured)")]
    InvalidPhotoIndex { index: usize, count: usize },

    #[error("invalid frame catalog: {0}")]
    InvalidCatalog(String),

    #[error("failed to load photo {path:?}: {source}")]
    PhotoLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode print image: {0}")]
    Encode(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BoothError>;
