use helix_core::image::DecodeError;
use thiserror::Error;
use uefi::Status;

/// Fatal setup failures: the loop never starts, a short diagnostic is
/// logged and the process returns a non-success status.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    #[error("Image resource not found in the executable")]
    ResourceNotFound,
    #[error("Unable to decode the image resource: {0}")]
    Decode(#[from] DecodeError),
    #[error("No usable graphics output surface located")]
    SurfaceNotFound,
}

impl SetupError {
    #[must_use]
    pub const fn status(self) -> Status {
        match self {
            Self::ResourceNotFound => Status::NOT_FOUND,
            Self::Decode(_) | Self::SurfaceNotFound => Status::NOT_STARTED,
        }
    }
}
