#![doc = "Foundational types shared by the panespace crates: errors, tolerances, handles and pixel buffers."]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Double-precision convenience exports for `cgmath`.
pub mod cgmath64;
/// Captured pixel data and channel-order correction.
pub mod pixels;
/// Tolerance constants, comparison macros, and traits.
pub mod tolerance;

pub use pixels::{PixelBuffer, PixelOrder};

/// Opaque identifier of an external on-screen window.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceHandle(u64);

impl SourceHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("display system unavailable: {0}")]
    DisplayUnavailable(String),
    #[error("no surface with handle {0}")]
    SurfaceNotFound(SourceHandle),
    #[error("cannot query surface {handle}: {reason}")]
    SurfaceQuery { handle: SourceHandle, reason: String },
    #[error("capture of surface {handle} failed: {reason}")]
    CaptureFailed { handle: SourceHandle, reason: String },
    #[error("texture upload failed: {0}")]
    TextureUpload(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Errors that must abort startup rather than degrade a single frame.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DisplayUnavailable(_) | Self::SurfaceNotFound(_) | Self::SurfaceQuery { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
