//! Capture backend selection for the binary.

use panespace_base::{PixelBuffer, Result, SourceHandle};
use panespace_scene::{CaptureRegion, SurfaceCapture, SurfaceInfo, SyntheticCapture};

use crate::config::AppConfig;

pub enum CaptureBackend {
    Synthetic(SyntheticCapture),
    #[cfg(feature = "xcap")]
    Desktop(desktop::DesktopCapture),
}

impl CaptureBackend {
    /// Stand-in windows of the configured size for every tracked handle.
    pub fn synthetic(config: &AppConfig) -> Self {
        let size = config.synthetic_surface;
        let mut capture = SyntheticCapture::new();
        for entry in &config.windows {
            capture.add_surface(entry.handle, size.width, size.height);
        }
        Self::Synthetic(capture)
    }

    /// Real desktop capture when built with it, synthetic windows otherwise.
    #[cfg(feature = "xcap")]
    pub fn open(_config: &AppConfig) -> Result<Self> {
        Ok(Self::Desktop(desktop::DesktopCapture::connect()?))
    }

    #[cfg(not(feature = "xcap"))]
    pub fn open(config: &AppConfig) -> Result<Self> {
        tracing::warn!("built without the xcap feature, showing synthetic windows");
        Ok(Self::synthetic(config))
    }
}

impl SurfaceCapture for CaptureBackend {
    fn surface_info(&mut self, handle: SourceHandle) -> Result<SurfaceInfo> {
        match self {
            Self::Synthetic(capture) => capture.surface_info(handle),
            #[cfg(feature = "xcap")]
            Self::Desktop(capture) => capture.surface_info(handle),
        }
    }

    fn capture(&mut self, handle: SourceHandle, region: CaptureRegion) -> Result<PixelBuffer> {
        match self {
            Self::Synthetic(capture) => capture.capture(handle, region),
            #[cfg(feature = "xcap")]
            Self::Desktop(capture) => capture.capture(handle, region),
        }
    }
}

#[cfg(feature = "xcap")]
pub use desktop::list_windows;

#[cfg(feature = "xcap")]
mod desktop {
    use std::collections::HashMap;

    use panespace_base::{Error, PixelBuffer, PixelOrder, Result, SourceHandle};
    use panespace_scene::{CaptureRegion, SurfaceCapture, SurfaceInfo};
    use tracing::info;
    use xcap::Window;

    pub struct WindowSummary {
        pub handle: SourceHandle,
        pub title: String,
        pub app_name: String,
        pub width: u32,
        pub height: u32,
        pub minimized: bool,
    }

    pub fn list_windows() -> Result<Vec<WindowSummary>> {
        let windows = Window::all().map_err(|err| Error::DisplayUnavailable(err.to_string()))?;
        Ok(windows
            .iter()
            .filter_map(|window| {
                Some(WindowSummary {
                    handle: SourceHandle::new(u64::from(window.id().ok()?)),
                    title: window.title().unwrap_or_default(),
                    app_name: window.app_name().unwrap_or_default(),
                    width: window.width().unwrap_or(0),
                    height: window.height().unwrap_or(0),
                    minimized: window.is_minimized().unwrap_or(false),
                })
            })
            .collect())
    }

    /// Captures top-level desktop windows through xcap. xcap delivers RGBA.
    pub struct DesktopCapture {
        windows: HashMap<SourceHandle, Window>,
    }

    impl DesktopCapture {
        pub fn connect() -> Result<Self> {
            let windows = Window::all().map_err(|err| Error::DisplayUnavailable(err.to_string()))?;
            let windows: HashMap<SourceHandle, Window> = windows
                .into_iter()
                .filter_map(|window| {
                    let id = window.id().ok()?;
                    Some((SourceHandle::new(u64::from(id)), window))
                })
                .collect();
            info!(windows = windows.len(), "desktop capture connected");
            Ok(Self { windows })
        }

        fn window(&self, handle: SourceHandle) -> Result<&Window> {
            self.windows
                .get(&handle)
                .ok_or(Error::SurfaceNotFound(handle))
        }
    }

    impl SurfaceCapture for DesktopCapture {
        fn surface_info(&mut self, handle: SourceHandle) -> Result<SurfaceInfo> {
            let window = self.window(handle)?;
            let query = |err: xcap::XCapError| Error::SurfaceQuery {
                handle,
                reason: err.to_string(),
            };
            Ok(SurfaceInfo {
                width: window.width().map_err(query)?,
                height: window.height().map_err(query)?,
            })
        }

        fn capture(&mut self, handle: SourceHandle, region: CaptureRegion) -> Result<PixelBuffer> {
            let window = self.window(handle)?;
            let failed = |reason: String| Error::CaptureFailed { handle, reason };
            let image = window
                .capture_image()
                .map_err(|err| failed(err.to_string()))?;

            let (width, height) = image.dimensions();
            if region.x + region.width > width || region.y + region.height > height {
                return Err(failed(format!(
                    "region {region:?} exceeds captured {width}x{height}"
                )));
            }
            let image = if region.x == 0
                && region.y == 0
                && region.width == width
                && region.height == height
            {
                image
            } else {
                image::imageops::crop_imm(&image, region.x, region.y, region.width, region.height)
                    .to_image()
            };
            PixelBuffer::new(
                region.width,
                region.height,
                PixelOrder::Rgba,
                image.into_raw(),
            )
        }
    }
}
