//! Collaborators that supply window imagery and hold it as GPU textures.
//!
//! The scene only talks to these traits; the binary plugs in a real capture
//! backend and an egui texture store, tests plug in the in-memory ones below.

use std::collections::{HashMap, HashSet};

use panespace_base::{Error, PixelBuffer, PixelOrder, Result, SourceHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    pub fn full(info: SurfaceInfo) -> Self {
        Self {
            x: 0,
            y: 0,
            width: info.width,
            height: info.height,
        }
    }
}

pub trait SurfaceCapture {
    /// Size of an external window. Failure here is fatal at startup.
    fn surface_info(&mut self, handle: SourceHandle) -> Result<SurfaceInfo>;

    /// Grabs `region` of the window's current content in the source's native byte order.
    fn capture(&mut self, handle: SourceHandle, region: CaptureRegion) -> Result<PixelBuffer>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

impl TextureHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Receives RGBA pixel buffers.
pub trait TextureSink {
    fn upload(&mut self, pixels: PixelBuffer) -> Result<TextureHandle>;

    /// Replaces the texture content in place. Buffers of a different size are ignored.
    fn refresh(&mut self, texture: TextureHandle, pixels: PixelBuffer);
}

/// Deterministic stand-in surfaces delivering a BGRA test pattern that
/// shifts every capture.
#[derive(Debug, Default)]
pub struct SyntheticCapture {
    surfaces: HashMap<SourceHandle, SurfaceInfo>,
    unavailable: HashSet<SourceHandle>,
    frame: u32,
    captures: usize,
}

impl SyntheticCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surface(mut self, handle: SourceHandle, width: u32, height: u32) -> Self {
        self.add_surface(handle, width, height);
        self
    }

    pub fn add_surface(&mut self, handle: SourceHandle, width: u32, height: u32) {
        self.surfaces.insert(handle, SurfaceInfo { width, height });
    }

    /// Makes captures of `handle` fail (or succeed again) without forgetting its size.
    pub fn set_available(&mut self, handle: SourceHandle, available: bool) {
        if available {
            self.unavailable.remove(&handle);
        } else {
            self.unavailable.insert(handle);
        }
    }

    /// Number of successful captures so far.
    pub fn capture_count(&self) -> usize {
        self.captures
    }
}

impl SurfaceCapture for SyntheticCapture {
    fn surface_info(&mut self, handle: SourceHandle) -> Result<SurfaceInfo> {
        self.surfaces
            .get(&handle)
            .copied()
            .ok_or(Error::SurfaceNotFound(handle))
    }

    fn capture(&mut self, handle: SourceHandle, region: CaptureRegion) -> Result<PixelBuffer> {
        let info = self.surface_info(handle)?;
        if self.unavailable.contains(&handle) {
            return Err(Error::CaptureFailed {
                handle,
                reason: "surface is not capturable".to_string(),
            });
        }
        if region.x + region.width > info.width || region.y + region.height > info.height {
            return Err(Error::CaptureFailed {
                handle,
                reason: format!("region {region:?} exceeds {}x{}", info.width, info.height),
            });
        }

        self.frame = self.frame.wrapping_add(1);
        self.captures += 1;
        let seed = (handle.raw() as u32).wrapping_mul(97).wrapping_add(self.frame);
        let mut data = Vec::with_capacity(region.width as usize * region.height as usize * 4);
        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                let red = (x * 255 / info.width.max(1)) as u8;
                let green = (y * 255 / info.height.max(1)) as u8;
                let blue = (seed.wrapping_add(x + y) % 256) as u8;
                data.extend_from_slice(&[blue, green, red, 255]);
            }
        }
        PixelBuffer::new(region.width, region.height, PixelOrder::Bgra, data)
    }
}

#[derive(Clone, Debug)]
struct StoredTexture {
    pixels: PixelBuffer,
    revision: u64,
}

/// Texture store kept in host memory.
#[derive(Debug, Default)]
pub struct MemoryTextures {
    textures: Vec<StoredTexture>,
}

impl MemoryTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixels(&self, texture: TextureHandle) -> Option<&PixelBuffer> {
        self.textures
            .get(texture.raw() as usize)
            .map(|stored| &stored.pixels)
    }

    /// Number of content updates since upload.
    pub fn revision(&self, texture: TextureHandle) -> Option<u64> {
        self.textures
            .get(texture.raw() as usize)
            .map(|stored| stored.revision)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureSink for MemoryTextures {
    fn upload(&mut self, pixels: PixelBuffer) -> Result<TextureHandle> {
        let handle = TextureHandle::new(self.textures.len() as u64);
        self.textures.push(StoredTexture {
            pixels,
            revision: 0,
        });
        Ok(handle)
    }

    fn refresh(&mut self, texture: TextureHandle, pixels: PixelBuffer) {
        let Some(stored) = self.textures.get_mut(texture.raw() as usize) else {
            return;
        };
        if stored.pixels.width() != pixels.width() || stored.pixels.height() != pixels.height() {
            return;
        }
        stored.pixels = pixels;
        stored.revision += 1;
    }
}
