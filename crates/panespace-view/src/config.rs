use anyhow::{Context, Result};
use panespace_base::SourceHandle;
use panespace_base::cgmath64::Point3;
use panespace_interact::InteractionSettings;
use panespace_scene::Camera;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub handle: SourceHandle,
    pub position: [f64; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub fovy: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 8.0],
            target: [0.0, 0.0, -3.0],
            fovy: 45.0,
        }
    }
}

/// Size reported by synthetic windows when no real capture backend is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub windows: Vec<WindowEntry>,
    pub camera: CameraConfig,
    pub interaction: InteractionSettings,
    pub synthetic_surface: SurfaceSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            windows: vec![
                WindowEntry {
                    handle: SourceHandle::new(0x1e0_002c),
                    position: [0.0, 3.25, -0.8],
                },
                WindowEntry {
                    handle: SourceHandle::new(0x1e0_0031),
                    position: [2.0, 2.25, -1.0],
                },
            ],
            camera: CameraConfig::default(),
            interaction: InteractionSettings::default(),
            synthetic_surface: SurfaceSize::default(),
        }
    }
}

impl AppConfig {
    /// Reads `path`, falling back to defaults when no path is given or the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config
            .interaction
            .validate()
            .with_context(|| format!("invalid interaction settings in {}", path.display()))?;
        info!(path = %path.display(), windows = config.windows.len(), "config loaded");
        Ok(config)
    }

    /// Replaces the tracked windows with `handles`, laid out side by side in front of the origin.
    pub fn with_windows(mut self, handles: &[u64]) -> Self {
        if handles.is_empty() {
            return self;
        }
        let mid = (handles.len() - 1) as f64 * 0.5;
        self.windows = handles
            .iter()
            .enumerate()
            .map(|(idx, &raw)| WindowEntry {
                handle: SourceHandle::new(raw),
                position: [(idx as f64 - mid) * 2.0, 2.25, -1.0],
            })
            .collect();
        self
    }

    pub fn camera(&self) -> Camera {
        let [px, py, pz] = self.camera.position;
        let [tx, ty, tz] = self.camera.target;
        let mut camera = Camera::new(Point3::new(px, py, pz), Point3::new(tx, ty, tz));
        camera.fovy_deg = self.camera.fovy;
        camera
    }

    pub fn placements(&self) -> Vec<(SourceHandle, Point3)> {
        self.windows
            .iter()
            .map(|entry| {
                let [x, y, z] = entry.position;
                (entry.handle, Point3::new(x, y, z))
            })
            .collect()
    }
}
