use panespace_base::cgmath64::*;
use panespace_base::{Result, SourceHandle};
use panespace_geometry::{Aabb, Pose, Ray, face_toward, ray_intersect_quad};
use tracing::{info, warn};

use crate::camera::Camera;
use crate::capture::{CaptureRegion, SurfaceCapture, SurfaceInfo, TextureHandle, TextureSink};

/// World height of a proxy quad at unit scale; the width follows the window's aspect.
pub const QUAD_HEIGHT: f64 = 1.0;

/// Picking slack added around the flat world bounds of a quad.
const BOUNDS_SLACK: f64 = 1.0e-6;

/// Index of a proxy in its collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProxyId(usize);

impl ProxyId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Plane quad in local space: the local XZ plane, facing local +Y.
///
/// Corners run top-left, top-right, bottom-right, bottom-left as seen from the
/// front; local -Z is the top edge.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadMesh {
    corners: [Point3; 4],
}

impl QuadMesh {
    pub const TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

    pub fn new(width: f64, height: f64) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            corners: [
                Point3::new(-hw, 0.0, -hh),
                Point3::new(hw, 0.0, -hh),
                Point3::new(hw, 0.0, hh),
                Point3::new(-hw, 0.0, hh),
            ],
        }
    }

    /// Quad with the surface's aspect ratio and `QUAD_HEIGHT` height.
    pub fn for_surface(info: SurfaceInfo) -> Self {
        let aspect = info.width.max(1) as f64 / info.height.max(1) as f64;
        Self::new(QUAD_HEIGHT * aspect, QUAD_HEIGHT)
    }

    pub fn corners(&self) -> &[Point3; 4] {
        &self.corners
    }

    pub fn width(&self) -> f64 {
        self.corners[1].x - self.corners[0].x
    }

    pub fn height(&self) -> f64 {
        self.corners[3].z - self.corners[0].z
    }
}

/// In-scene stand-in for one external window.
#[derive(Clone, Debug)]
pub struct WindowProxy {
    pub source: SourceHandle,
    pub pose: Pose,
    pub visible: bool,
    surface: SurfaceInfo,
    mesh: QuadMesh,
    texture: TextureHandle,
}

impl WindowProxy {
    /// Sizes the quad from the window, uploads its first capture and aims it at the camera.
    ///
    /// Any failure here is a startup failure: the attribute query and the
    /// initial capture both have to succeed.
    pub fn create(
        source: SourceHandle,
        position: Point3,
        camera: &Camera,
        capture: &mut impl SurfaceCapture,
        textures: &mut impl TextureSink,
    ) -> Result<Self> {
        let surface = capture.surface_info(source)?;
        let pixels = capture.capture(source, CaptureRegion::full(surface))?;
        let texture = textures.upload(pixels.into_rgba())?;
        let mesh = QuadMesh::for_surface(surface);
        let pose = face_toward(Pose::at(position), camera.position);
        info!(
            %source,
            width = surface.width,
            height = surface.height,
            x = position.x,
            y = position.y,
            z = position.z,
            "window proxy created"
        );
        Ok(Self {
            source,
            pose,
            visible: true,
            surface,
            mesh,
            texture,
        })
    }

    pub fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn world_corners(&self) -> [Point3; 4] {
        let corners = *self.mesh.corners();
        corners.map(|corner| self.pose.apply(corner))
    }

    /// Bounds of the transformed quad, recomputed from the current pose.
    pub fn world_bounds(&self) -> Aabb {
        let corners = self.world_corners();
        let first = self.pose.position();
        Aabb::from_points(corners).unwrap_or(Aabb {
            min: first,
            max: first,
        })
    }

    /// Exact ray–quad hit distance, with the world bounds as a cheap reject.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let mut bounds = self.world_bounds();
        let slack = Vector3::new(BOUNDS_SLACK, BOUNDS_SLACK, BOUNDS_SLACK);
        bounds.min = bounds.min - slack;
        bounds.max = bounds.max + slack;
        bounds.ray_interval(ray, f64::INFINITY)?;
        ray_intersect_quad(ray, &self.world_corners())
    }

    /// Re-captures the window into its texture. Returns `false` when the
    /// capture failed; the texture then keeps its previous content.
    pub fn refresh_texture(
        &self,
        capture: &mut impl SurfaceCapture,
        textures: &mut impl TextureSink,
    ) -> bool {
        match capture.capture(self.source, CaptureRegion::full(self.surface)) {
            Ok(pixels) => {
                textures.refresh(self.texture, pixels.into_rgba());
                true
            }
            Err(err) => {
                warn!(source = %self.source, error = %err, "capture failed, keeping previous frame");
                false
            }
        }
    }

    pub fn face(&mut self, target: Point3) {
        self.pose = face_toward(self.pose, target);
    }
}
