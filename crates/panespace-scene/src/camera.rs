use panespace_base::cgmath64::*;
use panespace_geometry::Ray;

use crate::screen::{Point2, Rect};

const NEAR_DEPTH: f64 = 1.0e-3;
/// Keeps pitch this far (radians) from looking straight along `up`.
const PITCH_MARGIN: f64 = 1.0e-3;

#[derive(Clone, Copy, Debug)]
pub struct CameraBasis {
    pub right: Vector3,
    pub up: Vector3,
    pub forward: Vector3,
}

/// Perspective free-look camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3,
    pub target: Point3,
    pub up: Vector3,
    pub fovy_deg: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 2.0, 8.0), Point3::new(0.0, 0.0, -3.0))
    }
}

impl Camera {
    pub fn new(position: Point3, target: Point3) -> Self {
        Self {
            position,
            target,
            up: Vector3::unit_y(),
            fovy_deg: 45.0,
        }
    }

    pub fn forward(&self) -> Vector3 {
        let dir = self.target - self.position;
        if dir.magnitude() <= f64::EPSILON {
            -Vector3::unit_z()
        } else {
            dir.normalize()
        }
    }

    pub fn right(&self) -> Vector3 {
        let right = self.forward().cross(self.up);
        if right.magnitude() <= 1.0e-9 {
            Vector3::unit_x()
        } else {
            right.normalize()
        }
    }

    /// Orthonormal view frame; `up` is re-derived so it is perpendicular to `forward`.
    pub fn basis(&self) -> CameraBasis {
        let forward = self.forward();
        let right = self.right();
        let up = right.cross(forward).normalize();
        CameraBasis { right, up, forward }
    }

    pub fn move_forward(&mut self, distance: f64, in_world_plane: bool) {
        let mut dir = self.forward();
        if in_world_plane {
            dir.y = 0.0;
            if dir.magnitude() <= 1.0e-9 {
                return;
            }
            dir = dir.normalize();
        }
        self.translate(dir * distance);
    }

    pub fn move_right(&mut self, distance: f64, in_world_plane: bool) {
        let mut dir = self.right();
        if in_world_plane {
            dir.y = 0.0;
            if dir.magnitude() <= 1.0e-9 {
                return;
            }
            dir = dir.normalize();
        }
        self.translate(dir * distance);
    }

    pub fn move_up(&mut self, distance: f64) {
        let up = self.up.normalize();
        self.translate(up * distance);
    }

    pub fn translate(&mut self, offset: Vector3) {
        self.position = self.position + offset;
        self.target = self.target + offset;
    }

    /// Turns the view about `up`; positive angles turn left.
    pub fn yaw(&mut self, angle: f64) {
        let offset = self.target - self.position;
        let rotated = Matrix3::from_axis_angle(self.up.normalize(), Rad(angle)) * offset;
        self.target = self.position + rotated;
    }

    /// Tilts the view about its right axis; positive angles look up.
    /// The view never rotates past `up` or `-up`.
    pub fn pitch(&mut self, angle: f64) {
        let offset = self.target - self.position;
        let up = self.up.normalize();
        let max_up = up.angle(offset).0 - PITCH_MARGIN;
        let max_down = -(-up).angle(offset).0 + PITCH_MARGIN;
        let angle = angle.min(max_up).max(max_down);
        let rotated = Matrix3::from_axis_angle(self.right(), Rad(angle)) * offset;
        self.target = self.position + rotated;
    }

    /// World-space ray from the eye through a cursor position inside `viewport`.
    pub fn screen_ray(&self, cursor: Point2, viewport: Rect) -> Ray {
        let basis = self.basis();
        let (half_w, half_h) = half_extent(viewport);
        let tan_half = self.tan_half_fovy();
        let aspect = half_w / half_h;
        let center = viewport.center();
        let ndc_x = (cursor.x - center.x) as f64 / half_w;
        let ndc_y = (center.y - cursor.y) as f64 / half_h;
        let dir = basis.forward
            + basis.right * (ndc_x * tan_half * aspect)
            + basis.up * (ndc_y * tan_half);
        Ray::new(self.position, dir)
    }

    /// Screen position and view depth of `point`, or `None` behind the near plane.
    pub fn project(&self, point: Point3, viewport: Rect) -> Option<(Point2, f64)> {
        let basis = self.basis();
        let rel = point - self.position;
        let depth = rel.dot(basis.forward);
        if depth <= NEAR_DEPTH {
            return None;
        }
        let (half_w, half_h) = half_extent(viewport);
        let tan_half = self.tan_half_fovy();
        let aspect = half_w / half_h;
        let ndc_x = rel.dot(basis.right) / (depth * tan_half * aspect);
        let ndc_y = rel.dot(basis.up) / (depth * tan_half);
        let center = viewport.center();
        let pos = Point2::new(
            center.x + (ndc_x * half_w) as f32,
            center.y - (ndc_y * half_h) as f32,
        );
        Some((pos, depth))
    }

    /// On-screen pixels covered by one world unit at `depth`.
    pub fn pixels_per_unit(&self, depth: f64, viewport: Rect) -> f64 {
        let (_, half_h) = half_extent(viewport);
        half_h / (depth.max(NEAR_DEPTH) * self.tan_half_fovy())
    }

    pub fn near_depth(&self) -> f64 {
        NEAR_DEPTH
    }

    fn tan_half_fovy(&self) -> f64 {
        (self.fovy_deg.to_radians() * 0.5).tan()
    }
}

fn half_extent(viewport: Rect) -> (f64, f64) {
    (
        (viewport.width() as f64 * 0.5).max(0.5),
        (viewport.height() as f64 * 0.5).max(0.5),
    )
}
