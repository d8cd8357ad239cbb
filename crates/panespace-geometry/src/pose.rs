//! Affine placement of a proxy: rotation, uniform scale and translation held
//! in one column-major matrix.
//!
//! The linear part is always an orthonormal basis scaled equally on all three
//! axes, so decomposition is lossless: the translation column is the position,
//! the length of any transformed axis is the scale, and the axes divided by
//! the scale are the rotation.

use cgmath::AbsDiffEq;
use panespace_base::cgmath64::*;

/// Smallest absolute scale a pose may carry; keeps `Pose::basis` defined.
pub const MIN_POSE_SCALE: f64 = 1.0e-4;

/// Three orthonormal axes. `y` is the front of a proxy plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    pub x: Vector3,
    pub y: Vector3,
    pub z: Vector3,
}

impl Basis {
    pub const IDENTITY: Self = Self {
        x: Vector3 { x: 1.0, y: 0.0, z: 0.0 },
        y: Vector3 { x: 0.0, y: 1.0, z: 0.0 },
        z: Vector3 { x: 0.0, y: 0.0, z: 1.0 },
    };

    pub fn front(&self) -> Vector3 {
        self.y
    }

    pub fn is_orthonormal(&self, epsilon: f64) -> bool {
        let unit = |v: Vector3| (v.magnitude() - 1.0).abs() <= epsilon;
        unit(self.x)
            && unit(self.y)
            && unit(self.z)
            && self.x.dot(self.y).abs() <= epsilon
            && self.y.dot(self.z).abs() <= epsilon
            && self.z.dot(self.x).abs() <= epsilon
            && (self.x.cross(self.y) - self.z).magnitude() <= epsilon
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose(Matrix4);

impl Default for Pose {
    fn default() -> Self {
        Self::at(Point3::origin())
    }
}

impl Pose {
    pub fn compose(basis: Basis, scale: f64, position: Point3) -> Self {
        Self(Matrix4::from_cols(
            (basis.x * scale).extend(0.0),
            (basis.y * scale).extend(0.0),
            (basis.z * scale).extend(0.0),
            position.to_homogeneous(),
        ))
    }

    /// Unit-scale, unrotated pose placed at `position`.
    pub fn at(position: Point3) -> Self {
        Self::compose(Basis::IDENTITY, 1.0, position)
    }

    pub fn matrix(&self) -> Matrix4 {
        self.0
    }

    pub fn position(&self) -> Point3 {
        Point3::from_vec(self.0.w.truncate())
    }

    pub fn scale(&self) -> f64 {
        self.0.x.truncate().magnitude()
    }

    /// Rotation axes with the scale divided out. Identity for a collapsed pose.
    pub fn basis(&self) -> Basis {
        let scale = self.scale();
        if scale <= f64::EPSILON {
            return Basis::IDENTITY;
        }
        Basis {
            x: self.0.x.truncate() / scale,
            y: self.0.y.truncate() / scale,
            z: self.0.z.truncate() / scale,
        }
    }

    pub fn apply(&self, local: Point3) -> Point3 {
        self.0.transform_point(local)
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Self::compose(self.basis(), scale.max(MIN_POSE_SCALE), self.position())
    }

    /// Moves the pose by a world-space offset.
    pub fn translated(self, offset: Vector3) -> Self {
        Self(Matrix4::from_translation(offset) * self.0)
    }
}

impl AbsDiffEq for Pose {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}
