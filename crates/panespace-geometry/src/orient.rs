use panespace_base::cgmath64::*;

use crate::pose::{Basis, Pose};

pub const WORLD_UP: Vector3 = Vector3 { x: 0.0, y: 1.0, z: 0.0 };
pub const FALLBACK_UP: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 1.0 };
/// Above this `|dot(front, WORLD_UP)|` the fallback helper axis is used.
pub const PARALLEL_THRESHOLD: f64 = 0.999;

/// Right-handed basis whose `y` axis is `front` (assumed unit length).
pub fn basis_facing(front: Vector3) -> Basis {
    let helper = if front.dot(WORLD_UP).abs() > PARALLEL_THRESHOLD {
        FALLBACK_UP
    } else {
        WORLD_UP
    };
    let x = helper.cross(front).normalize();
    let z = x.cross(front);
    Basis { x, y: front, z }
}

/// Re-aims `pose` so its front points at `target`, keeping position and scale.
///
/// A target at the pose's own position has no direction; the pose is returned
/// unchanged.
pub fn face_toward(pose: Pose, target: Point3) -> Pose {
    let position = pose.position();
    let offset = target - position;
    if offset.magnitude2() <= f64::EPSILON {
        return pose;
    }
    Pose::compose(basis_facing(offset.normalize()), pose.scale(), position)
}
