//! Per-tick pose rules of the edit modes. Each rule derives the new pose from
//! the entry snapshot, never from the previous tick's pose.

use panespace_base::cgmath64::*;
use panespace_geometry::{Pose, face_toward};
use panespace_scene::{Camera, Point2, Rect};

use crate::settings::InteractionSettings;

/// Quadratic scale factor from the cursor's distance to the viewport centre,
/// measured in half viewport widths.
pub fn scale_factor(cursor: Point2, viewport: Rect, settings: &InteractionSettings) -> f64 {
    let half_width = (viewport.width() as f64 * 0.5).max(0.5);
    let r = cursor.distance(viewport.center()) as f64 / half_width;
    (settings.scale_gain * r * r)
        .max(settings.min_scale)
        .min(settings.max_scale)
}

pub fn scaled_pose(snapshot: Pose, factor: f64) -> Pose {
    snapshot.with_scale(snapshot.scale() * factor)
}

/// Slides the snapshot along the camera-to-proxy line by the vertical drag.
pub fn depth_moved_pose(
    snapshot: Pose,
    anchor: Point2,
    cursor: Point2,
    camera: &Camera,
    settings: &InteractionSettings,
) -> Pose {
    let scalar = (anchor.y - cursor.y) as f64 / settings.depth_drag_divisor;
    let offset = (snapshot.position() - camera.position) * scalar;
    snapshot.translated(offset)
}

/// Swings the snapshot around the camera, then re-aims it at the camera.
pub fn plane_moved_pose(
    snapshot: Pose,
    anchor: Point2,
    cursor: Point2,
    camera: &Camera,
    settings: &InteractionSettings,
) -> Pose {
    let origin = snapshot.position();
    let dir = origin - camera.position;
    let yaw = (anchor.x - cursor.x) as f64 / settings.plane_drag_divisor;
    let pitch = (anchor.y - cursor.y) as f64 / settings.plane_drag_divisor;

    let up = camera.up.normalize();
    let turned = Matrix3::from_axis_angle(up, Rad(yaw)) * dir;
    let rotated = Matrix3::from_axis_angle(camera.right(), Rad(pitch)) * turned;

    let moved = Pose::compose(snapshot.basis(), snapshot.scale(), origin + (rotated - dir));
    face_toward(moved, camera.position)
}
