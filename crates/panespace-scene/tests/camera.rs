use panespace_base::assert_near;
use panespace_base::cgmath64::*;
use panespace_scene::{Camera, Point2, Rect, Vec2};

fn viewport() -> Rect {
    Rect::from_min_size(Point2::new(0.0, 0.0), Vec2::new(800.0, 600.0))
}

#[test]
fn center_ray_follows_view_direction() {
    let camera = Camera::default();
    let ray = camera.screen_ray(viewport().center(), viewport());
    assert_near!(ray.origin, camera.position);
    assert_near!(ray.direction, camera.forward());
}

#[test]
fn projected_point_lies_on_its_screen_ray() {
    let camera = Camera::default();
    let point = Point3::new(0.0, 3.25, -0.8);
    let (screen, depth) = camera.project(point, viewport()).expect("point is in front");
    assert!(depth > 0.0);

    let ray = camera.screen_ray(screen, viewport());
    let expected = (point - camera.position).normalize();
    assert!((ray.direction - expected).magnitude() < 1.0e-5);
}

#[test]
fn points_behind_the_camera_are_not_projected() {
    let camera = Camera::default();
    assert!(camera.project(Point3::new(0.0, 2.0, 20.0), viewport()).is_none());
}

#[test]
fn yaw_and_pitch_keep_the_eye_in_place() {
    let mut camera = Camera::default();
    let position = camera.position;
    camera.yaw(-0.3);
    camera.pitch(0.2);
    assert_near!(camera.position, position);
    assert!(camera.forward().x > 0.0, "negative yaw turns right");
}

#[test]
fn pitch_never_flips_over_the_pole() {
    let mut camera = Camera::default();
    camera.pitch(10.0);
    let forward = camera.forward();
    assert!(forward.dot(Vector3::unit_y()) < 1.0 - 1.0e-9);
    assert!(forward.z < 0.0, "view keeps its heading");
    assert!((camera.right() - Vector3::unit_x()).magnitude() < 1.0e-6);
}

#[test]
fn world_plane_movement_keeps_height() {
    let mut camera = Camera::default();
    let height = camera.position.y;
    camera.move_forward(2.0, true);
    camera.move_right(-1.0, true);
    assert_near!(camera.position.y, height);
    camera.move_up(1.5);
    assert_near!(camera.position.y, height + 1.5);
}
