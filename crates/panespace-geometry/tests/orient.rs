use panespace_base::cgmath64::*;
use panespace_base::{assert_near, prop_assert_near};
use panespace_geometry::{Basis, Pose, face_toward};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point3> {
    prop::array::uniform3(-50.0f64..=50.0).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

proptest! {
    #[test]
    fn face_toward_keeps_position_and_scale(
        position in point(),
        target in point(),
        scale in 0.05f64..=10.0,
    ) {
        prop_assume!((target - position).magnitude() > 1.0e-3);
        let pose = Pose::compose(Basis::IDENTITY, scale, position);
        let aimed = face_toward(pose, target);

        prop_assert_near!(aimed.position(), position);
        prop_assert_near!(aimed.scale(), scale);
        prop_assert_near!(aimed.basis().front(), (target - position).normalize());
        prop_assert!(aimed.basis().is_orthonormal(1.0e-9));
    }
}

#[test]
fn straight_up_target_uses_fallback_axis() {
    let position = Point3::new(1.0, 0.0, 2.0);
    let pose = Pose::compose(Basis::IDENTITY, 3.0, position);
    for target in [Point3::new(1.0, 10.0, 2.0), Point3::new(1.0, -4.0, 2.0)] {
        let aimed = face_toward(pose, target);
        let basis = aimed.basis();
        for axis in [basis.x, basis.y, basis.z] {
            assert!(axis.x.is_finite() && axis.y.is_finite() && axis.z.is_finite());
        }
        assert!(basis.is_orthonormal(1.0e-9));
        assert_near!(basis.front(), (target - position).normalize());
        assert_near!(aimed.scale(), 3.0);
    }
}

#[test]
fn nearly_vertical_target_stays_orthonormal() {
    let pose = Pose::default();
    let aimed = face_toward(pose, Point3::new(0.01, 100.0, 0.0));
    assert!(aimed.basis().is_orthonormal(1.0e-9));
}

#[test]
fn target_at_own_position_is_a_no_op() {
    let pose = Pose::compose(Basis::IDENTITY, 2.0, Point3::new(4.0, 5.0, 6.0));
    assert_eq!(face_toward(pose, Point3::new(4.0, 5.0, 6.0)), pose);
}

#[test]
fn facing_positive_z_keeps_width_horizontal() {
    let aimed = face_toward(Pose::default(), Point3::new(0.0, 0.0, 5.0));
    let basis = aimed.basis();
    assert_near!(basis.x, Vector3::unit_x());
    assert_near!(basis.z, -Vector3::unit_y());
}
