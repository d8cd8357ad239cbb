pub use panespace_base::cgmath64::{Matrix4, Point3, Vector3};

pub mod bounds;
pub mod orient;
pub mod pose;
pub mod ray;

pub use bounds::Aabb;
pub use orient::{basis_facing, face_toward};
pub use pose::{Basis, Pose};
pub use ray::{Ray, ray_intersect_quad, ray_intersect_triangle};
