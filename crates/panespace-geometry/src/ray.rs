use panespace_base::cgmath64::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    /// Builds a ray with a unit direction, so hit parameters are distances.
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        let direction = if direction.magnitude2() > 0.0 {
            direction.normalize()
        } else {
            direction
        };
        Self { origin, direction }
    }

    pub fn through(origin: Point3, point: Point3) -> Self {
        Self::new(origin, point - origin)
    }

    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

/// Barycentric slack so rays along a shared edge hit at least one of the triangles.
const EDGE_SLACK: f64 = 1.0e-9;

/// Two-sided Möller–Trumbore test; returns the positive ray parameter of the hit.
pub fn ray_intersect_triangle(ray: &Ray, a: Point3, b: Point3, c: Point3) -> Option<f64> {
    let eps = 1.0e-9;
    let edge1 = b - a;
    let edge2 = c - a;
    let pvec = ray.direction.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < eps {
        return None;
    }
    let inv_det = 1.0 / det;
    let tvec = ray.origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(-EDGE_SLACK..=1.0 + EDGE_SLACK).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(edge1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < -EDGE_SLACK || u + v > 1.0 + EDGE_SLACK {
        return None;
    }
    let t = edge2.dot(qvec) * inv_det;
    if t > eps { Some(t) } else { None }
}

/// Quad given as a corner loop, split along the 0–2 diagonal.
pub fn ray_intersect_quad(ray: &Ray, corners: &[Point3; 4]) -> Option<f64> {
    let first = ray_intersect_triangle(ray, corners[0], corners[1], corners[2]);
    let second = ray_intersect_triangle(ray, corners[0], corners[2], corners[3]);
    match (first, second) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (hit, None) | (None, hit) => hit,
    }
}
