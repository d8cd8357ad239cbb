use panespace_base::cgmath64::*;

use crate::ray::Ray;

/// World-space axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;
        for p in iter {
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Some(Self { min, max })
    }

    pub fn center(&self) -> Point3 {
        self.min.midpoint(self.max)
    }

    pub fn corners(&self) -> [Point3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, max.z),
            Point3::new(min.x, max.y, max.z),
        ]
    }

    pub fn edges(&self) -> [(Point3, Point3); 12] {
        let c = self.corners();
        [
            (c[0], c[1]),
            (c[1], c[2]),
            (c[2], c[3]),
            (c[3], c[0]),
            (c[4], c[5]),
            (c[5], c[6]),
            (c[6], c[7]),
            (c[7], c[4]),
            (c[0], c[4]),
            (c[1], c[5]),
            (c[2], c[6]),
            (c[3], c[7]),
        ]
    }

    /// Slab test. Returns the `(enter, exit)` parameters clipped to `[0, max_t]`.
    pub fn ray_interval(&self, ray: &Ray, max_t: f64) -> Option<(f64, f64)> {
        let mut tmin: f64 = 0.0;
        let mut tmax: f64 = max_t;

        let mut check_axis = |origin: f64, dir: f64, min: f64, max: f64| -> bool {
            if dir.abs() <= 1.0e-9 {
                return origin >= min && origin <= max;
            }
            let inv = 1.0 / dir;
            let t1 = (min - origin) * inv;
            let t2 = (max - origin) * inv;
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
            tmax >= tmin
        };

        let (o, d) = (ray.origin, ray.direction);
        if !check_axis(o.x, d.x, self.min.x, self.max.x)
            || !check_axis(o.y, d.y, self.min.y, self.max.y)
            || !check_axis(o.z, d.z, self.min.z, self.max.z)
        {
            return None;
        }
        Some((tmin, tmax))
    }
}
