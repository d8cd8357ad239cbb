use panespace_base::cgmath64::Point3;
use panespace_geometry::Ray;

use crate::collection::ProxyCollection;
use crate::proxy::ProxyId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub id: ProxyId,
    pub point: Point3,
    pub distance: f64,
}

/// Nearest visible proxy hit by `ray`.
///
/// Scans in insertion order and only replaces the current best on a strictly
/// smaller distance, so equal distances resolve to the earlier proxy.
pub fn pick(ray: &Ray, proxies: &ProxyCollection) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for (id, proxy) in proxies.iter() {
        if !proxy.visible {
            continue;
        }
        let Some(distance) = proxy.intersect(ray) else {
            continue;
        };
        match best {
            Some(hit) if distance >= hit.distance => {}
            _ => {
                best = Some(PickHit {
                    id,
                    point: ray.at(distance),
                    distance,
                })
            }
        }
    }
    best
}
