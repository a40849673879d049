use crate::camera::Camera;
use crate::geometry::Ray;
use crate::scene::{Candidate, RenderKind};
use glam::Vec2;

/// Nearest renderable along a ray. Transient: recomputed on every query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit<'a> {
    pub name: &'a str,
    pub kind: RenderKind,
    pub distance: f32,
}

/// Nearest positive hit among `candidates`. On equal distances the first
/// candidate in iteration order wins. Walks the iterator once, no allocation.
pub fn pick_nearest<'a>(
    ray: &Ray,
    candidates: impl IntoIterator<Item = Candidate<'a>>,
) -> Option<PickHit<'a>> {
    let mut best: Option<PickHit<'a>> = None;
    for c in candidates {
        if let Some(t) = c.bounds.intersect(ray) {
            match best {
                Some(b) if t >= b.distance => {}
                _ => {
                    best = Some(PickHit {
                        name: c.name,
                        kind: c.kind,
                        distance: t,
                    })
                }
            }
        }
    }
    best
}

/// Cast from the camera through an NDC point. Points outside [-1, 1] are
/// outside the view frustum and never hit.
pub fn pick<'a>(
    ndc: Vec2,
    camera: &Camera,
    candidates: impl IntoIterator<Item = Candidate<'a>>,
) -> Option<PickHit<'a>> {
    if !ndc.is_finite() || ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
        return None;
    }
    let ray = camera.ray_through_ndc(ndc);
    pick_nearest(&ray, candidates)
}
