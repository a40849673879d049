//! Rays and the bounding shapes that picking intersects against.

use glam::Vec3;

/// Distances at or below this are treated as "at the ray origin" and skipped.
pub const HIT_EPSILON: f32 = 1e-6;

/// Half-line in world space. `dir` is expected to be normalized so that hit
/// distances are in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Bounding geometry of a pickable renderable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bounds {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Aabb {
        min: Vec3,
        max: Vec3,
    },
    /// Finite rectangle spanned by two orthogonal half-extent axes.
    Rect {
        center: Vec3,
        half_u: Vec3,
        half_v: Vec3,
    },
}

impl Bounds {
    /// Smallest strictly positive distance along `ray`, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            Bounds::Sphere { center, radius } => ray_sphere(ray.origin, ray.dir, center, radius),
            Bounds::Aabb { min, max } => ray_aabb(ray.origin, ray.dir, min, max),
            Bounds::Rect {
                center,
                half_u,
                half_v,
            } => ray_rect(ray.origin, ray.dir, center, half_u, half_v),
        }
    }

    pub fn center(&self) -> Vec3 {
        match *self {
            Bounds::Sphere { center, .. } | Bounds::Rect { center, .. } => center,
            Bounds::Aabb { min, max } => (min + max) * 0.5,
        }
    }
}

#[inline]
fn first_positive(t0: f32, t1: f32) -> Option<f32> {
    if t0 > HIT_EPSILON {
        Some(t0)
    } else if t1 > HIT_EPSILON {
        Some(t1)
    } else {
        None
    }
}

/// Ray/sphere test. Returns the entry distance, or the exit distance when the
/// ray starts inside the sphere.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let s = disc.sqrt();
    first_positive(-b - s, -b + s)
}

/// Slab test against an axis-aligned box.
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        let o = ray_origin[axis];
        let d = ray_dir[axis];
        if d.abs() < 1e-12 {
            // parallel to this slab: must already be inside it
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }
    first_positive(t_near, t_far)
}

/// Ray against a finite rectangle; both faces are hittable.
#[inline]
pub fn ray_rect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    half_u: Vec3,
    half_v: Vec3,
) -> Option<f32> {
    let normal = half_u.cross(half_v);
    let denom = normal.dot(ray_dir);
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = normal.dot(center - ray_origin) / denom;
    if t <= HIT_EPSILON {
        return None;
    }
    let local = ray_origin + ray_dir * t - center;
    let u = local.dot(half_u) / half_u.length_squared();
    let v = local.dot(half_v) / half_v.length_squared();
    (u.abs() <= 1.0 && v.abs() <= 1.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_hit_from_outside_returns_entry() {
        let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
        assert!((t.unwrap() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_behind_ray_misses() {
        let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0);
        assert!(t.is_none());
    }

    #[test]
    fn sphere_from_inside_returns_exit() {
        let t = ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::X, Vec3::new(0.0, 0.0, 5.0), 3.0);
        assert!((t.unwrap() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn aabb_hit_and_miss() {
        let min = Vec3::new(-1.0, -1.0, 4.0);
        let max = Vec3::new(1.0, 1.0, 6.0);
        let hit = ray_aabb(Vec3::ZERO, Vec3::Z, min, max);
        assert!((hit.unwrap() - 4.0).abs() < 1e-5);
        assert!(ray_aabb(Vec3::new(3.0, 0.0, 0.0), Vec3::Z, min, max).is_none());
    }

    #[test]
    fn rect_respects_extents() {
        // 0.25 x 0.25 ground square at the origin
        let half_u = Vec3::new(0.125, 0.0, 0.0);
        let half_v = Vec3::new(0.0, 0.0, 0.125);
        let down = Vec3::NEG_Y;
        let hit = ray_rect(Vec3::new(0.1, 1.0, 0.0), down, Vec3::ZERO, half_u, half_v);
        assert!((hit.unwrap() - 1.0).abs() < 1e-5);
        let miss = ray_rect(Vec3::new(0.2, 1.0, 0.0), down, Vec3::ZERO, half_u, half_v);
        assert!(miss.is_none());
    }
}
