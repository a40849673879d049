//! Perspective camera shared by picking, orientation and rendering.
//!
//! The camera is written by the orbit controls once per frame and by the
//! resize hook; everything else only reads it.

use crate::constants::*;
use crate::geometry::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Drawing surface size in CSS (logical) pixels plus the device pixel ratio
/// already capped to `MAX_PIXEL_RATIO`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: if device_pixel_ratio > 0.0 {
                device_pixel_ratio.min(MAX_PIXEL_RATIO)
            } else {
                1.0
            },
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }

    /// Backing-store size in physical pixels, never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio) as u32;
        let h = (self.height * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_start_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: Viewport::default().aspect(),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, viewport: &Viewport) {
        self.aspect = viewport.aspect();
    }

    /// World-space ray from the eye through an NDC point (standard unprojection).
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, p1 - self.eye)
    }

    /// Project a world point to viewport pixels (origin top-left).
    /// Returns `None` when the point is behind the camera.
    pub fn project(&self, point: Vec3, viewport: &Viewport) -> Option<Vec2> {
        let clip = self.view_proj() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_neg_z() -> Camera {
        Camera {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            aspect: 1.0,
            ..Camera::default()
        }
    }

    #[test]
    fn center_ray_follows_view_direction() {
        let cam = looking_down_neg_z();
        let ray = cam.ray_through_ndc(Vec2::ZERO);
        assert!(ray.origin.abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!(ray.dir.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn projecting_the_target_lands_mid_viewport() {
        let cam = looking_down_neg_z();
        let vp = Viewport::new(800.0, 800.0, 1.0);
        let p = cam.project(Vec3::new(0.0, 0.0, -3.0), &vp).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3 && (p.y - 400.0).abs() < 1e-3);
        assert!(cam.project(Vec3::new(0.0, 0.0, 3.0), &vp).is_none());
    }

    #[test]
    fn collapsed_viewport_keeps_a_usable_aspect() {
        assert_eq!(Viewport::new(0.0, 600.0, 1.0).aspect(), 1.0 / 600.0);
        assert_eq!(Viewport::new(0.0, 0.0, 1.0).aspect(), 1.0);
        assert!(Viewport::new(0.0, 0.0, 1.0).aspect() > 0.0);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let vp = Viewport::new(100.0, 50.0, 3.0);
        assert_eq!(vp.pixel_ratio, MAX_PIXEL_RATIO);
        assert_eq!(vp.physical_size(), (200, 100));
    }
}
