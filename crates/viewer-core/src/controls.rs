//! Orbit controls: drag to rotate around a target, wheel to dolly.
//!
//! Input handlers only accumulate deltas; `update` applies them once per frame
//! (with damping) and writes the camera eye/target.

use crate::camera::Camera;
use crate::constants::*;
use glam::Vec3;

const POLAR_EPS: f32 = 1e-6;

#[derive(Clone, Debug)]
pub struct OrbitConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar_angle: 0.0,
            max_polar_angle: ORBIT_MAX_POLAR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
        }
    }
}

/// Spherical coordinates around the target: `phi` from +Y, `theta` around Y
/// measured from +Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub config: OrbitConfig,
    pub target: Vec3,
    delta: Spherical,
    scale: f32,
}

impl OrbitControls {
    pub fn new(config: OrbitConfig, target: Vec3) -> Self {
        Self {
            config,
            target,
            delta: Spherical::default(),
            scale: 1.0,
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta.phi -= angle;
    }

    /// Rotate by a drag of `dx`, `dy` pixels on a viewport `height` pixels tall.
    /// A drag across the full height is one full turn.
    pub fn on_drag(&mut self, dx: f32, dy: f32, height: f32) {
        let k = std::f32::consts::TAU * self.config.rotate_speed / height.max(1.0);
        self.rotate_left(k * dx);
        self.rotate_up(k * dy);
    }

    /// Wheel input: negative `delta_y` moves closer.
    pub fn on_wheel(&mut self, delta_y: f32) {
        let zoom = 0.95_f32.powf(self.config.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= zoom;
        } else if delta_y > 0.0 {
            self.scale /= zoom;
        }
    }

    /// Apply pending rotation/dolly to `camera`. Returns true if the eye moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let cfg = &self.config;
        let mut s = Spherical::from_offset(camera.eye - self.target);

        let k = if cfg.enable_damping {
            cfg.damping_factor
        } else {
            1.0
        };
        s.theta += self.delta.theta * k;
        s.phi += self.delta.phi * k;
        s.phi = s
            .phi
            .clamp(cfg.min_polar_angle, cfg.max_polar_angle)
            .clamp(POLAR_EPS, std::f32::consts::PI - POLAR_EPS);
        s.radius = (s.radius * self.scale).clamp(cfg.min_distance, cfg.max_distance);

        let eye = self.target + s.to_offset();
        let moved = !eye.abs_diff_eq(camera.eye, 1e-7);
        camera.eye = eye;
        camera.target = self.target;

        if cfg.enable_damping {
            self.delta.theta *= 1.0 - cfg.damping_factor;
            self.delta.phi *= 1.0 - cfg.damping_factor;
        } else {
            self.delta = Spherical::default();
        }
        self.scale = 1.0;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_without_input_keeps_start_pose() {
        let mut cam = Camera::default();
        let start = cam.eye;
        let mut controls = OrbitControls::new(OrbitConfig::default(), Vec3::ZERO);
        controls.update(&mut cam);
        assert!(cam.eye.abs_diff_eq(start, 1e-5));
    }

    #[test]
    fn distance_is_clamped() {
        let mut cam = Camera::default();
        let mut controls = OrbitControls::new(OrbitConfig::default(), Vec3::ZERO);
        for _ in 0..200 {
            controls.on_wheel(1.0);
            controls.update(&mut cam);
        }
        assert!((cam.eye.length() - ORBIT_MAX_DISTANCE).abs() < 1e-4);
        for _ in 0..200 {
            controls.on_wheel(-1.0);
            controls.update(&mut cam);
        }
        assert!((cam.eye.length() - ORBIT_MIN_DISTANCE).abs() < 1e-4);
    }

    #[test]
    fn polar_angle_keeps_eye_above_ground() {
        let mut cam = Camera::default();
        let mut controls = OrbitControls::new(OrbitConfig::default(), Vec3::ZERO);
        // drag far downward repeatedly (rotate_up with negative delta pushes phi up)
        for _ in 0..100 {
            controls.on_drag(0.0, -500.0, 500.0);
            controls.update(&mut cam);
        }
        assert!(cam.eye.y >= -1e-5);
    }

    #[test]
    fn damping_eases_out() {
        let mut cam = Camera::default();
        let mut controls = OrbitControls::new(OrbitConfig::default(), Vec3::ZERO);
        controls.on_drag(100.0, 0.0, 500.0);
        assert!(controls.update(&mut cam));
        let mut still_moving = 0;
        for _ in 0..10 {
            if controls.update(&mut cam) {
                still_moving += 1;
            }
        }
        assert_eq!(still_moving, 10);
    }
}
