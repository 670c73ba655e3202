//! Screen-to-world projection for hand landmarks.
//!
//! The video feed is horizontally mirrored for display, so normalized
//! detector coordinates have x inverted before projecting; a user's right
//! hand then lands on the right side of the scene. Points are projected by
//! casting an NDC ray from the fixed camera and intersecting a fixed depth
//! plane (normal +Z).

use crate::constants::{CAMERA_FOVY_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Vec3, Vec4};

#[derive(Clone, Debug)]
pub struct Projector {
    pub eye: Vec3,
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Z of the gesture plane the ray is intersected with.
    pub plane_z: f32,
}

impl Projector {
    pub fn new(plane_z: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            aspect: 1.0,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            plane_z,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Map a normalized, unmirrored detector point to a world point on the
    /// gesture plane. Returns `None` when the ray misses the plane (parallel
    /// or behind the eye); callers hold their previous value in that case
    /// rather than propagating the miss.
    pub fn screen_to_world(&self, x_norm: f32, y_norm: f32) -> Option<Vec3> {
        let x = 1.0 - x_norm; // mirror correction
        let ndc_x = x * 2.0 - 1.0;
        let ndc_y = -(y_norm * 2.0 - 1.0);
        let (ro, rd) = self.ndc_ray(ndc_x, ndc_y);
        ray_plane_z(ro, rd, self.plane_z)
    }

    /// World-space ray through an NDC point, via the inverse view-projection.
    fn ndc_ray(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p_far: Vec3 = p_far.truncate() / p_far.w;
        let rd = (p_far - self.eye).normalize_or_zero();
        (self.eye, rd)
    }
}

/// Intersect a ray with the plane z = plane_z. `None` for parallel rays and
/// for hits behind the ray origin.
#[inline]
pub fn ray_plane_z(ray_origin: Vec3, ray_dir: Vec3, plane_z: f32) -> Option<Vec3> {
    if ray_dir.z.abs() < 1e-8 {
        return None;
    }
    let t = (plane_z - ray_origin.z) / ray_dir.z;
    (t >= 0.0).then(|| ray_origin + ray_dir * t)
}
