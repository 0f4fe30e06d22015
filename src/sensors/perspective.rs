// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Pinhole camera. The film plane sits one unit along the forward
/// axis; the aspect ratio is derived from the film resolution.
pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    near_clip: Float,
    far_clip: Float,
    bitmap: Bitmap,
}

impl PerspectiveCamera {
    pub fn look_at(origin: Vector3f,
                   target: Vector3f,
                   up_hint: Vector3f,
                   fov_y_radians: Float,
                   width: usize,
                   height: usize) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up_hint).normalize();
        let up = right.cross(&forward);

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect: width as Float / height as Float,
            near_clip: 0.0,
            far_clip: Float::MAX,
            bitmap: Bitmap::new(width, height),
        }
    }

    pub fn with_clip(mut self, near_clip: Float, far_clip: Float) -> Self {
        self.near_clip = near_clip;
        self.far_clip = far_clip;
        self
    }

    pub fn width(&self) -> usize {
        self.bitmap.width()
    }

    pub fn height(&self) -> usize {
        self.bitmap.height()
    }
}

impl Sensor for PerspectiveCamera {
    /// `u` addresses the film in [0, 1)²; (0, 0) is the top-left
    /// corner.
    fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let px = (2.0 * u.x - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * u.y) * self.tan_half_fov_y;

        let d_camera = Vector3f::new(px, py, 1.0).normalize();
        let dir = self.right * d_camera.x + self.up * d_camera.y
            + self.forward * d_camera.z;

        // Clip planes are measured along the forward axis; convert
        // them to distances along the ray.
        let inv_z = 1.0 / d_camera.z;
        let min_t = self.near_clip * inv_z;
        let max_t = if self.far_clip < Float::MAX {
            self.far_clip * inv_z
        } else {
            Float::MAX
        };

        Ray3f::new(self.origin, dir, Some(min_t), Some(max_t))
    }

    fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera ({}x{}, fov_y = {:.2} rad)",
                self.width(), self.height(),
                2.0 * self.tan_half_fov_y.atan())
    }
}

/* Tests for PerspectiveCamera */
