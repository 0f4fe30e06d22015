// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;

/// Debug integrator that paints the absolute shading normal of the
/// first hit. Useful for checking geometry and frame construction
/// before any light transport runs.
pub struct NormalIntegrator {
    samples_per_pixel: u32,
}

impl NormalIntegrator {
    pub fn new(samples_per_pixel: u32) -> Self {
        Self { samples_per_pixel }
    }
}

impl Integrator for NormalIntegrator {
    fn trace_ray_forward(&self, scene: &Scene, sensor: &dyn Sensor,
                         pixel: Vector2f, rng: &mut LcgRng) -> RGBSpectrum {
        let bmp = sensor.bitmap();
        let u = (pixel.x + rng.next_f32()) / (bmp.width() as Float);
        let v = (pixel.y + rng.next_f32()) / (bmp.height() as Float);
        let ray = sensor.sample_ray(&Vector2f::new(u, v));

        match scene.ray_intersection(&ray) {
            Some(hit) => {
                let n = hit.frame().normal();
                RGBSpectrum::new(n.x.abs(), n.y.abs(), n.z.abs())
            }
            None => RGBSpectrum::black(),
        }
    }

    fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }
}
