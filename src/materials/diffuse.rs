// Copyright @yucwang 2026

use crate::core::bsdf::{BSDF, BSDFSample, LobeFlag};
use crate::core::computation_node::ComputationNode;
use crate::core::texture::Texture;
use crate::math::constants::{Float, INV_PI, Vector2f, Vector3f};
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{sample_cosine_hemisphere, sample_cosine_hemisphere_pdf};
use std::sync::Arc;

/// Lambertian reflectance. The cosine-weighted sampling density cancels
/// the cosine and 1/π in the evaluation, so a sampled weight reduces to
/// the albedo itself whenever the drawn direction lies above the
/// hemisphere.
pub struct DiffuseBSDF {
    albedo: Arc<dyn Texture>,
    scale: Float,
}

impl DiffuseBSDF {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo, scale: 1.0 }
    }

    /// Constructor used when the lobe participates in an
    /// energy-conserving mixture and carries a shared attenuation.
    pub fn with_scale(albedo: Arc<dyn Texture>, scale: Float) -> Self {
        Self { albedo, scale }
    }
}

impl ComputationNode for DiffuseBSDF {
    fn to_string(&self) -> String {
        String::from("DiffuseBSDF")
    }
}

impl BSDF for DiffuseBSDF {
    fn eval(&self, wo: &Vector3f, wi: &Vector3f, uv: &Vector2f) -> RGBSpectrum {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return RGBSpectrum::black();
        }

        self.albedo.eval(*uv) * (INV_PI * Frame::cos_theta(wi).max(0.0) * self.scale)
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, _uv: &Vector2f) -> Float {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return 0.0;
        }

        sample_cosine_hemisphere_pdf(Frame::cos_theta(wi))
    }

    fn sample(&self, wo: &Vector3f, uv: &Vector2f, u: &Vector2f) -> BSDFSample {
        if Frame::cos_theta(wo) <= 0.0 {
            return BSDFSample::zero();
        }

        let wi = sample_cosine_hemisphere(u);
        let pdf = self.pdf(wo, &wi, uv);
        if pdf <= 0.0 {
            return BSDFSample::zero();
        }

        BSDFSample {
            wi,
            weight: self.eval(wo, &wi, uv) / pdf,
            pdf,
        }
    }

    fn flags(&self) -> LobeFlag {
        LobeFlag::DIFFUSE
    }
}

/* Tests for DiffuseBSDF */
