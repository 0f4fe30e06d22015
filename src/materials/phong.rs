// Copyright @yucwang 2026

use crate::core::bsdf::{BSDF, BSDFSample, LobeFlag};
use crate::core::computation_node::ComputationNode;
use crate::core::texture::{ScalarTexture, Texture};
use crate::math::constants::{Float, INV_PI, INV_TWO_PI, Vector2f, Vector3f};
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{
    sample_cosine_hemisphere, sample_cosine_hemisphere_pdf,
    sample_phong_lobe, sample_phong_lobe_pdf,
};
use std::sync::Arc;

/// Mirror reflection about the local normal (+Z).
pub(crate) fn reflect(v: &Vector3f) -> Vector3f {
    Vector3f::new(-v.x, -v.y, v.z)
}

/// Attenuation keeping diffuse plus specular reflectance below one in
/// every channel regardless of per-texel values.
pub(crate) fn energy_scale(diffuse: &dyn Texture, specular: &dyn Texture) -> Float {
    let peak = diffuse.max_value() + specular.max_value();
    let max_channel = peak.max_component();
    if max_channel > 1.0 {
        0.99 / max_channel
    } else {
        1.0
    }
}

/// Probability of picking the specular lobe over the diffuse one when
/// sampling, derived from the average luminance of each reflectance.
pub(crate) fn specular_sampling_weight(diffuse: &dyn Texture, specular: &dyn Texture,
                                       scale: Float) -> Float {
    let d_avg = (diffuse.average() * scale).luminance();
    let s_avg = (specular.average() * scale).luminance();
    if d_avg + s_avg <= 0.0 {
        return 0.0;
    }

    s_avg / (d_avg + s_avg)
}

/// Modified Phong reflectance: a diffuse term plus a normalized cosine
/// lobe around the mirror reflection of the outgoing direction.
pub struct PhongBSDF {
    diffuse_reflectance: Arc<dyn Texture>,
    specular_reflectance: Arc<dyn Texture>,
    exponent: Arc<dyn ScalarTexture>,
    scale: Float,
    specular_sampling_weight: Float,
}

impl PhongBSDF {
    pub fn new(diffuse_reflectance: Arc<dyn Texture>,
               specular_reflectance: Arc<dyn Texture>,
               exponent: Arc<dyn ScalarTexture>) -> Self {
        let scale = energy_scale(diffuse_reflectance.as_ref(),
                                 specular_reflectance.as_ref());
        let specular_sampling_weight = specular_sampling_weight(
            diffuse_reflectance.as_ref(), specular_reflectance.as_ref(), scale);

        Self {
            diffuse_reflectance,
            specular_reflectance,
            exponent,
            scale,
            specular_sampling_weight,
        }
    }

    pub fn scale(&self) -> Float {
        self.scale
    }

    pub fn specular_sampling_weight(&self) -> Float {
        self.specular_sampling_weight
    }
}

impl ComputationNode for PhongBSDF {
    fn to_string(&self) -> String {
        String::from("PhongBSDF")
    }
}

impl BSDF for PhongBSDF {
    fn eval(&self, wo: &Vector3f, wi: &Vector3f, uv: &Vector2f) -> RGBSpectrum {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return RGBSpectrum::black();
        }

        let rho_d = self.diffuse_reflectance.eval(*uv);
        let rho_s = self.specular_reflectance.eval(*uv);
        let n = self.exponent.eval(*uv);
        let cos_alpha = reflect(wo).dot(wi).clamp(0.0, 1.0);

        let value = rho_d * INV_PI
            + rho_s * (INV_TWO_PI * (n + 2.0) * cos_alpha.powf(n));
        value * (Frame::cos_theta(wi) * self.scale)
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, uv: &Vector2f) -> Float {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return 0.0;
        }

        // The Phong lobe density lives in the frame aligned with the
        // mirror direction; rotate the realized wi into it.
        let lobe_frame = Frame::from_normal(reflect(wo));
        let wi_lobe = lobe_frame.to_local(wi);

        let n = self.exponent.eval(*uv);
        let specular_pdf = sample_phong_lobe_pdf(&wi_lobe, n);
        let diffuse_pdf = sample_cosine_hemisphere_pdf(Frame::cos_theta(wi));

        self.specular_sampling_weight * specular_pdf
            + (1.0 - self.specular_sampling_weight) * diffuse_pdf
    }

    fn sample(&self, wo: &Vector3f, uv: &Vector2f, u: &Vector2f) -> BSDFSample {
        if Frame::cos_theta(wo) <= 0.0 {
            return BSDFSample::zero();
        }

        let w = self.specular_sampling_weight;
        let wi = if u.x < w {
            // Remap the coordinate into [0,1) within the chosen lobe so
            // the 2D sample stays well distributed.
            let remapped = Vector2f::new(u.x / w, u.y);
            let local = sample_phong_lobe(&remapped, self.exponent.eval(*uv));
            Frame::from_normal(reflect(wo)).to_world(&local)
        } else {
            let remapped = Vector2f::new((u.x - w) / (1.0 - w), u.y);
            sample_cosine_hemisphere(&remapped)
        };

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
        LobeFlag::DIFFUSE | LobeFlag::GLOSSY
    }
}

/// Specular-only Phong lobe, the glossy half of a mixture. Carries the
/// shared energy-conservation scale of the mixture it belongs to.
pub struct PhongSpecularLobe {
    specular_reflectance: Arc<dyn Texture>,
    exponent: Arc<dyn ScalarTexture>,
    scale: Float,
}

impl PhongSpecularLobe {
    pub fn new(specular_reflectance: Arc<dyn Texture>,
               exponent: Arc<dyn ScalarTexture>,
               scale: Float) -> Self {
        Self { specular_reflectance, exponent, scale }
    }
}

impl ComputationNode for PhongSpecularLobe {
    fn to_string(&self) -> String {
        String::from("PhongSpecularLobe")
    }
}

impl BSDF for PhongSpecularLobe {
    fn eval(&self, wo: &Vector3f, wi: &Vector3f, uv: &Vector2f) -> RGBSpectrum {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return RGBSpectrum::black();
        }

        let rho_s = self.specular_reflectance.eval(*uv);
        let n = self.exponent.eval(*uv);
        let cos_alpha = reflect(wo).dot(wi).clamp(0.0, 1.0);

        rho_s * (INV_TWO_PI * (n + 2.0) * cos_alpha.powf(n)
            * Frame::cos_theta(wi) * self.scale)
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, uv: &Vector2f) -> Float {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return 0.0;
        }

        let lobe_frame = Frame::from_normal(reflect(wo));
        sample_phong_lobe_pdf(&lobe_frame.to_local(wi), self.exponent.eval(*uv))
    }

    fn sample(&self, wo: &Vector3f, uv: &Vector2f, u: &Vector2f) -> BSDFSample {
        if Frame::cos_theta(wo) <= 0.0 {
            return BSDFSample::zero();
        }

        let local = sample_phong_lobe(u, self.exponent.eval(*uv));
        let wi = Frame::from_normal(reflect(wo)).to_world(&local);

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
        LobeFlag::GLOSSY
    }
}

/* Tests for PhongBSDF */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::math::constants::PI;
    use crate::textures::constant::{ConstantScalarTexture, ConstantTexture};

    fn make_phong(rho_d: RGBSpectrum, rho_s: RGBSpectrum, n: Float) -> PhongBSDF {
        PhongBSDF::new(
            Arc::new(ConstantTexture::new(rho_d)),
            Arc::new(ConstantTexture::new(rho_s)),
            Arc::new(ConstantScalarTexture::new(n)),
        )
    }

    #[test]
    fn test_phong_scale_clamps_bright_materials() {
        let bsdf = make_phong(RGBSpectrum::new(0.9, 0.9, 0.9),
                              RGBSpectrum::new(0.9, 0.9, 0.9), 10.0);
        assert!((bsdf.scale() - 0.99 / 1.8).abs() < 1e-5);

        let dim = make_phong(RGBSpectrum::new(0.3, 0.3, 0.3),
                             RGBSpectrum::new(0.2, 0.2, 0.2), 10.0);
        assert_eq!(dim.scale(), 1.0);
    }

    // Hemisphere integral of eval (which includes cosθ_i) must not
    // exceed one in any channel, even for reflectances summing past 1.
    #[test]
    fn test_phong_energy_conservation() {
        let bsdf = make_phong(RGBSpectrum::new(0.8, 0.6, 0.9),
                              RGBSpectrum::new(0.7, 0.8, 0.5), 5.0);
        let wo = Vector3f::new(0.2, 0.1, 0.95).normalize();
        let uv = Vector2f::zeros();

        let mut rng = LcgRng::new(21);
        let samples = 200_000;
        let mut sums = [0.0f64; 3];
        for _ in 0..samples {
            let u = rng.next_2d();
            // Uniform hemisphere direction, density 1/(2π).
            let z = u.x;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let phi = 2.0 * PI * u.y;
            let wi = Vector3f::new(r * phi.cos(), r * phi.sin(), z);
            let f = bsdf.eval(&wo, &wi, &uv);
            for c in 0..3 {
                sums[c] += (f[c] * 2.0 * PI) as f64;
            }
        }
        for c in 0..3 {
            let integral = sums[c] / samples as f64;
            assert!(integral <= 1.0, "channel {} integral = {}", c, integral);
        }
    }

    // At normal incidence the reflection lobe sits entirely above the
    // horizon, so the mixed pdf must integrate to one.
    #[test]
    fn test_phong_pdf_normalizes_at_normal_incidence() {
        let bsdf = make_phong(RGBSpectrum::new(0.5, 0.5, 0.5),
                              RGBSpectrum::new(0.4, 0.4, 0.4), 20.0);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let uv = Vector2f::zeros();

        let mut rng = LcgRng::new(33);
        let samples = 400_000;
        let mut sum = 0.0f64;
        for _ in 0..samples {
            let u = rng.next_2d();
            let z = u.x;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let phi = 2.0 * PI * u.y;
            let wi = Vector3f::new(r * phi.cos(), r * phi.sin(), z);
            sum += (bsdf.pdf(&wo, &wi, &uv) * 2.0 * PI) as f64;
        }
        let integral = sum / samples as f64;
        assert!((integral - 1.0).abs() < 0.05, "integral = {}", integral);
    }

    #[test]
    fn test_phong_zero_outside_hemisphere() {
        let bsdf = make_phong(RGBSpectrum::new(0.5, 0.5, 0.5),
                              RGBSpectrum::new(0.4, 0.4, 0.4), 8.0);
        let uv = Vector2f::zeros();
        let above = Vector3f::new(0.1, 0.0, 0.99).normalize();
        let below = Vector3f::new(0.1, 0.0, -0.99).normalize();

        assert!(bsdf.eval(&above, &below, &uv).is_black());
        assert!(bsdf.eval(&below, &above, &uv).is_black());
        assert_eq!(bsdf.pdf(&above, &below, &uv), 0.0);
        assert_eq!(bsdf.pdf(&below, &above, &uv), 0.0);
    }

    #[test]
    fn test_phong_sample_agrees_with_eval_and_pdf() {
        let bsdf = make_phong(RGBSpectrum::new(0.4, 0.5, 0.3),
                              RGBSpectrum::new(0.5, 0.3, 0.6), 12.0);
        let wo = Vector3f::new(0.4, -0.3, 0.85).normalize();
        let uv = Vector2f::zeros();

        let mut rng = LcgRng::new(37);
        for _ in 0..500 {
            let sample = bsdf.sample(&wo, &uv, &rng.next_2d());
            if sample.pdf <= 0.0 {
                continue;
            }
            let expected = bsdf.eval(&wo, &sample.wi, &uv)
                / bsdf.pdf(&wo, &sample.wi, &uv);
            for c in 0..3 {
                assert!((sample.weight[c] - expected[c]).abs() < 1e-3,
                        "channel {}: {} vs {}", c, sample.weight[c], expected[c]);
            }
        }
    }
}
