// Copyright @yucwang 2026

use crate::core::bsdf::{BSDF, BSDFSample, LobeFlag};
use crate::core::computation_node::ComputationNode;
use crate::core::texture::{ScalarTexture, Texture};
use crate::materials::diffuse::DiffuseBSDF;
use crate::materials::phong::{energy_scale, specular_sampling_weight, PhongSpecularLobe};
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub enum MixtureError {
    NoLobes,
    InvalidWeight(Float),
}

impl fmt::Display for MixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixtureError::NoLobes => write!(f, "mixture needs at least one lobe"),
            MixtureError::InvalidWeight(w) => {
                write!(f, "mixture lobe weight must be positive and finite, got {}", w)
            }
        }
    }
}

impl std::error::Error for MixtureError {}

/// Sum of reflection lobes with a discrete selection distribution.
///
/// `eval` and `pdf` always account for every lobe; `sample` draws one
/// lobe, remaps the used coordinate, delegates, and then reweights by
/// the *combined* eval/pdf ratio. Returning the single chosen lobe's
/// ratio instead would bias multi-lobe mixtures.
pub struct MixtureBSDF {
    lobes: Vec<Arc<dyn BSDF>>,
    selection: Vec<Float>,
    flags: LobeFlag,
}

impl MixtureBSDF {
    pub fn new(entries: Vec<(Arc<dyn BSDF>, Float)>) -> Result<Self, MixtureError> {
        if entries.is_empty() {
            return Err(MixtureError::NoLobes);
        }

        let mut total = 0.0;
        for (_, w) in &entries {
            if !w.is_finite() || *w <= 0.0 {
                return Err(MixtureError::InvalidWeight(*w));
            }
            total += w;
        }

        let mut lobes = Vec::with_capacity(entries.len());
        let mut selection = Vec::with_capacity(entries.len());
        let mut flags = LobeFlag::NONE;
        for (lobe, w) in entries {
            flags = flags | lobe.flags();
            lobes.push(lobe);
            selection.push(w / total);
        }

        Ok(Self { lobes, selection, flags })
    }

    /// Energy-conserving diffuse + Phong pair sharing one attenuation
    /// scale, selected by relative average luminance.
    pub fn phong_mixture(diffuse_reflectance: Arc<dyn Texture>,
                         specular_reflectance: Arc<dyn Texture>,
                         exponent: Arc<dyn ScalarTexture>) -> Result<Self, MixtureError> {
        let scale = energy_scale(diffuse_reflectance.as_ref(),
                                 specular_reflectance.as_ref());
        let w_specular = specular_sampling_weight(
            diffuse_reflectance.as_ref(), specular_reflectance.as_ref(), scale);

        let mut entries: Vec<(Arc<dyn BSDF>, Float)> = Vec::new();
        if w_specular < 1.0 {
            entries.push((
                Arc::new(DiffuseBSDF::with_scale(diffuse_reflectance, scale)),
                1.0 - w_specular,
            ));
        }
        if w_specular > 0.0 {
            entries.push((
                Arc::new(PhongSpecularLobe::new(specular_reflectance, exponent, scale)),
                w_specular,
            ));
        }

        Self::new(entries)
    }

    pub fn lobe_count(&self) -> usize {
        self.lobes.len()
    }

    pub fn selection_pdf(&self, index: usize) -> Float {
        self.selection[index]
    }
}

impl ComputationNode for MixtureBSDF {
    fn to_string(&self) -> String {
        format!("MixtureBSDF ({} lobes)", self.lobes.len())
    }
}

impl BSDF for MixtureBSDF {
    fn eval(&self, wo: &Vector3f, wi: &Vector3f, uv: &Vector2f) -> RGBSpectrum {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return RGBSpectrum::black();
        }

        let mut value = RGBSpectrum::black();
        for lobe in &self.lobes {
            value += lobe.eval(wo, wi, uv);
        }
        value
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, uv: &Vector2f) -> Float {
        if Frame::cos_theta(wo) <= 0.0 || Frame::cos_theta(wi) <= 0.0 {
            return 0.0;
        }

        let mut pdf = 0.0;
        for (lobe, weight) in self.lobes.iter().zip(&self.selection) {
            pdf += weight * lobe.pdf(wo, wi, uv);
        }
        pdf
    }

    fn sample(&self, wo: &Vector3f, uv: &Vector2f, u: &Vector2f) -> BSDFSample {
        if Frame::cos_theta(wo) <= 0.0 {
            return BSDFSample::zero();
        }

        // Walk the selection CDF with u.x, remapping the coordinate to
        // [0,1) within the chosen segment.
        let mut index = self.lobes.len() - 1;
        let mut remapped_x = 1.0 - Float::EPSILON;
        let mut lo = 0.0;
        for (i, weight) in self.selection.iter().enumerate() {
            if u.x < lo + weight {
                index = i;
                remapped_x = (u.x - lo) / weight;
                break;
            }
            lo += weight;
        }

        let remapped = Vector2f::new(remapped_x, u.y);
        let lobe_sample = self.lobes[index].sample(wo, uv, &remapped);
        if lobe_sample.pdf <= 0.0 {
            return BSDFSample::zero();
        }

        let wi = lobe_sample.wi;
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
        self.flags
    }
}

/* Tests for MixtureBSDF */
