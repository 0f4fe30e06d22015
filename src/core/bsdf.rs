// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// Lobe component flags describing which kinds of reflection a BSDF
/// contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobeFlag(u8);

impl LobeFlag {
    pub const NONE: Self = Self(0);
    pub const DIFFUSE: Self = Self(1 << 0);
    pub const GLOSSY: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for LobeFlag {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Result of drawing a scattering direction. `wi` is expressed in the
/// shading frame of the queried hit, and `weight` is `eval / pdf` at
/// that exact `wi`. A zero pdf always comes with a black weight.
#[derive(Debug, Clone, Copy)]
pub struct BSDFSample {
    pub wi: Vector3f,
    pub weight: RGBSpectrum,
    pub pdf: Float,
}

impl BSDFSample {
    pub fn zero() -> Self {
        Self {
            wi: Vector3f::zeros(),
            weight: RGBSpectrum::black(),
            pdf: 0.0,
        }
    }
}

/// Local reflectance model. All directions are local to the shading
/// frame (+Z is the shading normal, pointing away from the surface);
/// callers convert with `Frame::to_local`/`Frame::to_world`.
///
/// Evaluated values include the incident cosine factor and are always
/// non-negative; direction pairs outside the upper hemisphere evaluate
/// to exactly zero rather than erroring.
pub trait BSDF: Send + Sync {
    /// BSDF value times `cosθ_i` for the direction pair `(wo, wi)`.
    fn eval(&self, wo: &Vector3f, wi: &Vector3f, uv: &Vector2f) -> RGBSpectrum;

    /// Solid-angle density `sample` uses to produce `wi` given `wo`.
    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, uv: &Vector2f) -> Float;

    /// Draws `wi` from a 2D uniform sample `u` and returns it together
    /// with `eval / pdf` evaluated at that direction.
    fn sample(&self, wo: &Vector3f, uv: &Vector2f, u: &Vector2f) -> BSDFSample;

    fn flags(&self) -> LobeFlag;
}
