// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;

/// Spatially varying reflectance lookup. `max_value` and `average` are
/// needed at material construction time, where the Phong energy scale
/// and the lobe selection weight are precomputed.
pub trait Texture: Send + Sync {
    fn eval(&self, uv: Vector2f) -> RGBSpectrum;
    fn max_value(&self) -> RGBSpectrum;
    fn average(&self) -> RGBSpectrum;
    fn describe(&self) -> String {
        String::from("Texture")
    }
}

/// Scalar variant, used for shininess exponents.
pub trait ScalarTexture: Send + Sync {
    fn eval(&self, uv: Vector2f) -> Float;
    fn describe(&self) -> String {
        String::from("ScalarTexture")
    }
}
