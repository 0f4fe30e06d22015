// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};

use std::ops;

/// Tristimulus radiance/reflectance value. All transport code keeps
/// every channel non-negative and finite; degenerate samples collapse
/// to `RGBSpectrum::black()` instead of carrying NaN/Inf around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBSpectrum {
    rgb: Vector3f,
}

impl Default for RGBSpectrum {
    fn default() -> Self {
        Self::black()
    }
}

impl RGBSpectrum {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { rgb: Vector3f::new(r, g, b) }
    }

    pub fn black() -> Self {
        Self { rgb: Vector3f::zeros() }
    }

    pub fn white() -> Self {
        Self { rgb: Vector3f::new(1.0, 1.0, 1.0) }
    }

    pub fn splat(v: Float) -> Self {
        Self { rgb: Vector3f::new(v, v, v) }
    }

    pub fn is_black(&self) -> bool {
        self.rgb[0] == 0.0 && self.rgb[1] == 0.0 && self.rgb[2] == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.rgb[0].is_finite() && self.rgb[1].is_finite() && self.rgb[2].is_finite()
    }

    pub fn max_component(&self) -> Float {
        self.rgb[0].max(self.rgb[1]).max(self.rgb[2])
    }

    // Rec. 709 luma weights, same as the glm helper the reference used.
    pub fn luminance(&self) -> Float {
        0.212671 * self.rgb[0] + 0.715160 * self.rgb[1] + 0.072169 * self.rgb[2]
    }

    pub fn to_vector(&self) -> Vector3f {
        self.rgb
    }
}

impl ops::Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, index: usize) -> &Float {
        &self.rgb[index]
    }
}

impl ops::Add for RGBSpectrum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { rgb: self.rgb + rhs.rgb }
    }
}

impl ops::AddAssign for RGBSpectrum {
    fn add_assign(&mut self, rhs: Self) {
        self.rgb += rhs.rgb;
    }
}

// Componentwise product, used for throughput accumulation.
impl ops::Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self { rgb: self.rgb.component_mul(&rhs.rgb) }
    }
}

impl ops::MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, rhs: Self) {
        self.rgb = self.rgb.component_mul(&rhs.rgb);
    }
}

impl ops::Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Float) -> Self {
        Self { rgb: self.rgb * rhs }
    }
}

impl ops::Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, rhs: Float) -> Self {
        Self { rgb: self.rgb / rhs }
    }
}

/* Tests for RGBSpectrum */
