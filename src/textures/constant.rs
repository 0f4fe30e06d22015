// Copyright @yucwang 2026

use crate::core::texture::{ScalarTexture, Texture};
use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;

pub struct ConstantTexture {
    value: RGBSpectrum,
}

impl ConstantTexture {
    pub fn new(value: RGBSpectrum) -> Self {
        Self { value }
    }
}

impl Texture for ConstantTexture {
    fn eval(&self, _uv: Vector2f) -> RGBSpectrum {
        self.value
    }

    fn max_value(&self) -> RGBSpectrum {
        self.value
    }

    fn average(&self) -> RGBSpectrum {
        self.value
    }

    fn describe(&self) -> String {
        String::from("ConstantTexture")
    }
}

pub struct ConstantScalarTexture {
    value: Float,
}

impl ConstantScalarTexture {
    pub fn new(value: Float) -> Self {
        Self { value }
    }
}

impl ScalarTexture for ConstantScalarTexture {
    fn eval(&self, _uv: Vector2f) -> Float {
        self.value
    }

    fn describe(&self) -> String {
        String::from("ConstantScalarTexture")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_texture_eval() {
        let value = RGBSpectrum::new(0.25, 0.5, 0.75);
        let tex = ConstantTexture::new(value);
        assert_eq!(tex.eval(Vector2f::new(0.1, 0.9)), value);
        assert_eq!(tex.max_value(), value);
        assert_eq!(tex.average(), value);
    }

    #[test]
    fn test_constant_scalar_texture_eval() {
        let tex = ConstantScalarTexture::new(30.0);
        assert_eq!(tex.eval(Vector2f::new(0.3, 0.3)), 30.0);
    }
}
