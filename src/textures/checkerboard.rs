// Copyright @yucwang 2026

use crate::core::texture::Texture;
use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;

/// Two-tone checkerboard over uv space, mostly useful to exercise
/// spatially varying reflectance in tests and demo scenes.
pub struct CheckerboardTexture {
    value_a: RGBSpectrum,
    value_b: RGBSpectrum,
    tiles: Float,
}

impl CheckerboardTexture {
    pub fn new(value_a: RGBSpectrum, value_b: RGBSpectrum, tiles: Float) -> Self {
        Self { value_a, value_b, tiles: tiles.max(1.0) }
    }
}

impl Texture for CheckerboardTexture {
    fn eval(&self, uv: Vector2f) -> RGBSpectrum {
        let iu = (uv.x * self.tiles).floor() as i64;
        let iv = (uv.y * self.tiles).floor() as i64;
        if (iu + iv) % 2 == 0 {
            self.value_a
        } else {
            self.value_b
        }
    }

    fn max_value(&self) -> RGBSpectrum {
        RGBSpectrum::new(
            self.value_a[0].max(self.value_b[0]),
            self.value_a[1].max(self.value_b[1]),
            self.value_a[2].max(self.value_b[2]),
        )
    }

    fn average(&self) -> RGBSpectrum {
        (self.value_a + self.value_b) * 0.5
    }

    fn describe(&self) -> String {
        String::from("CheckerboardTexture")
    }
}
