// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// Result of a ray hitting geometry. Immutable once produced: BSDF
/// sampling returns its direction as a value instead of writing it back
/// here, so a hit can be queried repeatedly without aliasing hazards.
pub struct SurfaceIntersection {
    p: Vector3f,
    geo_normal: Vector3f,
    frame: Frame,
    uv: Vector2f,
    t: Float,
    le: RGBSpectrum,
    material: Option<Arc<dyn BSDF>>,
    object_index: Option<usize>,
}

pub struct SurfaceSampleRecord {
    intersection: SurfaceIntersection,
    pdf: Float,
}

impl SurfaceIntersection {
    pub fn new(p: Vector3f,
               geo_normal: Vector3f,
               sh_normal: Vector3f,
               uv: Vector2f,
               t: Float) -> Self {
        Self {
            p,
            geo_normal,
            frame: Frame::from_normal(sh_normal),
            uv,
            t,
            le: RGBSpectrum::black(),
            material: None,
            object_index: None,
        }
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    /// Shading frame; its +Z axis is the shading normal.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn uv(&self) -> Vector2f {
        self.uv
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn le(&self) -> RGBSpectrum {
        self.le
    }

    pub fn material(&self) -> Option<&dyn BSDF> {
        self.material.as_deref()
    }

    pub fn object_index(&self) -> Option<usize> {
        self.object_index
    }

    pub fn with_le(mut self, le: RGBSpectrum) -> Self {
        self.le = le;
        self
    }

    pub fn with_material(mut self, material: Arc<dyn BSDF>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_object_index(mut self, object_index: Option<usize>) -> Self {
        self.object_index = object_index;
        self
    }
}

impl SurfaceSampleRecord {
    pub fn new(intersection: SurfaceIntersection, pdf: Float) -> Self {
        Self { intersection, pdf }
    }

    pub fn intersection(&self) -> &SurfaceIntersection {
        &self.intersection
    }

    pub fn pdf(&self) -> Float {
        self.pdf
    }

    pub fn set_pdf(&mut self, pdf: Float) {
        self.pdf = pdf;
    }
}
