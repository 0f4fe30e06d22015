// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// Position drawn uniformly over an emitter's surface; the density is
/// in *area* measure.
pub struct EmitterPositionSample {
    pub p: Vector3f,
    pub n: Vector3f,
    pub pdf_area: Float,
}

/// Direction from a reference point toward a sampled emitter position;
/// the density has been converted to *solid-angle* measure.
pub struct EmitterDirectionSample {
    pub d: Vector3f,
    pub distance: Float,
    pub pdf_solid_angle: Float,
}

/// A shape acting as an area light. Built once at scene construction,
/// read-only afterwards; the shape carries the triangle-area
/// distribution used for uniform surface sampling.
pub struct AreaEmitter {
    shape_id: usize,
    shape: Arc<dyn Shape>,
    radiance: RGBSpectrum,
    total_area: Float,
}

impl AreaEmitter {
    pub fn new(shape_id: usize, shape: Arc<dyn Shape>, radiance: RGBSpectrum) -> Self {
        let total_area = shape.surface_area();
        Self { shape_id, shape, radiance, total_area }
    }

    pub fn shape_id(&self) -> usize {
        self.shape_id
    }

    pub fn radiance(&self) -> RGBSpectrum {
        self.radiance
    }

    pub fn total_area(&self) -> Float {
        self.total_area
    }

    /// Uniform-area position sample; `pdf_area = 1 / total_area`.
    pub fn sample_position(&self, u: &Vector2f) -> EmitterPositionSample {
        let record = self.shape.sample(u);
        EmitterPositionSample {
            p: record.intersection().p(),
            n: record.intersection().geo_normal(),
            pdf_area: record.pdf(),
        }
    }

    /// Converts a sampled position into a direction seen from `ref_p`,
    /// changing the density from area to solid-angle measure with the
    /// Jacobian `d² / |cosθ_light|`. Degenerate geometry (coincident
    /// points, grazing or back-facing light) yields `None`, which
    /// callers treat as a zero contribution.
    pub fn sample_direction(&self, ref_p: &Vector3f,
                            position: &EmitterPositionSample) -> Option<EmitterDirectionSample> {
        let to_light = position.p - ref_p;
        let dist2 = to_light.norm_squared();
        if dist2 <= 0.0 || position.pdf_area <= 0.0 {
            return None;
        }

        let distance = dist2.sqrt();
        let d = to_light / distance;
        let cos_light = position.n.dot(&(-d));
        if cos_light <= 0.0 {
            return None;
        }

        Some(EmitterDirectionSample {
            d,
            distance,
            pdf_solid_angle: position.pdf_area * dist2 / cos_light,
        })
    }
}

impl ComputationNode for AreaEmitter {
    fn to_string(&self) -> String {
        format!("AreaEmitter (shape {})", self.shape_id)
    }
}

/* Tests for AreaEmitter */
