// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::math::constants::{Float, Vector2f};
use crate::math::ray::Ray3f;

pub trait Shape: ComputationNode + Send + Sync {
    /// Nearest hit within the ray's `[min_t, max_t]` segment.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection>;

    /// Boolean occlusion query against the same segment; used for
    /// shadow rays capped at the sampled light distance.
    fn ray_intersection_t(&self, ray: &Ray3f) -> bool;

    /// Uniform-area position sample; pdf is in area measure
    /// (`1 / surface_area`).
    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord;

    fn surface_area(&self) -> Float;
}
