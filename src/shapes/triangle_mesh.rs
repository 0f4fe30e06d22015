// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::distribution::Distribution1D;
use crate::math::ray::Ray3f;
use crate::shapes::triangle::Triangle;

/// Indexed-free triangle soup with a precomputed face-area
/// distribution so positions can be sampled uniformly over the whole
/// surface. The distribution is built once here and read-only
/// afterwards.
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    face_areas: Distribution1D,
    total_area: Float,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let mut face_areas = Distribution1D::new();
        for tri in &triangles {
            face_areas.add(tri.surface_area());
        }
        let total_area = face_areas.normalize();

        Self { triangles, face_areas, total_area }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl ComputationNode for TriangleMesh {
    fn to_string(&self) -> String {
        format!("TriangleMesh ({} triangles)", self.triangles.len())
    }
}

impl Shape for TriangleMesh {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let mut nearest: Option<SurfaceIntersection> = None;
        for tri in &self.triangles {
            if let Some(hit) = tri.ray_intersection(ray) {
                let closer = match &nearest {
                    Some(best) => hit.t() < best.t(),
                    None => true,
                };
                if closer {
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.triangles.iter().any(|tri| tri.ray_intersection_t(ray))
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        // Pick a face proportional to its area, then a uniform point on
        // it; the combined density collapses to 1 / total_area. A mesh
        // with no faces (or all-degenerate faces) yields a zero-pdf
        // record that downstream sampling treats as a zero contribution.
        let drawn = self.face_areas.sample_discrete(u.x);
        let (index, remapped) = match drawn {
            Some((index, pdf, remapped)) if pdf > 0.0 => (index, remapped),
            _ => {
                let n = Vector3f::new(0.0, 0.0, 1.0);
                let intersection = SurfaceIntersection::new(
                    Vector3f::zeros(), n, n, Vector2f::zeros(), 0.0);
                return SurfaceSampleRecord::new(intersection, 0.0);
            }
        };

        let mut record = self.triangles[index]
            .sample(&Vector2f::new(remapped, u.y));
        let pdf = if self.total_area > 0.0 { 1.0 / self.total_area } else { 0.0 };
        record.set_pdf(pdf);
        record
    }

    fn surface_area(&self) -> Float {
        self.total_area
    }
}

/* Tests for TriangleMesh */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::math::constants::Vector3f;

    fn two_triangle_quad() -> TriangleMesh {
        // Unit square in the z = 0 plane.
        let p00 = Vector3f::new(0.0, 0.0, 0.0);
        let p10 = Vector3f::new(1.0, 0.0, 0.0);
        let p11 = Vector3f::new(1.0, 1.0, 0.0);
        let p01 = Vector3f::new(0.0, 1.0, 0.0);
        TriangleMesh::new(vec![
            Triangle::new(p00, p10, p11),
            Triangle::new(p00, p11, p01),
        ])
    }

    #[test]
    fn test_mesh_total_area() {
        let mesh = two_triangle_quad();
        assert_eq!(mesh.triangle_count(), 2);
        assert!((mesh.surface_area() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_mesh_nearest_intersection() {
        let mesh = two_triangle_quad();
        let ray = Ray3f::new(Vector3f::new(0.5, 0.5, 2.0),
                             Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = mesh.ray_intersection(&ray).expect("expected hit");
        assert!((hit.t() - 2.0).abs() < 1e-5);
    }

    // An empty emissive mesh is reachable through next-event
    // estimation; sampling it must yield a zero-pdf record, not a
    // fault.
    #[test]
    fn test_empty_mesh_sample_is_zero_pdf() {
        let mesh = TriangleMesh::new(Vec::new());
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.surface_area(), 0.0);

        let record = mesh.sample(&Vector2f::new(0.5, 0.5));
        assert_eq!(record.pdf(), 0.0);

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0),
                             None, None);
        assert!(mesh.ray_intersection(&ray).is_none());
        assert!(!mesh.ray_intersection_t(&ray));
    }

    #[test]
    fn test_empty_mesh_emitter_sample_contributes_nothing() {
        use crate::emitters::area::AreaEmitter;
        use crate::math::spectrum::RGBSpectrum;
        use std::sync::Arc;

        let emitter = AreaEmitter::new(0, Arc::new(TriangleMesh::new(Vec::new())),
                                       RGBSpectrum::white());
        let position = emitter.sample_position(&Vector2f::new(0.3, 0.7));
        assert_eq!(position.pdf_area, 0.0);
        assert!(emitter
            .sample_direction(&Vector3f::new(0.0, 0.0, -1.0), &position)
            .is_none());
    }

    #[test]
    fn test_mesh_sample_pdf_is_inverse_area() {
        let mesh = two_triangle_quad();
        let mut rng = LcgRng::new(3);
        for _ in 0..200 {
            let record = mesh.sample(&rng.next_2d());
            assert!((record.pdf() - 1.0).abs() < 1e-5);
            let p = record.intersection().p();
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
            assert!(p.z.abs() < 1e-6);
        }
    }
}
