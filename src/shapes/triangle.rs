// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::warp::sample_uniform_triangle;

#[derive(Clone)]
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f,
}

impl Triangle {
    pub fn new(p0: Vector3f, p1: Vector3f, p2: Vector3f) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn geo_normal(&self) -> Vector3f {
        (self.p1 - self.p0).cross(&(self.p2 - self.p0)).normalize()
    }

    // Moeller-Trumbore; returns (t, b1, b2) without segment clipping.
    fn intersect_raw(&self, ray: &Ray3f) -> Option<(Float, Float, Float)> {
        let e1 = self.p1 - self.p0;
        let e2 = self.p2 - self.p0;

        let pvec = ray.dir().cross(&e2);
        let det = e1.dot(&pvec);
        if det.abs() < EPSILON * EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - self.p0;
        let b1 = tvec.dot(&pvec) * inv_det;
        if !(0.0..=1.0).contains(&b1) {
            return None;
        }

        let qvec = tvec.cross(&e1);
        let b2 = ray.dir().dot(&qvec) * inv_det;
        if b2 < 0.0 || b1 + b2 > 1.0 {
            return None;
        }

        let t = e2.dot(&qvec) * inv_det;
        Some((t, b1, b2))
    }
}

impl ComputationNode for Triangle {
    fn to_string(&self) -> String {
        String::from("Triangle")
    }
}

impl Shape for Triangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let (t, b1, b2) = self.intersect_raw(ray)?;
        if !ray.test_segment(t) {
            return None;
        }

        let n = self.geo_normal();
        let uv = Vector2f::new(b1, b2);
        Some(SurfaceIntersection::new(ray.at(t), n, n, uv, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        match self.intersect_raw(ray) {
            Some((t, _, _)) => ray.test_segment(t),
            None => false,
        }
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        let b = sample_uniform_triangle(u);
        let p = self.p0 + (self.p1 - self.p0) * b.x + (self.p2 - self.p0) * b.y;
        let n = self.geo_normal();

        let area = self.surface_area();
        let pdf = if area > 0.0 { 1.0 / area } else { 0.0 };

        let intersection = SurfaceIntersection::new(p, n, n, b, 0.0);
        SurfaceSampleRecord::new(intersection, pdf)
    }

    fn surface_area(&self) -> Float {
        0.5 * (self.p1 - self.p0).cross(&(self.p2 - self.p0)).norm()
    }
}

/* Tests for Triangle */
