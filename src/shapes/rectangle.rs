// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Planar parallelogram spanned by two edge vectors from a corner.
pub struct Rectangle {
    p0: Vector3f,
    e1: Vector3f,
    e2: Vector3f,
    normal: Vector3f,
    area: Float,
}

impl Rectangle {
    pub fn new(p0: Vector3f, e1: Vector3f, e2: Vector3f) -> Self {
        let cross = e1.cross(&e2);
        let area = cross.norm();
        let normal = if area > 0.0 {
            cross / area
        } else {
            Vector3f::new(0.0, 0.0, 1.0)
        };

        Self { p0, e1, e2, normal, area }
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    fn intersect_plane(&self, ray: &Ray3f) -> Option<(Float, Vector2f)> {
        let denom = self.normal.dot(&ray.dir());
        if denom.abs() < EPSILON {
            return None;
        }

        let t = self.normal.dot(&(self.p0 - ray.origin())) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let q = ray.at(t) - self.p0;
        let a = q.dot(&self.e1) / self.e1.norm_squared();
        let b = q.dot(&self.e2) / self.e2.norm_squared();
        if !(0.0..=1.0).contains(&a) || !(0.0..=1.0).contains(&b) {
            return None;
        }

        Some((t, Vector2f::new(a, b)))
    }
}

impl ComputationNode for Rectangle {
    fn to_string(&self) -> String {
        String::from("Rectangle")
    }
}

impl Shape for Rectangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let (t, uv) = self.intersect_plane(ray)?;
        Some(SurfaceIntersection::new(ray.at(t), self.normal, self.normal, uv, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.intersect_plane(ray).is_some()
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        let p = self.p0 + self.e1 * u.x + self.e2 * u.y;
        let pdf = if self.area > 0.0 { 1.0 / self.area } else { 0.0 };

        let intersection = SurfaceIntersection::new(p, self.normal, self.normal, *u, 0.0);
        SurfaceSampleRecord::new(intersection, pdf)
    }

    fn surface_area(&self) -> Float {
        self.area
    }
}

/* Tests for Rectangle */
