// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::constants::{Float, INV_PI, INV_TWO_PI, PI, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::warp::sample_uniform_sphere;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    fn nearest_t(&self, ray: &Ray3f) -> Option<Float> {
        let oc = ray.origin() - self.center;
        let b = 2.0 * oc.dot(&ray.dir());
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t0 = 0.5 * (-b - sqrt_d);
        if ray.test_segment(t0) {
            return Some(t0);
        }
        let t1 = 0.5 * (-b + sqrt_d);
        if ray.test_segment(t1) {
            return Some(t1);
        }

        None
    }

    fn uv_at(&self, n: &Vector3f) -> Vector2f {
        let phi = n.y.atan2(n.x);
        let theta = n.z.clamp(-1.0, 1.0).acos();
        let u = if phi < 0.0 { phi + 2.0 * PI } else { phi } * INV_TWO_PI;
        Vector2f::new(u, theta * INV_PI)
    }
}

impl ComputationNode for Sphere {
    fn to_string(&self) -> String {
        String::from("Sphere")
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let t = self.nearest_t(ray)?;
        let p = ray.at(t);
        let n = (p - self.center) / self.radius;
        let uv = self.uv_at(&n);

        Some(SurfaceIntersection::new(p, n, n, uv, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.nearest_t(ray).is_some()
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        let n = sample_uniform_sphere(u);
        let p = self.center + n * self.radius;
        let area = self.surface_area();
        let pdf = if area > 0.0 { 1.0 / area } else { 0.0 };

        let intersection = SurfaceIntersection::new(p, n, n, self.uv_at(&n), 0.0);
        SurfaceSampleRecord::new(intersection, pdf)
    }

    fn surface_area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }
}

/* Tests for Sphere */
