// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::interaction::SurfaceIntersection;
use crate::core::sensor::Sensor;
use crate::core::shape::Shape;
use crate::emitters::area::AreaEmitter;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub material: Arc<dyn BSDF>,
    pub emission: RGBSpectrum,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Arc<dyn BSDF>) -> Self {
        Self { shape, material, emission: RGBSpectrum::black(), name: None }
    }

    pub fn with_emission(shape: Arc<dyn Shape>, material: Arc<dyn BSDF>,
                         emission: RGBSpectrum) -> Self {
        Self { shape, material, emission, name: None }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }
}

/// Shared rendering context. Construction happens before any path
/// evaluation starts; during rendering the scene is only ever borrowed
/// immutably, which is what makes lock-free parallel path evaluation
/// sound.
pub struct Scene {
    objects: Vec<SceneObject>,
    sensors: Vec<Box<dyn Sensor>>,
    emitters: Vec<AreaEmitter>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            sensors: Vec::new(),
            emitters: Vec::new(),
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        let object_index = self.objects.len();
        if !object.emission.is_black() {
            log::debug!("object {} registered as area emitter", object_index);
            self.emitters.push(AreaEmitter::new(
                object_index,
                object.shape.clone(),
                object.emission,
            ));
        }
        self.objects.push(object);
    }

    pub fn objects(&self) -> &Vec<SceneObject> {
        &self.objects
    }

    pub fn add_sensor(&mut self, sensor: Box<dyn Sensor>) {
        self.sensors.push(sensor);
    }

    pub fn take_sensor(&mut self, camera_id: usize) -> Option<Box<dyn Sensor>> {
        if camera_id < self.sensors.len() {
            Some(self.sensors.remove(camera_id))
        } else {
            None
        }
    }

    pub fn insert_sensor(&mut self, camera_id: usize, sensor: Box<dyn Sensor>) {
        if camera_id <= self.sensors.len() {
            self.sensors.insert(camera_id, sensor);
        } else {
            self.sensors.push(sensor);
        }
    }

    pub fn emitters(&self) -> &Vec<AreaEmitter> {
        &self.emitters
    }

    pub fn emitter(&self, index: usize) -> &AreaEmitter {
        &self.emitters[index]
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// Discrete uniform emitter choice; returns the index and the
    /// selection probability `1 / emitter_count`.
    pub fn select_emitter(&self, u: Float) -> Option<(usize, Float)> {
        if self.emitters.is_empty() {
            return None;
        }

        let count = self.emitters.len();
        let mut index = (u * count as Float) as usize;
        if index >= count {
            index = count - 1;
        }

        Some((index, 1.0 / count as Float))
    }

    pub fn emitter_selection_pdf(&self) -> Float {
        if self.emitters.is_empty() {
            1.0
        } else {
            1.0 / self.emitters.len() as Float
        }
    }

    /// Nearest-hit query over all objects. Deterministic for a fixed
    /// ray and scene.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let mut nearest: Option<(usize, SurfaceIntersection)> = None;
        for (index, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.shape.ray_intersection(ray) {
                let closer = match &nearest {
                    Some((_, best)) => hit.t() < best.t(),
                    None => true,
                };
                if closer {
                    nearest = Some((index, hit));
                }
            }
        }

        nearest.map(|(index, hit)| {
            let object = &self.objects[index];
            hit.with_le(object.emission)
                .with_material(object.material.clone())
                .with_object_index(Some(index))
        })
    }

    /// Occlusion query over the ray segment, for shadow rays.
    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.objects
            .iter()
            .any(|object| object.shape.ray_intersection_t(ray))
    }
}

/* Tests for Scene */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bsdf::{BSDFSample, LobeFlag};
    use crate::core::computation_node::ComputationNode;
    use crate::core::interaction::SurfaceSampleRecord;
    use crate::math::constants::{Vector2f, Vector3f};

    struct TestShape {
        t: Float,
    }

    impl ComputationNode for TestShape {
        fn to_string(&self) -> String {
            String::from("TestShape")
        }
    }

    impl Shape for TestShape {
        fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
            if !ray.test_segment(self.t) {
                return None;
            }
            let n = Vector3f::new(0.0, 0.0, 1.0);
            Some(SurfaceIntersection::new(ray.at(self.t), n, n,
                                          Vector2f::zeros(), self.t))
        }

        fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
            ray.test_segment(self.t)
        }

        fn sample(&self, _u: &Vector2f) -> SurfaceSampleRecord {
            let n = Vector3f::new(0.0, 0.0, 1.0);
            let intersection = SurfaceIntersection::new(
                Vector3f::zeros(), n, n, Vector2f::zeros(), self.t);
            SurfaceSampleRecord::new(intersection, 1.0)
        }

        fn surface_area(&self) -> Float {
            1.0
        }
    }

    struct TestBSDF;

    impl BSDF for TestBSDF {
        fn eval(&self, _wo: &Vector3f, _wi: &Vector3f, _uv: &Vector2f) -> RGBSpectrum {
            RGBSpectrum::black()
        }

        fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f, _uv: &Vector2f) -> Float {
            0.0
        }

        fn sample(&self, _wo: &Vector3f, _uv: &Vector2f, _u: &Vector2f) -> BSDFSample {
            BSDFSample::zero()
        }

        fn flags(&self) -> LobeFlag {
            LobeFlag::NONE
        }
    }

    #[test]
    fn test_scene_nearest_hit() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(Arc::new(TestShape { t: 5.0 }), Arc::new(TestBSDF)));
        scene.add_object(SceneObject::new(Arc::new(TestShape { t: 2.0 }), Arc::new(TestBSDF)));
        scene.add_object(SceneObject::new(Arc::new(TestShape { t: 10.0 }), Arc::new(TestBSDF)));

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let hit = scene.ray_intersection(&ray).expect("expected intersection");
        assert_eq!(hit.t(), 2.0);
        assert_eq!(hit.object_index(), Some(1));
    }

    #[test]
    fn test_scene_shadow_ray_respects_segment() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(Arc::new(TestShape { t: 5.0 }), Arc::new(TestBSDF)));

        let blocked = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0),
                                 Some(0.0), Some(6.0));
        assert!(scene.ray_intersection_t(&blocked));

        let capped = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0),
                                Some(0.0), Some(4.0));
        assert!(!scene.ray_intersection_t(&capped));
    }

    #[test]
    fn test_scene_emitter_registration_and_selection() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(Arc::new(TestShape { t: 1.0 }), Arc::new(TestBSDF)));
        scene.add_object(SceneObject::with_emission(
            Arc::new(TestShape { t: 2.0 }),
            Arc::new(TestBSDF),
            RGBSpectrum::new(4.0, 4.0, 4.0),
        ));
        scene.add_object(SceneObject::with_emission(
            Arc::new(TestShape { t: 3.0 }),
            Arc::new(TestBSDF),
            RGBSpectrum::new(1.0, 1.0, 1.0),
        ));

        assert_eq!(scene.emitter_count(), 2);

        let (index, pdf) = scene.select_emitter(0.1).expect("has emitters");
        assert_eq!(index, 0);
        assert!((pdf - 0.5).abs() < 1e-6);

        let (index, _) = scene.select_emitter(0.99).expect("has emitters");
        assert_eq!(index, 1);
    }

    #[test]
    fn test_scene_no_emitters() {
        let scene = Scene::new();
        assert!(scene.select_emitter(0.5).is_none());
        assert_eq!(scene.emitter_selection_pdf(), 1.0);
    }
}
