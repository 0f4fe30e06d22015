// Copyright @yucwang 2026

pub mod bsdf;
pub mod computation_node;
pub mod integrator;
pub mod interaction;
pub mod rng;
pub mod scene;
pub mod sensor;
pub mod shape;
pub mod texture;
