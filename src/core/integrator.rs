// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::constants::Vector2f;
use crate::math::spectrum::RGBSpectrum;

use std::fmt;

/// Configuration faults detected while building an integrator. These
/// abort setup with a descriptive message; they are never produced
/// during rendering.
#[derive(Debug, PartialEq)]
pub enum IntegratorError {
    UnknownMode(String),
    InvalidRRProb(f32),
    InvalidMaxDepth(i32),
    UnboundedImplicitDepth,
}

impl fmt::Display for IntegratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegratorError::UnknownMode(mode) => {
                write!(f, "unknown path tracing mode: {}", mode)
            }
            IntegratorError::InvalidRRProb(p) => {
                write!(f, "russian roulette probability must lie in (0, 1], got {}", p)
            }
            IntegratorError::InvalidMaxDepth(d) => {
                write!(f, "max depth must be -1 (unbounded) or non-negative, got {}", d)
            }
            IntegratorError::UnboundedImplicitDepth => {
                write!(f, "implicit mode requires a bounded max depth")
            }
        }
    }
}

impl std::error::Error for IntegratorError {}

pub trait Integrator: Sync {
    /// Estimates radiance arriving at one film sample. Pure in
    /// everything except the advancing random stream, so calls may run
    /// concurrently over a shared immutable scene.
    fn trace_ray_forward(&self, scene: &Scene, sensor: &dyn Sensor,
                         pixel: Vector2f, rng: &mut LcgRng) -> RGBSpectrum;

    fn samples_per_pixel(&self) -> u32;
}
