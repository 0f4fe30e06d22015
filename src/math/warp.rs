// Copyright @yucwang 2026

use super::constants::{Float, INV_PI, INV_TWO_PI, PI, Vector2f, Vector3f};

fn sample_uniform_disk_concentric(u: &Vector2f) -> Vector2f {
    let r1: Float = 2.0 * u.x - 1.0;
    let r2: Float = 2.0 * u.y - 1.0;

    let phi: Float;
    let r: Float;

    if r1 == 0.0 && r2 == 0.0 {
        r = 0.0;
        phi = 0.0;
    } else if r1 * r1 > r2 * r2 {
        r = r1;
        phi = (PI / 4.0) * (r2 / r1);
    } else {
        r = r2;
        phi = (PI / 2.0) - (r1 / r2) * (PI / 4.0);
    }

    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

/// Maps the unit square to a cosine-weighted direction on the local
/// upper hemisphere (normal = +Z).
pub fn sample_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let p = sample_uniform_disk_concentric(u);
    let z = (1.0 - p.x * p.x - p.y * p.y).max(0.0).sqrt();

    Vector3f::new(p.x, p.y, z)
}

/// Solid-angle density of `sample_cosine_hemisphere`; zero below the
/// horizon.
pub fn sample_cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta.max(0.0) * INV_PI
}

/// Maps the unit square to a direction drawn from the normalized Phong
/// lobe `(n+1)/(2π)·cosⁿθ` around the local +Z axis.
pub fn sample_phong_lobe(u: &Vector2f, exponent: Float) -> Vector3f {
    let cos_theta = u.x.powf(1.0 / (exponent + 1.0));
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = 2.0 * PI * u.y;
    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

pub fn sample_phong_lobe_pdf(v: &Vector3f, exponent: Float) -> Float {
    if v.z <= 0.0 {
        return 0.0;
    }

    (exponent + 1.0) * INV_TWO_PI * v.z.powf(exponent)
}

/// Maps the unit square to barycentric coordinates uniformly
/// distributed over a triangle.
pub fn sample_uniform_triangle(u: &Vector2f) -> Vector2f {
    let su0 = u.x.sqrt();
    Vector2f::new(1.0 - su0, u.y * su0)
}

pub fn sample_uniform_sphere(u: &Vector2f) -> Vector3f {
    let z = 1.0 - 2.0 * u.x;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * u.y;
    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector3f::new(r * cos_phi, r * sin_phi, z)
}

pub fn sample_uniform_sphere_pdf() -> Float {
    0.25 * INV_PI
}

/* Tests for warp functions */
