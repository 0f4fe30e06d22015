// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};

/// Orthonormal shading frame with the normal mapped to +Z.
///
/// Directions are either world-space or local to a frame; every
/// crossing between the two goes through `to_local`/`to_world` so the
/// two spaces can never be mixed silently.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    x: Vector3f,
    y: Vector3f,
    z: Vector3f,
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            x: Vector3f::new(1.0, 0.0, 0.0),
            y: Vector3f::new(0.0, 1.0, 0.0),
            z: Vector3f::new(0.0, 0.0, 1.0),
        }
    }
}

impl Frame {
    /// Builds a frame around a unit normal.
    pub fn from_normal(n: Vector3f) -> Self {
        let up = if n.z.abs() < 0.999 {
            Vector3f::new(0.0, 0.0, 1.0)
        } else {
            Vector3f::new(1.0, 0.0, 0.0)
        };
        let x = n.cross(&up).normalize();
        let y = n.cross(&x).normalize();

        Frame { x, y, z: n }
    }

    pub fn normal(&self) -> Vector3f {
        self.z
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Cosine of the angle between a local direction and the frame normal.
    pub fn cos_theta(v: &Vector3f) -> Float {
        v.z
    }
}

/* Tests for Frame */

#[cfg(test)]
mod tests {
    use super::Frame;
    use super::Vector3f;

    #[test]
    fn test_frame_is_orthonormal() {
        let n = Vector3f::new(1.0, 2.0, 3.0).normalize();
        let frame = Frame::from_normal(n);

        assert!((frame.x.norm() - 1.0).abs() < 1e-5);
        assert!((frame.y.norm() - 1.0).abs() < 1e-5);
        assert!(frame.x.dot(&frame.y).abs() < 1e-5);
        assert!(frame.x.dot(&frame.z).abs() < 1e-5);
        assert!(frame.y.dot(&frame.z).abs() < 1e-5);
    }

    #[test]
    fn test_frame_round_trip() {
        let n = Vector3f::new(-0.3, 0.8, 0.1).normalize();
        let frame = Frame::from_normal(n);

        let v = Vector3f::new(0.4, -0.2, 0.7).normalize();
        let back = frame.to_world(&frame.to_local(&v));
        assert!((back - v).norm() < 1e-5);
    }

    #[test]
    fn test_frame_normal_maps_to_z() {
        let n = Vector3f::new(0.0, 1.0, 0.0);
        let frame = Frame::from_normal(n);
        let local = frame.to_local(&n);

        assert!((local - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-5);
        assert!((Frame::cos_theta(&local) - 1.0).abs() < 1e-5);
    }
}
