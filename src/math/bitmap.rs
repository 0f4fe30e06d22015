// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};

use std::ops;

#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<Vector3f>,
    width: usize,
    height: usize,
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = Vector3f;

    fn index(&self, index: (usize, usize)) -> &Vector3f {
        &self.data[index.0 + self.width * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Vector3f {
        &mut self.data[index.0 + self.width * index.1]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![Vector3f::zeros(); width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn raw_copy(&self) -> Vec<(Float, Float, Float)> {
        self.data.iter().map(|p| (p.x, p.y, p.z)).collect()
    }
}

/* Tests for Bitmap */
