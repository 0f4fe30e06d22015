// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f, Vector3f};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

pub use super::renderer::Renderer;

const ROWS_PER_BAND: usize = 16;

/// Renders the film in horizontal bands pulled from a shared atomic
/// counter. The scene is borrowed immutably by every worker; finished
/// bands flow back over a channel and are spliced into the film on the
/// coordinating thread.
pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    camera_id: usize,
    seed: u64,
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, camera_id: usize, seed: u64) -> Self {
        Self { integrator, camera_id, seed }
    }

    // Per-pixel stream: decorrelates neighbours while keeping renders
    // reproducible for a fixed seed.
    fn pixel_seed(&self, x: usize, y: usize, width: usize) -> u64 {
        let index = (y * width + x) as u64;
        self.seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

impl ComputationNode for SimpleRenderer {
    fn to_string(&self) -> String {
        format!("SimpleRenderer (camera {}, seed {})", self.camera_id, self.seed)
    }
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &mut Scene) -> Bitmap {
        let mut sensor = match scene.take_sensor(self.camera_id) {
            Some(sensor) => sensor,
            None => {
                log::error!("no sensor with id {}", self.camera_id);
                return Bitmap::new(0, 0);
            }
        };

        let (width, height) = {
            let bmp = sensor.bitmap();
            (bmp.width(), bmp.height())
        };
        if width == 0 || height == 0 {
            scene.insert_sensor(self.camera_id, sensor);
            return Bitmap::new(0, 0);
        }

        let spp = self.integrator.samples_per_pixel().max(1);
        let inv_spp = 1.0 / (spp as Float);
        let band_count = (height + ROWS_PER_BAND - 1) / ROWS_PER_BAND;

        let scene_ref: &Scene = scene;
        let sensor_ref: &dyn Sensor = sensor.as_ref();
        let integrator_ref: &dyn Integrator = self.integrator.as_ref();

        log::info!("rendering {}x{} at {} spp, {} bands", width, height, spp, band_count);

        let progress = ProgressBar::new(band_count as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} bands")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_band = Arc::new(AtomicUsize::new(0));
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let (tx, rx) = mpsc::channel::<(usize, Vec<Vector3f>)>();
        let mut output = vec![Vector3f::zeros(); width * height];

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_band = Arc::clone(&next_band);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let band = next_band.fetch_add(1, Ordering::Relaxed);
                        if band >= band_count {
                            break;
                        }

                        let y0 = band * ROWS_PER_BAND;
                        let y1 = (y0 + ROWS_PER_BAND).min(height);
                        let mut rows = vec![Vector3f::zeros(); (y1 - y0) * width];
                        for y in y0..y1 {
                            for x in 0..width {
                                let pixel = Vector2f::new(x as Float, y as Float);
                                let mut rng = LcgRng::new(self.pixel_seed(x, y, width));
                                let mut color = Vector3f::zeros();
                                for _ in 0..spp {
                                    let rgb = integrator_ref.trace_ray_forward(
                                        scene_ref, sensor_ref, pixel, &mut rng);
                                    color += rgb.to_vector();
                                }
                                rows[x + width * (y - y0)] = color * inv_spp;
                            }
                        }
                        if tx.send((y0, rows)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for _ in 0..band_count {
                if let Ok((y0, rows)) = rx.recv() {
                    let offset = y0 * width;
                    output[offset..offset + rows.len()].copy_from_slice(&rows);
                    progress.inc(1);
                }
            }
        });
        progress.finish_and_clear();

        let bitmap = sensor.bitmap_mut();
        for y in 0..height {
            for x in 0..width {
                bitmap[(x, y)] = output[x + width * y];
            }
        }
        let bitmap = bitmap.clone();
        scene.insert_sensor(self.camera_id, sensor);
        bitmap
    }
}
