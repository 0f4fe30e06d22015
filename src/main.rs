// Copyright @yucwang 2026

#![allow(dead_code)]

pub extern crate nalgebra as na;

mod core;
mod emitters;
mod integrators;
mod io;
mod materials;
mod math;
mod renderers;
mod sensors;
mod shapes;
mod textures;

use self::core::scene::{Scene, SceneObject};
use self::integrators::normal::NormalIntegrator;
use self::integrators::path::{PathMode, PathTracerIntegrator};
use self::io::exr_utils;
use self::materials::diffuse::DiffuseBSDF;
use self::materials::mixture::MixtureBSDF;
use self::math::constants::{Float, Vector3f};
use self::math::spectrum::RGBSpectrum;
use self::renderers::simple::{Renderer, SimpleRenderer};
use self::sensors::perspective::PerspectiveCamera;
use self::shapes::rectangle::Rectangle;
use self::shapes::sphere::Sphere;
use self::textures::checkerboard::CheckerboardTexture;
use self::textures::constant::{ConstantScalarTexture, ConstantTexture};

use std::env;
use std::str::FromStr;
use std::sync::Arc;

fn diffuse_rgb(r: Float, g: Float, b: Float) -> Arc<DiffuseBSDF> {
    Arc::new(DiffuseBSDF::new(Arc::new(ConstantTexture::new(
        RGBSpectrum::new(r, g, b)))))
}

// Cornell-box style demo scene: colored side walls, a checkerboard
// floor, a glossy sphere and a square area light under the ceiling.
fn build_demo_scene(width: usize, height: usize) -> Scene {
    let mut scene = Scene::new();

    let white = diffuse_rgb(0.725, 0.71, 0.68);
    let red = diffuse_rgb(0.63, 0.065, 0.05);
    let green = diffuse_rgb(0.14, 0.45, 0.091);

    let floor_texture = Arc::new(CheckerboardTexture::new(
        RGBSpectrum::splat(0.7),
        RGBSpectrum::splat(0.3),
        8.0,
    ));
    let floor_material = Arc::new(DiffuseBSDF::new(floor_texture));

    // Box interior, normals facing inward.
    let floor = Rectangle::new(
        Vector3f::new(-1.0, -1.0, -1.0),
        Vector3f::new(2.0, 0.0, 0.0),
        Vector3f::new(0.0, 2.0, 0.0),
    );
    scene.add_object(SceneObject::new(Arc::new(floor), floor_material)
        .with_name(String::from("floor")));

    let ceiling = Rectangle::new(
        Vector3f::new(-1.0, -1.0, 1.0),
        Vector3f::new(0.0, 2.0, 0.0),
        Vector3f::new(2.0, 0.0, 0.0),
    );
    scene.add_object(SceneObject::new(Arc::new(ceiling), white.clone())
        .with_name(String::from("ceiling")));

    let back = Rectangle::new(
        Vector3f::new(-1.0, 1.0, -1.0),
        Vector3f::new(2.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, 2.0),
    );
    scene.add_object(SceneObject::new(Arc::new(back), white.clone())
        .with_name(String::from("back wall")));

    let left = Rectangle::new(
        Vector3f::new(-1.0, -1.0, -1.0),
        Vector3f::new(0.0, 2.0, 0.0),
        Vector3f::new(0.0, 0.0, 2.0),
    );
    scene.add_object(SceneObject::new(Arc::new(left), red)
        .with_name(String::from("left wall")));

    let right = Rectangle::new(
        Vector3f::new(1.0, -1.0, -1.0),
        Vector3f::new(0.0, 0.0, 2.0),
        Vector3f::new(0.0, 2.0, 0.0),
    );
    scene.add_object(SceneObject::new(Arc::new(right), green)
        .with_name(String::from("right wall")));

    let sphere_material = MixtureBSDF::phong_mixture(
        Arc::new(ConstantTexture::new(RGBSpectrum::splat(0.35))),
        Arc::new(ConstantTexture::new(RGBSpectrum::splat(0.5))),
        Arc::new(ConstantScalarTexture::new(60.0)),
    ).expect("demo mixture is well formed");
    let sphere = Sphere::new(Vector3f::new(0.0, 0.2, -0.6), 0.4);
    scene.add_object(SceneObject::new(Arc::new(sphere), Arc::new(sphere_material))
        .with_name(String::from("sphere")));

    // Light just below the ceiling, normal facing down.
    let light = Rectangle::new(
        Vector3f::new(-0.25, -0.25, 0.99),
        Vector3f::new(0.0, 0.5, 0.0),
        Vector3f::new(0.5, 0.0, 0.0),
    );
    scene.add_object(SceneObject::with_emission(
        Arc::new(light),
        diffuse_rgb(0.0, 0.0, 0.0),
        RGBSpectrum::splat(12.0),
    ).with_name(String::from("light")));

    let camera = PerspectiveCamera::look_at(
        Vector3f::new(0.0, -3.5, 0.0),
        Vector3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, 1.0),
        40.0f32.to_radians(),
        width,
        height,
    );
    scene.add_sensor(Box::new(camera));

    scene
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <output.exr> [--spp N] [--max-depth N] [--mode implicit|explicit] \
                   [--rr-depth N] [--rr-prob P] [--width N] [--height N] [--seed N] [--normals]",
                  args[0]);
        std::process::exit(1);
    }

    let output_path = &args[1];
    let mut spp: u32 = 64;
    let mut max_depth: i32 = 8;
    let mut mode = PathMode::Explicit;
    let mut rr_depth: u32 = 5;
    let mut rr_prob: Float = 0.95;
    let mut width: usize = 512;
    let mut height: usize = 512;
    let mut seed: u64 = 0;
    let mut normals = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--spp" => {
                i += 1;
                spp = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(spp);
            }
            "--max-depth" => {
                i += 1;
                max_depth = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(max_depth);
            }
            "--mode" => {
                i += 1;
                mode = match args.get(i).map(|v| PathMode::from_str(v)) {
                    Some(Ok(m)) => m,
                    _ => {
                        eprintln!("mode must be 'implicit' or 'explicit'");
                        std::process::exit(1);
                    }
                };
            }
            "--rr-depth" => {
                i += 1;
                rr_depth = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(rr_depth);
            }
            "--rr-prob" => {
                i += 1;
                rr_prob = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(rr_prob);
            }
            "--width" => {
                i += 1;
                width = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(width);
            }
            "--height" => {
                i += 1;
                height = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(height);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(seed);
            }
            "--normals" => {
                normals = true;
            }
            other => {
                eprintln!("unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut scene = build_demo_scene(width, height);

    let integrator: Box<dyn self::core::integrator::Integrator> = if normals {
        Box::new(NormalIntegrator::new(spp))
    } else {
        match PathTracerIntegrator::new(mode, max_depth, rr_depth, rr_prob, spp) {
            Ok(integrator) => Box::new(integrator),
            Err(e) => {
                eprintln!("invalid integrator configuration: {}", e);
                std::process::exit(1);
            }
        }
    };

    let renderer = SimpleRenderer::new(integrator, 0, seed);
    let image = renderer.render(&mut scene);

    if let Err(e) = exr_utils::write_exr_to_file(&image, output_path) {
        log::error!("failed to write {}: {}", output_path, e);
        std::process::exit(1);
    }
}
