use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use whitted::camera::Camera;
use whitted::output::{save_image, OutputFormat};
use whitted::scene::Scene;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> ExitCode {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("whitted - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> whitted::Result<()> {
    // Fail before rendering rather than after
    OutputFormat::from_path(&args.output)?;
    Camera::check_image_size(args.width, args.height)?;

    let mut scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => {
            info!("No scene file given, rendering the built-in demo scene");
            Scene::demo()
        }
    };

    if let Some(max_depth) = args.max_depth {
        scene.max_depth = max_depth;
        scene.validate()?;
    }

    info!(
        "Scene: {} triangles, {} lights, max depth {}",
        scene.triangles.len(),
        scene.lights.len(),
        scene.max_depth
    );
    info!("Image resolution: {}x{}", args.width, args.height);

    if let Some(path) = &args.dump_scene {
        scene.save(path)?;
        info!("Scene written to {}", path.display());
    }

    let mut camera = Camera::from_setup(&scene.camera, args.width, args.height);
    let image = camera.render(&scene);

    save_image(&image, &args.output)
}
