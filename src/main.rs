//! Mannequin - Headless avatar fitting-room toolkit
//!
//! Main entry point for the CLI application.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mannequin::config::Config;
use mannequin::shape::{self, Gender, ShapeParams};
use mannequin::{chroma, loader};

/// Mannequin - avatar body shaping and photo try-on tools
#[derive(Parser, Debug)]
#[command(name = "mannequin", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chroma-key a garment photo and write the transparent cutout
    Keyout {
        /// Input photo (PNG or JPEG)
        input: PathBuf,
        /// Output PNG with the background carved out
        output: PathBuf,
        /// Override the configured color distance tolerance
        #[arg(long)]
        tolerance: Option<f32>,
    },
    /// Apply shape sliders to a model's skeleton and report joint scales
    Shape {
        /// Avatar model (GLB/glTF)
        model: PathBuf,
        /// Body height in centimeters
        #[arg(long, default_value_t = 170)]
        height: i32,
        /// Overall body mass multiplier
        #[arg(long, default_value_t = 1.0)]
        weight: f32,
        /// Waist girth multiplier
        #[arg(long, default_value_t = 1.0)]
        waist: f32,
        /// Arm girth multiplier
        #[arg(long, default_value_t = 1.0)]
        arms: f32,
        /// Gender preset: neutral, male, or female
        #[arg(long, default_value_t = Gender::Neutral)]
        gender: Gender,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List a model's joints with their classified shape roles
    Joints {
        /// Avatar model (GLB/glTF)
        model: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging; reports go to stdout, logs stay on stderr
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting {} v{}", mannequin::NAME, mannequin::VERSION);

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    config.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;

    match args.cmd {
        Command::Keyout {
            input,
            output,
            tolerance,
        } => runtime.block_on(run_keyout(&config, &input, &output, tolerance)),
        Command::Shape {
            model,
            height,
            weight,
            waist,
            arms,
            gender,
            json,
        } => {
            let params = ShapeParams {
                height_cm: height,
                weight,
                waist,
                arms,
            };
            runtime.block_on(run_shape(&config, &model, &params, gender, json))
        }
        Command::Joints { model } => runtime.block_on(run_joints(&model)),
    }
}

async fn run_keyout(
    config: &Config,
    input: &Path,
    output: &Path,
    tolerance: Option<f32>,
) -> anyhow::Result<()> {
    let mut tuning = config.chroma.clone();
    if let Some(tolerance) = tolerance {
        tuning.tolerance = tolerance;
    }

    let image = loader::load_image(input).await?;
    let cutout = chroma::remove_background(&image, &tuning);
    cutout.save(output)?;

    info!(
        "Wrote {}x{} cutout to {}",
        cutout.width(),
        cutout.height(),
        output.display()
    );
    Ok(())
}

async fn run_shape(
    config: &Config,
    model: &Path,
    params: &ShapeParams,
    gender: Gender,
    json: bool,
) -> anyhow::Result<()> {
    let mut skeleton = loader::load_skeleton(model).await?;
    shape::apply_shape(&mut skeleton, params, gender, &config.shape);

    if json {
        let report = ShapeReport::new(&skeleton, params, gender);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Root scale: {:.4}", skeleton.root_scale);
    for joint in skeleton.joints() {
        let role = shape::classify_joint(&joint.name)
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<32} {:<8} x={:.3} y={:.3} z={:.3}",
            joint.name, role, joint.scale.x, joint.scale.y, joint.scale.z
        );
    }
    Ok(())
}

async fn run_joints(model: &Path) -> anyhow::Result<()> {
    let skeleton = loader::load_skeleton(model).await?;

    println!("{} joints in {}", skeleton.len(), model.display());
    for joint in skeleton.joints() {
        let role = shape::classify_joint(&joint.name)
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let parent = joint
            .parent
            .map(|p| skeleton.joints()[p].name.clone())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<32} {:<8} parent: {}", joint.name, role, parent);
    }
    Ok(())
}

/// Machine-readable output of the `shape` subcommand.
#[derive(Serialize)]
struct ShapeReport {
    gender: Gender,
    params: ShapeParams,
    root_scale: f32,
    joints: Vec<JointReport>,
}

#[derive(Serialize)]
struct JointReport {
    name: String,
    role: Option<String>,
    scale: [f32; 3],
}

impl ShapeReport {
    fn new(skeleton: &mannequin::skeleton::Skeleton, params: &ShapeParams, gender: Gender) -> Self {
        let joints = skeleton
            .joints()
            .iter()
            .map(|j| JointReport {
                name: j.name.clone(),
                role: shape::classify_joint(&j.name).map(|r| r.to_string()),
                scale: j.scale.to_array(),
            })
            .collect();

        Self {
            gender,
            params: *params,
            root_scale: skeleton.root_scale,
            joints,
        }
    }
}
