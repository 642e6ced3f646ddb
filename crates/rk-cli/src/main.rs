//! Scene exporter entry point
//!
//! # Commands
//!
//! - `rk-export export <scene>` - write one MJCF/URDF document per root link
//! - `rk-export import <scene> <model>` - apply sizes and parenting from a model file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rk_export::{AngleConversion, ExportFormat, ExportOptions};
use rk_scene::Scene;

#[derive(Parser)]
#[command(name = "rk-export")]
#[command(about = "Export annotated scenes as MJCF or URDF kinematic trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every un-parented link as its own document
    Export {
        /// Scene file (.ron or .json)
        scene: PathBuf,

        /// Output directory (overrides the options file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// RON export options file
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Also write an OBJ file for every mesh object
        #[arg(long)]
        meshes: bool,

        /// Convert joint ranges with 180/pi instead of 57.32
        #[arg(long)]
        exact_angles: bool,

        /// Print this root's document to stdout instead of writing files
        #[arg(long)]
        root: Option<String>,
    },

    /// Resize and re-parent scene objects from an MJCF or URDF file
    Import {
        /// Scene file to update
        scene: PathBuf,

        /// Model file (.xml or .urdf)
        model: PathBuf,

        /// Where to save the updated scene (defaults to overwriting it)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Mjcf,
    Urdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Mjcf => ExportFormat::Mjcf,
            FormatArg::Urdf => ExportFormat::Urdf,
        }
    }
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rk_cli=info,rk_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            scene,
            output,
            config,
            format,
            meshes,
            exact_angles,
            root,
        } => {
            let mut options = match &config {
                Some(path) => ExportOptions::load(path)
                    .with_context(|| format!("failed to load options from {}", path.display()))?,
                None => ExportOptions::default(),
            };
            if let Some(output) = output {
                options.output_dir = output;
            }
            if let Some(format) = format {
                options.format = format.into();
            }
            if meshes {
                options.export_meshes = true;
            }
            if exact_angles {
                options.angle_conversion = AngleConversion::Exact;
            }
            run_export(&scene, &options, root.as_deref())
        }
        Commands::Import {
            scene,
            model,
            output,
        } => run_import(&scene, &model, output),
    }
}

fn run_export(scene_path: &Path, options: &ExportOptions, root: Option<&str>) -> Result<()> {
    let scene = Scene::load(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;

    if let Some(root) = root {
        let xml = rk_export::export_to_string(&scene, options, root)?;
        print!("{xml}");
        return Ok(());
    }

    tracing::info!(
        "Exporting {} documents to {:?}",
        options.format.display_name(),
        options.output_dir
    );
    let summary = rk_export::export_scene(&scene, options)?;
    for path in &summary.documents {
        println!("{}", path.display());
    }
    for warning in &summary.warnings {
        tracing::warn!("{}", warning);
    }
    if !summary.is_success() {
        for failure in &summary.failures {
            eprintln!("{}: {}", failure.root, failure.error);
        }
        bail!(
            "{} of {} roots failed to export",
            summary.failures.len(),
            summary.failures.len() + summary.documents.len()
        );
    }
    Ok(())
}

fn run_import(scene_path: &Path, model_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let mut scene = Scene::load(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;
    let model = rk_export::read_model(model_path)
        .with_context(|| format!("failed to read model {}", model_path.display()))?;

    let report = rk_export::apply_to_scene(&mut scene, &model);
    for name in &report.missing {
        tracing::warn!("No scene object named '{}'", name);
    }

    let target = output.unwrap_or_else(|| scene_path.to_path_buf());
    scene
        .save(&target)
        .with_context(|| format!("failed to save scene {}", target.display()))?;
    tracing::info!(
        "Resized {} and re-parented {} objects, saved to {:?}",
        report.resized.len(),
        report.parented.len(),
        target
    );
    Ok(())
}
