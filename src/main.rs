//! RayBridge CLI
//!
//! Exports host scene dumps for an external ray tracer: glTF geometry, a
//! textures directory and a camera/light sidecar.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use raybridge_core::logging::{self, TracingConfig};
use raybridge_export::{ExportConfig, ExportReport, GeometryLayout, GltfExporter, SceneExporter};
use raybridge_scene::{load_scene, LightKind, Scene, SceneSource};

/// RayBridge - scene export for external ray tracers
#[derive(Parser)]
#[command(name = "raybridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LayoutArg(GeometryLayout);

impl std::str::FromStr for LayoutArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "separate" | "gltf" => Ok(LayoutArg(GeometryLayout::Separate)),
            "binary" | "glb" => Ok(LayoutArg(GeometryLayout::Binary)),
            _ => Err(format!("Unknown layout: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Export geometry, textures and the scene sidecar
    Export(ExportArgs),

    /// Write the active camera and lights for the scripted renderer
    Script(ScriptArgs),

    /// Show a summary of a scene dump
    Info(InfoArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Scene dump (.json or .yaml)
    #[arg(short, long)]
    scene: PathBuf,

    /// Geometry output path; the sidecar and textures land beside it
    #[arg(short, long, default_value = "scene.gltf")]
    output: PathBuf,

    /// Geometry layout: separate, binary
    #[arg(long)]
    layout: Option<LayoutArg>,

    /// Skip geometry, write textures and sidecar only
    #[arg(long)]
    no_geometry: bool,

    /// Export settings file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct ScriptArgs {
    /// Scene dump (.json or .yaml)
    #[arg(short, long)]
    scene: PathBuf,

    /// Sidecar output path
    #[arg(short, long)]
    output: PathBuf,

    /// Export settings file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
    /// Scene dump (.json or .yaml)
    #[arg(short, long)]
    scene: PathBuf,

    /// Output format: text, json
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with_config(&TracingConfig::from_verbosity(cli.verbose));

    match cli.command {
        Commands::Export(args) => cmd_export(args),
        Commands::Script(args) => cmd_script(args),
        Commands::Info(args) => cmd_info(args),
    }
}

fn load_config(path: Option<&Path>) -> Result<ExportConfig> {
    match path {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("Failed to load config {:?}", path)),
        None => Ok(ExportConfig::default()),
    }
}

fn load(path: &Path) -> Result<Scene> {
    if !path.exists() {
        bail!("Scene dump not found: {:?}", path);
    }
    load_scene(path).with_context(|| format!("Failed to load scene dump {:?}", path))
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(LayoutArg(layout)) = args.layout {
        config.layout = layout;
    }
    if args.no_geometry {
        config.export_geometry = false;
    }
    debug!(?config, "Export settings");

    let scene = load(&args.scene)?;
    let exporter = SceneExporter::new(config);
    let mut gltf = GltfExporter::default();

    let report = exporter
        .export_interactive(&scene, &args.output, Some(&mut gltf))
        .context("Export failed")?;

    print_report(&report);
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let scene = load(&args.scene)?;

    let report = SceneExporter::new(config)
        .export_script(&scene, &args.output)
        .context("Script export failed")?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &ExportReport) {
    for skip in &report.skipped {
        warn!("Skipped: {}", skip);
    }
    info!("Export finished with {} skipped item(s)", report.skipped.len());

    for path in &report.geometry {
        println!("Geometry: {}", path.display());
    }
    if let Some(dir) = &report.textures_dir {
        println!("Textures: {} ({} copied)", dir.display(), report.textures.len());
    }
    println!(
        "Sidecar:  {} ({} camera(s), {} light(s))",
        report.sidecar.display(),
        report.cameras,
        report.lights
    );
}

fn cmd_info(args: InfoArgs) -> Result<()> {
    let scene = load(&args.scene)?;

    let cameras: Vec<_> = scene.cameras().map(|(o, _)| o.name.as_str()).collect();
    let lights: Vec<_> = scene
        .lights()
        .map(|(o, l)| (o.name.as_str(), &l.kind))
        .collect();
    let meshes: Vec<_> = scene
        .meshes()
        .map(|(o, m)| (o.name.as_str(), m.vertex_count(), m.triangle_count()))
        .collect();
    let active = scene.active_camera().map(|o| o.name.as_str());
    let render = scene.render();

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "name": scene.name(),
                "base_dir": scene.base_dir(),
                "objects": scene.objects().len(),
                "active_camera": active,
                "resolution": [render.resolution_x, render.resolution_y],
                "cameras": cameras,
                "lights": lights.iter().map(|(name, kind)| {
                    serde_json::json!({ "name": name, "type": kind.as_str() })
                }).collect::<Vec<_>>(),
                "meshes": meshes.iter().map(|(name, vertices, triangles)| {
                    serde_json::json!({ "name": name, "vertices": vertices, "triangles": triangles })
                }).collect::<Vec<_>>(),
                "images": scene.images().iter().map(|i| {
                    serde_json::json!({ "name": i.name, "filepath": i.filepath })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            println!("Scene: {:?}", args.scene);
            println!("============================================");
            println!("  Name:           {}", scene.name());
            println!("  Objects:        {:>8}", scene.objects().len());
            println!("  Resolution:     {}x{}", render.resolution_x, render.resolution_y);
            println!("  Active camera:  {}", active.unwrap_or("(none)"));

            println!("\nCameras ({}):", cameras.len());
            for name in &cameras {
                println!("  {}", name);
            }

            println!("\nLights ({}):", lights.len());
            for (name, kind) in &lights {
                let note = if matches!(kind, LightKind::Other(_)) { "  [unsupported]" } else { "" };
                println!("  {:<24} {}{}", name, kind, note);
            }

            println!("\nMeshes ({}):", meshes.len());
            for (name, vertices, triangles) in &meshes {
                println!("  {:<24} {:>8} verts {:>8} tris", name, vertices, triangles);
            }

            println!("\nImages ({}):", scene.images().len());
            for image in scene.images() {
                let resolved = scene.resolve_path(&image.filepath);
                let state = match &resolved {
                    Some(path) if path.is_file() => "ok",
                    Some(_) => "missing",
                    None => "no path",
                };
                println!("  {:<24} {:<8} {}", image.name, state, image.filepath);
            }
        }
    }

    Ok(())
}
