//! janua - PVS preprocessor
//!
//! Loads an XML or OBJ scene, hands it to the visibility engine and writes
//! the exported database.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use env_logger::Env;
use janua_import::Session;
use janua_pvs::{build_pvs, ManifestEngine, SceneConfigOverrides, Size3};
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "janua")]
#[command(about = "Precompute a potentially visible set database for a scene", long_about = None)]
struct Cli {
    /// Scene file (.obj for Wavefront OBJ, anything else is read as XML)
    #[arg(short, long, alias = "inputPath")]
    input: PathBuf,

    /// Output database file
    #[arg(short, long, alias = "outputPath")]
    output: PathBuf,

    /// TOML file with scene settings; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene name
    #[arg(long, alias = "sceneName")]
    scene_name: Option<String>,

    /// Voxel size as x;y;z
    #[arg(long, alias = "voxelSize")]
    voxel_size: Option<Size3>,

    /// Maximum cell size as x;y;z
    #[arg(long, alias = "maxCellSize")]
    max_cell_size: Option<Size3>,

    /// Scene tile size as x;y;z
    #[arg(long, alias = "tileSize")]
    tile_size: Option<Size3>,

    /// Indent the exported scene manifest
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn overrides(&self) -> SceneConfigOverrides {
        SceneConfigOverrides {
            scene_name: self.scene_name.clone(),
            voxel_size: self.voxel_size,
            max_cell_size: self.max_cell_size,
            tile_size: self.tile_size,
        }
    }
}

/// Load the scene; a structural failure carries the full diagnostic report.
fn load_session(input: &Path) -> Result<Session> {
    Session::load(input).map_err(|failure| {
        anyhow!(failure.diagnostics.format_report().trim_end().to_string())
            .context(format!("failed to load {}", input.display()))
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let from_file = match &cli.config {
        Some(path) => SceneConfigOverrides::load(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => SceneConfigOverrides::default(),
    };
    let config = cli
        .overrides()
        .or(from_file)
        .resolve()
        .context("invalid scene settings")?;

    let session = load_session(&cli.input)?;
    if session.diagnostics().has_errors() {
        warn!(
            "some elements were skipped\n{}",
            session.diagnostics().format_report()
        );
    }
    info!(
        "Loaded {} meshes ({} triangles)",
        session.meshes().len(),
        session.triangle_count()
    );

    info!("Building PVS...");
    let mut engine = if cli.pretty {
        ManifestEngine::pretty()
    } else {
        ManifestEngine::new()
    };
    let report = build_pvs(&mut engine, session.meshes(), &config, &cli.output)
        .with_context(|| format!("building PVS for {}", cli.input.display()))?;
    session.release();

    info!(
        "PVS completed. {} bytes written to {}",
        report.bytes,
        cli.output.display()
    );
    Ok(())
}
