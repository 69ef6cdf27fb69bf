//! chartlut - chart-based LUT generation CLI
//!
//! Consumes extracted patch-set documents (reference chart + camera
//! capture) and produces a `.cube` correction LUT, or a report on how
//! the two captures' luminance ranges relate.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use chartlut_engine::{
    builder, cube, range, EngineConfig, RangeMappingMode, Strategy,
};

mod patchdoc;

#[derive(Parser)]
#[command(name = "chartlut")]
#[command(author, version, about = "Chart-based LUT generation")]
#[command(long_about = "
Converts a pair of extracted color-chart patch sets (reference chart
vs. camera capture) into a 3D correction LUT.

Examples:
  chartlut generate -r ref.json -c cam.json -o correction.cube
  chartlut generate -r ref.json -c cam.json -s rangeAware --size 65 -o out.cube
  chartlut analyze -r ref.json -c cam.json --json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a .cube LUT from a reference/camera patch pair
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Report range statistics and compatibility for a patch pair
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Reference patch document (JSON)
    #[arg(short, long)]
    reference: PathBuf,

    /// Camera patch document (JSON)
    #[arg(short, long)]
    camera: PathBuf,

    /// Output .cube path
    #[arg(short, long)]
    output: PathBuf,

    /// Interpolation strategy: standard, rangeAware, tetrahedral, perceptual
    #[arg(short, long, default_value = "standard")]
    strategy: String,

    /// Lattice size per axis (17, 33 and 65 are the common choices)
    #[arg(long, default_value = "33")]
    size: usize,

    /// Range mapping mode for rangeAware: linear, stretch, midpoint, histogram
    #[arg(long, default_value = "linear")]
    mode: String,

    /// TITLE line embedded in the .cube file
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Reference patch document (JSON)
    #[arg(short, long)]
    reference: PathBuf,

    /// Camera patch document (JSON)
    #[arg(short, long)]
    camera: PathBuf,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Analyze(args) => analyze(args),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = EngineConfig::default();
    let strategy: Strategy = args
        .strategy
        .parse()
        .with_context(|| format!("strategy {:?}", args.strategy))?;
    let mode: RangeMappingMode = args
        .mode
        .parse()
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("mode {:?}", args.mode))?;

    let reference = patchdoc::load_patch_set(&args.reference)?;
    let camera = patchdoc::load_patch_set(&args.camera)?;
    info!(
        patches = reference.len(),
        skipped = reference.skipped(),
        "loaded patch sets"
    );

    let mapping = if strategy.requires_range_mapping() {
        let ref_stats = range::analyze(reference.colors(), &config)?;
        let cam_stats = range::analyze(camera.colors(), &config)?;
        let mapping = range::map_ranges(&ref_stats, &cam_stats, mode, &config);
        info!(
            scale = mapping.scale,
            offset = mapping.offset,
            compatibility = mapping.compatibility_score,
            "derived range mapping"
        );
        Some(mapping)
    } else {
        None
    };

    let lut = builder::build(
        strategy,
        &reference,
        &camera,
        args.size,
        mapping.as_ref(),
        &config,
    )?;

    let title = args.title.as_deref();
    cube::write_3d_to_path(&args.output, &lut, title)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        entries = lut.entry_count(),
        deviation = lut.max_identity_deviation(),
        "LUT written"
    );
    Ok(())
}

/// JSON report emitted by `analyze --json`.
#[derive(Serialize)]
struct AnalyzeReport {
    reference: range::RangeStats,
    camera: range::RangeStats,
    mapping: range::RangeMapping,
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let config = EngineConfig::default();
    let reference = patchdoc::load_patch_set(&args.reference)?;
    let camera = patchdoc::load_patch_set(&args.camera)?;

    let ref_stats = range::analyze(reference.colors(), &config)?;
    let cam_stats = range::analyze(camera.colors(), &config)?;
    let mapping = range::map_ranges(&ref_stats, &cam_stats, RangeMappingMode::Linear, &config);

    if args.json {
        let report = AnalyzeReport {
            reference: ref_stats,
            camera: cam_stats,
            mapping,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_stats("reference", &ref_stats);
    print_stats("camera", &cam_stats);
    println!("mapping:");
    println!("  scale          {:.4}", mapping.scale);
    println!("  offset         {:.4}", mapping.offset);
    println!("  compatibility  {:.2}", mapping.compatibility_score);
    Ok(())
}

fn print_stats(label: &str, stats: &range::RangeStats) {
    println!("{label}:");
    println!("  patches        {}", stats.luminances.len());
    println!("  range          [{:.4}, {:.4}]", stats.min, stats.max);
    println!(
        "  robust range   [{:.4}, {:.4}]",
        stats.robust_min, stats.robust_max
    );
    println!("  mean / median  {:.4} / {:.4}", stats.mean, stats.median);
    println!("  contrast       {:.4}", stats.contrast);
    println!("  dynamic range  {:.2}", stats.dynamic_range);
    println!("  quality        {:.2}", stats.quality_score);
}
