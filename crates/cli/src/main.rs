//! Paramo CLI - elevation-band resistance surfaces from a DEM

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use paramo_algorithms::resistance::{
    reclassify, run_batch, BatchParams, DirectorySink, ElevationRange, ReclassifyParams,
    PARAMO_RANGES,
};
use paramo_core::io::{read_ascii_grid, write_geotiff};
use paramo_core::{Crs, Raster};

#[derive(Parser)]
#[command(name = "paramo")]
#[command(author, version, about = "Elevation-band resistance surfaces for Andean connectivity", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a DEM file
    Info {
        /// Input DEM (ESRI ASCII grid)
        input: PathBuf,
    },
    /// Reclassify the DEM against a single elevation range
    Reclassify {
        /// Input DEM (ESRI ASCII grid)
        input: PathBuf,
        /// Output GeoTIFF file
        output: PathBuf,
        /// Lower elevation limit
        #[arg(long)]
        lower: f64,
        /// Upper elevation limit
        #[arg(long)]
        upper: f64,
    },
    /// Produce cost rasters for all 22 fixed elevation ranges
    Batch {
        /// Input DEM (ESRI ASCII grid)
        input: PathBuf,
        /// Output directory (created if missing); files are named
        /// RC_<lower>_<upper>.tif
        output_dir: PathBuf,
        /// Process ranges one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Read the DEM and assign the WGS84 lon/lat CRS the source data carries.
fn read_dem(path: &PathBuf) -> Result<Raster> {
    let pb = spinner("Reading DEM...");
    let mut dem = read_ascii_grid(path).context("Failed to read DEM")?;
    dem.set_crs(Some(Crs::wgs84_longlat()));
    pb.finish_and_clear();
    info!("Input: {} x {}", dem.cols(), dem.rows());
    Ok(dem)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let dem = read_dem(&input)?;
            let (rows, cols) = dem.shape();
            let bounds = dem.bounds();
            let stats = dem.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, dem.len());
            println!("Cell size: {}", dem.cell_size());
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            if let Some(crs) = dem.crs() {
                println!("CRS: {}", crs);
            }
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            println!(
                "  Valid cells: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / dem.len() as f64
            );
        }

        Commands::Reclassify {
            input,
            output,
            lower,
            upper,
        } => {
            let dem = read_dem(&input)?;
            let range = ElevationRange::new(lower, upper);
            let start = Instant::now();
            let result = reclassify(&dem, ReclassifyParams::new(range))
                .context("Failed to reclassify DEM")?;
            let elapsed = start.elapsed();

            let pb = spinner("Writing output...");
            write_geotiff(&result, &output).context("Failed to write output")?;
            pb.finish_and_clear();

            println!("{} saved to: {}", range.file_stem(), output.display());
            println!("  Processing time: {:.2?}", elapsed);
        }

        Commands::Batch {
            input,
            output_dir,
            sequential,
        } => {
            let dem = read_dem(&input)?;
            let sink = DirectorySink::new(&output_dir).context("Failed to create output directory")?;

            let start = Instant::now();
            let outcomes = run_batch(
                &dem,
                &PARAMO_RANGES,
                &sink,
                BatchParams {
                    sequential,
                    ..BatchParams::default()
                },
            );
            let elapsed = start.elapsed();

            let failed: Vec<String> = outcomes
                .iter()
                .filter(|o| !o.is_ok())
                .map(|o| o.range.file_stem())
                .collect();

            println!(
                "{}/{} cost rasters written to: {}",
                outcomes.len() - failed.len(),
                outcomes.len(),
                output_dir.display()
            );
            println!("  Processing time: {:.2?}", elapsed);

            if !failed.is_empty() {
                anyhow::bail!("{} range(s) failed: {}", failed.len(), failed.join(", "));
            }
        }
    }

    Ok(())
}
