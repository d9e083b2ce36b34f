use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;

use nametag_anvil::{region_files, scan_region, Dimension, Region};

/// Find named entities in a Minecraft world.
///
/// Walks every region file of every dimension, decodes each chunk, and
/// prints one line per entity that carries a non-empty CustomName.
#[derive(Parser)]
#[command(name = "nametag", version, about)]
struct Cli {
    /// World directory (the folder containing level.dat)
    world: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let world = std::fs::metadata(&cli.world)
        .with_context(|| format!("cannot open world at {}", cli.world.display()))?;
    if !world.is_dir() {
        bail!("world path {} is not a directory", cli.world.display());
    }

    for dimension in Dimension::ALL {
        println!("Searching {}", dimension);
        search_dimension(&cli.world, dimension)?;
    }
    println!("Finished");

    Ok(())
}

fn search_dimension(world: &Path, dimension: Dimension) -> Result<()> {
    let region_dir = dimension.region_dir(world);
    if !region_dir.is_dir() {
        // some worlds never generated this dimension
        log::info!("no region directory for {}, skipping", dimension);
        return Ok(());
    }

    println!(" Directory: {}", region_dir.display());

    let files = region_files(&region_dir)
        .with_context(|| format!("cannot list region files in {}", region_dir.display()))?;

    println!(" Region files: {}", files.len());
    println!(" Named entities:");

    // Region files are independent; decoding is CPU-bound, so scan them
    // in parallel. Records from different regions interleave freely.
    files.par_iter().for_each(|path| match Region::open(path) {
        Ok(mut region) => {
            for record in scan_region(&mut region) {
                println!(
                    "  {} ({}) ({:.2}, {:.2}, {:.2})",
                    record.custom_name, record.id, record.pos[0], record.pos[1], record.pos[2]
                );
            }
        }
        Err(e) => log::warn!("skipping region file {}: {}", path.display(), e),
    });

    Ok(())
}
