use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::RCoord;

static REGION_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^r\.(-?\d+)\.(-?\d+)\.mca$").expect("region filename pattern"));

/// List the region files in a region directory, in a stable order.
///
/// Only files whose name matches the `r.<x>.<z>.mca` pattern are kept;
/// anything else living in the directory is ignored.
pub fn region_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| REGION_FILENAME.is_match(name))
        })
        .collect();

    paths.sort();
    Ok(paths)
}

/// Parse the region coordinates out of a region file path.
pub fn coords_from_path(path: &Path) -> Option<(RCoord, RCoord)> {
    let filename = path.file_name()?.to_str()?;
    let captures = REGION_FILENAME.captures(filename)?;
    let x = captures[1].parse::<isize>().ok()?;
    let z = captures[2].parse::<isize>().ok()?;
    Some((RCoord(x), RCoord(z)))
}
