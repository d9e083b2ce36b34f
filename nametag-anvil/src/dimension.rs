use std::fmt::Display;
use std::path::{Path, PathBuf};

/// A region coordinate. Region files span 32x32 chunks, and worlds can
/// grow in any direction, so these are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RCoord(pub isize);

/// The three dimensions a Java Edition world can have. Each keeps its
/// region files in a fixed subdirectory of the world root. The Nether and
/// End are only present once a player has visited them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Overworld,
    Nether,
    End,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Overworld, Dimension::Nether, Dimension::End];

    /// The directory holding this dimension's region files.
    pub fn region_dir(&self, world_root: &Path) -> PathBuf {
        match self {
            Dimension::Overworld => world_root.join("region"),
            Dimension::Nether => world_root.join("DIM-1").join("region"),
            Dimension::End => world_root.join("DIM1").join("region"),
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Dimension::Overworld => "Overworld",
            Dimension::Nether => "Nether",
            Dimension::End => "End",
        })
    }
}
