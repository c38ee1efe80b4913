//! Manifest and table output for a built solid.

pub mod manifest;
pub mod table;

pub use manifest::{project_name, write_manifest, write_manifest_file};
pub use table::{
    write_corners_table, write_corners_table_file, write_edges_table, write_edges_table_file,
    TableOptions,
};

use std::path::PathBuf;

use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::topology::Solid;

/// Output paths and options for one full export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Destination of the XML assembly manifest.
    pub manifest_path: PathBuf,
    /// Destination of the corner table.
    pub corners_table_path: PathBuf,
    /// Destination of the edge table.
    pub edges_table_path: PathBuf,
    /// First corner index to keep in the corner table (0-based).
    pub start_from: usize,
    /// Last corner index to keep (inclusive), or 0 for unbounded.
    pub finish_at: usize,
    /// Randomize part order before writing each table.
    pub shuffle: bool,
}

/// Writes the manifest and both part tables in one pass.
///
/// The manifest is written first, from the untrimmed solid; the corner
/// range trim only affects the tables (and the solid afterwards).
///
/// # Errors
///
/// Returns an error if any of the three outputs cannot be written.
pub fn export_plan<R: Rng>(
    solid: &mut Solid,
    project: &str,
    config: &ExportConfig,
    rng: &mut R,
) -> Result<()> {
    write_manifest_file(solid, project, &config.manifest_path)?;

    let options = TableOptions {
        start_from: config.start_from,
        finish_at: config.finish_at,
        shuffle: config.shuffle,
    };
    write_corners_table_file(solid, &config.corners_table_path, &options, rng)?;
    write_edges_table_file(solid, &config.edges_table_path, &options, rng)?;

    info!(
        manifest = %config.manifest_path.display(),
        corners = %config.corners_table_path.display(),
        edges = %config.edges_table_path.display(),
        "fabrication plan exported"
    );
    Ok(())
}
