//! Flat part tables for labeling and cutting.
//!
//! Each table starts with an info line holding the whole-solid part counts,
//! then a column-label line, then one comma-separated row per entity.
//! Corner rows have a fixed width of eight rod angle pairs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;
use tracing::debug;

use crate::error::ExportError;
use crate::topology::{Corner, Edge, Solid};

/// Widest corner piece the table layout supports: eight rod sockets.
const MAX_RODS: usize = 8;

/// Range-trim and shuffle options for table export.
///
/// Indices are 0-based and inclusive; `finish_at == 0` means "to the end".
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// First entity index to export.
    pub start_from: usize,
    /// Last entity index to export, or 0 for unbounded.
    pub finish_at: usize,
    /// Randomize part order immediately before writing.
    pub shuffle: bool,
}

/// Writes the corner table.
///
/// The info line reports the pre-trim totals; the range trim then mutates
/// the solid's corner collection itself, so corners outside the range are
/// also gone for any later read. With `shuffle` set, all three part
/// collections are shuffled before the rows are written.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
pub fn write_corners_table<W: Write, R: Rng>(
    solid: &mut Solid,
    out: &mut W,
    options: &TableOptions,
    rng: &mut R,
) -> Result<(), ExportError> {
    write_info_line(solid, out)?;

    solid.trim_corner_range(options.start_from, options.finish_at);
    if options.shuffle {
        solid.shuffle(rng);
    }

    write!(out, "id,posX,posY,posZ")?;
    for rod in 1..=MAX_RODS {
        write!(out, ",rod {rod}-V,rod {rod}-H")?;
    }
    writeln!(out)?;

    for corner in solid.corners() {
        writeln!(out, "{}", corner_row(corner))?;
    }

    debug!(rows = solid.corners().len(), "corner table written");
    Ok(())
}

/// Writes the edge table.
///
/// The range parameters in `options` are accepted but deliberately never
/// applied: edges are always exported in full. Only `shuffle` takes effect.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
pub fn write_edges_table<W: Write, R: Rng>(
    solid: &mut Solid,
    out: &mut W,
    options: &TableOptions,
    rng: &mut R,
) -> Result<(), ExportError> {
    write_info_line(solid, out)?;

    if options.shuffle {
        solid.shuffle(rng);
    }

    writeln!(out, "id,posX,posY,posZ,rotX,rotY,rotZ,length")?;
    for edge in solid.edges() {
        writeln!(out, "{}", edge_row(edge))?;
    }

    debug!(rows = solid.edges().len(), "edge table written");
    Ok(())
}

/// Writes the corner table to a file, attaching the path to any failure.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_corners_table_file<R: Rng>(
    solid: &mut Solid,
    path: &Path,
    options: &TableOptions,
    rng: &mut R,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_corners_table(solid, &mut out, options, rng).map_err(|e| e.with_path(path))?;
    out.flush().map_err(|e| ExportError::io(path, e))
}

/// Writes the edge table to a file, attaching the path to any failure.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_edges_table_file<R: Rng>(
    solid: &mut Solid,
    path: &Path,
    options: &TableOptions,
    rng: &mut R,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_edges_table(solid, &mut out, options, rng).map_err(|e| e.with_path(path))?;
    out.flush().map_err(|e| ExportError::io(path, e))
}

fn write_info_line<W: Write>(solid: &Solid, out: &mut W) -> Result<(), ExportError> {
    writeln!(
        out,
        "{} corners,{} polygons,{} edges",
        solid.corners().len(),
        solid.polygons().len(),
        solid.edges().len()
    )?;
    Ok(())
}

/// One corner row: id, position, then exactly eight vertical/horizontal
/// pairs; missing rods are padded with empty fields, extra ones truncated.
fn corner_row(corner: &Corner) -> String {
    let mut row = format!(
        "{},{},{},{}",
        corner.id, corner.position.x, corner.position.y, corner.position.z
    );
    for rod in 0..MAX_RODS {
        match corner.angles.get(rod) {
            Some((vertical, horizontal)) => {
                row.push_str(&format!(",{vertical},{horizontal}"));
            }
            None => row.push_str(",,"),
        }
    }
    row
}

fn edge_row(edge: &Edge) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        edge.id,
        edge.position.x,
        edge.position.y,
        edge.position.z,
        edge.rotation.x,
        edge.rotation.y,
        edge.rotation.z,
        edge.length
    )
}
