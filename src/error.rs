use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::topology::{CornerId, PolygonId};

/// Top-level error type for the rodworks pipeline.
#[derive(Debug, Error)]
pub enum RodworksError {
    #[error(transparent)]
    Ident(#[from] IdentError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors related to part-identifier assignment.
#[derive(Debug, Error)]
pub enum IdentError {
    #[error("identifier pool for family `{family}` exhausted after {issued} identifiers")]
    PoolExhausted {
        family: &'static str,
        issued: usize,
    },
}

/// Errors related to solid topology construction.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("polygon {polygon} references point ({x}, {y}, {z}) absent from the corner set")]
    UnresolvedVertex {
        polygon: PolygonId,
        x: f64,
        y: f64,
        z: f64,
    },

    #[error("corner {0} not found in the solid")]
    CornerNotFound(CornerId),

    #[error("polygon {polygon} has fewer than three vertices or a collinear boundary")]
    DegeneratePolygon { polygon: PolygonId },
}

/// Errors related to writing the manifest and table outputs.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] io::Error),
}

impl ExportError {
    /// Attaches the offending path to an I/O error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attaches a path to a bare serialization error; errors that already
    /// carry a path are left alone.
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Serialize(source) => Self::io(path, source),
            other => other,
        }
    }
}

/// Convenience type alias for results using [`RodworksError`].
pub type Result<T> = std::result::Result<T, RodworksError>;
