//! Error types for corpus loading, solver construction and window regeneration

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation and window operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load a training corpus image from the filesystem
    CorpusLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Corpus data doesn't meet solver requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile index exceeds the palette known to the renderer
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles the palette holds
        max_tiles: usize,
    },

    /// Failed to save an exported image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A required collaborator was never bound to the controller
    MissingBinding {
        /// Name of the missing collaborator
        collaborator: &'static str,
    },

    /// The unconstrained solve still contradicts for the current geometry
    ///
    /// The corpus cannot tile a window of this size, so retrying is pointless.
    Unsatisfiable {
        /// World origin of the window that failed
        origin: [i32; 2],
        /// Solver grid dimensions (width, height)
        dimensions: (usize, usize),
    },

    /// A solver cell was addressed outside the bounds of its handle
    SampleOutOfBounds {
        /// Requested local column
        x: usize,
        /// Requested local row
        y: usize,
        /// Handle width
        width: usize,
        /// Handle height
        height: usize,
    },

    /// The controller was disabled by an earlier fatal fault
    ControllerDisabled,
}

impl AlgorithmError {
    /// Whether this error belongs to the fatal configuration family
    ///
    /// Configuration faults disable the controller; everything else is an
    /// ordinary I/O or input failure reported to the caller.
    pub const fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            Self::MissingBinding { .. }
                | Self::Unsatisfiable { .. }
                | Self::SampleOutOfBounds { .. }
                | Self::InvalidTileIndex { .. }
                | Self::InvalidParameter { .. }
        )
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorpusLoad { path, source } => {
                write!(f, "Failed to load corpus '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (max: {max_tiles})")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::MissingBinding { collaborator } => {
                write!(f, "No {collaborator} bound to the window controller")
            }
            Self::Unsatisfiable { origin, dimensions } => {
                write!(
                    f,
                    "Corpus cannot tile a {}x{} window at ({}, {}) even without constraints",
                    dimensions.0, dimensions.1, origin[0], origin[1]
                )
            }
            Self::SampleOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Cell ({x}, {y}) is outside the {width}x{height} solver grid"
                )
            }
            Self::ControllerDisabled => {
                write!(f, "Window controller is disabled after a fatal fault")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CorpusLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::CorpusLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
