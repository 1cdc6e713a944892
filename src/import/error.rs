//! Error types for pin table import.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur while importing a pin table into the pool.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Failed to open or read an input file.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write an output record.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An output record already exists in the pool.
    #[error("Refusing to overwrite existing record: {path}")]
    OutputExists {
        /// Path of the existing file.
        path: PathBuf,
    },

    /// A record could not be serialised.
    #[error("Failed to serialise {record} record")]
    Serialize {
        /// Record kind ("unit", "entity", "part").
        record: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The package record does not have the expected shape.
    #[error("Malformed package record: {message}")]
    Schema {
        /// Description of what's wrong.
        message: String,
    },

    /// Two pads of the package share a display name.
    #[error("Malformed package record: duplicate pad name '{name}'")]
    DuplicatePadName {
        /// The repeated pad name.
        name: String,
    },

    /// The pin table does not have the expected shape.
    #[error("Malformed pin table: {message}")]
    Format {
        /// Description of what's wrong.
        message: String,
    },

    /// The pin table and the package describe different devices.
    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    /// A pin carries an electrical type with no known direction.
    #[error("Unknown pin type '{pin_type}' at position {position}")]
    UnknownPinType {
        /// The unrecognised type literal.
        pin_type: String,
        /// Position key of the pin.
        position: String,
    },

    /// An internal consistency check failed after validation passed.
    #[error("Internal invariant violated: {message}")]
    InvariantViolation {
        /// Description of the broken invariant.
        message: String,
    },
}

impl ImportError {
    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a package schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Creates a pin table format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates an unknown pin type error.
    pub fn unknown_pin_type(pin_type: impl Into<String>, position: impl Into<String>) -> Self {
        Self::UnknownPinType {
            pin_type: pin_type.into(),
            position: position.into(),
        }
    }

    /// Creates an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}

/// Reasons the pin table and the package fail to line up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// Pin and pad counts differ.
    #[error("Pin table has {pins} pins but package has {pads} pads")]
    CardinalityMismatch {
        /// Number of pads in the package.
        pads: usize,
        /// Number of pins in the pin table.
        pins: usize,
    },

    /// Pin positions that name no pad of the package.
    #[error("Pin positions not found among package pads: {}", .positions.join(", "))]
    UnresolvedPosition {
        /// Offending position keys, in pin table order.
        positions: Vec<String>,
    },

    /// Pin positions that occur more than once in the pin table.
    #[error("Pin positions used more than once: {}", .positions.join(", "))]
    DuplicatePosition {
        /// Repeated position keys, in pin table order.
        positions: Vec<String>,
    },
}

/// Machine-readable reason code of an [`AlignmentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentReason {
    /// Pin and pad counts differ.
    CardinalityMismatch,
    /// A position has no matching pad.
    UnresolvedPosition,
    /// A position is repeated.
    DuplicatePosition,
}

impl AlignmentReason {
    /// Returns the reason code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CardinalityMismatch => "CARDINALITY_MISMATCH",
            Self::UnresolvedPosition => "UNRESOLVED_POSITION",
            Self::DuplicatePosition => "DUPLICATE_POSITION",
        }
    }
}

impl fmt::Display for AlignmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl AlignmentError {
    /// Returns the structured reason for this failure.
    #[must_use]
    pub const fn reason(&self) -> AlignmentReason {
        match self {
            Self::CardinalityMismatch { .. } => AlignmentReason::CardinalityMismatch,
            Self::UnresolvedPosition { .. } => AlignmentReason::UnresolvedPosition,
            Self::DuplicatePosition { .. } => AlignmentReason::DuplicatePosition,
        }
    }
}
