//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
///
/// Structural failures ([`Error::InvalidMagic`], [`Error::InvalidRootNode`],
/// [`Error::UnknownNodeKind`], [`Error::TruncatedArchive`]) mean the buffer is
/// not a usable ARC and decoding stopped at the first violation. Lookup
/// failures are wrapped in [`PathError`] so callers can retry with a
/// different path instead of rejecting the archive.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// the buffer does not start with the ARC magic
    #[error("invalid ARC magic (found {found:#010X})")]
    InvalidMagic {
        /// The first four bytes of the buffer, read big-endian
        found: u32,
    },

    /// the node following the header is not a directory
    #[error("root node was not a directory")]
    InvalidRootNode,

    /// a node record carries a kind tag other than file or directory
    #[error("unknown node kind {0}")]
    UnknownNodeKind(u8),

    /// an offset or length points past the end of the buffer
    #[error("archive truncated")]
    TruncatedArchive,

    /// unable to resolve the requested path
    #[error("unable to resolve requested path")]
    Path(#[from] PathError),
}

/// Error type for path lookups within a directory tree
///
/// These are expected outcomes of probing for a path, not archive corruption.
#[derive(Error, Diagnostic, Debug)]
pub enum PathError {
    /// no entry exists at {0}
    #[error("no entry exists at {0:?}")]
    NotFound(String),

    /// the path contains an empty component
    #[error("invalid path {0:?}")]
    InvalidPath(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
