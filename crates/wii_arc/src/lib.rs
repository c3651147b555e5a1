//! This library handles reading from and creating **ARC** (U8) archives used by the *Nintendo Wii*.
//!
//! # ARC Archive Format Documentation
//!
//! This crate provides utilities to decode and build the **ARC** archive format (also known as U8)
//! used across the Wii's system software to pack a whole directory tree of assets into a single
//! binary blob. ARC files are typically identified with the `.arc` extension.
//!
//! ## File Structure
//!
//! An ARC file consists of four contiguous regions: a fixed header, a flat array of node records,
//! a name table, and the raw file data.
//!
//! | Offset (bytes) | Field            | Description                                              |
//! |----------------|------------------|----------------------------------------------------------|
//! | 0x0000         | Magic number     | 4 bytes: 0x55AA382D                                      |
//! | 0x0004         | Root node offset | 4 bytes: Always 32, the header's own length              |
//! | 0x0008         | Header size      | 4 bytes: 12 × node count + name table length             |
//! | 0x000C         | Data offset      | 4 bytes: 32 + header size                                |
//! | 0x0010         | Reserved         | 16 bytes: Zero on write, ignored on read                 |
//! | 0x0020         | Node records     | 12 bytes each, one per file or directory                 |
//! | ...            | Name table       | Null-terminated names, entry 0 is the empty root name    |
//! | data offset    | Data section     | Raw file contents, addressed absolutely from file start  |
//!
//! ### Node Records
//!
//! Nodes are stored in pre-order over the directory tree, the root first. Each record has the
//! following structure:
//!
//! | Offset (bytes) | Field       | Description                                                   |
//! |----------------|-------------|---------------------------------------------------------------|
//! | 0x0000         | Kind        | 1 byte: 0 = file, 1 = directory                               |
//! | 0x0001         | Name offset | 3 bytes: Big-endian offset of the name within the name table  |
//! | 0x0004         | Data offset | 4 bytes: File: absolute offset of its data; directory: unused |
//! | 0x0008         | Size        | 4 bytes: File: byte length; directory: boundary ordinal       |
//!
//! A directory's **boundary ordinal** is the 1-based position, counting the root as 1, of its
//! last transitive descendant in the flat node sequence. The root's boundary is therefore the
//! total node count. This is the only nesting information the format stores; decoding rebuilds
//! the tree from it with a stack of open directories (see [`read::load`]).
//!
//! ### Name Table
//!
//! Names are stored sequentially as null-terminated strings. The first entry is always a single
//! null byte, the empty name of the root. Readers locate a name purely by scanning forward from
//! its recorded offset to the next null byte; the table may be over-allocated by encoders that
//! align the data section, so its length carries no meaning.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.arc`
//! - **Endianness**: Big-endian for all multi-byte integers
//! - **Compression**: None; file contents are stored raw
//!

pub mod error;
pub mod read;
pub mod tree;
pub mod types;
pub mod write;

pub use read::load;
pub use tree::{ArcDir, ArcFile};
pub use write::{save, ArcWriterOptions, PaddingMethod};
