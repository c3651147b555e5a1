//! Encoding directory trees into ARC archives
//!

use binrw::BinWrite;
use bon::Builder;
use std::io::Cursor;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::tree::{ArcDir, ArcFile};
use crate::types::{ArcHeader, ArcNode, NODE_FILE};

/// Placement of the data section relative to the name table
///
/// One historical encoder padded the name table so the data section started
/// on a 64-byte boundary; the console itself only ever trusts the header's
/// data offset. Padding is therefore an encoder policy, off by default for
/// deterministic minimal output.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PaddingMethod {
    /// Data section starts immediately after the name table
    #[default]
    None,

    /// Name table is zero-extended until the data offset is 64-byte aligned
    Align64,
}

/// Options for how the ARC file should be written
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct ArcWriterOptions {
    /// Padding between the name table and the data section
    #[builder(default)]
    pub padding: PaddingMethod,
}

/// Assists with serialization of the separate regions of an ARC.
///
/// Records, names and file data accumulate independently during the tree
/// walk; file data offsets are kept relative to the data blob until the
/// final layout is known.
#[derive(Default)]
struct ArcMuxer {
    records: Vec<ArcNode>,
    names: Vec<u8>,
    data: Vec<u8>,
}

impl ArcMuxer {
    /// Append a name to the name table, returning its offset.
    fn add_name(&mut self, name: &str) -> u32 {
        let offset = self.names.len() as u32;
        self.names.extend_from_slice(name.as_bytes());
        self.names.push(0);
        offset
    }

    /// Append file contents to the data blob, returning the relative offset.
    fn add_data(&mut self, contents: &[u8]) -> u32 {
        let offset = self.data.len() as u32;
        self.data.extend_from_slice(contents);
        offset
    }

    fn add_file(&mut self, file: &ArcFile) {
        let data_offset = self.add_data(&file.data);
        let name_offset = self.add_name(&file.name);

        self.records
            .push(ArcNode::file(name_offset, data_offset, file.data.len() as u32));
    }

    /// Emit a directory's record followed by the contiguous blocks of its
    /// subdirectories and finally its own files. The boundary ordinal is the
    /// count of records already emitted plus the subtree's own node count,
    /// which lands on the 1-based ordinal of the last descendant.
    fn add_dir(&mut self, dir: &ArcDir) {
        let name_offset = self.add_name(&dir.name);
        let boundary = self.records.len() as u32 + dir.recursive_count();
        self.records.push(ArcNode::directory(name_offset, boundary));

        for subdir in &dir.subdirs {
            self.add_dir(subdir);
        }

        for file in &dir.files {
            self.add_file(file);
        }
    }
}

/// Encode a directory tree into an ARC buffer
///
/// `root` becomes the archive's root directory. Its name is conventionally
/// empty, which produces the mandatory leading null byte of the name table.
///
/// ```
/// # fn doit() -> wii_arc::error::Result<()>
/// # {
/// use wii_arc::tree::ArcDir;
/// use wii_arc::write::{save, ArcWriterOptions};
///
/// let mut root = ArcDir::default();
/// root.write_file("banner.bin", vec![0x42; 16])?;
///
/// let buffer = save(&root, ArcWriterOptions::builder().build())?;
/// # assert!(!buffer.is_empty());
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[instrument(skip(root), err)]
pub fn save(root: &ArcDir, options: ArcWriterOptions) -> Result<Vec<u8>> {
    let mut muxer = ArcMuxer::default();
    muxer.add_dir(root);

    if options.padding == PaddingMethod::Align64 {
        let data_start = 32 + 12 * muxer.records.len() + muxer.names.len();
        let overhang = data_start % 64;
        if overhang != 0 {
            // Pad inside the name table so the header arithmetic still
            // holds; readers skip unused table bytes anyway.
            muxer.names.resize(muxer.names.len() + 64 - overhang, 0);
        }
    }

    let header_size = (12 * muxer.records.len() + muxer.names.len()) as u32;
    let data_offset = 32 + header_size;

    // Data offsets are absolute from the start of the archive, so they can
    // only be resolved now that the full header size is known.
    for record in &mut muxer.records {
        if record.kind == NODE_FILE {
            record.data_offset += data_offset;
        }
    }

    debug!(
        records = muxer.records.len(),
        data_offset, "encoding ARC"
    );

    let header = ArcHeader {
        header_size,
        data_offset,
        ..Default::default()
    };

    let mut cursor = Cursor::new(Vec::with_capacity(
        data_offset as usize + muxer.data.len(),
    ));
    header.write(&mut cursor)?;
    for record in &muxer.records {
        record.write(&mut cursor)?;
    }

    let mut contents = cursor.into_inner();
    contents.extend_from_slice(&muxer.names);
    contents.extend_from_slice(&muxer.data);

    Ok(contents)
}
