//! Base types for the on-disk structure of an ARC file.

use crate::error::{Error, Result};
use binrw::{BinRead, BinWrite};
use byteorder::{BigEndian, ByteOrder};

/// The magic constant every ARC file starts with
pub const ARC_MAGIC: u32 = 0x55AA382D;

/// Node kind tag for a file record
pub const NODE_FILE: u8 = 0;

/// Node kind tag for a directory record
pub const NODE_DIRECTORY: u8 = 1;

/// ARC file header
///
/// Defines the fixed 32-byte header of an ARC file. All data is stored in
/// big endian format. The final 16 bytes are reserved: zero on write,
/// ignored on read.
///
/// The magic is kept as an ordinary field rather than a codec-level magic so
/// a mismatch can be reported as [`Error::InvalidMagic`] with the offending
/// value instead of a generic parse failure.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(big)]
pub struct ArcHeader {
    /// The magic value [`ARC_MAGIC`]
    pub magic: u32,

    /// The offset from the start of the file to the root node - as the
    /// header is always 32 bytes in size, it is always 32
    pub root_node_offset: u32,

    /// The combined size of all node records and the name table
    pub header_size: u32,

    /// The offset from the start of the file to the data section,
    /// always `32 + header_size`
    #[brw(pad_after = 16)]
    pub data_offset: u32,
}

impl Default for ArcHeader {
    fn default() -> Self {
        Self {
            magic: ARC_MAGIC,
            root_node_offset: 32,
            header_size: Default::default(),
            data_offset: Default::default(),
        }
    }
}

/// ARC node record
///
/// Defines one 12-byte entry in the flat node array that follows the header.
/// The name offset occupies only 3 bytes on the wire; it is widened to a
/// `u32` here so only this type knows about the packing.
///
/// The last two fields change meaning with the kind tag - interpret them
/// through [`ArcNode::body`] rather than reading them directly.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(big)]
pub struct ArcNode {
    /// [`NODE_FILE`] or [`NODE_DIRECTORY`]
    pub kind: u8,

    /// The offset of this node's name within the name table,
    /// stored as a 24-bit big-endian integer
    #[br(map = |raw: [u8; 3]| BigEndian::read_u24(&raw))]
    #[bw(map = |offset: &u32| {
        let mut raw = [0u8; 3];
        BigEndian::write_u24(&mut raw, offset & 0x00FF_FFFF);
        raw
    })]
    pub name_offset: u32,

    /// For a file, the absolute offset of its data from the start of the
    /// archive; unused (zero) for a directory
    pub data_offset: u32,

    /// For a file, the byte length of its data; for a directory, the
    /// 1-based ordinal of its last transitive descendant
    pub size: u32,
}

/// The kind-dependent interpretation of a node record's last two fields
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeBody {
    /// A file's placement within the archive
    File {
        /// Absolute offset of the file's data from the start of the archive
        data_offset: u32,
        /// Byte length of the file's data
        length: u32,
    },

    /// A directory's subtree extent
    Directory {
        /// 1-based ordinal of the directory's last transitive descendant
        boundary: u32,
    },
}

impl ArcNode {
    /// Create a file record
    pub fn file(name_offset: u32, data_offset: u32, length: u32) -> Self {
        Self {
            kind: NODE_FILE,
            name_offset,
            data_offset,
            size: length,
        }
    }

    /// Create a directory record
    pub fn directory(name_offset: u32, boundary: u32) -> Self {
        Self {
            kind: NODE_DIRECTORY,
            name_offset,
            data_offset: 0,
            size: boundary,
        }
    }

    /// Interpret the dual-purpose fields according to the kind tag
    pub fn body(&self) -> Result<NodeBody> {
        match self.kind {
            NODE_FILE => Ok(NodeBody::File {
                data_offset: self.data_offset,
                length: self.size,
            }),
            NODE_DIRECTORY => Ok(NodeBody::Directory {
                boundary: self.size,
            }),
            kind => Err(Error::UnknownNodeKind(kind)),
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{ArcHeader, ArcNode, NodeBody};

    #[test]
    fn read_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x55, 0xAA, 0x38, 0x2D,
            0x00, 0x00, 0x00, 0x20,
            0x00, 0x00, 0x00, 0x0D,
            0x00, 0x00, 0x00, 0x2D,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ]);

        let expected = ArcHeader {
            header_size: 13,
            data_offset: 45,
            ..Default::default()
        };

        assert_eq!(ArcHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x55, 0xAA, 0x38, 0x2D,
            0x00, 0x00, 0x00, 0x20,
            0x00, 0x00, 0x00, 0x0D,
            0x00, 0x00, 0x00, 0x2D,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let header = ArcHeader {
            header_size: 13,
            data_offset: 45,
            ..Default::default()
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn read_file_record() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x00,
            0x00, 0x00, 0x08,
            0x00, 0x00, 0x00, 0x6B,
            0x00, 0x00, 0x00, 0x11,
        ]);

        let expected = ArcNode::file(8, 0x6B, 17);
        let actual = ArcNode::read(&mut input)?;

        assert_eq!(actual, expected);
        assert_eq!(
            actual.body()?,
            NodeBody::File {
                data_offset: 0x6B,
                length: 17
            }
        );

        Ok(())
    }

    #[test]
    fn read_directory_record() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x01,
            0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x03,
        ]);

        let expected = ArcNode::directory(1, 3);
        let actual = ArcNode::read(&mut input)?;

        assert_eq!(actual, expected);
        assert_eq!(actual.body()?, NodeBody::Directory { boundary: 3 });

        Ok(())
    }

    #[test]
    fn write_record_packs_name_offset_to_three_bytes() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x00,
            0x12, 0x34, 0x56,
            0x00, 0x00, 0x00, 0x6B,
            0x00, 0x00, 0x00, 0x11,
        ];

        let record = ArcNode::file(0x0012_3456, 0x6B, 17);

        let mut actual = Vec::new();
        record.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let record = ArcNode {
            kind: 2,
            ..Default::default()
        };

        assert!(matches!(record.body(), Err(Error::UnknownNodeKind(2))));
    }
}
