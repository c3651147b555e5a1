//! Decoding ARC archives
//!

use binrw::BinRead;
use std::io::Cursor;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::tree::{ArcDir, ArcFile};
use crate::types::{ArcHeader, ArcNode, NodeBody, ARC_MAGIC};

/// A directory still being filled while its subtree is consumed from the
/// node stream. `boundary` is the ordinal of its last descendant; once the
/// stream reaches it the directory closes and moves into its parent.
struct OpenDir {
    dir: ArcDir,
    boundary: u32,
}

/// Decode an ARC buffer into its directory tree
///
/// The nodes are stored pre-order, and a directory record carries only the
/// ordinal of its own last descendant. Nesting is rebuilt with a stack of
/// open directories: files attach to the top of the stack, directories push,
/// and every directory whose boundary equals the current ordinal pops into
/// its parent. Several nested directories can share one boundary, so the
/// close step loops.
///
/// File contents are copied out of `contents`; the returned tree owns all
/// of its data.
///
/// ```
/// # fn doit() -> wii_arc::error::Result<()>
/// # {
/// let buffer = std::fs::read("game.arc")?;
/// let root = wii_arc::read::load(&buffer)?;
///
/// for path in root.list_files() {
///     println!("{path}");
/// }
/// # Ok(())
/// # }
/// ```
#[instrument(skip(contents), err)]
pub fn load(contents: &[u8]) -> Result<ArcDir> {
    let magic = match contents.get(..4) {
        Some(raw) => u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]),
        None => return Err(Error::TruncatedArchive),
    };
    if magic != ARC_MAGIC {
        return Err(Error::InvalidMagic { found: magic });
    }

    // Header plus the mandatory root node.
    if contents.len() < 44 {
        return Err(Error::TruncatedArchive);
    }

    let mut cursor = Cursor::new(contents);
    let header = ArcHeader::read(&mut cursor)?;

    // The root node's boundary is the total node count, itself included.
    let root = ArcNode::read(&mut cursor)?;
    let node_count = match root.body() {
        Ok(NodeBody::Directory { boundary }) => boundary,
        _ => return Err(Error::InvalidRootNode),
    };

    debug!(node_count, data_offset = header.data_offset, "decoding ARC");

    // Each node is 12 bytes, so the name table sits right after the node
    // array and runs up to the data section. The encoder may have
    // over-allocated it for alignment; header.data_offset is authoritative
    // and names are only ever located by scanning to a null byte.
    let table_start = 32 + 12 * node_count as usize;
    let data_offset = header.data_offset as usize;
    if table_start > data_offset || data_offset > contents.len() {
        return Err(Error::TruncatedArchive);
    }
    let name_table = &contents[table_start..data_offset];

    let mut stack = vec![OpenDir {
        dir: ArcDir::default(),
        boundary: node_count,
    }];

    // 1-based ordinal of the node most recently consumed; the root is 1.
    let mut ordinal = 1u32;
    while ordinal < node_count {
        let node = ArcNode::read(&mut cursor)?;
        ordinal += 1;

        let name = read_name(name_table, node.name_offset)?;

        match node.body()? {
            NodeBody::File {
                data_offset,
                length,
            } => {
                let start = data_offset as usize;
                let end = start
                    .checked_add(length as usize)
                    .ok_or(Error::TruncatedArchive)?;
                let data = contents
                    .get(start..end)
                    .ok_or(Error::TruncatedArchive)?
                    .to_vec();

                let top = stack.last_mut().expect("stack always holds the root");
                top.dir.add_file(ArcFile::new(name, data));
            }
            NodeBody::Directory { boundary } => {
                // A subtree can neither end before its own record nor run
                // past the node stream.
                if boundary < ordinal || boundary > node_count {
                    return Err(Error::TruncatedArchive);
                }

                stack.push(OpenDir {
                    dir: ArcDir::new(name),
                    boundary,
                });
            }
        }

        // Close every directory whose subtree ends here. This must loop:
        // a directory whose last descendant is also the last descendant of
        // its parent closes together with it on the same ordinal.
        while stack.len() > 1 {
            let top = stack.last().expect("stack always holds the root");
            if top.boundary != ordinal {
                break;
            }

            let closed = stack.pop().expect("stack always holds the root");
            let parent = stack.last_mut().expect("stack always holds the root");
            parent.dir.add_dir(closed.dir);
        }
    }

    if stack.len() != 1 {
        // A directory claimed a boundary that was never reached.
        return Err(Error::TruncatedArchive);
    }

    Ok(stack.remove(0).dir)
}

/// Scan a null-terminated name out of the table, starting at `offset`.
fn read_name(table: &[u8], offset: u32) -> Result<String> {
    let tail = table
        .get(offset as usize..)
        .ok_or(Error::TruncatedArchive)?;
    let end = tail
        .iter()
        .position(|&byte| byte == 0)
        .ok_or(Error::TruncatedArchive)?;

    Ok(String::from_utf8_lossy(&tail[..end]).into_owned())
}
