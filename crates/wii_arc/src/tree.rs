//! The in-memory directory tree stored inside an ARC file
//!

use tracing::trace;

use crate::error::{PathError, Result};

/// A file held within an ARC directory tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcFile {
    /// Name of this file. Must not be empty.
    pub name: String,

    /// Contents of this file
    pub data: Vec<u8>,
}

impl ArcFile {
    /// Create a file from a name and its contents
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// A directory held within an ARC directory tree
///
/// The tree owns all of its descendants outright. The root directory of an
/// archive always has an empty name; every other directory and file must be
/// named.
///
/// Paths passed to the lookup methods are `/`-separated chains of child
/// names relative to the receiver. The empty path names the receiver itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcDir {
    /// Name of this directory. Empty only for the root.
    pub name: String,

    /// Files directly within this directory, in archive order
    pub files: Vec<ArcFile>,

    /// Directories directly within this directory, in archive order
    pub subdirs: Vec<ArcDir>,
}

impl ArcDir {
    /// Create an empty directory with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append a file to this directory
    pub fn add_file(&mut self, file: ArcFile) {
        self.files.push(file);
    }

    /// Append a subdirectory to this directory
    pub fn add_dir(&mut self, dir: ArcDir) {
        self.subdirs.push(dir);
    }

    /// Look up a direct child file by name
    pub fn file(&self, name: &str) -> Option<&ArcFile> {
        self.files.iter().find(|file| file.name == name)
    }

    /// Look up a direct subdirectory by name
    pub fn dir(&self, name: &str) -> Option<&ArcDir> {
        self.subdirs.iter().find(|dir| dir.name == name)
    }

    fn dir_mut(&mut self, name: &str) -> Option<&mut ArcDir> {
        self.subdirs.iter_mut().find(|dir| dir.name == name)
    }

    /// Resolve a directory by path
    ///
    /// The empty path resolves to the receiver. Fails with
    /// [`PathError::InvalidPath`] if any component is empty and
    /// [`PathError::NotFound`] if a component does not exist.
    pub fn get_dir(&self, path: &str) -> Result<&ArcDir> {
        if path.is_empty() {
            return Ok(self);
        }

        let mut current = self;
        for component in path.split('/') {
            if component.is_empty() {
                return Err(PathError::InvalidPath(path.to_owned()).into());
            }

            trace!(current = %current.name, "descending into {component:?}");
            current = current
                .dir(component)
                .ok_or_else(|| PathError::NotFound(path.to_owned()))?;
        }

        Ok(current)
    }

    /// Resolve a directory by path, mutably
    pub fn get_dir_mut(&mut self, path: &str) -> Result<&mut ArcDir> {
        if path.is_empty() {
            return Ok(self);
        }

        let mut current = self;
        for component in path.split('/') {
            if component.is_empty() {
                return Err(PathError::InvalidPath(path.to_owned()).into());
            }

            current = current
                .dir_mut(component)
                .ok_or_else(|| PathError::NotFound(path.to_owned()))?;
        }

        Ok(current)
    }

    /// Resolve a file by path
    ///
    /// The last component is the file name, everything before it a directory
    /// path. Fails with [`PathError::InvalidPath`] when the file name is
    /// empty.
    pub fn get_file(&self, path: &str) -> Result<&ArcFile> {
        let (parent, leaf) = split_leaf(path)?;

        self.get_dir(parent)?
            .file(leaf)
            .ok_or_else(|| PathError::NotFound(path.to_owned()).into())
    }

    /// Write a file at the given path
    ///
    /// Overwrites the data of an existing file in place, otherwise inserts a
    /// new file into the parent directory. The parent directory itself is
    /// never created implicitly and must already exist.
    pub fn write_file(&mut self, path: &str, data: Vec<u8>) -> Result<()> {
        let (parent, leaf) = split_leaf(path)?;
        let dir = self.get_dir_mut(parent)?;

        match dir.files.iter_mut().find(|file| file.name == leaf) {
            Some(existing) => existing.data = data,
            None => dir.add_file(ArcFile::new(leaf, data)),
        }

        Ok(())
    }

    /// Produce the paths of all files beneath this directory
    ///
    /// Directories themselves are not listed.
    pub fn list_files(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths("", &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        for file in &self.files {
            paths.push(format!("{prefix}{}", file.name));
        }

        for dir in &self.subdirs {
            dir.collect_paths(&format!("{prefix}{}/", dir.name), paths);
        }
    }

    /// Count this directory and every transitive descendant
    ///
    /// This is exactly the node count of the directory's subtree when
    /// serialized, which is what a directory record's boundary ordinal is
    /// derived from.
    pub fn recursive_count(&self) -> u32 {
        1 + self.files.len() as u32
            + self
                .subdirs
                .iter()
                .map(ArcDir::recursive_count)
                .sum::<u32>()
    }

    /// Count of direct children only
    pub fn immediate_size(&self) -> usize {
        self.files.len() + self.subdirs.len()
    }
}

fn split_leaf(path: &str) -> Result<(&str, &str)> {
    let (parent, leaf) = match path.rsplit_once('/') {
        Some(split) => split,
        None => ("", path),
    };

    if leaf.is_empty() {
        return Err(PathError::InvalidPath(path.to_owned()).into());
    }

    Ok((parent, leaf))
}
