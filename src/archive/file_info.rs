// {{{ Copyright (c) Paul R. Tagliamonte <paultag@debian.org>, 2024
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE. }}}

use super::CompressionFormat;

/// The kind of filesystem entry a [FileInfo] describes, mirroring the `tar`
/// entry types.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FileType {
    /// A regular file.
    Regular,
    /// A directory.
    Directory,
    /// A symbolic link.
    Symlink,
    /// A hard link to another member of the same archive.
    Hardlink,
    /// A character-special device node.
    CharacterSpecial,
    /// A block-special device node.
    BlockSpecial,
    /// A named pipe (FIFO).
    Fifo,
    /// A contiguous file (rare; treated like [FileType::Regular] on read).
    Continuous,
}

/// Metadata describing one entry of an archive, independent of the
/// underlying container format.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FileInfo {
    /// The entry's path within the archive.
    pub name: String,

    /// The kind of entry.
    pub file_type: Option<FileType>,

    /// POSIX permission and type bits.
    pub mode: u32,

    /// Numeric owning user id.
    pub uid: u32,

    /// Numeric owning group id.
    pub gid: u32,

    /// Owning user name, if recorded by the archive.
    pub user: Option<String>,

    /// Owning group name, if recorded by the archive.
    pub group: Option<String>,

    /// Size in bytes of the entry's content (`0` for directories).
    pub size: u64,

    /// Modification time, Unix seconds.
    pub mtime: i64,

    /// Device major number, for special files.
    pub dev_major: Option<u32>,

    /// Device minor number, for special files.
    pub dev_minor: Option<u32>,

    /// Symlink or hardlink target, if applicable.
    pub link_target: Option<String>,

    /// The compression format this member was originally stored under,
    /// before the codec transparently decompressed it, if any.
    pub original_compression: Option<CompressionFormat>,
}

impl Default for FileType {
    fn default() -> Self {
        FileType::Regular
    }
}

impl FileInfo {
    /// Build a minimal [FileInfo] for a regular file of the given name
    /// and size.
    pub fn regular(name: impl Into<String>, size: u64) -> Self {
        FileInfo {
            name: name.into(),
            file_type: Some(FileType::Regular),
            mode: 0o644,
            size,
            ..Default::default()
        }
    }

    /// True if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.file_type == Some(FileType::Directory)
    }

    /// True if this entry is a regular file.
    pub fn is_reg(&self) -> bool {
        matches!(
            self.file_type,
            Some(FileType::Regular) | Some(FileType::Continuous) | None
        )
    }
}

// vim: foldmethod=marker
