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

//! The `archive` module contains [MemoryFile], a typed in-memory byte
//! buffer that can read and write `ar`, `tar`, and (with the `zip` feature)
//! `zip` archives, a proprietary *wpkgar* index format, and the
//! `gz`/`bz2`/`xz`/`lzma` compression wrappers layered on top of them.
//!
//! A `.deb` is an `ar` archive of `tar` members, each of which may itself
//! be compressed; this module is the layer that both the package object
//! and the package database build on to read and write those bytes.

mod compression;
mod file_info;
mod memory_file;
mod wpkgar;

pub use compression::CompressionFormat;
pub use file_info::{FileInfo, FileType};
pub use memory_file::MemoryFile;
pub use wpkgar::{WpkgarEntry, WpkgarIndex};

/// The container format a [MemoryFile] holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArchiveFormat {
    /// An `ar` archive, as used for the outer container of a `.deb`.
    Ar,

    /// A POSIX ustar (or GNU long-name) `tar` archive.
    Tar,

    /// A `zip` archive (requires the `zip` feature).
    Zip,

    /// The proprietary `wpkgar` index format (see [WpkgarIndex]).
    Wpkgar,

    /// Uninterpreted bytes -- no directory structure.
    Plain,
}

/// Error conditions which may be encountered when reading or writing a
/// [MemoryFile].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The archive is structurally invalid: bad magic, a truncated member,
    /// a member name containing `/` in an `ar` archive, or a duplicate
    /// member name.
    InvalidArchive(String),

    /// The requested compression format is not supported in this build.
    Compatibility(String),

    /// A filesystem or archive I/O operation failed.
    Io(std::io::Error),
}
crate::errors::error_enum!(Error);

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

// vim: foldmethod=marker
