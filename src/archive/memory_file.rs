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

use super::{ArchiveFormat, CompressionFormat, Error, FileInfo, FileType};
use std::collections::HashSet;
use std::io::{Read, Write};

/// A typed in-memory byte buffer, the unit of currency this crate passes
/// around instead of bare file handles.
///
/// A [MemoryFile] is either raw bytes ([ArchiveFormat::Plain]) or one of
/// the supported archive formats; [MemoryFile::dir_next] exposes the
/// latter's members one at a time.
#[derive(Clone, Debug, Default)]
pub struct MemoryFile {
    data: Vec<u8>,
    format: Option<ArchiveFormat>,
    cursor: usize,
    dir_cursor: usize,
    package_path: Option<String>,
}

impl MemoryFile {
    /// Create an empty [MemoryFile] that will be built up as the given
    /// archive format.
    pub fn create(format: ArchiveFormat) -> Self {
        let data = match format {
            ArchiveFormat::Ar => {
                let mut buf = Vec::new();
                ar::Builder::new(&mut buf);
                buf
            }
            _ => Vec::new(),
        };
        MemoryFile {
            data,
            format: Some(format),
            cursor: 0,
            dir_cursor: 0,
            package_path: None,
        }
    }

    /// Read the full contents of `path` into a [MemoryFile], sniffing an
    /// archive format from content and falling back to [ArchiveFormat::Plain].
    pub fn read_file(path: &std::path::Path) -> Result<Self, Error> {
        let data = std::fs::read(path)?;
        let format = sniff_format(&data);
        Ok(MemoryFile {
            data,
            format,
            cursor: 0,
            dir_cursor: 0,
            package_path: path.to_str().map(str::to_string),
        })
    }

    /// Write the full contents of this [MemoryFile] to `path`.
    pub fn write_file(&self, path: &std::path::Path) -> Result<(), Error> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }

    /// Build a [MemoryFile] directly from a byte vector, with an explicit
    /// format tag (used when a member has already been read out of a
    /// parent archive).
    pub fn from_bytes(data: Vec<u8>, format: Option<ArchiveFormat>) -> Self {
        MemoryFile {
            data,
            format,
            cursor: 0,
            dir_cursor: 0,
            package_path: None,
        }
    }

    /// The recorded package path, if this [MemoryFile] was read from disk.
    pub fn package_path(&self) -> Option<&str> {
        self.package_path.as_deref()
    }

    /// The archive format, if any.
    pub fn format(&self) -> Option<ArchiveFormat> {
        self.format
    }

    /// True for any of the compression wrapper formats -- always false for
    /// a [MemoryFile], whose format is the *container* shape; compression
    /// is tracked per-member in [FileInfo::original_compression].
    pub fn is_compressed(&self) -> bool {
        false
    }

    /// Total size in bytes of the backing buffer.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read up to `n` bytes starting at `offset` into `buf`, returning the
    /// number of bytes read.
    pub fn read(&self, buf: &mut [u8], offset: u64, n: usize) -> Result<usize, Error> {
        let offset = offset as usize;
        if offset >= self.data.len() {
            return Ok(0);
        }
        let end = (offset + n).min(self.data.len());
        let count = end - offset;
        buf[..count].copy_from_slice(&self.data[offset..end]);
        Ok(count)
    }

    /// Write `buf` at `offset`, growing the backing buffer if needed.
    pub fn write(&mut self, buf: &[u8], offset: u64) -> Result<(), Error> {
        let offset = offset as usize;
        if self.data.len() < offset + buf.len() {
            self.data.resize(offset + buf.len(), 0);
        }
        self.data[offset..offset + buf.len()].copy_from_slice(buf);
        Ok(())
    }

    /// Read one line (without the trailing `\n`) starting at `*offset`,
    /// advancing it past the line. Returns `false` at end of buffer.
    pub fn read_line(&self, offset: &mut u64, line: &mut String) -> bool {
        let start = *offset as usize;
        if start >= self.data.len() {
            return false;
        }
        let rest = &self.data[start..];
        let nl = rest.iter().position(|&b| b == b'\n');
        let end = nl.map(|i| start + i).unwrap_or(self.data.len());
        line.clear();
        line.push_str(&String::from_utf8_lossy(&self.data[start..end]));
        *offset = (end + 1) as u64;
        true
    }

    /// Append formatted text, as a thin wrapper over [std::fmt::Write].
    pub fn printf(&mut self, args: std::fmt::Arguments<'_>) {
        use std::fmt::Write as _;
        let mut s = String::new();
        let _ = s.write_fmt(args);
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Compute the MD5 digest of the full buffer.
    pub fn raw_md5sum(&self) -> [u8; 16] {
        use md5::{Digest, Md5};
        let mut hasher = Md5::new();
        hasher.update(&self.data);
        hasher.finalize().into()
    }

    /// Copy the full contents of this [MemoryFile] into `out`.
    pub fn copy(&self, out: &mut Self) {
        out.data = self.data.clone();
        out.format = self.format;
    }

    /// Decompress this [MemoryFile] in place, given the wrapper it is
    /// presently compressed under. Returns the plain bytes.
    pub fn decompress(&self, wrapper: CompressionFormat) -> Result<Vec<u8>, Error> {
        wrapper.decompress(&self.data)
    }

    /// Compress `self`'s bytes under `wrapper`, returning a new buffer.
    pub fn compress(&self, wrapper: CompressionFormat) -> Result<Vec<u8>, Error> {
        wrapper.compress(&self.data)
    }

    /// Append one member to an `ar` or `tar` archive, or one entry to a
    /// `wpkgar` index.
    pub fn append_file(&mut self, info: &FileInfo, contents: &[u8]) -> Result<(), Error> {
        match self.format {
            Some(ArchiveFormat::Ar) => self.append_ar(info, contents),
            Some(ArchiveFormat::Tar) => self.append_tar(info, contents),
            Some(ArchiveFormat::Wpkgar) => self.append_wpkgar(info, contents),
            other => Err(Error::InvalidArchive(format!(
                "cannot append to format {other:?}"
            ))),
        }
    }

    fn append_ar(&mut self, info: &FileInfo, contents: &[u8]) -> Result<(), Error> {
        if info.name.contains('/') {
            return Err(Error::InvalidArchive(format!(
                "ar member name {:?} may not contain '/'",
                info.name
            )));
        }
        if self.iter_ar_names()?.contains(&info.name) {
            return Err(Error::InvalidArchive(format!(
                "duplicate ar member {:?}",
                info.name
            )));
        }
        let mut buf = Vec::new();
        {
            let mut builder = ar::Builder::new(&mut buf);
            if !self.data.is_empty() {
                let mut existing = ar::Archive::new(&self.data[..]);
                while let Some(entry) = existing.next_entry() {
                    let mut entry = entry.map_err(archive_err)?;
                    let header = entry.header().clone();
                    let mut data = Vec::new();
                    entry.read_to_end(&mut data)?;
                    builder.append(&header, &data[..])?;
                }
            }
            let mut header = ar::Header::new(info.name.clone().into_bytes(), contents.len() as u64);
            header.set_mode(info.mode);
            header.set_uid(info.uid);
            header.set_gid(info.gid);
            header.set_mtime(info.mtime.max(0) as u64);
            builder.append(&header, contents)?;
        }
        self.data = buf;
        Ok(())
    }

    fn append_tar(&mut self, info: &FileInfo, contents: &[u8]) -> Result<(), Error> {
        let mut buf = Vec::new();
        {
            let mut builder = tar::Builder::new(&mut buf);
            if !self.data.is_empty() {
                let mut existing = tar::Archive::new(&self.data[..]);
                for entry in existing.entries()? {
                    let mut entry = entry?;
                    let header = entry.header().clone();
                    let path = entry.path()?.into_owned();
                    builder.append_data(&mut header.clone(), &path, &mut entry)?;
                }
            }
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(info.mode);
            header.set_uid(info.uid as u64);
            header.set_gid(info.gid as u64);
            header.set_mtime(info.mtime.max(0) as u64);
            header.set_entry_type(to_tar_entry_type(info.file_type));
            header.set_cksum();
            builder.append_data(&mut header, &info.name, contents)?;
        }
        self.data = buf;
        Ok(())
    }

    fn append_wpkgar(&mut self, info: &FileInfo, contents: &[u8]) -> Result<(), Error> {
        let mut index = super::WpkgarIndex::decode(&self.data).unwrap_or_default();
        index.push(super::WpkgarEntry::from_file_info(info, contents));
        self.data = index.encode();
        Ok(())
    }

    fn iter_ar_names(&self) -> Result<HashSet<String>, Error> {
        let mut names = HashSet::new();
        if self.data.is_empty() {
            return Ok(names);
        }
        let mut archive = ar::Archive::new(&self.data[..]);
        while let Some(entry) = archive.next_entry() {
            let entry = entry.map_err(archive_err)?;
            names.insert(String::from_utf8_lossy(entry.header().identifier()).into_owned());
        }
        Ok(names)
    }

    /// Reset the directory cursor to the first member.
    pub fn dir_rewind(&mut self) {
        self.dir_cursor = 0;
    }

    /// Yield the next member, advancing the internal directory cursor.
    /// Returns `false` once every member has been visited.
    pub fn dir_next(
        &mut self,
        info: &mut FileInfo,
        data: Option<&mut Vec<u8>>,
    ) -> Result<bool, Error> {
        let entries = self.list_entries()?;
        if self.dir_cursor >= entries.len() {
            return Ok(false);
        }
        let (entry_info, contents) = entries[self.dir_cursor].clone();
        *info = entry_info;
        if let Some(data) = data {
            *data = contents;
        }
        self.dir_cursor += 1;
        Ok(true)
    }

    /// Materialize every (info, contents) pair for this archive's members.
    fn list_entries(&self) -> Result<Vec<(FileInfo, Vec<u8>)>, Error> {
        match self.format {
            Some(ArchiveFormat::Ar) => self.list_ar(),
            Some(ArchiveFormat::Tar) => self.list_tar(),
            Some(ArchiveFormat::Wpkgar) => self.list_wpkgar(),
            #[cfg(feature = "zip")]
            Some(ArchiveFormat::Zip) => self.list_zip(),
            #[cfg(not(feature = "zip"))]
            Some(ArchiveFormat::Zip) => Err(Error::Compatibility(
                "zip support requires the `zip` feature".into(),
            )),
            _ => Ok(Vec::new()),
        }
    }

    fn list_ar(&self) -> Result<Vec<(FileInfo, Vec<u8>)>, Error> {
        let mut out = Vec::new();
        let mut archive = ar::Archive::new(&self.data[..]);
        while let Some(entry) = archive.next_entry() {
            let mut entry = entry.map_err(archive_err)?;
            let header = entry.header();
            let name = String::from_utf8_lossy(header.identifier()).into_owned();
            if name.contains('/') {
                return Err(Error::InvalidArchive(format!(
                    "ar member name {name:?} contains '/'"
                )));
            }
            let info = FileInfo {
                name,
                file_type: Some(FileType::Regular),
                mode: header.mode(),
                uid: header.uid(),
                gid: header.gid(),
                size: header.size(),
                mtime: header.mtime() as i64,
                ..Default::default()
            };
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            out.push((info, contents));
        }
        Ok(out)
    }

    fn list_tar(&self) -> Result<Vec<(FileInfo, Vec<u8>)>, Error> {
        let mut out = Vec::new();
        let mut archive = tar::Archive::new(&self.data[..]);
        for entry in archive.entries()? {
            let mut entry = entry?;
            let header = entry.header();
            let mut name = entry.path()?.to_string_lossy().into_owned();
            if let Some(stripped) = name.strip_prefix("./") {
                name = stripped.to_string();
            }
            let info = FileInfo {
                name,
                file_type: Some(from_tar_entry_type(header.entry_type())),
                mode: header.mode().unwrap_or(0o644),
                uid: header.uid().unwrap_or(0) as u32,
                gid: header.gid().unwrap_or(0) as u32,
                size: header.size().unwrap_or(0),
                mtime: header.mtime().unwrap_or(0) as i64,
                link_target: entry
                    .link_name()
                    .ok()
                    .flatten()
                    .map(|p| p.to_string_lossy().into_owned()),
                ..Default::default()
            };
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            out.push((info, contents));
        }
        Ok(out)
    }

    fn list_wpkgar(&self) -> Result<Vec<(FileInfo, Vec<u8>)>, Error> {
        let index = super::WpkgarIndex::decode(&self.data)?;
        Ok(index
            .entries()
            .iter()
            .map(|e| (e.info.clone(), Vec::new()))
            .collect())
    }

    #[cfg(feature = "zip")]
    fn list_zip(&self) -> Result<Vec<(FileInfo, Vec<u8>)>, Error> {
        let reader = std::io::Cursor::new(&self.data);
        let mut archive =
            zip::ZipArchive::new(reader).map_err(|e| Error::InvalidArchive(e.to_string()))?;
        let mut out = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| Error::InvalidArchive(e.to_string()))?;
            let info = FileInfo {
                name: entry.name().to_string(),
                file_type: Some(if entry.is_dir() {
                    FileType::Directory
                } else {
                    FileType::Regular
                }),
                mode: entry.unix_mode().unwrap_or(0o644),
                size: entry.size(),
                ..Default::default()
            };
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            out.push((info, contents));
        }
        Ok(out)
    }
}

fn archive_err(err: std::io::Error) -> Error {
    Error::InvalidArchive(err.to_string())
}

fn sniff_format(data: &[u8]) -> Option<ArchiveFormat> {
    if data.starts_with(b"!<arch>\n") {
        Some(ArchiveFormat::Ar)
    } else if data.len() > 262 && &data[257..262] == b"ustar" {
        Some(ArchiveFormat::Tar)
    } else if data.starts_with(b"PK\x03\x04") {
        Some(ArchiveFormat::Zip)
    } else if data.starts_with(super::wpkgar::MAGIC) {
        Some(ArchiveFormat::Wpkgar)
    } else {
        None
    }
}

fn to_tar_entry_type(file_type: Option<FileType>) -> tar::EntryType {
    match file_type {
        Some(FileType::Directory) => tar::EntryType::Directory,
        Some(FileType::Symlink) => tar::EntryType::Symlink,
        Some(FileType::Hardlink) => tar::EntryType::Link,
        Some(FileType::CharacterSpecial) => tar::EntryType::Char,
        Some(FileType::BlockSpecial) => tar::EntryType::Block,
        Some(FileType::Fifo) => tar::EntryType::Fifo,
        Some(FileType::Continuous) => tar::EntryType::Continuous,
        _ => tar::EntryType::Regular,
    }
}

fn from_tar_entry_type(entry_type: tar::EntryType) -> FileType {
    match entry_type {
        tar::EntryType::Directory => FileType::Directory,
        tar::EntryType::Symlink => FileType::Symlink,
        tar::EntryType::Link => FileType::Hardlink,
        tar::EntryType::Char => FileType::CharacterSpecial,
        tar::EntryType::Block => FileType::BlockSpecial,
        tar::EntryType::Fifo => FileType::Fifo,
        tar::EntryType::Continuous => FileType::Continuous,
        _ => FileType::Regular,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ar_round_trips_one_member() {
        let mut mf = MemoryFile::create(ArchiveFormat::Ar);
        mf.append_file(&FileInfo::regular("debian-binary", 4), b"2.0\n")
            .unwrap();

        let mut info = FileInfo::default();
        let mut data = Vec::new();
        assert!(mf.dir_next(&mut info, Some(&mut data)).unwrap());
        assert_eq!(info.name, "debian-binary");
        assert_eq!(data, b"2.0\n");
        assert!(!mf.dir_next(&mut info, None).unwrap());
    }

    #[test]
    fn ar_rejects_duplicate_member() {
        let mut mf = MemoryFile::create(ArchiveFormat::Ar);
        mf.append_file(&FileInfo::regular("debian-binary", 4), b"2.0\n")
            .unwrap();
        assert!(mf
            .append_file(&FileInfo::regular("debian-binary", 4), b"2.0\n")
            .is_err());
    }

    #[test]
    fn ar_rejects_embedded_slash() {
        let mut mf = MemoryFile::create(ArchiveFormat::Ar);
        assert!(mf
            .append_file(&FileInfo::regular("a/b", 1), b"x")
            .is_err());
    }

    #[test]
    fn tar_round_trips_one_member() {
        let mut mf = MemoryFile::create(ArchiveFormat::Tar);
        mf.append_file(&FileInfo::regular("./control", 5), b"hello")
            .unwrap();

        mf.dir_rewind();
        let mut info = FileInfo::default();
        let mut data = Vec::new();
        assert!(mf.dir_next(&mut info, Some(&mut data)).unwrap());
        assert_eq!(info.name, "control");
        assert_eq!(data, b"hello");
    }

    #[test]
    fn read_write_at_offset() {
        let mut mf = MemoryFile::default();
        mf.write(b"hello world", 0).unwrap();
        let mut buf = [0u8; 5];
        let n = mf.read(&mut buf, 6, 5).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf, b"world");
    }

    #[test]
    fn read_line_splits_on_newline() {
        let mut mf = MemoryFile::default();
        mf.write(b"one\ntwo\nthree", 0).unwrap();
        let mut offset = 0;
        let mut line = String::new();
        assert!(mf.read_line(&mut offset, &mut line));
        assert_eq!(line, "one");
        assert!(mf.read_line(&mut offset, &mut line));
        assert_eq!(line, "two");
        assert!(mf.read_line(&mut offset, &mut line));
        assert_eq!(line, "three");
        assert!(!mf.read_line(&mut offset, &mut line));
    }
}

// vim: foldmethod=marker
