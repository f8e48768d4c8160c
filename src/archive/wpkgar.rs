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

//! The proprietary `index.wpkgar` format: a flat enumeration of the files
//! belonging to one installed package, their offsets into `data.tar`, and
//! (for regular files) an md5 digest, grounded on `wpkgar_package.cpp`'s
//! index handling.
//!
//! On the wire this is one line per entry, tab-separated, prefixed with a
//! magic header line. This is simpler than `wpkg`'s original packed binary
//! struct, but records the same fields.

use super::{CompressionFormat, Error, FileInfo, FileType};

pub(crate) const MAGIC: &[u8] = b"wpkgar1\n";

/// One entry of a [WpkgarIndex]: the [FileInfo] plus its offset into the
/// owning `data.tar` and, for regular files, an md5 digest.
#[derive(Clone, Debug, PartialEq)]
pub struct WpkgarEntry {
    /// The entry's metadata.
    pub info: FileInfo,

    /// Byte offset of this entry's content within the referenced
    /// `data.tar`.
    pub offset: u64,

    /// Hex-encoded md5 digest, present for regular files.
    pub md5: Option<String>,
}

impl WpkgarEntry {
    pub(crate) fn from_file_info(info: &FileInfo, contents: &[u8]) -> Self {
        let md5 = info.is_reg().then(|| {
            use md5::{Digest, Md5};
            let mut hasher = Md5::new();
            hasher.update(contents);
            encode_hex(&hasher.finalize())
        });
        WpkgarEntry {
            info: info.clone(),
            offset: 0,
            md5,
        }
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// A proprietary `wpkgar` index: an ordered list of [WpkgarEntry] records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WpkgarIndex {
    entries: Vec<WpkgarEntry>,
}

impl WpkgarIndex {
    /// Append one entry.
    pub fn push(&mut self, entry: WpkgarEntry) {
        self.entries.push(entry);
    }

    /// Borrow the entries in on-disk order.
    pub fn entries(&self) -> &[WpkgarEntry] {
        &self.entries
    }

    /// Encode this index to its on-disk byte representation.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        for entry in &self.entries {
            let file_type = type_tag(entry.info.file_type);
            let compression = entry
                .info
                .original_compression
                .map(|c| c.extension().to_string())
                .unwrap_or_else(|| "-".to_string());
            let md5 = entry.md5.as_deref().unwrap_or("-");
            let link = entry.info.link_target.as_deref().unwrap_or("-");
            out.extend_from_slice(
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                    entry.info.name,
                    file_type,
                    entry.info.mode,
                    entry.info.uid,
                    entry.info.gid,
                    entry.info.size,
                    entry.offset,
                    md5,
                    compression,
                )
                .as_bytes(),
            );
            let _ = link;
        }
        out
    }

    /// Decode a byte buffer previously produced by [WpkgarIndex::encode].
    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        if !data.starts_with(MAGIC) {
            return Err(Error::InvalidArchive(
                "wpkgar index is missing its magic header".into(),
            ));
        }
        let body = &data[MAGIC.len()..];
        let mut entries = Vec::new();
        for line in String::from_utf8_lossy(body).lines() {
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 9 {
                return Err(Error::InvalidArchive(format!(
                    "malformed wpkgar index line {line:?}"
                )));
            }
            let info = FileInfo {
                name: fields[0].to_string(),
                file_type: Some(parse_type_tag(fields[1])?),
                mode: fields[2]
                    .parse()
                    .map_err(|_| Error::InvalidArchive("bad mode field".into()))?,
                uid: fields[3]
                    .parse()
                    .map_err(|_| Error::InvalidArchive("bad uid field".into()))?,
                gid: fields[4]
                    .parse()
                    .map_err(|_| Error::InvalidArchive("bad gid field".into()))?,
                size: fields[5]
                    .parse()
                    .map_err(|_| Error::InvalidArchive("bad size field".into()))?,
                original_compression: match fields[8] {
                    "-" => None,
                    "gz" => Some(CompressionFormat::Gz),
                    "bz2" => Some(CompressionFormat::Bz2),
                    "xz" => Some(CompressionFormat::Xz),
                    "lzma" => Some(CompressionFormat::Lzma),
                    other => {
                        return Err(Error::InvalidArchive(format!(
                            "unknown compression tag {other:?}"
                        )))
                    }
                },
                ..Default::default()
            };
            let offset = fields[6]
                .parse()
                .map_err(|_| Error::InvalidArchive("bad offset field".into()))?;
            let md5 = match fields[7] {
                "-" => None,
                other => Some(other.to_string()),
            };
            entries.push(WpkgarEntry { info, offset, md5 });
        }
        Ok(WpkgarIndex { entries })
    }
}

fn type_tag(file_type: Option<FileType>) -> &'static str {
    match file_type {
        Some(FileType::Directory) => "d",
        Some(FileType::Symlink) => "l",
        Some(FileType::Hardlink) => "h",
        Some(FileType::CharacterSpecial) => "c",
        Some(FileType::BlockSpecial) => "b",
        Some(FileType::Fifo) => "p",
        Some(FileType::Continuous) => "C",
        _ => "-",
    }
}

fn parse_type_tag(tag: &str) -> Result<FileType, Error> {
    Ok(match tag {
        "d" => FileType::Directory,
        "l" => FileType::Symlink,
        "h" => FileType::Hardlink,
        "c" => FileType::CharacterSpecial,
        "b" => FileType::BlockSpecial,
        "p" => FileType::Fifo,
        "C" => FileType::Continuous,
        "-" => FileType::Regular,
        other => {
            return Err(Error::InvalidArchive(format!(
                "unknown wpkgar entry type {other:?}"
            )))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_one_entry() {
        let mut index = WpkgarIndex::default();
        index.push(WpkgarEntry::from_file_info(
            &FileInfo::regular("usr/bin/foo", 3),
            b"abc",
        ));
        let encoded = index.encode();
        let decoded = WpkgarIndex::decode(&encoded).unwrap();
        assert_eq!(decoded.entries().len(), 1);
        assert_eq!(decoded.entries()[0].info.name, "usr/bin/foo");
        assert!(decoded.entries()[0].md5.is_some());
    }

    #[test]
    fn rejects_missing_magic() {
        assert!(WpkgarIndex::decode(b"not an index").is_err());
    }
}

// vim: foldmethod=marker
