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

use super::traits::FileEntry;
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;

/// The six line formats a `Files`/`ConfFiles`/`Checksums-Sha1`/
/// `Checksums-Sha256` field can take, named the way `wpkg` names them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileListFormat {
    /// `name`
    List,
    /// `mode name`
    ModeList,
    /// `name md5`
    ConfFiles,
    /// `hash size name`
    Hash,
    /// `mode size md5 name`
    LongList,
    /// `mode user/uid group/gid size|major,minor mtime name`
    Metadata,
}

impl FromStr for FileListFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "list" => FileListFormat::List,
            "modelist" => FileListFormat::ModeList,
            "conffiles" => FileListFormat::ConfFiles,
            "md5sum" | "sha1" | "sha256" => FileListFormat::Hash,
            "longlist" => FileListFormat::LongList,
            "metadata" => FileListFormat::Metadata,
            _ => return Err(()),
        })
    }
}

impl FileListFormat {
    /// The field name's implied format, if unambiguous on its own
    /// (`ConfFiles` and the two `Checksums-*` fields always use one
    /// format). Returns `None` for `Files`, whose format depends on the
    /// column count of its entries.
    fn from_field_name(field_name: &str) -> Option<FileListFormat> {
        match field_name {
            "ConfFiles" => Some(FileListFormat::ConfFiles),
            "Checksums-Sha1" | "Checksums-Sha256" => Some(FileListFormat::Hash),
            _ => None,
        }
    }

    fn from_column_count(columns: usize) -> Option<FileListFormat> {
        match columns {
            1 => Some(FileListFormat::List),
            2 => Some(FileListFormat::ModeList),
            4 => Some(FileListFormat::LongList),
            6 => Some(FileListFormat::Metadata),
            _ => None,
        }
    }
}

/// One entry of a parsed file-list field. Which variant appears depends on
/// the field's [FileListFormat].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileListEntry {
    /// `list`: just a path.
    List {
        /// Path of the file.
        name: String,
    },
    /// `modelist`: a file mode plus its path.
    ModeList {
        /// Octal file mode, as text.
        mode: String,
        /// Path of the file.
        name: String,
    },
    /// `conffiles`: a conffile's path and its pristine md5sum.
    ConfFiles {
        /// Path of the conffile.
        name: String,
        /// md5sum of the pristine (as-shipped) content.
        md5: String,
    },
    /// `md5sum|sha1|sha256`: a digest, a size, and a path.
    Hash {
        /// Hex-encoded digest.
        hash: String,
        /// File size in bytes.
        size: u64,
        /// Path of the file.
        name: String,
    },
    /// `longlist`: a file mode, size, md5sum, and path.
    LongList {
        /// Octal file mode, as text.
        mode: String,
        /// File size in bytes.
        size: u64,
        /// md5sum of the file's content.
        md5: String,
        /// Path of the file.
        name: String,
    },
    /// `metadata`: full ownership and timestamp metadata for a file.
    Metadata {
        /// Octal file mode, as text.
        mode: String,
        /// `user/uid`, verbatim.
        owner: String,
        /// `group/gid`, verbatim.
        group: String,
        /// File size in bytes, or `major,minor` for a device node.
        size_or_device: String,
        /// Modification time, as seconds-since-epoch text.
        mtime: String,
        /// Path of the file.
        name: String,
    },
}

/// Error returned when a file-list field fails to parse.
#[derive(Clone, Debug, PartialEq)]
pub enum FileListParseError {
    /// A line's column count doesn't match any known format, and the
    /// field name alone doesn't disambiguate it either.
    UnrecognizedFormat(String),
    /// A size or digest column wasn't the expected shape.
    MalformedColumn(String),
}
crate::errors::error_enum!(FileListParseError);

impl FileEntry for FileListEntry {
    type Error = Infallible;

    fn path(&self) -> Result<PathBuf, Infallible> {
        Ok(PathBuf::from(match self {
            FileListEntry::List { name } => name,
            FileListEntry::ModeList { name, .. } => name,
            FileListEntry::ConfFiles { name, .. } => name,
            FileListEntry::Hash { name, .. } => name,
            FileListEntry::LongList { name, .. } => name,
            FileListEntry::Metadata { name, .. } => name,
        }))
    }

    fn size(&self) -> Option<usize> {
        match self {
            FileListEntry::Hash { size, .. } | FileListEntry::LongList { size, .. } => {
                Some(*size as usize)
            }
            FileListEntry::Metadata { size_or_device, .. } => size_or_device.parse().ok(),
            _ => None,
        }
    }

    fn ascii_digest(&self) -> Option<String> {
        match self {
            FileListEntry::ConfFiles { md5, .. } => Some(md5.clone()),
            FileListEntry::Hash { hash, .. } => Some(hash.clone()),
            FileListEntry::LongList { md5, .. } => Some(md5.clone()),
            _ => None,
        }
    }
}

fn parse_entry(format: FileListFormat, columns: &[&str]) -> Result<FileListEntry, FileListParseError> {
    fn size(s: &str) -> Result<u64, FileListParseError> {
        s.parse()
            .map_err(|_| FileListParseError::MalformedColumn(s.to_string()))
    }

    Ok(match format {
        FileListFormat::List => FileListEntry::List {
            name: columns[0].to_string(),
        },
        FileListFormat::ModeList => FileListEntry::ModeList {
            mode: columns[0].to_string(),
            name: columns[1].to_string(),
        },
        FileListFormat::ConfFiles => FileListEntry::ConfFiles {
            name: columns[0].to_string(),
            md5: columns[1].to_string(),
        },
        FileListFormat::Hash => FileListEntry::Hash {
            hash: columns[0].to_string(),
            size: size(columns[1])?,
            name: columns[2].to_string(),
        },
        FileListFormat::LongList => FileListEntry::LongList {
            mode: columns[0].to_string(),
            size: size(columns[1])?,
            md5: columns[2].to_string(),
            name: columns[3].to_string(),
        },
        FileListFormat::Metadata => FileListEntry::Metadata {
            mode: columns[0].to_string(),
            owner: columns[1].to_string(),
            group: columns[2].to_string(),
            size_or_device: columns[3].to_string(),
            mtime: columns[4].to_string(),
            name: columns[5].to_string(),
        },
    })
}

/// A fully parsed `Files`/`ConfFiles`/`Checksums-Sha1`/`Checksums-Sha256`
/// field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileList {
    /// The format every entry in [FileList::entries] was parsed with.
    pub format: FileListFormat,
    /// One entry per non-empty line.
    pub entries: Vec<FileListEntry>,
}

impl FileList {
    /// Parse a field's raw multi-line value as a file list.
    ///
    /// `field_name` disambiguates `ConfFiles`/`Checksums-Sha1`/
    /// `Checksums-Sha256` (each a fixed format) from `Files` (format
    /// inferred from column count). A first line that is itself one of
    /// the format names (`list`, `modelist`, `conffiles`, `md5sum`,
    /// `sha1`, `sha256`, `longlist`, `metadata`) overrides both and is
    /// consumed rather than treated as data.
    pub fn parse(field_name: &str, raw: &str) -> Result<FileList, FileListParseError> {
        let mut lines = raw.lines().filter(|l| !l.trim().is_empty()).peekable();

        let mut forced_format = None;
        if let Some(&first) = lines.peek() {
            if let Ok(fmt) = first.trim().parse::<FileListFormat>() {
                forced_format = Some(fmt);
                lines.next();
            }
        }

        let lines: Vec<&str> = lines.collect();
        let format = match forced_format.or_else(|| FileListFormat::from_field_name(field_name)) {
            Some(fmt) => fmt,
            None => {
                let columns = lines.first().map(|l| l.split_whitespace().count()).unwrap_or(1);
                FileListFormat::from_column_count(columns)
                    .ok_or_else(|| FileListParseError::UnrecognizedFormat(field_name.to_string()))?
            }
        };

        let entries = lines
            .iter()
            .map(|line| {
                let columns: Vec<&str> = line.split_whitespace().collect();
                if columns.len() != expected_columns(format) {
                    return Err(FileListParseError::UnrecognizedFormat(line.to_string()));
                }
                parse_entry(format, &columns)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FileList { format, entries })
    }
}

fn expected_columns(format: FileListFormat) -> usize {
    match format {
        FileListFormat::List => 1,
        FileListFormat::ModeList => 2,
        FileListFormat::ConfFiles => 2,
        FileListFormat::Hash => 3,
        FileListFormat::LongList => 4,
        FileListFormat::Metadata => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_conffiles_by_field_name() {
        let list = FileList::parse(
            "ConfFiles",
            "/etc/foo.conf d41d8cd98f00b204e9800998ecf8427e\n",
        )
        .unwrap();
        assert_eq!(list.format, FileListFormat::ConfFiles);
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].path().unwrap(), PathBuf::from("/etc/foo.conf"));
    }

    #[test]
    fn detects_hash_list_by_field_name() {
        let list = FileList::parse(
            "Checksums-Sha256",
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855 0 empty\n",
        )
        .unwrap();
        assert_eq!(list.format, FileListFormat::Hash);
        assert_eq!(list.entries[0].size(), Some(0));
    }

    #[test]
    fn detects_files_format_by_column_count() {
        let list = FileList::parse(
            "Files",
            "100644 1024 d41d8cd98f00b204e9800998ecf8427e /usr/bin/foo\n",
        )
        .unwrap();
        assert_eq!(list.format, FileListFormat::LongList);
        assert_eq!(list.entries[0].size(), Some(1024));
        assert_eq!(
            list.entries[0].ascii_digest().as_deref(),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
    }

    #[test]
    fn leading_format_token_overrides_detection() {
        let list = FileList::parse("Files", "list\n/usr/bin/foo\n/usr/bin/bar\n").unwrap();
        assert_eq!(list.format, FileListFormat::List);
        assert_eq!(list.entries.len(), 2);
    }

    #[test]
    fn rejects_mismatched_column_count() {
        assert!(FileList::parse("ConfFiles", "/etc/foo.conf\n").is_err());
    }
}

// vim: foldmethod=marker
