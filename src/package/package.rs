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

use super::Error;
use crate::archive::{ArchiveFormat, CompressionFormat, FileInfo, MemoryFile, WpkgarIndex};
use crate::control::ControlFile;
use crate::dependency::Candidate;
use std::collections::HashMap;
use std::path::Path;

const SUPPORTED_FORMAT: &str = "2.0\n";

/// One package's identity and contents: its control fields, its control-tar
/// members (`preinst`, `postinst`, `md5sums`, ...), and the file list it
/// installs, read either from a `.deb` archive or an admindir's per-package
/// directory.
///
/// A `.deb` is unpacked in full on read -- there is no lazy re-reading of
/// the backing archive -- so a [Package] owns everything it reports.
#[derive(Clone, Debug)]
pub struct Package {
    control: ControlFile,
    members: HashMap<String, Vec<u8>>,
    files: Vec<FileInfo>,
    package_path: Option<String>,
    data_tar: Vec<u8>,
}

impl Package {
    /// Read a `.deb` from disk.
    pub fn read_deb(path: &Path) -> Result<Self, Error> {
        let file = MemoryFile::read_file(path)?;
        let mut package = Self::from_deb_bytes(file.as_bytes().to_vec())?;
        package.package_path = Some(path.display().to_string());
        Ok(package)
    }

    /// Parse a `.deb`'s bytes: the outer `ar` archive of `debian-binary`,
    /// `control.tar*` and `data.tar*`.
    pub fn from_deb_bytes(data: Vec<u8>) -> Result<Self, Error> {
        let mut outer = MemoryFile::from_bytes(data, Some(ArchiveFormat::Ar));
        let mut members: Vec<(FileInfo, Vec<u8>)> = Vec::new();
        let mut info = FileInfo::default();
        let mut contents = Vec::new();
        while outer.dir_next(&mut info, Some(&mut contents))? {
            members.push((info.clone(), std::mem::take(&mut contents)));
        }

        let debian_binary = find_one(&members, "debian-binary")?;
        if debian_binary != SUPPORTED_FORMAT.as_bytes() {
            return Err(Error::UnsupportedFormat(
                String::from_utf8_lossy(debian_binary).trim().to_string(),
            ));
        }

        let control_tar = decompress_member(&members, "control.tar")?;
        let data_tar = decompress_member(&members, "data.tar")?;

        let control_members = unpack_tar(&control_tar)?;
        let control_text = control_members
            .get("control")
            .ok_or_else(|| Error::MissingMember("control".to_string()))?;
        control_members
            .get("md5sums")
            .ok_or_else(|| Error::MissingMember("md5sums".to_string()))?;
        let control = ControlFile::parse(&String::from_utf8_lossy(control_text))?;

        let mut data_tar_mem = MemoryFile::from_bytes(data_tar.clone(), Some(ArchiveFormat::Tar));
        let mut files = Vec::new();
        let mut info = FileInfo::default();
        while data_tar_mem.dir_next(&mut info, None)? {
            files.push(info.clone());
        }

        Ok(Package {
            control,
            members: control_members,
            files,
            package_path: None,
            data_tar,
        })
    }

    /// Read a package from its admindir directory: `control`,
    /// `index.wpkgar`, and (if present) `conffiles`.
    pub fn read_admindir(dir: &Path) -> Result<Self, Error> {
        let control_text = std::fs::read_to_string(dir.join("control"))?;
        let control = ControlFile::parse(&control_text)?;

        let mut members = HashMap::new();
        members.insert("control".to_string(), control_text.into_bytes());
        if let Ok(conffiles) = std::fs::read(dir.join("conffiles")) {
            members.insert("conffiles".to_string(), conffiles);
        }

        let files = match std::fs::read(dir.join("index.wpkgar")) {
            Ok(raw) => WpkgarIndex::decode(&raw)?
                .entries()
                .iter()
                .map(|e| e.info.clone())
                .collect(),
            Err(_) => Vec::new(),
        };

        Ok(Package {
            control,
            members,
            files,
            package_path: Some(dir.display().to_string()),
            data_tar: Vec::new(),
        })
    }

    /// The package's control fields.
    pub fn control_file(&self) -> &ControlFile {
        &self.control
    }

    /// The filesystem path this package was read from, if any.
    pub fn package_path(&self) -> Option<&str> {
        self.package_path.as_deref()
    }

    /// Every `data.tar` entry together with its content, for packages read
    /// via [Package::from_deb_bytes]/[Package::read_deb]. A package read
    /// from an admindir (whose files already live in the inst path) has no
    /// `data.tar` to re-walk.
    pub fn data_files(&self) -> Result<Vec<(FileInfo, Vec<u8>)>, Error> {
        if self.data_tar.is_empty() {
            return Err(Error::MissingMember("data.tar".to_string()));
        }
        let mut data_tar_mem = MemoryFile::from_bytes(self.data_tar.clone(), Some(ArchiveFormat::Tar));
        let mut out = Vec::new();
        let mut info = FileInfo::default();
        let mut contents = Vec::new();
        while data_tar_mem.dir_next(&mut info, Some(&mut contents))? {
            out.push((info.clone(), std::mem::take(&mut contents)));
        }
        Ok(out)
    }

    /// Every file this package installs, from `data.tar`'s directory.
    pub fn files(&self) -> &[FileInfo] {
        &self.files
    }

    /// True if a control-tar member (`preinst`, `md5sums`, `conffiles`, ...)
    /// is present.
    pub fn has_control_file(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Read a control-tar member, re-compressing it under `compress` if
    /// requested.
    pub fn read_control_file(
        &self,
        name: &str,
        compress: Option<CompressionFormat>,
    ) -> Result<Vec<u8>, Error> {
        let raw = self
            .members
            .get(name)
            .ok_or_else(|| Error::MissingMember(name.to_string()))?;
        match compress {
            Some(format) => Ok(format.compress(raw)?),
            None => Ok(raw.clone()),
        }
    }

    /// Evaluate `expr` against this package's control fields.
    pub fn validate_fields(&self, expr: &str) -> Result<bool, Error> {
        Ok(self.control.validate_fields(expr)?)
    }

    /// The paths listed in the `conffiles` control-tar member, if present.
    pub fn conffiles(&self) -> Vec<String> {
        match self.members.get("conffiles") {
            Some(raw) => String::from_utf8_lossy(raw)
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// True if `path` is listed as a conffile.
    pub fn is_conffile(&self, path: &str) -> bool {
        self.conffiles().iter().any(|c| c == path)
    }

    /// The `md5sums` control-tar member, parsed into a path -> hex digest
    /// map.
    pub fn md5sums(&self) -> HashMap<String, String> {
        match self.members.get("md5sums") {
            Some(raw) => String::from_utf8_lossy(raw)
                .lines()
                .filter_map(|line| {
                    let mut parts = line.splitn(2, char::is_whitespace);
                    let md5 = parts.next()?.trim();
                    let path = parts.next()?.trim();
                    if md5.is_empty() || path.is_empty() {
                        None
                    } else {
                        Some((format!("/{}", path.trim_start_matches('/')), md5.to_string()))
                    }
                })
                .collect(),
            None => HashMap::new(),
        }
    }

    /// Build a dependency [Candidate] describing this package, for use in
    /// dependency-closure resolution.
    pub fn candidate(&self) -> Result<Candidate, Error> {
        Ok(Candidate {
            name: self.control.package()?.to_string(),
            version: self.control.version()?,
            arch: self.control.architecture()?,
            provides: self.control.provides(),
        })
    }
}

fn find_one<'a>(members: &'a [(FileInfo, Vec<u8>)], name: &str) -> Result<&'a [u8], Error> {
    let mut found = None;
    for (info, data) in members {
        if info.name == name {
            if found.is_some() {
                return Err(Error::DuplicateMember(name.to_string()));
            }
            found = Some(data.as_slice());
        }
    }
    found.ok_or_else(|| Error::MissingMember(name.to_string()))
}

/// Find the single `{stem}[.ext]` member (e.g. `control.tar` or
/// `control.tar.gz`) and return its decompressed bytes.
fn decompress_member(members: &[(FileInfo, Vec<u8>)], stem: &str) -> Result<Vec<u8>, Error> {
    let mut found: Option<(&FileInfo, &[u8])> = None;
    for (info, data) in members {
        if info.name == stem || info.name.starts_with(&format!("{stem}.")) {
            if found.is_some() {
                return Err(Error::DuplicateMember(stem.to_string()));
            }
            found = Some((info, data.as_slice()));
        }
    }
    let (info, data) = found.ok_or_else(|| Error::MissingMember(stem.to_string()))?;
    match CompressionFormat::from_extension(&info.name) {
        Some(format) => Ok(format.decompress(data)?),
        None => Ok(data.to_vec()),
    }
}

/// Unpack a `tar` byte buffer into a name -> contents map, stripping the
/// tar-member's leading `./` the way `archive::MemoryFile::list_tar` does.
fn unpack_tar(data: &[u8]) -> Result<HashMap<String, Vec<u8>>, Error> {
    let mut tar = MemoryFile::from_bytes(data.to_vec(), Some(ArchiveFormat::Tar));
    let mut out = HashMap::new();
    let mut info = FileInfo::default();
    let mut contents = Vec::new();
    while tar.dir_next(&mut info, Some(&mut contents))? {
        if info.is_reg() {
            out.insert(info.name.clone(), std::mem::take(&mut contents));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::FileType;

    fn build_deb() -> Vec<u8> {
        let mut control_tar = MemoryFile::create(ArchiveFormat::Tar);
        control_tar
            .append_file(
                &FileInfo::regular("control", 0),
                b"Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\n",
            )
            .unwrap();
        control_tar
            .append_file(&FileInfo::regular("md5sums", 0), b"")
            .unwrap();
        control_tar
            .append_file(&FileInfo::regular("conffiles", 0), b"/etc/example.conf\n")
            .unwrap();

        let mut data_tar = MemoryFile::create(ArchiveFormat::Tar);
        data_tar
            .append_file(&FileInfo::regular("./etc/example.conf", 4), b"data")
            .unwrap();
        data_tar
            .append_file(
                &FileInfo {
                    name: "./etc".to_string(),
                    file_type: Some(FileType::Directory),
                    ..Default::default()
                },
                b"",
            )
            .unwrap();

        let mut outer = MemoryFile::create(ArchiveFormat::Ar);
        outer
            .append_file(&FileInfo::regular("debian-binary", 0), SUPPORTED_FORMAT.as_bytes())
            .unwrap();
        outer
            .append_file(
                &FileInfo::regular("control.tar", control_tar.size()),
                control_tar.as_bytes(),
            )
            .unwrap();
        outer
            .append_file(
                &FileInfo::regular("data.tar", data_tar.size()),
                data_tar.as_bytes(),
            )
            .unwrap();
        outer.as_bytes().to_vec()
    }

    #[test]
    fn reads_a_deb() {
        let package = Package::from_deb_bytes(build_deb()).unwrap();
        assert_eq!(package.control_file().package().unwrap(), "example");
        assert!(package.has_control_file("md5sums"));
        assert_eq!(package.conffiles(), vec!["/etc/example.conf".to_string()]);
        assert!(package.is_conffile("/etc/example.conf"));
        assert_eq!(package.files().len(), 2);
    }

    #[test]
    fn builds_a_candidate() {
        let package = Package::from_deb_bytes(build_deb()).unwrap();
        let candidate = package.candidate().unwrap();
        assert_eq!(candidate.name, "example");
    }

    #[test]
    fn rejects_missing_control_tar() {
        let mut outer = MemoryFile::create(ArchiveFormat::Ar);
        outer
            .append_file(&FileInfo::regular("debian-binary", 0), SUPPORTED_FORMAT.as_bytes())
            .unwrap();
        let err = Package::from_deb_bytes(outer.as_bytes().to_vec());
        assert!(matches!(err, Err(Error::MissingMember(_))));
    }

    #[test]
    fn rejects_unsupported_format_version() {
        let mut outer = MemoryFile::create(ArchiveFormat::Ar);
        outer
            .append_file(&FileInfo::regular("debian-binary", 0), b"3.0\n")
            .unwrap();
        let err = Package::from_deb_bytes(outer.as_bytes().to_vec());
        assert!(matches!(err, Err(Error::UnsupportedFormat(_))));
    }
}

// vim: foldmethod=marker
