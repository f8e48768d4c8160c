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

use super::{Error, Lock, State};
use crate::archive::{ArchiveFormat, CompressionFormat, MemoryFile, WpkgarEntry, WpkgarIndex};
use crate::control::ControlFile;
use crate::dependency::{Candidate, Package as DependencyAtom};
use crate::package::Package;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const SCRIPTS: &[&str] = &["preinst", "postinst", "prerm", "postrm"];
const STATUS_FILE: &str = "wpkg-status";

/// The package database: root/admin/inst paths, the per-package admindir
/// layout, and the install/unpack/configure/remove/purge state machine,
/// grounded on `wpkgar_package`'s status handling and driven by
/// `spec.md` §4.8.
pub struct Database {
    root_path: PathBuf,
    inst_path: PathBuf,
    admindir: PathBuf,
    lock: Option<Lock>,
}

impl Database {
    /// Open a database rooted at `admindir`, with `root_path`/`inst_path`
    /// both defaulting to `/`.
    pub fn new(admindir: impl Into<PathBuf>) -> Self {
        Database {
            root_path: PathBuf::from("/"),
            inst_path: PathBuf::from("/"),
            admindir: admindir.into(),
            lock: None,
        }
    }

    /// Set the root path packages are considered relative to.
    pub fn set_root_path(&mut self, path: impl Into<PathBuf>) {
        self.root_path = path.into();
    }

    /// Set the path files are extracted under.
    pub fn set_inst_path(&mut self, path: impl Into<PathBuf>) {
        self.inst_path = path.into();
    }

    /// Set the admindir path.
    pub fn set_database_path(&mut self, path: impl Into<PathBuf>) {
        self.admindir = path.into();
    }

    /// The configured root path.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// The configured inst path.
    pub fn inst_path(&self) -> &Path {
        &self.inst_path
    }

    /// The configured admindir path.
    pub fn database_path(&self) -> &Path {
        &self.admindir
    }

    fn package_dir(&self, name: &str) -> PathBuf {
        self.admindir.join(name)
    }

    /// Acquire the admin lock for `op`. Fails with [Error::Locked] if
    /// another transaction already holds it.
    pub fn lock(&mut self, op: impl Into<String>) -> Result<(), Error> {
        self.lock = Some(Lock::acquire(&self.admindir, op)?);
        Ok(())
    }

    /// Release the admin lock, if held.
    pub fn unlock(&mut self) {
        self.lock = None;
    }

    /// Parse a `.deb` without registering it.
    pub fn load_package(&self, path: &Path) -> Result<Package, Error> {
        Ok(Package::read_deb(path)?)
    }

    /// Every package name with an admindir entry.
    pub fn list_installed_packages(&self) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        let entries = match std::fs::read_dir(&self.admindir) {
            Ok(entries) => entries,
            Err(_) => return Ok(names),
        };
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.package_dir(&name).join(STATUS_FILE).exists() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// The current [State] of a registered package.
    pub fn package_status(&self, name: &str) -> Result<State, Error> {
        let path = self.package_dir(name).join(STATUS_FILE);
        let text = std::fs::read_to_string(&path)
            .map_err(|_| Error::Missing(format!("no status for package {name:?}")))?;
        for line in text.lines() {
            if let Some(value) = line.strip_prefix("X-Status:") {
                return Ok(value.trim().parse()?);
            }
        }
        Err(Error::Missing(format!("no X-Status field for {name:?}")))
    }

    fn set_package_status(&self, name: &str, state: State) -> Result<(), Error> {
        let dir = self.package_dir(name);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join(STATUS_FILE), format!("X-Status: {state}\n"))?;
        Ok(())
    }

    fn read_control(&self, name: &str) -> Result<ControlFile, Error> {
        let text = std::fs::read_to_string(self.package_dir(name).join("control"))
            .map_err(|_| Error::Missing(format!("control for package {name:?}")))?;
        Ok(ControlFile::parse(&text)?)
    }

    /// A control field's raw value, if present.
    pub fn get_field(&self, name: &str, field: &str) -> Result<Option<String>, Error> {
        Ok(self.read_control(name)?.get(field).map(str::to_string))
    }

    /// True if `field` is present on `name`'s control file.
    pub fn field_is_defined(&self, name: &str, field: &str) -> Result<bool, Error> {
        Ok(self.get_field(name, field)?.is_some())
    }

    /// The short (first line) and long (remaining lines) halves of a
    /// package's `Description` field.
    pub fn get_description(&self, name: &str) -> Result<(String, String), Error> {
        let control = self.read_control(name)?;
        let description = control
            .get("Description")
            .ok_or_else(|| Error::Missing(format!("Description for {name:?}")))?;
        let mut lines = description.lines();
        let short = lines.next().unwrap_or("").to_string();
        let long = lines.collect::<Vec<_>>().join("\n");
        Ok((short, long))
    }

    /// The possibilities of every relation in `field` (`"Depends"`,
    /// `"Recommends"`, ...), flattened.
    pub fn get_dependencies(&self, name: &str, field: &str) -> Result<Vec<DependencyAtom>, Error> {
        let control = self.read_control(name)?;
        let Some(value) = control.get(field) else {
            return Ok(Vec::new());
        };
        let dependency: crate::dependency::Dependency = value.parse()?;
        Ok(dependency
            .relations
            .into_iter()
            .flat_map(|r| r.packages)
            .collect())
    }

    /// A control-tar member, re-applying `compress` if requested.
    pub fn get_control_file(
        &self,
        name: &str,
        data_filename: &str,
        compress: Option<CompressionFormat>,
    ) -> Result<MemoryFile, Error> {
        let path = self.package_dir(name).join(data_filename);
        let raw = std::fs::read(&path)
            .map_err(|_| Error::Missing(format!("{data_filename} for {name:?}")))?;
        let data = match compress {
            Some(format) => format.compress(&raw)?,
            None => raw,
        };
        Ok(MemoryFile::from_bytes(data, Some(ArchiveFormat::Plain)))
    }

    /// True if `path` is a conffile of the registered package `name`.
    pub fn is_conffile(&self, name: &str, path: &str) -> Result<bool, Error> {
        Ok(Package::read_admindir(&self.package_dir(name))?.is_conffile(path))
    }

    fn installed_candidates(&self) -> Result<Vec<Candidate>, Error> {
        let mut candidates = Vec::new();
        for name in self.list_installed_packages()? {
            if !matches!(self.package_status(&name)?, State::Installed) {
                continue;
            }
            candidates.push(Package::read_admindir(&self.package_dir(&name))?.candidate()?);
        }
        Ok(candidates)
    }

    fn run_script(&self, name: &str, script: &str, args: &[&str]) -> Result<(), Error> {
        let path = self.package_dir(name).join(script);
        if !path.exists() {
            return Ok(());
        }
        let status = std::process::Command::new(&path).args(args).status()?;
        if !status.success() {
            return Err(Error::ScriptFailed(format!("{script} {}", args.join(" "))));
        }
        Ok(())
    }

    /// Register a freshly parsed `.deb`'s control-tar members into its
    /// admindir directory so its maintainer scripts are runnable.
    fn stage_control_members(&self, package: &Package, name: &str) -> Result<(), Error> {
        let dir = self.package_dir(name);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("control"), package.read_control_file("control", None)?)?;
        std::fs::write(dir.join("md5sums"), package.read_control_file("md5sums", None)?)?;
        if package.has_control_file("conffiles") {
            std::fs::write(
                dir.join("conffiles"),
                package.read_control_file("conffiles", None)?,
            )?;
        }
        for script in SCRIPTS {
            if package.has_control_file(script) {
                let script_path = dir.join(script);
                std::fs::write(&script_path, package.read_control_file(script, None)?)?;
                set_executable(&script_path)?;
            }
        }
        Ok(())
    }

    /// Unpack a `.deb`: validate Depends/Conflicts/Breaks (not
    /// Pre-Depends), run `preinst`, extract `data.tar` honoring conffile
    /// policy, and mark the package `unpacked`.
    pub fn unpack(&mut self, deb_path: &Path) -> Result<(), Error> {
        let package = Package::read_deb(deb_path)?;
        let control = package.control_file();
        let name = control.package()?.to_string();

        self.lock("unpack")?;

        let installed = self.installed_candidates()?;
        if let Some(depends) = control.depends()? {
            if !depends.is_satisfied_by(&installed) {
                self.unlock();
                return Err(Error::UnsatisfiedDependency(format!(
                    "{name}: Depends not satisfied"
                )));
            }
        }
        if let Some(conflicts) = control.conflicts()? {
            for other in &installed {
                if conflicts.is_satisfied_by(std::slice::from_ref(other)) {
                    self.unlock();
                    return Err(Error::UnsatisfiedDependency(format!(
                        "{name}: Conflicts with installed package {}",
                        other.name
                    )));
                }
            }
        }

        let upgrading = self.package_status(&name).is_ok();
        let old_md5sums = if upgrading {
            Package::read_admindir(&self.package_dir(&name))
                .map(|p| p.md5sums())
                .unwrap_or_default()
        } else {
            HashMap::new()
        };

        self.stage_control_members(&package, &name)?;
        self.run_script(&name, "preinst", &[if upgrading { "upgrade" } else { "install" }])?;
        self.set_package_status(&name, State::HalfInstalled)?;

        let mut index = WpkgarIndex::default();
        for (info, contents) in package.data_files()? {
            let md5 = info.is_reg().then(|| hex_md5(&contents));
            index.push(WpkgarEntry {
                info: info.clone(),
                offset: 0,
                md5,
            });

            let target_name = info.name.strip_prefix("./").unwrap_or(&info.name);
            let target = self.inst_path.join(target_name.trim_start_matches('/'));
            if info.is_dir() {
                std::fs::create_dir_all(&target)?;
                continue;
            }
            let conffile_path = format!("/{}", target_name.trim_start_matches('/'));
            if package.is_conffile(&conffile_path) && target.exists() {
                let on_disk_md5 = hex_md5(&std::fs::read(&target)?);
                let matches_old = old_md5sums
                    .get(&conffile_path)
                    .is_some_and(|old| old == &on_disk_md5);
                if !matches_old {
                    let mut new_path = target.clone();
                    new_path.set_extension(match new_path.extension() {
                        Some(ext) => format!("{}.wpkg-new", ext.to_string_lossy()),
                        None => "wpkg-new".to_string(),
                    });
                    std::fs::write(&new_path, &contents)?;
                    continue;
                }
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, &contents)?;
        }

        std::fs::write(self.package_dir(&name).join("index.wpkgar"), index.encode())?;
        self.set_package_status(&name, State::Unpacked)?;
        self.unlock();
        Ok(())
    }

    /// Run `postinst configure` and mark the package `installed`, or
    /// `half-configured` if the script fails.
    pub fn configure(&mut self, name: &str) -> Result<(), Error> {
        self.lock("configure")?;
        let result = self.run_script(name, "postinst", &["configure"]);
        match result {
            Ok(()) => {
                self.set_package_status(name, State::Installed)?;
                self.unlock();
                Ok(())
            }
            Err(err) => {
                self.set_package_status(name, State::HalfConfigured)?;
                self.unlock();
                Err(err)
            }
        }
    }

    /// Run `prerm remove`, delete non-conffile files, run `postrm
    /// remove`, and mark the package `config-files`.
    pub fn remove(&mut self, name: &str) -> Result<(), Error> {
        self.lock("remove")?;
        self.set_package_status(name, State::Removing)?;
        self.run_script(name, "prerm", &["remove"])?;

        let package = Package::read_admindir(&self.package_dir(name))?;
        for file in package.files() {
            if file.is_dir() {
                continue;
            }
            let rel = file.name.trim_start_matches("./").trim_start_matches('/');
            let path = format!("/{rel}");
            if package.is_conffile(&path) {
                continue;
            }
            let target = self.inst_path.join(rel);
            let _ = std::fs::remove_file(target);
        }

        self.run_script(name, "postrm", &["remove"])?;
        self.set_package_status(name, State::ConfigFiles)?;
        self.unlock();
        Ok(())
    }

    /// Delete conffiles and the admindir subdirectory, and mark the
    /// package `not-installed`.
    pub fn purge(&mut self, name: &str) -> Result<(), Error> {
        self.lock("purge")?;
        self.set_package_status(name, State::Purging)?;

        let package = Package::read_admindir(&self.package_dir(name))?;
        for conffile in package.conffiles() {
            let target = self.inst_path.join(conffile.trim_start_matches('/'));
            let _ = std::fs::remove_file(target);
        }

        std::fs::remove_dir_all(self.package_dir(name))?;
        self.unlock();
        Ok(())
    }
}

fn hex_md5(data: &[u8]) -> String {
    use md5::{Digest, Md5};
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<(), Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{FileInfo, FileType};

    fn build_deb(name: &str, conffile: Option<&str>) -> Vec<u8> {
        let mut control_tar = MemoryFile::create(ArchiveFormat::Tar);
        control_tar
            .append_file(
                &FileInfo::regular("control", 0),
                format!(
                    "Package: {name}\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\n"
                )
                .as_bytes(),
            )
            .unwrap();
        control_tar
            .append_file(&FileInfo::regular("md5sums", 0), b"")
            .unwrap();
        if let Some(conffile) = conffile {
            control_tar
                .append_file(
                    &FileInfo::regular("conffiles", 0),
                    format!("{conffile}\n").as_bytes(),
                )
                .unwrap();
        }

        let mut data_tar = MemoryFile::create(ArchiveFormat::Tar);
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
        data_tar
            .append_file(&FileInfo::regular("./usr/bin/example", 4), b"data")
            .unwrap();
        if let Some(conffile) = conffile {
            data_tar
                .append_file(
                    &FileInfo::regular(format!(".{conffile}"), 6),
                    b"config",
                )
                .unwrap();
        }

        let mut outer = MemoryFile::create(ArchiveFormat::Ar);
        outer
            .append_file(&FileInfo::regular("debian-binary", 0), b"2.0\n")
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
    fn unpacks_and_configures() {
        let root = tempfile::tempdir().unwrap();
        let admindir = root.path().join("admindir");
        let inst = root.path().join("inst");
        std::fs::create_dir_all(&inst).unwrap();

        let deb_path = root.path().join("example.deb");
        std::fs::write(&deb_path, build_deb("example", None)).unwrap();

        let mut db = Database::new(&admindir);
        db.set_inst_path(&inst);

        db.unpack(&deb_path).unwrap();
        assert_eq!(db.package_status("example").unwrap(), State::Unpacked);
        assert!(inst.join("usr/bin/example").exists());

        db.configure("example").unwrap();
        assert_eq!(db.package_status("example").unwrap(), State::Installed);
        assert_eq!(db.list_installed_packages().unwrap(), vec!["example".to_string()]);
    }

    #[test]
    fn removes_and_purges() {
        let root = tempfile::tempdir().unwrap();
        let admindir = root.path().join("admindir");
        let inst = root.path().join("inst");
        std::fs::create_dir_all(&inst).unwrap();

        let deb_path = root.path().join("example.deb");
        std::fs::write(&deb_path, build_deb("example", Some("/etc/example.conf"))).unwrap();

        let mut db = Database::new(&admindir);
        db.set_inst_path(&inst);
        db.unpack(&deb_path).unwrap();
        db.configure("example").unwrap();

        db.remove("example").unwrap();
        assert_eq!(db.package_status("example").unwrap(), State::ConfigFiles);
        assert!(!inst.join("usr/bin/example").exists());
        assert!(inst.join("etc/example.conf").exists());

        db.purge("example").unwrap();
        assert!(db.package_status("example").is_err());
        assert!(!inst.join("etc/example.conf").exists());
    }

    #[test]
    fn second_unpack_is_blocked_while_locked() {
        let root = tempfile::tempdir().unwrap();
        let admindir = root.path().join("admindir");
        std::fs::create_dir_all(&admindir).unwrap();
        let mut db = Database::new(&admindir);
        db.lock("install").unwrap();
        let mut other = Database::new(&admindir);
        assert!(matches!(other.lock("remove"), Err(Error::Locked(op)) if op == "install"));
    }
}

// vim: foldmethod=marker
