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

use super::{
    DateTime2822, Email, EmailList, Error, FileList, Priority, RawParagraph, Section, Selection,
    StandardsVersion, Uri, Urgency,
};
use crate::architecture::Architecture;
use crate::dependency::Dependency;
use crate::version::Version;

/// A single Debian-style control paragraph (`control`, a `Packages` stanza,
/// a `.changes` file, ...), with typed accessors for the fields every
/// binary package control file carries.
///
/// [ControlFile] is a thin, typed view over a [RawParagraph]: it does not
/// own a copy of the field values, it re-parses them on each access. For
/// the richer field file dialect with variables and `${}`/`$()`
/// substitution (used for build-time control templates), see
/// [crate::field::FieldFile] instead -- a plain on-disk `control` member of
/// a `.deb` never contains those.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlFile {
    raw: RawParagraph,
}

impl ControlFile {
    /// Parse one paragraph of control fields.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(ControlFile {
            raw: RawParagraph::parse(text)?,
        })
    }

    /// Wrap an already-parsed [RawParagraph].
    pub fn from_raw(raw: RawParagraph) -> Self {
        ControlFile { raw }
    }

    /// Borrow the underlying [RawParagraph].
    pub fn raw(&self) -> &RawParagraph {
        &self.raw
    }

    fn field(&self, name: &str) -> Result<&str, Error> {
        self.raw
            .field(name)
            .next()
            .map(|f| f.value.as_str())
            .ok_or_else(|| Error::Missing(name.to_string()))
    }

    /// A field's raw, untyped value, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.raw.field(name).next().map(|f| f.value.as_str())
    }

    /// The `Package` field.
    pub fn package(&self) -> Result<&str, Error> {
        self.field("Package")
    }

    /// The `Version` field, parsed.
    pub fn version(&self) -> Result<Version, Error> {
        self.field("Version")?
            .parse()
            .map_err(|e: crate::version::Error| Error::InvalidValue(format!("{e:?}")))
    }

    /// The `Architecture` field, parsed.
    pub fn architecture(&self) -> Result<Architecture, Error> {
        self.field("Architecture")?
            .parse()
            .map_err(|e: crate::architecture::Error| Error::InvalidValue(format!("{e:?}")))
    }

    /// The `Priority` field, parsed, if present.
    pub fn priority(&self) -> Result<Option<Priority>, Error> {
        match self.raw.field("Priority").next() {
            Some(f) => f
                .value
                .parse()
                .map(Some)
                .map_err(|_| Error::InvalidValue(format!("bad Priority {:?}", f.value))),
            None => Ok(None),
        }
    }

    /// The `Maintainer` field, parsed as a single RFC822 mailbox.
    pub fn maintainer(&self) -> Result<Email, Error> {
        self.field("Maintainer")?
            .parse()
            .map_err(|e: super::EmailParseError| Error::InvalidValue(format!("{e:?}")))
    }

    /// The `Uploaders` field, parsed as a comma-separated mailbox list, if
    /// present.
    pub fn uploaders(&self) -> Result<Option<EmailList>, Error> {
        self.optional_field("Uploaders", |v| {
            v.parse()
                .map_err(|e: super::EmailParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Changed-By` field, parsed as a single RFC822 mailbox, if
    /// present.
    pub fn changed_by(&self) -> Result<Option<Email>, Error> {
        self.optional_field("Changed-By", |v| {
            v.parse()
                .map_err(|e: super::EmailParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Section` field, parsed, if present.
    pub fn section(&self) -> Result<Option<Section>, Error> {
        self.optional_field("Section", |v| {
            v.parse()
                .map_err(|e: super::SectionParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Urgency` field, parsed, if present.
    pub fn urgency(&self) -> Result<Option<Urgency>, Error> {
        self.optional_field("Urgency", |v| {
            v.parse()
                .map_err(|e: super::UrgencyParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `X-Selection` field, parsed, if present.
    pub fn x_selection(&self) -> Result<Option<Selection>, Error> {
        self.optional_field("X-Selection", |v| {
            v.parse()
                .map_err(|e: super::SelectionParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Date` field, as an unparsed RFC822 date, if present.
    pub fn date(&self) -> Option<DateTime2822> {
        self.get("Date").map(|v| DateTime2822(v.to_string()))
    }

    /// The `Changes-Date` field, as an unparsed RFC822 date, if present.
    pub fn changes_date(&self) -> Option<DateTime2822> {
        self.get("Changes-Date")
            .map(|v| DateTime2822(v.to_string()))
    }

    /// The `Homepage` field, parsed as a URI, if present.
    pub fn homepage(&self) -> Result<Option<Uri>, Error> {
        self.optional_field("Homepage", |v| {
            v.parse()
                .map_err(|e: super::UriParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Bugs` field, parsed as a URI, if present.
    pub fn bugs(&self) -> Result<Option<Uri>, Error> {
        self.optional_field("Bugs", |v| {
            v.parse()
                .map_err(|e: super::UriParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Vcs-Browser` field, parsed as a URI, if present.
    pub fn vcs_browser(&self) -> Result<Option<Uri>, Error> {
        self.optional_field("Vcs-Browser", |v| {
            v.parse()
                .map_err(|e: super::UriParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Standards-Version` field, parsed, if present.
    pub fn standards_version(&self) -> Result<Option<StandardsVersion>, Error> {
        self.optional_field("Standards-Version", |v| {
            v.parse()
                .map_err(|e: super::StandardsVersionParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Minimum-Upgradable-Version` field, parsed, if present.
    pub fn minimum_upgradable_version(&self) -> Result<Option<Version>, Error> {
        self.optional_field("Minimum-Upgradable-Version", |v| {
            v.parse()
                .map_err(|e: crate::version::Error| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Packager-Version` field, parsed, if present.
    pub fn packager_version(&self) -> Result<Option<Version>, Error> {
        self.optional_field("Packager-Version", |v| {
            v.parse()
                .map_err(|e: crate::version::Error| Error::InvalidValue(format!("{e:?}")))
        })
    }

    /// The `Files` field, parsed with its format auto-detected, if present.
    pub fn files(&self) -> Result<Option<FileList>, Error> {
        self.file_list_field("Files")
    }

    /// The `ConfFiles` field, parsed, if present.
    pub fn conffiles(&self) -> Result<Option<FileList>, Error> {
        self.file_list_field("ConfFiles")
    }

    /// The `Checksums-Sha1` field, parsed, if present.
    pub fn checksums_sha1(&self) -> Result<Option<FileList>, Error> {
        self.file_list_field("Checksums-Sha1")
    }

    /// The `Checksums-Sha256` field, parsed, if present.
    pub fn checksums_sha256(&self) -> Result<Option<FileList>, Error> {
        self.file_list_field("Checksums-Sha256")
    }

    fn file_list_field(&self, name: &str) -> Result<Option<FileList>, Error> {
        self.optional_field(name, |v| {
            FileList::parse(name, v)
                .map_err(|e: super::FileListParseError| Error::InvalidValue(format!("{e:?}")))
        })
    }

    fn optional_field<T>(
        &self,
        name: &str,
        parse: impl FnOnce(&str) -> Result<T, Error>,
    ) -> Result<Option<T>, Error> {
        match self.get(name) {
            Some(value) => parse(value).map(Some),
            None => Ok(None),
        }
    }

    fn dependency_field(&self, name: &str) -> Result<Option<Dependency>, Error> {
        match self.raw.field(name).next() {
            Some(f) => f
                .value
                .parse()
                .map(Some)
                .map_err(|e: crate::dependency::Error| Error::InvalidValue(format!("{e:?}"))),
            None => Ok(None),
        }
    }

    /// The `Depends` field, parsed, if present.
    pub fn depends(&self) -> Result<Option<Dependency>, Error> {
        self.dependency_field("Depends")
    }

    /// The `Pre-Depends` field, parsed, if present.
    pub fn pre_depends(&self) -> Result<Option<Dependency>, Error> {
        self.dependency_field("Pre-Depends")
    }

    /// The `Breaks` field, parsed, if present.
    pub fn breaks(&self) -> Result<Option<Dependency>, Error> {
        self.dependency_field("Breaks")
    }

    /// The `Conflicts` field, parsed, if present.
    pub fn conflicts(&self) -> Result<Option<Dependency>, Error> {
        self.dependency_field("Conflicts")
    }

    /// The `Recommends` field, parsed, if present.
    pub fn recommends(&self) -> Result<Option<Dependency>, Error> {
        self.dependency_field("Recommends")
    }

    /// The `Suggests` field, parsed, if present.
    pub fn suggests(&self) -> Result<Option<Dependency>, Error> {
        self.dependency_field("Suggests")
    }

    /// The `Enhances` field, parsed, if present.
    pub fn enhances(&self) -> Result<Option<Dependency>, Error> {
        self.dependency_field("Enhances")
    }

    /// The `Replaces` field, parsed, if present.
    pub fn replaces(&self) -> Result<Option<Dependency>, Error> {
        self.dependency_field("Replaces")
    }

    /// The `Provides` field, as a list of package names, if present.
    pub fn provides(&self) -> Vec<String> {
        match self.get("Provides") {
            Some(value) => value.split(',').map(|s| s.trim().to_string()).collect(),
            None => Vec::new(),
        }
    }

    /// Run every field through `validate_fields`-style checking by
    /// evaluating `expr` against this control file's fields via
    /// [crate::expr].
    pub fn validate_fields(&self, expr: &str) -> Result<bool, Error> {
        struct FieldContext<'a>(&'a ControlFile);
        impl crate::expr::Context for FieldContext<'_> {
            fn architecture(&self) -> String {
                std::env::consts::ARCH.to_string()
            }
            fn os(&self) -> String {
                std::env::consts::OS.to_string()
            }
            fn processor(&self) -> String {
                std::env::consts::ARCH.to_string()
            }
            fn vendor(&self) -> String {
                "unknown".to_string()
            }
            fn wpkgversion(&self) -> String {
                env!("CARGO_PKG_VERSION").to_string()
            }
            fn getfield(&self, name: &str) -> Option<String> {
                self.0.get(name).map(str::to_string)
            }
        }

        let value = crate::expr::evaluate(expr, &FieldContext(self))
            .map_err(|e| Error::InvalidValue(e.to_string()))?;
        Ok(value.as_i64() == Some(1))
    }

    /// Parse and validate every recognized field that is present, once,
    /// after the whole paragraph has been read -- rather than the lazy,
    /// parse-on-first-access behavior of the typed accessors above.
    ///
    /// Unlike those accessors, which stop at the first error, `verify`
    /// collects every field's failure so a single bad upload reports all
    /// of its problems at once instead of one at a time across repeated
    /// runs.
    pub fn verify(&self) -> Result<(), VerifyErrors> {
        let mut errors = Vec::new();

        macro_rules! collect {
            ($result:expr) => {
                if let Err(e) = $result {
                    errors.push(e);
                }
            };
        }

        if self.get("Package").is_some() {
            collect!(self.package().map(|_| ()));
        }
        if self.get("Version").is_some() {
            collect!(self.version().map(|_| ()));
        }
        if self.get("Architecture").is_some() {
            collect!(self.architecture().map(|_| ()));
        }
        collect!(self.priority().map(|_| ()));
        if self.get("Maintainer").is_some() {
            collect!(self.maintainer().map(|_| ()));
        }
        collect!(self.uploaders().map(|_| ()));
        collect!(self.changed_by().map(|_| ()));
        collect!(self.section().map(|_| ()));
        collect!(self.urgency().map(|_| ()));
        collect!(self.x_selection().map(|_| ()));
        collect!(self.homepage().map(|_| ()));
        collect!(self.bugs().map(|_| ()));
        collect!(self.vcs_browser().map(|_| ()));
        collect!(self.standards_version().map(|_| ()));
        collect!(self.minimum_upgradable_version().map(|_| ()));
        collect!(self.packager_version().map(|_| ()));
        collect!(self.files().map(|_| ()));
        collect!(self.conffiles().map(|_| ()));
        collect!(self.checksums_sha1().map(|_| ()));
        collect!(self.checksums_sha256().map(|_| ()));

        for name in [
            "Depends",
            "Pre-Depends",
            "Breaks",
            "Conflicts",
            "Recommends",
            "Suggests",
            "Enhances",
            "Replaces",
        ] {
            collect!(self.dependency_field(name).map(|_| ()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(VerifyErrors(errors))
        }
    }
}

/// Every failure [ControlFile::verify] collected across the full
/// paragraph, in field order.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifyErrors(pub Vec<Error>);

impl VerifyErrors {
    /// How many fields failed to verify.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any field failed to verify. Always `false` in practice,
    /// since an empty [VerifyErrors] is never constructed -- [ControlFile::verify]
    /// returns `Ok(())` instead.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for VerifyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} field(s) failed to verify: ", self.0.len())?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for VerifyErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ControlFile {
        ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\nDepends: libc6 (>= 2.0)\nPriority: optional\n",
        )
        .unwrap()
    }

    #[test]
    fn reads_typed_fields() {
        let cf = sample();
        assert_eq!(cf.package().unwrap(), "example");
        assert_eq!(cf.version().unwrap().to_string(), "1.0-1");
        assert_eq!(cf.architecture().unwrap(), Architecture::Amd64);
        assert_eq!(cf.priority().unwrap(), Some(Priority::Optional));
    }

    #[test]
    fn parses_depends() {
        let cf = sample();
        let dep = cf.depends().unwrap().unwrap();
        assert_eq!(dep.relations.len(), 1);
    }

    #[test]
    fn maintainer_is_a_typed_email() {
        let cf = sample();
        let m = cf.maintainer().unwrap();
        assert_eq!(m.name.as_deref(), Some("A"));
        assert_eq!(m.address, "a@example.com");
    }

    #[test]
    fn parses_uploaders_and_changed_by() {
        let cf = ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\nUploaders: B <b@example.com>, C <c@example.com>\nChanged-By: D <d@example.com>\n",
        )
        .unwrap();
        let uploaders = cf.uploaders().unwrap().unwrap();
        assert_eq!(uploaders.len(), 2);
        assert_eq!(uploaders[1].address, "c@example.com");
        assert_eq!(cf.changed_by().unwrap().unwrap().address, "d@example.com");
    }

    #[test]
    fn uploaders_absent_is_none() {
        let cf = sample();
        assert_eq!(cf.uploaders().unwrap(), None);
        assert_eq!(cf.changed_by().unwrap(), None);
    }

    #[test]
    fn parses_section_with_area() {
        let cf = ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\nSection: non-free/python\n",
        )
        .unwrap();
        let section = cf.section().unwrap().unwrap();
        assert_eq!(section.area, Some(crate::control::Area::NonFree));
        assert_eq!(section.name, crate::control::SectionName::Python);
    }

    #[test]
    fn parses_urgency_and_x_selection() {
        let cf = ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\nUrgency: high (CVE-2024-0000)\nX-Selection: hold\n",
        )
        .unwrap();
        let urgency = cf.urgency().unwrap().unwrap();
        assert_eq!(urgency.level, crate::control::UrgencyLevel::High);
        assert_eq!(urgency.comment.as_deref(), Some("CVE-2024-0000"));
        assert_eq!(cf.x_selection().unwrap(), Some(Selection::Hold));
    }

    #[test]
    fn date_fields_are_unparsed_rfc822() {
        let cf = ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\nDate: Mon, 1 Jan 2024 00:00:00 +0000\n",
        )
        .unwrap();
        assert_eq!(&*cf.date().unwrap(), "Mon, 1 Jan 2024 00:00:00 +0000");
        assert_eq!(cf.changes_date(), None);
    }

    #[test]
    fn parses_uri_fields() {
        let cf = ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\nHomepage: https://example.com\nBugs: https://bugs.example.com\nVcs-Browser: https://vcs.example.com\n",
        )
        .unwrap();
        assert_eq!(&*cf.homepage().unwrap().unwrap(), "https://example.com");
        assert_eq!(&*cf.bugs().unwrap().unwrap(), "https://bugs.example.com");
        assert_eq!(&*cf.vcs_browser().unwrap().unwrap(), "https://vcs.example.com");
    }

    #[test]
    fn rejects_malformed_uri_field() {
        let cf = ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\nHomepage: not-a-uri\n",
        )
        .unwrap();
        assert!(cf.homepage().is_err());
    }

    #[test]
    fn parses_standards_and_upgrade_versions() {
        let cf = ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\nStandards-Version: 4.6.2\nMinimum-Upgradable-Version: 0.9-1\nPackager-Version: 1.0-1\n",
        )
        .unwrap();
        assert_eq!(
            cf.standards_version().unwrap().unwrap().components,
            vec![4, 6, 2]
        );
        assert_eq!(
            cf.minimum_upgradable_version().unwrap().unwrap().to_string(),
            "0.9-1"
        );
        assert_eq!(cf.packager_version().unwrap().unwrap().to_string(), "1.0-1");
    }

    #[test]
    fn parses_file_list_fields() {
        let cf = ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: A <a@example.com>\nFiles:\n 100644 1024 d41d8cd98f00b204e9800998ecf8427e /usr/bin/foo\nConfFiles:\n /etc/foo.conf d41d8cd98f00b204e9800998ecf8427e\nChecksums-Sha256:\n e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855 0 empty\n",
        )
        .unwrap();
        assert_eq!(cf.files().unwrap().unwrap().entries.len(), 1);
        assert_eq!(cf.conffiles().unwrap().unwrap().entries.len(), 1);
        assert_eq!(cf.checksums_sha256().unwrap().unwrap().entries.len(), 1);
        assert_eq!(cf.checksums_sha1().unwrap(), None);
    }

    #[test]
    fn verify_passes_on_a_well_formed_paragraph() {
        let cf = sample();
        assert!(cf.verify().is_ok());
    }

    #[test]
    fn verify_collects_every_bad_field() {
        let cf = ControlFile::parse(
            "Package: example\nVersion: 1.0-1\nArchitecture: amd64\nMaintainer: not-an-address\nSection: not-a-real-section\nUrgency: urgent\nHomepage: not-a-uri\n",
        )
        .unwrap();
        let err = cf.verify().unwrap_err();
        assert_eq!(err.len(), 4);
        assert!(!err.is_empty());
        assert!(err.to_string().starts_with("4 field(s) failed to verify: "));
    }

    #[test]
    fn missing_field_errors() {
        let cf = ControlFile::parse("Package: example\n").unwrap();
        assert!(matches!(cf.version(), Err(Error::Missing(_))));
    }

    #[test]
    fn validates_expression() {
        let cf = sample();
        assert!(cf.validate_fields("getfield(\"Package\") == \"example\"").unwrap());
    }
}

// vim: foldmethod=marker
