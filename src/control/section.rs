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

use std::str::FromStr;

#[cfg(feature = "serde")]
use ::serde::{Deserialize, Serialize};

/// Archive area a [Section] belongs to. Absent from most `Section` values
/// (which implicitly live in `main`); only non-free and contrib packages
/// carry an explicit prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Area {
    /// The main archive area.
    Main,
    /// Packages that are free software but depend on non-free software.
    Contrib,
    /// Packages that are not DFSG-free.
    NonFree,
    /// Non-free firmware, split out of `non-free` as its own area.
    NonFreeFirmware,
}

/// Error returned when a string doesn't match a known [Area].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AreaParseError;
crate::errors::error_enum!(AreaParseError);

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Area::Main => "main",
            Area::Contrib => "contrib",
            Area::NonFree => "non-free",
            Area::NonFreeFirmware => "non-free-firmware",
        })
    }
}

impl FromStr for Area {
    type Err = AreaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "main" => Area::Main,
            "contrib" => Area::Contrib,
            "non-free" => Area::NonFree,
            "non-free-firmware" => Area::NonFreeFirmware,
            _ => return Err(AreaParseError),
        })
    }
}

/// Closed set of section names, as published in Debian's archive override
/// files. Unknown names are rejected rather than accepted as a catch-all,
/// since `Section` is meant to catch typos in a `control` file before the
/// package reaches the archive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[allow(missing_docs)]
pub enum SectionName {
    Admin,
    CliMono,
    Comm,
    Database,
    Debug,
    Devel,
    Doc,
    Editors,
    Education,
    Electronics,
    Embedded,
    Fonts,
    Games,
    Gnome,
    GnuR,
    Gnustep,
    Golang,
    Graphics,
    Hamradio,
    Haskell,
    Httpd,
    Interpreters,
    Introspection,
    Java,
    Javascript,
    Kde,
    Kernel,
    Libdevel,
    Libs,
    Lisp,
    Localization,
    Mail,
    Math,
    Metapackages,
    Misc,
    Net,
    News,
    Ocaml,
    Oldlibs,
    Otherosfs,
    Perl,
    Php,
    Python,
    Ruby,
    Rust,
    Science,
    Shells,
    Sound,
    Tex,
    Text,
    Utils,
    Vcs,
    Video,
    Web,
    X11,
    Xfce,
    Zope,
}

/// Error returned when a string doesn't match a known [SectionName].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SectionNameParseError;
crate::errors::error_enum!(SectionNameParseError);

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SectionName::Admin => "admin",
            SectionName::CliMono => "cli-mono",
            SectionName::Comm => "comm",
            SectionName::Database => "database",
            SectionName::Debug => "debug",
            SectionName::Devel => "devel",
            SectionName::Doc => "doc",
            SectionName::Editors => "editors",
            SectionName::Education => "education",
            SectionName::Electronics => "electronics",
            SectionName::Embedded => "embedded",
            SectionName::Fonts => "fonts",
            SectionName::Games => "games",
            SectionName::Gnome => "gnome",
            SectionName::GnuR => "gnu-r",
            SectionName::Gnustep => "gnustep",
            SectionName::Golang => "golang",
            SectionName::Graphics => "graphics",
            SectionName::Hamradio => "hamradio",
            SectionName::Haskell => "haskell",
            SectionName::Httpd => "httpd",
            SectionName::Interpreters => "interpreters",
            SectionName::Introspection => "introspection",
            SectionName::Java => "java",
            SectionName::Javascript => "javascript",
            SectionName::Kde => "kde",
            SectionName::Kernel => "kernel",
            SectionName::Libdevel => "libdevel",
            SectionName::Libs => "libs",
            SectionName::Lisp => "lisp",
            SectionName::Localization => "localization",
            SectionName::Mail => "mail",
            SectionName::Math => "math",
            SectionName::Metapackages => "metapackages",
            SectionName::Misc => "misc",
            SectionName::Net => "net",
            SectionName::News => "news",
            SectionName::Ocaml => "ocaml",
            SectionName::Oldlibs => "oldlibs",
            SectionName::Otherosfs => "otherosfs",
            SectionName::Perl => "perl",
            SectionName::Php => "php",
            SectionName::Python => "python",
            SectionName::Ruby => "ruby",
            SectionName::Rust => "rust",
            SectionName::Science => "science",
            SectionName::Shells => "shells",
            SectionName::Sound => "sound",
            SectionName::Tex => "tex",
            SectionName::Text => "text",
            SectionName::Utils => "utils",
            SectionName::Vcs => "vcs",
            SectionName::Video => "video",
            SectionName::Web => "web",
            SectionName::X11 => "x11",
            SectionName::Xfce => "xfce",
            SectionName::Zope => "zope",
        })
    }
}

impl FromStr for SectionName {
    type Err = SectionNameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "admin" => SectionName::Admin,
            "cli-mono" => SectionName::CliMono,
            "comm" => SectionName::Comm,
            "database" => SectionName::Database,
            "debug" => SectionName::Debug,
            "devel" => SectionName::Devel,
            "doc" => SectionName::Doc,
            "editors" => SectionName::Editors,
            "education" => SectionName::Education,
            "electronics" => SectionName::Electronics,
            "embedded" => SectionName::Embedded,
            "fonts" => SectionName::Fonts,
            "games" => SectionName::Games,
            "gnome" => SectionName::Gnome,
            "gnu-r" => SectionName::GnuR,
            "gnustep" => SectionName::Gnustep,
            "golang" => SectionName::Golang,
            "graphics" => SectionName::Graphics,
            "hamradio" => SectionName::Hamradio,
            "haskell" => SectionName::Haskell,
            "httpd" => SectionName::Httpd,
            "interpreters" => SectionName::Interpreters,
            "introspection" => SectionName::Introspection,
            "java" => SectionName::Java,
            "javascript" => SectionName::Javascript,
            "kde" => SectionName::Kde,
            "kernel" => SectionName::Kernel,
            "libdevel" => SectionName::Libdevel,
            "libs" => SectionName::Libs,
            "lisp" => SectionName::Lisp,
            "localization" => SectionName::Localization,
            "mail" => SectionName::Mail,
            "math" => SectionName::Math,
            "metapackages" => SectionName::Metapackages,
            "misc" => SectionName::Misc,
            "net" => SectionName::Net,
            "news" => SectionName::News,
            "ocaml" => SectionName::Ocaml,
            "oldlibs" => SectionName::Oldlibs,
            "otherosfs" => SectionName::Otherosfs,
            "perl" => SectionName::Perl,
            "php" => SectionName::Php,
            "python" => SectionName::Python,
            "ruby" => SectionName::Ruby,
            "rust" => SectionName::Rust,
            "science" => SectionName::Science,
            "shells" => SectionName::Shells,
            "sound" => SectionName::Sound,
            "tex" => SectionName::Tex,
            "text" => SectionName::Text,
            "utils" => SectionName::Utils,
            "vcs" => SectionName::Vcs,
            "video" => SectionName::Video,
            "web" => SectionName::Web,
            "x11" => SectionName::X11,
            "xfce" => SectionName::Xfce,
            "zope" => SectionName::Zope,
            _ => return Err(SectionNameParseError),
        })
    }
}

/// The `Section` field: an optional archive [Area] prefix, a closed-set
/// [SectionName], with any further `/`-separated components after those
/// two discarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Section {
    /// Archive area this section lives in. `None` means `main`.
    pub area: Option<Area>,
    /// The section name itself.
    pub name: SectionName,
}

/// Error returned when a `Section` field fails to parse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SectionParseError {
    /// Neither an [Area] nor a [SectionName] could be parsed from the
    /// first component.
    UnknownName,
    /// An [Area] was recognized, but no section name followed it.
    MissingName,
}
crate::errors::error_enum!(SectionParseError);

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.area {
            Some(area) => write!(f, "{area}/{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for Section {
    type Err = SectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let first = parts.next().unwrap_or("");
        if let Ok(area) = first.parse::<Area>() {
            let name = parts
                .next()
                .ok_or(SectionParseError::MissingName)?
                .parse()
                .map_err(|_| SectionParseError::UnknownName)?;
            return Ok(Section {
                area: Some(area),
                name,
            });
        }
        let name = first.parse().map_err(|_| SectionParseError::UnknownName)?;
        Ok(Section { area: None, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_section() {
        let s: Section = "utils".parse().unwrap();
        assert_eq!(s.area, None);
        assert_eq!(s.name, SectionName::Utils);
    }

    #[test]
    fn parses_area_prefixed_section() {
        let s: Section = "non-free/python".parse().unwrap();
        assert_eq!(s.area, Some(Area::NonFree));
        assert_eq!(s.name, SectionName::Python);
    }

    #[test]
    fn discards_trailing_subsection() {
        let s: Section = "contrib/net/extra".parse().unwrap();
        assert_eq!(s.area, Some(Area::Contrib));
        assert_eq!(s.name, SectionName::Net);
    }

    #[test]
    fn rejects_unknown_name() {
        assert!("not-a-real-section".parse::<Section>().is_err());
    }
}

// vim: foldmethod=marker
