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
use std::path::{Path, PathBuf};
use std::str::FromStr;

const RESERVED_WINDOWS_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Whether a [Filename] is locally resolvable (`Direct`), a Windows UNC
/// share (`Unc`), or has no recognizable shape at all (`Undefined`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum UriType {
    /// Locally resolvable path.
    #[default]
    Direct,

    /// A `\\host\share\...` style UNC path.
    Unc,

    /// Neither of the above; this is the default for a remote URI.
    Undefined,
}

/// The URI scheme of a [Filename].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `file://` -- the default scheme when none is given.
    #[default]
    File,

    /// `http://`
    Http,

    /// `https://`
    Https,

    /// `smb://`
    Smb,

    /// `smbs://`
    Smbs,
}

impl Scheme {
    fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Http => "http",
            Self::Https => "https",
            Self::Smb => "smb",
            Self::Smbs => "smbs",
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(v: &str) -> Result<Self, Error> {
        Ok(match v.to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "http" => Self::Http,
            "https" => Self::Https,
            "smb" => Self::Smb,
            "smbs" => Self::Smbs,
            _ => return Err(Error::InvalidParameter(format!("unknown scheme {v:?}"))),
        })
    }
}

/// A canonical URI filename: a scheme, optional remote authority, optional
/// MS-DOS drive letter, an ordered list of path segments, an optional
/// anchor, and an ordered list of query variables.
///
/// A [Filename] is constructed once, by parsing a String with
/// [Filename::parse] (or its [FromStr] implementation), and is immutable
/// from that point on; methods like [Filename::append_child] return a new
/// [Filename] rather than mutating `self`.
#[derive(Clone, Debug, PartialEq)]
pub struct Filename {
    original: String,
    uri_type: UriType,
    scheme: Scheme,
    username: Option<String>,
    password: Option<String>,
    domain: Option<String>,
    port: Option<u16>,
    share: Option<String>,
    drive: Option<char>,
    segments: Vec<String>,
    anchor: Option<String>,
    query: Vec<(String, String)>,
    rooted: bool,
}

fn decode_percent(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                if let Ok(byte) = u8::from_str_radix(&input[i + 1..i + 3], 16) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(bytes[i]);
                i += 1;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn home_dir() -> Option<String> {
    let home = std::env::var("HOME").ok()?;
    if home.starts_with('~') || !home.starts_with('/') {
        return None;
    }
    Some(home)
}

fn validate_segment(segment: &str) -> Result<(), Error> {
    if segment != segment.trim() {
        return Err(Error::InvalidParameter(format!(
            "segment {segment:?} has leading or trailing whitespace"
        )));
    }
    if segment.chars().any(|c| matches!(c, '"' | '<' | '>' | '|')) {
        return Err(Error::InvalidParameter(format!(
            "segment {segment:?} contains a reserved character"
        )));
    }
    let bare = segment.split('.').next().unwrap_or(segment);
    if RESERVED_WINDOWS_NAMES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(bare))
    {
        return Err(Error::InvalidParameter(format!(
            "segment {segment:?} is a reserved Windows device name"
        )));
    }
    Ok(())
}

fn split_segments(path: &str) -> Result<Vec<String>, Error> {
    let mut segments = Vec::new();
    for part in path.split('/') {
        if part.is_empty() {
            continue;
        }
        validate_segment(part)?;
        segments.push(part.to_string());
    }
    Ok(segments)
}

impl Filename {
    /// Parse a String into a [Filename].
    ///
    /// The scheme defaults to `file` when absent. An MS-DOS drive prefix
    /// (`C|` or `C:`) is recognized in local paths and stored separately
    /// from the segment list. `~` is expanded only when `HOME` is an
    /// absolute path that does not itself start with `~`.
    pub fn parse(original: &str) -> Result<Self, Error> {
        let mut rest = original;
        let mut scheme = Scheme::File;
        let mut uri_type = UriType::Direct;
        let mut username = None;
        let mut password = None;
        let mut domain = None;
        let mut port = None;
        let mut share = None;

        if let Some(idx) = rest.find("://") {
            let (scheme_str, remainder) = rest.split_at(idx);
            scheme = scheme_str.parse()?;
            rest = &remainder[3..];
            uri_type = UriType::Undefined;

            let (authority, path) = match rest.find('/') {
                Some(idx) => (&rest[..idx], &rest[idx..]),
                None => (rest, ""),
            };
            rest = path;

            // `file://<host>/...` authorities (empty, `localhost`, or a
            // hostname) carry no meaning for local paths and are dropped;
            // the path after them is handled below, including any MS-DOS
            // drive prefix.
            if scheme != Scheme::File {
                let (userinfo, hostport) = match authority.rfind('@') {
                    Some(idx) => (Some(&authority[..idx]), &authority[idx + 1..]),
                    None => (None, authority),
                };
                if let Some(userinfo) = userinfo {
                    let (user, pass) = match userinfo.find(':') {
                        Some(idx) => (&userinfo[..idx], Some(&userinfo[idx + 1..])),
                        None => (userinfo, None),
                    };
                    let (user, dom) = match user.find(';') {
                        Some(idx) => (&user[..idx], Some(&user[idx + 1..])),
                        None => (user, None),
                    };
                    username = Some(decode_percent(user));
                    password = pass.map(decode_percent);
                    domain = dom.map(decode_percent);
                }

                let (host, p) = match hostport.rfind(':') {
                    Some(idx) => (&hostport[..idx], Some(&hostport[idx + 1..])),
                    None => (hostport, None),
                };
                if let Some(p) = p {
                    port = Some(p.parse().map_err(|_| {
                        Error::InvalidParameter(format!("invalid port {p:?}"))
                    })?);
                }
                share = Some(decode_percent(host));
                if matches!(scheme, Scheme::Smb | Scheme::Smbs) {
                    uri_type = UriType::Unc;
                }
            }
        }

        let (path, anchor) = match rest.find('#') {
            Some(idx) => (&rest[..idx], Some(decode_percent(&rest[idx + 1..]))),
            None => (rest, None),
        };
        let (path, query_str) = match path.find('?') {
            Some(idx) => (&path[..idx], Some(&path[idx + 1..])),
            None => (path, None),
        };

        let mut query = Vec::new();
        if let Some(query_str) = query_str {
            for pair in query_str.split('&').filter(|p| !p.is_empty()) {
                let (k, v) = match pair.find('=') {
                    Some(idx) => (&pair[..idx], &pair[idx + 1..]),
                    None => (pair, ""),
                };
                query.push((decode_percent(k), decode_percent(v)));
            }
        }

        let mut path = decode_percent(path);

        let mut drive = None;
        if scheme == Scheme::File {
            // A drive prefix may follow a leading `/` left over from a
            // `file://<host>/C|/...` authority that was just stripped off.
            let candidate = path.strip_prefix('/').unwrap_or(path.as_str());
            let bytes = candidate.as_bytes();
            if bytes.len() >= 2
                && bytes[0].is_ascii_alphabetic()
                && (bytes[1] == b'|' || bytes[1] == b':')
            {
                drive = Some(bytes[0].to_ascii_uppercase() as char);
                path = candidate[2..].to_string();
            }
        }

        let rooted = path.starts_with('/');

        if scheme == Scheme::File && drive.is_none() && path.starts_with('~') {
            if let Some(home) = home_dir() {
                let remainder = path.trim_start_matches('~');
                if remainder.is_empty() || remainder.starts_with('/') {
                    path = format!("{home}{remainder}");
                }
            }
        }

        let segments = split_segments(&path)?;

        Ok(Filename {
            original: original.to_string(),
            uri_type,
            scheme,
            username,
            password,
            domain,
            port,
            share,
            drive,
            segments,
            anchor,
            query,
            rooted,
        })
    }

    /// The original String this [Filename] was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Whether this is a direct, UNC, or undefined-shaped filename.
    pub fn uri_type(&self) -> UriType {
        self.uri_type
    }

    /// The URI scheme.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The MS-DOS drive letter, if any, always uppercase.
    pub fn drive(&self) -> Option<char> {
        self.drive
    }

    /// The ordered list of path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True exactly when the segment list is rooted (the leading `/` was
    /// present in the parsed path).
    pub fn is_absolute(&self) -> bool {
        self.rooted
    }

    /// Return the `i`th segment, if any.
    pub fn segment(&self, i: usize) -> Option<&str> {
        self.segments.get(i).map(String::as_str)
    }

    /// Return the final segment, optionally stripped of every extension
    /// (`last_ext_only = false`) or just the last one (`true`).
    pub fn basename(&self, last_ext_only: bool) -> Option<String> {
        let last = self.segments.last()?;
        if last_ext_only {
            return Some(match last.rfind('.') {
                Some(idx) if idx > 0 => last[..idx].to_string(),
                _ => last.clone(),
            });
        }
        match last.find('.') {
            Some(idx) if idx > 0 => Some(last[..idx].to_string()),
            _ => Some(last.clone()),
        }
    }

    /// The final extension of the last segment (`c.tar.gz` → `gz`).
    pub fn extension(&self) -> Option<&str> {
        let last = self.segments.last()?;
        let idx = last.rfind('.')?;
        if idx == 0 {
            return None;
        }
        Some(&last[idx + 1..])
    }

    /// The extension preceding the final one (`c.tar.gz` → `tar`).
    pub fn previous_extension(&self) -> Option<&str> {
        let last = self.segments.last()?;
        let idx = last.rfind('.')?;
        if idx == 0 {
            return None;
        }
        let rest = &last[..idx];
        let idx2 = rest.rfind('.')?;
        if idx2 == 0 {
            return None;
        }
        Some(&rest[idx2 + 1..])
    }

    /// The directory portion (all segments but the last), optionally
    /// prefixed with the drive letter.
    pub fn dirname(&self, with_drive: bool) -> String {
        let mut out = String::new();
        if with_drive {
            if let Some(drive) = self.drive {
                out.push(drive);
                out.push(':');
            }
        }
        if self.rooted {
            out.push('/');
        }
        if self.segments.len() > 1 {
            out.push_str(&self.segments[..self.segments.len() - 1].join("/"));
        }
        out
    }

    /// Render the full path, optionally replacing `/` with the platform's
    /// native directory separator.
    pub fn full_path(&self, replace_slashes: bool) -> String {
        let mut out = String::new();
        if let Some(drive) = self.drive {
            out.push(drive);
            out.push(':');
        }
        if self.rooted {
            out.push('/');
        }
        out.push_str(&self.segments.join("/"));
        if replace_slashes && std::path::MAIN_SEPARATOR != '/' {
            out = out.replace('/', &std::path::MAIN_SEPARATOR.to_string());
        }
        out
    }

    /// Append a single path component. `name` may not cross directory
    /// boundaries (contain `/`).
    pub fn append_child(&self, name: &str) -> Result<Self, Error> {
        if name.contains('/') {
            return Err(Error::InvalidParameter(format!(
                "{name:?} crosses a directory boundary"
            )));
        }
        validate_segment(name)?;
        let mut ret = self.clone();
        ret.segments.push(name.to_string());
        Ok(ret)
    }

    /// Append a (possibly multi-segment) path, normalizing `.`/`..` the
    /// way a shell would.
    pub fn append_path(&self, path: &str) -> Result<Self, Error> {
        let mut segments = self.segments.clone();
        for part in split_segments(path)? {
            match part.as_str() {
                "." => {}
                ".." => {
                    segments.pop();
                }
                _ => segments.push(part),
            }
        }
        let mut ret = self.clone();
        ret.segments = segments;
        Ok(ret)
    }

    /// If `self` and `other` share scheme, authority, port, credentials,
    /// and share, return a [Filename] holding only the segments of `self`
    /// past their common prefix with `other`. Otherwise, return `self`
    /// unchanged.
    pub fn remove_common_segments(&self, other: &Self) -> Self {
        let same_authority = self.scheme == other.scheme
            && self.port == other.port
            && self.username == other.username
            && self.password == other.password
            && self.domain == other.domain
            && self.share == other.share;
        if !same_authority {
            return self.clone();
        }
        let common = self
            .segments
            .iter()
            .zip(other.segments.iter())
            .take_while(|(a, b)| a == b)
            .count();
        let mut ret = self.clone();
        ret.segments = self.segments[common..].to_vec();
        ret
    }

    /// Return true if `pattern` (`?`, `*`, `[a-z]`, `?` as an escape
    /// character) matches this filename's final segment.
    pub fn glob(&self, pattern: &str) -> bool {
        match self.segments.last() {
            Some(last) => super::glob::matches(pattern, last),
            None => false,
        }
    }

    fn as_os_path(&self) -> PathBuf {
        PathBuf::from(self.full_path(true))
    }

    /// True if the path exists on disk.
    pub fn exists(&self) -> bool {
        self.as_os_path().exists()
    }

    /// True if the path is a directory.
    pub fn is_dir(&self) -> bool {
        self.as_os_path().is_dir()
    }

    /// True if the path is a regular file.
    pub fn is_reg(&self) -> bool {
        self.as_os_path().is_file()
    }

    /// `stat` the path, following symlinks.
    pub fn stat(&self) -> Result<std::fs::Metadata, Error> {
        Ok(std::fs::metadata(self.as_os_path())?)
    }

    /// `lstat` the path, not following symlinks.
    pub fn lstat(&self) -> Result<std::fs::Metadata, Error> {
        Ok(std::fs::symlink_metadata(self.as_os_path())?)
    }

    /// Create every missing directory component of this path.
    pub fn mkdir_p(&self) -> Result<(), Error> {
        Ok(std::fs::create_dir_all(self.as_os_path())?)
    }

    /// Remove a single file.
    pub fn unlink(&self) -> Result<(), Error> {
        Ok(std::fs::remove_file(self.as_os_path())?)
    }

    /// Recursively remove a file or directory tree.
    pub fn unlink_rf(&self) -> Result<(), Error> {
        let path = self.as_os_path();
        if path.is_dir() {
            Ok(std::fs::remove_dir_all(path)?)
        } else {
            match std::fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }

    /// Create a symlink at this path pointing at `target`.
    pub fn symlink(&self, target: &Path) -> Result<(), Error> {
        #[cfg(unix)]
        {
            Ok(std::os::unix::fs::symlink(target, self.as_os_path())?)
        }
        #[cfg(not(unix))]
        {
            let _ = target;
            Err(Error::Compatibility(
                "symlink is only supported on unix".into(),
            ))
        }
    }

    /// Rename (move) this path to `to`.
    pub fn rename(&self, to: &Self) -> Result<(), Error> {
        Ok(std::fs::rename(self.as_os_path(), to.as_os_path())?)
    }

    /// Canonicalize via the underlying OS.
    pub fn os_real_path(&self) -> Result<PathBuf, Error> {
        Ok(std::fs::canonicalize(self.as_os_path())?)
    }
}

impl std::fmt::Display for Filename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_path(false))
    }
}

impl FromStr for Filename {
    type Err = Error;

    fn from_str(v: &str) -> Result<Self, Error> {
        Self::parse(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_unix_path() {
        let f: Filename = "/a/b/c.tar.gz".parse().unwrap();
        assert!(f.is_absolute());
        assert_eq!(f.segments(), &["a", "b", "c.tar.gz"]);
        assert_eq!(f.basename(true), Some("c.tar".to_string()));
        assert_eq!(f.extension(), Some("gz"));
        assert_eq!(f.previous_extension(), Some("tar"));
    }

    #[test]
    fn parse_file_uri_with_drive() {
        let f: Filename = "file://localhost/c|/a/b/c.tar.gz".parse().unwrap();
        assert_eq!(f.scheme(), Scheme::File);
        assert_eq!(f.drive(), Some('C'));
        assert_eq!(f.segments(), &["a", "b", "c.tar.gz"]);
    }

    #[test]
    fn parse_file_uri_scheme_is_case_insensitive() {
        let f: Filename = "File://localhost/c|/a/b/c.tar.gz".parse().unwrap();
        assert_eq!(f.scheme(), Scheme::File);
        assert_eq!(f.drive(), Some('C'));
        assert_eq!(f.segments(), &["a", "b", "c.tar.gz"]);
    }

    #[test]
    fn reject_reserved_windows_name() {
        assert!(Filename::parse("/a/CON/b").is_err());
    }

    #[test]
    fn reject_reserved_character() {
        assert!(Filename::parse("/a/b<c").is_err());
    }

    #[test]
    fn append_child_rejects_slash() {
        let f: Filename = "/a".parse().unwrap();
        assert!(f.append_child("b/c").is_err());
    }

    #[test]
    fn append_child_then_remove_common_segments_round_trips() {
        let base: Filename = "/a/b".parse().unwrap();
        let child = base.append_child("c").unwrap();
        let relative = child.remove_common_segments(&base);
        assert_eq!(relative.segments(), &["c"]);
    }

    #[test]
    fn append_path_normalizes_dotdot() {
        let base: Filename = "/a/b".parse().unwrap();
        let joined = base.append_path("../c").unwrap();
        assert_eq!(joined.segments(), &["a", "c"]);
    }

    #[test]
    fn remove_common_segments_differing_authority_is_unchanged() {
        let a: Filename = "http://example.com/a/b".parse().unwrap();
        let b: Filename = "http://example.org/a".parse().unwrap();
        let result = a.remove_common_segments(&b);
        assert_eq!(result.segments(), a.segments());
    }
}

// vim: foldmethod=marker
