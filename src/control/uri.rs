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

use std::ops::Deref;
use std::str::FromStr;

#[cfg(feature = "serde")]
use ::serde::{Deserialize, Serialize};

/// A `Homepage`/`Bugs`/`Vcs-Browser` style URI field.
///
/// Unlike [crate::filename::Filename], which models local and UNC paths
/// down to drive letters and reserved Windows names, a control file URI
/// field is an opaque pointer at some web resource -- this wrapper only
/// checks that the value has a `scheme://` prefix and keeps the rest
/// verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Uri(pub String);

impl Deref for Uri {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string isn't a valid [Uri].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UriParseError;
crate::errors::error_enum!(UriParseError);

impl FromStr for Uri {
    type Err = UriParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(idx) = s.find("://") else {
            return Err(UriParseError);
        };
        let scheme = &s[..idx];
        let valid_scheme = !scheme.is_empty()
            && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
        if !valid_scheme || idx + 3 == s.len() {
            return Err(UriParseError);
        }
        Ok(Uri(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_https_uri() {
        let u: Uri = "https://example.com/project".parse().unwrap();
        assert_eq!(&*u, "https://example.com/project");
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!("example.com/project".parse::<Uri>().is_err());
    }

    #[test]
    fn rejects_empty_authority() {
        assert!("https://".parse::<Uri>().is_err());
    }
}

// vim: foldmethod=marker
