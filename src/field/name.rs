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
use std::fmt;

/// A validated field or variable name, optionally qualified with a
/// `/sub-package` suffix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldName {
    raw: String,
    split: Option<usize>,
}

impl FieldName {
    /// Validate and wrap `raw` as a [FieldName].
    ///
    /// A name is a letter or underscore followed by letters, digits,
    /// `-`, `+`, `.` or `_`, with at most one `/sub-package` qualifier.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let mut split = None;
        let mut chars = raw.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return Err(Error::InvalidField(format!("invalid field name {raw:?}"))),
        }
        for (i, c) in chars {
            if c == '/' {
                if split.is_some() {
                    return Err(Error::InvalidField(format!(
                        "field name {raw:?} has more than one sub-package qualifier"
                    )));
                }
                split = Some(i);
                continue;
            }
            if !(c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_')) {
                return Err(Error::InvalidField(format!("invalid field name {raw:?}")));
            }
        }
        if let Some(at) = split {
            let sub = &raw[at + 1..];
            if !is_valid_sub_package(sub) {
                return Err(Error::InvalidField(format!(
                    "{raw:?} has an invalid sub-package qualifier"
                )));
            }
        }
        Ok(FieldName {
            raw: raw.to_string(),
            split,
        })
    }

    /// The full, as-written name, qualifier included.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The part of the name before `/sub-package`, if any.
    pub fn bare_name(&self) -> &str {
        match self.split {
            Some(at) => &self.raw[..at],
            None => &self.raw,
        }
    }

    /// The `/sub-package` qualifier, if one was given.
    pub fn sub_package(&self) -> Option<&str> {
        self.split.map(|at| &self.raw[at + 1..])
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn is_valid_sub_package(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    name.len() >= 2
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        let n = FieldName::parse("Depends").unwrap();
        assert_eq!(n.bare_name(), "Depends");
        assert_eq!(n.sub_package(), None);
    }

    #[test]
    fn accepts_sub_package_qualifier() {
        let n = FieldName::parse("Depends/libfoo-dev").unwrap();
        assert_eq!(n.bare_name(), "Depends");
        assert_eq!(n.sub_package(), Some("libfoo-dev"));
    }

    #[test]
    fn rejects_double_qualifier() {
        assert!(FieldName::parse("Depends/a/b").is_err());
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(FieldName::parse("1Depends").is_err());
        assert!(FieldName::parse("De pends").is_err());
    }
}

// vim: foldmethod=marker
