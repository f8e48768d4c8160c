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

/// A single RFC822-style mailbox, as seen in `Maintainer`, `Uploaders` and
/// `Changed-By`: an optional display name followed by an `<address>`, or a
/// bare address.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Email {
    /// Display name, if the mailbox wasn't a bare address.
    pub name: Option<String>,
    /// The address itself, without the angle brackets.
    pub address: String,
}

/// Error returned when a mailbox string fails to parse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EmailParseError {
    /// The value was empty.
    Empty,
    /// A `<` was seen with no matching `>`.
    UnterminatedAddress,
    /// The address (inside `<>`, or the whole value if bare) has no `@`.
    MissingAt,
}
crate::errors::error_enum!(EmailParseError);

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

impl FromStr for Email {
    type Err = EmailParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailParseError::Empty);
        }
        let (name, address) = match s.find('<') {
            Some(open) => {
                let close = s[open..]
                    .find('>')
                    .map(|rel| open + rel)
                    .ok_or(EmailParseError::UnterminatedAddress)?;
                let name = s[..open].trim();
                let name = if name.is_empty() {
                    None
                } else {
                    Some(name.to_string())
                };
                (name, &s[open + 1..close])
            }
            None => (None, s),
        };
        if !address.contains('@') {
            return Err(EmailParseError::MissingAt);
        }
        Ok(Email {
            name,
            address: address.trim().to_string(),
        })
    }
}

/// A comma-separated list of [Email] mailboxes, as seen in `Uploaders` and
/// `Changed-By`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct EmailList(pub Vec<Email>);

impl Deref for EmailList {
    type Target = [Email];
    fn deref(&self) -> &[Email] {
        &self.0
    }
}

impl std::fmt::Display for EmailList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl FromStr for EmailList {
    type Err = EmailParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(|entry| entry.parse())
            .collect::<Result<Vec<_>, _>>()
            .map(EmailList)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_address() {
        let e: Email = "A Person <a@example.com>".parse().unwrap();
        assert_eq!(e.name.as_deref(), Some("A Person"));
        assert_eq!(e.address, "a@example.com");
    }

    #[test]
    fn parses_bare_address() {
        let e: Email = "a@example.com".parse().unwrap();
        assert_eq!(e.name, None);
        assert_eq!(e.address, "a@example.com");
    }

    #[test]
    fn rejects_missing_at() {
        assert!("A Person <not-an-address>".parse::<Email>().is_err());
    }

    #[test]
    fn parses_list() {
        let list: EmailList = "A <a@example.com>, B <b@example.com>".parse().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].address, "b@example.com");
    }
}

// vim: foldmethod=marker
