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

/// The `X-Selection` field: `dpkg`'s desired-action state for a package,
/// as recorded in the admindir (not to be confused with `dpkg --get-selections`
/// output, which uses the same four words).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Selection {
    /// Follow whatever the dependency resolver decides.
    Auto,
    /// Install/keep the package, the default.
    Normal,
    /// Don't upgrade or remove the package even if something depends on it.
    Hold,
    /// Remove the package if an operation would otherwise touch it.
    Reject,
}

/// Error returned when a string doesn't match one of the closed-set
/// [Selection] values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelectionParseError;
crate::errors::error_enum!(SelectionParseError);

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Selection::Auto => "auto",
            Selection::Normal => "normal",
            Selection::Hold => "hold",
            Selection::Reject => "reject",
        })
    }
}

impl FromStr for Selection {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "auto" => Selection::Auto,
            "normal" => Selection::Normal,
            "hold" => Selection::Hold,
            "reject" => Selection::Reject,
            _ => return Err(SelectionParseError),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        for s in [
            Selection::Auto,
            Selection::Normal,
            Selection::Hold,
            Selection::Reject,
        ] {
            assert_eq!(s.to_string().parse::<Selection>().unwrap(), s);
        }
    }

    #[test]
    fn rejects_unknown() {
        assert!("purge".parse::<Selection>().is_err());
    }
}

// vim: foldmethod=marker
