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

/// The `Standards-Version` field: `major.minor[.patch[.minor-patch]]`, all
/// components numeric.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StandardsVersion {
    /// The dotted numeric components, 2 to 4 of them.
    pub components: Vec<u32>,
}

/// Error returned when a `Standards-Version` field fails to parse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StandardsVersionParseError {
    /// Fewer than 2 or more than 4 dotted components were given.
    WrongArity,
    /// A component wasn't a valid non-negative integer.
    NotANumber,
}
crate::errors::error_enum!(StandardsVersionParseError);

impl std::fmt::Display for StandardsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.components
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(".")
        )
    }
}

impl FromStr for StandardsVersion {
    type Err = StandardsVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s
            .split('.')
            .map(|c| c.parse().map_err(|_| StandardsVersionParseError::NotANumber))
            .collect::<Result<Vec<u32>, _>>()?;
        if !(2..=4).contains(&components.len()) {
            return Err(StandardsVersionParseError::WrongArity);
        }
        Ok(StandardsVersion { components })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_minor_patch() {
        let v: StandardsVersion = "4.6.2".parse().unwrap();
        assert_eq!(v.components, vec![4, 6, 2]);
    }

    #[test]
    fn parses_minor_patch_suffix() {
        let v: StandardsVersion = "4.6.2.1".parse().unwrap();
        assert_eq!(v.components, vec![4, 6, 2, 1]);
    }

    #[test]
    fn rejects_single_component() {
        assert!("4".parse::<StandardsVersion>().is_err());
    }

    #[test]
    fn rejects_non_numeric_component() {
        assert!("4.x".parse::<StandardsVersion>().is_err());
    }
}

// vim: foldmethod=marker
