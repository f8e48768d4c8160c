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

/// Closed set of urgency levels for the `Urgency` field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UrgencyLevel {
    /// Routine changes, the default.
    Low,
    /// Bug fixes worth getting out sooner than `low`.
    Medium,
    /// Important fixes, including security fixes that aren't yet public.
    High,
    /// A fix for an actively exploited security issue.
    Emergency,
    /// Deprecated alias for `emergency`, still seen in older uploads.
    Critical,
}

/// Error returned when a string doesn't match one of the closed-set
/// [UrgencyLevel] values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UrgencyParseError;
crate::errors::error_enum!(UrgencyParseError);

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
            UrgencyLevel::Emergency => "emergency",
            UrgencyLevel::Critical => "critical",
        })
    }
}

impl FromStr for UrgencyLevel {
    type Err = UrgencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "low" => UrgencyLevel::Low,
            "medium" => UrgencyLevel::Medium,
            "high" => UrgencyLevel::High,
            "emergency" => UrgencyLevel::Emergency,
            "critical" => UrgencyLevel::Critical,
            _ => return Err(UrgencyParseError),
        })
    }
}

/// The `Urgency` field: a closed-set level, plus an optional free-text
/// comment in parentheses (e.g. `high (CVE-2024-0000)`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Urgency {
    /// The urgency level itself.
    pub level: UrgencyLevel,
    /// Free-text comment following the level, if any, with the
    /// parentheses stripped.
    pub comment: Option<String>,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.comment {
            Some(comment) => write!(f, "{} ({comment})", self.level),
            None => write!(f, "{}", self.level),
        }
    }
}

impl FromStr for Urgency {
    type Err = UrgencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (level_str, comment) = match s.find('(') {
            Some(idx) => (
                s[..idx].trim(),
                Some(s[idx + 1..].trim_end_matches(')').trim().to_string()),
            ),
            None => (s, None),
        };
        Ok(Urgency {
            level: level_str.parse()?,
            comment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_level() {
        let u: Urgency = "low".parse().unwrap();
        assert_eq!(u.level, UrgencyLevel::Low);
        assert_eq!(u.comment, None);
    }

    #[test]
    fn parses_level_with_comment() {
        let u: Urgency = "high (CVE-2024-0000)".parse().unwrap();
        assert_eq!(u.level, UrgencyLevel::High);
        assert_eq!(u.comment.as_deref(), Some("CVE-2024-0000"));
    }

    #[test]
    fn rejects_unknown_level() {
        assert!("urgent".parse::<Urgency>().is_err());
    }
}

// vim: foldmethod=marker
