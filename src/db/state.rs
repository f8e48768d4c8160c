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

/// The finite state of a package in the admindir, recorded as the
/// `X-Status` field of its `wpkg-status` file.
///
/// ```text
/// not-installed -> half-installed -> unpacked -> half-configured -> installed
/// installed -> removing -> config-files -> purging -> not-installed
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// No trace of the package remains (or it was never installed).
    #[default]
    NotInstalled,
    /// Files are partway through being copied into the inst path.
    HalfInstalled,
    /// All files extracted; not yet configured.
    Unpacked,
    /// `postinst configure` failed; needs re-running.
    HalfConfigured,
    /// Fully installed and configured.
    Installed,
    /// `prerm remove` has run; files are being deleted.
    Removing,
    /// Files removed; conffiles remain.
    ConfigFiles,
    /// Conffiles are being deleted.
    Purging,
}

impl State {
    /// The `X-Status` string this state is recorded as.
    pub fn as_str(&self) -> &'static str {
        match self {
            State::NotInstalled => "not-installed",
            State::HalfInstalled => "half-installed",
            State::Unpacked => "unpacked",
            State::HalfConfigured => "half-configured",
            State::Installed => "installed",
            State::Removing => "removing",
            State::ConfigFiles => "config-files",
            State::Purging => "purging",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for State {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(match s {
            "not-installed" => State::NotInstalled,
            "half-installed" => State::HalfInstalled,
            "unpacked" => State::Unpacked,
            "half-configured" => State::HalfConfigured,
            "installed" => State::Installed,
            "removing" => State::Removing,
            "config-files" => State::ConfigFiles,
            "purging" => State::Purging,
            other => return Err(Error::InvalidState(other.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_state() {
        for state in [
            State::NotInstalled,
            State::HalfInstalled,
            State::Unpacked,
            State::HalfConfigured,
            State::Installed,
            State::Removing,
            State::ConfigFiles,
            State::Purging,
        ] {
            assert_eq!(state.to_string().parse::<State>().unwrap(), state);
        }
    }

    #[test]
    fn rejects_unknown_state() {
        assert!("sideways".parse::<State>().is_err());
    }
}

// vim: foldmethod=marker
