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

//! A single package's identity and contents, read either from a `.deb` on
//! disk or from an admindir's per-package directory, grounded on
//! `wpkgar_package.{h,cpp}`.

mod package;

pub use package::Package;

/// Errors raised while reading or querying a [Package].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required archive member (`debian-binary`, `control.tar*`,
    /// `data.tar*`) was missing.
    MissingMember(String),

    /// An archive member that must appear exactly once appeared more than
    /// once.
    DuplicateMember(String),

    /// `debian-binary` didn't contain a format version this crate
    /// understands.
    UnsupportedFormat(String),

    /// Error from the embedded [crate::control] field parser.
    Control(crate::control::Error),

    /// Error from the [crate::archive] codec layer.
    Archive(crate::archive::Error),

    /// Wrapped I/O error.
    Io(std::io::Error),
}

crate::errors::error_enum!(Error);

impl From<crate::control::Error> for Error {
    fn from(err: crate::control::Error) -> Self {
        Error::Control(err)
    }
}

impl From<crate::archive::Error> for Error {
    fn from(err: crate::archive::Error) -> Self {
        Error::Archive(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

// vim: foldmethod=marker
