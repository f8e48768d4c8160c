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

//! The `filename` module contains a canonical URI filename type used
//! throughout the rest of the crate, along with a thin filesystem bridge.
//!
//! A [Filename] is parsed once from a String and is immutable from that
//! point on; builder methods such as [Filename::append_child] return a new
//! [Filename] rather than mutating in place.

#[allow(clippy::module_inception)]
mod filename;
mod glob;
mod temp;

pub use filename::{Filename, Scheme, UriType};
pub use glob::matches as glob_matches;
pub use temp::TempFilename;

/// Error conditions which may be encountered when parsing or resolving a
/// [Filename].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The provided String failed a syntactic check -- an unsupported
    /// scheme, a reserved Windows device name, a segment with leading or
    /// trailing whitespace, and so on.
    InvalidParameter(String),

    /// A filesystem operation failed.
    Io(std::io::Error),

    /// The requested operation is not representable on this platform (for
    /// instance, decoding an encoding the host cannot express).
    Compatibility(String),
}
crate::errors::error_enum!(Error);

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

// vim: foldmethod=marker
