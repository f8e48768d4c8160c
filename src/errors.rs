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

//! Shared error plumbing used by every module's own `Error` enum.
//!
//! Each module in this crate defines its own `#[non_exhaustive]` `Error`
//! enum rather than sharing one big one -- that keeps `From` conversions
//! narrow and lets callers match only on the variants relevant to the
//! module they're calling into. [error_enum] fills in the boilerplate
//! (`Display` via `Debug`, and `std::error::Error`) that every one of
//! those enums needs.

/// Implement [std::fmt::Display] (falling back to the `Debug` rendering,
/// since these enums are diagnostic in nature and not user-facing prose)
/// and [std::error::Error] for an error enum.
///
/// ```ignore
/// #[derive(Clone, Debug, PartialEq)]
/// pub enum Error {
///     Empty,
/// }
/// crate::errors::error_enum!(Error);
/// ```
macro_rules! error_enum {
    ($name:ident) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:?}", self)
            }
        }

        impl std::error::Error for $name {}
    };
}

pub(crate) use error_enum;

/// Unified error type for callers who don't want to match on each module's
/// own `Error` enum individually. Every module-level error converts into
/// this via `From`.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the [crate::filename] module.
    Filename(crate::filename::Error),

    /// Error from the [crate::archive] module.
    Archive(crate::archive::Error),

    /// Error from the [crate::field] module.
    Field(crate::field::Error),

    /// Error from the [crate::control] module.
    Control(crate::control::Error),

    /// Error from the [crate::version] module.
    Version(crate::version::Error),

    /// Error from the [crate::dependency] module.
    Dependency(crate::dependency::Error),

    /// Error from the [crate::package] module.
    Package(crate::package::Error),

    /// Error from the [crate::db] module.
    Db(crate::db::Error),

    /// Error from the [crate::expr] module.
    Expr(crate::expr::Error),

    /// Wrapped I/O error, for the many places an operation bottoms out
    /// in a filesystem call.
    Io(std::io::Error),
}
error_enum!(Error);

impl From<crate::filename::Error> for Error {
    fn from(err: crate::filename::Error) -> Self {
        Error::Filename(err)
    }
}

impl From<crate::archive::Error> for Error {
    fn from(err: crate::archive::Error) -> Self {
        Error::Archive(err)
    }
}

impl From<crate::field::Error> for Error {
    fn from(err: crate::field::Error) -> Self {
        Error::Field(err)
    }
}

impl From<crate::control::Error> for Error {
    fn from(err: crate::control::Error) -> Self {
        Error::Control(err)
    }
}

impl From<crate::version::Error> for Error {
    fn from(err: crate::version::Error) -> Self {
        Error::Version(err)
    }
}

impl From<crate::dependency::Error> for Error {
    fn from(err: crate::dependency::Error) -> Self {
        Error::Dependency(err)
    }
}

impl From<crate::package::Error> for Error {
    fn from(err: crate::package::Error) -> Self {
        Error::Package(err)
    }
}

impl From<crate::db::Error> for Error {
    fn from(err: crate::db::Error) -> Self {
        Error::Db(err)
    }
}

impl From<crate::expr::Error> for Error {
    fn from(err: crate::expr::Error) -> Self {
        Error::Expr(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

// vim: foldmethod=marker
