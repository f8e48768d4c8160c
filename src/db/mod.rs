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

//! The package database: root/admin/inst paths, the per-package admindir
//! layout, the exclusive transaction lock, and the
//! unpack/configure/remove/purge state machine that drives a package
//! through its lifecycle.

mod database;
mod lock;
mod state;

pub use database::Database;
pub use lock::Lock;
pub use state::State;

/// Errors raised by the package database.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Another transaction already holds the admin lock; carries the held
    /// operation's name.
    Locked(String),

    /// The requested transition isn't valid from the package's current
    /// [State].
    InvalidState(String),

    /// A named package, field, or admindir entry wasn't found.
    Missing(String),

    /// A maintainer script exited with a non-zero status.
    ScriptFailed(String),

    /// A package's Depends/Pre-Depends/Conflicts/Breaks could not be
    /// satisfied by the currently installed packages.
    UnsatisfiedDependency(String),

    /// Error from the [crate::package] module.
    Package(crate::package::Error),

    /// Error from the [crate::control] module.
    Control(crate::control::Error),

    /// Error from the [crate::dependency] module.
    Dependency(crate::dependency::Error),

    /// Error from the [crate::archive] module.
    Archive(crate::archive::Error),

    /// Wrapped I/O error.
    Io(std::io::Error),
}

crate::errors::error_enum!(Error);

impl From<crate::package::Error> for Error {
    fn from(err: crate::package::Error) -> Self {
        Error::Package(err)
    }
}

impl From<crate::control::Error> for Error {
    fn from(err: crate::control::Error) -> Self {
        Error::Control(err)
    }
}

impl From<crate::dependency::Error> for Error {
    fn from(err: crate::dependency::Error) -> Self {
        Error::Dependency(err)
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
