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

//! The generic field-file layer that [crate::control]'s typed fields sit on
//! top of: a case-insensitive map of `Name: value` fields, a sibling map of
//! `Name=value` variables, and a `${...}`/`$(...)` substitution engine.
//!
//! Unlike [crate::control]'s RFC822 paragraph lexer, a field file's grammar
//! (two separators, blank-continuation markers, no multi-paragraph nesting)
//! is simple enough to scan by hand; there's no grammar file here.

mod field_file;
mod name;
mod substitute;

pub use field_file::{FieldFile, WriteMode};
pub use name::FieldName;

/// Errors raised while parsing, querying or transforming a [FieldFile].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A field or variable name failed to validate, a continuation line
    /// appeared with nothing to continue, or a name was declared twice.
    InvalidField(String),

    /// [FieldFile::get] was called for a name with no field set.
    Undefined(String),

    /// A `${F:x}`/`${V:x}` chain referenced a name already being resolved.
    Cyclic(String),

    /// A transformation (substitution or expression) could not be
    /// completed.
    Invalid(String),
}

crate::errors::error_enum!(Error);

impl From<crate::expr::Error> for Error {
    fn from(err: crate::expr::Error) -> Self {
        Error::Invalid(err.to_string())
    }
}

// vim: foldmethod=marker
