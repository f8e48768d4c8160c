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

//! A small C-like expression language used by `field` substitutions
//! (`$(...)`)  and by control file conditionals. Expressions are evaluated
//! against a [Context], which answers the handful of domain questions the
//! grammar can call out to: `architecture()`, `os()`, `processor()`,
//! `triplet()`, `vendor()`, `versioncmp(a, b)`, `wpkgversion()` and
//! `getfield(name)`.

mod context;
mod eval;
mod pest;
mod value;

pub use context::Context;
pub use eval::evaluate;
pub use value::Value;

/// Errors raised while parsing or evaluating an expression.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The expression text could not be parsed.
    Parse(String),
    /// The expression parsed, but evaluation failed (unknown function,
    /// type mismatch, division by zero, ...).
    Eval(String),
}

crate::errors::error_enum!(Error);

// vim: foldmethod=marker
