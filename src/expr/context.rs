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

/// The domain questions an expression can ask about the system it is
/// evaluating against. `field` substitution and control-file conditionals
/// each provide their own implementation.
pub trait Context {
    /// The Debian architecture tuple of the system, e.g. `amd64`.
    fn architecture(&self) -> String;

    /// The operating system component of the build triplet, e.g. `linux`.
    fn os(&self) -> String;

    /// The processor component of the build triplet, e.g. `x86_64`.
    fn processor(&self) -> String;

    /// The vendor component of the build triplet, e.g. `unknown` or `pc`.
    fn vendor(&self) -> String;

    /// The full `processor-vendor-os` triplet. The default composes the
    /// three components above.
    fn triplet(&self) -> String {
        format!("{}-{}-{}", self.processor(), self.vendor(), self.os())
    }

    /// This crate's own version, for `${wpkg:Version}`-style queries.
    fn wpkgversion(&self) -> String;

    /// Look up another field's fully transformed value by name, or `None`
    /// if it isn't set.
    fn getfield(&self, name: &str) -> Option<String>;
}

// vim: foldmethod=marker
