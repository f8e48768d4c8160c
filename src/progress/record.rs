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

/// One entry of a [super::ProgressStack]: what is in progress, how far
/// along it is, and the known maximum (`0` if unknown).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressRecord {
    what: String,
    max: u64,
    current: u64,
}

impl ProgressRecord {
    pub(super) fn new(what: impl Into<String>, max: u64) -> Self {
        ProgressRecord {
            what: what.into(),
            max,
            current: 0,
        }
    }

    /// A short description of what is in progress.
    pub fn what(&self) -> &str {
        &self.what
    }

    /// The known maximum step count, or `0` if unknown.
    pub fn max(&self) -> u64 {
        self.max
    }

    /// The current step count.
    pub fn current(&self) -> u64 {
        self.current
    }

    pub(super) fn increment(&mut self) {
        self.current += 1;
    }
}

// vim: foldmethod=marker
