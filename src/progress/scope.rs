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

use super::ProgressStack;

/// RAII guard mirroring `progress_scope_t`: pushes a record onto a
/// [ProgressStack] on construction, pops it on [Drop]. Borrows the stack
/// mutably for its lifetime, so it can't outlive the stack it guards.
pub struct ProgressScope<'stack> {
    stack: &'stack mut ProgressStack,
}

impl<'stack> ProgressScope<'stack> {
    /// Push `what`/`max` onto `stack` and return a guard that pops it on
    /// drop.
    pub fn new(stack: &'stack mut ProgressStack, what: impl Into<String>, max: u64) -> Self {
        stack.push(what, max);
        ProgressScope { stack }
    }

    /// Increment the guarded record's current step.
    pub fn increment(&mut self) {
        self.stack.increment();
    }
}

impl Drop for ProgressScope<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_on_drop() {
        let mut stack = ProgressStack::new();
        {
            let mut scope = ProgressScope::new(&mut stack, "unpack", 3);
            scope.increment();
        }
        assert_eq!(stack.depth(), 0);
    }
}

// vim: foldmethod=marker
