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

use super::ProgressRecord;
use crate::output::{DebugFlags, Level, Log, Module};

/// A LIFO stack of [ProgressRecord]s, each push/pop/increment logged
/// through [crate::output] at [DebugFlags::PROGRESS].
#[derive(Default)]
pub struct ProgressStack {
    records: Vec<ProgressRecord>,
}

impl ProgressStack {
    /// An empty stack.
    pub fn new() -> Self {
        ProgressStack::default()
    }

    /// Push a new record onto the stack.
    pub fn push(&mut self, what: impl Into<String>, max: u64) {
        let record = ProgressRecord::new(what, max);
        Log::new("progress: %1")
            .level(Level::Info)
            .debug(DebugFlags::PROGRESS)
            .module(Module::ValidateInstallation)
            .arg(record.what())
            .send();
        self.records.push(record);
    }

    /// Increment the top record's current step, a no-op on an empty stack.
    pub fn increment(&mut self) {
        let Some(record) = self.records.last_mut() else {
            return;
        };
        record.increment();
        Log::new("progress increment: %1")
            .level(Level::Info)
            .debug(DebugFlags::PROGRESS)
            .module(Module::ValidateInstallation)
            .arg(record.what())
            .send();
    }

    /// Pop the top record, a no-op on an empty stack.
    pub fn pop(&mut self) {
        let Some(record) = self.records.pop() else {
            return;
        };
        Log::new("progress done: %1")
            .level(Level::Info)
            .debug(DebugFlags::PROGRESS)
            .module(Module::ValidateInstallation)
            .arg(record.what())
            .send();
    }

    /// The currently active record, if any.
    pub fn top(&self) -> Option<&ProgressRecord> {
        self.records.last()
    }

    /// How many records are currently nested.
    pub fn depth(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushes_increments_and_pops() {
        let mut stack = ProgressStack::new();
        stack.push("unpack", 10);
        assert_eq!(stack.depth(), 1);
        stack.increment();
        assert_eq!(stack.top().unwrap().current(), 1);
        stack.pop();
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn ignores_pop_and_increment_on_empty_stack() {
        let mut stack = ProgressStack::new();
        stack.increment();
        stack.pop();
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn nests_records() {
        let mut stack = ProgressStack::new();
        stack.push("outer", 2);
        stack.push("inner", 5);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top().unwrap().what(), "inner");
        stack.pop();
        assert_eq!(stack.top().unwrap().what(), "outer");
    }
}

// vim: foldmethod=marker
