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

use super::{DebugFlags, Level, Module};

/// One fully-assembled output message: severity, subsystem, optional
/// package/action context, and the rendered text.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// Severity of the message.
    pub level: Level,
    /// Subsystem that produced the message.
    pub module: Module,
    /// The package this message concerns, if any.
    pub package_name: Option<String>,
    /// A short label for the operation in progress (e.g. `"unpack"`).
    pub action: Option<String>,
    /// The debug-category bitmask this message belongs to, when
    /// `level == Level::Debug`.
    pub debug_flags: DebugFlags,
    /// The fully rendered message text, positional arguments substituted.
    pub text: String,
}

impl Message {
    /// The full, human-readable rendering of this message, in the form
    /// `level(module)[package]: text`, matching
    /// `wpkg_output::message_t::get_full_message`'s shape.
    pub fn full_message(&self) -> String {
        let mut out = format!("{}({})", self.level, self.module);
        if let Some(package) = &self.package_name {
            out.push_str(&format!("[{package}]"));
        }
        out.push_str(": ");
        out.push_str(&self.text);
        out
    }
}

// vim: foldmethod=marker
