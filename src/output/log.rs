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

use super::{sink, DebugFlags, Level, Message, Module};

/// Builder for one [Message], mirroring `wpkg_output::log`'s fluent
/// interface: construct with the format string, chain in level/module/
/// package/action/positional arguments, and let it emit on [Drop].
///
/// ```
/// # use wpkg::output::{Log, Level, Module};
/// Log::new("unpacking %1")
///     .level(Level::Info)
///     .module(Module::UnpackPackage)
///     .arg("example")
///     .send();
/// ```
pub struct Log {
    format: String,
    args: Vec<String>,
    level: Level,
    module: Module,
    package_name: Option<String>,
    action: Option<String>,
    debug_flags: DebugFlags,
}

impl Log {
    /// Start building a message with the given `%1`/`%2`/... format string.
    pub fn new(format: impl Into<String>) -> Self {
        Log {
            format: format.into(),
            args: Vec::new(),
            level: Level::Info,
            module: Module::Tool,
            package_name: None,
            action: None,
            debug_flags: DebugFlags::NONE,
        }
    }

    /// Set the severity.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the subsystem.
    pub fn module(mut self, module: Module) -> Self {
        self.module = module;
        self
    }

    /// Attach a package name.
    pub fn package(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Attach an action label.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the debug-category bitmask, implying `Level::Debug`.
    pub fn debug(mut self, debug_flags: DebugFlags) -> Self {
        self.debug_flags = debug_flags;
        self.level = Level::Debug;
        self
    }

    /// Append one positional argument, substituted for the next unused
    /// `%1`/`%2`/... placeholder in order.
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }

    /// Append one positional argument, wrapped in double quotes.
    pub fn quoted_arg(self, value: impl std::fmt::Display) -> Self {
        self.arg(format!("\"{value}\""))
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity(self.format.len());
        let mut chars = self.format.char_indices().peekable();
        while let Some((_, c)) = chars.next() {
            if c == '%' {
                if let Some((_, d)) = chars.peek().copied() {
                    if d.is_ascii_digit() {
                        chars.next();
                        let index = d.to_digit(10).unwrap() as usize;
                        if index >= 1 {
                            if let Some(arg) = self.args.get(index - 1) {
                                out.push_str(arg);
                                continue;
                            }
                        }
                        out.push('%');
                        out.push(d);
                        continue;
                    }
                }
            }
            out.push(c);
        }
        out
    }

    /// Finish the message and dispatch it: emit a matching `tracing` event
    /// and forward it to the process-wide [super::Sink], if one is
    /// registered.
    pub fn send(self) {
        let message = Message {
            level: self.level,
            module: self.module,
            package_name: self.package_name.clone(),
            action: self.action.clone(),
            debug_flags: self.debug_flags,
            text: self.render(),
        };

        match message.level {
            Level::Debug => tracing::debug!(module = %message.module, "{}", message.text),
            Level::Info => tracing::info!(module = %message.module, "{}", message.text),
            Level::Warning => tracing::warn!(module = %message.module, "{}", message.text),
            Level::Error | Level::Fatal => {
                tracing::error!(module = %message.module, "{}", message.text)
            }
        }

        sink::dispatch(&message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_args() {
        let log = Log::new("copying %1 to %2")
            .arg("a")
            .arg("b");
        assert_eq!(log.render(), "copying a to b");
    }

    #[test]
    fn leaves_unmatched_placeholders() {
        let log = Log::new("only %1 and %2").arg("a");
        assert_eq!(log.render(), "only a and %2");
    }
}

// vim: foldmethod=marker
