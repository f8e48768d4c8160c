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

use super::{Level, Message};
use std::sync::{Mutex, OnceLock};

/// Something that wants to observe every [Message] as it is emitted, the
/// way `wpkg_output::output` is subclassed to print to a console, a log
/// file, or both at once.
pub trait Sink: Send + Sync {
    /// Called once per emitted [Message], in emission order.
    fn receive(&self, message: &Message);
}

static SINK: OnceLock<Mutex<Option<Box<dyn Sink>>>> = OnceLock::new();
static ERROR_COUNT: OnceLock<Mutex<u32>> = OnceLock::new();

fn sink_slot() -> &'static Mutex<Option<Box<dyn Sink>>> {
    SINK.get_or_init(|| Mutex::new(None))
}

fn error_count_slot() -> &'static Mutex<u32> {
    ERROR_COUNT.get_or_init(|| Mutex::new(0))
}

/// Replace the process-wide [Sink]. Pass `None` to stop forwarding
/// messages anywhere but `tracing`.
pub fn set_sink(sink: Option<Box<dyn Sink>>) {
    *sink_slot().lock().unwrap() = sink;
}

/// Forward `message` to the registered [Sink], if any, and bump the error
/// counter for [Level::Error]/[Level::Fatal] messages.
pub(super) fn dispatch(message: &Message) {
    if matches!(message.level, Level::Error | Level::Fatal) {
        *error_count_slot().lock().unwrap() += 1;
    }
    if let Some(sink) = sink_slot().lock().unwrap().as_ref() {
        sink.receive(message);
    }
}

/// Number of [Level::Error]/[Level::Fatal] messages emitted since the last
/// [reset_error_count].
pub fn error_count() -> u32 {
    *error_count_slot().lock().unwrap()
}

/// Reset the error counter to zero, e.g. between independent transactions.
pub fn reset_error_count() {
    *error_count_slot().lock().unwrap() = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Log, Module};
    use std::sync::Mutex as StdMutex;

    struct Capture(StdMutex<Vec<Message>>);
    impl Sink for Capture {
        fn receive(&self, message: &Message) {
            self.0.lock().unwrap().push(message.clone());
        }
    }

    #[test]
    fn sink_receives_messages_and_counts_errors() {
        reset_error_count();
        set_sink(None);
        Log::new("hello").module(Module::Tool).send();
        assert_eq!(error_count(), 0);
        Log::new("boom").level(Level::Error).module(Module::Tool).send();
        assert_eq!(error_count(), 1);
        reset_error_count();
        set_sink(None);
    }
}

// vim: foldmethod=marker
