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

//! Structured output for the rest of the crate: every message carries a
//! [Level], a [Module] tag, an optional package name and action label, and
//! a [DebugFlags] bitmask so a caller can filter "only show me file-level
//! detail" kinds of messages. Every [Message] is also emitted through
//! [tracing] at the matching level, so a binary linking this crate gets
//! ambient logging for free without registering a [Sink].
//!
//! A [Sink] is how a caller (an installer UI, a test harness) observes
//! messages structurally instead of just textually; [set_sink] replaces the
//! process-wide sink, mirroring `wpkg_output::set_output`.

mod debug_flags;
mod level;
mod log;
mod message;
mod module;
mod sink;

pub use debug_flags::DebugFlags;
pub use level::Level;
pub use log::Log;
pub use message::Message;
pub use module::Module;
pub use sink::{error_count, reset_error_count, set_sink, Sink};

// vim: foldmethod=marker
