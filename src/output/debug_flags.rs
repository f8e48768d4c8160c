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

/// A bitmask selecting which categories of [crate::output::Level::Debug]
/// message a caller wants to see. Each flag is independent; `NONE`/`ALL`
/// are the obvious extremes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugFlags(pub u32);

impl DebugFlags {
    /// No debug messages.
    pub const NONE: DebugFlags = DebugFlags(0);
    /// Coarse progress information.
    pub const BASICS: DebugFlags = DebugFlags(1 << 0);
    /// Invocation and exit status of maintainer scripts.
    pub const SCRIPTS: DebugFlags = DebugFlags(1 << 1);
    /// Dependency/conflict resolution.
    pub const DEPENDS_GRAPH: DebugFlags = DebugFlags(1 << 2);
    /// One line per file processed.
    pub const FILES: DebugFlags = DebugFlags(1 << 3);
    /// One line per conffile processed.
    pub const CONFIG: DebugFlags = DebugFlags(1 << 4);
    /// Dependency and conflict checks.
    pub const CONFLICTS: DebugFlags = DebugFlags(1 << 5);
    /// Database-internal details.
    pub const DATABASE: DebugFlags = DebugFlags(1 << 6);
    /// Progress-stack push/pop/increment notifications.
    pub const PROGRESS: DebugFlags = DebugFlags(1 << 7);
    /// Everything above.
    pub const ALL: DebugFlags = DebugFlags(0xff);

    /// True if every bit set in `other` is also set in `self`.
    pub fn contains(&self, other: DebugFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for DebugFlags {
    type Output = DebugFlags;
    fn bitor(self, rhs: DebugFlags) -> DebugFlags {
        DebugFlags(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_and_checks_flags() {
        let flags = DebugFlags::FILES | DebugFlags::CONFIG;
        assert!(flags.contains(DebugFlags::FILES));
        assert!(!flags.contains(DebugFlags::SCRIPTS));
        assert!(DebugFlags::ALL.contains(flags));
    }
}

// vim: foldmethod=marker
