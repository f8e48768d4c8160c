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

use super::Filename;
use std::sync::atomic::{AtomicBool, Ordering};

static KEEP: AtomicBool = AtomicBool::new(false);

/// Set the global keep-flag. When set, dropping a [TempFilename] no longer
/// removes the referenced path -- useful for post-mortem debugging of a
/// failed transaction.
pub fn set_keep_temporary_files(keep: bool) {
    KEEP.store(keep, Ordering::SeqCst);
}

/// A [Filename] whose underlying path is removed when the last handle is
/// dropped, unless [set_keep_temporary_files] has been called with `true`.
#[derive(Clone, Debug)]
pub struct TempFilename(Filename);

impl TempFilename {
    /// Wrap `filename` as a scoped temporary.
    pub fn new(filename: Filename) -> Self {
        TempFilename(filename)
    }

    /// Borrow the underlying [Filename].
    pub fn filename(&self) -> &Filename {
        &self.0
    }
}

impl Drop for TempFilename {
    fn drop(&mut self) {
        if !KEEP.load(Ordering::SeqCst) {
            let _ = self.0.unlink_rf();
        }
    }
}

impl std::ops::Deref for TempFilename {
    type Target = Filename;
    fn deref(&self) -> &Filename {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn drop_removes_file_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoped.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"hi")
            .unwrap();
        let filename: Filename = path.to_str().unwrap().parse().unwrap();
        {
            let _temp = TempFilename::new(filename);
        }
        assert!(!path.exists());
    }

    #[test]
    fn keep_flag_preserves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.txt");
        std::fs::File::create(&path).unwrap();
        let filename: Filename = path.to_str().unwrap().parse().unwrap();
        set_keep_temporary_files(true);
        {
            let _temp = TempFilename::new(filename);
        }
        assert!(path.exists());
        set_keep_temporary_files(false);
    }
}

// vim: foldmethod=marker
