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

use super::Error;
use std::path::{Path, PathBuf};

/// The admindir's single exclusive transaction lock. Acquiring it writes
/// `<admindir>/lock` with the operation's name as its body; a second
/// acquisition attempt while the file exists fails with
/// [Error::Locked], carrying the name recorded by the holder. The file is
/// removed on [Drop], so the lock is released even if the transaction
/// unwinds on error.
pub struct Lock {
    path: PathBuf,
    op: String,
}

impl Lock {
    /// Acquire the lock in `admindir` for operation `op`.
    pub fn acquire(admindir: &Path, op: impl Into<String>) -> Result<Self, Error> {
        let path = admindir.join("lock");
        let op = op.into();
        if let Ok(held) = std::fs::read_to_string(&path) {
            return Err(Error::Locked(held.trim().to_string()));
        }
        std::fs::create_dir_all(admindir)?;
        std::fs::write(&path, &op)?;
        Ok(Lock { path, op })
    }

    /// The operation name this lock was acquired for.
    pub fn op(&self) -> &str {
        &self.op
    }
}

impl Drop for Lock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquisition_fails_with_held_op_name() {
        let dir = tempfile::tempdir().unwrap();
        let lock = Lock::acquire(dir.path(), "install").unwrap();
        let err = Lock::acquire(dir.path(), "remove");
        assert!(matches!(err, Err(Error::Locked(op)) if op == "install"));
        drop(lock);
        assert!(Lock::acquire(dir.path(), "remove").is_ok());
    }

    #[test]
    fn releases_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        {
            let _lock = Lock::acquire(dir.path(), "install").unwrap();
            assert!(dir.path().join("lock").exists());
        }
        assert!(!dir.path().join("lock").exists());
    }
}

// vim: foldmethod=marker
