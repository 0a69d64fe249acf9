//! Project-wide read access.

use parking_lot::RwLock;

/// Readers share access; a writer excludes every reader.
///
/// Read sections may nest on one thread. Calling [`write`](Self::write)
/// from inside a read section deadlocks.
#[derive(Debug, Default)]
pub struct ReadAccess {
    lock: RwLock<()>,
}

impl ReadAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` inside a read section. The section ends when `f` returns or unwinds.
    pub fn read<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.lock.read_recursive();
        f()
    }

    /// Run `f` with exclusive access.
    pub fn write<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.lock.write();
        f()
    }

    pub fn is_write_locked(&self) -> bool {
        self.lock.is_locked_exclusive()
    }
}
