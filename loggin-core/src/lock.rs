use std::sync::{Arc, Condvar, Mutex, PoisonError};

/// Caller-supplied mutual exclusion wrapped around every registration,
/// configuration change and dispatch.
///
/// `acquire` and `release` are always called in pairs from the same thread.
pub trait LockAdapter: Send + Sync {
    fn acquire(&self);
    fn release(&self);
}

/// A callback called with `true` to acquire and `false` to release.
impl<F> LockAdapter for F
where
    F: Fn(bool) + Send + Sync,
{
    fn acquire(&self) {
        self(true)
    }

    fn release(&self) {
        self(false)
    }
}

/// The adapter used when none is installed.
///
/// The logger state stays memory-safe without an adapter, but callers sharing
/// other resources with their sinks must install one to serialize with them.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLock;

impl LockAdapter for NoLock {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// A binary lock whose acquire and release are separate calls.
#[derive(Debug, Default)]
pub struct MutexLock {
    held: Mutex<bool>,
    released: Condvar,
}

impl MutexLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockAdapter for MutexLock {
    fn acquire(&self) {
        let held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        let mut held = self
            .released
            .wait_while(held, |held| *held)
            .unwrap_or_else(PoisonError::into_inner);
        *held = true;
    }

    fn release(&self) {
        *self.held.lock().unwrap_or_else(PoisonError::into_inner) = false;
        self.released.notify_one();
    }
}

/// Holds an adapter between `acquire` and `release`, releasing on drop.
pub(crate) struct AdapterGuard {
    adapter: Arc<dyn LockAdapter>,
}

impl AdapterGuard {
    pub(crate) fn acquire(adapter: Arc<dyn LockAdapter>) -> Self {
        adapter.acquire();
        Self { adapter }
    }
}

impl Drop for AdapterGuard {
    fn drop(&mut self) {
        self.adapter.release();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread,
        time::Duration,
    };

    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);
        let adapter: Arc<dyn LockAdapter> =
            Arc::new(move |lock: bool| recorded.lock().unwrap().push(lock));
        {
            let _guard = AdapterGuard::acquire(adapter);
            assert_eq!(*calls.lock().unwrap(), vec![true]);
        }
        assert_eq!(*calls.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_mutex_lock_excludes() {
        let lock = Arc::new(MutexLock::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = Arc::clone(&lock);
                let inside = Arc::clone(&inside);
                thread::spawn(move || {
                    for _ in 0..20 {
                        lock.acquire();
                        assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                        thread::sleep(Duration::from_micros(50));
                        inside.fetch_sub(1, Ordering::SeqCst);
                        lock.release();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
