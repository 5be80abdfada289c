//! Single-flight load cells.
//!
//! A [`LoadCell`] holds one lazily loaded resource. The first caller runs the
//! loader; callers arriving while it runs block on a condition variable and
//! receive the same outcome. Only a complete value is ever published.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use log::{debug, warn};

use super::types::error::{BibleError, Result};

#[derive(Debug)]
enum State<T> {
    Empty,
    Loading,
    Ready(Arc<T>),
    /// The failure of the last load, kept for the callers that waited on it.
    Failed(String),
}

#[derive(Debug)]
pub struct LoadCell<T> {
    state: Mutex<State<T>>,
    done: Condvar,
}

impl<T> Default for LoadCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the cell to `Empty` if the loader unwinds, so waiters wake up and
/// the next caller retries.
struct LoadingGuard<'a, T> {
    cell: &'a LoadCell<T>,
    armed: bool,
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            if let Ok(mut state) = self.cell.state.lock() {
                *state = State::Empty;
            }
            self.cell.done.notify_all();
        }
    }
}

impl<T> LoadCell<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Empty),
            done: Condvar::new(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State<T>>> {
        self.state.lock().map_err(|_| BibleError::LockPoisoned)
    }

    /// The loaded value, if a load has completed successfully.
    pub fn get(&self) -> Result<Option<Arc<T>>> {
        Ok(match &*self.lock()? {
            State::Ready(value) => Some(Arc::clone(value)),
            _ => None,
        })
    }

    /// Returns the cached value, running `load` only if no value is present
    /// and no other load is in flight.
    ///
    /// # Arguments
    /// * `resource` - Name used in logs and in `LoadFailed` errors
    /// * `load` - Produces the value; run at most once per call, outside the lock
    ///
    /// # Errors
    /// - The loader's own error, for the caller that ran it
    /// - `LoadFailed` for callers that waited on a load which failed
    /// - `LockPoisoned` if the state mutex is poisoned
    pub fn get_or_load<F>(&self, resource: &str, load: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        let state = self.lock()?;
        let waited = matches!(*state, State::Loading);
        if waited {
            debug!("Waiting for in-flight load of {}", resource);
        }
        let mut state = self
            .done
            .wait_while(state, |s| matches!(s, State::Loading))
            .map_err(|_| BibleError::LockPoisoned)?;
        match &*state {
            State::Ready(value) => return Ok(Arc::clone(value)),
            State::Failed(reason) if waited => {
                return Err(BibleError::LoadFailed {
                    resource: resource.to_string(),
                    reason: reason.clone(),
                });
            }
            State::Empty | State::Failed(_) | State::Loading => {}
        }
        *state = State::Loading;
        drop(state);

        let mut guard = LoadingGuard { cell: self, armed: true };
        let outcome = load();
        guard.armed = false;

        let mut state = self.lock()?;
        let result = match outcome {
            Ok(value) => {
                let value = Arc::new(value);
                *state = State::Ready(Arc::clone(&value));
                Ok(value)
            }
            Err(e) => {
                warn!("Loading {} failed: {}", resource, e);
                *state = State::Failed(e.to_string());
                Err(e)
            }
        };
        drop(state);
        self.done.notify_all();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn concurrent_callers_share_one_load() {
        let cell = Arc::new(LoadCell::<u32>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let (cell, calls, barrier) = (cell.clone(), calls.clone(), barrier.clone());
                thread::spawn(move || {
                    barrier.wait();
                    cell.get_or_load("answer", || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(50));
                        Ok(42)
                    })
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(*handle.join().expect("thread").expect("loaded"), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn waiters_share_a_failure_and_later_calls_retry() {
        let cell = Arc::new(LoadCell::<u32>::new());
        let started = Arc::new(Barrier::new(2));

        let loader = {
            let (cell, started) = (cell.clone(), started.clone());
            thread::spawn(move || {
                cell.get_or_load("book", || {
                    started.wait();
                    thread::sleep(Duration::from_millis(100));
                    Err(BibleError::InvalidFormat("broken".to_string()))
                })
            })
        };
        started.wait();
        let waiter = cell.get_or_load("book", || Ok(7));

        assert!(matches!(
            loader.join().expect("thread"),
            Err(BibleError::InvalidFormat(_))
        ));
        assert!(matches!(waiter, Err(BibleError::LoadFailed { .. })));
        assert!(cell.get().expect("lock").is_none());

        assert_eq!(*cell.get_or_load("book", || Ok(7)).expect("retry"), 7);
        assert_eq!(cell.get().expect("lock").as_deref(), Some(&7));
    }

    #[test]
    fn panicking_loader_leaves_cell_empty() {
        let cell = LoadCell::<u32>::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _ = cell.get_or_load("book", || panic!("loader bug"));
        }));
        assert!(outcome.is_err());
        assert_eq!(*cell.get_or_load("book", || Ok(3)).expect("retry"), 3);
    }
}
