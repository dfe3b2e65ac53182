use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use crate::error::{Error, Result};

/// A cloneable handle to a domain object, shared by every command that mutates it.
///
/// Commands outlive any single borrow of the object they edit, so instead of a reference each one
/// holds a `Shared<T>` (an `Arc<Mutex<T>>`). Access is exclusive and checked at runtime; the lock
/// is only ever held for the duration of a single mutation.
///
/// # Deadlocks
///
/// The lock is not reentrant. Commands take it inside `execute` and `rollback`, so no guard from
/// [`lock`](Self::lock) may be held across a call to `append`, `undo`, `redo` or `execute` on a
/// history whose commands share this value; doing so blocks the thread forever.
///
/// # Examples
///
/// ```
/// use revision_history::shared::Shared;
///
/// let graph = Shared::new(vec![1, 2]);
/// let handle = graph.clone();
/// handle.lock().push(3);
/// assert_eq!(*graph.lock(), [1, 2, 3]);
///
/// drop(handle);
/// assert_eq!(graph.into_inner(), Ok(vec![1, 2, 3]));
/// ```
pub struct Shared<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Locks the value. Blocks if another handle currently holds the lock.
    ///
    /// # Deadlocks
    ///
    /// Locking again on the same thread while the returned guard is alive never returns. Drop the
    /// guard before driving a history that mutates this value.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    #[allow(clippy::must_use_candidate)]
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        self.inner.try_lock()
    }

    /// Runs `f` with the value locked and returns its result.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut value = self.lock();
        f(&mut *value)
    }

    #[must_use]
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Consumes the handle and returns the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StillShared`] if other handles to the value are still alive.
    pub fn into_inner(self) -> Result<T> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Error::StillShared {
                handles: Arc::strong_count(&inner),
            })
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Shared<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> std::fmt::Debug for Shared<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_lock() {
            Some(value) => write!(f, "Shared({:?})", *value),
            None => write!(f, "Shared(<locked>)"),
        }
    }
}

impl<T> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> From<Arc<Mutex<T>>> for Shared<T> {
    fn from(arc: Arc<Mutex<T>>) -> Self {
        Self { inner: arc }
    }
}

impl<T> AsRef<Arc<Mutex<T>>> for Shared<T> {
    fn as_ref(&self) -> &Arc<Mutex<T>> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_value() {
        let shared = Shared::new(20);
        let cloned = shared.clone();
        *cloned.lock() += 10;

        assert_eq!(*shared.lock(), 30);
        assert!(Shared::ptr_eq(&shared, &cloned));
        assert_eq!(shared.handle_count(), 2);
    }

    #[test]
    fn test_separate_values_are_not_ptr_eq() {
        let a = Shared::new(1);
        let b = Shared::new(1);
        assert!(!Shared::ptr_eq(&a, &b));
    }

    #[test]
    fn test_default_and_from() {
        let shared: Shared<Vec<u8>> = Shared::default();
        assert!(shared.lock().is_empty());

        let shared = Shared::from(7);
        assert_eq!(*shared.lock(), 7);
    }

    #[test]
    fn test_from_arc_mutex() {
        let arc = Arc::new(Mutex::new(50));
        let shared: Shared<i32> = Shared::from(Arc::clone(&arc));
        *arc.lock() += 25;
        assert_eq!(*shared.lock(), 75);

        let arc_ref: &Arc<Mutex<i32>> = shared.as_ref();
        assert!(Arc::ptr_eq(arc_ref, &arc));
    }

    #[test]
    fn test_with_returns_closure_result() {
        let shared = Shared::new(vec![1, 2, 3]);
        let popped = shared.with(Vec::pop);
        assert_eq!(popped, Some(3));
        assert_eq!(shared.with(|v| v.len()), 2);
    }

    #[test]
    fn test_into_inner() {
        let shared = Shared::new(100);
        assert_eq!(shared.into_inner(), Ok(100));
    }

    #[test]
    fn test_into_inner_while_shared() {
        let shared = Shared::new(100);
        let _other = shared.clone();
        let _third = shared.clone();

        assert_eq!(
            shared.into_inner(),
            Err(Error::StillShared { handles: 3 })
        );
    }

    #[test]
    fn test_try_lock() {
        let shared = Shared::new(5);
        assert_eq!(shared.try_lock().map(|v| *v), Some(5));

        {
            let _guard = shared.lock();
            assert!(shared.try_lock().is_none());
        }

        assert!(shared.try_lock().is_some());
    }

    #[test]
    fn test_debug() {
        let shared = Shared::new(5);
        assert_eq!(format!("{shared:?}"), "Shared(5)");
        let _guard = shared.lock();
        assert_eq!(format!("{shared:?}"), "Shared(<locked>)");
    }
}
