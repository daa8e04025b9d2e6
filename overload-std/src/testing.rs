//! Testing utilities for overload registries.
//!
//! - [`CountingCallable`]: counts how often an overload was invoked
//! - [`RecordingCallable`]: records every value an overload returned
//!
//! Both wrap another callable, keep its signature, and share their state
//! across clones, so a clone can be registered while the original is kept for
//! inspection.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use overload_core::{ByMove, Call, Callable, IntoStored, Signature};

// ============================================================================
// Counting Callable
// ============================================================================

/// A callable that counts its invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingCallable::new(double as fn(&i32) -> i32);
/// let o = make!(counter.clone())?;
///
/// call!(o, 2_i32);
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingCallable<C> {
    inner: C,
    count: Arc<AtomicUsize>,
}

impl<C> CountingCallable<C> {
    /// Wraps `inner` with a fresh counter.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of invocations so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Resets the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<C: Clone> Clone for CountingCallable<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            count: Arc::clone(&self.count),
        }
    }
}

impl<C> Call<C::Signature> for CountingCallable<C>
where
    C: Callable + Call<C::Signature>,
{
    fn call_with<'a>(
        &self,
        args: <C::Signature as Signature>::Args<'a>,
    ) -> <C::Signature as Signature>::Output
    where
        C::Signature: 'a,
    {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.call_with(args)
    }
}

impl<C: Callable> Callable for CountingCallable<C> {
    type Signature = C::Signature;
}

impl<C> IntoStored for CountingCallable<C>
where
    C: Callable + Call<C::Signature>,
{
    type Stored = ByMove<Self>;

    fn into_stored(self) -> ByMove<Self> {
        ByMove::new(self)
    }
}

// ============================================================================
// Recording Callable
// ============================================================================

/// Output recorded by a [`RecordingCallable`] wrapping `C`.
type OutputOf<C> = <<C as Callable>::Signature as Signature>::Output;

/// A callable that records every value it returns.
pub struct RecordingCallable<C: Callable> {
    inner: C,
    outputs: Arc<Mutex<Vec<OutputOf<C>>>>,
}

impl<C: Callable> RecordingCallable<C> {
    /// Wraps `inner` with an empty record.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            outputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.outputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clears the record.
    pub fn clear(&self) {
        self.outputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<C> RecordingCallable<C>
where
    C: Callable,
    OutputOf<C>: Clone,
{
    /// A copy of the recorded outputs, oldest first.
    pub fn outputs(&self) -> Vec<OutputOf<C>> {
        self.outputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<C: Callable + Clone> Clone for RecordingCallable<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            outputs: Arc::clone(&self.outputs),
        }
    }
}

impl<C> Call<C::Signature> for RecordingCallable<C>
where
    C: Callable + Call<C::Signature>,
    OutputOf<C>: Clone,
{
    fn call_with<'a>(
        &self,
        args: <C::Signature as Signature>::Args<'a>,
    ) -> <C::Signature as Signature>::Output
    where
        C::Signature: 'a,
    {
        let output = self.inner.call_with(args);
        self.outputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(output.clone());
        output
    }
}

impl<C: Callable> Callable for RecordingCallable<C> {
    type Signature = C::Signature;
}

impl<C> IntoStored for RecordingCallable<C>
where
    C: Callable + Call<C::Signature>,
    OutputOf<C>: Clone,
{
    type Stored = ByMove<Self>;

    fn into_stored(self) -> ByMove<Self> {
        ByMove::new(self)
    }
}
