//! Synchronous push-based observables for single-threaded view state.
//!
//! This module provides the dependency graph the rest of the crate hangs
//! off: writable [`Observable`] cells, read-only [`Readable`] handles,
//! [`derived`] cells recomputed from one or more sources, and the
//! [`ObservableMap`] wrapper that publishes whole-container snapshots.
//!
//! Everything here runs on one logical thread of control (the UI event
//! loop). Handles are cheap `Rc` clones sharing a single cell; there is no
//! locking and no `Send`/`Sync` bound.
//!
//! # Notification contract
//!
//! Every mutation notifies all active subscribers exactly once, with the
//! new value, before the mutating call returns. Notifications are
//! synchronous and ordered: consecutive mutations produce consecutive
//! notifications, with no batching or coalescing of intermediate states.
//! A subscriber must not mutate the cell it is subscribed to; this is not
//! guardrailed.

mod map;

pub use map::ObservableMap;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Inner<T> {
    value: T,
    subscribers: Vec<(u64, Callback<T>)>,
    next_id: u64,
    /// Present only on derived cells: recomputes the value from the
    /// upstream snapshots.
    recompute: Option<Rc<dyn Fn() -> T>>,
    /// Present only on derived cells: guards keeping the upstream
    /// registrations alive. Dropping the cell drops the guards, which
    /// detaches it from its sources.
    _upstream: Vec<Subscription>,
}

/// A writable single-value cell with synchronous publish semantics.
///
/// Cloning an `Observable` produces another handle to the same cell.
///
/// # Examples
///
/// ```
/// use gridmeta::reactive::Observable;
///
/// let cell = Observable::new(1);
/// let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
/// let sink = seen.clone();
/// let _sub = cell.subscribe(move |v| sink.borrow_mut().push(*v));
///
/// cell.set(2);
/// cell.set(3);
/// assert_eq!(*seen.borrow(), vec![1, 2, 3]);
/// ```
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Creates a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                subscribers: Vec::new(),
                next_id: 0,
                recompute: None,
                _upstream: Vec::new(),
            })),
        }
    }

    /// Returns a snapshot of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replaces the held value and notifies every active subscriber with
    /// the new value before returning.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    /// Replaces the held value with `f(current)` and publishes it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.inner.borrow().value);
        self.set(next);
    }

    /// Registers `callback`, invoking it immediately with the current
    /// value. The callback then runs on every subsequent publish until the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe(&self, mut callback: impl FnMut(&T) + 'static) -> Subscription {
        let current = self.get();
        callback(&current);
        self.attach(callback)
    }

    /// Wraps this handle in a read-only [`Readable`].
    pub fn read_only(self) -> Readable<T> {
        Readable { cell: self }
    }

    /// Registers `callback` without the initial invocation.
    fn attach(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, callback));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
            }
        })
    }

    fn attach_listener(&self, on_change: Rc<dyn Fn()>) -> Subscription {
        self.attach(move |_| on_change())
    }

    /// Calls every subscriber with the current value. The subscriber list
    /// and the value snapshot are taken up front so callbacks are free to
    /// read this cell or mutate other cells.
    fn notify(&self) {
        let (current, subscribers) = {
            let inner = self.inner.borrow();
            (inner.value.clone(), inner.subscribers.clone())
        };
        tracing::trace!(subscribers = subscribers.len(), "publishing value");
        for (_, callback) in subscribers {
            (callback.borrow_mut())(&current);
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Observable").field(&self.get()).finish()
    }
}

/// A read-only handle to an [`Observable`] cell.
///
/// Derived cells are handed out as `Readable` so consumers can read and
/// subscribe but not write values that the dependency graph would
/// immediately overwrite.
pub struct Readable<T> {
    cell: Observable<T>,
}

impl<T> Clone for Readable<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Clone + 'static> Readable<T> {
    /// Returns a snapshot of the current value.
    pub fn get(&self) -> T {
        self.cell.get()
    }

    /// Registers `callback`, invoking it immediately with the current
    /// value. See [`Observable::subscribe`].
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        self.cell.subscribe(callback)
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Readable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Readable").field(&self.get()).finish()
    }
}

/// Unsubscribes a registered callback when dropped.
#[must_use = "dropping a Subscription immediately unsubscribes the callback"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

/// One or more observable cells usable as inputs to [`derived`].
///
/// Implemented for a single [`Observable`] or [`Readable`] handle and for
/// tuples of two, three, or four sources.
pub trait Sources: Clone + 'static {
    /// The tuple of value snapshots handed to the derive function.
    type Snapshot;

    /// Takes a fresh snapshot of every source.
    fn snapshot(&self) -> Self::Snapshot;

    /// Registers `on_change` with every source, without an initial call.
    fn attach_all(&self, on_change: Rc<dyn Fn()>) -> Vec<Subscription>;
}

impl<A: Clone + 'static> Sources for Observable<A> {
    type Snapshot = A;

    fn snapshot(&self) -> A {
        self.get()
    }

    fn attach_all(&self, on_change: Rc<dyn Fn()>) -> Vec<Subscription> {
        vec![self.attach_listener(on_change)]
    }
}

impl<A: Clone + 'static> Sources for Readable<A> {
    type Snapshot = A;

    fn snapshot(&self) -> A {
        self.cell.get()
    }

    fn attach_all(&self, on_change: Rc<dyn Fn()>) -> Vec<Subscription> {
        vec![self.cell.attach_listener(on_change)]
    }
}

macro_rules! impl_sources_for_tuple {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: Sources),+> Sources for ($($name,)+) {
            type Snapshot = ($($name::Snapshot,)+);

            fn snapshot(&self) -> Self::Snapshot {
                ($(self.$index.snapshot(),)+)
            }

            fn attach_all(&self, on_change: Rc<dyn Fn()>) -> Vec<Subscription> {
                let mut subscriptions = Vec::new();
                $(subscriptions.extend(self.$index.attach_all(on_change.clone()));)+
                subscriptions
            }
        }
    };
}

impl_sources_for_tuple!(A: 0, B: 1);
impl_sources_for_tuple!(A: 0, B: 1, C: 2);
impl_sources_for_tuple!(A: 0, B: 1, C: 2, D: 3);

/// Creates a cell whose value is `compute` applied to fresh snapshots of
/// `sources`, recomputed whenever any source publishes.
///
/// The derived cell holds its upstream registrations; dropping every
/// handle to it detaches it from its sources. A publish from one source
/// re-runs `compute` against the latest snapshot of all sources, so
/// intermediate states are never skipped and unrelated cells elsewhere are
/// never consulted.
///
/// # Examples
///
/// ```
/// use gridmeta::reactive::{Observable, derived};
///
/// let a = Observable::new(2);
/// let b = Observable::new(10);
/// let sum = derived((a.clone(), b.clone()), |(a, b)| a + b);
///
/// assert_eq!(sum.get(), 12);
/// a.set(5);
/// assert_eq!(sum.get(), 15);
/// ```
pub fn derived<S, T, F>(sources: S, compute: F) -> Observable<T>
where
    S: Sources,
    T: Clone + 'static,
    F: Fn(S::Snapshot) -> T + 'static,
{
    let snapshot_sources = sources.clone();
    let recompute: Rc<dyn Fn() -> T> = Rc::new(move || compute(snapshot_sources.snapshot()));

    let cell = Observable {
        inner: Rc::new(RefCell::new(Inner {
            value: recompute(),
            subscribers: Vec::new(),
            next_id: 0,
            recompute: Some(recompute),
            _upstream: Vec::new(),
        })),
    };

    // The upstream listeners hold only a weak reference to the derived
    // cell, so dropping the cell tears the chain down instead of leaking
    // registrations into the sources.
    let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&cell.inner);
    let on_change: Rc<dyn Fn()> = Rc::new(move || {
        if let Some(inner) = weak.upgrade() {
            let recompute = inner.borrow().recompute.clone();
            if let Some(recompute) = recompute {
                let next = recompute();
                Observable { inner }.set(next);
            }
        }
    });
    let upstream = sources.attach_all(on_change);
    cell.inner.borrow_mut()._upstream = upstream;
    cell
}
