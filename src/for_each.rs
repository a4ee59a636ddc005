//! ParallelForEach runs a function over every item of a slice using a scoped pool sized to the
//! available parallelism. Threads pull work through a shared AtomicUsize cursor: `fetch_add`
//! hands every thread a distinct index, so each item is visited exactly once without any lock.
//! The call returns only after all threads have joined.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::utils::available_threads;

/// Applies `f` to every item of `items` concurrently and blocks until all items are done.
/// ```
/// use std::sync::atomic::{AtomicI64, Ordering};
/// use parallel_jobs::prelude::*;
///
/// let sum = AtomicI64::new(0);
/// for_each(&[1, 2, 3, 4, 5], |v| { sum.fetch_add(*v, Ordering::Relaxed); });
/// assert_eq!(sum.into_inner(), 15);
/// ```
pub fn for_each<T, F>(items: &[T], f: F)
where T: Sync,
F: Fn(&T) + Sync
{
    ParallelForEach::new(items, f).run()
}

/// ParallelForEachExt allows calling `.parallel_for_each(f)` directly on slices and vectors.
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use parallel_jobs::prelude::*;
///
/// let seen = AtomicUsize::new(0);
/// (0..1_000).collect::<Vec<u32>>().parallel_for_each(|_| { seen.fetch_add(1, Ordering::Relaxed); });
/// assert_eq!(seen.into_inner(), 1_000);
/// ```
pub trait ParallelForEachExt<T>
where T: Sync
{
    fn parallel_for_each<F>(&self, f: F)
    where F: Fn(&T) + Sync;
}

impl<T> ParallelForEachExt<T> for [T]
where T: Sync
{
    fn parallel_for_each<F>(&self, f: F)
    where F: Fn(&T) + Sync
    {
        for_each(self, f)
    }
}

pub struct ParallelForEach<'a, T, F>
where T: Sync,
F: Fn(&T) + Sync
{
    items: &'a [T],
    f: F,
    num_threads: usize,
}

impl<'a, T, F> ParallelForEach<'a, T, F>
where T: Sync,
F: Fn(&T) + Sync
{
    pub fn new(items: &'a [T], f: F) -> Self {
        Self {
            items,
            f,
            num_threads: available_threads(),
        }
    }

    /// Overrides the number of threads. The pool is never larger than the item count.
    pub fn threads(mut self, nthreads: usize) -> Self {
        self.num_threads = nthreads;
        self
    }

    /// Threads that `run` will actually start.
    pub fn num_threads(&self) -> usize {
        usize::min(self.num_threads, self.items.len())
    }

    pub fn run(self) {
        let num_threads = self.num_threads();
        if num_threads == 0 {
            return;
        }

        let cursor = AtomicUsize::new(0);
        let items = self.items;
        let f = &self.f;

        std::thread::scope(|s| {
            for _ in 0..num_threads {
                let cursor = &cursor;
                s.spawn(move || Self::task_loop(items, cursor, f));
            }
        });
    }

    fn task_loop(items: &[T], cursor: &AtomicUsize, f: &F) {
        loop {
            let index = cursor.fetch_add(1, Ordering::Relaxed);
            match items.get(index) {
                Some(item) => f(item),
                None => break,
            }
        }
    }
}
