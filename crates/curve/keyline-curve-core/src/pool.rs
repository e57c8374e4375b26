//! Scratch buffer pool for array-valued evaluation.
//!
//! The array hot path must not allocate per call, so temporaries come from a
//! shared free-list. Acquisition is scoped: [`ScratchPool::rent`] hands out a
//! [`ScratchBuffer`] guard that returns its buffer on drop, so every rent is
//! paired with exactly one return on every exit path, error propagation
//! included. Rent/return counters make that balance observable in tests.

use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

/// Thread-safe pool of `f32` scratch buffers.
#[derive(Debug, Default)]
pub struct ScratchPool {
    free: Mutex<Vec<Vec<f32>>>,
    rented: AtomicUsize,
    returned: AtomicUsize,
}

impl ScratchPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default pool.
    pub fn shared() -> &'static ScratchPool {
        static SHARED: OnceLock<ScratchPool> = OnceLock::new();
        SHARED.get_or_init(ScratchPool::new)
    }

    /// Rent a zeroed buffer of exactly `len` elements.
    pub fn rent(&self, len: usize) -> ScratchBuffer<'_> {
        let mut buf = self.free.lock().expect("scratch pool poisoned").pop().unwrap_or_default();
        buf.clear();
        buf.resize(len, 0.0);
        self.rented.fetch_add(1, Ordering::Relaxed);
        ScratchBuffer { pool: self, buf }
    }

    /// Total rents since the pool was created.
    pub fn rent_count(&self) -> usize {
        self.rented.load(Ordering::Relaxed)
    }

    /// Total returns since the pool was created.
    pub fn return_count(&self) -> usize {
        self.returned.load(Ordering::Relaxed)
    }

    /// Buffers currently rented out. Zero once all guards have dropped.
    pub fn outstanding(&self) -> usize {
        self.rent_count() - self.return_count()
    }

    fn give_back(&self, buf: Vec<f32>) {
        self.free.lock().expect("scratch pool poisoned").push(buf);
        self.returned.fetch_add(1, Ordering::Relaxed);
    }
}

/// Scoped ownership of a pooled buffer; dereferences to `[f32]`.
#[derive(Debug)]
pub struct ScratchBuffer<'a> {
    pool: &'a ScratchPool,
    buf: Vec<f32>,
}

impl Deref for ScratchBuffer<'_> {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        &self.buf
    }
}

impl DerefMut for ScratchBuffer<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut self.buf
    }
}

impl Drop for ScratchBuffer<'_> {
    fn drop(&mut self) {
        self.pool.give_back(mem::take(&mut self.buf));
    }
}
